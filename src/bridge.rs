//! Editor bridge: one chat turn from user message to editor action
//!
//! The bridge sends the session's request, falls back to a canned reply when
//! the backend fails, and decides what the editor should do with the answer:
//! merge code, apply a recognised edit, or just show the text.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::document::{DocumentChange, EditorDocument};
use crate::fallback::fallback_reply;
use crate::intent::{extract, extract_user_command_with_selection, EditIntent};
use crate::llm::{BackendError, ChatClient};
use crate::reply::AssistantReply;
use crate::session::ChatSession;

/// Which message an edit was recognised in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentSource {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TurnAction {
    /// Code from the reply was merged into the document
    ApplyCode { changes: Vec<DocumentChange> },
    /// A structured edit for the editor to apply itself
    Edit {
        intent: EditIntent,
        source: IntentSource,
    },
    /// Nothing to apply; show the reply text
    None,
}

/// Result of one chat turn
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub reply: AssistantReply,
    pub action: TurnAction,
    /// Set when the backend failed and `reply` is a canned fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<String>,
}

impl Turn {
    pub fn used_fallback(&self) -> bool {
        self.backend_error.is_some()
    }
}

pub struct EditorBridge<C> {
    client: C,
    document: EditorDocument,
}

impl<C: ChatClient> EditorBridge<C> {
    pub fn new(client: C) -> Self {
        Self::with_document(client, EditorDocument::default())
    }

    pub fn with_document(client: C, document: EditorDocument) -> Self {
        Self { client, document }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn document(&self) -> &EditorDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut EditorDocument {
        &mut self.document
    }

    pub async fn process_message(&mut self, session: &mut ChatSession, message: &str) -> Turn {
        session.push_user(message);

        let (raw, backend_error) = match self.client.chat(session.request()).await {
            Ok(response) => (response.content, None),
            Err(e) => {
                error!(client = self.client.name(), error = %e, "Chat request failed, using fallback reply");
                (fallback_reply(message), Some(e))
            }
        };

        session.push_assistant(&raw);
        let reply = AssistantReply::parse(&raw);
        let action = self.decide(&reply, session, message);

        info!(
            action = action_name(&action),
            fallback = backend_error.is_some(),
            "Processed chat turn"
        );

        Turn {
            reply,
            action,
            backend_error: backend_error.as_ref().map(BackendError::to_string),
        }
    }

    fn decide(&mut self, reply: &AssistantReply, session: &ChatSession, message: &str) -> TurnAction {
        if reply.has_code() {
            let changes = self.document.apply_reply(reply);
            return TurnAction::ApplyCode { changes };
        }

        let intent = extract_user_command_with_selection(message, session.selected_tag());
        if intent.is_match() {
            debug!(%intent, "User message is a direct command");
            return TurnAction::Edit {
                intent,
                source: IntentSource::User,
            };
        }

        let intent = extract(&reply.prose());
        if intent.is_match() {
            debug!(%intent, "Assistant reply announces an edit");
            return TurnAction::Edit {
                intent,
                source: IntentSource::Assistant,
            };
        }

        TurnAction::None
    }
}

fn action_name(action: &TurnAction) -> &'static str {
    match action {
        TurnAction::ApplyCode { .. } => "apply_code",
        TurnAction::Edit { .. } => "edit",
        TurnAction::None => "none",
    }
}
