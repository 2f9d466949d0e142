//! Chat session state
//!
//! A session owns the rolling conversation and the currently selected element.
//! It is an ordinary value the caller passes around; nothing in the crate keeps
//! conversation state globally.
//!
//! The system prompt is sent first on every request and is never evicted. User
//! and assistant messages are kept in a window of `history_limit` messages;
//! pushing past the limit drops the oldest, along with any assistant reply
//! that would be left at the front without its user message.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

use crate::intent::ElementTag;
use crate::llm::{ChatMessage, ChatRequest, MessageRole};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a website design assistant. \
Help the user build and modify their website with short, concrete answers that include working code.\n\
- When asked to change something, reply with the exact code for the change.\n\
- Put code in fenced blocks labelled html, css or javascript.\n\
- When an element is selected, suggest two or three specific improvements for it.\n\
- Say what you are changing in one plain sentence, for example \"I'll make the header blue.\"";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub system_prompt: String,
    /// Maximum user/assistant messages retained; at least 1
    pub history_limit: usize,
    pub max_tokens: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_tokens: None,
        }
    }
}

/// Description of the element the user clicked in the preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedElement {
    pub tag: ElementTag,
    pub html_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

impl SelectedElement {
    /// Builds a description from an HTML tag name alone
    pub fn from_html_tag(html_tag: &str) -> Self {
        Self {
            tag: ElementTag::from_html_tag(html_tag),
            html_tag: html_tag.to_lowercase(),
            class_name: None,
            id: None,
            text_content: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    config: SessionConfig,
    history: VecDeque<ChatMessage>,
    selected: Option<SelectedElement>,
}

impl ChatSession {
    pub fn new(mut config: SessionConfig) -> Self {
        config.history_limit = config.history_limit.max(1);
        Self {
            history: VecDeque::with_capacity(config.history_limit + 1),
            config,
            selected: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Records a user message and returns the content actually stored
    ///
    /// With an element selected the message is prefixed with
    /// `[Selected element: <tag>] ` so the model knows what "it" refers to.
    pub fn push_user(&mut self, message: &str) -> String {
        let content = match &self.selected {
            Some(selected) => format!("[Selected element: {}] {}", selected.tag, message),
            None => message.to_string(),
        };
        self.push(ChatMessage::user(content.clone()));
        content
    }

    pub fn push_assistant(&mut self, message: &str) {
        self.push(ChatMessage::assistant(message));
    }

    fn push(&mut self, message: ChatMessage) {
        self.history.push_back(message);
        let mut evicted = false;
        while self.history.len() > self.config.history_limit {
            self.history.pop_front();
            evicted = true;
            trace!(limit = self.config.history_limit, "Evicted oldest history message");
        }
        // The window never opens on an orphaned assistant reply
        while evicted
            && self
                .history
                .front()
                .is_some_and(|m| m.role == MessageRole::Assistant)
        {
            self.history.pop_front();
            trace!("Evicted assistant reply left without its user message");
        }
    }

    /// Retained user/assistant messages, oldest first
    pub fn history(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Builds the request for the next completion: system prompt, then history
    pub fn request(&self) -> ChatRequest {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(self.config.system_prompt.clone()));
        messages.extend(self.history.iter().cloned());

        let request = ChatRequest::new(messages);
        match self.config.max_tokens {
            Some(max_tokens) => request.with_max_tokens(max_tokens),
            None => request,
        }
    }

    pub fn select(&mut self, element: Option<SelectedElement>) {
        self.selected = element;
    }

    pub fn selected(&self) -> Option<&SelectedElement> {
        self.selected.as_ref()
    }

    pub fn selected_tag(&self) -> Option<&ElementTag> {
        self.selected.as_ref().map(|s| &s.tag)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
