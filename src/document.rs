//! Editor document buffers and merging of generated code

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::reply::AssistantReply;

pub const CSS_SEPARATOR: &str = "/* AI-generated CSS */";
pub const JS_SEPARATOR: &str = "// AI-generated JavaScript";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentPart {
    Html,
    Css,
    Js,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    Replaced,
    Appended,
}

/// One buffer touched by [`EditorDocument::apply_reply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChange {
    pub part: DocumentPart,
    pub mode: MergeMode,
}

impl fmt::Display for DocumentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = match self.part {
            DocumentPart::Html => "HTML",
            DocumentPart::Css => "CSS",
            DocumentPart::Js => "JavaScript",
        };
        let mode = match self.mode {
            MergeMode::Replaced => "replaced",
            MergeMode::Appended => "appended",
        };
        write!(f, "{} {}", part, mode)
    }
}

/// The HTML, CSS and JavaScript the editor is showing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorDocument {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl EditorDocument {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Merges every code block of `reply` into the buffers
    ///
    /// A complete HTML document replaces the page; a fragment goes at the end
    /// of `<body>` (or the end of the buffer when there is no body). CSS and
    /// JavaScript replace an empty buffer and are otherwise appended after a
    /// separator comment.
    pub fn apply_reply(&mut self, reply: &AssistantReply) -> Vec<DocumentChange> {
        let mut changes = Vec::new();

        if let Some(html) = &reply.html {
            changes.push(self.merge_html(html));
        }
        if let Some(css) = &reply.css {
            let mode = merge_with_separator(&mut self.css, css, CSS_SEPARATOR);
            changes.push(DocumentChange {
                part: DocumentPart::Css,
                mode,
            });
        }
        if let Some(js) = &reply.js {
            let mode = merge_with_separator(&mut self.js, js, JS_SEPARATOR);
            changes.push(DocumentChange {
                part: DocumentPart::Js,
                mode,
            });
        }

        debug!(changes = changes.len(), "Applied reply to document");
        changes
    }

    fn merge_html(&mut self, html: &str) -> DocumentChange {
        let mode = if is_full_document(html) || self.html.trim().is_empty() {
            self.html = html.to_string();
            MergeMode::Replaced
        } else {
            match find_ignore_ascii_case(&self.html, "</body>") {
                Some(index) => self.html.insert_str(index, &format!("{}\n", html)),
                None => {
                    self.html.push('\n');
                    self.html.push_str(html);
                }
            }
            MergeMode::Appended
        };

        DocumentChange {
            part: DocumentPart::Html,
            mode,
        }
    }
}

/// True for markup that is a whole page rather than a fragment
pub fn is_full_document(html: &str) -> bool {
    find_ignore_ascii_case(html, "<!doctype html>").is_some()
        || find_ignore_ascii_case(html, "<html").is_some()
}

fn merge_with_separator(buffer: &mut String, code: &str, separator: &str) -> MergeMode {
    if buffer.trim().is_empty() {
        *buffer = code.to_string();
        MergeMode::Replaced
    } else {
        buffer.push_str("\n\n");
        buffer.push_str(separator);
        buffer.push('\n');
        buffer.push_str(code);
        MergeMode::Appended
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().rfind(&needle.to_ascii_lowercase())
}
