//! Assistant reply parsing
//!
//! Completion replies mix prose with fenced code blocks. The first `html`,
//! `css` and `javascript` (or `js`) blocks are lifted out for the editor; the
//! prose with every block removed is what the intent extractor reads.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

/// A completion reply split into prose and code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    /// The full reply text, unchanged
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
}

fn fence_regex() -> &'static Regex {
    static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
    FENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?s)```(?P<lang>[A-Za-z0-9_+-]*)[^\n`]*\n?(?P<body>.*?)```")
            .expect("Invalid code fence regex")
    })
}

fn blank_lines_regex() -> &'static Regex {
    static BLANK_LINES_REGEX: OnceLock<Regex> = OnceLock::new();
    BLANK_LINES_REGEX
        .get_or_init(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").expect("Invalid blank line regex"))
}

impl AssistantReply {
    pub fn parse(raw: &str) -> Self {
        let mut reply = AssistantReply {
            message: raw.to_string(),
            ..Default::default()
        };

        for caps in fence_regex().captures_iter(raw) {
            let body = caps["body"].trim();
            if body.is_empty() {
                continue;
            }
            let slot = match caps["lang"].to_lowercase().as_str() {
                "html" => &mut reply.html,
                "css" => &mut reply.css,
                "javascript" | "js" => &mut reply.js,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(body.to_string());
            }
        }

        debug!(
            message_len = raw.len(),
            html = reply.html.is_some(),
            css = reply.css.is_some(),
            js = reply.js.is_some(),
            "Parsed assistant reply"
        );

        reply
    }

    pub fn has_code(&self) -> bool {
        self.html.is_some() || self.css.is_some() || self.js.is_some()
    }

    /// The message with every fenced block removed and blank runs collapsed
    pub fn prose(&self) -> String {
        let stripped = fence_regex().replace_all(&self.message, "");
        blank_lines_regex()
            .replace_all(stripped.trim(), "\n\n")
            .into_owned()
    }
}
