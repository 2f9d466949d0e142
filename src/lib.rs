//! sitesmith - edit-intent extraction for an AI website builder
//!
//! A chat-driven website editor needs to know when a message describes a
//! concrete edit. This library recognises three kinds of edit in free text
//! (recolor a region, replace its text, add an element) and wires that into a
//! chat turn against an OpenAI-compatible completion endpoint.
//!
//! # Core Concepts
//!
//! - **Rule tables**: ordered `(pattern, constructor)` lists, evaluated first
//!   match wins. One table reads assistant prose ("I'll make the header blue"),
//!   another reads imperative user commands ("make the header blue").
//! - **Edit intents**: the structured [`EditIntent`] values the tables produce.
//!   `NoMatch` is an ordinary value, not an error.
//! - **Sessions**: an explicit [`ChatSession`] holding the system prompt, a
//!   bounded history and the selected element.
//! - **Bridge**: [`EditorBridge`] runs one chat turn and decides whether to
//!   merge code, apply an edit, or just show the reply.
//!
//! # Example Usage
//!
//! ```
//! use sitesmith::{extract, extract_user_command, ColorValue, EditIntent, ElementTag};
//!
//! let intent = extract("I'll make the header blue");
//! assert_eq!(
//!     intent,
//!     EditIntent::Recolor {
//!         target: ElementTag::Header,
//!         color: ColorValue::parse("blue").unwrap(),
//!     }
//! );
//!
//! assert!(extract_user_command("make the footer red").is_match());
//! assert!(!extract("The weather is nice").is_match());
//! ```
//!
//! # Project Structure
//!
//! - [`intent`]: rule tables and edit intent types
//! - [`reply`]: splitting assistant replies into prose and code
//! - [`llm`]: chat client trait, HTTP client, retries and a mock
//! - [`session`], [`selection`], [`document`], [`fallback`], [`bridge`]: the
//!   editor-side pieces of a chat turn

pub mod bridge;
pub mod cli;
pub mod config;
pub mod document;
pub mod fallback;
pub mod intent;
pub mod llm;
pub mod reply;
pub mod selection;
pub mod session;
pub mod util;

pub use bridge::{EditorBridge, IntentSource, Turn, TurnAction};
pub use config::{ConfigError, SitesmithConfig};
pub use document::{DocumentChange, EditorDocument};
pub use intent::{
    extract, extract_user_command, extract_user_command_with_selection, ColorValue, EditIntent,
    ElementKind, ElementTag,
};
pub use llm::{BackendError, ChatClient};
pub use reply::AssistantReply;
pub use selection::SelectionHost;
pub use session::{ChatSession, SelectedElement};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
