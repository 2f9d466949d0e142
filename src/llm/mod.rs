//! Chat completion client abstraction
//!
//! A trait-based seam over the hosted completion API, so the bridge can run
//! against the real endpoint, a retrying wrapper, or a scripted mock.

mod client;
mod completion;
mod error;
mod mock;
mod retry;
mod types;

pub use client::ChatClient;
pub use completion::CompletionClient;
pub use error::BackendError;
pub use mock::{MockChatClient, MockResponse};
pub use retry::{RetryPolicy, RetryingClient};
pub use types::{ChatMessage, ChatRequest, ChatResponse, MessageRole, TokenUsage};
