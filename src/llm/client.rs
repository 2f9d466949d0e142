use super::error::BackendError;
use super::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError>;

    fn name(&self) -> &str;

    fn model_info(&self) -> Option<String> {
        None
    }
}

#[async_trait]
impl<C: ChatClient + ?Sized> ChatClient for Arc<C> {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        (**self).chat(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn model_info(&self) -> Option<String> {
        (**self).model_info()
    }
}
