use async_trait::async_trait;
use std::sync::Arc;

use crate::{DispatchError, PushRequest, Reply};

/// Outbound side of the messaging platform.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    async fn reply(&self, reply: &Reply) -> Result<(), DispatchError>;

    async fn push(&self, request: &PushRequest) -> Result<(), DispatchError>;
}

pub type SharedMessagingApi = Arc<dyn MessagingApi>;
