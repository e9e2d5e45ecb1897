use async_trait::async_trait;
use line_relay_core::{DispatchError, MessagingApi, PushRequest, Reply};
use reqwest::header;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::RelayConfig;

/// Messaging API client. Reply and push share one request path.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    reply_url: String,
    push_url: String,
    token: String,
}

impl LineClient {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("line-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: &RelayConfig) -> Self {
        Self {
            http,
            reply_url: config.reply_url(),
            push_url: config.push_url(),
            token: config.access_token().to_string(),
        }
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<(), DispatchError> {
        let body = serde_json::to_vec(payload).map_err(DispatchError::Serialization)?;
        debug!(url, bytes = body.len(), "posting to messaging api");
        let res = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| DispatchError::Transport(err.into()))?;

        classify_response(res).await
    }
}

async fn classify_response(res: reqwest::Response) -> Result<(), DispatchError> {
    let status = res.status();
    let body = res.text().await.unwrap_or_else(|_| "<empty>".to_string());
    info!(status = %status, body = %body, "messaging api responded");

    if status.is_success() {
        return Ok(());
    }
    Err(DispatchError::Remote { status, body })
}

#[async_trait]
impl MessagingApi for LineClient {
    async fn reply(&self, reply: &Reply) -> Result<(), DispatchError> {
        self.post_json(&self.reply_url, reply).await
    }

    async fn push(&self, request: &PushRequest) -> Result<(), DispatchError> {
        self.post_json(&self.push_url, request).await
    }
}
