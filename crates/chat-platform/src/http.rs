//! HTTP adapter for the chat endpoint.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility. Exactly one
//! POST per send; any non-2xx status, connection failure, or malformed body
//! comes back as a tagged `ChatError`.

use async_trait::async_trait;
use gloo_net::http::Request;

use chat_core::ports::ChatApi;
use chat_types::{
    config::ClientConfig,
    wire::{ChatReply, ChatRequest},
    ChatError, Result,
};

pub struct HttpChatClient {
    base_url: String,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

#[async_trait(?Send)]
impl ChatApi for HttpChatClient {
    async fn post_chat(&self, message: &str) -> Result<ChatReply> {
        let body = ChatRequest { message: message.to_string() };

        let response = Request::post(&self.endpoint())
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ChatError::Http { status, body });
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))
    }
}
