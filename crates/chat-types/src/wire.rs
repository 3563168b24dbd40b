//! HTTP wire contract for the chat endpoint.
//!
//! Request: `POST {base_url}/chat` with `{"message": "<text>"}`.
//! Reply: any 2xx with `{"response": "<text>", "timestamp"?: "<RFC 3339>"}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
