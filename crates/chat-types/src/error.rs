use thiserror::Error;

/// Tagged failure value returned by the endpoint client and the storage
/// backends. The store flattens these into one display string; nothing
/// downstream inspects ad hoc error shapes.
#[derive(Error, Debug, Clone)]
pub enum ChatError {
    #[error("network error: {0}")]
    Network(String),

    #[error("chat endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed chat response: {0}")]
    Decode(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("a message is already in flight")]
    Busy,
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Decode(e.to_string())
    }
}
