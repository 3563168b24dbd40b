//! Port traits — the boundary between the store and the browser.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chat_types::{wire::ChatReply, Result};

// ─── Chat Endpoint Port ──────────────────────────────────────

/// The remote chat endpoint. One operation: POST the user text, get the
/// reply back as a tagged success/failure value.
#[async_trait(?Send)]
pub trait ChatApi {
    async fn post_chat(&self, message: &str) -> Result<ChatReply>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Key-value slot storage for the session mirror.
///
/// Synchronous on purpose: the browser `localStorage` API is synchronous,
/// and the store mirrors state from inside synchronous mutation sections.
pub trait StoragePort {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
