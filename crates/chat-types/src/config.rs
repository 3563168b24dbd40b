use serde::{Deserialize, Serialize};

/// Fallback when `CHAT_API_URL` is not set at build time
const DEV_BASE_URL: &str = "http://localhost:8000";

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the chat backend; the client posts to `{base_url}/chat`
    pub base_url: String,
    pub storage: StorageConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage: StorageConfig::default(),
        }
    }
}

/// Compile-time environment override, dev address otherwise
pub fn default_base_url() -> String {
    option_env!("CHAT_API_URL").unwrap_or(DEV_BASE_URL).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    #[default]
    Auto,
    Memory,
    LocalStorage,
}
