use serde::{Deserialize, Serialize};
use crate::message::Message;

/// The whole session state owned by the store.
///
/// One instance per page session. Serialized into the storage slot on every
/// mutation and rehydrated once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatState {
    /// Insertion-ordered, append-only (except a full clear)
    pub messages: Vec<Message>,
    /// True for the whole duration of the one outstanding request
    pub is_loading: bool,
    /// Display string of the last failed send, cleared on the next send
    pub error: Option<String>,
}
