use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Notifications published by the store on every state change.
/// Presentation subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A send entered flight: `is_loading` flipped on, `error` cleared
    SendStarted,

    /// A message was appended (user or bot)
    MessageAdded { message: Message },

    /// The in-flight send resolved successfully
    SendFinished,

    /// The in-flight send failed; `message` is the display string now in
    /// `ChatState::error`
    SendFailed { message: String },

    /// The history was cleared
    HistoryCleared,

    /// Startup rehydration replaced the state from the storage slot
    HistoryRestored { message_count: usize },
}
