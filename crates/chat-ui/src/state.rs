//! Presentation-only state that drives rendering.
//!
//! The conversation itself lives in the store; this holds what only the
//! panels care about (input text, status line, scroll and animation flags),
//! updated each frame by draining the store's event subscription.

use std::collections::HashSet;
use chat_types::event::ChatEvent;

pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Status line text
    pub status_text: String,
    /// One-shot: scroll the thread to the newest message
    scroll_to_bottom: bool,
    /// One-shot: render the next frame without entry animations
    /// (rehydrated history should not slide in)
    skip_entry_animations: bool,
    /// Message ids already rendered at least once
    pub(crate) seen_messages: HashSet<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            show_settings: false,
            status_text: "Ready".to_string(),
            scroll_to_bottom: false,
            skip_entry_animations: false,
            seen_messages: HashSet::new(),
        }
    }

    /// Process events from the store subscription and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SendStarted => {
                    self.status_text = "Sending...".to_string();
                }
                ChatEvent::MessageAdded { .. } => {
                    self.scroll_to_bottom = true;
                }
                ChatEvent::SendFinished => {
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::SendFailed { message } => {
                    self.status_text = format!("Error: {}", message);
                }
                ChatEvent::HistoryCleared => {
                    self.status_text = "Ready".to_string();
                    self.seen_messages.clear();
                }
                ChatEvent::HistoryRestored { .. } => {
                    self.scroll_to_bottom = true;
                    self.skip_entry_animations = true;
                }
            }
        }
    }

    pub fn take_scroll_to_bottom(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }

    pub(crate) fn take_skip_entry_animations(&mut self) -> bool {
        std::mem::take(&mut self.skip_entry_animations)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
