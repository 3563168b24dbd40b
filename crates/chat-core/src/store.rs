//! The message store — session-lifetime state container and request
//! lifecycle.
//!
//! Owns the one `ChatState` instance. Every mutation happens in a
//! synchronous section, publishes a `ChatEvent` on the bus, and rewrites the
//! serialized state into the storage slot. The network call in
//! `send_message` is the only suspension point, and the store borrow is
//! released across it so readers (the UI frame) and a concurrent second
//! sender never hit an aliased borrow.

use std::cell::RefCell;
use std::rc::Rc;

use chat_types::{
    event::ChatEvent,
    message::{Message, Sender},
    state::ChatState,
    wire::ChatReply,
    ChatError, Result,
};
use crate::bus::ChatBus;
use crate::ports::{ChatApi, StoragePort};

/// Storage slot holding the serialized `ChatState`
pub const STATE_STORAGE_KEY: &str = "chat:state";

/// Shared handle to the store, as held by the app and by send futures.
pub type SharedStore = Rc<RefCell<ChatStore>>;

pub struct ChatStore {
    state: ChatState,
    bus: ChatBus,
    storage: Rc<dyn StoragePort>,
}

impl ChatStore {
    pub fn new(bus: ChatBus, storage: Rc<dyn StoragePort>) -> Self {
        Self {
            state: ChatState::default(),
            bus,
            storage,
        }
    }

    pub fn new_shared(bus: ChatBus, storage: Rc<dyn StoragePort>) -> SharedStore {
        Rc::new(RefCell::new(Self::new(bus, storage)))
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// Rehydrate from the storage slot. Called once at startup; an absent or
    /// unreadable slot starts from empty state.
    pub fn hydrate(&mut self) {
        let raw = match self.storage.get(STATE_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                log::warn!("chat state slot unreadable: {}", e);
                return;
            }
        };

        match serde_json::from_str::<ChatState>(&raw) {
            Ok(mut restored) => {
                // A fresh session has no outstanding request, whatever the
                // mirror captured mid-flight.
                restored.is_loading = false;
                let message_count = restored.messages.len();
                self.state = restored;
                self.bus.emit(ChatEvent::HistoryRestored { message_count });
                log::info!(
                    "restored {} messages from {}",
                    message_count,
                    self.storage.backend_name()
                );
            }
            Err(e) => {
                log::warn!("discarding unreadable chat state: {}", e);
            }
        }
    }

    /// Append a message with a fresh id and capture timestamp.
    /// Pure append; no failure mode.
    pub fn add_message(&mut self, sender: Sender, text: impl Into<String>) -> Message {
        let message = Message::new(sender, text);
        self.push_message(message.clone());
        message
    }

    /// Reset the history and clear the last error. The loading flag belongs
    /// to the in-flight request and is left alone.
    pub fn clear_messages(&mut self) {
        self.state.messages.clear();
        self.state.error = None;
        self.bus.emit(ChatEvent::HistoryCleared);
        self.persist();
    }

    /// Run one send lifecycle: append the user message, POST it, append the
    /// reply (or record the failure).
    ///
    /// Takes the shared handle rather than `&mut self` so the borrow is not
    /// held across the await. A call while another send is in flight is
    /// rejected with `ChatError::Busy` and mutates nothing.
    pub async fn send_message(
        store: &SharedStore,
        api: &dyn ChatApi,
        text: &str,
    ) -> Result<()> {
        store.borrow_mut().begin_send(text)?;

        let outcome = api.post_chat(text).await;

        let mut this = store.borrow_mut();
        match outcome {
            Ok(reply) => {
                this.finish_send(reply);
                Ok(())
            }
            Err(e) => {
                this.fail_send(&e);
                Err(e)
            }
        }
    }

    /// `idle → sending`: flip the loading flag, clear the previous error,
    /// append the user message.
    fn begin_send(&mut self, text: &str) -> Result<()> {
        if self.state.is_loading {
            return Err(ChatError::Busy);
        }
        self.state.is_loading = true;
        self.state.error = None;
        self.bus.emit(ChatEvent::SendStarted);
        self.push_message(Message::user(text));
        Ok(())
    }

    /// `sending → idle` on success: append the bot reply, stamped with the
    /// backend time when the wire carried one.
    fn finish_send(&mut self, reply: ChatReply) {
        self.state.is_loading = false;
        let message = match reply.timestamp {
            Some(ts) => Message::bot_at(reply.response, ts),
            None => Message::bot(reply.response),
        };
        self.push_message(message);
        self.bus.emit(ChatEvent::SendFinished);
    }

    /// `sending → idle` on failure: no bot message; the failure surfaces
    /// only through the error field. Retry is a fresh user-initiated send.
    fn fail_send(&mut self, error: &ChatError) {
        let display = error.to_string();
        self.state.is_loading = false;
        self.state.error = Some(display.clone());
        self.bus.emit(ChatEvent::SendFailed { message: display });
        log::error!("send failed: {}", error);
        self.persist();
    }

    fn push_message(&mut self, message: Message) {
        self.state.messages.push(message.clone());
        self.bus.emit(ChatEvent::MessageAdded { message });
        self.persist();
    }

    /// Mirror the whole state into the storage slot. Best effort; a failed
    /// mirror never interrupts the session.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize chat state: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(STATE_STORAGE_KEY, &json) {
            log::warn!(
                "failed to mirror chat state to {}: {}",
                self.storage.backend_name(),
                e
            );
        }
    }
}
