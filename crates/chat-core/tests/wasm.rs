//! WASM-target tests for chat-core.
//!
//! Mirrors the key native store tests under wasm32-unknown-unknown, where
//! async tests can await the send lifecycle directly.

use wasm_bindgen_test::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use async_trait::async_trait;

use chat_core::bus::ChatBus;
use chat_core::ports::{ChatApi, StoragePort};
use chat_core::store::{ChatStore, SharedStore, STATE_STORAGE_KEY};
use chat_types::event::ChatEvent;
use chat_types::message::Sender;
use chat_types::wire::ChatReply;
use chat_types::{ChatError, Result};

struct StubApi {
    reply: Result<ChatReply>,
}

#[async_trait(?Send)]
impl ChatApi for StubApi {
    async fn post_chat(&self, _message: &str) -> Result<ChatReply> {
        self.reply.clone()
    }
}

#[derive(Default)]
struct StubStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl StoragePort for StubStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "stub"
    }
}

fn fresh_store() -> (SharedStore, ChatBus, Rc<StubStorage>) {
    let bus = ChatBus::new();
    let storage = Rc::new(StubStorage::default());
    let store = ChatStore::new_shared(bus.clone(), storage.clone());
    (store, bus, storage)
}

#[wasm_bindgen_test]
fn add_message_preserves_order_and_uniqueness() {
    let (store, _bus, _storage) = fresh_store();
    let mut store = store.borrow_mut();
    store.add_message(Sender::User, "first");
    store.add_message(Sender::Bot, "second");

    assert_eq!(store.state().messages[0].text, "first");
    assert_eq!(store.state().messages[1].text, "second");
    assert_ne!(store.state().messages[0].id, store.state().messages[1].id);
}

#[wasm_bindgen_test]
async fn send_message_success_appends_user_then_bot() {
    let (store, _bus, _storage) = fresh_store();
    let api = StubApi {
        reply: Ok(ChatReply { response: "hi".to_string(), timestamp: None }),
    };

    ChatStore::send_message(&store, &api, "hello").await.unwrap();

    let store = store.borrow();
    assert_eq!(store.state().messages.len(), 2);
    assert_eq!(store.state().messages[0].sender, Sender::User);
    assert_eq!(store.state().messages[1].sender, Sender::Bot);
    assert_eq!(store.state().messages[1].text, "hi");
    assert!(!store.state().is_loading);
}

#[wasm_bindgen_test]
async fn send_message_failure_sets_error_only() {
    let (store, bus, _storage) = fresh_store();
    let sub = bus.subscribe();
    let api = StubApi {
        reply: Err(ChatError::Http { status: 500, body: "boom".to_string() }),
    };

    let result = ChatStore::send_message(&store, &api, "x").await;
    assert!(result.is_err());

    let store = store.borrow();
    assert_eq!(store.state().messages.len(), 1);
    assert!(store.state().error.is_some());
    assert!(!store.state().is_loading);
    assert!(sub.drain().iter().any(|e| matches!(e, ChatEvent::SendFailed { .. })));
}

#[wasm_bindgen_test]
async fn persist_then_rehydrate_roundtrip() {
    let bus = ChatBus::new();
    let storage = Rc::new(StubStorage::default());
    let store = ChatStore::new_shared(bus.clone(), storage.clone());

    let api = StubApi {
        reply: Ok(ChatReply { response: "hi".to_string(), timestamp: None }),
    };
    ChatStore::send_message(&store, &api, "hello").await.unwrap();
    let original = store.borrow().state().clone();
    assert!(storage.slots.borrow().contains_key(STATE_STORAGE_KEY));

    let revived = ChatStore::new_shared(ChatBus::new(), storage);
    revived.borrow_mut().hydrate();
    assert_eq!(revived.borrow().state().messages, original.messages);
}

#[wasm_bindgen_test]
fn clear_messages_is_idempotent() {
    let (store, _bus, _storage) = fresh_store();
    let mut store = store.borrow_mut();
    store.add_message(Sender::User, "hello");

    store.clear_messages();
    store.clear_messages();
    assert!(store.state().messages.is_empty());
    assert!(store.state().error.is_none());
}
