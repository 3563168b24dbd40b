//! Broadcast bus for decoupled communication between the store and its
//! subscribers (UI panels, the repaint trigger).
//!
//! The bus is single-threaded (WASM constraint) and uses interior mutability
//! via RefCell. Each subscriber registers its own queue; published events are
//! fanned out to every registered queue and drained independently (egui: once
//! per frame). Dropping a `Subscription` unregisters it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::ChatEvent;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    queues: Vec<(u64, VecDeque<ChatEvent>)>,
}

/// Shared bus handle — clone-cheap via Rc.
#[derive(Clone, Default)]
pub struct ChatBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ChatBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. Its queue only receives events published
    /// after this call.
    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.queues.push((id, VecDeque::new()));
        Subscription { id, bus: self.clone() }
    }

    /// Publish an event to every registered subscriber. Called by the store.
    pub fn emit(&self, event: ChatEvent) {
        let mut inner = self.inner.borrow_mut();
        let Some((last, rest)) = inner.queues.split_last_mut() else {
            return;
        };
        for (_, queue) in rest {
            queue.push_back(event.clone());
        }
        last.1.push_back(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().queues.len()
    }

    fn unsubscribe(&self, id: u64) {
        self.inner.borrow_mut().queues.retain(|(qid, _)| *qid != id);
    }
}

/// A registered subscriber's handle to its event queue.
/// Unregisters itself from the bus when dropped.
pub struct Subscription {
    id: u64,
    bus: ChatBus,
}

impl Subscription {
    /// Drain all pending events for this subscriber.
    pub fn drain(&self) -> Vec<ChatEvent> {
        let mut inner = self.bus.inner.borrow_mut();
        inner
            .queues
            .iter_mut()
            .find(|(qid, _)| *qid == self.id)
            .map(|(_, queue)| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Check if there are pending events (useful for egui repaint triggers).
    pub fn has_pending(&self) -> bool {
        self.bus
            .inner
            .borrow()
            .queues
            .iter()
            .find(|(qid, _)| *qid == self.id)
            .is_some_and(|(_, queue)| !queue.is_empty())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}
