//! Synchronous topic-keyed publish/subscribe

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{Subscription, Topic, WindowEvent};

type Handler = Rc<dyn Fn(&WindowEvent)>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    topics: HashMap<Topic, Vec<(u64, Handler)>>,
}

impl Subscribers {
    fn remove(&mut self, topic: Topic, id: u64) {
        if let Some(handlers) = self.topics.get_mut(&topic) {
            handlers.retain(|(hid, _)| *hid != id);
        }
    }
}

/// Event bus shared by the registry and every listener.
///
/// Cloning yields another handle to the same subscriber table. The bus holds
/// no business state; delivery is synchronous and in subscription order.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Rc<RefCell<Subscribers>>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`.
    ///
    /// The returned [`Subscription`] removes exactly this registration.
    pub fn subscribe(
        &self,
        topic: Topic,
        handler: impl Fn(&WindowEvent) + 'static,
    ) -> Subscription {
        let id = {
            let mut subs = self.subscribers.borrow_mut();
            let id = subs.next_id;
            subs.next_id += 1;
            subs.topics
                .entry(topic)
                .or_default()
                .push((id, Rc::new(handler)));
            id
        };

        let weak: Weak<RefCell<Subscribers>> = Rc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(subs) = weak.upgrade() {
                subs.borrow_mut().remove(topic, id);
            }
        })
    }

    /// Deliver `event` to every handler currently subscribed to its topic.
    ///
    /// Delivery walks a snapshot taken before the first call, so handlers
    /// may subscribe, unsubscribe or publish while it runs. Handlers added
    /// during delivery do not see the in-flight event.
    pub fn publish(&self, event: &WindowEvent) {
        let topic = event.topic();
        let snapshot: Vec<(u64, Handler)> = match self.subscribers.borrow().topics.get(&topic) {
            Some(handlers) => handlers.clone(),
            None => return,
        };

        log::trace!("publish {} to {} handler(s)", topic.as_str(), snapshot.len());

        for (id, handler) in snapshot {
            // Skip handlers removed by an earlier handler in this delivery
            if !self.is_subscribed(topic, id) {
                continue;
            }
            handler(event);
        }
    }

    /// Number of handlers registered for `topic`
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers
            .borrow()
            .topics
            .get(&topic)
            .map_or(0, Vec::len)
    }

    fn is_subscribed(&self, topic: Topic, id: u64) -> bool {
        self.subscribers
            .borrow()
            .topics
            .get(&topic)
            .is_some_and(|handlers| handlers.iter().any(|(hid, _)| *hid == id))
    }
}
