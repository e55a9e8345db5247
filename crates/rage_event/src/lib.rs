//! # rage_event - Topic Bus
//!
//! Synchronous publish/subscribe keyed by topic name:
//! - Topics are defined explicitly or implicitly on first subscription
//! - Publishing fans out to every current subscriber in the calling thread
//! - Subscription tokens are unique across the whole bus
//!
//! Fan-out order between subscribers of one topic is not part of the
//! contract. Listeners get no access to the bus; `publish` borrows it shared
//! while `subscribe`/`unsubscribe` need it exclusively, so changing the
//! subscriptions from inside a fan-out is not supported.

use std::collections::BTreeMap;
use std::fmt;

pub use serde_json::Value;

/// Listener invoked with the topic name and the published arguments
pub type TopicListener = Box<dyn Fn(&str, &[Value]) + Send + Sync>;

/// Handle for one subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionToken(pub u64);

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bus of named topics
pub struct TopicBus {
    /// Subscribers by topic, in token order
    topics: BTreeMap<String, BTreeMap<SubscriptionToken, TopicListener>>,
    /// Last token handed out
    last_token: u64,
}

impl TopicBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            topics: BTreeMap::new(),
            last_token: 0,
        }
    }

    /// Define a topic. Returns `false` if it already existed.
    pub fn define(&mut self, topic: &str) -> bool {
        if self.topics.contains_key(topic) {
            return false;
        }
        self.topics.insert(topic.to_string(), BTreeMap::new());
        log::trace!("Defined topic '{}'", topic);
        true
    }

    /// Publish to every subscriber of `topic`.
    ///
    /// Returns `false` without calling anything when the topic was never
    /// defined.
    pub fn publish(&self, topic: &str, args: &[Value]) -> bool {
        let Some(subscribers) = self.topics.get(topic) else {
            return false;
        };

        log::trace!("Publishing '{}' to {} subscriber(s)", topic, subscribers.len());
        for listener in subscribers.values() {
            listener(topic, args);
        }
        true
    }

    /// Subscribe to a topic, defining it if needed
    pub fn subscribe<F>(&mut self, topic: &str, listener: F) -> SubscriptionToken
    where
        F: Fn(&str, &[Value]) + Send + Sync + 'static,
    {
        self.last_token += 1;
        let token = SubscriptionToken(self.last_token);

        self.topics
            .entry(topic.to_string())
            .or_default()
            .insert(token, Box::new(listener));

        token
    }

    /// Remove the subscription holding `token`, wherever it is
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.topics
            .values_mut()
            .any(|subscribers| subscribers.remove(&token).is_some())
    }

    /// Check if a topic is defined
    pub fn is_defined(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of subscribers of a topic (0 when undefined)
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, BTreeMap::len)
    }

    /// Defined topic names
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    /// Drop every topic and subscription and restart token numbering
    pub fn reset(&mut self) {
        self.topics.clear();
        self.last_token = 0;
    }
}

impl Default for TopicBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TopicBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicBus")
            .field("topics", &self.topics.len())
            .field("last_token", &self.last_token)
            .finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{SubscriptionToken, TopicBus, TopicListener, Value};
}
