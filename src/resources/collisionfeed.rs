//! Predicate-filtered collision feed.
//!
//! The [`collision_detector`](crate::systems::collision::collision_detector)
//! publishes every overlapping pair into the [`CollisionFeed`]. Each
//! subscriber registers a predicate and receives the contacts that pass it
//! through its own bounded queue, which it drains when it chooses.
//!
//! # Queue semantics
//!
//! - Queues are bounded by the configured capacity. A full queue drops the
//!   new contact with a warning; the pair is published again next tick for
//!   as long as the boxes keep overlapping.
//! - Subscription names are unique. Subscribing twice under the same name is
//!   an error, so at most one live subscription exists per consumer.
//! - A subscription whose [`CollisionSubscription`] was dropped is pruned the
//!   next time a contact would be delivered to it.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, TryIter, TrySendError, bounded};
use log::{debug, warn};

use crate::components::tags::Tags;
use crate::events::collision::CollisionEvent;

/// Filter deciding whether a contact is delivered to a subscriber. It sees
/// the event and the tags of `this` and `other`, if they carry any.
pub type ContactPredicate =
    Box<dyn Fn(&CollisionEvent, Option<&Tags>, Option<&Tags>) -> bool + Send + Sync>;

struct FeedSubscriber {
    name: String,
    predicate: ContactPredicate,
    tx: Sender<CollisionEvent>,
}

#[derive(Resource)]
pub struct CollisionFeed {
    capacity: usize,
    subscribers: Vec<FeedSubscriber>,
    published: u64,
    dropped: u64,
}

impl CollisionFeed {
    /// Create a feed whose subscription queues hold `capacity` contacts.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Vec::new(),
            published: 0,
            dropped: 0,
        }
    }

    /// Register a named subscriber. Fails if `name` is already subscribed.
    pub fn subscribe<F>(
        &mut self,
        name: impl Into<String>,
        predicate: F,
    ) -> Result<CollisionSubscription, String>
    where
        F: Fn(&CollisionEvent, Option<&Tags>, Option<&Tags>) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if self.is_subscribed(&name) {
            return Err(format!("Collision subscription '{}' is already live", name));
        }
        let (tx, rx) = bounded(self.capacity);
        self.subscribers.push(FeedSubscriber {
            name: name.clone(),
            predicate: Box::new(predicate),
            tx,
        });
        debug!("Collision feed: subscribed '{}'", name);
        Ok(CollisionSubscription { rx })
    }

    pub fn is_subscribed(&self, name: &str) -> bool {
        self.subscribers.iter().any(|s| s.name == name)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver a contact to every subscriber whose predicate accepts it.
    pub fn publish(
        &mut self,
        event: CollisionEvent,
        this_tags: Option<&Tags>,
        other_tags: Option<&Tags>,
    ) {
        self.published += 1;
        let dropped = &mut self.dropped;
        self.subscribers.retain(|subscriber| {
            if !(subscriber.predicate)(&event, this_tags, other_tags) {
                return true;
            }
            match subscriber.tx.try_send(event) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    *dropped += 1;
                    warn!(
                        "Collision feed: queue '{}' is full, dropping {:?}",
                        subscriber.name, event
                    );
                    true
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!(
                        "Collision feed: '{}' was dropped, unsubscribing",
                        subscriber.name
                    );
                    false
                }
            }
        });
    }

    /// Contacts published since creation, delivered or not.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Contacts lost to full queues since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Pull-style event source returned by [`CollisionFeed::subscribe`].
#[derive(Debug)]
pub struct CollisionSubscription {
    rx: Receiver<CollisionEvent>,
}

impl CollisionSubscription {
    /// Non-blocking drain of every contact already queued.
    pub fn drain(&self) -> TryIter<'_, CollisionEvent> {
        self.rx.try_iter()
    }

    /// Number of queued contacts.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}
