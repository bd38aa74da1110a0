//! Collision contact events.
//!
//! The collision detector publishes one [`CollisionEvent`] per overlapping
//! pair per tick into the
//! [`CollisionFeed`](crate::resources::collisionfeed::CollisionFeed).
//! Subscribers pull them from bounded queues instead of reacting through
//! observers, so a consumer decides when in the tick it drains them.

use bevy_ecs::prelude::Entity;

/// Contact between two entities whose bounding boxes overlap.
///
/// The detector always publishes `this < other`; subscribers must not rely
/// on which side is which and should use [`CollisionEvent::counterpart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    pub this: Entity,
    pub other: Entity,
}

impl CollisionEvent {
    pub fn new(this: Entity, other: Entity) -> Self {
        Self { this, other }
    }

    /// The entity on the other side of the contact from `entity`, or `None`
    /// if `entity` takes no part in it.
    pub fn counterpart(&self, entity: Entity) -> Option<Entity> {
        if self.this == entity {
            Some(self.other)
        } else if self.other == entity {
            Some(self.this)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn counterpart_resolves_either_side() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();
        let event = CollisionEvent::new(a, b);

        assert_eq!(event.counterpart(a), Some(b));
        assert_eq!(event.counterpart(b), Some(a));
        assert_eq!(event.counterpart(c), None);
    }
}
