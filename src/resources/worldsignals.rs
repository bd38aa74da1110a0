//! Global signal storage resource.
//!
//! The [`WorldSignals`] resource is the narrow surface the presentation layer
//! reads from. The simulation publishes the score, the player bounding box
//! and tracked group populations here; presentation never touches entities.
//!
//! Published keys
//! - `"score"` (integer) and the `"score_dirty"` flag, see
//!   [`crate::events::score`]
//! - `"player_box_w"`, `"player_box_h"` (scalars)
//! - `"group_count:{tag}"` (integer) for every tracked tag
//! - `"player"` (entity)

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::{FxHashMap, FxHashSet};

/// Prefix of the integer signals holding group populations.
pub const GROUP_COUNT_PREFIX: &str = "group_count:";

/// Global signal storage for cross-system communication.
#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    /// Floating-point numeric signals addressed by string keys.
    pub scalars: FxHashMap<String, f32>,
    /// Integer numeric signals addressed by string keys.
    pub integers: FxHashMap<String, i32>,
    /// Presence-only boolean flags; a key being present means "true".
    pub flags: FxHashSet<String>,
    /// Map of entities of interest for the presentation layer.
    pub entities: FxHashMap<String, Entity>,
}

impl WorldSignals {
    /// Set a floating-point signal value.
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.scalars.insert(key.into(), value);
    }
    /// Get a floating-point signal by key.
    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }
    /// Set an integer signal value.
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.integers.insert(key.into(), value);
    }
    /// Get an integer signal by key.
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }
    /// Mark a flag as present/true.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    /// Check whether a flag is present/true.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
    /// Get an entity by key.
    pub fn get_entity(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }
    /// Set an entity by key.
    pub fn set_entity(&mut self, key: impl Into<String>, entity: Entity) {
        self.entities.insert(key.into(), entity);
    }
    /// Publish the population of a tracked group.
    pub fn set_group_count(&mut self, group: &str, count: i32) {
        let key = format!("{GROUP_COUNT_PREFIX}{group}");
        if self.integers.get(&key) != Some(&count) {
            self.integers.insert(key, count);
        }
    }
    /// Population of a tracked group, if it has been published.
    pub fn get_group_count(&self, group: &str) -> Option<i32> {
        self.integers
            .get(&format!("{GROUP_COUNT_PREFIX}{group}"))
            .copied()
    }
}
