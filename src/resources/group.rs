//! Tracked groups resource for entity counting.
//!
//! The [`TrackedGroups`] resource names the tags whose population the
//! [`update_group_counts_system`](crate::systems::signals::update_group_counts_system)
//! publishes into [`WorldSignals`](crate::resources::worldsignals::WorldSignals)
//! as `"group_count:{tag}"`. The simulation tracks `"coin"` by default.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Resource, Default)]
pub struct TrackedGroups {
    /// The set of tag names currently being tracked.
    pub groups: FxHashSet<String>,
}

impl TrackedGroups {
    /// Builder method to add a tag name to track.
    pub fn with(mut self, group_name: impl Into<String>) -> Self {
        self.add_group(group_name);
        self
    }

    /// Adds a tag name to the set of tracked groups.
    pub fn add_group(&mut self, group_name: impl Into<String>) {
        self.groups.insert(group_name.into());
    }

    /// Returns `true` if the given tag name is being tracked.
    pub fn has_group(&self, group_name: impl AsRef<str>) -> bool {
        self.groups.contains(group_name.as_ref())
    }

    /// Returns an iterator over all tracked tag names.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.groups.iter()
    }
}
