//! String tag set for coarse entity classification.
//!
//! Systems filter entities by tag rather than by marker components, so
//! collaborators outside the simulation core (collision predicates,
//! presentation) can classify entities with plain strings.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashSet;

/// Tag carried by every coin entity.
pub const COIN_TAG: &str = "coin";
/// Tag carried by the single player entity.
pub const PLAYER_TAG: &str = "player";

#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tags(FxHashSet<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn has(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
