//! Running score resource.
//!
//! Only the consumption pipeline awards points. The total lives for the whole
//! process; there is no persistence.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    total: u64,
    consumed: u64,
}

impl Score {
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of consumption events that awarded points.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Adds `reward` for one consumed coin and returns the new total.
    pub fn award(&mut self, reward: u64) -> u64 {
        self.total += reward;
        self.consumed += 1;
        self.total
    }
}
