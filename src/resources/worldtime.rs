//! Simulation clock.
//!
//! The clock only moves when the embedder ticks the simulation. `delta` is
//! the scaled length of the current tick and is what every system integrates
//! over; `elapsed` is the scaled sum of all deltas.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    /// Multiplier applied to every incoming tick delta. `0.0` pauses.
    pub time_scale: f32,
    pub ticks: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            ticks: 0,
        }
    }
}

impl WorldTime {
    /// Start a new tick of `dt` unscaled seconds and return its scaled delta.
    ///
    /// Negative or non-finite deltas count as a zero-length tick.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.ticks += 1;
        self.delta
    }
}
