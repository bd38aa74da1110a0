//! Coin spawn schedule.
//!
//! [`CoinSpawner`] accumulates scaled tick time and yields one spawn
//! opportunity per elapsed spawn period. Opportunities missed at the
//! population ceiling are dropped, never carried over.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use glam::Vec2;

#[derive(Resource, Debug, Clone)]
pub struct CoinSpawner {
    /// Time accumulated towards the next spawn opportunity, in seconds.
    pub accumulator: f32,
    rng: Rng,
}

impl CoinSpawner {
    /// Seeded spawners produce the same coin positions run after run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self {
            accumulator: 0.0,
            rng,
        }
    }

    /// Adds `dt` and returns how many spawn opportunities are now due.
    ///
    /// The count is computed in one step, so any ratio of accumulated time to
    /// `period` resolves in constant time. The remainder stays in
    /// `[0, period)`.
    pub fn advance(&mut self, dt: f32, period: f32) -> u64 {
        if !(period > 0.0) {
            return 0;
        }
        self.accumulator += dt;
        if !(self.accumulator >= period) {
            return 0;
        }
        let due = (self.accumulator / period).floor();
        self.accumulator = self.accumulator.rem_euclid(period);
        if self.accumulator >= period {
            self.accumulator = 0.0;
        }
        // float to int casts saturate
        due as u64
    }

    /// Uniform sample inside the rectangle `[min, max]`.
    pub fn sample(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        let t = Vec2::new(self.rng.f32(), self.rng.f32());
        min + (max - min) * t
    }
}
