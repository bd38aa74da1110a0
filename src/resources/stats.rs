use bevy_ecs::prelude::Resource;

/// Lifetime counters reported by the headless runner.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimStats {
    /// Coins spawned since start.
    pub coins_spawned: u64,
    /// Spawn opportunities skipped because the population was at its ceiling.
    pub spawns_skipped: u64,
    /// Coins removed by the boundary sweep.
    pub coins_swept: u64,
}
