//! Coin lifecycle: scheduled spawning under a population ceiling.
//!
//! Every spawn period (`1 / spawn_per_second` seconds of scaled time) is one
//! spawn opportunity. An opportunity spawns exactly one coin in the middle
//! third of the arena if the live coin population is below the ceiling, and
//! is skipped otherwise. Skipped opportunities are not queued.
//!
//! Coins leave the population through
//! [`consume_coins`](crate::systems::consumption::consume_coins) or
//! [`coin_despawn_at_edge`](crate::systems::boundary::coin_despawn_at_edge).

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::tags::{COIN_TAG, Tags};
use crate::game::coin_bundle;
use crate::resources::arena::Arena;
use crate::resources::simconfig::SimConfig;
use crate::resources::spawner::CoinSpawner;
use crate::resources::stats::SimStats;
use crate::resources::worldtime::WorldTime;

pub fn spawn_coins(
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    arena: Res<Arena>,
    mut spawner: ResMut<CoinSpawner>,
    mut stats: ResMut<SimStats>,
    tags: Query<&Tags>,
    mut commands: Commands,
) {
    let Some(period) = config.spawn_period() else {
        return;
    };
    let due = spawner.advance(time.delta, period);
    if due == 0 {
        return;
    }

    // opportunities beyond the free headroom are skipped without looping
    let population = tags.iter().filter(|t| t.has(COIN_TAG)).count();
    let headroom = config.coin_max_population.saturating_sub(population) as u64;
    let spawned = due.min(headroom);
    let (min, max) = arena.spawn_region();
    for _ in 0..spawned {
        let position = spawner.sample(min, max);
        commands.spawn(coin_bundle(position, &config));
    }
    stats.coins_spawned += spawned;
    stats.spawns_skipped += due - spawned;
    debug!(
        "Coin spawn: {} due, {} spawned, population {}",
        due,
        spawned,
        population as u64 + spawned
    );
}
