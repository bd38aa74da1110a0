//! Boundary sweep: despawn coins that cross the arena edge.
//!
//! Only the grid's border cells are inspected. Because grid keys are clamped,
//! a coin that has crossed an edge is always bucketed into a border cell,
//! provided cells are at least as large as the coin box
//! ([`SimConfig::validate`](crate::resources::simconfig::SimConfig::validate)
//! enforces this). Work is bounded by the border population instead of the
//! whole coin population.
//!
//! A coin is despawned when its position is closer to an edge than its box
//! size on that axis:
//! - vertical: `y < box.h` or `height - y < box.h`
//! - horizontal: `x < box.w` or `width - x < box.w`

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashSet;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::tags::{COIN_TAG, Tags};
use crate::resources::arena::Arena;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::stats::SimStats;

/// Despawn coins in border cells whose box crosses the arena edge.
///
/// Grid entries may refer to coins consumed earlier in the tick; those fail
/// the query lookup and are skipped.
pub fn coin_despawn_at_edge(
    grid: Res<SpatialGrid>,
    arena: Res<Arena>,
    mut stats: ResMut<SimStats>,
    coins: Query<(&MapPosition, &BoxCollider, &Tags)>,
    mut commands: Commands,
    mut swept: Local<FxHashSet<Entity>>,
) {
    swept.clear();
    for (cx, cy) in grid.border_cells() {
        for &entity in grid.cell(cx, cy) {
            let Ok((position, collider, tags)) = coins.get(entity) else {
                continue;
            };
            if !tags.has(COIN_TAG) || swept.contains(&entity) {
                continue;
            }
            if arena.crosses_edge(position.pos, collider.size) {
                swept.insert(entity);
                commands.entity(entity).try_despawn();
            }
        }
    }
    if !swept.is_empty() {
        debug!("Boundary sweep removed {} coins", swept.len());
        stats.coins_swept += swept.len() as u64;
    }
}
