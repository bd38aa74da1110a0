use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::resources::spatialgrid::SpatialGrid;

/// Rebuild the [`SpatialGrid`] from this tick's positions.
///
/// Must run after [`movement`](crate::systems::movement::movement) and before
/// any system that reads the grid.
pub fn rebuild_spatial_grid(
    mut grid: ResMut<SpatialGrid>,
    query: Query<(Entity, &MapPosition), With<BoxCollider>>,
) {
    grid.rebuild(query.iter().map(|(entity, position)| (entity, position.pos)));
}
