//! Collision detection feeding the [`CollisionFeed`].
//!
//! Broad phase uses the [`SpatialGrid`]: each collider only tests entities
//! bucketed in the cells its box could reach. Narrow phase is the centred
//! AABB overlap test from [`BoxCollider::overlaps`].

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::tags::Tags;
use crate::events::collision::CollisionEvent;
use crate::resources::collisionfeed::CollisionFeed;
use crate::resources::spatialgrid::SpatialGrid;

/// Publish one [`CollisionEvent`] per overlapping pair, with `this < other`.
///
/// Every entity sits in exactly one grid cell, so scanning the distinct
/// cells around a collider and keeping only higher entity ids yields each
/// pair once.
pub fn collision_detector(
    grid: Res<SpatialGrid>,
    mut feed: ResMut<CollisionFeed>,
    bodies: Query<(Entity, &MapPosition, &BoxCollider)>,
    tags: Query<&Tags>,
) {
    // widen the search by the largest half extent so neighbours whose
    // centre lies outside our own box are still found
    let reach = bodies
        .iter()
        .fold(Vec2::ZERO, |acc, (_, _, collider)| acc.max(collider.half_extents()));

    for (entity, position, collider) in bodies.iter() {
        let (min, max) = collider.aabb(position.pos);
        for (cx, cy) in grid.cells_overlapping(min - reach, max + reach) {
            for &other in grid.cell(cx, cy) {
                if other <= entity {
                    continue;
                }
                let Ok((_, other_position, other_collider)) = bodies.get(other) else {
                    continue;
                };
                if collider.overlaps(position.pos, other_collider, other_position.pos) {
                    feed.publish(
                        CollisionEvent::new(entity, other),
                        tags.get(entity).ok(),
                        tags.get(other).ok(),
                    );
                }
            }
        }
    }
}
