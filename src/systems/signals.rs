//! Signal publication for the presentation layer.
//!
//! These systems copy simulation state into [`WorldSignals`] at the end of
//! every tick. The score itself is published by the
//! [`ScoreChanged`](crate::events::score::ScoreChanged) observer at the moment
//! it changes.

use crate::components::boxcollider::BoxCollider;
use crate::components::tags::Tags;
use crate::resources::group::TrackedGroups;
use crate::resources::player::PlayerHandle;
use crate::resources::worldsignals::WorldSignals;
use bevy_ecs::prelude::*;

use rustc_hash::FxHashMap;

/// Signal key for the player box width.
pub const PLAYER_BOX_W: &str = "player_box_w";
/// Signal key for the player box height.
pub const PLAYER_BOX_H: &str = "player_box_h";

/// Counts entities for each tracked tag and updates [`WorldSignals`].
///
/// Tags with zero entities are reported as `0`, so presentation can tell an
/// emptied group from one never counted.
pub fn update_group_counts_system(
    query_tags: Query<&Tags>,
    mut world_signals: ResMut<WorldSignals>,
    tracked_groups: Res<TrackedGroups>,
) {
    let mut counts: FxHashMap<&str, i32> = FxHashMap::default();
    for tags in query_tags.iter() {
        for tag in tags.iter() {
            if tracked_groups.has_group(tag) {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
    }

    for group_name in tracked_groups.iter() {
        let count = counts.get(group_name.as_str()).copied().unwrap_or(0);
        world_signals.set_group_count(group_name, count);
    }
}

/// Publish the player bounding box so presentation can size the player.
pub fn publish_player_box(
    player: Res<PlayerHandle>,
    colliders: Query<&BoxCollider>,
    mut world_signals: ResMut<WorldSignals>,
) {
    if let Ok(collider) = colliders.get(player.entity) {
        world_signals.set_scalar(PLAYER_BOX_W, collider.size.x);
        world_signals.set_scalar(PLAYER_BOX_H, collider.size.y);
    }
}
