//! Consumption pipeline: player/coin contacts become score and growth.
//!
//! Each tick [`consume_coins`] drains every contact already queued on the
//! player/coin subscription without waiting for more. For every contact it
//!
//! 1. despawns the coin,
//! 2. awards the configured reward to [`Score`],
//! 3. grows the player's bounding box, subject to [`GrowthCap`],
//! 4. triggers [`ScoreChanged`] so presentation can refresh.
//!
//! A coin is consumed at most once. Contacts naming a coin that was already
//! consumed in the same drain, or that no longer exists, are skipped.
//!
//! The despawn is deferred to the end of this system; the schedule applies it
//! before the boundary sweep and homing run, so neither sees the coin.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use rustc_hash::FxHashSet;

use crate::components::boxcollider::BoxCollider;
use crate::components::tags::{COIN_TAG, Tags};
use crate::events::collision::CollisionEvent;
use crate::events::score::ScoreChanged;
use crate::resources::consumption::ConsumptionPipeline;
use crate::resources::score::Score;
use crate::resources::simconfig::{GrowthCap, SimConfig};

/// Grow a player box by `increment` on both axes.
///
/// Growth only happens while *both* dimensions are below `cap`. Returns
/// whether the box changed.
pub fn grow_player_box(
    collider: &mut BoxCollider,
    increment: f32,
    cap: f32,
    policy: GrowthCap,
) -> bool {
    if collider.size.x >= cap || collider.size.y >= cap {
        return false;
    }
    let grown = collider.size + Vec2::splat(increment);
    collider.size = match policy {
        GrowthCap::Clamp => grown.min(Vec2::splat(cap)),
        GrowthCap::Overshoot => grown,
    };
    true
}

/// The coin side of a player/coin contact.
///
/// # Panics
///
/// Panics if the contact does not involve the player. The subscription
/// predicate guarantees it does, so this is a broken feed contract.
pub fn coin_side(event: &CollisionEvent, player: Entity) -> Entity {
    match event.counterpart(player) {
        Some(coin) if coin != player => coin,
        _ => panic!(
            "player/coin subscription delivered {:?}, which does not pair player {:?} with another entity",
            event, player
        ),
    }
}

pub fn consume_coins(
    pipeline: Res<ConsumptionPipeline>,
    config: Res<SimConfig>,
    mut score: ResMut<Score>,
    tags: Query<&Tags>,
    mut colliders: Query<&mut BoxCollider>,
    mut commands: Commands,
    mut consumed: Local<FxHashSet<Entity>>,
) {
    consumed.clear();
    let player = pipeline.player();

    for event in pipeline.subscription().drain() {
        let coin = coin_side(&event, player);
        if !consumed.insert(coin) {
            debug!("Coin {:?} already consumed this tick", coin);
            continue;
        }
        if !tags.get(coin).is_ok_and(|t| t.has(COIN_TAG)) {
            debug!("Skipping contact with stale coin {:?}", coin);
            continue;
        }

        commands.entity(coin).despawn();
        let total = score.award(config.coin_reward);

        let Ok(mut collider) = colliders.get_mut(player) else {
            panic!("player {:?} has no BoxCollider", player);
        };
        grow_player_box(
            &mut collider,
            config.player_growth,
            config.player_box_cap,
            config.growth_cap,
        );

        commands.trigger(ScoreChanged {
            total,
            delta: config.coin_reward,
        });
    }
}
