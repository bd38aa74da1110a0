//! Homing movement rule.
//!
//! Every tick each live coin's velocity is overwritten with
//! `normalize(d) * K * (1 - |d| / arena_width)`, where `d` is the offset of
//! the coin from the player (`coin - player`). Inside the arena width coins
//! drift along `d`, fastest when right next to the player and slowing as the
//! offset grows. Past the arena width the factor turns negative;
//! [`HomingFalloff`] decides whether that reverses the drift or leaves the
//! coin at rest.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::warn;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::tags::{COIN_TAG, Tags};
use crate::resources::arena::Arena;
use crate::resources::player::PlayerHandle;
use crate::resources::simconfig::{HomingFalloff, SimConfig};

/// Velocity for a coin at `coin` steered by a player at `player`.
///
/// A coin sitting exactly on the player gets zero velocity.
pub fn homing_velocity(
    coin: Vec2,
    player: Vec2,
    speed: f32,
    arena_width: f32,
    falloff: HomingFalloff,
) -> Vec2 {
    let offset = coin - player;
    let distance = offset.length();
    if !(distance > 0.0) || !distance.is_finite() {
        return Vec2::ZERO;
    }
    let mut factor = 1.0 - distance / arena_width;
    if falloff == HomingFalloff::Clamped {
        factor = factor.max(0.0);
    }
    offset / distance * (speed * factor)
}

pub fn homing_system(
    config: Res<SimConfig>,
    arena: Res<Arena>,
    player: Res<PlayerHandle>,
    positions: Query<&MapPosition>,
    mut coins: Query<(&MapPosition, &mut RigidBody, &Tags)>,
) {
    let Ok(target) = positions.get(player.entity) else {
        warn!("Homing: player {:?} has no position", player.entity);
        return;
    };
    let target = target.pos;

    for (position, mut rigidbody, tags) in coins.iter_mut() {
        if !tags.has(COIN_TAG) {
            continue;
        }
        rigidbody.velocity = homing_velocity(
            position.pos,
            target,
            config.homing_speed,
            arena.width,
            config.homing_falloff,
        );
    }
}
