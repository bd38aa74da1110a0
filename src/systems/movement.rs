use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Integrate positions from velocities over the scaled tick delta.
///
/// Velocities are whatever the steering rules wrote on the previous tick.
pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta; // delta is already scaled by time_scale
    for (mut position, rigidbody) in query.iter_mut() {
        if rigidbody.is_moving() {
            position.pos += rigidbody.velocity * dt;
        }
    }
}
