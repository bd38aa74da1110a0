use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::worldtime::WorldTime;

/// Open a new tick on the [`WorldTime`] resource.
///
/// Runs outside the schedule, before any system reads the clock.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut time = world.resource_mut::<WorldTime>();
    let delta = time.advance(dt);
    trace!("Tick {}: delta {:.5}s", time.ticks, delta);
}
