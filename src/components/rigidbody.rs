//! Kinematic body component.
//!
//! The [`RigidBody`] stores the velocity and mass of an entity. Velocity is
//! written by steering rules such as the coin homing system and consumed by
//! the [`movement`](crate::systems::movement::movement) integration step.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity (world units per second) and mass.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Mass of the body. Carried for the physics collaborator; steering
    /// rules overwrite velocity directly and ignore it.
    pub mass: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a resting RigidBody with unit mass.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass: 1.0,
        }
    }

    /// Create a resting RigidBody with the given mass.
    pub fn with_mass(mass: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass,
        }
    }

    /// Squared speed, cheap to compare against thresholds.
    pub fn speed_sq(&self) -> f32 {
        self.velocity.length_squared()
    }

    pub fn is_moving(&self) -> bool {
        self.speed_sq() > f32::EPSILON
    }
}
