//! ECS components for simulated entities.
//!
//! This module groups the attribute slots the simulation reads and writes on
//! entities. Every coin and the player carry the same four components.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned bounding box centred on the entity position
//! - [`mapposition`] – world-space position of the entity centre
//! - [`rigidbody`] – velocity and mass consumed by the movement integration
//! - [`tags`] – string tag set used to classify entities (`"coin"`, `"player"`)

pub mod boxcollider;
pub mod mapposition;
pub mod rigidbody;
pub mod tags;
