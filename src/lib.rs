//! Space Cats simulation library.
//!
//! The real-time entity simulation behind a coin-collection arcade loop: a
//! player body moves through a bounded 2D arena while coins spawn, drift under
//! a rule steered by the player's position, get consumed on contact, and are purged when they cross the
//! arena edge.
//!
//! This module exposes the ECS components, resources, systems, and events
//! for use in integration tests and by embedders that render the arena.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
