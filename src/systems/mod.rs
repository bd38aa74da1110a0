//! Simulation systems.
//!
//! This module groups all ECS systems that advance the simulation. The
//! [`Simulation`](crate::game::Simulation) chains them in this order every
//! tick, with deferred despawns applied between them:
//!
//! 1. [`coinspawn`] – spawn coins on a fixed schedule below the population ceiling
//! 2. [`movement`] – integrate positions from velocities
//! 3. [`spatialgrid`] – rebuild the spatial grid from current positions
//! 4. [`collision`] – publish overlapping pairs into the collision feed
//! 5. [`consumption`] – drain player/coin contacts, award score, grow the player
//! 6. [`boundary`] – despawn coins in border cells that cross the arena edge
//! 7. [`homing`] – steer every live coin relative to the player
//! 8. [`signals`] – publish values for the presentation layer
//!
//! [`time`] advances the clock outside the schedule.

pub mod boundary;
pub mod coinspawn;
pub mod collision;
pub mod consumption;
pub mod homing;
pub mod movement;
pub mod signals;
pub mod spatialgrid;
pub mod time;
