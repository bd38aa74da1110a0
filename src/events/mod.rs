//! Event types and observers used by the simulation.
//!
//! Submodules:
//! - [`collision`] – contact pairs published by the collision detector into
//!   the [`CollisionFeed`](crate::resources::collisionfeed::CollisionFeed)
//! - [`score`] – score-changed notification and the observer that publishes
//!   it for presentation
pub mod collision;
pub mod score;
