//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `arena` – fixed extent of the play field and its spawn region
//! - `collisionfeed` – predicate-filtered, bounded contact queues
//! - `consumption` – the player/coin subscription owned by the consumption pipeline
//! - `group` – tag names whose population is published as signals
//! - `player` – handle to the distinguished player entity
//! - `score` – process-lifetime running score
//! - `simconfig` – tunables loaded from an INI file
//! - `spatialgrid` – uniform grid bucketing entities by position
//! - `spawner` – coin spawn schedule accumulator and RNG
//! - `stats` – counters for the headless report
//! - `worldsignals` – values published for the presentation layer
//! - `worldtime` – simulation time and delta
pub mod arena;
pub mod collisionfeed;
pub mod consumption;
pub mod group;
pub mod player;
pub mod score;
pub mod simconfig;
pub mod spatialgrid;
pub mod spawner;
pub mod stats;
pub mod worldsignals;
pub mod worldtime;
