//! Simulation context and entity setup.
//!
//! [`Simulation`] owns the ECS [`World`] and the per-tick [`Schedule`]. It is
//! the only place the simulation is wired together: resources are inserted,
//! the player is spawned, the consumption pipeline subscribes to the
//! collision feed and observers are registered once, in [`Simulation::new`].
//! Nothing lives in globals; embedders drive the loop through
//! [`Simulation::tick`] and read results through the accessors or
//! [`WorldSignals`].

use std::fmt;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use serde::Serialize;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::tags::{COIN_TAG, PLAYER_TAG, Tags};
use crate::events::score::observe_score_changed;
use crate::resources::arena::Arena;
use crate::resources::collisionfeed::CollisionFeed;
use crate::resources::consumption::ConsumptionPipeline;
use crate::resources::group::TrackedGroups;
use crate::resources::player::PlayerHandle;
use crate::resources::score::Score;
use crate::resources::simconfig::SimConfig;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::spawner::CoinSpawner;
use crate::resources::stats::SimStats;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::boundary::coin_despawn_at_edge;
use crate::systems::coinspawn::spawn_coins;
use crate::systems::collision::collision_detector;
use crate::systems::consumption::consume_coins;
use crate::systems::homing::homing_system;
use crate::systems::movement::movement;
use crate::systems::signals::{publish_player_box, update_group_counts_system};
use crate::systems::spatialgrid::rebuild_spatial_grid;
use crate::systems::time::update_world_time;

/// Components of a freshly spawned coin: at rest, coin box and mass, tagged `"coin"`.
pub fn coin_bundle(
    position: Vec2,
    config: &SimConfig,
) -> (MapPosition, RigidBody, BoxCollider, Tags) {
    (
        MapPosition::from_vec(position),
        RigidBody::with_mass(config.coin_mass),
        BoxCollider::from_size(config.coin_box),
        Tags::new([COIN_TAG]),
    )
}

/// Components of the player at its configured start.
pub fn player_bundle(config: &SimConfig) -> (MapPosition, RigidBody, BoxCollider, Tags) {
    (
        MapPosition::from_vec(config.player_start),
        RigidBody::with_mass(config.player_mass),
        BoxCollider::from_size(config.player_box),
        Tags::new([PLAYER_TAG]),
    )
}

/// Build the per-tick schedule. Chaining makes each system see the despawns
/// and spawns of the ones before it.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            spawn_coins,
            movement,
            rebuild_spatial_grid,
            collision_detector,
            consume_coins,
            coin_despawn_at_edge,
            homing_system,
            update_group_counts_system,
            publish_player_box,
        )
            .chain(),
    );
    schedule
}

/// Summary of a run, printed by the headless binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub ticks: u64,
    pub elapsed_seconds: f32,
    pub score: u64,
    pub coins_consumed: u64,
    pub coins_alive: usize,
    pub coins_spawned: u64,
    pub spawns_skipped: u64,
    pub coins_swept: u64,
    pub contacts_dropped: u64,
    pub player_box: [f32; 2],
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks:           {}", self.ticks)?;
        writeln!(f, "elapsed:         {:.2}s", self.elapsed_seconds)?;
        writeln!(f, "score:           {}", self.score)?;
        writeln!(f, "coins consumed:  {}", self.coins_consumed)?;
        writeln!(f, "coins alive:     {}", self.coins_alive)?;
        writeln!(f, "coins spawned:   {}", self.coins_spawned)?;
        writeln!(f, "spawns skipped:  {}", self.spawns_skipped)?;
        writeln!(f, "coins swept:     {}", self.coins_swept)?;
        writeln!(f, "contacts dropped: {}", self.contacts_dropped)?;
        write!(
            f,
            "player box:      {:.2} x {:.2}",
            self.player_box[0], self.player_box[1]
        )
    }
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
    player: Entity,
}

impl Simulation {
    /// Validate `config` and wire up a ready-to-tick simulation.
    pub fn new(config: SimConfig) -> Result<Self, String> {
        config.validate()?;

        let mut world = World::new();
        let arena = Arena::new(config.arena_width, config.arena_height);
        world.insert_resource(WorldTime::default());
        world.insert_resource(arena);
        world.insert_resource(SpatialGrid::new(
            config.grid_cells_x,
            config.grid_cells_y,
            arena.extent(),
        ));
        world.insert_resource(CoinSpawner::new(config.seed));
        world.insert_resource(Score::default());
        world.insert_resource(SimStats::default());
        world.insert_resource(TrackedGroups::default().with(COIN_TAG));

        let player = world.spawn(player_bundle(&config)).id();
        world.insert_resource(PlayerHandle { entity: player });

        let mut feed = CollisionFeed::new(config.feed_capacity);
        let pipeline = ConsumptionPipeline::new(&mut feed, player)?;
        world.insert_resource(feed);
        world.insert_resource(pipeline);

        let mut signals = WorldSignals::default();
        signals.set_entity(PLAYER_TAG, player);
        world.insert_resource(signals);

        info!(
            "Simulation: arena {}x{}, grid {}x{}, coin ceiling {}, {} coins/s",
            config.arena_width,
            config.arena_height,
            config.grid_cells_x,
            config.grid_cells_y,
            config.coin_max_population,
            config.coin_spawn_per_second
        );
        world.insert_resource(config);

        world.spawn(Observer::new(observe_score_changed));
        // Ensure the observer is registered before any system triggers events.
        world.flush();

        let mut schedule = build_schedule();
        schedule
            .initialize(&mut world)
            .map_err(|e| format!("Failed to initialize schedule: {e}"))?;

        Ok(Self {
            world,
            schedule,
            player,
        })
    }

    /// Advance the simulation by `dt` unscaled seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Run `ticks` ticks of `dt` seconds each.
    pub fn run(&mut self, ticks: u64, dt: f32) {
        for _ in 0..ticks {
            self.tick(dt);
        }
    }

    /// Forward an external resize of the spatial grid.
    pub fn expand_grid(&mut self, n: usize) {
        self.world.resource_mut::<SpatialGrid>().expand(n);
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn score(&self) -> u64 {
        self.world.resource::<Score>().total()
    }

    pub fn consumed(&self) -> u64 {
        self.world.resource::<Score>().consumed()
    }

    pub fn player_box(&self) -> Vec2 {
        self.world
            .get::<BoxCollider>(self.player)
            .map(|collider| collider.size)
            .unwrap_or(Vec2::ZERO)
    }

    pub fn coin_count(&mut self) -> usize {
        let mut query = self.world.query::<&Tags>();
        query
            .iter(&self.world)
            .filter(|tags| tags.has(COIN_TAG))
            .count()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn report(&mut self) -> SimulationReport {
        let coins_alive = self.coin_count();
        let time = *self.world.resource::<WorldTime>();
        let stats = *self.world.resource::<SimStats>();
        let player_box = self.player_box();
        SimulationReport {
            ticks: time.ticks,
            elapsed_seconds: time.elapsed,
            score: self.score(),
            coins_consumed: self.consumed(),
            coins_alive,
            coins_spawned: stats.coins_spawned,
            spawns_skipped: stats.spawns_skipped,
            coins_swept: stats.coins_swept,
            contacts_dropped: self.world.resource::<CollisionFeed>().dropped(),
            player_box: [player_box.x, player_box.y],
        }
    }
}
