//! System-level integration tests for spawning, movement, homing, collision
//! publication, and the boundary sweep.
//!
//! Each test builds a bare `World` with just the resources the systems under
//! test need and runs a one-off `Schedule`.

use bevy_ecs::prelude::*;
use glam::Vec2;

use spacecats_sim::components::boxcollider::BoxCollider;
use spacecats_sim::components::mapposition::MapPosition;
use spacecats_sim::components::rigidbody::RigidBody;
use spacecats_sim::components::tags::{COIN_TAG, PLAYER_TAG, Tags};
use spacecats_sim::game::{coin_bundle, player_bundle};
use spacecats_sim::resources::arena::Arena;
use spacecats_sim::resources::collisionfeed::CollisionFeed;
use spacecats_sim::resources::player::PlayerHandle;
use spacecats_sim::resources::simconfig::SimConfig;
use spacecats_sim::resources::spatialgrid::SpatialGrid;
use spacecats_sim::resources::spawner::CoinSpawner;
use spacecats_sim::resources::stats::SimStats;
use spacecats_sim::resources::worldtime::WorldTime;
use spacecats_sim::systems::boundary::coin_despawn_at_edge;
use spacecats_sim::systems::coinspawn::spawn_coins;
use spacecats_sim::systems::collision::collision_detector;
use spacecats_sim::systems::homing::homing_system;
use spacecats_sim::systems::movement::movement;
use spacecats_sim::systems::spatialgrid::rebuild_spatial_grid;
use spacecats_sim::systems::time::update_world_time;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(config: SimConfig) -> World {
    let mut world = World::new();
    let arena = Arena::new(config.arena_width, config.arena_height);
    world.insert_resource(WorldTime::default());
    world.insert_resource(arena);
    world.insert_resource(SpatialGrid::new(
        config.grid_cells_x,
        config.grid_cells_y,
        arena.extent(),
    ));
    world.insert_resource(SimStats::default());
    world.insert_resource(CoinSpawner::new(Some(1)));
    world.insert_resource(CollisionFeed::new(config.feed_capacity));
    world.insert_resource(config);
    world
}

fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    let mut config = world.resource::<SimConfig>().clone();
    config.player_start = position;
    let player = world.spawn(player_bundle(&config)).id();
    world.insert_resource(PlayerHandle { entity: player });
    player
}

fn spawn_coin(world: &mut World, position: Vec2) -> Entity {
    let config = world.resource::<SimConfig>().clone();
    world.spawn(coin_bundle(position, &config)).id()
}

fn count_coins(world: &mut World) -> usize {
    let mut query = world.query::<&Tags>();
    query.iter(world).filter(|t| t.has(COIN_TAG)).count()
}

fn tick_spawn(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(spawn_coins);
    schedule.run(world);
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);
    schedule.run(world);
}

fn tick_homing(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(homing_system);
    schedule.run(world);
}

fn tick_sweep(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((rebuild_spatial_grid, coin_despawn_at_edge).chain());
    schedule.run(world);
}

fn tick_collision(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((rebuild_spatial_grid, collision_detector).chain());
    schedule.run(world);
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn movement_integrates_velocity_into_position() {
    let mut world = make_world(SimConfig::new());
    let mut rb = RigidBody::new();
    rb.velocity = Vec2::new(10.0, 0.0);
    let entity = world.spawn((MapPosition::new(0.0, 0.0), rb)).id();

    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 5.0));
    assert!(approx_eq(pos.pos.y, 0.0));
}

#[test]
fn movement_respects_time_scale() {
    let mut world = make_world(SimConfig::new());
    world.resource_mut::<WorldTime>().time_scale = 0.5;
    let mut rb = RigidBody::new();
    rb.velocity = Vec2::new(0.0, 4.0);
    let entity = world.spawn((MapPosition::new(1.0, 1.0), rb)).id();

    update_world_time(&mut world, 1.0);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.y, 3.0));
    assert_eq!(world.resource::<WorldTime>().ticks, 1);
}

// =============================================================================
// Coin spawning
// =============================================================================

#[test]
fn spawn_never_exceeds_population_ceiling() {
    let mut config = SimConfig::new();
    config.coin_max_population = 5;
    config.coin_spawn_per_second = 1000.0;
    let mut world = make_world(config);

    for _ in 0..3 {
        update_world_time(&mut world, 0.1);
        tick_spawn(&mut world);
        assert!(count_coins(&mut world) <= 5);
    }

    let stats = *world.resource::<SimStats>();
    assert_eq!(count_coins(&mut world), 5);
    assert_eq!(stats.coins_spawned, 5);
    assert!(stats.spawns_skipped >= 250);
}

#[test]
fn skipped_spawns_are_not_queued() {
    let mut config = SimConfig::new();
    config.coin_max_population = 2;
    config.coin_spawn_per_second = 100.0;
    let mut world = make_world(config);

    update_world_time(&mut world, 1.0);
    tick_spawn(&mut world);
    assert_eq!(count_coins(&mut world), 2);

    // free the ceiling, then a tick with no whole spawn period elapsed
    let coins: Vec<Entity> = world
        .query::<(Entity, &Tags)>()
        .iter(&world)
        .filter(|(_, t)| t.has(COIN_TAG))
        .map(|(e, _)| e)
        .collect();
    for coin in coins {
        world.despawn(coin);
    }
    world.resource_mut::<CoinSpawner>().accumulator = 0.0;
    update_world_time(&mut world, 0.001);
    tick_spawn(&mut world);
    assert_eq!(count_coins(&mut world), 0);
}

#[test]
fn spawned_coins_start_at_rest_in_the_middle_third() {
    let mut config = SimConfig::new();
    config.coin_spawn_per_second = 100.0;
    let mut world = make_world(config);

    update_world_time(&mut world, 0.5);
    tick_spawn(&mut world);

    let mut query = world.query::<(&MapPosition, &RigidBody, &BoxCollider, &Tags)>();
    let mut seen = 0;
    for (position, body, collider, tags) in query.iter(&world) {
        assert!(tags.has(COIN_TAG));
        assert!(position.pos.x >= 800.0 / 3.0 && position.pos.x <= 1600.0 / 3.0);
        assert!(position.pos.y >= 800.0 / 3.0 && position.pos.y <= 1600.0 / 3.0);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(approx_eq(body.mass, 1.0));
        assert_eq!(collider.size, Vec2::new(4.0, 4.0));
        seen += 1;
    }
    assert!(seen >= 49);
}

#[test]
fn zero_rate_spawns_nothing() {
    let mut config = SimConfig::new();
    config.coin_spawn_per_second = 0.0;
    let mut world = make_world(config);

    update_world_time(&mut world, 10.0);
    tick_spawn(&mut world);
    assert_eq!(count_coins(&mut world), 0);
}

// =============================================================================
// Homing
// =============================================================================

#[test]
fn homing_drives_coin_along_player_offset_with_falloff() {
    let mut config = SimConfig::new();
    config.homing_speed = 0.1;
    let mut world = make_world(config);
    spawn_player(&mut world, Vec2::new(100.0, 100.0));
    let coin = spawn_coin(&mut world, Vec2::new(400.0, 400.0));

    tick_homing(&mut world);

    let v = world.get::<RigidBody>(coin).unwrap().velocity;
    let distance = 300.0 * 2f32.sqrt();
    let factor = 1.0 - distance / 800.0;
    assert!((factor - 0.47).abs() < 0.001);
    assert!(approx_eq(v.length(), 0.1 * factor));
    let expected = (Vec2::new(400.0, 400.0) - Vec2::new(100.0, 100.0)).normalize();
    assert!(approx_eq(v.normalize().x, expected.x));
    assert!(approx_eq(v.normalize().y, expected.y));
    assert!(v.x > 0.0 && v.y > 0.0);
}

#[test]
fn homing_leaves_player_and_coincident_coins_at_rest() {
    let mut world = make_world(SimConfig::new());
    let player = spawn_player(&mut world, Vec2::new(200.0, 200.0));
    let coin = spawn_coin(&mut world, Vec2::new(200.0, 200.0));

    tick_homing(&mut world);

    assert_eq!(world.get::<RigidBody>(coin).unwrap().velocity, Vec2::ZERO);
    assert_eq!(world.get::<RigidBody>(player).unwrap().velocity, Vec2::ZERO);
}

#[test]
fn homing_overwrites_previous_velocity() {
    let mut world = make_world(SimConfig::new());
    spawn_player(&mut world, Vec2::new(100.0, 400.0));
    let coin = spawn_coin(&mut world, Vec2::new(500.0, 400.0));
    world.get_mut::<RigidBody>(coin).unwrap().velocity = Vec2::new(0.0, 999.0);

    tick_homing(&mut world);

    let v = world.get::<RigidBody>(coin).unwrap().velocity;
    assert!(approx_eq(v.y, 0.0));
    // K = 100, factor = 1 - 400/800, along +x away from the player
    assert!(approx_eq(v.x, 50.0));
}

// =============================================================================
// Boundary sweep
// =============================================================================

#[test]
fn coin_crossing_left_edge_is_swept() {
    let mut world = make_world(SimConfig::new());
    let edge_coin = spawn_coin(&mut world, Vec2::new(2.0, 50.0));
    let inner_coin = spawn_coin(&mut world, Vec2::new(100.0, 50.0));

    tick_sweep(&mut world);

    assert!(world.get::<MapPosition>(edge_coin).is_none());
    assert!(world.get::<MapPosition>(inner_coin).is_some());
    assert_eq!(world.resource::<SimStats>().coins_swept, 1);
}

#[test]
fn coins_crossing_every_edge_are_swept() {
    let mut world = make_world(SimConfig::new());
    let top = spawn_coin(&mut world, Vec2::new(400.0, 1.0));
    let bottom = spawn_coin(&mut world, Vec2::new(400.0, 798.0));
    let right = spawn_coin(&mut world, Vec2::new(797.0, 400.0));
    let outside = spawn_coin(&mut world, Vec2::new(-20.0, 400.0));
    let safe = spawn_coin(&mut world, Vec2::new(10.0, 10.0));

    tick_sweep(&mut world);

    for coin in [top, bottom, right, outside] {
        assert!(world.get::<Tags>(coin).is_none());
    }
    assert!(world.get::<Tags>(safe).is_some());
    assert_eq!(world.resource::<SimStats>().coins_swept, 4);
}

#[test]
fn sweep_ignores_non_coin_entities() {
    let mut world = make_world(SimConfig::new());
    let player = spawn_player(&mut world, Vec2::new(1.0, 1.0));

    tick_sweep(&mut world);

    let tags = world.get::<Tags>(player).unwrap();
    assert!(tags.has(PLAYER_TAG));
}

#[test]
fn sweep_skips_stale_grid_entries() {
    let mut world = make_world(SimConfig::new());
    let coin = spawn_coin(&mut world, Vec2::new(2.0, 2.0));

    let mut rebuild = Schedule::default();
    rebuild.add_systems(rebuild_spatial_grid);
    rebuild.run(&mut world);
    world.despawn(coin);

    let mut sweep = Schedule::default();
    sweep.add_systems(coin_despawn_at_edge);
    sweep.run(&mut world);

    assert_eq!(world.resource::<SimStats>().coins_swept, 0);
}

#[test]
fn single_row_grid_still_sweeps_once() {
    let mut config = SimConfig::new();
    config.grid_cells_y = 1;
    let mut world = make_world(config);
    let coin = spawn_coin(&mut world, Vec2::new(400.0, 2.0));

    tick_sweep(&mut world);

    assert!(world.get::<Tags>(coin).is_none());
    assert_eq!(world.resource::<SimStats>().coins_swept, 1);
}

// =============================================================================
// Collision feed
// =============================================================================

#[test]
fn detector_publishes_each_overlapping_pair_once() {
    let mut world = make_world(SimConfig::new());
    let sub = world
        .resource_mut::<CollisionFeed>()
        .subscribe("all", |_, _, _| true)
        .unwrap();

    let player = spawn_player(&mut world, Vec2::new(50.0, 50.0));
    let touching = spawn_coin(&mut world, Vec2::new(52.0, 51.0));
    let _far = spawn_coin(&mut world, Vec2::new(300.0, 300.0));

    tick_collision(&mut world);

    let events: Vec<_> = sub.drain().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].counterpart(player), Some(touching));
    assert!(events[0].this < events[0].other);
}

#[test]
fn detector_finds_pairs_across_cell_borders() {
    let mut world = make_world(SimConfig::new());
    let sub = world
        .resource_mut::<CollisionFeed>()
        .subscribe("all", |_, _, _| true)
        .unwrap();

    // 24.5 and 26.0 sit in neighbouring cells of a 25-unit grid
    spawn_coin(&mut world, Vec2::new(24.5, 100.0));
    spawn_coin(&mut world, Vec2::new(26.0, 100.0));

    tick_collision(&mut world);

    assert_eq!(sub.drain().count(), 1);
}

#[test]
fn large_player_reaches_coins_in_distant_cells() {
    let mut world = make_world(SimConfig::new());
    let sub = world
        .resource_mut::<CollisionFeed>()
        .subscribe("all", |_, _, _| true)
        .unwrap();

    let player = spawn_player(&mut world, Vec2::new(400.0, 400.0));
    world.get_mut::<BoxCollider>(player).unwrap().size = Vec2::new(80.0, 80.0);
    // 38 units right: three cells away, inside the 40 + 2 half-width sum
    spawn_coin(&mut world, Vec2::new(438.0, 400.0));

    tick_collision(&mut world);

    assert_eq!(sub.drain().count(), 1);
}
