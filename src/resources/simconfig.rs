//! Simulation configuration resource.
//!
//! Manages the simulation tunables loaded from an INI configuration file.
//! Provides defaults for a safe startup and methods to load/save the file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [arena]
//! width = 800
//! height = 800
//!
//! [grid]
//! cells_x = 32
//! cells_y = 32
//!
//! [coins]
//! max_population = 1000
//! spawn_per_second = 50
//! box_width = 4
//! box_height = 4
//! mass = 1
//! reward = 10
//!
//! [homing]
//! speed = 100
//! ; signed or clamped
//! falloff = signed
//!
//! [player]
//! start_x = 50
//! start_y = 50
//! box_width = 2
//! box_height = 2
//! mass = 1
//! box_cap = 50
//! growth = 0.5
//! ; clamp or overshoot
//! growth_cap = clamp
//!
//! [feed]
//! capacity = 1024
//!
//! [sim]
//! seed = 1234
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::info;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_ARENA_WIDTH: f32 = 800.0;
const DEFAULT_ARENA_HEIGHT: f32 = 800.0;
const DEFAULT_GRID_CELLS: usize = 32;
const DEFAULT_COIN_MAX_POPULATION: usize = 1000;
const DEFAULT_COINS_PER_SECOND: f32 = 50.0;
const DEFAULT_COIN_BOX: f32 = 4.0;
const DEFAULT_COIN_REWARD: u64 = 10;
/// 0.1 world units per millisecond.
const DEFAULT_HOMING_SPEED: f32 = 100.0;
const DEFAULT_PLAYER_START: f32 = 50.0;
const DEFAULT_PLAYER_BOX: f32 = 2.0;
const DEFAULT_PLAYER_BOX_CAP: f32 = 50.0;
const DEFAULT_PLAYER_GROWTH: f32 = 0.5;
const DEFAULT_FEED_CAPACITY: usize = 1024;
const DEFAULT_CONFIG_PATH: &str = "./spacecats.ini";

/// How the homing speed factor `1 - |d| / width` behaves past the arena width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingFalloff {
    /// The factor goes negative and far coins are pushed away.
    Signed,
    /// The factor is floored at zero and far coins stand still.
    Clamped,
}

impl HomingFalloff {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "signed" => Some(Self::Signed),
            "clamped" | "clamp" => Some(Self::Clamped),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signed => "signed",
            Self::Clamped => "clamped",
        }
    }
}

impl fmt::Display for HomingFalloff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How player growth treats the box cap.
///
/// Both policies only grow when *both* dimensions are currently below the
/// cap; they differ in what happens to the increment that crosses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthCap {
    /// The grown box is clamped to the cap.
    Clamp,
    /// The full increment is applied, so the box may end up to one
    /// increment past the cap.
    Overshoot,
}

impl GrowthCap {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" | "clamped" => Some(Self::Clamp),
            "overshoot" => Some(Self::Overshoot),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Overshoot => "overshoot",
        }
    }
}

impl fmt::Display for GrowthCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Arena width in world units.
    pub arena_width: f32,
    /// Arena height in world units.
    pub arena_height: f32,
    /// Spatial grid columns.
    pub grid_cells_x: usize,
    /// Spatial grid rows.
    pub grid_cells_y: usize,
    /// Ceiling on live coins. Spawns at the ceiling are skipped.
    pub coin_max_population: usize,
    /// Spawn opportunities per second. Zero disables spawning.
    pub coin_spawn_per_second: f32,
    /// Coin bounding box.
    pub coin_box: Vec2,
    pub coin_mass: f32,
    /// Points awarded per consumed coin.
    pub coin_reward: u64,
    /// Homing speed constant `K`, in world units per second.
    pub homing_speed: f32,
    pub homing_falloff: HomingFalloff,
    pub player_start: Vec2,
    /// Initial player bounding box.
    pub player_box: Vec2,
    pub player_mass: f32,
    /// Per-axis cap on player growth.
    pub player_box_cap: f32,
    /// Growth added to both axes per consumed coin.
    pub player_growth: f32,
    pub growth_cap: GrowthCap,
    /// Capacity of each collision feed subscription queue.
    pub feed_capacity: usize,
    /// Seed for coin placement. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            grid_cells_x: DEFAULT_GRID_CELLS,
            grid_cells_y: DEFAULT_GRID_CELLS,
            coin_max_population: DEFAULT_COIN_MAX_POPULATION,
            coin_spawn_per_second: DEFAULT_COINS_PER_SECOND,
            coin_box: Vec2::splat(DEFAULT_COIN_BOX),
            coin_mass: 1.0,
            coin_reward: DEFAULT_COIN_REWARD,
            homing_speed: DEFAULT_HOMING_SPEED,
            homing_falloff: HomingFalloff::Signed,
            player_start: Vec2::splat(DEFAULT_PLAYER_START),
            player_box: Vec2::splat(DEFAULT_PLAYER_BOX),
            player_mass: 1.0,
            player_box_cap: DEFAULT_PLAYER_BOX_CAP,
            player_growth: DEFAULT_PLAYER_GROWTH,
            growth_cap: GrowthCap::Clamp,
            feed_capacity: DEFAULT_FEED_CAPACITY,
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)?;

        info!(
            "Loaded config from {:?}: arena {}x{}, grid {}x{}, coins max={} rate={}/s, homing K={} ({}), growth {} cap={} ({})",
            self.config_path,
            self.arena_width,
            self.arena_height,
            self.grid_cells_x,
            self.grid_cells_y,
            self.coin_max_population,
            self.coin_spawn_per_second,
            self.homing_speed,
            self.homing_falloff,
            self.player_growth,
            self.player_box_cap,
            self.growth_cap
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();

        // [arena] section
        if let Some(width) = float("arena", "width") {
            self.arena_width = width;
        }
        if let Some(height) = float("arena", "height") {
            self.arena_height = height;
        }

        // [grid] section
        if let Some(cells) = uint("grid", "cells_x") {
            self.grid_cells_x = cells as usize;
        }
        if let Some(cells) = uint("grid", "cells_y") {
            self.grid_cells_y = cells as usize;
        }

        // [coins] section
        if let Some(max) = uint("coins", "max_population") {
            self.coin_max_population = max as usize;
        }
        if let Some(rate) = float("coins", "spawn_per_second") {
            self.coin_spawn_per_second = rate;
        }
        if let Some(width) = float("coins", "box_width") {
            self.coin_box.x = width;
        }
        if let Some(height) = float("coins", "box_height") {
            self.coin_box.y = height;
        }
        if let Some(mass) = float("coins", "mass") {
            self.coin_mass = mass;
        }
        if let Some(reward) = uint("coins", "reward") {
            self.coin_reward = reward;
        }

        // [homing] section
        if let Some(speed) = float("homing", "speed") {
            self.homing_speed = speed;
        }
        if let Some(falloff) = config.get("homing", "falloff") {
            self.homing_falloff = HomingFalloff::parse(&falloff)
                .ok_or_else(|| format!("Unknown homing falloff '{}'", falloff))?;
        }

        // [player] section
        if let Some(x) = float("player", "start_x") {
            self.player_start.x = x;
        }
        if let Some(y) = float("player", "start_y") {
            self.player_start.y = y;
        }
        if let Some(width) = float("player", "box_width") {
            self.player_box.x = width;
        }
        if let Some(height) = float("player", "box_height") {
            self.player_box.y = height;
        }
        if let Some(mass) = float("player", "mass") {
            self.player_mass = mass;
        }
        if let Some(cap) = float("player", "box_cap") {
            self.player_box_cap = cap;
        }
        if let Some(growth) = float("player", "growth") {
            self.player_growth = growth;
        }
        if let Some(policy) = config.get("player", "growth_cap") {
            self.growth_cap = GrowthCap::parse(&policy)
                .ok_or_else(|| format!("Unknown growth cap policy '{}'", policy))?;
        }

        // [feed] section
        if let Some(capacity) = uint("feed", "capacity") {
            self.feed_capacity = capacity as usize;
        }

        // [sim] section
        if let Some(seed) = uint("sim", "seed") {
            self.seed = Some(seed);
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("arena", "width", self.arena_width.to_string());
        set("arena", "height", self.arena_height.to_string());
        set("grid", "cells_x", self.grid_cells_x.to_string());
        set("grid", "cells_y", self.grid_cells_y.to_string());
        set("coins", "max_population", self.coin_max_population.to_string());
        set("coins", "spawn_per_second", self.coin_spawn_per_second.to_string());
        set("coins", "box_width", self.coin_box.x.to_string());
        set("coins", "box_height", self.coin_box.y.to_string());
        set("coins", "mass", self.coin_mass.to_string());
        set("coins", "reward", self.coin_reward.to_string());
        set("homing", "speed", self.homing_speed.to_string());
        set("homing", "falloff", self.homing_falloff.to_string());
        set("player", "start_x", self.player_start.x.to_string());
        set("player", "start_y", self.player_start.y.to_string());
        set("player", "box_width", self.player_box.x.to_string());
        set("player", "box_height", self.player_box.y.to_string());
        set("player", "mass", self.player_mass.to_string());
        set("player", "box_cap", self.player_box_cap.to_string());
        set("player", "growth", self.player_growth.to_string());
        set("player", "growth_cap", self.growth_cap.to_string());
        set("feed", "capacity", self.feed_capacity.to_string());
        if let Some(seed) = self.seed {
            set("sim", "seed", seed.to_string());
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Check the values the simulation relies on.
    ///
    /// Grid cells must be at least as large as a coin box on each axis,
    /// otherwise a coin crossing the arena edge can sit outside the border
    /// cells the boundary sweep inspects.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(format!(
                "Arena must have a positive extent, got {}x{}",
                self.arena_width, self.arena_height
            ));
        }
        if self.grid_cells_x == 0 || self.grid_cells_y == 0 {
            return Err(format!(
                "Grid needs at least one cell per axis, got {}x{}",
                self.grid_cells_x, self.grid_cells_y
            ));
        }
        let cell = self.cell_size();
        if cell.x < self.coin_box.x || cell.y < self.coin_box.y {
            return Err(format!(
                "Grid cell {}x{} is smaller than the coin box {}x{}",
                cell.x, cell.y, self.coin_box.x, self.coin_box.y
            ));
        }
        if self.coin_box.x <= 0.0 || self.coin_box.y <= 0.0 {
            return Err("Coin box must be positive".to_string());
        }
        if !(self.coin_spawn_per_second >= 0.0) || !self.coin_spawn_per_second.is_finite() {
            return Err(format!(
                "Spawn rate must be finite and non-negative, got {}",
                self.coin_spawn_per_second
            ));
        }
        for (name, value) in [
            ("Player growth", self.player_growth),
            ("Player box cap", self.player_box_cap),
            ("Homing speed", self.homing_speed),
            ("Coin mass", self.coin_mass),
            ("Player mass", self.player_mass),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                ));
            }
        }
        if self.feed_capacity == 0 {
            return Err("Collision feed capacity must be at least 1".to_string());
        }
        Ok(())
    }

    /// Size of a single spatial grid cell.
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.arena_width / self.grid_cells_x.max(1) as f32,
            self.arena_height / self.grid_cells_y.max(1) as f32,
        )
    }

    /// Seconds between spawn opportunities, or `None` when spawning is off.
    pub fn spawn_period(&self) -> Option<f32> {
        if self.coin_spawn_per_second > 0.0 {
            Some(1.0 / self.coin_spawn_per_second)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_size(), Vec2::new(25.0, 25.0));
        assert_eq!(config.spawn_period(), Some(1.0 / 50.0));
    }

    #[test]
    fn load_from_str_overrides_only_present_keys() {
        let mut config = SimConfig::new();
        config
            .load_from_str(
                "[arena]\nwidth = 1200\n\n[coins]\nmax_population = 500\nreward = 25\n\n[homing]\nfalloff = clamped\n\n[player]\ngrowth = 0.8\nbox_cap = 80\ngrowth_cap = overshoot\n\n[sim]\nseed = 99\n",
            )
            .unwrap();

        assert_eq!(config.arena_width, 1200.0);
        assert_eq!(config.arena_height, DEFAULT_ARENA_HEIGHT);
        assert_eq!(config.coin_max_population, 500);
        assert_eq!(config.coin_reward, 25);
        assert_eq!(config.homing_falloff, HomingFalloff::Clamped);
        assert_eq!(config.growth_cap, GrowthCap::Overshoot);
        assert!((config.player_growth - 0.8).abs() < 1e-6);
        assert_eq!(config.player_box_cap, 80.0);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let mut config = SimConfig::new();
        let err = config
            .load_from_str("[homing]\nfalloff = sideways\n")
            .unwrap_err();
        assert!(err.contains("sideways"));
    }

    #[test]
    fn cells_smaller_than_coin_box_are_rejected() {
        let mut config = SimConfig::new();
        config.grid_cells_x = 400; // 2 units per cell, coin box is 4
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_cells_are_rejected() {
        let mut config = SimConfig::new();
        config.grid_cells_y = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_rate_disables_spawning() {
        let mut config = SimConfig::new();
        config.coin_spawn_per_second = 0.0;
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_period(), None);
    }

    #[test]
    fn nan_and_negative_tunables_are_rejected() {
        let cases: [fn(&mut SimConfig); 6] = [
            |c| c.player_box_cap = f32::NAN,
            |c| c.player_box_cap = -1.0,
            |c| c.homing_speed = f32::NAN,
            |c| c.coin_mass = -0.5,
            |c| c.player_mass = f32::NAN,
            |c| c.coin_spawn_per_second = f32::INFINITY,
        ];
        for mutate in cases {
            let mut config = SimConfig::new();
            mutate(&mut config);
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn very_high_spawn_rate_is_valid() {
        let mut config = SimConfig::new();
        config.coin_spawn_per_second = 1.0e10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn policies_round_trip_through_names() {
        assert_eq!(HomingFalloff::parse("Signed"), Some(HomingFalloff::Signed));
        assert_eq!(GrowthCap::parse(" clamp "), Some(GrowthCap::Clamp));
        assert_eq!(GrowthCap::parse("nope"), None);
    }
}
