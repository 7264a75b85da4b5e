//! Tunable constants for both modes.
//!
//! Loaded once at startup from an optional JSON file and never mutated
//! afterwards. Missing keys fall back to the defaults below.

use std::path::Path;

use serde::Deserialize;

use crate::error::{GalaxiaError, Result};

/// Chance per tick and population cap for one spawnable kind.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpawnRule {
    pub chance: f64,
    pub cap: usize,
}

impl SpawnRule {
    pub const fn new(chance: f64, cap: usize) -> Self {
        Self { chance, cap }
    }
}

/// Shooter settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in world units
    pub width: f32,
    /// Playfield height in world units
    pub height: f32,
    pub tick_hz: u32,
    /// Decorative stars created with each session
    pub star_count: usize,
    /// Hostile cap is `cap + stage`
    pub hostile: SpawnRule,
    pub power_up: SpawnRule,
    pub asteroid: SpawnRule,
    pub hazard: SpawnRule,
    /// Kills closer together than this extend the combo
    pub combo_window_ms: u64,
    /// A boss appears once the score reaches `stage * boss_score_per_stage`
    pub boss_score_per_stage: f64,
    pub starting_shield: f32,
    pub hostile_contact_damage: f32,
    /// Shield lost per tick while inside a hazard zone
    pub hazard_drain: f32,
    /// Shield lost per tick while touching the boss
    pub boss_contact_drain: f32,
    pub boss_shot_damage: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tick_hz: 60,
            star_count: 100,
            hostile: SpawnRule::new(0.02, 5),
            power_up: SpawnRule::new(0.005, 3),
            asteroid: SpawnRule::new(0.01, 8),
            hazard: SpawnRule::new(0.002, 2),
            combo_window_ms: 1000,
            boss_score_per_stage: 1000.0,
            starting_shield: 100.0,
            hostile_contact_damage: 20.0,
            hazard_drain: 0.1,
            boss_contact_drain: 1.0,
            boss_shot_damage: 10.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GalaxiaError::invalid("playfield dimensions must be positive"));
        }
        if self.tick_hz == 0 {
            return Err(GalaxiaError::invalid("tick_hz must be non-zero"));
        }
        for (name, rule) in [
            ("hostile", &self.hostile),
            ("power_up", &self.power_up),
            ("asteroid", &self.asteroid),
            ("hazard", &self.hazard),
        ] {
            if !(0.0..=1.0).contains(&rule.chance) {
                return Err(GalaxiaError::invalid(format!(
                    "{name} spawn chance {} is outside [0, 1]",
                    rule.chance
                )));
            }
        }
        if self.starting_shield <= 0.0 {
            return Err(GalaxiaError::invalid("starting_shield must be positive"));
        }
        Ok(())
    }

    /// Duration of one tick in milliseconds.
    pub fn tick_ms(&self) -> f64 {
        1000.0 / f64::from(self.tick_hz)
    }
}

/// Particle field settings.
///
/// The wind constants differ between the historic variants of the effect
/// (divisor 1, 10 or 500); none of them is more correct than another.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub width: f32,
    pub height: f32,
    pub count: usize,
    /// Cursor distance under which the wind picks up
    pub wind_radius: f32,
    /// Force is `max(0, wind_falloff - distance) / wind_divisor`
    pub wind_falloff: f32,
    pub wind_divisor: f32,
    /// Per-tick wind multiplier once the cursor is out of range
    pub wind_decay: f32,
    /// Spring constant pulling orbiting particles to their anchor
    pub spring: f32,
    /// Anchor phase advance per tick; 0 keeps anchors fixed
    pub anchor_drift: f32,
    /// Per-tick chance an escaping particle turns back
    pub recall_chance: f64,
    pub gravity_min: f32,
    pub gravity_max: f32,
    /// Gravitation stops within this distance of its target
    pub capture_distance: f32,
    /// Wind force above which a particle goes wild
    pub wild_threshold: f32,
    /// Life lost per tick while wild (life starts at 1.0)
    pub wild_decay: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            count: 4000,
            wind_radius: 150.0,
            wind_falloff: 125.0,
            wind_divisor: 1.0,
            wind_decay: 0.98,
            spring: 0.02,
            anchor_drift: 0.0,
            recall_chance: 0.001,
            gravity_min: 0.05,
            gravity_max: 10.0,
            capture_distance: 10.0,
            wild_threshold: 100.0,
            wild_decay: 0.02,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GalaxiaError::invalid("field dimensions must be positive"));
        }
        if self.wind_divisor == 0.0 {
            return Err(GalaxiaError::invalid("wind_divisor must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.recall_chance) {
            return Err(GalaxiaError::invalid("recall_chance is outside [0, 1]"));
        }
        if self.gravity_min > self.gravity_max {
            return Err(GalaxiaError::invalid("gravity_min exceeds gravity_max"));
        }
        if self.wild_decay <= 0.0 {
            return Err(GalaxiaError::invalid("wild_decay must be positive"));
        }
        Ok(())
    }
}

/// Top-level config file layout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub particles: ParticleConfig,
}

impl Config {
    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and validates `path`, or returns the defaults when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Self::from_json_str(&text).map_err(|source| GalaxiaError::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Self::default(),
        };
        config.game.validate()?;
        config.particles.validate()?;
        Ok(config)
    }
}
