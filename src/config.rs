//! Game configuration
//!
//! Every tunable is a named numeric or boolean parameter with a default.
//! Values can be overlaid from environment variables (the same keys the
//! game has always read from its `.env` file) or loaded from JSON.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MARGIN;

/// Longest rise, in ticks, a jump may take before gravity turns it around
pub const MAX_RISE_TICKS: f32 = 600.0;
/// Smallest accepted score unit, in pixels
pub const MIN_SCORE_UNIT: f32 = 1.0;

/// Errors raised while loading or validating a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("world width {world_width} cannot hold a {platform_width}px platform between margins")]
    TooNarrow { world_width: f32, platform_width: f32 },
}

/// Externally supplied game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Physics ===
    /// Added to vertical velocity every tick (pixels/tick²)
    pub gravity: f32,
    /// Upward velocity applied on jump (pixels/tick)
    pub jump_speed: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,

    // === Staircase ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub stair_vertical_gap: f32,
    pub stair_horizontal_gap: f32,
    /// Platforms per run before the staircase changes direction
    pub zigzag_platforms: u32,
    pub enemy_spawn_chance: f32,
    /// Look-ahead batch size
    pub platforms_generated_ahead: usize,
    pub initial_platforms: usize,

    // === Scoring ===
    /// Camera distance climbed per point of score
    pub score_multiplier: f32,

    // === Audio ===
    pub music_enabled: bool,
    pub sounds_enabled: bool,
    pub music_volume: f32,

    /// Fixed RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,

            gravity: 0.5,
            jump_speed: 12.0,
            player_speed: 3.0,
            enemy_speed: 1.0,

            platform_width: 150.0,
            platform_height: 20.0,
            stair_vertical_gap: 80.0,
            stair_horizontal_gap: 120.0,
            zigzag_platforms: 6,
            enemy_spawn_chance: 0.15,
            platforms_generated_ahead: 8,
            initial_platforms: 20,

            score_multiplier: 50.0,

            music_enabled: true,
            sounds_enabled: true,
            music_volume: 0.5,

            seed: None,
        }
    }
}

impl Config {
    /// Load defaults overlaid with process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults overlaid with values from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        overlay(&lookup, "GAME_WIDTH", &mut cfg.world_width)?;
        overlay(&lookup, "GAME_HEIGHT", &mut cfg.world_height)?;
        overlay(&lookup, "GRAVITY", &mut cfg.gravity)?;
        overlay(&lookup, "JUMP_SPEED", &mut cfg.jump_speed)?;
        overlay(&lookup, "PLAYER_SPEED", &mut cfg.player_speed)?;
        overlay(&lookup, "ENEMY_SPEED", &mut cfg.enemy_speed)?;
        overlay(&lookup, "PLATFORM_WIDTH", &mut cfg.platform_width)?;
        overlay(&lookup, "PLATFORM_HEIGHT", &mut cfg.platform_height)?;
        overlay(&lookup, "STAIR_VERTICAL_GAP", &mut cfg.stair_vertical_gap)?;
        overlay(&lookup, "STAIR_HORIZONTAL_GAP", &mut cfg.stair_horizontal_gap)?;
        overlay(&lookup, "ZIGZAG_PLATFORMS", &mut cfg.zigzag_platforms)?;
        overlay(&lookup, "MUSIC_VOLUME", &mut cfg.music_volume)?;
        overlay(&lookup, "SCORE_MULTIPLIER", &mut cfg.score_multiplier)?;
        overlay(&lookup, "ENEMY_SPAWN_CHANCE", &mut cfg.enemy_spawn_chance)?;
        overlay(&lookup, "PLATFORMS_GENERATED_AHEAD", &mut cfg.platforms_generated_ahead)?;
        overlay(&lookup, "INITIAL_PLATFORMS", &mut cfg.initial_platforms)?;
        overlay_flag(&lookup, "MUSIC_ENABLED", &mut cfg.music_enabled);
        overlay_flag(&lookup, "SOUNDS_ENABLED", &mut cfg.sounds_enabled);

        if let Some(raw) = lookup("GAME_SEED") {
            let seed = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "GAME_SEED",
                value: raw.clone(),
            })?;
            cfg.seed = Some(seed);
        }

        Ok(cfg)
    }

    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject parameter sets that cannot produce a playable staircase
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width < self.platform_width + 2.0 * MARGIN {
            return Err(ConfigError::TooNarrow {
                world_width: self.world_width,
                platform_width: self.platform_width,
            });
        }

        let positive = [
            ("world_height", self.world_height),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("stair_vertical_gap", self.stair_vertical_gap),
            ("stair_horizontal_gap", self.stair_horizontal_gap),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        // Also bounds how many look-ahead batches one tick can trigger
        if !(self.score_multiplier >= MIN_SCORE_UNIT) {
            return Err(ConfigError::OutOfRange {
                field: "score_multiplier",
                value: self.score_multiplier as f64,
            });
        }

        let rise_ticks = self.jump_speed / self.gravity;
        if !(rise_ticks <= MAX_RISE_TICKS) {
            return Err(ConfigError::OutOfRange {
                field: "jump_speed / gravity",
                value: rise_ticks as f64,
            });
        }

        if self.zigzag_platforms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "zigzag_platforms",
                value: 0.0,
            });
        }

        let unit = [
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("music_volume", self.music_volume),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        Ok(())
    }

    /// Rightmost x a generated platform may start at
    pub fn max_platform_x(&self) -> f32 {
        self.world_width - self.platform_width - MARGIN
    }
}

fn overlay<F, T>(lookup: &F, key: &'static str, slot: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() })?;
    }
    Ok(())
}

/// Only a literal `true` (any case) enables a flag
fn overlay_flag<F>(lookup: &F, key: &'static str, slot: &mut bool)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        *slot = raw.trim().eq_ignore_ascii_case("true");
    }
}
