//! Stair Climber - an endless vertical-climb platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, collisions, camera, controller)
//! - `config`: Externally supplied tuning parameters
//! - `audio`: Sound triggers behind a non-failing sink
//! - `scene`: Draw requests computed from the world
//! - `ui`: Menu button layout and hit-testing

pub mod audio;
pub mod config;
pub mod scene;
pub mod sim;
pub mod ui;

pub use config::{Config, ConfigError};

/// Fixed geometry and timing constants (not externally tunable)
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Horizontal keep-out band on both sides of the staircase
    pub const MARGIN: f32 = 50.0;

    /// Ground platform top edge and thickness
    pub const GROUND_Y: f32 = 580.0;
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Where the generation cursor restarts on every reset
    pub const CURSOR_START: Vec2 = Vec2::new(MARGIN, GROUND_Y);

    /// Player spawn point and hitbox
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 500.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);

    /// Enemy hitbox and spawn inset from the platform's left edge
    pub const ENEMY_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    pub const ENEMY_INSET: f32 = 20.0;

    /// Camera keeps the player this far below the top of the screen
    pub const CAMERA_OFFSET: f32 = 200.0;
    /// Distance below the visible screen at which the player is lost
    pub const DEATH_MARGIN: f32 = 100.0;
    /// Extra band above/below the screen still considered visible
    pub const CULL_MARGIN: f32 = 50.0;

    /// Platforms at the start of a batch that never carry an enemy
    pub const INITIAL_ENEMY_GRACE: usize = 3;
    pub const AHEAD_ENEMY_GRACE: usize = 2;
}
