//! World state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`World`], passed by
//! `&mut` into each component.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::{FrameTimer, PlayerAnimation};
use super::generator;
use super::rect::Rect;
use crate::config::Config;
use crate::consts::*;

/// Platforms are plain rectangles, never mutated after creation
pub type Platform = Rect;

/// Top-level controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen with clickable buttons
    #[default]
    Menu,
    /// Active climb (death resets in place, it is not a phase)
    Playing,
}

/// Why a run was restarted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    /// Player dropped below the visible screen
    Fell,
    /// Player touched an enemy
    EnemyHit,
    /// Start button pressed on the menu
    Started,
}

/// Things that happened during a tick, for audio and logging collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Reset(ResetCause),
    /// Score rose to a new value
    Climbed { score: u64 },
    MenuSelect,
    MusicToggled { enabled: bool },
    ReturnedToMenu,
    ExitRequested,
}

/// Shared kinematic shape of the player and enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub on_ground: bool,
    pub facing_right: bool,
    pub anim: PlayerAnimation,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, PLAYER_SIZE),
            on_ground: false,
            facing_right: false,
            anim: PlayerAnimation::default(),
        }
    }

    /// Back to the spawn point at rest
    pub fn respawn(&mut self) {
        *self = Self::new(PLAYER_SPAWN);
    }
}

/// A patrolling enemy standing on a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub patrol_start: f32,
    pub patrol_end: f32,
    /// +1.0 moving right, -1.0 moving left
    pub direction: f32,
    pub speed: f32,
    #[serde(skip)]
    pub walk: FrameTimer,
}

impl Enemy {
    pub fn new(pos: Vec2, patrol_start: f32, patrol_end: f32, speed: f32) -> Self {
        Self {
            body: Body::new(pos, ENEMY_SIZE),
            patrol_start,
            patrol_end,
            direction: 1.0,
            speed,
            walk: FrameTimer::default(),
        }
    }

    pub fn facing_right(&self) -> bool {
        self.direction > 0.0
    }
}

/// Frontier from which the staircase extends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationCursor {
    pub current_x: f32,
    pub current_y: f32,
    pub platforms_in_run: u32,
    pub going_right: bool,
}

impl GenerationCursor {
    pub fn new(current_x: f32, current_y: f32) -> Self {
        Self {
            current_x,
            current_y,
            platforms_in_run: 0,
            going_right: true,
        }
    }
}

impl Default for GenerationCursor {
    fn default() -> Self {
        Self::new(CURSOR_START.x, CURSOR_START.y)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: Phase,
    pub player: Player,
    /// Append-only between resets; index 0 is the ground
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub cursor: GenerationCursor,
    /// Top of the visible screen in world space (only ever decreases)
    pub camera_y: f32,
    pub score: u64,
    /// Best score this session (survives resets)
    pub best_score: u64,
    pub music_enabled: bool,
    /// Look-ahead batches generated since the last reset
    pub ahead_batches: u64,
    /// Resets since the session began
    pub resets: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub exit_requested: bool,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl World {
    /// Create a world with a freshly generated staircase, waiting on the menu
    pub fn new(config: Config, seed: u64) -> Self {
        let music_enabled = config.music_enabled;
        let mut world = Self {
            config,
            seed,
            phase: Phase::Menu,
            player: Player::new(PLAYER_SPAWN),
            platforms: Vec::new(),
            enemies: Vec::new(),
            cursor: GenerationCursor::default(),
            camera_y: 0.0,
            score: 0,
            best_score: 0,
            music_enabled,
            ahead_batches: 0,
            resets: 0,
            time_ticks: 0,
            exit_requested: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };

        let count = world.config.initial_platforms;
        generator::generate_initial(&mut world, count);

        world
    }

    /// Reinitialize the run: player, camera, score, cursor, platforms, enemies
    pub fn reset_run(&mut self, cause: ResetCause) {
        self.player.respawn();
        self.camera_y = 0.0;
        self.score = 0;
        self.ahead_batches = 0;
        self.resets += 1;

        let count = self.config.initial_platforms;
        generator::generate_initial(self, count);

        log::info!(
            "Run reset ({:?}): {} platforms, {} enemies, best {}",
            cause,
            self.platforms.len(),
            self.enemies.len(),
            self.best_score
        );
        self.push_event(GameEvent::Reset(cause));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand queued events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Highest (smallest y) platform generated so far
    pub fn frontier_y(&self) -> f32 {
        self.cursor.current_y
    }
}
