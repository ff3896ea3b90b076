//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick motion only (`dt` drives cosmetic animation)
//! - Seeded RNG only
//! - Append-only platform and enemy order between resets
//! - No rendering or audio dependencies

pub mod anim;
pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod generator;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use anim::{AnimState, PlayerAnimation};
pub use autopilot::Autopilot;
pub use collision::{Contact, first_enemy_hit, resolve_platforms};
pub use generator::{StairParams, generate_ahead, generate_initial};
pub use physics::{MoveIntent, integrate_player, patrol_enemy};
pub use rect::Rect;
pub use state::{
    Body, Enemy, GameEvent, GenerationCursor, Phase, Platform, Player, ResetCause, World,
};
pub use tick::{TickInput, tick};
