//! Per-tick kinematics for the player and enemies
//!
//! Velocities are in pixels per tick; there is no acceleration model for
//! horizontal motion.

use serde::{Deserialize, Serialize};

use super::state::{Enemy, Player};
use crate::config::Config;

/// Horizontal movement intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveIntent {
    Left,
    Right,
    #[default]
    None,
}

/// Advance the player by one tick
///
/// Gravity is applied even while grounded; the collision pass re-snaps the
/// player onto the platform afterwards. Returns true if a jump started.
pub fn integrate_player(player: &mut Player, intent: MoveIntent, jump: bool, config: &Config) -> bool {
    let body = &mut player.body;

    body.vel.x = match intent {
        MoveIntent::Left => {
            player.facing_right = false;
            -config.player_speed
        }
        MoveIntent::Right => {
            player.facing_right = true;
            config.player_speed
        }
        MoveIntent::None => 0.0,
    };

    let jumped = jump && player.on_ground;
    if jumped {
        body.vel.y = -config.jump_speed;
        player.on_ground = false;
    }

    body.vel.y += config.gravity;
    body.pos += body.vel;
    body.pos.x = body.pos.x.clamp(0.0, config.world_width - body.size.x);

    jumped
}

/// Move an enemy one step along its patrol, turning at either bound
pub fn patrol_enemy(enemy: &mut Enemy) {
    enemy.body.pos.x += enemy.speed * enemy.direction;
    enemy.body.vel.x = enemy.speed * enemy.direction;

    if enemy.body.pos.x <= enemy.patrol_start {
        enemy.direction = 1.0;
    } else if enemy.body.pos.x >= enemy.patrol_end {
        enemy.direction = -1.0;
    }
}

/// Highest rise of a jump from rest, in pixels
///
/// Matches summing the per-tick displacements `jump_speed - k * gravity`
/// while they stay positive, in closed form.
pub fn jump_apex_height(config: &Config) -> f32 {
    if config.jump_speed <= 0.0 {
        return 0.0;
    }
    if !(config.gravity > 0.0) {
        return f32::INFINITY;
    }
    let jump = config.jump_speed as f64;
    let gravity = config.gravity as f64;
    // Ticks with upward motion after the first gravity step
    let n = ((jump / gravity).ceil() - 1.0).max(0.0);
    (n * jump - gravity * n * (n + 1.0) / 2.0) as f32
}
