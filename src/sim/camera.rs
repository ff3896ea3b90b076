//! Camera follow, height score, and just-in-time world extension

use super::generator;
use super::state::{GameEvent, World};
use crate::consts::CAMERA_OFFSET;

/// Camera position that keeps the player `CAMERA_OFFSET` below the top edge
#[inline]
pub fn target_camera_y(player_y: f32, screen_height: f32) -> f32 {
    player_y - screen_height + CAMERA_OFFSET
}

/// Score earned for a camera position
#[inline]
pub fn score_for(camera_y: f32, score_unit: f32) -> u64 {
    (camera_y.abs() / score_unit).floor() as u64
}

/// Follow the player upward and extend the staircase on score milestones
///
/// The camera never moves back down. Each unit of score gained triggers
/// exactly one look-ahead batch. Returns the number of units gained.
pub fn track(world: &mut World) -> u64 {
    let target = target_camera_y(world.player.body.pos.y, world.config.world_height);
    if target >= world.camera_y {
        return 0;
    }
    world.camera_y = target;

    let new_score = score_for(world.camera_y, world.config.score_multiplier);
    if new_score <= world.score {
        return 0;
    }

    let gained = new_score - world.score;
    world.score = new_score;
    world.best_score = world.best_score.max(world.score);

    let batch = world.config.platforms_generated_ahead;
    for _ in 0..gained {
        generator::generate_ahead(world, batch);
    }

    world.push_event(GameEvent::Climbed { score: world.score });
    gained
}
