//! Procedural zigzag staircase generation
//!
//! Platforms step upward by a fixed vertical gap and sideways by a fixed
//! horizontal gap. The horizontal direction flips every `zigzag_platforms`
//! steps and the x position is clamped between the side margins, so the
//! path always stays on screen and within jump reach. The world is grown
//! lazily in small batches as the player climbs; nothing is precomputed.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GenerationCursor, Platform, World};
use crate::config::Config;
use crate::consts::*;

/// Geometry that drives a single staircase step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StairParams {
    pub vertical_gap: f32,
    pub horizontal_gap: f32,
    pub zigzag_period: u32,
    pub min_x: f32,
    pub max_x: f32,
    pub platform_width: f32,
    pub platform_height: f32,
}

impl StairParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            vertical_gap: config.stair_vertical_gap,
            horizontal_gap: config.stair_horizontal_gap,
            zigzag_period: config.zigzag_platforms,
            min_x: MARGIN,
            max_x: config.max_platform_x(),
            platform_width: config.platform_width,
            platform_height: config.platform_height,
        }
    }
}

/// Advance the cursor by one step and return the platform placed there
///
/// Clamping never touches `going_right`: after a wall is hit the next steps
/// keep pushing against it until the run ends.
pub fn step(cursor: &mut GenerationCursor, params: &StairParams) -> Platform {
    cursor.current_y -= params.vertical_gap;

    cursor.platforms_in_run += 1;
    if cursor.platforms_in_run >= params.zigzag_period {
        cursor.going_right = !cursor.going_right;
        cursor.platforms_in_run = 0;
    }

    if cursor.going_right {
        cursor.current_x += params.horizontal_gap;
    } else {
        cursor.current_x -= params.horizontal_gap;
    }
    cursor.current_x = cursor.current_x.clamp(params.min_x, params.max_x);

    Platform::new(
        cursor.current_x,
        cursor.current_y,
        params.platform_width,
        params.platform_height,
    )
}

/// Enemy standing on `platform`, patrolling its full width
pub fn enemy_on(platform: &Platform, speed: f32) -> Enemy {
    let pos = Vec2::new(platform.x + ENEMY_INSET, platform.y - ENEMY_SIZE.y);
    Enemy::new(pos, platform.x, platform.right() - ENEMY_SIZE.x, speed)
}

/// Rebuild the world from the fixed starting cursor
///
/// Clears platforms and enemies, lays the ground, then `count` steps.
/// Returns the cursor left behind for later extension.
pub fn generate_initial(world: &mut World, count: usize) -> GenerationCursor {
    world.cursor = GenerationCursor::default();
    world.platforms.clear();
    world.enemies.clear();
    world
        .platforms
        .push(Platform::new(0.0, GROUND_Y, world.config.world_width, GROUND_HEIGHT));

    extend(world, count, INITIAL_ENEMY_GRACE);

    log::debug!(
        "Initial staircase: {} platforms, {} enemies, cursor at ({}, {})",
        world.platforms.len(),
        world.enemies.len(),
        world.cursor.current_x,
        world.cursor.current_y
    );
    world.cursor
}

/// Continue the staircase from the current cursor
pub fn generate_ahead(world: &mut World, count: usize) {
    extend(world, count, AHEAD_ENEMY_GRACE);
    world.ahead_batches += 1;

    log::debug!(
        "Generated {} platforms ahead, frontier y={}",
        count,
        world.cursor.current_y
    );
}

fn extend(world: &mut World, count: usize, enemy_grace: usize) {
    let params = StairParams::from_config(&world.config);
    let chance = world.config.enemy_spawn_chance;
    let speed = world.config.enemy_speed;

    world.platforms.reserve(count);
    for i in 0..count {
        let platform = step(&mut world.cursor, &params);
        world.platforms.push(platform);

        // Always draw so the RNG stream does not depend on the grace window
        let roll: f32 = world.rng.random();
        if i >= enemy_grace && roll < chance {
            world.enemies.push(enemy_on(&platform, speed));
        }
    }
}
