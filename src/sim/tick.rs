//! Per-tick controller
//!
//! Orders one frame of play: input → physics → platform collision → fall
//! check → camera/score (and lazy generation) → enemies → enemy collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::ENEMY_WALK;
use super::camera;
use super::collision;
use super::physics::{self, MoveIntent};
use super::state::{GameEvent, Phase, ResetCause, World};
use crate::consts::DEATH_MARGIN;
use crate::ui::{self, MenuButton};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub movement: MoveIntent,
    /// Jump held/pressed (only honoured while grounded)
    pub jump: bool,
    /// Return to the menu
    pub escape: bool,
    /// Pointer click in screen coordinates (menu only)
    pub click: Option<Vec2>,
}

/// Advance the world by one tick
///
/// `dt` only drives cosmetic animation; motion is per tick.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    match world.phase {
        Phase::Menu => handle_menu(world, input),
        Phase::Playing => play(world, input, dt),
    }
}

fn handle_menu(world: &mut World, input: &TickInput) {
    let Some(click) = input.click else { return };
    let Some(button) = ui::button_at(click) else { return };

    world.push_event(GameEvent::MenuSelect);
    match button {
        MenuButton::Start => {
            world.reset_run(ResetCause::Started);
            world.phase = Phase::Playing;
            log::info!("Game started (seed {})", world.seed);
        }
        MenuButton::Music => {
            world.music_enabled = !world.music_enabled;
            world.push_event(GameEvent::MusicToggled {
                enabled: world.music_enabled,
            });
        }
        MenuButton::Exit => {
            world.exit_requested = true;
            world.push_event(GameEvent::ExitRequested);
            log::info!("Exit requested");
        }
    }
}

fn play(world: &mut World, input: &TickInput, dt: f32) {
    if input.escape {
        world.phase = Phase::Menu;
        world.push_event(GameEvent::ReturnedToMenu);
        log::info!("Returned to menu at height {}", world.score);
        return;
    }

    world.time_ticks += 1;

    let jumped =
        physics::integrate_player(&mut world.player, input.movement, input.jump, &world.config);
    if jumped {
        world.push_event(GameEvent::Jumped);
    }

    collision::resolve_platforms(&mut world.player, &world.platforms);

    let death_line = world.camera_y + world.config.world_height + DEATH_MARGIN;
    if world.player.body.pos.y > death_line {
        world.reset_run(ResetCause::Fell);
        return;
    }

    camera::track(world);

    let player = &mut world.player;
    player
        .anim
        .update(jumped, player.on_ground, player.body.vel.x, dt);

    for enemy in &mut world.enemies {
        physics::patrol_enemy(enemy);
        enemy.walk.advance(&ENEMY_WALK, dt);
    }

    if collision::first_enemy_hit(&world.player.body.rect(), &world.enemies).is_some() {
        world.reset_run(ResetCause::EnemyHit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::*;
    use crate::sim::Autopilot;
    use crate::sim::generator;
    use crate::sim::state::Enemy;

    fn playing_world() -> World {
        let mut world = World::new(Config::default(), 12345);
        let start = TickInput {
            click: Some(ui::button_center(MenuButton::Start)),
            ..Default::default()
        };
        tick(&mut world, &start, SIM_DT);
        world.drain_events();
        world
    }

    #[test]
    fn test_menu_to_playing() {
        let mut world = World::new(Config::default(), 12345);
        assert_eq!(world.phase, Phase::Menu);

        // Ticks without a click stay on the menu
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.phase, Phase::Menu);

        let start = TickInput {
            click: Some(ui::button_center(MenuButton::Start)),
            ..Default::default()
        };
        tick(&mut world, &start, SIM_DT);
        assert_eq!(world.phase, Phase::Playing);
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::MenuSelect, GameEvent::Reset(ResetCause::Started)]
        );
    }

    #[test]
    fn test_music_and_exit_buttons() {
        let mut world = World::new(Config::default(), 1);
        let music = TickInput {
            click: Some(ui::button_center(MenuButton::Music)),
            ..Default::default()
        };
        tick(&mut world, &music, SIM_DT);
        assert!(!world.music_enabled);
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::MenuSelect, GameEvent::MusicToggled { enabled: false }]
        );

        let exit = TickInput {
            click: Some(ui::button_center(MenuButton::Exit)),
            ..Default::default()
        };
        tick(&mut world, &exit, SIM_DT);
        assert!(world.exit_requested);
        assert_eq!(world.phase, Phase::Menu);
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut world = playing_world();
        let escape = TickInput {
            escape: true,
            ..Default::default()
        };
        tick(&mut world, &escape, SIM_DT);
        assert_eq!(world.phase, Phase::Menu);
        assert_eq!(world.drain_events(), vec![GameEvent::ReturnedToMenu]);
    }

    #[test]
    fn test_spawn_falls_onto_ground() {
        let mut world = playing_world();
        for _ in 0..60 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert!(world.player.on_ground);
        assert_eq!(world.player.body.rect().bottom(), GROUND_Y);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_fall_death_resets() {
        let mut world = playing_world();
        world.best_score = 9;
        world.score = 4;
        world.camera_y = -300.0;
        // Clear of every stair at this height
        world.player.body.pos = Vec2::new(500.0, world.camera_y + 600.0 + 101.0);
        generator::generate_ahead(&mut world, 8);

        tick(&mut world, &TickInput::default(), SIM_DT);

        assert_eq!(world.player.body.pos, PLAYER_SPAWN);
        assert_eq!(world.score, 0);
        assert_eq!(world.camera_y, 0.0);
        assert_eq!(world.best_score, 9);
        assert_eq!(world.phase, Phase::Playing);
        assert_eq!(world.platforms.len(), 1 + world.config.initial_platforms);
        assert_eq!(world.cursor.current_y, GROUND_Y - 20.0 * 80.0);
        assert_eq!(world.drain_events(), vec![GameEvent::Reset(ResetCause::Fell)]);
    }

    #[test]
    fn test_enemy_hit_resets() {
        let mut world = playing_world();
        let pos = world.player.body.pos;
        world
            .enemies
            .push(Enemy::new(pos + Vec2::new(4.0, 8.0), pos.x - 50.0, pos.x + 50.0, 1.0));

        tick(&mut world, &TickInput::default(), SIM_DT);

        assert_eq!(world.drain_events(), vec![GameEvent::Reset(ResetCause::EnemyHit)]);
        assert_eq!(world.player.body.pos, PLAYER_SPAWN);
    }

    #[test]
    fn test_jump_emits_event() {
        let mut world = playing_world();
        for _ in 0..60 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump, SIM_DT);
        assert_eq!(world.drain_events(), vec![GameEvent::Jumped]);
        assert!(world.player.body.vel.y < 0.0);
        assert_eq!(world.player.anim.state, crate::sim::AnimState::Jump);

        // Holding jump in the air does nothing
        tick(&mut world, &jump, SIM_DT);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_world();
        let mut b = playing_world();
        let mut pilot_a = Autopilot::new();
        let mut pilot_b = Autopilot::new();
        for _ in 0..600 {
            let input = pilot_a.next_input(&a);
            tick(&mut a, &input, SIM_DT);
            let input = pilot_b.next_input(&b);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.player.body, b.player.body);
        assert_eq!(a.score, b.score);
        assert_eq!(a.platforms.len(), b.platforms.len());
    }
}
