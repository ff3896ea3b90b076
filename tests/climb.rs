//! Whole-session behaviour through the public API

use stair_climber::Config;
use stair_climber::audio::{SilentBackend, SoundSink};
use stair_climber::consts::{GROUND_Y, MARGIN, PLAYER_SPAWN, SIM_DT};
use stair_climber::scene::{DrawCommand, build_scene};
use stair_climber::sim::{Autopilot, GameEvent, Phase, ResetCause, TickInput, World, tick};
use stair_climber::ui::{self, MenuButton};

fn click(button: MenuButton) -> TickInput {
    TickInput {
        click: Some(ui::button_center(button)),
        ..Default::default()
    }
}

fn run(world: &mut World, pilot: &mut Autopilot, ticks: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        let input = pilot.next_input(world);
        tick(world, &input, SIM_DT);
        events.extend(world.drain_events());
    }
    events
}

#[test]
fn session_with_enemies_keeps_best_score() {
    let mut world = World::new(Config::default(), 99);
    tick(&mut world, &click(MenuButton::Start), SIM_DT);
    let mut pilot = Autopilot::new();

    let mut best = 0;
    for _ in 0..30 {
        run(&mut world, &mut pilot, 120);
        assert!(world.best_score >= best);
        assert!(world.best_score >= world.score);
        best = world.best_score;

        // Staircase stays inside the margins and stacked in order
        let stairs = &world.platforms[1..];
        for p in stairs {
            assert!(p.x >= MARGIN);
            assert!(p.x <= world.config.max_platform_x());
        }
        for pair in stairs.windows(2) {
            assert_eq!(pair[0].y - pair[1].y, world.config.stair_vertical_gap);
        }
    }
    assert_eq!(world.phase, Phase::Playing);
}

#[test]
fn climbing_extends_staircase_ahead_of_camera() {
    let config = Config {
        enemy_spawn_chance: 0.0,
        ..Default::default()
    };
    let mut world = World::new(config, 4);
    tick(&mut world, &click(MenuButton::Start), SIM_DT);
    let mut pilot = Autopilot::new();

    let events = run(&mut world, &mut pilot, 1200);

    assert!(world.best_score > 0);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Climbed { .. })));
    assert!(events.contains(&GameEvent::Jumped));
    assert_eq!(world.ahead_batches, world.score);
    assert_eq!(
        world.platforms.len(),
        1 + world.config.initial_platforms
            + world.score as usize * world.config.platforms_generated_ahead
    );
    // Always more staircase above the top of the screen
    assert!(world.frontier_y() < world.camera_y);
}

#[test]
fn escape_then_restart_fresh_run() {
    let mut world = World::new(Config::default(), 8);
    tick(&mut world, &click(MenuButton::Start), SIM_DT);
    let mut pilot = Autopilot::new();
    run(&mut world, &mut pilot, 600);

    let escape = TickInput {
        escape: true,
        ..Default::default()
    };
    tick(&mut world, &escape, SIM_DT);
    assert_eq!(world.phase, Phase::Menu);

    // Menu ignores gameplay input
    let frozen = world.player;
    tick(&mut world, &TickInput { jump: true, ..Default::default() }, SIM_DT);
    assert_eq!(world.player, frozen);

    let best = world.best_score;
    tick(&mut world, &click(MenuButton::Start), SIM_DT);
    assert_eq!(
        world.drain_events(),
        vec![
            GameEvent::ReturnedToMenu,
            GameEvent::MenuSelect,
            GameEvent::Reset(ResetCause::Started)
        ]
    );
    assert_eq!(world.player.body.pos, PLAYER_SPAWN);
    assert_eq!(world.score, 0);
    assert_eq!(world.best_score, best);
    assert_eq!(world.platforms[0].y, GROUND_Y);
}

#[test]
fn events_feed_sound_sink_without_errors() {
    let config = Config::default();
    let mut sink = SoundSink::new(SilentBackend::default(), &config);
    let mut world = World::new(config, 21);
    sink.start_music();

    tick(&mut world, &click(MenuButton::Music), SIM_DT);
    sink.handle_events(&world.drain_events());
    assert!(!sink.backend().music_playing);

    tick(&mut world, &click(MenuButton::Start), SIM_DT);
    let mut pilot = Autopilot::new();
    let events = run(&mut world, &mut pilot, 300);
    sink.handle_events(&events);
    assert_eq!(sink.failures(), 0);

    let scene = build_scene(&world);
    assert!(scene.iter().any(
        |c| matches!(c, DrawCommand::Text { text, .. } if text == "Music: OFF")
    ));
}

#[test]
fn exit_button_requests_exit() {
    let mut world = World::new(Config::default(), 1);
    tick(&mut world, &click(MenuButton::Exit), SIM_DT);
    assert!(world.exit_requested);
    assert_eq!(
        world.drain_events(),
        vec![GameEvent::MenuSelect, GameEvent::ExitRequested]
    );
}
