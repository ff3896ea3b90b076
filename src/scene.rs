//! Draw requests for the current frame
//!
//! The core never touches a display. [`build_scene`] turns a [`World`] into
//! an ordered list of [`DrawCommand`]s in screen space that any front end
//! can paint back to front.

use glam::Vec2;
use serde::Serialize;

use crate::consts::CULL_MARGIN;
use crate::sim::anim::ENEMY_WALK;
use crate::sim::{Phase, Rect, World};
use crate::ui::{self, MenuButton};

/// RGBA color, channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const SKY: Color = Color::from_rgb_u8(135, 206, 235);
    pub const WHITE: Color = Color::from_rgb_u8(255, 255, 255);
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    pub const BROWN: Color = Color::from_rgb_u8(165, 42, 42);
    pub const LIGHT_BLUE: Color = Color::from_rgb_u8(173, 216, 230);
    pub const GREEN: Color = Color::from_rgb_u8(0, 255, 0);
    pub const RED: Color = Color::from_rgb_u8(255, 0, 0);
    pub const YELLOW: Color = Color::from_rgb_u8(255, 255, 0);
}

/// How a text position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    TopLeft,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        anchor: Anchor,
        size: f32,
        color: Color,
        shadow: bool,
    },
    Sprite {
        name: &'static str,
        pos: Vec2,
        /// Mirror horizontally
        flip_x: bool,
    },
}

impl DrawCommand {
    fn text(text: impl Into<String>, pos: Vec2, anchor: Anchor, size: f32, color: Color) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            anchor,
            size,
            color,
            shadow: false,
        }
    }
}

/// Whether a world-space y lies inside the camera band
#[inline]
pub fn is_visible(y: f32, camera_y: f32, screen_height: f32) -> bool {
    camera_y - CULL_MARGIN < y && y < camera_y + screen_height + CULL_MARGIN
}

/// Everything to paint this frame, back to front
pub fn build_scene(world: &World) -> Vec<DrawCommand> {
    let mut out = vec![DrawCommand::FillRect {
        rect: Rect::new(0.0, 0.0, world.config.world_width, world.config.world_height),
        color: Color::SKY,
    }];

    match world.phase {
        Phase::Menu => draw_menu(world, &mut out),
        Phase::Playing => draw_game(world, &mut out),
    }

    out
}

fn draw_menu(world: &World, out: &mut Vec<DrawCommand>) {
    let mid = world.config.world_width / 2.0;

    out.push(DrawCommand::Text {
        text: "STAIR CLIMBER".to_string(),
        pos: Vec2::new(mid, 120.0),
        anchor: Anchor::Center,
        size: 48.0,
        color: Color::WHITE,
        shadow: true,
    });

    for button in MenuButton::ALL {
        let rect = button.rect();
        let fill = match button {
            MenuButton::Music if world.music_enabled => Color::GREEN,
            MenuButton::Music => Color::RED,
            _ => Color::LIGHT_BLUE,
        };
        out.push(DrawCommand::FillRect { rect, color: fill });
        out.push(DrawCommand::StrokeRect {
            rect,
            color: Color::WHITE,
        });
        out.push(DrawCommand::text(
            button.label(world.music_enabled),
            rect.center(),
            Anchor::Center,
            24.0,
            Color::WHITE,
        ));
    }

    out.push(DrawCommand::text(
        "Arrow keys to move, SPACE to jump",
        Vec2::new(mid, 480.0),
        Anchor::Center,
        20.0,
        Color::WHITE,
    ));
    out.push(DrawCommand::text(
        "Climb as high as you can!",
        Vec2::new(mid, 510.0),
        Anchor::Center,
        20.0,
        Color::WHITE,
    ));
    if world.best_score > 0 {
        out.push(DrawCommand::text(
            format!("Best Height: {}", world.best_score),
            Vec2::new(mid, 540.0),
            Anchor::Center,
            18.0,
            Color::YELLOW,
        ));
    }
}

fn draw_game(world: &World, out: &mut Vec<DrawCommand>) {
    let camera_y = world.camera_y;
    let height = world.config.world_height;

    for platform in &world.platforms {
        if !is_visible(platform.y, camera_y, height) {
            continue;
        }
        let rect = platform.offset_y(-camera_y);
        out.push(DrawCommand::FillRect {
            rect,
            color: Color::BROWN,
        });
        out.push(DrawCommand::StrokeRect {
            rect,
            color: Color::BLACK,
        });
    }

    let player = &world.player;
    out.push(DrawCommand::Sprite {
        name: player.anim.sprite(),
        pos: player.body.pos - Vec2::new(0.0, camera_y),
        flip_x: !player.facing_right,
    });

    for enemy in &world.enemies {
        if !is_visible(enemy.body.pos.y, camera_y, height) {
            continue;
        }
        out.push(DrawCommand::Sprite {
            name: enemy.walk.sprite(&ENEMY_WALK),
            pos: enemy.body.pos - Vec2::new(0.0, camera_y),
            flip_x: !enemy.facing_right(),
        });
    }

    out.push(DrawCommand::text(
        "ESC - Return to Menu",
        Vec2::new(10.0, 10.0),
        Anchor::TopLeft,
        16.0,
        Color::WHITE,
    ));
    out.push(DrawCommand::text(
        format!("Height: {}", world.score),
        Vec2::new(10.0, 30.0),
        Anchor::TopLeft,
        20.0,
        Color::YELLOW,
    ));
    out.push(DrawCommand::text(
        format!("Best: {}", world.best_score),
        Vec2::new(10.0, 55.0),
        Anchor::TopLeft,
        16.0,
        Color::GREEN,
    ));
    out.push(DrawCommand::text(
        format!("Music: {}", ui::on_off(world.music_enabled)),
        Vec2::new(10.0, 80.0),
        Anchor::TopLeft,
        14.0,
        Color::WHITE,
    ));
    out.push(DrawCommand::text(
        "CLIMB HIGHER",
        Vec2::new(world.config.world_width / 2.0, 30.0),
        Anchor::Center,
        24.0,
        Color::WHITE,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::SIM_DT;
    use crate::sim::{Enemy, ResetCause, TickInput, tick};

    fn texts(scene: &[DrawCommand]) -> Vec<&str> {
        scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_menu_scene() {
        let mut world = World::new(Config::default(), 3);
        let scene = build_scene(&world);

        assert_eq!(
            scene[0],
            DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                color: Color::SKY,
            }
        );
        let labels = texts(&scene);
        assert!(labels.contains(&"START GAME"));
        assert!(labels.contains(&"MUSIC: ON"));
        assert!(labels.contains(&"EXIT"));
        assert!(!labels.iter().any(|t| t.starts_with("Best Height")));

        world.best_score = 7;
        world.music_enabled = false;
        let scene = build_scene(&world);
        let labels = texts(&scene);
        assert!(labels.contains(&"Best Height: 7"));
        assert!(labels.contains(&"MUSIC: OFF"));
        assert!(scene.contains(&DrawCommand::FillRect {
            rect: MenuButton::Music.rect(),
            color: Color::RED,
        }));
    }

    #[test]
    fn test_game_scene_culls_and_offsets() {
        let mut world = World::new(Config::default(), 3);
        world.reset_run(ResetCause::Started);
        world.phase = Phase::Playing;
        world.camera_y = -200.0;

        let scene = build_scene(&world);
        let fills: Vec<Rect> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } if *color == Color::BROWN => Some(*rect),
                _ => None,
            })
            .collect();

        let expected: Vec<Rect> = world
            .platforms
            .iter()
            .filter(|p| p.y > -250.0 && p.y < 450.0)
            .map(|p| p.offset_y(200.0))
            .collect();
        assert_eq!(fills, expected);
        // Ground at 580 is below the band
        assert!(!fills.iter().any(|r| r.width == 800.0));
    }

    #[test]
    fn test_game_scene_sprites_and_hud() {
        let mut world = World::new(
            Config {
                enemy_spawn_chance: 0.0,
                ..Default::default()
            },
            3,
        );
        let start = TickInput {
            click: Some(ui::button_center(MenuButton::Start)),
            ..Default::default()
        };
        tick(&mut world, &start, SIM_DT);
        world.enemies.push(Enemy::new(Vec2::new(200.0, 300.0), 180.0, 300.0, 1.0));
        world.enemies.push(Enemy::new(Vec2::new(200.0, -900.0), 180.0, 300.0, 1.0));

        let scene = build_scene(&world);
        let sprites: Vec<&str> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { name, .. } => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(sprites, vec!["player_idle1", "enemy_walk1"]);

        let labels = texts(&scene);
        assert!(labels.contains(&"Height: 0"));
        assert!(labels.contains(&"Best: 0"));
        assert!(labels.contains(&"Music: ON"));
        assert!(labels.contains(&"ESC - Return to Menu"));
    }

    #[test]
    fn test_visibility_band_is_open() {
        assert!(is_visible(0.0, 0.0, 600.0));
        assert!(!is_visible(-50.0, 0.0, 600.0));
        assert!(!is_visible(650.0, 0.0, 600.0));
        assert!(is_visible(649.0, 0.0, 600.0));
    }
}
