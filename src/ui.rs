//! Menu layout and hit-testing

use glam::Vec2;

use crate::sim::Rect;

/// Clickable menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuButton {
    Start,
    Music,
    Exit,
}

impl MenuButton {
    pub const ALL: [MenuButton; 3] = [MenuButton::Start, MenuButton::Music, MenuButton::Exit];

    /// Screen-space bounds
    pub fn rect(&self) -> Rect {
        match self {
            MenuButton::Start => Rect::new(300.0, 200.0, 200.0, 50.0),
            MenuButton::Music => Rect::new(300.0, 280.0, 200.0, 50.0),
            MenuButton::Exit => Rect::new(300.0, 360.0, 200.0, 50.0),
        }
    }

    pub fn label(&self, music_enabled: bool) -> String {
        match self {
            MenuButton::Start => "START GAME".to_string(),
            MenuButton::Music => format!("MUSIC: {}", on_off(music_enabled)),
            MenuButton::Exit => "EXIT".to_string(),
        }
    }
}

/// Button under a screen-space point, if any
pub fn button_at(point: Vec2) -> Option<MenuButton> {
    MenuButton::ALL
        .into_iter()
        .find(|b| b.rect().contains_point(point))
}

/// Middle of a button (handy for scripted clicks)
pub fn button_center(button: MenuButton) -> Vec2 {
    button.rect().center()
}

pub fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}
