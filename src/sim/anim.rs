//! Sprite animation state
//!
//! Purely cosmetic: nothing here feeds back into physics. The player's
//! animation is an explicit state machine driven by the grounded flag and
//! horizontal velocity after each tick.

use serde::{Deserialize, Serialize};

/// A looping sequence of sprite names
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub frames: &'static [&'static str],
    /// Seconds each frame is shown
    pub interval: f32,
}

pub const PLAYER_IDLE: Clip = Clip {
    frames: &["player_idle1", "player_idle2"],
    interval: 0.5,
};

pub const PLAYER_WALK: Clip = Clip {
    frames: &["player_walk1", "player_walk2", "player_walk3"],
    interval: 0.2,
};

pub const PLAYER_JUMP: Clip = Clip {
    frames: &["player_jump"],
    interval: 1.0,
};

pub const ENEMY_WALK: Clip = Clip {
    frames: &["enemy_walk1", "enemy_walk2"],
    interval: 0.3,
};

/// Frame counter for a clip
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTimer {
    pub frame: usize,
    pub timer: f32,
}

impl FrameTimer {
    pub fn advance(&mut self, clip: &Clip, dt: f32) {
        self.timer += dt;
        if self.timer >= clip.interval {
            self.frame = (self.frame + 1) % clip.frames.len();
            self.timer = 0.0;
        }
    }

    pub fn sprite(&self, clip: &Clip) -> &'static str {
        clip.frames[self.frame % clip.frames.len()]
    }
}

/// Player animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Jump,
}

impl AnimState {
    pub fn clip(&self) -> &'static Clip {
        match self {
            AnimState::Idle => &PLAYER_IDLE,
            AnimState::Walk => &PLAYER_WALK,
            AnimState::Jump => &PLAYER_JUMP,
        }
    }

    /// Transition rule
    ///
    /// A jump always wins; on the ground the state follows horizontal
    /// motion; in the air the current state is held (so walking off a ledge
    /// keeps the walk cycle, as before).
    pub fn next(self, jumped: bool, on_ground: bool, velocity_x: f32) -> AnimState {
        if jumped {
            AnimState::Jump
        } else if on_ground {
            if velocity_x != 0.0 {
                AnimState::Walk
            } else {
                AnimState::Idle
            }
        } else {
            self
        }
    }
}

/// Player animation: state machine + frame timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerAnimation {
    pub state: AnimState,
    pub timer: FrameTimer,
}

impl PlayerAnimation {
    /// Apply the transition rule, then advance the current clip
    pub fn update(&mut self, jumped: bool, on_ground: bool, velocity_x: f32, dt: f32) {
        let next = self.state.next(jumped, on_ground, velocity_x);
        if next != self.state {
            self.state = next;
            self.timer = FrameTimer::default();
        }
        self.timer.advance(self.state.clip(), dt);
    }

    pub fn sprite(&self) -> &'static str {
        self.timer.sprite(self.state.clip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert_eq!(AnimState::Idle.next(true, true, 0.0), AnimState::Jump);
        assert_eq!(AnimState::Jump.next(false, true, 3.0), AnimState::Walk);
        assert_eq!(AnimState::Walk.next(false, true, 0.0), AnimState::Idle);
        // Airborne holds the current state
        assert_eq!(AnimState::Walk.next(false, false, 0.0), AnimState::Walk);
        assert_eq!(AnimState::Jump.next(false, false, -3.0), AnimState::Jump);
    }

    #[test]
    fn test_frame_cycling() {
        let mut anim = PlayerAnimation::default();
        assert_eq!(anim.sprite(), "player_idle1");
        anim.update(false, true, 0.0, 0.5);
        assert_eq!(anim.sprite(), "player_idle2");
        anim.update(false, true, 0.0, 0.5);
        assert_eq!(anim.sprite(), "player_idle1");
    }

    #[test]
    fn test_state_change_restarts_clip() {
        let mut anim = PlayerAnimation::default();
        anim.update(false, true, 0.0, 0.5);
        assert_eq!(anim.timer.frame, 1);
        anim.update(false, true, 3.0, 0.01);
        assert_eq!(anim.state, AnimState::Walk);
        assert_eq!(anim.sprite(), "player_walk1");
    }
}
