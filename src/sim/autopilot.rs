//! Demo-mode player
//!
//! Produces a [`TickInput`] each tick that climbs the staircase. Rising into
//! a platform's underside stops a jump, so every jump is launched from
//! beside the target and only drifts over it once the player's top has
//! cleared the target's surface.

use super::physics::{self, MoveIntent};
use super::rect::Rect;
use super::state::{Platform, World};
use super::tick::TickInput;
use crate::consts::PLAYER_SIZE;

/// Horizontal clearance kept from the target while rising
const LAUNCH_GAP: f32 = 4.0;
/// Reach kept in reserve below the theoretical maximum
const REACH_SLACK: f32 = 10.0;
/// Close enough to a goal x to stop moving
const DEADBAND: f32 = 1.5;

/// A chosen jump: where to take off from and where to land
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpPlan {
    pub target: Platform,
    pub launch_x: f32,
}

/// Stateful climber; keeps its plan while airborne
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    plan: Option<JumpPlan>,
    seen_resets: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&JumpPlan> {
        self.plan.as_ref()
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, world: &World) -> TickInput {
        if self.seen_resets != world.resets {
            self.seen_resets = world.resets;
            self.plan = None;
        }

        let player = &world.player;
        let body = player.body.rect();

        if player.on_ground {
            self.plan = plan_jump(world);
        }

        let (movement, jump) = match (&self.plan, player.on_ground) {
            (None, true) => {
                // Dead end: walk toward the middle and drop to the stair below
                let middle = world.config.world_width / 2.0;
                (steer(body.center().x, middle), false)
            }
            (None, false) => (MoveIntent::None, false),
            (Some(plan), true) => {
                if (body.x - plan.launch_x).abs() <= DEADBAND {
                    (MoveIntent::None, true)
                } else {
                    (steer(body.x, plan.launch_x), false)
                }
            }
            (Some(plan), false) => {
                let beside = !overlaps_x(&body, &plan.target);
                if body.y > plan.target.y && beside {
                    (MoveIntent::None, false)
                } else {
                    let goal = plan.target.center().x - body.width / 2.0;
                    (steer(body.x, goal), false)
                }
            }
        };

        TickInput {
            movement,
            jump,
            ..Default::default()
        }
    }
}

fn steer(from: f32, to: f32) -> MoveIntent {
    if (to - from).abs() < DEADBAND {
        MoveIntent::None
    } else if to > from {
        MoveIntent::Right
    } else {
        MoveIntent::Left
    }
}

fn overlaps_x(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x
}

/// Pick the highest reachable platform with a clear launch spot
fn plan_jump(world: &World) -> Option<JumpPlan> {
    let body = world.player.body.rect();
    let feet = body.bottom();
    let standing = world
        .platforms
        .iter()
        .find(|p| (p.y - feet).abs() < 0.5 && overlaps_x(&body, p))?;

    // Landing only needs the player's top above the surface
    let reach = physics::jump_apex_height(&world.config) + body.height - REACH_SLACK;
    let mut candidates: Vec<&Platform> = world
        .platforms
        .iter()
        .filter(|p| feet - p.y > 1.0 && feet - p.y <= reach)
        .collect();
    candidates.sort_by(|a, b| a.y.total_cmp(&b.y));

    for target in candidates {
        let mut spots = Vec::with_capacity(2);

        let right = target.right() + LAUNCH_GAP;
        if right < standing.right() - 2.0
            && right + PLAYER_SIZE.x > standing.x + 2.0
            && right + PLAYER_SIZE.x <= world.config.world_width
        {
            spots.push(right);
        }
        let left = target.x - LAUNCH_GAP - PLAYER_SIZE.x;
        if left + PLAYER_SIZE.x > standing.x + 2.0 && left < standing.right() - 2.0 && left >= 0.0 {
            spots.push(left);
        }
        spots.sort_by(|a, b| (a - body.x).abs().total_cmp(&(b - body.x).abs()));

        for launch_x in spots {
            let lane = Rect::new(launch_x, target.y, PLAYER_SIZE.x, feet - target.y);
            let blocked = world.platforms.iter().any(|q| {
                q != standing && q != target && q.y < feet && q.bottom() > target.y && overlaps_x(&lane, q)
            });
            if !blocked {
                return Some(JumpPlan {
                    target: *target,
                    launch_x,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::SIM_DT;
    use crate::sim::{Phase, tick};
    use crate::ui::{self, MenuButton};

    fn started(config: Config) -> World {
        let mut world = World::new(config, 2024);
        let start = TickInput {
            click: Some(ui::button_center(MenuButton::Start)),
            ..Default::default()
        };
        tick(&mut world, &start, SIM_DT);
        world
    }

    #[test]
    fn test_plans_from_ground_around_first_stair() {
        let mut world = started(Config::default());
        let mut pilot = Autopilot::new();
        for _ in 0..30 {
            let input = pilot.next_input(&world);
            tick(&mut world, &input, SIM_DT);
        }
        let plan = pilot.next_input(&world);
        assert_eq!(world.phase, Phase::Playing);
        assert!(world.player.on_ground);
        let chosen = pilot.plan().expect("ground should offer a jump");
        // Second stair at (290, 420) is within reach; launch from its right,
        // clear of the first stair at 170..320
        assert_eq!(chosen.target.y, 420.0);
        assert_eq!(chosen.launch_x, 444.0);
        assert!(!plan.jump || (world.player.body.pos.x - 444.0).abs() <= DEADBAND);
    }

    #[test]
    fn test_climbs_without_enemies() {
        let config = Config {
            enemy_spawn_chance: 0.0,
            ..Default::default()
        };
        let mut world = started(config);
        let mut pilot = Autopilot::new();
        for _ in 0..1200 {
            let input = pilot.next_input(&world);
            tick(&mut world, &input, SIM_DT);
        }
        assert_eq!(world.resets, 1);
        assert!(world.score >= 10, "climbed only {}", world.score);
    }
}
