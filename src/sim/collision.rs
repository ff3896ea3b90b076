//! AABB collision detection and response
//!
//! Platforms only resolve vertically: landing on top or bumping the
//! underside. A player moving sideways into a platform edge is not pushed
//! out.

use super::rect::Rect;
use super::state::{Enemy, Platform, Player};

/// Which vertical case resolved an overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Landed on the platform's top surface
    Landed,
    /// Hit the platform's underside while rising
    Bumped,
}

/// Resolve a single player/platform overlap, if any
pub fn resolve_platform(player: &mut Player, platform: &Platform) -> Option<Contact> {
    if !player.body.rect().overlaps(platform) {
        return None;
    }

    let body = &mut player.body;
    if body.vel.y > 0.0 && body.pos.y < platform.y {
        body.pos.y = platform.y - body.size.y;
        body.vel.y = 0.0;
        player.on_ground = true;
        Some(Contact::Landed)
    } else if body.vel.y < 0.0 && body.pos.y > platform.y {
        body.pos.y = platform.bottom();
        body.vel.y = 0.0;
        Some(Contact::Bumped)
    } else {
        None
    }
}

/// Run the full platform pass for one tick
///
/// The grounded flag is cleared first and only a landing during this pass
/// sets it again. Standing still works because gravity makes `vel.y`
/// positive again every tick, so the landing branch re-snaps the player.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) -> Option<Contact> {
    player.on_ground = false;

    let mut last = None;
    for platform in platforms {
        if let Some(contact) = resolve_platform(player, platform) {
            last = Some(contact);
        }
    }
    last
}

/// Index of the first enemy overlapping the player
pub fn first_enemy_hit(player: &Rect, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| player.overlaps(&e.body.rect()))
}
