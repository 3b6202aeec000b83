//! Collision detection and response between the player and the world
//!
//! All tests are strict rectangle overlaps. Landing is the only response
//! that moves the player; enemies and coins only report contact.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Coin, Enemy, Platform, Player};
use crate::consts::{JUMP_PROBE, LAND_TOLERANCE};

/// Result of landing resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Top edge of the platform the player now rests on
    pub platform_top: f32,
}

/// The overlapping platform with the greatest bottom edge
///
/// Ties keep the earliest platform.
pub fn lowest_overlap<'a>(rect: &Rect, platforms: &'a [Platform]) -> Option<&'a Platform> {
    let mut lowest: Option<&'a Platform> = None;
    for p in platforms.iter().filter(|p| rect.overlaps(&p.rect)) {
        match lowest {
            Some(l) if p.rect.bottom() <= l.rect.bottom() => {}
            _ => lowest = Some(p),
        }
    }
    lowest
}

/// Snap a falling player onto the lowest platform it overlaps
///
/// The player must be moving down and its bottom edge must lie within the
/// tolerance band below that platform's bottom edge.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform]) -> Option<Landing> {
    let lowest = lowest_overlap(&player.rect, platforms)?;
    if player.vel_y > 0.0 && player.rect.bottom() <= lowest.rect.bottom() + LAND_TOLERANCE {
        let platform_top = lowest.rect.top();
        player.rect.pos.y = platform_top - player.rect.size.y;
        player.vel_y = 0.0;
        Some(Landing { platform_top })
    } else {
        None
    }
}

/// Whether the player is standing on, or hovering just above, a platform
pub fn is_grounded(rect: &Rect, platforms: &[Platform]) -> bool {
    let probe = rect.offset(Vec2::new(0.0, JUMP_PROBE));
    platforms.iter().any(|p| probe.overlaps(&p.rect))
}

/// Any contact with a spike
pub fn touches_enemy(rect: &Rect, enemies: &[Enemy]) -> bool {
    enemies.iter().any(|e| rect.overlaps(&e.rect))
}

/// Remove every coin the player overlaps, returning how many were taken
pub fn collect_coins(rect: &Rect, coins: &mut Vec<Coin>) -> u32 {
    let before = coins.len();
    coins.retain(|c| !rect.overlaps(&c.rect()));
    (before - coins.len()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn player_at(x: f32, y: f32, vel_y: f32) -> Player {
        let mut player = Player::default();
        player.rect.pos = Vec2::new(x, y);
        player.vel_y = vel_y;
        player
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let platforms = vec![Platform::new(100.0, 300.0)];
        // Bottom edge 4 units into the platform
        let mut player = player_at(120.0, 280.0, 4.0);
        let landing = resolve_landing(&mut player, &platforms);

        assert_eq!(landing, Some(Landing { platform_top: 300.0 }));
        assert_eq!(player.vel_y, 0.0);
        assert_eq!(player.rect.bottom(), 300.0);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platforms = vec![Platform::new(100.0, 300.0)];
        let mut player = player_at(120.0, 280.0, -6.0);
        assert_eq!(resolve_landing(&mut player, &platforms), None);
        assert_eq!(player.vel_y, -6.0);
        assert_eq!(player.rect.top(), 280.0);
    }

    #[test]
    fn test_no_landing_below_tolerance() {
        let platforms = vec![Platform::new(100.0, 300.0)];
        // Bottom edge at 336: more than 15 below the platform bottom (320)
        let mut player = player_at(120.0, 312.0, 3.0);
        assert_eq!(resolve_landing(&mut player, &platforms), None);
    }

    #[test]
    fn test_landing_at_tolerance_edge() {
        let platforms = vec![Platform::new(100.0, 300.0)];
        // Bottom edge at 335: exactly 15 below the platform bottom (320)
        let mut player = player_at(120.0, 311.0, 3.0);
        let landing = resolve_landing(&mut player, &platforms);
        assert_eq!(landing, Some(Landing { platform_top: 300.0 }));
        assert_eq!(player.rect.bottom(), 300.0);
    }

    #[test]
    fn test_no_landing_without_overlap() {
        let platforms = vec![Platform::new(100.0, 300.0)];
        let mut player = player_at(10.0, 280.0, 3.0);
        assert_eq!(resolve_landing(&mut player, &platforms), None);
    }

    #[test]
    fn test_lowest_overlap_picks_greatest_bottom() {
        let platforms = vec![Platform::new(100.0, 290.0), Platform::new(100.0, 300.0)];
        let rect = Rect::new(120.0, 285.0, 24.0, 24.0);
        let lowest = lowest_overlap(&rect, &platforms).map(|p| p.rect.top());
        assert_eq!(lowest, Some(300.0));
    }

    #[test]
    fn test_grounded_probe() {
        let platforms = vec![Platform::new(100.0, 300.0)];
        // Resting exactly on top
        assert!(is_grounded(&Rect::new(120.0, 276.0, 24.0, 24.0), &platforms));
        // Hovering within the probe distance
        assert!(is_grounded(&Rect::new(120.0, 275.0, 24.0, 24.0), &platforms));
        // Too high
        assert!(!is_grounded(&Rect::new(120.0, 270.0, 24.0, 24.0), &platforms));
        // Beside the platform
        assert!(!is_grounded(&Rect::new(0.0, 276.0, 24.0, 24.0), &platforms));
    }

    #[test]
    fn test_enemy_contact() {
        let enemies = vec![Enemy::new(100.0, 100.0, 1.0)];
        assert!(touches_enemy(&Rect::new(130.0, 110.0, 24.0, 24.0), &enemies));
        assert!(!touches_enemy(&Rect::new(140.0, 120.0, 24.0, 24.0), &enemies));
    }

    #[test]
    fn test_collect_multiple_coins() {
        let mut coins = vec![
            Coin::new(Vec2::new(110.0, 110.0)),
            Coin::new(Vec2::new(125.0, 110.0)),
            Coin::new(Vec2::new(300.0, 300.0)),
        ];
        let rect = Rect::new(100.0, 100.0, PLAYER_RADIUS * 2.0, PLAYER_RADIUS * 2.0);
        assert_eq!(collect_coins(&rect, &mut coins), 2);
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].center, Vec2::new(300.0, 300.0));
    }
}
