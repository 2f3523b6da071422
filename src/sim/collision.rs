//! Collision detection and resolution
//!
//! Axis-aligned rectangle overlap only. Entity counts are in the tens, so the
//! projectile pass is an exact all-pairs test with no broad phase.

use super::fleet::Fleet;
use super::projectiles::ProjectilePool;
use super::state::Ship;

/// Outcome of one projectile-vs-fleet pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitReport {
    /// Distinct enemies removed (each credited once)
    pub enemy_ids: Vec<u32>,
    /// Projectiles removed
    pub projectile_ids: Vec<u32>,
}

impl HitReport {
    pub fn is_empty(&self) -> bool {
        self.enemy_ids.is_empty() && self.projectile_ids.is_empty()
    }

    pub fn enemies_destroyed(&self) -> u32 {
        self.enemy_ids.len() as u32
    }
}

/// Find every overlapping (projectile, enemy) pair without mutating anything.
///
/// A projectile overlapping several enemies takes all of them; an enemy hit
/// by several projectiles is listed once and every one of those projectiles
/// is consumed.
pub fn find_projectile_hits(projectiles: &ProjectilePool, fleet: &Fleet) -> HitReport {
    let mut report = HitReport::default();
    let mut enemy_hit = vec![false; fleet.len()];

    for projectile in projectiles.iter() {
        let p_rect = projectile.rect();
        let mut consumed = false;
        for (i, enemy) in fleet.iter().enumerate() {
            if p_rect.overlaps(&enemy.rect()) {
                consumed = true;
                if !enemy_hit[i] {
                    enemy_hit[i] = true;
                    report.enemy_ids.push(enemy.id);
                }
            }
        }
        if consumed {
            report.projectile_ids.push(projectile.id);
        }
    }

    report
}

/// Remove every overlapping projectile and enemy. Running it again in the
/// same tick finds nothing, since the matched entities are gone.
pub fn resolve_projectile_hits(projectiles: &mut ProjectilePool, fleet: &mut Fleet) -> HitReport {
    let report = find_projectile_hits(projectiles, fleet);
    if !report.is_empty() {
        projectiles.remove_ids(&report.projectile_ids);
        fleet.remove_ids(&report.enemy_ids);
    }
    report
}

/// Any enemy overlapping the ship
pub fn ship_collides(ship: &Ship, fleet: &Fleet) -> bool {
    let ship_rect = ship.rect();
    fleet.iter().any(|e| e.rect().overlaps(&ship_rect))
}

/// Ship contact or fleet at the floor. Both mean the same thing: a ship is
/// lost. Only meaningful while the fleet is populated.
pub fn ship_hit_detected(ship: &Ship, fleet: &Fleet, screen_h: f32) -> bool {
    if fleet.is_empty() {
        return false;
    }
    ship_collides(ship, fleet) || fleet.reached_floor(screen_h)
}
