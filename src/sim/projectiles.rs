//! Player projectile pool

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Projectile;
use crate::settings::Settings;

/// Fire attempted while the pool is full. Callers treat this as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtCapacity {
    pub limit: usize,
}

impl fmt::Display for AtCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projectile limit of {} reached", self.limit)
    }
}

impl std::error::Error for AtCapacity {}

/// Live projectiles, capped at `bullets_allowed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectilePool {
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Spawn a projectile whose top edge is centered on `origin`
    pub fn fire(&mut self, origin: Vec2, settings: &Settings) -> Result<Projectile, AtCapacity> {
        if self.projectiles.len() >= settings.bullets_allowed {
            return Err(AtCapacity {
                limit: settings.bullets_allowed,
            });
        }

        let size = Vec2::new(settings.bullet_width, settings.bullet_height);
        let projectile = Projectile {
            id: self.next_id,
            pos: Vec2::new(origin.x - size.x / 2.0, origin.y),
            size,
            speed: settings.bullet_speed,
        };
        self.next_id += 1;
        self.projectiles.push(projectile);
        Ok(projectile)
    }

    /// Move every projectile up by one tick of motion
    pub fn advance(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
    }

    /// Drop projectiles that left the top of the screen. Returns how many.
    pub fn prune(&mut self) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| !p.is_off_screen());
        before - self.projectiles.len()
    }

    pub(crate) fn remove_ids(&mut self, ids: &[u32]) {
        self.projectiles.retain(|p| !ids.contains(&p.id));
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}
