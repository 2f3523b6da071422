//! Fleet formation
//!
//! The fleet moves as one rigid body: a single direction and speed for every
//! enemy, and a single drop-and-reverse per tick no matter how many enemies
//! touch a side of the screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Enemy;
use crate::consts::{ALIEN_HEIGHT, ALIEN_WIDTH};
use crate::settings::{FleetDirection, Settings};

/// Grid positions for a fresh wave.
///
/// Rows start one sprite in from the top-left corner and step by two sprite
/// sizes. A column is placed while `x < screen_w - 2*enemy_w`; a row while
/// `y < screen_h - 3*enemy_h`.
pub fn layout_fleet(screen_w: f32, screen_h: f32, enemy_w: f32, enemy_h: f32) -> Vec<Vec2> {
    let mut positions = Vec::new();
    if enemy_w <= 0.0 || enemy_h <= 0.0 {
        return positions;
    }

    let mut y = enemy_h;
    while y < screen_h - 3.0 * enemy_h {
        let mut x = enemy_w;
        while x < screen_w - 2.0 * enemy_w {
            positions.push(Vec2::new(x, y));
            x += 2.0 * enemy_w;
        }
        y += 2.0 * enemy_h;
    }
    positions
}

/// Whether an enemy touches the left or right side of the screen
pub fn check_edges(enemy: &Enemy, screen_w: f32) -> bool {
    let rect = enemy.rect();
    enemy.pos.x <= 0.0 || rect.right() as f32 >= screen_w
}

/// The set of live enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub enemies: Vec<Enemy>,
    next_id: u32,
}

impl Fleet {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    /// Replace the fleet with a fresh grid
    pub fn relayout(&mut self, screen_w: f32, screen_h: f32) {
        self.enemies.clear();
        for pos in layout_fleet(screen_w, screen_h, ALIEN_WIDTH, ALIEN_HEIGHT) {
            let id = self.next_id;
            self.next_id += 1;
            self.enemies.push(Enemy {
                id,
                pos,
                size: Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT),
            });
        }
        log::debug!("Fleet laid out: {} enemies", self.enemies.len());
    }

    /// True if any enemy touches a side. Stops at the first match.
    pub fn any_at_edge(&self, screen_w: f32) -> bool {
        self.enemies.iter().any(|e| check_edges(e, screen_w))
    }

    /// Drop every enemy by `drop` pixels and return the reversed direction
    pub fn drop_and_reverse(&mut self, drop: f32, direction: FleetDirection) -> FleetDirection {
        for enemy in &mut self.enemies {
            enemy.pos.y += drop;
        }
        direction.reversed()
    }

    /// Move every enemy horizontally by `direction * speed`
    pub fn advance(&mut self, direction: FleetDirection, speed: f32) {
        let dx = direction.sign() * speed;
        for enemy in &mut self.enemies {
            enemy.pos.x += dx;
        }
    }

    /// One tick of formation movement: edge response first, then advance.
    /// Returns true if the fleet dropped and reversed this tick.
    pub fn update(&mut self, settings: &mut Settings) -> bool {
        let reversed = self.any_at_edge(settings.screen_width);
        if reversed {
            settings.fleet_direction =
                self.drop_and_reverse(settings.fleet_drop_speed, settings.fleet_direction);
        }
        self.advance(settings.fleet_direction, settings.alien_speed);
        reversed
    }

    /// Any enemy's bottom edge at or below the floor
    pub fn reached_floor(&self, screen_h: f32) -> bool {
        self.enemies
            .iter()
            .any(|e| e.rect().bottom() as f32 >= screen_h)
    }

    /// Remove the enemies whose ids are listed
    pub(crate) fn remove_ids(&mut self, ids: &[u32]) {
        self.enemies.retain(|e| !ids.contains(&e.id));
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}
