//! Fixed-capacity projectile pool
//!
//! Projectiles live in a flat array of slots addressed by index. Dead slots
//! are reused by later spawns, so the hot per-tick loop never allocates.
//! Iteration is always by ascending slot index.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::behavior::{self, Behavior, BehaviorOutcome};
use super::context::TickContext;
use crate::consts::{DEFAULT_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, OFFSCREEN_MARGIN};

/// Index of a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub usize);

/// Rectangle projectiles may occupy; leaving it by more than `margin` kills them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            margin: OFFSCREEN_MARGIN,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margin: OFFSCREEN_MARGIN,
        }
    }

    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= -self.margin
            && pos.x <= self.width + self.margin
            && pos.y >= -self.margin
            && pos.y <= self.height + self.margin
    }
}

/// Spawn parameters for one projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u8,
    /// Ticks until expiry (None = unbounded)
    pub life: Option<u32>,
    pub behavior: Option<Behavior>,
}

impl Shot {
    pub fn new(pos: Vec2, vel: Vec2, color: u8) -> Self {
        Self {
            pos,
            vel,
            radius: DEFAULT_RADIUS,
            color,
            life: None,
            behavior: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_life(mut self, life: u32) -> Self {
        self.life = Some(life);
        self
    }

    pub fn with_behavior(mut self, behavior: Option<Behavior>) -> Self {
        self.behavior = behavior;
        self
    }
}

/// A projectile slot. Fields of a dead slot are stale until reclaimed.
#[derive(Debug, Clone, Default)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u8,
    pub alive: bool,
    /// Motion integrations since spawn
    pub age: u32,
    pub life: Option<u32>,
    pub behavior: Option<Behavior>,
}

/// What an external renderer needs to draw a live projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u8,
}

/// Fixed-capacity store of projectile slots
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    bounds: Bounds,
}

impl ProjectilePool {
    pub fn new(capacity: usize, bounds: Bounds) -> Self {
        Self {
            slots: vec![Projectile::default(); capacity],
            bounds,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|p| p.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.slots.iter().any(|p| p.alive)
    }

    /// Claim the lowest-index dead slot. Returns None (rejected) when full.
    pub fn spawn(&mut self, shot: Shot) -> Option<SlotId> {
        let Some(index) = self.slots.iter().position(|p| !p.alive) else {
            log::trace!("Projectile pool full ({}), spawn dropped", self.slots.len());
            return None;
        };

        self.slots[index] = Projectile {
            pos: shot.pos,
            vel: shot.vel,
            radius: shot.radius,
            color: shot.color,
            alive: true,
            age: 0,
            life: shot.life,
            behavior: shot.behavior,
        };
        Some(SlotId(index))
    }

    /// Advance every live projectile by one tick.
    ///
    /// Per slot: behavior, then motion, then age, then life expiry, then bounds.
    /// Children spawned by a behavior land in the first free slot; if that slot
    /// comes after the parent they are also advanced in this same pass.
    pub fn update(&mut self, ctx: &TickContext) {
        for i in 0..self.slots.len() {
            if !self.slots[i].alive {
                continue;
            }

            if let Some(beh) = self.slots[i].behavior.take() {
                let outcome = behavior::apply(&beh, &mut self.slots[i], ctx.target);
                self.slots[i].behavior = Some(beh);

                if let BehaviorOutcome::Burst {
                    count,
                    speed,
                    color,
                    consume,
                } = outcome
                {
                    let origin = self.slots[i].pos;
                    for child in behavior::burst_ring(origin, count, speed, color) {
                        self.spawn(child);
                    }
                    if consume {
                        self.kill(i);
                        continue;
                    }
                }
            }

            let bounds = self.bounds;
            let p = &mut self.slots[i];
            p.pos += p.vel;
            p.age += 1;
            if p.life.is_some_and(|life| p.age >= life) {
                p.alive = false;
            }
            if !bounds.contains(p.pos) {
                p.alive = false;
            }
            if !p.alive {
                p.behavior = None;
            }
        }
    }

    /// Kill every projectile immediately
    pub fn clear_all(&mut self) {
        for i in 0..self.slots.len() {
            self.kill(i);
        }
    }

    /// A live projectile by slot
    pub fn get(&self, id: SlotId) -> Option<&Projectile> {
        self.slots.get(id.0).filter(|p| p.alive)
    }

    /// Live projectiles in slot order
    pub fn iter_live(&self) -> impl Iterator<Item = (SlotId, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive)
            .map(|(i, p)| (SlotId(i), p))
    }

    /// Render snapshot of live projectiles
    pub fn snapshot(&self) -> Vec<ProjectileView> {
        self.iter_live()
            .map(|(_, p)| ProjectileView {
                pos: p.pos,
                radius: p.radius,
                color: p.color,
            })
            .collect()
    }

    fn kill(&mut self, index: usize) {
        let p = &mut self.slots[index];
        p.alive = false;
        p.behavior = None;
    }
}
