//! Approximated two-way split fan
//!
//! Two parents leave at ±`initial_offset_deg` around the base angle. After
//! `travel_frames` ticks, each parent's projected position spawns two children
//! diverging ±`child_fan_deg` from the parent's heading. Parents keep flying.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{DeferredQueue, DeferredSpawn, PatternStatus, fire};
use crate::aim_angle_deg;
use crate::sim::context::TickContext;
use crate::sim::pool::ProjectilePool;
use crate::unit_vector_deg;

/// Base angle when not aimed: straight down the field
const FIXED_BASE_DEG: f32 = 90.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoSplitFanParams {
    pub initial_speed: f32,
    pub initial_offset_deg: f32,
    pub travel_frames: u32,
    pub child_speed: f32,
    pub child_fan_deg: f32,
    pub cooldown: u32,
    pub color_parent: u8,
    pub color_child: u8,
    /// Aim at the target; otherwise fire at a fixed 90°
    pub aimed: bool,
}

impl Default for TwoSplitFanParams {
    fn default() -> Self {
        Self {
            initial_speed: 1.0,
            initial_offset_deg: 8.0,
            travel_frames: 12,
            child_speed: 1.2,
            child_fan_deg: 30.0,
            cooldown: 45,
            color_parent: 11,
            color_child: 14,
            aimed: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TwoSplitFanApprox {
    params: TwoSplitFanParams,
    timer: u32,
    queue: DeferredQueue,
    pub(super) clock: u32,
}

impl TwoSplitFanApprox {
    pub fn new(mut params: TwoSplitFanParams) -> Self {
        params.travel_frames = params.travel_frames.max(1);
        Self {
            params,
            timer: 0,
            queue: DeferredQueue::default(),
            clock: 0,
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub(super) fn advance(&mut self, origin: Vec2, ctx: &TickContext, pool: &mut ProjectilePool) -> PatternStatus {
        let p = &self.params;

        while let Some(entry) = self.queue.pop_due(self.clock) {
            for fan in [-p.child_fan_deg, p.child_fan_deg] {
                fire(pool, entry.pos, entry.angle_deg + fan, p.child_speed, p.color_child, None);
            }
        }

        if self.timer > 0 {
            self.timer -= 1;
        } else {
            let base = if p.aimed {
                aim_angle_deg(origin, ctx.target)
            } else {
                FIXED_BASE_DEG
            };
            let travel = p.initial_speed * p.travel_frames as f32;
            for sign in [-1.0, 1.0] {
                let deg = base + sign * p.initial_offset_deg;
                fire(pool, origin, deg, p.initial_speed, p.color_parent, None);
                self.queue.push(DeferredSpawn {
                    due: self.clock.saturating_add(p.travel_frames),
                    pos: origin + unit_vector_deg(deg) * travel,
                    angle_deg: deg,
                });
            }
            self.timer = p.cooldown;
        }

        self.clock = self.clock.saturating_add(1);
        PatternStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::Bounds;

    #[test]
    fn test_parents_then_children() {
        let mut pool = ProjectilePool::new(64, Bounds::new(270.0, 150.0));
        let mut fan = TwoSplitFanApprox::new(TwoSplitFanParams {
            aimed: false,
            travel_frames: 4,
            cooldown: 100,
            initial_offset_deg: 10.0,
            child_fan_deg: 20.0,
            ..Default::default()
        });
        let origin = Vec2::new(100.0, 40.0);
        let ctx = TickContext::default();

        fan.advance(origin, &ctx, &mut pool);
        assert_eq!(pool.live_count(), 2);
        assert_eq!(fan.pending(), 2);

        for _ in 0..3 {
            fan.advance(origin, &ctx, &mut pool);
        }
        assert_eq!(pool.live_count(), 2);

        fan.advance(origin, &ctx, &mut pool);
        assert_eq!(pool.live_count(), 6);
        assert_eq!(fan.pending(), 0);

        let headings: Vec<f32> = pool
            .iter_live()
            .map(|(_, p)| p.vel.y.atan2(p.vel.x).to_degrees())
            .collect();
        // parents at 80/100, children of 80 at 60/100, children of 100 at 80/120
        for (h, e) in headings.iter().zip([80.0, 100.0, 60.0, 100.0, 80.0, 120.0]) {
            assert!((h - e).abs() < 1e-3);
        }
        let child = pool.iter_live().nth(2).map(|(_, p)| p.pos).unwrap();
        assert!((child - (origin + unit_vector_deg(80.0) * 4.0)).length() < 1e-3);
    }

    #[test]
    fn test_aimed_base_follows_target() {
        let mut pool = ProjectilePool::new(64, Bounds::new(270.0, 150.0));
        let mut fan = TwoSplitFanApprox::new(TwoSplitFanParams::default());
        let origin = Vec2::new(100.0, 75.0);
        fan.advance(origin, &TickContext::new(Vec2::new(200.0, 75.0)), &mut pool);
        let headings: Vec<f32> = pool
            .iter_live()
            .map(|(_, p)| p.vel.y.atan2(p.vel.x).to_degrees())
            .collect();
        assert!((headings[0] + 8.0).abs() < 1e-3);
        assert!((headings[1] - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_cooldown_period() {
        let mut pool = ProjectilePool::new(256, Bounds::new(270.0, 150.0));
        let mut fan = TwoSplitFanApprox::new(TwoSplitFanParams {
            cooldown: 2,
            travel_frames: 50,
            ..Default::default()
        });
        for _ in 0..7 {
            fan.advance(Vec2::new(100.0, 40.0), &TickContext::default(), &mut pool);
        }
        // parent pairs on ticks 0, 3, 6
        assert_eq!(pool.live_count(), 6);
        assert_eq!(fan.pending(), 6);
    }

    #[test]
    fn test_huge_travel_frames_does_not_overflow() {
        let mut pool = ProjectilePool::new(64, Bounds::new(270.0, 150.0));
        let mut fan = TwoSplitFanApprox::new(TwoSplitFanParams {
            travel_frames: u32::MAX,
            cooldown: 100,
            ..Default::default()
        });
        for _ in 0..5 {
            fan.advance(Vec2::new(100.0, 40.0), &TickContext::default(), &mut pool);
        }
        assert_eq!(fan.pending(), 2);
    }
}
