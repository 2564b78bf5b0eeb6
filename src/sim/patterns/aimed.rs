//! Target-aimed patterns: single-shot bursts and N-way fans

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{PatternStatus, fire};
use crate::aim_angle_deg;
use crate::consts::MIN_AIM_DISTANCE;
use crate::sim::behavior::Behavior;
use crate::sim::context::TickContext;
use crate::sim::pool::{ProjectilePool, Shot};

fn default_interval() -> u32 {
    5
}
fn default_burst_color() -> u8 {
    8
}
fn default_nway_speed() -> f32 {
    0.5
}
fn default_ways() -> u32 {
    5
}
fn default_nway_spread() -> f32 {
    40.0
}
fn default_nway_cooldown() -> u32 {
    20
}
fn default_nway_color() -> u8 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimedBurstParams {
    #[serde(alias = "speed")]
    pub bullet_speed: f32,
    pub count: u32,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default = "default_burst_color")]
    pub color: u8,
    #[serde(default)]
    pub behavior: Option<Behavior>,
}

impl AimedBurstParams {
    pub fn new(bullet_speed: f32, count: u32, interval: u32) -> Self {
        Self {
            bullet_speed,
            count,
            interval,
            color: default_burst_color(),
            behavior: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.interval == 0 {
            return Err("interval must be at least 1".into());
        }
        Ok(())
    }
}

/// One shot at the target every `interval` ticks, `count` shots in total
#[derive(Debug, Clone)]
pub struct AimedBurst {
    params: AimedBurstParams,
    fired: u32,
    pub(super) clock: u32,
}

impl AimedBurst {
    pub fn new(params: AimedBurstParams) -> Self {
        Self {
            params,
            fired: 0,
            clock: 0,
        }
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    pub(super) fn advance(&mut self, origin: Vec2, ctx: &TickContext, pool: &mut ProjectilePool) -> PatternStatus {
        let p = &self.params;
        if self.fired < p.count && self.clock % p.interval == 0 {
            let delta = ctx.target - origin;
            let dist = delta.length().max(MIN_AIM_DISTANCE);
            let vel = delta / dist * p.bullet_speed;
            pool.spawn(Shot::new(origin, vel, p.color).with_behavior(p.behavior.clone()));
            self.fired += 1;
        }
        self.clock = self.clock.saturating_add(1);
        PatternStatus::Running
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimedNWayParams {
    #[serde(default = "default_nway_speed", alias = "speed")]
    pub bullet_speed: f32,
    #[serde(default = "default_ways")]
    pub ways: u32,
    #[serde(default = "default_nway_spread")]
    pub spread_deg: f32,
    #[serde(default = "default_nway_cooldown")]
    pub cooldown: u32,
    #[serde(default = "default_nway_color")]
    pub color: u8,
    #[serde(default)]
    pub behavior: Option<Behavior>,
}

impl Default for AimedNWayParams {
    fn default() -> Self {
        Self {
            bullet_speed: default_nway_speed(),
            ways: default_ways(),
            spread_deg: default_nway_spread(),
            cooldown: default_nway_cooldown(),
            color: default_nway_color(),
            behavior: None,
        }
    }
}

impl AimedNWayParams {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.ways == 0 {
            return Err("ways must be at least 1".into());
        }
        Ok(())
    }
}

/// Fan of `ways` shots spread across `spread_deg`, centered on the target
#[derive(Debug, Clone)]
pub struct AimedNWay {
    params: AimedNWayParams,
    timer: u32,
    pub(super) clock: u32,
}

impl AimedNWay {
    pub fn new(params: AimedNWayParams) -> Self {
        Self {
            params,
            timer: 0,
            clock: 0,
        }
    }

    /// Shot headings for a fan centered on `base_deg` (edges inclusive)
    pub fn fan_angles(base_deg: f32, ways: u32, spread_deg: f32) -> Vec<f32> {
        if ways <= 1 {
            return vec![base_deg];
        }
        let step = spread_deg / (ways - 1) as f32;
        let start = base_deg - spread_deg * 0.5;
        (0..ways).map(|i| start + i as f32 * step).collect()
    }

    pub(super) fn advance(&mut self, origin: Vec2, ctx: &TickContext, pool: &mut ProjectilePool) -> PatternStatus {
        if self.timer > 0 {
            self.timer -= 1;
        } else {
            let p = &self.params;
            let base = aim_angle_deg(origin, ctx.target);
            for deg in Self::fan_angles(base, p.ways, p.spread_deg) {
                fire(pool, origin, deg, p.bullet_speed, p.color, p.behavior.as_ref());
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

    fn pool() -> ProjectilePool {
        ProjectilePool::new(256, Bounds::new(200.0, 150.0))
    }

    #[test]
    fn test_aimed_burst_stops_after_count() {
        let mut pool = pool();
        let mut burst = AimedBurst::new(AimedBurstParams::new(1.0, 3, 2));
        let ctx = TickContext::new(Vec2::new(100.0, 140.0));
        for _ in 0..20 {
            burst.advance(Vec2::new(100.0, 40.0), &ctx, &mut pool);
        }
        assert_eq!(burst.fired(), 3);
        assert_eq!(pool.live_count(), 3);
        assert!(pool.iter_live().all(|(_, p)| (p.vel - Vec2::new(0.0, 1.0)).length() < 1e-3));
    }

    #[test]
    fn test_aimed_burst_tracks_live_target() {
        let mut pool = pool();
        let mut burst = AimedBurst::new(AimedBurstParams::new(2.0, 2, 1));
        let origin = Vec2::new(100.0, 75.0);
        burst.advance(origin, &TickContext::new(Vec2::new(150.0, 75.0)), &mut pool);
        burst.advance(origin, &TickContext::new(Vec2::new(50.0, 75.0)), &mut pool);
        let vels: Vec<Vec2> = pool.iter_live().map(|(_, p)| p.vel).collect();
        assert!((vels[0] - Vec2::new(2.0, 0.0)).length() < 1e-3);
        assert!((vels[1] - Vec2::new(-2.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_aimed_burst_target_on_origin_is_finite() {
        let mut pool = pool();
        let mut burst = AimedBurst::new(AimedBurstParams::new(2.0, 1, 1));
        let origin = Vec2::new(100.0, 75.0);
        burst.advance(origin, &TickContext::new(origin), &mut pool);
        assert!(pool.iter_live().all(|(_, p)| p.vel.is_finite()));
    }

    #[test]
    fn test_fan_angles() {
        assert_eq!(AimedNWay::fan_angles(90.0, 1, 40.0), vec![90.0]);
        let fan = AimedNWay::fan_angles(90.0, 5, 40.0);
        let expected = [70.0, 80.0, 90.0, 100.0, 110.0];
        for (a, e) in fan.iter().zip(expected) {
            assert!((a - e).abs() < 1e-3);
        }
        let pair = AimedNWay::fan_angles(0.0, 2, 30.0);
        assert!((pair[0] + 15.0).abs() < 1e-3);
        assert!((pair[1] - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_nway_fires_on_cooldown() {
        let mut pool = pool();
        let mut nway = AimedNWay::new(AimedNWayParams {
            ways: 3,
            cooldown: 1,
            ..Default::default()
        });
        let ctx = TickContext::new(Vec2::new(100.0, 140.0));
        for _ in 0..4 {
            nway.advance(Vec2::new(100.0, 40.0), &ctx, &mut pool);
        }
        // fires on ticks 0 and 2
        assert_eq!(pool.live_count(), 6);
        let center = pool.iter_live().nth(1).map(|(_, p)| p.vel).unwrap();
        assert!(center.x.abs() < 1e-3 && center.y > 0.0);
    }
}
