//! Approximated homing laser
//!
//! Projectiles themselves fly straight; the homing feel comes from the base
//! angle drifting toward the target every tick, so each later shot in a
//! cluster leans further in. Shot speed depends on the pattern clock:
//! slow, then a reduced coast speed, then fast.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{PatternStatus, fire};
use crate::sim::behavior::Behavior;
use crate::sim::context::TickContext;
use crate::sim::pool::ProjectilePool;
use crate::{aim_angle_deg, normalize_angle_deg};

/// Floor of the coast-phase speed
const MIN_COAST_SPEED: f32 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomingLaserParams {
    /// Base angles are drawn from [-spread/2, spread/2)
    pub base_spread_deg: f32,
    pub repeats: u32,
    pub cluster: u32,
    pub interval_in_cluster: u32,
    pub wait_between: u32,
    pub slow_speed: f32,
    pub slow_term: u32,
    pub coast_wait: u32,
    pub fast_speed: f32,
    pub aim_term: u32,
    pub aim_step_max_deg: f32,
    pub seed: u64,
    pub color: u8,
    pub behavior: Option<Behavior>,
}

impl Default for HomingLaserParams {
    fn default() -> Self {
        Self {
            base_spread_deg: 120.0,
            repeats: 8,
            cluster: 9,
            interval_in_cluster: 1,
            wait_between: 10,
            slow_speed: 2.0,
            slow_term: 30,
            coast_wait: 100,
            fast_speed: 5.0,
            aim_term: 60,
            aim_step_max_deg: 6.0,
            seed: 0,
            color: 7,
            behavior: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HomingLaserApprox {
    params: HomingLaserParams,
    rng: Pcg32,
    base_deg: f32,
    fired_in_cluster: u32,
    cluster_tick: u32,
    wait_timer: u32,
    clusters_done: u32,
    pub(super) clock: u32,
}

impl HomingLaserApprox {
    pub fn new(mut params: HomingLaserParams) -> Self {
        params.interval_in_cluster = params.interval_in_cluster.max(1);
        params.aim_term = params.aim_term.max(1);

        let mut rng = Pcg32::seed_from_u64(params.seed);
        let base_deg = draw_base(&mut rng, params.base_spread_deg);
        Self {
            params,
            rng,
            base_deg,
            fired_in_cluster: 0,
            cluster_tick: 0,
            wait_timer: 0,
            clusters_done: 0,
            clock: 0,
        }
    }

    pub fn base_deg(&self) -> f32 {
        self.base_deg
    }

    /// Shot speed for the current clock
    pub fn current_speed(&self) -> f32 {
        let p = &self.params;
        if self.clock < p.slow_term {
            p.slow_speed
        } else if self.clock < p.slow_term.saturating_add(p.coast_wait) {
            (p.slow_speed * 0.5).max(MIN_COAST_SPEED)
        } else {
            p.fast_speed
        }
    }

    fn aim_step(&mut self, origin: Vec2, target: Vec2) {
        let p = &self.params;
        let diff = normalize_angle_deg(aim_angle_deg(origin, target) - self.base_deg);
        let step = (diff / p.aim_term as f32).clamp(-p.aim_step_max_deg, p.aim_step_max_deg);
        self.base_deg += step;
    }

    pub(super) fn advance(&mut self, origin: Vec2, ctx: &TickContext, pool: &mut ProjectilePool) -> PatternStatus {
        self.aim_step(origin, ctx.target);

        if self.fired_in_cluster < self.params.cluster {
            if self.cluster_tick % self.params.interval_in_cluster == 0 {
                let speed = self.current_speed();
                let p = &self.params;
                fire(pool, origin, self.base_deg, speed, p.color, p.behavior.as_ref());
                self.fired_in_cluster += 1;
            }
            self.cluster_tick += 1;
        } else if self.wait_timer < self.params.wait_between {
            self.wait_timer += 1;
        } else {
            self.clusters_done += 1;
            if self.clusters_done >= self.params.repeats {
                return PatternStatus::Finished;
            }
            self.base_deg = draw_base(&mut self.rng, self.params.base_spread_deg);
            self.fired_in_cluster = 0;
            self.cluster_tick = 0;
            self.wait_timer = 0;
        }

        self.clock = self.clock.saturating_add(1);
        PatternStatus::Running
    }
}

fn draw_base(rng: &mut Pcg32, spread_deg: f32) -> f32 {
    let half = spread_deg * 0.5;
    if half > 0.0 { rng.random_range(-half..half) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::Bounds;

    fn pool() -> ProjectilePool {
        ProjectilePool::new(512, Bounds::new(200.0, 150.0))
    }

    #[test]
    fn test_base_angle_within_spread() {
        for seed in 0..20 {
            let laser = HomingLaserApprox::new(HomingLaserParams {
                seed,
                ..Default::default()
            });
            assert!(laser.base_deg() >= -60.0 && laser.base_deg() < 60.0);
        }
    }

    #[test]
    fn test_aim_step_is_capped() {
        let mut laser = HomingLaserApprox::new(HomingLaserParams {
            base_spread_deg: 0.0,
            aim_term: 1,
            aim_step_max_deg: 6.0,
            ..Default::default()
        });
        let mut pool = pool();
        // target straight down (+y): 90° away from the 0° base
        let ctx = TickContext::new(Vec2::new(100.0, 140.0));
        laser.advance(Vec2::new(100.0, 40.0), &ctx, &mut pool);
        assert!((laser.base_deg() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_aim_converges_over_term() {
        let mut laser = HomingLaserApprox::new(HomingLaserParams {
            base_spread_deg: 0.0,
            aim_term: 10,
            aim_step_max_deg: 90.0,
            ..Default::default()
        });
        let mut pool = pool();
        let ctx = TickContext::new(Vec2::new(100.0, 140.0));
        laser.advance(Vec2::new(100.0, 40.0), &ctx, &mut pool);
        assert!((laser.base_deg() - 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_stages() {
        let mut laser = HomingLaserApprox::new(HomingLaserParams::default());
        assert!((laser.current_speed() - 2.0).abs() < 1e-6);
        laser.clock = 30;
        assert!((laser.current_speed() - 1.0).abs() < 1e-6);
        laser.clock = 130;
        assert!((laser.current_speed() - 5.0).abs() < 1e-6);

        laser.params.slow_speed = 0.4;
        laser.clock = 30;
        assert!((laser.current_speed() - MIN_COAST_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_cluster_count_and_finish() {
        let mut pool = pool();
        let mut laser = HomingLaserApprox::new(HomingLaserParams {
            repeats: 2,
            cluster: 3,
            wait_between: 2,
            ..Default::default()
        });
        let ctx = TickContext::new(Vec2::new(100.0, 140.0));
        let origin = Vec2::new(100.0, 40.0);

        let mut ticks = 0;
        while laser.advance(origin, &ctx, &mut pool) == PatternStatus::Running {
            ticks += 1;
            assert!(ticks < 100);
        }
        // per cluster: 3 firing ticks, 2 waiting ticks, 1 rollover tick
        assert_eq!(ticks, 11);
        assert_eq!(pool.live_count(), 6);
    }

    #[test]
    fn test_long_terms_keep_slow_speed() {
        let laser = HomingLaserApprox::new(HomingLaserParams {
            slow_term: u32::MAX,
            coast_wait: u32::MAX,
            ..Default::default()
        });
        assert!((laser.current_speed() - 2.0).abs() < 1e-3);
    }
}
