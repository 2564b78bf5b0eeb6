//! Rolling fire: wait, turn, accelerate, then spray while rotating
//!
//! Phases run on absolute clock boundaries `t0..t5` computed at construction:
//!
//! | clock        | phase                                        |
//! |--------------|----------------------------------------------|
//! | `< t0`       | pre-wait (with optional jitter)              |
//! | `t0..t1`     | heading turns by `turn_rel_deg` linearly     |
//! | `t1..t2`     | speed ramps from 0 to `speed_final` linearly |
//! | `t2..t3`     | micro wait                                   |
//! | `t3..t4`     | rotate `seq_deg`/tick, fire every interval   |
//! | `t4..t5`     | post-wait (with optional jitter)             |
//! | `>= t5`      | finished                                     |

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{PatternStatus, fire};
use crate::sim::behavior::Behavior;
use crate::sim::pool::ProjectilePool;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingFireParams {
    pub speed_final: f32,
    pub pre_wait: u32,
    pub turn_rel_deg: f32,
    pub turn_term: u32,
    pub accel_term: u32,
    pub micro_wait: u32,
    pub seq_deg: f32,
    pub post_wait: u32,
    pub fire_interval: u32,
    /// Length of the firing phase in ticks
    pub life: u32,
    /// Upper bound of the uniform jitter added to both waits (0 disables)
    pub rand_wait_amplitude: u32,
    pub seed: u64,
    pub color: u8,
    pub behavior: Option<Behavior>,
}

impl Default for RollingFireParams {
    fn default() -> Self {
        Self {
            speed_final: 3.0,
            pre_wait: 40,
            turn_rel_deg: -90.0,
            turn_term: 4,
            accel_term: 4,
            micro_wait: 4,
            seq_deg: 15.0,
            post_wait: 80,
            fire_interval: 1,
            life: 360,
            rand_wait_amplitude: 20,
            seed: 0,
            color: 14,
            behavior: None,
        }
    }
}

impl RollingFireParams {
    /// Longest possible run in ticks (maximum jitter on both waits), or None on overflow
    pub fn max_duration(&self) -> Option<u32> {
        let amp = self.rand_wait_amplitude;
        self.pre_wait
            .checked_add(amp)?
            .checked_add(self.turn_term.max(1))?
            .checked_add(self.accel_term.max(1))?
            .checked_add(self.micro_wait)?
            .checked_add(self.life)?
            .checked_add(self.post_wait)?
            .checked_add(amp)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.max_duration().is_none() {
            return Err("phase lengths overflow the pattern clock".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RollingFire {
    params: RollingFireParams,
    theta_deg: f32,
    speed: f32,
    turn_per_tick: f32,
    speed_step: f32,
    fire_interval: u32,
    fire_clock: u32,
    /// Phase boundaries t0..t5 (absolute clock values)
    bounds: [u32; 6],
    pub(super) clock: u32,
}

impl RollingFire {
    pub fn new(params: RollingFireParams) -> Self {
        let mut rng = Pcg32::seed_from_u64(params.seed);
        let amp = params.rand_wait_amplitude;
        let mut jitter = || if amp > 0 { rng.random_range(0..=amp) } else { 0 };
        let pre_wait = params.pre_wait.saturating_add(jitter());
        let post_wait = params.post_wait.saturating_add(jitter());

        let turn_term = params.turn_term.max(1);
        let accel_term = params.accel_term.max(1);

        // validated params never saturate; unvalidated ones clamp at u32::MAX
        let t0 = pre_wait;
        let t1 = t0.saturating_add(turn_term);
        let t2 = t1.saturating_add(accel_term);
        let t3 = t2.saturating_add(params.micro_wait);
        let t4 = t3.saturating_add(params.life);
        let t5 = t4.saturating_add(post_wait);

        Self {
            turn_per_tick: params.turn_rel_deg / turn_term as f32,
            speed_step: params.speed_final / accel_term as f32,
            fire_interval: params.fire_interval.max(1),
            theta_deg: 0.0,
            speed: 0.0,
            fire_clock: 0,
            bounds: [t0, t1, t2, t3, t4, t5],
            clock: 0,
            params,
        }
    }

    /// Phase boundaries `[t0, t1, t2, t3, t4, t5]`
    pub fn phase_bounds(&self) -> [u32; 6] {
        self.bounds
    }

    pub fn heading_deg(&self) -> f32 {
        self.theta_deg
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub(super) fn advance(&mut self, origin: Vec2, pool: &mut ProjectilePool) -> PatternStatus {
        let t = self.clock;
        let [t0, t1, t2, t3, t4, t5] = self.bounds;

        if t < t0 {
            // pre-wait
        } else if t < t1 {
            self.theta_deg += self.turn_per_tick;
        } else if t < t2 {
            self.speed += self.speed_step;
        } else if t < t3 {
            // micro wait
        } else if t < t4 {
            self.theta_deg += self.params.seq_deg;
            if self.fire_clock % self.fire_interval == 0 {
                let p = &self.params;
                fire(pool, origin, self.theta_deg, self.speed, p.color, p.behavior.as_ref());
            }
            self.fire_clock += 1;
        } else if t >= t5 {
            return PatternStatus::Finished;
        }

        self.clock += 1;
        PatternStatus::Running
    }
}
