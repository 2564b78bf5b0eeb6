//! Approximated circle fire
//!
//! A ring of fast shells goes out on the first tick. Where each shell will be
//! after `shell_delay` ticks, a child spawns heading a single shared absolute
//! angle. The shell's future position is computed up front, so shells and
//! children are independent projectiles.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{DeferredQueue, DeferredSpawn, PatternStatus, fire};
use crate::sim::pool::ProjectilePool;
use crate::unit_vector_deg;

/// Ticks of slack after the last child before the pattern reports done
const LINGER_TICKS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleFireParams {
    pub ring_count: u32,
    pub step_deg: f32,
    pub shell_speed: f32,
    pub shell_delay: u32,
    /// Heading of every child; drawn from [135, 225) when unset
    pub child_abs_deg: Option<f32>,
    pub child_speed: f32,
    pub color_shell: u8,
    pub color_child: u8,
    pub seed: u64,
}

impl Default for CircleFireParams {
    fn default() -> Self {
        Self {
            ring_count: 18,
            step_deg: 20.0,
            shell_speed: 6.0,
            shell_delay: 3,
            child_abs_deg: None,
            child_speed: 1.5,
            color_shell: 10,
            color_child: 8,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CircleFireApprox {
    params: CircleFireParams,
    child_deg: f32,
    queue: DeferredQueue,
    done: bool,
    pub(super) clock: u32,
}

impl CircleFireApprox {
    pub fn new(params: CircleFireParams) -> Self {
        let mut rng = Pcg32::seed_from_u64(params.seed);
        let child_deg = params
            .child_abs_deg
            .unwrap_or_else(|| 135.0 + 90.0 * rng.random::<f32>());
        Self {
            params,
            child_deg,
            queue: DeferredQueue::default(),
            done: false,
            clock: 0,
        }
    }

    /// Shared heading of all children
    pub fn child_deg(&self) -> f32 {
        self.child_deg
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub(super) fn advance(&mut self, origin: Vec2, pool: &mut ProjectilePool) -> PatternStatus {
        if self.done {
            return PatternStatus::Finished;
        }
        let p = &self.params;

        if self.clock == 0 {
            for i in 0..p.ring_count {
                let deg = i as f32 * p.step_deg;
                fire(pool, origin, deg, p.shell_speed, p.color_shell, None);
                let travel = p.shell_speed * p.shell_delay as f32;
                self.queue.push(DeferredSpawn {
                    due: self.clock.saturating_add(p.shell_delay),
                    pos: origin + unit_vector_deg(deg) * travel,
                    angle_deg: self.child_deg,
                });
            }
        }

        let mut drained = 0;
        while let Some(entry) = self.queue.pop_due(self.clock) {
            fire(pool, entry.pos, entry.angle_deg, p.child_speed, p.color_child, None);
            drained += 1;
        }
        if drained > 0 {
            log::debug!("circle fire: {} children at tick {}", drained, self.clock);
        }

        if self.queue.is_empty() && self.clock > p.shell_delay.saturating_add(LINGER_TICKS) {
            self.done = true;
        }

        self.clock = self.clock.saturating_add(1);
        PatternStatus::Running
    }
}
