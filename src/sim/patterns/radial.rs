//! Ring patterns fired around the origin: fixed rings and rotating rings

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{PatternStatus, fire};
use crate::sim::behavior::Behavior;
use crate::sim::pool::ProjectilePool;

fn default_spread() -> f32 {
    360.0
}
fn default_circular_cooldown() -> u32 {
    30
}
fn default_circular_color() -> u8 {
    10
}
fn default_angular_speed() -> f32 {
    3.0
}
fn default_spinner_cooldown() -> u32 {
    3
}
fn default_spinner_color() -> u8 {
    9
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularParams {
    #[serde(alias = "speed")]
    pub bullet_speed: f32,
    pub count: u32,
    #[serde(default = "default_spread")]
    pub spread_deg: f32,
    #[serde(default = "default_circular_cooldown")]
    pub cooldown: u32,
    #[serde(default = "default_circular_color")]
    pub color: u8,
    #[serde(default)]
    pub behavior: Option<Behavior>,
}

impl CircularParams {
    pub fn new(bullet_speed: f32, count: u32, spread_deg: f32, cooldown: u32) -> Self {
        Self {
            bullet_speed,
            count,
            spread_deg,
            cooldown,
            color: default_circular_color(),
            behavior: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("count must be at least 1".into());
        }
        Ok(())
    }
}

/// Ring of `count` projectiles across `spread_deg`, starting at 0°, every `cooldown + 1` ticks
#[derive(Debug, Clone)]
pub struct Circular {
    params: CircularParams,
    timer: u32,
    pub(super) clock: u32,
}

impl Circular {
    pub fn new(params: CircularParams) -> Self {
        Self {
            params,
            timer: 0,
            clock: 0,
        }
    }

    pub(super) fn advance(&mut self, origin: Vec2, pool: &mut ProjectilePool) -> PatternStatus {
        if self.timer > 0 {
            self.timer -= 1;
        } else {
            let p = &self.params;
            let step = p.spread_deg / p.count as f32;
            for i in 0..p.count {
                fire(pool, origin, i as f32 * step, p.bullet_speed, p.color, p.behavior.as_ref());
            }
            self.timer = p.cooldown;
        }
        self.clock = self.clock.saturating_add(1);
        PatternStatus::Running
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinnerParams {
    #[serde(alias = "speed")]
    pub bullet_speed: f32,
    pub count: u32,
    #[serde(default = "default_angular_speed")]
    pub angular_speed_deg: f32,
    #[serde(default = "default_spinner_cooldown")]
    pub cooldown: u32,
    #[serde(default = "default_spinner_color")]
    pub color: u8,
    #[serde(default)]
    pub behavior: Option<Behavior>,
}

impl SpinnerParams {
    pub fn new(bullet_speed: f32, count: u32, angular_speed_deg: f32, cooldown: u32) -> Self {
        Self {
            bullet_speed,
            count,
            angular_speed_deg,
            cooldown,
            color: default_spinner_color(),
            behavior: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("count must be at least 1".into());
        }
        Ok(())
    }
}

/// Full ring whose start angle turns by `angular_speed_deg` every tick
#[derive(Debug, Clone)]
pub struct Spinner {
    params: SpinnerParams,
    base_deg: f32,
    timer: u32,
    pub(super) clock: u32,
}

impl Spinner {
    pub fn new(params: SpinnerParams) -> Self {
        Self {
            params,
            base_deg: 0.0,
            timer: 0,
            clock: 0,
        }
    }

    /// Current start angle of the ring
    pub fn base_deg(&self) -> f32 {
        self.base_deg
    }

    pub(super) fn advance(&mut self, origin: Vec2, pool: &mut ProjectilePool) -> PatternStatus {
        let p = &self.params;
        if self.timer > 0 {
            self.timer -= 1;
        } else {
            let step = 360.0 / p.count as f32;
            for i in 0..p.count {
                let deg = self.base_deg + i as f32 * step;
                fire(pool, origin, deg, p.bullet_speed, p.color, p.behavior.as_ref());
            }
            self.timer = p.cooldown;
        }
        // rotation continues through cooldown
        self.base_deg += p.angular_speed_deg;
        self.clock = self.clock.saturating_add(1);
        PatternStatus::Running
    }
}
