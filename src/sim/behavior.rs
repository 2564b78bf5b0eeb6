//! Per-projectile behaviors
//!
//! A behavior is attached at spawn time and never mutates. Each tick the pool
//! calls [`apply`] before integrating motion, so velocity changes made here
//! show up in the same tick's displacement.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{Projectile, Shot};
use crate::consts::MIN_AIM_DISTANCE;
use crate::unit_vector_deg;

/// Direction of a gravity pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityMode {
    #[default]
    Attract,
    Repel,
}

/// One step of a speed schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedStep {
    /// Projectile age at which the step fires
    pub at: u32,
    /// New speed magnitude (negative values clamp to 0)
    pub speed: f32,
    /// Point at the target instead of keeping the current heading
    #[serde(default)]
    pub aim_at_target: bool,
}

/// Behavior descriptor carried by a projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Behavior {
    /// Constant pull toward (or push away from) the target, speed-capped
    Gravity {
        #[serde(default = "default_strength", alias = "g")]
        strength: f32,
        #[serde(default)]
        mode: GravityMode,
        #[serde(default = "default_max_speed")]
        max_speed: f32,
    },
    /// Velocity replaced at exact ages
    SpeedSchedule { steps: Vec<SpeedStep> },
    /// Ring of children once the target comes within `trigger_radius`
    ProximityBurst {
        #[serde(default = "default_trigger_radius")]
        trigger_radius: f32,
        #[serde(default = "default_child_count")]
        child_count: u32,
        #[serde(default = "default_child_speed")]
        child_speed: f32,
        #[serde(default = "default_child_color")]
        child_color: u8,
        #[serde(default = "default_consume_once")]
        consume_once: bool,
    },
}

fn default_strength() -> f32 {
    0.03
}
fn default_max_speed() -> f32 {
    3.0
}
fn default_trigger_radius() -> f32 {
    18.0
}
fn default_child_count() -> u32 {
    12
}
fn default_child_speed() -> f32 {
    1.2
}
fn default_child_color() -> u8 {
    10
}
fn default_consume_once() -> bool {
    true
}

/// What the pool must do after a behavior ran
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorOutcome {
    /// Integrate motion as usual
    Continue,
    /// Spawn a ring of children at the projectile's position.
    /// When `consume` is set the parent dies without moving this tick.
    Burst {
        count: u32,
        speed: f32,
        color: u8,
        consume: bool,
    },
}

/// Apply a behavior to a live projectile
pub fn apply(behavior: &Behavior, p: &mut Projectile, target: Vec2) -> BehaviorOutcome {
    match behavior {
        Behavior::Gravity {
            strength,
            mode,
            max_speed,
        } => {
            apply_gravity(p, target, *strength, *mode, *max_speed);
            BehaviorOutcome::Continue
        }
        Behavior::SpeedSchedule { steps } => {
            apply_speed_schedule(p, target, steps);
            BehaviorOutcome::Continue
        }
        Behavior::ProximityBurst {
            trigger_radius,
            child_count,
            child_speed,
            child_color,
            consume_once,
        } => {
            if p.pos.distance_squared(target) <= trigger_radius * trigger_radius {
                BehaviorOutcome::Burst {
                    count: *child_count,
                    speed: *child_speed,
                    color: *child_color,
                    consume: *consume_once,
                }
            } else {
                BehaviorOutcome::Continue
            }
        }
    }
}

fn apply_gravity(p: &mut Projectile, target: Vec2, strength: f32, mode: GravityMode, max_speed: f32) {
    let delta = target - p.pos;
    let dist = delta.length().max(MIN_AIM_DISTANCE);
    let mut accel = delta / dist * strength;
    if mode == GravityMode::Repel {
        accel = -accel;
    }
    p.vel += accel;

    let speed = p.vel.length();
    if speed > max_speed {
        p.vel *= max_speed / speed;
    }
}

fn apply_speed_schedule(p: &mut Projectile, target: Vec2, steps: &[SpeedStep]) {
    for step in steps.iter().filter(|s| s.at == p.age) {
        let speed = step.speed.max(0.0);
        let dir = if step.aim_at_target && speed > 0.0 {
            (target - p.pos).try_normalize().unwrap_or(Vec2::X)
        } else {
            // Keep the current heading; a resting projectile heads along +x
            p.vel.try_normalize().unwrap_or(Vec2::X)
        };
        p.vel = dir * speed;
    }
}

/// Children of a proximity burst: an evenly spaced ring starting at 0°
pub fn burst_ring(origin: Vec2, count: u32, speed: f32, color: u8) -> impl Iterator<Item = Shot> {
    (0..count).map(move |i| {
        let deg = 360.0 * i as f32 / count as f32;
        Shot::new(origin, unit_vector_deg(deg) * speed, color)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile(pos: Vec2, vel: Vec2) -> Projectile {
        Projectile {
            pos,
            vel,
            alive: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_gravity_attract_pulls_toward_target() {
        let mut p = projectile(Vec2::ZERO, Vec2::ZERO);
        let g = Behavior::Gravity {
            strength: 0.5,
            mode: GravityMode::Attract,
            max_speed: 3.0,
        };
        apply(&g, &mut p, Vec2::new(10.0, 0.0));
        assert!((p.vel.x - 0.5).abs() < 1e-3);
        assert!(p.vel.y.abs() < 1e-3);
    }

    #[test]
    fn test_gravity_repel_and_speed_cap() {
        let mut p = projectile(Vec2::ZERO, Vec2::new(-2.9, 0.0));
        let g = Behavior::Gravity {
            strength: 1.0,
            mode: GravityMode::Repel,
            max_speed: 3.0,
        };
        apply(&g, &mut p, Vec2::new(10.0, 0.0));
        assert!((p.vel.length() - 3.0).abs() < 1e-3);
        assert!(p.vel.x < 0.0);
    }

    #[test]
    fn test_gravity_on_target_is_finite() {
        let mut p = projectile(Vec2::new(5.0, 5.0), Vec2::ZERO);
        let g = Behavior::Gravity {
            strength: 0.03,
            mode: GravityMode::Attract,
            max_speed: 3.0,
        };
        apply(&g, &mut p, Vec2::new(5.0, 5.0));
        assert!(p.vel.is_finite());
    }

    #[test]
    fn test_speed_schedule_keeps_heading() {
        let mut p = projectile(Vec2::ZERO, Vec2::new(0.6, 0.8));
        p.age = 10;
        let s = Behavior::SpeedSchedule {
            steps: vec![SpeedStep {
                at: 10,
                speed: 3.0,
                aim_at_target: false,
            }],
        };
        apply(&s, &mut p, Vec2::new(-50.0, 0.0));
        assert!((p.vel.length() - 3.0).abs() < 1e-3);
        assert!((p.vel.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-3);
    }

    #[test]
    fn test_speed_schedule_only_fires_on_exact_age() {
        let mut p = projectile(Vec2::ZERO, Vec2::new(1.0, 0.0));
        p.age = 11;
        let s = Behavior::SpeedSchedule {
            steps: vec![SpeedStep {
                at: 10,
                speed: 3.0,
                aim_at_target: false,
            }],
        };
        apply(&s, &mut p, Vec2::ZERO);
        assert!((p.vel.length() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_schedule_aims_at_target() {
        let mut p = projectile(Vec2::ZERO, Vec2::new(1.0, 0.0));
        let s = Behavior::SpeedSchedule {
            steps: vec![SpeedStep {
                at: 0,
                speed: 2.0,
                aim_at_target: true,
            }],
        };
        apply(&s, &mut p, Vec2::new(0.0, 40.0));
        assert!(p.vel.x.abs() < 1e-3);
        assert!((p.vel.y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_proximity_burst_triggers_inside_radius() {
        let burst = Behavior::ProximityBurst {
            trigger_radius: 5.0,
            child_count: 4,
            child_speed: 1.0,
            child_color: 3,
            consume_once: true,
        };
        let mut far = projectile(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(apply(&burst, &mut far, Vec2::new(6.0, 0.0)), BehaviorOutcome::Continue);

        let mut near = projectile(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(
            apply(&burst, &mut near, Vec2::new(3.0, 4.0)),
            BehaviorOutcome::Burst {
                count: 4,
                speed: 1.0,
                color: 3,
                consume: true
            }
        );
    }

    #[test]
    fn test_burst_ring_directions() {
        let shots: Vec<Shot> = burst_ring(Vec2::new(1.0, 2.0), 4, 2.0, 9).collect();
        assert_eq!(shots.len(), 4);
        assert!((shots[1].vel - Vec2::new(0.0, 2.0)).length() < 1e-3);
        assert!((shots[2].vel - Vec2::new(-2.0, 0.0)).length() < 1e-3);
        assert!(shots.iter().all(|s| s.pos == Vec2::new(1.0, 2.0) && s.color == 9));
    }

    #[test]
    fn test_behavior_from_json_defaults() {
        let b: Behavior = serde_json::from_str(r#"{"type":"proximity_burst"}"#).unwrap();
        assert_eq!(
            b,
            Behavior::ProximityBurst {
                trigger_radius: 18.0,
                child_count: 12,
                child_speed: 1.2,
                child_color: 10,
                consume_once: true,
            }
        );

        let g: Behavior = serde_json::from_str(r#"{"type":"gravity","g":0.1,"mode":"repel"}"#).unwrap();
        assert!(matches!(
            g,
            Behavior::Gravity { mode: GravityMode::Repel, .. }
        ));
    }
}
