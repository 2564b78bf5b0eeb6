//! Pattern state machines
//!
//! Every pattern kind is a variant of [`Pattern`], each carrying its own
//! state struct. [`Pattern::advance`] runs one tick: the pattern bumps its
//! private clock, spawns into the shared pool, and reports whether it wants
//! to keep running.
//!
//! Patterns that need randomness own a `Pcg32` seeded from their parameters,
//! so two emitters running the same pattern never share a stream.

mod aimed;
mod circle_fire;
mod homing_laser;
mod radial;
mod rolling_fire;
mod two_split;

use std::collections::VecDeque;

use glam::Vec2;

use super::behavior::Behavior;
use super::catalog::PatternSpec;
use super::context::TickContext;
use super::pool::{ProjectilePool, Shot, SlotId};
use crate::unit_vector_deg;

pub use aimed::{AimedBurst, AimedBurstParams, AimedNWay, AimedNWayParams};
pub use circle_fire::{CircleFireApprox, CircleFireParams};
pub use homing_laser::{HomingLaserApprox, HomingLaserParams};
pub use radial::{Circular, CircularParams, Spinner, SpinnerParams};
pub use rolling_fire::{RollingFire, RollingFireParams};
pub use two_split::{TwoSplitFanApprox, TwoSplitFanParams};

/// Result of advancing a pattern by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternStatus {
    Running,
    /// The pattern is done; its emitter should deactivate it
    Finished,
}

/// An active pattern instance
#[derive(Debug, Clone)]
pub enum Pattern {
    Circular(Circular),
    AimedBurst(AimedBurst),
    Spinner(Spinner),
    RollingFire(RollingFire),
    HomingLaser(HomingLaserApprox),
    CircleFire(CircleFireApprox),
    AimedNWay(AimedNWay),
    TwoSplitFan(TwoSplitFanApprox),
}

impl Pattern {
    /// Build a fresh instance (clock 0, RNG freshly seeded)
    pub fn from_spec(spec: &PatternSpec) -> Self {
        match spec {
            PatternSpec::Circular(p) => Pattern::Circular(Circular::new(p.clone())),
            PatternSpec::AimedBurst(p) => Pattern::AimedBurst(AimedBurst::new(p.clone())),
            PatternSpec::Spinner(p) => Pattern::Spinner(Spinner::new(p.clone())),
            PatternSpec::RollingFire(p) => Pattern::RollingFire(RollingFire::new(p.clone())),
            PatternSpec::HomingLaser(p) => Pattern::HomingLaser(HomingLaserApprox::new(p.clone())),
            PatternSpec::CircleFire(p) => Pattern::CircleFire(CircleFireApprox::new(p.clone())),
            PatternSpec::AimedNWay(p) => Pattern::AimedNWay(AimedNWay::new(p.clone())),
            PatternSpec::TwoSplitFan(p) => Pattern::TwoSplitFan(TwoSplitFanApprox::new(p.clone())),
        }
    }

    /// Run one tick of the pattern from `origin`
    pub fn advance(&mut self, origin: Vec2, ctx: &TickContext, pool: &mut ProjectilePool) -> PatternStatus {
        match self {
            Pattern::Circular(p) => p.advance(origin, pool),
            Pattern::AimedBurst(p) => p.advance(origin, ctx, pool),
            Pattern::Spinner(p) => p.advance(origin, pool),
            Pattern::RollingFire(p) => p.advance(origin, pool),
            Pattern::HomingLaser(p) => p.advance(origin, ctx, pool),
            Pattern::CircleFire(p) => p.advance(origin, pool),
            Pattern::AimedNWay(p) => p.advance(origin, ctx, pool),
            Pattern::TwoSplitFan(p) => p.advance(origin, ctx, pool),
        }
    }

    /// Ticks advanced since activation
    pub fn clock(&self) -> u32 {
        match self {
            Pattern::Circular(p) => p.clock,
            Pattern::AimedBurst(p) => p.clock,
            Pattern::Spinner(p) => p.clock,
            Pattern::RollingFire(p) => p.clock,
            Pattern::HomingLaser(p) => p.clock,
            Pattern::CircleFire(p) => p.clock,
            Pattern::AimedNWay(p) => p.clock,
            Pattern::TwoSplitFan(p) => p.clock,
        }
    }
}

/// Spawn one projectile from `origin` heading `deg` degrees
fn fire(
    pool: &mut ProjectilePool,
    origin: Vec2,
    deg: f32,
    speed: f32,
    color: u8,
    behavior: Option<&Behavior>,
) -> Option<SlotId> {
    pool.spawn(Shot::new(origin, unit_vector_deg(deg) * speed, color).with_behavior(behavior.cloned()))
}

/// A spawn scheduled for a later pattern tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeferredSpawn {
    pub due: u32,
    pub pos: Vec2,
    pub angle_deg: f32,
}

/// FIFO of deferred spawns.
///
/// Entries are pushed in non-decreasing `due` order, so draining from the
/// head yields them by due tick, and entries sharing a due tick come out in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    entries: VecDeque<DeferredSpawn>,
}

impl DeferredQueue {
    pub fn push(&mut self, entry: DeferredSpawn) {
        debug_assert!(self.entries.back().is_none_or(|last| last.due <= entry.due));
        self.entries.push_back(entry);
    }

    /// Pop the head if it is due at `clock`
    pub fn pop_due(&mut self, clock: u32) -> Option<DeferredSpawn> {
        if self.entries.front().is_some_and(|e| e.due <= clock) {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
