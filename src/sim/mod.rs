//! Deterministic simulation module
//!
//! All pattern logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one tick)
//! - Seeded RNG only, one per pattern instance
//! - Stable iteration order (by pool slot, by enemy index)
//! - No rendering or platform dependencies

pub mod behavior;
pub mod catalog;
pub mod context;
pub mod emitter;
pub mod patterns;
pub mod pool;
pub mod stage;
pub mod timeline;
pub mod world;

pub use behavior::{Behavior, BehaviorOutcome, GravityMode, SpeedStep};
pub use catalog::{PatternCatalog, PatternSpec};
pub use context::TickContext;
pub use emitter::Emitter;
pub use patterns::{Pattern, PatternStatus};
pub use pool::{Bounds, Projectile, ProjectilePool, ProjectileView, Shot, SlotId};
pub use stage::{EnemyDef, StageScript};
pub use timeline::{Command, ScriptEntry, Timeline, TimelineEntry, TimelinePolicy};
pub use world::{Enemy, World};
