//! Barrage - A deterministic projectile pattern engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectile pool, behaviors, patterns, emitters, timelines)
//! - `settings`: Explicit engine configuration
//! - `error`: Configuration errors
//!
//! Rendering, input and asset loading live outside this crate. Callers feed a
//! [`sim::TickContext`] in and read [`sim::ProjectileView`] snapshots out.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Default number of projectile slots
    pub const DEFAULT_POOL_CAPACITY: usize = 512;
    /// Distance a projectile may stray past the field edge before it expires
    pub const OFFSCREEN_MARGIN: f32 = 4.0;
    /// Visual radius of pattern-fired projectiles
    pub const DEFAULT_RADIUS: f32 = 1.0;
    /// Distance floor used before dividing by a distance to the target
    pub const MIN_AIM_DISTANCE: f32 = 1e-5;

    /// Field dimensions: 200-wide play area plus the 70-wide side panel.
    /// Projectiles stay alive over the panel too.
    pub const PLAY_WIDTH: f32 = 200.0;
    pub const PANEL_WIDTH: f32 = 70.0;
    pub const FIELD_WIDTH: f32 = PLAY_WIDTH + PANEL_WIDTH;
    pub const FIELD_HEIGHT: f32 = 150.0;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_angle_deg(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Unit vector pointing at `deg` degrees (0 = +x, 90 = +y)
#[inline]
pub fn unit_vector_deg(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Heading in degrees from `from` toward `to`
#[inline]
pub fn aim_angle_deg(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}
