//! Engine settings
//!
//! Passed explicitly to constructors; there is no global configuration.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Bounds, TimelinePolicy};

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Width projectiles may occupy (play area + side panel)
    pub field_width: f32,
    pub field_height: f32,
    /// Slack past the field edge before a projectile expires
    pub offscreen_margin: f32,

    // === Pool ===
    pub pool_capacity: usize,

    // === Timeline ===
    /// Replay stage timelines (off = manual pattern selection only)
    pub timeline_enabled: bool,
    pub timeline_policy: TimelinePolicy,

    // === Patterns ===
    /// Clear all projectiles when a pattern finishes on its own
    pub clear_pool_on_finish: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            offscreen_margin: OFFSCREEN_MARGIN,

            pool_capacity: DEFAULT_POOL_CAPACITY,

            timeline_enabled: true,
            timeline_policy: TimelinePolicy::Lenient,

            clear_pool_on_finish: true,
        }
    }
}

impl Settings {
    /// Projectile bounds derived from the field settings
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.field_width,
            height: self.field_height,
            margin: self.offscreen_margin,
        }
    }

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!("Loaded settings: pool={} field={}x{}", settings.pool_capacity, settings.field_width, settings.field_height);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
