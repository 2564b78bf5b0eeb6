//! Per-tick input supplied by the external driver

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Context for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickContext {
    /// Position that aimed patterns and behaviors seek (the player)
    pub target: Vec2,
}

impl TickContext {
    pub fn new(target: Vec2) -> Self {
        Self { target }
    }
}
