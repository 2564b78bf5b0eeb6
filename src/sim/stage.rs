//! Stage script: the emitting entities of a stage and their timelines

use serde::{Deserialize, Serialize};

use super::timeline::ScriptEntry;
use crate::error::ConfigError;

fn default_hp() -> u32 {
    1
}

/// One emitting entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_hp")]
    pub hp: u32,
    #[serde(default)]
    pub script: Vec<ScriptEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageScript {
    pub enemies: Vec<EnemyDef>,
}

impl StageScript {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
