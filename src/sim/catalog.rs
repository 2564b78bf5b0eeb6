//! Pattern catalog: named, validated pattern records
//!
//! JSON shape:
//!
//! ```json
//! { "patterns": { "ring16": { "type": "circular", "bullet_speed": 1.0, "count": 16 } } }
//! ```
//!
//! An unknown `type` tag is rejected while parsing; an unknown name is
//! rejected when an emitter asks for it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::patterns::{
    AimedBurstParams, AimedNWayParams, CircleFireParams, CircularParams, HomingLaserParams, Pattern,
    RollingFireParams, SpinnerParams, TwoSplitFanParams,
};
use crate::error::ConfigError;

/// Parameters of one pattern kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternSpec {
    Circular(CircularParams),
    #[serde(rename = "aimed")]
    AimedBurst(AimedBurstParams),
    Spinner(SpinnerParams),
    RollingFire(RollingFireParams),
    HomingLaser(HomingLaserParams),
    CircleFire(CircleFireParams),
    #[serde(rename = "nway_aimed")]
    AimedNWay(AimedNWayParams),
    #[serde(rename = "two_split")]
    TwoSplitFan(TwoSplitFanParams),
}

impl PatternSpec {
    /// Reject parameters that would make the pattern ill-defined
    pub fn validate(&self) -> Result<(), String> {
        match self {
            PatternSpec::Circular(p) => p.validate(),
            PatternSpec::AimedBurst(p) => p.validate(),
            PatternSpec::Spinner(p) => p.validate(),
            PatternSpec::AimedNWay(p) => p.validate(),
            PatternSpec::RollingFire(p) => p.validate(),
            PatternSpec::HomingLaser(_)
            | PatternSpec::CircleFire(_)
            | PatternSpec::TwoSplitFan(_) => Ok(()),
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    patterns: BTreeMap<String, PatternSpec>,
}

/// Mapping from pattern name to validated parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternCatalog {
    patterns: BTreeMap<String, PatternSpec>,
}

impl PatternCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate `{"patterns": {...}}`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (name, spec) in file.patterns {
            catalog.insert(name, spec)?;
        }
        log::info!("Loaded {} patterns", catalog.len());
        Ok(catalog)
    }

    /// Add or replace a named pattern
    pub fn insert(&mut self, name: impl Into<String>, spec: PatternSpec) -> Result<(), ConfigError> {
        let name = name.into();
        spec.validate()
            .map_err(|reason| ConfigError::InvalidPattern { name: name.clone(), reason })?;
        self.patterns.insert(name, spec);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, spec: PatternSpec) -> Result<Self, ConfigError> {
        self.insert(name, spec)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&PatternSpec> {
        self.patterns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Fresh instance of a named pattern
    pub fn instantiate(&self, name: &str) -> Result<Pattern, ConfigError> {
        self.get(name)
            .map(Pattern::from_spec)
            .ok_or_else(|| ConfigError::UnknownPattern(name.to_string()))
    }

    /// Pattern names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
