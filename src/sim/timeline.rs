//! Timeline: tick-ordered pattern commands replayed against an emitter
//!
//! The cursor only moves forward. Commands whose tick has already passed run
//! on the first tick that reaches them, so nothing is skipped.

use serde::{Deserialize, Serialize};

use super::catalog::PatternCatalog;
use super::emitter::Emitter;
use super::pool::ProjectilePool;
use crate::error::ConfigError;

/// How malformed script entries are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelinePolicy {
    /// Drop unknown commands with a warning
    #[default]
    Lenient,
    /// Reject the whole script
    Strict,
}

/// A raw script entry as written in stage data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub at: u64,
    pub cmd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ScriptEntry {
    pub fn use_pattern(at: u64, pattern: &str) -> Self {
        Self {
            at,
            cmd: "use".into(),
            pattern: Some(pattern.into()),
        }
    }

    pub fn stop(at: u64) -> Self {
        Self {
            at,
            cmd: "stop".into(),
            pattern: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Use(String),
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub at: u64,
    pub command: Command,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    cursor: usize,
}

impl Timeline {
    /// Build from script entries. Entries are stably sorted by tick, so
    /// entries sharing a tick keep their script order.
    pub fn from_script(script: &[ScriptEntry], policy: TimelinePolicy) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(script.len());
        for (index, raw) in script.iter().enumerate() {
            let command = match (raw.cmd.as_str(), &raw.pattern) {
                ("use", Some(name)) => Command::Use(name.clone()),
                ("stop", _) => Command::Stop,
                ("use", None) => match policy {
                    TimelinePolicy::Strict => {
                        return Err(ConfigError::MissingPatternName { index, at: raw.at });
                    }
                    TimelinePolicy::Lenient => {
                        log::warn!("Timeline entry {} at tick {}: `use` without pattern, ignored", index, raw.at);
                        continue;
                    }
                },
                (other, _) => match policy {
                    TimelinePolicy::Strict => {
                        return Err(ConfigError::UnknownCommand {
                            index,
                            at: raw.at,
                            cmd: other.to_string(),
                        });
                    }
                    TimelinePolicy::Lenient => {
                        log::warn!("Timeline entry {} at tick {}: unknown command '{}', ignored", index, raw.at, other);
                        continue;
                    }
                },
            };
            entries.push(TimelineEntry { at: raw.at, command });
        }
        entries.sort_by_key(|e| e.at);
        Ok(Self { entries, cursor: 0 })
    }

    pub fn new(mut entries: Vec<TimelineEntry>) -> Self {
        entries.sort_by_key(|e| e.at);
        Self { entries, cursor: 0 }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Number of commands not yet executed
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Pattern names referenced by `Use` commands
    pub fn referenced_patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match &e.command {
            Command::Use(name) => Some(name.as_str()),
            Command::Stop => None,
        })
    }

    /// Execute every pending command due at or before `current_tick`.
    ///
    /// A failing command is consumed and the remaining due commands still
    /// run; the first error is returned afterwards.
    pub fn tick(
        &mut self,
        current_tick: u64,
        emitter: &mut Emitter,
        catalog: &PatternCatalog,
        pool: &mut ProjectilePool,
    ) -> Result<(), ConfigError> {
        let mut first_err = None;
        while let Some(entry) = self.entries.get(self.cursor) {
            if entry.at > current_tick {
                break;
            }
            self.cursor += 1;
            log::debug!("Timeline tick {}: {:?} (scheduled {})", current_tick, entry.command, entry.at);
            let result = match &entry.command {
                Command::Use(name) => emitter.set_pattern(name, catalog, pool),
                Command::Stop => {
                    emitter.stop(pool);
                    Ok(())
                }
            };
            if let Err(e) = result {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
