//! Emitter: binds at most one active pattern to a moving origin
//!
//! The pool and catalog are shared across emitters, so they are passed in by
//! the caller on every call rather than owned here.

use glam::Vec2;

use super::catalog::PatternCatalog;
use super::context::TickContext;
use super::patterns::{Pattern, PatternStatus};
use super::pool::ProjectilePool;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
struct ActivePattern {
    name: String,
    pattern: Pattern,
}

#[derive(Debug, Clone)]
pub struct Emitter {
    pub origin: Vec2,
    active: Option<ActivePattern>,
    /// Wipe the pool when a pattern finishes on its own
    clear_pool_on_finish: bool,
}

impl Emitter {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            active: None,
            clear_pool_on_finish: true,
        }
    }

    pub fn with_clear_pool_on_finish(mut self, clear: bool) -> Self {
        self.clear_pool_on_finish = clear;
        self
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }

    pub fn active_pattern(&self) -> Option<&Pattern> {
        self.active.as_ref().map(|a| &a.pattern)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Activate `name`, or toggle it off if it is already the active pattern.
    ///
    /// Any transition clears the pool. An unknown name fails before anything
    /// changes.
    pub fn set_pattern(
        &mut self,
        name: &str,
        catalog: &PatternCatalog,
        pool: &mut ProjectilePool,
    ) -> Result<(), ConfigError> {
        if self.active_name() == Some(name) {
            log::info!("Pattern '{}' toggled off", name);
            self.stop(pool);
            return Ok(());
        }

        let pattern = catalog.instantiate(name)?;
        pool.clear_all();
        if let Some(prev) = self.active.replace(ActivePattern {
            name: name.to_string(),
            pattern,
        }) {
            log::info!("Pattern '{}' replaced by '{}'", prev.name, name);
        } else {
            log::info!("Pattern '{}' activated", name);
        }
        Ok(())
    }

    /// Deactivate unconditionally and clear the pool
    pub fn stop(&mut self, pool: &mut ProjectilePool) {
        pool.clear_all();
        self.active = None;
    }

    /// Run one tick of the active pattern, if any
    pub fn update(&mut self, ctx: &TickContext, pool: &mut ProjectilePool) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        if active.pattern.advance(self.origin, ctx, pool) == PatternStatus::Finished {
            log::info!(
                "Pattern '{}' finished after {} ticks",
                active.name,
                active.pattern.clock()
            );
            self.active = None;
            if self.clear_pool_on_finish {
                pool.clear_all();
            }
        }
    }
}
