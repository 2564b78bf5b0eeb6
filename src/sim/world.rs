//! World: enemies, their emitters and timelines, and the shared pool
//!
//! One [`World::step`] is one simulation tick: for each enemy in order, sync
//! the emitter origin, replay the timeline, run the emitter; then one pool
//! pass integrates every projectile.

use glam::Vec2;

use super::catalog::PatternCatalog;
use super::context::TickContext;
use super::emitter::Emitter;
use super::pool::{ProjectilePool, ProjectileView};
use super::stage::StageScript;
use super::timeline::{Timeline, TimelinePolicy};
use crate::error::ConfigError;
use crate::settings::Settings;

/// An emitting entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub hp: u32,
    timeline: Timeline,
    emitter: Emitter,
}

impl Enemy {
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

#[derive(Debug, Clone)]
pub struct World {
    settings: Settings,
    catalog: PatternCatalog,
    pool: ProjectilePool,
    enemies: Vec<Enemy>,
    tick: u64,
}

impl World {
    /// Build a world from a catalog and stage. Under the strict timeline
    /// policy every pattern a timeline names must exist in the catalog.
    pub fn new(settings: Settings, catalog: PatternCatalog, stage: &StageScript) -> Result<Self, ConfigError> {
        let mut enemies = Vec::with_capacity(stage.enemies.len());
        for def in &stage.enemies {
            let timeline = Timeline::from_script(&def.script, settings.timeline_policy)?;
            if settings.timeline_policy == TimelinePolicy::Strict {
                if let Some(missing) = timeline.referenced_patterns().find(|name| !catalog.contains(name)) {
                    return Err(ConfigError::UnknownPattern(missing.to_string()));
                }
            }
            let pos = Vec2::new(def.x, def.y);
            enemies.push(Enemy {
                pos,
                hp: def.hp,
                timeline,
                emitter: Emitter::new(pos).with_clear_pool_on_finish(settings.clear_pool_on_finish),
            });
        }

        log::info!(
            "World built: {} enemies, {} patterns, pool capacity {}",
            enemies.len(),
            catalog.len(),
            settings.pool_capacity
        );

        Ok(Self {
            pool: ProjectilePool::new(settings.pool_capacity, settings.bounds()),
            settings,
            catalog,
            enemies,
            tick: 0,
        })
    }

    /// Advance the world by one tick.
    ///
    /// A failing timeline command never cuts the tick short: every enemy
    /// still runs, the pool still integrates and the tick still advances.
    /// The first error is returned once the tick is complete.
    pub fn step(&mut self, ctx: &TickContext) -> Result<(), ConfigError> {
        let mut first_err = None;
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.emitter.set_origin(enemy.pos);
            if self.settings.timeline_enabled {
                if let Err(e) = enemy
                    .timeline
                    .tick(self.tick, &mut enemy.emitter, &self.catalog, &mut self.pool)
                {
                    log::warn!("Enemy {} timeline at tick {}: {}", index, self.tick, e);
                    first_err.get_or_insert(e);
                }
            }
            enemy.emitter.update(ctx, &mut self.pool);
        }
        self.pool.update(ctx);
        self.tick += 1;
        first_err.map_or(Ok(()), Err)
    }

    /// Manually toggle a pattern on the first enemy
    pub fn select_pattern(&mut self, name: &str) -> Result<(), ConfigError> {
        match self.enemies.first_mut() {
            Some(enemy) => enemy.emitter.set_pattern(name, &self.catalog, &mut self.pool),
            None => {
                log::warn!("No enemy to run pattern '{}'", name);
                Ok(())
            }
        }
    }

    pub fn set_timeline_enabled(&mut self, enabled: bool) {
        self.settings.timeline_enabled = enabled;
    }

    /// Ticks stepped so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn pattern_names(&self) -> impl Iterator<Item = &str> {
        self.catalog.names()
    }

    pub fn pool(&self) -> &ProjectilePool {
        &self.pool
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Enemies whose position the driver may move
    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Live projectiles for rendering
    pub fn snapshot(&self) -> Vec<ProjectileView> {
        self.pool.snapshot()
    }
}
