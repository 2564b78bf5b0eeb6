//! Barrage headless runner
//!
//! Builds the demo stage, drives a target around a circle and logs pool
//! occupancy. Usage: `barrage [ticks]`

#[cfg(not(target_arch = "wasm32"))]
const DEMO_CATALOG: &str = include_str!("../data/demo_catalog.json");
#[cfg(not(target_arch = "wasm32"))]
const DEMO_STAGE: &str = include_str!("../data/demo_stage.json");

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 600;
#[cfg(not(target_arch = "wasm32"))]
const LOG_EVERY: u64 = 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Barrage (headless) starting...");

    let ticks = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        None => DEFAULT_TICKS,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid tick count: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(ticks) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(ticks: u64) -> Result<(), barrage::ConfigError> {
    use barrage::Settings;
    use barrage::sim::{PatternCatalog, StageScript, TickContext, World};
    use glam::Vec2;

    let catalog = PatternCatalog::from_json(DEMO_CATALOG)?;
    let stage = StageScript::from_json(DEMO_STAGE)?;
    let settings = Settings::default();
    let center = Vec2::new(barrage::consts::PLAY_WIDTH * 0.5, settings.field_height * 0.75);
    let mut world = World::new(settings, catalog, &stage)?;

    let mut peak = 0;
    for t in 0..ticks {
        // target circles the lower half of the play area
        let phase = t as f32 * 0.02;
        let target = center + Vec2::new(phase.cos(), phase.sin()) * 30.0;
        world.step(&TickContext::new(target))?;

        let live = world.pool().live_count();
        peak = peak.max(live);
        if world.tick() % LOG_EVERY == 0 {
            let active: Vec<&str> = world
                .enemies()
                .iter()
                .filter_map(|e| e.emitter().active_name())
                .collect();
            log::info!("tick {:>5}: {:>4} live, active {:?}", world.tick(), live, active);
        }
    }

    log::info!(
        "Finished {} ticks: {} live, peak {} of {}",
        world.tick(),
        world.pool().live_count(),
        peak,
        world.pool().capacity()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; there is no wasm binary entry
}
