//! Property tests for pool occupancy, timeline catch-up and angle helpers

use barrage::normalize_angle_deg;
use barrage::sim::patterns::AimedNWay;
use barrage::sim::{
    Bounds, Command, Emitter, PatternCatalog, ProjectilePool, Shot, TickContext, Timeline, TimelineEntry,
};
use glam::Vec2;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Spawn(Vec2),
    Update,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-3.0f32..3.0, -3.0f32..3.0).prop_map(|(x, y)| Op::Spawn(Vec2::new(x, y))),
        2 => Just(Op::Update),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn test_pool_never_exceeds_capacity(capacity in 1usize..32, ops in prop::collection::vec(op(), 0..200)) {
        let mut pool = ProjectilePool::new(capacity, Bounds::new(200.0, 150.0));
        for op in ops {
            match op {
                Op::Spawn(vel) => {
                    let was_full = pool.live_count() == capacity;
                    let id = pool.spawn(Shot::new(Vec2::new(100.0, 75.0), vel, 1));
                    prop_assert_eq!(id.is_none(), was_full);
                }
                Op::Update => pool.update(&TickContext::default()),
                Op::Clear => {
                    pool.clear_all();
                    prop_assert!(pool.is_empty());
                }
            }
            prop_assert!(pool.live_count() <= capacity);
            prop_assert_eq!(pool.snapshot().len(), pool.live_count());
        }
    }

    #[test]
    fn test_timeline_runs_everything_due(
        ats in prop::collection::vec(0u64..500, 0..30),
        mut ticks in prop::collection::vec(0u64..600, 1..20),
    ) {
        ticks.sort_unstable();
        let entries = ats
            .iter()
            .map(|&at| TimelineEntry { at, command: Command::Stop })
            .collect();
        let mut timeline = Timeline::new(entries);
        let catalog = PatternCatalog::new();
        let mut pool = ProjectilePool::new(4, Bounds::default());
        let mut emitter = Emitter::new(Vec2::ZERO);

        for t in ticks {
            timeline.tick(t, &mut emitter, &catalog, &mut pool).unwrap();
            let pending = ats.iter().filter(|&&at| at > t).count();
            prop_assert_eq!(timeline.remaining(), pending);
            prop_assert!(timeline.remaining() <= ats.len());
        }
        prop_assert!(timeline.entries().windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn test_normalize_angle_range(deg in -10_000.0f32..10_000.0) {
        let n = normalize_angle_deg(deg);
        prop_assert!((-180.0..=180.0).contains(&n));
        let turns = (deg - n) / 360.0;
        prop_assert!((turns - turns.round()).abs() < 1e-2);
    }

    #[test]
    fn test_fan_is_centered(base in -180.0f32..180.0, ways in 1u32..12, spread in 0.0f32..180.0) {
        let fan = AimedNWay::fan_angles(base, ways, spread);
        prop_assert_eq!(fan.len(), ways as usize);
        let mean = fan.iter().sum::<f32>() / fan.len() as f32;
        prop_assert!((mean - base).abs() < 1e-2);
    }
}
