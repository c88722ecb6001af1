// rust/engine/tests/engine_invariants_prop.rs
#![forbid(unsafe_code)]

/**
 * Property/invariant tests for the core simulation.
 *
 * Purpose:
 * - Provide fuzz-like coverage using generated seeds, chunk shapes and action sequences.
 * - Lock core invariants that must hold regardless of policy logic.
 *
 * Invariants covered:
 * - Repeated `slowdown` never grows the speed and reaches zero.
 * - Decoding a chunk appends exactly one block per solid cell, in column-major order.
 * - Horizontal speed stays within `[-speed_x, speed_x]` after every step.
 * - The fresh observation lies inside the observation box.
 * - Identical seeds and action sequences give identical trajectories.
 * - Rewards sum to the final score.
 */
use proptest::prelude::*;
use platformer_engine::engine::{
    ACTION_DIM, ChunkCatalogue, ChunkId, Config, Map, PlatformerEnv, slowdown,
};

fn chunk_rows() -> impl Strategy<Value = Vec<String>> {
    (1usize..6, 1usize..10).prop_flat_map(|(h, w)| {
        proptest::collection::vec(
            proptest::collection::vec(prop_oneof![Just(' '), Just('W'), Just('E'), Just('.')], w)
                .prop_map(|cells| cells.into_iter().collect::<String>()),
            h,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn slowdown_converges_to_zero(x in -1000i32..1000, coeff in 1.05f64..5.0) {
        let mut v = f64::from(x);
        for _ in 0..200 {
            let next = slowdown(v, coeff);
            prop_assert!(next.abs() <= v.abs());
            prop_assert_eq!(next, next.trunc());
            v = next;
            if v == 0.0 {
                break;
            }
        }
        prop_assert_eq!(v, 0.0);
    }

    #[test]
    fn decoding_appends_one_block_per_solid_cell(rows in chunk_rows(), x_start in -64i32..512) {
        let h = rows.len();
        let cfg = Config::with_chunk_height(h);
        let cat = ChunkCatalogue::new(h).with_chunk("base", rows.as_slice()).expect("generated chunk is rectangular");
        let mut map = Map::with_catalogue(cfg.clone(), cat, vec!["base".to_string()]).expect("valid world");

        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let n = map.load_chunk(ChunkId::Literal(&refs), x_start).expect("literal is rectangular");

        let solid = rows.iter().flat_map(|r| r.chars()).filter(|&c| c == 'W' || c == 'E').count();
        prop_assert_eq!(n, solid);
        prop_assert_eq!(map.blocks().len(), solid);

        let top = cfg.chunk_top();
        for pair in map.blocks().windows(2) {
            let (a, b) = (&pair[0].rect, &pair[1].rect);
            prop_assert!(a.x < b.x || (a.x == b.x && a.y < b.y));
        }
        for b in map.blocks() {
            prop_assert!(b.rect.x >= x_start);
            prop_assert_eq!((b.rect.x - x_start) % cfg.block_width, 0);
            prop_assert_eq!((b.rect.y - top) % cfg.block_height, 0);
        }
    }

    #[test]
    fn x_speed_stays_clamped(
        seed in any::<u64>(),
        random_gen in any::<bool>(),
        actions in proptest::collection::vec(0usize..ACTION_DIM, 1..200),
    ) {
        let cfg = Config { seed, random_gen, max_ticks: 500, ..Config::default() };
        let speed_x = cfg.speed_x;
        let mut env = PlatformerEnv::new(cfg).expect("env");
        for a in actions {
            let r = env.step(a).expect("valid action");
            prop_assert!(r.observation.x_speed.abs() <= speed_x);
            prop_assert_eq!(r.observation.x_speed, r.observation.x_speed.trunc());
            if r.done {
                break;
            }
        }
    }

    #[test]
    fn fresh_observation_is_in_the_box(
        seed in any::<u64>(),
        random_gen in any::<bool>(),
        max_ticks in 1u32..100,
    ) {
        let cfg = Config { seed, random_gen, max_ticks, ..Config::default() };
        let mut env = PlatformerEnv::new(cfg).expect("env");
        let obs = env.reset().expect("reset");
        prop_assert!(env.observation_space().contains(&obs.to_array()));
        prop_assert_eq!(obs.time, 0.0);
        prop_assert_eq!(obs.chunks_passed, 0.0);
    }

    #[test]
    fn same_seed_same_trajectory(
        seed in any::<u64>(),
        actions in proptest::collection::vec(0usize..ACTION_DIM, 1..120),
    ) {
        let cfg = Config { seed, random_gen: true, max_ticks: 200, ..Config::default() };
        let mut a = PlatformerEnv::new(cfg.clone()).expect("env");
        let mut b = PlatformerEnv::new(cfg).expect("env");
        for &act in &actions {
            let ra = a.step(act).expect("valid action");
            let rb = b.step(act).expect("valid action");
            prop_assert_eq!(ra, rb);
        }
        prop_assert_eq!(a.map().blocks(), b.map().blocks());
    }

    #[test]
    fn rewards_sum_to_the_score(
        seed in any::<u64>(),
        actions in proptest::collection::vec(0usize..ACTION_DIM, 1..150),
    ) {
        let cfg = Config { seed, max_ticks: 200, ..Config::default() };
        let mut env = PlatformerEnv::new(cfg).expect("env");
        let mut total = 0.0;
        for a in actions {
            total += env.step(a).expect("valid action").reward;
        }
        prop_assert!((total - env.score_val()).abs() < 1e-9);
    }
}
