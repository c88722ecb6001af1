// rust/engine/tests/discrete_env_contracts.rs
#![forbid(unsafe_code)]

/**
 * 1-D corridor variant contracts.
 *
 * Covered:
 * - Reward table: reach end, leave the box, timeout, move closer, otherwise.
 * - Random starts stay in `{10..90} ∪ {110..190}` and are reproducible per seed.
 * - Checked state updates reject out-of-range values.
 * - Floor geometry places exactly one end marker under `end_x`.
 * - Steps after termination are latched no-ops until the next reset.
 */
use platformer_engine::engine::{
    BlockKind, DiscreteConfig, DiscretePlatformerEnv, DiscreteState, PlatformerError,
    REWARD_CLOSER, REWARD_OTHERWISE, REWARD_OUT_OF_BOUNDS, REWARD_REACH_END, REWARD_TIMEOUT,
    StateUpdate,
};

const RIGHT: usize = 0;
const LEFT: usize = 1;

fn env() -> DiscretePlatformerEnv {
    DiscretePlatformerEnv::new(DiscreteConfig::default())
}

#[test]
fn reaching_the_end_pays_and_terminates() {
    let mut e = env();
    e.reset(Some(90), None);
    let r = e.step(RIGHT).expect("valid action");
    assert!(r.done);
    assert_eq!(r.reward, REWARD_REACH_END);
    assert_eq!(
        r.state,
        DiscreteState {
            player_x: 100,
            end_x: 100
        }
    );
}

#[test]
fn moving_closer_and_away() {
    let mut e = env();
    e.reset(Some(50), None);

    let r = e.step(RIGHT).expect("valid action");
    assert!(!r.done);
    assert_eq!(r.reward, REWARD_CLOSER);
    assert_eq!(r.state.player_x, 60);

    let r = e.step(LEFT).expect("valid action");
    assert!(!r.done);
    assert_eq!(r.reward, REWARD_OTHERWISE);
    assert_eq!(r.state.player_x, 50);
}

#[test]
fn leaving_the_box_on_either_side() {
    let mut e = env();
    e.reset(Some(200), Some(100));
    let r = e.step(RIGHT).expect("valid action");
    assert!(r.done);
    assert_eq!(r.reward, REWARD_OUT_OF_BOUNDS);
    assert_eq!(r.state.player_x, 210);

    e.reset(Some(10), None);
    let r = e.step(LEFT).expect("valid action");
    assert!(!r.done);
    assert_eq!(r.state.player_x, 0);
    let r = e.step(LEFT).expect("valid action");
    assert!(r.done);
    assert_eq!(r.reward, REWARD_OUT_OF_BOUNDS);
}

#[test]
fn timeout_ends_with_zero_reward() {
    let mut e = DiscretePlatformerEnv::new(DiscreteConfig {
        time_max: 2,
        ..DiscreteConfig::default()
    });
    e.reset(Some(10), Some(200));

    assert_eq!(e.step(RIGHT).expect("valid").reward, REWARD_CLOSER);
    assert_eq!(e.step(RIGHT).expect("valid").reward, REWARD_CLOSER);
    let r = e.step(RIGHT).expect("valid");
    assert!(r.done);
    assert_eq!(r.reward, REWARD_TIMEOUT);
    assert_eq!(e.ticks(), 3);
}

#[test]
fn invalid_action_is_rejected_without_mutation() {
    let mut e = env();
    let before = e.reset(Some(30), None);
    let err = e.step(2).unwrap_err();
    assert_eq!(err, PlatformerError::InvalidAction { action: 2, n: 2 });
    assert_eq!(e.state(), before);
    assert_eq!(e.ticks(), 0);
}

#[test]
fn random_starts_avoid_the_end_and_stay_on_the_grid() {
    let mut e = env();
    e.seed(123);
    for _ in 0..200 {
        let s = e.reset(None, None);
        assert_eq!(s.end_x, 100);
        assert_eq!(s.player_x % 10, 0);
        assert!((10..=190).contains(&s.player_x));
        assert_ne!(s.player_x, 100);
    }
}

#[test]
fn random_starts_are_reproducible_per_seed() {
    let mut a = env();
    let mut b = env();
    a.seed(9);
    b.seed(9);
    for _ in 0..20 {
        assert_eq!(a.reset(None, None), b.reset(None, None));
    }
}

#[test]
fn state_updates_are_range_checked() {
    let cfg = DiscreteConfig::default();
    let err = StateUpdate::set_player_x(&cfg, 210).unwrap_err();
    assert_eq!(
        err,
        PlatformerError::InvalidStateUpdate {
            field: "player_x",
            value: 210,
            min: 0,
            max: 209
        }
    );
    assert!(StateUpdate::set_end_x(&cfg, -1).is_err());
    assert!(StateUpdate::set_end_x(&cfg, 201).is_err());

    let mut e = env();
    e.reset(Some(40), None);
    e.apply(StateUpdate::set_player_x(&cfg, 209).expect("in range"));
    e.apply(StateUpdate::set_end_x(&cfg, 200).expect("in range"));
    assert_eq!(
        e.state(),
        DiscreteState {
            player_x: 209,
            end_x: 200
        }
    );
}

#[test]
fn floor_has_one_end_marker_under_end_x() {
    let mut e = env();
    e.reset(Some(40), Some(130));
    let blocks = e.blocks();
    assert_eq!(blocks.len(), 21);
    let ends: Vec<i32> = blocks
        .iter()
        .filter(|b| b.kind == BlockKind::End)
        .map(|b| b.rect.x)
        .collect();
    assert_eq!(ends, vec![130]);
    assert!(blocks.iter().all(|b| b.rect.y == 190));
}

#[test]
fn steps_after_done_are_latched_until_reset() {
    let mut e = env();
    e.reset(Some(90), None);
    let last = e.step(RIGHT).expect("valid action");
    assert!(last.done);
    assert_eq!(e.steps_beyond_done(), Some(0));

    for n in 1..=3u64 {
        let r = e.step(RIGHT).expect("valid action");
        assert!(r.done);
        assert_eq!(r.reward, 0.0);
        assert_eq!(r.state, last.state);
        assert_eq!(e.steps_beyond_done(), Some(n));
    }
    assert_eq!(e.ticks(), 1);

    // Invalid ids are still rejected and not counted.
    assert!(e.step(5).is_err());
    assert_eq!(e.steps_beyond_done(), Some(3));

    e.reset(Some(50), None);
    assert!(!e.is_done());
    assert_eq!(e.steps_beyond_done(), None);
    assert_eq!(e.step(RIGHT).expect("valid action").reward, REWARD_CLOSER);
}
