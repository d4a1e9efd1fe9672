//! Property tests for the gameplay laws

use proptest::prelude::*;

use drop_catch::sim::{Bucket, FallingEntity, Resolution, resolve};
use drop_catch::{
    Difficulty, FieldGeometry, GameConfig, GamePhase, Session, profile_for, secs_to_ticks,
};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

fn geometry() -> impl Strategy<Value = FieldGeometry> {
    (200.0f32..2000.0, 20.0f32..200.0).prop_map(|(width, bucket_width)| FieldGeometry {
        width,
        bucket_width,
        ..Default::default()
    })
}

fn running(difficulty: Difficulty) -> Session {
    let config = GameConfig {
        difficulty,
        confetti_count: 0,
        ..Default::default()
    };
    let mut s = Session::new(config, 11).unwrap();
    s.start();
    s
}

proptest! {
    #[test]
    fn profile_lookup_round_trips(d in difficulty(), upper in any::<bool>()) {
        let profile = d.profile();
        let name = if upper { profile.name().to_uppercase() } else { profile.name().to_string() };
        prop_assert_eq!(profile_for(&name), Ok(profile));
    }

    #[test]
    fn bucket_always_clamped(
        geo in geometry(),
        raw_x in -1.0e5f32..1.0e5,
        origin_x in -1.0e3f32..1.0e3,
    ) {
        let mut bucket = Bucket::centered(&geo);
        bucket.follow(raw_x, origin_x, &geo);
        prop_assert!(bucket.x >= 0.0);
        prop_assert!(bucket.x <= geo.width - geo.bucket_width);
    }

    #[test]
    fn session_input_keeps_bucket_in_field(xs in prop::collection::vec(-5000.0f32..5000.0, 1..50)) {
        let mut s = running(Difficulty::Medium);
        for x in xs {
            s.on_input_position(x, 0.0);
            prop_assert!(s.bucket.x >= 0.0 && s.bucket.x <= s.geometry().max_bucket_x());
        }
    }

    #[test]
    fn score_delta_law(catches in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut s = running(Difficulty::Medium);
        let height = s.geometry().height;
        let mut out = Vec::new();
        let mut expected = 0;
        for clean in catches {
            let id = s.state.next_entity_id();
            s.state.entities.push(FallingEntity::new(id, 0.0, clean, 3.0, height));
            prop_assert!(resolve(&mut s.state, id, Resolution::Caught, &mut out));
            expected += if clean { 2 } else { -1 };
            prop_assert_eq!(s.state.score, expected);
        }
    }

    #[test]
    fn misses_never_score(n in 1usize..30) {
        let mut s = running(Difficulty::Hard);
        let height = s.geometry().height;
        let mut out = Vec::new();
        for _ in 0..n {
            let id = s.state.next_entity_id();
            s.state.entities.push(FallingEntity::new(id, 0.0, true, 2.0, height));
            resolve(&mut s.state, id, Resolution::Missed, &mut out);
        }
        prop_assert_eq!(s.state.score, 0);
    }

    #[test]
    fn resolution_happens_at_most_once(
        clean in any::<bool>(),
        attempts in prop::collection::vec(any::<bool>(), 1..10),
    ) {
        let mut s = running(Difficulty::Easy);
        let height = s.geometry().height;
        let id = s.state.next_entity_id();
        s.state.entities.push(FallingEntity::new(id, 0.0, clean, 3.0, height));

        let mut out = Vec::new();
        let mut successes = 0;
        for caught in &attempts {
            let resolution = if *caught { Resolution::Caught } else { Resolution::Missed };
            successes += resolve(&mut s.state, id, resolution, &mut out) as u32;
        }
        prop_assert_eq!(successes, 1);

        let expected = if attempts[0] { if clean { 2 } else { -1 } } else { 0 };
        prop_assert_eq!(s.state.score, expected);
    }

    #[test]
    fn win_iff_score_meets_goal(score in -200i32..200, goal in 1u32..150) {
        let mut s = running(Difficulty::Medium);
        s.state.score = score;
        s.state.goal = goal;
        s.state.time_remaining_secs = 1;
        for _ in 0..secs_to_ticks(1) {
            s.tick();
        }
        let expected = if score >= goal as i32 { GamePhase::Won } else { GamePhase::Lost };
        prop_assert_eq!(s.phase(), expected);
        prop_assert_eq!(s.state.score, score);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn timer_counts_down_to_terminal(d in difficulty(), seed in any::<u64>()) {
        let config = GameConfig { difficulty: d, confetti_count: 0, ..Default::default() };
        let mut s = Session::new(config, seed).unwrap();
        s.start();

        let mut last = s.state.time_remaining_secs;
        while s.phase() == GamePhase::Running {
            s.tick();
            let now = s.state.time_remaining_secs;
            prop_assert!(now == last || now + 1 == last);
            if now == 0 {
                prop_assert!(s.phase().is_ended());
            }
            last = now;
        }
        prop_assert_eq!(last, 0);
    }
}
