//! Property-based tests over random operation sequences.
//!
//! The engine must stay consistent under any interleaving of guesses,
//! skips and clock ticks: no wedged phases, no leaked scheduler entries,
//! a countdown that only moves down, and full replayability from a seed.

use proptest::prelude::*;

use wordrush::{
    Category, Difficulty, GameEngine, GameMode, GamePhase, GameSettings, GuessKind,
    PerkSettings, RoundId, TeamId,
};

const TURN_SECONDS: u32 = 20;

fn settings(difficulty: Difficulty, perks: PerkSettings) -> GameSettings {
    let category = Category::new("Mixed", (0..6).map(|i| format!("term-{i}")).collect());
    GameSettings::new(
        vec!["Red".to_string(), "Blue".to_string()],
        vec![category],
    )
    .with_turn_seconds(TURN_SECONDS)
    .with_words_per_category(6)
    .with_difficulty(difficulty)
    .with_mode(GameMode::Party)
    .with_perks(perks)
}

/// Apply one scripted op, resolving gate phases first.
fn step(engine: &mut GameEngine, op: u8) {
    match engine.phase() {
        GamePhase::Setup => engine.start_turn(),
        GamePhase::RoundEnd | GamePhase::SlotReward => {
            while engine.spin_slot().is_some() {}
            engine.next_turn();
        }
        GamePhase::GameEnd => {}
        GamePhase::Playing => match op % 4 {
            0 => engine.tick(),
            1 => engine.correct_guess(),
            2 => engine.skip_term(),
            _ => engine.wrong_guess(),
        },
    }
}

/// Drive a game from wherever it is to `GameEnd`.
fn finish(engine: &mut GameEngine) {
    while engine.phase() != GamePhase::GameEnd {
        match engine.phase() {
            GamePhase::Setup => engine.start_turn(),
            GamePhase::Playing => engine.correct_guess(),
            GamePhase::RoundEnd | GamePhase::SlotReward => {
                while engine.spin_slot().is_some() {}
                engine.next_turn();
            }
            GamePhase::GameEnd => {}
        }
    }
}

proptest! {
    /// No operation interleaving leaks scheduler entries past a turn.
    #[test]
    fn prop_no_scheduler_leaks(
        seed in 0u64..500,
        ops in prop::collection::vec(0u8..4, 1..300),
    ) {
        let mut engine = GameEngine::new(
            settings(Difficulty::Hard, PerkSettings::all_packs()),
            seed,
        );
        engine.start_game();
        let teams: Vec<TeamId> = engine.teams().ids().collect();

        for op in ops {
            step(&mut engine, op);

            if matches!(
                engine.phase(),
                GamePhase::Setup | GamePhase::RoundEnd | GamePhase::GameEnd
            ) {
                for &team in &teams {
                    prop_assert_eq!(engine.scheduled_actions_for(team), 0);
                    prop_assert_eq!(engine.notices_for(team), 0);
                }
            }
        }
    }

    /// Without perks the countdown never moves up, and a turn never
    /// outlives its time budget once the countdown is running.
    #[test]
    fn prop_countdown_monotone_and_bounded(
        seed in 0u64..500,
        ops in prop::collection::vec(0u8..4, 1..300),
    ) {
        let mut engine = GameEngine::new(
            settings(Difficulty::Easy, PerkSettings::disabled()),
            seed,
        );
        engine.start_game();

        let mut ticks_this_turn = 0u32;
        for op in ops {
            let was_playing = engine.phase() == GamePhase::Playing;
            let round = engine.round();
            let before = engine.countdown();

            step(&mut engine, op);

            if was_playing && op % 4 == 0 {
                prop_assert!(engine.countdown() <= before);
                // The finale defers its countdown until the first guess,
                // so the tick bound only holds in the earlier rounds.
                if round != RoundId::Round4 {
                    ticks_this_turn += 1;
                    prop_assert!(ticks_this_turn <= TURN_SECONDS);
                }
            }
            // A live turn always has time on the clock.
            if engine.phase() == GamePhase::Playing {
                prop_assert!(engine.countdown() > 0);
            } else {
                ticks_this_turn = 0;
            }
        }
    }

    /// The same seed and operation script replay to identical state.
    #[test]
    fn prop_replay_is_deterministic(
        seed in 0u64..500,
        ops in prop::collection::vec(0u8..4, 1..200),
    ) {
        let run = |ops: &[u8]| {
            let mut engine = GameEngine::new(
                settings(Difficulty::Hard, PerkSettings::all_packs()),
                seed,
            );
            engine.start_game();
            for &op in ops {
                step(&mut engine, op);
            }
            engine
        };

        let a = run(&ops);
        let b = run(&ops);
        prop_assert_eq!(a.history(), b.history());
        prop_assert_eq!(a.view(), b.view());
    }

    /// At medium difficulty, the final reveal subtracts exactly one point
    /// per recorded miss, and the pre-reveal total is the sum of earned
    /// points.
    #[test]
    fn prop_deferred_penalty_accounting(
        seed in 0u64..500,
        ops in prop::collection::vec(0u8..4, 1..200),
    ) {
        let mut engine = GameEngine::new(
            settings(Difficulty::Medium, PerkSettings::disabled()),
            seed,
        );
        engine.start_game();
        for op in ops {
            step(&mut engine, op);
        }
        finish(&mut engine);

        for reveal in engine.penalty_reveals() {
            let earned: i64 = engine
                .history()
                .iter()
                .filter(|r| r.team == reveal.team)
                .map(|r| r.points)
                .sum();
            let misses = engine
                .history()
                .iter()
                .filter(|r| r.team == reveal.team && r.kind != GuessKind::Correct)
                .count() as i64;

            prop_assert_eq!(reveal.before, earned);
            prop_assert_eq!(reveal.penalty, misses);
            prop_assert_eq!(reveal.after, earned - misses);
        }
    }
}
