//! Full turn and game lifecycle tests through the public API.
//!
//! These drive the engine the way a presentation layer would: observe the
//! phase, invoke operations, advance the clock with `tick`.

use wordrush::{
    Category, Difficulty, GameEngine, GameMode, GamePhase, GameSettings, RoundId, TeamId,
};

fn settings(team_count: usize, term_count: usize) -> GameSettings {
    let names = (0..team_count).map(|i| format!("Team {i}")).collect();
    let category = Category::new(
        "Animals",
        (0..term_count).map(|i| format!("animal-{i}")).collect(),
    );
    GameSettings::new(names, vec![category]).with_words_per_category(term_count)
}

/// Advance past RoundEnd/SlotReward gates until the next turn can start.
fn advance_to_setup(engine: &mut GameEngine) {
    while matches!(engine.phase(), GamePhase::RoundEnd | GamePhase::SlotReward) {
        engine.next_turn();
    }
}

#[test]
fn test_two_team_game_all_correct() {
    // Two teams, one 10-term category, perks off, easy difficulty. The
    // playing team guesses everything: 10 points, round over, and the
    // bonus phase never appears.
    let mut engine = GameEngine::new(settings(2, 10), 42);
    engine.start_game();
    engine.start_turn();

    for _ in 0..10 {
        assert_ne!(engine.phase(), GamePhase::SlotReward);
        engine.correct_guess();
    }

    assert_eq!(engine.phase(), GamePhase::RoundEnd);
    let view = engine.view();
    assert_eq!(view.scores[0].total, 10);
    assert_eq!(view.scores[1].total, 0);
}

#[test]
fn test_four_rounds_alternate_teams_to_game_end() {
    let mut engine = GameEngine::new(settings(2, 10), 42);
    engine.start_game();

    let mut turn_teams = Vec::new();
    for _ in 0..4 {
        engine.start_turn();
        turn_teams.push(engine.current_team().unwrap());
        while engine.phase() == GamePhase::Playing {
            engine.correct_guess();
        }
        assert_eq!(engine.phase(), GamePhase::RoundEnd);
        engine.next_turn();
    }

    // One full clear per round, alternating teams.
    assert_eq!(
        turn_teams,
        vec![TeamId::new(0), TeamId::new(1), TeamId::new(0), TeamId::new(1)]
    );
    assert_eq!(engine.phase(), GamePhase::GameEnd);

    let view = engine.view();
    assert_eq!(view.scores[0].final_score, Some(20));
    assert_eq!(view.scores[1].final_score, Some(20));
}

#[test]
fn test_countdown_ends_turn_and_rotates() {
    let mut engine = GameEngine::new(settings(3, 10).with_turn_seconds(5), 42);
    engine.start_game();
    engine.start_turn();

    for _ in 0..5 {
        assert_eq!(engine.phase(), GamePhase::Playing);
        engine.tick();
    }

    assert_eq!(engine.phase(), GamePhase::Setup);
    assert_eq!(engine.current_team(), Some(TeamId::new(1)));
    assert_eq!(engine.countdown(), 0);
}

#[test]
fn test_start_turn_is_setup_only() {
    let mut engine = GameEngine::new(settings(2, 10), 42);
    engine.start_game();
    engine.start_turn();

    let team = engine.current_team();
    let countdown = engine.countdown();

    // Re-invoking mid-play must not restart the turn.
    engine.correct_guess();
    engine.start_turn();
    assert_eq!(engine.current_team(), team);
    assert_eq!(engine.countdown(), countdown);
    assert_eq!(engine.view().scores[0].total, 1);
}

#[test]
fn test_medium_penalties_deferred_until_final_reveal() {
    let mut engine = GameEngine::new(
        settings(1, 3).with_difficulty(Difficulty::Medium),
        42,
    );
    engine.start_game();

    // Each round: one skip, then clear all three terms. The skip penalty
    // must stay invisible until the game ends.
    for _ in 0..4 {
        engine.start_turn();
        engine.skip_term();
        while engine.phase() == GamePhase::Playing {
            engine.correct_guess();
        }
        assert_eq!(engine.phase(), GamePhase::RoundEnd);
        if engine.round() != RoundId::Round4 {
            engine.next_turn();
        }
    }

    // 12 correct guesses visible, 4 skips hidden.
    assert_eq!(engine.view().scores[0].total, 12);

    engine.next_turn();
    assert_eq!(engine.phase(), GamePhase::GameEnd);

    let reveals = engine.penalty_reveals();
    assert_eq!(reveals.len(), 1);
    assert_eq!(reveals[0].before, 12);
    assert_eq!(reveals[0].penalty, 4);
    assert_eq!(reveals[0].after, 8);
    assert_eq!(engine.view().scores[0].final_score, Some(8));
}

#[test]
fn test_easy_misses_cost_nothing() {
    let mut engine = GameEngine::new(settings(1, 3), 42);
    engine.start_game();
    engine.start_turn();

    engine.skip_term();
    engine.wrong_guess();
    engine.correct_guess();

    assert_eq!(engine.view().scores[0].total, 1);
    // Nothing deferred either.
    while engine.phase() == GamePhase::Playing {
        engine.correct_guess();
    }
    assert!(engine.penalty_reveals().is_empty());
}

#[test]
fn test_hard_misses_cost_immediately() {
    let mut engine = GameEngine::new(
        settings(2, 3).with_difficulty(Difficulty::Hard),
        42,
    );
    engine.start_game();
    engine.start_turn();

    engine.skip_term();
    assert_eq!(engine.view().scores[0].total, -1);
}

#[test]
fn test_party_mode_weights_late_rounds() {
    let mut engine = GameEngine::new(settings(1, 2).with_mode(GameMode::Party), 42);
    engine.start_game();

    for _ in 0..4 {
        engine.start_turn();
        while engine.phase() == GamePhase::Playing {
            engine.correct_guess();
        }
        engine.next_turn();
    }

    assert_eq!(engine.phase(), GamePhase::GameEnd);
    // 2 points per round; rounds 3 and 4 count double.
    assert_eq!(engine.view().scores[0].total, 8);
    assert_eq!(engine.view().scores[0].final_score, Some(2 + 2 + 4 + 4));
}

#[test]
fn test_remove_team_midgame_keeps_game_consistent() {
    let mut engine = GameEngine::new(settings(3, 10), 42);
    engine.start_game();
    engine.start_turn();
    engine.correct_guess();

    engine.remove_team(TeamId::new(2));

    assert_eq!(engine.teams().len(), 2);
    assert!(!engine.has_team_state(TeamId::new(2)));
    assert_eq!(engine.phase(), GamePhase::Playing);

    // Turn order closes over the gap.
    while engine.phase() == GamePhase::Playing {
        engine.tick();
    }
    assert_eq!(engine.current_team(), Some(TeamId::new(1)));
}

#[test]
fn test_removing_last_team_ends_game() {
    let mut engine = GameEngine::new(settings(1, 5), 42);
    engine.start_game();
    engine.start_turn();

    engine.remove_team(TeamId::new(0));

    assert!(engine.teams().is_empty());
    assert_eq!(engine.phase(), GamePhase::GameEnd);
}

#[test]
fn test_same_seed_replays_identically() {
    let script = |engine: &mut GameEngine| {
        engine.start_game();
        for _ in 0..3 {
            engine.start_turn();
            engine.correct_guess();
            engine.skip_term();
            engine.tick();
            engine.correct_guess();
            engine.wrong_guess();
            while engine.phase() == GamePhase::Playing {
                engine.tick();
            }
            advance_to_setup(engine);
        }
    };

    let mut a = GameEngine::new(settings(2, 8).with_difficulty(Difficulty::Hard), 7);
    let mut b = GameEngine::new(settings(2, 8).with_difficulty(Difficulty::Hard), 7);
    script(&mut a);
    script(&mut b);

    assert_eq!(a.history(), b.history());
    assert_eq!(a.view(), b.view());
}

#[test]
fn test_different_seeds_shuffle_differently() {
    let first_term = |seed: u64| {
        let mut engine = GameEngine::new(settings(1, 20), seed);
        engine.start_game();
        engine.start_turn();
        engine.view().display_term
    };

    // 20 terms make a seed collision on the first draw unlikely; two
    // draws from three seeds must differ somewhere.
    let terms: Vec<_> = [1, 2, 3].iter().map(|&s| first_term(s)).collect();
    assert!(terms[0] != terms[1] || terms[1] != terms[2]);
}

#[test]
fn test_view_serializes() {
    let mut engine = GameEngine::new(settings(2, 5), 42);
    engine.start_game();
    engine.start_turn();
    engine.correct_guess();

    let view = engine.view();
    let json = serde_json::to_string(&view).unwrap();
    let back: wordrush::GameView = serde_json::from_str(&json).unwrap();
    assert_eq!(view, back);
}
