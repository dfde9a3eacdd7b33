//! Scoring rules.
//!
//! Pure helpers that turn a guess event plus the guesser's effect state
//! into a scoring outcome. The engine applies the outcome to the team
//! ledger and the countdown; nothing here touches engine state directly,
//! which keeps every rule testable in isolation.

use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, PenaltyPolicy};
use crate::core::{TeamId, Tick};
use crate::perks::kind::{COMBO_BONUS, REWIND_BONUS_SECS};
use crate::perks::EffectState;
use crate::team::Roster;

/// Base points for a correct guess, before multipliers.
pub const BASE_POINTS: i64 = 1;
/// Penalty for an unshielded skip or wrong guess.
pub const MISS_PENALTY: i64 = 1;
/// Combo chain length granting the flat bonus.
const COMBO_CHAIN: u32 = 3;

/// Result of scoring a correct guess.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Points earned (base × consumed next-word × turn multiplier).
    pub points: i64,
    /// Flat combo bonus, zero unless this hit completed a chain.
    pub combo_bonus: i64,
    /// Seconds added to the countdown (rewind).
    pub time_bonus_secs: i64,
    /// Seconds removed from the countdown (consumed pause trap).
    pub time_penalty_secs: u32,
}

impl GuessOutcome {
    /// Total score delta for the team.
    #[must_use]
    pub fn total_points(&self) -> i64 {
        self.points + self.combo_bonus
    }
}

/// Score a correct guess against the guesser's effect state.
///
/// Consumes the next-word multiplier and any queued pause-trap penalty;
/// the turn multiplier and rewind window stay active.
pub fn score_correct_guess(effects: &mut EffectState, now: Tick) -> GuessOutcome {
    let points = BASE_POINTS * effects.take_next_word_multiplier() * effects.turn_multiplier_value();

    let combo_bonus = if effects.combo_active {
        effects.combo_counter += 1;
        if effects.combo_counter == COMBO_CHAIN {
            effects.combo_counter = 0;
            COMBO_BONUS
        } else {
            0
        }
    } else {
        0
    };

    let time_bonus_secs = if effects.is_rewind(now) {
        REWIND_BONUS_SECS
    } else {
        0
    };

    GuessOutcome {
        points,
        combo_bonus,
        time_bonus_secs,
        time_penalty_secs: effects.take_time_penalty(),
    }
}

/// What kind of miss occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissKind {
    Skip,
    WrongGuess,
}

/// Result of scoring a skip or wrong guess.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MissOutcome {
    /// A shield charge absorbed the miss; no penalty of any kind.
    pub shield_absorbed: bool,
    /// Penalty to subtract from the visible round score now.
    pub immediate_penalty: i64,
    /// Penalty to record as pending until the final reveal.
    pub deferred_penalty: i64,
    /// Hard-difficulty wrong guess: draw a penalty term for the guesser.
    pub inject_penalty_term: bool,
}

/// Score a skip or wrong guess.
///
/// A shield charge, if present, is consumed and suppresses both the
/// penalty and the penalty-term injection.
pub fn score_miss(effects: &mut EffectState, kind: MissKind, difficulty: Difficulty) -> MissOutcome {
    if effects.consume_shield() {
        return MissOutcome {
            shield_absorbed: true,
            ..MissOutcome::default()
        };
    }

    let (immediate, deferred) = match difficulty.penalty_policy() {
        PenaltyPolicy::None => (0, 0),
        PenaltyPolicy::Deferred => (0, MISS_PENALTY),
        PenaltyPolicy::Immediate => (MISS_PENALTY, 0),
    };

    MissOutcome {
        shield_absorbed: false,
        immediate_penalty: immediate,
        deferred_penalty: deferred,
        inject_penalty_term: kind == MissKind::WrongGuess && difficulty.injects_penalty_terms(),
    }
}

/// Per-team snapshot of the deferred-penalty reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyReveal {
    pub team: TeamId,
    /// Visible total before the reveal.
    pub before: i64,
    /// Total penalty subtracted.
    pub penalty: i64,
    /// Visible total after the reveal.
    pub after: i64,
}

/// Reveal every team's deferred penalties, once.
///
/// Idempotent: teams with nothing pending produce a zero-penalty
/// snapshot, and a second reveal finds nothing to subtract.
pub fn reveal_pending(roster: &mut Roster) -> Vec<PenaltyReveal> {
    roster
        .iter_mut()
        .map(|team| {
            let before = team.total_score();
            let penalty = team.reveal_pending();
            PenaltyReveal {
                team: team.id,
                before,
                penalty,
                after: team.total_score(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundId;

    #[test]
    fn test_plain_correct_guess() {
        let mut effects = EffectState::default();
        let outcome = score_correct_guess(&mut effects, Tick::ZERO);

        assert_eq!(outcome.points, 1);
        assert_eq!(outcome.total_points(), 1);
        assert_eq!(outcome.time_bonus_secs, 0);
        assert_eq!(outcome.time_penalty_secs, 0);
    }

    #[test]
    fn test_next_word_multiplier_consumed() {
        let mut effects = EffectState::default();
        effects.next_word_multiplier = Some(2);

        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).points, 2);
        // The following guess is unmultiplied.
        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).points, 1);
    }

    #[test]
    fn test_turn_multiplier_persists() {
        let mut effects = EffectState::default();
        effects.turn_multiplier = Some(2);

        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).points, 2);
        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).points, 2);
    }

    #[test]
    fn test_multipliers_stack() {
        let mut effects = EffectState::default();
        effects.next_word_multiplier = Some(2);
        effects.turn_multiplier = Some(2);

        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).points, 4);
        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).points, 2);
    }

    #[test]
    fn test_combo_bonus_every_third_hit() {
        let mut effects = EffectState::default();
        effects.combo_active = true;

        let bonuses: Vec<i64> = (0..7)
            .map(|_| score_correct_guess(&mut effects, Tick::ZERO).combo_bonus)
            .collect();
        assert_eq!(bonuses, vec![0, 0, COMBO_BONUS, 0, 0, COMBO_BONUS, 0]);
    }

    #[test]
    fn test_combo_inactive_counts_nothing() {
        let mut effects = EffectState::default();
        for _ in 0..5 {
            assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).combo_bonus, 0);
        }
        assert_eq!(effects.combo_counter, 0);
    }

    #[test]
    fn test_rewind_time_bonus() {
        let mut effects = EffectState::default();
        effects.rewind_until = Some(Tick::new(10));

        let inside = score_correct_guess(&mut effects, Tick::new(5));
        assert_eq!(inside.time_bonus_secs, REWIND_BONUS_SECS);

        let outside = score_correct_guess(&mut effects, Tick::new(10));
        assert_eq!(outside.time_bonus_secs, 0);
    }

    #[test]
    fn test_pause_trap_applies_on_first_hit_only() {
        let mut effects = EffectState::default();
        effects.pending_time_penalty = 5;

        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).time_penalty_secs, 5);
        assert_eq!(score_correct_guess(&mut effects, Tick::ZERO).time_penalty_secs, 0);
    }

    #[test]
    fn test_miss_policies() {
        let mut effects = EffectState::default();

        let easy = score_miss(&mut effects, MissKind::Skip, Difficulty::Easy);
        assert_eq!((easy.immediate_penalty, easy.deferred_penalty), (0, 0));

        let medium = score_miss(&mut effects, MissKind::Skip, Difficulty::Medium);
        assert_eq!((medium.immediate_penalty, medium.deferred_penalty), (0, MISS_PENALTY));

        let hard = score_miss(&mut effects, MissKind::Skip, Difficulty::Hard);
        assert_eq!((hard.immediate_penalty, hard.deferred_penalty), (MISS_PENALTY, 0));
    }

    #[test]
    fn test_penalty_term_only_on_hard_wrong_guess() {
        let mut effects = EffectState::default();

        assert!(score_miss(&mut effects, MissKind::WrongGuess, Difficulty::Hard).inject_penalty_term);
        assert!(!score_miss(&mut effects, MissKind::Skip, Difficulty::Hard).inject_penalty_term);
        assert!(
            !score_miss(&mut effects, MissKind::WrongGuess, Difficulty::Medium).inject_penalty_term
        );
    }

    #[test]
    fn test_shield_absorbs_everything() {
        let mut effects = EffectState::default();
        effects.shield_charges = 1;

        let absorbed = score_miss(&mut effects, MissKind::WrongGuess, Difficulty::Hard);
        assert!(absorbed.shield_absorbed);
        assert_eq!(absorbed.immediate_penalty, 0);
        assert_eq!(absorbed.deferred_penalty, 0);
        assert!(!absorbed.inject_penalty_term);

        // Charge is spent.
        let second = score_miss(&mut effects, MissKind::WrongGuess, Difficulty::Hard);
        assert!(!second.shield_absorbed);
    }

    #[test]
    fn test_reveal_pending_snapshots() {
        let mut roster = Roster::from_names(&["Red".to_string(), "Blue".to_string()]);
        {
            let red = roster.get_mut(TeamId::new(0)).unwrap();
            red.add_points(RoundId::Round1, 10);
            red.defer_penalty(RoundId::Round1, 3);
        }

        let reveals = reveal_pending(&mut roster);
        assert_eq!(reveals.len(), 2);
        assert_eq!(
            reveals[0],
            PenaltyReveal {
                team: TeamId::new(0),
                before: 10,
                penalty: 3,
                after: 7
            }
        );
        assert_eq!(reveals[1].penalty, 0);

        // Second reveal finds nothing pending.
        let again = reveal_pending(&mut roster);
        assert_eq!(again[0].penalty, 0);
        assert_eq!(again[0].before, 7);
    }
}
