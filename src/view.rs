//! Observable snapshot state.
//!
//! The presentation layer never reads engine internals: it takes a
//! `GameView` from `GameEngine::view()` and invokes operations. The view
//! carries the phase, the perk-transformed display text of the current
//! term, the countdown, active effect badges, notices and scores.

use serde::{Deserialize, Serialize};

use crate::config::RoundId;
use crate::core::{TeamId, Tick};
use crate::engine::GamePhase;
use crate::perks::{EffectState, Notice};
use crate::terms::Term;

/// Badge shown next to the countdown for an active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    NextWordX2,
    TurnX2,
    Shield(u32),
    ComboActive,
    Frozen,
    Rewind,
    SuddenRush,
    SkipFrozen,
    Mirrored,
    Glitched,
    Translated,
    Hidden,
    SlowMotion,
}

/// One team's visible score line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub id: TeamId,
    pub name: String,
    /// Visible total (deferred penalties excluded until revealed).
    pub total: i64,
    /// Mode-weighted final score, populated once the game ends.
    pub final_score: Option<i64>,
}

/// Snapshot of everything the presentation layer renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: GamePhase,
    pub round: RoundId,
    pub countdown: u32,
    pub current_team: Option<TeamId>,
    /// Display text of the current term, transforms applied. `None`
    /// outside of play.
    pub display_term: Option<String>,
    pub badges: Vec<Badge>,
    pub notices: Vec<Notice>,
    pub scores: Vec<TeamScore>,
    /// Credits left in the slot session, or banked by the current team.
    pub slot_credits: u32,
}

/// Build the badge list for a team's active effects.
#[must_use]
pub fn badges(effects: &EffectState, hidden: bool, now: Tick) -> Vec<Badge> {
    let mut badges = Vec::new();

    if effects.next_word_multiplier.is_some() {
        badges.push(Badge::NextWordX2);
    }
    if effects.turn_multiplier.is_some() {
        badges.push(Badge::TurnX2);
    }
    if effects.shield_charges > 0 {
        badges.push(Badge::Shield(effects.shield_charges));
    }
    if effects.combo_active {
        badges.push(Badge::ComboActive);
    }
    if effects.is_frozen(now) {
        badges.push(Badge::Frozen);
    }
    if effects.is_rewind(now) {
        badges.push(Badge::Rewind);
    }
    if effects.is_sudden_rush(now) {
        badges.push(Badge::SuddenRush);
    }
    if effects.is_skip_frozen(now) {
        badges.push(Badge::SkipFrozen);
    }
    if effects.is_mirrored(now) {
        badges.push(Badge::Mirrored);
    }
    if effects.is_glitched(now) {
        badges.push(Badge::Glitched);
    }
    if effects.is_translated(now) {
        badges.push(Badge::Translated);
    }
    if hidden {
        badges.push(Badge::Hidden);
    }
    if effects.slow_motion_flash(now) {
        badges.push(Badge::SlowMotion);
    }

    badges
}

/// Render a term's display text with active transforms applied.
///
/// Hidden wins outright; otherwise the translation decoy replaces the
/// base text, then mirror and glitch stack on top of whatever is shown.
#[must_use]
pub fn display_text(term: &Term, effects: &EffectState, hidden: bool, now: Tick) -> String {
    if hidden {
        return "\u{2022} \u{2022} \u{2022}".to_string();
    }

    let mut text = if effects.is_translated(now) {
        term.translation_hint
            .clone()
            .unwrap_or_else(|| term.text.clone())
    } else {
        term.text.clone()
    };

    if effects.is_mirrored(now) {
        text = text.chars().rev().collect();
    }
    if effects.is_glitched(now) {
        text = glitch(&text);
    }

    text
}

/// Deterministic leetspeak-style corruption. No RNG: the view must be a
/// pure function of engine state.
fn glitch(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_ascii_lowercase() {
            'a' => '4',
            'e' => '3',
            'i' => '1',
            'o' => '0',
            's' => '5',
            't' => '7',
            _ => c,
        })
        .collect()
}
