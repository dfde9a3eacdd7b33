//! Perk eligibility and selection filtering.
//!
//! Pure functions, separated from effect application so they can be
//! tested without an engine: whether a streak earns a perk at all, and
//! which perk types are legal to draw.

use crate::config::GameMode;
use crate::perks::{PerkPack, PerkType};

/// Does this streak value sit exactly on one of the mode's thresholds?
///
/// Exact match, not ">=": a streak of 6 in classic mode awards nothing,
/// the team already collected at 5.
#[must_use]
pub fn streak_hits_threshold(mode: GameMode, streak: u32) -> bool {
    mode.streak_thresholds().contains(&streak)
}

/// Full award precondition: perks on, at least one pack selected, the
/// per-turn cap unmet, and the streak on a threshold.
#[must_use]
pub fn should_award(
    enabled: bool,
    packs: &[PerkPack],
    perks_this_turn: u32,
    mode: GameMode,
    streak: u32,
) -> bool {
    enabled
        && !packs.is_empty()
        && perks_this_turn < mode.perk_cap_per_turn()
        && streak_hits_threshold(mode, streak)
}

/// Perk types legal to draw right now.
///
/// Filters to the selected packs, drops the type just awarded to this
/// team (no identical back-to-back awards), and drops skip-dependent
/// types when the round forbids skipping.
#[must_use]
pub fn legal_perk_types(
    packs: &[PerkPack],
    round_can_skip: bool,
    last_awarded: Option<PerkType>,
) -> Vec<PerkType> {
    PerkType::ALL
        .into_iter()
        .filter(|p| packs.contains(&p.pack()))
        .filter(|p| round_can_skip || !p.requires_skippable_round())
        .filter(|p| Some(*p) != last_awarded)
        .collect()
}
