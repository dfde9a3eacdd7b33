//! Per-team effect ledger.
//!
//! All transient perk state for one team lives in a single `EffectState`
//! record, so "does this team have any active effect" is one lookup
//! instead of a dozen map probes. Time-boxed fields store an absolute
//! expiry tick and use lazy expiry: a field is active iff `now` is before
//! the expiry, and `sweep` clears anything that has lapsed.
//!
//! Turn-end flushes everything turn-scoped. Shield charges survive (they
//! are a resource, not a turn flag) and banked slot credits are taken by
//! the engine into the bonus phase before the flush.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{is_active, TeamId, Tick};
use crate::perks::PerkType;

/// All transient perk-effect state for one team.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    // === Scalar multipliers ===
    /// Multiplier applied to the next correct guess only, then consumed.
    pub next_word_multiplier: Option<i64>,
    /// Multiplier applied to every correct guess until turn end.
    pub turn_multiplier: Option<i64>,

    // === Counted resources ===
    /// Charges absorbing the next skip/wrong-guess penalty.
    pub shield_charges: u32,
    /// Hits since combo activation (silent; bonus every third hit).
    pub combo_counter: u32,
    /// Whether combo counting is active this turn.
    pub combo_active: bool,
    /// Banked slot-machine credits for the bonus phase.
    pub slot_credits: u32,
    /// Seconds deducted on this team's first correct guess (pause trap).
    pub pending_time_penalty: u32,

    // === Time-boxed flags (active iff now < expiry) ===
    pub rewind_until: Option<Tick>,
    pub frozen_until: Option<Tick>,
    pub sudden_rush_until: Option<Tick>,
    pub skip_frozen_until: Option<Tick>,
    pub mirror_until: Option<Tick>,
    pub glitch_until: Option<Tick>,
    pub slow_motion_flash_until: Option<Tick>,
    pub translation_until: Option<Tick>,

    // === Award bookkeeping ===
    /// Last perk type awarded to this team; never drawn twice in a row.
    pub last_perk: Option<PerkType>,
    /// Perks earned in the current turn, against the per-turn cap.
    pub perks_this_turn: u32,
}

impl EffectState {
    /// Consume and return the next-word multiplier (1 when absent).
    pub fn take_next_word_multiplier(&mut self) -> i64 {
        self.next_word_multiplier.take().unwrap_or(1)
    }

    /// Turn-long multiplier without consuming it (1 when absent).
    #[must_use]
    pub fn turn_multiplier_value(&self) -> i64 {
        self.turn_multiplier.unwrap_or(1)
    }

    /// Consume one shield charge if available.
    pub fn consume_shield(&mut self) -> bool {
        if self.shield_charges > 0 {
            self.shield_charges -= 1;
            true
        } else {
            false
        }
    }

    /// Consume the queued pause-trap time penalty, in seconds.
    pub fn take_time_penalty(&mut self) -> u32 {
        std::mem::take(&mut self.pending_time_penalty)
    }

    #[must_use]
    pub fn is_frozen(&self, now: Tick) -> bool {
        is_active(self.frozen_until, now)
    }

    #[must_use]
    pub fn is_sudden_rush(&self, now: Tick) -> bool {
        is_active(self.sudden_rush_until, now)
    }

    #[must_use]
    pub fn is_rewind(&self, now: Tick) -> bool {
        is_active(self.rewind_until, now)
    }

    #[must_use]
    pub fn is_skip_frozen(&self, now: Tick) -> bool {
        is_active(self.skip_frozen_until, now)
    }

    #[must_use]
    pub fn is_mirrored(&self, now: Tick) -> bool {
        is_active(self.mirror_until, now)
    }

    #[must_use]
    pub fn is_glitched(&self, now: Tick) -> bool {
        is_active(self.glitch_until, now)
    }

    #[must_use]
    pub fn is_translated(&self, now: Tick) -> bool {
        is_active(self.translation_until, now)
    }

    #[must_use]
    pub fn slow_motion_flash(&self, now: Tick) -> bool {
        is_active(self.slow_motion_flash_until, now)
    }

    /// Clear every time-boxed field whose expiry has lapsed.
    ///
    /// Keeps "logically expired" and "actually cleared" from diverging:
    /// readers may call the `is_*` accessors freely, and the engine
    /// sweeps once per tick.
    pub fn sweep(&mut self, now: Tick) {
        for field in [
            &mut self.rewind_until,
            &mut self.frozen_until,
            &mut self.sudden_rush_until,
            &mut self.skip_frozen_until,
            &mut self.mirror_until,
            &mut self.glitch_until,
            &mut self.slow_motion_flash_until,
            &mut self.translation_until,
        ] {
            if !is_active(*field, now) {
                *field = None;
            }
        }
    }

    /// Reset the combo chain (on miss or turn end).
    pub fn reset_combo(&mut self) {
        self.combo_counter = 0;
    }

    /// Flush everything turn-scoped at turn end.
    ///
    /// Survivors: shield charges and `last_perk` (the back-to-back
    /// exclusion spans turns). Slot credits must be taken by the caller
    /// before flushing; any still here are dropped.
    pub fn flush_turn_scoped(&mut self) {
        *self = EffectState {
            shield_charges: self.shield_charges,
            last_perk: self.last_perk,
            ..EffectState::default()
        };
    }

    /// Is any effect state set at all? Used by cleanup tests.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        *self == EffectState::default()
    }
}

/// Ledger of per-team effect records, keyed by team id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EffectLedger {
    states: FxHashMap<TeamId, EffectState>,
}

impl EffectLedger {
    /// Read a team's effect state. Teams with no recorded state read as
    /// the default (all-clear) record.
    #[must_use]
    pub fn state(&self, team: TeamId) -> EffectState {
        self.states.get(&team).cloned().unwrap_or_default()
    }

    /// Borrow a team's effect state, if any is recorded.
    #[must_use]
    pub fn peek(&self, team: TeamId) -> Option<&EffectState> {
        self.states.get(&team)
    }

    /// Mutable access, creating the record on first touch.
    pub fn state_mut(&mut self, team: TeamId) -> &mut EffectState {
        self.states.entry(team).or_default()
    }

    /// Lazy-clear expired entries for one team.
    pub fn sweep(&mut self, team: TeamId, now: Tick) {
        if let Some(state) = self.states.get_mut(&team) {
            state.sweep(now);
        }
    }

    /// Flush a team's turn-scoped state at turn end.
    pub fn flush_turn(&mut self, team: TeamId) {
        if let Some(state) = self.states.get_mut(&team) {
            state.flush_turn_scoped();
        }
    }

    /// Purge every entry for a removed team.
    pub fn remove_team(&mut self, team: TeamId) {
        self.states.remove(&team);
    }

    /// Does this team have any recorded, non-default state?
    #[must_use]
    pub fn has_state(&self, team: TeamId) -> bool {
        self.states.get(&team).is_some_and(|s| !s.is_clear())
    }

    /// Drop all records (new game).
    pub fn clear(&mut self) {
        self.states.clear();
    }
}
