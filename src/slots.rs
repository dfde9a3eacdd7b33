//! Slot-reward bonus mini-game.
//!
//! A gating side-phase: when a team ends its turn with banked slot
//! credits, the engine enters `SlotReward` and holds a `SlotSession`.
//! Each spin consumes one credit and resolves a 50/50 outcome with an
//! asymmetric payout (the win pays more than the loss costs). The caller
//! finishes or skips the session explicitly; remaining credits are
//! forfeited on skip.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, TeamId};

/// Points gained on a winning spin.
pub const SPIN_WIN_POINTS: i64 = 10;
/// Points lost on a losing spin.
pub const SPIN_LOSS_POINTS: i64 = 5;

/// Outcome of one spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    pub won: bool,
    /// Score delta to apply to the team's current round.
    pub delta: i64,
    /// Credits remaining after this spin.
    pub credits_left: u32,
}

/// An in-progress slot session for one team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSession {
    pub team: TeamId,
    credits: u32,
}

impl SlotSession {
    /// Open a session with the team's banked credits.
    #[must_use]
    pub fn new(team: TeamId, credits: u32) -> Self {
        Self { team, credits }
    }

    /// Credits left to spin.
    #[must_use]
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// All credits spent?
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.credits == 0
    }

    /// Consume one credit and spin. Returns `None` with no credits left.
    pub fn spin(&mut self, rng: &mut GameRng) -> Option<SpinResult> {
        if self.credits == 0 {
            return None;
        }
        self.credits -= 1;

        let won = rng.gen_bool(0.5);
        Some(SpinResult {
            won,
            delta: if won { SPIN_WIN_POINTS } else { -SPIN_LOSS_POINTS },
            credits_left: self.credits,
        })
    }
}
