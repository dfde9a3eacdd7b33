//! Teams and the team roster.
//!
//! A team's ledger splits its score by round and keeps deferred penalties
//! in a parallel array: at medium difficulty a miss is recorded in
//! `pending_penalties` immediately but stays invisible until the final
//! round's reveal. The roster owns turn order and supports mid-game
//! removal; purging the scheduler maps for a removed team is the engine's
//! job.

use serde::{Deserialize, Serialize};

use crate::config::{GameMode, RoundId, ROUND_COUNT};
use crate::core::TeamId;

/// One team's scoring ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    round_scores: [i64; ROUND_COUNT],
    pending_penalties: [i64; ROUND_COUNT],
    /// Consecutive correct guesses since the last miss or turn start.
    pub hit_streak: u32,
    /// Number of turns this team has started, across all rounds.
    pub turn_counter: u32,
}

impl Team {
    /// Create a fresh team.
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            round_scores: [0; ROUND_COUNT],
            pending_penalties: [0; ROUND_COUNT],
            hit_streak: 0,
            turn_counter: 0,
        }
    }

    /// Score recorded for one round (pending penalties excluded).
    #[must_use]
    pub fn round_score(&self, round: RoundId) -> i64 {
        self.round_scores[round.index()]
    }

    /// Visible total: sum of round scores, pending penalties excluded.
    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.round_scores.iter().sum()
    }

    /// Sum of all deferred penalties not yet revealed.
    #[must_use]
    pub fn total_pending(&self) -> i64 {
        self.pending_penalties.iter().sum()
    }

    /// Add (or with a negative delta, subtract) points in a round.
    pub fn add_points(&mut self, round: RoundId, delta: i64) {
        self.round_scores[round.index()] += delta;
    }

    /// Record a deferred penalty against a round.
    pub fn defer_penalty(&mut self, round: RoundId, amount: i64) {
        self.pending_penalties[round.index()] += amount;
    }

    /// Subtract all pending penalties from the round scores and clear
    /// them. Returns the total revealed; zero when nothing was pending,
    /// so the reveal is idempotent.
    pub fn reveal_pending(&mut self) -> i64 {
        let mut revealed = 0;
        for i in 0..ROUND_COUNT {
            revealed += self.pending_penalties[i];
            self.round_scores[i] -= self.pending_penalties[i];
            self.pending_penalties[i] = 0;
        }
        revealed
    }

    /// Final score under the active mode's round-weighting rule.
    ///
    /// Callers reveal pending penalties first; anything still pending
    /// here is intentionally not counted.
    #[must_use]
    pub fn final_score(&self, mode: GameMode) -> i64 {
        RoundId::ALL
            .iter()
            .map(|&r| mode.round_weight(r) * self.round_scores[r.index()])
            .sum()
    }

    /// Reset everything for a new game, keeping id and name.
    pub fn reset(&mut self) {
        self.round_scores = [0; ROUND_COUNT];
        self.pending_penalties = [0; ROUND_COUNT];
        self.hit_streak = 0;
        self.turn_counter = 0;
    }
}

/// The team roster, in turn order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    teams: Vec<Team>,
    next_id: u8,
}

impl Roster {
    /// Build a roster from team names, assigning IDs in turn order.
    #[must_use]
    pub fn from_names(names: &[String]) -> Self {
        let mut roster = Roster::default();
        for name in names {
            let id = TeamId::new(roster.next_id);
            roster.next_id += 1;
            roster.teams.push(Team::new(id, name.clone()));
        }
        roster
    }

    /// Number of teams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Is the roster empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Look up a team.
    #[must_use]
    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Look up a team mutably.
    pub fn get_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    /// First team in turn order.
    #[must_use]
    pub fn first(&self) -> Option<TeamId> {
        self.teams.first().map(|t| t.id)
    }

    /// The team after `id` in turn order, wrapping around.
    ///
    /// Falls back to the first team when `id` is no longer present.
    #[must_use]
    pub fn after(&self, id: TeamId) -> Option<TeamId> {
        if self.teams.is_empty() {
            return None;
        }
        match self.teams.iter().position(|t| t.id == id) {
            Some(pos) => Some(self.teams[(pos + 1) % self.teams.len()].id),
            None => self.first(),
        }
    }

    /// Remove a team. Returns true if it was present.
    pub fn remove(&mut self, id: TeamId) -> bool {
        let before = self.teams.len();
        self.teams.retain(|t| t.id != id);
        self.teams.len() != before
    }

    /// Iterate teams in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    /// Iterate teams mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.iter_mut()
    }

    /// All team IDs in turn order.
    pub fn ids(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.teams.iter().map(|t| t.id)
    }

    /// Reset every team for a new game.
    pub fn reset_all(&mut self) {
        for team in &mut self.teams {
            team.reset();
        }
    }
}
