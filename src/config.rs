//! Game configuration.
//!
//! Everything the engine needs to know before a game starts: the team
//! list, the selected categories, the time limit, difficulty, game mode
//! and perk pack selection. Settings are read once at `start_game` and
//! never mutated afterwards.
//!
//! `GameSettings::validate` is the precondition behind `can_start_game`:
//! it reports the first problem found, and a failing validation merely
//! blocks the transition.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::perks::PerkPack;
use crate::terms::Category;

/// Number of rounds in every game.
pub const ROUND_COUNT: usize = 4;

/// Ordered round identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundId {
    Round1,
    Round2,
    Round3,
    Round4,
}

impl RoundId {
    /// All rounds in play order.
    pub const ALL: [RoundId; ROUND_COUNT] = [
        RoundId::Round1,
        RoundId::Round2,
        RoundId::Round3,
        RoundId::Round4,
    ];

    /// Zero-based index into per-round arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            RoundId::Round1 => 0,
            RoundId::Round2 => 1,
            RoundId::Round3 => 2,
            RoundId::Round4 => 3,
        }
    }

    /// The round after this one, or `None` after the final round.
    #[must_use]
    pub const fn next(self) -> Option<RoundId> {
        match self {
            RoundId::Round1 => Some(RoundId::Round2),
            RoundId::Round2 => Some(RoundId::Round3),
            RoundId::Round3 => Some(RoundId::Round4),
            RoundId::Round4 => None,
        }
    }

    /// Whether teams may skip terms in this round.
    ///
    /// The finale forbids skipping: every term must be played out.
    #[must_use]
    pub const fn can_skip(self) -> bool {
        !matches!(self, RoundId::Round4)
    }

    /// Whether the countdown is deferred until the team's first guess
    /// event instead of starting with the turn.
    #[must_use]
    pub const fn defers_countdown(self) -> bool {
        matches!(self, RoundId::Round4)
    }

    /// Is this the last round?
    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, RoundId::Round4)
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round {}", self.index() + 1)
    }
}

/// How a skip or wrong guess is punished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyPolicy {
    /// No penalty at all.
    None,
    /// Penalty recorded immediately but hidden from the visible score
    /// until the final round ends.
    Deferred,
    /// Penalty subtracted from the visible score at once.
    Immediate,
}

/// Game difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Penalty policy for skips and wrong guesses at this difficulty.
    #[must_use]
    pub const fn penalty_policy(self) -> PenaltyPolicy {
        match self {
            Difficulty::Easy => PenaltyPolicy::None,
            Difficulty::Medium => PenaltyPolicy::Deferred,
            Difficulty::Hard => PenaltyPolicy::Immediate,
        }
    }

    /// Hard mode punishes a wrong guess with a freshly drawn penalty term
    /// on top of the score penalty.
    #[must_use]
    pub const fn injects_penalty_terms(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

/// Game mode: controls streak thresholds, perk caps and round weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Classic,
    Party,
}

impl GameMode {
    /// Correct-guess streaks that award a perk.
    #[must_use]
    pub const fn streak_thresholds(self) -> &'static [u32] {
        match self {
            GameMode::Classic => &[5, 8],
            GameMode::Party => &[3, 5, 8],
        }
    }

    /// Maximum perks one team can earn in a single turn.
    #[must_use]
    pub const fn perk_cap_per_turn(self) -> u32 {
        match self {
            GameMode::Classic => 2,
            GameMode::Party => 3,
        }
    }

    /// Weight applied to a round's score when the game ends.
    ///
    /// Party mode doubles the stakes of the back half of the game.
    #[must_use]
    pub const fn round_weight(self, round: RoundId) -> i64 {
        match (self, round) {
            (GameMode::Party, RoundId::Round3 | RoundId::Round4) => 2,
            _ => 1,
        }
    }
}

/// Perk-related settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerkSettings {
    /// Master switch. Off means no perk is ever awarded.
    pub enabled: bool,
    /// Selected perk packs. Perks are drawn only from selected packs.
    pub packs: Vec<PerkPack>,
}

impl PerkSettings {
    /// Perks fully disabled.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            packs: Vec::new(),
        }
    }

    /// All packs enabled.
    #[must_use]
    pub fn all_packs() -> Self {
        Self {
            enabled: true,
            packs: vec![PerkPack::Boosts, PerkPack::Sabotage, PerkPack::Chaos],
        }
    }
}

/// Validation failure for game settings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one team is required")]
    NoTeams,
    #[error("at least one category must be selected")]
    NoCategories,
    #[error("words per category must be positive")]
    ZeroWordCount,
    #[error("turn time limit must be positive")]
    ZeroTimeLimit,
}

/// Complete game configuration, read once at `start_game`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSettings {
    /// Team names, in turn order.
    pub team_names: Vec<String>,
    /// Selected categories with their term pools.
    pub categories: Vec<Category>,
    /// Turn length in seconds.
    pub turn_seconds: u32,
    /// How many terms to sample from each category pool.
    pub words_per_category: usize,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub perks: PerkSettings,
}

impl GameSettings {
    /// Create settings with sensible defaults for the given teams and
    /// categories.
    pub fn new(team_names: Vec<String>, categories: Vec<Category>) -> Self {
        Self {
            team_names,
            categories,
            turn_seconds: 60,
            words_per_category: 10,
            difficulty: Difficulty::Easy,
            mode: GameMode::Classic,
            perks: PerkSettings::disabled(),
        }
    }

    /// Set the turn length (builder pattern).
    #[must_use]
    pub fn with_turn_seconds(mut self, secs: u32) -> Self {
        self.turn_seconds = secs;
        self
    }

    /// Set words sampled per category (builder pattern).
    #[must_use]
    pub fn with_words_per_category(mut self, count: usize) -> Self {
        self.words_per_category = count;
        self
    }

    /// Set the difficulty (builder pattern).
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the game mode (builder pattern).
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set perk settings (builder pattern).
    #[must_use]
    pub fn with_perks(mut self, perks: PerkSettings) -> Self {
        self.perks = perks;
        self
    }

    /// Check the start-game preconditions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_names.is_empty() {
            return Err(ConfigError::NoTeams);
        }
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        if self.words_per_category == 0 {
            return Err(ConfigError::ZeroWordCount);
        }
        if self.turn_seconds == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}
