//! # wordrush
//!
//! Turn-based scoring engine and perk-effect scheduler for a word-guessing
//! party game.
//!
//! ## Design Principles
//!
//! 1. **Pure Logic**: No timers, I/O or rendering. Wall time is modelled
//!    as a logical clock the caller advances once per second with
//!    `GameEngine::tick`.
//!
//! 2. **Deterministic**: Every random decision flows through a seeded
//!    `GameRng`. The same seed and the same operation sequence replay the
//!    same game.
//!
//! 3. **One Choke Point Per Transition**: A turn ends in exactly one
//!    place regardless of why it ended, so per-team cleanup can never be
//!    half-applied.
//!
//! ## Architecture
//!
//! - **Phase Machine**: `Setup -> Playing -> RoundEnd / SlotReward ->
//!   GameEnd`, four rounds over one shared term deck.
//!
//! - **Effect Ledger**: All transient perk state for a team sits in one
//!   record; time-boxed effects expire lazily against the logical clock.
//!
//! - **Action Queue**: Delayed one-shots and repeating tickers (word
//!   swaps, time bombs, notice dismissal) drain inside `tick`.
//!
//! ## Modules
//!
//! - `core`: IDs, logical clock, RNG
//! - `config`: rounds, difficulty, game mode, settings validation
//! - `terms`: categories, the term deck, penalty-term injection
//! - `team`: per-team score ledger and the roster
//! - `perks`: perk types, eligibility, effect ledger, scheduler
//! - `scoring`: pure scoring rules for guesses and misses
//! - `slots`: the slot-reward bonus mini-game
//! - `engine`: the coordinating state machine
//! - `view`: observable snapshots for the presentation layer

pub mod config;
pub mod core;
pub mod engine;
pub mod perks;
pub mod scoring;
pub mod slots;
pub mod team;
pub mod terms;
pub mod view;

// Re-export commonly used types
pub use crate::core::{ActionId, GameRng, NoticeId, TeamId, TermId, Tick};

pub use crate::config::{
    ConfigError, Difficulty, GameMode, GameSettings, PenaltyPolicy, PerkSettings, RoundId,
    ROUND_COUNT,
};

pub use crate::terms::{Category, CategoryEntry, Term, TermDeck};

pub use crate::team::{Roster, Team};

pub use crate::perks::{
    ActionKind, ActionQueue, Activation, EffectLedger, EffectState, Notice, NoticeBoard,
    NoticeKind, PerkPack, PerkTarget, PerkType, ScheduledAction,
};

pub use crate::scoring::{GuessOutcome, MissKind, MissOutcome, PenaltyReveal};

pub use crate::slots::{SlotSession, SpinResult};

pub use crate::engine::{GameEngine, GamePhase, GuessKind, GuessRecord};

pub use crate::view::{Badge, GameView, TeamScore};
