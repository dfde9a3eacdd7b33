//! Perk effect system.
//!
//! Perks are gameplay modifiers earned through correct-guess streaks.
//! The module splits into:
//!
//! - `kind`: the closed `PerkType` variant set and its timing constants
//! - `eligibility`: pure award/selection filtering
//! - `ledger`: the per-team transient effect record
//! - `scheduler`: delayed/repeating actions and ephemeral notices
//!
//! Effect *application* lives in the engine, which owns the game state
//! the effects mutate.

pub mod eligibility;
pub mod kind;
pub mod ledger;
pub mod scheduler;

pub use eligibility::{legal_perk_types, should_award, streak_hits_threshold};
pub use kind::{Activation, PerkPack, PerkTarget, PerkType};
pub use ledger::{EffectLedger, EffectState};
pub use scheduler::{ActionKind, ActionQueue, Notice, NoticeBoard, NoticeKind, ScheduledAction};
