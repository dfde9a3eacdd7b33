//! The closed set of perk types.
//!
//! Every perk is tagged with who it targets (the earning team or the next
//! team in turn order) and how it activates: instantly, for a fixed time
//! window, per countdown tick, or as a resource that persists until
//! consumed. The engine dispatches on the variant with one handler per
//! case; this module only describes the perks.

use serde::{Deserialize, Serialize};

/// Who a perk applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerkTarget {
    /// Benefits the team that earned it.
    SelfTeam,
    /// Harms the next team in turn order.
    NextTeam,
}

/// How a perk takes effect once applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Applies once, immediately.
    Instant,
    /// Active for a fixed window after activation.
    Duration,
    /// Acts on every countdown tick (or a repeating sub-tick) while armed.
    Ticking,
    /// Persists until an event consumes it.
    UntilConsumed,
}

/// Perk pack grouping for configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerkPack {
    /// Self-targeted boosts.
    Boosts,
    /// Timing and score attacks on the next team.
    Sabotage,
    /// Display-corruption attacks on the next team.
    Chaos,
}

/// The closed perk variant set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerkType {
    // === Self-targeted ===
    /// Next correct guess scores double. Consumed on use.
    DoubleScore,
    /// All correct guesses score double for the rest of the turn.
    TurnMultiplier,
    /// One charge absorbing the next skip or wrong-guess penalty.
    Shield,
    /// Freeze the countdown for a fixed window.
    TimeFreeze,
    /// Each correct guess inside the window adds bonus seconds.
    Rewind,
    /// Silent counter: every third hit grants a flat bonus.
    Combo,
    /// Bank one slot-machine credit for the bonus phase.
    SlotSpin,

    // === Attack-targeted (next team) ===
    /// Swap the victim's active term shortly after their turn starts.
    WordSwap,
    /// Hide the victim's term shortly after their turn starts.
    InvisibleWord,
    /// Show the victim a decoy-language rendering for a window.
    Translation,
    /// The victim cannot skip for a window.
    SkipFreeze,
    /// The victim's first term is skipped immediately, penalty-free.
    ForcedSkip,
    /// Corrupt the victim's displayed text for a window.
    Glitch,
    /// Mirror the victim's displayed text for a window.
    Mirror,
    /// Double the victim's countdown drain for a window.
    SuddenRush,
    /// Repeating ticker draining the victim's points while they play.
    TimeBomb,
    /// Fixed time penalty on the victim's first correct guess.
    PauseTrap,
    /// Immediate point transfer from the next team to the earner.
    PointSteal,
}

impl PerkType {
    /// Every perk type, in a stable order.
    pub const ALL: [PerkType; 18] = [
        PerkType::DoubleScore,
        PerkType::TurnMultiplier,
        PerkType::Shield,
        PerkType::TimeFreeze,
        PerkType::Rewind,
        PerkType::Combo,
        PerkType::SlotSpin,
        PerkType::WordSwap,
        PerkType::InvisibleWord,
        PerkType::Translation,
        PerkType::SkipFreeze,
        PerkType::ForcedSkip,
        PerkType::Glitch,
        PerkType::Mirror,
        PerkType::SuddenRush,
        PerkType::TimeBomb,
        PerkType::PauseTrap,
        PerkType::PointSteal,
    ];

    /// Who this perk applies to.
    #[must_use]
    pub const fn target(self) -> PerkTarget {
        match self {
            PerkType::DoubleScore
            | PerkType::TurnMultiplier
            | PerkType::Shield
            | PerkType::TimeFreeze
            | PerkType::Rewind
            | PerkType::Combo
            | PerkType::SlotSpin => PerkTarget::SelfTeam,
            _ => PerkTarget::NextTeam,
        }
    }

    /// Activation semantics.
    #[must_use]
    pub const fn activation(self) -> Activation {
        match self {
            PerkType::SlotSpin | PerkType::ForcedSkip | PerkType::PointSteal => Activation::Instant,
            PerkType::TimeFreeze
            | PerkType::Rewind
            | PerkType::Translation
            | PerkType::SkipFreeze
            | PerkType::Glitch
            | PerkType::Mirror
            | PerkType::WordSwap
            | PerkType::InvisibleWord => Activation::Duration,
            PerkType::SuddenRush | PerkType::TimeBomb => Activation::Ticking,
            PerkType::DoubleScore
            | PerkType::TurnMultiplier
            | PerkType::Shield
            | PerkType::Combo
            | PerkType::PauseTrap => Activation::UntilConsumed,
        }
    }

    /// Pack this perk belongs to.
    #[must_use]
    pub const fn pack(self) -> PerkPack {
        match self {
            PerkType::DoubleScore
            | PerkType::TurnMultiplier
            | PerkType::Shield
            | PerkType::TimeFreeze
            | PerkType::Rewind
            | PerkType::Combo
            | PerkType::SlotSpin => PerkPack::Boosts,
            PerkType::WordSwap
            | PerkType::SkipFreeze
            | PerkType::ForcedSkip
            | PerkType::SuddenRush
            | PerkType::TimeBomb
            | PerkType::PauseTrap
            | PerkType::PointSteal => PerkPack::Sabotage,
            PerkType::InvisibleWord | PerkType::Translation | PerkType::Glitch | PerkType::Mirror => {
                PerkPack::Chaos
            }
        }
    }

    /// Does this perk only make sense when the round allows skipping?
    ///
    /// `Shield` absorbs skip penalties, the other two manipulate skips
    /// directly; none are awarded in a no-skip round.
    #[must_use]
    pub const fn requires_skippable_round(self) -> bool {
        matches!(
            self,
            PerkType::Shield | PerkType::ForcedSkip | PerkType::SkipFreeze
        )
    }

    /// Short label for notices and badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PerkType::DoubleScore => "Double Score",
            PerkType::TurnMultiplier => "Turn Multiplier",
            PerkType::Shield => "Shield",
            PerkType::TimeFreeze => "Time Freeze",
            PerkType::Rewind => "Rewind",
            PerkType::Combo => "Combo",
            PerkType::SlotSpin => "Slot Spin",
            PerkType::WordSwap => "Word Swap",
            PerkType::InvisibleWord => "Invisible Word",
            PerkType::Translation => "Lost in Translation",
            PerkType::SkipFreeze => "Skip Freeze",
            PerkType::ForcedSkip => "Forced Skip",
            PerkType::Glitch => "Glitch",
            PerkType::Mirror => "Mirror",
            PerkType::SuddenRush => "Sudden Rush",
            PerkType::TimeBomb => "Time Bomb",
            PerkType::PauseTrap => "Pause Trap",
            PerkType::PointSteal => "Point Steal",
        }
    }
}

impl std::fmt::Display for PerkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Effect timing constants, in seconds on the logical clock.

/// Countdown freeze window.
pub const FREEZE_SECS: u64 = 8;
/// Rewind window.
pub const REWIND_SECS: u64 = 10;
/// Seconds added per correct guess while rewind is active.
pub const REWIND_BONUS_SECS: i64 = 3;
/// Sudden-rush double-drain window.
pub const SUDDEN_RUSH_SECS: u64 = 10;
/// Skip-freeze window.
pub const SKIP_FREEZE_SECS: u64 = 10;
/// Mirror-display window.
pub const MIRROR_SECS: u64 = 10;
/// Glitch-display window.
pub const GLITCH_SECS: u64 = 8;
/// Decoy-translation window.
pub const TRANSLATION_SECS: u64 = 7;
/// Delay before a word swap fires.
pub const WORD_SWAP_DELAY_SECS: u64 = 3;
/// Delay before an invisible word hides.
pub const INVISIBLE_DELAY_SECS: u64 = 2;
/// Interval between time-bomb drains.
pub const TIME_BOMB_INTERVAL_SECS: u64 = 3;
/// Points drained per time-bomb fire.
pub const TIME_BOMB_DRAIN: i64 = 1;
/// Time penalty charged by a pause trap, in seconds.
pub const PAUSE_TRAP_SECS: u32 = 5;
/// Points transferred by a point steal.
pub const POINT_STEAL_AMOUNT: i64 = 2;
/// Flat bonus granted on every third combo hit.
pub const COMBO_BONUS: i64 = 2;
/// Slow-motion flash raised alongside a time freeze.
pub const SLOW_MOTION_FLASH_SECS: u64 = 2;
/// Notices dismiss themselves after this window.
pub const NOTICE_SECS: u64 = 4;
