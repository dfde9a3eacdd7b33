//! Logical game clock.
//!
//! The engine runs on logical time: one `Tick` is one second, advanced by
//! `GameEngine::tick()` while a turn is playing. Every time-boxed effect
//! stores an absolute expiry `Tick`; an effect is active iff `now` is
//! strictly before its expiry. Nothing in the crate sleeps or reads wall
//! clocks, which keeps every timing rule deterministic and testable.

use serde::{Deserialize, Serialize};

/// An instant on the logical clock, in whole seconds since engine start.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Tick(pub u64);

impl Tick {
    /// The clock origin.
    pub const ZERO: Tick = Tick(0);

    /// Create a tick at the given second.
    #[must_use]
    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// The instant `secs` seconds after this one.
    #[must_use]
    pub const fn plus_secs(self, secs: u64) -> Self {
        Self(self.0 + secs)
    }

    /// Advance this tick by one second.
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{}s", self.0)
    }
}

/// Lazy-expiry test used for every time-boxed effect flag.
///
/// `None` means the effect was never armed (or already cleared); an armed
/// effect is active only while `now` is strictly before its expiry.
#[must_use]
pub fn is_active(expiry: Option<Tick>, now: Tick) -> bool {
    matches!(expiry, Some(e) if now < e)
}
