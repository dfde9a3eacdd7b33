//! Core types: identifiers, the logical clock, and deterministic RNG.

pub mod clock;
pub mod ids;
pub mod rng;

pub use clock::{is_active, Tick};
pub use ids::{ActionId, NoticeId, TeamId, TermId};
pub use rng::GameRng;
