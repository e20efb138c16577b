//! Контроль времени хода (shot clock).
//!
//! - правила (`TimeRules`);
//! - логический таймер хода (`TurnClock`).

pub mod clock;
pub mod time_rules;

pub use clock::{TimeoutState, TurnClock};
pub use time_rules::{TimeProfile, TimeRules};
