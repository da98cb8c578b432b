//! Game rules: the special-tile table and the referee.
//!
//! - `track` holds the data-driven special-tile rules evaluated against the
//!   tile a roll would reach
//! - `referee` holds the two state transitions: game initialization and
//!   single-turn resolution

pub mod referee;
pub mod track;

pub use referee::{IllegalMove, Messages, Referee, Transition, START_MESSAGE};
pub use track::{AppliedRule, RedirectKind, RuleSet, TrackRule};
