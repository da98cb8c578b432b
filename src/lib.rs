//! # tilerun
//!
//! Authoritative rule engine for a dice race on a fixed linear track.
//!
//! A board holds a track of numbered tiles (1..=N) shared by several players.
//! Each turn one player rolls a six-sided die and advances; a handful of
//! special tiles redirect the mover, overshooting the final tile bounces the
//! mover back, and landing exactly on tile N wins the game.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `start_game` and `play_turn` take an immutable
//!    board snapshot and return a new one. They never perform I/O; a
//!    [`StateStore`] collaborator persists the result.
//!
//! 2. **Persistent data structures**: snapshots use `im` collections, so a
//!    transition shares structure with its predecessor and cloning is cheap.
//!
//! 3. **Silent no-ops**: authorization and turn-legality failures reject the
//!    call without touching state or emitting messages. Callers that want
//!    user-facing feedback use the `try_` variants, which report an
//!    [`IllegalMove`].
//!
//! 4. **Injected randomness**: the die is a [`DieSource`] seam. Production
//!    code uses the seeded [`DiceRng`]; tests script exact rolls with
//!    [`ScriptedDie`].
//!
//! ## Modules
//!
//! - `core`: identifiers, dice, player/tile/board snapshot types
//! - `rules`: the special-tile rule table and the referee (init + turn logic)
//! - `store`: collaborator seams (state store, status channel) and a driver

pub mod core;
pub mod rules;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    BoardBuilder, BoardId, BoardState, DiceRng, DiceRngState, DieSource, Player, PlayerId,
    ScriptedDie, Tile, UserId,
};

pub use crate::rules::{
    AppliedRule, IllegalMove, Messages, RedirectKind, Referee, RuleSet, TrackRule, Transition,
    START_MESSAGE,
};

pub use crate::store::{
    BoardUpdate, GameService, MemoryChannel, MemoryStore, StateStore, StatusChannel,
};
