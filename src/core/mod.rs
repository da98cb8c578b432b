//! Core engine types: identifiers, dice, players, tiles, board snapshots.
//!
//! This module contains the fundamental building blocks. The transition rules
//! themselves live in `crate::rules`; everything here is plain data plus the
//! queries the rules need.

pub mod board;
pub mod ids;
pub mod player;
pub mod rng;
pub mod tile;

pub use board::{BoardBuilder, BoardState};
pub use ids::{BoardId, PlayerId, UserId};
pub use player::Player;
pub use rng::{DiceRng, DiceRngState, DieSource, ScriptedDie};
pub use tile::Tile;
