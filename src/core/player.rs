//! Player records.
//!
//! A player is a pawn on one board, owned by a user. The record is a value
//! type: turn resolution produces an updated copy via structural update and
//! leaves the prior snapshot intact.

use serde::{Deserialize, Serialize};

use super::ids::{PlayerId, UserId};

/// A player on a board.
///
/// Invariant: `position` is within `[1, N]` for a track of N tiles.
/// `last_roll` is 0 before the player's first roll and after a game start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Identity of this player on the board.
    pub id: PlayerId,

    /// The user allowed to act for this player.
    pub user: UserId,

    /// Display name used in status messages.
    pub name: String,

    /// Current tile, 1-based ordinal on the track.
    pub position: u16,

    /// Value of the most recent roll, 0 if none this game.
    pub last_roll: u8,
}

impl Player {
    /// Create a player at the start tile with no roll taken.
    pub fn new(id: PlayerId, user: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            user,
            name: name.into(),
            position: 1,
            last_roll: 0,
        }
    }

    /// Copy of this player moved to `position` after rolling `roll`.
    #[must_use]
    pub fn moved_to(&self, position: u16, roll: u8) -> Self {
        Self {
            position,
            last_roll: roll,
            ..self.clone()
        }
    }

    /// Copy of this player reset to the canonical start state.
    #[must_use]
    pub fn at_start(&self) -> Self {
        Self {
            position: 1,
            last_roll: 0,
            ..self.clone()
        }
    }
}
