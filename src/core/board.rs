//! Board snapshots.
//!
//! ## BoardState
//!
//! The shared state of one game: the track, the roster in turn order, the
//! winner (absent until someone lands exactly on the final tile), the turn
//! pointer, and the owning user. Snapshots are immutable; transitions in
//! `crate::rules` produce new ones that share structure with their
//! predecessor via `im` collections.
//!
//! ## BoardBuilder
//!
//! Stand-in for external setup: produces a pre-start board (turn pointer
//! absent, everyone on tile 1) ready for `Referee::start_game`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::ids::{PlayerId, UserId};
use super::player::Player;
use super::tile::Tile;

/// Default track length of the classic board.
pub const DEFAULT_TRACK_LEN: u16 = 30;

/// Immutable snapshot of one board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Track tiles; index `i` holds cell `i + 1`.
    pub(crate) tiles: Vector<Tile>,

    /// Roster in turn order. Membership is fixed once the game starts.
    pub(crate) players: Vector<Player>,

    /// Winner, absent until a player reaches the final tile exactly.
    pub winner: Option<PlayerId>,

    /// Player entitled to act. Absent before the game starts and after a win.
    pub turn: Option<PlayerId>,

    /// User allowed to start (and restart) the game.
    pub owner: UserId,
}

impl BoardState {
    /// Number of tiles on the track (N).
    #[must_use]
    pub fn track_len(&self) -> u16 {
        self.tiles.len() as u16
    }

    /// The track tiles in cell order.
    #[must_use]
    pub fn tiles(&self) -> &Vector<Tile> {
        &self.tiles
    }

    /// The roster in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Look up a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Position of a player in the turn order.
    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// The tile at a 1-based cell.
    #[must_use]
    pub fn tile(&self, cell: u16) -> Option<&Tile> {
        if cell == 0 {
            return None;
        }
        self.tiles.get(cell as usize - 1)
    }

    /// Whether `player` may currently take a turn.
    ///
    /// True iff the turn pointer is set to `player` and there is no winner.
    /// Pure derived view for gating UI affordances; the referee re-checks
    /// legality itself.
    #[must_use]
    pub fn can_play(&self, player: PlayerId) -> bool {
        self.turn == Some(player) && self.winner.is_none()
    }

    /// Whether the occupant sets exactly mirror player positions.
    ///
    /// Diagnostic for tests and debugging; reachable states always satisfy it.
    #[must_use]
    pub fn occupancy_consistent(&self) -> bool {
        let total: usize = self.tiles.iter().map(|t| t.occupants.len()).sum();
        if total != self.players.len() {
            return false;
        }
        self.players.iter().all(|p| {
            self.tile(p.position)
                .is_some_and(|t| t.occupants.contains(&p.id))
        })
    }
}

/// Builder for a pre-start board.
///
/// External setup owns board creation; this builder plays that role for
/// embedders and tests. The result has no winner and no turn pointer, with
/// every player on tile 1.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    owner: UserId,
    track_len: u16,
    players: Vec<Player>,
}

impl BoardBuilder {
    /// Start a board owned by `owner` with the classic 30-tile track.
    #[must_use]
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            track_len: DEFAULT_TRACK_LEN,
            players: Vec::new(),
        }
    }

    /// Set the track length (number of tiles, N).
    #[must_use]
    pub fn track_len(mut self, len: u16) -> Self {
        self.track_len = len;
        self
    }

    /// Append a player to the turn order.
    #[must_use]
    pub fn player(mut self, id: PlayerId, user: UserId, name: impl Into<String>) -> Self {
        self.players.push(Player::new(id, user, name));
        self
    }

    /// Build the pre-start board.
    ///
    /// Panics on a degenerate configuration: an empty roster, a duplicate
    /// player ID, or a track shorter than 2 tiles.
    #[must_use]
    pub fn build(self) -> BoardState {
        assert!(self.track_len >= 2, "track must have at least 2 tiles");
        assert!(!self.players.is_empty(), "board must have at least 1 player");
        for (i, p) in self.players.iter().enumerate() {
            assert!(
                self.players[..i].iter().all(|q| q.id != p.id),
                "duplicate player ID {}",
                p.id
            );
        }

        let roster: im::HashSet<PlayerId> = self.players.iter().map(|p| p.id).collect();
        let tiles: Vector<Tile> = (1..=self.track_len)
            .map(|cell| {
                if cell == 1 {
                    Tile::new(cell).with_occupants(roster.clone())
                } else {
                    Tile::new(cell)
                }
            })
            .collect();

        BoardState {
            tiles,
            players: self.players.into_iter().collect(),
            winner: None,
            turn: None,
            owner: self.owner,
        }
    }
}
