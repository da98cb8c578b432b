//! Collaborator seams: persistence and status broadcast.
//!
//! The referee is pure; something has to hand its output to the outside
//! world. [`StateStore`] and [`StatusChannel`] are those seams, and
//! [`GameService`] is a thin driver that applies a referee outcome to them:
//! per accepted call it publishes every status line and saves exactly once.
//!
//! The driver never reads the store mid-computation; it is handed a full
//! snapshot as an argument. Serializing concurrent writes per board (last
//! write wins, optimistic rejection, a mutex) is the store's job.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BoardId, BoardState, DiceRng, Player, PlayerId, Tile, UserId};
use crate::rules::{Referee, Transition};

/// Accepts the computed state for persistence/broadcast.
pub trait StateStore {
    /// Persist the update for `board`. Called exactly once per accepted
    /// `start_game`/`play_turn`.
    fn save(&mut self, board: BoardId, update: &BoardUpdate);
}

/// Receives human-readable status messages keyed by board.
pub trait StatusChannel {
    /// Publish one status line for `board`.
    fn publish(&mut self, board: BoardId, message: &str);
}

/// The payload a transition persists: winner, turn pointer, full rosters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    /// Winner, if the transition produced one.
    pub winner: Option<PlayerId>,
    /// Turn pointer after rotation (absent once the game is won).
    pub turn: Option<PlayerId>,
    /// Full player list.
    pub players: im::Vector<Player>,
    /// Full tile list.
    pub tiles: im::Vector<Tile>,
}

impl From<&BoardState> for BoardUpdate {
    fn from(state: &BoardState) -> Self {
        Self {
            winner: state.winner,
            turn: state.turn,
            players: state.players().clone(),
            tiles: state.tiles().clone(),
        }
    }
}

/// Driver wiring a referee to a store and a status channel.
///
/// Owns the production die, so all rolls for boards served by this driver
/// come from one serialized stream.
#[derive(Debug)]
pub struct GameService<S, C> {
    referee: Referee,
    dice: DiceRng,
    store: S,
    status: C,
}

impl<S: StateStore, C: StatusChannel> GameService<S, C> {
    /// Service with the classic rules and a die seeded with `seed`.
    pub fn new(seed: u64, store: S, status: C) -> Self {
        Self {
            referee: Referee::new(),
            dice: DiceRng::new(seed),
            store,
            status,
        }
    }

    /// Service with explicit referee and die.
    pub fn with_parts(referee: Referee, dice: DiceRng, store: S, status: C) -> Self {
        Self {
            referee,
            dice,
            store,
            status,
        }
    }

    /// The referee in use.
    pub fn referee(&self) -> &Referee {
        &self.referee
    }

    /// Access the store (e.g. to read back persisted updates in tests).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the status channel.
    pub fn status(&self) -> &C {
        &self.status
    }

    /// Start (or restart) the game on `snapshot`.
    ///
    /// Returns the new snapshot when accepted; `None` means the call was a
    /// no-op and nothing was published or saved.
    pub fn start_game(
        &mut self,
        board: BoardId,
        actor: UserId,
        snapshot: &BoardState,
    ) -> Option<BoardState> {
        let transition = self.referee.start_game(actor, snapshot)?;
        Some(self.commit(board, transition))
    }

    /// Resolve one turn for `player` on `snapshot`.
    ///
    /// Returns the new snapshot when accepted; `None` means the call was a
    /// no-op and nothing was published, saved, or rolled.
    pub fn play_turn(
        &mut self,
        board: BoardId,
        actor: UserId,
        player: PlayerId,
        snapshot: &BoardState,
    ) -> Option<BoardState> {
        let transition = self
            .referee
            .play_turn(actor, player, snapshot, &mut self.dice)?;
        Some(self.commit(board, transition))
    }

    fn commit(&mut self, board: BoardId, transition: Transition) -> BoardState {
        for message in &transition.messages {
            self.status.publish(board, message);
        }
        self.store.save(board, &BoardUpdate::from(&transition.state));
        debug!(%board, messages = transition.messages.len(), "transition committed");
        transition.state
    }
}

/// In-memory store keeping the latest update per board.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    boards: FxHashMap<BoardId, BoardUpdate>,
    saves: u64,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest update saved for `board`, if any.
    #[must_use]
    pub fn latest(&self, board: BoardId) -> Option<&BoardUpdate> {
        self.boards.get(&board)
    }

    /// Total number of saves accepted.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, board: BoardId, update: &BoardUpdate) {
        self.boards.insert(board, update.clone());
        self.saves += 1;
    }
}

/// In-memory channel recording every published message in order.
#[derive(Clone, Debug, Default)]
pub struct MemoryChannel {
    messages: Vec<(BoardId, String)>,
}

impl MemoryChannel {
    /// Empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(board, message)` published so far, in order.
    #[must_use]
    pub fn messages(&self) -> &[(BoardId, String)] {
        &self.messages
    }
}

impl StatusChannel for MemoryChannel {
    fn publish(&mut self, board: BoardId, message: &str) {
        self.messages.push((board, message.to_string()));
    }
}
