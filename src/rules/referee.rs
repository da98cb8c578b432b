//! The referee: game initialization and turn resolution.
//!
//! Both operations are pure transitions over an immutable [`BoardState`]
//! snapshot. A rejected call is a silent no-op in the `Option` entry points;
//! the `try_` variants report which gate failed as an [`IllegalMove`].
//!
//! The referee performs no I/O. Each accepted call yields a [`Transition`]
//! whose messages go to the status channel and whose state goes to the state
//! store, exactly once, by whoever drives the referee (see `crate::store`).

use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::core::{BoardState, DieSource, Player, PlayerId, Tile, UserId};

use super::track::RuleSet;

/// Fixed message published when a game (re)starts.
pub const START_MESSAGE: &str = "Game started!";

/// Status messages produced by one accepted operation, in publish order.
///
/// A turn emits the base roll text, plus one effect line when a rule fired,
/// so two entries fit inline.
pub type Messages = SmallVec<[String; 2]>;

/// Why a call was rejected.
///
/// The `Option` entry points collapse all of these into a silent no-op;
/// callers that need user-facing feedback use the `try_` variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// The actor does not own the board (start) or the player (turn).
    #[error("actor is not authorized to act here")]
    NotAuthorized,

    /// The game already has a winner; the board is terminal for writes.
    #[error("the game already has a winner")]
    GameOver,

    /// The turn pointer names a different player.
    #[error("it is not this player's turn")]
    NotYourTurn,
}

/// Result of an accepted operation: the next snapshot plus status messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The new board snapshot. The input snapshot is untouched.
    pub state: BoardState,

    /// Human-readable status lines, in publish order.
    pub messages: Messages,
}

/// The rule engine for one board game, parameterized by a special-tile table.
#[derive(Clone, Debug, Default)]
pub struct Referee {
    rules: RuleSet,
}

impl Referee {
    /// Referee with the classic special-tile table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Referee with a custom special-tile table.
    #[must_use]
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// The special-tile table in use.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Reset `board` to its canonical start state.
    ///
    /// Returns `None` (no state change, no messages) unless `actor` owns the
    /// board. Calling it on an in-progress or finished game re-resets it.
    ///
    /// Panics if the rule table does not fit the board's track (see
    /// [`RuleSet::fits_track`]); pairing a board with a table that can send
    /// movers off its track is a programmer error.
    #[must_use]
    pub fn start_game(&self, actor: UserId, board: &BoardState) -> Option<Transition> {
        self.try_start_game(actor, board).ok()
    }

    fn assert_fits(&self, board: &BoardState) {
        assert!(
            self.rules.fits_track(board.track_len()),
            "rule table does not fit a {}-tile track",
            board.track_len()
        );
    }

    /// [`Self::start_game`] with the rejection reason reported.
    pub fn try_start_game(
        &self,
        actor: UserId,
        board: &BoardState,
    ) -> Result<Transition, IllegalMove> {
        self.assert_fits(board);

        if actor != board.owner {
            debug!(%actor, owner = %board.owner, "start rejected: actor does not own the board");
            return Err(IllegalMove::NotAuthorized);
        }

        // The start message comes first, ahead of any state computation.
        let mut messages = Messages::new();
        messages.push(START_MESSAGE.to_string());

        let players: im::Vector<Player> = board.players().iter().map(Player::at_start).collect();
        let roster: im::HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
        let tiles: im::Vector<Tile> = board
            .tiles()
            .iter()
            .map(|tile| {
                if tile.cell == 1 {
                    tile.with_occupants(roster.clone())
                } else {
                    tile.cleared()
                }
            })
            .collect();

        let first = players
            .front()
            .expect("board roster is never empty")
            .id;

        Ok(Transition {
            state: BoardState {
                tiles,
                players,
                winner: None,
                turn: Some(first),
                owner: board.owner,
            },
            messages,
        })
    }

    /// Resolve one turn for `player`, rolling `dice` once.
    ///
    /// Returns `None` (no state change, no messages, no roll) when the call
    /// fails a gate: `actor` must own `player`, the game must have no winner,
    /// and a set turn pointer must name `player`. A board whose turn pointer
    /// was never set accepts any eligible player.
    ///
    /// Panics if `player` is not on the board, or if the rule table does not
    /// fit the board's track (see [`RuleSet::fits_track`]); callers must only
    /// pass snapshots that contain the acting player and match the table.
    #[must_use]
    pub fn play_turn(
        &self,
        actor: UserId,
        player: PlayerId,
        board: &BoardState,
        dice: &mut impl DieSource,
    ) -> Option<Transition> {
        self.try_play_turn(actor, player, board, dice).ok()
    }

    /// [`Self::play_turn`] with the rejection reason reported.
    pub fn try_play_turn(
        &self,
        actor: UserId,
        player: PlayerId,
        board: &BoardState,
        dice: &mut impl DieSource,
    ) -> Result<Transition, IllegalMove> {
        self.assert_fits(board);

        let idx = board
            .player_index(player)
            .expect("acting player must be on the board");
        let acting = &board.players()[idx];

        if actor != acting.user {
            debug!(%actor, %player, "turn rejected: actor does not own the player");
            return Err(IllegalMove::NotAuthorized);
        }
        if board.winner.is_some() {
            debug!(%player, "turn rejected: game already has a winner");
            return Err(IllegalMove::GameOver);
        }
        if let Some(turn) = board.turn {
            if turn != player {
                debug!(%player, current = %turn, "turn rejected: not this player's turn");
                return Err(IllegalMove::NotYourTurn);
            }
        }

        let track_len = board.track_len();
        let roll = dice.roll();
        debug_assert!((1..=6).contains(&roll), "die produced {roll}");

        // Target is where the roll points before effects; only the rule table
        // and the status text care about it.
        let target = acting.position + u16::from(roll);

        let mut messages = Messages::new();
        messages.push(format!(
            "{} rolled {} and went to tile {}",
            acting.name, roll, target
        ));

        let final_pos = match self.rules.apply(target, track_len) {
            Some(applied) => {
                messages.push(applied.describe(&acting.name, roll, target));
                applied.destination
            }
            None => target,
        };
        debug!(%player, roll, target, final_pos, "turn resolved");

        let winner = (final_pos == track_len).then_some(player);

        let players = board.players().update(idx, acting.moved_to(final_pos, roll));

        // No net movement leaves occupancy untouched (a bounce can land the
        // mover on the tile they started from, e.g. 27 + 6 on a 30 track).
        let tiles = if final_pos == acting.position {
            board.tiles().clone()
        } else {
            let from = usize::from(acting.position) - 1;
            let to = usize::from(final_pos) - 1;
            let mut tiles = board.tiles().clone();
            let vacated = tiles[from].without_player(player);
            tiles.set(from, vacated);
            let entered = tiles[to].with_player(player);
            tiles.set(to, entered);
            tiles
        };

        // Circular rotation over the fixed turn order. A win clears the
        // pointer instead; the board is terminal for writes.
        let next = board.players()[(idx + 1) % board.players().len()].id;
        let turn = if winner.is_some() { None } else { Some(next) };

        Ok(Transition {
            state: BoardState {
                tiles,
                players,
                winner,
                turn,
                owner: board.owner,
            },
            messages,
        })
    }
}
