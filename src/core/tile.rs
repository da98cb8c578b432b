//! Tiles and their occupant sets.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use super::ids::PlayerId;

/// One tile on the track.
///
/// Invariant: across a board the occupant sets partition the roster. Every
/// player occupies exactly the tile matching their position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// 1-based ordinal on the track.
    pub cell: u16,

    /// Players currently standing on this tile.
    pub occupants: ImHashSet<PlayerId>,
}

impl Tile {
    /// Create an empty tile at the given cell.
    #[must_use]
    pub fn new(cell: u16) -> Self {
        Self {
            cell,
            occupants: ImHashSet::new(),
        }
    }

    /// Copy of this tile with `player` added to the occupants.
    #[must_use]
    pub fn with_player(&self, player: PlayerId) -> Self {
        Self {
            cell: self.cell,
            occupants: self.occupants.update(player),
        }
    }

    /// Copy of this tile with `player` removed from the occupants.
    #[must_use]
    pub fn without_player(&self, player: PlayerId) -> Self {
        Self {
            cell: self.cell,
            occupants: self.occupants.without(&player),
        }
    }

    /// Copy of this tile with the occupant set replaced wholesale.
    #[must_use]
    pub fn with_occupants(&self, occupants: ImHashSet<PlayerId>) -> Self {
        Self {
            cell: self.cell,
            occupants,
        }
    }

    /// Copy of this tile with no occupants.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::new(self.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_and_without_player() {
        let tile = Tile::new(3);
        let p = PlayerId::new(1);

        let occupied = tile.with_player(p);
        assert!(occupied.occupants.contains(&p));
        assert!(tile.occupants.is_empty()); // prior snapshot untouched

        let empty = occupied.without_player(p);
        assert!(empty.occupants.is_empty());
        assert_eq!(empty.cell, 3);
    }

    #[test]
    fn test_with_player_is_idempotent() {
        let tile = Tile::new(1)
            .with_player(PlayerId::new(1))
            .with_player(PlayerId::new(1));
        assert_eq!(tile.occupants.len(), 1);
    }

    #[test]
    fn test_cleared() {
        let tile = Tile::new(5)
            .with_player(PlayerId::new(1))
            .with_player(PlayerId::new(2));
        let cleared = tile.cleared();

        assert_eq!(cleared.cell, 5);
        assert!(cleared.occupants.is_empty());
    }
}
