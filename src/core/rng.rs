//! Dice as an injectable, deterministic random source.
//!
//! ## Key Features
//!
//! - **One seam**: every roll in the engine goes through [`DieSource`], so
//!   tests and replays substitute scripted rolls for real randomness
//! - **Deterministic**: [`DiceRng`] with the same seed produces the same
//!   sequence of rolls
//! - **Serializable**: O(1) state capture and restore via [`DiceRngState`]
//!
//! ## Concurrency
//!
//! A `DiceRng` is not shareable between threads without external locking;
//! callers must serialize rolls per board the same way they serialize board
//! writes. The engine draws exactly one roll per accepted turn.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The faces of the die. Every roll is in `1..=DIE_FACES`.
pub const DIE_FACES: u8 = 6;

/// Source of six-sided die rolls.
///
/// The referee takes `&mut impl DieSource`, which keeps the turn resolution
/// pure and lets tests inject exact rolls.
pub trait DieSource {
    /// Produce one uniform roll in `[1, 6]`.
    fn roll(&mut self) -> u8;
}

/// Deterministic production die backed by a seeded ChaCha8 stream.
///
/// Uses ChaCha8 for speed while maintaining high quality randomness.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    /// Create a new die with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DieSource for DiceRng {
    fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }
}

/// Serializable die state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of how
/// many rolls have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Die that replays a fixed script of rolls.
///
/// Intended for tests and replay verification. Panics when the script runs
/// out or contains a value outside `[1, 6]`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDie {
    rolls: VecDeque<u8>,
}

impl ScriptedDie {
    /// Create a scripted die from a sequence of rolls.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Number of rolls remaining in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DieSource for ScriptedDie {
    fn roll(&mut self) -> u8 {
        let roll = self
            .rolls
            .pop_front()
            .expect("scripted die ran out of rolls");
        assert!(
            (1..=DIE_FACES).contains(&roll),
            "scripted roll {roll} is not a die face"
        );
        roll
    }
}
