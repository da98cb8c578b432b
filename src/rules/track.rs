//! Special-tile rules.
//!
//! Rules are plain data evaluated against the tile a roll would reach (the
//! *target*), before any effect is applied. Evaluation is first-match in
//! table order and single-pass: a redirect destination is never re-examined,
//! so a redirect cannot chain into another rule. That order is part of the
//! contract: with the standard table, a target of 27 on a 25-tile track is
//! a rest redirect, not an overshoot, because the redirect sits earlier in
//! the table.

use serde::{Deserialize, Serialize};

use crate::core::rng::DIE_FACES;

/// Flavor of a fixed-tile redirect, used to pick the status wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectKind {
    /// Superman carries the mover forward.
    Superman,
    /// A banana peel drops the mover back.
    Banana,
    /// The mover goes back to the start tile to rest.
    Rest,
}

/// One entry in the special-tile rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackRule {
    /// Reaching exactly `on` sends the mover to `to` instead.
    Redirect { on: u16, to: u16, kind: RedirectKind },

    /// Overshooting the final tile bounces the mover back by the excess:
    /// a target of `N + k` lands on `N - k`.
    BouncePastEnd,
}

impl TrackRule {
    /// Does this rule fire for `target` on a track of `track_len` tiles?
    #[must_use]
    pub fn applies(&self, target: u16, track_len: u16) -> bool {
        match *self {
            TrackRule::Redirect { on, .. } => target == on,
            TrackRule::BouncePastEnd => target > track_len,
        }
    }

    /// Tile the mover ends on when this rule fires.
    #[must_use]
    pub fn destination(&self, target: u16, track_len: u16) -> u16 {
        match *self {
            TrackRule::Redirect { to, .. } => to,
            // Saturates instead of underflowing when the excess exceeds the
            // track; `RuleSet::fits_track` rejects such tables before play.
            TrackRule::BouncePastEnd => track_len.saturating_sub(target - track_len),
        }
    }
}

/// A rule that fired for a particular target, plus where it sends the mover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedRule {
    /// The table entry that matched.
    pub rule: TrackRule,
    /// Resulting tile.
    pub destination: u16,
}

impl AppliedRule {
    /// Status text for this effect, in the voice the board speaks with.
    ///
    /// `target` is the pre-effect tile the roll reached.
    #[must_use]
    pub fn describe(&self, name: &str, roll: u8, target: u16) -> String {
        let dest = self.destination;
        match self.rule {
            TrackRule::Redirect {
                kind: RedirectKind::Superman,
                ..
            } => format!(
                "{name} rolled {roll} and went to tile {target}. \
                 Superman just used his powers! Fly 3 steps ahead to {dest}!"
            ),
            TrackRule::Redirect {
                kind: RedirectKind::Banana,
                ..
            } => format!(
                "{name} rolled {roll} and went to tile {target}. \
                 Ouch! Who left that banana there?! Slip back 3 steps to {dest}!"
            ),
            TrackRule::Redirect {
                kind: RedirectKind::Rest,
                ..
            } => format!(
                "{name} rolled {roll} and went to tile {target}. \
                 Partied too much last night? need rest? go back to start!"
            ),
            TrackRule::BouncePastEnd => {
                // dest = N - (target - N), so the excess past the end is
                // half the gap between target and destination
                let excess = (target - dest) / 2;
                format!(
                    "{name} rolled {roll} and went to tile {target}. \
                     Oops, that's too far, you need to take {excess} steps back to {dest}!"
                )
            }
        }
    }
}

/// Ordered special-tile rule table, evaluated first-match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<TrackRule>,
}

impl RuleSet {
    /// The classic table: Superman on 5, banana on 13, rest on 27, and the
    /// past-the-end bounce.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rules: vec![
                TrackRule::Redirect {
                    on: 5,
                    to: 8,
                    kind: RedirectKind::Superman,
                },
                TrackRule::Redirect {
                    on: 13,
                    to: 10,
                    kind: RedirectKind::Banana,
                },
                TrackRule::Redirect {
                    on: 27,
                    to: 1,
                    kind: RedirectKind::Rest,
                },
                TrackRule::BouncePastEnd,
            ],
        }
    }

    /// A table with no rules; every roll lands where it points.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule at the end of the table.
    #[must_use]
    pub fn with_rule(mut self, rule: TrackRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The table entries in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[TrackRule] {
        &self.rules
    }

    /// Can this table keep every landing on a track of `track_len` tiles?
    ///
    /// Checks every target a die roll can reach (positions up to
    /// `track_len - 1` plus a roll of 1..=6) and verifies the resulting
    /// tile exists. The standard table needs at least 10 tiles: the banana
    /// destination is tile 10. A table without [`TrackRule::BouncePastEnd`]
    /// never fits, since a plain overshoot would land past the end.
    ///
    /// The referee asserts this before accepting a board.
    #[must_use]
    pub fn fits_track(&self, track_len: u16) -> bool {
        if track_len < 2 {
            return false;
        }
        let max_target = track_len - 1 + u16::from(DIE_FACES);
        (2..=max_target).all(|target| {
            let landing = self
                .apply(target, track_len)
                .map_or(target, |applied| applied.destination);
            (1..=track_len).contains(&landing)
        })
    }

    /// First rule that fires for `target`, with its destination.
    ///
    /// Returns `None` when no rule fires and the mover lands on `target`.
    #[must_use]
    pub fn apply(&self, target: u16, track_len: u16) -> Option<AppliedRule> {
        self.rules
            .iter()
            .find(|rule| rule.applies(target, track_len))
            .map(|rule| AppliedRule {
                rule: *rule,
                destination: rule.destination(target, track_len),
            })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
