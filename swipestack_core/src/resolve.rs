// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe resolution on release.
//!
//! A release commits only when the card's horizontal centre has crossed a
//! container edge. There is no distance fraction and no velocity term: a card
//! dropped with its centre one pixel inside the container snaps back no
//! matter how fast it was thrown.

use crate::config::SwipeDirections;

/// Horizontal direction a card leaves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
}

impl SwipeDirection {
    /// `-1.0` for left, `1.0` for right.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Result of resolving a released drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeOutcome {
    /// The card leaves in the given direction.
    Commit(SwipeDirection),
    /// The card returns to its resting transform.
    Reset,
}

impl SwipeOutcome {
    /// Whether this outcome removes the card.
    #[inline]
    #[must_use]
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Commit(_))
    }
}

/// Decides the outcome of a release.
///
/// `card_center_x` is in container coordinates, so `0` is the left edge and
/// `container_width` the right edge.
#[must_use]
pub fn resolve(
    enabled: bool,
    card_center_x: f64,
    container_width: f64,
    allowed: SwipeDirections,
) -> SwipeOutcome {
    if !enabled {
        SwipeOutcome::Reset
    } else if card_center_x < 0.0 && allowed != SwipeDirections::RightOnly {
        SwipeOutcome::Commit(SwipeDirection::Left)
    } else if card_center_x > container_width && allowed != SwipeDirections::LeftOnly {
        SwipeOutcome::Commit(SwipeDirection::Right)
    } else {
        SwipeOutcome::Reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_commit_when_centre_past_left_edge() {
        assert_eq!(
            resolve(true, -10.0, 1000.0, SwipeDirections::Both),
            SwipeOutcome::Commit(SwipeDirection::Left)
        );
    }

    #[test]
    fn left_commit_suppressed_for_right_only() {
        assert_eq!(
            resolve(true, -10.0, 1000.0, SwipeDirections::RightOnly),
            SwipeOutcome::Reset
        );
    }

    #[test]
    fn right_commit_and_suppression() {
        assert_eq!(
            resolve(true, 1010.0, 1000.0, SwipeDirections::Both),
            SwipeOutcome::Commit(SwipeDirection::Right)
        );
        assert_eq!(
            resolve(true, 1010.0, 1000.0, SwipeDirections::LeftOnly),
            SwipeOutcome::Reset
        );
    }

    #[test]
    fn edges_are_exclusive() {
        assert_eq!(resolve(true, 0.0, 1000.0, SwipeDirections::Both), SwipeOutcome::Reset);
        assert_eq!(resolve(true, 1000.0, 1000.0, SwipeDirections::Both), SwipeOutcome::Reset);
        assert_eq!(resolve(true, 500.0, 1000.0, SwipeDirections::Both), SwipeOutcome::Reset);
    }

    #[test]
    fn disabled_always_resets() {
        assert_eq!(
            resolve(false, -500.0, 1000.0, SwipeDirections::Both),
            SwipeOutcome::Reset
        );
    }

    #[test]
    fn direction_sign() {
        assert_eq!(SwipeDirection::Left.sign(), -1.0);
        assert_eq!(SwipeDirection::Right.sign(), 1.0);
        assert!(SwipeOutcome::Commit(SwipeDirection::Left).is_commit());
        assert!(!SwipeOutcome::Reset.is_commit());
    }
}
