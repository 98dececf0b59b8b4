// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card identity and per-card state.

use core::fmt;

use kurbo::Size;

use crate::geometry::CardTransform;

/// Identifies one materialized card.
///
/// Ids are handed out in increasing order and never reused by a controller,
/// so an id held after its card was dismissed simply stops resolving.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({})", self.0)
    }
}

/// A card currently materialized in the stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardSlot {
    /// Stable id.
    pub id: CardId,
    /// Position of the card's item in the data source.
    pub data_index: usize,
    /// Transform the card is displayed with right now.
    pub transform: CardTransform,
    /// Last stable transform, used as the anchor for drag interpolation.
    pub baseline: CardTransform,
    /// Measured, unscaled card size.
    pub size: Size,
    /// Rotation jitter picked when the card was created, in degrees.
    pub jitter: f64,
    /// Set until the card's first layout pass.
    pub is_newly_added: bool,
    /// Whether this is the interactive top card.
    pub is_topmost: bool,
}

impl CardSlot {
    pub(crate) fn new(id: CardId, data_index: usize, size: Size, jitter: f64) -> Self {
        let transform = CardTransform {
            rotation: jitter,
            ..CardTransform::IDENTITY
        };
        Self {
            id,
            data_index,
            transform,
            baseline: transform,
            size,
            jitter,
            is_newly_added: true,
            is_topmost: false,
        }
    }

    /// Horizontal centre of the card in container coordinates.
    #[inline]
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.transform.x + self.size.width / 2.0
    }
}
