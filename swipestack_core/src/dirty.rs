// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Cards are keyed by their [`CardId`](crate::stack::CardId) value in an
//! [`understory_dirty`] tracker owned by the controller. All channels are
//! local: a card's transform never depends on another card's, so nothing
//! propagates.
//!
//! - [`TRANSFORM`] — position, rotation, or scale written.
//! - [`OPACITY`] — opacity written.
//! - [`TOPOLOGY`] — a card was added to or removed from the stack.
//!
//! Channels are drained by
//! [`StackController::evaluate`](crate::stack::StackController::evaluate).

use understory_dirty::Channel;

/// Position, rotation, or scale changed.
pub const TRANSFORM: Channel = Channel::new(0);

/// Opacity changed.
pub const OPACITY: Channel = Channel::new(1);

/// Stack membership or order changed.
pub const TOPOLOGY: Channel = Channel::new(2);
