// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callbacks from the stack to its host.
//!
//! Every method has a default, so hosts implement only what they use. All
//! calls are made synchronously from inside the controller method that
//! caused them. `position` is always
//! [`StackController::current_position`](crate::stack::StackController::current_position)
//! at the time of the call, i.e. the data index of the top card.

/// Receives stack notifications.
pub trait StackListener {
    /// A drag on the top card started.
    fn on_drag_start(&mut self, position: usize) {
        _ = position;
    }

    /// The top card moved; `progress` is in `[-1, 1]`, negative for left.
    fn on_drag_progress(&mut self, position: usize, progress: f64) {
        _ = (position, progress);
    }

    /// The drag on the top card ended (released, tapped, or cancelled).
    fn on_drag_end(&mut self, position: usize) {
        _ = position;
    }

    /// The top card was dismissed to the left.
    ///
    /// Return `true` to keep the card in the stack for now; the host then
    /// finishes with
    /// [`continue_after_swipe`](crate::stack::StackController::continue_after_swipe)
    /// or [`reset_swipe`](crate::stack::StackController::reset_swipe).
    fn on_swiped_left(&mut self, position: usize) -> bool {
        _ = position;
        false
    }

    /// The top card was dismissed to the right. See
    /// [`on_swiped_left`](Self::on_swiped_left) for the return value.
    fn on_swiped_right(&mut self, position: usize) -> bool {
        _ = position;
        false
    }

    /// The top card was tapped.
    fn on_tapped(&mut self, position: usize) {
        _ = position;
    }

    /// The last card was dismissed and the source has nothing left.
    fn on_stack_empty(&mut self) {}

    /// The host's own gesture handling (scroll views, pagers) must stop
    /// intercepting pointer events while `disallow` is `true`.
    fn request_disallow_intercept(&mut self, disallow: bool) {
        _ = disallow;
    }
}

/// A [`StackListener`] that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl StackListener for NoopListener {}
