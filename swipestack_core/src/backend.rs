// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation contract.
//!
//! The core never renders. A host wires its UI toolkit in through a
//! [`Presenter`], which owns one native surface per card and keeps those
//! surfaces in sync with the transforms the controller computes.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(now: HostTime) {
//!     // Animate: advance tweens, run completions (removal, re-arming).
//!     stack.tick(now);
//!
//!     // Evaluate: drain dirty channels into a change set.
//!     let changes = stack.evaluate();
//!
//!     // Present: create, drop, and transform native surfaces.
//!     presenter.apply(&stack, &changes);
//! }
//!
//! fn on_pointer(event: PointerEvent) -> bool {
//!     stack.handle_pointer(&event)
//! }
//! ```

use crate::source::DataSource;
use crate::stack::{StackChanges, StackController};

/// Applies stack changes to a platform-native presentation tree.
///
/// For each id in [`StackChanges::added`] the presenter renders the item at
/// the card's [`data_index`](crate::stack::CardSlot::data_index); for
/// changed cards it reads the new
/// [`transform`](crate::stack::CardSlot::transform) and applies it, for
/// example through
/// [`CardTransform::to_affine`](crate::geometry::CardTransform::to_affine).
/// Surfaces are stacked in the order of
/// [`StackController::slots`], back to front.
pub trait Presenter<S: DataSource> {
    /// Applies `changes`, reading current card state from `stack`.
    fn apply(&mut self, stack: &StackController<S>, changes: &StackChanges);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::Size;

    use crate::config::StackConfig;
    use crate::geometry::{CardTransform, StackGeometry};
    use crate::resolve::SwipeDirection;
    use crate::stack::CardId;
    use crate::time::{HostTime, Timebase};

    /// Mirrors the stack into a flat list of surfaces.
    #[derive(Default)]
    struct Surfaces {
        live: Vec<(CardId, usize, CardTransform)>,
        applied: usize,
    }

    impl Presenter<Vec<u32>> for Surfaces {
        fn apply(&mut self, stack: &StackController<Vec<u32>>, changes: &StackChanges) {
            self.applied += 1;
            self.live.retain(|(id, ..)| !changes.removed.contains(id));
            for id in &changes.added {
                let slot = stack.card(*id);
                self.live.push((*id, slot.data_index, slot.transform));
            }
            for id in changes.transforms.iter().chain(&changes.opacities) {
                if let Some(surface) = self.live.iter_mut().find(|(s, ..)| s == id) {
                    surface.2 = stack.card(*id).transform;
                }
            }
            if changes.order_changed {
                let order: Vec<CardId> = stack.slots().iter().map(|s| s.id).collect();
                self.live
                    .sort_by_key(|(id, ..)| order.iter().position(|o| o == id));
            }
        }
    }

    fn frame(stack: &mut StackController<Vec<u32>>, surfaces: &mut Surfaces, now: u64) {
        stack.tick(HostTime(now));
        let changes = stack.evaluate();
        if !changes.is_empty() {
            surfaces.apply(stack, &changes);
        }
    }

    fn assert_mirrors(stack: &StackController<Vec<u32>>, surfaces: &Surfaces) {
        assert_eq!(surfaces.live.len(), stack.slots().len(), "one surface per card");
        for ((id, data_index, transform), slot) in surfaces.live.iter().zip(stack.slots()) {
            assert_eq!(*id, slot.id, "surfaces stacked back to front");
            assert_eq!(*data_index, slot.data_index, "surface shows its item");
            assert_eq!(*transform, slot.transform, "surface transform is current");
        }
    }

    #[test]
    fn presenter_tracks_the_stack_across_a_dismissal() {
        let mut stack: StackController<Vec<u32>> =
            StackController::new(StackConfig::new(), Timebase::MILLIS);
        stack.set_geometry(StackGeometry::new(
            Size::new(1000.0, 1600.0),
            Size::new(1000.0, 1400.0),
        ));
        stack.set_source((0..5).collect());
        let mut surfaces = Surfaces::default();

        frame(&mut stack, &mut surfaces, 0);
        assert_eq!(surfaces.applied, 1, "initial cards are presented");
        assert_mirrors(&stack, &surfaces);

        assert!(stack.dismiss_top(SwipeDirection::Left), "top card is at rest");
        let mut now = 0;
        while stack.is_animating() || now == 0 {
            now += 50;
            frame(&mut stack, &mut surfaces, now);
            assert_mirrors(&stack, &surfaces);
        }
        assert_eq!(stack.current_position(), 1, "one item consumed");
        assert_eq!(surfaces.live.first().map(|s| s.1), Some(3), "new card at the bottom");

        let applied = surfaces.applied;
        frame(&mut stack, &mut surfaces, now + 1000);
        assert_eq!(surfaces.applied, applied, "idle frames change nothing");
    }
}
