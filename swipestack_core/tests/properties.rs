// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for progress and stack bookkeeping.

use proptest::prelude::*;

use swipestack_core::config::StackConfig;
use swipestack_core::geometry::{StackGeometry, compute_progress, interpolate_transform, layout_transform};
use swipestack_core::kurbo::Size;
use swipestack_core::resolve::SwipeDirection;
use swipestack_core::stack::StackController;
use swipestack_core::time::{HostTime, Timebase};

fn controller(items: usize, visible: usize) -> StackController<Vec<usize>> {
    let config = StackConfig {
        visible_stack_size: visible,
        ..StackConfig::tinder()
    };
    let mut stack = StackController::new(config, Timebase::MILLIS);
    stack.set_geometry(StackGeometry::new(
        Size::new(400.0, 700.0),
        Size::new(360.0, 600.0),
    ));
    stack.set_source((0..items).collect());
    stack
}

proptest! {
    #[test]
    fn progress_is_clamped(
        origin in -2000.0f64..2000.0,
        dx in -1.0e6f64..1.0e6,
        card in 1.0f64..2000.0,
        container in 1.0f64..2000.0,
    ) {
        let p = compute_progress(origin, dx, card, container);
        prop_assert!((-1.0..=1.0).contains(&p));
    }

    #[test]
    fn progress_is_monotonic_in_displacement(
        origin in -500.0f64..500.0,
        a in -5000.0f64..5000.0,
        b in -5000.0f64..5000.0,
        container in 1.0f64..2000.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            compute_progress(origin, lo, 300.0, container)
                <= compute_progress(origin, hi, 300.0, container)
        );
    }

    #[test]
    fn interpolation_stays_between_levels(
        depth in 0usize..4,
        progress in -1.0f64..=1.0,
    ) {
        let config = StackConfig::tinder();
        let card = Size::new(300.0, 500.0);
        let own = layout_transform(depth, 5, &config, 400.0, card, 0.0);
        let above = layout_transform(depth + 1, 5, &config, 400.0, card, 0.0);
        let t = interpolate_transform(&own, &above, progress);
        prop_assert!(t.y <= own.y && t.y >= above.y);
        prop_assert!(t.scale_x >= own.scale_x && t.scale_x <= above.scale_x);
    }

    #[test]
    fn visible_count_matches_remaining_data(
        items in 0usize..12,
        visible in 1usize..5,
        dismissals in 0usize..15,
    ) {
        let mut stack = controller(items, visible);
        let mut t = 0;
        for i in 0..dismissals {
            let direction = if i % 2 == 0 { SwipeDirection::Left } else { SwipeDirection::Right };
            let _ = stack.dismiss_top(direction);
            // Let the stack shift finish so the next dismissal is accepted.
            for _ in 0..4 {
                stack.tick(HostTime(t));
                t += 200;
            }
            let remaining = items - stack.current_position();
            prop_assert_eq!(stack.slots().len(), visible.min(remaining));
        }
        let dismissed = dismissals.min(items);
        prop_assert_eq!(stack.current_position(), dismissed);
    }

    #[test]
    fn data_indices_are_contiguous(items in 1usize..12, dismissals in 0usize..12) {
        let mut stack = controller(items, 3);
        for _ in 0..dismissals {
            let _ = stack.dismiss_top(SwipeDirection::Left);
        }
        let indices: Vec<usize> = stack.slots().iter().rev().map(|s| s.data_index).collect();
        for (offset, index) in indices.iter().enumerate() {
            prop_assert_eq!(*index, stack.current_position() + offset);
        }
    }
}
