// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data behind the stack.
//!
//! The stack only needs to know how many items exist and whether an index is
//! valid. Turning an item into something drawable is the presenter's job; it
//! reads items back through
//! [`StackController::source`](crate::stack::StackController::source).
//!
//! Change notification is push based: after mutating the source, the host
//! calls
//! [`StackController::notify_data_changed`](crate::stack::StackController::notify_data_changed).

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Supplies the items shown as cards, in dismissal order.
pub trait DataSource {
    /// Item type handed to the presenter.
    type Item;

    /// Number of items.
    fn count(&self) -> usize;

    /// Item at `index`, or `None` if out of range.
    fn item_at(&self, index: usize) -> Option<&Self::Item>;

    /// Whether the source has no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl<T> DataSource for Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> DataSource for VecDeque<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn vec_source() {
        let v = vec!["a", "b"];
        assert_eq!(v.count(), 2);
        assert_eq!(v.item_at(1), Some(&"b"));
        assert_eq!(v.item_at(2), None);
        assert!(!DataSource::is_empty(&v));
        assert!(DataSource::is_empty(&VecDeque::<u8>::new()));
    }
}
