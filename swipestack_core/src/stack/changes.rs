// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental change sets for presenters.
//!
//! Every write to a card's transform marks a dirty channel (see
//! [`dirty`](crate::dirty)). [`StackController::evaluate`] drains the
//! channels into a [`StackChanges`] so a presenter only touches surfaces that
//! actually changed since the previous evaluation.

use alloc::vec::Vec;

use super::controller::StackController;
use super::slot::CardId;
use crate::dirty;
use crate::source::DataSource;

/// Cards that changed since the last [`StackController::evaluate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackChanges {
    /// Cards materialized since the last evaluation. Presenters create a
    /// surface for each, rendered from the item at its `data_index`.
    pub added: Vec<CardId>,
    /// Cards dismissed or cleared. Their surfaces can be dropped.
    pub removed: Vec<CardId>,
    /// Live cards whose position, rotation, or scale changed.
    pub transforms: Vec<CardId>,
    /// Live cards whose opacity changed.
    pub opacities: Vec<CardId>,
    /// Whether the back-to-front order changed.
    pub order_changed: bool,
}

impl StackChanges {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.transforms.is_empty()
            && self.opacities.is_empty()
            && !self.order_changed
    }

    /// Clears all lists.
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.transforms.clear();
        self.opacities.clear();
        self.order_changed = false;
    }
}

impl<S: DataSource> StackController<S> {
    /// Drains pending changes.
    pub fn evaluate(&mut self) -> StackChanges {
        let mut changes = StackChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut StackChanges) {
        changes.clear();

        let live = |id: &CardId| self.slots.iter().any(|s| s.id == *id);
        changes.transforms = self
            .dirty
            .drain(dirty::TRANSFORM)
            .deterministic()
            .run()
            .map(CardId)
            .filter(live)
            .collect();
        changes.opacities = self
            .dirty
            .drain(dirty::OPACITY)
            .deterministic()
            .run()
            .map(CardId)
            .filter(live)
            .collect();
        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.order_changed = !topology.is_empty();

        // Lifecycle: diff live cards against what the presenter has seen, so a
        // card created and dismissed between two evaluations never shows up.
        changes.removed = self
            .presented
            .iter()
            .copied()
            .filter(|id| !live(id))
            .collect();
        changes.added = self
            .slots
            .iter()
            .map(|s| s.id)
            .filter(|id| !self.presented.contains(id))
            .collect();
        self.presented.clear();
        self.presented.extend(self.slots.iter().map(|s| s.id));

        #[cfg(feature = "trace-rich")]
        {
            let records: Vec<crate::trace::TransformRecord> = changes
                .transforms
                .iter()
                .chain(changes.opacities.iter())
                .filter_map(|id| self.slot(*id))
                .map(|slot| crate::trace::TransformRecord {
                    card: slot.id,
                    transform: slot.transform,
                })
                .collect();
            self.tracer.transform_changes(self.now, &records);
        }
    }
}
