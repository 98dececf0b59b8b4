// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the stack.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! controller emits while handling input, resolving swipes, and running
//! animations. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed [`TraceSink`]. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing and the tracer holds
//! no sink at all. When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`TransformRecord`] and the
//!   per-evaluation transform dump.

use alloc::boxed::Box;

use kurbo::Point;

use crate::animate::{AnimationKind, AnimationToken};
use crate::gesture::PointerId;
#[cfg(feature = "trace-rich")]
use crate::geometry::CardTransform;
use crate::resolve::SwipeOutcome;
use crate::stack::CardId;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which step of a drag is being reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// A press on the top card started a drag.
    DragStart,
    /// The dragged card moved.
    DragMove,
    /// The press ended as a tap.
    Tap,
    /// The drag was released.
    Release,
    /// The drag was cancelled or interrupted.
    Cancel,
}

/// Lifecycle step of a tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// The tween was started.
    Started,
    /// The tween reached its end.
    Finished,
    /// The tween was replaced or cancelled before finishing.
    Superseded,
}

/// How stack membership changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotChange {
    /// A card was materialized from the data source.
    Added,
    /// A card left the stack.
    Removed,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for each pointer step that affects the top card.
#[derive(Clone, Copy, Debug)]
pub struct GestureEvent {
    /// Dragged card.
    pub card: CardId,
    /// What happened.
    pub phase: GesturePhase,
    /// Pointer driving the drag.
    pub pointer: PointerId,
    /// Pointer position in container coordinates.
    pub position: Point,
    /// Event time.
    pub time: HostTime,
    /// Drag progress after the event, in `[-1, 1]`.
    pub progress: f64,
}

/// Emitted whenever a swipe is resolved.
#[derive(Clone, Copy, Debug)]
pub struct ResolveEvent {
    /// Resolved card.
    pub card: CardId,
    /// Card centre at resolution, in container coordinates.
    pub center_x: f64,
    /// Commit or reset.
    pub outcome: SwipeOutcome,
    /// Whether the swipe came from an API call rather than a pointer.
    pub programmatic: bool,
}

/// Emitted when a tween starts, finishes, or is superseded.
#[derive(Clone, Copy, Debug)]
pub struct AnimationEvent {
    /// Animated card.
    pub card: CardId,
    /// Tween token.
    pub token: AnimationToken,
    /// Purpose of the tween.
    pub kind: AnimationKind,
    /// Lifecycle step.
    pub phase: AnimationPhase,
    /// Controller time when it happened.
    pub time: HostTime,
}

/// Emitted when a card enters or leaves the stack.
#[derive(Clone, Copy, Debug)]
pub struct SlotEvent {
    /// Affected card.
    pub card: CardId,
    /// Data index of the card's item.
    pub data_index: usize,
    /// Added or removed.
    pub change: SlotChange,
    /// Controller time when it happened.
    pub time: HostTime,
}

/// Emitted at the end of every animation tick.
#[derive(Clone, Copy, Debug)]
pub struct TickSummary {
    /// Tick time.
    pub now: HostTime,
    /// Tweens still running after the tick.
    pub active: usize,
    /// Tweens that completed during the tick.
    pub completed: usize,
}

/// A card's transform after an evaluation.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct TransformRecord {
    /// Card.
    pub card: CardId,
    /// Transform handed to the presenter.
    pub transform: CardTransform,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for drag steps on the top card.
    fn on_gesture(&mut self, e: &GestureEvent) {
        _ = e;
    }

    /// Called when a swipe is resolved.
    fn on_resolve(&mut self, e: &ResolveEvent) {
        _ = e;
    }

    /// Called for tween lifecycle steps.
    fn on_animation(&mut self, e: &AnimationEvent) {
        _ = e;
    }

    /// Called when cards are added or removed.
    fn on_slot(&mut self, e: &SlotEvent) {
        _ = e;
    }

    /// Called after each animation tick.
    fn on_tick(&mut self, s: &TickSummary) {
        _ = s;
    }

    /// Called with the transforms drained by an evaluation (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_transform_changes(&mut self, now: HostTime, records: &[TransformRecord]) {
        _ = (now, records);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owning wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// [`new`](Self::new) drops the sink it is given. When **on**, each method
/// checks the inner `Option` (one branch) before dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            drop(sink);
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Detaches and returns the sink.
    #[inline]
    pub fn into_sink(self) -> Option<Box<dyn TraceSink>> {
        #[cfg(feature = "trace")]
        {
            self.sink
        }
        #[cfg(not(feature = "trace"))]
        {
            None
        }
    }

    /// Emits a [`GestureEvent`].
    #[inline]
    pub fn gesture(&mut self, e: &GestureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_gesture(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResolveEvent`].
    #[inline]
    pub fn resolve(&mut self, e: &ResolveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resolve(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AnimationEvent`].
    #[inline]
    pub fn animation(&mut self, e: &AnimationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_animation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SlotEvent`].
    #[inline]
    pub fn slot(&mut self, e: &SlotEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_slot(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TickSummary`].
    #[inline]
    pub fn tick(&mut self, s: &TickSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_tick(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits transform records (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn transform_changes(&mut self, now: HostTime, records: &[TransformRecord]) {
        if let Some(s) = &mut self.sink {
            s.on_transform_changes(now, records);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_tick(&TickSummary {
            now: HostTime(0),
            active: 0,
            completed: 0,
        });
        sink.on_resolve(&ResolveEvent {
            card: CardId(0),
            center_x: 0.0,
            outcome: SwipeOutcome::Reset,
            programmatic: false,
        });
    }

    #[test]
    fn none_tracer_is_inactive() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_active());
        tracer.slot(&SlotEvent {
            card: CardId(1),
            data_index: 0,
            change: SlotChange::Added,
            time: HostTime(0),
        });
        assert!(tracer.into_sink().is_none());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::rc::Rc;
        use core::cell::Cell;

        struct Counting(Rc<Cell<u32>>);
        impl TraceSink for Counting {
            fn on_tick(&mut self, _: &TickSummary) {
                self.0.set(self.0.get() + 1);
            }
        }

        let count = Rc::new(Cell::new(0));
        let mut tracer = Tracer::new(Box::new(Counting(count.clone())));
        assert!(tracer.is_active());
        let summary = TickSummary {
            now: HostTime(5),
            active: 1,
            completed: 0,
        };
        tracer.tick(&summary);
        tracer.tick(&summary);
        assert_eq!(count.get(), 2);
        assert!(tracer.into_sink().is_some());
    }
}
