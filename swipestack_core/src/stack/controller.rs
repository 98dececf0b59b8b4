// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack controller.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::slot::{CardId, CardSlot};
use crate::animate::{
    AnimationKind, AnimationToken, Completion, CompletionLatch, Easing, StackAnimator,
    progress_targets,
};
use crate::config::{StackConfig, SwipeDirections};
use crate::dirty;
use crate::geometry::{CardTransform, StackGeometry, compute_progress, layout_transform};
use crate::gesture::{GestureContext, GestureSignal, GestureState, GestureTracker, PointerEvent};
use crate::listener::StackListener;
use crate::resolve::{SwipeDirection, SwipeOutcome};
use crate::source::DataSource;
use crate::time::{Duration, HostTime, Timebase};
use crate::trace::{
    AnimationEvent, AnimationPhase, GestureEvent, GesturePhase, ResolveEvent, SlotChange,
    SlotEvent, TickSummary, TraceSink, Tracer,
};

/// Owns the materialized cards and drives everything else.
///
/// Cards are kept back to front: index 0 is the bottom card, the last index
/// the interactive top card. New cards from the data source are inserted at
/// the bottom, so the top card always holds the lowest data index.
///
/// The controller is single threaded and never blocks. Input arrives through
/// [`handle_pointer`](Self::handle_pointer), time through
/// [`tick`](Self::tick), and data changes through
/// [`notify_data_changed`](Self::notify_data_changed). Results leave through
/// the [`StackListener`] and through [`evaluate`](Self::evaluate).
pub struct StackController<S: DataSource> {
    config: StackConfig,
    timebase: Timebase,
    geometry: StackGeometry,
    source: Option<S>,
    /// Data index of the next item to materialize.
    cursor: usize,
    pub(super) slots: Vec<CardSlot>,
    next_card_id: u32,
    tracker: GestureTracker,
    animator: StackAnimator,
    commit_latch: CompletionLatch,
    reset_latch: CompletionLatch,
    /// A commit finished but the listener kept the card.
    swipe_pending: bool,
    rng: Box<dyn RngCore>,
    listener: Option<Box<dyn StackListener>>,
    pub(super) tracer: Tracer,
    pub(super) dirty: DirtyTracker<u32>,
    /// Cards reported to the presenter by the last evaluation.
    pub(super) presented: Vec<CardId>,
    first_layout: bool,
    pub(super) now: HostTime,
}

impl<S: DataSource> fmt::Debug for StackController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackController")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("cursor", &self.cursor)
            .field("slots", &self.slots)
            .field("tracker", &self.tracker)
            .field("animator", &self.animator)
            .field("swipe_pending", &self.swipe_pending)
            .finish_non_exhaustive()
    }
}

impl<S: DataSource> StackController<S> {
    /// Creates an empty controller.
    ///
    /// Rotation jitter is drawn from a [`Pcg32`] seeded with
    /// [`StackConfig::jitter_seed`]; see [`with_rng`](Self::with_rng) to
    /// supply another generator.
    ///
    /// # Panics
    ///
    /// Panics if `config.visible_stack_size` is zero.
    #[must_use]
    pub fn new(config: StackConfig, timebase: Timebase) -> Self {
        assert!(
            config.visible_stack_size >= 1,
            "visible_stack_size must be at least 1"
        );
        Self {
            config,
            timebase,
            geometry: StackGeometry::default(),
            source: None,
            cursor: 0,
            slots: Vec::new(),
            next_card_id: 0,
            tracker: GestureTracker::new(),
            animator: StackAnimator::new(),
            commit_latch: CompletionLatch::new(),
            reset_latch: CompletionLatch::new(),
            swipe_pending: false,
            rng: Box::new(Pcg32::seed_from_u64(config.jitter_seed)),
            listener: None,
            tracer: Tracer::none(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            presented: Vec::new(),
            first_layout: true,
            now: HostTime(0),
        }
    }

    /// Replaces the rotation jitter generator.
    #[must_use]
    pub fn with_rng<R: RngCore + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // -- configuration ------------------------------------------------------

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Host-supplied geometry.
    #[must_use]
    pub const fn geometry(&self) -> StackGeometry {
        self.geometry
    }

    /// Timebase used to convert configured milliseconds to ticks.
    #[must_use]
    pub const fn timebase(&self) -> Timebase {
        self.timebase
    }

    /// Time of the last [`tick`](Self::tick).
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Sets container and default card size, then lays the stack out again.
    ///
    /// Cards still using the previous default size take the new one; sizes
    /// set with [`set_card_size`](Self::set_card_size) are kept.
    pub fn set_geometry(&mut self, geometry: StackGeometry) {
        let previous = self.geometry.card;
        self.geometry = geometry;
        for slot in &mut self.slots {
            if slot.size == previous {
                slot.size = geometry.card;
            }
        }
        self.layout_pass(false);
    }

    /// Records the measured size of one card. Returns `false` for unknown ids.
    pub fn set_card_size(&mut self, card: CardId, size: Size) -> bool {
        let Some(index) = self.index_of(card) else {
            return false;
        };
        self.slots[index].size = size;
        self.layout_pass(false);
        true
    }

    /// Changes which directions may commit a swipe. Takes effect at the next
    /// release.
    pub fn set_allowed_directions(&mut self, allowed: SwipeDirections) {
        self.config.allowed_directions = allowed;
    }

    /// Enables or disables user interaction.
    ///
    /// Disabling during a drag ends the drag and sends the card home.
    /// Programmatic swipes keep working while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        let Some(session) = self.tracker.set_enabled(enabled) else {
            return;
        };
        self.disallow_intercept(false);
        self.notify(|l, position| l.on_drag_end(position));
        self.tracer.gesture(&GestureEvent {
            card: session.card,
            phase: GesturePhase::Cancel,
            pointer: session.pointer,
            position: session.start_point + session.displacement,
            time: self.now,
            progress: 0.0,
        });
        self.settle_stack(0.0);
        self.start_reset();
    }

    /// Whether user interaction is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.tracker.is_enabled()
    }

    /// Installs the listener, returning the previous one.
    pub fn set_listener(
        &mut self,
        listener: Box<dyn StackListener>,
    ) -> Option<Box<dyn StackListener>> {
        self.listener.replace(listener)
    }

    /// Removes the listener.
    pub fn take_listener(&mut self) -> Option<Box<dyn StackListener>> {
        self.listener.take()
    }

    /// Installs a trace sink.
    pub fn set_tracer(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer = Tracer::new(sink);
    }

    /// Removes the trace sink.
    pub fn take_tracer(&mut self) -> Option<Box<dyn TraceSink>> {
        core::mem::take(&mut self.tracer).into_sink()
    }

    // -- data source --------------------------------------------------------

    /// Replaces the data source and rebuilds the stack from its first item.
    pub fn set_source(&mut self, source: S) -> Option<S> {
        let previous = self.source.replace(source);
        self.reset_stack();
        previous
    }

    /// Removes the data source, leaving the stack empty.
    pub fn take_source(&mut self) -> Option<S> {
        let previous = self.source.take();
        self.reset_stack();
        previous
    }

    /// The data source.
    #[must_use]
    pub const fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Mutable access to the data source. Call
    /// [`notify_data_changed`](Self::notify_data_changed) afterwards.
    pub const fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Tops the stack up after the data source grew.
    pub fn notify_data_changed(&mut self) {
        if self.slots.len() >= self.config.visible_stack_size {
            return;
        }
        let was_empty = self.slots.is_empty();
        if self.advance() == 0 {
            return;
        }
        self.layout_pass(false);
        if was_empty {
            self.register_top();
        }
    }

    // -- queries ------------------------------------------------------------

    /// Cards back to front.
    #[must_use]
    pub fn slots(&self) -> &[CardSlot] {
        &self.slots
    }

    /// The interactive card.
    #[must_use]
    pub fn top_card(&self) -> Option<&CardSlot> {
        self.slots.last()
    }

    /// Looks up a card.
    #[must_use]
    pub fn slot(&self, card: CardId) -> Option<&CardSlot> {
        self.slots.iter().find(|s| s.id == card)
    }

    /// Looks up a card that must still be in the stack.
    ///
    /// # Panics
    ///
    /// Panics if `card` was dismissed or cleared.
    #[must_use]
    pub fn card(&self, card: CardId) -> &CardSlot {
        match self.slot(card) {
            Some(slot) => slot,
            None => panic!("{card:?} is not in the stack"),
        }
    }

    /// Data index of the top card: items consumed so far minus cards still
    /// visible. Equals the item count once everything is dismissed.
    #[must_use]
    pub fn current_position(&self) -> usize {
        self.cursor - self.slots.len()
    }

    /// State of the drag tracker.
    #[must_use]
    pub const fn gesture_state(&self) -> GestureState {
        self.tracker.state()
    }

    /// Whether a committed card is waiting for
    /// [`continue_after_swipe`](Self::continue_after_swipe) or
    /// [`reset_swipe`](Self::reset_swipe).
    #[must_use]
    pub const fn is_swipe_pending(&self) -> bool {
        self.swipe_pending
    }

    /// Whether any card is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.active_count() > 0
    }

    /// Kind of the tween running on `card`.
    #[must_use]
    pub fn animation_of(&self, card: CardId) -> Option<AnimationKind> {
        self.animator.kind_of(card)
    }

    /// Token of the running commit animation.
    #[must_use]
    pub const fn pending_commit(&self) -> Option<AnimationToken> {
        self.commit_latch.armed()
    }

    /// Token of the running reset animation.
    #[must_use]
    pub const fn pending_reset(&self) -> Option<AnimationToken> {
        self.reset_latch.armed()
    }

    // -- input ----------------------------------------------------------------

    /// Feeds a pointer event. Returns whether the stack consumed it.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let Some(top) = self.top_index() else {
            return false;
        };
        let slot = self.slots[top];
        let cx = GestureContext {
            config: &self.config,
            timebase: self.timebase,
            container_width: self.geometry.container.width,
            card_transform: slot.transform,
            card_size: slot.size,
            card_animating: self.animator.is_animating(slot.id),
        };
        let signal = self.tracker.handle(event, &cx);
        let phase = match signal {
            GestureSignal::Ignored => return false,
            GestureSignal::Started => {
                self.refresh_baselines();
                self.disallow_intercept(true);
                self.notify(|l, position| l.on_drag_start(position));
                GesturePhase::DragStart
            }
            GestureSignal::Moved {
                transform,
                progress,
            } => {
                self.write_transform(top, transform);
                self.notify(|l, position| l.on_drag_progress(position, progress));
                self.follow_progress(progress);
                GesturePhase::DragMove
            }
            GestureSignal::Tapped { transform } => {
                self.write_transform(top, transform);
                self.follow_progress(0.0);
                self.disallow_intercept(false);
                self.notify(|l, position| l.on_drag_end(position));
                self.notify(|l, position| l.on_tapped(position));
                GesturePhase::Tap
            }
            GestureSignal::Released { center_x, outcome } => {
                self.disallow_intercept(false);
                self.notify(|l, position| l.on_drag_end(position));
                self.tracer.resolve(&ResolveEvent {
                    card: slot.id,
                    center_x,
                    outcome,
                    programmatic: false,
                });
                match outcome {
                    SwipeOutcome::Commit(direction) => {
                        self.settle_stack(1.0);
                        self.start_commit(direction);
                    }
                    SwipeOutcome::Reset => {
                        self.settle_stack(0.0);
                        self.start_reset();
                    }
                }
                GesturePhase::Release
            }
            GestureSignal::Cancelled => {
                self.disallow_intercept(false);
                self.notify(|l, position| l.on_drag_end(position));
                self.settle_stack(0.0);
                self.start_reset();
                GesturePhase::Cancel
            }
        };
        let progress = self.progress_of(top);
        self.tracer.gesture(&GestureEvent {
            card: slot.id,
            phase,
            pointer: event.pointer,
            position: event.position,
            time: event.time,
            progress,
        });
        true
    }

    // -- time -----------------------------------------------------------------

    /// Advances every animation to `now` and runs what finished.
    pub fn tick(&mut self, now: HostTime) {
        self.now = now;
        let frame = self.animator.tick(now);
        for (card, transform) in frame.updates {
            if let Some(index) = self.index_of(card) {
                self.write_transform(index, transform);
            }
        }
        let completed = frame.completions.len();
        for completion in frame.completions {
            self.on_completion(completion);
        }
        self.tracer.tick(&TickSummary {
            now,
            active: self.animator.active_count(),
            completed,
        });
    }

    /// Reports that the animation identified by `token` finished elsewhere,
    /// for hosts that run tweens on a platform animator.
    ///
    /// The card jumps to the tween's destination. Returns `false` for
    /// unknown, superseded, or already completed tokens.
    pub fn complete_animation(&mut self, token: AnimationToken) -> bool {
        let Some(completion) = self.animator.finish(token) else {
            return false;
        };
        if let Some(index) = self.index_of(completion.card) {
            self.write_transform(index, completion.transform);
        }
        self.on_completion(completion);
        true
    }

    // -- programmatic control -------------------------------------------------

    /// Animates the top card out in `direction`, as if it had been dragged
    /// past the edge.
    ///
    /// Returns `false` if the stack is empty or the top card is being
    /// dragged or animated.
    pub fn swipe_top(&mut self, direction: SwipeDirection) -> bool {
        let Some(top) = self.top_index() else {
            return false;
        };
        if !self.tracker.begin_commit() {
            return false;
        }
        let slot = self.slots[top];
        self.tracer.resolve(&ResolveEvent {
            card: slot.id,
            center_x: slot.center_x(),
            outcome: SwipeOutcome::Commit(direction),
            programmatic: true,
        });
        self.refresh_baselines();
        self.settle_stack(1.0);
        self.start_commit(direction);
        true
    }

    /// Dismisses the top card without an exit animation.
    ///
    /// The listener is notified exactly as for a dragged swipe and may keep
    /// the card. A card already kept by the listener is removed without
    /// notifying again, like [`continue_after_swipe`](Self::continue_after_swipe).
    /// Returns `false` if the stack is empty or the top card is being dragged
    /// or animated.
    pub fn dismiss_top(&mut self, direction: SwipeDirection) -> bool {
        if self.swipe_pending {
            return self.continue_after_swipe();
        }
        let Some(top) = self.top_index() else {
            return false;
        };
        if !self.tracker.begin_commit() {
            return false;
        }
        let slot = self.slots[top];
        self.tracer.resolve(&ResolveEvent {
            card: slot.id,
            center_x: slot.center_x(),
            outcome: SwipeOutcome::Commit(direction),
            programmatic: true,
        });
        self.cancel_tween(slot.id);
        self.finish_commit(direction);
        true
    }

    /// Removes a card the listener kept after its swipe, without notifying
    /// again.
    pub fn continue_after_swipe(&mut self) -> bool {
        if !self.swipe_pending {
            return false;
        }
        self.swipe_pending = false;
        self.remove_top();
        true
    }

    /// Brings a card the listener kept after its swipe back to the top of the
    /// stack. The cards below snap back at once.
    pub fn reset_swipe(&mut self) -> bool {
        if !self.swipe_pending {
            return false;
        }
        self.swipe_pending = false;
        self.tracker.begin_reset();
        for (index, target) in progress_targets(&self.slots, 0.0) {
            self.cancel_tween(self.slots[index].id);
            self.write_transform(index, target);
        }
        self.start_reset();
        true
    }

    /// Drops every card and rebuilds the stack from the first item.
    ///
    /// Does not notify [`on_stack_empty`](StackListener::on_stack_empty),
    /// even when the source is empty.
    pub fn reset_stack(&mut self) {
        if self.tracker.unregister().is_some() {
            self.disallow_intercept(false);
            self.notify(|l, position| l.on_drag_end(position));
        }
        self.animator.clear();
        for slot in core::mem::take(&mut self.slots) {
            self.dirty.remove_key(slot.id.0);
            self.trace_slot(&slot, SlotChange::Removed);
        }
        self.commit_latch.disarm();
        self.reset_latch.disarm();
        self.swipe_pending = false;
        self.cursor = 0;
        self.advance();
        self.layout_pass(false);
        self.register_top();
    }

    // -- stack maintenance ----------------------------------------------------

    /// Materializes items until the stack is full or the source runs out.
    /// Returns how many cards were added.
    fn advance(&mut self) -> usize {
        let count = self.source.as_ref().map_or(0, DataSource::count);
        let mut added = 0;
        while self.slots.len() < self.config.visible_stack_size && self.cursor < count {
            let id = CardId(self.next_card_id);
            self.next_card_id += 1;
            let jitter = self.pick_jitter();
            let slot = CardSlot::new(id, self.cursor, self.geometry.card, jitter);
            self.slots.insert(0, slot);
            self.dirty.mark(id.0, dirty::TOPOLOGY);
            self.trace_slot(&slot, SlotChange::Added);
            self.cursor += 1;
            added += 1;
        }
        added
    }

    fn pick_jitter(&mut self) -> f64 {
        let range = self.config.card_rotation_range;
        if range == 0 {
            return 0.0;
        }
        f64::from(self.rng.gen_range(0..range)) - f64::from(range / 2)
    }

    /// Recomputes every baseline from depth.
    ///
    /// New cards snap into place on the very first pass and wherever they
    /// rest invisible; otherwise they fade in. With `reorder`, existing cards
    /// animate to their new depth, otherwise they snap unless a tween owns
    /// them. A top card owned by a gesture only gets its baseline updated.
    fn layout_pass(&mut self, reorder: bool) {
        let count = self.slots.len();
        if count == 0 {
            return;
        }
        let container_width = self.geometry.container.width;
        let top_busy = !matches!(
            self.tracker.state(),
            GestureState::Idle | GestureState::Armed
        );
        let fade = self.config.animation_duration(self.timebase);
        let shift = self.config.stack_shift_duration(self.timebase);
        for depth in 0..count {
            let slot = self.slots[depth];
            let target = layout_transform(
                depth,
                count,
                &self.config,
                container_width,
                slot.size,
                slot.jitter,
            );
            let is_top = depth + 1 == count;
            {
                let s = &mut self.slots[depth];
                s.baseline = target;
                s.is_topmost = is_top;
                s.is_newly_added = false;
            }
            if slot.is_newly_added {
                if self.first_layout || target.alpha == 0.0 {
                    self.write_transform(depth, target);
                } else {
                    self.write_transform(depth, CardTransform { alpha: 0.0, ..target });
                    self.start_tween(slot.id, AnimationKind::FadeIn, target, fade, Easing::Linear);
                }
            } else if is_top && top_busy {
                continue;
            } else if reorder {
                self.start_tween(
                    slot.id,
                    AnimationKind::StackShift,
                    target,
                    shift,
                    Easing::AccelerateDecelerate,
                );
            } else if !self.animator.is_animating(slot.id) {
                self.write_transform(depth, target);
            }
        }
        self.first_layout = false;
    }

    fn register_top(&mut self) {
        match self.slots.last() {
            Some(top) => self.tracker.register(top.id),
            None => {
                self.tracker.unregister();
            }
        }
    }

    fn remove_top(&mut self) {
        let Some(slot) = self.slots.pop() else {
            return;
        };
        self.cancel_tween(slot.id);
        self.tracker.unregister();
        self.commit_latch.disarm();
        self.reset_latch.disarm();
        self.swipe_pending = false;
        self.dirty.remove_key(slot.id.0);
        self.trace_slot(&slot, SlotChange::Removed);
        if let Some(top) = self.slots.last() {
            self.dirty.mark(top.id.0, dirty::TOPOLOGY);
        }

        self.advance();
        self.layout_pass(true);
        if self.slots.is_empty() {
            if let Some(listener) = self.listener.as_deref_mut() {
                listener.on_stack_empty();
            }
        } else {
            self.register_top();
        }
    }

    /// Snaps every card below the top to the end of any tween it is running,
    /// then takes its current transform as the interpolation anchor.
    fn refresh_baselines(&mut self) {
        let Some(top) = self.top_index() else {
            return;
        };
        for index in 0..top {
            if self.cancel_tween(self.slots[index].id) {
                let baseline = self.slots[index].baseline;
                self.write_transform(index, baseline);
            } else {
                self.slots[index].baseline = self.slots[index].transform;
            }
        }
    }

    fn follow_progress(&mut self, progress: f64) {
        for (index, target) in progress_targets(&self.slots, progress) {
            self.cancel_tween(self.slots[index].id);
            self.write_transform(index, target);
        }
    }

    /// Animates the cards below the top toward `progress`.
    fn settle_stack(&mut self, progress: f64) {
        let duration = self.config.animation_duration(self.timebase);
        for (index, target) in progress_targets(&self.slots, progress) {
            self.start_tween(
                self.slots[index].id,
                AnimationKind::Settle,
                target,
                duration,
                Easing::AccelerateDecelerate,
            );
        }
    }

    fn start_commit(&mut self, direction: SwipeDirection) {
        let Some(top) = self.top_index() else {
            return;
        };
        let slot = self.slots[top];
        let sign = direction.sign();
        let to = CardTransform {
            x: slot.transform.x + sign * self.geometry.container.width,
            rotation: sign * self.config.swipe_rotation_degrees,
            alpha: 0.0,
            ..slot.transform
        };
        let duration = self.config.animation_duration(self.timebase);
        let token = self.start_tween(
            slot.id,
            AnimationKind::Commit(direction),
            to,
            duration,
            Easing::Linear,
        );
        self.commit_latch.arm(token);
    }

    fn start_reset(&mut self) {
        let Some(top) = self.top_index() else {
            return;
        };
        let slot = self.slots[top];
        let to = CardTransform {
            rotation: 0.0,
            alpha: 1.0,
            ..slot.baseline
        };
        let duration = self.config.animation_duration(self.timebase);
        let easing = Easing::Overshoot {
            tension: self.config.reset_overshoot_tension,
        };
        let token = self.start_tween(slot.id, AnimationKind::Reset, to, duration, easing);
        self.reset_latch.arm(token);
    }

    fn on_completion(&mut self, completion: Completion) {
        self.trace_animation(
            completion.card,
            completion.token,
            completion.kind,
            AnimationPhase::Finished,
        );
        match completion.kind {
            AnimationKind::Commit(direction) if self.commit_latch.fire(completion.token) => {
                self.finish_commit(direction);
            }
            AnimationKind::Reset if self.reset_latch.fire(completion.token) => {
                self.tracker.settled();
            }
            _ => {}
        }
    }

    fn finish_commit(&mut self, direction: SwipeDirection) {
        let position = self.current_position();
        let keep = self
            .listener
            .as_deref_mut()
            .is_some_and(|l| match direction {
                SwipeDirection::Left => l.on_swiped_left(position),
                SwipeDirection::Right => l.on_swiped_right(position),
            });
        if keep {
            self.swipe_pending = true;
        } else {
            self.remove_top();
        }
    }

    // -- helpers --------------------------------------------------------------

    fn top_index(&self) -> Option<usize> {
        self.slots.len().checked_sub(1)
    }

    fn index_of(&self, card: CardId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == card)
    }

    fn progress_of(&self, index: usize) -> f64 {
        let slot = &self.slots[index];
        compute_progress(
            slot.transform.x,
            0.0,
            slot.size.width,
            self.geometry.container.width,
        )
    }

    /// Writes a card transform and marks the channels that changed.
    fn write_transform(&mut self, index: usize, transform: CardTransform) {
        let slot = &mut self.slots[index];
        let old = core::mem::replace(&mut slot.transform, transform);
        let key = slot.id.0;
        let placement = CardTransform {
            alpha: old.alpha,
            ..transform
        };
        if !old.approx_eq(&placement, 0.0) {
            self.dirty.mark(key, dirty::TRANSFORM);
        }
        if old.alpha != transform.alpha {
            self.dirty.mark(key, dirty::OPACITY);
        }
    }

    fn start_tween(
        &mut self,
        card: CardId,
        kind: AnimationKind,
        to: CardTransform,
        duration: Duration,
        easing: Easing,
    ) -> AnimationToken {
        self.cancel_tween(card);
        let from = self.slot(card).map_or(to, |s| s.transform);
        let token = self.animator.start(card, kind, from, to, duration, easing);
        self.trace_animation(card, token, kind, AnimationPhase::Started);
        token
    }

    fn cancel_tween(&mut self, card: CardId) -> bool {
        match self.animator.cancel(card) {
            Some((token, kind)) => {
                self.trace_animation(card, token, kind, AnimationPhase::Superseded);
                true
            }
            None => false,
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn StackListener, usize)) {
        let position = self.current_position();
        if let Some(listener) = self.listener.as_deref_mut() {
            f(listener, position);
        }
    }

    fn disallow_intercept(&mut self, disallow: bool) {
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.request_disallow_intercept(disallow);
        }
    }

    fn trace_animation(
        &mut self,
        card: CardId,
        token: AnimationToken,
        kind: AnimationKind,
        phase: AnimationPhase,
    ) {
        self.tracer.animation(&AnimationEvent {
            card,
            token,
            kind,
            phase,
            time: self.now,
        });
    }

    fn trace_slot(&mut self, slot: &CardSlot, change: SlotChange) {
        self.tracer.slot(&SlotEvent {
            card: slot.id,
            data_index: slot.data_index,
            change,
            time: self.now,
        });
    }
}
