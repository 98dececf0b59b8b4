// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer drag tracking for the top card.
//!
//! [`GestureTracker`] is a small state machine:
//!
//! ```text
//!   Idle ──register/enable──► Armed ──down on card──► Dragging
//!    ▲                          ▲                       │
//!    │                          │ tap                   │ up / cancel / disable
//!    │                          └───────────────────────┤
//!    │                                                  ▼
//!    └──────── unregister ─────── Committing ◄─── resolve ───► Resetting
//!                                                                 │
//!                           Armed ◄──────── settled ──────────────┘
//! ```
//!
//! The tracker never touches cards itself. It consumes [`PointerEvent`]s plus
//! a [`GestureContext`] snapshot of the top card and reports what happened as
//! a [`GestureSignal`]; the
//! [`StackController`](crate::stack::StackController) applies the result.

use kurbo::{Point, Size, Vec2};

use crate::config::StackConfig;
use crate::geometry::{CardTransform, alpha_for_drag, compute_progress, rotation_for_drag};
use crate::resolve::{SwipeOutcome, resolve};
use crate::stack::CardId;
use crate::time::{HostTime, Timebase};

/// Identifies a pointer across one press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// What a pointer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pressed.
    Down,
    /// Moved while pressed.
    Move,
    /// Released.
    Up,
    /// Taken away by the platform (e.g. a parent claimed the gesture).
    Cancel,
}

/// A pointer event in container coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer the event belongs to.
    pub pointer: PointerId,
    /// What happened.
    pub phase: PointerPhase,
    /// Position in container coordinates.
    pub position: Point,
    /// When it happened.
    pub time: HostTime,
}

impl PointerEvent {
    /// Creates a pointer event.
    #[must_use]
    pub const fn new(pointer: PointerId, phase: PointerPhase, position: Point, time: HostTime) -> Self {
        Self {
            pointer,
            phase,
            position,
            time,
        }
    }
}

/// Tracker state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No card registered, or interaction disabled.
    #[default]
    Idle,
    /// A card is registered and accepts a press.
    Armed,
    /// A pointer is dragging the registered card.
    Dragging,
    /// The registered card is leaving; input is ignored.
    Committing,
    /// The registered card is returning home; input is ignored.
    Resetting,
}

/// A pointer pressed on the top card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Card being dragged.
    pub card: CardId,
    /// Pointer doing the dragging.
    pub pointer: PointerId,
    /// Where the press started.
    pub start_point: Point,
    /// When the press started.
    pub start_time: HostTime,
    /// Pointer travel since the press.
    pub displacement: Vec2,
    /// The card's transform when the press started.
    pub initial_transform: CardTransform,
}

/// Snapshot of what the tracker needs to know about the top card.
#[derive(Clone, Copy, Debug)]
pub struct GestureContext<'a> {
    /// Stack configuration.
    pub config: &'a StackConfig,
    /// Converts tap timeout to ticks.
    pub timebase: Timebase,
    /// Container width in pixels.
    pub container_width: f64,
    /// Current transform of the registered card.
    pub card_transform: CardTransform,
    /// Measured size of the registered card.
    pub card_size: Size,
    /// Whether the registered card is still tweening into place. A card in
    /// motion does not accept a press.
    pub card_animating: bool,
}

/// Result of feeding one event to the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSignal {
    /// The event was not for the tracker.
    Ignored,
    /// A drag began. The host's own gesture handling must stop intercepting.
    Started,
    /// The dragged card moved.
    Moved {
        /// New transform of the dragged card.
        transform: CardTransform,
        /// Normalized drag progress.
        progress: f64,
    },
    /// The press ended without meaningful travel. The card goes back to
    /// `transform` and no swipe is resolved.
    Tapped {
        /// Transform the card had when pressed.
        transform: CardTransform,
    },
    /// The drag ended and was resolved.
    Released {
        /// Card centre at release, in container coordinates.
        center_x: f64,
        /// Commit or reset.
        outcome: SwipeOutcome,
    },
    /// The drag was taken away before release and resets.
    Cancelled,
}

/// Tracks the single pointer allowed to drag the top card.
#[derive(Clone, Copy, Debug)]
pub struct GestureTracker {
    state: GestureState,
    registered: Option<CardId>,
    enabled: bool,
    session: Option<DragSession>,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    /// Creates an enabled tracker with no card.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GestureState::Idle,
            registered: None,
            enabled: true,
            session: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Card accepting input, if any.
    #[must_use]
    pub const fn registered(&self) -> Option<CardId> {
        self.registered
    }

    /// Whether interaction is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The running drag, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Makes `card` the interactive card and arms it.
    pub fn register(&mut self, card: CardId) {
        self.registered = Some(card);
        self.session = None;
        self.state = if self.enabled {
            GestureState::Armed
        } else {
            GestureState::Idle
        };
    }

    /// Drops the interactive card and any drag on it.
    pub fn unregister(&mut self) -> Option<DragSession> {
        self.registered = None;
        self.state = GestureState::Idle;
        self.session.take()
    }

    /// Enables or disables interaction.
    ///
    /// Disabling during a drag forces the drag into
    /// [`Resetting`](GestureState::Resetting) and returns the dropped
    /// session; any further events from that pointer are ignored.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<DragSession> {
        self.enabled = enabled;
        match (enabled, self.state) {
            (false, GestureState::Dragging) => {
                self.state = GestureState::Resetting;
                self.session.take()
            }
            (false, GestureState::Armed) => {
                self.state = GestureState::Idle;
                None
            }
            (true, GestureState::Idle) if self.registered.is_some() => {
                self.state = GestureState::Armed;
                None
            }
            _ => None,
        }
    }

    /// Feeds one pointer event.
    pub fn handle(&mut self, event: &PointerEvent, cx: &GestureContext<'_>) -> GestureSignal {
        match event.phase {
            PointerPhase::Down => self.on_down(event, cx),
            PointerPhase::Move => self.on_move(event, cx),
            PointerPhase::Up => self.on_up(event, cx),
            PointerPhase::Cancel => self.on_cancel(event),
        }
    }

    fn tracked(&self, pointer: PointerId) -> Option<DragSession> {
        match (self.state, self.session) {
            (GestureState::Dragging, Some(session)) if session.pointer == pointer => Some(session),
            _ => None,
        }
    }

    fn on_down(&mut self, event: &PointerEvent, cx: &GestureContext<'_>) -> GestureSignal {
        let Some(card) = self.registered else {
            return GestureSignal::Ignored;
        };
        if self.state != GestureState::Armed || !self.enabled || cx.card_animating {
            return GestureSignal::Ignored;
        }
        if !cx
            .card_transform
            .layout_rect(cx.card_size)
            .contains(event.position)
        {
            return GestureSignal::Ignored;
        }
        self.session = Some(DragSession {
            card,
            pointer: event.pointer,
            start_point: event.position,
            start_time: event.time,
            displacement: Vec2::ZERO,
            initial_transform: cx.card_transform,
        });
        self.state = GestureState::Dragging;
        GestureSignal::Started
    }

    fn on_move(&mut self, event: &PointerEvent, cx: &GestureContext<'_>) -> GestureSignal {
        let Some(mut session) = self.tracked(event.pointer) else {
            return GestureSignal::Ignored;
        };
        session.displacement = event.position - session.start_point;
        self.session = Some(session);

        let initial = session.initial_transform;
        let dx = session.displacement.x;
        let progress = compute_progress(initial.x, dx, cx.card_size.width, cx.container_width);
        let mut transform = initial.translated(session.displacement);
        if cx.config.rotation_enabled() {
            transform.rotation = rotation_for_drag(dx);
        }
        if cx.config.fade_enabled() {
            transform.alpha = alpha_for_drag(progress);
        }
        GestureSignal::Moved {
            transform,
            progress,
        }
    }

    fn on_up(&mut self, event: &PointerEvent, cx: &GestureContext<'_>) -> GestureSignal {
        let Some(mut session) = self.tracked(event.pointer) else {
            return GestureSignal::Ignored;
        };
        session.displacement = event.position - session.start_point;
        self.session = None;

        let held = event.time.saturating_duration_since(session.start_time);
        if session.displacement.hypot() <= cx.config.tap_slop
            && held <= cx.config.tap_timeout(cx.timebase)
        {
            self.state = GestureState::Armed;
            return GestureSignal::Tapped {
                transform: session.initial_transform,
            };
        }

        let center_x = cx.card_transform.x + cx.card_size.width / 2.0;
        let outcome = resolve(
            self.enabled,
            center_x,
            cx.container_width,
            cx.config.allowed_directions,
        );
        self.state = match outcome {
            SwipeOutcome::Commit(_) => GestureState::Committing,
            SwipeOutcome::Reset => GestureState::Resetting,
        };
        GestureSignal::Released { center_x, outcome }
    }

    fn on_cancel(&mut self, event: &PointerEvent) -> GestureSignal {
        if self.tracked(event.pointer).is_none() {
            return GestureSignal::Ignored;
        }
        self.session = None;
        self.state = GestureState::Resetting;
        GestureSignal::Cancelled
    }

    /// Starts a programmatic commit.
    ///
    /// Accepted while the registered card is at rest, whether or not user
    /// interaction is enabled. Returns `false` during a drag or animation.
    pub fn begin_commit(&mut self) -> bool {
        match self.state {
            GestureState::Armed => {}
            GestureState::Idle if self.registered.is_some() => {}
            _ => return false,
        }
        self.state = GestureState::Committing;
        true
    }

    /// Forces the registered card into the reset path, dropping any drag.
    pub fn begin_reset(&mut self) -> Option<DragSession> {
        if self.registered.is_none() {
            return None;
        }
        self.state = GestureState::Resetting;
        self.session.take()
    }

    /// Marks the end of a reset animation and re-arms the card.
    pub fn settled(&mut self) {
        if self.state == GestureState::Resetting {
            self.state = if self.enabled && self.registered.is_some() {
                GestureState::Armed
            } else {
                GestureState::Idle
            };
        }
    }
}
