// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless interaction and animation model for swipeable card stacks.
//!
//! `swipestack_core` implements the hard part of a "swipe left, swipe right"
//! card widget: single-pointer drag tracking on the top card, normalized drag
//! progress, the binary edge-crossing swipe decision, and the interpolation
//! that keeps the cards underneath in step with the drag. It never renders.
//! It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   PointerEvent ──► GestureTracker ──► GestureSignal
//!                                            │
//!                 ┌──────────────────────────┘
//!                 ▼
//!   StackController ──► progress_targets() (continuous, per move)
//!         │      │
//!         │      └──► resolve() on release ──► StackAnimator (discrete)
//!         │                                          │
//!         │           tick(now) ◄────────────────────┘
//!         ▼
//!   StackController::evaluate() ──► StackChanges ──► Presenter::apply()
//! ```
//!
//! **[`geometry`]** — Pure functions: drag progress, per-depth layout, and
//! interpolation toward the card above.
//!
//! **[`gesture`]** — The drag state machine for the top card.
//!
//! **[`resolve`]** — Commit-or-reset decision on release.
//!
//! **[`animate`]** — Tweens with completion tokens, plus the drag-live
//! targets for the cards below the top.
//!
//! **[`stack`]** — [`StackController`](stack::StackController), the object
//! hosts talk to.
//!
//! **[`source`]**, **[`listener`]**, **[`backend`]** — Contracts with the
//! host: data, notifications, and presentation.
//!
//! **[`dirty`]** — Change channels drained by
//! [`evaluate`](stack::StackController::evaluate).
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-card
//!   transform dumps on every evaluation.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub use kurbo;

pub mod animate;
pub mod backend;
pub mod config;
pub mod dirty;
pub mod geometry;
pub mod gesture;
pub mod listener;
pub mod resolve;
pub mod source;
pub mod stack;
pub mod time;
pub mod trace;
