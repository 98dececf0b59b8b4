// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The card stack: materialized cards and the controller that owns them.
//!
//! [`StackController`] keeps an ordered `Vec` of [`CardSlot`]s, back to front,
//! plus a cursor into the host's [`DataSource`](crate::source::DataSource).
//! Cards are identified by [`CardId`]s that are never reused, so presenters
//! can key native surfaces on them.
//!
//! Each frame the host calls [`StackController::tick`] to run animations and
//! [`StackController::evaluate`] to collect a [`StackChanges`] for its
//! [`Presenter`](crate::backend::Presenter).

mod changes;
mod controller;
mod slot;

pub use changes::StackChanges;
pub use controller::StackController;
pub use slot::{CardId, CardSlot};
