// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack configuration.
//!
//! [`StackConfig`] is a plain value type. Hosts build one at construction and
//! hand it to [`StackController::new`](crate::stack::StackController::new).
//! Only [`allowed_directions`](StackConfig::allowed_directions) is meant to
//! change at runtime (see
//! [`StackController::set_allowed_directions`](crate::stack::StackController::set_allowed_directions)).

use crate::time::{Duration, Timebase};

/// Which horizontal directions may commit a swipe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipeDirections {
    /// Both left and right dismissals commit.
    #[default]
    Both,
    /// Only left dismissals commit; a right release snaps back.
    LeftOnly,
    /// Only right dismissals commit; a left release snaps back.
    RightOnly,
}

/// Configuration for a card stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    /// Directions that may commit a swipe.
    pub allowed_directions: SwipeDirections,
    /// Number of cards kept materialized (at least 1).
    pub visible_stack_size: usize,
    /// Vertical distance in pixels between adjacent stacked cards.
    pub card_spacing: f64,
    /// Range in whole degrees of the random rotation given to new cards.
    /// Zero disables jitter.
    pub card_rotation_range: u32,
    /// Rotation in degrees a committed card reaches as it leaves. Zero also
    /// disables rotation while dragging.
    pub swipe_rotation_degrees: f64,
    /// Values below 1 enable fading the dragged card as it moves away from
    /// the centre.
    pub swipe_fade_end_opacity: f64,
    /// Scale multiplier applied per level below the top card.
    pub scale_factor_per_level: f64,
    /// Duration of the commit, reset, and release-settle animations.
    pub animation_duration_ms: u64,
    /// Duration of the stack shift after a card is removed.
    pub stack_shift_duration_ms: u64,
    /// Tension of the overshoot curve used when a card snaps back.
    pub reset_overshoot_tension: f64,
    /// Maximum pointer travel in pixels for a press to count as a tap.
    pub tap_slop: f64,
    /// Maximum press length for a tap.
    pub tap_timeout_ms: u64,
    /// Seed for the rotation jitter generator.
    pub jitter_seed: u64,
}

impl StackConfig {
    /// Default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allowed_directions: SwipeDirections::Both,
            visible_stack_size: 3,
            card_spacing: 12.0,
            card_rotation_range: 0,
            swipe_rotation_degrees: 30.0,
            swipe_fade_end_opacity: 1.0,
            scale_factor_per_level: 1.0,
            animation_duration_ms: 400,
            stack_shift_duration_ms: 100,
            reset_overshoot_tension: 1.4,
            tap_slop: 8.0,
            tap_timeout_ms: 300,
            jitter_seed: 0x5eed_cafe_f00d_d00d,
        }
    }

    /// A "dating app" look: shrinking stack, slight rotation jitter, and
    /// fading while dragging.
    #[must_use]
    pub const fn tinder() -> Self {
        Self {
            card_rotation_range: 10,
            scale_factor_per_level: 0.95,
            swipe_fade_end_opacity: 0.0,
            ..Self::new()
        }
    }

    /// Whether the dragged card rotates with horizontal displacement.
    #[inline]
    #[must_use]
    pub fn rotation_enabled(&self) -> bool {
        self.swipe_rotation_degrees > 0.0
    }

    /// Whether the dragged card fades with progress.
    #[inline]
    #[must_use]
    pub fn fade_enabled(&self) -> bool {
        self.swipe_fade_end_opacity < 1.0
    }

    /// [`animation_duration_ms`](Self::animation_duration_ms) in ticks.
    #[inline]
    #[must_use]
    pub const fn animation_duration(&self, timebase: Timebase) -> Duration {
        Duration::from_millis(self.animation_duration_ms, timebase)
    }

    /// [`stack_shift_duration_ms`](Self::stack_shift_duration_ms) in ticks.
    #[inline]
    #[must_use]
    pub const fn stack_shift_duration(&self, timebase: Timebase) -> Duration {
        Duration::from_millis(self.stack_shift_duration_ms, timebase)
    }

    /// [`tap_timeout_ms`](Self::tap_timeout_ms) in ticks.
    #[inline]
    #[must_use]
    pub const fn tap_timeout(&self, timebase: Timebase) -> Duration {
        Duration::from_millis(self.tap_timeout_ms, timebase)
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_fade_and_jitter() {
        let c = StackConfig::default();
        assert!(c.rotation_enabled());
        assert!(!c.fade_enabled());
        assert_eq!(c.card_rotation_range, 0);
        assert_eq!(c.visible_stack_size, 3);
    }

    #[test]
    fn tinder_preset_overrides_look_only() {
        let c = StackConfig::tinder();
        assert!(c.fade_enabled());
        assert_eq!(c.animation_duration_ms, StackConfig::new().animation_duration_ms);
    }

    #[test]
    fn durations_follow_timebase() {
        let c = StackConfig::new();
        assert_eq!(c.animation_duration(Timebase::MILLIS), Duration(400));
        assert_eq!(c.stack_shift_duration(Timebase::MICROS), Duration(100_000));
    }
}
