// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card transforms and the pure functions that derive them.
//!
//! Everything here is stateless. The gesture tracker, the animator, and the
//! controller all call into this module so that the visual language of the
//! stack (how far a drag has progressed, where each card sits at rest, how
//! the cards underneath follow the top card) can be tested without any event
//! or animation plumbing.
//!
//! Coordinates are container-relative pixels with the origin at the top-left
//! corner of the container. A card's `x`/`y` is the position of its top-left
//! corner before scale and rotation, which both pivot around the card centre.

use kurbo::{Affine, Point, Rect, Size, Vec2};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::StackConfig;

/// Horizontal displacement per degree of drag rotation.
const DRAG_ROTATION_DIVISOR: f64 = 60.0;

/// Visual state of a single card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    /// Left edge in container coordinates.
    pub x: f64,
    /// Top edge in container coordinates.
    pub y: f64,
    /// Rotation in degrees around the card centre, clockwise positive.
    pub rotation: f64,
    /// Horizontal scale around the card centre.
    pub scale_x: f64,
    /// Vertical scale around the card centre.
    pub scale_y: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl CardTransform {
    /// A card at the origin with no rotation, unit scale, and full opacity.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        alpha: 1.0,
    };

    /// Returns the top-left position.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns a copy translated by `delta`.
    #[inline]
    #[must_use]
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
    }

    /// Linear blend of every field, `t = 0` gives `self`, `t = 1` gives `to`.
    ///
    /// `t` is not clamped so that overshooting curves can carry a card past
    /// its destination.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            rotation: lerp(self.rotation, to.rotation, t),
            scale_x: lerp(self.scale_x, to.scale_x, t),
            scale_y: lerp(self.scale_y, to.scale_y, t),
            alpha: lerp(self.alpha, to.alpha, t).clamp(0.0, 1.0),
        }
    }

    /// Returns the 2-D affine a renderer should apply to a card of the given
    /// unscaled `size` laid out at the container origin.
    #[must_use]
    pub fn to_affine(&self, size: Size) -> Affine {
        let half = Vec2::new(size.width * 0.5, size.height * 0.5);
        Affine::translate(Vec2::new(self.x, self.y) + half)
            * Affine::rotate(self.rotation * (core::f64::consts::PI / 180.0))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate(-half)
    }

    /// Axis-aligned bounds of the card ignoring scale and rotation.
    #[inline]
    #[must_use]
    pub fn layout_rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin(), size)
    }

    /// Whether every component equals `other` within `eps`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.rotation - other.rotation).abs() <= eps
            && (self.scale_x - other.scale_x).abs() <= eps
            && (self.scale_y - other.scale_y).abs() <= eps
            && (self.alpha - other.alpha).abs() <= eps
    }
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Sizes supplied by the host's layout system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StackGeometry {
    /// Size of the container the stack is laid out in.
    pub container: Size,
    /// Default measured card size, used until a card gets its own.
    pub card: Size,
}

impl StackGeometry {
    /// Creates a geometry from container and card sizes.
    #[must_use]
    pub const fn new(container: Size, card: Size) -> Self {
        Self { container, card }
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalized drag progress in `[-1, 1]`.
///
/// The card's horizontal centre, measured from the container centre, is
/// divided by half the container width. Negative values mean left.
#[must_use]
pub fn compute_progress(
    origin_x: f64,
    displacement_x: f64,
    card_width: f64,
    container_width: f64,
) -> f64 {
    if container_width <= 0.0 || !container_width.is_finite() {
        return 0.0;
    }
    let center = origin_x + displacement_x + card_width / 2.0 - container_width / 2.0;
    let progress = center / container_width * 2.0;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(-1.0, 1.0)
}

/// Transform of a non-top card while the top card is dragged.
///
/// `baseline` is the card's own resting transform and `above` the resting
/// transform of the card one level above it. The vertical offset and scale
/// move from `baseline` toward `above` in proportion to `|progress|`; every
/// other field is taken from `baseline`.
#[must_use]
pub fn interpolate_transform(
    baseline: &CardTransform,
    above: &CardTransform,
    progress: f64,
) -> CardTransform {
    let p = progress.abs().min(1.0);
    CardTransform {
        y: baseline.y - ((baseline.y - above.y) * p).ceil(),
        scale_x: baseline.scale_x - (baseline.scale_x - above.scale_x) * p,
        scale_y: baseline.scale_y - (baseline.scale_y - above.scale_y) * p,
        ..*baseline
    }
}

/// Opacity of the bottom card while the top card is dragged.
///
/// Fades from its resting opacity up to fully opaque as `|progress|` goes
/// from 0 to 1. A card resting at zero opacity therefore shows exactly
/// `|progress|`.
#[must_use]
pub fn interpolate_opacity(baseline_alpha: f64, progress: f64) -> f64 {
    let p = progress.abs().min(1.0);
    (baseline_alpha + (1.0 - baseline_alpha) * p).clamp(0.0, 1.0)
}

/// Rotation in degrees for a horizontal drag displacement.
#[inline]
#[must_use]
pub fn rotation_for_drag(dx: f64) -> f64 {
    dx / DRAG_ROTATION_DIVISOR
}

/// Opacity of the dragged card for a given progress.
#[inline]
#[must_use]
pub fn alpha_for_drag(progress: f64) -> f64 {
    1.0 - (progress * 2.0).abs().min(1.0)
}

/// Scale of a card at `depth` in a stack of `count` cards.
///
/// The top card is always 1; cards below it use
/// `scale_factor_per_level ^ (count - depth)`.
#[must_use]
pub fn scale_for_depth(depth: usize, count: usize, factor: f64) -> f64 {
    if count == 0 || depth + 1 >= count {
        return 1.0;
    }
    let mut scale = 1.0;
    for _ in depth..count {
        scale *= factor;
    }
    scale
}

/// Resting opacity of a card at `depth`.
///
/// When the stack is full and holds more than one card, the bottom card is
/// preloaded invisible and is revealed by drag progress. Every other card
/// rests fully opaque.
#[must_use]
pub fn resting_alpha(depth: usize, count: usize, visible_stack_size: usize) -> f64 {
    if depth == 0 && count > 1 && count >= visible_stack_size {
        0.0
    } else {
        1.0
    }
}

/// Resting transform of a card at `depth` in a stack of `count` cards.
///
/// Cards are centred horizontally. The top card sits at `y = 0` and every
/// level below it is offset down by `card_spacing`. `rotation` is the card's
/// own jitter.
#[must_use]
pub fn layout_transform(
    depth: usize,
    count: usize,
    config: &StackConfig,
    container_width: f64,
    card: Size,
    rotation: f64,
) -> CardTransform {
    let levels_below_top = count.saturating_sub(depth + 1);
    let scale = scale_for_depth(depth, count, config.scale_factor_per_level);
    CardTransform {
        x: (container_width - card.width) / 2.0,
        y: levels_below_top as f64 * config.card_spacing,
        rotation,
        scale_x: scale,
        scale_y: scale,
        alpha: resting_alpha(depth, count, config.visible_stack_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn progress_is_zero_when_centred() {
        assert_eq!(compute_progress(0.0, 0.0, 1000.0, 1000.0), 0.0);
        assert_eq!(compute_progress(250.0, 0.0, 500.0, 1000.0), 0.0);
    }

    #[test]
    fn progress_sign_follows_direction() {
        assert!(compute_progress(0.0, -100.0, 1000.0, 1000.0) < 0.0);
        assert!(compute_progress(0.0, 100.0, 1000.0, 1000.0) > 0.0);
        assert!((compute_progress(0.0, 250.0, 1000.0, 1000.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn progress_clamps_and_tolerates_degenerate_container() {
        assert_eq!(compute_progress(0.0, 10_000.0, 1000.0, 1000.0), 1.0);
        assert_eq!(compute_progress(0.0, -10_000.0, 1000.0, 1000.0), -1.0);
        assert_eq!(compute_progress(0.0, 10.0, 100.0, 0.0), 0.0);
        assert_eq!(compute_progress(0.0, f64::NAN, 100.0, 100.0), 0.0);
    }

    #[test]
    fn drag_rotation_and_alpha() {
        assert_eq!(rotation_for_drag(120.0), 2.0);
        assert_eq!(rotation_for_drag(-60.0), -1.0);
        assert_eq!(alpha_for_drag(0.0), 1.0);
        assert_eq!(alpha_for_drag(0.25), 0.5);
        assert_eq!(alpha_for_drag(-0.75), 0.0);
    }

    #[test]
    fn scale_per_depth_skips_top() {
        assert_eq!(scale_for_depth(2, 3, 0.9), 1.0, "top is unscaled");
        assert!((scale_for_depth(1, 3, 0.9) - 0.81).abs() < EPS);
        assert!((scale_for_depth(0, 3, 0.9) - 0.729).abs() < EPS);
        assert_eq!(scale_for_depth(0, 1, 0.5), 1.0);
    }

    #[test]
    fn layout_stacks_downward_from_top() {
        let config = StackConfig {
            card_spacing: 10.0,
            ..StackConfig::new()
        };
        let card = Size::new(200.0, 300.0);
        let top = layout_transform(2, 3, &config, 1000.0, card, 0.0);
        let mid = layout_transform(1, 3, &config, 1000.0, card, 0.0);
        let bottom = layout_transform(0, 3, &config, 1000.0, card, 0.0);
        assert_eq!(top.x, 400.0);
        assert_eq!(top.y, 0.0);
        assert_eq!(mid.y, 10.0);
        assert_eq!(bottom.y, 20.0);
        assert_eq!(top.alpha, 1.0);
        assert_eq!(bottom.alpha, 0.0, "bottom of a full stack is preloaded");
    }

    #[test]
    fn partial_stack_bottom_is_visible() {
        assert_eq!(resting_alpha(0, 2, 3), 1.0);
        assert_eq!(resting_alpha(0, 1, 3), 1.0);
        assert_eq!(resting_alpha(0, 3, 3), 0.0);
    }

    #[test]
    fn interpolation_moves_toward_card_above() {
        let below = CardTransform {
            y: 24.0,
            scale_x: 0.8,
            scale_y: 0.8,
            ..CardTransform::IDENTITY
        };
        let above = CardTransform {
            y: 12.0,
            scale_x: 0.9,
            scale_y: 0.9,
            ..CardTransform::IDENTITY
        };
        let t0 = interpolate_transform(&below, &above, 0.0);
        assert_eq!(t0, below);
        let t1 = interpolate_transform(&below, &above, -1.0);
        assert_eq!(t1.y, 12.0);
        assert!((t1.scale_x - 0.9).abs() < EPS);
        let half = interpolate_transform(&below, &above, 0.5);
        assert_eq!(half.y, 18.0);
        assert!((half.scale_y - 0.85).abs() < EPS);
    }

    #[test]
    fn opacity_reveals_preloaded_card() {
        assert_eq!(interpolate_opacity(0.0, 0.3), 0.3);
        assert_eq!(interpolate_opacity(0.0, -1.0), 1.0);
        assert_eq!(interpolate_opacity(1.0, 0.4), 1.0);
    }

    #[test]
    fn affine_pivots_around_centre() {
        let t = CardTransform {
            x: 10.0,
            y: 20.0,
            scale_x: 2.0,
            scale_y: 2.0,
            ..CardTransform::IDENTITY
        };
        let size = Size::new(100.0, 50.0);
        let centre = t.to_affine(size) * Point::new(50.0, 25.0);
        assert!((centre.x - 60.0).abs() < EPS);
        assert!((centre.y - 45.0).abs() < EPS);
        let corner = t.to_affine(size) * Point::ZERO;
        assert!((corner.x - (60.0 - 100.0)).abs() < EPS);
    }

    #[test]
    fn lerp_clamps_alpha_only() {
        let a = CardTransform::IDENTITY;
        let b = CardTransform {
            x: 100.0,
            alpha: 0.0,
            ..CardTransform::IDENTITY
        };
        let over = a.lerp(&b, 1.2);
        assert!((over.x - 120.0).abs() < EPS, "position may overshoot");
        assert_eq!(over.alpha, 0.0, "alpha stays in range");
    }
}
