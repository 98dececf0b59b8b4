// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card animation.
//!
//! Two modes drive card transforms:
//!
//! - **Continuous** — while the top card is dragged, every card below it is
//!   placed directly from drag progress by [`progress_targets`]. There is no
//!   duration or easing; the result is written on every pointer move.
//! - **Discrete** — commit, reset, release settle, stack shift, and fade-in
//!   run as tweens in a [`StackAnimator`] over a fixed duration with an
//!   [`Easing`] curve. The host advances them with
//!   [`StackAnimator::tick`] once per frame.
//!
//! A card has at most one tween. Starting another on the same card replaces
//! the first, and the replaced tween's [`AnimationToken`] never completes.
//! Tweens do not read the clock when they are started; their start time is
//! the first tick that sees them.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::geometry::{CardTransform, interpolate_opacity, interpolate_transform};
use crate::resolve::SwipeDirection;
use crate::stack::{CardId, CardSlot};
use crate::time::{Duration, HostTime};

/// Timing curve of a tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Runs past the destination and settles back. Larger tension overshoots
    /// further.
    Overshoot {
        /// Amount of overshoot; 0 gives a plain decelerating curve.
        tension: f64,
    },
    /// Starts and ends slowly, cosine shaped.
    AccelerateDecelerate,
}

impl Easing {
    /// Maps linear time `t` in `[0, 1]` to curve progress.
    ///
    /// The result starts at 0 and ends at 1 but may leave `[0, 1]` in
    /// between for [`Overshoot`](Self::Overshoot).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Overshoot { tension } => {
                let s = t - 1.0;
                s * s * ((tension + 1.0) * s + tension) + 1.0
            }
            Self::AccelerateDecelerate => {
                ((t + 1.0) * core::f64::consts::PI).cos() / 2.0 + 0.5
            }
        }
    }
}

/// Why a tween is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// The top card leaving the container after a committed swipe.
    Commit(SwipeDirection),
    /// The top card returning to its resting transform.
    Reset,
    /// A card below the top following a released drag to progress 0 or 1.
    Settle,
    /// A card moving to its new level after the top card was removed.
    StackShift,
    /// A newly added card fading in.
    FadeIn,
}

/// Identifies one started tween.
///
/// Tokens are never reused within a [`StackAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationToken(pub u64);

/// A tween that reached its end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Completion {
    /// Animated card.
    pub card: CardId,
    /// Token returned when the tween was started.
    pub token: AnimationToken,
    /// Purpose of the tween.
    pub kind: AnimationKind,
    /// Final transform, exactly the tween destination.
    pub transform: CardTransform,
}

/// Output of one [`StackAnimator::tick`].
#[derive(Clone, Debug, Default)]
pub struct AnimationFrame {
    /// New transforms for every card with a running tween.
    pub updates: Vec<(CardId, CardTransform)>,
    /// Tweens that finished this tick, in start order.
    pub completions: Vec<Completion>,
}

/// One-shot completion guard for a single animation.
///
/// Arm it with the token of the animation whose end matters; [`fire`]
/// returns `true` for the first matching completion only. Completions for
/// other tokens, repeats, and anything after [`disarm`] are rejected.
///
/// [`fire`]: Self::fire
/// [`disarm`]: Self::disarm
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompletionLatch {
    armed: Option<AnimationToken>,
}

impl CompletionLatch {
    /// Creates a disarmed latch.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Arms the latch for `token`, replacing any previous token.
    pub fn arm(&mut self, token: AnimationToken) {
        self.armed = Some(token);
    }

    /// Consumes the latch if `token` is the armed one.
    pub fn fire(&mut self, token: AnimationToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    /// Disarms the latch and returns the token it held.
    pub fn disarm(&mut self) -> Option<AnimationToken> {
        self.armed.take()
    }

    /// Returns the armed token.
    #[must_use]
    pub const fn armed(&self) -> Option<AnimationToken> {
        self.armed
    }
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    card: CardId,
    token: AnimationToken,
    kind: AnimationKind,
    from: CardTransform,
    to: CardTransform,
    duration: Duration,
    easing: Easing,
    started_at: Option<HostTime>,
}

impl Tween {
    fn completion(&self) -> Completion {
        Completion {
            card: self.card,
            token: self.token,
            kind: self.kind,
            transform: self.to,
        }
    }
}

/// Runs discrete card tweens.
#[derive(Clone, Debug, Default)]
pub struct StackAnimator {
    tweens: Vec<Tween>,
    next_token: u64,
}

impl StackAnimator {
    /// Creates an animator with no running tweens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a tween on `card`, replacing any tween already running on it.
    pub fn start(
        &mut self,
        card: CardId,
        kind: AnimationKind,
        from: CardTransform,
        to: CardTransform,
        duration: Duration,
        easing: Easing,
    ) -> AnimationToken {
        let _ = self.cancel(card);
        let token = AnimationToken(self.next_token);
        self.next_token += 1;
        self.tweens.push(Tween {
            card,
            token,
            kind,
            from,
            to,
            duration,
            easing,
            started_at: None,
        });
        token
    }

    /// Stops the tween running on `card`, leaving the card where it is.
    ///
    /// Returns the cancelled tween's token and kind.
    pub fn cancel(&mut self, card: CardId) -> Option<(AnimationToken, AnimationKind)> {
        let idx = self.tweens.iter().position(|t| t.card == card)?;
        let tween = self.tweens.remove(idx);
        Some((tween.token, tween.kind))
    }

    /// Stops every tween. Returns how many were running.
    pub fn clear(&mut self) -> usize {
        let n = self.tweens.len();
        self.tweens.clear();
        n
    }

    /// Whether `card` has a running tween.
    #[must_use]
    pub fn is_animating(&self, card: CardId) -> bool {
        self.tweens.iter().any(|t| t.card == card)
    }

    /// Kind of the tween running on `card`.
    #[must_use]
    pub fn kind_of(&self, card: CardId) -> Option<AnimationKind> {
        self.tweens.iter().find(|t| t.card == card).map(|t| t.kind)
    }

    /// Number of running tweens.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Advances all tweens to `now`.
    pub fn tick(&mut self, now: HostTime) -> AnimationFrame {
        let mut frame = AnimationFrame::default();
        self.tweens.retain_mut(|tween| {
            let started_at = *tween.started_at.get_or_insert(now);
            let fraction = tween
                .duration
                .fraction(now.saturating_duration_since(started_at));
            if fraction >= 1.0 {
                frame.updates.push((tween.card, tween.to));
                frame.completions.push(tween.completion());
                false
            } else {
                let eased = tween.easing.apply(fraction);
                frame
                    .updates
                    .push((tween.card, tween.from.lerp(&tween.to, eased)));
                true
            }
        });
        frame
    }

    /// Jumps the tween identified by `token` to its end and removes it.
    ///
    /// For hosts that run animations on a platform animator and report the
    /// end themselves. Returns `None` for unknown, superseded, or already
    /// finished tokens, so duplicate reports are harmless.
    pub fn finish(&mut self, token: AnimationToken) -> Option<Completion> {
        let idx = self.tweens.iter().position(|t| t.token == token)?;
        Some(self.tweens.remove(idx).completion())
    }
}

/// Drag-live transforms for every card below the top.
///
/// Each card moves from its own baseline toward the baseline of the card one
/// level above it by `|progress|`. The bottom card also fades in. Returns
/// `(slot index, transform)` pairs in back-to-front order; the top card is
/// never included.
#[must_use]
pub fn progress_targets(slots: &[CardSlot], progress: f64) -> Vec<(usize, CardTransform)> {
    let mut out = Vec::with_capacity(slots.len().saturating_sub(1));
    for (i, pair) in slots.windows(2).enumerate() {
        let (slot, above) = (&pair[0], &pair[1]);
        let mut target = interpolate_transform(&slot.baseline, &above.baseline, progress);
        if i == 0 {
            target.alpha = interpolate_opacity(slot.baseline.alpha, progress);
        }
        out.push((i, target));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn card(n: u32) -> CardId {
        CardId(n)
    }

    fn moved(x: f64) -> CardTransform {
        CardTransform {
            x,
            ..CardTransform::IDENTITY
        }
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Overshoot { tension: 1.4 },
            Easing::AccelerateDecelerate,
        ] {
            assert!(easing.apply(0.0).abs() < EPS, "{easing:?} starts at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < EPS, "{easing:?} ends at 1");
        }
    }

    #[test]
    fn overshoot_passes_target() {
        let e = Easing::Overshoot { tension: 1.4 };
        let peak = (1..100)
            .map(|i| e.apply(f64::from(i) / 100.0))
            .fold(0.0_f64, f64::max);
        assert!(peak > 1.0, "overshoot should exceed 1, got {peak}");
        assert!((Easing::AccelerateDecelerate.apply(0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn tween_starts_on_first_tick_and_completes_exactly() {
        let mut anim = StackAnimator::new();
        let token = anim.start(
            card(1),
            AnimationKind::Reset,
            moved(100.0),
            moved(0.0),
            Duration(100),
            Easing::Linear,
        );
        let f0 = anim.tick(HostTime(1000));
        assert_eq!(f0.updates, [(card(1), moved(100.0))]);
        let f1 = anim.tick(HostTime(1050));
        assert!((f1.updates[0].1.x - 50.0).abs() < EPS);
        assert!(f1.completions.is_empty());
        let f2 = anim.tick(HostTime(1100));
        assert_eq!(f2.updates, [(card(1), moved(0.0))]);
        assert_eq!(f2.completions.len(), 1);
        assert_eq!(f2.completions[0].token, token);
        assert!(!anim.is_animating(card(1)));
    }

    #[test]
    fn restart_on_same_card_supersedes() {
        let mut anim = StackAnimator::new();
        let first = anim.start(
            card(1),
            AnimationKind::StackShift,
            moved(0.0),
            moved(10.0),
            Duration(100),
            Easing::Linear,
        );
        let second = anim.start(
            card(1),
            AnimationKind::Reset,
            moved(5.0),
            moved(0.0),
            Duration(100),
            Easing::Linear,
        );
        assert_ne!(first, second);
        assert_eq!(anim.active_count(), 1);
        assert_eq!(anim.kind_of(card(1)), Some(AnimationKind::Reset));
        assert!(anim.finish(first).is_none(), "superseded token never completes");
        assert!(anim.finish(second).is_some());
    }

    #[test]
    fn finish_is_one_shot() {
        let mut anim = StackAnimator::new();
        let token = anim.start(
            card(3),
            AnimationKind::Commit(SwipeDirection::Left),
            moved(0.0),
            moved(-500.0),
            Duration(400),
            Easing::Linear,
        );
        let done = anim.finish(token).expect("running tween finishes");
        assert_eq!(done.transform, moved(-500.0));
        assert!(anim.finish(token).is_none());
        assert!(anim.tick(HostTime(0)).completions.is_empty());
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut anim = StackAnimator::new();
        anim.start(
            card(1),
            AnimationKind::FadeIn,
            moved(0.0),
            moved(1.0),
            Duration::ZERO,
            Easing::Linear,
        );
        assert_eq!(anim.tick(HostTime(7)).completions.len(), 1);
    }

    #[test]
    fn progress_targets_skip_top_and_fade_bottom() {
        let levels = [(24.0, 0.81, 0.0), (12.0, 0.9, 1.0), (0.0, 1.0, 1.0)];
        let slots: Vec<CardSlot> = levels
            .iter()
            .zip(0..)
            .map(|(&(y, scale, alpha), n)| {
                let mut slot = CardSlot::new(card(n), 0, kurbo::Size::new(100.0, 100.0), 0.0);
                slot.baseline = CardTransform {
                    y,
                    scale_x: scale,
                    scale_y: scale,
                    alpha,
                    ..CardTransform::IDENTITY
                };
                slot
            })
            .collect();

        let targets = progress_targets(&slots, -1.0);
        assert_eq!(targets.len(), 2, "top card is driven by the gesture");
        let (i0, bottom) = targets[0];
        let (i1, middle) = targets[1];
        assert_eq!((i0, i1), (0, 1));
        assert_eq!(bottom.y, 12.0);
        assert!((bottom.scale_x - 0.9).abs() < EPS);
        assert_eq!(bottom.alpha, 1.0);
        assert_eq!(middle.y, 0.0);
        assert_eq!(middle.alpha, 1.0);

        let at_rest = progress_targets(&slots, 0.0);
        assert_eq!(at_rest[0].1, slots[0].baseline);
        assert!(progress_targets(&slots[2..], 0.5).is_empty());
    }

    #[test]
    fn latch_fires_once_for_its_token() {
        let mut latch = CompletionLatch::new();
        latch.arm(AnimationToken(4));
        assert!(!latch.fire(AnimationToken(3)));
        assert!(latch.fire(AnimationToken(4)));
        assert!(!latch.fire(AnimationToken(4)), "second completion rejected");
        latch.arm(AnimationToken(5));
        assert_eq!(latch.disarm(), Some(AnimationToken(5)));
        assert!(!latch.fire(AnimationToken(5)));
    }
}
