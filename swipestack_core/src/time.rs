// Copyright 2026 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time for animation and gesture timing.
//!
//! The stack never reads a clock itself. Hosts pass [`HostTime`] values in
//! with pointer events and frame ticks, expressed in whatever monotonic tick
//! unit the platform uses, together with a [`Timebase`] that converts those
//! ticks to nanoseconds. Configuration values are given in milliseconds and
//! converted once through the timebase.

use core::fmt;
use core::ops::Add;

/// A point in time in platform-native monotonic ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// Rational conversion factor from ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// Ticks are nanoseconds.
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// Ticks are microseconds.
    pub const MICROS: Self = Self {
        numer: 1_000,
        denom: 1,
    };

    /// Ticks are milliseconds.
    pub const MILLIS: Self = Self {
        numer: 1_000_000,
        denom: 1,
    };

    /// Creates a new timebase.
    ///
    /// # Panics
    ///
    /// Panics if `numer` or `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(denom != 0, "timebase denominator must not be zero");
        assert!(numer != 0, "timebase numerator must not be zero");
        Self { numer, denom }
    }

    /// Converts a tick count to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        let wide = ticks as u128 * self.numer as u128 / self.denom as u128;
        wide as u64
    }

    /// Converts nanoseconds to a tick count.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        let wide = nanos as u128 * self.denom as u128 / self.numer as u128;
        wide as u64
    }
}

impl Default for Timebase {
    fn default() -> Self {
        Self::NANOS
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

/// A duration in the same tick units as [`HostTime`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a duration from milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(millis.saturating_mul(1_000_000)))
    }

    /// Converts this duration to nanoseconds.
    #[inline]
    #[must_use]
    pub const fn to_nanos(self, timebase: Timebase) -> u64 {
        timebase.ticks_to_nanos(self.0)
    }

    /// Returns the fraction of `self` covered by `elapsed`, clamped to
    /// `[0, 1]`. A zero-length duration is always complete.
    #[inline]
    #[must_use]
    pub fn fraction(self, elapsed: Self) -> f64 {
        if self.0 == 0 {
            return 1.0;
        }
        (elapsed.0 as f64 / self.0 as f64).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_through_timebases() {
        assert_eq!(Duration::from_millis(400, Timebase::NANOS).ticks(), 400_000_000);
        assert_eq!(Duration::from_millis(400, Timebase::MICROS).ticks(), 400_000);
        assert_eq!(Duration::from_millis(400, Timebase::MILLIS).ticks(), 400);
    }

    #[test]
    fn arm_mac_timebase() {
        // 24 MHz ticks.
        let tb = Timebase::new(125, 3);
        let d = Duration::from_millis(1_000, tb);
        assert_eq!(d.ticks(), 24_000_000, "1s at 24 MHz");
        assert_eq!(d.to_nanos(tb), 1_000_000_000);
    }

    #[test]
    fn fraction_clamps() {
        let d = Duration(100);
        assert_eq!(d.fraction(Duration(0)), 0.0);
        assert_eq!(d.fraction(Duration(50)), 0.5);
        assert_eq!(d.fraction(Duration(500)), 1.0);
        assert_eq!(Duration::ZERO.fraction(Duration(0)), 1.0, "zero length is done");
    }

    #[test]
    fn saturating_since() {
        let t = HostTime(1000);
        assert_eq!(t.saturating_duration_since(HostTime(1500)), Duration::ZERO);
        assert_eq!(t.saturating_duration_since(HostTime(400)), Duration(600));
        assert_eq!((t + Duration(5)).ticks(), 1005);
    }
}
