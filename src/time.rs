/*! The discrete time model used throughout the crate.

Timestamps in job logs are plain scalars (e.g., seconds since some
epoch). We distinguish points in time ([Instant]) from interval
lengths ([Duration]) so that the two cannot be mixed up silently. */

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use derive_more::{Display, From, Into, Sub};

/// This library uses a simple discrete time model.
pub type Time = u64;

/// A point in time, e.g., when a job was submitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, From, Into,
)]
pub struct Instant(Time);

impl Instant {
    /// The earliest representable point in time.
    pub const fn epoch() -> Self {
        Instant(0)
    }

    /// The length of the interval from `earlier` to `self`.
    ///
    /// Saturates at zero if `earlier` is in fact later than `self`.
    pub fn since(self, earlier: Instant) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

/// The length of an interval, e.g., how long a job ran.
///
/// Adding durations saturates at the largest representable value
/// rather than overflowing, so totals over logs with extreme
/// timestamps are clamped to `Time::MAX`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    From,
    Into,
    Sub,
)]
pub struct Duration(Time);

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::zero(), Add::add)
    }
}

impl Duration {
    pub const fn zero() -> Self {
        Duration(0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Lossy conversion for computing ratios.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_saturate() {
        let max = Duration::from(Time::MAX);
        assert_eq!(max + Duration::from(1), max);
        let mut acc = Duration::from(Time::MAX - 1);
        acc += Duration::from(5);
        assert_eq!(acc, max);
        let total: Duration = vec![max, max, Duration::from(3)].into_iter().sum();
        assert_eq!(total, max);
        let total: Duration = vec![Duration::from(3), Duration::from(4)].into_iter().sum();
        assert_eq!(total, Duration::from(7));
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Instant::from(10).since(Instant::from(4)), Duration::from(6));
        assert_eq!(Instant::from(4).since(Instant::from(10)), Duration::zero());
    }
}
