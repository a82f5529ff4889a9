//! Frame-absolute time points.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Sub};

use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::{RelatesTo, TimeFrame};
use crate::span::Span;
use crate::unit::{factor, TimeUnit};

/// An absolute point on a frame's time line, tagged with its unit and frame.
///
/// `Instant` is the time half of the quantity algebra. Points translate by
/// [`Span`]s and difference into [`Span`]s; they do not add to each other.
/// "3 o'clock plus 5 o'clock" has no meaning, and the operator does not
/// exist:
///
/// ```compile_fail
/// use tempo_types::{Instant, Seconds, WorldTime};
///
/// let a = Instant::<Seconds, WorldTime>::new(3.0);
/// let b = Instant::<Seconds, WorldTime>::new(5.0);
/// let _ = a + b; // no `Add<Instant>` for `Instant`
/// ```
///
/// Points in different frames never difference, even at equal numeric value:
///
/// ```compile_fail
/// use tempo_types::{Instant, MonotonicTime, Seconds, WorldTime};
///
/// let wall = Instant::<Seconds, WorldTime>::new(0.0);
/// let mono = Instant::<Seconds, MonotonicTime>::new(0.0);
/// let _ = wall - mono; // frame mismatch: no `Sub` impl across frame tags
/// ```
///
/// # Example
///
/// ```
/// use tempo_types::{Instant, Seconds, Span, WorldTime};
///
/// let launch = Instant::<Seconds, WorldTime>::new(0.0);
/// let one_second = Span::<Seconds, WorldTime>::new(1.0);
///
/// let after = launch + one_second;
/// assert!((after.value() - 1.0).abs() < 1e-12);
/// assert_eq!(after - launch, one_second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Instant<U: TimeUnit, F: TimeFrame> {
    value: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _tags: PhantomData<fn() -> (U, F)>,
}

impl<U: TimeUnit, F: TimeFrame> Instant<U, F> {
    /// Creates the point at `value` units from the origin of frame `F`.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _tags: PhantomData,
        }
    }

    /// The numeric coordinate, in this instant's unit.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// The origin of frame `F`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0)
    }

    /// Absolute separation between two points, as a [`Span`].
    #[must_use]
    pub fn abs_diff(self, other: Self) -> Span<U, F> {
        Span::new((self.value - other.value).abs())
    }

    /// Re-expresses this point in unit `Dst`, staying in the same frame.
    ///
    /// # Example
    ///
    /// ```
    /// use tempo_types::{Instant, Minutes, Seconds, WorldTime};
    ///
    /// let t = Instant::<Minutes, WorldTime>::new(2.0);
    /// let s = t.convert::<Seconds>();
    /// assert!((s.value() - 120.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn convert<Dst: TimeUnit>(self) -> Instant<Dst, F> {
        Instant::new(self.value * factor::<U, Dst>())
    }

    /// Moves this point into frame `Dst` along a declared relation.
    ///
    /// Points carry position, so the full affine map applies: rate and
    /// origin offset. Compiles only where `F: RelatesTo<Dst>`; see
    /// [`RelatesTo`] for declaring relations.
    #[must_use]
    pub fn reframe<Dst>(self) -> Instant<U, Dst>
    where
        F: RelatesTo<Dst>,
        Dst: TimeFrame,
    {
        let seconds = self.value * U::SECONDS_PER_UNIT;
        let mapped =
            seconds * <F as RelatesTo<Dst>>::SCALE + <F as RelatesTo<Dst>>::OFFSET_SECONDS;
        Instant::new(mapped / U::SECONDS_PER_UNIT)
    }
}

impl<U: TimeUnit, F: TimeFrame> Default for Instant<U, F> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<U: TimeUnit, F: TimeFrame> fmt::Display for Instant<U, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} {} in {}", self.value, U::NAME, F::NAME)
    }
}

// Time + Duration = Time.
impl<U: TimeUnit, F: TimeFrame> Add<Span<U, F>> for Instant<U, F> {
    type Output = Self;

    fn add(self, rhs: Span<U, F>) -> Self {
        Self::new(self.value + rhs.value())
    }
}

// Duration + Time = Time.
impl<U: TimeUnit, F: TimeFrame> Add<Instant<U, F>> for Span<U, F> {
    type Output = Instant<U, F>;

    fn add(self, rhs: Instant<U, F>) -> Instant<U, F> {
        Instant::new(self.value() + rhs.value)
    }
}

// Time - Duration = Time.
impl<U: TimeUnit, F: TimeFrame> Sub<Span<U, F>> for Instant<U, F> {
    type Output = Self;

    fn sub(self, rhs: Span<U, F>) -> Self {
        Self::new(self.value - rhs.value())
    }
}

// Time - Time = Duration, within one frame. (Duration - Time stays
// undefined: there is no `Sub<Instant>` for `Span`.)
impl<U: TimeUnit, F: TimeFrame> Sub for Instant<U, F> {
    type Output = Span<U, F>;

    fn sub(self, rhs: Self) -> Span<U, F> {
        Span::new(self.value - rhs.value)
    }
}

// Scalars are dimensionless and frame-free; scaling is always permitted.
impl<U: TimeUnit, F: TimeFrame> Mul<f64> for Instant<U, F> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs)
    }
}

impl<U: TimeUnit, F: TimeFrame> Mul<Instant<U, F>> for f64 {
    type Output = Instant<U, F>;

    fn mul(self, rhs: Instant<U, F>) -> Instant<U, F> {
        Instant::new(self * rhs.value())
    }
}

impl<U: TimeUnit, F: TimeFrame> AbsDiffEq for Instant<U, F> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.value.abs_diff_eq(&other.value, epsilon)
    }
}

impl<U: TimeUnit, F: TimeFrame> RelativeEq for Instant<U, F> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.value.relative_eq(&other.value, epsilon, max_relative)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::frame::WorldTime;
    use crate::unit::{Seconds, Years};

    type T = Instant<Seconds, WorldTime>;
    type D = Span<Seconds, WorldTime>;

    #[test]
    fn time_plus_duration() {
        let launch = T::new(0.0);
        let one_second = D::new(1.0);
        assert_eq!((launch + one_second).value(), 1.0);
        assert_eq!((one_second + launch).value(), 1.0);
    }

    #[test]
    fn shift_then_unshift() {
        let t = T::new(42.0);
        let d = D::new(7.5);
        assert_relative_eq!((t + d) - d, t);
    }

    #[test]
    fn time_minus_time_is_duration() {
        let a = T::new(5.0);
        let b = T::new(2.0);
        let d: D = a - b;
        assert_eq!(d.value(), 3.0);
    }

    #[test]
    fn abs_diff_is_symmetric() {
        let a = T::new(5.0);
        let b = T::new(2.0);
        assert_eq!(a.abs_diff(b), b.abs_diff(a));
        assert_eq!(a.abs_diff(b).value(), 3.0);
    }

    #[test]
    fn origin_is_default() {
        assert_eq!(T::origin(), T::default());
        assert_eq!(T::origin().value(), 0.0);
    }

    #[test]
    fn convert_keeps_frame() {
        let t = Instant::<Years, WorldTime>::new(1.0);
        let s = t.convert::<Seconds>();
        assert_relative_eq!(s.value(), 31_557_600.0);
    }

    #[test]
    fn scale() {
        let t = T::new(4.0);
        assert_eq!((t * 0.5).value(), 2.0);
        assert_eq!((0.5 * t).value(), 2.0);
    }

    #[test]
    fn display() {
        assert_eq!(T::new(1.0).to_string(), "t=1 seconds in world_time");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_transparently() {
        let t = T::new(2.5);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "2.5");

        let back: T = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
