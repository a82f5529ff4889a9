//! Frame-relative time intervals.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::{RelatesTo, TimeFrame};
use crate::unit::{factor, TimeUnit};

/// A time interval, tagged with its unit and frame.
///
/// `Span` is the duration half of the quantity algebra: spans add and
/// subtract with each other, shift an [`Instant`](crate::Instant), and scale
/// by dimensionless numbers. The unit and frame are part of the type, so a
/// bare numeric literal can never pick them implicitly and operands with
/// different tags never reach the arithmetic.
///
/// # Example
///
/// ```
/// use tempo_types::{Seconds, Span, WorldTime};
///
/// let timeout = Span::<Seconds, WorldTime>::new(1.0);
/// let doubled = 2.0 * timeout;
/// assert!((doubled.value() - 2.0).abs() < 1e-12);
///
/// // Unit changes are explicit, same-frame, and visible at the call site.
/// let in_nanos = timeout.convert::<tempo_types::Nanoseconds>();
/// assert!((in_nanos.value() - 1e9).abs() < 1.0);
/// ```
///
/// Mixing tags is a type error, not a wrong number:
///
/// ```compile_fail
/// use tempo_types::{Nanoseconds, Seconds, Span, WorldTime};
///
/// let a = Span::<Seconds, WorldTime>::new(1.0);
/// let b = Span::<Nanoseconds, WorldTime>::new(1.0);
/// let _ = a + b; // no `Add` impl across unit tags
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Span<U: TimeUnit, F: TimeFrame> {
    value: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _tags: PhantomData<fn() -> (U, F)>,
}

impl<U: TimeUnit, F: TimeFrame> Span<U, F> {
    /// Creates a span of `value` units in frame `F`.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _tags: PhantomData,
        }
    }

    /// The numeric value, in this span's unit.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// The zero-length span.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0)
    }

    /// Checks whether this span has zero length.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    /// The span with the sign dropped.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    /// Re-expresses this span in unit `Dst`, staying in the same frame.
    ///
    /// The value is multiplied by [`factor::<U, Dst>()`](factor); the frame
    /// tag is untouched. There is no cross-frame variant: changing frames is
    /// [`reframe`](Self::reframe), a separate operation.
    ///
    /// # Example
    ///
    /// ```
    /// use tempo_types::{Milliseconds, Seconds, Span, WorldTime};
    ///
    /// let s = Span::<Seconds, WorldTime>::new(1.5);
    /// let ms = s.convert::<Milliseconds>();
    /// assert!((ms.value() - 1500.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn convert<Dst: TimeUnit>(self) -> Span<Dst, F> {
        Span::new(self.value * factor::<U, Dst>())
    }

    /// Moves this span into frame `Dst` along a declared relation.
    ///
    /// Spans are vectors on the time line, so only the relation's rate
    /// enters; the origin offset cancels. Compiles only where
    /// `F: RelatesTo<Dst>`; between unrelated frames this is a type error:
    ///
    /// ```compile_fail
    /// use tempo_types::{MonotonicTime, Seconds, Span, WorldTime};
    ///
    /// let s = Span::<Seconds, WorldTime>::new(1.0);
    /// let _ = s.reframe::<MonotonicTime>(); // no declared relation
    /// ```
    #[must_use]
    pub fn reframe<Dst>(self) -> Span<U, Dst>
    where
        F: RelatesTo<Dst>,
        Dst: TimeFrame,
    {
        // Unit factors cancel for vectors: only the rate applies.
        Span::new(self.value * <F as RelatesTo<Dst>>::SCALE)
    }
}

impl<U: TimeUnit, F: TimeFrame> Default for Span<U, F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<U: TimeUnit, F: TimeFrame> fmt::Display for Span<U, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} in {}", self.value, U::NAME, F::NAME)
    }
}

// Duration + Duration = Duration.
impl<U: TimeUnit, F: TimeFrame> Add for Span<U, F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}

// Duration - Duration = Duration.
impl<U: TimeUnit, F: TimeFrame> Sub for Span<U, F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value)
    }
}

impl<U: TimeUnit, F: TimeFrame> Neg for Span<U, F> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

// Scalars are dimensionless and frame-free; scaling is always permitted.
impl<U: TimeUnit, F: TimeFrame> Mul<f64> for Span<U, F> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs)
    }
}

impl<U: TimeUnit, F: TimeFrame> Mul<Span<U, F>> for f64 {
    type Output = Span<U, F>;

    fn mul(self, rhs: Span<U, F>) -> Span<U, F> {
        Span::new(self * rhs.value())
    }
}

impl<U: TimeUnit, F: TimeFrame> Div<f64> for Span<U, F> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs)
    }
}

impl<U: TimeUnit, F: TimeFrame> AbsDiffEq for Span<U, F> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.value.abs_diff_eq(&other.value, epsilon)
    }
}

impl<U: TimeUnit, F: TimeFrame> RelativeEq for Span<U, F> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.value.relative_eq(&other.value, epsilon, max_relative)
    }
}
