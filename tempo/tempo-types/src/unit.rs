//! Unit tags for time quantities.
//!
//! A unit tag is a zero-sized marker type carrying its scale factor to the
//! canonical base unit (seconds). The tag itself, not the scale factor, is
//! the identity: two tags with equal scale factors are still incompatible.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unit of time, distinguishable at compile time.
///
/// Implement this on a zero-sized marker type to register a new unit. No
/// quantity code changes: every operation on [`Span`](crate::Span) and
/// [`Instant`](crate::Instant) is generic over the unit tag.
///
/// # Example
///
/// ```
/// use tempo_types::TimeUnit;
///
/// /// Sidereal days, for a telescope scheduler.
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// struct SiderealDays;
///
/// impl TimeUnit for SiderealDays {
///     const SECONDS_PER_UNIT: f64 = 86_164.0905;
///     const NAME: &'static str = "sidereal_days";
/// }
///
/// assert_eq!(SiderealDays::NAME, "sidereal_days");
/// ```
pub trait TimeUnit: Copy + PartialEq + PartialOrd + std::fmt::Debug + 'static {
    /// Scale factor to the canonical base unit: how many seconds one of
    /// this unit is.
    const SECONDS_PER_UNIT: f64;

    /// Canonical tag name, as it appears in display output and diagnostics.
    const NAME: &'static str;
}

/// Conversion factor from `Src` to `Dst`: multiply a value in `Src` by this
/// to express it in `Dst`.
///
/// # Example
///
/// ```
/// use tempo_types::{factor, Milliseconds, Seconds};
///
/// let f = factor::<Seconds, Milliseconds>();
/// assert!((f - 1000.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn factor<Src: TimeUnit, Dst: TimeUnit>() -> f64 {
    Src::SECONDS_PER_UNIT / Dst::SECONDS_PER_UNIT
}

macro_rules! time_units {
    ($($(#[$meta:meta])* $ty:ident => ($name:literal, $seconds:expr);)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
            #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
            pub struct $ty;

            impl TimeUnit for $ty {
                const SECONDS_PER_UNIT: f64 = $seconds;
                const NAME: &'static str = $name;
            }
        )+
    };
}

time_units! {
    /// Nanoseconds.
    Nanoseconds => ("nanoseconds", 1e-9);
    /// Microseconds.
    Microseconds => ("microseconds", 1e-6);
    /// Milliseconds.
    Milliseconds => ("milliseconds", 1e-3);
    /// Seconds, the canonical base unit.
    Seconds => ("seconds", 1.0);
    /// Minutes.
    Minutes => ("minutes", 60.0);
    /// Hours.
    Hours => ("hours", 3600.0);
    /// Days (exactly 86 400 seconds).
    Days => ("days", 86_400.0);
    /// Julian years (365.25 days).
    Years => ("years", 31_557_600.0);
}
