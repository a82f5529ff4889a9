//! Frame tags for time quantities.
//!
//! A frame tag marks the reference space a quantity lives in. Two frames are
//! never interchangeable, even when they happen to share a unit: a mission
//! clock and a wall clock both tick in seconds, and adding readings from the
//! two is still a bug.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reference frame (coordinate space on the time line), distinguishable at
/// compile time.
///
/// Implement this on a zero-sized marker type to declare a new frame.
///
/// # Example
///
/// ```
/// use tempo_types::TimeFrame;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// struct LaunchEpoch;
///
/// impl TimeFrame for LaunchEpoch {
///     const NAME: &'static str = "launch_epoch";
/// }
/// ```
pub trait TimeFrame: Copy + PartialEq + PartialOrd + std::fmt::Debug + 'static {
    /// Canonical tag name, as it appears in display output and diagnostics.
    const NAME: &'static str;
}

/// A declared affine relation from frame `Self` to frame `Dst`.
///
/// The relation maps canonical (seconds-valued) coordinates: a point at `x`
/// seconds in `Self` sits at `SCALE * x + OFFSET_SECONDS` seconds in `Dst`.
/// Intervals are vectors, so [`Span::reframe`](crate::Span::reframe) applies
/// `SCALE` only; [`Instant::reframe`](crate::Instant::reframe) applies the
/// full map.
///
/// Declaring the relation is what makes `reframe` compile. Generic
/// arithmetic never consults it: a quantity cannot drift across frames by
/// being added to something.
///
/// # Example
///
/// ```
/// use tempo_types::{Instant, RelatesTo, Seconds, TimeFrame, WorldTime};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// struct LaunchEpoch;
///
/// impl TimeFrame for LaunchEpoch {
///     const NAME: &'static str = "launch_epoch";
/// }
///
/// // Launch happened 100 s into world time; the clocks tick at the same rate.
/// impl RelatesTo<WorldTime> for LaunchEpoch {
///     const SCALE: f64 = 1.0;
///     const OFFSET_SECONDS: f64 = 100.0;
/// }
///
/// let liftoff = Instant::<Seconds, LaunchEpoch>::new(0.0);
/// let in_world = liftoff.reframe::<WorldTime>();
/// assert!((in_world.value() - 100.0).abs() < 1e-12);
/// ```
pub trait RelatesTo<Dst: TimeFrame>: TimeFrame {
    /// Seconds in `Dst` per second in `Self`.
    const SCALE: f64;

    /// `Dst` coordinate (in seconds) of the `Self` origin.
    const OFFSET_SECONDS: f64;
}

/// Wall-clock world time frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldTime;

impl TimeFrame for WorldTime {
    const NAME: &'static str = "world_time";
}

/// Steady clock since process start. Deliberately unrelated to
/// [`WorldTime`]: there is no `RelatesTo` impl between them, so `reframe`
/// across the two does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonotonicTime;

impl TimeFrame for MonotonicTime {
    const NAME: &'static str = "monotonic_time";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_frame_names() {
        assert_eq!(WorldTime::NAME, "world_time");
        assert_eq!(MonotonicTime::NAME, "monotonic_time");
    }
}
