//! Property-based tests for the static quantity algebra.
//!
//! These tests use proptest to generate random values and verify the
//! algebraic invariants the operator set promises.
//!
//! Run with: cargo test -p tempo-types --test proptest_quantities

use approx::relative_eq;
use proptest::prelude::*;
use tempo_types::{Hours, Instant, Nanoseconds, Seconds, Span, WorldTime, Years};

type Secs = Span<Seconds, WorldTime>;
type T = Instant<Seconds, WorldTime>;

/// Magnitudes where f64 keeps comfortably more precision than the test
/// tolerances below.
fn arb_value() -> impl Strategy<Value = f64> {
    -1e12..1e12f64
}

// =============================================================================
// Property Tests: Conversion
// =============================================================================

proptest! {
    /// Converting to another unit and back recovers the value.
    #[test]
    fn convert_round_trips(v in arb_value()) {
        let s = Secs::new(v);
        let back = s.convert::<Nanoseconds>().convert::<Seconds>();
        prop_assert!(relative_eq!(back, s, max_relative = 1e-9));
    }

    /// A conversion chain through several units matches the direct factor.
    #[test]
    fn convert_composes(v in arb_value()) {
        let s = Secs::new(v);
        let chained = s.convert::<Hours>().convert::<Years>().convert::<Seconds>();
        prop_assert!(relative_eq!(chained, s, max_relative = 1e-9));
    }

    /// Conversion preserves ordering. The gap guard keeps adjacent floats
    /// from rounding to the same nanosecond value.
    #[test]
    fn convert_is_monotonic(a in arb_value(), b in arb_value()) {
        prop_assume!(b - a > 1.0);
        let (a, b) = (Secs::new(a), Secs::new(b));
        prop_assert!(a.convert::<Nanoseconds>() < b.convert::<Nanoseconds>());
    }
}

// =============================================================================
// Property Tests: Role algebra
// =============================================================================

proptest! {
    /// Duration addition commutes.
    #[test]
    fn duration_add_commutes(a in arb_value(), b in arb_value()) {
        let (a, b) = (Secs::new(a), Secs::new(b));
        prop_assert_eq!(a + b, b + a);
    }

    /// Shifting a time point by a duration and back recovers the point.
    /// Absolute slack covers cancellation near zero at 1e12 magnitudes.
    #[test]
    fn shift_round_trips(t in arb_value(), d in arb_value()) {
        let (t, d) = (T::new(t), Secs::new(d));
        prop_assert!(relative_eq!((t + d) - d, t, max_relative = 1e-9, epsilon = 1e-2));
    }

    /// The difference of two points shifts one onto the other.
    #[test]
    fn diff_reconstructs(a in arb_value(), b in arb_value()) {
        let (a, b) = (T::new(a), T::new(b));
        let d = a - b;
        prop_assert!(relative_eq!(b + d, a, max_relative = 1e-9, epsilon = 1e-2));
    }

    /// Scaling distributes over duration addition. Intermediates reach
    /// 1e15, where one ulp is ~0.125, so the absolute slack is generous.
    #[test]
    fn scale_distributes(a in arb_value(), b in arb_value(), k in -1e3..1e3f64) {
        let (a, b) = (Secs::new(a), Secs::new(b));
        prop_assert!(relative_eq!(
            (a + b) * k,
            a * k + b * k,
            max_relative = 1e-9,
            epsilon = 1.0
        ));
    }
}
