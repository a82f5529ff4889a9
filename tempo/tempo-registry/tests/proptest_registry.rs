//! Property-based tests for the runtime-checked quantity layer.
//!
//! These tests use proptest to generate random values and verify that the
//! registry's checks depend on tag identity, never on numeric values, and
//! that the conversion engine is exact up to floating-point tolerance.
//!
//! Run with: cargo test -p tempo-registry --test proptest_registry

use approx::relative_eq;
use proptest::prelude::*;
use tempo_registry::{Registry, TempoError};

/// Magnitudes where f64 keeps comfortably more precision than the test
/// tolerances below.
fn arb_value() -> impl Strategy<Value = f64> {
    -1e12..1e12f64
}

fn registry() -> Registry {
    let mut builder = Registry::builder();
    builder.standard_units().expect("stock units register");
    builder.frame("world_time").expect("frame registers");
    builder
        .derived_frame("mission_time", "world_time", 100.0, 1.0)
        .expect("derived frame registers");
    builder.frame("sim_time").expect("frame registers");
    builder.seal()
}

// =============================================================================
// Property Tests: Conversion engine
// =============================================================================

proptest! {
    /// Converting to another unit and back recovers the value.
    #[test]
    fn convert_round_trips(v in arb_value()) {
        let r = registry();
        let q = r.duration(v, "seconds", "world_time").unwrap();
        let back = r.convert(r.convert(q, "nanoseconds").unwrap(), "seconds").unwrap();
        prop_assert!(relative_eq!(back.value(), v, max_relative = 1e-9));
    }

    /// Reframing along a relation and back recovers the value, for both
    /// roles.
    #[test]
    fn reframe_round_trips(v in arb_value()) {
        let r = registry();
        for q in [
            r.time(v, "seconds", "mission_time").unwrap(),
            r.duration(v, "seconds", "mission_time").unwrap(),
        ] {
            let back = r.reframe(r.reframe(q, "world_time").unwrap(), "mission_time").unwrap();
            prop_assert!(relative_eq!(back.value(), v, max_relative = 1e-9, epsilon = 1e-6));
        }
    }

    /// Reframing a duration never sees the frames' origin offset.
    #[test]
    fn duration_reframe_is_offset_free(v in arb_value()) {
        let r = registry();
        let d = r.duration(v, "seconds", "mission_time").unwrap();
        let in_world = r.reframe(d, "world_time").unwrap();
        prop_assert!(relative_eq!(in_world.value(), v, max_relative = 1e-12));
    }
}

// =============================================================================
// Property Tests: Role algebra
// =============================================================================

proptest! {
    /// Duration addition commutes.
    #[test]
    fn duration_add_commutes(a in arb_value(), b in arb_value()) {
        let r = registry();
        let (a, b) = (
            r.duration(a, "seconds", "world_time").unwrap(),
            r.duration(b, "seconds", "world_time").unwrap(),
        );
        prop_assert_eq!(r.add(a, b).unwrap(), r.add(b, a).unwrap());
    }

    /// Shifting a time point by a duration and back recovers the point.
    #[test]
    fn shift_round_trips(t in arb_value(), d in arb_value()) {
        let r = registry();
        let time = r.time(t, "seconds", "world_time").unwrap();
        let span = r.duration(d, "seconds", "world_time").unwrap();
        let back = r.sub(r.add(time, span).unwrap(), span).unwrap();
        prop_assert!(relative_eq!(back.value(), t, max_relative = 1e-9, epsilon = 1e-2));
    }
}

// =============================================================================
// Property Tests: Rejections are value-independent
// =============================================================================

proptest! {
    /// Cross-unit addition fails for every pair of values, including pairs
    /// the conversion factor would make "equivalent".
    #[test]
    fn unit_mismatch_regardless_of_value(v in arb_value()) {
        let r = registry();
        let s = r.duration(v, "seconds", "world_time").unwrap();
        let ns = r.duration(v * 1e9, "nanoseconds", "world_time").unwrap();
        prop_assert!(
            matches!(
                r.add(s, ns).unwrap_err(),
                TempoError::UnitMismatch { .. }
            ),
            "expected UnitMismatch"
        );
    }

    /// Cross-frame addition fails for every pair of values, including equal
    /// ones.
    #[test]
    fn frame_mismatch_regardless_of_value(v in arb_value()) {
        let r = registry();
        let a = r.duration(v, "seconds", "world_time").unwrap();
        let b = r.duration(v, "seconds", "sim_time").unwrap();
        prop_assert!(
            matches!(
                r.add(a, b).unwrap_err(),
                TempoError::FrameMismatch { .. }
            ),
            "expected FrameMismatch"
        );
    }

    /// Time + Time fails for every pair of values.
    #[test]
    fn time_plus_time_regardless_of_value(a in arb_value(), b in arb_value()) {
        let r = registry();
        let (a, b) = (
            r.time(a, "seconds", "world_time").unwrap(),
            r.time(b, "seconds", "world_time").unwrap(),
        );
        prop_assert!(
            matches!(
                r.add(a, b).unwrap_err(),
                TempoError::RoleMismatch { .. }
            ),
            "expected RoleMismatch"
        );
    }
}
