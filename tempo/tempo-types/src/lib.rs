//! Phantom-typed, unit- and frame-safe time quantities.
//!
//! This crate makes a time value's unit and reference frame part of its
//! *type*, so that mixing them is a compile error instead of a silently
//! wrong number:
//!
//! - [`Span`] - a time interval (duration), tagged `Span<Unit, Frame>`
//! - [`Instant`] - an absolute time point, tagged `Instant<Unit, Frame>`
//! - [`TimeUnit`] - unit tags ([`Seconds`], [`Nanoseconds`], [`Years`], ...)
//! - [`TimeFrame`] - frame tags ([`WorldTime`], [`MonotonicTime`], yours)
//! - [`RelatesTo`] - declared affine relations between frames, consumed by
//!   the explicit `reframe` operation and nothing else
//!
//! # The Motivating Bug
//!
//! ROS-style time APIs accept bare numerics, and the constructor decides
//! what they mean. `Duration(1)` intended as one second, interpreted as one
//! nanosecond, is a timeout that fires a billion times early. Here the unit
//! is in the type: `Span::<Seconds, WorldTime>::new(1.0)` cannot be
//! reinterpreted, and there is no default unit or frame to fall back to.
//!
//! # Layer 0 Crate
//!
//! Pure value types: no I/O, no globals, no allocation. It can be used in:
//! - Real-time control loops
//! - Offline analysis tools
//! - Simulation environments
//!
//! For tags that only become known at startup (configuration-driven frames,
//! plugin sensors), the sibling `tempo-registry` crate runs the same checks
//! at the operation boundary instead of at compile time.
//!
//! # Example
//!
//! ```
//! use tempo_types::{Instant, Seconds, Span, WorldTime};
//!
//! let launch = Instant::<Seconds, WorldTime>::new(0.0);
//! let one_second = Span::<Seconds, WorldTime>::new(1.0);
//!
//! let after = launch + one_second;          // Time + Duration = Time
//! let elapsed = after - launch;             // Time - Time = Duration
//! let five = 5.0 * one_second;              // scalars always scale
//! assert!((five.value() - 5.0).abs() < 1e-12);
//! assert_eq!(elapsed, one_second);
//! ```
//!
//! # Rejected Operations
//!
//! Each of the following is a type error. The second-to-last one is the
//! motivating bug, caught at its earliest possible binding point.
//!
//! Adding across frames:
//!
//! ```compile_fail
//! use tempo_types::{Instant, MonotonicTime, Seconds, Span, WorldTime};
//!
//! let wall = Instant::<Seconds, WorldTime>::new(0.0);
//! let boot = Span::<Seconds, MonotonicTime>::new(1.0);
//! let _ = wall + boot; // frame mismatch
//! ```
//!
//! Adding two absolute times:
//!
//! ```compile_fail
//! use tempo_types::{Instant, Seconds, WorldTime};
//!
//! let a = Instant::<Seconds, WorldTime>::new(3.0);
//! let b = Instant::<Seconds, WorldTime>::new(5.0);
//! let _ = a + b; // role mismatch: Time + Time has no meaning
//! ```
//!
//! Adding across units, even where the scales would "work out":
//!
//! ```compile_fail
//! use tempo_types::{Nanoseconds, Seconds, Span, WorldTime};
//!
//! let s = Span::<Seconds, WorldTime>::new(1.0);
//! let ns = Span::<Nanoseconds, WorldTime>::new(1.0);
//! let _ = s + ns; // unit mismatch
//! ```
//!
//! Combining a bare numeric with a quantity other than by scaling:
//!
//! ```compile_fail
//! use tempo_types::{Seconds, Span, WorldTime};
//!
//! let s = Span::<Seconds, WorldTime>::new(1.0);
//! let _ = s + 1.0; // no implicit coercion from numerics
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod frame;
mod instant;
mod span;
mod unit;

pub use frame::{MonotonicTime, RelatesTo, TimeFrame, WorldTime};
pub use instant::Instant;
pub use span::Span;
pub use unit::{
    factor, Days, Hours, Microseconds, Milliseconds, Minutes, Nanoseconds, Seconds, TimeUnit,
    Years,
};
