//! Runtime-checked unit and frame registry for time quantities.
//!
//! The sibling `tempo-types` crate rejects unit/frame confusion at compile
//! time, which requires the tags to be known when the program is written.
//! Robotics stacks also grow tags at startup: frames named in a config
//! file, units declared by a plugin sensor. This crate covers that case
//! with the same rules enforced at the operation boundary:
//!
//! - [`RegistryBuilder`] - startup registration of units, aliases, frames
//!   and declared frame relations; consumed by [`seal`](RegistryBuilder::seal)
//! - [`Registry`] - the sealed, read-only tag tables; mints quantities and
//!   performs every checked operation
//! - [`Quantity`] - an immutable `(value, unit, frame, role)` tuple
//! - [`FrameMap`] - a declared frame relation as a composable affine value
//! - [`TempoError`] - structured rejection: operation, both tags, reason
//!
//! Checks run before any arithmetic result exists. A mismatch never
//! produces a value; it produces an error naming the operation and the
//! two tags that refused to combine.
//!
//! # Example
//!
//! ```
//! use tempo_registry::{Registry, Role, TempoError};
//!
//! let mut builder = Registry::builder();
//! builder.standard_units()?;
//! builder.frame("world_time")?;
//! builder.derived_frame("mission_time", "world_time", 100.0, 1.0)?;
//! let registry = builder.seal();
//!
//! // Time + Duration = Time.
//! let launch = registry.time(0.0, "seconds", "world_time")?;
//! let one_second = registry.duration(1.0, "seconds", "world_time")?;
//! let after = registry.add(launch, one_second)?;
//! assert_eq!(after.role(), Role::Time);
//!
//! // Crossing frames takes an explicit reframe along a declared relation.
//! let liftoff = registry.time(0.0, "seconds", "mission_time")?;
//! let in_world = registry.reframe(liftoff, "world_time")?;
//! assert!((in_world.value() - 100.0).abs() < 1e-12);
//! # Ok::<(), TempoError>(())
//! ```
//!
//! # Concurrency
//!
//! [`Registry`] is immutable after sealing and safe to share across threads
//! (behind an `Arc` for process-wide use). Quantities are `Copy` values.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod framemap;
mod quantity;
mod registry;

pub use error::{Op, Result, TagKind, TempoError};
pub use framemap::FrameMap;
pub use quantity::{FrameId, Quantity, Role, UnitId};
pub use registry::{Registry, RegistryBuilder};
