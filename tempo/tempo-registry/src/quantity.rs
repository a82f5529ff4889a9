//! Runtime-tagged quantities.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Role of a quantity: absolute point on a frame's time line, or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// An absolute time point within a frame.
    Time,
    /// A frame-relative interval.
    Duration,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Time => "time",
            Self::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Interned id of a registered unit tag.
///
/// Issued by [`RegistryBuilder`](crate::RegistryBuilder); an alias maps to
/// the id of the unit it aliases, so aliased names *are* the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitId(pub(crate) u32);

/// Interned id of a registered frame tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameId(pub(crate) u32);

/// An immutable `(value, unit, frame, role)` tuple.
///
/// The runtime counterpart of `tempo_types::Span` / `tempo_types::Instant`,
/// for tags that only become known at startup. Construction goes through a
/// sealed [`Registry`](crate::Registry), and so does every binary operation:
/// the registry re-runs the tag-compatibility checks at the operation
/// boundary and refuses to produce a result on mismatch.
///
/// Only [`scale`](Self::scale) lives on the quantity itself, because
/// scalars are dimensionless and frame-free and no tag check is involved.
///
/// # Example
///
/// ```
/// use tempo_registry::{Registry, Role};
///
/// let mut builder = Registry::builder();
/// builder.standard_units()?;
/// builder.frame("world_time")?;
/// let registry = builder.seal();
///
/// let timeout = registry.duration(1.0, "seconds", "world_time")?;
/// let tripled = timeout.scale(3.0);
///
/// assert_eq!(tripled.role(), Role::Duration);
/// assert!((tripled.value() - 3.0).abs() < 1e-12);
/// # Ok::<(), tempo_registry::TempoError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantity {
    value: f64,
    unit: UnitId,
    frame: FrameId,
    role: Role,
}

impl Quantity {
    pub(crate) const fn new(value: f64, unit: UnitId, frame: FrameId, role: Role) -> Self {
        Self {
            value,
            unit,
            frame,
            role,
        }
    }

    /// The numeric value, in this quantity's unit.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// The unit tag.
    #[must_use]
    pub const fn unit(self) -> UnitId {
        self.unit
    }

    /// The frame tag.
    #[must_use]
    pub const fn frame(self) -> FrameId {
        self.frame
    }

    /// The role (time point or duration).
    #[must_use]
    pub const fn role(self) -> Role {
        self.role
    }

    /// Checks whether the value is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    /// Multiplies by a dimensionless scalar, keeping role, unit and frame.
    ///
    /// This is the only way a bare numeric combines with a quantity.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            ..self
        }
    }
}
