//! Error types for the runtime-checked quantity layer.
//!
//! Every rejection carries the operation it occurred in and the mismatched
//! tags, and is raised before any arithmetic result is produced. None of
//! these errors are retryable: they indicate a programming error at the
//! call site, not a transient condition.

use std::fmt;

use thiserror::Error;

use crate::quantity::Role;

/// The operation a rejection occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Quantity addition.
    Add,
    /// Quantity subtraction.
    Sub,
    /// Same-frame unit conversion.
    Convert,
    /// Cross-frame conversion along a declared relation.
    Reframe,
    /// Frame map composition.
    Compose,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Sub => "subtract",
            Self::Convert => "convert",
            Self::Reframe => "reframe",
            Self::Compose => "compose",
        };
        f.write_str(name)
    }
}

/// Which tag axis an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// A unit of measurement tag.
    Unit,
    /// A reference frame tag.
    Frame,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unit => "unit",
            Self::Frame => "frame",
        };
        f.write_str(name)
    }
}

/// Errors raised by registry construction and quantity operations.
///
/// The mismatch variants are the runtime rendering of what `tempo-types`
/// rejects at compile time; the registration variants guard the startup
/// phase that builds the tag tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TempoError {
    /// Operands carry different unit tags. Identity of tags governs, not
    /// scale factors: this fires even when the numeric values would be
    /// "equivalent" after conversion.
    #[error("unit mismatch in {operation}: {left} vs {right}")]
    UnitMismatch {
        /// Operation that was rejected.
        operation: Op,
        /// Unit tag of the left operand.
        left: String,
        /// Unit tag of the right operand.
        right: String,
    },

    /// Operands carry different frame tags.
    #[error("frame mismatch in {operation}: {left} vs {right}")]
    FrameMismatch {
        /// Operation that was rejected.
        operation: Op,
        /// Frame tag of the left operand.
        left: String,
        /// Frame tag of the right operand.
        right: String,
    },

    /// The role combination is outside the Time/Duration algebra
    /// (Time + Time, Duration - Time).
    #[error("role mismatch in {operation}: {left} and {right} cannot combine")]
    RoleMismatch {
        /// Operation that was rejected.
        operation: Op,
        /// Role of the left operand.
        left: Role,
        /// Role of the right operand.
        right: Role,
    },

    /// Reframe requested between frames with no declared relationship.
    #[error("no declared relation between frames {from} and {to}")]
    UnregisteredConversion {
        /// Frame of the quantity.
        from: String,
        /// Requested target frame.
        to: String,
    },

    /// A tag name that was never registered.
    #[error("unregistered {kind} tag: {name}")]
    UnregisteredTag {
        /// Tag axis the name belongs to.
        kind: TagKind,
        /// The unknown name.
        name: String,
    },

    /// A tag was omitted (empty name, or a native-unit constructor on a
    /// frame that declares no native unit). There is no default unit or
    /// frame to fall back to.
    #[error("missing {kind} tag")]
    MissingTag {
        /// Tag axis the omission refers to.
        kind: TagKind,
    },

    /// Registration under a name that is already taken.
    #[error("duplicate {kind} tag: {name}")]
    DuplicateTag {
        /// Tag axis of the collision.
        kind: TagKind,
        /// The colliding name.
        name: String,
    },

    /// A unit or frame scale that is not finite and positive.
    #[error("invalid scale for {name}: {value} (must be finite and positive)")]
    InvalidScale {
        /// Name being registered.
        name: String,
        /// The rejected scale.
        value: f64,
    },

    /// A frame origin offset that is not finite.
    #[error("invalid offset for {name}: {value} (must be finite)")]
    InvalidOffset {
        /// Name being registered.
        name: String,
        /// The rejected offset.
        value: f64,
    },
}

impl TempoError {
    /// Creates a unit mismatch error.
    #[must_use]
    pub fn unit_mismatch(operation: Op, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::UnitMismatch {
            operation,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Creates a frame mismatch error.
    #[must_use]
    pub fn frame_mismatch(
        operation: Op,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self::FrameMismatch {
            operation,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Creates a role mismatch error.
    #[must_use]
    pub const fn role_mismatch(operation: Op, left: Role, right: Role) -> Self {
        Self::RoleMismatch {
            operation,
            left,
            right,
        }
    }

    /// Creates an unregistered conversion error.
    #[must_use]
    pub fn unregistered_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnregisteredConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates an unregistered tag error.
    #[must_use]
    pub fn unregistered(kind: TagKind, name: impl Into<String>) -> Self {
        Self::UnregisteredTag {
            kind,
            name: name.into(),
        }
    }

    /// Creates a duplicate tag error.
    #[must_use]
    pub fn duplicate(kind: TagKind, name: impl Into<String>) -> Self {
        Self::DuplicateTag {
            kind,
            name: name.into(),
        }
    }
}

/// Result type for registry and quantity operations.
pub type Result<T> = std::result::Result<T, TempoError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn unit_mismatch_display() {
        let err = TempoError::unit_mismatch(Op::Add, "seconds", "nanoseconds");
        let msg = err.to_string();
        assert!(msg.contains("unit mismatch in add"));
        assert!(msg.contains("seconds"));
        assert!(msg.contains("nanoseconds"));
    }

    #[test]
    fn frame_mismatch_display() {
        let err = TempoError::frame_mismatch(Op::Sub, "world", "mission");
        let msg = err.to_string();
        assert!(msg.contains("frame mismatch in subtract"));
        assert!(msg.contains("world"));
        assert!(msg.contains("mission"));
    }

    #[test]
    fn role_mismatch_display() {
        let err = TempoError::role_mismatch(Op::Add, Role::Time, Role::Time);
        assert!(err.to_string().contains("time and time cannot combine"));
    }

    #[test]
    fn unregistered_conversion_display() {
        let err = TempoError::unregistered_conversion("world", "sim");
        let msg = err.to_string();
        assert!(msg.contains("no declared relation"));
        assert!(msg.contains("world"));
        assert!(msg.contains("sim"));
    }

    #[test]
    fn unregistered_tag_display() {
        let err = TempoError::unregistered(TagKind::Unit, "fortnights");
        assert!(err.to_string().contains("unregistered unit tag: fortnights"));
    }

    #[test]
    fn missing_tag_display() {
        let err = TempoError::MissingTag {
            kind: TagKind::Frame,
        };
        assert!(err.to_string().contains("missing frame tag"));
    }
}
