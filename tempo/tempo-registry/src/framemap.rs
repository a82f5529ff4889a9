//! Reified affine relations between frames.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Op, Result, TempoError};

/// The declared affine relation between two frames, as a value.
///
/// Obtained from [`Registry::frame_map`](crate::Registry::frame_map); maps
/// canonical (seconds-valued) coordinates of the domain frame into the
/// codomain frame. Points get the full map, intervals only the rate: an
/// interval is a vector on the time line and the origin offset cancels.
///
/// # Example
///
/// ```
/// use tempo_registry::Registry;
///
/// let mut builder = Registry::builder();
/// builder.standard_units()?;
/// builder.frame("world_time")?;
/// // Mission clock starts 100 s into world time, ticking at the same rate.
/// builder.derived_frame("mission_time", "world_time", 100.0, 1.0)?;
/// let registry = builder.seal();
///
/// let map = registry.frame_map("mission_time", "world_time")?;
/// assert!((map.apply_point(0.0) - 100.0).abs() < 1e-12);
/// assert!((map.apply_vector(5.0) - 5.0).abs() < 1e-12);
///
/// // The inverse goes back.
/// assert!((map.inverse().apply_point(100.0)).abs() < 1e-12);
/// # Ok::<(), tempo_registry::TempoError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameMap {
    domain: String,
    codomain: String,
    scale: f64,
    offset_seconds: f64,
}

impl FrameMap {
    pub(crate) const fn new(
        domain: String,
        codomain: String,
        scale: f64,
        offset_seconds: f64,
    ) -> Self {
        Self {
            domain,
            codomain,
            scale,
            offset_seconds,
        }
    }

    /// Name of the frame this map takes coordinates from.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Name of the frame this map produces coordinates in.
    #[must_use]
    pub fn codomain(&self) -> &str {
        &self.codomain
    }

    /// Codomain seconds per domain second.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Codomain coordinate (in seconds) of the domain origin.
    #[must_use]
    pub const fn offset_seconds(&self) -> f64 {
        self.offset_seconds
    }

    /// Maps an absolute coordinate (seconds in the domain frame).
    #[must_use]
    pub fn apply_point(&self, seconds: f64) -> f64 {
        self.scale * seconds + self.offset_seconds
    }

    /// Maps an interval (seconds in the domain frame). Offset cancels.
    #[must_use]
    pub fn apply_vector(&self, seconds: f64) -> f64 {
        self.scale * seconds
    }

    /// The map from codomain back to domain.
    ///
    /// Registration rejects non-positive scales, so the inverse always
    /// exists.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            domain: self.codomain.clone(),
            codomain: self.domain.clone(),
            scale: 1.0 / self.scale,
            offset_seconds: -self.offset_seconds / self.scale,
        }
    }

    /// Chains this map with one that continues from its codomain
    /// (`self: A -> B`, `then: B -> C`, result `A -> C`).
    ///
    /// # Errors
    ///
    /// Returns [`TempoError::FrameMismatch`] if `then` does not start where
    /// this map ends.
    pub fn compose(&self, then: &Self) -> Result<Self> {
        if self.codomain != then.domain {
            return Err(TempoError::frame_mismatch(
                Op::Compose,
                self.codomain.clone(),
                then.domain.clone(),
            ));
        }
        Ok(Self {
            domain: self.domain.clone(),
            codomain: then.codomain.clone(),
            scale: then.scale * self.scale,
            offset_seconds: then.scale * self.offset_seconds + then.offset_seconds,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn map(domain: &str, codomain: &str, scale: f64, offset: f64) -> FrameMap {
        FrameMap::new(domain.to_owned(), codomain.to_owned(), scale, offset)
    }

    #[test]
    fn point_gets_full_affine() {
        let m = map("a", "b", 2.0, 10.0);
        assert_eq!(m.apply_point(3.0), 16.0);
    }

    #[test]
    fn vector_gets_rate_only() {
        let m = map("a", "b", 2.0, 10.0);
        assert_eq!(m.apply_vector(3.0), 6.0);
    }

    #[test]
    fn inverse_round_trips() {
        let m = map("a", "b", 2.0, 10.0);
        let inv = m.inverse();
        assert_eq!(inv.domain(), "b");
        assert_eq!(inv.codomain(), "a");
        assert_relative_eq!(inv.apply_point(m.apply_point(3.25)), 3.25);
    }

    #[test]
    fn compose_chains_affines() {
        let ab = map("a", "b", 2.0, 1.0);
        let bc = map("b", "c", 3.0, 5.0);
        let ac = ab.compose(&bc).unwrap();
        assert_eq!(ac.domain(), "a");
        assert_eq!(ac.codomain(), "c");
        // x -> 3 * (2x + 1) + 5
        assert_relative_eq!(ac.apply_point(4.0), 32.0);
    }

    #[test]
    fn compose_rejects_broken_chain() {
        let ab = map("a", "b", 1.0, 0.0);
        let cd = map("c", "d", 1.0, 0.0);
        let err = ab.compose(&cd).unwrap_err();
        assert!(matches!(err, TempoError::FrameMismatch { .. }));
    }
}
