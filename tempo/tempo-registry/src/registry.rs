//! Tag registries: built at startup, sealed, then read-only.
//!
//! Registration order cannot affect behavior mid-run because registration
//! and use are separated by construction: [`RegistryBuilder`] is consumed by
//! [`seal`](RegistryBuilder::seal), and only the sealed [`Registry`] can
//! mint or combine quantities.

use hashbrown::HashMap;
use tracing::{debug, info};

use tempo_types::{
    Days, Hours, Microseconds, Milliseconds, Minutes, Nanoseconds, Seconds, TimeUnit, Years,
};

use crate::error::{Op, Result, TagKind, TempoError};
use crate::framemap::FrameMap;
use crate::quantity::{FrameId, Quantity, Role, UnitId};

#[derive(Debug, Clone)]
struct UnitSpec {
    name: String,
    seconds_per_unit: f64,
}

#[derive(Debug, Clone)]
struct FrameSpec {
    name: String,
    parent: Option<FrameId>,
    /// Parent seconds per second of this frame.
    scale: f64,
    /// Parent coordinate (in seconds) of this frame's origin.
    offset_seconds: f64,
    native_unit: Option<UnitId>,
}

/// Accumulates unit and frame registrations during startup.
///
/// Consumed by [`seal`](Self::seal); there is no way to register a tag once
/// quantities are being constructed.
///
/// # Example
///
/// ```
/// use tempo_registry::Registry;
///
/// let mut builder = Registry::builder();
/// builder.unit("seconds", 1.0)?;
/// builder.unit("nanoseconds", 1e-9)?;
/// builder.unit_alias("secs", "seconds")?;
/// builder.frame("world_time")?;
/// let registry = builder.seal();
///
/// assert_eq!(registry.unit_count(), 2);
/// # Ok::<(), tempo_registry::TempoError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    units: Vec<UnitSpec>,
    unit_ids: HashMap<String, UnitId>,
    frames: Vec<FrameSpec>,
    frame_ids: HashMap<String, FrameId>,
}

fn validated(kind: TagKind, name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TempoError::MissingTag { kind });
    }
    Ok(trimmed)
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unit with its scale factor to the canonical base unit
    /// (seconds per one of this unit).
    ///
    /// # Errors
    ///
    /// [`TempoError::MissingTag`] for a blank name,
    /// [`TempoError::DuplicateTag`] for a name already taken,
    /// [`TempoError::InvalidScale`] unless the scale is finite and positive.
    pub fn unit(&mut self, name: &str, seconds_per_unit: f64) -> Result<UnitId> {
        let name = validated(TagKind::Unit, name)?;
        if self.unit_ids.contains_key(name) {
            return Err(TempoError::duplicate(TagKind::Unit, name));
        }
        if !seconds_per_unit.is_finite() || seconds_per_unit <= 0.0 {
            return Err(TempoError::InvalidScale {
                name: name.to_owned(),
                value: seconds_per_unit,
            });
        }

        let id = UnitId(u32::try_from(self.units.len()).unwrap_or(u32::MAX));
        self.units.push(UnitSpec {
            name: name.to_owned(),
            seconds_per_unit,
        });
        self.unit_ids.insert(name.to_owned(), id);
        debug!(name, seconds_per_unit, "registered time unit");
        Ok(id)
    }

    /// Registers `alias` as another name for an already-registered unit.
    ///
    /// Aliased names resolve to the *same* tag: quantities constructed
    /// through either name are compatible. This is the only way two names
    /// compare equal; separately registered units stay distinct even with
    /// identical scale factors.
    ///
    /// # Errors
    ///
    /// [`TempoError::DuplicateTag`] if `alias` is taken,
    /// [`TempoError::UnregisteredTag`] if `existing` is unknown.
    pub fn unit_alias(&mut self, alias: &str, existing: &str) -> Result<UnitId> {
        let alias = validated(TagKind::Unit, alias)?;
        if self.unit_ids.contains_key(alias) {
            return Err(TempoError::duplicate(TagKind::Unit, alias));
        }
        let existing = validated(TagKind::Unit, existing)?;
        let id = self
            .unit_ids
            .get(existing)
            .copied()
            .ok_or_else(|| TempoError::unregistered(TagKind::Unit, existing))?;

        self.unit_ids.insert(alias.to_owned(), id);
        debug!(alias, of = existing, "registered unit alias");
        Ok(id)
    }

    /// Registers the stock time units (`nanoseconds` through `years`),
    /// matching the static tags in `tempo-types`.
    ///
    /// # Errors
    ///
    /// [`TempoError::DuplicateTag`] if any stock name was already
    /// registered.
    pub fn standard_units(&mut self) -> Result<()> {
        self.unit(Nanoseconds::NAME, Nanoseconds::SECONDS_PER_UNIT)?;
        self.unit(Microseconds::NAME, Microseconds::SECONDS_PER_UNIT)?;
        self.unit(Milliseconds::NAME, Milliseconds::SECONDS_PER_UNIT)?;
        self.unit(Seconds::NAME, Seconds::SECONDS_PER_UNIT)?;
        self.unit(Minutes::NAME, Minutes::SECONDS_PER_UNIT)?;
        self.unit(Hours::NAME, Hours::SECONDS_PER_UNIT)?;
        self.unit(Days::NAME, Days::SECONDS_PER_UNIT)?;
        self.unit(Years::NAME, Years::SECONDS_PER_UNIT)?;
        Ok(())
    }

    /// Registers a root frame with no declared relations.
    ///
    /// # Errors
    ///
    /// [`TempoError::MissingTag`] for a blank name,
    /// [`TempoError::DuplicateTag`] for a name already taken.
    pub fn frame(&mut self, name: &str) -> Result<FrameId> {
        let name = validated(TagKind::Frame, name)?;
        if self.frame_ids.contains_key(name) {
            return Err(TempoError::duplicate(TagKind::Frame, name));
        }

        let id = FrameId(u32::try_from(self.frames.len()).unwrap_or(u32::MAX));
        self.frames.push(FrameSpec {
            name: name.to_owned(),
            parent: None,
            scale: 1.0,
            offset_seconds: 0.0,
            native_unit: None,
        });
        self.frame_ids.insert(name.to_owned(), id);
        debug!(name, "registered root frame");
        Ok(id)
    }

    /// Registers a frame with a declared affine relation to `parent`:
    /// a point at `x` seconds in the new frame sits at
    /// `scale * x + offset_seconds` seconds in the parent.
    ///
    /// The linkage is data consumed by [`Registry::reframe`] and
    /// [`Registry::frame_map`]; generic arithmetic never follows it.
    ///
    /// # Errors
    ///
    /// As [`frame`](Self::frame), plus [`TempoError::UnregisteredTag`] for
    /// an unknown parent, [`TempoError::InvalidScale`] unless the scale is
    /// finite and positive, and [`TempoError::InvalidOffset`] for a
    /// non-finite offset.
    pub fn derived_frame(
        &mut self,
        name: &str,
        parent: &str,
        offset_seconds: f64,
        scale: f64,
    ) -> Result<FrameId> {
        let name = validated(TagKind::Frame, name)?;
        if self.frame_ids.contains_key(name) {
            return Err(TempoError::duplicate(TagKind::Frame, name));
        }
        let parent = validated(TagKind::Frame, parent)?;
        let parent_id = self
            .frame_ids
            .get(parent)
            .copied()
            .ok_or_else(|| TempoError::unregistered(TagKind::Frame, parent))?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(TempoError::InvalidScale {
                name: name.to_owned(),
                value: scale,
            });
        }
        if !offset_seconds.is_finite() {
            return Err(TempoError::InvalidOffset {
                name: name.to_owned(),
                value: offset_seconds,
            });
        }

        let id = FrameId(u32::try_from(self.frames.len()).unwrap_or(u32::MAX));
        self.frames.push(FrameSpec {
            name: name.to_owned(),
            parent: Some(parent_id),
            scale,
            offset_seconds,
            native_unit: None,
        });
        self.frame_ids.insert(name.to_owned(), id);
        debug!(name, parent, offset_seconds, scale, "registered derived frame");
        Ok(id)
    }

    /// Declares `unit` as the native unit of `frame`, replacing any earlier
    /// declaration. Used by the `*_in_native` constructors on [`Registry`].
    ///
    /// # Errors
    ///
    /// [`TempoError::UnregisteredTag`] if either name is unknown.
    pub fn native_unit(&mut self, frame: &str, unit: &str) -> Result<()> {
        let frame = validated(TagKind::Frame, frame)?;
        let unit = validated(TagKind::Unit, unit)?;
        let unit_id = self
            .unit_ids
            .get(unit)
            .copied()
            .ok_or_else(|| TempoError::unregistered(TagKind::Unit, unit))?;
        let frame_id = self
            .frame_ids
            .get(frame)
            .copied()
            .ok_or_else(|| TempoError::unregistered(TagKind::Frame, frame))?;

        // Registration order guarantees the index is in range.
        if let Some(spec) = self.frames.get_mut(frame_id.0 as usize) {
            spec.native_unit = Some(unit_id);
        }
        debug!(frame, unit, "declared native unit");
        Ok(())
    }

    /// Seals the registry. No further registration is possible: the builder
    /// is gone, and the returned [`Registry`] is read-only (and therefore
    /// freely shareable across threads).
    #[must_use]
    pub fn seal(self) -> Registry {
        info!(
            units = self.units.len(),
            frames = self.frames.len(),
            "time registry sealed"
        );
        Registry {
            units: self.units,
            unit_ids: self.unit_ids,
            frames: self.frames,
            frame_ids: self.frame_ids,
        }
    }
}

/// A sealed, read-only tag registry: the runtime fallback for tag checking
/// where tags only become known at startup.
///
/// All quantity construction and every binary operation goes through the
/// registry, which checks unit tag, frame tag, then role, in that order,
/// and refuses to produce a value on any mismatch. Share behind an `Arc`
/// for process-wide use.
///
/// # Example
///
/// The motivating bug, caught at the operation boundary:
///
/// ```
/// use tempo_registry::{Registry, TempoError};
///
/// let mut builder = Registry::builder();
/// builder.standard_units()?;
/// builder.frame("world_time")?;
/// let registry = builder.seal();
///
/// let intended = registry.duration(1.0, "seconds", "world_time")?;
/// let actual = registry.duration(1.0, "nanoseconds", "world_time")?;
///
/// // Numerically both are "1.0"; the tags refuse to combine.
/// let err = registry.add(intended, actual).unwrap_err();
/// assert!(matches!(err, TempoError::UnitMismatch { .. }));
/// # Ok::<(), tempo_registry::TempoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    units: Vec<UnitSpec>,
    unit_ids: HashMap<String, UnitId>,
    frames: Vec<FrameSpec>,
    frame_ids: HashMap<String, FrameId>,
}

impl Registry {
    /// Creates a builder for the startup registration phase.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Number of registered units (aliases not counted).
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Number of registered frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Resolves a unit name (or alias) to its tag id.
    ///
    /// # Errors
    ///
    /// [`TempoError::MissingTag`] for a blank name,
    /// [`TempoError::UnregisteredTag`] for an unknown one.
    pub fn unit_id(&self, name: &str) -> Result<UnitId> {
        let name = validated(TagKind::Unit, name)?;
        self.unit_ids
            .get(name)
            .copied()
            .ok_or_else(|| TempoError::unregistered(TagKind::Unit, name))
    }

    /// Resolves a frame name to its tag id.
    ///
    /// # Errors
    ///
    /// [`TempoError::MissingTag`] for a blank name,
    /// [`TempoError::UnregisteredTag`] for an unknown one.
    pub fn frame_id(&self, name: &str) -> Result<FrameId> {
        let name = validated(TagKind::Frame, name)?;
        self.frame_ids
            .get(name)
            .copied()
            .ok_or_else(|| TempoError::unregistered(TagKind::Frame, name))
    }

    /// Canonical name of a unit tag, if the id belongs to this registry.
    #[must_use]
    pub fn unit_name(&self, id: UnitId) -> Option<&str> {
        self.units.get(id.0 as usize).map(|spec| spec.name.as_str())
    }

    /// Canonical name of a frame tag, if the id belongs to this registry.
    #[must_use]
    pub fn frame_name(&self, id: FrameId) -> Option<&str> {
        self.frames
            .get(id.0 as usize)
            .map(|spec| spec.name.as_str())
    }

    /// Scale factor of a unit tag (seconds per unit).
    #[must_use]
    pub fn seconds_per_unit(&self, id: UnitId) -> Option<f64> {
        self.units
            .get(id.0 as usize)
            .map(|spec| spec.seconds_per_unit)
    }

    fn unit_spec(&self, id: UnitId) -> Result<&UnitSpec> {
        self.units
            .get(id.0 as usize)
            .ok_or_else(|| TempoError::unregistered(TagKind::Unit, format!("#{}", id.0)))
    }

    fn frame_spec(&self, id: FrameId) -> Result<&FrameSpec> {
        self.frames
            .get(id.0 as usize)
            .ok_or_else(|| TempoError::unregistered(TagKind::Frame, format!("#{}", id.0)))
    }

    /// Constructs a duration with explicit unit and frame tags.
    ///
    /// # Errors
    ///
    /// [`TempoError::MissingTag`] / [`TempoError::UnregisteredTag`] when
    /// either tag name is blank or unknown.
    pub fn duration(&self, value: f64, unit: &str, frame: &str) -> Result<Quantity> {
        Ok(Quantity::new(
            value,
            self.unit_id(unit)?,
            self.frame_id(frame)?,
            Role::Duration,
        ))
    }

    /// Constructs an absolute time point with explicit unit and frame tags.
    ///
    /// # Errors
    ///
    /// As [`duration`](Self::duration).
    pub fn time(&self, value: f64, unit: &str, frame: &str) -> Result<Quantity> {
        Ok(Quantity::new(
            value,
            self.unit_id(unit)?,
            self.frame_id(frame)?,
            Role::Time,
        ))
    }

    /// Constructs a duration in the frame's declared native unit.
    ///
    /// # Errors
    ///
    /// [`TempoError::MissingTag`] if the frame declares no native unit;
    /// there is no default to fall back to.
    pub fn duration_in_native(&self, value: f64, frame: &str) -> Result<Quantity> {
        let frame_id = self.frame_id(frame)?;
        let unit = self
            .frame_spec(frame_id)?
            .native_unit
            .ok_or(TempoError::MissingTag {
                kind: TagKind::Unit,
            })?;
        Ok(Quantity::new(value, unit, frame_id, Role::Duration))
    }

    /// Constructs a time point in the frame's declared native unit.
    ///
    /// # Errors
    ///
    /// As [`duration_in_native`](Self::duration_in_native).
    pub fn time_in_native(&self, value: f64, frame: &str) -> Result<Quantity> {
        let frame_id = self.frame_id(frame)?;
        let unit = self
            .frame_spec(frame_id)?
            .native_unit
            .ok_or(TempoError::MissingTag {
                kind: TagKind::Unit,
            })?;
        Ok(Quantity::new(value, unit, frame_id, Role::Time))
    }

    fn check_operands(&self, operation: Op, a: Quantity, b: Quantity) -> Result<()> {
        if a.unit() != b.unit() {
            return Err(TempoError::unit_mismatch(
                operation,
                self.unit_spec(a.unit())?.name.clone(),
                self.unit_spec(b.unit())?.name.clone(),
            ));
        }
        if a.frame() != b.frame() {
            return Err(TempoError::frame_mismatch(
                operation,
                self.frame_spec(a.frame())?.name.clone(),
                self.frame_spec(b.frame())?.name.clone(),
            ));
        }
        Ok(())
    }

    /// Adds two quantities. Valid only with matching unit and frame tags;
    /// the role result follows the Time/Duration algebra.
    ///
    /// # Errors
    ///
    /// [`TempoError::UnitMismatch`] / [`TempoError::FrameMismatch`] on tag
    /// inequality (checked in that order, before roles), and
    /// [`TempoError::RoleMismatch`] for Time + Time.
    pub fn add(&self, a: Quantity, b: Quantity) -> Result<Quantity> {
        self.check_operands(Op::Add, a, b)?;
        let role = match (a.role(), b.role()) {
            (Role::Duration, Role::Duration) => Role::Duration,
            (Role::Time, Role::Duration) | (Role::Duration, Role::Time) => Role::Time,
            (Role::Time, Role::Time) => {
                return Err(TempoError::role_mismatch(Op::Add, Role::Time, Role::Time));
            }
        };
        Ok(Quantity::new(
            a.value() + b.value(),
            a.unit(),
            a.frame(),
            role,
        ))
    }

    /// Subtracts `b` from `a`. Time − Time yields a Duration within the
    /// shared frame; Duration − Time is rejected.
    ///
    /// # Errors
    ///
    /// As [`add`](Self::add), with [`TempoError::RoleMismatch`] for
    /// Duration − Time.
    pub fn sub(&self, a: Quantity, b: Quantity) -> Result<Quantity> {
        self.check_operands(Op::Sub, a, b)?;
        let role = match (a.role(), b.role()) {
            (Role::Duration, Role::Duration) | (Role::Time, Role::Time) => Role::Duration,
            (Role::Time, Role::Duration) => Role::Time,
            (Role::Duration, Role::Time) => {
                return Err(TempoError::role_mismatch(
                    Op::Sub,
                    Role::Duration,
                    Role::Time,
                ));
            }
        };
        Ok(Quantity::new(
            a.value() - b.value(),
            a.unit(),
            a.frame(),
            role,
        ))
    }

    /// Re-expresses a quantity in another registered unit, staying in its
    /// frame. Frame-crossing is not expressible here; that is
    /// [`reframe`](Self::reframe), a separate operation.
    ///
    /// # Errors
    ///
    /// [`TempoError::UnregisteredTag`] / [`TempoError::MissingTag`] for the
    /// target unit name.
    pub fn convert(&self, q: Quantity, unit: &str) -> Result<Quantity> {
        let target = self.unit_id(unit)?;
        if target == q.unit() {
            return Ok(q);
        }
        let from = self.unit_spec(q.unit())?;
        let to = self.unit_spec(target)?;
        Ok(Quantity::new(
            q.value() * (from.seconds_per_unit / to.seconds_per_unit),
            target,
            q.frame(),
            q.role(),
        ))
    }

    fn map_to_root(&self, frame: FrameId) -> Result<(FrameId, f64, f64)> {
        let mut current = frame;
        let mut scale = 1.0;
        let mut offset = 0.0;
        loop {
            let spec = self.frame_spec(current)?;
            let Some(parent) = spec.parent else {
                return Ok((current, scale, offset));
            };
            scale *= spec.scale;
            offset = spec.scale * offset + spec.offset_seconds;
            current = parent;
        }
    }

    fn frame_map_ids(&self, from: FrameId, to: FrameId) -> Result<FrameMap> {
        let from_name = self.frame_spec(from)?.name.clone();
        let to_name = self.frame_spec(to)?.name.clone();
        let (root_a, scale_a, offset_a) = self.map_to_root(from)?;
        let (root_b, scale_b, offset_b) = self.map_to_root(to)?;
        if root_a != root_b {
            return Err(TempoError::unregistered_conversion(from_name, to_name));
        }
        // from -> root, then the inverse of to -> root.
        Ok(FrameMap::new(
            from_name,
            to_name,
            scale_a / scale_b,
            (offset_a - offset_b) / scale_b,
        ))
    }

    /// The declared affine relation between two frames, as a value.
    ///
    /// Frames are related when they reach a common root through their
    /// declared parent links; the maps along the path are composed.
    ///
    /// # Errors
    ///
    /// [`TempoError::UnregisteredConversion`] between frames with no common
    /// root, and the usual lookup errors for unknown names.
    pub fn frame_map(&self, from: &str, to: &str) -> Result<FrameMap> {
        self.frame_map_ids(self.frame_id(from)?, self.frame_id(to)?)
    }

    /// Moves a quantity into another frame along declared relations,
    /// keeping its unit. Time points get the full affine map; durations
    /// are vectors, so the origin offset cancels and only the rate applies.
    ///
    /// # Errors
    ///
    /// As [`frame_map`](Self::frame_map).
    pub fn reframe(&self, q: Quantity, frame: &str) -> Result<Quantity> {
        let target = self.frame_id(frame)?;
        if target == q.frame() {
            return Ok(q);
        }
        let map = self.frame_map_ids(q.frame(), target)?;
        let spu = self.unit_spec(q.unit())?.seconds_per_unit;
        let seconds = q.value() * spu;
        let mapped = match q.role() {
            Role::Time => map.apply_point(seconds),
            Role::Duration => map.apply_vector(seconds),
        };
        Ok(Quantity::new(mapped / spu, q.unit(), target, q.role()))
    }
}
