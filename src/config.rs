//! Cable setup parameters.

use crate::error::{CableError, Result};
use crate::float::Float;
use crate::vec::Vec3;
use serde::{Deserialize, Serialize};

/// Smallest sub-step the simulation will run, in seconds.
pub const MIN_SUB_STEP: f32 = 0.005;

/// Largest resolved segment count a cable accepts.
pub const MAX_SEGMENT_COUNT: usize = 65_535;

/// Largest number of sides around the tube.
pub const MAX_SIDES: usize = 1024;

/// Configuration for a cable simulation. Read once at construction.
///
/// # Builder Pattern
/// ```
/// use tether::config::CableConfig;
/// use tether::vec::Vec3;
///
/// let config: CableConfig<f32> = CableConfig::new()
///     .with_length(4.0)
///     .with_segment_count(16)
///     .with_tube(0.05, 8)
///     .with_solver_iterations(4)
///     .with_external_force(Vec3::new(1.0, 0.0, 0.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(serialize = "F: Float + Serialize", deserialize = "F: Float + Deserialize<'de>"))]
pub struct CableConfig<F: Float> {
    /// Rest length of the whole cable. Default: 0.5.
    pub length: F,
    /// Explicit segment count; wins over `segments_per_unit` when > 0. Default: 5.
    pub segment_count: usize,
    /// Density used when `segment_count` is 0. Default: 2.
    pub segments_per_unit: F,
    /// Tube diameter. Also sets the collision radius. Default: 0.1.
    pub width: F,
    /// Polygon count of the tube cross-section. Default: 6.
    pub sides: usize,
    /// Longitudinal UV tiling factor. Default: 1.
    pub tiled_material: F,
    /// Integrate+solve passes per sub-step. Default: 1.
    pub verlet_iterations: usize,
    /// Constraint passes per integrate. Default: 1.
    pub solver_iterations: usize,
    /// Solve bending pairs `(i, i + 2)` as well. Default: false.
    pub enable_stiffness: bool,
    /// Run the collision pass. Default: true.
    pub enable_collision: bool,
    /// Carry leftover time across ticks. Default: true.
    pub use_sub_stepping: bool,
    /// Configured sub-step, floored to [`MIN_SUB_STEP`]. Default: 0.
    pub sub_step_time: F,
    /// Tangential damping on contact, in [0, 1]. Default: 0.
    pub friction: F,
    /// World gravity acceleration. Default: (0, -9.81, 0).
    pub gravity: Vec3<F>,
    /// Per-cable gravity multiplier. Default: 1.
    pub gravity_scale: F,
    /// Constant acceleration added to every free particle. Default: zero.
    pub external_force: Vec3<F>,
}

impl<F: Float> CableConfig<F> {
    pub fn new() -> Self {
        CableConfig {
            length: F::from_f32(0.5),
            segment_count: 5,
            segments_per_unit: F::two(),
            width: F::from_f32(0.1),
            sides: 6,
            tiled_material: F::one(),
            verlet_iterations: 1,
            solver_iterations: 1,
            enable_stiffness: false,
            enable_collision: true,
            use_sub_stepping: true,
            sub_step_time: F::zero(),
            friction: F::zero(),
            gravity: Vec3::new(F::zero(), F::from_f32(-9.81), F::zero()),
            gravity_scale: F::one(),
            external_force: Vec3::zero(),
        }
    }

    pub fn with_length(mut self, length: F) -> Self {
        self.length = length;
        self
    }

    pub fn with_segment_count(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    /// Derive the segment count from `length` instead of fixing it.
    pub fn with_segments_per_unit(mut self, density: F) -> Self {
        self.segment_count = 0;
        self.segments_per_unit = density;
        self
    }

    pub fn with_tube(mut self, width: F, sides: usize) -> Self {
        self.width = width;
        self.sides = sides;
        self
    }

    pub fn with_tiled_material(mut self, tiling: F) -> Self {
        self.tiled_material = tiling;
        self
    }

    pub fn with_verlet_iterations(mut self, iterations: usize) -> Self {
        self.verlet_iterations = iterations;
        self
    }

    pub fn with_solver_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_stiffness(mut self, enabled: bool) -> Self {
        self.enable_stiffness = enabled;
        self
    }

    pub fn with_collision(mut self, enabled: bool) -> Self {
        self.enable_collision = enabled;
        self
    }

    pub fn with_sub_stepping(mut self, enabled: bool, sub_step_time: F) -> Self {
        self.use_sub_stepping = enabled;
        self.sub_step_time = sub_step_time;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>, scale: F) -> Self {
        self.gravity = gravity;
        self.gravity_scale = scale;
        self
    }

    pub fn with_external_force(mut self, force: Vec3<F>) -> Self {
        self.external_force = force;
        self
    }

    /// Segment count after applying the density fallback.
    pub fn resolved_segment_count(&self) -> usize {
        if self.segment_count > 0 {
            return self.segment_count;
        }
        let raw = (self.length * self.segments_per_unit).ceil();
        if raw.is_finite() && raw > F::zero() {
            raw.to_f32() as usize
        } else {
            0
        }
    }

    /// Uniform rest length of one segment.
    pub fn rest_length(&self) -> Result<F> {
        let segments = self.resolved_segment_count();
        if segments == 0 {
            return Err(CableError::InvalidSegmentCount);
        }
        Ok(self.length / F::from_usize(segments))
    }

    /// Sub-step threshold actually used by the accumulator.
    pub fn effective_sub_step(&self) -> F {
        self.sub_step_time.max(F::from_f32(MIN_SUB_STEP))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.length.is_finite() || self.length <= F::zero() {
            return Err(CableError::InvalidLength(self.length.to_f32() as f64));
        }
        let segments = self.resolved_segment_count();
        if segments == 0 {
            return Err(CableError::InvalidSegmentCount);
        }
        if segments > MAX_SEGMENT_COUNT {
            return Err(CableError::ValueOutOfRange {
                field: "segment_count",
                min: 1.0,
                max: MAX_SEGMENT_COUNT as f64,
                value: segments as f64,
            });
        }
        if !self.width.is_finite() || self.width <= F::zero() {
            return Err(CableError::InvalidWidth(self.width.to_f32() as f64));
        }
        if self.sides < 3 || self.sides > MAX_SIDES {
            return Err(CableError::InvalidSides { sides: self.sides });
        }
        check_range("friction", self.friction, 0.0, 1.0)?;
        check_range("sub_step_time", self.sub_step_time, 0.0, f64::MAX)?;
        check_range("verlet_iterations", F::from_usize(self.verlet_iterations), 1.0, f64::MAX)?;
        check_range("solver_iterations", F::from_usize(self.solver_iterations), 1.0, f64::MAX)?;
        if !self.gravity.is_finite() || !self.external_force.is_finite() || !self.gravity_scale.is_finite() {
            return Err(CableError::ValueOutOfRange {
                field: "forces",
                min: f64::MIN,
                max: f64::MAX,
                value: f64::NAN,
            });
        }
        Ok(())
    }

    /// Parse a TOML document. Missing keys fall back to defaults.
    #[cfg(feature = "std")]
    pub fn from_toml_str(source: &str) -> Result<Self>
    where
        F: for<'de> Deserialize<'de>,
    {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        log::debug!(
            "loaded cable config: length={}, segments={}",
            config.length,
            config.resolved_segment_count()
        );
        Ok(config)
    }
}

impl<F: Float> Default for CableConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_range<F: Float>(field: &'static str, value: F, min: f64, max: f64) -> Result<()> {
    let v = value.to_f32() as f64;
    if !value.is_finite() || v < min || v > max {
        return Err(CableError::ValueOutOfRange { field, min, max, value: v });
    }
    Ok(())
}
