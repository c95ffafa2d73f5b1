//! Light model: point and spot lights sharing position, color, power, decay
//! and an enabled flag.
//!
//! Decay, beam width and rotation are only reachable through setters that
//! hold their invariants: decay >= 1, beam width >= 0.1, rotation in [0, 2π).

pub mod commands;
pub mod registry;

pub use commands::{execute, LightCommand};
pub use registry::{LightId, LightRegistry};

use core::f32::consts::TAU;
use glam::{Vec3, Vec4};

/// Smallest stored decay. Lower values are clamped up to this.
pub const MIN_DECAY: f32 = 1.0;
/// Smallest stored spot beam-width exponent.
pub const MIN_BEAM_WIDTH: f32 = 0.1;

/// Wrap an angle in radians into [0, 2π), keeping it congruent mod 2π.
pub fn wrap_angle(theta: f32) -> f32 {
    let r = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU.
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Geometry-specific part of a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightShape {
    /// Radiates uniformly from its position.
    Point,
    /// Cone aimed across the surface.
    Spot(SpotCone),
}

/// Spot light cone: aim (rotation in the surface plane plus a Z component
/// tilting it into the surface) and cosine-power sharpness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotCone {
    direction_z: f32,
    rotation: f32,
    beam_width: f32,
}

impl SpotCone {
    pub fn new(direction_z: f32, rotation: f32, beam_width: f32) -> Self {
        let mut cone = Self {
            direction_z: 0.0,
            rotation: 0.0,
            beam_width: MIN_BEAM_WIDTH,
        };
        cone.set_direction_z(direction_z);
        cone.set_rotation(rotation);
        cone.set_beam_width(beam_width);
        cone
    }

    pub fn direction_z(&self) -> f32 {
        self.direction_z
    }

    /// Steepness into the surface; negative values point at it.
    pub fn set_direction_z(&mut self, z: f32) {
        debug_assert!(z.is_finite(), "spot direction Z must be finite");
        self.direction_z = z;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Store `theta` wrapped into [0, 2π).
    pub fn set_rotation(&mut self, theta: f32) {
        debug_assert!(theta.is_finite(), "spot rotation must be finite");
        self.rotation = wrap_angle(theta);
    }

    pub fn beam_width(&self) -> f32 {
        self.beam_width
    }

    /// Store the cone exponent, clamped to at least `MIN_BEAM_WIDTH`.
    pub fn set_beam_width(&mut self, exponent: f32) {
        debug_assert!(!exponent.is_nan(), "spot beam width must not be NaN");
        self.beam_width = exponent.max(MIN_BEAM_WIDTH);
    }

    /// Unit aim vector: `(cos r, sin r, direction_z)` normalised.
    pub fn direction(&self) -> Vec3 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec3::new(cos, sin, self.direction_z).normalize_or_zero()
    }
}

impl Default for SpotCone {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// A point or spot light.
///
/// `position.x`/`position.y` are in working-buffer pixels; `position.z` is
/// the height above the surface plane and only feeds the falloff math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// RGBA in [0, 1]. Alpha is carried but does not scale radiance.
    pub color: Vec4,
    /// Scalar gain, typically [0, 1.5].
    pub power: f32,
    /// Disabled lights stay registered but contribute nothing.
    pub enabled: bool,
    decay: f32,
    shape: LightShape,
}

impl Light {
    /// Enabled point light.
    pub fn point(position: Vec3, color: Vec4, power: f32, decay: f32) -> Self {
        let mut light = Self {
            position,
            color,
            power,
            enabled: true,
            decay: MIN_DECAY,
            shape: LightShape::Point,
        };
        light.set_decay(decay);
        light
    }

    /// Enabled spot light.
    pub fn spot(position: Vec3, color: Vec4, power: f32, decay: f32, cone: SpotCone) -> Self {
        let mut light = Self::point(position, color, power, decay);
        light.shape = LightShape::Spot(cone);
        light
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Store the falloff coefficient, clamped to at least `MIN_DECAY`.
    pub fn set_decay(&mut self, decay: f32) {
        debug_assert!(!decay.is_nan(), "light decay must not be NaN");
        self.decay = decay.max(MIN_DECAY);
    }

    pub fn shape(&self) -> &LightShape {
        &self.shape
    }

    pub fn is_spot(&self) -> bool {
        matches!(self.shape, LightShape::Spot(_))
    }

    pub fn cone(&self) -> Option<&SpotCone> {
        match &self.shape {
            LightShape::Spot(cone) => Some(cone),
            LightShape::Point => None,
        }
    }

    pub fn cone_mut(&mut self) -> Option<&mut SpotCone> {
        match &mut self.shape {
            LightShape::Spot(cone) => Some(cone),
            LightShape::Point => None,
        }
    }

    /// True when every field is a finite number. Non-finite lights are
    /// skipped by accumulation.
    pub fn is_finite(&self) -> bool {
        let common = self.position.is_finite()
            && self.color.is_finite()
            && self.power.is_finite()
            && self.decay.is_finite();
        match &self.shape {
            LightShape::Point => common,
            LightShape::Spot(cone) => {
                common
                    && cone.direction_z.is_finite()
                    && cone.rotation.is_finite()
                    && cone.beam_width.is_finite()
            }
        }
    }
}
