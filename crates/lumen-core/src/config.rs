//! In-memory engine configuration.

use glam::Vec3;

use crate::render::{RenderPath, MAX_DEFERRED_LIGHTS};
use crate::target::Resolution;

/// Tunables for a `LightingEngine`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Size of the colormap, normalmap and composite buffers.
    pub resolution: Resolution,
    /// Flip the normal map's Y axis (authoring tools disagree on it).
    pub invert_y_normal: bool,
    /// Path used while the enabled light count fits `forward_light_budget`.
    pub preferred_path: RenderPath,
    /// Most lights the forward path draws before switching to deferred.
    pub forward_light_budget: usize,
    /// Deferred buffer size, capped at `MAX_DEFERRED_LIGHTS`.
    pub deferred_capacity: usize,
    /// Unlit floor, multiplied by albedo.
    pub ambient: Vec3,
    /// Blinn-Phong highlight gain; 0 disables the term.
    pub specular_strength: f32,
    pub specular_power: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            invert_y_normal: false,
            preferred_path: RenderPath::Forward,
            forward_light_budget: 8,
            deferred_capacity: MAX_DEFERRED_LIGHTS,
            ambient: Vec3::ZERO,
            specular_strength: 0.0,
            specular_power: 16.0,
        }
    }
}

impl EngineConfig {
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_path(mut self, path: RenderPath) -> Self {
        self.preferred_path = path;
        self
    }

    pub fn with_invert_y(mut self, invert: bool) -> Self {
        self.invert_y_normal = invert;
        self
    }

    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    /// Path for a frame with `enabled` lights.
    pub fn select_path(&self, enabled: usize) -> RenderPath {
        match self.preferred_path {
            RenderPath::Forward if enabled > self.forward_light_budget => RenderPath::Deferred,
            path => path,
        }
    }
}
