//! Rendering stages: surface capture, light accumulation (forward and
//! deferred), and compositing.

pub mod capture;
pub mod compositor;
pub mod deferred;
pub mod forward;
pub mod lighting;

pub use capture::Sprite;
pub use compositor::{NoOcclusion, OcclusionPass};
pub use deferred::{LightBuffer, MAX_DEFERRED_LIGHTS};
pub use lighting::{LightParams, ShadingContext};

/// Accumulation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderPath {
    /// One pass per light. Used while the enabled light count fits the
    /// forward budget.
    #[default]
    Forward,
    /// One pass over a packed light buffer.
    Deferred,
}

/// What a single `render` call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccumulationStats {
    pub path: RenderPath,
    /// Lights that contributed to the composite.
    pub lights_drawn: usize,
    /// Enabled lights left out because the deferred buffer was full.
    pub lights_dropped: usize,
    /// Enabled lights skipped for non-finite parameters.
    pub lights_invalid: usize,
}
