//! Platform-agnostic 2D deferred lighting.
//!
//! A frame runs in fixed order: the host captures the scene's diffuse and
//! normal images into the engine's working buffers, the engine accumulates
//! every enabled light into a composite, and the composite is copied to the
//! host's target where an external occlusion pass may darken it before
//! present.

pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod frame;
pub mod light;
pub mod render;
pub mod scene;
pub mod target;

pub use config::EngineConfig;
pub use debug::{DebugView, FrameCounter};
pub use engine::LightingEngine;
pub use error::EngineError;
pub use light::{Light, LightCommand, LightId, LightShape, SpotCone};
pub use render::{OcclusionPass, RenderPath, Sprite};
pub use target::{Image, Rect, RenderTarget, Resolution};
