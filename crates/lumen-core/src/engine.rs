//! The lighting engine: owns the light registry and the three working
//! buffers, and runs capture → accumulation → compositing.

use glam::Vec3;

use crate::config::EngineConfig;
use crate::debug::{self, DebugView, FrameCounter};
use crate::error::EngineError;
use crate::light::{self, Light, LightCommand, LightId, LightRegistry};
use crate::render::capture::{self, Sprite};
use crate::render::lighting::{LightParams, ShadingContext};
use crate::render::{compositor, deferred, forward, AccumulationStats, LightBuffer, RenderPath};
use crate::target::{Image, Rect, RenderTarget, Resolution};

/// Colormap, normalmap and composite, all at the working resolution.
/// Recreated only by `LightingEngine::resize`.
#[derive(Debug, Clone)]
struct FrameBuffers {
    colormap: RenderTarget,
    normalmap: RenderTarget,
    composite: RenderTarget,
}

impl FrameBuffers {
    fn new(resolution: Resolution) -> Self {
        Self {
            colormap: RenderTarget::filled(
                resolution.width,
                resolution.height,
                capture::DIFFUSE_CLEAR,
            ),
            normalmap: RenderTarget::filled(
                resolution.width,
                resolution.height,
                capture::NORMAL_CLEAR,
            ),
            composite: RenderTarget::with_resolution(resolution),
        }
    }
}

/// Deferred normal-mapped 2D lighting.
///
/// Per frame the caller must `capture` the surfaces, then `render` (or
/// `accumulate` + `draw`). Rendering without a fresh capture is rejected
/// with `EngineError::SurfacesNotCaptured`.
pub struct LightingEngine {
    config: EngineConfig,
    lights: LightRegistry,
    buffers: FrameBuffers,
    light_buffer: LightBuffer,
    /// Surfaces captured since the last accumulation.
    captured: bool,
    /// Composite holds a lit frame for the current resolution.
    composite_ready: bool,
    last_stats: AccumulationStats,
    last_path: Option<RenderPath>,
}

impl LightingEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let resolution = Resolution::new(config.resolution.width, config.resolution.height)?;
        log::info!(
            "Lighting engine: {}x{} working buffers, {:?} path",
            resolution.width,
            resolution.height,
            config.preferred_path
        );
        Ok(Self {
            config,
            lights: LightRegistry::new(),
            buffers: FrameBuffers::new(resolution),
            light_buffer: LightBuffer::new(),
            captured: false,
            composite_ready: false,
            last_stats: AccumulationStats::default(),
            last_path: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolution(&self) -> Resolution {
        self.config.resolution
    }

    /// Reallocate all working buffers. Previous captures and the composite
    /// are discarded.
    pub fn resize(&mut self, resolution: Resolution) -> Result<(), EngineError> {
        let resolution = Resolution::new(resolution.width, resolution.height)?;
        if resolution == self.config.resolution {
            return Ok(());
        }
        log::info!(
            "Recreating working buffers at {}x{}",
            resolution.width,
            resolution.height
        );
        self.config.resolution = resolution;
        self.buffers = FrameBuffers::new(resolution);
        self.captured = false;
        self.composite_ready = false;
        Ok(())
    }

    pub fn set_invert_y_normal(&mut self, invert: bool) {
        self.config.invert_y_normal = invert;
    }

    pub fn set_preferred_path(&mut self, path: RenderPath) {
        self.config.preferred_path = path;
    }

    pub fn set_ambient(&mut self, ambient: Vec3) {
        self.config.ambient = ambient;
    }

    pub fn specular_strength(&self) -> f32 {
        self.config.specular_strength
    }

    pub fn set_specular_strength(&mut self, strength: f32) {
        self.config.specular_strength = strength.max(0.0);
    }

    // --- Light registry ---

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.add(light)
    }

    pub fn remove_light(&mut self, id: LightId) -> Result<Light, EngineError> {
        self.lights.remove(id).ok_or(EngineError::UnknownLight(id))
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id)
    }

    /// Registered lights, enabled or not.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn enabled_light_count(&self) -> usize {
        self.lights.enabled_count()
    }

    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    /// Apply queued light intents in order. A failing command does not stop
    /// the rest; each command's outcome is returned in the same order.
    pub fn apply(&mut self, commands: &[LightCommand]) -> Vec<Result<Option<LightId>, EngineError>> {
        commands
            .iter()
            .map(|cmd| {
                let result = light::execute(&mut self.lights, cmd);
                if let Err(e) = &result {
                    log::warn!("Light command {cmd:?} failed: {e}");
                }
                result
            })
            .collect()
    }

    // --- Frame stages ---

    /// Clear and redraw the colormap and normalmap from `sprites`.
    pub fn capture(&mut self, sprites: &[Sprite<'_>]) -> Result<(), EngineError> {
        capture::capture(
            &mut self.buffers.colormap,
            &mut self.buffers.normalmap,
            sprites,
        )?;
        self.captured = true;
        Ok(())
    }

    /// Capture a single diffuse/normal pair stretched into `placement`.
    pub fn capture_sprite(
        &mut self,
        diffuse: &Image,
        normal: &Image,
        placement: Rect,
    ) -> Result<(), EngineError> {
        self.capture(&[Sprite {
            diffuse,
            normal,
            placement,
        }])
    }

    /// Accumulate every enabled light into the composite over `rect`
    /// (clipped to the working buffers). Consumes the current capture.
    pub fn accumulate(&mut self, rect: Rect) -> Result<AccumulationStats, EngineError> {
        if !self.captured {
            return Err(EngineError::SurfacesNotCaptured);
        }
        let area = rect.intersect(&self.buffers.composite.bounds());

        let mut invalid = 0;
        let params: Vec<LightParams> = self
            .lights
            .enabled()
            .filter_map(|(id, l)| {
                if l.is_finite() {
                    Some(LightParams::from_light(l))
                } else {
                    log::trace!("Skipping light {id:?} with non-finite parameters");
                    invalid += 1;
                    None
                }
            })
            .collect();
        if invalid > 0 {
            log::warn!("{invalid} light(s) with non-finite parameters contributed nothing");
        }

        let ctx = ShadingContext {
            extent: self.config.resolution.extent(),
            invert_y: self.config.invert_y_normal,
            specular_strength: self.config.specular_strength,
            specular_power: self.config.specular_power,
        };
        let path = self.config.select_path(params.len());
        if self.last_path != Some(path) {
            log::debug!("Accumulation path: {path:?} ({} lights)", params.len());
            self.last_path = Some(path);
        }

        let FrameBuffers {
            colormap,
            normalmap,
            composite,
        } = &mut self.buffers;
        let ambient = self.config.ambient;
        let (drawn, dropped) = match path {
            RenderPath::Forward => {
                forward::accumulate(&params, &ctx, colormap, normalmap, composite, area, ambient);
                (params.len(), 0)
            }
            RenderPath::Deferred => {
                let dropped = self
                    .light_buffer
                    .upload(&params, self.config.deferred_capacity);
                if dropped > 0 {
                    log::warn!(
                        "Deferred light buffer full: dropped {dropped} oldest of {} lights",
                        params.len()
                    );
                }
                deferred::accumulate(
                    &self.light_buffer,
                    &ctx,
                    colormap,
                    normalmap,
                    composite,
                    area,
                    ambient,
                );
                (self.light_buffer.len(), dropped)
            }
        };

        self.captured = false;
        self.composite_ready = true;
        self.last_stats = AccumulationStats {
            path,
            lights_drawn: drawn,
            lights_dropped: dropped,
            lights_invalid: invalid,
        };
        Ok(self.last_stats)
    }

    /// Accumulate over `rect`, then copy that region of the composite 1:1
    /// into `output`.
    pub fn render(
        &mut self,
        output: &mut RenderTarget,
        rect: Rect,
    ) -> Result<AccumulationStats, EngineError> {
        let stats = self.accumulate(rect)?;
        let area = rect.intersect(&self.buffers.composite.bounds());
        compositor::blit(&self.buffers.composite, area, output, area);
        Ok(stats)
    }

    /// Point-sample the whole composite into `rect` of `dest`.
    pub fn draw(&self, dest: &mut RenderTarget, rect: Rect) -> Result<(), EngineError> {
        if !self.composite_ready {
            return Err(EngineError::CompositeNotRendered);
        }
        compositor::draw(&self.buffers.composite, dest, rect);
        Ok(())
    }

    // --- Introspection ---

    pub fn colormap(&self) -> &RenderTarget {
        &self.buffers.colormap
    }

    pub fn normalmap(&self) -> &RenderTarget {
        &self.buffers.normalmap
    }

    pub fn composite(&self) -> &RenderTarget {
        &self.buffers.composite
    }

    /// Outcome of the most recent accumulation.
    pub fn last_stats(&self) -> AccumulationStats {
        self.last_stats
    }

    /// Raw bytes of the deferred light buffer as last uploaded.
    pub fn light_buffer_bytes(&self) -> &[u8] {
        self.light_buffer.as_bytes()
    }

    pub fn debug_view<'a>(&'a self, counter: &FrameCounter) -> DebugView<'a> {
        DebugView {
            colormap: &self.buffers.colormap,
            normalmap: &self.buffers.normalmap,
            composite: &self.buffers.composite,
            light_count: self.lights.len(),
            enabled_lights: self.lights.enabled_count(),
            draw_rate: counter.draw_rate(),
            stats: self.last_stats,
        }
    }

    /// Thumbnail the working buffers along the top edge of `dest`.
    pub fn draw_debug_targets(&self, dest: &mut RenderTarget) {
        debug::draw_targets(
            &[
                &self.buffers.colormap,
                &self.buffers.normalmap,
                &self.buffers.composite,
            ],
            dest,
        );
    }
}
