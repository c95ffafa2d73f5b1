//! Per-frame orchestration in the fixed stage order:
//! capture → accumulate/composite → occlusion → debug thumbnails.

use crate::debug::FrameCounter;
use crate::engine::LightingEngine;
use crate::error::EngineError;
use crate::render::{AccumulationStats, OcclusionPass, Sprite};
use crate::target::RenderTarget;

/// Draw one frame into `frame`, which should match the working resolution.
///
/// The frame is counted only once it has been fully produced; a failed stage
/// leaves the counter alone so the next tick simply tries again.
pub fn draw_frame(
    engine: &mut LightingEngine,
    sprites: &[Sprite<'_>],
    occlusion: &mut dyn OcclusionPass,
    frame: &mut RenderTarget,
    counter: &mut FrameCounter,
    show_debug_targets: bool,
) -> Result<AccumulationStats, EngineError> {
    engine.capture(sprites)?;
    let stats = engine.render(frame, engine.resolution().bounds())?;
    occlusion.apply(frame);
    if show_debug_targets {
        engine.draw_debug_targets(frame);
    }
    counter.record_draw();
    Ok(stats)
}
