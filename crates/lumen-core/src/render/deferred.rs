//! Deferred accumulation: lights are packed into a fixed-capacity parameter
//! buffer up front, then a single pass shades every pixel against all of
//! them.

use glam::{Vec3, Vec4Swizzles};

use super::lighting::{decode_normal, shade_pixel, LightParams, ShadingContext};
use crate::target::{Rect, RenderTarget};

/// Hard capacity of the deferred light buffer.
pub const MAX_DEFERRED_LIGHTS: usize = 64;

/// Packed per-frame light parameters for the deferred pass.
#[derive(Debug, Clone, Default)]
pub struct LightBuffer {
    lights: heapless::Vec<LightParams, MAX_DEFERRED_LIGHTS>,
    dropped: usize,
}

impl LightBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer contents with `lights`, keeping at most `capacity`
    /// (itself capped at `MAX_DEFERRED_LIGHTS`). On overflow the oldest
    /// entries are dropped; survivors keep their relative order. Returns how
    /// many were dropped.
    pub fn upload(&mut self, lights: &[LightParams], capacity: usize) -> usize {
        let capacity = capacity.min(MAX_DEFERRED_LIGHTS);
        let skip = lights.len().saturating_sub(capacity);
        self.lights.clear();
        for params in &lights[skip..] {
            if self.lights.push(*params).is_err() {
                break;
            }
        }
        self.dropped = skip;
        skip
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Lights dropped by the last `upload`.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn as_slice(&self) -> &[LightParams] {
        &self.lights
    }

    /// Raw buffer bytes, laid out as the shader-side array of `LightParams`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.lights.as_slice())
    }
}

/// Single pass over `area`: ambient floor plus every buffered light.
pub fn accumulate(
    buffer: &LightBuffer,
    ctx: &ShadingContext,
    colormap: &RenderTarget,
    normalmap: &RenderTarget,
    composite: &mut RenderTarget,
    area: Rect,
    ambient: Vec3,
) {
    let lights = buffer.as_slice();
    for y in area.y as u32..area.bottom() as u32 {
        for x in area.x as u32..area.right() as u32 {
            let albedo = colormap.get(x, y).xyz();
            let normal = decode_normal(normalmap.get(x, y), ctx.invert_y);
            let lit = shade_pixel(lights, ctx, x, y, ambient * albedo, albedo, normal);
            composite.set(x, y, lit.extend(1.0));
        }
    }
}
