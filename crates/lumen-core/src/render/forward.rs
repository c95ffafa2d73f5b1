//! Forward accumulation: one full-area pass per light, additively blended
//! into the composite.

use glam::{Vec3, Vec4Swizzles};

use super::lighting::{decode_normal, shade, LightParams, ShadingContext};
use crate::target::{Rect, RenderTarget};

/// Reset `area` of the composite to the ambient floor (`ambient * albedo`,
/// opaque).
pub fn fill_floor(composite: &mut RenderTarget, colormap: &RenderTarget, area: Rect, ambient: Vec3) {
    for y in area.y as u32..area.bottom() as u32 {
        for x in area.x as u32..area.right() as u32 {
            let albedo = colormap.get(x, y).xyz();
            *composite.pixel_mut(x, y) = (ambient * albedo).extend(1.0);
        }
    }
}

/// Add one light's radiance over `area`. `area` must lie inside all three
/// targets, which share one size.
pub fn light_pass(
    light: &LightParams,
    ctx: &ShadingContext,
    colormap: &RenderTarget,
    normalmap: &RenderTarget,
    composite: &mut RenderTarget,
    area: Rect,
) {
    for y in area.y as u32..area.bottom() as u32 {
        for x in area.x as u32..area.right() as u32 {
            let albedo = colormap.get(x, y).xyz();
            let normal = decode_normal(normalmap.get(x, y), ctx.invert_y);
            let radiance = shade(light, ctx, x as f32, y as f32, albedo, normal);
            let px = composite.pixel_mut(x, y);
            *px = (px.xyz() + radiance).extend(px.w);
        }
    }
}

/// Run the forward path: floor, then one pass per light in list order.
pub fn accumulate(
    lights: &[LightParams],
    ctx: &ShadingContext,
    colormap: &RenderTarget,
    normalmap: &RenderTarget,
    composite: &mut RenderTarget,
    area: Rect,
    ambient: Vec3,
) {
    fill_floor(composite, colormap, area, ambient);
    for light in lights {
        light_pass(light, ctx, colormap, normalmap, composite, area);
    }
}
