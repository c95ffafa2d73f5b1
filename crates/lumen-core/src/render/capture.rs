//! Surface capture: draws the scene's diffuse and normal images into the
//! colormap and normalmap working buffers.

use glam::{Vec4, Vec4Swizzles};

use crate::error::EngineError;
use crate::target::{nearest_source, Image, Rect, RenderTarget};

/// Colormap background: opaque black.
pub const DIFFUSE_CLEAR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
/// Normalmap background: the encoding of a flat normal facing the camera.
pub const NORMAL_CLEAR: Vec4 = Vec4::new(0.5, 0.5, 1.0, 1.0);

/// One scene element: matching diffuse and normal images and where to put
/// them in buffer space. Images are stretched to `placement`.
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    pub diffuse: &'a Image,
    pub normal: &'a Image,
    pub placement: Rect,
}

impl<'a> Sprite<'a> {
    /// Sprite drawn at its native size with its top-left corner at `(x, y)`.
    pub fn at(diffuse: &'a Image, normal: &'a Image, x: i32, y: i32) -> Self {
        Self {
            diffuse,
            normal,
            placement: Rect::new(x, y, diffuse.width(), diffuse.height()),
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        let (d, n) = (self.diffuse, self.normal);
        if d.width() != n.width() || d.height() != n.height() {
            return Err(EngineError::ImageSizeMismatch {
                diffuse_width: d.width(),
                diffuse_height: d.height(),
                normal_width: n.width(),
                normal_height: n.height(),
            });
        }
        Ok(())
    }
}

/// Clear both buffers and draw every sprite into them, in order.
///
/// All sprites are validated before anything is written, so on error the
/// buffers keep their previous contents.
pub fn capture(
    colormap: &mut RenderTarget,
    normalmap: &mut RenderTarget,
    sprites: &[Sprite<'_>],
) -> Result<(), EngineError> {
    for sprite in sprites {
        sprite.validate()?;
    }

    colormap.clear(DIFFUSE_CLEAR);
    normalmap.clear(NORMAL_CLEAR);
    for sprite in sprites {
        draw_image(colormap, sprite.diffuse, sprite.placement);
        draw_image(normalmap, sprite.normal, sprite.placement);
    }
    Ok(())
}

/// Draw `image` stretched into `placement` with nearest-neighbour sampling
/// and source-over alpha blending. Pixels outside the target are clipped.
pub fn draw_image(target: &mut RenderTarget, image: &Image, placement: Rect) {
    if placement.is_empty() {
        return;
    }
    let src = Rect::new(0, 0, image.width(), image.height());
    let area = placement.intersect(&target.bounds());
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            let (u, v) = nearest_source(&src, &placement, x, y);
            let texel = image.texel(u as u32, v as u32);
            let dst = target.pixel_mut(x as u32, y as u32);
            let a = texel.w;
            let rgb = texel.xyz() * a + dst.xyz() * (1.0 - a);
            let alpha = a + dst.w * (1.0 - a);
            *dst = rgb.extend(alpha);
        }
    }
}
