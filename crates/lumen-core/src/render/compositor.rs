//! Compositor: point-sampled copies of the lit composite into caller
//! targets, and the hook for the external occlusion (shadow) pass.

use crate::target::{nearest_source, Rect, RenderTarget};

/// External post pass that darkens occluded regions of a fully lit frame.
/// Invoked after compositing and before present.
pub trait OcclusionPass {
    fn apply(&mut self, frame: &mut RenderTarget);
}

/// Pass that leaves the frame untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcclusion;

impl OcclusionPass for NoOcclusion {
    fn apply(&mut self, _frame: &mut RenderTarget) {}
}

/// Copy `src_rect` of `src` into `dest_rect` of `dest`, scaling with
/// nearest-neighbour sampling. `src_rect` is clipped to `src`; destination
/// pixels outside `dest` are skipped.
pub fn blit(src: &RenderTarget, src_rect: Rect, dest: &mut RenderTarget, dest_rect: Rect) {
    let src_rect = src_rect.intersect(&src.bounds());
    if src_rect.is_empty() || dest_rect.is_empty() {
        return;
    }
    let area = dest_rect.intersect(&dest.bounds());
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            let (sx, sy) = nearest_source(&src_rect, &dest_rect, x, y);
            dest.set(x as u32, y as u32, src.get(sx as u32, sy as u32));
        }
    }
}

/// Stretch the whole of `src` into `dest_rect`.
pub fn draw(src: &RenderTarget, dest: &mut RenderTarget, dest_rect: Rect) {
    blit(src, src.bounds(), dest, dest_rect);
}
