//! Hard shadow cast by a single square hull, applied to the lit frame after
//! compositing.

use glam::{Vec2, Vec4Swizzles};
use lumen_core::{OcclusionPass, RenderTarget};

pub const HULL_CENTER: Vec2 = Vec2::new(320.0, 240.0);
pub const HULL_HALF_EXTENT: f32 = 50.0;
const DEFAULT_SHADOW_FACTOR: f32 = 0.35;

/// Axis-aligned square occluder lit from one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullShadow {
    min: Vec2,
    max: Vec2,
    light: Vec2,
    /// Multiplier applied to shadowed pixels' color.
    factor: f32,
}

impl Default for HullShadow {
    fn default() -> Self {
        Self::new(HULL_CENTER, HULL_HALF_EXTENT)
    }
}

impl HullShadow {
    pub fn new(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            max: center + Vec2::splat(half_extent),
            light: Vec2::ZERO,
            factor: DEFAULT_SHADOW_FACTOR,
        }
    }

    pub fn with_factor(mut self, factor: f32) -> Self {
        self.factor = factor.clamp(0.0, 1.0);
        self
    }

    pub fn set_light(&mut self, light: Vec2) {
        self.light = light;
    }

    fn inside(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Whether the segment from `p` to the light crosses the hull (slab test).
    fn occluded(&self, p: Vec2) -> bool {
        let d = self.light - p;
        let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
        for axis in 0..2 {
            if d[axis].abs() < f32::EPSILON {
                if p[axis] < self.min[axis] || p[axis] > self.max[axis] {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d[axis];
            let mut near = (self.min[axis] - p[axis]) * inv;
            let mut far = (self.max[axis] - p[axis]) * inv;
            if near > far {
                core::mem::swap(&mut near, &mut far);
            }
            t0 = t0.max(near);
            t1 = t1.min(far);
            if t0 > t1 {
                return false;
            }
        }
        true
    }
}

impl OcclusionPass for HullShadow {
    fn apply(&mut self, frame: &mut RenderTarget) {
        if self.inside(self.light) {
            return;
        }
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if self.inside(p) || !self.occluded(p) {
                    continue;
                }
                let px = frame.pixel_mut(x, y);
                *px = (px.xyz() * self.factor).extend(px.w);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn lit_frame() -> RenderTarget {
        RenderTarget::filled(640, 480, Vec4::ONE)
    }

    #[test]
    fn far_side_of_hull_is_shadowed() {
        let mut shadow = HullShadow::default().with_factor(0.5);
        shadow.set_light(Vec2::new(100.0, 240.0));
        let mut frame = lit_frame();
        shadow.apply(&mut frame);

        assert_eq!(frame.get(500, 240), Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(frame.get(500, 40), Vec4::ONE);
        assert_eq!(frame.get(50, 240), Vec4::ONE);
        // The hull itself stays lit.
        assert_eq!(frame.get(320, 240), Vec4::ONE);
    }

    #[test]
    fn light_inside_hull_casts_nothing() {
        let mut shadow = HullShadow::default();
        shadow.set_light(HULL_CENTER);
        let mut frame = lit_frame();
        shadow.apply(&mut frame);
        assert_eq!(frame, lit_frame());
    }

    #[test]
    fn axis_aligned_rays_are_handled() {
        let mut shadow = HullShadow::default();
        shadow.set_light(Vec2::new(320.5, 20.5));
        assert!(shadow.occluded(Vec2::new(320.5, 400.5)));
        assert!(!shadow.occluded(Vec2::new(600.5, 20.5)));
    }
}
