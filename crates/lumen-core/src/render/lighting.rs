//! Per-pixel normal-mapped lighting for point and spot lights.
//!
//! Both accumulation paths shade through `shade()` with the same packed
//! `LightParams`, so forward and deferred output match bit for bit.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::light::{Light, LightShape};

const KIND_POINT: f32 = 0.0;
const KIND_SPOT: f32 = 1.0;

/// Light parameters as the accumulation kernels consume them. This is also
/// the element type of the deferred light buffer (64 bytes, tightly packed).
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct LightParams {
    /// xyz = position, w = kind (0 point, 1 spot).
    pub position: [f32; 4],
    /// rgb = color, w = power.
    pub color: [f32; 4],
    /// x = decay, y = spot beam-width exponent.
    pub falloff: [f32; 4],
    /// xyz = unit spot aim vector.
    pub direction: [f32; 4],
}

impl LightParams {
    /// Pack a light, resolving the spot aim vector. Color is clamped to
    /// [0, 1] and power to at least 0, so no light can remove radiance.
    pub fn from_light(light: &Light) -> Self {
        let p = light.position;
        let c = light.color.clamp(Vec4::ZERO, Vec4::ONE);
        let (kind, beam, dir) = match light.shape() {
            LightShape::Point => (KIND_POINT, 0.0, Vec3::ZERO),
            LightShape::Spot(cone) => (KIND_SPOT, cone.beam_width(), cone.direction()),
        };
        Self {
            position: [p.x, p.y, p.z, kind],
            color: [c.x, c.y, c.z, light.power.max(0.0)],
            falloff: [light.decay(), beam, 0.0, 0.0],
            direction: [dir.x, dir.y, dir.z, 0.0],
        }
    }

    pub fn is_spot(&self) -> bool {
        self.position[3] == KIND_SPOT
    }
}

/// Frame-constant shading inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingContext {
    /// Distance normaliser: the working buffer's longest edge in pixels.
    pub extent: f32,
    /// Flip the decoded normal's Y component.
    pub invert_y: bool,
    pub specular_strength: f32,
    pub specular_power: f32,
}

/// Inverse-square-style falloff on a normalised distance:
/// `power / (1 + decay * d²)`. Strictly decreasing in `d` (for d > 0) and in
/// `decay`. Negative power is treated as 0.
#[inline]
pub fn attenuation(power: f32, decay: f32, distance: f32) -> f32 {
    power.max(0.0) / (1.0 + decay * distance * distance)
}

/// Cosine-power cone: `cos(angle)^exponent`, zero beyond 90°.
#[inline]
pub fn cone_factor(aim: Vec3, light_to_surface: Vec3, exponent: f32) -> f32 {
    let cos = aim.dot(light_to_surface);
    if cos <= 0.0 {
        0.0
    } else {
        cos.powf(exponent)
    }
}

/// Decode an RGB-encoded tangent-space normal (0.5 = zero on each axis).
#[inline]
pub fn decode_normal(sample: Vec4, invert_y: bool) -> Vec3 {
    let mut n = sample.xyz() * 2.0 - Vec3::ONE;
    if invert_y {
        n.y = -n.y;
    }
    n.normalize_or_zero()
}

/// Radiance one light adds at surface pixel `(x, y)`.
///
/// Evaluates:
/// `color * (albedo * max(0, N·L̂) + specular) * attenuation(d) * cone`
/// where `L` runs from the surface point `(x, y, 0)` to the light and `d` is
/// `|L|` divided by `ctx.extent`.
pub fn shade(
    light: &LightParams,
    ctx: &ShadingContext,
    x: f32,
    y: f32,
    albedo: Vec3,
    normal: Vec3,
) -> Vec3 {
    let [lx, ly, lz, _] = light.position;
    let to_light = Vec3::new(lx - x, ly - y, lz);
    let dist = to_light.length();
    let l_hat = if dist > 0.0 { to_light / dist } else { Vec3::Z };

    let n_dot_l = normal.dot(l_hat).max(0.0);
    if n_dot_l <= 0.0 {
        return Vec3::ZERO;
    }

    let [r, g, b, power] = light.color;
    let [decay, beam, _, _] = light.falloff;
    let mut intensity = attenuation(power, decay, dist / ctx.extent);

    if light.is_spot() {
        let [dx, dy, dz, _] = light.direction;
        intensity *= cone_factor(Vec3::new(dx, dy, dz), -l_hat, beam);
    }

    let mut lit = albedo * n_dot_l;
    if ctx.specular_strength > 0.0 {
        let half = (l_hat + Vec3::Z).normalize_or_zero();
        lit += Vec3::splat(
            ctx.specular_strength * normal.dot(half).max(0.0).powf(ctx.specular_power),
        );
    }

    Vec3::new(r, g, b) * lit * intensity
}

/// Shade one pixel against a light list, starting from `floor`.
///
/// The summation order is the list order; both accumulation paths go
/// through here so their floating-point results agree exactly.
#[inline]
pub(crate) fn shade_pixel<'a>(
    lights: impl IntoIterator<Item = &'a LightParams>,
    ctx: &ShadingContext,
    x: u32,
    y: u32,
    floor: Vec3,
    albedo: Vec3,
    normal: Vec3,
) -> Vec3 {
    let (fx, fy) = (x as f32, y as f32);
    let mut acc = floor;
    for light in lights {
        acc += shade(light, ctx, fx, fy, albedo, normal);
    }
    acc
}
