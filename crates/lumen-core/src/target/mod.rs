//! CPU render targets: fixed-size RGBA float color buffers that can be drawn
//! into and later sampled, plus the rectangle and resolution types used to
//! address them.

pub mod image;

pub use image::Image;

use glam::Vec4;

use crate::error::EngineError;

/// Largest accepted working-resolution edge, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Integer pixel rectangle. `x`/`y` may be negative; `width`/`height` may be 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    pub fn right(&self) -> i32 {
        saturate(self.x as i64 + self.width as i64)
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        saturate(self.y as i64 + self.height as i64)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles; empty (at `self`'s origin) if disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Rect::new(self.x, self.y, 0, 0);
        }
        Rect::new(x0, y0, (x1 as i64 - x0 as i64) as u32, (y1 as i64 - y0 as i64) as u32)
    }
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Size of the engine's working buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Validate and construct a working resolution.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EngineError::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn square(edge: u32) -> Result<Self, EngineError> {
        Self::new(edge, edge)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Longest edge, used to normalise light distances.
    pub fn extent(&self) -> f32 {
        self.width.max(self.height) as f32
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

/// An owned color buffer usable both as a draw destination and as a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl RenderTarget {
    /// Allocate a target cleared to transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Vec4::ZERO)
    }

    pub fn filled(width: u32, height: u32, color: Vec4) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn with_resolution(resolution: Resolution) -> Self {
        Self::new(resolution.width, resolution.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn clear(&mut self, color: Vec4) {
        self.pixels.fill(color);
    }

    /// Fill `rect` (clipped to the target) with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Vec4) {
        let area = rect.intersect(&self.bounds());
        for y in area.y..area.bottom() {
            let row = self.row_range(y as u32, area.x as u32, area.width);
            self.pixels[row].fill(color);
        }
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Vec4 {
        let i = self.index(x, y);
        &mut self.pixels[i]
    }

    /// Row-major pixel storage.
    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Vec4] {
        &mut self.pixels
    }

    /// Quantise to row-major RGBA8, clamping each channel to [0, 1].
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            let c = p.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
            out.extend_from_slice(&[
                (c.x + 0.5) as u8,
                (c.y + 0.5) as u8,
                (c.z + 0.5) as u8,
                (c.w + 0.5) as u8,
            ]);
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} target",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    fn row_range(&self, y: u32, x: u32, len: u32) -> core::ops::Range<usize> {
        let start = self.index(x, y);
        start..start + len as usize
    }
}

/// Map destination pixel `(dx, dy)` inside `dest` back to the nearest source
/// texel inside `src`. Both rectangles must be non-empty.
pub(crate) fn nearest_source(src: &Rect, dest: &Rect, dx: i32, dy: i32) -> (i32, i32) {
    let u = (dx as i64 - dest.x as i64) * src.width as i64 / dest.width as i64;
    let v = (dy as i64 - dest.y as i64) * src.height as i64 / dest.height as i64;
    (saturate(src.x as i64 + u), saturate(src.y as i64 + v))
}
