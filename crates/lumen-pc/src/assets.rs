//! Scene surfaces: PNG decoding into engine images, or a generated brick
//! wall when no files are given.

use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use lumen_core::Image;

const BRICK_WIDTH: u32 = 64;
const BRICK_HEIGHT: u32 = 32;
const MORTAR: u32 = 4;
/// Width of the sloped rim around each brick face, in pixels.
const BEVEL: u32 = 5;

/// Matching diffuse and normal images for one scene surface.
#[derive(Debug, Clone)]
pub struct SurfacePair {
    pub diffuse: Image,
    pub normal: Image,
}

/// Decode a PNG (or any format the `image` crate was built with) to RGBA8.
pub fn load_image(path: &Path) -> Result<Image> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    log::info!("Loaded {} ({}×{})", path.display(), width, height);
    Image::from_rgba8(width, height, img.as_raw())
        .with_context(|| format!("Invalid image data in {}", path.display()))
}

/// Load a diffuse/normal pair, which must have equal dimensions.
pub fn load_pair(diffuse: &Path, normal: &Path) -> Result<SurfacePair> {
    let diffuse_img = load_image(diffuse)?;
    let normal_img = load_image(normal)?;
    if diffuse_img.width() != normal_img.width() || diffuse_img.height() != normal_img.height() {
        bail!(
            "{} is {}×{} but {} is {}×{}",
            diffuse.display(),
            diffuse_img.width(),
            diffuse_img.height(),
            normal.display(),
            normal_img.width(),
            normal_img.height()
        );
    }
    Ok(SurfacePair {
        diffuse: diffuse_img,
        normal: normal_img,
    })
}

/// Procedural brick wall with bevelled brick edges in the normal map.
pub fn brick_wall(width: u32, height: u32) -> Result<SurfacePair> {
    let diffuse = Image::from_fn(width, height, |x, y| match brick_cell(x, y) {
        None => [150, 145, 135, 255],
        Some((bx, by, ..)) => {
            // Cheap per-brick shade variation.
            let h = (bx.wrapping_mul(73) ^ by.wrapping_mul(151)) % 40;
            [150 + h as u8, 60 + (h / 2) as u8, 45, 255]
        }
    })?;
    let normal = Image::from_fn(width, height, |x, y| {
        let n = match brick_cell(x, y) {
            None => Vec3::Z,
            Some((_, _, u, v)) => bevel_normal(u, v),
        };
        encode_normal(n)
    })?;
    Ok(SurfacePair { diffuse, normal })
}

/// Brick index and position inside the brick face, or `None` on mortar.
/// Odd rows are offset by half a brick.
fn brick_cell(x: u32, y: u32) -> Option<(u32, u32, u32, u32)> {
    let by = y / BRICK_HEIGHT;
    let shifted = x + (by % 2) * (BRICK_WIDTH / 2);
    let bx = shifted / BRICK_WIDTH;
    let u = shifted % BRICK_WIDTH;
    let v = y % BRICK_HEIGHT;
    if u < MORTAR || v < MORTAR {
        return None;
    }
    Some((bx, by, u - MORTAR, v - MORTAR))
}

fn bevel_normal(u: u32, v: u32) -> Vec3 {
    let face_w = BRICK_WIDTH - MORTAR;
    let face_h = BRICK_HEIGHT - MORTAR;
    let mut n = Vec3::Z;
    if u < BEVEL {
        n.x -= 0.6;
    } else if u >= face_w - BEVEL {
        n.x += 0.6;
    }
    // Image rows grow downwards; the top rim faces up-screen.
    if v < BEVEL {
        n.y -= 0.6;
    } else if v >= face_h - BEVEL {
        n.y += 0.6;
    }
    n.normalize()
}

fn encode_normal(n: Vec3) -> [u8; 4] {
    let c = (n * 0.5 + 0.5) * 255.0;
    [
        (c.x + 0.5) as u8,
        (c.y + 0.5) as u8,
        (c.z + 0.5) as u8,
        255,
    ]
}
