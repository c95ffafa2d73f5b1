//! Pre-decoded RGBA8 image assets handed to the engine by the host.

use glam::Vec4;

use crate::error::EngineError;

/// Decoded RGBA8888 image (row-major). Decoding is the host's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    texels: Vec<[u8; 4]>,
}

impl Image {
    /// Wrap decoded texels, checking they match the declared size.
    pub fn new(width: u32, height: u32, texels: Vec<[u8; 4]>) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyImage);
        }
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(EngineError::ImageDataLength {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Wrap tightly packed RGBA bytes (4 bytes per texel).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, EngineError> {
        let texels = bytes
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Self::new(width, height, texels)
    }

    /// Build an image by evaluating `f` at every texel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, EngineError> {
        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Self::new(width, height, texels)
    }

    /// Single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, EngineError> {
        Self::new(width, height, vec![rgba; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at `(x, y)` as normalised RGBA.
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        let [r, g, b, a] = self.texels[y as usize * self.width as usize + x as usize];
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }
}
