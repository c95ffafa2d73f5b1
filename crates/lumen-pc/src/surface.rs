//! Presentation surface writing frames out as PNG files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lumen_core::RenderTarget;

/// Saves presented frames. With `every == 0` only the final frame is kept.
#[derive(Debug, Clone)]
pub struct PngSurface {
    output: PathBuf,
    every: u32,
    presented: u32,
}

impl PngSurface {
    pub fn new(output: PathBuf, every: u32) -> Self {
        Self {
            output,
            every,
            presented: 0,
        }
    }

    /// Present one frame, saving a numbered snapshot on every `every`th call.
    pub fn present(&mut self, frame: &RenderTarget) -> Result<()> {
        self.presented += 1;
        if self.every > 0 && self.presented % self.every == 0 {
            let path = numbered(&self.output, self.presented);
            save_png(frame, &path)?;
            log::debug!("Saved snapshot {}", path.display());
        }
        Ok(())
    }

    /// Write the last frame to the output path.
    pub fn finish(&self, frame: &RenderTarget) -> Result<()> {
        save_png(frame, &self.output)?;
        log::info!(
            "Wrote {} after {} frames",
            self.output.display(),
            self.presented
        );
        Ok(())
    }
}

pub fn save_png(frame: &RenderTarget, path: &Path) -> Result<()> {
    image::save_buffer(
        path,
        &frame.to_rgba8(),
        frame.width(),
        frame.height(),
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))
}

/// `out.png` -> `out_0042.png`.
fn numbered(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    path.with_file_name(format!("{stem}_{n:04}.png"))
}
