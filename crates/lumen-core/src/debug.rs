//! Debug introspection: read-only views of the working buffers and a rolling
//! frames-per-second counter.

use core::fmt;

use crate::render::{compositor, AccumulationStats};
use crate::target::{Rect, RenderTarget};

/// Gap between debug thumbnails, in pixels.
const THUMBNAIL_MARGIN: u32 = 4;

/// Counts frames drawn per wall-clock second.
///
/// `tick` is fed the host's elapsed time every update; `record_draw` is called
/// once per drawn frame. The published rate changes once per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCounter {
    /// Seconds left in the current window.
    remaining: f64,
    draw_count: u32,
    draw_rate: u32,
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCounter {
    pub fn new() -> Self {
        Self {
            remaining: 1.0,
            draw_count: 0,
            draw_rate: 0,
        }
    }

    /// Advance the window by `elapsed` seconds. When it runs out the count
    /// so far is published as the rate and reset. Negative or non-finite
    /// `elapsed` is ignored.
    pub fn tick(&mut self, elapsed: f64) {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return;
        }
        self.remaining -= elapsed;
        if self.remaining < 0.0 {
            // Long stalls close just one window.
            self.remaining = self.remaining.rem_euclid(1.0);
            self.draw_rate = self.draw_count;
            self.draw_count = 0;
        }
    }

    pub fn record_draw(&mut self) {
        self.draw_count = self.draw_count.saturating_add(1);
    }

    /// Frames drawn during the last complete one-second window.
    pub fn draw_rate(&self) -> u32 {
        self.draw_rate
    }

    /// Frames drawn so far in the current window.
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }
}

/// Borrowed snapshot of the engine's intermediates. Holding one prevents any
/// mutation of the engine for its lifetime.
#[derive(Debug, Clone, Copy)]
pub struct DebugView<'a> {
    pub colormap: &'a RenderTarget,
    pub normalmap: &'a RenderTarget,
    pub composite: &'a RenderTarget,
    pub light_count: usize,
    pub enabled_lights: usize,
    pub draw_rate: u32,
    pub stats: AccumulationStats,
}

impl fmt::Display for DebugView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FPS: {}", self.draw_rate)?;
        writeln!(f, "Lights: {} ({} enabled)", self.light_count, self.enabled_lights)?;
        write!(f, "Path: {:?}", self.stats.path)?;
        if self.stats.lights_dropped > 0 {
            write!(f, " ({} dropped)", self.stats.lights_dropped)?;
        }
        Ok(())
    }
}

/// Draw `targets` as a row of quarter-width thumbnails along the top of
/// `dest`. Sources are only read.
pub fn draw_targets(targets: &[&RenderTarget], dest: &mut RenderTarget) {
    let thumb_w = dest.width() / 4;
    let mut x = THUMBNAIL_MARGIN as i32;
    for src in targets {
        if thumb_w == 0 || src.width() == 0 {
            return;
        }
        let thumb_h = (thumb_w as u64 * src.height() as u64 / src.width() as u64) as u32;
        let rect = Rect::new(x, THUMBNAIL_MARGIN as i32, thumb_w, thumb_h);
        compositor::draw(src, dest, rect);
        x += (thumb_w + THUMBNAIL_MARGIN) as i32;
    }
}
