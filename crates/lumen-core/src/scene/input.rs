//! Edge detection over consecutive raw input samples.

use lumen_hal::{Button, InputSample, Key};

/// Input for one tick: current state plus the previous sample for edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    current: InputSample,
    previous: InputSample,
}

impl InputFrame {
    pub fn new(current: InputSample, previous: InputSample) -> Self {
        Self { current, previous }
    }

    pub fn pointer(&self) -> (i32, i32) {
        self.current.pointer
    }

    pub fn held(&self, key: Key) -> bool {
        self.current.keys.contains(key)
    }

    /// Down this tick, up the previous one.
    pub fn pressed(&self, key: Key) -> bool {
        self.current.keys.contains(key) && !self.previous.keys.contains(key)
    }

    pub fn button_held(&self, button: Button) -> bool {
        self.current.buttons.contains(button)
    }

    pub fn button_pressed(&self, button: Button) -> bool {
        self.current.buttons.contains(button) && !self.previous.buttons.contains(button)
    }
}

/// Remembers the last sample so each new one can be turned into an
/// `InputFrame`. The first sample never reports presses.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    previous: Option<InputSample>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, sample: InputSample) -> InputFrame {
        let previous = self.previous.replace(sample).unwrap_or(sample);
        InputFrame::new(sample, previous)
    }
}
