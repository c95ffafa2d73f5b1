#![no_std]

//! Platform abstraction for the pieces of a lumen host the lighting core never
//! owns: the frame clock and raw input sampling.
//!
//! Uses plain value types rather than anything from lumen-core so the core can
//! depend on this crate without a cycle.

/// Supplies elapsed wall-clock time once per tick.
pub trait FrameClock {
    /// Seconds elapsed since the previous call.
    fn tick(&mut self) -> f32;
}

/// Abstracts user input across platforms.
pub trait InputSource {
    /// Initialize the input subsystem.
    fn init(&mut self);

    /// Sample the current pointer and key state. Non-blocking.
    fn poll(&mut self) -> InputSample;
}

/// Keyboard keys the demo host maps to light tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Key {
    Escape = 0,
    F1,
    Left,
    Right,
    Up,
    Down,
    A,
    C,
    D,
    S,
    X,
    Z,
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    Left = 0,
    Right,
    Middle,
}

/// Set of keys held down during a sample, one bit per `Key`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u32);

impl KeySet {
    pub const EMPTY: KeySet = KeySet(0);

    pub fn with(mut self, key: Key) -> Self {
        self.insert(key);
        self
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= 1 << key as u32;
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !(1 << key as u32);
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & (1 << key as u32) != 0
    }
}

/// Set of pointer buttons held down during a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn with(mut self, button: Button) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= 1 << button as u8;
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !(1 << button as u8);
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & (1 << button as u8) != 0
    }
}

/// One raw input sample. Edge detection (pressed this tick vs. held) is
/// derived by the consumer from consecutive samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSample {
    /// Pointer position in integer pixel coordinates.
    pub pointer: (i32, i32),
    pub keys: KeySet,
    pub buttons: ButtonSet,
}
