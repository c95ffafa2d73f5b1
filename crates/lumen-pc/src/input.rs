//! Headless input and timing for the PC host.
//!
//! `ScriptedInput` replays a fixed schedule of key and button presses while
//! the pointer orbits the play area, so a run is fully reproducible.

use std::time::Instant;

use lumen_hal::{Button, ButtonSet, FrameClock, InputSample, InputSource, Key, KeySet};

/// Keys and buttons held for `frames` samples starting at sample `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    pub at: u32,
    pub frames: u32,
    pub keys: KeySet,
    pub buttons: ButtonSet,
}

impl ScriptStep {
    pub fn key(at: u32, frames: u32, key: Key) -> Self {
        Self {
            at,
            frames,
            keys: KeySet::EMPTY.with(key),
            buttons: ButtonSet::EMPTY,
        }
    }

    /// One-sample button click.
    pub fn click(at: u32, button: Button) -> Self {
        Self {
            at,
            frames: 1,
            keys: KeySet::EMPTY,
            buttons: ButtonSet::EMPTY.with(button),
        }
    }

    fn active(&self, sample: u32) -> bool {
        sample >= self.at && sample - self.at < self.frames
    }
}

/// Input source driven by a script instead of a device.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    sample: u32,
    center: (f32, f32),
    radius: (f32, f32),
    /// Pointer orbit speed, radians per sample.
    speed: f32,
    steps: Vec<ScriptStep>,
}

impl ScriptedInput {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            sample: 0,
            center: (320.0, 240.0),
            radius: (240.0, 180.0),
            speed: 0.02,
            steps,
        }
    }

    /// Script exercising every interaction of the demo scene, then pressing
    /// Escape on sample `frames`.
    pub fn demo(frames: u32) -> Self {
        let mut steps = vec![
            ScriptStep::key(5, 20, Key::Up),
            ScriptStep::key(25, 10, Key::A),
            ScriptStep::key(35, 10, Key::S),
            ScriptStep::click(40, Button::Right),
            ScriptStep::key(45, 15, Key::Right),
            ScriptStep::key(60, 10, Key::C),
            ScriptStep::click(80, Button::Right),
        ];
        steps.extend((1..=8).map(|i| ScriptStep::click(i * 12, Button::Left)));
        steps.push(ScriptStep::key(frames, 1, Key::Escape));
        Self::new(steps)
    }
}

impl InputSource for ScriptedInput {
    fn init(&mut self) {
        self.sample = 0;
        log::info!("Scripted input initialized ({} steps)", self.steps.len());
    }

    fn poll(&mut self) -> InputSample {
        let n = self.sample;
        self.sample += 1;

        let angle = n as f32 * self.speed;
        let pointer = (
            (self.center.0 + angle.cos() * self.radius.0) as i32,
            (self.center.1 + angle.sin() * self.radius.1) as i32,
        );

        let mut sample = InputSample {
            pointer,
            ..InputSample::default()
        };
        for step in self.steps.iter().filter(|s| s.active(n)) {
            for key in ALL_KEYS {
                if step.keys.contains(key) {
                    sample.keys.insert(key);
                }
            }
            for button in [Button::Left, Button::Right, Button::Middle] {
                if step.buttons.contains(button) {
                    sample.buttons.insert(button);
                }
            }
        }
        sample
    }
}

const ALL_KEYS: [Key; 12] = [
    Key::Escape,
    Key::F1,
    Key::Left,
    Key::Right,
    Key::Up,
    Key::Down,
    Key::A,
    Key::C,
    Key::D,
    Key::S,
    Key::X,
    Key::Z,
];

/// Clock advancing by a constant step, for reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl FrameClock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.step
    }
}

/// Clock reporting real elapsed time between ticks.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_hold_for_their_duration() {
        let mut input = ScriptedInput::new(vec![ScriptStep::key(2, 3, Key::Up)]);
        input.init();
        let held: Vec<bool> = (0..6).map(|_| input.poll().keys.contains(Key::Up)).collect();
        assert_eq!(held, vec![false, false, true, true, true, false]);
    }

    #[test]
    fn click_lasts_one_sample() {
        let mut input = ScriptedInput::new(vec![ScriptStep::click(1, Button::Left)]);
        let down: Vec<bool> = (0..3)
            .map(|_| input.poll().buttons.contains(Button::Left))
            .collect();
        assert_eq!(down, vec![false, true, false]);
    }

    #[test]
    fn pointer_stays_in_play_area() {
        let mut input = ScriptedInput::demo(100);
        for _ in 0..400 {
            let (x, y) = input.poll().pointer;
            assert!((0..640).contains(&x) && (0..480).contains(&y), "({x}, {y})");
        }
    }

    #[test]
    fn demo_script_ends_with_escape() {
        let mut input = ScriptedInput::demo(10);
        let samples: Vec<_> = (0..11).map(|_| input.poll()).collect();
        assert!(samples[..10].iter().all(|s| !s.keys.contains(Key::Escape)));
        assert!(samples[10].keys.contains(Key::Escape));
    }

    #[test]
    fn fixed_clock_is_constant() {
        let mut clock = FixedClock::new(0.25);
        assert_eq!(clock.tick(), 0.25);
        assert_eq!(clock.tick(), 0.25);
    }
}
