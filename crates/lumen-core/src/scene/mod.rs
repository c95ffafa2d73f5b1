//! Demo scene: a pointer-following point light and spot light tuned from the
//! keyboard, click-to-add lights, and an optional orbiting light.
//!
//! `update` never touches the engine. It returns light intents for the host
//! to apply at the end of its input phase.

pub mod input;
pub mod rng;

use core::f32::consts::FRAC_PI_2;
use core::fmt;

use glam::{Vec2, Vec3, Vec4};
use lumen_hal::{Button, Key};

use crate::engine::LightingEngine;
use crate::light::{wrap_angle, Light, LightCommand, LightId, SpotCone};
use crate::target::Rect;

pub use input::{InputFrame, InputTracker};
pub use rng::Pcg32;

/// Clicks outside this area do not add lights.
pub const PLAY_AREA: Rect = Rect::new(0, 0, 640, 480);

pub const WHITE: Vec4 = Vec4::ONE;
pub const ORANGE: Vec4 = Vec4::new(1.0, 0.647_058_8, 0.0, 1.0);

/// Height given to lights added by clicking, and to the orbiting light.
const PLACED_LIGHT_Z: f32 = 20.0;
/// Orbit speed of the floating light, radians per second.
const FLOAT_SPEED: f32 = 0.5;
const FLOAT_CENTER: Vec2 = Vec2::new(320.0, 240.0);

/// Keyboard-tuned light parameters shared by the pointer lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Height of the pointer lights above the surface. At least 1.
    pub z: f32,
    pub spot_rotation: f32,
    /// In [0.001, 1.5].
    pub power: f32,
    /// At least 1.
    pub decay: f32,
    /// At least 0.1.
    pub beam_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            z: 30.0,
            spot_rotation: FRAC_PI_2,
            power: 0.5,
            decay: 100.0,
            beam_width: 9.0,
        }
    }
}

impl Tuning {
    /// Apply one tick of held-key adjustments.
    fn adjust(&mut self, input: &InputFrame) {
        if input.held(Key::Z) {
            self.z -= 1.0;
        }
        if input.held(Key::A) {
            self.z += 1.0;
        }
        self.z = self.z.max(1.0);

        if input.held(Key::Left) {
            self.spot_rotation -= 0.1;
        }
        if input.held(Key::Right) {
            self.spot_rotation += 0.1;
        }
        self.spot_rotation = wrap_angle(self.spot_rotation);

        if input.held(Key::Down) {
            self.power -= 0.01;
        }
        if input.held(Key::Up) {
            self.power += 0.01;
        }
        if self.power < 0.01 {
            self.power = 0.001;
        }
        self.power = self.power.min(1.5);

        if input.held(Key::X) {
            self.decay -= 1.0;
        }
        if input.held(Key::S) {
            self.decay += 1.0;
        }
        self.decay = self.decay.max(1.0);

        if input.held(Key::D) {
            self.beam_width -= 0.1;
        }
        if input.held(Key::C) {
            self.beam_width += 0.1;
        }
        self.beam_width = self.beam_width.max(0.1);
    }
}

/// Scene state driven by input, one `update` per tick.
#[derive(Debug, Clone)]
pub struct DemoScene {
    spot: LightId,
    point: LightId,
    floating: Option<LightId>,
    floating_angle: f32,
    tuning: Tuning,
    /// XY the external shadow light follows.
    shadow_light: Vec2,
    show_debug: bool,
    exit_requested: bool,
    rng: Pcg32,
}

impl DemoScene {
    /// Register the scene's spot light (disabled) and point light (enabled).
    pub fn new(engine: &mut LightingEngine, seed: u64) -> Self {
        let tuning = Tuning::default();
        let start = Vec3::new(20.0, 20.0, 20.0);

        let cone = SpotCone::new(-0.25, tuning.spot_rotation, tuning.beam_width);
        let spot = engine.add_light(
            Light::spot(Vec3::new(100.0, 100.0, 20.0), WHITE, 0.5, 100.0, cone)
                .with_enabled(false),
        );
        let point = engine.add_light(Light::point(start, WHITE, 0.5, 300.0));

        Self {
            spot,
            point,
            floating: None,
            floating_angle: 0.0,
            tuning,
            shadow_light: start.truncate(),
            show_debug: false,
            exit_requested: false,
            rng: Pcg32::from_seed(seed),
        }
    }

    /// Also register the orange light orbiting the centre of the play area.
    pub fn with_floating_light(mut self, engine: &mut LightingEngine) -> Self {
        let light = Light::point(self.floating_position(), ORANGE, 0.5, 100.0);
        self.floating = Some(engine.add_light(light));
        self
    }

    pub fn spot_light(&self) -> LightId {
        self.spot
    }

    pub fn point_light(&self) -> LightId {
        self.point
    }

    pub fn floating_light(&self) -> Option<LightId> {
        self.floating
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn shadow_light_position(&self) -> Vec2 {
        self.shadow_light
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Advance by `dt` seconds and return the light edits for this tick.
    pub fn update(&mut self, dt: f32, input: &InputFrame) -> Vec<LightCommand> {
        let mut commands = Vec::new();

        if input.held(Key::Escape) {
            self.exit_requested = true;
        }

        self.floating_angle += FLOAT_SPEED * dt;
        if let Some(id) = self.floating {
            commands.push(LightCommand::SetPosition(id, self.floating_position()));
        }

        if input.button_pressed(Button::Right) {
            commands.push(LightCommand::ToggleEnabled(self.spot));
            commands.push(LightCommand::ToggleEnabled(self.point));
        }

        let (mx, my) = input.pointer();
        if input.button_pressed(Button::Left) && PLAY_AREA.contains(mx, my) {
            commands.push(LightCommand::Add(self.random_light(mx as f32, my as f32)));
        }

        self.tuning.adjust(input);

        if input.pressed(Key::F1) {
            self.show_debug = !self.show_debug;
        }

        let t = self.tuning;
        let pointer = Vec3::new(mx as f32, my as f32, t.z);
        self.shadow_light = pointer.truncate();
        commands.extend([
            LightCommand::SetPosition(self.point, pointer),
            LightCommand::SetPosition(self.spot, pointer),
            LightCommand::SetSpotRotation(self.spot, t.spot_rotation),
            LightCommand::SetPower(self.spot, t.power),
            LightCommand::SetPower(self.point, t.power),
            LightCommand::SetDecay(self.point, t.decay),
            LightCommand::SetDecay(self.spot, t.decay),
            LightCommand::SetSpotBeamWidth(self.spot, t.beam_width),
        ]);
        commands
    }

    /// HUD values for the current state.
    pub fn status(&self, engine: &LightingEngine) -> SceneStatus {
        let spot = engine.light(self.spot);
        SceneStatus {
            position: spot.map(|l| l.position).unwrap_or_default(),
            power: self.tuning.power,
            decay: self.tuning.decay,
            specular: engine.specular_strength(),
            spot: spot
                .filter(|l| l.enabled)
                .and_then(|l| l.cone())
                .map(|c| (c.beam_width(), c.rotation())),
        }
    }

    fn floating_position(&self) -> Vec3 {
        let a = self.floating_angle;
        let offset = Vec2::new(a.cos() * 200.0, (2.0 * a).sin() * 125.0);
        (FLOAT_CENTER + offset).extend(PLACED_LIGHT_Z)
    }

    fn random_light(&mut self, x: f32, y: f32) -> Light {
        let color = Vec4::new(
            self.rng.next_f32(),
            self.rng.next_f32(),
            self.rng.next_f32(),
            1.0,
        );
        let power = 0.5 + self.rng.next_f32() * 0.5;
        let decay = 100.0 + 100.0 * self.rng.next_f32();
        Light::point(Vec3::new(x, y, PLACED_LIGHT_Z), color, power, decay)
    }
}

/// On-screen status lines for the demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStatus {
    pub position: Vec3,
    pub power: f32,
    pub decay: f32,
    pub specular: f32,
    /// Beam width and rotation, present while the spot light is enabled.
    pub spot: Option<(f32, f32)>,
}

impl fmt::Display for SceneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position;
        writeln!(f, "Position: ({}, {}, {})", p.x, p.y, p.z)?;
        writeln!(f, "Power: {:.2}", self.power)?;
        writeln!(f, "Decay: {}", self.decay)?;
        write!(f, "Specular: {}", self.specular)?;
        if let Some((beam, rotation)) = self.spot {
            write!(f, "\nSpotBeam: {beam:.2}\nRotation: {rotation:.2}")?;
        }
        Ok(())
    }
}
