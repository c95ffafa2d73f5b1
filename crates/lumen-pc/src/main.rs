//! Headless PC host for the lumen lighting engine.
//!
//! Runs the demo scene against scripted input, renders every frame on the
//! CPU and writes the result as PNG. Single-threaded: each tick polls input,
//! updates the scene, applies its light edits, and draws.

mod assets;
mod input;
mod shadow;
mod surface;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::Vec3;
use lumen_core::frame::draw_frame;
use lumen_core::scene::{DemoScene, InputTracker};
use lumen_core::{EngineConfig, FrameCounter, LightingEngine, RenderPath, RenderTarget, Resolution, Sprite};
use lumen_hal::{FrameClock, InputSource};

use crate::input::{FixedClock, ScriptedInput, WallClock};
use crate::shadow::HullShadow;
use crate::surface::PngSurface;

#[derive(Parser)]
#[command(name = "lumen-pc")]
#[command(about = "Render the normal-mapped lighting demo headlessly to PNG", long_about = None)]
#[command(version)]
struct Cli {
    /// Diffuse image (PNG). A generated brick wall is used when omitted
    #[arg(long, requires = "normal")]
    diffuse: Option<PathBuf>,

    /// Normal map matching the diffuse image
    #[arg(long, requires = "diffuse")]
    normal: Option<PathBuf>,

    /// Output PNG for the final frame
    #[arg(short, long, default_value = "lumen.png")]
    output: PathBuf,

    /// Frames to run before the script presses Escape
    #[arg(short, long, default_value = "240")]
    frames: u32,

    /// Also save every Nth frame next to the output (0 disables)
    #[arg(long, default_value = "0")]
    snapshot_every: u32,

    /// Working resolution, WIDTHxHEIGHT
    #[arg(long, default_value = "1024x1024", value_parser = parse_resolution)]
    resolution: Resolution,

    /// Preferred accumulation path
    #[arg(long, value_enum, default_value = "forward")]
    path: PathArg,

    /// Enabled lights the forward path handles before switching to deferred
    #[arg(long, default_value = "8")]
    forward_budget: usize,

    /// Flip the normal map's green channel
    #[arg(long)]
    invert_y: bool,

    /// Grey ambient floor in [0, 1]
    #[arg(long, default_value = "0.0")]
    ambient: f32,

    /// Specular highlight strength (0 disables)
    #[arg(long, default_value = "0.0")]
    specular: f32,

    /// Color multiplier inside the hull's shadow
    #[arg(long, default_value = "0.35")]
    shadow_factor: f32,

    /// Seed for click-added light colors
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Add the orange light orbiting the centre of the scene
    #[arg(long)]
    floating: bool,

    /// Advance scene time by real elapsed time instead of 1/60 s per frame
    #[arg(long)]
    realtime: bool,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PathArg {
    Forward,
    Deferred,
}

impl From<PathArg> for RenderPath {
    fn from(arg: PathArg) -> Self {
        match arg {
            PathArg::Forward => RenderPath::Forward,
            PathArg::Deferred => RenderPath::Deferred,
        }
    }
}

fn parse_resolution(s: &str) -> Result<Resolution, String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Resolution::new(width, height).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
    log::info!("lumen-pc starting");

    let mut config = EngineConfig::default()
        .with_resolution(cli.resolution)
        .with_path(cli.path.into())
        .with_invert_y(cli.invert_y)
        .with_ambient(Vec3::splat(cli.ambient.clamp(0.0, 1.0)));
    config.forward_light_budget = cli.forward_budget;
    config.specular_strength = cli.specular.max(0.0);
    let mut engine = LightingEngine::new(config)?;

    let surfaces = match (&cli.diffuse, &cli.normal) {
        (Some(diffuse), Some(normal)) => assets::load_pair(diffuse, normal)?,
        _ => assets::brick_wall(cli.resolution.width, cli.resolution.height)?,
    };
    let sprites = [Sprite {
        diffuse: &surfaces.diffuse,
        normal: &surfaces.normal,
        placement: cli.resolution.bounds(),
    }];

    let mut scene = DemoScene::new(&mut engine, cli.seed);
    if cli.floating {
        scene = scene.with_floating_light(&mut engine);
    }

    let mut input = ScriptedInput::demo(cli.frames);
    input.init();
    let mut clock: Box<dyn FrameClock> = if cli.realtime {
        Box::new(WallClock::new())
    } else {
        Box::new(FixedClock::new(1.0 / 60.0))
    };

    let mut tracker = InputTracker::new();
    let mut counter = FrameCounter::new();
    let mut shadow = HullShadow::default().with_factor(cli.shadow_factor);
    let mut frame = RenderTarget::with_resolution(cli.resolution);
    let mut surface = PngSurface::new(cli.output.clone(), cli.snapshot_every);
    let mut since_report = 0.0_f32;

    loop {
        // Input phase: light edits are applied together once the scene has
        // seen this tick's input.
        let tick = tracker.update(input.poll());
        let dt = clock.tick();
        let commands = scene.update(dt, &tick);
        engine.apply(&commands);
        if scene.exit_requested() {
            log::info!("Exit requested");
            break;
        }

        counter.tick(f64::from(dt));
        shadow.set_light(scene.shadow_light_position());
        draw_frame(
            &mut engine,
            &sprites,
            &mut shadow,
            &mut frame,
            &mut counter,
            scene.show_debug(),
        )?;
        surface.present(&frame)?;

        since_report += dt;
        if since_report >= 1.0 {
            since_report -= 1.0;
            let stats = engine.last_stats();
            log::info!(
                "FPS: {} ({} lights, {:?})",
                counter.draw_rate(),
                stats.lights_drawn,
                stats.path
            );
            log::debug!("{}", scene.status(&engine));
        }
    }

    surface.finish(&frame)?;
    if !cli.quiet {
        eprintln!("{}", engine.debug_view(&counter));
        eprintln!("{}", scene.status(&engine));
    }
    Ok(())
}
