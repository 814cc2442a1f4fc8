mod app;
mod camera;
mod components;
mod controls;
mod engine;
mod error;
mod math;
mod params;
mod renderer;
mod scene;
mod session;
mod systems;
mod ui;

use anyhow::Result;
use app::GameApp;
use camera::OrbitCamera;
use clap::Parser;
use engine::window::GameWindow;
use error::InitError;
use params::SimParams;
use session::Session;

#[derive(Parser)]
#[command(name = "crashbox", about = "Vehicle crash-test sandbox")]
struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Gravity in m/s² (0-20)
    #[arg(long, default_value_t = params::DEFAULT_GRAVITY)]
    gravity: f32,
    /// Engine power in percent (0-200)
    #[arg(long, default_value_t = params::DEFAULT_ENGINE_POWER)]
    engine_power: f32,
    /// Camera orbit distance (10-50)
    #[arg(long, default_value_t = camera::DEFAULT_DISTANCE)]
    camera_distance: f32,
    /// Camera height (5-30)
    #[arg(long, default_value_t = camera::DEFAULT_HEIGHT)]
    camera_height: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let params = SimParams::new(args.gravity, args.engine_power);
    let camera = OrbitCamera::new(args.camera_distance, args.camera_height);
    tracing::info!(
        gravity = params.gravity(),
        engine_power = params.engine_power(),
        camera_distance = camera.distance(),
        camera_height = camera.height(),
        "starting crashbox"
    );

    let sdl = sdl2::init().map_err(InitError::Sdl)?;
    let window = match GameWindow::new(&sdl, "crashbox", args.width.max(1), args.height.max(1)) {
        Ok(window) => window,
        Err(e) if e.is_missing_surface() => {
            // Nothing to draw on, nothing to do.
            tracing::warn!("no render surface: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut app = GameApp::new(Session::new(params, camera), window)?;
    app.run(&sdl)?;
    Ok(())
}
