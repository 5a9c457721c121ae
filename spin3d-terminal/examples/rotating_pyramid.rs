/// Example: free-running rotating pyramid
///
/// Drives the accumulated-matrix policy: the model matrix is updated
/// incrementally each frame by per-axis angular rates, so the pyramid
/// keeps rotating about its own evolving axes. Press Q to quit.
///
/// Usage: cargo run --example rotating_pyramid

use anyhow::Result;
use crossterm::terminal;
use nalgebra::Vector3;
use spin3d_core::{models, Camera, RotationPolicy};
use spin3d_terminal::TerminalApp;

fn main() -> Result<()> {
    env_logger::init();

    let (width, height) = terminal::size()?;
    let camera = Camera::new(width as u32, height as u32);

    // Radians per second around each axis.
    let rates = Vector3::new(0.9, 0.6, 1.5);

    let (shape, faces) = models::pyramid();
    let mut app = TerminalApp::new(&shape, &faces, RotationPolicy::accumulated(rates, &camera))?;
    app.run()
}
