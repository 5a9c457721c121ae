/// Spin3D Terminal Demo - Toggle-Rotation Cube
///
/// Renders the rainbow cube with the interactive composed-Euler policy.
/// Controls:
///   - X/Y/Z: Select the rotation axis
///   - Space: Toggle rotation on/off
///   - Q/ESC: Quit

use anyhow::Result;
use spin3d_core::{models, RotationPolicy};
use spin3d_terminal::TerminalApp;

/// Degrees added to the active axis on each frame while running.
const STEP_DEGREES: f32 = 2.0;

fn main() -> Result<()> {
    env_logger::init();

    println!("Spin3D Terminal Renderer - Loading...");

    let (shape, faces) = models::cube();

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&shape, &faces, RotationPolicy::euler(STEP_DEGREES))?;
    app.run()?;

    println!("Thank you for using Spin3D!");
    Ok(())
}
