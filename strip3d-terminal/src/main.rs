/// strip3d Terminal Demo - Procedural Road and Ring
///
/// Renders a ribbon swept along a spline through control points, or a
/// rising ring strip, with the terminal-based ASCII rasterizer.
/// Controls:
///   - WASD / Arrow Keys: Rotate the view
///   - [ ] and , .: Segment count and thickness
///   - M: Switch between road and ring
///   - Q/ESC: Quit
use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use strip3d_terminal::{Cli, StripScene, TerminalApp};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the renderer, so logs only go to a file when asked
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let config = cli.scene_config()?;
    info!(
        scene = config.kind.label(),
        points = config.control_points.len(),
        "starting strip3d terminal"
    );

    let scene = StripScene::new(config);

    let mut app = TerminalApp::new(scene).context("Failed to query terminal size")?;
    app.run().context("Terminal renderer failed")?;

    info!("strip3d terminal exited");
    Ok(())
}
