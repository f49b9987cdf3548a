// cli.rs - Command-line interface configuration
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use strip3d_core::{load_control_points, ControlPointStore, RibbonParams, RingParams};

use crate::scene::{SceneConfig, SceneKind};

#[derive(Parser, Debug, Clone)]
#[command(name = "strip3d-terminal")]
#[command(about = "Procedural road and ring strips rendered in the terminal", long_about = None)]
pub struct Cli {
    /// Which strip to show first
    #[arg(long, value_enum, default_value_t = SceneKind::Road)]
    pub scene: SceneKind,

    /// Cross-sections sampled along the strip
    #[arg(long, default_value_t = 100)]
    pub segments: usize,

    /// Half-width of the road, radial width of the ring
    #[arg(long, default_value_t = 4.0)]
    pub thickness: f32,

    /// Control-point file, one `x y z` per line
    #[arg(long)]
    pub points: Option<PathBuf>,

    /// Number of random control points when no file is given
    #[arg(long, default_value_t = 6)]
    pub point_count: usize,

    /// Side of the cube random control points are scattered in
    #[arg(long, default_value_t = 50.0)]
    pub spread: f32,

    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Outer radius of the ring
    #[arg(long, default_value_t = 15.0)]
    pub radius: f32,

    /// Total rise of the ring over all of its segments
    #[arg(long, default_value_t = 5.0)]
    pub spiral_gain: f32,

    /// Join the ring's last section back to its first
    #[arg(long)]
    pub closed: bool,

    /// Emit a flat triangle list instead of an indexed mesh
    #[arg(long)]
    pub flat: bool,

    /// Write logs to this file (the terminal itself is taken by the renderer)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Build the scene configuration, reading the control-point file if one was given.
    pub fn scene_config(&self) -> Result<SceneConfig> {
        let control_points = match &self.points {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read control points from {}", path.display()))?;
                load_control_points(&text)
                    .with_context(|| format!("Failed to parse control points in {}", path.display()))?
            }
            None => ControlPointStore::scatter(self.point_count, self.spread, self.seed),
        };

        Ok(SceneConfig {
            kind: self.scene,
            ribbon: RibbonParams::new(self.segments, self.thickness),
            ring: RingParams {
                num_segments: self.segments,
                thickness: self.thickness,
                radius: self.radius,
                spiral_gain: self.spiral_gain,
                closed: self.closed,
            },
            indexed: !self.flat,
            control_points,
            seed: self.seed,
            point_count: self.point_count,
            spread: self.spread,
        })
    }
}
