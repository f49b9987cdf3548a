/// Interactive strip scene: parameters, control points and the generated mesh
use clap::ValueEnum;
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, warn};

use strip3d_core::{
    generate_ribbon, generate_ring, normal_segments, sample_points, CatmullRom, ControlPointStore,
    GeometryError, Mesh, RibbonOptions, RibbonParams, RingParams, StripMesh, DEFAULT_CURVE_SAMPLES,
};

/// Segment slider range and step
pub const SEGMENTS_MIN: usize = 4;
pub const SEGMENTS_MAX: usize = 300;
pub const SEGMENTS_STEP: usize = 2;

/// Thickness slider range
pub const THICKNESS_MIN: f32 = 0.2;
pub const THICKNESS_MAX: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Ribbon along a spline through the control points
    Road,
    /// Annulus or spiral around the vertical axis
    Ring,
}

impl SceneKind {
    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Road => "road",
            SceneKind::Ring => "ring",
        }
    }
}

/// Everything needed to build a scene
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub kind: SceneKind,
    pub ribbon: RibbonParams,
    pub ring: RingParams,
    pub indexed: bool,
    pub control_points: ControlPointStore,
    /// Seed behind `control_points` when they were scattered
    pub seed: u64,
    pub point_count: usize,
    pub spread: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let point_count = 6;
        let spread = 50.0;
        let seed = 1;
        Self {
            kind: SceneKind::Road,
            ribbon: RibbonParams::default(),
            ring: RingParams::default(),
            indexed: true,
            control_points: ControlPointStore::scatter(point_count, spread, seed),
            seed,
            point_count,
            spread,
        }
    }
}

pub struct StripScene {
    kind: SceneKind,
    store: ControlPointStore,
    ribbon: RibbonParams,
    ring: RingParams,
    indexed: bool,
    pub wireframe: bool,
    pub show_normals: bool,
    selected: usize,
    seed: u64,
    point_count: usize,
    spread: f32,

    mesh: StripMesh,
    triangles: Mesh,
    guide: Vec<Point3<f32>>,
    last_error: Option<GeometryError>,
}

impl StripScene {
    pub fn new(config: SceneConfig) -> Self {
        let mut scene = Self {
            kind: config.kind,
            store: config.control_points,
            ribbon: config.ribbon,
            ring: config.ring,
            indexed: config.indexed,
            wireframe: false,
            show_normals: false,
            selected: 0,
            seed: config.seed,
            point_count: config.point_count,
            spread: config.spread,
            mesh: StripMesh::default(),
            triangles: Mesh::new(),
            guide: Vec::new(),
            last_error: None,
        };
        scene.regenerate();
        scene
    }

    /// Rebuild the mesh from the current parameters.
    ///
    /// A generation error is logged and leaves the scene with an empty mesh.
    pub fn regenerate(&mut self) {
        let options = RibbonOptions {
            indexed: self.indexed,
            ..RibbonOptions::default()
        };

        self.guide.clear();
        let result = match self.kind {
            SceneKind::Road => CatmullRom::through_all(&self.store, false).and_then(|curve| {
                self.guide = sample_points(&curve, DEFAULT_CURVE_SAMPLES);
                generate_ribbon(&curve, &self.ribbon, &options)
            }),
            SceneKind::Ring => generate_ring(&self.ring, self.indexed),
        };

        match result {
            Ok(mesh) => {
                debug!(
                    kind = self.kind.label(),
                    triangles = mesh.triangle_count(),
                    "scene regenerated"
                );
                self.triangles = mesh.to_mesh();
                self.mesh = mesh;
                self.last_error = None;
            }
            Err(error) => {
                warn!(kind = self.kind.label(), %error, "strip generation failed, showing empty mesh");
                self.mesh = StripMesh::default();
                self.triangles = Mesh::new();
                self.last_error = Some(error);
            }
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn mesh(&self) -> &StripMesh {
        &self.mesh
    }

    /// The current mesh as a triangle soup, cached for rasterization
    pub fn triangles(&self) -> &Mesh {
        &self.triangles
    }

    /// Sampled curve polyline; empty for the ring
    pub fn guide(&self) -> &[Point3<f32>] {
        &self.guide
    }

    pub fn last_error(&self) -> Option<&GeometryError> {
        self.last_error.as_ref()
    }

    pub fn control_points(&self) -> &ControlPointStore {
        &self.store
    }

    pub fn selected_point(&self) -> Option<Point3<f32>> {
        self.store.ids().nth(self.selected).and_then(|id| self.store.get(id))
    }

    pub fn segments(&self) -> usize {
        match self.kind {
            SceneKind::Road => self.ribbon.num_segments,
            SceneKind::Ring => self.ring.num_segments,
        }
    }

    pub fn thickness(&self) -> f32 {
        match self.kind {
            SceneKind::Road => self.ribbon.thickness,
            SceneKind::Ring => self.ring.thickness,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Step the segment count by `steps` slider notches.
    pub fn adjust_segments(&mut self, steps: i32) {
        let current = self.segments() as i64;
        let next = (current + steps as i64 * SEGMENTS_STEP as i64)
            .clamp(SEGMENTS_MIN as i64, SEGMENTS_MAX as i64) as usize;
        match self.kind {
            SceneKind::Road => self.ribbon.num_segments = next,
            SceneKind::Ring => self.ring.num_segments = next,
        }
        self.regenerate();
    }

    pub fn adjust_thickness(&mut self, delta: f32) {
        let next = (self.thickness() + delta).clamp(THICKNESS_MIN, THICKNESS_MAX);
        match self.kind {
            SceneKind::Road => self.ribbon.thickness = next,
            SceneKind::Ring => self.ring.thickness = next,
        }
        self.regenerate();
    }

    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            SceneKind::Road => SceneKind::Ring,
            SceneKind::Ring => SceneKind::Road,
        };
        info!(kind = self.kind.label(), "switched scene");
        self.regenerate();
    }

    pub fn toggle_indexed(&mut self) {
        self.indexed = !self.indexed;
        self.regenerate();
    }

    pub fn toggle_closed(&mut self) {
        self.ring.closed = !self.ring.closed;
        if self.kind == SceneKind::Ring {
            self.regenerate();
        }
    }

    pub fn select_next_point(&mut self) {
        if !self.store.is_empty() {
            self.selected = (self.selected + 1) % self.store.len();
        }
    }

    /// Move the selected control point and rebuild the road.
    pub fn nudge_selected(&mut self, offset: Vector3<f32>) {
        let Some(id) = self.store.ids().nth(self.selected) else {
            return;
        };
        if let Err(error) = self.store.translate(id, offset) {
            warn!(%error, "could not move control point");
            return;
        }
        if self.kind == SceneKind::Road {
            self.regenerate();
        }
    }

    /// Scatter a fresh set of control points with the next seed.
    pub fn reseed(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.store = ControlPointStore::scatter(self.point_count, self.spread, self.seed);
        self.selected = 0;
        info!(seed = self.seed, points = self.point_count, "scattered control points");
        if self.kind == SceneKind::Road {
            self.regenerate();
        }
    }

    /// Normal guides sized relative to the strip width
    pub fn normal_guides(&self) -> Vec<(Point3<f32>, Point3<f32>)> {
        normal_segments(&self.mesh, self.thickness())
    }

    pub fn status_line(&self) -> String {
        let encoding = if self.indexed { "indexed" } else { "flat" };
        let mut status = format!(
            "{} | segments {} | thickness {:.1} | {} | verts {} | tris {}",
            self.kind.label(),
            self.segments(),
            self.thickness(),
            encoding,
            self.mesh.vertex_count(),
            self.mesh.triangle_count(),
        );
        if self.kind == SceneKind::Ring && self.ring.closed {
            status.push_str(" | closed");
        }
        if let Some(error) = &self.last_error {
            status.push_str(&format!(" | {error}"));
        }
        status
    }
}
