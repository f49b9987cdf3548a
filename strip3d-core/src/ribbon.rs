/// Flat ribbon (road) mesh generation along a curve.
///
/// Each sample of the curve contributes a left and a right vertex, offset by
/// `thickness` to either side along the cross-section frame's perpendicular.
/// Consecutive cross-sections are stitched with two triangles:
///
/// ```text
///  4--5    <-- section 2
///  |\ |
///  | \|
///  2--3    <-- section 1
///  |\ |
///  | \|
///  0--1    <-- section 0
/// ```
///
/// Boundary `i` emits `(2i, 2i+1, 2i+2)` and `(2i+1, 2i+3, 2i+2)`.
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use crate::curve::Curve;
use crate::error::{GeometryError, GeometryResult};
use crate::frame::CrossSectionFrame;
use crate::geometry::{IndexedMesh, StripMesh, Vertex};

/// Shape parameters for a ribbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonParams {
    /// Number of cross-sections sampled along the curve, at least 2.
    pub num_segments: usize,
    /// Offset of each edge from the curve; the ribbon is `2 * thickness` wide.
    pub thickness: f32,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            num_segments: 100,
            thickness: 4.0,
        }
    }
}

impl RibbonParams {
    pub fn new(num_segments: usize, thickness: f32) -> Self {
        Self {
            num_segments,
            thickness,
        }
    }

    pub fn validate(&self) -> GeometryResult<()> {
        validate_segments(self.num_segments)?;
        validate_thickness(self.thickness)
    }
}

/// Output encoding and reference axes shared by the strip generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonOptions {
    /// Emit unique vertices plus an index buffer instead of a triangle soup.
    pub indexed: bool,
    /// Reference axis the perpendicular is derived from.
    pub up: Vector3<f32>,
    /// Axis substituted when the tangent runs parallel to `up`.
    pub fallback_up: Vector3<f32>,
}

impl Default for RibbonOptions {
    fn default() -> Self {
        Self {
            indexed: true,
            up: Vector3::y(),
            fallback_up: Vector3::z(),
        }
    }
}

impl RibbonOptions {
    #[must_use]
    pub fn flat(mut self) -> Self {
        self.indexed = false;
        self
    }

    #[must_use]
    pub fn with_up(mut self, up: Vector3<f32>) -> Self {
        self.up = up;
        self
    }

    #[must_use]
    pub fn with_fallback_up(mut self, fallback_up: Vector3<f32>) -> Self {
        self.fallback_up = fallback_up;
        self
    }

    pub fn validate(&self) -> GeometryResult<()> {
        if !is_usable_axis(&self.up) {
            return Err(GeometryError::invalid(
                "up",
                format!("reference axis must be finite and non-zero, got {:?}", self.up),
            ));
        }
        if !is_usable_axis(&self.fallback_up) {
            return Err(GeometryError::invalid(
                "fallback_up",
                format!("reference axis must be finite and non-zero, got {:?}", self.fallback_up),
            ));
        }
        Ok(())
    }
}

/// Generate a ribbon mesh following `curve`.
///
/// Produces `2 * num_segments` vertices and `2 * (num_segments - 1)` triangles,
/// either indexed or flattened depending on `options.indexed`. UVs run `(0, t)`
/// on the left edge and `(1, t)` on the right edge.
///
/// # Errors
///
/// - [`GeometryError::InvalidParameter`] when `num_segments < 2`, `thickness`
///   is not a positive finite number, or a reference axis is zero.
/// - [`GeometryError::DegenerateFrame`] when a sample has no usable
///   perpendicular, even with the fallback axis.
pub fn generate_ribbon<C: Curve + ?Sized>(
    curve: &C,
    params: &RibbonParams,
    options: &RibbonOptions,
) -> GeometryResult<StripMesh> {
    params.validate()?;
    options.validate()?;

    let n = params.num_segments;
    let mut mesh = IndexedMesh::with_capacity(2 * n, 6 * (n - 1));
    let mut fallbacks = 0usize;

    for i in 0..n {
        let t = i as f32 / (n - 1) as f32;
        let pt = curve.point_at(t);
        let tangent = curve.tangent_at(t);
        let frame = CrossSectionFrame::compute(t, tangent, options.up, options.fallback_up)?;
        if frame.used_fallback {
            fallbacks += 1;
        }

        let offset = frame.perp * params.thickness;
        push_section(&mut mesh, pt - offset, pt + offset, frame.normal, t);
    }

    stitch_sections(&mut mesh, n, false);

    if fallbacks > 0 {
        warn!(
            samples = fallbacks,
            sections = n,
            fallback_up = ?options.fallback_up,
            "tangent parallel to up axis, used fallback axis"
        );
    }

    debug!(
        sections = n,
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        indexed = options.indexed,
        "generated ribbon"
    );

    Ok(encode(mesh, options.indexed))
}

/// Push one cross-section: left/first vertex, then right/second vertex.
pub(crate) fn push_section(
    mesh: &mut IndexedMesh,
    first: Point3<f32>,
    second: Point3<f32>,
    normal: Vector3<f32>,
    v: f32,
) {
    mesh.vertices
        .push(Vertex::from_parts(first, normal, None).with_uv(0.0, v));
    mesh.vertices
        .push(Vertex::from_parts(second, normal, None).with_uv(1.0, v));
}

/// Index the triangle pairs between consecutive cross-sections.
///
/// With `wrap`, the last section is also joined back to the first.
pub(crate) fn stitch_sections(mesh: &mut IndexedMesh, sections: usize, wrap: bool) {
    let boundaries = if wrap { sections } else { sections - 1 };
    for i in 0..boundaries {
        let j = (i + 1) % sections;
        let (a, b) = (2 * i as u32, 2 * i as u32 + 1);
        let (c, d) = (2 * j as u32, 2 * j as u32 + 1);
        mesh.indices.extend_from_slice(&[a, b, c, b, d, c]);
    }
}

pub(crate) fn encode(mesh: IndexedMesh, indexed: bool) -> StripMesh {
    if indexed {
        StripMesh::Indexed(mesh)
    } else {
        StripMesh::Flat(mesh.flatten())
    }
}

pub(crate) fn validate_segments(num_segments: usize) -> GeometryResult<()> {
    if num_segments < 2 {
        return Err(GeometryError::invalid(
            "num_segments",
            format!("must be at least 2, got {num_segments}"),
        ));
    }
    if 2 * num_segments > u32::MAX as usize {
        return Err(GeometryError::invalid(
            "num_segments",
            format!("{num_segments} sections overflow a u32 index buffer"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_thickness(thickness: f32) -> GeometryResult<()> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(GeometryError::invalid(
            "thickness",
            format!("must be positive and finite, got {thickness}"),
        ));
    }
    Ok(())
}

fn is_usable_axis(axis: &Vector3<f32>) -> bool {
    axis.iter().all(|c| c.is_finite()) && axis.norm() > f32::EPSILON
}
