/// Flat annulus and spiral strips.
///
/// The ring variant of the ribbon generator: instead of sampling a curve, each
/// cross-section sits on a circle of angle `i * 2π / num_segments`, spanning from
/// the outer radius inwards by `thickness`. A non-zero `spiral_gain` lifts the
/// strip by `spiral_gain / num_segments` per step.
use std::f32::consts::TAU;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{IndexedMesh, StripMesh};
use crate::ribbon::{encode, push_section, stitch_sections, validate_segments, validate_thickness};

/// Fewer sections put every vertex on one diameter of the circle
pub const MIN_RING_SEGMENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParams {
    pub num_segments: usize,
    /// Radial width of the strip.
    pub thickness: f32,
    /// Outer radius. The inner edge sits at `radius - thickness`.
    pub radius: f32,
    /// Total rise over `num_segments` steps.
    pub spiral_gain: f32,
    /// Join the last cross-section back to the first.
    pub closed: bool,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            num_segments: 100,
            thickness: 4.0,
            radius: 15.0,
            spiral_gain: 5.0,
            closed: false,
        }
    }
}

impl RingParams {
    pub fn validate(&self) -> GeometryResult<()> {
        validate_segments(self.num_segments)?;
        if self.num_segments < MIN_RING_SEGMENTS {
            return Err(GeometryError::invalid(
                "num_segments",
                format!(
                    "a ring needs at least {MIN_RING_SEGMENTS} sections, got {}",
                    self.num_segments
                ),
            ));
        }
        validate_thickness(self.thickness)?;
        if !self.radius.is_finite() || self.radius <= self.thickness {
            return Err(GeometryError::invalid(
                "radius",
                format!(
                    "must exceed thickness {} so the inner edge stays outside the centre, got {}",
                    self.thickness, self.radius
                ),
            ));
        }
        if !self.spiral_gain.is_finite() {
            return Err(GeometryError::invalid(
                "spiral_gain",
                format!("must be finite, got {}", self.spiral_gain),
            ));
        }
        Ok(())
    }
}

/// Generate a ring or spiral strip around the Y axis.
///
/// Cross-section `i` has its outer vertex first and inner vertex second, with
/// UVs `(0, v)` and `(1, v)` for `v = i / (num_segments - 1)`. Normals follow the
/// slope of the spiral. `indexed` picks the output encoding.
///
/// # Errors
///
/// [`GeometryError::InvalidParameter`] when `num_segments < 3`, `thickness` is
/// not positive, `radius <= thickness`, or `spiral_gain` is not finite.
pub fn generate_ring(params: &RingParams, indexed: bool) -> GeometryResult<StripMesh> {
    params.validate()?;

    let n = params.num_segments;
    let outer = params.radius;
    let inner = params.radius - params.thickness;
    let centre = params.radius - params.thickness * 0.5;
    let rise_per_radian = params.spiral_gain / TAU;

    let boundaries = if params.closed { n } else { n - 1 };
    let mut mesh = IndexedMesh::with_capacity(2 * n, 6 * boundaries);

    for i in 0..n {
        let angle = i as f32 * TAU / n as f32;
        let (sin, cos) = angle.sin_cos();
        let radial = Vector3::new(cos, 0.0, sin);
        let y = i as f32 * params.spiral_gain / n as f32;
        let v = i as f32 / (n - 1) as f32;

        let tangent = Vector3::new(-centre * sin, rise_per_radian, centre * cos);
        let normal = tangent
            .cross(&radial)
            .try_normalize(f32::EPSILON)
            .ok_or(GeometryError::DegenerateFrame { t: v })?;

        let lift = Vector3::new(0.0, y, 0.0);
        push_section(
            &mut mesh,
            Point3::from(radial * outer + lift),
            Point3::from(radial * inner + lift),
            normal,
            v,
        );
    }

    stitch_sections(&mut mesh, n, params.closed);

    debug!(
        sections = n,
        closed = params.closed,
        triangles = mesh.triangle_count(),
        indexed,
        "generated ring"
    );

    Ok(encode(mesh, indexed))
}
