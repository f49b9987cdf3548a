/// Cross-section frames for strip sweeping
///
/// A strip is built by offsetting each curve sample sideways along a
/// perpendicular derived from the tangent and a reference up axis.
use nalgebra::Vector3;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};

/// Cross products shorter than this are treated as parallel vectors
const PARALLEL_EPSILON: f32 = 1e-6;

/// Sideways and surface-normal directions at one curve sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSectionFrame {
    /// Unit offset direction, `normalize(tangent × up)`.
    /// Left vertices sit at `-perp`, right vertices at `+perp`.
    pub perp: Vector3<f32>,
    /// Unit surface normal, `normalize(perp × tangent)`.
    pub normal: Vector3<f32>,
    /// Whether the fallback axis stood in for `up` at this sample.
    pub used_fallback: bool,
}

impl CrossSectionFrame {
    /// Build the frame for a sample at curve parameter `t`.
    ///
    /// When the tangent is parallel to `up`, `fallback_up` is used instead and
    /// `used_fallback` is set. Fails only if neither axis yields a perpendicular.
    pub fn compute(
        t: f32,
        tangent: Vector3<f32>,
        up: Vector3<f32>,
        fallback_up: Vector3<f32>,
    ) -> GeometryResult<Self> {
        if let Some(frame) = Self::try_with_up(tangent, up, false) {
            return Ok(frame);
        }

        let frame = Self::try_with_up(tangent, fallback_up, true)
            .ok_or(GeometryError::DegenerateFrame { t })?;
        debug!(t, ?tangent, ?fallback_up, "tangent parallel to up axis");
        Ok(frame)
    }

    fn try_with_up(tangent: Vector3<f32>, up: Vector3<f32>, used_fallback: bool) -> Option<Self> {
        let perp = tangent.cross(&up).try_normalize(PARALLEL_EPSILON)?;
        let normal = perp.cross(&tangent).try_normalize(PARALLEL_EPSILON)?;
        Some(Self {
            perp,
            normal,
            used_fallback,
        })
    }
}
