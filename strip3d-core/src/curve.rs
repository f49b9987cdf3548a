/// Parametric curves sampled by the strip generators
use nalgebra::{Point3, Vector3};

use crate::control_points::{ControlPointId, ControlPointStore};
use crate::error::{GeometryError, GeometryResult};

/// Number of points used for the guide line drawn along a curve
pub const DEFAULT_CURVE_SAMPLES: usize = 210;

/// Step used by the finite-difference tangent
const TANGENT_DELTA: f32 = 1e-4;

/// A curve parameterized over `t ∈ [0, 1]`
pub trait Curve {
    fn point_at(&self, t: f32) -> Point3<f32>;

    /// Unit tangent at `t`, pointing towards increasing `t`.
    ///
    /// The default is a central difference over [`Curve::point_at`], clamped to the
    /// domain. A curve that does not move around `t` returns the zero vector.
    fn tangent_at(&self, t: f32) -> Vector3<f32> {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point_at(t2) - self.point_at(t1))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    fn point_at(&self, t: f32) -> Point3<f32> {
        (**self).point_at(t)
    }

    fn tangent_at(&self, t: f32) -> Vector3<f32> {
        (**self).tangent_at(t)
    }
}

/// Evenly spaced points along a curve, from `t = 0` to `t = 1` inclusive
pub fn sample_points<C: Curve + ?Sized>(curve: &C, count: usize) -> Vec<Point3<f32>> {
    match count {
        0 => Vec::new(),
        1 => vec![curve.point_at(0.0)],
        _ => (0..count)
            .map(|i| curve.point_at(i as f32 / (count - 1) as f32))
            .collect(),
    }
}

/// Straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCurve {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl LineCurve {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self { start, end }
    }
}

impl Curve for LineCurve {
    fn point_at(&self, t: f32) -> Point3<f32> {
        self.start + (self.end - self.start) * t
    }

    fn tangent_at(&self, _t: f32) -> Vector3<f32> {
        (self.end - self.start)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// Centripetal Catmull-Rom spline through control points held in a store
///
/// The curve passes through every referenced point. Open curves extrapolate a
/// phantom point at each end; closed curves wrap around.
#[derive(Debug, Clone)]
pub struct CatmullRom<'a> {
    store: &'a ControlPointStore,
    ids: Vec<ControlPointId>,
    closed: bool,
}

impl<'a> CatmullRom<'a> {
    pub fn new(store: &'a ControlPointStore, ids: Vec<ControlPointId>, closed: bool) -> GeometryResult<Self> {
        if ids.len() < 2 {
            return Err(GeometryError::invalid(
                "control_points",
                format!("a spline needs at least 2 points, got {}", ids.len()),
            ));
        }
        if let Some(missing) = ids.iter().find(|id| !store.contains(**id)) {
            return Err(GeometryError::invalid(
                "control_points",
                format!("unknown control point id {}", missing.index()),
            ));
        }
        Ok(Self { store, ids, closed })
    }

    /// Spline through every point in the store, in insertion order
    pub fn through_all(store: &'a ControlPointStore, closed: bool) -> GeometryResult<Self> {
        Self::new(store, store.ids().collect(), closed)
    }

    fn control(&self, i: usize) -> Vector3<f32> {
        self.store[self.ids[i]].coords
    }
}

impl Curve for CatmullRom<'_> {
    fn point_at(&self, t: f32) -> Point3<f32> {
        let len = self.ids.len();
        let t = t.clamp(0.0, 1.0);

        let span = (if self.closed { len } else { len - 1 }) as f32;
        let p = span * t;
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f32;

        if self.closed {
            seg %= len;
        } else if seg >= len - 1 {
            seg = len - 2;
            weight = 1.0;
        }

        let (p0, p1, p2, p3) = if self.closed {
            (
                self.control((seg + len - 1) % len),
                self.control(seg),
                self.control((seg + 1) % len),
                self.control((seg + 2) % len),
            )
        } else {
            let p1 = self.control(seg);
            let p2 = self.control(seg + 1);
            let p0 = if seg > 0 {
                self.control(seg - 1)
            } else {
                p1 * 2.0 - p2
            };
            let p3 = if seg + 2 < len {
                self.control(seg + 2)
            } else {
                p2 * 2.0 - p1
            };
            (p0, p1, p2, p3)
        };

        Point3::from(centripetal_segment(p0, p1, p2, p3, weight))
    }
}

/// Evaluate one centripetal segment between `p1` and `p2` at `w ∈ [0, 1]`
fn centripetal_segment(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    p3: Vector3<f32>,
    w: f32,
) -> Vector3<f32> {
    let knot = |a: Vector3<f32>, b: Vector3<f32>| (b - a).norm_squared().powf(0.25);
    let mut dt0 = knot(p0, p1);
    let mut dt1 = knot(p1, p2);
    let mut dt2 = knot(p2, p3);

    // Coincident points would divide by zero
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    let c0 = p1;
    let c1 = m1;
    let c2 = p1 * -3.0 + p2 * 3.0 - m1 * 2.0 - m2;
    let c3 = p1 * 2.0 - p2 * 2.0 + m1 + m2;

    c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zigzag() -> ControlPointStore {
        ControlPointStore::from_positions([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, -5.0),
            Point3::new(20.0, 2.0, 0.0),
            Point3::new(30.0, 0.0, -5.0),
        ])
    }

    #[test]
    fn test_line_point_and_tangent() {
        let line = LineCurve::new(Point3::origin(), Point3::new(0.0, 0.0, -10.0));
        assert_eq!(line.point_at(0.5), Point3::new(0.0, 0.0, -5.0));
        assert_eq!(line.tangent_at(0.3), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_default_tangent_matches_line() {
        struct Plain(LineCurve);
        impl Curve for Plain {
            fn point_at(&self, t: f32) -> Point3<f32> {
                self.0.point_at(t)
            }
        }
        let plain = Plain(LineCurve::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0)));
        for t in [0.0, 0.5, 1.0] {
            assert_relative_eq!(plain.tangent_at(t), Vector3::new(0.6, 0.8, 0.0), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_sample_points_endpoints() {
        let line = LineCurve::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let points = sample_points(&line, DEFAULT_CURVE_SAMPLES);
        assert_eq!(points.len(), DEFAULT_CURVE_SAMPLES);
        assert_eq!(points[0], Point3::origin());
        assert_eq!(points[DEFAULT_CURVE_SAMPLES - 1], Point3::new(1.0, 0.0, 0.0));
        assert!(sample_points(&line, 0).is_empty());
        assert_eq!(sample_points(&line, 1).len(), 1);
    }

    #[test]
    fn test_catmull_rom_interpolates_control_points() {
        let store = zigzag();
        let curve = CatmullRom::through_all(&store, false).unwrap();
        for (i, expected) in store.positions().iter().enumerate() {
            let t = i as f32 / 3.0;
            assert_relative_eq!(curve.point_at(t), *expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_catmull_rom_closed_wraps() {
        let store = zigzag();
        let curve = CatmullRom::through_all(&store, true).unwrap();
        assert_relative_eq!(curve.point_at(0.0), store.positions()[0], epsilon = 1e-4);
        assert_relative_eq!(curve.point_at(1.0), store.positions()[0], epsilon = 1e-4);
        assert_relative_eq!(curve.point_at(0.5), store.positions()[2], epsilon = 1e-3);
    }

    #[test]
    fn test_catmull_rom_tangent_is_unit() {
        let store = zigzag();
        let curve = CatmullRom::through_all(&store, false).unwrap();
        for i in 0..=10 {
            let tangent = curve.tangent_at(i as f32 / 10.0);
            assert_relative_eq!(tangent.norm(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_catmull_rom_sees_moved_points() {
        let mut store = zigzag();
        let before = CatmullRom::through_all(&store, false).unwrap().point_at(1.0);
        let last = store.ids().last().unwrap();
        store.set(last, Point3::new(30.0, 8.0, -5.0)).unwrap();
        let after = CatmullRom::through_all(&store, false).unwrap().point_at(1.0);
        assert_relative_eq!(before, Point3::new(30.0, 0.0, -5.0), epsilon = 1e-3);
        assert_relative_eq!(after, Point3::new(30.0, 8.0, -5.0), epsilon = 1e-3);
    }

    #[test]
    fn test_catmull_rom_rejects_bad_ids() {
        let store = zigzag();
        let mut other = ControlPointStore::new();
        for _ in 0..6 {
            other.insert(Point3::origin());
        }
        let ids: Vec<_> = other.ids().collect();
        assert!(matches!(
            CatmullRom::new(&store, ids, false),
            Err(GeometryError::InvalidParameter { name: "control_points", .. })
        ));
        assert!(CatmullRom::new(&store, vec![], false).is_err());
    }
}
