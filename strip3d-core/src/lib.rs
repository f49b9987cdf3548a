/// strip3d core library - procedural strip meshes along curves
///
/// Builds flat ribbon (road) and ring/spiral strip meshes from a curve and a
/// handful of parameters, and provides the curve, control-point and camera
/// helpers the demo viewer needs.

pub mod control_points;
pub mod curve;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod points;
pub mod projection;
pub mod ribbon;
pub mod ring;
pub mod transform;

// Re-export commonly used types
pub use control_points::{ControlPointId, ControlPointStore};
pub use curve::{sample_points, CatmullRom, Curve, LineCurve, DEFAULT_CURVE_SAMPLES};
pub use error::{ControlPointError, GeometryError, GeometryResult, PointsError};
pub use frame::CrossSectionFrame;
pub use geometry::{normal_segments, Aabb, IndexedMesh, Mesh, MeshBuffers, StripMesh, Triangle, Vertex};
pub use points::{load_control_points, parse_control_points};
pub use projection::{Camera, ProjectionMode};
pub use ribbon::{generate_ribbon, RibbonOptions, RibbonParams};
pub use ring::{generate_ring, RingParams, MIN_RING_SEGMENTS};
pub use transform::Orbit;
