/// Orbit state for turning a generated mesh in front of the camera
use nalgebra::{Matrix4, Point3, Vector3};

/// Pitch is kept just short of straight up/down
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Yaw/pitch (radians) applied to the model around its own centre, plus a zoom factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub yaw: f32,
    pub pitch: f32,
    /// Multiplier on the camera's framing distance; above 1 moves away
    pub zoom: f32,
}

impl Orbit {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: 1.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw = (self.yaw + dyaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + dpitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(0.1, 10.0);
    }

    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        let pitch = Matrix4::new_rotation(Vector3::new(self.pitch, 0.0, 0.0));
        let yaw = Matrix4::new_rotation(Vector3::new(0.0, self.yaw, 0.0));
        pitch * yaw
    }

    /// Model matrix that moves `center` to the origin, then applies the orbit rotation
    pub fn model_matrix(&self, center: &Point3<f32>) -> Matrix4<f32> {
        self.rotation_matrix() * Matrix4::new_translation(&-center.coords)
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self::new(0.6, 0.5)
    }
}
