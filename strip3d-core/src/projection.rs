/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Aabb;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera looking down -Z at a model centred on the origin
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// `aspect` is width over height of the viewport in world-equivalent units.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    /// Back the camera away until a box of `bounds`' size, centred on the
    /// origin, fits the view. `zoom` scales the resulting distance.
    pub fn frame_bounds(&mut self, bounds: &Aabb, zoom: f32) {
        let radius = bounds.radius().max(1e-3);
        let vertical = self.fov * 0.5;
        let horizontal = (vertical.tan() * self.aspect).atan();
        let half_fov = vertical.min(horizontal).max(1e-3);
        let distance = radius / half_fov.sin() * zoom;

        self.target = Point3::origin();
        self.position = Point3::new(0.0, 0.0, distance);
        self.near = (distance - radius * 1.5).max(distance * 1e-3);
        self.far = distance + radius * 1.5;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let distance = (self.position - self.target).norm();
                let height = 2.0 * distance * (self.fov * 0.5).tan();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a 3D point to screen space as `(x, y, depth)`.
    ///
    /// Returns `None` for points behind the camera or outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero or negative w
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.iter().any(|c| !(-1.0..=1.0).contains(c)) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(4.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800.0 / 600.0);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_centre() {
        let camera = Camera::default();
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::default();
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }

    #[test]
    fn test_framed_bounds_are_visible() {
        let bounds = Aabb {
            min: Point3::new(-20.0, -5.0, -20.0),
            max: Point3::new(20.0, 5.0, 20.0),
        };
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let mut camera = Camera::new(2.0);
            camera.mode = mode;
            camera.frame_bounds(&bounds, 1.0);
            for corner in [bounds.min, bounds.max, Point3::new(20.0, -5.0, -20.0)] {
                let centred = corner - bounds.center().coords;
                assert!(
                    camera
                        .project_to_screen(&centred, &Matrix4::identity(), 100, 50)
                        .is_some(),
                    "{mode:?} clipped {corner:?}"
                );
            }
        }
    }
}
