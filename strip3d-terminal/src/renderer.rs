/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;
use strip3d_core::{Camera, Mesh, Triangle};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Depth bias so lines drawn on a surface stay visible
const LINE_DEPTH_BIAS: f32 = 1e-3;

pub const WIREFRAME_CHAR: char = '~';
pub const GUIDE_CHAR: char = 'o';
pub const NORMAL_CHAR: char = '|';
pub const SELECTED_CHAR: char = 'X';

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Number of cells holding something other than a space
    pub fn coverage(&self) -> usize {
        self.char_buffer.iter().filter(|c| **c != ' ').count()
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera);
        }
    }

    /// Draw only triangle edges
    pub fn render_wireframe(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera) {
        for triangle in &mesh.triangles {
            let [a, b, c] = &triangle.vertices;
            for (from, to) in [(a, b), (b, c), (c, a)] {
                self.draw_line(&from.position, &to.position, model_matrix, camera, WIREFRAME_CHAR);
            }
        }
    }

    /// Draw a connected polyline through `points`
    pub fn render_polyline(
        &mut self,
        points: &[Point3<f32>],
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        character: char,
    ) {
        for pair in points.windows(2) {
            self.draw_line(&pair[0], &pair[1], model_matrix, camera, character);
        }
    }

    pub fn render_segments(
        &mut self,
        segments: &[(Point3<f32>, Point3<f32>)],
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        character: char,
    ) {
        for (from, to) in segments {
            self.draw_line(from, to, model_matrix, camera, character);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, model_matrix: &Matrix4<f32>, camera: &Camera) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        // Strips are open sheets, so both faces are lit
        let normal = model_matrix.transform_vector(&triangle.calculate_normal());
        let light_dir = Vector3::new(0.0, 0.0, 1.0);
        let brightness = normal.dot(&light_dir).abs();

        // Map brightness to character, never fully blank for a visible face
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, character);
                    }
                }
            }
        }
    }

    /// Draw a depth-tested line between two model-space points.
    ///
    /// Lines with an endpoint outside the view volume are skipped.
    fn draw_line(
        &mut self,
        from: &Point3<f32>,
        to: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        character: char,
    ) {
        let project = |p: &Point3<f32>| {
            camera.project_to_screen(p, model_matrix, self.width as u32, self.height as u32)
        };
        let (Some(a), Some(b)) = (project(from), project(to)) else {
            return;
        };

        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let s = i as f32 / steps as f32;
            let x = a.0 + (b.0 - a.0) * s;
            let y = a.1 + (b.1 - a.1) * s;
            let depth = a.2 + (b.2 - a.2) * s - LINE_DEPTH_BIAS;
            self.plot(x.floor() as i32, y.floor() as i32, depth, character);
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    /// Write the frame row by row
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    WIREFRAME_CHAR => Color::Green,
                    GUIDE_CHAR => Color::Yellow,
                    NORMAL_CHAR => Color::Red,
                    SELECTED_CHAR => Color::Magenta,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
