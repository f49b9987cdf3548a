/// Terminal viewer for procedurally generated strips
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use nalgebra::Vector3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use strip3d_core::{Aabb, Camera, Orbit};

pub mod cli;
pub mod renderer;
pub mod scene;

pub use cli::Cli;
pub use renderer::AsciiRenderer;
pub use scene::{SceneConfig, SceneKind, StripScene};

use renderer::{GUIDE_CHAR, NORMAL_CHAR, SELECTED_CHAR};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 0.5;

/// Rows reserved for the status and help overlay
const OVERLAY_ROWS: u16 = 2;

const HELP: &str = "WASD/Arrows=Rotate +/-=Zoom [/]=Segments ,/.=Thickness M=Road/Ring F=Wire N=Normals I=Index C=Close P=Proj R=Reseed Tab/HJKL=Move point Space=Spin Q=Quit";

/// Main application struct for terminal strip rendering
pub struct TerminalApp {
    scene: StripScene,
    orbit: Orbit,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    auto_rotate: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: StripScene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, width, height))
    }

    /// Build an app for a terminal of the given size without touching the terminal
    pub fn with_size(scene: StripScene, width: u16, height: u16) -> Self {
        let (cols, rows) = viewport(width, height);
        Self {
            scene,
            orbit: Orbit::default(),
            camera: Camera::new(aspect(cols, rows)),
            renderer: AsciiRenderer::new(cols, rows),
            running: true,
            auto_rotate: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &StripScene {
        &self.scene
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        // Control points move in steps proportional to the strip width
        let step = self.scene.thickness().max(1.0);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('w') | KeyCode::Up => self.orbit.rotate(0.0, 0.1),
            KeyCode::Char('s') | KeyCode::Down => self.orbit.rotate(0.0, -0.1),
            KeyCode::Char('a') | KeyCode::Left => self.orbit.rotate(-0.1, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.orbit.rotate(0.1, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => self.orbit.zoom_by(0.9),
            KeyCode::Char('-') => self.orbit.zoom_by(1.1),
            KeyCode::Char(']') => self.scene.adjust_segments(1),
            KeyCode::Char('[') => self.scene.adjust_segments(-1),
            KeyCode::Char('.') => self.scene.adjust_thickness(0.2),
            KeyCode::Char(',') => self.scene.adjust_thickness(-0.2),
            KeyCode::Char('m') => self.scene.toggle_kind(),
            KeyCode::Char('f') => self.scene.wireframe = !self.scene.wireframe,
            KeyCode::Char('n') => self.scene.show_normals = !self.scene.show_normals,
            KeyCode::Char('i') => self.scene.toggle_indexed(),
            KeyCode::Char('c') => self.scene.toggle_closed(),
            KeyCode::Char('p') => self.camera.toggle_mode(),
            KeyCode::Char('r') => self.scene.reseed(),
            KeyCode::Tab => self.scene.select_next_point(),
            KeyCode::Char('h') => self.scene.nudge_selected(Vector3::new(-step, 0.0, 0.0)),
            KeyCode::Char('l') => self.scene.nudge_selected(Vector3::new(step, 0.0, 0.0)),
            KeyCode::Char('k') => self.scene.nudge_selected(Vector3::new(0.0, 0.0, -step)),
            KeyCode::Char('j') => self.scene.nudge_selected(Vector3::new(0.0, 0.0, step)),
            KeyCode::Char(' ') => self.auto_rotate = !self.auto_rotate,
            _ => {}
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let (cols, rows) = viewport(width, height);
        self.renderer.resize(cols, rows);
        self.camera.aspect = aspect(cols, rows);
    }

    fn update(&mut self) {
        // Continuous slow turn for demo effect
        if self.auto_rotate {
            self.orbit.rotate(0.01, 0.0);
        }
    }

    /// Rasterize the current scene into the renderer's buffers
    pub fn render_frame(&mut self) {
        self.renderer.clear();

        let mesh = self.scene.mesh();
        let guide = self.scene.guide();
        let bounds = mesh
            .bounds()
            .or_else(|| Aabb::from_points(guide.iter().copied()));
        let Some(bounds) = bounds else {
            return;
        };

        self.camera.frame_bounds(&bounds, self.orbit.zoom);
        let model = self.orbit.model_matrix(&bounds.center());

        if self.scene.wireframe {
            self.renderer
                .render_wireframe(self.scene.triangles(), &model, &self.camera);
        } else {
            self.renderer
                .render_mesh(self.scene.triangles(), &model, &self.camera);
        }

        self.renderer
            .render_polyline(guide, &model, &self.camera, GUIDE_CHAR);

        if self.scene.show_normals {
            let guides = self.scene.normal_guides();
            self.renderer
                .render_segments(&guides, &model, &self.camera, NORMAL_CHAR);
        }

        if self.scene.kind() == SceneKind::Road {
            if let Some(selected) = self.scene.selected_point() {
                self.renderer
                    .render_segments(&[(selected, selected)], &model, &self.camera, SELECTED_CHAR);
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_frame();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, OVERLAY_ROWS))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "strip3d | FPS: {:.1} | {}",
                self.fps,
                self.scene.status_line()
            )),
            cursor::MoveTo(0, 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(HELP),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }
}

/// Cells available for the scene below the overlay
fn viewport(width: u16, height: u16) -> (usize, usize) {
    (
        width.max(1) as usize,
        height.saturating_sub(OVERLAY_ROWS).max(1) as usize,
    )
}

fn aspect(cols: usize, rows: usize) -> f32 {
    cols as f32 / rows as f32 * CELL_ASPECT
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use strip3d_core::{ControlPointStore, RibbonParams};

    fn app() -> TerminalApp {
        let config = SceneConfig {
            control_points: ControlPointStore::from_positions([
                Point3::new(-10.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, -10.0),
                Point3::new(10.0, 0.0, 0.0),
            ]),
            ribbon: RibbonParams::new(20, 2.0),
            ..SceneConfig::default()
        };
        TerminalApp::with_size(StripScene::new(config), 80, 42)
    }

    #[test]
    fn test_viewport_reserves_overlay() {
        let app = app();
        assert_eq!(app.renderer().width(), 80);
        assert_eq!(app.renderer().height(), 40);
        assert_eq!(viewport(10, 1), (10, 1));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('x'));
        assert!(app.is_running());
        app.handle_key(KeyCode::Esc);
        assert!(!app.is_running());
    }

    #[test]
    fn test_parameter_keys_regenerate() {
        let mut app = app();
        app.handle_key(KeyCode::Char(']'));
        assert_eq!(app.scene().segments(), 22);
        assert_eq!(app.scene().mesh().vertex_count(), 44);
        app.handle_key(KeyCode::Char(','));
        assert!((app.scene().thickness() - 1.8).abs() < 1e-5);
        app.handle_key(KeyCode::Char('m'));
        assert_eq!(app.scene().kind(), SceneKind::Ring);
    }

    #[test]
    fn test_toggles() {
        let mut app = app();
        app.handle_key(KeyCode::Char('f'));
        app.handle_key(KeyCode::Char('n'));
        assert!(app.scene().wireframe);
        assert!(app.scene().show_normals);
        app.handle_key(KeyCode::Char('i'));
        assert!(!app.scene().is_indexed());
    }

    #[test]
    fn test_rotation_keys() {
        let mut app = app();
        let before = *app.orbit();
        app.handle_key(KeyCode::Right);
        assert!((app.orbit().yaw - before.yaw - 0.1).abs() < 1e-5);
        app.handle_key(KeyCode::Char('+'));
        assert!(app.orbit().zoom < before.zoom);
    }

    #[test]
    fn test_render_frame_draws_scene() {
        let mut app = app();
        app.render_frame();
        assert!(app.renderer().coverage() > 0);

        app.handle_key(KeyCode::Char('n'));
        app.handle_key(KeyCode::Char('f'));
        app.render_frame();
        assert!(app.renderer().coverage() > 0);
    }

    #[test]
    fn test_render_frame_with_empty_mesh_shows_guide() {
        let config = SceneConfig {
            control_points: ControlPointStore::from_positions([
                Point3::new(-10.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
            ]),
            ribbon: RibbonParams::new(1, 2.0),
            ..SceneConfig::default()
        };
        let mut app = TerminalApp::with_size(StripScene::new(config), 80, 42);
        assert!(app.scene().mesh().is_empty());
        app.render_frame();
        assert!(app.renderer().coverage() > 0);
    }

    #[test]
    fn test_resize_event() {
        let mut app = app();
        app.handle_event(Event::Resize(120, 30));
        assert_eq!(app.renderer().width(), 120);
        assert_eq!(app.renderer().height(), 28);
    }
}
