/// Terminal-based viewer for B-Rep models
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::fmt::Display;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use brep_core::{BuildMode, Camera, LoaderConfig, ProjectionMode};
use nalgebra::Vector3;

pub mod config;
pub mod renderer;
pub mod viewer;

pub use config::ViewerConfig;
pub use renderer::AsciiRenderer;
pub use viewer::Viewer;

const HELP: &str = concat!(
    "WASD/ZX=Rotate Arrows=Move +/-=Zoom R=Reset ",
    "C=Colour M=Multi-colour 0=Default P=Projection Q=Quit"
);

/// Error line shown under the header. Cleared by the next successful action.
#[derive(Debug, Default)]
struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    fn track<E: Display>(&mut self, context: &str, result: Result<(), E>) {
        match result {
            Ok(()) => self.message = None,
            Err(e) => {
                let message = format!("{context}: {e}");
                tracing::warn!("{message}");
                self.message = Some(message);
            }
        }
    }

    fn clear(&mut self) {
        self.message = None;
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    viewer: Viewer,
    renderer: AsciiRenderer,
    running: bool,
    status: StatusLine,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig, loader: LoaderConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            viewer: Viewer::new(config, loader, Camera::new(u32::from(width), u32::from(height))),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            status: StatusLine::default(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
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
        let fps = self.viewer.config().target_fps.max(1);
        let target_frame_time = Duration::from_millis(1000 / fps);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

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

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                self.handle_key(code)
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.viewer.camera_mut().aspect = f64::from(width) / f64::from(height.max(1));
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let step = self.viewer.config().rotation_step;
        let shift = self.viewer.config().translation_step;
        let zoom = self.viewer.config().zoom_step;

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') => self.viewer.rotate(&Vector3::x(), -step),
            KeyCode::Char('s') => self.viewer.rotate(&Vector3::x(), step),
            KeyCode::Char('a') => self.viewer.rotate(&Vector3::y(), -step),
            KeyCode::Char('d') => self.viewer.rotate(&Vector3::y(), step),
            KeyCode::Char('z') => self.viewer.rotate(&Vector3::z(), -step),
            KeyCode::Char('x') => self.viewer.rotate(&Vector3::z(), step),
            KeyCode::Up => self.viewer.translate(&Vector3::new(0.0, shift, 0.0)),
            KeyCode::Down => self.viewer.translate(&Vector3::new(0.0, -shift, 0.0)),
            KeyCode::Left => self.viewer.translate(&Vector3::new(-shift, 0.0, 0.0)),
            KeyCode::Right => self.viewer.translate(&Vector3::new(shift, 0.0, 0.0)),
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewer.zoom(zoom),
            KeyCode::Char('-') => self.viewer.zoom(-zoom),
            KeyCode::Char('r') => self.viewer.reset_view(),
            KeyCode::Char('c') => {
                let result = self.viewer.reload();
                self.status.track("Failed to reload model", result);
            }
            KeyCode::Char('m') => {
                let result = self.viewer.toggle_mode();
                self.status.track("Failed to switch mode", result);
            }
            KeyCode::Char('0') => {
                self.viewer.load_default();
                self.status.clear();
            }
            KeyCode::Char('p') => {
                let camera = self.viewer.camera_mut();
                camera.mode = match camera.mode {
                    ProjectionMode::Perspective => ProjectionMode::Orthographic,
                    ProjectionMode::Orthographic => ProjectionMode::Perspective,
                };
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        // Render scene
        self.renderer
            .render_scene(self.viewer.scene(), self.viewer.camera());

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let mode = match self.viewer.mode() {
            BuildMode::PerFace => "multi-colour",
            BuildMode::Merged => "simple",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} [{}] | FPS: {:.1} | {}",
                self.viewer.model_name(),
                mode,
                self.fps,
                HELP
            )),
            ResetColor
        )?;
        if let Some(status) = self.status.message() {
            queue!(
                stdout,
                cursor::MoveTo(0, 1),
                SetForegroundColor(Color::Red),
                Print(status),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}
