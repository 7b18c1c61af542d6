/// Terminal-based shape editor and previewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, info};
use roundshape_core::{Preset, Shape, ShapeEvent, ShapeSpec, Viewport};
use std::io::{self, stdout, Write};
use std::time::Duration;

pub mod logger;
pub mod renderer;

pub use renderer::AsciiRenderer;

/// Corner radius change per key press, in shape units
const RADIUS_STEP: f32 = 5.0;
/// Gradient angle change per key press, in degrees
const ANGLE_STEP: f32 = 15.0;
/// How long to wait for input before checking for pending events again
const INPUT_TIMEOUT: Duration = Duration::from_millis(250);

/// Main application struct for the terminal shape editor
pub struct TerminalApp {
    shape: Shape,
    /// Source of the geometry; `None` for shapes loaded from a file
    preset: Option<Preset>,
    viewport: Viewport,
    renderer: AsciiRenderer,
    running: bool,
    frames: u64,
}

impl TerminalApp {
    /// Editor for a preset, sized to the current terminal
    pub fn new(preset: Preset) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(Shape::from_preset(&preset), Some(preset), width, height))
    }

    /// Editor for a fixed shape, sized to the current terminal
    pub fn from_spec(spec: ShapeSpec) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(Shape::new(spec), None, width, height))
    }

    pub fn with_size(shape: Shape, preset: Option<Preset>, width: u16, height: u16) -> Self {
        let mut shape = shape;
        shape.set_stroke(true);
        Self {
            shape,
            preset,
            viewport: Self::viewport_for(width, height),
            renderer: AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize),
            running: true,
            frames: 0,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The first row is the status line
    fn viewport_for(width: u16, height: u16) -> Viewport {
        Viewport::new(width as u32, height.saturating_sub(1) as u32)
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
        self.shape.take_events();
        self.draw()?;

        while self.running {
            if event::poll(INPUT_TIMEOUT)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(width, height) => {
                        self.resize(width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            }

            if self.update() {
                self.draw()?;
            }
        }

        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        debug!("terminal resized to {}x{}", width, height);
        self.viewport = Self::viewport_for(width, height);
        self.renderer.resize(width as usize, height.saturating_sub(1) as usize);
        self.render();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Tab => {
                if let Some(preset) = self.preset.as_mut() {
                    let next = preset
                        .next()
                        .with_corner_radius(preset.corner_radius())
                        .with_corner_smoothness(preset.corner_smoothness());
                    info!("switching preset {} -> {}", preset.name(), next.name());
                    *preset = next;
                    self.shape.apply_spec(next.build());
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_radius(RADIUS_STEP),
            KeyCode::Char('-') => self.adjust_radius(-RADIUS_STEP),
            KeyCode::Char(']') => self.adjust_smoothness(1),
            KeyCode::Char('[') => self.adjust_smoothness(-1),
            KeyCode::Char('f') => {
                let fill = !self.shape.style().fill;
                self.shape.set_fill(fill);
            }
            KeyCode::Char('s') => {
                let stroke = !self.shape.style().stroke;
                self.shape.set_stroke(stroke);
            }
            KeyCode::Char('g') => {
                let fill_type = self.shape.style().fill_type.next();
                self.shape.set_fill_type(fill_type);
            }
            KeyCode::Left => {
                let angle = self.shape.style().fill_angle - ANGLE_STEP;
                self.shape.set_fill_angle(angle);
            }
            KeyCode::Right => {
                let angle = self.shape.style().fill_angle + ANGLE_STEP;
                self.shape.set_fill_angle(angle);
            }
            _ => {}
        }
    }

    fn adjust_radius(&mut self, delta: f32) {
        let current = self.shape.radii().iter().copied().fold(0.0, f32::max);
        let radius = (current + delta).max(0.0);
        match self.preset.as_mut() {
            Some(preset) => {
                *preset = preset.with_corner_radius(radius);
                self.shape.apply_spec(preset.build());
            }
            None => self.shape.set_all_radii(radius),
        }
    }

    fn adjust_smoothness(&mut self, delta: i64) {
        let current = self.shape.smoothness().iter().copied().max().unwrap_or(1);
        let smoothness = (current as i64 + delta).clamp(1, u32::MAX as i64) as u32;
        match self.preset.as_mut() {
            Some(preset) => {
                *preset = preset.with_corner_smoothness(smoothness);
                self.shape.apply_spec(preset.build());
            }
            None => self.shape.set_all_smoothness(smoothness),
        }
    }

    /// Consume pending shape events. Returns true when the frame was re-rendered.
    pub fn update(&mut self) -> bool {
        let events = self.shape.take_events();
        if events.is_empty() {
            return false;
        }
        if events.contains(&ShapeEvent::GeometryChanged) {
            debug!("geometry changed, re-tessellating");
        }
        self.renderer.clear();
        self.render();
        true
    }

    fn render(&mut self) {
        self.frames += 1;
        let style = *self.shape.style();
        match self.shape.tessellation() {
            Ok(result) => self.renderer.render_shape(result, &style, &self.viewport),
            Err(e) => log::warn!("cannot tessellate shape: {}", e),
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        if self.frames == 0 {
            self.render();
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1), terminal::Clear(ClearType::FromCursorDown))?;
        self.renderer.draw(&mut stdout)?;

        // Draw status line
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    pub fn status_line(&mut self) -> String {
        let name = self.preset.map(|p| p.name()).unwrap_or("file");
        let radius = self.shape.radii().iter().copied().fold(0.0, f32::max);
        let smoothness = self.shape.smoothness().iter().copied().max().unwrap_or(1);
        let style = *self.shape.style();
        let vertices = self.shape.tessellation().map(|r| r.vertices.len()).unwrap_or(0);
        format!(
            "roundshape | {} | radius {:.0} | smoothness {} | {} vertices | fill {:?} {:.0}deg | Tab=Preset +/-=Radius [/]=Smooth F/S/G=Fill/Stroke/Gradient Q=Quit",
            name, radius, smoothness, vertices, style.fill_type, style.fill_angle
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use roundshape_core::FillType;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> TerminalApp {
        let preset = Preset::default();
        TerminalApp::with_size(Shape::from_preset(&preset), Some(preset), 60, 25)
    }

    #[test]
    fn test_radius_keys_update_preset_geometry() {
        let mut app = app();
        app.update();
        app.handle_key(key(KeyCode::Char('+')));
        app.handle_key(key(KeyCode::Char('+')));
        assert_eq!(app.shape().radii(), &[10.0; 4]);

        assert!(app.update());
        assert!(!app.update());

        app.handle_key(key(KeyCode::Char('-')));
        app.handle_key(key(KeyCode::Char('-')));
        app.handle_key(key(KeyCode::Char('-')));
        assert_eq!(app.shape().radii(), &[0.0; 4]);
    }

    #[test]
    fn test_smoothness_never_below_one() {
        let mut app = app();
        for _ in 0..60 {
            app.handle_key(key(KeyCode::Char('[')));
        }
        assert_eq!(app.shape().smoothness(), &[1; 4]);
    }

    #[test]
    fn test_tab_switches_preset_and_keeps_radius() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('+')));
        app.handle_key(key(KeyCode::Tab));
        assert!(app.status_line().contains("regular_polygon"));
        assert!(app.shape().radii().iter().all(|&r| r == 5.0));
    }

    #[test]
    fn test_style_keys_emit_single_redraw() {
        let mut app = app();
        app.update();
        let frames = app.frames();
        app.handle_key(key(KeyCode::Char('g')));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.shape().style().fill_type, FillType::LinearGradient);
        assert_eq!(app.shape().style().fill_angle, ANGLE_STEP);
        assert!(!app.shape().style().stroke);

        assert!(app.update());
        assert_eq!(app.frames(), frames + 1);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }
}
