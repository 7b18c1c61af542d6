/// ASCII rasterizer for terminal rendering of filled and stroked shapes
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Matrix3;
use roundshape_core::style::gradient_at;
use roundshape_core::{Style, TessellationResult, Viewport};
use std::io::Write;

/// Character luminosity ramp for fill shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character used for outline cells
const STROKE_CHAR: char = 'O';

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Empty,
    Fill(char),
    Stroke,
}

/// ASCII renderer that converts tessellated shapes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::Empty; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Draw fill then stroke as enabled in `style`
    pub fn render_shape(&mut self, result: &TessellationResult, style: &Style, viewport: &Viewport) {
        let Some(bounds) = result.bounds() else {
            return;
        };
        let matrix = viewport.fit_matrix(&bounds);

        if style.fill {
            self.render_fill(result, style, viewport, &matrix);
        }
        if style.stroke {
            self.render_stroke(result, viewport, &matrix);
        }
    }

    fn render_fill(&mut self, result: &TessellationResult, style: &Style, viewport: &Viewport, matrix: &Matrix3<f32>) {
        for [a, b, c] in &result.triangles {
            let corners = [*a, *b, *c].map(|i| {
                let v = &result.vertices[i as usize];
                let (x, y) = viewport.to_screen(matrix, &v.position);
                (x, y, v.uv.x, v.uv.y)
            });
            self.rasterize_triangle(&corners, style);
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32, f32); 3], style: &Style) {
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

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py)) else {
                    continue;
                };
                // Either winding covers the cell
                let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0) || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                if !inside {
                    continue;
                }

                let u = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let v = w0 * v0.3 + w1 * v1.3 + w2 * v2.3;
                let t = gradient_at(style.fill_type, style.fill_angle, u, v);
                let index = ((t * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize).min(LUMINOSITY_RAMP.len() - 1);

                let idx = y as usize * self.width + x as usize;
                if self.cells[idx] != Cell::Stroke {
                    self.cells[idx] = Cell::Fill(LUMINOSITY_RAMP[index]);
                }
            }
        }
    }

    /// Outline as a closed loop of line segments
    fn render_stroke(&mut self, result: &TessellationResult, viewport: &Viewport, matrix: &Matrix3<f32>) {
        let outline = result.outline();
        let n = outline.len();
        for i in 0..n {
            let a = viewport.to_screen(matrix, &outline[i]);
            let b = viewport.to_screen(matrix, &outline[(i + 1) % n]);
            self.draw_line(a, b);
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32)) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = (from.0 + dx * t).floor();
            let y = (from.1 + dy * t).floor();
            if x >= 0.0 && y >= 0.0 && (x as usize) < self.width && (y as usize) < self.height {
                self.cells[y as usize * self.width + x as usize] = Cell::Stroke;
            }
        }
    }

    /// Character at a cell, for inspection
    pub fn char_at(&self, x: usize, y: usize) -> char {
        match self.cells.get(y * self.width + x) {
            Some(Cell::Fill(c)) => *c,
            Some(Cell::Stroke) => STROKE_CHAR,
            _ => ' ',
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let (c, color) = match self.cells[y * self.width + x] {
                    Cell::Empty => (' ', Color::Reset),
                    Cell::Stroke => (STROKE_CHAR, Color::Yellow),
                    Cell::Fill(c) => {
                        // Color based on character intensity
                        let color = match c {
                            '.' | ':' => Color::DarkGrey,
                            '-' | '=' => Color::Grey,
                            '+' | '*' => Color::White,
                            _ => Color::Cyan,
                        };
                        (c, color)
                    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use roundshape_core::preset::{self, RectangleParams};
    use roundshape_core::FillType;

    fn square() -> TessellationResult {
        preset::rectangle(&RectangleParams::default()).tessellate().unwrap()
    }

    #[test]
    fn test_fill_covers_center() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let viewport = Viewport::new(40, 20);
        renderer.render_shape(&square(), &Style::default(), &viewport);
        assert_eq!(renderer.char_at(20, 10), '@');
        assert_eq!(renderer.char_at(0, 0), ' ');
    }

    #[test]
    fn test_stroke_only_leaves_center_empty() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let viewport = Viewport::new(40, 20);
        let style = Style {
            fill: false,
            stroke: true,
            ..Style::default()
        };
        renderer.render_shape(&square(), &style, &viewport);
        assert_eq!(renderer.char_at(20, 10), ' ');
        let stroked = (0..40).any(|x| renderer.char_at(x, 10) == STROKE_CHAR);
        assert!(stroked);
    }

    #[test]
    fn test_linear_gradient_brightens_left_to_right() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let viewport = Viewport::new(40, 20);
        let style = Style {
            fill_type: FillType::LinearGradient,
            ..Style::default()
        };
        renderer.render_shape(&square(), &style, &viewport);
        let rank = |c: char| LUMINOSITY_RAMP.iter().position(|&r| r == c).unwrap();
        assert!(rank(renderer.char_at(13, 10)) < rank(renderer.char_at(27, 10)));
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }
}
