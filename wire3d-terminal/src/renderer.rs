/// Half-block line rasterizer for terminal output
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{LineSink, LineStyle, Rgb, ScreenPoint, Viewport};

/// Upper half, lower half and full cell glyphs
const UPPER_HALF: char = '\u{2580}';
const LOWER_HALF: char = '\u{2584}';
const FULL_BLOCK: char = '\u{2588}';

/// Terminal surface implementing the line-draw capability.
///
/// Each character cell holds two vertically stacked pixels. The logical
/// viewport is scaled uniformly onto that pixel grid and centered, so an
/// 800x800 viewport keeps its square aspect on any terminal size.
pub struct TerminalCanvas {
    columns: usize,
    rows: usize,
    viewport: Viewport,
    pixels: Vec<Option<Rgb>>,
}

impl TerminalCanvas {
    pub fn new(columns: usize, rows: usize, viewport: Viewport) -> Self {
        Self {
            columns,
            rows,
            viewport,
            pixels: vec![None; columns * rows * 2],
        }
    }

    pub fn resize(&mut self, columns: usize, rows: usize) {
        *self = Self::new(columns, rows, self.viewport);
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    fn grid_width(&self) -> usize {
        self.columns
    }

    fn grid_height(&self) -> usize {
        self.rows * 2
    }

    /// Logical-to-grid scale and the grid offset that centers the viewport
    fn fit(&self) -> (f64, f64, f64) {
        let scale_x = self.grid_width() as f64 / self.viewport.width as f64;
        let scale_y = self.grid_height() as f64 / self.viewport.height as f64;
        let scale = scale_x.min(scale_y);
        let offset_x = (self.grid_width() as f64 - self.viewport.width as f64 * scale) / 2.0;
        let offset_y = (self.grid_height() as f64 - self.viewport.height as f64 * scale) / 2.0;
        (scale, offset_x, offset_y)
    }

    fn to_grid(&self, x: f64, y: f64) -> (i64, i64) {
        let (scale, offset_x, offset_y) = self.fit();
        (
            (x * scale + offset_x).floor() as i64,
            (y * scale + offset_y).floor() as i64,
        )
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.grid_width() || y >= self.grid_height() {
            return None;
        }
        self.pixels[y * self.grid_width() + x]
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    fn plot(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.grid_width() as i64 || y >= self.grid_height() as i64 {
            return;
        }
        let idx = y as usize * self.grid_width() + x as usize;
        self.pixels[idx] = Some(color);
    }

    fn stamp(&mut self, x: i64, y: i64, thickness: i64, color: Rgb) {
        let start = -(thickness - 1) / 2;
        for dy in start..start + thickness {
            for dx in start..start + thickness {
                self.plot(x + dx, y + dy, color);
            }
        }
    }

    /// Bresenham between two grid pixels
    fn rasterize(&mut self, from: (i64, i64), to: (i64, i64), thickness: i64, color: Rgb) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, thickness, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Print the canvas starting at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current: Option<Rgb> = None;

        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, top + row as u16))?;
            for column in 0..self.columns {
                let upper = self.pixel(column, row * 2);
                let lower = self.pixel(column, row * 2 + 1);

                let (glyph, color) = match (upper, lower) {
                    (Some(color), Some(_)) => (FULL_BLOCK, Some(color)),
                    (Some(color), None) => (UPPER_HALF, Some(color)),
                    (None, Some(color)) => (LOWER_HALF, Some(color)),
                    (None, None) => (' ', None),
                };

                if let Some(color) = color {
                    if current != Some(color) {
                        writer.queue(SetForegroundColor(Color::Rgb {
                            r: color.r,
                            g: color.g,
                            b: color.b,
                        }))?;
                        current = Some(color);
                    }
                }
                writer.queue(Print(glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl LineSink for TerminalCanvas {
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, style: &LineStyle) {
        let bounds = (
            0.0,
            0.0,
            self.viewport.width as f64 - 1.0,
            self.viewport.height as f64 - 1.0,
        );
        let Some((a, b)) = clip_line(
            (from.x as f64, from.y as f64),
            (to.x as f64, to.y as f64),
            bounds,
        ) else {
            return;
        };

        let (scale, _, _) = self.fit();
        let thickness = (style.width as f64 * scale).round().max(1.0) as i64;
        let start = self.to_grid(a.0, a.1);
        let end = self.to_grid(b.0, b.1);
        self.rasterize(start, end, thickness, style.color);
    }
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: f64, y: f64, (min_x, min_y, max_x, max_y): (f64, f64, f64, f64)) -> u8 {
    let mut code = INSIDE;
    if x < min_x {
        code |= LEFT;
    } else if x > max_x {
        code |= RIGHT;
    }
    if y < min_y {
        code |= TOP;
    } else if y > max_y {
        code |= BOTTOM;
    }
    code
}

/// Cohen-Sutherland clip of a segment against `(min_x, min_y, max_x, max_y)`
pub fn clip_line(
    mut a: (f64, f64),
    mut b: (f64, f64),
    bounds: (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (min_x, min_y, max_x, max_y) = bounds;
    let mut code_a = outcode(a.0, a.1, bounds);
    let mut code_b = outcode(b.0, b.1, bounds);

    loop {
        if code_a | code_b == INSIDE {
            return Some((a, b));
        }
        if code_a & code_b != INSIDE {
            return None;
        }

        let code = if code_a != INSIDE { code_a } else { code_b };
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let point = if code & TOP != 0 {
            (a.0 + dx * (min_y - a.1) / dy, min_y)
        } else if code & BOTTOM != 0 {
            (a.0 + dx * (max_y - a.1) / dy, max_y)
        } else if code & RIGHT != 0 {
            (max_x, a.1 + dy * (max_x - a.0) / dx)
        } else {
            (min_x, a.1 + dy * (min_x - a.0) / dx)
        };

        if code == code_a {
            a = point;
            code_a = outcode(a.0, a.1, bounds);
        } else {
            b = point;
            code_b = outcode(b.0, b.1, bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINK: LineStyle = LineStyle {
        color: Rgb::PINK,
        width: 1,
    };

    #[test]
    fn test_horizontal_line_on_square_grid() {
        // 10 columns x 5 rows is a 10x10 pixel grid, scale 1 for a 10x10 viewport
        let mut canvas = TerminalCanvas::new(10, 5, Viewport::new(10, 10));
        canvas.draw_line(ScreenPoint::new(2, 3), ScreenPoint::new(7, 3), &PINK);

        assert_eq!(canvas.lit_pixels(), 6);
        for x in 2..=7 {
            assert_eq!(canvas.pixel(x, 3), Some(Rgb::PINK));
        }
        assert_eq!(canvas.pixel(1, 3), None);
    }

    #[test]
    fn test_diagonal_line() {
        let mut canvas = TerminalCanvas::new(10, 5, Viewport::new(10, 10));
        canvas.draw_line(ScreenPoint::new(0, 0), ScreenPoint::new(9, 9), &PINK);
        for i in 0..10 {
            assert_eq!(canvas.pixel(i, i), Some(Rgb::PINK));
        }
        assert_eq!(canvas.lit_pixels(), 10);
    }

    #[test]
    fn test_far_off_screen_endpoints_are_clipped() {
        let mut canvas = TerminalCanvas::new(10, 5, Viewport::new(10, 10));
        canvas.draw_line(
            ScreenPoint::new(-1_000_000, 5),
            ScreenPoint::new(i32::MAX, 5),
            &PINK,
        );
        assert_eq!(canvas.lit_pixels(), 10);

        canvas.clear();
        canvas.draw_line(ScreenPoint::new(-50, -50), ScreenPoint::new(-1, 40), &PINK);
        assert_eq!(canvas.lit_pixels(), 0);
    }

    #[test]
    fn test_thick_lines_scale_with_viewport() {
        let mut canvas = TerminalCanvas::new(10, 5, Viewport::new(10, 10));
        let thick = LineStyle { width: 3, ..PINK };
        canvas.draw_line(ScreenPoint::new(2, 5), ScreenPoint::new(7, 5), &thick);
        for y in 4..=6 {
            assert_eq!(canvas.pixel(4, y), Some(Rgb::PINK));
        }
        assert_eq!(canvas.pixel(4, 3), None);
    }

    #[test]
    fn test_viewport_is_centered_on_wide_terminal() {
        // 20x10 pixel grid, 10x10 viewport fits at scale 1 with a 5 pixel margin
        let mut canvas = TerminalCanvas::new(20, 5, Viewport::new(10, 10));
        canvas.draw_line(ScreenPoint::new(0, 0), ScreenPoint::new(0, 9), &PINK);
        for y in 0..10 {
            assert_eq!(canvas.pixel(5, y), Some(Rgb::PINK));
        }
    }

    #[test]
    fn test_draw_emits_half_blocks() {
        let mut canvas = TerminalCanvas::new(3, 1, Viewport::new(3, 2));
        canvas.draw_line(ScreenPoint::new(0, 0), ScreenPoint::new(0, 0), &PINK);
        canvas.draw_line(ScreenPoint::new(1, 1), ScreenPoint::new(1, 1), &PINK);
        canvas.draw_line(ScreenPoint::new(2, 0), ScreenPoint::new(2, 1), &PINK);

        let mut out = Vec::new();
        canvas.draw(&mut out, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected: String = [UPPER_HALF, LOWER_HALF, FULL_BLOCK].iter().collect();
        assert!(text.contains(&expected), "{text:?}");
    }

    #[test]
    fn test_clip_line_inside_is_unchanged() {
        let bounds = (0.0, 0.0, 799.0, 799.0);
        assert_eq!(
            clip_line((10.0, 20.0), (30.0, 40.0), bounds),
            Some(((10.0, 20.0), (30.0, 40.0)))
        );
        assert_eq!(
            clip_line((-10.0, 400.0), (810.0, 400.0), bounds),
            Some(((0.0, 400.0), (799.0, 400.0)))
        );
    }
}
