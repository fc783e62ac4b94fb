use ratatui::{buffer::Buffer, layout::Rect, style::Color as TermColor, widgets::Widget};

use super::surface::{Color, DrawSurface, PixelRect};

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: &str = "▀";

/// An in-memory RGBA pixel buffer.
///
/// Rendered to the terminal two pixel rows per text row, so a canvas of
/// `w x h` pixels takes `w` columns and `h / 2` (rounded up) rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Terminal cells needed to show the whole canvas
    pub fn cell_size(&self) -> (u16, u16) {
        let cols = self.width.min(u16::MAX as u32) as u16;
        let rows = self.height.div_ceil(2).min(u16::MAX as u32) as u16;
        (cols, rows)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Round a rect edge to the nearest pixel boundary inside `0..=limit`
fn pixel_edge(value: f32, limit: u32) -> u32 {
    value.round().clamp(0.0, limit as f32) as u32
}

impl DrawSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let x0 = pixel_edge(rect.x, self.width);
        let x1 = pixel_edge(rect.x + rect.width, self.width);
        let y0 = pixel_edge(rect.y, self.height);
        let y1 = pixel_edge(rect.y + rect.height, self.height);
        if x0 >= x1 {
            return;
        }

        for y in y0..y1 {
            let row = self.index(x0, y)..self.index(x1, y);
            self.pixels[row].fill(color);
        }
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.cell_size();

        for row in 0..rows.min(area.height) {
            let top = row as u32 * 2;
            for col in 0..cols.min(area.width) {
                let x = col as u32;
                let fg = self.pixel(x, top).map_or(TermColor::Reset, term_color);
                let bg = self.pixel(x, top + 1).map_or(TermColor::Reset, term_color);

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK).set_fg(fg).set_bg(bg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = PixelCanvas::new(4, 3);
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(3, 2), Some(Color::BLACK));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.cell_size(), (4, 2));
    }

    #[test]
    fn test_fill_rect() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.fill_rect(PixelRect::new(2.0, 2.0, 2.0, 2.0), Color::WHITE);

        assert_eq!(canvas.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(canvas.pixel(1, 2), Some(Color::BLACK));
        assert_eq!(canvas.pixel(4, 3), Some(Color::BLACK));
        assert_eq!(canvas.pixel(2, 4), Some(Color::BLACK));
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(PixelRect::new(-2.0, 3.0, 10.0, 10.0), Color::RED);

        for x in 0..4 {
            assert_eq!(canvas.pixel(x, 3), Some(Color::RED));
            assert_eq!(canvas.pixel(x, 2), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_fractional_rect_rounds_to_pixels() {
        let mut canvas = PixelCanvas::new(10, 1);
        canvas.fill_rect(PixelRect::new(1.4, 0.0, 2.4, 1.0), Color::WHITE);

        let filled: Vec<u32> = (0..10)
            .filter(|&x| canvas.pixel(x, 0) == Some(Color::WHITE))
            .collect();
        assert_eq!(filled, vec![1, 2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut canvas = PixelCanvas::new(3, 3);
        canvas.fill_rect(PixelRect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        canvas.clear(Color::RED);
        assert!((0..3).all(|x| canvas.pixel(x, 0) == Some(Color::RED)));
    }

    #[test]
    fn test_widget_packs_two_rows_per_cell() {
        let mut canvas = PixelCanvas::new(2, 3);
        canvas.fill_rect(PixelRect::new(0.0, 1.0, 1.0, 1.0), Color::WHITE);

        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), HALF_BLOCK);
        assert_eq!(cell.fg, TermColor::Rgb(0, 0, 0));
        assert_eq!(cell.bg, TermColor::Rgb(255, 255, 255));

        // Odd height: the last row has no bottom pixel
        assert_eq!(buf[(1, 1)].bg, TermColor::Reset);
    }
}
