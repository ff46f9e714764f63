//! Coarse text rasterizer, used by the native runner to show a frame

use super::surface::Surface;
use super::GROUND_COLOR;
use crate::sim::state::{OBSTACLE_COLOR, PLAYER_COLOR};
use crate::sim::{Color, Rect};

/// Surface that rasterizes rectangles into a character grid
#[derive(Debug, Clone)]
pub struct AsciiSurface {
    cols: usize,
    rows: usize,
    scale_x: f64,
    scale_y: f64,
    cells: Vec<char>,
}

impl AsciiSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            scale_x: 1.0,
            scale_y: 1.0,
            cells: vec![' '; cols * rows],
        }
    }

    /// The current frame as newline-separated rows
    pub fn frame(&self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn glyph(color: Color) -> char {
        if color == PLAYER_COLOR {
            '@'
        } else if color == OBSTACLE_COLOR {
            '#'
        } else if color == GROUND_COLOR {
            '='
        } else {
            '+'
        }
    }

    fn put(&mut self, col: usize, row: usize, ch: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }
}

impl Surface for AsciiSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.scale_x = self.cols as f64 / width.max(1.0);
        self.scale_y = self.rows as f64 / height.max(1.0);
        self.cells.fill(' ');
    }

    fn fill_gradient(&mut self, _rect: Rect, _top: Color, _bottom: Color) {}

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let ch = Self::glyph(color);
        let x0 = (rect.pos.x * self.scale_x).floor().max(0.0) as usize;
        let y0 = (rect.pos.y * self.scale_y).floor().max(0.0) as usize;
        let x1 = (rect.right() * self.scale_x).ceil().max(0.0) as usize;
        let y1 = (rect.bottom() * self.scale_y).ceil().max(0.0) as usize;
        for row in y0..y1.min(self.rows) {
            for col in x0..x1.min(self.cols) {
                self.put(col, row, ch);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _color: Color) {
        let col = (x * self.scale_x) as usize;
        let row = ((y * self.scale_y) as usize).saturating_sub(1);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i, row, ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw_scene;
    use crate::sim::{Arena, GameState, ScriptedRandom};

    #[test]
    fn test_rasterizes_scene() {
        let mut rng = ScriptedRandom::constant(0.5);
        let state = GameState::new(Arena::default(), 1, &mut rng);
        let mut surface = AsciiSurface::new(80, 20);
        draw_scene(&mut surface, &state.scene());

        let frame = surface.frame();
        assert!(frame.contains('@'));
        assert!(frame.contains("Score: 0"));
        let last = frame.lines().last().unwrap();
        assert!(last.starts_with("===="));
    }

    #[test]
    fn test_offscreen_rect_is_clipped() {
        let mut surface = AsciiSurface::new(10, 5);
        surface.clear(100.0, 50.0);
        surface.fill_rect(Rect::new(-40.0, -40.0, 20.0, 20.0), PLAYER_COLOR);
        surface.fill_rect(Rect::new(150.0, 10.0, 20.0, 20.0), PLAYER_COLOR);
        assert!(!surface.frame().contains('@'));
    }
}
