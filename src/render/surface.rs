//! Drawing surface abstraction

use std::cell::RefCell;
use std::rc::Rc;

use crate::sim::{Color, Rect};

/// Minimal 2D drawing target
pub trait Surface {
    /// Start a new frame of the given logical size
    fn clear(&mut self, width: f64, height: f64);
    /// Vertical gradient from `top` to `bottom`
    fn fill_gradient(&mut self, rect: Rect, top: Color, bottom: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Text with its baseline at `y`
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);
    /// The frame is complete
    fn present(&mut self) {}
}

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Gradient { rect: Rect, top: Color, bottom: Color },
    Rect { rect: Rect, color: Color },
    Text { text: String, x: f64, y: f64, color: Color },
}

/// Completed frames collected by a shared `CommandBuffer`
pub type FrameLog = Rc<RefCell<Vec<Vec<DrawCommand>>>>;

/// Surface that records commands instead of drawing
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    frames: Option<FrameLog>,
}

impl CommandBuffer {
    /// Buffer that appends each presented frame to `frames`
    pub fn shared(frames: FrameLog) -> Self {
        Self {
            commands: Vec::new(),
            frames: Some(frames),
        }
    }

    /// Commands of the current frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_gradient(&mut self, rect: Rect, top: Color, bottom: Color) {
        self.commands.push(DrawCommand::Gradient { rect, top, bottom });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn present(&mut self) {
        if let Some(frames) = &self.frames {
            frames.borrow_mut().push(self.commands.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_new_frame() {
        let mut buf = CommandBuffer::default();
        buf.clear(10.0, 10.0);
        buf.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [1.0; 4]);
        assert_eq!(buf.commands().len(), 2);
        buf.clear(10.0, 10.0);
        assert_eq!(buf.commands().len(), 1);
    }

    #[test]
    fn test_present_without_log_is_harmless() {
        let mut buf = CommandBuffer::default();
        buf.clear(1.0, 1.0);
        buf.present();
        assert_eq!(buf.commands().len(), 1);
    }
}
