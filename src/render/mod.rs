//! Renderer adapter
//!
//! Draws an immutable `Scene` onto an abstract `Surface`. The renderer never
//! touches engine state and does nothing when no surface is bound.

pub mod ascii;
pub mod surface;

pub use ascii::AsciiSurface;
pub use surface::{CommandBuffer, DrawCommand, Surface};

use crate::sim::{Color, Rect, Scene, hex_color};

pub const BACKGROUND_TOP: Color = [0.145, 0.388, 0.922, 0.08];
pub const BACKGROUND_BOTTOM: Color = hex_color(0xffffff);
pub const GROUND_COLOR: Color = hex_color(0xe5e7eb);
pub const HUD_COLOR: Color = hex_color(0x111827);

/// HUD text lines start here and step down by `HUD_LINE_STEP`
const HUD_ORIGIN: (f64, f64) = (16.0, 24.0);
const HUD_LINE_STEP: f64 = 22.0;

/// Emit the drawing commands for one frame
pub fn draw_scene(surface: &mut dyn Surface, scene: &Scene) {
    let arena = &scene.arena;
    let full = Rect::new(0.0, 0.0, arena.width, arena.height);

    surface.clear(arena.width, arena.height);
    surface.fill_gradient(full, BACKGROUND_TOP, BACKGROUND_BOTTOM);

    let band_top = arena.ground + 2.0;
    surface.fill_rect(
        Rect::new(0.0, band_top, arena.width, (arena.height - band_top).max(0.0)),
        GROUND_COLOR,
    );

    surface.fill_rect(scene.player, scene.player_color);
    for (rect, color) in &scene.obstacles {
        surface.fill_rect(*rect, *color);
    }

    let lines = [
        format!("Score: {}", scene.score),
        format!("Lives: {}", scene.lives),
        format!("Level: {}", scene.level),
    ];
    for (i, line) in lines.iter().enumerate() {
        let y = HUD_ORIGIN.1 + i as f64 * HUD_LINE_STEP;
        surface.fill_text(line, HUD_ORIGIN.0, y, HUD_COLOR);
    }
}

/// Optional binding to a surface
#[derive(Default)]
pub struct Renderer {
    surface: Option<Box<dyn Surface>>,
}

impl Renderer {
    pub fn new(surface: Option<Box<dyn Surface>>) -> Self {
        Self { surface }
    }

    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    /// Replace the bound surface, returning the previous one
    pub fn bind(&mut self, surface: Option<Box<dyn Surface>>) -> Option<Box<dyn Surface>> {
        std::mem::replace(&mut self.surface, surface)
    }

    /// Draw the scene if a surface is bound
    pub fn render(&mut self, scene: &Scene) {
        if let Some(surface) = self.surface.as_deref_mut() {
            draw_scene(surface, scene);
            surface.present();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, GameState, Obstacle, ScriptedRandom};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scene() -> Scene {
        let mut rng = ScriptedRandom::constant(0.5);
        let mut state = GameState::new(Arena::default(), 2, &mut rng);
        state.score = 42;
        state.obstacles.push(Obstacle::new(300.0, 316.0, 20.0, 24.0));
        state.scene()
    }

    #[test]
    fn test_draw_order() {
        let scene = scene();
        let mut buf = CommandBuffer::default();
        draw_scene(&mut buf, &scene);

        let cmds = buf.commands();
        assert_eq!(
            cmds[0],
            DrawCommand::Clear {
                width: 800.0,
                height: 400.0
            }
        );
        assert!(matches!(cmds[1], DrawCommand::Gradient { .. }));
        assert_eq!(
            cmds[2],
            DrawCommand::Rect {
                rect: Rect::new(0.0, 342.0, 800.0, 58.0),
                color: GROUND_COLOR
            }
        );
        assert_eq!(
            cmds[3],
            DrawCommand::Rect {
                rect: scene.player,
                color: scene.player_color
            }
        );
        assert_eq!(
            cmds[4],
            DrawCommand::Rect {
                rect: Rect::new(300.0, 316.0, 20.0, 24.0),
                color: scene.obstacles[0].1
            }
        );
        assert_eq!(buf.texts(), vec!["Score: 42", "Lives: 3", "Level: 2"]);
    }

    #[test]
    fn test_hud_positions() {
        let mut buf = CommandBuffer::default();
        draw_scene(&mut buf, &scene());
        let positions: Vec<(f64, f64)> = buf
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![(16.0, 24.0), (16.0, 46.0), (16.0, 68.0)]);
    }

    #[test]
    fn test_unbound_renderer_is_noop() {
        let mut renderer = Renderer::default();
        assert!(!renderer.is_bound());
        renderer.render(&scene());
    }

    #[test]
    fn test_bound_renderer_presents() {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let mut renderer = Renderer::new(Some(Box::new(CommandBuffer::shared(Rc::clone(&frames)))));
        renderer.render(&scene());
        renderer.render(&scene());
        assert_eq!(frames.borrow().len(), 2);

        let previous = renderer.bind(None);
        assert!(previous.is_some());
        renderer.render(&scene());
        assert_eq!(frames.borrow().len(), 2);
    }
}
