//! Rendering boundary
//!
//! The simulation never draws. Each frame is described as a list of
//! [`DrawCommand`]s built from the current state by [`shapes::build_frame`];
//! the embedder's [`Renderer`] turns them into pixels.

pub mod shapes;
pub mod sprites;

use glam::Vec2;

pub use shapes::build_frame;
pub use sprites::SpritePattern;

/// RGBA, each channel 0.0 - 1.0
pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
pub const ENEMY_SHOT_RED: Color = [1.0, 0.4, 0.4, 1.0];

/// One drawing primitive, in field coordinates (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole field
    Clear { color: Color },
    /// Axis-aligned rectangle from its top-left corner
    Rect { pos: Vec2, size: Vec2, color: Color },
    /// Filled ellipse (circles and arcs use equal radii)
    Ellipse { center: Vec2, radii: Vec2, color: Color },
    /// Pixel-grid sprite from its top-left corner
    Sprite {
        pos: Vec2,
        pixel_size: f32,
        pattern: SpritePattern,
        color: Color,
    },
}

/// Something that can draw a frame
pub trait Renderer {
    fn draw(&mut self, commands: &[DrawCommand]);
}

/// Collects frames instead of drawing them (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: usize,
    pub last_frame: Vec<DrawCommand>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(commands);
    }
}
