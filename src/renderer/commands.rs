//! Draw command stream

use crate::assets::SpriteId;

/// 16-colour palette indices used by the scene
pub mod palette {
    pub const BLACK: u8 = 0;
    pub const DARK_GREEN: u8 = 3;
    pub const WHITE: u8 = 7;
    pub const RED: u8 = 8;
    pub const YELLOW: u8 = 10;
}

/// One drawing primitive, in field coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole field
    Clear { col: u8 },
    Pixel { x: f32, y: f32, col: u8 },
    /// Filled rectangle
    Rect { x: f32, y: f32, w: f32, h: f32, col: u8 },
    /// Blit a sprite cell with colour 0 transparent
    Sprite { x: f32, y: f32, sprite: SpriteId },
    CircleOutline { x: f32, y: f32, r: f32, col: u8 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, col: u8 },
    Text { x: f32, y: f32, text: String, col: u8 },
}

/// Anything that can consume draw commands
pub trait Surface {
    fn submit(&mut self, cmd: DrawCommand);
}

/// Records the frame (tests, headless runs)
impl Surface for Vec<DrawCommand> {
    fn submit(&mut self, cmd: DrawCommand) {
        self.push(cmd);
    }
}
