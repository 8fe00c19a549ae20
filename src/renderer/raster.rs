//! Software rasterizer
//!
//! Turns the draw command stream into a palette-indexed framebuffer, blitting
//! sprites out of the asset image bank. Text is not rasterized here: labels
//! are kept for the host to render with its own font.

use super::commands::{DrawCommand, Surface};
use crate::assets::{ImageBank, SpriteCell, TRANSPARENT_COLOR};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// A text label left for the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub col: u8,
}

/// Field-sized framebuffer drawing sprites from a borrowed image bank
pub struct Framebuffer<'a> {
    sprites: &'a ImageBank,
    pixels: ImageBank,
    labels: Vec<Label>,
}

impl<'a> Framebuffer<'a> {
    pub fn new(sprites: &'a ImageBank) -> Self {
        Self {
            sprites,
            pixels: ImageBank::new(FIELD_WIDTH as usize, FIELD_HEIGHT as usize),
            labels: Vec::new(),
        }
    }

    /// Colour at a field position, `None` off the field
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        self.pixels.pget(x, y)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of pixels that are not background
    pub fn lit_pixels(&self) -> usize {
        (0..FIELD_HEIGHT)
            .flat_map(|y| (0..FIELD_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                self.pixels
                    .pget(x, y)
                    .is_some_and(|c| c != TRANSPARENT_COLOR)
            })
            .count()
    }

    fn blit(&mut self, x: i32, y: i32, cell: SpriteCell) {
        for dy in 0..cell.h {
            for dx in 0..cell.w {
                if let Some(col) = self.sprites.pget(cell.u + dx, cell.v + dy)
                    && col != TRANSPARENT_COLOR
                {
                    self.pixels.pset(x + dx, y + dy, col);
                }
            }
        }
    }

    /// Bresenham line between two integer points
    fn line(&mut self, (mut x0, mut y0): (i32, i32), (x1, y1): (i32, i32), col: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.pixels.pset(x0, y0, col);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

#[inline]
fn px(v: f32) -> i32 {
    v.floor() as i32
}

impl Surface for Framebuffer<'_> {
    fn submit(&mut self, cmd: DrawCommand) {
        match cmd {
            DrawCommand::Clear { col } => {
                self.pixels.cls(col);
                self.labels.clear();
            }
            DrawCommand::Pixel { x, y, col } => self.pixels.pset(px(x), px(y), col),
            DrawCommand::Rect { x, y, w, h, col } => {
                self.pixels.rect(px(x), px(y), px(w), px(h), col)
            }
            DrawCommand::Sprite { x, y, sprite } => self.blit(px(x), px(y), sprite.cell()),
            DrawCommand::CircleOutline { x, y, r, col } => {
                self.pixels.circb(px(x), px(y), px(r), col)
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                col,
            } => self.line((px(x1), px(y1)), (px(x2), px(y2)), col),
            DrawCommand::Text { x, y, text, col } => self.labels.push(Label {
                x: px(x),
                y: px(y),
                text,
                col,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{SpriteId, initialize_assets};

    #[test]
    fn test_sprite_blit_skips_transparent() {
        let assets = initialize_assets().unwrap();
        let mut fb = Framebuffer::new(&assets.images);
        fb.submit(DrawCommand::Clear { col: 1 });
        fb.submit(DrawCommand::Sprite {
            x: 100.0,
            y: 50.0,
            sprite: SpriteId::HomingEnemy,
        });

        // Centre and outline come from the bank
        assert_eq!(fb.pixel(104, 54), Some(14));
        assert_eq!(fb.pixel(104, 50), Some(2));
        // Corner of the cell is transparent, background shows through
        assert_eq!(fb.pixel(101, 50), Some(1));
    }

    #[test]
    fn test_player_sprite_is_opaque() {
        let assets = initialize_assets().unwrap();
        let mut fb = Framebuffer::new(&assets.images);
        fb.submit(DrawCommand::Clear { col: 0 });
        fb.submit(DrawCommand::Sprite {
            x: 80.0,
            y: 80.0,
            sprite: SpriteId::Player,
        });

        assert_eq!(fb.pixel(80, 80), Some(11));
        assert_eq!(fb.pixel(87, 84), Some(10));
        assert_eq!(fb.lit_pixels(), 64);
    }

    #[test]
    fn test_line_and_clipping() {
        let assets = initialize_assets().unwrap();
        let mut fb = Framebuffer::new(&assets.images);
        fb.submit(DrawCommand::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 3.0,
            y2: 3.0,
            col: 7,
        });
        fb.submit(DrawCommand::Rect {
            x: 250.0,
            y: 10.0,
            w: 20.0,
            h: 1.0,
            col: 3,
        });

        assert!((0..4).all(|i| fb.pixel(i, i) == Some(7)));
        assert_eq!(fb.pixel(255, 10), Some(3));
        assert_eq!(fb.pixel(256, 10), None);
        assert_eq!(fb.lit_pixels(), 4 + 6);
    }

    #[test]
    fn test_clear_drops_labels() {
        let assets = initialize_assets().unwrap();
        let mut fb = Framebuffer::new(&assets.images);
        fb.submit(DrawCommand::Text {
            x: 4.5,
            y: 4.0,
            text: "SCORE: 0".into(),
            col: 7,
        });
        assert_eq!(fb.labels()[0].x, 4);

        fb.submit(DrawCommand::Clear { col: 0 });
        assert!(fb.labels().is_empty());
    }
}
