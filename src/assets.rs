//! One-time asset construction
//!
//! The driver calls `initialize_assets` once before building any simulation
//! and keeps the returned registry for the whole process. Nothing in here is
//! global; simulations never touch it.

use thiserror::Error;

/// Side length of the sprite image bank
pub const IMAGE_BANK_SIZE: usize = 256;
/// Side length of one sprite cell
pub const SPRITE_SIZE: i32 = 8;
/// Palette index treated as transparent when blitting sprites
pub const TRANSPARENT_COLOR: u8 = 0;

/// Errors while building assets
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("sound notes must not be empty")]
    EmptyNotes,
    #[error("unknown note '{0}'")]
    UnknownNote(char),
    #[error("note '{0}' is missing its octave")]
    MissingOctave(char),
    #[error("octave {0} is outside 0..=4")]
    OctaveOutOfRange(u32),
    #[error("unknown tone '{0}'")]
    UnknownTone(char),
    #[error("volume '{0}' is outside 0..=7")]
    VolumeOutOfRange(char),
    #[error("unknown effect '{0}'")]
    UnknownEffect(char),
    #[error("sound speed must be at least 1")]
    ZeroSpeed,
}

/// Which sprite cell to blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Player,
    BasicEnemy,
    HomingEnemy,
}

/// Source rectangle of a sprite inside the image bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCell {
    pub u: i32,
    pub v: i32,
    pub w: i32,
    pub h: i32,
}

impl SpriteId {
    pub fn cell(self) -> SpriteCell {
        let u = match self {
            SpriteId::Player => 0,
            SpriteId::BasicEnemy => 8,
            SpriteId::HomingEnemy => 16,
        };
        SpriteCell {
            u,
            v: 0,
            w: SPRITE_SIZE,
            h: SPRITE_SIZE,
        }
    }
}

/// Palette-indexed pixel bank that sprites are drawn into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBank {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl ImageBank {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Fill the whole bank with one colour
    pub fn cls(&mut self, col: u8) {
        self.pixels.fill(col);
    }

    /// Read a pixel, `None` outside the bank
    pub fn pget(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel; writes outside the bank are clipped
    pub fn pset(&mut self, x: i32, y: i32, col: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = col;
        }
    }

    /// Filled rectangle
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: u8) {
        for py in y..y + h {
            for px in x..x + w {
                self.pset(px, py, col);
            }
        }
    }

    /// Filled circle
    pub fn circ(&mut self, cx: i32, cy: i32, r: i32, col: u8) {
        for dy in -r..=r {
            for dx in -r..=r {
                if in_circle(dx, dy, r) {
                    self.pset(cx + dx, cy + dy, col);
                }
            }
        }
    }

    /// Circle outline: circle pixels with a 4-neighbour outside the circle
    pub fn circb(&mut self, cx: i32, cy: i32, r: i32, col: u8) {
        for dy in -r..=r {
            for dx in -r..=r {
                let edge = in_circle(dx, dy, r)
                    && [(1, 0), (-1, 0), (0, 1), (0, -1)]
                        .iter()
                        .any(|(ox, oy)| !in_circle(dx + ox, dy + oy, r));
                if edge {
                    self.pset(cx + dx, cy + dy, col);
                }
            }
        }
    }
}

#[inline]
fn in_circle(dx: i32, dy: i32, r: i32) -> bool {
    dx * dx + dy * dy <= r * r
}

/// Oscillator shape for each note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Triangle,
    Square,
    Pulse,
    Noise,
}

/// Per-note modulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEffect {
    None,
    Slide,
    Vibrato,
    FadeOut,
    Half,
    Quarter,
}

/// A chiptune sound definition.
///
/// Tones, volumes and effects cycle when shorter than the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundPatch {
    /// Semitone numbers (octave * 12 + pitch); `None` is a rest
    pub notes: Vec<Option<u8>>,
    pub tones: Vec<Tone>,
    pub volumes: Vec<u8>,
    pub effects: Vec<NoteEffect>,
    /// Sound ticks per note
    pub speed: u32,
}

impl SoundPatch {
    /// Parse a patch from its compact string form, e.g. `("c2e2g2", "p", "7", "f", 10)`.
    ///
    /// Whitespace is ignored and letters are case-insensitive. Empty tone,
    /// volume or effect lists fall back to square / 7 / none.
    pub fn parse(
        notes: &str,
        tones: &str,
        volumes: &str,
        effects: &str,
        speed: u32,
    ) -> Result<Self, AssetError> {
        if speed == 0 {
            return Err(AssetError::ZeroSpeed);
        }
        let notes = parse_notes(notes)?;
        if notes.is_empty() {
            return Err(AssetError::EmptyNotes);
        }

        let mut tones = compact(tones)
            .map(|c| match c {
                't' => Ok(Tone::Triangle),
                's' => Ok(Tone::Square),
                'p' => Ok(Tone::Pulse),
                'n' => Ok(Tone::Noise),
                other => Err(AssetError::UnknownTone(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if tones.is_empty() {
            tones.push(Tone::Square);
        }

        let mut volumes = compact(volumes)
            .map(|c| match c.to_digit(10) {
                Some(v) if v <= 7 => Ok(v as u8),
                _ => Err(AssetError::VolumeOutOfRange(c)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if volumes.is_empty() {
            volumes.push(7);
        }

        let mut effects = compact(effects)
            .map(|c| match c {
                'n' => Ok(NoteEffect::None),
                's' => Ok(NoteEffect::Slide),
                'v' => Ok(NoteEffect::Vibrato),
                'f' => Ok(NoteEffect::FadeOut),
                'h' => Ok(NoteEffect::Half),
                'q' => Ok(NoteEffect::Quarter),
                other => Err(AssetError::UnknownEffect(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if effects.is_empty() {
            effects.push(NoteEffect::None);
        }

        Ok(Self {
            notes,
            tones,
            volumes,
            effects,
            speed,
        })
    }

    /// Length of the whole patch in sound ticks
    pub fn duration_ticks(&self) -> u32 {
        self.notes.len() as u32 * self.speed
    }

    /// Tone, volume and effect applied to note `i`
    pub fn voice(&self, i: usize) -> (Tone, u8, NoteEffect) {
        (
            self.tones[i % self.tones.len()],
            self.volumes[i % self.volumes.len()],
            self.effects[i % self.effects.len()],
        )
    }
}

fn compact(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
}

fn parse_notes(s: &str) -> Result<Vec<Option<u8>>, AssetError> {
    let mut chars = compact(s).peekable();
    let mut notes = Vec::new();

    while let Some(c) = chars.next() {
        let pitch: i32 = match c {
            'r' => {
                notes.push(None);
                continue;
            }
            'c' => 0,
            'd' => 2,
            'e' => 4,
            'f' => 5,
            'g' => 7,
            'a' => 9,
            'b' => 11,
            other => return Err(AssetError::UnknownNote(other)),
        };
        let accidental = match chars.peek() {
            Some('#') => {
                chars.next();
                1
            }
            Some('-') => {
                chars.next();
                -1
            }
            _ => 0,
        };
        let octave = chars
            .next()
            .and_then(|o| o.to_digit(10))
            .ok_or(AssetError::MissingOctave(c))?;
        if octave > 4 {
            return Err(AssetError::OctaveOutOfRange(octave));
        }
        let note = (octave as i32 * 12 + pitch + accidental).max(0);
        notes.push(Some(note as u8));
    }

    Ok(notes)
}

/// Everything the driver builds once at startup
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    pub images: ImageBank,
    /// Indexed by `SoundEffect::id`
    pub sounds: [SoundPatch; 3],
}

/// Build the sprite bank and sound bank
pub fn initialize_assets() -> Result<AssetRegistry, AssetError> {
    let mut images = ImageBank::new(IMAGE_BANK_SIZE, IMAGE_BANK_SIZE);
    draw_sprites(&mut images);

    let sounds = [
        SoundPatch::parse("a3a2c1a1", "p", "7", "s", 10)?,
        SoundPatch::parse("f2f1c1g1c1f1", "n", "7742", "s", 12)?,
        SoundPatch::parse("c2c2c2c2c2c2c2c2", "s", "4", "nf", 20)?,
    ];

    log::info!("Assets ready: 3 sprites, {} sounds", sounds.len());
    Ok(AssetRegistry { images, sounds })
}

fn draw_sprites(img: &mut ImageBank) {
    img.cls(0);

    // Player ship
    img.rect(0, 0, 8, 8, 11);
    img.rect(0, 3, 8, 2, 7);
    img.pset(7, 4, 10);

    // Basic enemy
    img.rect(8, 0, 8, 8, 8);
    img.rect(8, 3, 6, 2, 2);
    img.pset(8, 4, 9);

    // Homing enemy
    img.circ(20, 4, 4, 14);
    img.circb(20, 4, 4, 2);
    img.pset(16, 4, 7);
    img.pset(17, 2, 7);
    img.pset(17, 6, 7);
}
