use palette::{LinSrgb, WithAlpha};
use rand::Rng;

use crate::animation::EffectError;
use crate::chain::Pixel;

/// A named color an effect can turn into a pixel at any brightness/alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub color: LinSrgb,
}

impl PaletteEntry {
    pub fn pixel(&self, brightness: f32, alpha: f32) -> Pixel {
        Pixel::new(self.color.with_alpha(alpha), brightness)
    }

    /// Fully bright, fully opaque.
    pub fn solid(&self) -> Pixel {
        self.pixel(1.0, 1.0)
    }
}

fn entry(name: &'static str, r: f32, g: f32, b: f32) -> PaletteEntry {
    PaletteEntry {
        name,
        color: LinSrgb::new(r, g, b),
    }
}

/// An ordered, non-empty set of colors with a cyclic cursor. The cursor
/// persists across steps of one effect instance and rewinds on reset.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    cursor: usize,
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Palette, EffectError> {
        if entries.is_empty() {
            return Err(EffectError::Configuration(
                "a palette needs at least one entry".to_string(),
            ));
        }
        Ok(Palette { entries, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get_entry(&self, index: usize) -> Result<&PaletteEntry, EffectError> {
        self.entries.get(index).ok_or(EffectError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn random_entry(&self) -> &PaletteEntry {
        let index = rand::thread_rng().gen_range(0..self.entries.len());
        &self.entries[index]
    }

    /// Returns the entry under the cursor and advances it, wrapping at the
    /// end. Every run of `len()` calls visits each entry exactly once.
    pub fn next_entry(&mut self) -> PaletteEntry {
        let entry = self.entries[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.entries.len();
        entry
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn red() -> Palette {
        Palette {
            entries: vec![entry("red", 1.0, 0.0, 0.0)],
            cursor: 0,
        }
    }

    pub fn green() -> Palette {
        Palette {
            entries: vec![entry("green", 0.0, 1.0, 0.0)],
            cursor: 0,
        }
    }

    pub fn blue() -> Palette {
        Palette {
            entries: vec![entry("blue", 0.0, 0.0, 1.0)],
            cursor: 0,
        }
    }

    pub fn white() -> Palette {
        Palette {
            entries: vec![entry("white", 1.0, 1.0, 1.0)],
            cursor: 0,
        }
    }

    pub fn rgb() -> Palette {
        Palette {
            entries: vec![
                entry("red", 1.0, 0.0, 0.0),
                entry("green", 0.0, 1.0, 0.0),
                entry("blue", 0.0, 0.0, 1.0),
            ],
            cursor: 0,
        }
    }

    pub fn rainbow() -> Palette {
        Palette {
            entries: vec![
                entry("red", 1.0, 0.0, 0.0),
                entry("orange", 1.0, 0.35, 0.0),
                entry("yellow", 1.0, 1.0, 0.0),
                entry("green", 0.0, 1.0, 0.0),
                entry("blue", 0.0, 0.0, 1.0),
                entry("indigo", 0.18, 0.0, 0.5),
                entry("violet", 0.55, 0.0, 1.0),
            ],
            cursor: 0,
        }
    }

    /// Looks up a stock palette for the playlist loader.
    pub fn by_name(name: &str) -> Option<Palette> {
        match name {
            "red" => Some(Palette::red()),
            "green" => Some(Palette::green()),
            "blue" => Some(Palette::blue()),
            "white" => Some(Palette::white()),
            "rgb" => Some(Palette::rgb()),
            "rainbow" => Some(Palette::rainbow()),
            _ => None,
        }
    }
}
