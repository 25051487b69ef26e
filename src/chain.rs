use palette::blend::Blend;
use palette::{LinSrgb, LinSrgba, WithAlpha};

use crate::animation::EffectError;

/// Sign convention for shifts and rolls: `Right` moves content toward
/// higher indices, `Left` toward lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// One slot of the chain: a color with alpha, plus an overlay brightness
/// that scales the emitted intensity when the frame is baked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub color: LinSrgba,
    pub brightness: f32,
}

impl Pixel {
    pub fn new(color: LinSrgba, brightness: f32) -> Pixel {
        let mut color = color;
        color.alpha = color.alpha.clamp(0.0, 1.0);
        Pixel {
            color,
            brightness: brightness.clamp(0.0, 1.0),
        }
    }

    /// Transparent black; what a vacated slot becomes after a fill-less shift.
    pub fn transparent() -> Pixel {
        Pixel {
            color: LinSrgba::new(0.0, 0.0, 0.0, 0.0),
            brightness: 0.0,
        }
    }

    pub fn black() -> Pixel {
        Pixel {
            color: LinSrgba::new(0.0, 0.0, 0.0, 1.0),
            brightness: 1.0,
        }
    }

    /// Bakes brightness and alpha over opaque black, yielding the value
    /// that goes out to the canvas.
    pub fn rendered(&self) -> LinSrgb {
        let black = LinSrgba::new(0.0, 0.0, 0.0, 1.0);
        let dimmed = self.color.color * self.brightness;
        black.overlay(dimmed.with_alpha(self.color.alpha)).color
    }
}

/// Static mapping from linear pixel index to a 2D position, for strips that
/// are physically folded into rows. `columns == 0` means a straight strip.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    pub columns: usize,
    pub serpentine: bool,
}

/// The pixel chain buffer: a fixed-length ordered sequence of pixel slots.
///
/// All operations are synchronous; the currently active effect is the sole
/// mutator. Every mutating call bumps `writes`, which the tests use to
/// assert that effects do not rewrite the buffer redundantly.
pub struct Chain {
    pixels: Vec<Pixel>,
    layout: Layout,
    writes: u64,
}

impl Chain {
    pub fn new(len: usize) -> Result<Chain, EffectError> {
        Chain::with_layout(len, Layout::default())
    }

    pub fn with_layout(len: usize, layout: Layout) -> Result<Chain, EffectError> {
        if len == 0 {
            return Err(EffectError::Configuration(
                "chain length must be at least 1".to_string(),
            ));
        }
        if layout.columns > len {
            return Err(EffectError::Configuration(format!(
                "layout has {} columns but the chain only has {} pixels",
                layout.columns, len
            )));
        }

        Ok(Chain {
            pixels: vec![Pixel::transparent(); len],
            layout,
            writes: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn check_index(&self, index: usize) -> Result<(), EffectError> {
        if index >= self.pixels.len() {
            return Err(EffectError::IndexOutOfRange {
                index,
                len: self.pixels.len(),
            });
        }
        Ok(())
    }

    pub fn pixel(&self, index: usize) -> Result<Pixel, EffectError> {
        self.check_index(index)?;
        Ok(self.pixels[index])
    }

    pub fn set_pixel(&mut self, index: usize, pixel: Pixel) -> Result<(), EffectError> {
        self.check_index(index)?;
        self.writes += 1;
        self.pixels[index] = pixel;
        Ok(())
    }

    pub fn set_all(&mut self, pixel: Pixel) {
        self.writes += 1;
        self.pixels.fill(pixel);
    }

    /// Overwrites the brightness of every slot, leaving hue and alpha alone.
    /// Whole-chain fades go through here instead of repainting.
    pub fn set_chain_brightness(&mut self, brightness: f32) {
        self.writes += 1;
        let brightness = brightness.clamp(0.0, 1.0);
        for pixel in &mut self.pixels {
            pixel.brightness = brightness;
        }
    }

    pub fn set_chain_alpha(&mut self, alpha: f32) {
        self.writes += 1;
        let alpha = alpha.clamp(0.0, 1.0);
        for pixel in &mut self.pixels {
            pixel.color.alpha = alpha;
        }
    }

    pub fn set_pixel_brightness(&mut self, index: usize, brightness: f32) -> Result<(), EffectError> {
        self.check_index(index)?;
        self.writes += 1;
        self.pixels[index].brightness = brightness.clamp(0.0, 1.0);
        Ok(())
    }

    /// Moves every pixel `n` slots toward index 0. Vacated slots at the high
    /// end take `fill`; `None` clears them to transparent black, so no stale
    /// pixel ever survives a shift.
    pub fn shift_left(&mut self, n: usize, fill: Option<Pixel>) {
        self.writes += 1;
        let fill = fill.unwrap_or_else(Pixel::transparent);
        let len = self.pixels.len();
        if n == 0 {
            return;
        }
        if n >= len {
            self.pixels.fill(fill);
            return;
        }
        self.pixels.copy_within(n.., 0);
        self.pixels[len - n..].fill(fill);
    }

    /// Moves every pixel `n` slots toward the high end; vacated slots at
    /// index 0 take `fill` (transparent black when `None`).
    pub fn shift_right(&mut self, n: usize, fill: Option<Pixel>) {
        self.writes += 1;
        let fill = fill.unwrap_or_else(Pixel::transparent);
        let len = self.pixels.len();
        if n == 0 {
            return;
        }
        if n >= len {
            self.pixels.fill(fill);
            return;
        }
        self.pixels.copy_within(..len - n, n);
        self.pixels[..n].fill(fill);
    }

    /// Index of the last slot of the left segment for the double-ended
    /// shifts. For odd lengths the center slot N/2 belongs to the left
    /// segment, so it receives content from the left on `shift_in`.
    fn left_segment_end(&self) -> usize {
        let len = self.pixels.len();
        if len % 2 == 0 {
            len / 2 - 1
        } else {
            len / 2
        }
    }

    /// Moves both halves one slot toward the center, `n` times. The freshly
    /// exposed end slots (0 and N-1) take `fill`.
    pub fn shift_in(&mut self, n: usize, fill: Option<Pixel>) {
        self.writes += 1;
        let fill = fill.unwrap_or_else(Pixel::transparent);
        let len = self.pixels.len();
        let left_end = self.left_segment_end();
        for _ in 0..n {
            for i in (1..=left_end).rev() {
                self.pixels[i] = self.pixels[i - 1];
            }
            self.pixels[0] = fill;
            for i in left_end + 1..len.saturating_sub(1) {
                self.pixels[i] = self.pixels[i + 1];
            }
            self.pixels[len - 1] = fill;
        }
    }

    /// Moves both halves one slot away from the center, `n` times, exposing
    /// `fill` at the middle.
    pub fn shift_out(&mut self, n: usize, fill: Option<Pixel>) {
        self.writes += 1;
        let fill = fill.unwrap_or_else(Pixel::transparent);
        let len = self.pixels.len();
        let left_end = self.left_segment_end();
        for _ in 0..n {
            for i in 0..left_end {
                self.pixels[i] = self.pixels[i + 1];
            }
            self.pixels[left_end] = fill;
            if left_end + 1 < len {
                for i in (left_end + 2..len).rev() {
                    self.pixels[i] = self.pixels[i - 1];
                }
                self.pixels[left_end + 1] = fill;
            }
        }
    }

    /// Circular rotate by one slot; content leaving one end re-enters at the
    /// other, nothing is lost.
    pub fn roll(&mut self, direction: Direction) {
        self.writes += 1;
        match direction {
            Direction::Right => self.pixels.rotate_right(1),
            Direction::Left => self.pixels.rotate_left(1),
        }
    }

    /// Maps a linear index to a 2D position for folded strips. Serpentine
    /// layouts reverse every odd row.
    pub fn pixel_xy(&self, index: usize) -> Result<(usize, usize), EffectError> {
        self.check_index(index)?;
        if self.layout.columns == 0 {
            return Ok((index, 0));
        }

        let row = index / self.layout.columns;
        let mut col = index % self.layout.columns;
        if self.layout.serpentine && row % 2 == 1 {
            col = self.layout.columns - 1 - col;
        }
        Ok((col, row))
    }

    /// Bakes the whole chain down to the linear RGB values handed to the
    /// canvas.
    pub fn frame(&self) -> Vec<LinSrgb> {
        self.pixels.iter().map(Pixel::rendered).collect()
    }
}
