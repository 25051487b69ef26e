use crate::animation::{EffectError, EffectOptions};
use crate::chain::{Chain, Pixel};
use crate::effects::{AnimBase, ChainEffect};
use crate::palettes::PaletteEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeMode {
    /// Fill from both ends toward the middle.
    In,
    /// Fill from the middle toward both ends.
    Out,
    /// Fill from the high end toward index 0.
    Left,
    /// Fill from index 0 toward the high end.
    Right,
}

/// Advances a fill boundary one slot per step tick until it reaches the
/// terminal position, then re-arms with the next palette color; the
/// previous fill stays behind as the background, so consecutive cycles
/// wipe one color over the other.
#[derive(Debug)]
pub struct Wipe {
    base: AnimBase,
    mode: WipeMode,
    multi_colored: bool,
    color: Option<PaletteEntry>,
    chain_pos: usize,
}

impl Wipe {
    pub fn new(
        options: &EffectOptions,
        chain_len: usize,
        mode: WipeMode,
    ) -> Result<Wipe, EffectError> {
        if chain_len < 2 {
            return Err(EffectError::Configuration(format!(
                "a wipe needs at least 2 pixels, the chain has {}",
                chain_len
            )));
        }

        Ok(Wipe {
            base: AnimBase::new(options)?,
            mode,
            multi_colored: false,
            color: None,
            chain_pos: 0,
        })
    }

    pub fn multi_colored(mut self) -> Wipe {
        self.multi_colored = true;
        self
    }
}

impl ChainEffect for Wipe {
    fn name(&self) -> &'static str {
        match self.mode {
            WipeMode::In => "wipe-in",
            WipeMode::Out => "wipe-out",
            WipeMode::Left => "wipe-left",
            WipeMode::Right => "wipe-right",
        }
    }

    fn reset(&mut self) {
        self.base.reset();
        self.color = None;
        self.chain_pos = 0;
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }

        let len = chain.len();
        let middle = len / 2;

        if self.base.clock.take_initializing() {
            // the previous cycle's color becomes the background
            match &self.color {
                Some(color) => chain.set_all(color.solid()),
                None => chain.set_all(Pixel::black()),
            }
            chain.set_chain_brightness(1.0);
            self.color = Some(self.base.next_entry());
            self.chain_pos = match self.mode {
                WipeMode::In | WipeMode::Right => 0,
                WipeMode::Out => middle,
                WipeMode::Left => len,
            };
        }

        if self.multi_colored {
            self.color = Some(self.base.next_entry());
        }
        let fill = self
            .color
            .as_ref()
            .map(PaletteEntry::solid)
            .unwrap_or_else(Pixel::black);

        match self.mode {
            WipeMode::In => {
                chain.shift_in(1, Some(fill));
                self.chain_pos += 1;
                if self.chain_pos == middle {
                    self.base.clock.reinitialize();
                }
            }
            WipeMode::Out => {
                chain.shift_out(1, Some(fill));
                self.chain_pos -= 1;
                if self.chain_pos == 0 {
                    self.base.clock.reinitialize();
                }
            }
            WipeMode::Right => {
                chain.shift_right(1, Some(fill));
                self.chain_pos += 1;
                // run the full length so the far slot is wiped too before
                // the next color takes over
                if self.chain_pos == len {
                    self.base.clock.reinitialize();
                }
            }
            WipeMode::Left => {
                chain.shift_left(1, Some(fill));
                self.chain_pos -= 1;
                if self.chain_pos == 0 {
                    self.base.clock.reinitialize();
                }
            }
        }

        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}
