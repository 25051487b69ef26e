use crate::animation::{EffectError, EffectOptions};
use crate::chain::{Chain, Direction, Pixel};
use crate::effects::{AnimBase, ChainEffect};

/// Extra knobs for the comet family. The defaults give a single
/// monochrome comet running toward higher indices, tail as long as the
/// palette.
#[derive(Debug, Clone, Copy)]
pub struct CometConfig {
    pub direction: Direction,
    /// Fill the whole chain nose-to-tail instead of a single comet.
    pub filled: bool,
    /// Color each tail pixel from the palette instead of one color per run.
    pub multi_colored: bool,
    /// Tail length in pixels; `None` uses the palette length.
    pub tail: Option<usize>,
}

impl Default for CometConfig {
    fn default() -> CometConfig {
        CometConfig {
            direction: Direction::Right,
            filled: false,
            multi_colored: false,
            tail: None,
        }
    }
}

/// A brightness/alpha gradient tail rolled around the chain one slot per
/// step tick. The gradient is painted once at initialization; everything
/// after that is a pure rotation, so the pattern never decays.
#[derive(Debug)]
pub struct Comet {
    base: AnimBase,
    config: CometConfig,
    tail: usize,
}

impl Comet {
    pub fn new(
        options: &EffectOptions,
        chain_len: usize,
        config: CometConfig,
    ) -> Result<Comet, EffectError> {
        let base = AnimBase::new(options)?;
        let tail = config.tail.unwrap_or_else(|| options.palette.len());
        if tail == 0 || tail > chain_len {
            return Err(EffectError::Configuration(format!(
                "comet tail of {} does not fit a chain of {}",
                tail, chain_len
            )));
        }

        Ok(Comet { base, config, tail })
    }

    fn paint(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        chain.set_all(Pixel::transparent());
        if self.config.filled {
            chain.set_chain_brightness(1.0);
        }

        let span = if self.config.filled {
            chain.len()
        } else {
            self.tail
        };

        let mut color = self.base.next_entry();
        for p in 0..span {
            if self.config.multi_colored {
                color = self.base.next_entry();
            }
            // the head of the comet is the brightest; comets turn
            // transparent as they fade out
            let mut brightness = (p % self.tail) as f32 / self.tail as f32;
            if self.config.direction == Direction::Left {
                brightness = 1.0 - brightness;
            }
            chain.set_pixel(p, color.pixel(brightness, brightness))?;
        }
        Ok(())
    }
}

impl ChainEffect for Comet {
    fn name(&self) -> &'static str {
        if self.config.filled {
            "comets"
        } else {
            "comet"
        }
    }

    fn reset(&mut self) {
        self.base.reset();
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }

        if self.base.clock.take_initializing() {
            self.paint(chain)?;
        }

        chain.roll(self.config.direction);
        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}
