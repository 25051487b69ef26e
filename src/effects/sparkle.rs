use palette::{LinSrgb, WithAlpha};
use rand::Rng;

use crate::animation::{EffectError, EffectOptions};
use crate::chain::{Chain, Pixel};
use crate::effects::{AnimBase, ChainEffect};

/// Repaints every pixel on every step tick with a color at a random
/// brightness. Palette mode draws colors from the palette; random mode
/// ignores the palette and picks arbitrary colors.
#[derive(Debug)]
pub struct Sparkle {
    base: AnimBase,
    use_palette: bool,
}

impl Sparkle {
    pub fn new(options: &EffectOptions) -> Result<Sparkle, EffectError> {
        Ok(Sparkle {
            base: AnimBase::new(options)?,
            use_palette: true,
        })
    }

    pub fn random(options: &EffectOptions) -> Result<Sparkle, EffectError> {
        Ok(Sparkle {
            base: AnimBase::new(options)?,
            use_palette: false,
        })
    }
}

impl ChainEffect for Sparkle {
    fn name(&self) -> &'static str {
        if self.use_palette {
            "sparkle"
        } else {
            "sparkle-random"
        }
    }

    fn reset(&mut self) {
        self.base.reset();
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }
        self.base.clock.take_initializing();

        let mut rng = rand::thread_rng();
        for p in 0..chain.len() {
            let color = if self.use_palette {
                self.base.palette.random_entry().color
            } else {
                LinSrgb::new(rng.gen(), rng.gen(), rng.gen())
            };
            // brightness in tenths, like a twinkling dimmer
            let brightness = rng.gen_range(0..=10) as f32 / 10.0;
            chain.set_pixel(p, Pixel::new(color.with_alpha(1.0), brightness))?;
        }

        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}
