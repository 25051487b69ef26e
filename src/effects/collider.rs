use palette::LinSrgba;

use crate::animation::{EffectError, EffectOptions};
use crate::chain::{Chain, Pixel};
use crate::effects::{AnimBase, ChainEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Approach,
    Flash,
    Fade,
}

/// Two comets race in from the chain ends, meet at the midpoint, flash the
/// whole chain white for one frame, then decay back to black in tenths and
/// restart with the next palette color. A self-contained four-phase cycle.
#[derive(Debug)]
pub struct Collider {
    base: AnimBase,
    tail: usize,
    phase: Phase,
    chain_pos: usize,
    /// Fade level in tenths, so the decay sequence is exact.
    level: i32,
}

impl Collider {
    pub fn new(
        options: &EffectOptions,
        chain_len: usize,
        tail: usize,
    ) -> Result<Collider, EffectError> {
        if tail == 0 || tail > chain_len / 2 {
            return Err(EffectError::Configuration(format!(
                "collider tail of {} does not fit half a chain of {}",
                tail, chain_len
            )));
        }

        Ok(Collider {
            base: AnimBase::new(options)?,
            tail,
            phase: Phase::Approach,
            chain_pos: 0,
            level: 10,
        })
    }

    fn paint_comets(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        chain.set_all(Pixel::transparent());
        chain.set_chain_brightness(1.0);
        chain.set_chain_alpha(1.0);

        let color = self.base.next_entry();
        let len = chain.len();
        for p in 0..self.tail {
            let brightness = p as f32 / self.tail as f32;
            chain.set_pixel(p, color.pixel(brightness, brightness))?;
            chain.set_pixel(len - p - 1, color.pixel(brightness, brightness))?;
        }

        // the heads sit just inside the tails
        self.chain_pos = self.tail;
        self.phase = Phase::Approach;
        self.level = 10;
        Ok(())
    }

    /// Restarts the cycle without rewinding the palette, so every collision
    /// flashes and rebuilds in the next color.
    fn restart(&mut self) {
        self.base.clock.reset();
        self.phase = Phase::Approach;
        self.chain_pos = 0;
        self.level = 10;
    }
}

impl ChainEffect for Collider {
    fn name(&self) -> &'static str {
        "collider"
    }

    fn reset(&mut self) {
        self.base.reset();
        self.restart();
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }

        if self.base.clock.take_initializing() {
            return self.paint_comets(chain);
        }

        match self.phase {
            Phase::Approach => {
                let middle = chain.len() / 2;
                if self.chain_pos < middle {
                    chain.shift_in(1, None);
                    self.chain_pos += 1;
                }
                if self.chain_pos >= middle {
                    self.phase = Phase::Flash;
                }
            }
            Phase::Flash => {
                chain.set_all(Pixel::new(LinSrgba::new(1.0, 1.0, 1.0, 1.0), 1.0));
                self.level = 10;
                self.phase = Phase::Fade;
            }
            Phase::Fade => {
                self.level -= 1;
                let brightness = self.level as f32 / 10.0;
                chain.set_chain_brightness(brightness);
                chain.set_chain_alpha(brightness);
                if self.level <= 0 {
                    // next step rebuilds the comets with the next color
                    self.restart();
                }
            }
        }

        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}
