use crate::animation::{EffectError, EffectOptions};
use crate::chain::{Chain, Pixel};
use crate::effects::{AnimBase, ChainEffect};

/// The scanner from a certain 80s TV car: a triangular brightness block
/// bouncing between the chain ends. The block is `chain / size` pixels
/// wide and moves by fill-less shifts, so the slots behind it go back to
/// transparent.
#[derive(Debug)]
pub struct Larson {
    base: AnimBase,
    width: usize,
    position: usize,
    moving_right: bool,
}

impl Larson {
    /// `size` divides the chain length to get the block width; the stock
    /// scanner uses 2 (half the chain).
    pub fn new(options: &EffectOptions, chain_len: usize, size: usize) -> Result<Larson, EffectError> {
        if size == 0 {
            return Err(EffectError::Configuration(
                "larson size divisor must be at least 1".to_string(),
            ));
        }
        let width = chain_len / size;
        if width < 2 || width >= chain_len {
            return Err(EffectError::Configuration(format!(
                "larson block of {} cannot bounce on a chain of {}",
                width, chain_len
            )));
        }

        Ok(Larson {
            base: AnimBase::new(options)?,
            width,
            position: 0,
            moving_right: true,
        })
    }

    fn paint(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        let color = self.base.next_entry();
        chain.set_all(Pixel::transparent());

        // triangle peaking in the middle of the block, dark at both edges
        for p in 0..=self.width / 2 {
            let brightness = 2.0 * p as f32 / self.width as f32;
            chain.set_pixel(p, color.pixel(brightness, brightness))?;
            chain.set_pixel(self.width - p, color.pixel(brightness, brightness))?;
        }

        self.position = 0;
        self.moving_right = true;
        Ok(())
    }
}

impl ChainEffect for Larson {
    fn name(&self) -> &'static str {
        "larson"
    }

    fn reset(&mut self) {
        self.base.reset();
        self.position = 0;
        self.moving_right = true;
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }

        if self.base.clock.take_initializing() {
            return self.paint(chain);
        }

        let limit = chain.len().saturating_sub(self.width + 1);
        if self.moving_right && self.position < limit {
            chain.shift_right(1, None);
            self.position += 1;
        } else if self.moving_right {
            chain.shift_left(1, None);
            self.position = self.position.saturating_sub(1);
            self.moving_right = false;
        } else if self.position == 0 {
            chain.shift_right(1, None);
            self.position += 1;
            self.moving_right = true;
        } else {
            chain.shift_left(1, None);
            self.position -= 1;
        }

        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testutil::options;
    use crate::palettes::Palette;

    fn lit_range(chain: &Chain) -> (usize, usize) {
        let lit: Vec<usize> = chain
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.color.alpha > 0.0)
            .map(|(i, _)| i)
            .collect();
        (*lit.first().unwrap(), *lit.last().unwrap())
    }

    #[test]
    fn rejects_a_block_that_cannot_bounce() {
        assert!(Larson::new(&options(20, 1.0, Palette::red()), 4, 1).is_err());
        assert!(Larson::new(&options(20, 1.0, Palette::red()), 4, 0).is_err());
    }

    #[test]
    fn paints_a_triangle_peaking_in_the_middle() {
        let mut larson = Larson::new(&options(20, 1.0, Palette::red()), 12, 2).unwrap();
        let mut chain = Chain::new(12).unwrap();
        larson.step(&mut chain).unwrap();

        let peak = chain.pixel(3).unwrap().brightness;
        assert_eq!(peak, 1.0);
        assert!(chain.pixel(1).unwrap().brightness < peak);
        assert!(chain.pixel(5).unwrap().brightness < peak);
    }

    #[test]
    fn block_bounces_between_the_ends() {
        let mut larson = Larson::new(&options(20, 1.0, Palette::red()), 8, 2).unwrap();
        let mut chain = Chain::new(8).unwrap();
        larson.step(&mut chain).unwrap();

        // the lit part of the block starts at 1..=3 (both block edges are
        // dark); three steps right push it against the far end
        assert_eq!(lit_range(&chain), (1, 3));
        for _ in 0..3 {
            larson.step(&mut chain).unwrap();
        }
        assert_eq!(lit_range(&chain), (4, 6));

        // then it turns around and comes back
        for _ in 0..3 {
            larson.step(&mut chain).unwrap();
        }
        assert_eq!(lit_range(&chain), (1, 3));
    }

    #[test]
    fn shifts_leave_no_stale_pixels_behind() {
        let mut larson = Larson::new(&options(20, 1.0, Palette::red()), 8, 2).unwrap();
        let mut chain = Chain::new(8).unwrap();
        larson.step(&mut chain).unwrap();
        larson.step(&mut chain).unwrap();

        assert_eq!(chain.pixel(0).unwrap(), Pixel::transparent());
    }
}
