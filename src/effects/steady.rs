use crate::animation::{EffectError, EffectOptions};
use crate::chain::{Chain, Direction, Pixel};
use crate::effects::{AnimBase, ChainEffect};

/// Paints the next palette color once and then just holds it. With a black
/// palette entry this doubles as an "off" slot in a playlist.
#[derive(Debug)]
pub struct On {
    base: AnimBase,
}

impl On {
    pub fn new(options: &EffectOptions) -> Result<On, EffectError> {
        Ok(On {
            base: AnimBase::new(options)?,
        })
    }
}

impl ChainEffect for On {
    fn name(&self) -> &'static str {
        "on"
    }

    fn reset(&mut self) {
        self.base.reset();
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }
        if self.base.clock.take_initializing() {
            chain.set_all(self.base.next_entry().solid());
        }
        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}

/// Two-color odd/even pattern rotated one slot per step tick. Black stands
/// in for the second color when the palette has only one entry.
#[derive(Debug)]
pub struct Alternate {
    base: AnimBase,
}

impl Alternate {
    pub fn new(options: &EffectOptions) -> Result<Alternate, EffectError> {
        Ok(Alternate {
            base: AnimBase::new(options)?,
        })
    }
}

impl ChainEffect for Alternate {
    fn name(&self) -> &'static str {
        "alternate"
    }

    fn reset(&mut self) {
        self.base.reset();
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }

        if self.base.clock.take_initializing() {
            let odd = self.base.palette.get_entry(0)?.solid();
            let even = if self.base.palette.len() < 2 {
                Pixel::black()
            } else {
                self.base.palette.get_entry(1)?.solid()
            };

            for p in 0..chain.len() {
                chain.set_pixel(p, if p % 2 == 1 { odd } else { even })?;
            }
        }

        chain.roll(Direction::Right);
        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}

/// Does nothing but let its duration pass; the previous frame stays on
/// display.
#[derive(Debug)]
pub struct Wait {
    base: AnimBase,
}

impl Wait {
    pub fn new(options: &EffectOptions) -> Result<Wait, EffectError> {
        Ok(Wait {
            base: AnimBase::new(options)?,
        })
    }
}

impl ChainEffect for Wait {
    fn name(&self) -> &'static str {
        "wait"
    }

    fn reset(&mut self) {
        self.base.reset();
    }

    fn step(&mut self, _chain: &mut Chain) -> Result<(), EffectError> {
        self.base.clock.advance();
        self.base.clock.take_initializing();
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

    #[test]
    fn on_paints_once_and_holds() {
        let mut on = On::new(&options(20, 1.0, Palette::rgb())).unwrap();
        let mut chain = Chain::new(4).unwrap();

        on.step(&mut chain).unwrap();
        assert!(chain.pixel(0).unwrap().color.color.red > 0.0);

        let writes = chain.writes();
        on.step(&mut chain).unwrap();
        on.step(&mut chain).unwrap();
        assert_eq!(chain.writes(), writes);
    }

    #[test]
    fn alternate_paints_odd_and_even_then_rolls() {
        let mut alternate = Alternate::new(&options(20, 1.0, Palette::rgb())).unwrap();
        let mut chain = Chain::new(6).unwrap();
        alternate.step(&mut chain).unwrap();

        // painted green/red alternating, then rolled right once
        assert!(chain.pixel(0).unwrap().color.color.red > 0.0);
        assert!(chain.pixel(1).unwrap().color.color.green > 0.0);
    }

    #[test]
    fn alternate_falls_back_to_black_on_single_color_palettes() {
        let mut alternate = Alternate::new(&options(20, 1.0, Palette::red())).unwrap();
        let mut chain = Chain::new(4).unwrap();
        alternate.step(&mut chain).unwrap();

        let lit = chain
            .pixels()
            .iter()
            .filter(|p| p.color.color.red > 0.0)
            .count();
        assert_eq!(lit, 2);
    }

    #[test]
    fn wait_never_touches_the_chain() {
        let mut wait = Wait::new(&options(20, 1.0, Palette::red())).unwrap();
        let mut chain = Chain::new(4).unwrap();
        let writes = chain.writes();
        for _ in 0..10 {
            wait.step(&mut chain).unwrap();
        }
        assert_eq!(chain.writes(), writes);
    }
}
