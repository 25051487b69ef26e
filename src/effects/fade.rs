use crate::animation::{EffectError, EffectOptions};
use crate::chain::Chain;
use crate::effects::{AnimBase, ChainEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeMode {
    In,
    Out,
    /// Oscillates: fades in, re-initializes with the next palette color,
    /// fades back out, and so on without bound.
    InOut,
}

/// Whole-chain brightness ramp over exactly one second of step ticks. The
/// hue is painted once per cycle; only the chain brightness moves, by
/// `1 / fps` per step tick, clamped at the bound.
#[derive(Debug)]
pub struct Fade {
    base: AnimBase,
    mode: FadeMode,
    rising: bool,
    steps: u32,
    level: f32,
}

impl Fade {
    pub fn fade_in(options: &EffectOptions) -> Result<Fade, EffectError> {
        Fade::with_mode(options, FadeMode::In)
    }

    pub fn fade_out(options: &EffectOptions) -> Result<Fade, EffectError> {
        Fade::with_mode(options, FadeMode::Out)
    }

    pub fn fade_in_out(options: &EffectOptions) -> Result<Fade, EffectError> {
        Fade::with_mode(options, FadeMode::InOut)
    }

    pub fn with_mode(options: &EffectOptions, mode: FadeMode) -> Result<Fade, EffectError> {
        let rising = mode != FadeMode::Out;
        Ok(Fade {
            base: AnimBase::new(options)?,
            mode,
            rising,
            steps: 0,
            level: if rising { 0.0 } else { 1.0 },
        })
    }
}

impl ChainEffect for Fade {
    fn name(&self) -> &'static str {
        match self.mode {
            FadeMode::In => "fade-in",
            FadeMode::Out => "fade-out",
            FadeMode::InOut => "fade-in-out",
        }
    }

    fn reset(&mut self) {
        self.base.reset();
        self.rising = self.mode != FadeMode::Out;
        self.steps = 0;
        self.level = if self.rising { 0.0 } else { 1.0 };
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }

        if self.base.clock.take_initializing() {
            let color = self.base.next_entry();
            chain.set_all(color.solid());
            self.steps = 0;
            self.level = if self.rising { 0.0 } else { 1.0 };
        } else {
            self.steps += 1;
            let ramp = self.steps as f32 / self.base.clock.fps() as f32;
            self.level = if self.rising {
                ramp.min(1.0)
            } else {
                (1.0 - ramp).max(0.0)
            };
        }

        chain.set_chain_brightness(self.level);

        if self.mode == FadeMode::InOut {
            if self.rising && self.level >= 1.0 {
                self.rising = false;
                self.base.clock.reinitialize();
            } else if !self.rising && self.level <= 0.0 {
                self.rising = true;
                self.base.clock.reinitialize();
            }
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

    fn levels(fade: &mut Fade, chain: &mut Chain, ticks: usize) -> Vec<f32> {
        (0..ticks)
            .map(|_| {
                fade.step(chain).unwrap();
                chain.pixel(0).unwrap().brightness
            })
            .collect()
    }

    #[test]
    fn fade_in_rises_monotonically_to_one() {
        let mut fade = Fade::fade_in(&options(10, 1.0, Palette::red())).unwrap();
        let mut chain = Chain::new(4).unwrap();
        let levels = levels(&mut fade, &mut chain, 11);

        assert_eq!(levels[0], 0.0);
        for pair in levels.windows(2) {
            assert!(pair[1] >= pair[0], "brightness must not decrease");
        }
        // the bound is reached after exactly fps step ticks
        assert_eq!(levels[10], 1.0);
    }

    #[test]
    fn fade_out_falls_monotonically_to_zero() {
        let mut fade = Fade::fade_out(&options(10, 1.0, Palette::red())).unwrap();
        let mut chain = Chain::new(4).unwrap();
        let levels = levels(&mut fade, &mut chain, 11);

        assert_eq!(levels[0], 1.0);
        for pair in levels.windows(2) {
            assert!(pair[1] <= pair[0], "brightness must not increase");
        }
        assert_eq!(levels[10], 0.0);
    }

    #[test]
    fn levels_stay_within_unit_range() {
        let mut fade = Fade::fade_in(&options(5, 1.0, Palette::red())).unwrap();
        let mut chain = Chain::new(4).unwrap();
        for level in levels(&mut fade, &mut chain, 20) {
            assert!((0.0..=1.0).contains(&level));
        }
    }

    #[test]
    fn in_out_turns_around_at_the_bounds() {
        let mut fade = Fade::fade_in_out(&options(5, 1.0, Palette::rgb())).unwrap();
        let mut chain = Chain::new(4).unwrap();

        // 0.0 up to 1.0 in 5 steps, repaint, back down to 0.0, and up again
        let levels = levels(&mut fade, &mut chain, 17);
        assert_eq!(levels[5], 1.0);
        assert_eq!(levels[6], 1.0); // re-init paints, level restarts at the top
        assert_eq!(levels[11], 0.0);
        assert!(levels[13] > levels[12]);
    }

    #[test]
    fn in_out_picks_the_next_color_each_cycle() {
        let mut fade = Fade::fade_in_out(&options(5, 1.0, Palette::rgb())).unwrap();
        let mut chain = Chain::new(4).unwrap();

        fade.step(&mut chain).unwrap();
        assert!(chain.pixel(0).unwrap().color.red > 0.0);

        for _ in 0..6 {
            fade.step(&mut chain).unwrap();
        }
        assert!(chain.pixel(0).unwrap().color.green > 0.0);
    }
}
