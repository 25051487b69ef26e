use crate::animation::EffectError;
use crate::chain::Chain;
use crate::effects::ChainEffect;

/// Plays a list of effects in order, giving each one its configured
/// duration in ticks, then wraps around. The incoming effect is reset on
/// every (re)entry, so no state leaks between activations.
pub struct AnimSequence {
    effects: Vec<Box<dyn ChainEffect>>,
    current: usize,
    ticks_in_current: u64,
}

impl AnimSequence {
    pub fn new(effects: Vec<Box<dyn ChainEffect>>) -> Result<AnimSequence, EffectError> {
        if effects.is_empty() {
            return Err(EffectError::Configuration(
                "an animation sequence needs at least one effect".to_string(),
            ));
        }

        Ok(AnimSequence {
            effects,
            current: 0,
            ticks_in_current: 0,
        })
    }

    pub fn current_name(&self) -> &'static str {
        self.effects[self.current].name()
    }

    /// Runs one tick of the active effect, advancing to the next effect
    /// first if the active one has used up its duration.
    pub fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if self.ticks_in_current >= self.effects[self.current].duration_ticks() {
            self.current = (self.current + 1) % self.effects.len();
            self.ticks_in_current = 0;
            self.effects[self.current].reset();
            log::info!("sequence advanced to {}", self.current_name());
        }

        self.effects[self.current].step(chain)?;
        self.ticks_in_current += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EffectOptions;
    use crate::effects::steady::On;
    use crate::effects::ChainEffect;
    use crate::palettes::Palette;

    fn on_effect(duration: f32, palette: Palette) -> Box<dyn ChainEffect> {
        let options = EffectOptions {
            duration,
            speed: 1.0,
            fps: 10,
            palette,
        };
        Box::new(On::new(&options).unwrap())
    }

    #[test]
    fn rejects_an_empty_sequence() {
        assert!(AnimSequence::new(vec![]).is_err());
    }

    #[test]
    fn advances_after_the_configured_duration() {
        let effects = vec![
            on_effect(1.0, Palette::red()),
            on_effect(1.0, Palette::green()),
        ];
        let mut sequence = AnimSequence::new(effects).unwrap();
        let mut chain = Chain::new(4).unwrap();

        // 1 second at 10 fps = 10 ticks of the first effect
        for _ in 0..10 {
            sequence.step(&mut chain).unwrap();
            assert!(chain.pixel(0).unwrap().color.color.red > 0.0);
        }

        sequence.step(&mut chain).unwrap();
        assert_eq!(sequence.current_name(), "on");
        assert!(chain.pixel(0).unwrap().color.color.green > 0.0);
    }

    #[test]
    fn wraps_around_and_resets_the_incoming_effect() {
        let effects = vec![
            on_effect(0.5, Palette::red()),
            on_effect(0.5, Palette::green()),
        ];
        let mut sequence = AnimSequence::new(effects).unwrap();
        let mut chain = Chain::new(4).unwrap();

        for _ in 0..11 {
            sequence.step(&mut chain).unwrap();
        }
        // back at the first effect, repainted red on re-entry
        assert!(chain.pixel(0).unwrap().color.color.red > 0.0);
    }
}
