use crate::animation::{EffectError, EffectOptions};
use crate::chain::{Chain, Pixel};
use crate::effects::{AnimBase, ChainEffect};

/// Square-wave duty cycle over a one-second window: the chain is on for
/// `duty` percent of every `fps` ticks, off for the rest. Writes are
/// edge-triggered, so the buffer is only touched when the on/off state
/// actually flips. Each rising edge takes the next palette color.
///
/// Duty values that do not divide the window evenly are floored to whole
/// ticks (duty 33 at 20 fps gives 6 on-ticks).
#[derive(Debug)]
pub struct Pulse {
    base: AnimBase,
    duty: u8,
    leds_on: bool,
}

impl Pulse {
    pub fn new(options: &EffectOptions, duty: u8) -> Result<Pulse, EffectError> {
        if duty == 0 || duty > 100 {
            return Err(EffectError::Configuration(format!(
                "duty cycle must be within 1..=100 percent, got {}",
                duty
            )));
        }

        Ok(Pulse {
            base: AnimBase::new(options)?,
            duty,
            leds_on: false,
        })
    }

    fn on_window(&self) -> u64 {
        u64::from(self.base.clock.fps()) * u64::from(self.duty) / 100
    }
}

impl ChainEffect for Pulse {
    fn name(&self) -> &'static str {
        "pulse"
    }

    fn reset(&mut self) {
        self.base.reset();
        self.leds_on = false;
    }

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError> {
        if !self.base.clock.advance() {
            return Ok(());
        }
        self.base.clock.take_initializing();

        let window_pos = self.base.clock.current_tick() % u64::from(self.base.clock.fps());
        let mark = window_pos < self.on_window();

        if mark && !self.leds_on {
            chain.set_all(self.base.next_entry().solid());
            self.leds_on = true;
        } else if !mark && self.leds_on {
            chain.set_all(Pixel::black());
            self.leds_on = false;
        }

        Ok(())
    }

    fn duration_ticks(&self) -> u64 {
        self.base.duration_ticks()
    }
}
