pub(crate) mod collider;
pub(crate) mod comet;
pub(crate) mod fade;
pub(crate) mod larson;
pub(crate) mod pulse;
pub(crate) mod sparkle;
pub(crate) mod steady;
pub(crate) mod wipe;

use crate::animation::{EffectError, EffectOptions, StepClock};
use crate::chain::Chain;
use crate::palettes::{Palette, PaletteEntry};

/// One animation over the chain. The external driver calls `step` once per
/// frame; the effect consults its clock and either advances its state or
/// leaves the buffer untouched for a hold tick. Each step completes in full
/// before the canvas refresh, so no partial frame is ever observed.
pub trait ChainEffect: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Puts the effect back at the start of its cycle: tick counter to
    /// zero, initializing flag armed, palette cursor rewound.
    fn reset(&mut self);

    fn step(&mut self, chain: &mut Chain) -> Result<(), EffectError>;

    /// How long the sequencer keeps this effect active, in ticks.
    fn duration_ticks(&self) -> u64;
}

/// State every effect carries: its step clock, its own palette cursor, and
/// the configured run duration.
#[derive(Debug)]
pub(crate) struct AnimBase {
    pub clock: StepClock,
    pub palette: Palette,
    duration_ticks: u64,
}

impl AnimBase {
    pub fn new(options: &EffectOptions) -> Result<AnimBase, EffectError> {
        if !options.duration.is_finite() || options.duration <= 0.0 {
            return Err(EffectError::Configuration(format!(
                "duration must be a positive number of seconds, got {}",
                options.duration
            )));
        }

        Ok(AnimBase {
            clock: StepClock::new(options.fps, options.speed)?,
            palette: options.palette.clone(),
            duration_ticks: (options.duration * options.fps as f32).round() as u64,
        })
    }

    pub fn reset(&mut self) {
        self.clock.reset();
        self.palette.rewind();
    }

    pub fn next_entry(&mut self) -> PaletteEntry {
        self.palette.next_entry()
    }

    pub fn duration_ticks(&self) -> u64 {
        self.duration_ticks
    }
}
