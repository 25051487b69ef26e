use std::sync::atomic::{AtomicBool, Ordering};

use palette::LinSrgb;

use crate::animation::EffectError;
use crate::chain::Chain;
use crate::intervaltimer::IntervalTimer;
use crate::sequence::AnimSequence;

/// The display hand-off boundary. Whatever sits behind it (DMX universe,
/// simulator, test double) receives one baked frame per tick and is
/// trusted to cope; the core never waits on it.
pub trait ChainCanvas {
    fn refresh(&mut self, frame: &[LinSrgb]);
    fn blackout(&mut self);
}

/// Drives the whole show: one sequence step plus exactly one canvas
/// refresh per tick, hold ticks included, paced by the interval timer.
pub struct Animator {
    chain: Chain,
    sequence: AnimSequence,
    canvas: Box<dyn ChainCanvas>,
    timer: IntervalTimer,
}

impl Animator {
    pub fn new(
        chain: Chain,
        sequence: AnimSequence,
        canvas: Box<dyn ChainCanvas>,
        fps: u32,
    ) -> Animator {
        Animator {
            chain,
            sequence,
            canvas,
            timer: IntervalTimer::new(fps as f32, false),
        }
    }

    /// One frame: step the active effect, then hand the finished buffer to
    /// the canvas. The refresh happens after the step returns, so the
    /// canvas never sees a half-written frame.
    pub fn tick_once(&mut self) -> Result<(), EffectError> {
        self.sequence.step(&mut self.chain)?;
        self.canvas.refresh(&self.chain.frame());
        Ok(())
    }

    /// Runs until `running` clears. A step error aborts the run; frames
    /// are cheap to regenerate, so there is no retry.
    pub fn run(&mut self, running: &AtomicBool) -> Result<(), EffectError> {
        log::info!("starting with effect {}", self.sequence.current_name());

        while running.load(Ordering::SeqCst) {
            self.tick_once()?;
            self.timer.sleep_until_next_tick();
        }

        log::info!("stopping, blacking out");
        self.canvas.blackout();
        Ok(())
    }
}
