use thiserror::Error;

use crate::palettes::Palette;

#[derive(Debug, Error)]
pub enum EffectError {
    /// A buffer or palette access went past the end. This is a programming
    /// defect in the caller's index arithmetic; it aborts the run instead
    /// of being swallowed.
    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Bad construction parameters. Raised at construction or reset time,
    /// never mid-step.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Construction parameters shared by every effect.
#[derive(Clone)]
pub struct EffectOptions {
    /// Seconds the effect runs before the sequence advances.
    pub duration: f32,
    /// Fraction of frames that are step ticks; 1.0 steps every frame,
    /// 0.5 every other frame.
    pub speed: f32,
    /// Frame rate in ticks per second, fixed per run.
    pub fps: u32,
    pub palette: Palette,
}

/// Classifies each frame of an animation as a step tick (state advances) or
/// a hold tick (redraw only), and carries the one-shot initializing flag.
///
/// The clock never sleeps; timing comes from the external fixed-rate caller.
#[derive(Debug)]
pub struct StepClock {
    fps: u32,
    step_interval: u64,
    tick: u64,
    initializing: bool,
}

impl StepClock {
    pub fn new(fps: u32, speed: f32) -> Result<StepClock, EffectError> {
        if fps == 0 {
            return Err(EffectError::Configuration(
                "frame rate must be positive".to_string(),
            ));
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(EffectError::Configuration(format!(
                "speed must be a positive fraction, got {}",
                speed
            )));
        }

        let step_interval = ((1.0 / speed).round() as u64).max(1);
        Ok(StepClock {
            fps,
            step_interval,
            tick: 0,
            initializing: true,
        })
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Starts the next tick and reports whether it is a step tick. The
    /// first tick after a reset always steps, so effects can build their
    /// initial pattern immediately.
    pub fn advance(&mut self) -> bool {
        let step = self.tick % self.step_interval == 0;
        self.tick += 1;
        step
    }

    /// Index of the most recently started tick. Effects that derive state
    /// from wall-clock position (pulse duty windows, fades) read this.
    pub fn current_tick(&self) -> u64 {
        self.tick.saturating_sub(1)
    }

    pub fn reset(&mut self) {
        self.tick = 0;
        self.initializing = true;
    }

    /// Reads and clears the initializing flag; true for exactly the first
    /// step tick after `reset` or `reinitialize`.
    pub fn take_initializing(&mut self) -> bool {
        let was = self.initializing;
        self.initializing = false;
        was
    }

    /// Re-arms the initializing flag without touching the tick counter.
    /// Cyclic effects use this when they reach a terminal position and
    /// want to rebuild with the next palette color.
    pub fn reinitialize(&mut self) {
        self.initializing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_fps() {
        assert!(StepClock::new(0, 1.0).is_err());
    }

    #[test]
    fn rejects_non_positive_speed() {
        assert!(StepClock::new(20, 0.0).is_err());
        assert!(StepClock::new(20, -0.5).is_err());
        assert!(StepClock::new(20, f32::NAN).is_err());
    }

    #[test]
    fn full_speed_steps_every_frame() {
        let mut clock = StepClock::new(20, 1.0).unwrap();
        for _ in 0..10 {
            assert!(clock.advance());
        }
    }

    #[test]
    fn half_speed_steps_every_other_frame() {
        let mut clock = StepClock::new(20, 0.5).unwrap();
        let pattern: Vec<bool> = (0..6).map(|_| clock.advance()).collect();
        assert_eq!(pattern, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn quarter_speed_steps_every_fourth_frame() {
        let mut clock = StepClock::new(20, 0.25).unwrap();
        let steps = (0..16).filter(|_| clock.advance()).count();
        assert_eq!(steps, 4);
    }

    #[test]
    fn overspeed_clamps_to_every_frame() {
        let mut clock = StepClock::new(20, 4.0).unwrap();
        assert!(clock.advance());
        assert!(clock.advance());
    }

    #[test]
    fn initializing_is_one_shot() {
        let mut clock = StepClock::new(20, 1.0).unwrap();
        assert!(clock.take_initializing());
        assert!(!clock.take_initializing());

        clock.reset();
        assert!(clock.take_initializing());
        assert!(!clock.take_initializing());
    }

    #[test]
    fn reset_restarts_the_tick_counter() {
        let mut clock = StepClock::new(20, 1.0).unwrap();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick(), 1);

        clock.reset();
        clock.advance();
        assert_eq!(clock.current_tick(), 0);
    }

    #[test]
    fn reinitialize_keeps_the_tick_counter() {
        let mut clock = StepClock::new(20, 1.0).unwrap();
        clock.advance();
        clock.take_initializing();
        clock.reinitialize();
        assert!(clock.take_initializing());
        assert_eq!(clock.current_tick(), 0);
    }
}
