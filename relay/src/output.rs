use log::{debug, warn};

use crate::{
    clamp_duty,
    hw::{ClearInterrupt, DutyOutputs},
    Channel, SignalProcessor,
};

/// What the output stage wrote to the compare registers on one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Liveness reported by the processor for this tick
    pub live: bool,
    /// Duty written to each channel, indexed by [`Channel::index`]
    pub duties: [u8; Channel::COUNT],
}

impl Frame {
    /// The frame written while the link is down
    pub const FAILSAFE: Frame = Frame {
        live: false,
        duties: [0; Channel::COUNT],
    };
}

/// Drives both PWM outputs from the timing tick
///
/// This is the only place the outputs change. Between ticks the PWM hardware keeps
/// running at whatever was written last.
#[derive(Debug)]
pub struct OutputStage {
    was_live: bool,
}

impl OutputStage {
    /// Create an output stage. It assumes the link starts out down
    pub const fn new() -> Self {
        Self { was_live: false }
    }

    /// Handle one tick overflow.
    ///
    /// If the processor reports the link live both committed duties are applied,
    /// otherwise both outputs are forced to zero. The tick's pending flag is cleared
    /// before returning.
    pub fn on_tick<P, O>(&mut self, processor: &P, outputs: &mut O) -> Frame
    where
        P: SignalProcessor + ?Sized,
        O: DutyOutputs + ClearInterrupt,
    {
        outputs.clear_interrupt();

        let frame = if processor.is_live() {
            Frame {
                live: true,
                duties: [
                    clamp_duty(u16::from(processor.duty_value(Channel::Zero))),
                    clamp_duty(u16::from(processor.duty_value(Channel::One))),
                ],
            }
        } else {
            Frame::FAILSAFE
        };

        for &channel in Channel::ALL.iter() {
            outputs.set_duty(channel, frame.duties[channel.index()]);
        }

        if frame.live != self.was_live {
            if frame.live {
                debug!("Link live, outputs following input: {:?}", frame.duties);
            } else {
                warn!("Link lost, forcing outputs to zero");
            }
            self.was_live = frame.live;
        }

        frame
    }

    /// Whether the last tick applied live values
    pub fn is_live(&self) -> bool {
        self.was_live
    }
}

impl Default for OutputStage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PWM_CEILING,
        mock::{FixedProcessor, MockPwm},
        Processor,
    };

    #[test]
    fn live_applies_committed_duties() {
        let processor = FixedProcessor::new(true, [70, 110]);
        let mut pwm = MockPwm::new();
        let mut stage = OutputStage::new();

        let frame = stage.on_tick(&processor, &mut pwm);
        assert!(frame.live);
        assert_eq!(frame.duties, [70, 110]);
        assert_eq!(pwm.duties(), [70, 110]);
        assert!(stage.is_live());
    }

    #[test]
    fn stale_forces_zero() {
        let processor = FixedProcessor::new(false, [70, 110]);
        let mut pwm = MockPwm::new();
        pwm.set_duty(Channel::Zero, 33);
        let mut stage = OutputStage::new();

        let frame = stage.on_tick(&processor, &mut pwm);
        assert_eq!(frame, Frame::FAILSAFE);
        assert_eq!(pwm.duties(), [0, 0]);
    }

    #[test]
    fn clears_tick_flag_every_tick() {
        let processor = FixedProcessor::new(true, [1, 2]);
        let mut pwm = MockPwm::new();
        let mut stage = OutputStage::new();
        for _ in 0..3 {
            stage.on_tick(&processor, &mut pwm);
        }
        assert_eq!(pwm.cleared(), 3);
        assert_eq!(pwm.writes(), 6);
        assert_eq!(processor.queries(), 3);
    }

    #[test]
    fn repeated_ticks_do_not_drift() {
        let processor = FixedProcessor::new(true, [90, 15]);
        let mut pwm = MockPwm::new();
        let mut stage = OutputStage::new();
        let first = stage.on_tick(&processor, &mut pwm);
        for _ in 0..100 {
            assert_eq!(stage.on_tick(&processor, &mut pwm), first);
            assert_eq!(pwm.duties(), [90, 15]);
        }
    }

    #[test]
    fn over_ceiling_is_clamped_before_hardware() {
        let processor = FixedProcessor::new(true, [255, PWM_CEILING + 1]);
        let mut pwm = MockPwm::new();
        let frame = OutputStage::new().on_tick(&processor, &mut pwm);
        assert_eq!(frame.duties, [PWM_CEILING, PWM_CEILING]);
        assert_eq!(pwm.duties(), [PWM_CEILING, PWM_CEILING]);
    }

    #[test]
    fn recovers_when_link_returns() {
        let processor = Processor::new();
        processor.reset();
        let mut pwm = MockPwm::new();
        let mut stage = OutputStage::new();

        assert!(!stage.on_tick(&processor, &mut pwm).live);

        for &channel in Channel::ALL.iter() {
            processor.begin_capture(channel, 0);
            processor.commit_capture(channel, 80);
        }
        let frame = stage.on_tick(&processor, &mut pwm);
        assert!(frame.live);
        assert_eq!(pwm.duties(), [80, 80]);
    }
}
