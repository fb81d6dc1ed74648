//! Which interrupt may preempt which.
//!
//! There is no scheduler. Every handler runs to completion unless a strictly higher
//! priority source fires. The tick writes both PWM compare registers, so it sits
//! above everything else and is never interrupted half way through.
//! Edge triggers, conversion complete and captures share one level and so never
//! interleave with each other.

use crate::Channel;

/// An interrupt source the relay reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Timing tick overflow, drives the output stage
    TimingTick,
    /// Transmitter edge trigger
    EdgeTrigger(Channel),
    /// Transmitter ADC end of conversion
    ConversionComplete,
    /// Receiver capture unit edge
    Capture(Channel),
}

/// Priority of the timing tick
pub const TICK_PRIORITY: u8 = 2;

/// Priority shared by every capture path source
pub const CAPTURE_PRIORITY: u8 = 1;

/// Sources used by the transmitter
pub const TRANSMITTER_SOURCES: [Source; 4] = [
    Source::TimingTick,
    Source::EdgeTrigger(Channel::Zero),
    Source::EdgeTrigger(Channel::One),
    Source::ConversionComplete,
];

/// Sources used by the receiver
pub const RECEIVER_SOURCES: [Source; 3] = [
    Source::TimingTick,
    Source::Capture(Channel::Zero),
    Source::Capture(Channel::One),
];

impl Source {
    /// Interrupt priority, higher preempts lower
    pub const fn priority(self) -> u8 {
        match self {
            Source::TimingTick => TICK_PRIORITY,
            Source::EdgeTrigger(_) | Source::ConversionComplete | Source::Capture(_) => {
                CAPTURE_PRIORITY
            }
        }
    }

    /// True if `self` firing can interrupt a running `other` handler
    pub const fn can_preempt(self, other: Source) -> bool {
        self.priority() > other.priority()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_preempts_the_tick() {
        for sources in [&TRANSMITTER_SOURCES[..], &RECEIVER_SOURCES[..]].iter() {
            for &source in sources.iter() {
                assert!(!source.can_preempt(Source::TimingTick));
            }
        }
    }

    #[test]
    fn tick_preempts_capture_paths() {
        for &source in TRANSMITTER_SOURCES[1..].iter().chain(RECEIVER_SOURCES[1..].iter()) {
            assert!(Source::TimingTick.can_preempt(source));
        }
    }

    #[test]
    fn capture_paths_never_interleave() {
        let capture_paths = [
            Source::EdgeTrigger(Channel::Zero),
            Source::EdgeTrigger(Channel::One),
            Source::ConversionComplete,
            Source::Capture(Channel::Zero),
            Source::Capture(Channel::One),
        ];
        for &a in capture_paths.iter() {
            for &b in capture_paths.iter() {
                assert!(!a.can_preempt(b));
            }
        }
    }
}
