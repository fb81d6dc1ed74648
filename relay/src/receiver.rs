use log::debug;

use crate::{
    hw::{CaptureUnits, Edge},
    Channel, SignalProcessor,
};

/// Where a capture unit is in measuring one pulse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for the pulse to start
    AwaitingRising,
    /// Pulse started, waiting for it to end
    AwaitingFalling,
}

impl CaptureState {
    /// The edge the capture unit must be armed for in this state
    pub const fn armed_edge(self) -> Edge {
        match self {
            CaptureState::AwaitingRising => Edge::Rising,
            CaptureState::AwaitingFalling => Edge::Falling,
        }
    }
}

/// Pulse width measurement for one channel
///
/// There is no timeout. If an edge is missed the unit waits in its current state for
/// the next matching edge, measuring one bogus width on the way back into step.
#[derive(Debug)]
pub struct ChannelCapture {
    channel: Channel,
    state: CaptureState,
}

impl ChannelCapture {
    /// Capture for `channel`, waiting for a rising edge
    pub const fn new(channel: Channel) -> Self {
        Self {
            channel,
            state: CaptureState::AwaitingRising,
        }
    }

    /// Back to waiting for a rising edge, with the unit armed to match and any capture
    /// latched before now discarded
    pub fn reset<U: CaptureUnits>(&mut self, units: &mut U) {
        self.state = CaptureState::AwaitingRising;
        units.set_edge(self.channel, self.state.armed_edge());
        units.clear_capture(self.channel);
    }

    /// The unit captured the edge it was armed for
    pub fn on_capture<P, U>(&mut self, units: &mut U, processor: &P)
    where
        P: SignalProcessor + ?Sized,
        U: CaptureUnits,
    {
        let tick = units.captured(self.channel);

        self.state = match self.state {
            CaptureState::AwaitingRising => {
                processor.begin_capture(self.channel, tick);
                CaptureState::AwaitingFalling
            }
            CaptureState::AwaitingFalling => {
                processor.commit_capture(self.channel, tick);
                CaptureState::AwaitingRising
            }
        };
        units.set_edge(self.channel, self.state.armed_edge());
        units.clear_capture(self.channel);
    }

    /// Current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The channel this capture measures
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

/// Receiver capture path. One independent [`ChannelCapture`] per channel
#[derive(Debug)]
pub struct Receiver {
    captures: [ChannelCapture; Channel::COUNT],
}

impl Receiver {
    /// Both channels waiting for a rising edge
    pub const fn new() -> Self {
        Self {
            captures: [
                ChannelCapture::new(Channel::Zero),
                ChannelCapture::new(Channel::One),
            ],
        }
    }

    /// Arm both units for a rising edge. Must run before capture interrupts are enabled
    pub fn reset<U: CaptureUnits>(&mut self, units: &mut U) {
        for capture in self.captures.iter_mut() {
            capture.reset(units);
        }
        debug!("Capture units armed for rising edge");
    }

    /// Handle a capture on `channel`
    pub fn on_capture<P, U>(&mut self, channel: Channel, units: &mut U, processor: &P)
    where
        P: SignalProcessor + ?Sized,
        U: CaptureUnits,
    {
        self.captures[channel.index()].on_capture(units, processor);
    }

    /// Handle every channel with a pending capture. For units sharing one interrupt
    /// vector. Returns how many captures were handled
    pub fn dispatch<P, U>(&mut self, units: &mut U, processor: &P) -> usize
    where
        P: SignalProcessor + ?Sized,
        U: CaptureUnits,
    {
        let mut handled = 0;
        for capture in self.captures.iter_mut() {
            if units.is_pending(capture.channel) {
                capture.on_capture(units, processor);
                handled += 1;
            }
        }
        handled
    }

    /// State of `channel`'s capture
    pub fn state(&self, channel: Channel) -> CaptureState {
        self.captures[channel.index()].state()
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}
