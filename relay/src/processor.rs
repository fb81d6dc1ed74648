//! Per channel measurement state shared between the capture paths and the output stage.
//!
//! All of it lives in atomics so a single [`Processor`] can sit in a `static` and be
//! used from every interrupt without a lock. That is only sound because each field has
//! one writer:
//!
//! | Field | Written by | Read by |
//! |---|---|---|
//! | duty, commit counter of channel K | channel K's capture completion | tick |
//! | capture start of channel K | channel K's capture unit | channel K's capture unit |
//! | pending selection | edge triggers | conversion complete |
//! | liveness | tick | tick |
//!
//! Edge triggers and conversion complete share one priority so they can't interleave.
//! All values are at most 16 bits wide, which the target stores in one instruction.

use core::sync::atomic::{AtomicU16, AtomicU8, Ordering};

use log::trace;

use crate::{clamp_duty, Channel, Liveness};

/// The measurement to duty contract the output stage and capture paths are written against
pub trait SignalProcessor {
    /// (Re)initialize all channel state. Called once before interrupts are enabled
    fn reset(&self);
    /// True if both channels have recent measurements. Gates the output stage.
    ///
    /// Called exactly once per tick, from the tick handler
    fn is_live(&self) -> bool;
    /// The committed duty of `channel`, already clamped to the PWM ceiling
    fn duty_value(&self, channel: Channel) -> u8;
    /// Transmitter: the next conversion result belongs to `channel`
    fn begin_sample(&self, channel: Channel);
    /// Transmitter: commit a conversion result to the channel most recently marked pending
    fn commit_sample(&self, raw: u8);
    /// Receiver: a pulse started on `channel` at `tick`
    fn begin_capture(&self, channel: Channel, tick: u16);
    /// Receiver: the pulse on `channel` ended at `tick`. Commits the elapsed ticks
    fn commit_capture(&self, channel: Channel, tick: u16);
}

const NO_SELECTION: u8 = u8::MAX;

#[derive(Debug)]
struct ChannelState {
    duty: AtomicU8,
    capture_start: AtomicU16,
    commits: AtomicU8,
}

impl ChannelState {
    const fn new() -> Self {
        Self {
            duty: AtomicU8::new(0),
            capture_start: AtomicU16::new(0),
            commits: AtomicU8::new(0),
        }
    }

    fn commit(&self, duty: u8) {
        self.duty.store(duty, Ordering::Relaxed);
        // Only this channel's capture path writes the counter, load + store is fine
        let commits = self.commits.load(Ordering::Relaxed);
        self.commits.store(commits.wrapping_add(1), Ordering::Release);
    }

    fn reset(&self) {
        self.duty.store(0, Ordering::Relaxed);
        self.capture_start.store(0, Ordering::Relaxed);
        self.commits.store(0, Ordering::Relaxed);
    }
}

/// Lock free [`SignalProcessor`] for two channels
///
/// Samples and widths are committed as-is after clamping, one tick of the
/// capture counter maps to one step of PWM duty.
#[derive(Debug)]
pub struct Processor {
    channels: [ChannelState; Channel::COUNT],
    pending: AtomicU8,
    liveness: Liveness,
}

impl Processor {
    /// Create a processor in its reset state
    pub const fn new() -> Self {
        Self {
            channels: [ChannelState::new(), ChannelState::new()],
            pending: AtomicU8::new(NO_SELECTION),
            liveness: Liveness::new(),
        }
    }

    /// The channel the next conversion result will be committed to, if any
    pub fn pending(&self) -> Option<Channel> {
        match self.pending.load(Ordering::Relaxed) {
            0 => Some(Channel::Zero),
            1 => Some(Channel::One),
            _ => None,
        }
    }

    /// Ticks since `channel` last committed a value
    pub fn age(&self, channel: Channel) -> u8 {
        self.liveness.age(channel)
    }

    fn channel(&self, channel: Channel) -> &ChannelState {
        &self.channels[channel.index()]
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalProcessor for Processor {
    fn reset(&self) {
        for channel in self.channels.iter() {
            channel.reset();
        }
        self.pending.store(NO_SELECTION, Ordering::Relaxed);
        self.liveness.reset();
    }

    fn is_live(&self) -> bool {
        let commits = [
            self.channel(Channel::Zero).commits.load(Ordering::Acquire),
            self.channel(Channel::One).commits.load(Ordering::Acquire),
        ];
        self.liveness.observe(commits)
    }

    fn duty_value(&self, channel: Channel) -> u8 {
        self.channel(channel).duty.load(Ordering::Relaxed)
    }

    fn begin_sample(&self, channel: Channel) {
        self.pending.store(u8::from(channel), Ordering::Relaxed);
    }

    fn commit_sample(&self, raw: u8) {
        match self.pending() {
            Some(channel) => self.channel(channel).commit(clamp_duty(u16::from(raw))),
            None => trace!("Conversion result {} with no channel selected, dropped", raw),
        }
    }

    fn begin_capture(&self, channel: Channel, tick: u16) {
        self.channel(channel).capture_start.store(tick, Ordering::Relaxed);
    }

    fn commit_capture(&self, channel: Channel, tick: u16) {
        let state = self.channel(channel);
        let width = tick.wrapping_sub(state.capture_start.load(Ordering::Relaxed));
        state.commit(clamp_duty(width));
    }
}
