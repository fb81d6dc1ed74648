use core::cell::Cell;

use crate::{
    hw::{AnalogConverter, CaptureUnits, ClearInterrupt, DutyOutputs, Edge},
    Channel, SignalProcessor,
};

/// PWM compare registers plus the tick timer's pending flag
#[derive(Debug, Default)]
pub struct MockPwm {
    duties: [u8; Channel::COUNT],
    writes: usize,
    cleared: usize,
}

impl MockPwm {
    /// Both outputs at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current compare register values
    pub fn duties(&self) -> [u8; Channel::COUNT] {
        self.duties
    }

    /// Number of compare register writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of times the tick flag was cleared
    pub fn cleared(&self) -> usize {
        self.cleared
    }
}

impl DutyOutputs for MockPwm {
    fn set_duty(&mut self, channel: Channel, duty: u8) {
        self.duties[channel.index()] = duty;
        self.writes += 1;
    }
}

impl ClearInterrupt for MockPwm {
    fn clear_interrupt(&mut self) {
        self.cleared += 1;
    }
}

/// ADC that always converts to a preset value. Conversions finish when told to
#[derive(Debug, Default)]
pub struct MockAdc {
    result: Cell<u8>,
    starts: Cell<usize>,
    converting: bool,
    done: bool,
}

impl MockAdc {
    /// Converter returning `result`
    pub fn new(result: u8) -> Self {
        Self {
            result: Cell::new(result),
            ..Self::default()
        }
    }

    /// Change what the next conversion returns
    pub fn set_result(&self, result: u8) {
        self.result.set(result);
    }

    /// How many conversions were started
    pub fn starts(&self) -> usize {
        self.starts.get()
    }

    /// The conversion in flight finishes
    pub fn finish(&mut self) {
        if self.converting {
            self.converting = false;
            self.done = true;
        }
    }
}

impl AnalogConverter for MockAdc {
    fn start(&mut self) {
        self.starts.set(self.starts.get() + 1);
        self.converting = true;
        self.done = false;
    }

    fn is_converting(&self) -> bool {
        self.converting
    }

    fn has_result(&self) -> bool {
        self.done
    }

    fn read(&mut self) -> u8 {
        self.done = false;
        self.result.get()
    }
}

/// External edge interrupt line
#[derive(Debug, Default)]
pub struct MockTrigger {
    cleared: usize,
}

impl MockTrigger {
    /// A line with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the pending bit was cleared
    pub fn cleared(&self) -> usize {
        self.cleared
    }
}

impl ClearInterrupt for MockTrigger {
    fn clear_interrupt(&mut self) {
        self.cleared += 1;
    }
}

/// Two capture channels of one timer
#[derive(Debug)]
pub struct MockCapture {
    latched: [u16; Channel::COUNT],
    pending: [bool; Channel::COUNT],
    edge: [Edge; Channel::COUNT],
}

impl MockCapture {
    /// Nothing captured, both armed for a rising edge
    pub fn new() -> Self {
        Self {
            latched: [0; Channel::COUNT],
            pending: [false; Channel::COUNT],
            edge: [Edge::Rising; Channel::COUNT],
        }
    }

    /// Simulate the armed edge arriving on `channel` with the counter at `tick`
    pub fn edge_at(&mut self, channel: Channel, tick: u16) {
        self.latched[channel.index()] = tick;
        self.pending[channel.index()] = true;
    }

    /// The edge `channel` is armed for
    pub fn edge(&self, channel: Channel) -> Edge {
        self.edge[channel.index()]
    }
}

impl Default for MockCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureUnits for MockCapture {
    fn is_pending(&self, channel: Channel) -> bool {
        self.pending[channel.index()]
    }

    fn captured(&mut self, channel: Channel) -> u16 {
        // Reading the capture register clears the flag on real hardware too
        self.pending[channel.index()] = false;
        self.latched[channel.index()]
    }

    fn set_edge(&mut self, channel: Channel, edge: Edge) {
        self.edge[channel.index()] = edge;
    }

    fn clear_capture(&mut self, channel: Channel) {
        self.pending[channel.index()] = false;
    }
}

/// Processor with a fixed answer, for testing the output stage on its own
#[derive(Debug)]
pub struct FixedProcessor {
    live: bool,
    duties: [u8; Channel::COUNT],
    queries: Cell<usize>,
}

impl FixedProcessor {
    /// Always reports `live` and `duties`
    pub fn new(live: bool, duties: [u8; Channel::COUNT]) -> Self {
        Self {
            live,
            duties,
            queries: Cell::new(0),
        }
    }

    /// Number of liveness queries
    pub fn queries(&self) -> usize {
        self.queries.get()
    }
}

impl SignalProcessor for FixedProcessor {
    fn reset(&self) {}

    fn is_live(&self) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.live
    }

    fn duty_value(&self, channel: Channel) -> u8 {
        self.duties[channel.index()]
    }

    fn begin_sample(&self, _channel: Channel) {}

    fn commit_sample(&self, _raw: u8) {}

    fn begin_capture(&self, _channel: Channel, _tick: u16) {}

    fn commit_capture(&self, _channel: Channel, _tick: u16) {}
}
