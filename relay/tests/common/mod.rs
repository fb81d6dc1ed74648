//! Simulated board for driving whole roles through their interrupt handlers

#![allow(dead_code)]

use pwm_relay::{
    AnalogConverter, CaptureUnits, Channel, ClearInterrupt, DutyOutputs, Edge,
};

/// Tick timer + the two PWM compare registers
#[derive(Debug, Default)]
pub struct Pwm {
    pub duties: [u8; 2],
    pub tick_pending: bool,
}

impl DutyOutputs for Pwm {
    fn set_duty(&mut self, channel: Channel, duty: u8) {
        self.duties[channel.index()] = duty;
    }
}

impl ClearInterrupt for Pwm {
    fn clear_interrupt(&mut self) {
        self.tick_pending = false;
    }
}

/// External edge interrupt line
#[derive(Debug, Default)]
pub struct Line {
    pub pending: bool,
}

impl ClearInterrupt for Line {
    fn clear_interrupt(&mut self) {
        self.pending = false;
    }
}

/// ADC sampling whatever voltage is currently on its input
#[derive(Debug, Default)]
pub struct Adc {
    pub input: u8,
    pub running: bool,
    pub eoc: bool,
    pub result: u8,
    pub starts: usize,
}

impl AnalogConverter for Adc {
    fn start(&mut self) {
        self.running = true;
        self.eoc = false;
        self.starts += 1;
    }

    fn is_converting(&self) -> bool {
        self.running
    }

    fn has_result(&self) -> bool {
        self.eoc
    }

    fn read(&mut self) -> u8 {
        self.eoc = false;
        self.result
    }
}

impl Adc {
    /// Conversion finishes, latching the input as it is now
    pub fn finish(&mut self) {
        if self.running {
            self.running = false;
            self.eoc = true;
            self.result = self.input;
        }
    }
}

/// Free running 16-bit counter with two capture channels
#[derive(Debug)]
pub struct CaptureTimer {
    pub counter: u16,
    pub ccr: [u16; 2],
    pub flag: [bool; 2],
    pub edge: [Edge; 2],
}

impl Default for CaptureTimer {
    fn default() -> Self {
        Self {
            counter: 0,
            ccr: [0; 2],
            flag: [false; 2],
            edge: [Edge::Rising; 2],
        }
    }
}

impl CaptureTimer {
    /// Input of `channel` changed to `edge` at `tick`. Only latches if the channel is
    /// armed for that edge, like the real polarity bit
    pub fn input(&mut self, channel: Channel, edge: Edge, tick: u16) -> bool {
        self.counter = tick;
        let i = channel.index();
        if self.edge[i] == edge {
            self.ccr[i] = tick;
            self.flag[i] = true;
            true
        } else {
            false
        }
    }
}

impl CaptureUnits for CaptureTimer {
    fn is_pending(&self, channel: Channel) -> bool {
        self.flag[channel.index()]
    }

    fn captured(&mut self, channel: Channel) -> u16 {
        self.flag[channel.index()] = false;
        self.ccr[channel.index()]
    }

    fn set_edge(&mut self, channel: Channel, edge: Edge) {
        self.edge[channel.index()] = edge;
    }

    fn clear_capture(&mut self, channel: Channel) {
        self.flag[channel.index()] = false;
    }
}
