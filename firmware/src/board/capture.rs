use pwm_relay::{CaptureUnits, Channel, Edge};
use super::aliases::*;

/// TIM4 free running with CH1 and CH2 in input capture on their own pins.
/// Both channels raise the one TIM4 interrupt.
pub struct CaptureTimer {
    tim: CaptureTim,
    _pins: (PulseIn0, PulseIn1),
}

impl CaptureTimer {
    pub(crate) fn new(tim: CaptureTim, pins: (PulseIn0, PulseIn1)) -> Self {
        Self { tim, _pins: pins }
    }
}

/// CCxIF and CCxOF bit for each channel
const fn flags(channel: Channel) -> u32 {
    match channel {
        Channel::Zero => (1 << 1) | (1 << 9),
        Channel::One => (1 << 2) | (1 << 10),
    }
}

impl CaptureUnits for CaptureTimer {
    fn is_pending(&self, channel: Channel) -> bool {
        let sr = self.tim.sr.read();
        match channel {
            Channel::Zero => sr.cc1if().bit_is_set(),
            Channel::One => sr.cc2if().bit_is_set(),
        }
    }

    fn captured(&mut self, channel: Channel) -> u16 {
        match channel {
            Channel::Zero => self.tim.ccr1.read().bits() as u16,
            Channel::One => self.tim.ccr2.read().bits() as u16,
        }
    }

    fn set_edge(&mut self, channel: Channel, edge: Edge) {
        // CCxP set = inverted = falling edge
        let falling = edge == Edge::Falling;
        self.tim.ccer.modify(|_, w| match channel {
            Channel::Zero => w.cc1p().bit(falling),
            Channel::One => w.cc2p().bit(falling),
        });
    }

    fn clear_capture(&mut self, channel: Channel) {
        // rc_w0: writing 1 leaves a flag alone, so the other channel can't lose a capture
        // that lands between a read and a write
        self.tim.sr.write(|w| unsafe { w.bits(!flags(channel)) });
    }
}
