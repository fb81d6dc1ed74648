use crate::Channel;

/// Convenience trait for clearing the pending flag of the peripheral that raised an interrupt
pub trait ClearInterrupt {
    /// Clear the interrupt associated with `Self`
    fn clear_interrupt(&mut self);
}

/// The two hardware PWM compare registers
pub trait DutyOutputs {
    /// Program the compare register of `channel`. Takes effect from the next PWM period
    fn set_duty(&mut self, channel: Channel, duty: u8);
}

/// The analog to digital converter shared by both transmitter channels
///
/// Only the raw register pokes, gating is done by [`Converter`](crate::Converter).
pub trait AnalogConverter {
    /// Kick off a single conversion
    fn start(&mut self);
    /// True from `start` until the conversion finishes
    fn is_converting(&self) -> bool;
    /// True once a conversion has finished and its result hasn't been read
    fn has_result(&self) -> bool;
    /// Read the 8 most significant bits of the last conversion.
    /// Reading also acknowledges the end of conversion interrupt
    fn read(&mut self) -> u8;
}

/// Edge a capture unit is armed for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Low to high transition
    Rising,
    /// High to low transition
    Falling,
}

/// The two edge capture units used by the receiver. Usually channels of one timer
/// sharing a single interrupt vector
pub trait CaptureUnits {
    /// True if `channel` has captured an edge that hasn't been handled yet
    fn is_pending(&self, channel: Channel) -> bool;
    /// Counter value latched by the last capture on `channel`
    fn captured(&mut self, channel: Channel) -> u16;
    /// Re-arm `channel` for `edge`
    fn set_edge(&mut self, channel: Channel, edge: Edge);
    /// Clear the capture flag of `channel`
    fn clear_capture(&mut self, channel: Channel);
}
