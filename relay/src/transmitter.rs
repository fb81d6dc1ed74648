use log::trace;

use crate::{
    hw::{AnalogConverter, ClearInterrupt},
    Channel, Converter, SignalProcessor,
};

/// Transmitter capture path. Two edge triggers share one ADC
///
/// A trigger marks which channel the next conversion belongs to and starts it.
/// If the other trigger fires before the conversion finishes the selection is simply
/// overwritten, the result goes to the later channel and the earlier channel misses
/// one update. Its next trigger picks it up again.
#[derive(Debug)]
pub struct Transmitter<A> {
    converter: Converter<A>,
}

impl<A: AnalogConverter> Transmitter<A> {
    /// Create the capture path around the shared converter
    pub const fn new(adc: A) -> Self {
        Self {
            converter: Converter::new(adc),
        }
    }

    /// Edge trigger for `channel` fired
    pub fn on_trigger<P, T>(&mut self, channel: Channel, trigger: &mut T, processor: &P)
    where
        P: SignalProcessor + ?Sized,
        T: ClearInterrupt,
    {
        trigger.clear_interrupt();
        processor.begin_sample(channel);
        if self.converter.try_start().is_err() {
            trace!("Conversion in flight, result retargeted to {:?}", channel);
        }
    }

    /// The shared converter raised its end of conversion interrupt.
    ///
    /// Commits nothing unless a result is actually waiting.
    pub fn on_conversion_complete<P>(&mut self, processor: &P)
    where
        P: SignalProcessor + ?Sized,
    {
        match self.converter.complete() {
            Some(raw) => processor.commit_sample(raw),
            None => trace!("End of conversion with no result"),
        }
    }

    /// The converter gate, for inspection
    pub fn converter(&self) -> &Converter<A> {
        &self.converter
    }

    /// The converter gate, mutably
    #[cfg(any(test, feature = "mock"))]
    pub fn converter_mut(&mut self) -> &mut Converter<A> {
        &mut self.converter
    }
}
