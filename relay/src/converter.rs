use core::convert::Infallible;

use crate::hw::AnalogConverter;

/// Gate around the single ADC. Only one conversion may be in flight.
///
/// Busy and done are read back from the converter itself, so a lost end of conversion
/// interrupt can't leave the gate shut. The next start request finds the converter idle.
///
/// Both edge triggers and the conversion complete handler use this, they must run at
/// the same priority so they never preempt each other.
#[derive(Debug)]
pub struct Converter<A> {
    adc: A,
}

impl<A: AnalogConverter> Converter<A> {
    /// Wrap an idle converter
    pub const fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Start a conversion unless one is already running.
    ///
    /// `WouldBlock` means the request was absorbed by the conversion in flight.
    pub fn try_start(&mut self) -> nb::Result<(), Infallible> {
        if self.adc.is_converting() {
            return Err(nb::Error::WouldBlock);
        }
        self.adc.start();
        Ok(())
    }

    /// Collect the result of the finished conversion.
    ///
    /// `None` if no conversion has finished since the last result was taken.
    pub fn complete(&mut self) -> Option<u8> {
        if !self.adc.has_result() {
            return None;
        }
        Some(self.adc.read())
    }

    /// True while a conversion is in flight
    pub fn is_busy(&self) -> bool {
        self.adc.is_converting()
    }

    /// Access the wrapped converter
    pub fn inner(&self) -> &A {
        &self.adc
    }

    /// Mutable access to the wrapped converter
    #[cfg(any(test, feature = "mock"))]
    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAdc;

    #[test]
    fn one_conversion_at_a_time() {
        let mut converter = Converter::new(MockAdc::new(42));
        assert!(converter.try_start().is_ok());
        assert!(converter.is_busy());
        assert_eq!(converter.try_start(), Err(nb::Error::WouldBlock));
        assert_eq!(converter.inner().starts(), 1);

        converter.inner_mut().finish();
        assert_eq!(converter.complete(), Some(42));
        assert!(!converter.is_busy());
        assert!(converter.try_start().is_ok());
        assert_eq!(converter.inner().starts(), 2);
    }

    #[test]
    fn nothing_to_collect_before_finish() {
        let mut converter = Converter::new(MockAdc::new(7));
        assert_eq!(converter.complete(), None);

        converter.try_start().unwrap();
        assert_eq!(converter.complete(), None);

        converter.inner_mut().finish();
        assert_eq!(converter.complete(), Some(7));
        assert_eq!(converter.complete(), None);
    }

    #[test]
    fn uncollected_result_does_not_block_next_start() {
        let mut converter = Converter::new(MockAdc::new(3));
        converter.try_start().unwrap();
        converter.inner_mut().finish();

        assert!(!converter.is_busy());
        assert!(converter.try_start().is_ok());
        assert_eq!(converter.inner().starts(), 2);
    }
}
