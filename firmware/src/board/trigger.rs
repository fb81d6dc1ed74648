use stm32f1xx_hal::gpio::ExtiPin;

/// A transmitter sample trigger, an input configured as an EXTI source
pub struct Trigger<P> {
    pin: P,
}

impl<P: ExtiPin> Trigger<P> {
    pub(crate) fn new(pin: P) -> Self {
        Self { pin }
    }

    pub(crate) fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}
