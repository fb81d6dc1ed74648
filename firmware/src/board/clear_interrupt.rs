use stm32f1xx_hal::gpio::ExtiPin;
use pwm_relay::ClearInterrupt;
use super::{PwmOutputs, TickTim, Trigger};

impl ClearInterrupt for PwmOutputs {
    fn clear_interrupt(&mut self) {
        // The hal keeps the timer, the flag is cleared through the raw block
        unsafe {
            (*TickTim::ptr()).sr.modify(|_, w| w.uif().clear_bit());
        }
    }
}

impl<P: ExtiPin> ClearInterrupt for Trigger<P> {
    fn clear_interrupt(&mut self) {
        self.pin_mut().clear_interrupt_pending_bit();
    }
}
