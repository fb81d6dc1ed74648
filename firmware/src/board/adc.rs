use stm32f1xx_hal::adc::Adc;
use pwm_relay::AnalogConverter;
use super::aliases::*;

/// SR.EOC
const SR_EOC: u32 = 1 << 1;
/// SR.STRT
const SR_STRT: u32 = 1 << 4;

/// ADC1 set up for single software started conversions of `AnalogIn` with the
/// end of conversion interrupt enabled
pub struct AdcConverter {
    _adc: Adc<SampleAdc>,
    _pin: AnalogIn,
}

impl AdcConverter {
    pub(crate) fn new(adc: Adc<SampleAdc>, pin: AnalogIn) -> Self {
        Self { _adc: adc, _pin: pin }
    }

    fn sr(&self) -> u32 {
        unsafe { (*SampleAdc::ptr()).sr.read().bits() }
    }

    /// Status flags are rc_w0, writing 1 leaves a flag alone
    fn clear_flags(&mut self, mask: u32) {
        unsafe {
            (*SampleAdc::ptr()).sr.write(|w| w.bits(!mask));
        }
    }
}

// The hal only offers blocking reads, conversions here finish in the ADC1_2 interrupt.
// STRT is set by the hardware on start and only cleared here, EOC is set at the end and
// cleared by reading DR
impl AnalogConverter for AdcConverter {
    fn start(&mut self) {
        // Drop whatever an unserviced conversion left behind
        self.clear_flags(SR_STRT | SR_EOC);
        unsafe {
            (*SampleAdc::ptr()).cr2.modify(|_, w| w.swstart().set_bit());
        }
    }

    fn is_converting(&self) -> bool {
        let sr = self.sr();
        sr & SR_STRT != 0 && sr & SR_EOC == 0
    }

    fn has_result(&self) -> bool {
        self.sr() & SR_EOC != 0
    }

    fn read(&mut self) -> u8 {
        // Reading DR clears EOC. Data is left aligned in the low half word
        let dr = unsafe { (*SampleAdc::ptr()).dr.read().bits() };
        self.clear_flags(SR_STRT);
        ((dr & 0xFFFF) >> 8) as u8
    }
}
