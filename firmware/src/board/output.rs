use embedded_hal::PwmPin;
use stm32f1xx_hal::pwm::Pins;
use pwm_relay::{Channel, DutyOutputs};
use super::{
    aliases::*,
    constants::OC_MODE_FORCE_INACTIVE,
};

/// TIM3 in PWM mode, CH1 and CH2 driving the two relay outputs
///
/// Only the output stage writes these compare registers, from the tick interrupt.
pub struct PwmOutputs {
    channels: PwmChannels,
}

impl PwmOutputs {
    pub(crate) fn new(mut channels: PwmChannels) -> Self {
        channels.0.set_duty(0);
        channels.1.set_duty(0);
        channels.0.enable();
        channels.1.enable();
        Self { channels }
    }

    /// Compare value that holds an output high for the whole period
    pub fn max_duty(&self) -> u16 {
        self.channels.0.get_max_duty() + 1
    }
}

impl DutyOutputs for PwmOutputs {
    fn set_duty(&mut self, channel: Channel, duty: u8) {
        let duty = u16::from(duty);
        match channel {
            Channel::Zero => self.channels.0.set_duty(duty),
            Channel::One => self.channels.1.set_duty(duty),
        }
    }
}

/// Drives both PWM outputs low straight away, without waiting for the next period
///
/// For the panic handler, where the owned `PwmOutputs` is out of reach. Once called the
/// outputs stay low until the timer is configured again.
pub fn force_outputs_off() {
    unsafe {
        let tim = &(*TickTim::ptr());
        tim.ccmr1_output().modify(|_, w| w
            .oc1m().bits(OC_MODE_FORCE_INACTIVE)
            .oc2m().bits(OC_MODE_FORCE_INACTIVE)
        );
        tim.ccr1.write(|w| w.bits(0));
        tim.ccr2.write(|w| w.bits(0));
    }
}

/// Both outputs on the tick timer's default mapping
pub(crate) struct PwmPins(pub PwmOut0, pub PwmOut1);
impl Pins<TickTim> for PwmPins {
    const REMAP: u8 = 0b00;
    const C1: bool = true;
    const C2: bool = true;
    const C3: bool = false;
    const C4: bool = false;
    type Channels = PwmChannels;
}
