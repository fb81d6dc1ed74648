use stm32f1xx_hal::{
    gpio::{
        PushPull,
        Alternate,
        Input,
        Floating,
        PullUp,
        Analog,
        gpioa::*,
        gpiob::*,
    },
    pac::{
        ADC1,
        TIM3,
        TIM4,
    },
    pwm::{
        Pwm,
        C1,
        C2,
    },
};
use super::Trigger;

/// Tick timer. Its update interrupt drives the output stage and its channels 1 and 2
/// generate the two PWM outputs
pub type TickTim = TIM3;
/// Free running timer whose channels 1 and 2 timestamp the receiver's input edges
pub type CaptureTim = TIM4;
/// The converter shared by both transmitter channels
pub type SampleAdc = ADC1;

/// PWM output for channel 0
/// TIM3_CH1
pub type PwmOut0        = PA6<Alternate<PushPull>>;

/// PWM output for channel 1
/// TIM3_CH2
pub type PwmOut1        = PA7<Alternate<PushPull>>;

/// The two compare channels of the tick timer, in channel order
pub type PwmChannels    = (Pwm<TickTim, C1>, Pwm<TickTim, C2>);

/// Transmitter sample trigger for channel 0. Active low
/// EXTI0
pub type TriggerIn0     = PB0<Input<PullUp>>;

/// Transmitter sample trigger for channel 1. Active low
/// EXTI1
pub type TriggerIn1     = PB1<Input<PullUp>>;

/// Complete handle for the channel 0 trigger
pub type Trigger0       = Trigger<TriggerIn0>;

/// Complete handle for the channel 1 trigger
pub type Trigger1       = Trigger<TriggerIn1>;

/// Transmitter analog input, shared by both channels
/// ADC1_IN0
pub type AnalogIn       = PA0<Analog>;

/// Receiver pulse input for channel 0
/// TIM4_CH1
pub type PulseIn0       = PB6<Input<Floating>>;

/// Receiver pulse input for channel 1
/// TIM4_CH2
pub type PulseIn1       = PB7<Input<Floating>>;
