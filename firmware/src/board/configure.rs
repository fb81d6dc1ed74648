use stm32f1xx_hal::{
    rcc::{self, Clocks},
    afio,
    flash,
    gpio::{
        Input,
        Floating,
        gpioa,
        gpiob,
        Edge,
        ExtiPin,
    },
    timer::Timer,
    adc::Adc,
    pac::EXTI,
};
use itm_logger::*;
use super::{
    constants::*,
    aliases::*,
    AdcConverter,
    CaptureTimer,
    PwmOutputs,
    PwmPins,
    Trigger,
};

use core::fmt;

/// Errors that can be returned by Configure::configure
#[derive(Debug)]
pub enum Error {
    /// The timers aren't clocked at the rate their prescalers were worked out for
    TimerClock {
        /// Clock `COUNT_PSC` assumes, in Hz
        expected: u32,
        /// Clock the RCC actually froze, in Hz
        actual: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TimerClock { expected, actual } => write!(f,
                "timer clock is {}Hz, prescalers assume {}Hz", actual, expected),
        }
    }
}

/// This trait allows a configure function to be implemented on the type aliases
/// from super::aliases. Each board object gets built from the raw peripherals
/// it needs without the caller having to do it all manually.
pub trait Configure<'a>
where Self: Sized
{
    /// The type of the parameters that need to be provided to the configure function
    type Params;
    /// Configure the peripherals required to construct `Self`
    fn configure(_: Self::Params) -> Result<Self, Error>;
}

/// TIM3 and TIM4 count at `COUNT_FREQ` only if they see `TIMER_CLOCK`
fn check_timer_clock(clocks: &Clocks) -> Result<(), Error> {
    let expected = TIMER_CLOCK.0 * 1_000_000;
    let actual = clocks.pclk1_tim().0;
    if actual != expected {
        return Err(Error::TimerClock { expected, actual });
    }
    Ok(())
}

impl <'a> Configure<'a> for Clocks {
    type Params = (
        rcc::CFGR,
        &'a mut flash::ACR,
    );
    fn configure((cfgr, acr): Self::Params) -> Result<Self, Error> {
        let clocks = cfgr
            .use_hse(HSE)
            .sysclk(SYSCLK_FREQ)
            .pclk1(PCLK1_FREQ)
            .pclk2(PCLK2_FREQ)
            .adcclk(ADC_FREQ)
            .freeze(acr);

        check_timer_clock(&clocks)?;
        Ok(clocks)
    }
}

impl<'a> Configure<'a> for PwmOut0 {
    type Params = (
        gpioa::PA6<Input<Floating>>,
        &'a mut gpioa::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        Ok(pin.into_alternate_push_pull(cr))
    }
}

impl<'a> Configure<'a> for PwmOut1 {
    type Params = (
        gpioa::PA7<Input<Floating>>,
        &'a mut gpioa::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        Ok(pin.into_alternate_push_pull(cr))
    }
}

impl<'a> Configure<'a> for PwmOutputs {
    type Params = (
        PwmOut0,
        PwmOut1,
        TickTim,
        Clocks,
        &'a mut rcc::APB1,
        &'a mut afio::MAPR,
    );
    fn configure((out0, out1, tim, clocks, apb1, mapr): Self::Params) -> Result<Self, Error> {
        check_timer_clock(&clocks)?;

        let channels = Timer::tim3(tim, &clocks, apb1)
            .pwm(PwmPins(out0, out1), mapr, TICK_FREQ);

        // The hal picks its own PSC and ARR for the frequency, both are replaced so
        // one PWM period is exactly PWM_CEILING counts
        unsafe {
            // Can't use the mut ref we already have because the hal function resets the
            // peripheral and keeps the reference
            let tim = &(*TickTim::ptr());
            tim.cr1.modify(|_, w| w.cen().clear_bit());
            tim.psc.write(|w| w.psc().bits(COUNT_PSC));
            tim.arr.write(|w| w.arr().bits(TICK_ARR));
            tim.cr1.modify(|_, w| w.arpe().set_bit());

            // Push PSC, ARR and the compare preloads to the shadow registers
            tim.egr.write(|w| w.ug().set_bit());
            tim.sr.modify(|_, w| w.uif().clear_bit());

            // The output stage writes the compare values from the update interrupt, the
            // preload set by the hal holds them until the next period starts
            tim.dier.modify(|_, w| w.uie().set_bit());
            tim.cr1.modify(|_, w| w.cen().set_bit());
        }

        let outputs = PwmOutputs::new(channels);

        debug!("Tick timer: psc {}, max duty {}", COUNT_PSC, outputs.max_duty());

        Ok(outputs)
    }
}

impl<'a> Configure<'a> for Trigger0 {
    type Params = (
        gpiob::PB0<Input<Floating>>,
        &'a mut gpiob::CRL,
        &'a mut EXTI,
        &'a mut afio::Parts,
    );
    fn configure((pin, cr, exti, afio): Self::Params) -> Result<Self, Error> {
        let mut pin = pin.into_pull_up_input(cr);
        pin.make_interrupt_source(afio);
        pin.trigger_on_edge(exti, Edge::FALLING);
        pin.enable_interrupt(exti);

        Ok(Trigger::new(pin))
    }
}

impl<'a> Configure<'a> for Trigger1 {
    type Params = (
        gpiob::PB1<Input<Floating>>,
        &'a mut gpiob::CRL,
        &'a mut EXTI,
        &'a mut afio::Parts,
    );
    fn configure((pin, cr, exti, afio): Self::Params) -> Result<Self, Error> {
        let mut pin = pin.into_pull_up_input(cr);
        pin.make_interrupt_source(afio);
        pin.trigger_on_edge(exti, Edge::FALLING);
        pin.enable_interrupt(exti);

        Ok(Trigger::new(pin))
    }
}

impl<'a> Configure<'a> for AnalogIn {
    type Params = (
        gpioa::PA0<Input<Floating>>,
        &'a mut gpioa::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        Ok(pin.into_analog(cr))
    }
}

impl<'a> Configure<'a> for AdcConverter {
    type Params = (
        AnalogIn,
        SampleAdc,
        Clocks,
        &'a mut rcc::APB2,
    );
    fn configure((pin, adc1, clocks, apb2): Self::Params) -> Result<Self, Error> {
        // Powers up and calibrates
        let adc = Adc::adc1(adc1, apb2, clocks);

        unsafe {
            let regs = &(*SampleAdc::ptr());
            // One conversion in the regular sequence
            regs.sqr1.modify(|_, w| w.l().bits(0));
            regs.sqr3.modify(|_, w| w.sq1().bits(ADC_CHANNEL));
            regs.smpr2.modify(|_, w| w.smp0().bits(ADC_SAMPLE_TIME));
            regs.cr2.modify(|_, w| w
                .cont().clear_bit()
                // Left aligned so the top 8 bits are one byte read
                .align().set_bit()
                .exttrig().set_bit()
                .extsel().bits(ADC_EXTSEL_SWSTART)
            );
            regs.cr1.modify(|_, w| w.eocie().set_bit());
        }

        Ok(AdcConverter::new(adc, pin))
    }
}

impl<'a> Configure<'a> for PulseIn0 {
    type Params = (
        gpiob::PB6<Input<Floating>>,
        &'a mut gpiob::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        // Input capture reads the pin through the timer's input stage
        Ok(pin.into_floating_input(cr))
    }
}

impl<'a> Configure<'a> for PulseIn1 {
    type Params = (
        gpiob::PB7<Input<Floating>>,
        &'a mut gpiob::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        // Input capture reads the pin through the timer's input stage
        Ok(pin.into_floating_input(cr))
    }
}

impl<'a> Configure<'a> for CaptureTimer {
    type Params = (
        PulseIn0,
        PulseIn1,
        CaptureTim,
        Clocks,
        &'a mut rcc::APB1,
    );
    fn configure((in0, in1, tim, clocks, apb1): Self::Params) -> Result<Self, Error> {
        check_timer_clock(&clocks)?;

        let tim = Timer::tim4(tim, &clocks, apb1)
            .start_count_down(COUNT_FREQ)
            .release();

        unsafe {
            tim.cr1.modify(|_, w| w.cen().clear_bit());
            tim.psc.write(|w| w.psc().bits(COUNT_PSC));
            tim.arr.write(|w| w.arr().bits(CAPTURE_ARR));
            tim.ccmr1_input().modify(|_, w| w
                .cc1s().ti1()
                .ic1f().bits(CAPTURE_FILTER)
                .cc2s().ti2()
                .ic2f().bits(CAPTURE_FILTER)
            );
            // Polarity is set per channel by the receiver before interrupts are enabled
            tim.ccer.modify(|_, w| w
                .cc1e().set_bit()
                .cc2e().set_bit()
            );
            tim.egr.write(|w| w.ug().set_bit());
            // Status flags are rc_w0
            tim.sr.write(|w| w.bits(0));

            tim.dier.modify(|_, w| w
                .cc1ie().set_bit()
                .cc2ie().set_bit()
            );
            tim.cr1.modify(|_, w| w.cen().set_bit());
        }

        debug!("Capture timer: psc {}, arr {}", COUNT_PSC, CAPTURE_ARR);

        Ok(CaptureTimer::new(tim, (in0, in1)))
    }
}
