use stm32f1xx_hal::time::*;

use pwm_relay::config::{PWM_CEILING, TICK_COUNTER_BITS};

/// High speed internal oscillator clock frequency
pub const HSI: MegaHertz = MegaHertz(8);

/// High speed external crystal oscillator frequency
pub const HSE: MegaHertz = MegaHertz(8);

/// Target systclk frequency after PLL is enabled
pub const SYSCLK_FREQ: MegaHertz = MegaHertz(72);

/// Target PCLK1 frequency
pub const PCLK1_FREQ: MegaHertz = MegaHertz(36);
/// Target PCLK2 frequency
pub const PCLK2_FREQ: MegaHertz = MegaHertz(72);
/// Target ADC frequency
pub const ADC_FREQ: MegaHertz = MegaHertz(12);

/// Baud rate used for ITM communication
pub const ITM_BAUDRATE: MegaHertz = MegaHertz(2);

/// Clock into TIM3 and TIM4. APB1 runs prescaled so the timers see double PCLK1
pub const TIMER_CLOCK: MegaHertz = MegaHertz(72);

/// Counter rate of both the tick timer and the capture timer
pub const COUNT_FREQ: Hertz = Hertz(100_000);

/// Prescaler taking `TIMER_CLOCK` down to `COUNT_FREQ`
pub const COUNT_PSC: u16 = (TIMER_CLOCK.0 * 1_000_000 / COUNT_FREQ.0 - 1) as u16;

/// Tick and PWM period rate. Only seeds the hal's PWM setup, `COUNT_PSC` and `TICK_ARR`
/// replace what it derives from this
pub const TICK_FREQ: Hertz = Hertz(COUNT_FREQ.0 / PWM_CEILING as u32);

/// Auto reload of the tick timer. One PWM period is `PWM_CEILING` counts (2ms)
pub const TICK_ARR: u16 = PWM_CEILING as u16 - 1;

/// Auto reload of the capture timer, the full counter width so edge timestamps wrap
/// the way `pwm_relay` expects
pub const CAPTURE_ARR: u16 = ((1u32 << TICK_COUNTER_BITS) - 1) as u16;

/// Input capture filter, fCK_INT with N=8. Rejects glitches shorter than ~110ns
pub const CAPTURE_FILTER: u8 = 0b0011;

/// ADC input the transmitter samples (PA0)
pub const ADC_CHANNEL: u8 = 0;

/// ADC sample time, 28.5 cycles
pub const ADC_SAMPLE_TIME: u8 = 0b011;

/// EXTSEL value selecting the software start bit as the regular trigger
pub const ADC_EXTSEL_SWSTART: u8 = 0b111;

/// OCxM value that holds an output low regardless of the compare
pub const OC_MODE_FORCE_INACTIVE: u8 = 0b100;
