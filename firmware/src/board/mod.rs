/*
    MCU is STM32F103RCTx
    256K Flash
    48K SRAM
*/

mod constants;
pub use constants::*;

mod aliases;
pub use aliases::*;

mod output;
pub use output::*;

mod trigger;
pub use trigger::*;

mod adc;
pub use adc::*;

mod capture;
pub use capture::*;

mod clear_interrupt;

mod itm;
pub use itm::*;

mod configure;
pub use configure::*;
