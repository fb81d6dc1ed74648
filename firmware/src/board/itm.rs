use stm32f1xx_hal::{rcc::Clocks, time::Hertz};
#[cfg(feature = "itm")]
use {
    itm_logger::{
        logger_init,
        update_tpiu_baudrate,
    },
    super::constants::ITM_BAUDRATE,
};
use super::constants::HSI;

/// Brings ITM logging up on the reset clock (HSI)
///
/// The TPIU clock scaler isn't reset with the core, so it's rewritten before anything
/// is logged. Also installs the logger behind the `log` macros used by `pwm_relay`.
pub fn itm_reset() {
    set_tpiu_clock(HSI.into());
    #[cfg(feature = "itm")]
    logger_init();
}

/// Updates the TPIU clock scaler after the sysclk has been changed
pub fn itm_update_clocks(clocks: &Clocks) {
    set_tpiu_clock(clocks.sysclk());
}

fn set_tpiu_clock(
    #[cfg_attr(not(feature = "itm"), allow(unused_variables))]
    core_clock: Hertz,
) {
    #[cfg(feature = "itm")]
    {
        let baud: Hertz = ITM_BAUDRATE.into();
        update_tpiu_baudrate(core_clock.0, baud.0).expect("Failed to set TPIU baudrate");
    }
}
