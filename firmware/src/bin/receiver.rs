#![no_std]
#![no_main]

use cortex_m::asm;

use core::{
    panic::PanicInfo,
    sync::atomic::{self, Ordering},
};
use cortex_m::{
    interrupt,
    peripheral::Peripherals as CorePeripherals,
};

#[cfg(feature = "itm")]
use cortex_m::{iprintln, peripheral::ITM};

use itm_logger::*;

use pwm_relay::{
    priority::Source,
    Channel,
    OutputStage,
    Processor,
    Receiver,
    SignalProcessor,
};
use pwm_relay_firmware::board::*;

use stm32f1xx_hal::{
    prelude::*,
    rcc::Clocks,
    pac::Peripherals as DevicePeripherals,
};

/// Shared by every handler below, see `pwm_relay::processor` for who writes what
static PROCESSOR: Processor = Processor::new();

// The literal priorities on the tasks below have to follow the relay's table
const _: () = assert!(Source::TimingTick.priority() == 2);
const _: () = assert!(Source::Capture(Channel::Zero).priority() == 1);
const _: () = assert!(Source::Capture(Channel::One).priority() == 1);

#[rtfm::app(device = stm32f1xx_hal::pac, peripherals = true)]
const APP: () = {
    struct Resources {
        outputs: PwmOutputs,
        capture_timer: CaptureTimer,
        receiver: Receiver,

        #[init(OutputStage::new())]
        output_stage: OutputStage,
    }

    #[init]
    fn init(cx: init::Context) -> init::LateResources {
        configure(cx.device, cx.core)
            .unwrap_or_else(|e| panic!("Configuration failed: {}", e))
    }

    #[idle]
    fn idle(_cx: idle::Context) -> ! {
        loop {
            asm::wfi();
        }
    }

    /// TIM3 update, the timing tick. Applies the committed duties or zero
    #[task(binds = TIM3, priority = 2, resources = [outputs, output_stage])]
    fn tim3(cx: tim3::Context) {
        cx.resources.output_stage.on_tick(&PROCESSOR, cx.resources.outputs);
    }

    /// TIM4, an edge was captured on one or both channels
    #[task(binds = TIM4, priority = 1, resources = [capture_timer, receiver])]
    fn tim4(cx: tim4::Context) {
        let handled = cx.resources.receiver.dispatch(cx.resources.capture_timer, &PROCESSOR);
        if handled == 0 {
            debug!("TIM4 with no capture pending");
        }
    }
};

/// This configures all peripherals. Mainly broken out to a function to allow the use of `?`
fn configure(device: DevicePeripherals, _core: CorePeripherals) -> Result<init::LateResources, Error> {
    // Nothing may touch the processor until it has been reset, the tasks above only
    // start running once init returns
    PROCESSOR.reset();

    let mut rcc = device.RCC.constrain();
    let mut flash = device.FLASH.constrain();
    let mut gpioa = device.GPIOA.split(&mut rcc.apb2);
    let mut afio = device.AFIO.constrain(&mut rcc.apb2);
    let mut gpiob = device.GPIOB.split(&mut rcc.apb2);

    itm_reset();

    // Configure the clock for full speed
    let clocks = Clocks::configure((rcc.cfgr, &mut flash.acr))?;

    itm_update_clocks(&clocks);

    info!("Configured max freq");

    let outputs = PwmOutputs::configure((
        PwmOut0::configure((gpioa.pa6, &mut gpioa.crl))?,
        PwmOut1::configure((gpioa.pa7, &mut gpioa.crl))?,
        device.TIM3,
        clocks,
        &mut rcc.apb1,
        &mut afio.mapr,
    ))?;

    let mut capture_timer = CaptureTimer::configure((
        PulseIn0::configure((gpiob.pb6, &mut gpiob.crl))?,
        PulseIn1::configure((gpiob.pb7, &mut gpiob.crl))?,
        device.TIM4,
        clocks,
        &mut rcc.apb1,
    ))?;

    // Both units armed for a rising edge before the capture interrupt is unmasked
    let mut receiver = Receiver::new();
    receiver.reset(&mut capture_timer);

    info!("Receiver init done");

    Ok(init::LateResources {
        outputs,
        capture_timer,
        receiver,
    })
}

#[panic_handler]
fn panic(
    #[cfg_attr(not(feature = "itm"), allow(unused_variables))]
    info: &PanicInfo
) -> ! {
    interrupt::disable();

    // Outputs first, logging can take a while
    force_outputs_off();

    #[cfg(feature = "itm")]
    {
        let itm = unsafe { &mut *ITM::ptr() };
        let stim = &mut itm.stim[0];

        iprintln!(stim, "{}", info);
    }

    loop {
        // add some side effect to prevent this from turning into a UDF instruction
        // see rust-lang/rust#28728 for details
        atomic::compiler_fence(Ordering::SeqCst)
    }
}
