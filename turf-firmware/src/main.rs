//! TURF Startup
//!
//! One-shot bring-up for the TURF carrier on a Zynq-7000 SOM: raise and
//! lock the SOM PMIC's LDO rails, then turn on the carrier's system
//! oscillators. Called as `main` by the BSP startup code; returns 0
//! whatever happened on the buses.

#![no_std]
#![no_main]

use core::panic::PanicInfo;

use turf_core::{BringupConfig, Status, StatusSink};
use turf_hal_zynq::{platform, Console, ZynqPlatform};

/// Console sink that also counts failed steps
struct ConsoleSink {
    console: Console,
    failures: u32,
}

impl StatusSink for ConsoleSink {
    fn status(&mut self, status: Status) {
        if status.is_failure() {
            self.failures += 1;
        }
        self.console.line(format_args!("{status}"));
    }
}

/// Entry point called by the BSP startup code
#[no_mangle]
pub extern "C" fn main() -> i32 {
    platform::init();

    let mut console = Console;
    console.line(format_args!("TURF Startup Process"));

    // SAFETY: sole owner of the PS I2C controllers for the life of the image
    let mut zynq = unsafe { ZynqPlatform::steal() };
    let mut sink = ConsoleSink {
        console,
        failures: 0,
    };

    // A fatal bus failure has already been printed by the sink
    if let Ok(report) = turf_core::run(&mut zynq, BringupConfig::default(), &mut sink) {
        console.line(format_args!(
            "Bring-up done: {} failed step(s), clock {:x}, PMIC {}",
            sink.failures,
            report.selected_address(),
            if report.pmic_locked() { "locked" } else { "unlocked" },
        ));
    }

    platform::cleanup();
    0
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    Console.line(format_args!("panic: {info}"));
    loop {
        core::hint::spin_loop();
    }
}
