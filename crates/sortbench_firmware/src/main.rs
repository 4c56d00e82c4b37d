#![no_std]
#![no_main]

mod console;
mod drivers;
mod trap;

use core::arch::global_asm;
use drivers::gpio::Panel;
use drivers::sseg::SsegDisplay;
use drivers::timer::TimerCore;
use sortbench_common::mmio::{S0_SYS_TIMER, S3_SW, S4_USER, S7_BTN, S8_SSEG, slot_addr};
use sortbench_core::accelerator::{DriverConfig, SortAccelerator};
use sortbench_core::bench::Benchmark;
use sortbench_core::bus::MmioBus;
use sortbench_core::controller::Controller;
use sortbench_core::input::InputPanel;

global_asm!(include_str!("entry.S"));

/// Time given to the UART and the host terminal after reset.
const BOOT_DELAY_MS: u64 = 500;

/// Entry point after `_start` has set up the stack and cleared `.bss`.
///
/// The controller holds both 8192-element arrays and lives on the boot
/// stack, which the linker script sizes for it.
#[unsafe(no_mangle)]
pub extern "C" fn kmain() -> ! {
    // Safety: each slot below is a distinct I/O core on the bridge and is
    // handed to exactly one driver.
    let (timer_bus, sw_bus, btn_bus, sseg_bus, sort_bus) = unsafe {
        (
            MmioBus::new(slot_addr(S0_SYS_TIMER)),
            MmioBus::new(slot_addr(S3_SW)),
            MmioBus::new(slot_addr(S7_BTN)),
            MmioBus::new(slot_addr(S8_SSEG)),
            MmioBus::new(slot_addr(S4_USER)),
        )
    };

    let mut timer = TimerCore::new(timer_bus);
    timer.sleep_ms(BOOT_DELAY_MS);

    console::init();
    console::println!("");
    console::println!("--- Sorting accelerator benchmark ---");
    console::println!("State: IDLE. Press BTNR or BTNL to initialize memory.");

    let mut panel = Panel::new(sw_bus, btn_bus);
    let mut display = SsegDisplay::new(sseg_bus);

    let accel = SortAccelerator::new(sort_bus, DriverConfig::default());
    let mut ctrl = Controller::new(Benchmark::new(accel, timer));
    ctrl.prime(panel.read_buttons());
    ctrl.run(&mut panel, &mut display)
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    console::fault_println!("PANIC: {}", info);
    trap::halt()
}
