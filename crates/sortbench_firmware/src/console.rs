//! UART console and logger.
//!
//! Text goes out through the UART core in slot 1. The `log` macros used by
//! the core crate are routed here by [`init`], so driver and benchmark
//! messages appear on the serial console alongside `println!` output.

use core::fmt;
use log::{LevelFilter, Log, Metadata, Record};
use sortbench_common::mmio::{S1_UART, SYS_CLK_MHZ, slot_addr};
use sortbench_core::bus::{MmioBus, RegisterBus};
use sortbench_core::sync::SpinLock;

const RD_DATA_REG: u32 = 0;
const DVSR_REG: u32 = 1;
const WR_DATA_REG: u32 = 2;

/// Set in the read-data register while the transmit FIFO is full.
const TX_FULL: u32 = 1 << 9;

const BAUD_RATE: u64 = 9600;

/// Transmit side of the UART core.
pub struct Uart {
    bus: MmioBus,
}

impl Uart {
    /// Programs the baud-rate divisor.
    pub fn set_baud_rate(&mut self, baud: u64) {
        let dvsr = SYS_CLK_MHZ * 1_000_000 / 16 / baud - 1;
        self.bus.write(DVSR_REG, dvsr as u32);
    }

    fn tx_byte(&mut self, byte: u8) {
        while self.bus.read(RD_DATA_REG) & TX_FULL != 0 {
            core::hint::spin_loop();
        }
        self.bus.write(WR_DATA_REG, byte as u32);
    }
}

impl fmt::Write for Uart {
    /// Sends `s`, expanding LF to CRLF for serial terminals.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            if c == b'\n' {
                self.tx_byte(b'\r');
            }
            self.tx_byte(c);
        }
        Ok(())
    }
}

// Safety: slot 1 of the bridge is the UART core. Outside the fault path only
// this lock touches it.
static CONSOLE: SpinLock<Uart> = SpinLock::new(Uart {
    bus: unsafe { MmioBus::new(slot_addr(S1_UART)) },
});

struct UartLogger;

impl Log for UartLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        _print(format_args!("[{}] {}\n", record.level(), record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: UartLogger = UartLogger;

/// Sets the baud rate and installs the UART as the `log` backend.
pub fn init() {
    CONSOLE.lock().set_baud_rate(BAUD_RATE);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use fmt::Write;
    let _ = CONSOLE.lock().write_fmt(args);
}

/// Prints from a panic or trap handler.
///
/// The fault may have been taken while the console lock was held, so the
/// lock is only tried. If it is busy the text goes straight to the UART
/// through a second handle and may interleave with the interrupted line.
#[doc(hidden)]
pub fn _fault_print(args: fmt::Arguments) {
    use fmt::Write;
    match CONSOLE.try_lock() {
        Some(mut uart) => {
            let _ = uart.write_fmt(args);
        }
        None => {
            // Safety: the interrupted holder never resumes, the hart halts
            // after the fault report.
            let mut uart = Uart {
                bus: unsafe { MmioBus::new(slot_addr(S1_UART)) },
            };
            let _ = uart.write_fmt(args);
        }
    }
}

/// Prints a line to the UART console.
#[macro_export]
macro_rules! println {
    ($($arg:tt)*) => ({
        $crate::console::_print(format_args!($($arg)*));
        $crate::console::_print(format_args!("\n"));
    });
}
pub use println;

/// Prints a line from a panic or trap handler without waiting on the
/// console lock.
#[macro_export]
macro_rules! fault_println {
    ($($arg:tt)*) => ({
        $crate::console::_fault_print(format_args!($($arg)*));
        $crate::console::_fault_print(format_args!("\n"));
    });
}
pub use fault_println;
