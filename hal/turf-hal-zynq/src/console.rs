//! BSP console output
//!
//! Lines are terminated with `\n\r` as the boot console expects.

use core::ffi::c_char;
use core::fmt;

use crate::ffi;

/// Line terminator for the boot console
pub const EOL: &str = "\n\r";

/// Writer over the BSP's `outbyte`
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Console {
    /// Write one formatted line
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        // outbyte cannot fail
        let _ = fmt::Write::write_fmt(self, args);
        let _ = fmt::Write::write_str(self, EOL);
    }
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            // SAFETY: outbyte only pushes the byte into the UART FIFO
            unsafe { ffi::outbyte(b as c_char) };
        }
        Ok(())
    }
}
