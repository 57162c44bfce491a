//! Board platform setup
//!
//! Wraps the board project's `init_platform`/`cleanup_platform` (cache
//! and console UART setup).

use crate::ffi;

/// Bring up caches and the console UART
pub fn init() {
    // SAFETY: called once from the single-threaded entry point
    unsafe { ffi::init_platform() }
}

/// Undo [`init`] before returning to the boot loader
pub fn cleanup() {
    // SAFETY: called once, after all bus traffic has finished
    unsafe { ffi::cleanup_platform() }
}
