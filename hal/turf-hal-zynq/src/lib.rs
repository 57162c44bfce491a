//! Zynq-7000 HAL for the TURF bring-up firmware
//!
//! This crate binds the shared `turf-hal` traits to the Xilinx standalone
//! BSP, which is linked into the firmware image:
//!
//! - PS I2C controllers through the vendor `XIicPs` polled driver
//! - Console output through the BSP's `outbyte`
//! - Platform setup and teardown (caches, UART) from the board project

#![no_std]

mod ffi;

pub mod console;
pub mod i2c;
pub mod platform;

pub use console::Console;
pub use i2c::{PsI2c, ZynqPlatform};

// Re-export shared traits from turf-hal for convenience
pub use turf_hal::{I2cController, I2cPlatform};
