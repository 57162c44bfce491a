//! Register accessors for the TURF board's I2C peripherals
//!
//! This crate provides drivers for the two chip families touched during
//! bring-up:
//!
//! - PMIC on the SOM bus (Dialog DA9062, paged 9-bit registers)
//! - Oscillators on the TURF bus (SiTime SiT5157, 16-bit registers)
//!
//! Both drivers borrow an initialized [`turf_hal::I2cController`] and poll
//! it idle before every transaction phase.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod pmic;
