//! TURF Hardware Abstraction Layer
//!
//! This crate defines the polled I2C master contract that the bring-up
//! drivers are written against. Chip-specific HALs (currently the Zynq PS
//! I2C controller) implement it, and host tests implement it with the
//! recording [`mock`] bus.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  turf-firmware (bring-up binary)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  turf-core / turf-drivers               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  turf-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ turf-hal-zynq │       │  mock (tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cPlatform`] - Controller lookup and initialization
//! - [`i2c::I2cController`] - Polled master transactions on one bus
//! - [`idle::IdleWait`] - Bus-idle polling policy shared by all drivers

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod idle;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key items at crate root for convenience
pub use i2c::{
    open_bus, BusError, ControllerConfig, I2cConfig, I2cController, I2cPlatform, InitError,
};
pub use idle::IdleWait;
