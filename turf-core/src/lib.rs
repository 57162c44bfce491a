//! Board bring-up logic for the TURF carrier
//!
//! This crate contains everything about bring-up that does not depend on
//! the specific I2C controller implementation:
//!
//! - Board constants and bring-up configuration
//! - Bring-up state machine
//! - Status events reported to the console
//! - The sequencer driving the PMIC and oscillators
//!
//! # Sequence
//!
//! ```text
//! BusesInit → PmicProbe → LockCheck → RailRaise → ClockProbe → ClockEnable → Done
//! ```
//!
//! Every state advances to the next one whatever happened in it. Failures
//! only decide which transactions a later state performs.

#![no_std]
#![deny(unsafe_code)]

pub mod bringup;
pub mod config;
pub mod state;

pub use bringup::{run, BringupError, BringupReport, BusId, BusInitError, Sequencer};
pub use config::{BringupConfig, ClockChip, EnablePolicy, Rail, RailTarget};
pub use state::{BringupState, Status, StatusSink};
