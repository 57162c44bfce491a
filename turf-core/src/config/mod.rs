//! Bring-up configuration
//!
//! Compile-time board facts live in [`board`]; the knobs a caller may
//! change at run time are collected in [`BringupConfig`].

pub mod board;
pub mod types;

pub use types::{BringupConfig, BusSetup, ClockChip, EnablePolicy, Rail, RailTarget};
