//! Clock generators
//!
//! - SiT5157: TURF system oscillator, two redundant parts per board

pub mod sit5157;

pub use sit5157::Sit5157;
