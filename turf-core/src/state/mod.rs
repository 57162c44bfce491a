//! Bring-up state machine and status reporting
//!
//! The sequence is fixed and linear; the state only records how far
//! bring-up has progressed.

pub mod machine;
pub mod status;

pub use machine::BringupState;
pub use status::{Status, StatusSink};
