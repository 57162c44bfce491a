//! Power management ICs
//!
//! - DA9062: SOM PMIC, LDO rails raised and locked at bring-up

pub mod da9062;

pub use da9062::{is_locked, ldo_code, ldo_millivolts, page, Da9062, LockError};
