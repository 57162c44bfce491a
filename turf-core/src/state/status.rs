//! Status events emitted during bring-up
//!
//! The sequencer reports one [`Status`] per notable step. Its `Display`
//! form is the console line; the firmware prints it as-is.

use core::fmt;

use turf_drivers::pmic::{is_locked, ldo_millivolts};
use turf_hal::BusError;

use crate::bringup::BusInitError;
use crate::config::{ClockChip, Rail};

/// One bring-up status event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Both I2C controllers initialized
    BusesReady,
    /// A controller failed to come up; bring-up stops
    BusInitFailed(BusInitError),
    /// PMIC answered its ID read
    PmicFound { id: u8 },
    /// PMIC ID read failed; rails are left alone
    PmicMissing(BusError),
    /// Current CONTROL_E value
    LockState { control_e: u8 },
    /// CONTROL_E read failed; treated as unlocked
    LockReadFailed(BusError),
    /// Rails already locked, nothing to program
    AlreadyLocked,
    /// Rails unlocked, programming them now
    RaisingRails,
    /// Programming a rail failed; its read-back still follows
    RailWriteFailed { rail: Rail, error: BusError },
    /// Rail code read back after programming
    RailVoltage { rail: Rail, code: u8 },
    /// Rail read-back failed
    RailReadFailed { rail: Rail, error: BusError },
    /// Setting the lock bit failed, in its read or its write
    LockWriteFailed(BusError),
    /// Oscillator answered the probe
    ClockFound { chip: ClockChip, value: u16 },
    /// Oscillator did not answer the probe
    ClockMissing { chip: ClockChip, error: BusError },
    /// Oscillator picked by the selection policy, if any
    ClockSelected(Option<ClockChip>),
    /// About to enable an oscillator output
    ClockEnabling(ClockChip),
    /// Enable write failed; the read-back still follows
    ClockEnableFailed { chip: ClockChip, error: BusError },
    /// CONTROL register read back after enabling
    ClockControl { chip: ClockChip, value: u16 },
    /// CONTROL read-back failed
    ClockReadFailed { chip: ClockChip, error: BusError },
    /// Sequence complete
    Done,
}

impl Status {
    /// Check if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Status::BusInitFailed(_)
                | Status::PmicMissing(_)
                | Status::LockReadFailed(_)
                | Status::RailWriteFailed { .. }
                | Status::RailReadFailed { .. }
                | Status::LockWriteFailed(_)
                | Status::ClockMissing { .. }
                | Status::ClockEnableFailed { .. }
                | Status::ClockReadFailed { .. }
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::BusesReady => f.write_str("I2C buses ready"),
            Status::BusInitFailed(error) => write!(f, "{error}, giving up"),
            Status::PmicFound { id } => {
                write!(f, "Dialog PMIC found: ID {id:x}, checking lock")
            }
            Status::PmicMissing(error) => write!(f, "Failed reading DA9062: {error}"),
            Status::LockState { control_e } => write!(
                f,
                "CONTROL_E = {control_e:x} (lock={})",
                is_locked(control_e) as u8
            ),
            Status::LockReadFailed(error) => {
                write!(f, "Failed reading CONTROL_E: {error}, assuming unlocked")
            }
            Status::AlreadyLocked => f.write_str("LOCK is already set, voltages should be OK"),
            Status::RaisingRails => f.write_str("LOCK not set, raising voltages"),
            Status::RailWriteFailed { rail, error } => {
                write!(f, "Failed writing {}: {error}", rail.name())
            }
            Status::RailVoltage { rail, code } => {
                write!(f, "{} is now: {} mV", rail.name(), ldo_millivolts(code))
            }
            Status::RailReadFailed { rail, error } => {
                write!(f, "Failed reading back {}: {error}", rail.name())
            }
            Status::LockWriteFailed(error) => write!(f, "Failed setting VLOCK: {error}"),
            Status::ClockFound { chip, value } => {
                write!(f, "Located SiT5157 #{}: read {value:x}", chip.index())
            }
            Status::ClockMissing { chip, error } => {
                write!(f, "Failed locating SiT5157 #{}: {error}", chip.index())
            }
            Status::ClockSelected(Some(chip)) => write!(
                f,
                "Using SiT5157 #{} at {:x}",
                chip.index(),
                chip.address()
            ),
            Status::ClockSelected(None) => f.write_str("No SiT5157 responded"),
            Status::ClockEnabling(chip) => write!(f, "Turning on clock at {:x}", chip.address()),
            Status::ClockEnableFailed { chip, error } => {
                write!(f, "Failed turning on clock at {:x}: {error}", chip.address())
            }
            Status::ClockControl { value, .. } => write!(f, "Register 1 now reads: {value:x}"),
            Status::ClockReadFailed { chip, error } => write!(
                f,
                "Failed reading register 1 at {:x}: {error}",
                chip.address()
            ),
            Status::Done => f.write_str("TURF startup complete"),
        }
    }
}

/// Receiver of bring-up status events
pub trait StatusSink {
    /// Handle one event
    fn status(&mut self, status: Status);
}

impl<F: FnMut(Status)> StatusSink for F {
    fn status(&mut self, status: Status) {
        self(status)
    }
}
