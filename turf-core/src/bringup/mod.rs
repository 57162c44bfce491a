//! Bring-up sequencing
//!
//! [`run`] is the whole program: open both buses, then walk the
//! [`BringupState`](crate::state::BringupState) sequence with a
//! [`Sequencer`]. Only a bus that fails to come up stops it early.

pub mod report;
pub mod sequencer;

use core::fmt;

use turf_hal::{i2c::open_bus, I2cPlatform, InitError};

use crate::config::BringupConfig;
use crate::state::{Status, StatusSink};

pub use report::BringupReport;
pub use sequencer::Sequencer;

/// The two I2C buses on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusId {
    /// SOM-local peripherals (PMIC)
    Som,
    /// Carrier peripherals (oscillators)
    Turf,
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusId::Som => f.write_str("SOM"),
            BusId::Turf => f.write_str("TURF"),
        }
    }
}

/// A bus that failed to come up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusInitError {
    pub bus: BusId,
    pub kind: InitError,
}

impl fmt::Display for BusInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} I2C bus: {}", self.bus, self.kind)
    }
}

/// Errors that stop bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringupError {
    /// Nothing downstream can run without both buses
    Fatal(BusInitError),
}

impl From<BusInitError> for BringupError {
    fn from(e: BusInitError) -> Self {
        BringupError::Fatal(e)
    }
}

impl fmt::Display for BringupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BringupError::Fatal(e) => write!(f, "fatal: {e}"),
        }
    }
}

/// Open both buses, SOM first
///
/// A failure on the SOM bus means the TURF bus is never touched.
pub fn open_buses<P: I2cPlatform>(
    platform: &mut P,
    config: &BringupConfig,
) -> Result<(P::Bus, P::Bus), BusInitError> {
    let som = open_bus(platform, config.som.device_id, config.som.i2c).map_err(|kind| {
        BusInitError {
            bus: BusId::Som,
            kind,
        }
    })?;
    let turf = open_bus(platform, config.turf.device_id, config.turf.i2c).map_err(|kind| {
        BusInitError {
            bus: BusId::Turf,
            kind,
        }
    })?;
    Ok((som, turf))
}

/// Run the complete bring-up sequence
///
/// Returns the report once the sequence reaches `Done`. PMIC and
/// oscillator failures are reported through `sink` and never returned.
pub fn run<P, S>(
    platform: &mut P,
    config: BringupConfig,
    sink: &mut S,
) -> Result<BringupReport, BringupError>
where
    P: I2cPlatform,
    S: StatusSink + ?Sized,
{
    let (som, turf) = match open_buses(platform, &config) {
        Ok(buses) => buses,
        Err(e) => {
            sink.status(Status::BusInitFailed(e));
            return Err(e.into());
        }
    };
    sink.status(Status::BusesReady);

    let mut sequencer = Sequencer::new(som, turf, config);
    Ok(sequencer.run(sink))
}
