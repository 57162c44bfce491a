//! I2C bus abstractions
//!
//! Provides the polled-master contract consumed by the bring-up drivers.
//! There is no interrupt-driven mode: every transfer blocks until the
//! controller reports completion or failure.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static hardware description of one I2C controller
///
/// Returned by [`I2cPlatform::lookup_config`]; mirrors what the vendor
/// BSP generates for each controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Platform device identifier
    pub device_id: u16,
    /// Base address of the controller's register block
    pub base_address: u32,
    /// Controller input clock in Hz
    pub input_clock_hz: u32,
}

/// Platform-level access to I2C controllers
///
/// Implemented once per chip family. Creating a bus is a two-step affair
/// (look up, then initialize) so that each step can fail independently.
pub trait I2cPlatform {
    /// Initialized bus handle
    type Bus: I2cController;

    /// Error reported by [`init`](Self::init)
    type Error;

    /// Look up the hardware configuration for a controller
    ///
    /// Returns `None` if no controller with this ID exists.
    fn lookup_config(&self, device_id: u16) -> Option<ControllerConfig>;

    /// Initialize the controller described by `config`
    ///
    /// The controller is bound at `config.base_address`.
    fn init(&mut self, config: &ControllerConfig) -> Result<Self::Bus, Self::Error>;
}

/// Polled I2C bus master
///
/// One instance per initialized controller. Transfers address a 7-bit
/// target and are single attempts: no retry happens below this trait.
pub trait I2cController {
    /// Error type for controller operations
    type Error;

    /// Run the controller's register self-test
    fn self_test(&mut self) -> Result<(), Self::Error>;

    /// Set the SCL clock rate in Hz
    ///
    /// Best effort: a rate the controller cannot produce is not reported.
    fn set_clock_rate(&mut self, hz: u32);

    /// Check whether the bus is currently busy
    fn is_busy(&mut self) -> bool;

    /// Send `data` to the device at `address` in one transaction
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn master_send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Receive `buf.len()` bytes from the device at `address`
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn master_receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: I2cController + ?Sized> I2cController for &mut T {
    type Error = T::Error;

    fn self_test(&mut self) -> Result<(), Self::Error> {
        T::self_test(self)
    }

    fn set_clock_rate(&mut self, hz: u32) {
        T::set_clock_rate(self, hz)
    }

    fn is_busy(&mut self) -> bool {
        T::is_busy(self)
    }

    fn master_send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::master_send(self, address, data)
    }

    fn master_receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::master_receive(self, address, buf)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// Failure while bringing up a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// No controller with the requested device ID
    ConfigNotFound,
    /// Controller state could not be initialized
    InitFailure,
    /// Register self-test failed
    SelfTestFailure,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::ConfigNotFound => f.write_str("configuration not found"),
            InitError::InitFailure => f.write_str("initialization failed"),
            InitError::SelfTestFailure => f.write_str("self-test failed"),
        }
    }
}

/// Failure of a single bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// A send or receive was not acknowledged or did not complete
    Transfer,
    /// The bus stayed busy past the configured poll limit
    IdleTimeout,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Transfer => f.write_str("transfer failed"),
            BusError::IdleTimeout => f.write_str("bus stuck busy"),
        }
    }
}

/// Bring up one controller: look up, initialize, self-test, set the rate
///
/// Any failing step aborts with the matching [`InitError`]. The clock
/// rate is applied last and cannot fail.
pub fn open_bus<P: I2cPlatform>(
    platform: &mut P,
    device_id: u16,
    config: I2cConfig,
) -> Result<P::Bus, InitError> {
    let hw = platform
        .lookup_config(device_id)
        .ok_or(InitError::ConfigNotFound)?;
    let mut bus = platform.init(&hw).map_err(|_| InitError::InitFailure)?;
    bus.self_test().map_err(|_| InitError::SelfTestFailure)?;
    bus.set_clock_rate(config.frequency);
    Ok(bus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBus, MockPlatform};

    #[test]
    fn test_default_is_standard_mode() {
        assert_eq!(I2cConfig::default().frequency, 100_000);
        assert_eq!(I2cConfig::FAST.frequency, 400_000);
    }

    #[test]
    fn test_open_bus_applies_clock_rate() {
        let mut platform = MockPlatform::new(&[(0, 0xE000_4000)]);
        let bus: MockBus = open_bus(&mut platform, 0, I2cConfig::STANDARD).unwrap();
        assert_eq!(bus.clock_rate(), Some(100_000));
        assert_eq!(bus.base_address(), 0xE000_4000);
    }

    #[test]
    fn test_open_bus_missing_config() {
        let mut platform = MockPlatform::new(&[(0, 0xE000_4000)]);
        let result = open_bus(&mut platform, 1, I2cConfig::STANDARD);
        assert_eq!(result.err(), Some(InitError::ConfigNotFound));
    }

    #[test]
    fn test_open_bus_init_failure() {
        let mut platform = MockPlatform::new(&[(0, 0xE000_4000)]);
        platform.fail_init(0);
        let result = open_bus(&mut platform, 0, I2cConfig::STANDARD);
        assert_eq!(result.err(), Some(InitError::InitFailure));
    }

    #[test]
    fn test_open_bus_self_test_failure() {
        let mut platform = MockPlatform::new(&[(0, 0xE000_4000)]);
        platform.fail_self_test(0);
        let result = open_bus(&mut platform, 0, I2cConfig::STANDARD);
        assert_eq!(result.err(), Some(InitError::SelfTestFailure));
    }
}
