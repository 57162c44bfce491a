//! TURF board constants
//!
//! Addresses are 7-bit I2C addresses; register addresses are given in the
//! width the device uses (9-bit for the PMIC, 8-bit for the oscillators).

/// Platform device ID of the SOM-local I2C controller
pub const SOM_I2C_DEVICE_ID: u16 = 0;

/// Platform device ID of the carrier (TURF) I2C controller
pub const TURF_I2C_DEVICE_ID: u16 = 1;

/// SOM bus SCL rate (Hz)
pub const SOM_I2C_SCLK_HZ: u32 = 100_000;

/// TURF bus SCL rate (Hz)
pub const TURF_I2C_SCLK_HZ: u32 = 100_000;

/// DA9062 PMIC on the SOM bus
pub const SOM_PMIC_ADDR: u8 = 0x58;

/// First SiT5157 oscillator on the TURF bus
pub const TURF_CLK0_ADDR: u8 = 0x62;

/// Second SiT5157 oscillator on the TURF bus
pub const TURF_CLK1_ADDR: u8 = 0x6A;

/// Selected-clock address when no oscillator answered
pub const NO_CLOCK_ADDR: u8 = 0;

/// VLDO4_A code for 2.5 V
///
/// The rail may need 3.3 V on later carrier revisions.
pub const VLDO4_A_CODE: u8 = 34;

/// VLDO1_A code for 1.8 V
pub const VLDO1_A_CODE: u8 = 20;

#[cfg(test)]
mod tests {
    use super::*;
    use turf_drivers::pmic::ldo_millivolts;

    #[test]
    fn test_rail_codes_match_voltages() {
        assert_eq!(ldo_millivolts(VLDO4_A_CODE), 2500);
        assert_eq!(ldo_millivolts(VLDO1_A_CODE), 1800);
    }

    #[test]
    fn test_buses_run_standard_mode() {
        assert_eq!(SOM_I2C_SCLK_HZ, 100_000);
        assert_eq!(TURF_I2C_SCLK_HZ, 100_000);
    }
}
