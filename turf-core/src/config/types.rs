//! Bring-up configuration types

use turf_drivers::pmic::da9062::reg;
use turf_drivers::pmic::ldo_millivolts;
use turf_hal::{I2cConfig, IdleWait};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::board;

/// PMIC rails raised during bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rail {
    /// LDO4, bank A
    Vldo4A,
    /// LDO1, bank A
    Vldo1A,
}

impl Rail {
    /// PMIC register holding this rail's voltage code
    pub const fn register(self) -> u16 {
        match self {
            Rail::Vldo4A => reg::VLDO4_A,
            Rail::Vldo1A => reg::VLDO1_A,
        }
    }

    /// Datasheet name
    pub const fn name(self) -> &'static str {
        match self {
            Rail::Vldo4A => "VLDO4_A",
            Rail::Vldo1A => "VLDO1_A",
        }
    }
}

/// Voltage code to program into a rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RailTarget {
    pub rail: Rail,
    /// Raw LDO code (see [`ldo_millivolts`])
    pub code: u8,
}

impl RailTarget {
    /// Target output in millivolts
    pub const fn millivolts(&self) -> u16 {
        ldo_millivolts(self.code)
    }
}

/// Oscillator positions on the TURF bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockChip {
    Clk0,
    Clk1,
}

impl ClockChip {
    /// Both oscillators, in preference order
    pub const ALL: [ClockChip; 2] = [ClockChip::Clk0, ClockChip::Clk1];

    /// 7-bit bus address
    pub const fn address(self) -> u8 {
        match self {
            ClockChip::Clk0 => board::TURF_CLK0_ADDR,
            ClockChip::Clk1 => board::TURF_CLK1_ADDR,
        }
    }

    /// Position on the board (0 or 1)
    pub const fn index(self) -> usize {
        match self {
            ClockChip::Clk0 => 0,
            ClockChip::Clk1 => 1,
        }
    }
}

/// Which oscillators get their output enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EnablePolicy {
    /// Enable both oscillators whether or not they answered the probe
    #[default]
    Both,
    /// Enable only the selected oscillator
    SelectedOnly,
}

/// One I2C controller to bring up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusSetup {
    /// Platform device ID
    pub device_id: u16,
    pub i2c: I2cConfig,
}

/// Run-time bring-up configuration
///
/// `Default` describes the deployed board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BringupConfig {
    /// SOM-local bus (PMIC)
    pub som: BusSetup,
    /// Carrier bus (oscillators)
    pub turf: BusSetup,
    /// Bus-idle policy for every transaction
    pub idle: IdleWait,
    pub enable_policy: EnablePolicy,
    /// Rails programmed when the PMIC is unlocked, in order
    pub rails: [RailTarget; 2],
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self {
            som: BusSetup {
                device_id: board::SOM_I2C_DEVICE_ID,
                i2c: I2cConfig {
                    frequency: board::SOM_I2C_SCLK_HZ,
                },
            },
            turf: BusSetup {
                device_id: board::TURF_I2C_DEVICE_ID,
                i2c: I2cConfig {
                    frequency: board::TURF_I2C_SCLK_HZ,
                },
            },
            idle: IdleWait::Forever,
            enable_policy: EnablePolicy::Both,
            rails: [
                RailTarget {
                    rail: Rail::Vldo4A,
                    code: board::VLDO4_A_CODE,
                },
                RailTarget {
                    rail: Rail::Vldo1A,
                    code: board::VLDO1_A_CODE,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rails() {
        let config = BringupConfig::default();
        assert_eq!(config.rails[0].rail.register(), 0xAC);
        assert_eq!(config.rails[0].millivolts(), 2500);
        assert_eq!(config.rails[1].rail.register(), 0xA9);
        assert_eq!(config.rails[1].millivolts(), 1800);
    }

    #[test]
    fn test_default_policy_enables_both() {
        let config = BringupConfig::default();
        assert_eq!(config.enable_policy, EnablePolicy::Both);
        assert_eq!(config.idle, IdleWait::Forever);
    }

    #[test]
    fn test_clock_addresses() {
        assert_eq!(ClockChip::Clk0.address(), 0x62);
        assert_eq!(ClockChip::Clk1.address(), 0x6A);
        assert_eq!(ClockChip::ALL[1].index(), 1);
    }
}
