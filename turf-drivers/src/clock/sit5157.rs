//! SiT5157 oscillator driver (register access)
//!
//! The SiT5157 is a digitally controlled oscillator with a flat 8-bit
//! register space of 16-bit big-endian registers. Several parts can share
//! one bus, so the driver takes the chip address per call instead of
//! binding to a single device.
//!
//! # Transactions
//!
//! - Read: send `[reg]`, then receive `[high, low]`
//! - Write: send `[reg, high, low]`

use turf_hal::{BusError, I2cController, IdleWait};

/// SiT5157 register addresses
pub mod reg {
    /// Digital frequency control, low word
    pub const DCO_LSW: u8 = 0x00;
    /// Output enable and digital frequency control, high word
    pub const CONTROL: u8 = 0x01;
    /// Pull range control
    pub const PULL_RANGE: u8 = 0x02;
}

/// CONTROL: output enable
pub const CONTROL_OE: u16 = 1 << 10;

/// Accessor for SiT5157 parts on one bus
pub struct Sit5157<I2C> {
    i2c: I2C,
    idle: IdleWait,
}

impl<I2C: I2cController> Sit5157<I2C> {
    /// Create an accessor over `i2c`
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            idle: IdleWait::Forever,
        }
    }

    /// Set the bus-idle policy used before each transaction
    pub fn with_idle(mut self, idle: IdleWait) -> Self {
        self.idle = idle;
        self
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read a register from the chip at `chip`
    pub fn read(&mut self, chip: u8, reg: u8) -> Result<u16, BusError> {
        self.idle.wait(&mut self.i2c)?;
        self.i2c
            .master_send(chip, &[reg])
            .map_err(|_| BusError::Transfer)?;

        let mut buf = [0u8; 2];
        self.idle.wait(&mut self.i2c)?;
        self.i2c
            .master_receive(chip, &mut buf)
            .map_err(|_| BusError::Transfer)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Write a register on the chip at `chip`
    pub fn write(&mut self, chip: u8, reg: u8, value: u16) -> Result<(), BusError> {
        let [high, low] = value.to_be_bytes();
        self.idle.wait(&mut self.i2c)?;
        self.i2c
            .master_send(chip, &[reg, high, low])
            .map_err(|_| BusError::Transfer)
    }

    /// Check that the chip at `chip` answers, returning its pull range
    pub fn probe(&mut self, chip: u8) -> Result<u16, BusError> {
        self.read(chip, reg::PULL_RANGE)
    }

    /// Turn on the output of the chip at `chip`
    ///
    /// Writes CONTROL with only the enable bit set, clearing the upper
    /// frequency-control bits.
    pub fn enable_output(&mut self, chip: u8) -> Result<(), BusError> {
        self.write(chip, reg::CONTROL, CONTROL_OE)
    }
}
