//! DA9062 PMIC driver (register access)
//!
//! The DA9062 exposes a 9-bit register space over I2C. Only 8 address
//! bits fit in an I2C register write, so the space is split into 128-byte
//! pages selected through `PAGE_CON`:
//!
//! ```text
//!   bit   8   7   6 ... 0
//!       ┌───┬───┬─────────┐
//!       │ page  │ offset  │
//!       └───┴───┴─────────┘
//! ```
//!
//! Every access writes `PAGE_CON` first, then sends the low address byte
//! *in full* (bit 7 included, even though it duplicates the page). The
//! page is rewritten on every access; nothing is cached.

use turf_hal::{BusError, I2cController, IdleWait};

/// Default 7-bit I2C address of the DA9062
pub const DEFAULT_ADDRESS: u8 = 0x58;

/// DA9062 register addresses (9-bit)
pub mod reg {
    /// Page select (present in every page)
    pub const PAGE_CON: u8 = 0x00;
    /// Control register E, holds the rail lock bit
    pub const CONTROL_E: u16 = 0x012;
    /// LDO1 voltage, bank A
    pub const VLDO1_A: u16 = 0x0A9;
    /// LDO4 voltage, bank A
    pub const VLDO4_A: u16 = 0x0AC;
    /// Device identification
    pub const DEVICE_ID: u16 = 0x181;
}

/// CONTROL_E: rail configuration locked
pub const CONTROL_E_V_LOCK: u8 = 0x80;

/// LDO output at code 0, in millivolts
pub const LDO_BASE_MV: u16 = 800;

/// LDO output step per code, in millivolts
pub const LDO_STEP_MV: u16 = 50;

/// Page holding a 9-bit register address
pub const fn page(reg: u16) -> u8 {
    ((reg >> 7) & 0x3) as u8
}

/// Convert an LDO voltage code to millivolts
pub const fn ldo_millivolts(code: u8) -> u16 {
    code as u16 * LDO_STEP_MV + LDO_BASE_MV
}

/// Convert millivolts to the LDO code at or below that voltage
///
/// Voltages under the base clamp to code 0.
pub const fn ldo_code(millivolts: u16) -> u8 {
    let steps = millivolts.saturating_sub(LDO_BASE_MV) / LDO_STEP_MV;
    if steps > u8::MAX as u16 {
        u8::MAX
    } else {
        steps as u8
    }
}

/// Phase of [`Da9062::set_lock`] that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockError {
    /// CONTROL_E could not be read; nothing was written
    Read(BusError),
    /// The write of the new CONTROL_E value failed
    Write(BusError),
}

impl LockError {
    /// Underlying bus error
    pub fn bus_error(self) -> BusError {
        match self {
            LockError::Read(e) | LockError::Write(e) => e,
        }
    }
}

/// DA9062 register accessor
pub struct Da9062<I2C> {
    i2c: I2C,
    address: u8,
    idle: IdleWait,
}

impl<I2C: I2cController> Da9062<I2C> {
    /// Create a driver for the PMIC at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
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

    /// Write one register
    ///
    /// If the page select fails the value write is not attempted.
    pub fn write(&mut self, reg: u16, value: u8) -> Result<(), BusError> {
        self.select_page(reg)?;
        self.send(&[reg as u8, value])
    }

    /// Read one register
    pub fn read(&mut self, reg: u16) -> Result<u8, BusError> {
        self.select_page(reg)?;
        // Address phase is its own transaction, no repeated start
        self.send(&[reg as u8])?;

        let mut buf = [0u8; 1];
        self.idle.wait(&mut self.i2c)?;
        self.i2c
            .master_receive(self.address, &mut buf)
            .map_err(|_| BusError::Transfer)?;
        Ok(buf[0])
    }

    /// Read the device ID register
    pub fn device_id(&mut self) -> Result<u8, BusError> {
        self.read(reg::DEVICE_ID)
    }

    /// Set the rail lock bit, keeping the other CONTROL_E bits
    ///
    /// Returns the value written. Nothing is written if the read fails.
    pub fn set_lock(&mut self) -> Result<u8, LockError> {
        let value = self.read(reg::CONTROL_E).map_err(LockError::Read)? | CONTROL_E_V_LOCK;
        self.write(reg::CONTROL_E, value).map_err(LockError::Write)?;
        Ok(value)
    }

    fn select_page(&mut self, reg: u16) -> Result<(), BusError> {
        debug_assert!(reg <= 0x1FF, "DA9062 registers are 9-bit");
        self.send(&[reg::PAGE_CON, page(reg)])
    }

    fn send(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.idle.wait(&mut self.i2c)?;
        self.i2c
            .master_send(self.address, data)
            .map_err(|_| BusError::Transfer)
    }
}

/// Check whether CONTROL_E has the lock bit set
pub const fn is_locked(control_e: u8) -> bool {
    control_e & CONTROL_E_V_LOCK != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use turf_hal::mock::{MockBus, Transaction};

    const ADDR: u8 = DEFAULT_ADDRESS;

    #[test]
    fn test_page_mapping() {
        assert_eq!(page(reg::CONTROL_E), 0);
        assert_eq!(page(reg::VLDO4_A), 1);
        assert_eq!(page(reg::DEVICE_ID), 3);
        assert_eq!(page(0x100), 2);
    }

    #[test]
    fn test_ldo_transfer_function() {
        assert_eq!(ldo_millivolts(0), 800);
        assert_eq!(ldo_millivolts(20), 1800);
        assert_eq!(ldo_millivolts(34), 2500);
    }

    #[test]
    fn test_ldo_code_from_millivolts() {
        assert_eq!(ldo_code(2500), 34);
        assert_eq!(ldo_code(1800), 20);
        assert_eq!(ldo_code(1849), 20); // Rounds down
        assert_eq!(ldo_code(500), 0); // Below base
        assert_eq!(ldo_code(u16::MAX), u8::MAX);
    }

    #[test]
    fn test_write_selects_page_then_writes() {
        let mut bus = MockBus::new();
        let mut pmic = Da9062::new(&mut bus, ADDR);

        pmic.write(reg::VLDO4_A, 34).unwrap();

        assert_eq!(
            bus.transactions(),
            &[
                Transaction::send(ADDR, &[0x00, 0x01]),
                Transaction::send(ADDR, &[0xAC, 34]),
            ]
        );
    }

    #[test]
    fn test_read_sends_full_low_byte() {
        let mut bus = MockBus::new();
        bus.queue_rx(&[0x62]);
        let mut pmic = Da9062::new(&mut bus, ADDR);

        assert_eq!(pmic.device_id(), Ok(0x62));

        // 0x181: page 3, low byte 0x81 keeps the duplicated page bit
        assert_eq!(
            bus.transactions(),
            &[
                Transaction::send(ADDR, &[0x00, 0x03]),
                Transaction::send(ADDR, &[0x81]),
                Transaction::receive(ADDR, 1),
            ]
        );
    }

    #[test]
    fn test_page_select_failure_aborts_write() {
        let mut bus = MockBus::new();
        bus.fail_transaction(0);
        let mut pmic = Da9062::new(&mut bus, ADDR);

        assert_eq!(pmic.write(reg::VLDO1_A, 20), Err(BusError::Transfer));
        assert_eq!(bus.transactions().len(), 1);
    }

    #[test]
    fn test_page_select_failure_aborts_read() {
        let mut bus = MockBus::new();
        bus.set_absent(ADDR);
        let mut pmic = Da9062::new(&mut bus, ADDR);

        assert_eq!(pmic.read(reg::DEVICE_ID), Err(BusError::Transfer));
        assert_eq!(bus.transactions().len(), 1);
    }

    #[test]
    fn test_address_phase_failure_skips_receive() {
        let mut bus = MockBus::new();
        bus.fail_transaction(1);
        let mut pmic = Da9062::new(&mut bus, ADDR);

        assert_eq!(pmic.read(reg::CONTROL_E), Err(BusError::Transfer));
        assert_eq!(bus.transactions().len(), 2);
    }

    #[test]
    fn test_page_rewritten_on_every_access() {
        let mut bus = MockBus::new();
        let mut pmic = Da9062::new(&mut bus, ADDR);

        pmic.write(reg::VLDO4_A, 34).unwrap();
        pmic.write(reg::VLDO1_A, 20).unwrap();

        assert_eq!(bus.sends_starting_with(reg::PAGE_CON), 2);
    }

    #[test]
    fn test_set_lock_preserves_other_bits() {
        let mut bus = MockBus::new();
        bus.queue_rx(&[0x05]);
        let mut pmic = Da9062::new(&mut bus, ADDR);

        assert_eq!(pmic.set_lock(), Ok(0x85));
        assert_eq!(
            bus.transactions().last(),
            Some(&Transaction::send(ADDR, &[0x12, 0x85]))
        );
    }

    #[test]
    fn test_set_lock_read_failure_writes_nothing() {
        let mut bus = MockBus::new();
        // Address phase of the CONTROL_E read
        bus.fail_transaction(1);
        let mut pmic = Da9062::new(&mut bus, ADDR);

        assert_eq!(pmic.set_lock(), Err(LockError::Read(BusError::Transfer)));
        assert_eq!(bus.transactions().len(), 2);
        assert_eq!(bus.sends_starting_with(0x12), 1);
    }

    #[test]
    fn test_set_lock_reports_write_failure() {
        let mut bus = MockBus::new();
        bus.queue_rx(&[0x05]);
        // Data phase of the CONTROL_E write
        bus.fail_transaction(4);
        let mut pmic = Da9062::new(&mut bus, ADDR);

        let result = pmic.set_lock();
        assert_eq!(result, Err(LockError::Write(BusError::Transfer)));
        assert_eq!(result.map_err(LockError::bus_error), Err(BusError::Transfer));
        assert_eq!(
            bus.transactions().last(),
            Some(&Transaction::send(ADDR, &[0x12, 0x85]))
        );
    }

    #[test]
    fn test_is_locked() {
        assert!(is_locked(0x80));
        assert!(is_locked(0x85));
        assert!(!is_locked(0x05));
    }

    #[test]
    fn test_stuck_bus_times_out_when_bounded() {
        let mut bus = MockBus::new();
        bus.set_stuck();
        let mut pmic = Da9062::new(&mut bus, ADDR).with_idle(IdleWait::Polls(8));

        assert_eq!(pmic.read(reg::DEVICE_ID), Err(BusError::IdleTimeout));
        assert!(bus.transactions().is_empty());
    }
}
