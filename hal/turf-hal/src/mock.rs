//! Recording I2C bus for host-side tests
//!
//! [`MockBus`] logs every transaction attempt (including failed ones) and
//! answers receives from a scripted byte queue. Devices can be marked
//! absent so that everything addressed to them fails, or a single
//! transaction can be failed by its position in the log.

use heapless::{Deque, Vec};

use crate::i2c::{ControllerConfig, I2cController, I2cPlatform};

/// Maximum number of transactions a mock bus records
pub const MAX_TRANSACTIONS: usize = 64;

/// Maximum payload recorded per send
pub const MAX_SEND_LEN: usize = 4;

/// Maximum bytes queued for receives
pub const MAX_RX_QUEUE: usize = 64;

/// Byte returned when the receive queue runs dry (idle-high bus)
pub const EMPTY_RX_BYTE: u8 = 0xFF;

/// One recorded transaction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Master send of `data` to `address`
    Send {
        address: u8,
        data: Vec<u8, MAX_SEND_LEN>,
    },
    /// Master receive of `len` bytes from `address`
    Receive { address: u8, len: usize },
}

impl Transaction {
    /// Build an expected send
    pub fn send(address: u8, data: &[u8]) -> Self {
        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(data)
            .expect("send longer than MAX_SEND_LEN");
        Transaction::Send {
            address,
            data: bytes,
        }
    }

    /// Build an expected receive
    pub fn receive(address: u8, len: usize) -> Self {
        Transaction::Receive { address, len }
    }

    /// Target address of this transaction
    pub fn address(&self) -> u8 {
        match self {
            Transaction::Send { address, .. } | Transaction::Receive { address, .. } => *address,
        }
    }

    /// Payload if this is a send
    pub fn sent_bytes(&self) -> Option<&[u8]> {
        match self {
            Transaction::Send { data, .. } => Some(data.as_slice()),
            Transaction::Receive { .. } => None,
        }
    }
}

/// Error returned by mock operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Scripted, recording bus
#[derive(Debug)]
pub struct MockBus {
    base_address: u32,
    clock_rate: Option<u32>,
    self_test_fails: bool,
    /// Busy answers left before reporting idle; `u32::MAX` never idles
    busy_for: u32,
    busy_polls: u32,
    log: Vec<Transaction, MAX_TRANSACTIONS>,
    absent: Vec<u8, 8>,
    fail_at: Option<usize>,
    rx: Deque<u8, MAX_RX_QUEUE>,
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBus {
    /// Create an idle bus with no devices marked absent
    pub fn new() -> Self {
        Self::with_base(0)
    }

    /// Create a bus bound at `base_address`
    pub fn with_base(base_address: u32) -> Self {
        Self {
            base_address,
            clock_rate: None,
            self_test_fails: false,
            busy_for: 0,
            busy_polls: 0,
            log: Vec::new(),
            absent: Vec::new(),
            fail_at: None,
            rx: Deque::new(),
        }
    }

    /// Base address the bus was initialized at
    pub fn base_address(&self) -> u32 {
        self.base_address
    }

    /// Last clock rate set, if any
    pub fn clock_rate(&self) -> Option<u32> {
        self.clock_rate
    }

    /// Report busy for the next `polls` queries
    pub fn set_busy_for(&mut self, polls: u32) {
        self.busy_for = polls;
    }

    /// Report busy forever
    pub fn set_stuck(&mut self) {
        self.busy_for = u32::MAX;
    }

    /// Number of busy queries made so far
    pub fn busy_polls(&self) -> u32 {
        self.busy_polls
    }

    /// Fail every transaction addressed to `address`
    pub fn set_absent(&mut self, address: u8) {
        self.absent.push(address).expect("too many absent devices");
    }

    /// Fail the transaction attempt at position `index` in the log
    pub fn fail_transaction(&mut self, index: usize) {
        self.fail_at = Some(index);
    }

    /// Queue bytes to be returned by subsequent receives
    pub fn queue_rx(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push_back(b).expect("rx queue full");
        }
    }

    /// All transaction attempts so far, in order
    pub fn transactions(&self) -> &[Transaction] {
        self.log.as_slice()
    }

    /// Sends that carried `first` as their first byte (register address)
    pub fn sends_starting_with(&self, first: u8) -> usize {
        self.log
            .iter()
            .filter(|t| t.sent_bytes().and_then(|b| b.first()) == Some(&first))
            .count()
    }

    /// Forget recorded transactions
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn record(&mut self, transaction: Transaction) -> Result<(), MockError> {
        let index = self.log.len();
        let address = transaction.address();
        self.log
            .push(transaction)
            .expect("mock transaction log full");

        if self.fail_at == Some(index) || self.absent.contains(&address) {
            Err(MockError)
        } else {
            Ok(())
        }
    }
}

impl I2cController for MockBus {
    type Error = MockError;

    fn self_test(&mut self) -> Result<(), Self::Error> {
        if self.self_test_fails {
            Err(MockError)
        } else {
            Ok(())
        }
    }

    fn set_clock_rate(&mut self, hz: u32) {
        self.clock_rate = Some(hz);
    }

    fn is_busy(&mut self) -> bool {
        self.busy_polls += 1;
        match self.busy_for {
            0 => false,
            u32::MAX => true,
            _ => {
                self.busy_for -= 1;
                true
            }
        }
    }

    fn master_send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.record(Transaction::send(address, data))
    }

    fn master_receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.record(Transaction::receive(address, buf.len()))?;
        for byte in buf.iter_mut() {
            *byte = self.rx.pop_front().unwrap_or(EMPTY_RX_BYTE);
        }
        Ok(())
    }
}

/// Platform handing out [`MockBus`] instances
#[derive(Debug, Default)]
pub struct MockPlatform {
    configs: Vec<ControllerConfig, 4>,
    fail_init: Option<u16>,
    fail_self_test: Option<u16>,
}

impl MockPlatform {
    /// Create a platform with controllers given as `(device_id, base_address)`
    pub fn new(controllers: &[(u16, u32)]) -> Self {
        let mut configs = Vec::new();
        for &(device_id, base_address) in controllers {
            configs
                .push(ControllerConfig {
                    device_id,
                    base_address,
                    input_clock_hz: 111_111_111,
                })
                .expect("too many mock controllers");
        }
        Self {
            configs,
            fail_init: None,
            fail_self_test: None,
        }
    }

    /// Make initialization of `device_id` fail
    pub fn fail_init(&mut self, device_id: u16) {
        self.fail_init = Some(device_id);
    }

    /// Make the self-test of `device_id` fail
    pub fn fail_self_test(&mut self, device_id: u16) {
        self.fail_self_test = Some(device_id);
    }
}

impl I2cPlatform for MockPlatform {
    type Bus = MockBus;
    type Error = MockError;

    fn lookup_config(&self, device_id: u16) -> Option<ControllerConfig> {
        self.configs
            .iter()
            .find(|c| c.device_id == device_id)
            .copied()
    }

    fn init(&mut self, config: &ControllerConfig) -> Result<MockBus, MockError> {
        if self.fail_init == Some(config.device_id) {
            return Err(MockError);
        }
        let mut bus = MockBus::with_base(config.base_address);
        bus.self_test_fails = self.fail_self_test == Some(config.device_id);
        Ok(bus)
    }
}
