//! Raw bindings to the Xilinx standalone BSP
//!
//! Signatures follow `xiicps.h`, `xil_printf.h` and the board project's
//! `platform.h`. Status codes are `XST_*` values; only success is
//! distinguished.
//!
//! Struct layouts assume the classic (non-SDT) standalone BSP for the
//! Zynq-7000, where `XIicPs_Config` is `{ u16 DeviceId; u32 BaseAddress;
//! u32 InputClockHz }`. BSPs generated through the system-device-tree
//! flow replace `DeviceId` with a name pointer and add interrupt fields;
//! these bindings do not match them.

use core::ffi::c_char;

/// `XST_SUCCESS`
pub const XST_SUCCESS: i32 = 0;

/// Storage reserved for one `XIicPs` driver instance
///
/// Larger than the 32-bit `XIicPs` of the non-SDT BSP (config, buffer
/// pointers, byte counts, flags and the status callback); the driver only
/// ever sees it through a pointer.
const XIICPS_INSTANCE_SIZE: usize = 128;

/// Generated controller description (`XIicPs_Config`)
#[repr(C)]
#[derive(Debug)]
pub struct XIicPsConfig {
    pub device_id: u16,
    pub base_address: u32,
    pub input_clock_hz: u32,
}

/// Opaque `XIicPs` driver instance
#[repr(C, align(8))]
pub struct XIicPs {
    _storage: [u8; XIICPS_INSTANCE_SIZE],
}

impl XIicPs {
    /// Zeroed instance, ready for `XIicPs_CfgInitialize`
    pub const fn zeroed() -> Self {
        Self {
            _storage: [0; XIICPS_INSTANCE_SIZE],
        }
    }
}

extern "C" {
    pub fn XIicPs_LookupConfig(device_id: u16) -> *mut XIicPsConfig;
    pub fn XIicPs_CfgInitialize(
        instance: *mut XIicPs,
        config: *mut XIicPsConfig,
        effective_addr: u32,
    ) -> i32;
    pub fn XIicPs_SelfTest(instance: *mut XIicPs) -> i32;
    pub fn XIicPs_SetSClk(instance: *mut XIicPs, fscl_hz: u32) -> i32;
    pub fn XIicPs_BusIsBusy(instance: *mut XIicPs) -> i32;
    pub fn XIicPs_MasterSendPolled(
        instance: *mut XIicPs,
        msg: *mut u8,
        byte_count: i32,
        slave_addr: u16,
    ) -> i32;
    pub fn XIicPs_MasterRecvPolled(
        instance: *mut XIicPs,
        msg: *mut u8,
        byte_count: i32,
        slave_addr: u16,
    ) -> i32;

    pub fn outbyte(c: c_char);

    pub fn init_platform();
    pub fn cleanup_platform();
}
