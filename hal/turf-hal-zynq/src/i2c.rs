//! PS I2C controllers via the vendor `XIicPs` driver
//!
//! Only the polled master API is used. Each [`PsI2c`] owns its driver
//! instance; nothing is stored in globals.

use turf_hal::{ControllerConfig, I2cController, I2cPlatform};

use crate::ffi::{self, XIicPs, XIicPsConfig, XST_SUCCESS};

/// Non-success `XST_*` status returned by the BSP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct XstStatus(pub i32);

fn check(status: i32) -> Result<(), XstStatus> {
    if status == XST_SUCCESS {
        Ok(())
    } else {
        Err(XstStatus(status))
    }
}

/// The Zynq PS, as a source of I2C controllers
#[derive(Debug)]
pub struct ZynqPlatform {
    _private: (),
}

impl ZynqPlatform {
    /// Access the PS I2C controllers
    ///
    /// # Safety
    ///
    /// Must be called at most once; each controller may only be driven
    /// through one [`PsI2c`].
    pub unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl I2cPlatform for ZynqPlatform {
    type Bus = PsI2c;
    type Error = XstStatus;

    fn lookup_config(&self, device_id: u16) -> Option<ControllerConfig> {
        // SAFETY: returns a pointer into the BSP's static config table or null
        let cfg = unsafe { ffi::XIicPs_LookupConfig(device_id).as_ref() }?;
        Some(ControllerConfig {
            device_id: cfg.device_id,
            base_address: cfg.base_address,
            input_clock_hz: cfg.input_clock_hz,
        })
    }

    fn init(&mut self, config: &ControllerConfig) -> Result<PsI2c, XstStatus> {
        let mut cfg = XIicPsConfig {
            device_id: config.device_id,
            base_address: config.base_address,
            input_clock_hz: config.input_clock_hz,
        };
        let mut bus = PsI2c {
            inner: XIicPs::zeroed(),
        };
        // SAFETY: `inner` is zeroed storage large enough for XIicPs; the
        // driver copies `cfg` into the instance and keeps no pointer to it
        check(unsafe {
            ffi::XIicPs_CfgInitialize(&mut bus.inner, &mut cfg, config.base_address)
        })?;
        Ok(bus)
    }
}

/// One initialized PS I2C controller
pub struct PsI2c {
    inner: XIicPs,
}

impl I2cController for PsI2c {
    type Error = XstStatus;

    fn self_test(&mut self) -> Result<(), Self::Error> {
        // SAFETY: `inner` was set up by XIicPs_CfgInitialize
        check(unsafe { ffi::XIicPs_SelfTest(&mut self.inner) })
    }

    fn set_clock_rate(&mut self, hz: u32) {
        // SAFETY: as above; a rate out of range leaves the divider unchanged
        let _ = unsafe { ffi::XIicPs_SetSClk(&mut self.inner, hz) };
    }

    fn is_busy(&mut self) -> bool {
        // SAFETY: reads the controller status register only
        unsafe { ffi::XIicPs_BusIsBusy(&mut self.inner) != 0 }
    }

    fn master_send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        // SAFETY: the driver reads `data.len()` bytes and never writes
        // through the message pointer on send
        check(unsafe {
            ffi::XIicPs_MasterSendPolled(
                &mut self.inner,
                data.as_ptr().cast_mut(),
                data.len() as i32,
                address as u16,
            )
        })
    }

    fn master_receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        // SAFETY: the driver writes at most `buf.len()` bytes
        check(unsafe {
            ffi::XIicPs_MasterRecvPolled(
                &mut self.inner,
                buf.as_mut_ptr(),
                buf.len() as i32,
                address as u16,
            )
        })
    }
}
