//! Bring-up outcome

use turf_drivers::pmic::is_locked;

use crate::config::{board, ClockChip};
use crate::state::BringupState;

/// What bring-up found and did
///
/// Values are raw register contents as read back from the devices;
/// `None` means the read was skipped or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringupReport {
    /// PMIC device ID
    pub pmic_id: Option<u8>,
    /// CONTROL_E before bring-up touched it
    pub control_e: Option<u8>,
    /// Whether rails were programmed this boot
    pub rails_raised: bool,
    /// Rail codes read back after programming, in config order
    pub rail_codes: [Option<u8>; 2],
    /// CONTROL_E read back after setting the lock
    pub control_e_final: Option<u8>,
    /// Oscillators that answered the probe, by position
    pub clock_present: [bool; 2],
    /// Oscillator picked by the selection policy
    pub selected: Option<ClockChip>,
    /// Oscillator CONTROL registers read back after enabling
    pub clock_control: [Option<u16>; 2],
    /// State the sequencer finished in
    pub state: BringupState,
}

impl BringupReport {
    /// Empty report for a sequence that has not run
    pub const fn new() -> Self {
        Self {
            pmic_id: None,
            control_e: None,
            rails_raised: false,
            rail_codes: [None; 2],
            control_e_final: None,
            clock_present: [false; 2],
            selected: None,
            clock_control: [None; 2],
            state: BringupState::BusesInit,
        }
    }

    /// Address of the selected oscillator, `0` if none answered
    pub fn selected_address(&self) -> u8 {
        self.selected
            .map(ClockChip::address)
            .unwrap_or(board::NO_CLOCK_ADDR)
    }

    /// Check if the PMIC ended up with its rails locked
    pub fn pmic_locked(&self) -> bool {
        self.control_e_final
            .or(self.control_e)
            .is_some_and(is_locked)
    }
}

impl Default for BringupReport {
    fn default() -> Self {
        Self::new()
    }
}
