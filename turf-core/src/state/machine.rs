//! Bring-up state definition

/// Bring-up states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringupState {
    /// Look up, initialize and self-test both I2C controllers
    BusesInit,
    /// Read the PMIC device ID
    PmicProbe,
    /// Read the PMIC rail lock
    LockCheck,
    /// Program the rails and set the lock (unlocked PMIC only)
    RailRaise,
    /// Probe both oscillators and pick one
    ClockProbe,
    /// Turn oscillator outputs on
    ClockEnable,
    /// Sequence finished
    Done,
}

impl BringupState {
    /// State that follows this one
    ///
    /// Transitions do not depend on the outcome of the state; `Done` is
    /// absorbing.
    pub fn next(self) -> Self {
        use BringupState::*;

        match self {
            BusesInit => PmicProbe,
            PmicProbe => LockCheck,
            LockCheck => RailRaise,
            RailRaise => ClockProbe,
            ClockProbe => ClockEnable,
            ClockEnable => Done,
            Done => Done,
        }
    }

    /// Check if bring-up has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, BringupState::Done)
    }
}
