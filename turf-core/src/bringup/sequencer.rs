//! Bring-up sequencer
//!
//! Owns both buses and walks the bring-up states in order. Each state
//! makes single-attempt register accesses, reports what happened, and
//! records it in the [`BringupReport`]. Nothing is retried and no failure
//! ends the sequence early.

use turf_drivers::clock::sit5157::{self, Sit5157};
use turf_drivers::pmic::da9062::reg as pmic_reg;
use turf_drivers::pmic::{is_locked, Da9062, LockError};
use turf_hal::I2cController;

use super::report::BringupReport;
use crate::config::{board, BringupConfig, ClockChip, EnablePolicy};
use crate::state::{BringupState, Status, StatusSink};

/// Pick the oscillator to run from
///
/// Prefers `Clk0`, falls back to `Clk1`.
pub fn select_clock(present: [bool; 2]) -> Option<ClockChip> {
    ClockChip::ALL
        .into_iter()
        .find(|chip| present[chip.index()])
}

/// Bring-up context over two initialized buses
pub struct Sequencer<B> {
    som: B,
    turf: B,
    config: BringupConfig,
    state: BringupState,
    report: BringupReport,
}

impl<B: I2cController> Sequencer<B> {
    /// Create a sequencer over already-initialized buses
    ///
    /// Bus initialization is behind us, so the sequencer starts at
    /// `PmicProbe`.
    pub fn new(som: B, turf: B, config: BringupConfig) -> Self {
        Self {
            som,
            turf,
            config,
            state: BringupState::BusesInit.next(),
            report: BringupReport::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> BringupState {
        self.state
    }

    /// SOM bus
    pub fn som(&self) -> &B {
        &self.som
    }

    /// TURF bus
    pub fn turf(&self) -> &B {
        &self.turf
    }

    /// Give the buses back as `(som, turf)`
    pub fn into_buses(self) -> (B, B) {
        (self.som, self.turf)
    }

    /// Run the remaining states to `Done`
    pub fn run<S: StatusSink + ?Sized>(&mut self, sink: &mut S) -> BringupReport {
        while !self.state.is_terminal() {
            self.step(sink);
        }
        self.report
    }

    /// Execute the current state and advance to the next one
    pub fn step<S: StatusSink + ?Sized>(&mut self, sink: &mut S) {
        match self.state {
            // Buses are handed in already open
            BringupState::BusesInit => {}
            BringupState::PmicProbe => self.probe_pmic(sink),
            BringupState::LockCheck => self.check_lock(sink),
            BringupState::RailRaise => self.raise_rails(sink),
            BringupState::ClockProbe => self.probe_clocks(sink),
            BringupState::ClockEnable => self.enable_clocks(sink),
            BringupState::Done => return,
        }

        self.state = self.state.next();
        self.report.state = self.state;
        if self.state.is_terminal() {
            sink.status(Status::Done);
        }
    }

    fn pmic(&mut self) -> Da9062<&mut B> {
        Da9062::new(&mut self.som, board::SOM_PMIC_ADDR).with_idle(self.config.idle)
    }

    fn clocks(&mut self) -> Sit5157<&mut B> {
        Sit5157::new(&mut self.turf).with_idle(self.config.idle)
    }

    fn probe_pmic<S: StatusSink + ?Sized>(&mut self, sink: &mut S) {
        let result = self.pmic().device_id();
        match result {
            Ok(id) => {
                self.report.pmic_id = Some(id);
                sink.status(Status::PmicFound { id });
            }
            Err(e) => sink.status(Status::PmicMissing(e)),
        }
    }

    fn check_lock<S: StatusSink + ?Sized>(&mut self, sink: &mut S) {
        if self.report.pmic_id.is_none() {
            return;
        }

        let result = self.pmic().read(pmic_reg::CONTROL_E);
        match result {
            Ok(control_e) => {
                self.report.control_e = Some(control_e);
                sink.status(Status::LockState { control_e });
                if is_locked(control_e) {
                    sink.status(Status::AlreadyLocked);
                }
            }
            Err(e) => sink.status(Status::LockReadFailed(e)),
        }
    }

    fn raise_rails<S: StatusSink + ?Sized>(&mut self, sink: &mut S) {
        if self.report.pmic_id.is_none() || self.report.control_e.is_some_and(is_locked) {
            return;
        }

        sink.status(Status::RaisingRails);
        self.report.rails_raised = true;

        let rails = self.config.rails;
        for (slot, target) in rails.iter().enumerate() {
            let rail = target.rail;
            let mut pmic = self.pmic();

            if let Err(error) = pmic.write(rail.register(), target.code) {
                sink.status(Status::RailWriteFailed { rail, error });
            }
            match pmic.read(rail.register()) {
                Ok(code) => {
                    self.report.rail_codes[slot] = Some(code);
                    sink.status(Status::RailVoltage { rail, code });
                }
                Err(error) => sink.status(Status::RailReadFailed { rail, error }),
            }
        }

        let mut pmic = self.pmic();
        match pmic.set_lock() {
            Ok(_) => {}
            Err(LockError::Read(e)) => {
                sink.status(Status::LockWriteFailed(e));
                return;
            }
            // Read back whatever landed
            Err(LockError::Write(e)) => sink.status(Status::LockWriteFailed(e)),
        }
        match pmic.read(pmic_reg::CONTROL_E) {
            Ok(control_e) => {
                self.report.control_e_final = Some(control_e);
                sink.status(Status::LockState { control_e });
            }
            Err(e) => sink.status(Status::LockReadFailed(e)),
        }
    }

    fn probe_clocks<S: StatusSink + ?Sized>(&mut self, sink: &mut S) {
        for chip in ClockChip::ALL {
            let result = self.clocks().probe(chip.address());
            match result {
                Ok(value) => {
                    self.report.clock_present[chip.index()] = true;
                    sink.status(Status::ClockFound { chip, value });
                }
                Err(error) => sink.status(Status::ClockMissing { chip, error }),
            }
        }

        self.report.selected = select_clock(self.report.clock_present);
        sink.status(Status::ClockSelected(self.report.selected));
    }

    fn enable_clocks<S: StatusSink + ?Sized>(&mut self, sink: &mut S) {
        let policy = self.config.enable_policy;
        let selected = self.report.selected;

        for chip in ClockChip::ALL {
            if policy == EnablePolicy::SelectedOnly && selected != Some(chip) {
                continue;
            }

            sink.status(Status::ClockEnabling(chip));
            let mut clocks = self.clocks();

            if let Err(error) = clocks.enable_output(chip.address()) {
                sink.status(Status::ClockEnableFailed { chip, error });
            }
            match clocks.read(chip.address(), sit5157::reg::CONTROL) {
                Ok(value) => {
                    self.report.clock_control[chip.index()] = Some(value);
                    sink.status(Status::ClockControl { chip, value });
                }
                Err(error) => sink.status(Status::ClockReadFailed { chip, error }),
            }
        }
    }
}
