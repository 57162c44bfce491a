//! Bus-idle polling
//!
//! Every transaction phase is preceded by a spin on
//! [`I2cController::is_busy`]. On the board this spin is unbounded: a
//! stuck bus hangs bring-up. Hosted builds and tests can bound it instead.

use crate::i2c::{BusError, I2cController};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How long to wait for a busy bus to go idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IdleWait {
    /// Spin until idle, with no timeout
    #[default]
    Forever,
    /// Tolerate this many busy answers, then give up
    ///
    /// `Polls(0)` fails on the first busy answer.
    Polls(u32),
}

impl IdleWait {
    /// Spin until `bus` reports idle
    ///
    /// Returns [`BusError::IdleTimeout`] only in [`IdleWait::Polls`] mode.
    pub fn wait<B: I2cController>(self, bus: &mut B) -> Result<(), BusError> {
        match self {
            IdleWait::Forever => {
                while bus.is_busy() {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            IdleWait::Polls(limit) => {
                let mut remaining = limit;
                while bus.is_busy() {
                    if remaining == 0 {
                        return Err(BusError::IdleTimeout);
                    }
                    remaining -= 1;
                    core::hint::spin_loop();
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;

    #[test]
    fn test_idle_bus_returns_immediately() {
        let mut bus = MockBus::new();
        assert_eq!(IdleWait::Polls(1).wait(&mut bus), Ok(()));
        assert_eq!(bus.busy_polls(), 1);
    }

    #[test]
    fn test_waits_out_busy_period() {
        let mut bus = MockBus::new();
        bus.set_busy_for(3);
        assert_eq!(IdleWait::Forever.wait(&mut bus), Ok(()));
        // Three busy answers, then the idle one
        assert_eq!(bus.busy_polls(), 4);
    }

    #[test]
    fn test_bounded_wait_gives_up() {
        let mut bus = MockBus::new();
        bus.set_stuck();
        assert_eq!(IdleWait::Polls(10).wait(&mut bus), Err(BusError::IdleTimeout));
        // Ten tolerated busy answers, then the one that gives up
        assert_eq!(bus.busy_polls(), 11);
    }

    #[test]
    fn test_zero_polls_fails_on_first_busy() {
        let mut bus = MockBus::new();
        assert_eq!(IdleWait::Polls(0).wait(&mut bus), Ok(()));

        bus.set_busy_for(1);
        assert_eq!(IdleWait::Polls(0).wait(&mut bus), Err(BusError::IdleTimeout));
        assert_eq!(bus.busy_polls(), 2);
    }

    #[test]
    fn test_poll_budget_covers_exact_busy_period() {
        let mut bus = MockBus::new();
        bus.set_busy_for(1);
        assert_eq!(IdleWait::Polls(1).wait(&mut bus), Ok(()));
        assert_eq!(bus.busy_polls(), 2);

        bus.set_busy_for(2);
        assert_eq!(IdleWait::Polls(1).wait(&mut bus), Err(BusError::IdleTimeout));
    }
}
