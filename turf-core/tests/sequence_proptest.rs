//! Property-based tests for clock selection and fault tolerance of the
//! bring-up sequence.

use turf_core::bringup::sequencer::select_clock;
use turf_core::config::board::SOM_PMIC_ADDR;
use turf_core::{BringupConfig, BringupState, ClockChip, Sequencer, Status};
use turf_hal::mock::MockBus;
use turf_hal::IdleWait;

fn config() -> BringupConfig {
    BringupConfig {
        idle: IdleWait::Polls(16),
        ..BringupConfig::default()
    }
}

fn run(som: MockBus, turf: MockBus) -> (Vec<Status>, Sequencer<MockBus>) {
    let mut events = Vec::new();
    let mut seq = Sequencer::new(som, turf, config());
    seq.run(&mut |s: Status| events.push(s));
    (events, seq)
}

proptest::proptest! {
    /// Clock 0 wins whenever it is present; clock 1 only as fallback.
    #[test]
    fn selection_prefers_clock0(clk0: bool, clk1: bool) {
        let expected = match (clk0, clk1) {
            (true, _) => Some(ClockChip::Clk0),
            (false, true) => Some(ClockChip::Clk1),
            (false, false) => None,
        };
        assert_eq!(select_clock([clk0, clk1]), expected);
    }

    /// With the lock bit set the rail registers are never written.
    #[test]
    fn locked_control_e_blocks_rail_writes(id: u8, control_e in 0x80u8..=0xFF) {
        let mut som = MockBus::new();
        som.queue_rx(&[id, control_e]);

        let (events, seq) = run(som, MockBus::new());

        assert_eq!(seq.som().sends_starting_with(0xAC), 0);
        assert_eq!(seq.som().sends_starting_with(0xA9), 0);
        assert!(events.contains(&Status::AlreadyLocked));
    }

    /// With the lock bit clear both rails are written and the lock is set.
    #[test]
    fn unlocked_control_e_raises_and_locks(id: u8, control_e in 0u8..0x80) {
        let mut som = MockBus::new();
        som.queue_rx(&[id, control_e, 34, 20, control_e]);

        let (events, seq) = run(som, MockBus::new());

        assert!(events.contains(&Status::RaisingRails));
        let lock_write = [0x12, control_e | 0x80];
        assert!(seq
            .som()
            .transactions()
            .iter()
            .any(|t| t.address() == SOM_PMIC_ADDR && t.sent_bytes() == Some(&lock_write[..])));
    }

    /// A single failed transaction anywhere never stops the sequence.
    #[test]
    fn any_single_fault_still_reaches_done(on_som: bool, index in 0usize..32) {
        let mut som = MockBus::new();
        let mut turf = MockBus::new();
        som.queue_rx(&[0x62, 0x05, 34, 20, 0x05, 0x85]);
        if on_som {
            som.fail_transaction(index);
        } else {
            turf.fail_transaction(index);
        }

        let (events, seq) = run(som, turf);

        assert_eq!(seq.state(), BringupState::Done);
        assert_eq!(events.last(), Some(&Status::Done));
        assert_eq!(events.iter().filter(|s| **s == Status::Done).count(), 1);
    }
}
