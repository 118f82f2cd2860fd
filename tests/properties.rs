//! Property tests for the sequencer, timing policy and controller.

mod common;

use proptest::prelude::*;

use coil_stepper::{
    Direction, Milliseconds, MotorEvent, PeriodPolicy, Profile, ProfileId, SpeedOffset, StepMode,
    StepSequencer, SystemConfig, TimingPolicy,
};

fn step_mode() -> impl Strategy<Value = StepMode> {
    prop_oneof![Just(StepMode::Full), Just(StepMode::Half)]
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Clockwise), Just(Direction::CounterClockwise)]
}

fn event() -> impl Strategy<Value = MotorEvent> {
    prop_oneof![
        Just(MotorEvent::Tick),
        direction().prop_map(MotorEvent::SetDirection),
        Just(MotorEvent::ToggleDirection),
        step_mode().prop_map(MotorEvent::SetStepMode),
        Just(MotorEvent::ToggleStepMode),
        (-5i16..=5).prop_map(MotorEvent::AdjustSpeed),
        (0u8..2).prop_map(|i| MotorEvent::SetProfile(ProfileId(i))),
        Just(MotorEvent::NextProfile),
    ]
}

proptest! {
    #[test]
    fn full_cycle_returns_to_start(mode in step_mode(), dir in direction(), start in 0u8..8) {
        let mut seq = StepSequencer::at(mode, start);
        let origin = seq.index();

        for _ in 0..mode.step_count() {
            seq.advance(dir);
        }

        prop_assert_eq!(seq.index(), origin);
    }

    #[test]
    fn opposite_runs_cancel(mode in step_mode(), dir in direction(), start in 0u8..8, n in 0usize..50) {
        let mut seq = StepSequencer::at(mode, start);
        let origin = seq.index();

        for _ in 0..n {
            seq.advance(dir);
        }
        for _ in 0..n {
            seq.advance(dir.reversed());
        }

        prop_assert_eq!(seq.index(), origin);
    }

    #[test]
    fn index_stays_in_range(mode in step_mode(), start in 0u8..8, moves in prop::collection::vec(direction(), 0..64)) {
        let mut seq = StepSequencer::at(mode, start);
        for dir in moves {
            seq.advance(dir);
            prop_assert!(seq.index() < seq.step_count());
        }
    }

    #[test]
    fn mode_switch_lands_in_range(from in step_mode(), to in step_mode(), start in 0u8..8) {
        let mut seq = StepSequencer::at(from, start);
        seq.set_mode(to);

        prop_assert_eq!(seq.step_count(), to.step_count());
        prop_assert!(seq.index() < to.step_count());
    }

    #[test]
    fn faster_presses_shorten_period(mode in step_mode(), b in any::<bool>(), presses in 0i16..18) {
        let timing = TimingPolicy::default();
        let profile = if b { Profile::reference_b() } else { Profile::reference_a() };

        let offset = timing.adjusted_offset(SpeedOffset::ZERO, presses);
        let faster = timing.adjusted_offset(offset, 1);
        let slower = timing.adjusted_offset(offset, -1);

        let period = timing.active_period(&profile, mode, offset).unwrap();
        let slower_period = timing.active_period(&profile, mode, slower).unwrap();
        prop_assert!(slower_period > period);

        // 18 presses keep even the shortest base period (375 ms) positive
        let faster_period = timing.active_period(&profile, mode, faster).unwrap();
        prop_assert!(faster_period < period);
    }

    #[test]
    fn clamped_period_never_below_minimum(mode in step_mode(), presses in -50i16..200, min in 1u32..100) {
        let timing = TimingPolicy::new(Milliseconds(20), Milliseconds(min), PeriodPolicy::Clamp);
        let offset = timing.adjusted_offset(SpeedOffset::ZERO, presses);

        let period = timing.active_period(&Profile::reference_a(), mode, offset).unwrap();
        prop_assert!(period >= Milliseconds(min));
    }

    #[test]
    fn controller_stays_consistent(events in prop::collection::vec(event(), 0..64)) {
        let mut motor = common::motor(SystemConfig::default());

        for event in events {
            // Rejected period changes are expected; they must leave state intact.
            let before = *motor.state();
            let period = motor.period();
            if motor.handle(event).is_err() {
                prop_assert_eq!(*motor.state(), before);
                prop_assert_eq!(motor.period(), period);
            }

            prop_assert!(motor.index() < motor.state().step_count());
            prop_assert!(motor.period() >= Milliseconds(1));
            if motor.is_running() {
                prop_assert_eq!(motor.timer().period, Some(motor.period()));
            }
        }
    }
}
