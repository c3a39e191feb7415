//! Property tests for the controller's state-machine invariants.
//!
//! The "twin controller" pattern used below drives two controllers that
//! share one fake clock: one receives extra gated or in-deadband calls,
//! the other does not. If those calls really never mutate state, both
//! controllers must produce bit-identical outputs on every effective
//! computation.

use pidloop::{FakeClock, Pid};
use proptest::prelude::*;

fn finite_gain() -> impl Strategy<Value = f32> {
    -100.0f32..100.0f32
}

proptest! {
    /// With every call effective, the output never leaves the configured
    /// bounds, whatever the gains or inputs.
    #[test]
    fn output_always_within_bounds(
        kp in finite_gain(),
        ki in finite_gain(),
        kd in finite_gain(),
        lo in -1000.0f32..0.0f32,
        hi in 0.0f32..1000.0f32,
        steps in proptest::collection::vec(
            (-1e6f32..1e6f32, -1e6f32..1e6f32, 1u64..1000u64),
            1..50,
        ),
    ) {
        let clock = FakeClock::new();
        let mut pid = Pid::with_clock(kp, ki, kd, clock.clone());
        pid.set_output_bounds(lo, hi);

        for (setpoint, input, advance_ms) in steps {
            clock.advance(advance_ms);
            let out = pid.compute(setpoint, input);
            prop_assert!(
                (lo..=hi).contains(&out),
                "output {} escaped [{}, {}]", out, lo, hi
            );
            prop_assert!((lo..=hi).contains(&pid.last_output()));
        }
    }

    /// Reversing polarity twice restores the gains bit-for-bit.
    #[test]
    fn reverse_twice_is_identity(
        kp in finite_gain(),
        ki in finite_gain(),
        kd in finite_gain(),
    ) {
        let mut pid = Pid::new(kp, ki, kd);
        pid.set_reverse(true);
        pid.set_reverse(true);
        prop_assert_eq!(pid.kp().to_bits(), kp.to_bits());
        prop_assert_eq!(pid.ki().to_bits(), ki.to_bits());
        prop_assert_eq!(pid.kd().to_bits(), kd.to_bits());
    }

    /// Calls gated out by the sample time leave no trace: a controller
    /// that received them matches one that never saw them.
    #[test]
    fn gated_calls_leave_no_trace(
        kp in finite_gain(),
        ki in finite_gain(),
        kd in finite_gain(),
        rounds in 1usize..10,
        noise in proptest::collection::vec((-1e3f32..1e3f32, -1e3f32..1e3f32), 10),
    ) {
        let clock = FakeClock::new();
        let mut with_noise = Pid::with_clock(kp, ki, kd, clock.clone());
        let mut without = Pid::with_clock(kp, ki, kd, clock.clone());
        with_noise.set_sample_time(100);
        without.set_sample_time(100);

        for round in 0..rounds {
            // Burst of sub-sample-time calls against one controller only.
            for &(sp, iv) in &noise {
                clock.advance(1);
                let _ = with_noise.compute(sp, iv);
            }
            // Land on the next sample boundary for both.
            clock.advance(100);
            let setpoint = round as f32;
            let a = with_noise.compute(setpoint, 0.5);
            let b = without.compute(setpoint, 0.5);
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    /// Calls inside the deadband freeze the controller: integral, error
    /// and timing state are untouched.
    #[test]
    fn deadband_calls_leave_no_trace(
        kp in finite_gain(),
        ki in finite_gain(),
        kd in finite_gain(),
        in_band in proptest::collection::vec(-0.9f32..0.9f32, 1..20),
    ) {
        let clock = FakeClock::new();
        let mut with_noise = Pid::with_clock(kp, ki, kd, clock.clone());
        let mut without = Pid::with_clock(kp, ki, kd, clock.clone());
        with_noise.set_deadband(1.0);
        without.set_deadband(1.0);

        for err in in_band {
            clock.advance(7);
            // setpoint - input = err, inside the deadband
            let out = with_noise.compute(err, 0.0);
            prop_assert_eq!(out, 0.0);
        }

        clock.advance(100);
        let a = with_noise.compute(10.0, 0.0);
        let b = without.compute(10.0, 0.0);
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }
}
