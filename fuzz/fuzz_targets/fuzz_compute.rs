//! Fuzz target: `Pid::compute`
//!
//! Drives arbitrary (setpoint, input, elapsed-time) sequences through the
//! controller and asserts that it never panics and that every finite
//! output respects the configured bounds.
//!
//! cargo fuzz run fuzz_compute

#![no_main]

use libfuzzer_sys::fuzz_target;
use pidloop::{FakeClock, Pid};

fuzz_target!(|data: &[u8]| {
    let clock = FakeClock::new();
    let mut pid = Pid::with_clock(1.5, 0.4, 0.05, clock.clone());
    pid.set_output_bounds(-100.0, 100.0);
    pid.set_deadband(0.5);
    pid.set_sample_time(10);

    // Each 9-byte chunk is one loop iteration: two raw f32 values and a
    // clock step. NaN and infinity are deliberately allowed through.
    for chunk in data.chunks_exact(9) {
        let setpoint = f32::from_le_bytes(chunk[0..4].try_into().unwrap());
        let input = f32::from_le_bytes(chunk[4..8].try_into().unwrap());
        clock.advance(u64::from(chunk[8]));

        let out = pid.compute(setpoint, input);
        if out.is_finite() {
            assert!(
                (-100.0..=100.0).contains(&out),
                "finite output {out} escaped the clamp"
            );
        }
    }
});
