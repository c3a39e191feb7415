//! Discrete-time PID controller.
//!
//! The compute pipeline, in order:
//!
//! 1. an armed cold-start override is consumed and returned verbatim;
//! 2. errors inside the deadband force output to zero and freeze all state;
//! 3. calls arriving before `sample_time_ms` has elapsed return the
//!    held-over output unchanged;
//! 4. otherwise a full P/I/D update runs: the integral accumulator is
//!    clamped at accumulation time (anti-windup), the derivative is the
//!    change in error over the elapsed interval, and the combined output
//!    is clamped to the configured bounds.
//!
//! The controller is single-threaded and non-blocking; its only external
//! dependency is the injected [`Clock`].

use log::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::PidConfig;

/// PID controller.
///
/// One instance per control loop. The caller invokes
/// [`compute`](Pid::compute) on a regular cadence at least as fast as the
/// configured sample time; the controller does not schedule itself.
pub struct Pid<C: Clock = SystemClock> {
    kp: f32,
    ki: f32,
    kd: f32,
    output_min: f32,
    output_max: f32,
    deadband: f32,
    sample_time_ms: u64,
    init_output: Option<f32>,
    integral: f32,
    last_error: f32,
    last_input: f32,
    last_compute_ms: u64,
    last_output: f32,
    clock: C,
}

impl Pid<SystemClock> {
    /// New controller with the given gains and the host system clock.
    ///
    /// Everything else defaults: unbounded output, zero deadband, zero
    /// sample time (every call effective), forward polarity, no
    /// cold-start override.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self::with_clock(kp, ki, kd, SystemClock::new())
    }

    /// New controller with every tuning field taken from `config`.
    pub fn from_config(config: &PidConfig) -> Self {
        Self::from_config_with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Pid<C> {
    /// New controller over an injected time source.
    pub fn with_clock(kp: f32, ki: f32, kd: f32, clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            kp,
            ki,
            kd,
            output_min: f32::NEG_INFINITY,
            output_max: f32::INFINITY,
            deadband: 0.0,
            sample_time_ms: 0,
            init_output: None,
            integral: 0.0,
            last_error: 0.0,
            last_input: 0.0,
            last_compute_ms: now,
            last_output: 0.0,
            clock,
        }
    }

    /// New controller from a tuning snapshot, over an injected time source.
    pub fn from_config_with_clock(config: &PidConfig, clock: C) -> Self {
        let mut pid = Self::with_clock(config.kp, config.ki, config.kd, clock);
        if config.output_min.is_some() || config.output_max.is_some() {
            pid.set_output_bounds(
                config.output_min.unwrap_or(f32::NEG_INFINITY),
                config.output_max.unwrap_or(f32::INFINITY),
            );
        }
        pid.set_deadband(config.deadband);
        pid.set_sample_time(config.sample_time_ms);
        pid.set_reverse(config.reverse);
        if let Some(value) = config.init_output {
            pid.set_init_output(value);
        }
        pid
    }

    // ── Tuning ────────────────────────────────────────────────────

    /// Replace the three gains.
    ///
    /// The integral accumulator and timing state are untouched. The new
    /// values are stored in whatever sign convention is currently active:
    /// a prior [`set_reverse`](Pid::set_reverse) is not re-applied.
    pub fn update_coeffs(&mut self, kp: f32, ki: f32, kd: f32) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
    }

    /// Flip controller polarity.
    ///
    /// Each call with `true` negates all three gains in place, so calling
    /// it twice restores the original values bit-for-bit. `false` leaves
    /// the gains untouched. There is no absolute-polarity latch.
    pub fn set_reverse(&mut self, reverse: bool) {
        if reverse {
            self.kp = -self.kp;
            self.ki = -self.ki;
            self.kd = -self.kd;
        }
    }

    /// Set the output clamp range.
    ///
    /// Applies to subsequent computations only: an out-of-range
    /// `last_output` held from before this call is not re-clamped.
    /// Inverted bounds are swapped.
    pub fn set_output_bounds(&mut self, min: f32, max: f32) {
        if min > max {
            warn!("inverted output bounds ({min} > {max}), swapping");
            self.output_min = max;
            self.output_max = min;
        } else {
            self.output_min = min;
            self.output_max = max;
        }
    }

    /// Set the absolute-error threshold below which output is forced to
    /// zero and no state update occurs.
    pub fn set_deadband(&mut self, threshold: f32) {
        self.deadband = threshold;
    }

    /// Set the minimum elapsed time between effective computations.
    /// Calls arriving sooner return the held-over output unchanged.
    pub fn set_sample_time(&mut self, ms: u64) {
        self.sample_time_ms = ms;
    }

    /// Arm a one-shot cold-start override: the next
    /// [`compute`](Pid::compute) call returns `value` directly, seeds the
    /// timing/error baseline, and disarms itself.
    pub fn set_init_output(&mut self, value: f32) {
        self.init_output = Some(value);
    }

    /// Clear accumulated state (integral, last error). Tuning, bounds and
    /// the held output are kept.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
    }

    // ── Accessors ─────────────────────────────────────────────────

    /// Proportional gain, in the currently active sign convention.
    pub fn kp(&self) -> f32 {
        self.kp
    }

    /// Integral gain, in the currently active sign convention.
    pub fn ki(&self) -> f32 {
        self.ki
    }

    /// Derivative gain, in the currently active sign convention.
    pub fn kd(&self) -> f32 {
        self.kd
    }

    /// The most recently computed (or held-over) output.
    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    /// The measured input seen by the last effective computation (or the
    /// cold-start seed).
    pub fn last_input(&self) -> f32 {
        self.last_input
    }

    // ── Core ──────────────────────────────────────────────────────

    /// Compute a new actuation command from the current setpoint and
    /// measured input.
    ///
    /// Most calls are cheap: inside the deadband the output is pinned to
    /// zero, and calls arriving faster than the sample time return the
    /// previous output. Only an effective computation mutates the
    /// integral, error and timing state.
    pub fn compute(&mut self, setpoint: f32, input: f32) -> f32 {
        if let Some(value) = self.init_output.take() {
            // Cold-start override: seed the baseline, skip P/I/D entirely.
            debug!("init output consumed: {value}");
            self.last_output = value;
            self.last_input = input;
            self.last_error = setpoint - input;
            self.last_compute_ms = self.clock.now_ms();
            return value;
        }

        let error = setpoint - input;

        // Deadband: force zero and freeze. Checked before the sample-time
        // gate, so being inside the deadband never refreshes the timestamp.
        if error.abs() < self.deadband {
            self.last_output = 0.0;
            return 0.0;
        }

        let now = self.clock.now_ms();
        let elapsed_ms = now.saturating_sub(self.last_compute_ms);
        if elapsed_ms < self.sample_time_ms {
            return self.last_output;
        }

        let dt = elapsed_ms as f32 / 1000.0;

        self.integral += error * dt;
        self.clamp_integral();

        let derivative = if dt > 0.0 {
            (error - self.last_error) / dt
        } else {
            0.0
        };

        let output = (self.kp * error + self.ki * self.integral + self.kd * derivative)
            .clamp(self.output_min, self.output_max);

        self.last_error = error;
        self.last_input = input;
        self.last_compute_ms = now;
        self.last_output = output;
        output
    }

    /// Anti-windup: keep the accumulator where `ki * integral` alone stays
    /// within the output bounds. Clamping here, rather than only at output
    /// time, avoids the unwind lag after saturation.
    fn clamp_integral(&mut self) {
        if self.ki == 0.0 {
            // Contribution is identically zero; nothing to bound.
            return;
        }
        let (lo, hi) = if self.ki > 0.0 {
            (self.output_min / self.ki, self.output_max / self.ki)
        } else {
            (self.output_max / self.ki, self.output_min / self.ki)
        };
        self.integral = self.integral.clamp(lo, hi);
    }
}
