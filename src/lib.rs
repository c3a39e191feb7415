//! Discrete-time PID controller for embedded control loops.
//!
//! A periodic task samples a process variable and asks the controller for
//! a bounded actuation command. The controller owns its tuning, timing and
//! accumulated state; the caller owns the cadence:
//!
//! ```
//! use pidloop::{FakeClock, Pid};
//!
//! let clock = FakeClock::new();
//! let mut pid = Pid::with_clock(1.0, 0.0, 0.0, clock.clone());
//! pid.set_output_bounds(0.0, 100.0);
//!
//! clock.advance(10);
//! let duty = pid.compute(50.0, 30.0); // setpoint 50, measured 30
//! assert_eq!(duty, 20.0);
//! ```
//!
//! Time is injected as a [`Clock`] capability rather than read from a
//! global, so the same controller runs against the host clock, an
//! embassy-time driver (feature `embassy`), or a [`FakeClock`] in
//! deterministic tests.

#![deny(unused_must_use)]

pub mod clock;
pub mod config;
pub mod pid;

#[cfg(feature = "embassy")]
pub use clock::EmbassyClock;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::PidConfig;
pub use pid::Pid;
