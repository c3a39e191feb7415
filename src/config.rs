//! Controller tuning parameters.
//!
//! A plain-data snapshot of every tunable field on a [`Pid`](crate::Pid)
//! instance. Values are provisioned externally (NVS, RPC, CLI flags);
//! this crate never persists them itself.

use serde::{Deserialize, Serialize};

/// Complete tuning for one controller instance.
///
/// [`Pid::from_config`](crate::Pid::from_config) applies every field at
/// construction; individual setters take over from there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
    /// Lower output clamp. `None` = unbounded.
    pub output_min: Option<f32>,
    /// Upper output clamp. `None` = unbounded.
    pub output_max: Option<f32>,
    /// Absolute error below which output is forced to zero.
    pub deadband: f32,
    /// Minimum interval between effective computations (milliseconds).
    pub sample_time_ms: u64,
    /// Invert polarity (actuator/sensor sign convention reversed).
    pub reverse: bool,
    /// One-shot output returned by the first compute call (cold-start bias).
    pub init_output: Option<f32>,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            output_min: None,
            output_max: None,
            deadband: 0.0,
            sample_time_ms: 0,
            reverse: false,
            init_output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PidConfig {
        PidConfig {
            kp: 2.5,
            ki: 0.8,
            kd: 0.05,
            output_min: Some(0.0),
            output_max: Some(100.0),
            deadband: 0.5,
            sample_time_ms: 50,
            reverse: true,
            init_output: Some(30.0),
        }
    }

    #[test]
    fn default_config_is_inert() {
        let c = PidConfig::default();
        assert_eq!(c.kp, 0.0);
        assert_eq!(c.ki, 0.0);
        assert_eq!(c.kd, 0.0);
        assert!(c.output_min.is_none() && c.output_max.is_none());
        assert_eq!(c.deadband, 0.0);
        assert_eq!(c.sample_time_ms, 0);
        assert!(!c.reverse);
        assert!(c.init_output.is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let c = sample();
        let json = serde_json::to_string(&c).unwrap();
        let c2: PidConfig = serde_json::from_str(&json).unwrap();
        assert!((c.kp - c2.kp).abs() < 0.001);
        assert!((c.deadband - c2.deadband).abs() < 0.001);
        assert_eq!(c.sample_time_ms, c2.sample_time_ms);
        assert_eq!(c.reverse, c2.reverse);
        assert_eq!(c.output_max, c2.output_max);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = sample();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: PidConfig = postcard::from_bytes(&bytes).unwrap();
        assert!((c.ki - c2.ki).abs() < 0.001);
        assert_eq!(c.init_output, c2.init_output);
    }
}
