use serde::{Deserialize, Serialize};

/// Tuning for validation, input filtering and guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Minimum freehand samples before a stroke can be judged (default: 10).
    pub min_samples: usize,
    /// Max distance for a user sample to cover a reference point (default: 50).
    pub tolerance: f32,
    /// Fraction of reference points that must be covered (default: 0.7).
    pub validation_threshold: f32,
    /// Movement a pointer sample must exceed to be recorded (default: 4).
    pub min_motion: f32,
    /// Consecutive failures before guidance is shown (default: 3).
    pub max_failures: u32,
    /// Duration of one guidance animation cycle in ms (default: 2000).
    pub guidance_duration_ms: f64,
    /// Capacity hint for per-frame event buffers (default: 32).
    pub max_events: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            min_samples: 10,
            tolerance: 50.0,
            validation_threshold: 0.7,
            min_motion: 4.0,
            max_failures: 3,
            guidance_duration_ms: 2000.0,
            max_events: 32,
        }
    }
}

impl TracerConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Clamp out-of-range values back into something usable.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.tolerance >= 0.0) {
            log::warn!("tolerance {} is invalid, using {}", self.tolerance, defaults.tolerance);
            self.tolerance = defaults.tolerance;
        }
        if !(0.0..=1.0).contains(&self.validation_threshold) {
            let clamped = if self.validation_threshold.is_nan() {
                defaults.validation_threshold
            } else {
                self.validation_threshold.clamp(0.0, 1.0)
            };
            log::warn!(
                "validation_threshold {} outside [0, 1], using {}",
                self.validation_threshold,
                clamped
            );
            self.validation_threshold = clamped;
        }
        if !(self.min_motion >= 0.0) {
            log::warn!("min_motion {} is invalid, using {}", self.min_motion, defaults.min_motion);
            self.min_motion = defaults.min_motion;
        }
        if !(self.guidance_duration_ms > 0.0) {
            log::warn!(
                "guidance_duration_ms {} is invalid, using {}",
                self.guidance_duration_ms,
                defaults.guidance_duration_ms
            );
            self.guidance_duration_ms = defaults.guidance_duration_ms;
        }
        if self.max_failures == 0 {
            log::warn!("max_failures must be at least 1");
            self.max_failures = 1;
        }
        self
    }
}
