//! Geometric scoring of freehand input against a reference stroke.
//!
//! A reference guidance point is *covered* when some user sample lies within
//! `tolerance` of it. A stroke is valid when the covered fraction reaches
//! `threshold`. This is a discrete one-sided Hausdorff check: order-insensitive
//! and tolerant of overshoot or extra loops, but it assumes the reference
//! points are roughly evenly spaced.

use crate::api::config::TracerConfig;
use crate::model::{Point, ReferenceStroke};

/// Outcome of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeScore {
    /// Fraction of reference points covered, in [0, 1].
    pub coverage: f32,
    /// Number of user samples that were scored.
    pub samples: usize,
    pub valid: bool,
}

impl StrokeScore {
    const REJECTED: Self = Self { coverage: 0.0, samples: 0, valid: false };
}

/// Stateless stroke validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeValidator {
    pub min_samples: usize,
    pub tolerance: f32,
    pub threshold: f32,
}

impl Default for StrokeValidator {
    fn default() -> Self {
        Self::from_config(&TracerConfig::default())
    }
}

impl StrokeValidator {
    pub fn new(min_samples: usize, tolerance: f32, threshold: f32) -> Self {
        Self { min_samples, tolerance, threshold }
    }

    pub fn from_config(config: &TracerConfig) -> Self {
        Self::new(config.min_samples, config.tolerance, config.validation_threshold)
    }

    /// Whether `user` traces `reference` well enough.
    pub fn score(&self, user: &[Point], reference: &ReferenceStroke) -> bool {
        self.evaluate(user, reference).valid
    }

    /// Full scoring with coverage detail.
    ///
    /// Fewer than `min_samples` user points always fail, whatever the reference.
    pub fn evaluate(&self, user: &[Point], reference: &ReferenceStroke) -> StrokeScore {
        let targets = &reference.guidance_points;
        if targets.is_empty() {
            log::warn!("stroke {} has no guidance points", reference.id);
            return StrokeScore::REJECTED;
        }
        if user.is_empty() || user.len() < self.min_samples {
            return StrokeScore { samples: user.len(), ..StrokeScore::REJECTED };
        }

        let coverage = coverage(user, targets, self.tolerance);
        StrokeScore {
            coverage,
            samples: user.len(),
            valid: coverage >= self.threshold,
        }
    }
}

/// Fraction of `targets` within `tolerance` of at least one of `samples`.
/// Returns 0 for empty `targets`.
pub fn coverage(samples: &[Point], targets: &[Point], tolerance: f32) -> f32 {
    if targets.is_empty() || !(tolerance >= 0.0) {
        return 0.0;
    }
    let tol_sq = tolerance * tolerance;
    let covered = targets
        .iter()
        .filter(|t| samples.iter().any(|s| s.distance_squared(**t) <= tol_sq))
        .count();
    covered as f32 / targets.len() as f32
}

/// Incremental coverage for real-time feedback during a stroke.
///
/// Each new sample marks the reference points it covers. The estimate never
/// decreases within one attempt.
#[derive(Debug, Clone, Default)]
pub struct CoverageTracker {
    targets: Vec<Point>,
    covered: Vec<bool>,
    covered_count: usize,
    tol_sq: f32,
}

impl CoverageTracker {
    pub fn new(reference: &ReferenceStroke, tolerance: f32) -> Self {
        let tolerance = if tolerance >= 0.0 { tolerance } else { 0.0 };
        Self {
            targets: reference.guidance_points.clone(),
            covered: vec![false; reference.guidance_points.len()],
            covered_count: 0,
            tol_sq: tolerance * tolerance,
        }
    }

    /// Mark the points covered by `sample`. Returns the updated estimate.
    pub fn add(&mut self, sample: Point) -> f32 {
        for (target, covered) in self.targets.iter().zip(self.covered.iter_mut()) {
            if !*covered && target.distance_squared(sample) <= self.tol_sq {
                *covered = true;
                self.covered_count += 1;
            }
        }
        self.estimate()
    }

    pub fn estimate(&self) -> f32 {
        if self.targets.is_empty() {
            0.0
        } else {
            self.covered_count as f32 / self.targets.len() as f32
        }
    }

    /// Per-point coverage flags, aligned with the reference points.
    pub fn covered(&self) -> &[bool] {
        &self.covered
    }
}
