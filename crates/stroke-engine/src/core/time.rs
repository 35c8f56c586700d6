/// Wrapping progress clock for the guidance animation.
///
/// Progress advances by `elapsed / duration` on each sample and wraps back
/// into [0, 1). The host samples it once per render frame.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    /// Length of one animation cycle in milliseconds.
    duration_ms: f64,
    /// Current progress in [0, 1).
    progress: f64,
    /// Timestamp of the previous sample (or of `start`).
    last_ms: f64,
    running: bool,
}

impl AnimationClock {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            progress: 0.0,
            last_ms: 0.0,
            running: false,
        }
    }

    /// Reset progress to zero and begin advancing from `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.progress = 0.0;
        self.last_ms = now_ms;
        self.running = true;
    }

    /// Freeze progress at its current value.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance to `now_ms` and return the progress.
    /// Time going backwards counts as no elapsed time.
    pub fn sample(&mut self, now_ms: f64) -> f32 {
        if !self.running {
            return self.progress as f32;
        }
        let elapsed = (now_ms - self.last_ms).max(0.0);
        self.last_ms = now_ms;
        if self.duration_ms > 0.0 {
            self.progress = (self.progress + elapsed / self.duration_ms).fract();
        }
        self.progress as f32
    }

    pub fn progress(&self) -> f32 {
        self.progress as f32
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Index into a sequence of `count` points for the current progress,
    /// clamped to the last index. Returns 0 for empty sequences.
    pub fn index_for(&self, count: usize) -> usize {
        progress_index(self.progress as f32, count)
    }
}

/// `floor(progress * (count - 1))`, clamped to `count - 1`.
pub fn progress_index(progress: f32, count: usize) -> usize {
    if count < 2 {
        return 0;
    }
    let last = count - 1;
    let idx = (progress.max(0.0) * last as f32) as usize;
    idx.min(last)
}
