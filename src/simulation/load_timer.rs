//! Remaining-time estimate for grid construction

use crate::game_of_life::BuildProgress;
use std::time::Instant;

/// Estimates how long construction has left from the observed build rate
#[derive(Debug, Clone, Copy)]
pub struct LoadTimer {
    started: Instant,
}

impl LoadTimer {
    pub fn start(now: Instant) -> Self {
        Self { started: now }
    }

    /// Whole seconds left at the current rate; zero until a rate is known
    pub fn seconds_remaining(&self, progress: BuildProgress, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        if progress.done == 0 || elapsed <= 0.0 {
            return 0;
        }

        let rate = progress.done as f64 / elapsed;
        (progress.remaining() as f64 / rate).round() as u64
    }
}
