//! Frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Spins until the minimum tick interval has passed since the last mark.
///
/// The wait yields to the scheduler between checks instead of sleeping, so a
/// tick never starts early and rarely starts late.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    last: Instant,
}

impl FramePacer {
    pub fn new(fps_limit: Option<u32>) -> Self {
        let interval = fps_limit
            .filter(|&fps| fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64));
        Self {
            interval,
            last: Instant::now(),
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Record now as the start of the next interval.
    pub fn mark(&mut self) {
        self.last = Instant::now();
    }

    /// Seconds since the last mark.
    pub fn elapsed(&self) -> f32 {
        self.last.elapsed().as_secs_f32()
    }

    pub fn wait(&self) {
        let Some(interval) = self.interval else {
            return;
        };
        while self.last.elapsed() < interval {
            thread::yield_now();
        }
    }
}
