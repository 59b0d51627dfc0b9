//! Shared utilities

use std::collections::VecDeque;
use std::time::{Duration, Instant};

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    last_report: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        let now = Instant::now();
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: now,
            last_report: now,
            sample_count: sample_count.max(1),
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, average_fps)
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        (dt, self.avg_fps())
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    fn avg_dt(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }

    pub fn avg_fps(&self) -> f32 {
        let avg_dt = self.avg_dt();
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_dt() * 1000.0
    }

    /// True at most once per `interval`; used to throttle status logging
    pub fn report_due(&mut self, interval: Duration) -> bool {
        if self.last_report.elapsed() >= interval {
            self.last_report = Instant::now();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_counter_reports_zero() {
        let counter = FpsCounter::new(10);
        assert_eq!(counter.avg_fps(), 0.0);
        assert_eq!(counter.avg_frame_time_ms(), 0.0);
    }

    #[test]
    fn test_rolling_window_average() {
        let mut counter = FpsCounter::new(2);
        counter.record(0.5);
        counter.record(0.01);
        counter.record(0.01);
        assert!((counter.avg_fps() - 100.0).abs() < 0.01);
        assert!((counter.avg_frame_time_ms() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_report_throttle() {
        let mut counter = FpsCounter::new(4);
        assert!(counter.report_due(Duration::ZERO));
        assert!(!counter.report_due(Duration::from_secs(3600)));
    }
}
