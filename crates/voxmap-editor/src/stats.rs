//! Rolling frame-time statistics.

use std::collections::VecDeque;
use std::time::Duration;

/// Number of frame times kept.
pub const FRAME_SAMPLES: usize = 120;

/// Rolling window of the last [`FRAME_SAMPLES`] frame times, in milliseconds.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<f32>,
    total_frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(FRAME_SAMPLES),
            total_frames: 0,
        }
    }

    /// Records one frame's duration, evicting the oldest sample when full.
    pub fn record_frame(&mut self, dt: Duration) {
        if self.samples.len() == FRAME_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(dt.as_secs_f32() * 1000.0);
        self.total_frames += 1;
    }

    /// Mean frame time over the window, or 0 with no samples.
    pub fn average_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    /// Frames per second implied by [`average_ms`](Self::average_ms).
    pub fn fps(&self) -> f32 {
        let avg = self.average_ms();
        if avg > 0.0 { 1000.0 / avg } else { 0.0 }
    }

    /// Samples oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    /// Frames recorded since creation.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = FrameStats::new();
        assert_eq!(stats.average_ms(), 0.0);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_average_and_fps() {
        let mut stats = FrameStats::new();
        stats.record_frame(Duration::from_millis(10));
        stats.record_frame(Duration::from_millis(30));
        assert!((stats.average_ms() - 20.0).abs() < 1e-3);
        assert!((stats.fps() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_window_keeps_latest_samples() {
        let mut stats = FrameStats::new();
        for ms in 0..(FRAME_SAMPLES as u64 + 5) {
            stats.record_frame(Duration::from_millis(ms));
        }
        let samples: Vec<_> = stats.samples().collect();
        assert_eq!(samples.len(), FRAME_SAMPLES);
        assert!((samples[0] - 5.0).abs() < 1e-3);
        assert!((samples[FRAME_SAMPLES - 1] - (FRAME_SAMPLES as f32 + 4.0)).abs() < 1e-3);
        assert_eq!(stats.total_frames(), FRAME_SAMPLES as u64 + 5);
    }
}
