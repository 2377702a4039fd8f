//! Frame timing: fixed-step accumulator and FPS counter

use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};

/// Longest frame gap fed to the simulation (a backgrounded tab resumes with
/// one large gap)
const MAX_FRAME_MS: f64 = 100.0;

/// Converts variable frame times into a whole number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator_ms: f64,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time and return how many ticks to run
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.accumulator_ms += dt_ms.clamp(0.0, MAX_FRAME_MS);

        let mut steps = 0;
        while self.accumulator_ms >= SIM_DT_MS && steps < MAX_SUBSTEPS {
            self.accumulator_ms -= SIM_DT_MS;
            steps += 1;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}

/// Frames per second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (ms)
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Slot after the newest is the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_reference_frame() {
        let mut step = FixedStep::new();
        let total: u32 = (0..600).map(|_| step.advance(SIM_DT_MS)).sum();
        assert!((599..=600).contains(&total));
    }

    #[test]
    fn test_slow_frames_run_several_ticks() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT_MS * 3.0 + 0.1), 3);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT_MS * 0.6), 0);
        assert_eq!(step.advance(SIM_DT_MS * 0.6), 1);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut step = FixedStep::new();
        let steps = step.advance(10_000.0);
        assert!((5..=6).contains(&steps));
        assert!(steps <= MAX_SUBSTEPS);
        // No backlog carried into the next frame
        assert!(step.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(-50.0), 0);
    }

    #[test]
    fn test_fps_at_60hz() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }

    #[test]
    fn test_fps_zero_until_window_fills() {
        let mut fps = FpsCounter::default();
        for i in 1..=30 {
            fps.record(i as f64 * 16.0);
        }
        assert_eq!(fps.fps(), 0);
    }
}
