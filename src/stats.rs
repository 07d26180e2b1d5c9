//! Frame timing statistics
//!
//! Exponential moving averages of the update, draw and level-draw times,
//! shown as percentages of a whole frame's work.

use std::time::Duration;

use crate::consts::STATS_HISTORY_WEIGHT;

/// Smoothed per-frame timings in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebugStats {
    pub update: f64,
    pub draw: f64,
    pub level_draw: f64,
    /// Samples recorded (update calls)
    pub frames: u64,
}

fn smooth(avg: f64, sample: Duration) -> f64 {
    (sample.as_secs_f64() + avg * STATS_HISTORY_WEIGHT) / (STATS_HISTORY_WEIGHT + 1.0)
}

impl DebugStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_update(&mut self, sample: Duration) {
        self.update = smooth(self.update, sample);
        self.frames += 1;
    }

    pub fn record_draw(&mut self, sample: Duration) {
        self.draw = smooth(self.draw, sample);
    }

    pub fn record_level_draw(&mut self, sample: Duration) {
        self.level_draw = smooth(self.level_draw, sample);
    }

    /// Update plus draw
    pub fn total(&self) -> f64 {
        self.update + self.draw
    }

    fn percent(&self, part: f64) -> u32 {
        let total = self.total();
        if total > 0.0 {
            (part / total * 100.0).round() as u32
        } else {
            0
        }
    }

    /// Overlay lines: level draw, total draw and update as percent of the frame
    pub fn overlay_text(&self) -> String {
        format!(
            "level draw: {}%\ntotal draw: {}%\nupdate: {}%",
            self.percent(self.level_draw),
            self.percent(self.draw),
            self.percent(self.update)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_weight() {
        let mut stats = DebugStats::new();
        stats.record_update(Duration::from_millis(20));
        assert!((stats.update - 0.001).abs() < 1e-12);
        stats.record_update(Duration::from_millis(20));
        assert!((stats.update - (0.02 + 0.001 * 19.0) / 20.0).abs() < 1e-12);
        assert_eq!(stats.frames, 2);
    }

    #[test]
    fn test_converges_to_steady_sample() {
        let mut stats = DebugStats::new();
        for _ in 0..500 {
            stats.record_draw(Duration::from_millis(4));
        }
        assert!((stats.draw - 0.004).abs() < 1e-6);
    }

    #[test]
    fn test_overlay_text() {
        assert_eq!(
            DebugStats::new().overlay_text(),
            "level draw: 0%\ntotal draw: 0%\nupdate: 0%"
        );

        let stats = DebugStats {
            update: 0.001,
            draw: 0.003,
            level_draw: 0.002,
            frames: 1,
        };
        assert_eq!(
            stats.overlay_text(),
            "level draw: 50%\ntotal draw: 75%\nupdate: 25%"
        );
    }
}
