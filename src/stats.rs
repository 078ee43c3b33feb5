// Copyright (c) 2026 rezky_nightky

use std::time::Duration;

use crate::render::RenderStats;

#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub frames: u64,
    pub drawn_frames: u64,
    pub skipped_frames: u64,
    pub runs: u64,
    pub cells: u64,
    pub bytes: u64,
    pub work_sum_s: f64,
    pub work_max_s: f64,
    pub overshoot_frames: u64,
}

impl PerfStats {
    pub fn record(&mut self, work: Duration, period: Duration, frame: RenderStats) {
        self.frames = self.frames.saturating_add(1);
        if frame.runs > 0 {
            self.drawn_frames = self.drawn_frames.saturating_add(1);
        }
        self.runs = self.runs.saturating_add(frame.runs as u64);
        self.cells = self.cells.saturating_add(frame.cells as u64);
        self.bytes = self.bytes.saturating_add(frame.bytes as u64);

        let work_s = work.as_secs_f64();
        self.work_sum_s += work_s;
        self.work_max_s = self.work_max_s.max(work_s);
        if work > period {
            self.overshoot_frames = self.overshoot_frames.saturating_add(1);
        }
    }

    pub fn record_skip(&mut self) {
        self.skipped_frames = self.skipped_frames.saturating_add(1);
    }

    pub fn print_summary(&self, elapsed: Duration, target_fps: f64) {
        let elapsed_s = elapsed.as_secs_f64().max(0.000_001);
        let frames = self.frames.max(1) as f64;

        println!("PERF STATS:");
        println!("  elapsed_s: {:.3}", elapsed_s);
        println!("  target_fps: {:.3}", target_fps);
        println!("  avg_fps: {:.3}", self.frames as f64 / elapsed_s);
        println!("  frames: {}", self.frames);
        println!(
            "  drawn_frames: {} ({:.1}%)",
            self.drawn_frames,
            self.drawn_frames as f64 / frames * 100.0
        );
        println!("  skipped_frames: {}", self.skipped_frames);
        println!("  runs: {} ({:.1}/frame)", self.runs, self.runs as f64 / frames);
        println!("  cells: {}", self.cells);
        println!(
            "  bytes: {} ({:.1}/frame)",
            self.bytes,
            self.bytes as f64 / frames
        );
        println!("  avg_work_ms: {:.3}", self.work_sum_s / frames * 1000.0);
        println!("  max_work_ms: {:.3}", self.work_max_s * 1000.0);
        println!(
            "  overshoot_frames: {} ({:.1}%)",
            self.overshoot_frames,
            self.overshoot_frames as f64 / frames * 100.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_drawn_and_overshoot_frames() {
        let mut s = PerfStats::default();
        let period = Duration::from_millis(16);
        let drawn = RenderStats {
            runs: 3,
            cells: 7,
            bytes: 90,
        };
        s.record(Duration::from_millis(2), period, drawn);
        s.record(Duration::from_millis(20), period, RenderStats::default());
        s.record_skip();

        assert_eq!(s.frames, 2);
        assert_eq!(s.drawn_frames, 1);
        assert_eq!(s.overshoot_frames, 1);
        assert_eq!(s.skipped_frames, 1);
        assert_eq!(s.runs, 3);
        assert_eq!(s.bytes, 90);
        assert!((s.work_max_s - 0.020).abs() < 1e-9);
    }
}
