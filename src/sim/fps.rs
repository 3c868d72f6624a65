/// Minimum time between frame-rate samples
const SAMPLE_WINDOW_MS: f64 = 1000.0;

/// Frame-rate meter sampled about once per second
#[derive(Debug, Clone, PartialEq)]
pub struct FpsCounter {
    fps: u32,
    frame_count: u32,
    last_sample_ms: f64,
}

impl FpsCounter {
    pub fn new(now_ms: f64) -> Self {
        Self {
            fps: 0,
            frame_count: 0,
            last_sample_ms: now_ms,
        }
    }

    /// Count a frame; returns the new reading when a sample is taken
    pub fn tick(&mut self, now_ms: f64) -> Option<u32> {
        self.frame_count += 1;
        let elapsed = now_ms - self.last_sample_ms;

        if elapsed >= SAMPLE_WINDOW_MS {
            self.fps = (self.frame_count as f64 * 1000.0 / elapsed).round() as u32;
            self.frame_count = 0;
            self.last_sample_ms = now_ms;
            return Some(self.fps);
        }
        None
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
