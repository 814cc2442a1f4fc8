use std::time::Instant;

pub struct FrameTimer {
    last: Instant,
    pub dt: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
    }
}

/// Converts variable frame time into whole fixed ticks.
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: usize,
}

impl FixedTimestep {
    /// `max_steps` caps the ticks run for one frame; time beyond that is
    /// dropped so a long stall doesn't snowball into ever longer frames.
    pub fn new(step: f32, max_steps: usize) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Add frame time and return how many ticks are due.
    pub fn advance(&mut self, frame_dt: f32) -> usize {
        self.accumulator += frame_dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_steps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_steps && self.accumulator >= self.step {
            tracing::trace!(dropped = self.accumulator, "frame budget exceeded");
            self.accumulator %= self.step;
        }
        ticks
    }
}

/// Stop handle for the frame loop, checked once at the top of every frame.
#[derive(Debug, Default)]
pub struct FrameLoop {
    stopped: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin the next frame. Returns false once the loop has been stopped.
    pub fn next_frame(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    #[test]
    fn accumulates_partial_frames() {
        let mut ts = FixedTimestep::new(STEP, 5);
        assert_eq!(ts.advance(STEP * 0.6), 0);
        assert_eq!(ts.advance(STEP * 0.6), 1);
        assert_eq!(ts.advance(STEP * 2.0), 2);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut ts = FixedTimestep::new(STEP, 5);
        assert_eq!(ts.advance(2.0), 5);
        // The backlog was dropped, not queued.
        assert_eq!(ts.advance(0.0), 0);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(STEP, 5);
        assert_eq!(ts.advance(-1.0), 0);
        assert_eq!(ts.advance(STEP * 1.01), 1);
    }

    #[test]
    fn stopped_loop_schedules_nothing() {
        let mut frame_loop = FrameLoop::new();
        assert!(frame_loop.next_frame());
        frame_loop.stop();
        assert!(!frame_loop.next_frame());
        assert_eq!(frame_loop.frames(), 1);
    }
}
