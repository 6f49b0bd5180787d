use instant::Instant;

/// Time source for one scheduled frame.
pub trait Clock {
    /// Seconds since the previous frame.
    fn delta_time(&mut self) -> f32;
    /// Seconds since the clock started.
    fn elapsed_time(&self) -> f32;
}

/// Wall clock backed by `instant`, which maps to `performance.now()` on wasm.
pub struct FrameClock {
    start: Instant,
    last: Instant,
    max_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            // a backgrounded tab can stall for seconds
            max_delta: 0.25,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_delta)
    }

    fn elapsed_time(&self) -> f32 {
        self.last.duration_since(self.start).as_secs_f32()
    }
}

/// Fixed-step clock for tests and offline stepping.
#[derive(Clone, Debug)]
pub struct ManualClock {
    pub step: f32,
    elapsed: f32,
}

impl ManualClock {
    pub fn new(step: f32) -> Self {
        Self { step, elapsed: 0.0 }
    }
}

impl Clock for ManualClock {
    fn delta_time(&mut self) -> f32 {
        self.elapsed += self.step;
        self.step
    }

    fn elapsed_time(&self) -> f32 {
        self.elapsed
    }
}
