use std::time::{Duration, Instant};

/// Playback position of an animated image.
#[derive(Debug, Clone)]
pub struct AnimationState {
    frame: usize,
    delays: Vec<Duration>,
    running: bool,
    last_advance: Instant,
}

impl AnimationState {
    /// Starts running at frame 0. Zero delays are bumped to 1 ms.
    pub fn new(delays: Vec<Duration>, now: Instant) -> Self {
        let delays = delays
            .into_iter()
            .map(|delay| delay.max(Duration::from_millis(1)))
            .collect();
        Self {
            frame: 0,
            delays,
            running: true,
            last_advance: now,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.delays.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toggle_playback(&mut self, now: Instant) {
        self.running = !self.running;
        self.last_advance = now;
    }

    /// Advances exactly one frame and pauses.
    pub fn step(&mut self) -> usize {
        self.running = false;
        self.frame = self.next_index();
        self.frame
    }

    fn next_index(&self) -> usize {
        if self.delays.is_empty() {
            0
        } else {
            (self.frame + 1) % self.delays.len()
        }
    }

    fn current_delay(&self) -> Duration {
        self.delays.get(self.frame).copied().unwrap_or(Duration::MAX)
    }

    /// Moves forward by however many frames elapsed since the last advance.
    /// Returns whether the displayed frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running || self.delays.len() <= 1 {
            return false;
        }

        let mut elapsed = now.saturating_duration_since(self.last_advance);
        let cycle = self.delays.iter().sum::<Duration>();
        if !cycle.is_zero() && elapsed > cycle {
            // Skip whole loops after a long stall.
            elapsed = Duration::from_nanos((elapsed.as_nanos() % cycle.as_nanos()) as u64);
            self.last_advance = now - elapsed;
        }

        let start = self.frame;
        while elapsed >= self.current_delay() {
            let delay = self.current_delay();
            elapsed -= delay;
            self.last_advance += delay;
            self.frame = self.next_index();
        }
        self.frame != start
    }

    /// Time until the next frame change, for scheduling a repaint.
    pub fn until_next_frame(&self, now: Instant) -> Option<Duration> {
        if !self.running || self.delays.len() <= 1 {
            return None;
        }
        let due = self.last_advance + self.current_delay();
        Some(due.saturating_duration_since(now))
    }
}
