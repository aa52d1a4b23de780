use std::thread;
use std::time::{Duration, Instant};

/// Frame pacing and blocking waits for the game loop.
pub trait Clock {
    /// Wait out whatever is left of the current frame budget.
    fn tick(&mut self);

    /// Block for `duration`. Nothing else runs meanwhile.
    fn delay(&mut self, duration: Duration);
}

/// Wall-clock pacing with `thread::sleep`.
pub struct FrameClock {
    frame_time: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            last_tick: Instant::now(),
        }
    }

    /// Sleep needed to finish a frame that has run for `elapsed`.
    fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_time.saturating_sub(elapsed)
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) {
        let remaining = self.remaining(self.last_tick.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.last_tick = Instant::now();
    }

    fn delay(&mut self, duration: Duration) {
        thread::sleep(duration);
        // The pause is not charged to the next frame.
        self.last_tick = Instant::now();
    }
}

/// Fixed-rate stepping for callback-driven loops such as
/// `requestAnimationFrame`, where timestamps (in milliseconds) jitter
/// around the display refresh instead of arriving on a fixed period.
///
/// The schedule advances by whole steps, so a callback that lands a
/// little early still steps and the long-run rate matches `frame_time`.
#[derive(Debug, Clone)]
pub struct StepPacer {
    step_ms: f64,
    next_step: f64,
}

impl StepPacer {
    /// Callbacks this close to the next step still take it.
    const TOLERANCE_MS: f64 = 1.0;
    /// Falling further behind than this (a hidden tab) drops the backlog.
    const MAX_LAG_STEPS: f64 = 3.0;

    pub fn new(frame_time: Duration, now_ms: f64) -> Self {
        let step_ms = frame_time.as_secs_f64() * 1000.0;
        Self {
            step_ms,
            next_step: now_ms + step_ms,
        }
    }

    /// Whether a step is due at `now_ms`. Consumes that step if so.
    pub fn due(&mut self, now_ms: f64) -> bool {
        if now_ms + Self::TOLERANCE_MS < self.next_step {
            return false;
        }

        self.next_step += self.step_ms;
        if now_ms - self.next_step > self.step_ms * Self::MAX_LAG_STEPS {
            self.next_step = now_ms + self.step_ms;
        }
        true
    }

    /// Start a fresh schedule, one step after `now_ms`.
    pub fn restart(&mut self, now_ms: f64) {
        self.next_step = now_ms + self.step_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_budget() {
        let clock = FrameClock::new(Duration::from_millis(16));
        assert_eq!(clock.remaining(Duration::from_millis(10)), Duration::from_millis(6));
        assert_eq!(clock.remaining(Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn test_tick_paces_frames() {
        let mut clock = FrameClock::new(Duration::from_millis(5));
        let start = Instant::now();
        clock.tick();
        clock.tick();
        clock.tick();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    fn sixty_hz() -> Duration {
        Duration::from_nanos(1_000_000_000 / 60)
    }

    #[test]
    fn test_pacer_steps_on_every_jittered_refresh() {
        let mut pacer = StepPacer::new(sixty_hz(), 0.0);
        let mut now = 0.0;

        for i in 0..20 {
            now += if i % 2 == 0 { 16.6 } else { 16.7 };
            assert!(pacer.due(now), "callback {} at {:.1} ms skipped", i, now);
        }
    }

    #[test]
    fn test_pacer_keeps_sixty_steps_per_second() {
        let mut pacer = StepPacer::new(sixty_hz(), 0.0);
        let step = 1000.0 / 60.0;

        let steps = (1..=600)
            .map(|i| i as f64 * step + if i % 2 == 0 { 0.3 } else { -0.3 })
            .filter(|&now| pacer.due(now))
            .count();

        assert_eq!(steps, 600);
    }

    #[test]
    fn test_pacer_halves_fast_refresh() {
        let mut pacer = StepPacer::new(sixty_hz(), 0.0);
        let half = 1000.0 / 120.0;

        let steps = (1..=240).filter(|&i| pacer.due(i as f64 * half)).count();

        assert_eq!(steps, 120);
    }

    #[test]
    fn test_pacer_drops_backlog_after_stall() {
        let mut pacer = StepPacer::new(sixty_hz(), 0.0);
        assert!(pacer.due(16.7));

        // Tab hidden for five seconds: one step, not a burst of 300.
        assert!(pacer.due(5000.0));
        assert!(!pacer.due(5005.0));
        assert!(pacer.due(5016.7));
    }

    #[test]
    fn test_pacer_restart_waits_one_step() {
        let mut pacer = StepPacer::new(sixty_hz(), 0.0);
        pacer.restart(1000.0);

        assert!(!pacer.due(1005.0));
        assert!(pacer.due(1016.7));
    }
}
