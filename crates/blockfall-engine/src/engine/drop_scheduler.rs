use std::time::{Duration, Instant};

const BASE_PERIOD_MILLIS: u64 = 800;
const MIN_PERIOD_MILLIS: u64 = 120;
const PERIOD_STEP_MILLIS: u64 = 50;

/// Returns the automatic drop period for `level`: `max(120, 800 - (level - 1) * 50)` ms.
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::period_for_level;
///
/// assert_eq!(period_for_level(1), Duration::from_millis(800));
/// assert_eq!(period_for_level(5), Duration::from_millis(600));
/// assert_eq!(period_for_level(100), Duration::from_millis(120));
/// ```
#[must_use]
pub fn period_for_level(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = BASE_PERIOD_MILLIS.saturating_sub(steps.saturating_mul(PERIOD_STEP_MILLIS));
    Duration::from_millis(millis.max(MIN_PERIOD_MILLIS))
}

/// Single-deadline repeating trigger for automatic drops.
///
/// Holds at most one pending deadline. Time is passed in by the caller, so the scheduler
/// itself never reads the clock.
#[derive(Debug, Clone)]
pub struct DropScheduler {
    period: Duration,
    deadline: Option<Instant>,
}

impl Default for DropScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DropScheduler {
    /// Creates a stopped scheduler with the level 1 period.
    #[must_use]
    pub fn new() -> Self {
        Self {
            period: period_for_level(1),
            deadline: None,
        }
    }

    /// Recomputes the period for `level` and arms the next deadline at `now + period`,
    /// replacing any pending one.
    pub fn restart(&mut self, now: Instant, level: usize) {
        self.period = period_for_level(level);
        self.deadline = Some(now + self.period);
    }

    /// Re-arms with the current period.
    pub fn resume(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Reports whether a drop is due at `now`.
    ///
    /// On a trigger the next deadline is armed at `now + period`, so at most one trigger is
    /// reported per call however late the poll is.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_period_for_level() {
        assert_eq!(period_for_level(1), ms(800));
        assert_eq!(period_for_level(2), ms(750));
        assert_eq!(period_for_level(14), ms(150));
        assert_eq!(period_for_level(15), ms(120));
        assert_eq!(period_for_level(16), ms(120));
        assert_eq!(period_for_level(usize::MAX), ms(120));
        // Level 0 never occurs; it is treated like level 1.
        assert_eq!(period_for_level(0), ms(800));
    }

    #[test]
    fn test_new_is_stopped() {
        let mut scheduler = DropScheduler::new();
        assert!(!scheduler.is_running());
        assert!(!scheduler.poll(Instant::now() + ms(10_000)));
    }

    #[test]
    fn test_poll_fires_at_deadline() {
        let t0 = Instant::now();
        let mut scheduler = DropScheduler::new();
        scheduler.restart(t0, 1);
        assert_eq!(scheduler.next_deadline(), Some(t0 + ms(800)));

        assert!(!scheduler.poll(t0 + ms(799)));
        assert!(scheduler.poll(t0 + ms(800)));
        assert_eq!(scheduler.next_deadline(), Some(t0 + ms(1600)));
    }

    #[test]
    fn test_no_catch_up_after_stall() {
        let t0 = Instant::now();
        let mut scheduler = DropScheduler::new();
        scheduler.restart(t0, 1);

        let late = t0 + ms(5000);
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.next_deadline(), Some(late + ms(800)));
    }

    #[test]
    fn test_restart_replaces_deadline() {
        let t0 = Instant::now();
        let mut scheduler = DropScheduler::new();
        scheduler.restart(t0, 1);
        scheduler.restart(t0 + ms(100), 3);
        assert_eq!(scheduler.period(), ms(700));
        assert_eq!(scheduler.next_deadline(), Some(t0 + ms(800)));

        scheduler.restart(t0 + ms(100), 3);
        assert_eq!(scheduler.next_deadline(), Some(t0 + ms(800)));
    }

    #[test]
    fn test_stop_and_resume_keep_period() {
        let t0 = Instant::now();
        let mut scheduler = DropScheduler::new();
        scheduler.restart(t0, 4);
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!scheduler.poll(t0 + ms(10_000)));

        let t1 = t0 + ms(10_000);
        scheduler.resume(t1);
        assert_eq!(scheduler.period(), ms(650));
        assert_eq!(scheduler.next_deadline(), Some(t1 + ms(650)));
    }
}
