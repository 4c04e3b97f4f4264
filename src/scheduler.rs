use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Slot {
    Idle,
    Immediate,
    At(Instant),
}

/// One-shot tick timer that must be re-armed after every tick it fires.
///
/// At most one tick is ever pending, so ticks never overlap.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    slot: Slot,
}

impl TickScheduler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            slot: Slot::Idle,
        }
    }

    /// Arms the timer so the next poll fires right away.
    pub fn start(&mut self) {
        self.slot = Slot::Immediate;
    }

    /// Arms the timer one interval after `now`.
    pub fn schedule_next(&mut self, now: Instant) {
        self.slot = Slot::At(now + self.interval);
    }

    /// Disarms the timer; nothing fires until it is armed again.
    pub fn cancel(&mut self) {
        self.slot = Slot::Idle;
    }

    /// Returns true and disarms the timer when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.slot {
            Slot::Idle => false,
            Slot::Immediate => true,
            Slot::At(deadline) => now >= deadline,
        };

        if due {
            self.slot = Slot::Idle;
        }
        due
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.slot != Slot::Idle
    }

    /// Changes the interval used by future calls to [`Self::schedule_next`].
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickScheduler;

    #[test]
    fn idle_scheduler_never_fires() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));

        assert!(!scheduler.poll(Instant::now()));
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn start_fires_once_immediately() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));
        let now = Instant::now();

        scheduler.start();

        assert!(scheduler.poll(now));
        assert!(!scheduler.poll(now));
    }

    #[test]
    fn scheduled_tick_waits_for_interval() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));
        let now = Instant::now();

        scheduler.schedule_next(now);

        assert!(!scheduler.poll(now + Duration::from_millis(99)));
        assert!(scheduler.poll(now + Duration::from_millis(100)));
        assert!(!scheduler.poll(now + Duration::from_millis(500)));
    }

    #[test]
    fn cancel_drops_pending_tick() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(50));
        let now = Instant::now();

        scheduler.schedule_next(now);
        scheduler.cancel();

        assert!(!scheduler.poll(now + Duration::from_secs(1)));
    }
}
