use std::time::{Duration, Instant};

/// Fixed-interval tick clock. Only fires while armed.
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker { interval, deadline: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// How long until the next tick is due, `None` while stopped.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// True when a tick is due at `now`, in which case the next one is scheduled.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let next = deadline + self.interval;
                // After a stall, don't try to catch up with a burst of ticks
                self.deadline = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(150);

    #[test]
    fn test_stopped_never_fires() {
        let mut ticker = Ticker::new(INTERVAL);
        let now = Instant::now();

        assert!(!ticker.is_running());
        assert_eq!(ticker.remaining(now), None);
        assert!(!ticker.fire(now + INTERVAL * 10));
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut ticker = Ticker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);

        assert!(!ticker.fire(start + Duration::from_millis(100)));
        assert_eq!(ticker.remaining(start + Duration::from_millis(100)), Some(Duration::from_millis(50)));

        assert!(ticker.fire(start + INTERVAL));
        assert!(!ticker.fire(start + INTERVAL));
        assert!(ticker.fire(start + INTERVAL * 2));
    }

    #[test]
    fn test_no_burst_after_stall() {
        let mut ticker = Ticker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);

        let late = start + INTERVAL * 5;
        assert!(ticker.fire(late));
        assert!(!ticker.fire(late));
        assert_eq!(ticker.remaining(late), Some(INTERVAL));
    }

    #[test]
    fn test_stop_and_restart() {
        let mut ticker = Ticker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);
        ticker.stop();
        assert!(!ticker.fire(start + INTERVAL));

        let later = start + INTERVAL * 3;
        ticker.start(later);
        assert!(ticker.is_running());
        assert_eq!(ticker.remaining(later), Some(INTERVAL));
        assert!(ticker.fire(later + INTERVAL));
    }
}
