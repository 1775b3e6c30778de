#![forbid(unsafe_code)]

//! Cancelable one-shot dismissal timer.
//!
//! A [`DismissTimer`] is the hover-intent grace period of a popup: the owner
//! schedules it when the pointer leaves, cancels it when the pointer comes
//! back, and polls it from the host loop's tick.
//!
//! # Invariants
//!
//! 1. At most one deadline is pending; scheduling replaces the previous one.
//! 2. A deadline fires at most once: the poll that observes it clears it.
//! 3. A cancelled deadline never fires.
//! 4. Time is injected by the caller; the timer never reads the clock.

use std::time::{Duration, Instant};

/// Default grace period between pointer-leave and dismissal.
pub const DEFAULT_DISMISS_DELAY: Duration = Duration::from_millis(100);

/// A single pending dismissal deadline owned by one widget instance.
#[derive(Debug, Clone)]
pub struct DismissTimer {
    delay: Duration,
    deadline: Option<Instant>,
    /// Diagnostic: number of deadlines that actually fired.
    fired: u64,
}

impl Default for DismissTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_DELAY)
    }
}

impl DismissTimer {
    /// Create an idle timer with the given grace period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            fired: 0,
        }
    }

    /// The configured grace period.
    #[inline]
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the grace period. A pending deadline keeps its original time.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule dismissal at `now + delay`.
    ///
    /// Any pending deadline is cancelled first. Returns the new deadline.
    pub fn schedule(&mut self, now: Instant) -> Instant {
        self.cancel();
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        crate::trace!(
            delay_ms = self.delay.as_millis() as u64,
            "dismiss timer scheduled"
        );
        deadline
    }

    /// Cancel the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is pending.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[inline]
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending deadline fires.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire the deadline if it is due.
    ///
    /// Returns `true` exactly once per scheduled deadline, on the first poll
    /// at or after it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of deadlines that have fired (diagnostic).
    #[inline]
    #[must_use]
    pub const fn fired_count(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn default_delay_is_100ms() {
        let timer = DismissTimer::default();
        assert_eq!(timer.delay(), ms(100));
        assert!(!timer.is_pending());
    }

    #[test]
    fn fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut timer = DismissTimer::new(ms(100));
        timer.schedule(t0);

        assert!(!timer.poll(t0 + ms(99)));
        assert!(timer.poll(t0 + ms(100)));
        assert!(!timer.poll(t0 + ms(500)));
        assert_eq!(timer.fired_count(), 1);
    }

    #[test]
    fn cancel_prevents_firing() {
        let t0 = Instant::now();
        let mut timer = DismissTimer::new(ms(100));
        timer.schedule(t0);

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.poll(t0 + ms(1_000)));
        assert_eq!(timer.fired_count(), 0);
    }

    #[test]
    fn reschedule_supersedes_previous_deadline() {
        let t0 = Instant::now();
        let mut timer = DismissTimer::new(ms(100));
        timer.schedule(t0);
        timer.schedule(t0 + ms(80));

        // The first deadline (t0+100) must not fire.
        assert!(!timer.poll(t0 + ms(150)));
        assert!(timer.poll(t0 + ms(180)));
        assert_eq!(timer.fired_count(), 1);
    }

    #[test]
    fn remaining_counts_down() {
        let t0 = Instant::now();
        let mut timer = DismissTimer::new(ms(100));
        assert_eq!(timer.remaining(t0), None);

        timer.schedule(t0);
        assert_eq!(timer.remaining(t0 + ms(30)), Some(ms(70)));
        assert_eq!(timer.remaining(t0 + ms(300)), Some(Duration::ZERO));
    }

    #[test]
    fn set_delay_applies_to_next_schedule() {
        let t0 = Instant::now();
        let mut timer = DismissTimer::new(ms(100));
        timer.set_delay(ms(10));
        assert_eq!(timer.schedule(t0), t0 + ms(10));
    }

    #[test]
    fn zero_delay_fires_on_same_instant() {
        let t0 = Instant::now();
        let mut timer = DismissTimer::new(Duration::ZERO);
        timer.schedule(t0);
        assert!(timer.poll(t0));
    }
}
