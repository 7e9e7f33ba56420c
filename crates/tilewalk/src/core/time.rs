use std::time::Duration;

/// Deadline watermark against a monotonically increasing tick clock.
/// A cadence is due once the clock has moved strictly past its deadline;
/// rescheduling places the next deadline one interval after "now".
///
/// Variable deltas never produce more than one firing per check, so a
/// long frame drops the missed firings instead of replaying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval: Duration,
    deadline: Duration,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: Duration::ZERO,
        }
    }

    /// Whether the clock has passed the deadline.
    pub fn is_due(&self, now: Duration) -> bool {
        self.deadline < now
    }

    /// Schedule the next firing one interval after `now`.
    pub fn reschedule(&mut self, now: Duration) {
        self.deadline = now + self.interval;
    }

    /// Make the cadence due on the next clock advance.
    pub fn reset(&mut self) {
        self.deadline = Duration::ZERO;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

/// Accumulated logical time, advanced by explicit deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickClock {
    elapsed: Duration,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta. Returns the new elapsed time.
    pub fn advance(&mut self, delta: Duration) -> Duration {
        self.elapsed += delta;
        self.elapsed
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
