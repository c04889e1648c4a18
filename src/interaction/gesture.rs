use std::time::Duration;

pub const DEFAULT_WHEEL_GESTURE_END: Duration = Duration::from_millis(150);

/// Groups bursts of wheel events into zoom gestures.
///
/// Every wheel event pushes the single pending deadline forward; the gesture
/// ends once host time passes the deadline without another event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureDebouncer {
    quiet_period: Duration,
    deadline: Option<Duration>,
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_GESTURE_END)
    }
}

impl GestureDebouncer {
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Records an event at `now`; returns `true` when it starts a gesture.
    pub fn bump(&mut self, now: Duration) -> bool {
        let started = self.deadline.is_none_or(|deadline| now >= deadline);
        self.deadline = Some(now + self.quiet_period);
        started
    }

    /// Returns `true` exactly once, when `now` reaches the pending deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
