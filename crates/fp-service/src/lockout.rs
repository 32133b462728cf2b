use std::time::{Duration, Instant};
use tracing::debug;

const TIMED_THRESHOLD: u32 = 5;
const PERMANENT_THRESHOLD: u32 = 20;
const TIMED_DURATION: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LockoutMode {
    #[default]
    None,
    Timed,
    Permanent,
}

/// Counts failed authentication attempts and derives the lockout state.
/// A timed lockout clears itself once its deadline passes; a permanent one
/// only clears through `reset`.
#[derive(Debug)]
pub struct LockoutTracker {
    failed_attempts: u32,
    deadline: Option<Instant>,
    timed_duration: Duration,
}

impl Default for LockoutTracker {
    fn default() -> Self {
        Self {
            failed_attempts: 0,
            deadline: None,
            timed_duration: TIMED_DURATION,
        }
    }
}

impl LockoutTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_timed_duration(timed_duration: Duration) -> Self {
        Self {
            timed_duration,
            ..Self::default()
        }
    }

    pub fn add_failed_attempt(&mut self) {
        self.failed_attempts += 1;
        debug!("failed authentication attempts: {}", self.failed_attempts);
        if (TIMED_THRESHOLD..PERMANENT_THRESHOLD).contains(&self.failed_attempts) {
            self.deadline = Some(Instant::now() + self.timed_duration);
        }
    }

    pub fn reset(&mut self) {
        self.failed_attempts = 0;
        self.deadline = None;
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn mode(&self) -> LockoutMode {
        if self.failed_attempts >= PERMANENT_THRESHOLD {
            LockoutMode::Permanent
        } else if self.deadline.is_some_and(|deadline| Instant::now() < deadline) {
            LockoutMode::Timed
        } else {
            LockoutMode::None
        }
    }

    /// Milliseconds left on a timed lockout, zero otherwise.
    pub fn remaining_ms(&self) -> i64 {
        match self.deadline {
            Some(deadline) => deadline
                .saturating_duration_since(Instant::now())
                .as_millis() as i64,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lockout_below_threshold() {
        let mut tracker = LockoutTracker::new();
        for _ in 0..4 {
            tracker.add_failed_attempt();
        }
        assert_eq!(tracker.mode(), LockoutMode::None);
    }

    #[test]
    fn test_timed_lockout_at_threshold() {
        let mut tracker = LockoutTracker::new();
        for _ in 0..5 {
            tracker.add_failed_attempt();
        }
        assert_eq!(tracker.mode(), LockoutMode::Timed);
        assert!(tracker.remaining_ms() > 0);
    }

    #[test]
    fn test_timed_lockout_expires() {
        let mut tracker = LockoutTracker::with_timed_duration(Duration::ZERO);
        for _ in 0..5 {
            tracker.add_failed_attempt();
        }
        assert_eq!(tracker.mode(), LockoutMode::None);
        assert_eq!(tracker.remaining_ms(), 0);
    }

    #[test]
    fn test_permanent_lockout_at_threshold() {
        let mut tracker = LockoutTracker::new();
        for _ in 0..20 {
            tracker.add_failed_attempt();
        }
        assert_eq!(tracker.mode(), LockoutMode::Permanent);
    }

    #[test]
    fn test_reset_clears_lockout() {
        let mut tracker = LockoutTracker::new();
        for _ in 0..20 {
            tracker.add_failed_attempt();
        }
        tracker.reset();
        assert_eq!(tracker.mode(), LockoutMode::None);
        assert_eq!(tracker.failed_attempts(), 0);
    }
}
