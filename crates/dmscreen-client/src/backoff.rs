//! Reconnect delays.

use std::time::Duration;

/// Delay before the first reconnect attempt.
pub const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on the delay between attempts.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

const BACKOFF_MULTIPLIER: u32 = 2;

/// Reconnect timing. Defaults to 1s doubling up to 30s, retrying forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay before the first attempt.
    pub initial: Duration,
    /// Cap on the delay between attempts.
    pub max: Duration,
    /// Give up after this many attempts; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial: INITIAL_RETRY_DELAY,
            max: MAX_RETRY_DELAY,
            max_attempts: None,
        }
    }
}

/// Exponential backoff state shared by reconnect logic.
#[derive(Debug, Clone, Copy)]
pub struct BackoffState {
    policy: BackoffPolicy,
    attempts: u32,
    delay: Duration,
}

impl BackoffState {
    /// Creates a fresh backoff for `policy`.
    #[must_use]
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
            delay: policy.initial,
        }
    }

    /// Starts over after a successful connection.
    pub fn reset(&mut self) {
        *self = Self::new(self.policy);
    }

    /// Number of attempts handed out since the last reset.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns whether the retry budget is spent.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.policy
            .max_attempts
            .is_some_and(|max| self.attempts >= max)
    }

    /// Advance to the next attempt, updating the delay for the subsequent attempt.
    ///
    /// Returns the delay to wait *before* performing this attempt, or `None`
    /// once exhausted.
    pub fn next_delay_and_advance(&mut self) -> Option<Duration> {
        if self.is_exhausted() {
            return None;
        }

        let current = self.delay;
        self.attempts = self.attempts.saturating_add(1);
        self.delay = (self.delay * BACKOFF_MULTIPLIER).min(self.policy.max);
        Some(current)
    }
}
