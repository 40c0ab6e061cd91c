use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy for transient (5xx) server failures.
///
/// Backoff is linear: when `progressive` is set, every retry waits
/// `increment` longer than the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total HTTP attempts per logical request, the first one included
    pub max_attempts: u32,
    #[serde(with = "millis")]
    pub base_delay: Duration,
    pub progressive: bool,
    #[serde(with = "millis")]
    pub increment: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_millis(500),
            progressive: true,
            increment: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub const fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    #[must_use]
    pub const fn with_progressive(mut self, increment: Duration) -> Self {
        self.progressive = true;
        self.increment = increment;
        self
    }

    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.progressive = false;
        self
    }

    pub fn start(&self) -> RetryState {
        RetryState {
            attempt: 0,
            delay: self.base_delay,
            max_attempts: self.max_attempts.max(1),
            progressive: self.progressive,
            increment: self.increment,
        }
    }
}

/// Per-request retry bookkeeping, threaded through every attempt of one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    attempt: u32,
    delay: Duration,
    max_attempts: u32,
    progressive: bool,
    increment: Duration,
}

impl RetryState {
    /// Attempts already performed
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn current_delay(&self) -> Duration {
        self.delay
    }

    /// Record a finished attempt
    pub fn record_attempt(&mut self) {
        self.attempt += 1;
    }

    pub const fn can_retry(&self) -> bool {
        self.attempt < self.max_attempts
    }

    /// Advance to the next retry and return how long to wait before it.
    ///
    /// Returns `None` once the attempt budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if !self.can_retry() {
            return None;
        }
        if self.progressive {
            self.delay = self.delay.saturating_add(self.increment);
        }
        Some(self.delay)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut state: RetryState) -> Vec<Duration> {
        let mut delays = Vec::new();
        loop {
            state.record_attempt();
            match state.next_delay() {
                Some(delay) => delays.push(delay),
                None => break,
            }
        }
        delays
    }

    #[test]
    fn test_progressive_delays_grow_linearly() {
        let delays = drain(RetryPolicy::default().start());
        assert_eq!(delays.len(), 9);
        assert_eq!(delays[0], Duration::from_millis(750));
        assert_eq!(delays[1], Duration::from_millis(1000));
        assert_eq!(delays[8], Duration::from_millis(2750));
        assert!(delays.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_fixed_delays_stay_constant() {
        let delays = drain(RetryPolicy::default().fixed().with_max_attempts(4).start());
        assert_eq!(delays, vec![Duration::from_millis(500); 3]);
    }

    #[test]
    fn test_single_attempt_policy_never_retries() {
        assert!(drain(RetryPolicy::none().start()).is_empty());
        // Zero is clamped so a request is still sent once
        assert_eq!(RetryPolicy::default().with_max_attempts(0).start().max_attempts(), 1);
    }

    #[test]
    fn test_policy_serde_uses_millis() {
        let json = serde_json::to_value(RetryPolicy::default()).unwrap();
        assert_eq!(json["base_delay"], 500);
        assert_eq!(json["increment"], 250);

        let policy: RetryPolicy = serde_json::from_str(r#"{"max_attempts":3}"#).unwrap();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }
}
