//! Wait-for-ready
//!
//! Polls an async probe until it succeeds or the retry budget runs out.
//! The delay between attempts starts at `initial_delay` and is multiplied by
//! `multiplier` after every failure (capped at `max_delay`); a multiplier of `1.0`
//! gives a fixed delay. Optional random jitter is added on top.

use crate::error::ReadinessError;

use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
    pub jitter: Duration,
}

impl RetryPolicy {
    /// Same delay between every attempt.
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay: delay,
            multiplier: 1.0,
            max_delay: delay,
            jitter: Duration::ZERO,
        }
    }

    /// Delay doubling after each failure, capped at `max_delay`.
    pub fn exponential(max_attempts: usize, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            multiplier: 2.0,
            max_delay,
            jitter: Duration::ZERO,
        }
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay after the `failures`-th consecutive failure (1-based), without jitter.
    pub fn delay_after(&self, failures: usize) -> Duration {
        let exponent = failures.saturating_sub(1).min(i32::MAX as usize) as i32;
        let scaled = self.initial_delay.as_secs_f64() * self.multiplier.max(1.0).powi(exponent);
        let capped = scaled.min(self.max_delay.max(self.initial_delay).as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Delay actually slept after the `failures`-th failure: `delay_after` plus a
    /// random amount in `[0, jitter]`.
    pub fn next_delay(&self, failures: usize) -> Duration {
        self.delay_after(failures) + self.jitter()
    }

    fn jitter(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(30, Duration::from_secs(2))
    }
}

/// Calls `probe` until it returns `Ok`, sleeping between failed attempts.
///
/// Returns [`ReadinessError::TimedOut`] after `max_attempts` failures. There is no
/// sleep after the final failure.
pub async fn wait_for_ready<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut probe: F,
) -> Result<T, ReadinessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut last_error = String::from("no attempts made");

    for attempt in 1..=policy.max_attempts {
        match probe().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("Service ready after {} attempts", attempt);
                }
                return Ok(value);
            }
            Err(err) => {
                last_error = err.to_string();
                if attempt < policy.max_attempts {
                    tracing::warn!("Attempt {}: still waiting... ({})", attempt, last_error);
                    tokio::time::sleep(policy.next_delay(attempt)).await;
                }
            }
        }
    }

    tracing::error!(
        "Service not reachable after {} attempts: {}",
        policy.max_attempts,
        last_error
    );
    Err(ReadinessError::TimedOut {
        attempts: policy.max_attempts,
        last_error,
    })
}
