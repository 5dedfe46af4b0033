//! Retry of idempotent probes that may report "not ready"
//!
//! A probe is attempted until it stops failing with
//! [`ConverterError::HierarchyNotReady`] or the attempt budget is spent. The
//! pause between attempts is a `tokio::time::sleep`, so other tasks (progress
//! rendering, signal handling) keep running while the probe waits.

use crate::config::RetryConfig;
use crate::domain::{ConverterError, Result};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Wait interval and attempt budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub wait_interval: Duration,
    pub max_attempts: usize,
}

impl RetryPolicy {
    /// Policy for hierarchy loads: 3 seconds apart, 20 attempts
    pub const HIERARCHY: RetryPolicy = RetryPolicy {
        wait_interval: Duration::from_secs(3),
        max_attempts: 20,
    };

    /// Creates a validated policy
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidConfiguration`] for a zero interval or
    /// a zero attempt budget.
    pub fn new(wait_interval: Duration, max_attempts: usize) -> Result<Self> {
        let policy = Self {
            wait_interval,
            max_attempts,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Builds the policy from the `[retry]` configuration section
    pub fn from_config(config: &RetryConfig) -> Result<Self> {
        Self::new(
            Duration::from_millis(config.wait_interval_ms),
            config.max_attempts,
        )
    }

    fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ConverterError::InvalidConfiguration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.wait_interval.is_zero() {
            return Err(ConverterError::InvalidConfiguration(
                "wait_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::HIERARCHY
    }
}

/// An idempotent operation that can be attempted repeatedly
#[async_trait]
pub trait Probe: Send {
    type Output: Send;

    async fn attempt(&mut self) -> Result<Self::Output>;
}

#[async_trait]
impl<F, Fut, T> Probe for F
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;

    async fn attempt(&mut self) -> Result<T> {
        (self)().await
    }
}

/// Runs a [`Probe`] under a [`RetryPolicy`]
pub struct Retrier<P> {
    policy: RetryPolicy,
    probe: Option<P>,
}

impl<P: Probe> Retrier<P> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            probe: None,
        }
    }

    /// Sets the probe to run
    pub fn with_probe(mut self, probe: P) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Attempts the probe until it succeeds or the budget is exhausted
    ///
    /// Returns the first successful output. Errors other than
    /// `HierarchyNotReady` are returned immediately without retrying.
    ///
    /// # Errors
    ///
    /// - [`ConverterError::InvalidConfiguration`] if the policy is invalid or
    ///   no probe was set; nothing is attempted
    /// - [`ConverterError::HierarchyNotReady`] once every attempt reported it
    pub async fn execute(self) -> Result<P::Output> {
        self.policy.validate()?;
        let mut probe = self.probe.ok_or_else(|| {
            ConverterError::InvalidConfiguration("no probe set on retrier".to_string())
        })?;
        let max_attempts = self.policy.max_attempts;

        let mut last_reason = String::new();
        for attempt in 1..=max_attempts {
            match probe.attempt().await {
                Ok(output) => {
                    if attempt > 1 {
                        tracing::debug!(attempt, max_attempts, "Probe succeeded after retrying");
                    }
                    return Ok(output);
                }
                Err(ConverterError::HierarchyNotReady(reason)) => {
                    crate::log_retry_attempt!(attempt, max_attempts, reason.as_str());
                    last_reason = reason;
                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.wait_interval).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(ConverterError::HierarchyNotReady(format!(
            "still not ready after {max_attempts} attempts: {last_reason}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn policy(max_attempts: usize) -> RetryPolicy {
        RetryPolicy::new(Duration::from_millis(10), max_attempts).unwrap()
    }

    #[test]
    fn test_policy_validation() {
        assert!(RetryPolicy::new(Duration::from_secs(1), 0).is_err());
        assert!(RetryPolicy::new(Duration::ZERO, 3).is_err());
        assert!(RetryPolicy::new(Duration::from_secs(1), 1).is_ok());
    }

    #[test]
    fn test_policy_from_config() {
        let config = RetryConfig {
            wait_interval_ms: 250,
            max_attempts: 4,
        };
        let policy = RetryPolicy::from_config(&config).unwrap();
        assert_eq!(policy.wait_interval, Duration::from_millis(250));
        assert_eq!(policy.max_attempts, 4);
    }

    #[tokio::test]
    async fn test_missing_probe_is_invalid_configuration() {
        let retrier: Retrier<fn() -> std::future::Ready<Result<()>>> = Retrier::new(policy(3));
        let err = retrier.execute().await.unwrap_err();
        assert!(matches!(err, ConverterError::InvalidConfiguration(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result: Result<()> = Retrier::new(policy(5))
            .with_probe(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ConverterError::Markup("broken".to_string()))
                }
            })
            .execute()
            .await;

        assert!(matches!(result, Err(ConverterError::Markup(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
