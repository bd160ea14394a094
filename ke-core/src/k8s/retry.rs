use std::time::Duration;

use rand::Rng;
use tokio::time::{
    Instant,
    sleep,
};
use tracing::*;

use crate::prelude::*;

/// Backoff schedule for retrying an update that lost an optimistic-concurrency race.
///
/// The delay before attempt `n + 1` is `duration * factor^(n - 1)`, stretched by a random
/// fraction in `[0, jitter)` of itself.  If `deadline` is set, no new attempt is started once
/// that much time has elapsed since the first one.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    pub steps: u32,
    pub duration: Duration,
    pub factor: f64,
    pub jitter: f64,
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> RetryPolicy {
        RetryPolicy {
            steps: DEFAULT_RETRY_STEPS,
            duration: Duration::from_millis(DEFAULT_RETRY_DELAY_MILLIS),
            factor: DEFAULT_RETRY_FACTOR,
            jitter: DEFAULT_RETRY_JITTER,
            deadline: None,
        }
    }
}

impl RetryPolicy {
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> RetryPolicy {
        self.deadline = deadline;
        self
    }

    pub(crate) fn base_delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1) as i32;
        self.duration.mul_f64(self.factor.max(0.0).powi(exp))
    }

    pub(crate) fn delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        if self.jitter <= 0.0 {
            return base;
        }
        base + base.mul_f64(self.jitter * rand::rng().random::<f64>())
    }
}

/// Fetch the named object, apply `mutate` to it, and write it back, retrying from a fresh fetch
/// whenever the store reports a resourceVersion conflict.
///
/// `mutate` runs once per attempt against the latest copy of the object, so it must not assume
/// it only runs once.  At least one attempt is always made, whatever the deadline.  Conflicts
/// are the only thing that's retried: a missing object, any other store error, running out of
/// attempts, or running past the policy deadline all end the loop.
pub async fn update_with_retry<K, S, F>(store: &S, name: &str, policy: &RetryPolicy, mut mutate: F) -> anyhow::Result<K>
where
    S: ObjectStore<K> + ?Sized,
    F: FnMut(K) -> K,
{
    let start = Instant::now();
    let steps = policy.steps.max(1);
    let mut attempt = 0;

    // The first attempt always runs; the deadline only stops retries
    loop {
        if let Some(deadline) = policy.deadline
            && attempt > 0
            && start.elapsed() >= deadline
        {
            return Err(EditError::deadline_exceeded(&format!(
                "gave up on {name} after {attempt} attempt(s) in {}",
                humantime::format_duration(deadline),
            )));
        }
        attempt += 1;

        let current = match store.get(name).await {
            Ok(obj) => obj,
            Err(StoreError::NotFound(msg)) => return Err(not_found(name, &msg)),
            Err(e) => return Err(e.into()),
        };

        let candidate = mutate(current);
        match store.replace(name, &candidate).await {
            Ok(obj) => {
                debug!("updated {name} on attempt {attempt}/{steps}");
                return Ok(obj);
            },
            Err(StoreError::Conflict(msg)) if attempt < steps => {
                let delay = policy.delay(attempt);
                warn!("conflict updating {name} (attempt {attempt}/{steps}), retrying in {delay:?}: {msg}");
                sleep(delay).await;
            },
            Err(StoreError::Conflict(msg)) => {
                return Err(EditError::conflict_exhausted(&format!(
                    "{name} was still conflicting after {steps} attempts: {msg}"
                )));
            },
            Err(StoreError::NotFound(msg)) => return Err(not_found(name, &msg)),
            Err(e) => return Err(e.into()),
        }
    }
}

fn not_found(name: &str, msg: &str) -> anyhow::Error {
    if msg.is_empty() {
        EditError::not_found(&format!("\"{name}\" not found"))
    } else {
        EditError::not_found(msg)
    }
}
