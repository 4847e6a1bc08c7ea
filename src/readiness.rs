use crate::error::UploadError;
use reqwest::Client;
use std::cmp::min;
use std::time::Duration;

pub const STARTUP_DELAY: Duration = Duration::from_secs(5);

/// How to decide the target service is up before uploading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Sleep for a fixed time and assume the service is up.
    Delay(Duration),
    /// Poll a health URL until it answers 2xx.
    Probe(ProbePolicy),
}

impl Default for Readiness {
    fn default() -> Self {
        Readiness::Delay(STARTUP_DELAY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePolicy {
    pub url: String,
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub request_timeout: Duration,
}

impl ProbePolicy {
    pub fn new(url: impl Into<String>) -> Self {
        ProbePolicy {
            url: url.into(),
            max_attempts: 10,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(5),
            request_timeout: Duration::from_secs(2),
        }
    }
}

pub async fn wait_until_ready(client: &Client, readiness: &Readiness) -> Result<(), UploadError> {
    match readiness {
        Readiness::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            Ok(())
        }
        Readiness::Probe(policy) => probe(client, policy).await,
    }
}

/// Waits between failed probes: starts at `initial_backoff`, doubles, never above `max_backoff`.
pub fn backoff_delays(policy: &ProbePolicy) -> impl Iterator<Item = Duration> {
    let cap = policy.max_backoff;
    std::iter::successors(Some(min(policy.initial_backoff, cap)), move |prev| {
        Some(min(prev.saturating_mul(2), cap))
    })
}

async fn probe(client: &Client, policy: &ProbePolicy) -> Result<(), UploadError> {
    let attempts = policy.max_attempts.max(1);
    let mut delays = backoff_delays(policy);

    for attempt in 1..=attempts {
        match client.get(&policy.url).timeout(policy.request_timeout).send().await {
            Ok(response) if response.status().is_success() => {
                log::info!("{} ready after {} attempt(s)", policy.url, attempt);
                return Ok(());
            }
            Ok(response) => {
                log::debug!("Probe {}/{}: {} answered HTTP {}", attempt, attempts, policy.url, response.status());
            }
            Err(e) => {
                log::debug!("Probe {}/{}: {} unreachable: {}", attempt, attempts, policy.url, e);
            }
        }

        if attempt < attempts {
            if let Some(delay) = delays.next() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    log::warn!("Giving up on {} after {} attempts", policy.url, attempts);
    Err(UploadError::NotReady { url: policy.url.clone(), attempts })
}
