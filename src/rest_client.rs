use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::log;

use crate::config_handler::Config;
use crate::egress::EgressPool;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_unit: Duration,
    pub rate_limit: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> RetryPolicy {
        RetryPolicy {
            max_retries: config.max_retries,
            backoff_unit: config.units(1),
            rate_limit: config.units(config.rate_limit_units),
        }
    }

    /// Sleep after failed attempt `attempt` (0-based): 1, 2, 4... units.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Access layer for the FotMob JSON API. One request in flight at a time,
/// every attempt routed through the next egress in the pool.
pub struct FotmobClient {
    api_url: String,
    egress: EgressPool,
    retry: RetryPolicy,
}

impl FotmobClient {
    pub fn start(config: &Config) -> anyhow::Result<FotmobClient> {
        log::info!("[API] Starting client for {}", config.api_url());
        let egress = EgressPool::start(&config.egress, config.timeout())?;
        Ok(FotmobClient {
            api_url: config.api_url(),
            egress,
            retry: RetryPolicy::from_config(config),
        })
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// GET `{api_url}/{endpoint}`. `None` once every attempt failed.
    pub async fn request(&mut self, endpoint: &str, params: &[(&str, String)]) -> Option<Value> {
        let url = format!("{}/{}", self.api_url, endpoint);

        for attempt in 0..self.retry.max_retries {
            let before = Instant::now();
            log::info!("[API] Request {endpoint} (attempt {})", attempt + 1);
            match self.attempt(&url, params).await {
                Ok(json) => {
                    log::info!("[API] Call {url} {:.2?}", before.elapsed());
                    tokio::time::sleep(self.retry.rate_limit).await;
                    return Some(json);
                }
                Err(e) => {
                    log::warn!("[API] Attempt {} failed: {e}", attempt + 1);
                    if attempt + 1 < self.retry.max_retries {
                        tokio::time::sleep(self.retry.backoff(attempt)).await;
                    }
                }
            }
        }
        log::error!("[API] All retries failed for {endpoint}");
        None
    }

    async fn attempt(&mut self, url: &str, params: &[(&str, String)]) -> Result<Value, reqwest::Error> {
        let (region, client) = self.egress.next();
        log::debug!("[API] GET {url} via {region}");
        client.get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub fn close(self) {
        self.egress.shutdown();
    }
}
