use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::{Client, Proxy};
use tracing::log;

use crate::config_handler::EgressConfig;

struct Egress {
    region: String,
    client: Client,
    requests: u64,
}

/// Rotating set of outbound HTTP clients, one per configured region/proxy.
/// Started once per `FotmobClient` and released by `shutdown`.
pub struct EgressPool {
    egresses: Vec<Egress>,
    next: usize,
}

impl EgressPool {
    pub fn start(entries: &[EgressConfig], timeout: Duration) -> anyhow::Result<EgressPool> {
        if entries.is_empty() {
            return Err(anyhow!("[EGRESS] No egress configured"));
        }
        log::info!("[EGRESS] Starting egress pool {:?}", entries.iter().map(|e| e.region.as_str()).collect::<Vec<_>>());

        let mut egresses = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut builder = Client::builder().timeout(timeout);
            if let Some(proxy) = &entry.proxy {
                builder = builder.proxy(Proxy::all(proxy)
                    .with_context(|| format!("Invalid proxy for {}", entry.region))?);
            }
            let client = builder.build()
                .with_context(|| format!("Could not build client for {}", entry.region))?;
            egresses.push(Egress { region: entry.region.clone(), client, requests: 0 });
        }
        log::info!("[EGRESS] Pool ready");
        Ok(EgressPool { egresses, next: 0 })
    }

    /// Next client in rotation, with the region it leaves from.
    pub fn next(&mut self) -> (&str, &Client) {
        let idx = self.next % self.egresses.len();
        self.next = (idx + 1) % self.egresses.len();
        let egress = &mut self.egresses[idx];
        egress.requests += 1;
        (egress.region.as_str(), &egress.client)
    }

    pub fn len(&self) -> usize {
        self.egresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.egresses.is_empty()
    }

    pub fn shutdown(self) {
        log::info!("[EGRESS] Shutting down egress pool...");
        for egress in self.egresses {
            log::info!("[EGRESS] Released {} after {} requests", egress.region, egress.requests);
        }
        log::info!("[EGRESS] Pool closed.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(region: &str) -> EgressConfig {
        EgressConfig { region: region.to_string(), proxy: None }
    }

    #[test]
    fn rotates_round_robin() {
        let mut pool = EgressPool::start(&[entry("us-east-1"), entry("us-east-2"), entry("eu-west-1")], Duration::from_secs(1)).unwrap();
        let regions: Vec<String> = (0..4).map(|_| pool.next().0.to_string()).collect();
        assert_eq!(regions, vec!["us-east-1", "us-east-2", "eu-west-1", "us-east-1"]);
        assert_eq!(pool.len(), 3);
        pool.shutdown();
    }

    #[test]
    fn empty_pool_is_rejected() {
        assert!(EgressPool::start(&[], Duration::from_secs(1)).is_err());
    }

    #[test]
    fn invalid_proxy_is_rejected() {
        let entries = vec![EgressConfig { region: "us-east-2".to_string(), proxy: Some("http://[::1".to_string()) }];
        assert!(EgressPool::start(&entries, Duration::from_secs(1)).is_err());
    }
}
