//! Candidate selection.
//!
//! # Responsibilities
//! - Probe every candidate concurrently
//! - Pick the healthy candidate with the lowest latency
//!
//! # Design Decisions
//! - Fan-out width equals the candidate count; the list is small and fixed
//! - Each probe is wrapped in its own deadline so a hung candidate cannot
//!   hold up the aggregate
//! - Ties go to the earliest-listed candidate

use std::time::Duration;

use futures_util::future::join_all;
use tokio::time;

use crate::health::probe::Probe;
use crate::health::types::{Endpoint, ProbeResult};

/// Probe all `candidates` and return the fastest healthy one.
pub async fn select_best<P>(probe: &P, candidates: &[Endpoint], timeout: Duration) -> Option<Endpoint>
where
    P: Probe + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    let probes = candidates.iter().map(|endpoint| async move {
        match time::timeout(timeout, probe.probe(endpoint, timeout)).await {
            Ok(result) => result,
            Err(_) => ProbeResult::unhealthy(endpoint.clone()),
        }
    });

    // join_all keeps candidate order, which fastest() relies on for ties.
    let results = join_all(probes).await;

    for result in &results {
        match result.latency {
            Some(latency) => tracing::info!(
                endpoint = %result.endpoint,
                latency_ms = latency.as_millis() as u64,
                "Candidate healthy"
            ),
            None => tracing::info!(endpoint = %result.endpoint, "Candidate unavailable"),
        }
    }

    fastest(&results).cloned()
}

/// Lowest-latency healthy result; the first listed wins on equal latency.
pub fn fastest(results: &[ProbeResult]) -> Option<&Endpoint> {
    let mut best: Option<(&Endpoint, Duration)> = None;

    for result in results {
        let Some(latency) = result.latency else {
            continue;
        };
        match best {
            Some((_, best_latency)) if latency >= best_latency => {}
            _ => best = Some((&result.endpoint, latency)),
        }
    }

    best.map(|(endpoint, _)| endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Instant;

    /// Answers from a fixed table; unknown endpoints hang forever.
    struct ScriptedProbe {
        latencies: HashMap<String, Option<Duration>>,
    }

    impl ScriptedProbe {
        fn new(entries: &[(&str, Option<u64>)]) -> Self {
            Self {
                latencies: entries
                    .iter()
                    .map(|(url, ms)| (url.to_string(), ms.map(Duration::from_millis)))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Probe for ScriptedProbe {
        async fn probe(&self, endpoint: &Endpoint, _timeout: Duration) -> ProbeResult {
            match self.latencies.get(endpoint.as_str()) {
                Some(latency) => ProbeResult {
                    endpoint: endpoint.clone(),
                    latency: *latency,
                },
                None => std::future::pending().await,
            }
        }
    }

    fn endpoints(urls: &[&str]) -> Vec<Endpoint> {
        urls.iter().map(|u| Endpoint::parse(u).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_selects_lowest_latency() {
        let probe = ScriptedProbe::new(&[
            ("https://rpc.testnet-1.network/", Some(450)),
            ("https://rpc.testnet-2.network/", None),
            ("https://rpc.testnet-3.network/", Some(200)),
            ("https://rpc.testnet-4.network/", Some(300)),
        ]);
        let candidates = endpoints(&[
            "https://rpc.testnet-1.network/",
            "https://rpc.testnet-2.network/",
            "https://rpc.testnet-3.network/",
            "https://rpc.testnet-4.network/",
        ]);

        let best = select_best(&probe, &candidates, Duration::from_secs(1)).await;
        assert_eq!(best.unwrap().as_str(), "https://rpc.testnet-3.network/");
    }

    #[tokio::test]
    async fn test_tie_goes_to_first_listed() {
        let probe = ScriptedProbe::new(&[
            ("https://a.example/", Some(300)),
            ("https://b.example/", Some(100)),
            ("https://c.example/", Some(100)),
        ]);
        let candidates = endpoints(&["https://a.example/", "https://b.example/", "https://c.example/"]);

        let best = select_best(&probe, &candidates, Duration::from_secs(1)).await;
        assert_eq!(best.unwrap().as_str(), "https://b.example/");
    }

    #[tokio::test]
    async fn test_none_when_all_unhealthy() {
        let probe = ScriptedProbe::new(&[("https://a.example/", None), ("https://b.example/", None)]);
        let candidates = endpoints(&["https://a.example/", "https://b.example/"]);

        assert!(select_best(&probe, &candidates, Duration::from_secs(1)).await.is_none());
        assert!(select_best(&probe, &[], Duration::from_secs(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_hung_candidates_wait_one_timeout() {
        let probe = ScriptedProbe::new(&[("https://fast.example/", Some(10))]);
        let candidates = endpoints(&[
            "https://hang-1.example/",
            "https://hang-2.example/",
            "https://fast.example/",
            "https://hang-3.example/",
            "https://hang-4.example/",
        ]);

        let timeout = Duration::from_millis(200);
        let start = Instant::now();
        let best = select_best(&probe, &candidates, timeout).await;

        assert_eq!(best.unwrap().as_str(), "https://fast.example/");
        assert!(start.elapsed() < timeout * 4, "probes must run concurrently");
    }

    #[test]
    fn test_fastest_skips_unhealthy() {
        let a = Endpoint::parse("https://a.example/").unwrap();
        let b = Endpoint::parse("https://b.example/").unwrap();
        let results = vec![
            ProbeResult::unhealthy(a),
            ProbeResult::healthy(b.clone(), Duration::from_millis(900)),
        ];
        assert_eq!(fastest(&results), Some(&b));
        assert_eq!(fastest(&[]), None);
    }
}
