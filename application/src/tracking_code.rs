use application_ports::tracking_code::TrackingCodePort;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use domain::tracking_code::{
    counter_key, fallback_tracking_code, format_tracking_code, prefix_for, CounterRecord,
    CounterStore, CounterStoreError,
};
use domain_shared::scholarship::{ScholarshipPrefix, TrackingCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

pub struct TrackingCodeService {
    counter_store: Arc<dyn CounterStore + Send + Sync>,
    max_attempts: u32,
    attempt_timeout: Duration,
}

impl TrackingCodeService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        counter_store: Arc<dyn CounterStore + Send + Sync>,
        max_attempts: u32,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            counter_store,
            max_attempts: max_attempts.max(1),
            attempt_timeout,
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn advance_counter(
        &self,
        prefix: &ScholarshipPrefix,
        year: i32,
    ) -> Result<CounterRecord, CounterStoreError> {
        let key = counter_key(prefix, year);
        let owned_prefix = prefix.clone();
        let mutation = move |previous: Option<&CounterRecord>| {
            CounterRecord::next(previous, &owned_prefix, year, Utc::now())
        };

        let mut last_error = CounterStoreError::ServiceUnavailable;
        for attempt in 1..=self.max_attempts {
            let transaction = self.counter_store.run_transaction(&key, &mutation);
            match tokio::time::timeout(self.attempt_timeout, transaction).await {
                Ok(Ok(record)) => return Ok(record),
                Ok(Err(err)) => {
                    warn!(
                        key = key.0,
                        attempt,
                        error = %err,
                        "Counter transaction failed",
                    );
                    last_error = err;
                }
                Err(_) => {
                    warn!(
                        key = key.0,
                        attempt,
                        timeout_ms = self.attempt_timeout.as_millis() as u64,
                        "Counter transaction timed out",
                    );
                    last_error = CounterStoreError::ServiceUnavailable;
                }
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl TrackingCodePort for TrackingCodeService {
    #[instrument(level = "info", skip(self))]
    async fn allocate_code(&self, scholarship_name: &str) -> TrackingCode {
        let prefix = prefix_for(scholarship_name);
        let year = Utc::now().year();

        match self.advance_counter(&prefix, year).await {
            Ok(record) => {
                let code = format_tracking_code(&prefix, year, record.count);
                info!(tracking_code = code.0, "Tracking code allocated");
                code
            }
            Err(err) => {
                let code = fallback_tracking_code(&prefix, year, Utc::now());
                error!(
                    error = %err,
                    tracking_code = code.0,
                    attempts = self.max_attempts,
                    "Counter unavailable, issued fallback tracking code which may not be unique",
                );
                code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingCounterStore, PendingCounterStore, SimulatedCounterStore};
    use chrono::Datelike;
    use std::collections::HashSet;

    const NAME: &str = "Merit Scholarship";

    fn service(store: Arc<dyn CounterStore + Send + Sync>) -> TrackingCodeService {
        TrackingCodeService::new(store, 3, Duration::from_secs(5))
    }

    fn current_year() -> i32 {
        Utc::now().year()
    }

    #[tokio::test]
    async fn first_code_of_the_year_starts_at_one() {
        let store = Arc::new(SimulatedCounterStore::new());
        let code = service(store.clone()).allocate_code(NAME).await;

        assert_eq!(code.0, format!("MER-{}-000001", current_year()));
        assert_eq!(store.count(&format!("MER-{}", current_year())), Some(1));
    }

    #[tokio::test]
    async fn allocation_is_not_idempotent() {
        let store = Arc::new(SimulatedCounterStore::new());
        let service = service(store);

        let first = service.allocate_code(NAME).await;
        let second = service.allocate_code(NAME).await;

        assert_ne!(first, second);
        assert_eq!(second.sequence(), first.sequence().map(|s| s + 1));
    }

    #[tokio::test]
    async fn programs_have_independent_counters() {
        let store = Arc::new(SimulatedCounterStore::new());
        let service = service(store);

        service.allocate_code("Merit Scholarship").await;
        service.allocate_code("Merit Scholarship").await;
        let tdp = service.allocate_code("Tulong Dunong Program").await;

        assert_eq!(tdp.0, format!("TDP-{}-000001", current_year()));
    }

    #[tokio::test]
    async fn codes_match_the_tracking_code_shape() {
        let store = Arc::new(SimulatedCounterStore::new());
        let service = service(store);

        for name in ["merit scholarship", "Random Program", "AB", "4-H Club Award", "TES"] {
            let code = service.allocate_code(name).await;
            assert!(TrackingCode::parse(&code.0).is_some(), "{code} is malformed");
        }
    }

    #[tokio::test]
    async fn conflicts_are_retried_without_losing_counts() {
        let store = Arc::new(SimulatedCounterStore::new().with_injected_conflicts(4));
        let service = service(store.clone());

        let code = service.allocate_code(NAME).await;

        assert_eq!(code.sequence(), Some(1));
        assert!(store.mutation_calls() >= 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_allocations_are_gap_free_and_distinct() {
        const PREVIOUS: u64 = 7;
        const REQUESTS: u64 = 40;

        let key = format!("MER-{}", current_year());
        let store = Arc::new(SimulatedCounterStore::new().with_injected_conflicts(10));
        store.seed(&key, PREVIOUS);
        let service = Arc::new(service(store.clone()));

        let handles: Vec<_> = (0..REQUESTS)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.allocate_code(NAME).await })
            })
            .collect();

        let mut counts = Vec::new();
        for handle in handles {
            let code = handle.await.unwrap();
            counts.push(code.sequence().unwrap());
        }
        counts.sort_unstable();

        let expected: Vec<u64> = (PREVIOUS + 1..=PREVIOUS + REQUESTS).collect();
        assert_eq!(counts, expected);
        assert_eq!(store.count(&key), Some(PREVIOUS + REQUESTS));
    }

    #[tokio::test]
    async fn unavailable_store_falls_back_after_bounded_attempts() {
        let store = Arc::new(FailingCounterStore::default());
        let service = service(store.clone());

        let code = service.allocate_code(NAME).await;

        assert!(TrackingCode::parse(&code.0).is_some());
        assert!(code.0.starts_with(&format!("MER-{}-", current_year())));
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn hanging_store_falls_back_after_timeout() {
        let service =
            TrackingCodeService::new(Arc::new(PendingCounterStore), 2, Duration::from_millis(20));

        let code = service.allocate_code("Needs-Based Grant").await;

        assert!(code.0.starts_with(&format!("NBG-{}-", current_year())));
        assert!(TrackingCode::parse(&code.0).is_some());
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let store = Arc::new(SimulatedCounterStore::new());
        let service = TrackingCodeService::new(store, 0, Duration::from_secs(1));

        let code = service.allocate_code(NAME).await;

        assert_eq!(code.sequence(), Some(1));
    }

    #[tokio::test]
    async fn exhausted_contention_falls_back() {
        let store = Arc::new(
            SimulatedCounterStore::new()
                .with_max_commit_attempts(2)
                .with_injected_conflicts(u32::MAX),
        );
        let service = service(store.clone());

        let codes: HashSet<_> = [
            service.allocate_code(NAME).await,
            service.allocate_code("Tertiary Education Subsidy").await,
        ]
        .into_iter()
        .collect();

        assert_eq!(codes.len(), 2);
        assert!(codes.iter().all(|c| TrackingCode::parse(&c.0).is_some()));
        assert_eq!(store.count(&format!("MER-{}", current_year())), None);
    }
}
