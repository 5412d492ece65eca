use crate::tracking_code::CounterRecord;
use async_trait::async_trait;
use domain_shared::scholarship::CounterKey;
use thiserror::Error;

/// Computes the record to write from the record currently stored, if any.
///
/// A store may call it several times for one transaction, once per commit
/// attempt, so it must not have side effects.
pub type CounterMutation = dyn Fn(Option<&CounterRecord>) -> CounterRecord + Send + Sync;

#[async_trait]
pub trait CounterStore {
    /// Reads the record under `key`, applies `mutation` and writes the result
    /// back with merge semantics, all within one isolated commit. Conflicting
    /// commits are retried by the store until it succeeds or gives up.
    async fn run_transaction(
        &self,
        key: &CounterKey,
        mutation: &CounterMutation,
    ) -> Result<CounterRecord, CounterStoreError>;
}

#[derive(Debug, Error)]
pub enum CounterStoreError {
    #[error("Service is temporarily unavailable")]
    ServiceUnavailable,
    #[error("Transaction kept conflicting with concurrent commits")]
    Contention,
}
