use async_trait::async_trait;
use chrono::Utc;
use domain::tracking_code::{CounterMutation, CounterRecord, CounterStore, CounterStoreError};
use domain_shared::scholarship::{CounterKey, ScholarshipPrefix};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Optimistic in-memory counter store. Every commit checks the version read
/// at the start of the attempt and retries on mismatch, like a document store
/// transaction would.
pub struct SimulatedCounterStore {
    records: Mutex<HashMap<String, (u64, CounterRecord)>>,
    injected_conflicts: AtomicU32,
    max_commit_attempts: u32,
    mutation_calls: AtomicU32,
}

impl SimulatedCounterStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            injected_conflicts: AtomicU32::new(0),
            max_commit_attempts: 1000,
            mutation_calls: AtomicU32::new(0),
        }
    }

    /// The next `conflicts` commits fail as if another writer got there first.
    pub fn with_injected_conflicts(self, conflicts: u32) -> Self {
        self.injected_conflicts.store(conflicts, Ordering::SeqCst);
        self
    }

    pub fn with_max_commit_attempts(mut self, max_commit_attempts: u32) -> Self {
        self.max_commit_attempts = max_commit_attempts;
        self
    }

    pub fn seed(&self, key: &str, count: u64) {
        let mut parts = key.split('-');
        let prefix = ScholarshipPrefix(parts.next().unwrap().to_string());
        let year = parts.next().unwrap().parse().unwrap();
        let record = CounterRecord {
            prefix,
            year,
            count,
            last_updated: Utc::now(),
        };
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), (1, record));
    }

    pub fn count(&self, key: &str) -> Option<u64> {
        self.records
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, record)| record.count)
    }

    pub fn mutation_calls(&self) -> u32 {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    fn read(&self, key: &CounterKey) -> (u64, Option<CounterRecord>) {
        match self.records.lock().unwrap().get(&key.0) {
            Some((version, record)) => (*version, Some(record.clone())),
            None => (0, None),
        }
    }

    fn try_commit(&self, key: &CounterKey, read_version: u64, record: &CounterRecord) -> bool {
        let injected = self
            .injected_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return false;
        }

        let mut records = self.records.lock().unwrap();
        let current_version = records.get(&key.0).map(|(v, _)| *v).unwrap_or(0);
        if current_version != read_version {
            return false;
        }
        records.insert(key.0.clone(), (read_version + 1, record.clone()));
        true
    }
}

#[async_trait]
impl CounterStore for SimulatedCounterStore {
    async fn run_transaction(
        &self,
        key: &CounterKey,
        mutation: &CounterMutation,
    ) -> Result<CounterRecord, CounterStoreError> {
        for _ in 0..self.max_commit_attempts {
            let (version, previous) = self.read(key);
            self.mutation_calls.fetch_add(1, Ordering::SeqCst);
            let record = mutation(previous.as_ref());

            // Give concurrent transactions a chance to interleave.
            tokio::task::yield_now().await;

            if self.try_commit(key, version, &record) {
                return Ok(record);
            }
        }

        Err(CounterStoreError::Contention)
    }
}

#[derive(Default)]
pub struct FailingCounterStore {
    calls: AtomicU32,
}

impl FailingCounterStore {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterStore for FailingCounterStore {
    async fn run_transaction(
        &self,
        _key: &CounterKey,
        _mutation: &CounterMutation,
    ) -> Result<CounterRecord, CounterStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CounterStoreError::ServiceUnavailable)
    }
}

/// Never completes, like a store that stopped answering.
pub struct PendingCounterStore;

#[async_trait]
impl CounterStore for PendingCounterStore {
    async fn run_transaction(
        &self,
        _key: &CounterKey,
        _mutation: &CounterMutation,
    ) -> Result<CounterRecord, CounterStoreError> {
        std::future::pending().await
    }
}
