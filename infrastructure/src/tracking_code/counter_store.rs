use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::tracking_code::{CounterMutation, CounterRecord, CounterStore, CounterStoreError};
use domain_shared::scholarship::{CounterKey, ScholarshipPrefix};
use sqlx::{query, query_as, PgPool};
use tracing::{debug, instrument, warn};

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

pub struct PostgresCounterStore {
    pool: PgPool,
    max_commit_attempts: u32,
}

impl PostgresCounterStore {
    #[instrument(level = "trace", skip_all)]
    pub fn new(pool: PgPool, max_commit_attempts: u32) -> Self {
        Self {
            pool,
            max_commit_attempts: max_commit_attempts.max(1),
        }
    }

    /// One serializable read-modify-write of the counter row.
    async fn attempt(
        &self,
        key: &CounterKey,
        mutation: &CounterMutation,
    ) -> Result<CounterRecord, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let row: Option<(String, i32, i64, NaiveDateTime)> = query_as(
            "SELECT prefix, year, count, last_updated FROM tracking_code_counters WHERE key = $1",
        )
        .bind(&key.0)
        .fetch_optional(&mut *tx)
        .await?;

        let previous = row.map(|(prefix, year, count, last_updated)| CounterRecord {
            prefix: ScholarshipPrefix(prefix),
            year,
            count: count as u64,
            last_updated: last_updated.and_utc(),
        });

        let record = mutation(previous.as_ref());

        // Only the record's own columns are written, anything else on the row is kept.
        query(
            "INSERT INTO tracking_code_counters (key, prefix, year, count, last_updated) VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (key) DO UPDATE SET prefix = EXCLUDED.prefix, year = EXCLUDED.year, count = EXCLUDED.count, last_updated = EXCLUDED.last_updated",
        )
        .bind(&key.0)
        .bind(&record.prefix.0)
        .bind(record.year)
        .bind(record.count as i64)
        .bind(record.last_updated.naive_utc())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl CounterStore for PostgresCounterStore {
    #[instrument(level = "debug", err, skip(self, mutation))]
    async fn run_transaction(
        &self,
        key: &CounterKey,
        mutation: &CounterMutation,
    ) -> Result<CounterRecord, CounterStoreError> {
        for attempt in 1..=self.max_commit_attempts {
            match self.attempt(key, mutation).await {
                Ok(record) => return Ok(record),
                Err(err) if is_write_conflict(&err) => {
                    debug!(key = key.0, attempt, "Counter commit conflicted, retrying");
                }
                Err(err) => {
                    warn!(error = ?err, key = key.0, "Failed to advance tracking code counter");
                    return Err(CounterStoreError::ServiceUnavailable);
                }
            }
        }

        warn!(
            key = key.0,
            attempts = self.max_commit_attempts,
            "Gave up advancing tracking code counter under contention",
        );
        Err(CounterStoreError::Contention)
    }
}

fn is_write_conflict(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|err| err.code())
        .is_some_and(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED)
}
