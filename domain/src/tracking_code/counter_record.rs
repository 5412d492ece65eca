use chrono::{DateTime, Utc};
use domain_shared::scholarship::{CounterKey, ScholarshipPrefix};
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRecord {
    pub prefix: ScholarshipPrefix,
    pub year: i32,
    pub count: u64,
    pub last_updated: DateTime<Utc>,
}

impl CounterRecord {
    /// The record after one more allocation. A missing record counts as zero.
    #[instrument(level = "trace", skip(previous))]
    pub fn next(
        previous: Option<&CounterRecord>,
        prefix: &ScholarshipPrefix,
        year: i32,
        now: DateTime<Utc>,
    ) -> Self {
        let count = previous.map(|record| record.count).unwrap_or(0) + 1;

        Self {
            prefix: prefix.clone(),
            year,
            count,
            last_updated: now,
        }
    }

    pub fn key(&self) -> CounterKey {
        counter_key(&self.prefix, self.year)
    }
}

pub fn counter_key(prefix: &ScholarshipPrefix, year: i32) -> CounterKey {
    CounterKey(format!("{}-{}", prefix.0, year))
}
