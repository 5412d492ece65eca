mod counter_record;
mod counter_store;
mod prefix;

pub use counter_record::{counter_key, CounterRecord};
pub use counter_store::{CounterMutation, CounterStore, CounterStoreError};
pub use prefix::{prefix_for, PREFIX_TABLE};

use chrono::{DateTime, Utc};
use domain_shared::scholarship::{ScholarshipPrefix, TrackingCode};
use tracing::instrument;

pub const SEQUENCE_DIGITS: usize = 6;

#[instrument(level = "trace")]
pub fn format_tracking_code(prefix: &ScholarshipPrefix, year: i32, count: u64) -> TrackingCode {
    TrackingCode(format!(
        "{}-{}-{:0width$}",
        prefix.0,
        year,
        count,
        width = SEQUENCE_DIGITS
    ))
}

/// Builds a code from the last six digits of the epoch-millisecond timestamp.
///
/// Codes built this way are not guaranteed to be unique.
#[instrument(level = "trace")]
pub fn fallback_tracking_code(
    prefix: &ScholarshipPrefix,
    year: i32,
    now: DateTime<Utc>,
) -> TrackingCode {
    let millis = now.timestamp_millis().rem_euclid(1_000_000) as u64;
    format_tracking_code(prefix, year, millis)
}
