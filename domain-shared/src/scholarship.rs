use serde::{Deserialize, Serialize};
use std::fmt;

/// Three uppercase letters identifying a scholarship program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScholarshipPrefix(pub String);

/// Identity of a counter record, `<prefix>-<year>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingCode(pub String);

impl TrackingCode {
    /// Accepts only codes shaped like `ABC-2024-000123`.
    pub fn parse(code: &str) -> Option<Self> {
        let mut parts = code.split('-');
        let prefix = parts.next()?;
        let year = parts.next()?;
        let sequence = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let valid = prefix.len() == 3
            && prefix.bytes().all(|b| b.is_ascii_uppercase())
            && year.len() == 4
            && year.bytes().all(|b| b.is_ascii_digit())
            && sequence.len() == 6
            && sequence.bytes().all(|b| b.is_ascii_digit());

        valid.then(|| TrackingCode(code.to_string()))
    }

    /// The trailing six-digit sequence number.
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit('-').next()?.parse().ok()
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_well_formed_codes() {
        let code = TrackingCode::parse("MER-2025-000042").unwrap();
        assert_eq!(code.0, "MER-2025-000042");
        assert_eq!(code.sequence(), Some(42));
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        for code in [
            "",
            "mer-2025-000042",
            "ME-2025-000042",
            "MER-25-000042",
            "MER-2025-42",
            "MER-2025-0000042",
            "MER-2025-000042-1",
            "M3R-2025-000042",
        ] {
            assert!(TrackingCode::parse(code).is_none(), "{code} should be rejected");
        }
    }
}
