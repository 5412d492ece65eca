use domain_shared::scholarship::ScholarshipPrefix;
use tracing::instrument;

const PREFIX_LEN: usize = 3;
const PADDING: char = 'X';

/// Known scholarship programs. Order matters for the substring stage of
/// [`prefix_for`]: the first matching entry wins.
pub const PREFIX_TABLE: [(&str, &str); 6] = [
    ("Merit Scholarship", "MER"),
    ("Needs-Based Grant", "NBG"),
    ("TES", "TES"),
    ("Tertiary Education Subsidy", "TES"),
    ("TDP", "TDP"),
    ("Tulong Dunong Program", "TDP"),
];

/// Resolves the three-letter prefix of a scholarship program.
///
/// Tries an exact match, then a case-insensitive match, then a
/// case-insensitive substring match in either direction, and finally falls
/// back to the first three characters of the name.
#[instrument(level = "trace")]
pub fn prefix_for(scholarship_name: &str) -> ScholarshipPrefix {
    let prefix = exact_match(scholarship_name)
        .or_else(|| case_insensitive_match(scholarship_name))
        .or_else(|| substring_match(scholarship_name))
        .map(str::to_string)
        .unwrap_or_else(|| truncated_prefix(scholarship_name));

    ScholarshipPrefix(prefix)
}

fn exact_match(scholarship_name: &str) -> Option<&'static str> {
    PREFIX_TABLE
        .iter()
        .find(|(name, _)| *name == scholarship_name)
        .map(|(_, prefix)| *prefix)
}

fn case_insensitive_match(scholarship_name: &str) -> Option<&'static str> {
    let lowercase = scholarship_name.to_lowercase();
    PREFIX_TABLE
        .iter()
        .find(|(name, _)| name.to_lowercase() == lowercase)
        .map(|(_, prefix)| *prefix)
}

fn substring_match(scholarship_name: &str) -> Option<&'static str> {
    let lowercase = scholarship_name.to_lowercase();
    PREFIX_TABLE
        .iter()
        .find(|(name, _)| {
            let name = name.to_lowercase();
            lowercase.contains(&name) || name.contains(&lowercase)
        })
        .map(|(_, prefix)| *prefix)
}

/// Characters outside `A-Z` become the padding letter so the prefix always
/// matches `[A-Z]{3}`.
fn truncated_prefix(scholarship_name: &str) -> String {
    scholarship_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                c.to_ascii_uppercase()
            } else {
                PADDING
            }
        })
        .chain(std::iter::repeat(PADDING))
        .take(PREFIX_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(name: &str) -> String {
        prefix_for(name).0
    }

    #[test]
    fn table_entries_resolve_in_any_case() {
        for (name, prefix) in PREFIX_TABLE {
            assert_eq!(p(name), prefix);
            assert_eq!(p(&name.to_lowercase()), prefix);
            assert_eq!(p(&name.to_uppercase()), prefix);
        }
    }

    #[test]
    fn documented_examples() {
        assert_eq!(p("merit scholarship"), "MER");
        assert_eq!(p("Random Program"), "RAN");
        assert_eq!(p("AB"), "ABX");
    }

    #[test]
    fn substring_match_in_both_directions() {
        assert_eq!(p("Merit Scholarship 2025 (Engineering)"), "MER");
        assert_eq!(p("needs-based"), "NBG");
        assert_eq!(p("Tulong Dunong"), "TDP");
    }

    // Pins the table-order tie-break: the short "TES" key is checked before
    // any TDP entry, so free text mentioning both resolves to TES.
    #[test]
    fn substring_tie_break_follows_table_order() {
        assert_eq!(p("TDP and TES joint grant"), "TES");
        assert_eq!(p("Tes"), "TES");
        assert_eq!(p("Dunong"), "TDP");
        // "tes" occurs inside "contest", which matches before anything else.
        assert_eq!(p("Essay Contest Prize"), "TES");
        assert_eq!(p("Grant"), "NBG");
    }

    #[test]
    fn empty_name_matches_first_table_entry() {
        assert_eq!(p(""), "MER");
    }

    #[test]
    fn fallback_pads_and_replaces_non_letters() {
        assert_eq!(p("q"), "QXX");
        assert_eq!(p("4-H Club Award"), "XXH");
        assert_eq!(p("Ñandú Fund"), "XAN");
    }

    proptest! {
        #[test]
        fn prefix_is_always_three_uppercase_letters(name in "\\PC{1,40}") {
            let prefix = p(&name);
            prop_assert_eq!(prefix.len(), 3);
            prop_assert!(prefix.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }
}
