use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One timeline item, normalized for a single source account.
///
/// `created_at` keeps the offset the source supplied; it is never shifted to
/// UTC or local time. `source_account` is the account the item was fetched
/// for, which is not necessarily its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Server-assigned id. Kept as a string because values exceed 2^53.
    pub id: String,
    pub created_at: DateTime<FixedOffset>,
    pub source_account: String,
    pub text: String,
    /// Distinct mentioned accounts other than `source_account`.
    pub cross_mention_count: usize,
}

impl PostRecord {
    /// Counts distinct mentions, case-insensitively, skipping the source
    /// account itself.
    #[must_use]
    pub fn count_cross_mentions<'a, I>(source_account: &str, mentions: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let own = source_account.to_lowercase();
        let mut seen: Vec<String> = Vec::new();
        for mention in mentions {
            let lower = mention.to_lowercase();
            if lower == own || seen.contains(&lower) {
                continue;
            }
            seen.push(lower);
        }
        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_mentions_exclude_self_case_insensitively() {
        let count = PostRecord::count_cross_mentions(
            "pay_by_phone",
            ["Pay_By_Phone", "miamiparking", "EasyParkAlaska"],
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn cross_mentions_count_distinct_names_once() {
        let count =
            PostRecord::count_cross_mentions("PayByPhone_UK", ["gep13", "GEP13", "gep13"]);
        assert_eq!(count, 1);
    }

    #[test]
    fn cross_mentions_empty_is_zero() {
        assert_eq!(PostRecord::count_cross_mentions("PayByPhone", []), 0);
    }

    #[test]
    fn serializes_created_at_with_its_offset() {
        let record = PostRecord {
            id: "402483067123933184".to_string(),
            created_at: DateTime::parse_from_rfc3339("2013-11-18T09:06:55-08:00").unwrap(),
            source_account: "pay_by_phone".to_string(),
            text: "@nigelarthur Please contact the UK team".to_string(),
            cross_mention_count: 2,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("2013-11-18T09:06:55-08:00"), "got: {json}");
        assert!(json.contains("\"id\":\"402483067123933184\""));
    }
}
