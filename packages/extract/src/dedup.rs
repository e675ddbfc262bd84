//! Document-level deduplication of voter records.

use std::collections::BTreeSet;

use voter_roll_record_models::VoterRecord;

/// Keeps the first record for each `(srNo, voterNameLower)` key, in input
/// order.
///
/// Returns the surviving records and the number dropped.
#[must_use]
pub fn dedup(records: Vec<VoterRecord>) -> (Vec<VoterRecord>, usize) {
    let total = records.len();
    let mut seen = BTreeSet::new();

    let kept: Vec<VoterRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.dedup_key()))
        .collect();

    let dropped = total - kept.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} duplicate records of {total}");
    }

    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use voter_roll_record_models::{Gender, HeaderInfo};

    use super::*;

    fn record(sr_no: &str, name: &str, source: &str) -> VoterRecord {
        VoterRecord {
            sr_no: sr_no.to_string(),
            house_no: String::new(),
            voter_name_hindi: String::new(),
            voter_name: name.to_string(),
            voter_name_lower: name.to_lowercase(),
            father_or_husband_name_hindi: String::new(),
            father_or_husband_name: String::new(),
            father_or_husband_name_lower: String::new(),
            gender: Gender::Female,
            age: 30,
            header: Arc::new(HeaderInfo::unknown()),
            source_file: source.to_string(),
            tag: "1".to_string(),
        }
    }

    #[test]
    fn keeps_first_of_duplicate_keys() {
        let (kept, dropped) = dedup(vec![
            record("1", "Sita", "first"),
            record("1", "Sita", "second"),
        ]);
        assert_eq!(dropped, 1);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_file, "first");
    }

    #[test]
    fn records_differing_in_either_field_survive() {
        let (kept, dropped) = dedup(vec![
            record("1", "Sita", "a"),
            record("2", "Sita", "b"),
            record("1", "Gita", "c"),
        ]);
        assert_eq!(dropped, 0);
        let sources: Vec<_> = kept.iter().map(|r| r.source_file.as_str()).collect();
        assert_eq!(sources, ["a", "b", "c"]);
    }

    #[test]
    fn key_uses_lowercase_name() {
        let (kept, dropped) = dedup(vec![record("7", "Mohan", "a"), record("7", "MOHAN", "b")]);
        assert_eq!(dropped, 1);
        assert_eq!(kept[0].source_file, "a");
    }

    #[test]
    fn empty_input() {
        assert_eq!(dedup(Vec::new()), (Vec::new(), 0));
    }
}
