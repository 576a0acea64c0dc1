use rossevita_core::AttachmentRecord;

/// Records with no group tag belong to the first venue tab.
pub const DEFAULT_GROUP: &str = "1";

/// The subsequence of `records` whose group equals `group`, treating a
/// missing group as `DEFAULT_GROUP`. Pure filter; input order is kept and
/// the records are untouched.
pub fn filter_by_group(records: &[AttachmentRecord], group: &str) -> Vec<AttachmentRecord> {
    records
        .iter()
        .filter(|r| r.group.as_deref().unwrap_or(DEFAULT_GROUP) == group)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, group: Option<&str>) -> AttachmentRecord {
        AttachmentRecord {
            group: group.map(String::from),
            ..AttachmentRecord::new(path)
        }
    }

    #[test]
    fn filters_to_requested_group_only() {
        let records = vec![
            record("a.png", Some("2")),
            record("b.png", Some("1")),
            record("c.png", Some("2")),
        ];
        let filtered = filter_by_group(&records, "2");
        let paths: Vec<&str> = filtered.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a.png", "c.png"]);
    }

    #[test]
    fn ungrouped_records_belong_to_the_default_group() {
        let records = vec![record("a.png", None), record("b.png", Some("2"))];

        let under_default = filter_by_group(&records, DEFAULT_GROUP);
        assert_eq!(under_default.len(), 1);
        assert_eq!(under_default[0].path, "a.png");

        // And never appear under another group
        let under_two = filter_by_group(&records, "2");
        assert_eq!(under_two.len(), 1);
        assert_eq!(under_two[0].path, "b.png");
    }

    #[test]
    fn unknown_group_filters_to_empty() {
        let records = vec![record("a.png", None), record("b.png", Some("2"))];
        assert!(filter_by_group(&records, "7").is_empty());
    }
}
