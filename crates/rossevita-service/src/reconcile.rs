use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use rossevita_core::AttachmentRecord;
use tracing::warn;

use crate::sources::{ReconcileSource, SourceKind, SOURCE_PRECEDENCE};
use crate::ServiceError;

/// Merges the three attachment listings into one deduplicated view.
///
/// Fetches run concurrently and are all awaited before the merge; a failing
/// source contributes an empty layer. Reconciliation itself never fails;
/// the worst case is an incomplete listing.
pub struct Reconciler {
    table: Arc<dyn ReconcileSource>,
    storage: Arc<dyn ReconcileSource>,
    cache: Arc<dyn ReconcileSource>,
}

impl Reconciler {
    pub fn new(
        table: Arc<dyn ReconcileSource>,
        storage: Arc<dyn ReconcileSource>,
        cache: Arc<dyn ReconcileSource>,
    ) -> Self {
        Self {
            table,
            storage,
            cache,
        }
    }

    pub async fn reconcile(&self) -> Vec<AttachmentRecord> {
        let (table, storage, cache) = tokio::join!(
            self.table.fetch(),
            self.storage.fetch(),
            self.cache.fetch(),
        );
        let layers = [
            (self.table.kind(), layer_or_empty(self.table.kind(), table)),
            (
                self.storage.kind(),
                layer_or_empty(self.storage.kind(), storage),
            ),
            (self.cache.kind(), layer_or_empty(self.cache.kind(), cache)),
        ];
        merge_layers(&layers)
    }
}

fn layer_or_empty(
    kind: SourceKind,
    result: Result<Vec<AttachmentRecord>, ServiceError>,
) -> Vec<AttachmentRecord> {
    match result {
        Ok(records) => records,
        Err(e) => {
            warn!("{kind} source unavailable, contributing nothing: {e}");
            Vec::new()
        }
    }
}

/// Pure merge: fold the layers in `SOURCE_PRECEDENCE` order into a map
/// keyed by `path`. A later layer's present fields overwrite the
/// accumulated record's; fields the later layer leaves unset are kept.
/// Entries without a path are skipped individually. The result is unique
/// by path and sorted by `sort_records`; identical inputs always produce
/// identical output.
pub fn merge_layers(
    layers: &[(SourceKind, Vec<AttachmentRecord>)],
) -> Vec<AttachmentRecord> {
    let mut first_seen: Vec<String> = Vec::new();
    let mut merged: HashMap<String, AttachmentRecord> = HashMap::new();

    for kind in SOURCE_PRECEDENCE {
        for (_, records) in layers.iter().filter(|(k, _)| *k == kind) {
            for record in records {
                if record.path.is_empty() {
                    // Malformed entry: exclude it, not the whole merge
                    continue;
                }
                match merged.get_mut(&record.path) {
                    Some(existing) => overlay(existing, record),
                    None => {
                        first_seen.push(record.path.clone());
                        merged.insert(record.path.clone(), record.clone());
                    }
                }
            }
        }
    }

    let mut result: Vec<AttachmentRecord> = first_seen
        .into_iter()
        .filter_map(|path| merged.remove(&path))
        .collect();
    sort_records(&mut result);
    result
}

fn overlay(base: &mut AttachmentRecord, layer: &AttachmentRecord) {
    if layer.public_url.is_some() {
        base.public_url = layer.public_url.clone();
    }
    if layer.size.is_some() {
        base.size = layer.size;
    }
    if layer.created_at.is_some() {
        base.created_at = layer.created_at;
    }
    if layer.group.is_some() {
        base.group = layer.group.clone();
    }
}

/// Descending by `created_at`; records without a timestamp sort after all
/// dated ones. The sort is stable, so ties keep first-seen merge order.
pub fn sort_records(records: &mut [AttachmentRecord]) {
    records.sort_by(|a, b| match (&a.created_at, &b.created_at) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn record(path: &str) -> AttachmentRecord {
        AttachmentRecord::new(path)
    }

    #[test]
    fn later_source_fields_override_earlier() {
        let table = vec![AttachmentRecord {
            public_url: Some("https://stale/uploads/a.png".into()),
            size: Some(90),
            created_at: Some(at(100)),
            ..record("a.png")
        }];
        let storage = vec![AttachmentRecord {
            public_url: Some("https://host/uploads/a.png".into()),
            size: Some(100),
            created_at: Some(at(120)),
            ..record("a.png")
        }];

        let merged = merge_layers(&[
            (SourceKind::Table, table),
            (SourceKind::Storage, storage),
            (SourceKind::Cache, vec![]),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].public_url.as_deref(),
            Some("https://host/uploads/a.png")
        );
        assert_eq!(merged[0].size, Some(100));
        assert_eq!(merged[0].created_at, Some(at(120)));
    }

    #[test]
    fn later_source_never_erases_earlier_fields() {
        let table = vec![AttachmentRecord {
            public_url: Some("https://host/uploads/a.png".into()),
            size: Some(100),
            created_at: Some(at(100)),
            ..record("a.png")
        }];
        // Cache entry knows only the group
        let cache = vec![AttachmentRecord {
            group: Some("2".into()),
            ..record("a.png")
        }];

        let merged = merge_layers(&[
            (SourceKind::Table, table),
            (SourceKind::Storage, vec![]),
            (SourceKind::Cache, cache),
        ]);

        assert_eq!(merged[0].size, Some(100));
        assert_eq!(
            merged[0].public_url.as_deref(),
            Some("https://host/uploads/a.png")
        );
        assert_eq!(merged[0].group.as_deref(), Some("2"));
    }

    #[test]
    fn layer_declaration_order_does_not_matter() {
        let table = vec![AttachmentRecord {
            size: Some(1),
            ..record("a.png")
        }];
        let cache = vec![AttachmentRecord {
            size: Some(3),
            ..record("a.png")
        }];

        // Cache listed before table: precedence still wins
        let merged = merge_layers(&[
            (SourceKind::Cache, cache),
            (SourceKind::Storage, vec![]),
            (SourceKind::Table, table),
        ]);
        assert_eq!(merged[0].size, Some(3));
    }

    #[test]
    fn duplicate_paths_within_one_source_collapse() {
        let storage = vec![
            AttachmentRecord {
                size: Some(10),
                ..record("a.png")
            },
            AttachmentRecord {
                size: Some(20),
                ..record("a.png")
            },
        ];
        let merged = merge_layers(&[
            (SourceKind::Table, vec![]),
            (SourceKind::Storage, storage),
            (SourceKind::Cache, vec![]),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].size, Some(20));
    }

    #[test]
    fn pathless_entries_are_skipped_not_fatal() {
        let storage = vec![record(""), record("a.png")];
        let merged = merge_layers(&[
            (SourceKind::Table, vec![]),
            (SourceKind::Storage, storage),
            (SourceKind::Cache, vec![]),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].path, "a.png");
    }

    #[test]
    fn sorted_descending_with_undated_records_last() {
        let table = vec![
            AttachmentRecord {
                created_at: Some(at(100)),
                ..record("old.png")
            },
            record("undated-1.png"),
            AttachmentRecord {
                created_at: Some(at(300)),
                ..record("new.png")
            },
            record("undated-2.png"),
            AttachmentRecord {
                created_at: Some(at(200)),
                ..record("mid.png")
            },
        ];
        let merged = merge_layers(&[
            (SourceKind::Table, table),
            (SourceKind::Storage, vec![]),
            (SourceKind::Cache, vec![]),
        ]);
        let paths: Vec<&str> = merged.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "new.png",
                "mid.png",
                "old.png",
                "undated-1.png",
                "undated-2.png"
            ]
        );
    }

    #[test]
    fn merge_is_deterministic_for_identical_inputs() {
        let layers = [
            (
                SourceKind::Table,
                vec![
                    AttachmentRecord {
                        created_at: Some(at(100)),
                        ..record("a.png")
                    },
                    record("x.png"),
                    record("y.png"),
                ],
            ),
            (
                SourceKind::Storage,
                vec![AttachmentRecord {
                    created_at: Some(at(100)),
                    ..record("b.png")
                }],
            ),
            (SourceKind::Cache, vec![record("z.png")]),
        ];
        let first = merge_layers(&layers);
        let second = merge_layers(&layers);
        assert_eq!(first, second);
    }

    #[test]
    fn equal_timestamps_keep_first_seen_order() {
        let table = vec![
            AttachmentRecord {
                created_at: Some(at(100)),
                ..record("first.png")
            },
            AttachmentRecord {
                created_at: Some(at(100)),
                ..record("second.png")
            },
        ];
        let merged = merge_layers(&[
            (SourceKind::Table, table),
            (SourceKind::Storage, vec![]),
            (SourceKind::Cache, vec![]),
        ]);
        let paths: Vec<&str> = merged.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["first.png", "second.png"]);
    }
}
