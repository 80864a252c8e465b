use crate::storage::ObjectRecord;

/// The split of a listing into objects to keep and objects to delete.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RetentionPlan {
    /// Newest first.
    pub retained: Vec<ObjectRecord>,
    /// Newest first for `keep_newest`, listing order for `expire_all`.
    pub expired: Vec<ObjectRecord>,
}

impl RetentionPlan {
    /// Keeps the `keep` most recently modified records and expires the rest.
    ///
    /// Records are sorted by `last_modified` descending with a stable sort, so
    /// equal timestamps keep their listing order. `expired.len()` is always
    /// `records.len().saturating_sub(keep)`.
    pub fn keep_newest(mut records: Vec<ObjectRecord>, keep: usize) -> Self {
        sort_newest_first(&mut records);
        let expired = if records.len() > keep {
            records.split_off(keep)
        } else {
            Vec::new()
        };
        Self {
            retained: records,
            expired,
        }
    }

    /// Expires every record unconditionally.
    pub fn expire_all(records: Vec<ObjectRecord>) -> Self {
        Self {
            retained: Vec::new(),
            expired: records,
        }
    }

    pub fn total(&self) -> usize {
        self.retained.len() + self.expired.len()
    }

    pub fn is_noop(&self) -> bool {
        self.expired.is_empty()
    }

    pub fn expired_keys(&self) -> Vec<String> {
        self.expired.iter().map(|record| record.key.clone()).collect()
    }
}

pub fn sort_newest_first(records: &mut [ObjectRecord]) {
    records.sort_by(|a, b| b.modified_at().cmp(&a.modified_at()));
}
