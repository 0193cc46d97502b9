//! Session-scoped snapshot cache
//!
//! Holds at most one snapshot per data source so the dashboard can redraw
//! without re-querying. Nothing is persisted; entries live as long as the
//! owning session and are dropped explicitly on refresh.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::services::Aggregator;
use crate::types::{MetricsSnapshot, Result};

#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: HashMap<PathBuf, MetricsSnapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for the aggregator's data source, or
    /// compute one against `now` and remember it. Failures are not cached.
    pub fn get_or_compute(
        &mut self,
        aggregator: &Aggregator,
        now: NaiveDateTime,
    ) -> Result<MetricsSnapshot> {
        if let Some(snapshot) = self.entries.get(aggregator.db_path()) {
            debug!(db = %aggregator.db_path().display(), "snapshot cache hit");
            return Ok(snapshot.clone());
        }

        let snapshot = aggregator.snapshot_at(now)?;
        self.entries
            .insert(aggregator.db_path().to_path_buf(), snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the entry for one data source; returns whether one existed
    pub fn invalidate(&mut self, db_path: &Path) -> bool {
        self.entries.remove(db_path).is_some()
    }
}

#[allow(dead_code)] // Inspection helpers, exercised by tests
impl SnapshotCache {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn create_db(temp: &TempDir, name: &str, meters: f64) -> Aggregator {
        let path = temp.path().join(name);
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE t_activities (userid INTEGER, date TEXT, distance REAL)",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO t_activities VALUES (1, '2026-10-15', ?1)",
            [meters],
        )
        .unwrap();
        Aggregator::new(path)
    }

    fn add_record(aggregator: &Aggregator, meters: f64) {
        let conn = Connection::open(aggregator.db_path()).unwrap();
        conn.execute(
            "INSERT INTO t_activities VALUES (1, '2026-10-15', ?1)",
            [meters],
        )
        .unwrap();
    }

    #[test]
    fn test_miss_then_hit() {
        let temp = TempDir::new().unwrap();
        let aggregator = create_db(&temp, "a.sqlite", 1000.0);
        let mut cache = SnapshotCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_compute(&aggregator, at(2026, 10, 15)).unwrap();
        assert_eq!(first.total_distance, 1.0);
        assert_eq!(cache.len(), 1);

        // New data is not visible until the entry is invalidated
        add_record(&aggregator, 2000.0);
        let second = cache.get_or_compute(&aggregator, at(2026, 10, 15)).unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let temp = TempDir::new().unwrap();
        let aggregator = create_db(&temp, "a.sqlite", 1000.0);
        let mut cache = SnapshotCache::new();
        cache.get_or_compute(&aggregator, at(2026, 10, 15)).unwrap();

        add_record(&aggregator, 2000.0);
        assert!(cache.invalidate(aggregator.db_path()));
        assert!(!cache.invalidate(aggregator.db_path()));

        let fresh = cache.get_or_compute(&aggregator, at(2026, 10, 15)).unwrap();
        assert_eq!(fresh.total_distance, 3.0);
    }

    #[test]
    fn test_keyed_by_data_source() {
        let temp = TempDir::new().unwrap();
        let a = create_db(&temp, "a.sqlite", 1000.0);
        let b = create_db(&temp, "b.sqlite", 4000.0);
        let mut cache = SnapshotCache::new();

        let snap_a = cache.get_or_compute(&a, at(2026, 10, 15)).unwrap();
        let snap_b = cache.get_or_compute(&b, at(2026, 10, 15)).unwrap();

        assert_eq!(snap_a.total_distance, 1.0);
        assert_eq!(snap_b.total_distance, 4.0);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let temp = TempDir::new().unwrap();
        let aggregator = Aggregator::new(temp.path().join("missing.sqlite"));
        let mut cache = SnapshotCache::new();

        assert!(cache.get_or_compute(&aggregator, at(2026, 10, 15)).is_err());
        assert!(cache.is_empty());
    }
}
