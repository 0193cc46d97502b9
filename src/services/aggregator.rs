//! Aggregator service for computing distance metrics from the roadbook database

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, warn};

use crate::types::{MetricsSnapshot, Result, WindowTotals};

/// The roadbook is single-user; every query is scoped to this owner.
pub const DEFAULT_USER_ID: i64 = 1;

/// Format used to hand `now` to SQLite date functions
const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sums meters per window in a single pass over the user's activities.
/// `?1` is the reference time, `?2` the user id. Weeks follow SQLite `%W`
/// numbering: Monday start, week 00 before the first Monday of the year.
const METRICS_QUERY: &str = "
    SELECT
        COALESCE(SUM(CASE
            WHEN date(date) = date(?1)
            THEN distance END), 0) AS today_distance,
        COALESCE(SUM(CASE
            WHEN strftime('%Y-%W', date) = strftime('%Y-%W', ?1)
            THEN distance END), 0) AS week_distance,
        COALESCE(SUM(CASE
            WHEN strftime('%Y-%m', date) = strftime('%Y-%m', ?1)
            THEN distance END), 0) AS month_distance,
        COALESCE(SUM(CASE
            WHEN ((CAST(strftime('%m', date) AS INTEGER) - 1) / 3) =
                 ((CAST(strftime('%m', ?1) AS INTEGER) - 1) / 3)
            AND strftime('%Y', date) = strftime('%Y', ?1)
            THEN distance END), 0) AS quarter_distance,
        COALESCE(SUM(CASE
            WHEN strftime('%Y', date) = strftime('%Y', ?1)
            THEN distance END), 0) AS year_distance,
        COALESCE(SUM(distance), 0) AS total_distance,
        COUNT(*) AS record_count
    FROM t_activities
    WHERE userid = ?2
";

/// Computes [`MetricsSnapshot`]s for one data source
#[derive(Debug, Clone)]
pub struct Aggregator {
    db_path: PathBuf,
    user_id: i64,
}

impl Aggregator {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            user_id: DEFAULT_USER_ID,
        }
    }

    /// Data source identity (also the cache key)
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Compute a snapshot relative to the local wall clock
    pub fn snapshot(&self) -> Result<MetricsSnapshot> {
        self.snapshot_at(Local::now().naive_local())
    }

    /// Compute a snapshot with every window evaluated against `now`.
    /// The read-only connection lives only for the duration of this call.
    pub fn snapshot_at(&self, now: NaiveDateTime) -> Result<MetricsSnapshot> {
        let started = Instant::now();
        let result = self.query(now);

        match &result {
            Ok(snapshot) => debug!(
                db = %self.db_path.display(),
                records = snapshot.record_count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "computed metrics snapshot"
            ),
            Err(e) => warn!(db = %self.db_path.display(), error = %e, "metrics query failed"),
        }

        result
    }

    fn query(&self, now: NaiveDateTime) -> Result<MetricsSnapshot> {
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let now_text = now.format(SQLITE_DATETIME_FORMAT).to_string();
        let (totals, record_count) =
            conn.query_row(METRICS_QUERY, params![now_text, self.user_id], |row| {
                let totals = WindowTotals {
                    today: row.get("today_distance")?,
                    week: row.get("week_distance")?,
                    month: row.get("month_distance")?,
                    quarter: row.get("quarter_distance")?,
                    year: row.get("year_distance")?,
                    total: row.get("total_distance")?,
                };
                let count: i64 = row.get("record_count")?;
                Ok((totals, count.max(0) as u64))
            })?;

        Ok(MetricsSnapshot::from_meters(totals, record_count, now))
    }
}
