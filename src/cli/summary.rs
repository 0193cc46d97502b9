//! `roadbook summary` subcommand printing the distance totals once

use std::fmt::Write as _;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::services::Aggregator;
use crate::types::{MetricsSnapshot, Result, Window, NO_DATA_MESSAGE};

/// Print distance totals
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let aggregator = Aggregator::new(&config.db_path);
        let report = SummaryReport::from_result(aggregator.snapshot(), Local::now().naive_local());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", report.render_text());
        }
        Ok(())
    }
}

/// Snapshot plus the warning raised when it could not be loaded
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub has_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub metrics: MetricsSnapshot,
}

impl SummaryReport {
    /// A failed load becomes a warning with zeroed metrics
    pub fn from_result(result: Result<MetricsSnapshot>, now: NaiveDateTime) -> Self {
        match result {
            Ok(metrics) => Self {
                has_data: metrics.has_data(),
                warning: None,
                metrics,
            },
            Err(e) => Self {
                has_data: false,
                warning: Some(format!("Could not load activity data: {}", e)),
                metrics: MetricsSnapshot::empty(now),
            },
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Roadbook: Activities");

        if let Some(warning) = &self.warning {
            let _ = writeln!(out, "Warning: {}", warning);
        }
        if !self.has_data {
            let _ = writeln!(out, "{}", NO_DATA_MESSAGE);
            return out;
        }

        let now = self.metrics.computed_at;
        for window in Window::all() {
            let _ = writeln!(
                out,
                "  {:<14}{:>10.1} km",
                window.label(now),
                self.metrics.distance(*window)
            );
        }
        let _ = writeln!(
            out,
            "  {} records as of {}",
            self.metrics.record_count,
            now.format("%Y-%m-%d %H:%M")
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoadbookError, WindowTotals};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn snapshot() -> MetricsSnapshot {
        let totals = WindowTotals {
            today: 5000.0,
            week: 8000.0,
            month: 8000.0,
            quarter: 8000.0,
            year: 100_000.0,
            total: 100_000.0,
        };
        MetricsSnapshot::from_meters(totals, 3, now())
    }

    #[test]
    fn test_report_from_snapshot() {
        let report = SummaryReport::from_result(Ok(snapshot()), now());
        assert!(report.has_data);
        assert!(report.warning.is_none());

        let text = report.render_text();
        assert!(text.contains("Today"));
        assert!(text.contains("5.0 km"));
        assert!(text.contains("Q4 2026"));
        assert!(text.contains("100.0 km"));
        assert!(text.contains("3 records as of 2026-10-15 12:00"));
        assert!(!text.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_report_from_error_shows_fallback() {
        let err = RoadbookError::DataUnavailable("unable to open database file".into());
        let report = SummaryReport::from_result(Err(err), now());

        assert!(!report.has_data);
        assert_eq!(report.metrics.total_distance, 0.0);

        let text = report.render_text();
        assert!(text.contains("Warning: Could not load activity data"));
        assert!(text.contains(NO_DATA_MESSAGE));
        assert!(!text.contains(" km"));
    }

    #[test]
    fn test_report_without_records_shows_fallback() {
        let report = SummaryReport::from_result(Ok(MetricsSnapshot::empty(now())), now());
        assert!(!report.has_data);
        assert!(report.warning.is_none());
        assert!(report.render_text().contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_report_json_shape() {
        let report = SummaryReport::from_result(Ok(snapshot()), now());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["has_data"], true);
        assert!(json.get("warning").is_none());
        assert_eq!(json["metrics"]["week_distance"], 8.0);
        assert_eq!(json["metrics"]["record_count"], 3);
    }
}
