//! Distance metrics produced by one aggregation query

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

/// Fallback shown instead of zeros when there is nothing to report
pub const NO_DATA_MESSAGE: &str = "No activity data could be loaded or found.";

/// Convert meters to kilometers rounded to one decimal place.
/// Halves round away from zero, so non-negative distances round half-up.
pub fn round_km(meters: f64) -> f64 {
    (meters / 100.0).round() / 10.0
}

/// Calendar quarter (1-4) for a month (1-12)
pub fn quarter_of(month: u32) -> u32 {
    (month.saturating_sub(1)) / 3 + 1
}

/// Named time range a distance total is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Today,
    Week,
    Month,
    Quarter,
    Year,
    Total,
}

impl Window {
    /// All windows in display order
    pub fn all() -> &'static [Window] {
        &[
            Window::Today,
            Window::Week,
            Window::Month,
            Window::Quarter,
            Window::Year,
            Window::Total,
        ]
    }

    /// Result column name of the aggregation query
    pub fn column(self) -> &'static str {
        match self {
            Self::Today => "today_distance",
            Self::Week => "week_distance",
            Self::Month => "month_distance",
            Self::Quarter => "quarter_distance",
            Self::Year => "year_distance",
            Self::Total => "total_distance",
        }
    }

    /// Display label; quarter and year labels name the period of `now`
    pub fn label(self, now: NaiveDateTime) -> String {
        match self {
            Self::Today => "Today".to_string(),
            Self::Week => "This Week".to_string(),
            Self::Month => "This Month".to_string(),
            Self::Quarter => format!("Q{} {}", quarter_of(now.month()), now.year()),
            Self::Year => format!("Year {}", now.year()),
            Self::Total => "Total".to_string(),
        }
    }
}

/// Raw meter sums returned by the aggregation query, one per window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowTotals {
    pub today: f64,
    pub week: f64,
    pub month: f64,
    pub quarter: f64,
    pub year: f64,
    pub total: f64,
}

/// Six rounded kilometer totals for one user, computed against one `now`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub today_distance: f64,
    pub week_distance: f64,
    pub month_distance: f64,
    pub quarter_distance: f64,
    pub year_distance: f64,
    pub total_distance: f64,
    /// Number of records owned by the user (0 means "no data")
    pub record_count: u64,
    /// Reference time every window was evaluated against
    pub computed_at: NaiveDateTime,
}

impl MetricsSnapshot {
    /// Zeroed snapshot, used as the empty state when loading fails
    pub fn empty(computed_at: NaiveDateTime) -> Self {
        Self::from_meters(WindowTotals::default(), 0, computed_at)
    }

    pub fn from_meters(
        totals: WindowTotals,
        record_count: u64,
        computed_at: NaiveDateTime,
    ) -> Self {
        Self {
            today_distance: round_km(totals.today),
            week_distance: round_km(totals.week),
            month_distance: round_km(totals.month),
            quarter_distance: round_km(totals.quarter),
            year_distance: round_km(totals.year),
            total_distance: round_km(totals.total),
            record_count,
            computed_at,
        }
    }

    pub fn has_data(&self) -> bool {
        self.record_count > 0
    }

    /// Kilometers for a single window
    pub fn distance(&self, window: Window) -> f64 {
        match window {
            Window::Today => self.today_distance,
            Window::Week => self.week_distance,
            Window::Month => self.month_distance,
            Window::Quarter => self.quarter_distance,
            Window::Year => self.year_distance,
            Window::Total => self.total_distance,
        }
    }
}
