//! Date windows used to scope expense and contract lookups.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A closed date window with an optional end.
///
/// An open end means "up to now" for the CRM queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<FixedOffset>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl DateWindow {
    pub fn new(start: DateTime<FixedOffset>, end: Option<DateTime<FixedOffset>>) -> Self {
        Self { start, end }
    }

    /// Whether `at` falls inside the window (calendar-day granularity).
    pub fn contains(&self, at: &DateTime<FixedOffset>) -> bool {
        let day = at.date_naive();
        if day < self.start.date_naive() {
            return false;
        }
        match self.end {
            Some(end) => day <= end.date_naive(),
            None => true,
        }
    }
}

/// Format a date the way the dashboard tables show it (`dd/mm/YYYY`).
pub fn display_date(at: &DateTime<FixedOffset>) -> String {
    at.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn window_bounds_are_inclusive_by_day() {
        let w = DateWindow::new(
            at("2024-01-01T00:00:00+01:00"),
            Some(at("2024-01-31T00:00:00+01:00")),
        );
        assert!(w.contains(&at("2024-01-01T09:00:00+01:00")));
        assert!(w.contains(&at("2024-01-31T18:00:00+01:00")));
        assert!(!w.contains(&at("2023-12-31T23:00:00+01:00")));
        assert!(!w.contains(&at("2024-02-01T00:00:00+01:00")));
    }

    #[test]
    fn open_window_has_no_upper_bound() {
        let w = DateWindow::new(at("2024-01-01T00:00:00+01:00"), None);
        assert!(w.contains(&at("2030-06-01T00:00:00+01:00")));
    }

    #[test]
    fn displays_french_style_dates() {
        assert_eq!(display_date(&at("2024-12-06T00:00:00+01:00")), "06/12/2024");
    }
}
