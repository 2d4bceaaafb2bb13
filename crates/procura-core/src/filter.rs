//! Listing filters and aggregate statistics.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::RequestStatus;

/// An inclusive date range matched against `created_at`.
///
/// The range covers `start` from 00:00:00 through `end` at 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    /// The UTC timestamp bounds of the range: start of the first day and
    /// 23:59:59 of the last day, both inclusive.
    #[must_use]
    pub fn bounds_utc(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start.and_time(NaiveTime::MIN).and_utc();
        let end = self
            .end
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.end.and_time(NaiveTime::MIN))
            .and_utc();
        (start, end)
    }

    /// Whether a timestamp falls within the range.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds_utc();
        ts >= start && ts <= end
    }
}

/// Filter for listing purchase requests.
///
/// Every predicate is optional; set predicates combine with logical AND.
/// This is deliberately a small data structure rather than a query string:
/// the storage layer composes it into a parameterized query at the boundary.
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    /// Match `created_at` within this range.
    pub date_range: Option<DateRange>,

    /// Exact match on payment method.
    pub payment_method: Option<String>,

    /// Case-insensitive substring match against vendor name OR requester
    /// name.
    pub search_text: Option<String>,

    /// Exact match on status.
    pub status: Option<RequestStatus>,
}

impl ListFilter {
    /// Whether no predicate is set (the unfiltered listing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none()
            && self.payment_method.is_none()
            && self.search_text.is_none()
            && self.status.is_none()
    }
}

/// Aggregate statistics over the whole request table.
///
/// Computed from current store state on every call; an empty store yields
/// all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    /// Number of pending requests.
    pub pending: i64,
    /// Number of approved requests.
    pub approved: i64,
    /// Number of rejected requests.
    pub rejected: i64,
    /// Sum of amounts over approved requests, in cents.
    pub approved_amount_cents: i64,
    /// Sum of amounts over pending requests, in cents.
    pub pending_amount_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let r = range((2024, 3, 1), (2024, 3, 2));

        let first_instant = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let last_second = Utc.with_ymd_and_hms(2024, 3, 2, 23, 59, 59).unwrap();
        let day_after = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        let day_before = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();

        assert!(r.contains(first_instant));
        assert!(r.contains(last_second));
        assert!(!r.contains(day_after));
        assert!(!r.contains(day_before));
    }

    #[test]
    fn empty_filter_reports_empty() {
        assert!(ListFilter::default().is_empty());

        let filter = ListFilter {
            status: Some(RequestStatus::Pending),
            ..ListFilter::default()
        };
        assert!(!filter.is_empty());
    }
}
