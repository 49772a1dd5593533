//! Period and list query parameters for the center API
//!
//! A [`PeriodFilter`] is what the console UI manipulates (month picker,
//! quarter picker, custom date range). [`PeriodFilter::resolve`] lowers it
//! to the flat [`PeriodQuery`] wire shape the backend expects; every list
//! and aggregate endpoint takes the same period parameters.

use crate::models::PaymentStatus;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reporting period selected in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
    /// A single calendar month
    Month { year: i32, month: u32 },
    /// A calendar quarter (1-4)
    Quarter { year: i32, quarter: u32 },
    /// A whole calendar year
    Year { year: i32 },
    /// An arbitrary date range, filtered at month granularity
    Custom { start: NaiveDate, end: NaiveDate },
}

impl PeriodFilter {
    /// The current calendar month in local time
    pub fn current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Lower this filter to the wire-level query parameters
    ///
    /// - `Month` carries `year` + `month`
    /// - `Quarter` carries `year` + `startMonth`/`endMonth`
    /// - `Year` carries `year` only
    /// - `Custom` carries `year` + `startMonth`/`endMonth`, plus `endYear`
    ///   when the range crosses a year boundary
    pub fn resolve(&self) -> PeriodQuery {
        match *self {
            Self::Month { year, month } => PeriodQuery {
                year,
                month: Some(month),
                ..PeriodQuery::year_only(year)
            },
            Self::Quarter { year, quarter } => {
                let quarter = quarter.clamp(1, 4);
                let start = 3 * (quarter - 1) + 1;
                PeriodQuery {
                    year,
                    start_month: Some(start),
                    end_month: Some(start + 2),
                    ..PeriodQuery::year_only(year)
                }
            }
            Self::Year { year } => PeriodQuery::year_only(year),
            Self::Custom { start, end } => PeriodQuery {
                year: start.year(),
                start_month: Some(start.month()),
                end_month: Some(end.month()),
                end_year: (end.year() != start.year()).then(|| end.year()),
                ..PeriodQuery::year_only(start.year())
            },
        }
    }
}

impl Default for PeriodFilter {
    fn default() -> Self {
        Self::current_month()
    }
}

/// Flat period query parameters as sent on the wire
///
/// All list and aggregate endpoints accept this shape. Absent fields are
/// omitted from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
}

impl PeriodQuery {
    /// A whole-year query with no month constraints
    pub fn year_only(year: i32) -> Self {
        Self {
            year,
            month: None,
            start_month: None,
            end_month: None,
            end_year: None,
        }
    }

    /// Check whether a record stamped with `year`/`month` falls inside
    /// this period
    pub fn contains(&self, year: i32, month: u32) -> bool {
        match (self.month, self.start_month, self.end_month) {
            (Some(m), _, _) => year == self.year && month == m,
            (None, Some(start), Some(end)) => {
                let end_year = self.end_year.unwrap_or(self.year);
                let index = |y: i32, m: u32| i64::from(y) * 12 + i64::from(m) - 1;
                let at = index(year, month);
                at >= index(self.year, start) && at <= index(end_year, end)
            }
            _ => year == self.year,
        }
    }
}

/// Payment status filter applied to the student and teacher lists
///
/// The transaction list ignores this filter entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// No status constraint
    #[default]
    All,
    Paid,
    Partial,
    Pending,
}

impl StatusFilter {
    /// The wire-level status value, or `None` for [`StatusFilter::All`]
    pub fn as_status(&self) -> Option<PaymentStatus> {
        match self {
            Self::All => None,
            Self::Paid => Some(PaymentStatus::Paid),
            Self::Partial => Some(PaymentStatus::Partial),
            Self::Pending => Some(PaymentStatus::Pending),
        }
    }
}

/// Query parameters for the student and teacher payment list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListQuery {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    pub page: u32,
    pub limit: u32,
}

impl PaymentListQuery {
    /// Build a list query from a resolved period plus list parameters
    pub fn new(period: PeriodQuery, status: Option<PaymentStatus>, page: u32, limit: u32) -> Self {
        Self {
            year: period.year,
            month: period.month,
            start_month: period.start_month,
            end_month: period.end_month,
            end_year: period.end_year,
            status,
            page: page.max(1),
            limit,
        }
    }

    /// The period portion of this query
    pub fn period(&self) -> PeriodQuery {
        PeriodQuery {
            year: self.year,
            month: self.month,
            start_month: self.start_month,
            end_month: self.end_month,
            end_year: self.end_year,
        }
    }
}

/// Query parameters for the other-transaction list endpoint
///
/// Deliberately has no status field: the status filter never applies to
/// transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    pub page: u32,
    pub limit: u32,
}

impl TransactionListQuery {
    /// Build a list query from a resolved period plus list parameters
    pub fn new(period: PeriodQuery, page: u32, limit: u32) -> Self {
        Self {
            year: period.year,
            month: period.month,
            start_month: period.start_month,
            end_month: period.end_month,
            end_year: period.end_year,
            page: page.max(1),
            limit,
        }
    }

    /// The period portion of this query
    pub fn period(&self) -> PeriodQuery {
        PeriodQuery {
            year: self.year,
            month: self.month,
            start_month: self.start_month,
            end_month: self.end_month,
            end_year: self.end_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_resolves_to_year_and_month() {
        let query = PeriodFilter::Month {
            year: 2025,
            month: 3,
        }
        .resolve();
        assert_eq!(query.year, 2025);
        assert_eq!(query.month, Some(3));
        assert_eq!(query.start_month, None);
        assert_eq!(query.end_month, None);
        assert_eq!(query.end_year, None);
    }

    #[test]
    fn test_quarters_resolve_to_month_ranges() {
        let cases = [(1, 1, 3), (2, 4, 6), (3, 7, 9), (4, 10, 12)];
        for (quarter, start, end) in cases {
            let query = PeriodFilter::Quarter {
                year: 2025,
                quarter,
            }
            .resolve();
            assert_eq!(query.year, 2025);
            assert_eq!(query.month, None);
            assert_eq!(query.start_month, Some(start), "quarter {quarter}");
            assert_eq!(query.end_month, Some(end), "quarter {quarter}");
            assert_eq!(query.end_year, None);
        }
    }

    #[test]
    fn test_year_resolves_to_year_only() {
        let query = PeriodFilter::Year { year: 2024 }.resolve();
        assert_eq!(query.year, 2024);
        assert_eq!(query.month, None);
        assert_eq!(query.start_month, None);
        assert_eq!(query.end_month, None);
    }

    #[test]
    fn test_custom_same_year_omits_end_year() {
        let query = PeriodFilter::Custom {
            start: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
        }
        .resolve();
        assert_eq!(query.year, 2025);
        assert_eq!(query.start_month, Some(2));
        assert_eq!(query.end_month, Some(5));
        assert_eq!(query.end_year, None);
    }

    #[test]
    fn test_custom_cross_year_carries_end_year() {
        let query = PeriodFilter::Custom {
            start: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        }
        .resolve();
        assert_eq!(query.year, 2024);
        assert_eq!(query.start_month, Some(11));
        assert_eq!(query.end_month, Some(2));
        assert_eq!(query.end_year, Some(2025));
    }

    #[test]
    fn test_contains_month_mode() {
        let query = PeriodFilter::Month {
            year: 2025,
            month: 3,
        }
        .resolve();
        assert!(query.contains(2025, 3));
        assert!(!query.contains(2025, 4));
        assert!(!query.contains(2024, 3));
    }

    #[test]
    fn test_contains_quarter_range() {
        let query = PeriodFilter::Quarter {
            year: 2025,
            quarter: 2,
        }
        .resolve();
        assert!(query.contains(2025, 4));
        assert!(query.contains(2025, 6));
        assert!(!query.contains(2025, 3));
        assert!(!query.contains(2025, 7));
        assert!(!query.contains(2024, 5));
    }

    #[test]
    fn test_contains_whole_year() {
        let query = PeriodFilter::Year { year: 2025 }.resolve();
        assert!(query.contains(2025, 1));
        assert!(query.contains(2025, 12));
        assert!(!query.contains(2024, 12));
    }

    #[test]
    fn test_contains_cross_year_range() {
        let query = PeriodFilter::Custom {
            start: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        }
        .resolve();
        assert!(query.contains(2024, 11));
        assert!(query.contains(2024, 12));
        assert!(query.contains(2025, 1));
        assert!(query.contains(2025, 2));
        assert!(!query.contains(2024, 10));
        assert!(!query.contains(2025, 3));
    }

    #[test]
    fn test_status_filter_wire_values() {
        assert_eq!(StatusFilter::All.as_status(), None);
        assert_eq!(StatusFilter::Paid.as_status(), Some(PaymentStatus::Paid));
        assert_eq!(
            StatusFilter::Partial.as_status(),
            Some(PaymentStatus::Partial)
        );
        assert_eq!(
            StatusFilter::Pending.as_status(),
            Some(PaymentStatus::Pending)
        );
    }

    #[test]
    fn test_payment_list_query_serialization() {
        let period = PeriodFilter::Month {
            year: 2025,
            month: 7,
        }
        .resolve();
        let query = PaymentListQuery::new(period, Some(PaymentStatus::Partial), 2, 10);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(value["year"], 2025);
        assert_eq!(value["month"], 7);
        assert_eq!(value["status"], "partial");
        assert_eq!(value["page"], 2);
        assert_eq!(value["limit"], 10);
        assert!(value.get("startMonth").is_none());
        assert!(value.get("endYear").is_none());
    }

    #[test]
    fn test_transaction_list_query_has_no_status() {
        let period = PeriodFilter::Quarter {
            year: 2025,
            quarter: 1,
        }
        .resolve();
        let query = TransactionListQuery::new(period, 1, 10);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(value["startMonth"], 1);
        assert_eq!(value["endMonth"], 3);
        assert!(value.get("status").is_none());
        assert!(value.get("month").is_none());
    }

    #[test]
    fn test_page_is_clamped_to_one() {
        let period = PeriodQuery::year_only(2025);
        let query = PaymentListQuery::new(period, None, 0, 10);
        assert_eq!(query.page, 1);
    }
}
