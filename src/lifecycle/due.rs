//! Calendar-day due date arithmetic

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Transaction, TransactionStatus};

const MONTHS_ID: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

/// "Today" in the dashboard's reference timezone.
///
/// All comparisons truncate timestamps to calendar days in that timezone, so a due date
/// of today is never overdue regardless of the time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    today: NaiveDate,
    tz: FixedOffset,
}

impl CalendarDay {
    pub fn new(today: NaiveDate, tz: FixedOffset) -> Self {
        Self { today, tz }
    }

    pub fn at(now: DateTime<Utc>, tz: FixedOffset) -> Self {
        Self {
            today: now.with_timezone(&tz).date_naive(),
            tz,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// Whole days from today until `at`; negative once `at` is in the past
    pub fn days_until(&self, at: DateTime<Utc>) -> i64 {
        (self.date_of(at) - self.today).num_days()
    }
}

/// Due date summary shown next to an outstanding transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DueInfo {
    pub due_date: NaiveDate,
    /// Long form date, e.g. `25 Juni 2025`
    pub due_label: String,
    /// Days until due; zero on the due date, negative once past
    pub days_remaining: i64,
    pub is_overdue: bool,
    pub days_overdue: i64,
}

impl DueInfo {
    pub fn for_transaction(tx: &Transaction, day: &CalendarDay) -> Self {
        let days_remaining = day.days_until(tx.return_date);
        let due_date = day.date_of(tx.return_date);
        Self {
            due_date,
            due_label: format_long_date(due_date),
            days_remaining,
            is_overdue: is_overdue(tx, day),
            days_overdue: if is_overdue(tx, day) {
                days_overdue(tx, day)
            } else {
                0
            },
        }
    }
}

/// Whether an approved borrow is past its due date
pub fn is_overdue(tx: &Transaction, day: &CalendarDay) -> bool {
    tx.status == TransactionStatus::BorrowApproved && day.today() > day.date_of(tx.return_date)
}

/// Days past due, floored at zero
pub fn days_overdue(tx: &Transaction, day: &CalendarDay) -> i64 {
    (-day.days_until(tx.return_date)).max(0)
}

pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_ID[date.month0() as usize],
        date.year()
    )
}
