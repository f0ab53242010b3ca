//! Domain model for gratitude records and the anniversaries attached to them.

use chrono::NaiveDate;
use uuid::Uuid;

/// One act of gratitude. Dates are real calendar dates here; the wire
/// representation in `shared` keeps them as strings.
#[derive(Debug, Clone, PartialEq)]
pub struct GratitudeRecord {
    pub id: String,
    /// `None` for stored records whose date is missing or malformed
    pub date: Option<NaiveDate>,
    pub content: String,
    pub name: String,
    pub nickname: Option<String>,
    pub anniversaries: Vec<Anniversary>,
    pub memo: Option<String>,
    pub photos: Vec<String>,
}

impl GratitudeRecord {
    /// Generate a unique ID for a new record
    pub fn generate_id() -> String {
        format!("gratitude::{}", Uuid::new_v4())
    }

    /// The nickname, treating an empty string as no nickname
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref().filter(|n| !n.is_empty())
    }

    /// Parse a record date. A full timestamp is accepted and cut down to
    /// its date part.
    pub fn parse_date(literal: &str) -> Option<NaiveDate> {
        let date_part = literal.trim().split('T').next()?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// When an anniversary happens, resolved from its stored literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnniversaryDate {
    /// Every year on this month and day
    Recurring { month: u32, day: u32 },
    /// Once, on this date
    Fixed(NaiveDate),
}

impl AnniversaryDate {
    /// Parse "MM-DD", or "YYYY-MM-DD" with the year ignored.
    ///
    /// The month/day pair must exist in a leap year, so "02-29" is accepted.
    pub fn parse_recurring(literal: &str) -> Option<Self> {
        let parts: Vec<&str> = literal.trim().split('-').collect();
        let (month, day) = match parts.as_slice() {
            [month, day] => (*month, *day),
            [year, month, day] => {
                year.trim().parse::<i32>().ok()?;
                (*month, *day)
            }
            _ => return None,
        };

        let month: u32 = month.trim().parse().ok()?;
        let day: u32 = day.trim().parse().ok()?;

        // 2000 is a leap year
        NaiveDate::from_ymd_opt(2000, month, day)?;

        Some(AnniversaryDate::Recurring { month, day })
    }

    /// Parse a full "YYYY-MM-DD" date
    pub fn parse_fixed(literal: &str) -> Option<Self> {
        NaiveDate::parse_from_str(literal.trim(), "%Y-%m-%d")
            .ok()
            .map(AnniversaryDate::Fixed)
    }

    /// The date a recurring month/day falls on in `year`.
    ///
    /// February 29th rolls over to March 1st in non-leap years.
    pub fn recurring_in_year(month: u32, day: u32, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
            if month == 2 && day == 29 {
                NaiveDate::from_ymd_opt(year, 3, 1)
            } else {
                None
            }
        })
    }
}

/// An anniversary as the domain sees it.
///
/// `kind` and `date` are the literals the user entered and are kept verbatim:
/// they identify the anniversary when merging and are echoed back in alerts.
/// `resolved` is computed once when the anniversary is built and is `None`
/// when the literal cannot be parsed; such entries are kept but never alerted.
#[derive(Debug, Clone, PartialEq)]
pub struct Anniversary {
    pub kind: String,
    pub date: String,
    pub recurring: bool,
    pub resolved: Option<AnniversaryDate>,
}

impl Anniversary {
    /// Build an anniversary from stored fields. A missing recurrence flag
    /// means recurring.
    pub fn new(kind: impl Into<String>, date: impl Into<String>, is_recurring: Option<bool>) -> Self {
        let kind = kind.into();
        let date = date.into();
        let recurring = is_recurring.unwrap_or(true);
        let resolved = if recurring {
            AnniversaryDate::parse_recurring(&date)
        } else {
            AnniversaryDate::parse_fixed(&date)
        };

        Self {
            kind,
            date,
            recurring,
            resolved,
        }
    }

    pub fn recurring(kind: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(kind, date, Some(true))
    }

    pub fn fixed(kind: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(kind, date, Some(false))
    }

    /// Both a label and a date were entered
    pub fn is_complete(&self) -> bool {
        !self.kind.is_empty() && !self.date.is_empty()
    }

    /// Same `(type, date)` literals. The recurrence flag is not part of the
    /// comparison.
    pub fn same_entry(&self, other: &Anniversary) -> bool {
        self.kind == other.kind && self.date == other.date
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GratitudeValidationError {
    #[error("Benefactor name cannot be empty")]
    EmptyName,
    #[error("Gratitude content cannot be empty")]
    EmptyContent,
    #[error("Date must be in YYYY-MM-DD format: {0}")]
    InvalidDate(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GratitudeError {
    #[error("Gratitude not found: {0}")]
    NotFound(String),
}
