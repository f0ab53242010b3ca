//! Anniversary projection for the gratitude tracker.
//!
//! Given today's date and a user's records, this works out which
//! anniversaries fall within the alert horizon and how many days away each
//! one is. Recurring anniversaries are moved to their next occurrence; fixed
//! ones are taken as-is and dropped once they have passed.
//!
//! Everything here is a pure function of its inputs. Malformed anniversaries
//! are skipped, never reported.

use chrono::{Datelike, NaiveDate};
use log::debug;
use shared::AlertUrgency;

use crate::domain::models::gratitude::{Anniversary, AnniversaryDate, GratitudeRecord};

/// Anniversaries further away than this many days are not reported
pub const ALERT_HORIZON_DAYS: i64 = 30;

/// How many alerts the banner shows before collapsing the rest into a count
pub const ALERTS_SHOWN: usize = 3;

/// One resolved future instance of an anniversary
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingOccurrence {
    pub name: String,
    pub kind: String,
    pub date: NaiveDate,
    pub days_until: u32,
    pub original_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnniversaryAlert {
    pub occurrence: UpcomingOccurrence,
    pub urgency: AlertUrgency,
    pub label: String,
}

/// The first few alerts plus how many were left out
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSummary {
    pub shown: Vec<AnniversaryAlert>,
    pub remaining: usize,
}

/// Service that projects anniversaries onto the calendar
#[derive(Clone, Default)]
pub struct AnniversaryService;

impl AnniversaryService {
    pub fn new() -> Self {
        Self
    }

    /// Every anniversary occurring within the horizon, soonest first.
    ///
    /// Ties keep the order in which records and their anniversaries were given.
    pub fn project(&self, records: &[GratitudeRecord], today: NaiveDate) -> Vec<UpcomingOccurrence> {
        let mut upcoming: Vec<UpcomingOccurrence> = records
            .iter()
            .flat_map(|record| {
                record
                    .anniversaries
                    .iter()
                    .filter_map(move |anniversary| self.occurrence_for(record, anniversary, today))
            })
            .collect();

        // sort_by_key is stable
        upcoming.sort_by_key(|occurrence| occurrence.days_until);

        debug!(
            "Projected {} upcoming anniversaries from {} records as of {}",
            upcoming.len(),
            records.len(),
            today
        );
        upcoming
    }

    /// Resolve a single anniversary, or `None` if it is malformed, already
    /// past, or beyond the horizon.
    fn occurrence_for(
        &self,
        record: &GratitudeRecord,
        anniversary: &Anniversary,
        today: NaiveDate,
    ) -> Option<UpcomingOccurrence> {
        if !anniversary.is_complete() {
            return None;
        }

        let date = self.next_occurrence(anniversary.resolved?, today)?;
        let days_until = (date - today).num_days();
        if !(0..=ALERT_HORIZON_DAYS).contains(&days_until) {
            return None;
        }

        Some(UpcomingOccurrence {
            name: record.name.clone(),
            kind: anniversary.kind.clone(),
            date,
            days_until: days_until as u32,
            original_date: anniversary.date.clone(),
        })
    }

    /// The first date on or after `today` on which the anniversary falls
    pub fn next_occurrence(&self, when: AnniversaryDate, today: NaiveDate) -> Option<NaiveDate> {
        match when {
            AnniversaryDate::Recurring { month, day } => {
                let this_year = AnniversaryDate::recurring_in_year(month, day, today.year())?;
                if this_year < today {
                    AnniversaryDate::recurring_in_year(month, day, today.year() + 1)
                } else {
                    Some(this_year)
                }
            }
            AnniversaryDate::Fixed(date) => (date >= today).then_some(date),
        }
    }

    /// Build the alert banner from a projection
    pub fn alert_summary(&self, upcoming: &[UpcomingOccurrence]) -> AlertSummary {
        let shown = upcoming
            .iter()
            .take(ALERTS_SHOWN)
            .map(|occurrence| AnniversaryAlert {
                occurrence: occurrence.clone(),
                urgency: self.urgency(occurrence.days_until),
                label: self.days_label(occurrence.days_until),
            })
            .collect();

        AlertSummary {
            shown,
            remaining: upcoming.len().saturating_sub(ALERTS_SHOWN),
        }
    }

    pub fn urgency(&self, days_until: u32) -> AlertUrgency {
        match days_until {
            0 => AlertUrgency::Today,
            1..=7 => AlertUrgency::ThisWeek,
            _ => AlertUrgency::Upcoming,
        }
    }

    pub fn days_label(&self, days_until: u32) -> String {
        match days_until {
            0 => "Today!".to_string(),
            1 => "Tomorrow".to_string(),
            n => format!("In {} days", n),
        }
    }
}
