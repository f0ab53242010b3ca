//! backend/src/io/rest/mappers/anniversary_mapper.rs

use chrono::NaiveDate;
use shared::{
    AlertSummary as SharedAlertSummary, AnniversaryAlert as SharedAnniversaryAlert,
    UpcomingAnniversariesResponse, UpcomingAnniversary,
};

use crate::domain::anniversary_service::{AlertSummary, AnniversaryAlert, UpcomingOccurrence};

/// Mapper from anniversary projections to their DTOs.
pub struct AnniversaryMapper;

impl AnniversaryMapper {
    pub fn to_upcoming_dto(domain: UpcomingOccurrence) -> UpcomingAnniversary {
        UpcomingAnniversary {
            name: domain.name,
            kind: domain.kind,
            date: domain.date.format("%Y-%m-%d").to_string(),
            days_until: domain.days_until,
            original_date: domain.original_date,
        }
    }

    pub fn to_alert_dto(domain: AnniversaryAlert) -> SharedAnniversaryAlert {
        SharedAnniversaryAlert {
            anniversary: Self::to_upcoming_dto(domain.occurrence),
            urgency: domain.urgency,
            label: domain.label,
        }
    }

    pub fn to_alert_summary_dto(domain: AlertSummary) -> SharedAlertSummary {
        SharedAlertSummary {
            shown: domain.shown.into_iter().map(Self::to_alert_dto).collect(),
            remaining: domain.remaining,
        }
    }

    pub fn to_upcoming_response(
        today: NaiveDate,
        upcoming: Vec<UpcomingOccurrence>,
        alert: AlertSummary,
    ) -> UpcomingAnniversariesResponse {
        UpcomingAnniversariesResponse {
            today: today.format("%Y-%m-%d").to_string(),
            upcoming: upcoming.into_iter().map(Self::to_upcoming_dto).collect(),
            alert: Self::to_alert_summary_dto(alert),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AlertUrgency;

    #[test]
    fn test_to_upcoming_dto_formats_date() {
        let occurrence = UpcomingOccurrence {
            name: "Kim".to_string(),
            kind: "birthday".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            days_until: 5,
            original_date: "01-05".to_string(),
        };

        let dto = AnniversaryMapper::to_upcoming_dto(occurrence);

        assert_eq!(dto.date, "2025-01-05");
        assert_eq!(dto.original_date, "01-05");
        assert_eq!(dto.days_until, 5);
    }

    #[test]
    fn test_to_upcoming_response() {
        let occurrence = UpcomingOccurrence {
            name: "Kim".to_string(),
            kind: "birthday".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            days_until: 0,
            original_date: "06-01".to_string(),
        };
        let alert = AlertSummary {
            shown: vec![AnniversaryAlert {
                occurrence: occurrence.clone(),
                urgency: AlertUrgency::Today,
                label: "Today!".to_string(),
            }],
            remaining: 0,
        };

        let response = AnniversaryMapper::to_upcoming_response(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            vec![occurrence],
            alert,
        );

        assert_eq!(response.today, "2024-06-01");
        assert_eq!(response.upcoming.len(), 1);
        assert_eq!(response.alert.shown[0].label, "Today!");
        assert_eq!(response.alert.shown[0].urgency, AlertUrgency::Today);
    }
}
