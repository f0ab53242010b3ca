//! backend/src/io/rest/mappers/gratitude_mapper.rs

use indexmap::IndexMap;
use log::warn;
use shared::{
    Anniversary as SharedAnniversary, BenefactorGroup as SharedBenefactorGroup,
    BenefactorGroupListResponse, GratitudeListResponse, GratitudeRecord as SharedGratitudeRecord,
    GratitudeResponse, SaveGratitudeRequest,
};

use crate::domain::benefactor_service::BenefactorGroup as DomainBenefactorGroup;
use crate::domain::commands::gratitude::{ImportGratitudeCommand, SaveGratitudeCommand};
use crate::domain::models::gratitude::{
    Anniversary as DomainAnniversary, GratitudeRecord as DomainGratitudeRecord,
};

/// Mapper to convert between shared gratitude DTOs and domain models.
pub struct GratitudeMapper;

impl GratitudeMapper {
    /// Converts a stored/wire record to the domain model.
    ///
    /// Accepts a full timestamp as well as a plain date; only the date part
    /// is kept. A missing or malformed date leaves the record undated.
    pub fn to_domain(dto: SharedGratitudeRecord) -> DomainGratitudeRecord {
        let date = DomainGratitudeRecord::parse_date(&dto.date);
        if date.is_none() {
            warn!("Gratitude {} has no usable date: '{}'", dto.id, dto.date);
        }

        DomainGratitudeRecord {
            id: dto.id,
            date,
            content: dto.content,
            name: dto.name,
            nickname: dto.nickname,
            anniversaries: dto
                .anniversaries
                .into_iter()
                .map(Self::anniversary_to_domain)
                .collect(),
            memo: dto.memo,
            photos: dto.photos,
        }
    }

    /// Converts a domain record to the wire shape. The recurrence flag is
    /// always written out; an undated record is written with an empty date.
    pub fn to_dto(domain: DomainGratitudeRecord) -> SharedGratitudeRecord {
        SharedGratitudeRecord {
            id: domain.id,
            date: domain
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            content: domain.content,
            name: domain.name,
            nickname: domain.nickname,
            anniversaries: domain
                .anniversaries
                .into_iter()
                .map(Self::anniversary_to_dto)
                .collect(),
            memo: domain.memo,
            photos: domain.photos,
        }
    }

    pub fn anniversary_to_domain(dto: SharedAnniversary) -> DomainAnniversary {
        DomainAnniversary::new(dto.kind, dto.date, dto.is_recurring)
    }

    pub fn anniversary_to_dto(domain: DomainAnniversary) -> SharedAnniversary {
        SharedAnniversary {
            kind: domain.kind,
            date: domain.date,
            is_recurring: Some(domain.recurring),
        }
    }

    pub fn to_save_command(request: SaveGratitudeRequest) -> SaveGratitudeCommand {
        SaveGratitudeCommand {
            date: request.date,
            content: request.content,
            name: request.name,
            nickname: request.nickname,
            anniversaries: request
                .anniversaries
                .into_iter()
                .map(Self::anniversary_to_domain)
                .collect(),
            memo: request.memo,
            photos: request.photos,
        }
    }

    pub fn to_import_command(dto: SharedGratitudeRecord) -> ImportGratitudeCommand {
        ImportGratitudeCommand {
            id: dto.id,
            record: SaveGratitudeCommand {
                date: dto.date,
                content: dto.content,
                name: dto.name,
                nickname: dto.nickname,
                anniversaries: dto
                    .anniversaries
                    .into_iter()
                    .map(Self::anniversary_to_domain)
                    .collect(),
                memo: dto.memo,
                photos: dto.photos,
            },
        }
    }

    pub fn to_gratitude_response_dto(domain: DomainGratitudeRecord, message: &str) -> GratitudeResponse {
        GratitudeResponse {
            gratitude: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_gratitude_list_dto(records: Vec<DomainGratitudeRecord>) -> GratitudeListResponse {
        GratitudeListResponse {
            gratitudes: records.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_group_dto(domain: DomainBenefactorGroup) -> SharedBenefactorGroup {
        SharedBenefactorGroup {
            key: domain.key,
            name: domain.name,
            nickname: domain.nickname,
            anniversaries: domain
                .anniversaries
                .into_iter()
                .map(Self::anniversary_to_dto)
                .collect(),
            gratitudes: domain.gratitudes.into_iter().map(Self::to_dto).collect(),
        }
    }

    /// Groups keep their first-seen order
    pub fn to_group_list_dto(groups: IndexMap<String, DomainBenefactorGroup>) -> BenefactorGroupListResponse {
        BenefactorGroupListResponse {
            groups: groups.into_values().map(Self::to_group_dto).collect(),
        }
    }
}
