//! # Gratitude Service
//!
//! Manages a user's gratitude records: validation on create and edit,
//! deletion, export/import, and the derived views (upcoming anniversaries and
//! benefactor groups) that are recomputed from the stored collection on every
//! request.

use anyhow::Result;
use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::anniversary_service::{AnniversaryService, UpcomingOccurrence};
use crate::domain::benefactor_service::{BenefactorGroup, BenefactorService};
use crate::domain::commands::gratitude::{ImportGratitudeCommand, SaveGratitudeCommand};
use crate::domain::models::gratitude::{GratitudeError, GratitudeRecord, GratitudeValidationError};
use crate::io::rest::mappers::gratitude_mapper::GratitudeMapper;
use crate::storage::traits::GratitudeStorage;

#[derive(Clone)]
pub struct GratitudeService {
    storage: Arc<dyn GratitudeStorage>,
    anniversary_service: AnniversaryService,
    benefactor_service: BenefactorService,
    /// Held across load-modify-save so concurrent edits do not drop each other
    write_lock: Arc<Mutex<()>>,
}

impl GratitudeService {
    pub fn new(storage: Arc<dyn GratitudeStorage>) -> Self {
        Self {
            storage,
            anniversary_service: AnniversaryService::new(),
            benefactor_service: BenefactorService::new(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn anniversary_service(&self) -> &AnniversaryService {
        &self.anniversary_service
    }

    /// All of a user's records in stored order
    pub async fn list(&self, user_id: &str) -> Result<Vec<GratitudeRecord>> {
        self.storage.load_gratitudes(user_id).await
    }

    pub async fn create(&self, user_id: &str, command: SaveGratitudeCommand) -> Result<GratitudeRecord> {
        let record = Self::build_record(GratitudeRecord::generate_id(), command)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.storage.load_gratitudes(user_id).await?;
        records.push(record.clone());
        self.storage.save_gratitudes(user_id, &records).await?;

        info!("Created gratitude {} for user {}", record.id, user_id);
        Ok(record)
    }

    /// Replace every field of an existing record except its ID
    pub async fn update(
        &self,
        user_id: &str,
        gratitude_id: &str,
        command: SaveGratitudeCommand,
    ) -> Result<GratitudeRecord> {
        let updated = Self::build_record(gratitude_id.to_string(), command)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.storage.load_gratitudes(user_id).await?;
        let existing = records
            .iter_mut()
            .find(|record| record.id == gratitude_id)
            .ok_or_else(|| GratitudeError::NotFound(gratitude_id.to_string()))?;
        *existing = updated.clone();
        self.storage.save_gratitudes(user_id, &records).await?;

        info!("Updated gratitude {} for user {}", gratitude_id, user_id);
        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, gratitude_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.storage.load_gratitudes(user_id).await?;

        let before = records.len();
        records.retain(|record| record.id != gratitude_id);
        if records.len() == before {
            return Err(GratitudeError::NotFound(gratitude_id.to_string()).into());
        }

        self.storage.save_gratitudes(user_id, &records).await?;
        info!("Deleted gratitude {} for user {}", gratitude_id, user_id);
        Ok(())
    }

    /// Anniversaries within the alert horizon of `today`, soonest first
    pub async fn upcoming(&self, user_id: &str, today: NaiveDate) -> Result<Vec<UpcomingOccurrence>> {
        let records = self.storage.load_gratitudes(user_id).await?;
        Ok(self.anniversary_service.project(&records, today))
    }

    /// Records grouped by benefactor, in first-seen order
    pub async fn groups(&self, user_id: &str) -> Result<IndexMap<String, BenefactorGroup>> {
        let records = self.storage.load_gratitudes(user_id).await?;
        Ok(self.benefactor_service.group(&records))
    }

    /// The user's collection as a pretty-printed JSON array
    pub async fn export(&self, user_id: &str) -> Result<String> {
        let records = self.storage.load_gratitudes(user_id).await?;
        let dtos: Vec<shared::GratitudeRecord> =
            records.into_iter().map(GratitudeMapper::to_dto).collect();
        Ok(serde_json::to_string_pretty(&dtos)?)
    }

    /// Append records from an export file.
    ///
    /// Nothing is saved unless every record is valid. Records whose ID is
    /// empty or already present get a fresh one.
    pub async fn import(&self, user_id: &str, commands: Vec<ImportGratitudeCommand>) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.storage.load_gratitudes(user_id).await?;
        let mut seen_ids: HashSet<String> = records.iter().map(|r| r.id.clone()).collect();

        let mut imported = Vec::with_capacity(commands.len());
        for command in commands {
            let id = command.id.trim();
            let id = if id.is_empty() || seen_ids.contains(id) {
                GratitudeRecord::generate_id()
            } else {
                id.to_string()
            };
            seen_ids.insert(id.clone());
            imported.push(Self::build_record(id, command.record)?);
        }

        let count = imported.len();
        if count == 0 {
            warn!("Import for user {} contained no records", user_id);
            return Ok(0);
        }

        records.extend(imported);
        self.storage.save_gratitudes(user_id, &records).await?;

        info!("Imported {} gratitudes for user {}", count, user_id);
        Ok(count)
    }

    /// Validate and normalize user input into a record
    fn build_record(id: String, command: SaveGratitudeCommand) -> Result<GratitudeRecord, GratitudeValidationError> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(GratitudeValidationError::EmptyName);
        }

        let content = command.content.trim().to_string();
        if content.is_empty() {
            return Err(GratitudeValidationError::EmptyContent);
        }

        let date = GratitudeRecord::parse_date(&command.date)
            .ok_or_else(|| GratitudeValidationError::InvalidDate(command.date.clone()))?;

        Ok(GratitudeRecord {
            id,
            date: Some(date),
            content,
            name,
            nickname: non_empty(command.nickname),
            anniversaries: command.anniversaries,
            memo: non_empty(command.memo),
            photos: command.photos,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::gratitude::Anniversary;
    use crate::storage::file::test_utils::RepositoryTestHelper;

    async fn setup_test() -> (GratitudeService, RepositoryTestHelper) {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let service = GratitudeService::new(Arc::new(helper.gratitude_repo.clone()));
        (service, helper)
    }

    fn command(name: &str, date: &str) -> SaveGratitudeCommand {
        SaveGratitudeCommand {
            date: date.to_string(),
            content: "Helped me move".to_string(),
            name: name.to_string(),
            nickname: None,
            anniversaries: vec![],
            memo: None,
            photos: vec![],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() -> Result<()> {
        let (service, _helper) = setup_test().await;

        let created = service.create("kim", command("Lee", "2024-06-01")).await?;

        assert!(created.id.starts_with("gratitude::"));
        let listed = service.list("kim").await?;
        assert_eq!(listed, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_normalizes_input() -> Result<()> {
        let (service, _helper) = setup_test().await;
        let mut cmd = command("  Lee  ", "2024-06-01");
        cmd.nickname = Some("   ".to_string());
        cmd.memo = Some(" Bring cake ".to_string());

        let created = service.create("kim", cmd).await?;

        assert_eq!(created.name, "Lee");
        assert_eq!(created.nickname, None);
        assert_eq!(created.memo.as_deref(), Some("Bring cake"));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let (service, _helper) = setup_test().await;

        let err = service.create("kim", command("  ", "2024-06-01")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GratitudeValidationError>(),
            Some(GratitudeValidationError::EmptyName)
        ));

        let mut empty_content = command("Lee", "2024-06-01");
        empty_content.content = String::new();
        let err = service.create("kim", empty_content).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GratitudeValidationError>(),
            Some(GratitudeValidationError::EmptyContent)
        ));

        let err = service.create("kim", command("Lee", "yesterday")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GratitudeValidationError>(),
            Some(GratitudeValidationError::InvalidDate(_))
        ));

        assert!(service.list("kim").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_kept() -> Result<()> {
        let (service, _helper) = setup_test().await;

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.create("kim", command(&format!("Lee {}", i), "2024-06-01")).await })
            })
            .collect();
        for handle in handles {
            handle.await??;
        }

        assert_eq!(service.list("kim").await?.len(), 16);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_id() -> Result<()> {
        let (service, _helper) = setup_test().await;
        let created = service.create("kim", command("Lee", "2024-06-01")).await?;

        let mut edit = command("Lee", "2024-06-02");
        edit.content = "Drove me to the airport".to_string();
        let updated = service.update("kim", &created.id, edit).await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, Some(date(2024, 6, 2)));
        assert_eq!(service.list("kim").await?, vec![updated]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let (service, _helper) = setup_test().await;

        let err = service
            .update("kim", "gratitude::missing", command("Lee", "2024-06-01"))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<GratitudeError>().is_some());

        let err = service.delete("kim", "gratitude::missing").await.unwrap_err();
        assert!(err.downcast_ref::<GratitudeError>().is_some());
    }

    #[tokio::test]
    async fn test_delete() -> Result<()> {
        let (service, _helper) = setup_test().await;
        let first = service.create("kim", command("Lee", "2024-06-01")).await?;
        let second = service.create("kim", command("Park", "2024-06-02")).await?;

        service.delete("kim", &first.id).await?;

        assert_eq!(service.list("kim").await?, vec![second]);
        Ok(())
    }

    #[tokio::test]
    async fn test_upcoming_and_groups_follow_edits() -> Result<()> {
        let (service, _helper) = setup_test().await;
        let mut cmd = command("Lee", "2024-06-01");
        cmd.anniversaries = vec![Anniversary::recurring("birthday", "06-10")];
        let created = service.create("kim", cmd).await?;
        service.create("kim", command("Lee", "2024-05-01")).await?;

        let upcoming = service.upcoming("kim", date(2024, 6, 1)).await?;
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].days_until, 9);

        let groups = service.groups("kim").await?;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Lee"].gratitudes.len(), 2);

        service.delete("kim", &created.id).await?;
        assert!(service.upcoming("kim", date(2024, 6, 1)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_export_then_import_into_other_user() -> Result<()> {
        let (service, _helper) = setup_test().await;
        service.create("kim", command("Lee", "2024-06-01")).await?;
        service.create("kim", command("Park", "2024-06-02")).await?;

        let exported = service.export("kim").await?;
        let dtos: Vec<shared::GratitudeRecord> = serde_json::from_str(&exported)?;
        let commands = dtos.into_iter().map(GratitudeMapper::to_import_command).collect();

        let count = service.import("lee", commands).await?;

        assert_eq!(count, 2);
        assert_eq!(service.list("lee").await?, service.list("kim").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_import_assigns_fresh_ids_on_collision() -> Result<()> {
        let (service, _helper) = setup_test().await;
        let existing = service.create("kim", command("Lee", "2024-06-01")).await?;

        let commands = vec![
            ImportGratitudeCommand {
                id: existing.id.clone(),
                record: command("Park", "2024-06-02"),
            },
            ImportGratitudeCommand {
                id: String::new(),
                record: command("Choi", "2024-06-03"),
            },
        ];
        service.import("kim", commands).await?;

        let records = service.list("kim").await?;
        assert_eq!(records.len(), 3);
        let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(records[0], existing);
        Ok(())
    }

    #[tokio::test]
    async fn test_import_is_all_or_nothing() -> Result<()> {
        let (service, _helper) = setup_test().await;

        let commands = vec![
            ImportGratitudeCommand {
                id: "a".to_string(),
                record: command("Park", "2024-06-02"),
            },
            ImportGratitudeCommand {
                id: "b".to_string(),
                record: command("", "2024-06-03"),
            },
        ];

        assert!(service.import("kim", commands).await.is_err());
        assert!(service.list("kim").await?.is_empty());
        Ok(())
    }
}
