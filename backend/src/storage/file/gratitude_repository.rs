//! # File Gratitude Repository
//!
//! Stores each user's records as one JSON array in the wire format used by
//! the `shared` crate.
//!
//! ```text
//! data/
//! ├── users.yaml
//! └── {user_id}/
//!     └── gratitudes.json    ← This module manages this file
//! ```
//!
//! Anniversaries are normalized when a file is loaded. Legacy entries without
//! an `isRecurring` flag come back as recurring and are written with the flag
//! on the next save. Records with a missing or malformed date load undated;
//! array entries that are not records at all are skipped with a warning.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;

use super::connection::DataConnection;
use crate::domain::models::gratitude::GratitudeRecord;
use crate::io::rest::mappers::gratitude_mapper::GratitudeMapper;
use crate::storage::traits::GratitudeStorage;

#[derive(Clone)]
pub struct GratitudeRepository {
    connection: DataConnection,
}

impl GratitudeRepository {
    pub fn new(connection: DataConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl GratitudeStorage for GratitudeRepository {
    async fn load_gratitudes(&self, user_id: &str) -> Result<Vec<GratitudeRecord>> {
        let path = self.connection.gratitudes_file_path(user_id);

        if !path.exists() {
            debug!("No gratitudes file for user {}, starting empty", user_id);
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let entries: Vec<serde_json::Value> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        // One unreadable entry must not hide the rest of the collection
        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<shared::GratitudeRecord>(entry) {
                Ok(stored) => records.push(GratitudeMapper::to_domain(stored)),
                Err(e) => warn!(
                    "Skipping unreadable gratitude #{} in {}: {}",
                    index,
                    path.display(),
                    e
                ),
            }
        }

        debug!("Loaded {} gratitudes for user {}", records.len(), user_id);
        Ok(records)
    }

    async fn save_gratitudes(&self, user_id: &str, records: &[GratitudeRecord]) -> Result<()> {
        let path = self.connection.gratitudes_file_path(user_id);

        let stored: Vec<shared::GratitudeRecord> = records
            .iter()
            .cloned()
            .map(GratitudeMapper::to_dto)
            .collect();
        let json = serde_json::to_string_pretty(&stored)?;

        self.connection.write_atomic(&path, &json)?;

        info!("Saved {} gratitudes for user {}", records.len(), user_id);
        Ok(())
    }
}
