//! Grouping of gratitude records by benefactor.
//!
//! A benefactor is identified by name plus nickname, so "Kim" and
//! "Kim / coach" are different people. Each group collects the member
//! records (newest first) and the union of their anniversaries.

use indexmap::IndexMap;
use log::debug;

use crate::domain::models::gratitude::{Anniversary, GratitudeRecord};

/// Joins name and nickname in a group key
pub const GROUP_KEY_SEPARATOR: &str = "_";

#[derive(Debug, Clone, PartialEq)]
pub struct BenefactorGroup {
    pub key: String,
    pub name: String,
    pub nickname: Option<String>,
    /// Merged anniversaries, first seen wins for equal `(type, date)`
    pub anniversaries: Vec<Anniversary>,
    /// Member records, newest first
    pub gratitudes: Vec<GratitudeRecord>,
}

#[derive(Clone, Default)]
pub struct BenefactorService;

impl BenefactorService {
    pub fn new() -> Self {
        Self
    }

    /// `name`, or `name_nickname` when a nickname is set
    pub fn group_key(&self, record: &GratitudeRecord) -> String {
        match record.nickname() {
            Some(nickname) => format!("{}{}{}", record.name, GROUP_KEY_SEPARATOR, nickname),
            None => record.name.clone(),
        }
    }

    /// Partition records into benefactor groups, in first-seen key order
    pub fn group(&self, records: &[GratitudeRecord]) -> IndexMap<String, BenefactorGroup> {
        let mut groups: IndexMap<String, BenefactorGroup> = IndexMap::new();

        for record in records {
            let key = self.group_key(record);
            let group = groups.entry(key.clone()).or_insert_with(|| BenefactorGroup {
                key,
                name: record.name.clone(),
                nickname: record.nickname().map(str::to_string),
                anniversaries: record.anniversaries.clone(),
                gratitudes: Vec::new(),
            });

            group.gratitudes.push(record.clone());

            for anniversary in &record.anniversaries {
                let exists = group
                    .anniversaries
                    .iter()
                    .any(|existing| existing.same_entry(anniversary));
                if !exists {
                    group.anniversaries.push(anniversary.clone());
                }
            }
        }

        // Newest first; records without a usable date sort last
        for group in groups.values_mut() {
            group.gratitudes.sort_by(|a, b| b.date.cmp(&a.date));
        }

        debug!("Grouped {} records into {} benefactors", records.len(), groups.len());
        groups
    }
}
