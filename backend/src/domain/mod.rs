//! # Domain Module
//!
//! Business logic for the gratitude tracker, independent of HTTP and of how
//! records are stored.
//!
//! ## Module Organization
//!
//! - **anniversary_service**: Projects anniversaries onto the calendar and builds the alert banner
//! - **benefactor_service**: Groups records by benefactor and merges their anniversaries
//! - **gratitude_service**: Record CRUD, validation, export and import
//! - **account_service**: Registration, login and in-memory sessions
//! - **admin_service**: Usage statistics across users
//!
//! ## Business Rules
//!
//! - A record needs a benefactor name, content and a valid date
//! - Anniversaries without an explicit recurrence flag repeat every year
//! - Only anniversaries within the next 30 days are reported
//! - A benefactor is identified by name plus nickname
//! - Duplicate `(type, date)` anniversaries within a group are merged, first wins

pub mod account_service;
pub mod admin_service;
pub mod anniversary_service;
pub mod benefactor_service;
pub mod commands;
pub mod gratitude_service;
pub mod models;

pub use account_service::AccountService;
pub use admin_service::AdminService;
pub use anniversary_service::AnniversaryService;
pub use benefactor_service::BenefactorService;
pub use gratitude_service::GratitudeService;
