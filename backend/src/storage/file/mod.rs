//! File-backed storage: YAML for accounts, one JSON file per user for records.

pub mod connection;
pub mod gratitude_repository;
pub mod user_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::DataConnection;
pub use gratitude_repository::GratitudeRepository;
pub use user_repository::UserRepository;
