//! # Storage Module
//!
//! Persistence for the gratitude tracker. The domain depends only on the
//! traits in [`traits`]; the file-backed implementation in [`file`] keeps
//! everything under a single data directory.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Dependency Inversion**: Services receive storage as trait objects
//! - **Whole-collection writes**: A user's records are loaded and saved as one unit

pub mod file;
pub mod traits;

pub use file::{DataConnection, GratitudeRepository, UserRepository};
pub use traits::{GratitudeStorage, UserStorage};
