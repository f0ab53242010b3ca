pub mod account;
pub mod gratitude;
