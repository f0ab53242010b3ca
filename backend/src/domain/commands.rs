//! Domain-level command types.
//!
//! Services take these instead of the `shared` request DTOs. The REST layer
//! maps the public DTOs to them.

pub mod gratitude {
    use crate::domain::models::gratitude::Anniversary;

    /// Fields for creating or editing a record. Strings are untrimmed user
    /// input; the service validates and normalizes them.
    #[derive(Debug, Clone, Default)]
    pub struct SaveGratitudeCommand {
        pub date: String,
        pub content: String,
        pub name: String,
        pub nickname: Option<String>,
        pub anniversaries: Vec<Anniversary>,
        pub memo: Option<String>,
        pub photos: Vec<String>,
    }

    /// A record coming in from an export file. The ID is kept unless it is
    /// empty or already used.
    #[derive(Debug, Clone)]
    pub struct ImportGratitudeCommand {
        pub id: String,
        pub record: SaveGratitudeCommand,
    }
}

pub mod account {
    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub id: String,
        pub email: String,
        pub password: String,
        pub password_confirm: String,
    }

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub id: String,
        pub password: String,
    }
}
