use serde::{Deserialize, Serialize};

/// A single act of gratitude as it is stored and sent over the wire.
///
/// Record ID format: "gratitude::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GratitudeRecord {
    #[serde(default)]
    pub id: String,
    /// Day the act happened (YYYY-MM-DD). Old records may have it empty.
    #[serde(default)]
    pub date: String,
    /// What the benefactor did
    #[serde(default)]
    pub content: String,
    /// Benefactor name, part of the grouping identity
    #[serde(default)]
    pub name: String,
    /// Optional benefactor alias, part of the grouping identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default)]
    pub anniversaries: Vec<Anniversary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Inline encoded images (data URIs)
    #[serde(default)]
    pub photos: Vec<String>,
}

/// An anniversary attached to a benefactor.
///
/// `date` is "MM-DD" for recurring anniversaries and "YYYY-MM-DD" for fixed
/// ones. Records written before `is_recurring` existed leave it out; those are
/// recurring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anniversary {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

/// Request body for creating or editing a gratitude record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGratitudeRequest {
    pub date: String,
    pub content: String,
    pub name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub anniversaries: Vec<Anniversary>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GratitudeResponse {
    pub gratitude: GratitudeRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratitudeListResponse {
    pub gratitudes: Vec<GratitudeRecord>,
}

/// All records attributed to one benefactor identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefactorGroup {
    /// Grouping key: name, or name + "_" + nickname
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub anniversaries: Vec<Anniversary>,
    /// Member records, newest first
    pub gratitudes: Vec<GratitudeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefactorGroupListResponse {
    /// Groups in first-seen order
    pub groups: Vec<BenefactorGroup>,
}

/// One resolved future instance of an anniversary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAnniversary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Resolved occurrence date (YYYY-MM-DD)
    pub date: String,
    pub days_until: u32,
    /// The literal stored on the anniversary
    pub original_date: String,
}

/// How close an upcoming anniversary is, for alert styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertUrgency {
    Today,
    ThisWeek,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnniversaryAlert {
    pub anniversary: UpcomingAnniversary,
    pub urgency: AlertUrgency,
    /// "Today!", "Tomorrow" or "In N days"
    pub label: String,
}

/// The alert banner: the first few upcoming anniversaries plus a count of the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub shown: Vec<AnniversaryAlert>,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAnniversariesResponse {
    /// Day the projection was computed for (YYYY-MM-DD)
    pub today: String,
    /// Every anniversary within the horizon, soonest first
    pub upcoming: Vec<UpcomingAnniversary>,
    pub alert: AlertSummary,
}

/// Result of importing an exported JSON array of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportGratitudesResponse {
    pub imported_count: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub id: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub id: String,
    pub password: String,
}

/// Public view of an account (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
    /// RFC 3339
    pub login_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserSummary {
    pub id: String,
    pub email: String,
    pub gratitude_count: usize,
    /// RFC 3339
    pub created_at: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub total_users: usize,
    pub total_gratitudes: usize,
    /// Users with at least one record
    pub active_users: usize,
    pub users: Vec<AdminUserSummary>,
}
