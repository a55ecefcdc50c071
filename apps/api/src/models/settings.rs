use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The site-settings singleton row (always id 1).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsRow {
    pub id: i32,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub bio: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload. Every field is optional; absent fields are stored as NULL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsInput {
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub bio: Option<String>,
}
