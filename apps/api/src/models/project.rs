use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A portfolio project as stored and served. Serialized in camelCase to
/// match the frontend's existing wire format.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    pub id: i32,
    pub title: String,
    pub simplified_description: String,
    pub full_description: String,
    pub technologies: Vec<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFileRow {
    pub id: i32,
    pub project_id: i32,
    /// Original client-side file name; the stored name on disk is generated.
    pub file_name: String,
    pub file_url: String,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

/// Validated payload for creating a project.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub simplified_description: String,
    pub full_description: String,
    pub technologies: Vec<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub sort_order: i32,
}

/// Validated partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub simplified_description: Option<String>,
    pub full_description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub sort_order: Option<i32>,
}

/// Payload for recording an uploaded project file.
#[derive(Debug, Clone)]
pub struct NewProjectFile {
    pub project_id: i32,
    pub file_name: String,
    pub file_url: String,
    pub file_type: String,
}
