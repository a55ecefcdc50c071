//! HTTP handlers for the content API: projects, project files, and the
//! site-settings singleton. Reads are public; every mutation takes the
//! [`AdminUser`] gate first.

use axum::{
    extract::multipart::{Field, MultipartError},
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::content::forms::ProjectForm;
use crate::content::{store, validation};
use crate::errors::AppError;
use crate::models::project::{NewProjectFile, ProjectFileRow, ProjectRow};
use crate::models::settings::{SiteSettingsInput, SiteSettingsRow};
use crate::state::AppState;
use crate::uploads::{self, UploadKind, UploadedFile, MAX_FILE_BYTES};

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    Ok(Json(store::list_projects(&state.db).await?))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProjectRow>, AppError> {
    let project = store::get_project(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;
    Ok(Json(project))
}

/// POST /api/projects (multipart)
/// Files are only moved into place after field validation passes, so a
/// rejected request leaves nothing on disk.
pub async fn create_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProjectRow>), AppError> {
    let form = read_project_form(multipart).await?;
    let mut project = validation::validate_create(&form)
        .map_err(|fields| AppError::Validation(validation::describe_invalid(&fields)))?;

    if let Some(image) = &form.image {
        let url = state
            .uploads
            .save(UploadKind::ProjectImage, &image.file_name, &image.data)
            .await?;
        project.image_url = Some(url);
    }
    if let Some(report) = &form.report {
        let url = state
            .uploads
            .save(UploadKind::Report, &report.file_name, &report.data)
            .await?;
        project.project_url = Some(url);
    }

    let row = store::insert_project(&state.db, &project).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT/PATCH /api/projects/:id (multipart, partial fields)
pub async fn update_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ProjectRow>, AppError> {
    let form = read_project_form(multipart).await?;
    let mut patch = validation::validate_patch(&form)
        .map_err(|fields| AppError::Validation(validation::describe_invalid(&fields)))?;

    if let Some(image) = &form.image {
        let url = state
            .uploads
            .save(UploadKind::ProjectImage, &image.file_name, &image.data)
            .await?;
        patch.image_url = Some(url);
    }
    if let Some(report) = &form.report {
        let url = state
            .uploads
            .save(UploadKind::Report, &report.file_name, &report.data)
            .await?;
        patch.project_url = Some(url);
    }

    let row = store::update_project(&state.db, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/projects/:id — idempotent, file rows cascade.
pub async fn delete_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    store::delete_project(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/projects/:id/files
pub async fn list_project_files(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProjectFileRow>>, AppError> {
    Ok(Json(store::list_project_files(&state.db, id).await?))
}

/// POST /api/projects/:id/files (multipart, single `file` part)
/// PDF/HTML land in the public reports area, everything else in uploads.
pub async fn upload_project_file(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProjectFileRow>), AppError> {
    store::get_project(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    let mut upload: Option<UploadedFile> = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() == Some("file") {
            upload = read_file_field(field, "file").await?;
        } else {
            // Drain unexpected parts so the stream stays consistent.
            field.bytes().await.map_err(bad_multipart)?;
        }
    }
    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let kind = uploads::classify(&upload.file_name);
    let url = state
        .uploads
        .save(kind, &upload.file_name, &upload.data)
        .await?;

    let row = store::insert_project_file(
        &state.db,
        &NewProjectFile {
            project_id: id,
            file_name: upload.file_name.clone(),
            file_url: url,
            file_type: upload
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /api/project-files/:id — idempotent.
pub async fn delete_project_file(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    store::delete_project_file(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/site-settings — `{}` when nothing has been saved yet.
pub async fn get_site_settings(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    match store::get_site_settings(&state.db).await? {
        Some(row) => Ok(Json(
            serde_json::to_value(row).map_err(anyhow::Error::from)?,
        )),
        None => Ok(Json(json!({}))),
    }
}

/// POST /api/site-settings
pub async fn upsert_site_settings(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<SiteSettingsInput>,
) -> Result<Json<SiteSettingsRow>, AppError> {
    Ok(Json(store::upsert_site_settings(&state.db, &input).await?))
}

/// Drains a project-write multipart request into a [`ProjectForm`].
async fn read_project_form(mut multipart: Multipart) -> Result<ProjectForm, AppError> {
    let mut form = ProjectForm::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => form.image = read_file_field(field, "image").await?,
            "report" => form.report = read_file_field(field, "report").await?,
            _ => {
                let value = field.text().await.map_err(bad_multipart)?;
                form.set_text(&name, value);
            }
        }
    }
    Ok(form)
}

/// Reads one file part, enforcing the per-file size ceiling. A part with no
/// name and no content (an empty form input) counts as absent.
async fn read_file_field(
    field: Field<'_>,
    part: &str,
) -> Result<Option<UploadedFile>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(|c| c.to_string());
    let data = field.bytes().await.map_err(bad_multipart)?;

    if file_name.is_empty() && data.is_empty() {
        return Ok(None);
    }
    if data.len() > MAX_FILE_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "File '{part}' exceeds the {} MiB limit",
            MAX_FILE_BYTES / (1024 * 1024)
        )));
    }
    Ok(Some(UploadedFile {
        file_name,
        content_type,
        data,
    }))
}

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}
