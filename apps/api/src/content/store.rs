//! Relational queries for projects, project files, and the site-settings
//! singleton. All functions take the pool explicitly; handlers own the
//! error-to-response mapping.

use sqlx::PgPool;
use tracing::info;

use crate::models::project::{
    NewProject, NewProjectFile, ProjectFileRow, ProjectPatch, ProjectRow,
};
use crate::models::settings::{SiteSettingsInput, SiteSettingsRow};

pub async fn list_projects(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects ORDER BY sort_order ASC, id ASC")
        .fetch_all(pool)
        .await
}

pub async fn get_project(pool: &PgPool, id: i32) -> Result<Option<ProjectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_project(pool: &PgPool, project: &NewProject) -> Result<ProjectRow, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects
            (title, simplified_description, full_description, technologies,
             category, image_url, project_url, github_url, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&project.title)
    .bind(&project.simplified_description)
    .bind(&project.full_description)
    .bind(&project.technologies)
    .bind(&project.category)
    .bind(&project.image_url)
    .bind(&project.project_url)
    .bind(&project.github_url)
    .bind(project.sort_order)
    .fetch_one(pool)
    .await?;

    info!("Created project {} '{}'", row.id, row.title);
    Ok(row)
}

/// Applies a partial update; absent fields keep their stored value.
/// Returns `None` when the project does not exist.
pub async fn update_project(
    pool: &PgPool,
    id: i32,
    patch: &ProjectPatch,
) -> Result<Option<ProjectRow>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        UPDATE projects SET
            title = COALESCE($2, title),
            simplified_description = COALESCE($3, simplified_description),
            full_description = COALESCE($4, full_description),
            technologies = COALESCE($5, technologies),
            category = COALESCE($6, category),
            image_url = COALESCE($7, image_url),
            project_url = COALESCE($8, project_url),
            github_url = COALESCE($9, github_url),
            sort_order = COALESCE($10, sort_order),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&patch.title)
    .bind(&patch.simplified_description)
    .bind(&patch.full_description)
    .bind(&patch.technologies)
    .bind(&patch.category)
    .bind(&patch.image_url)
    .bind(&patch.project_url)
    .bind(&patch.github_url)
    .bind(patch.sort_order)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = &row {
        info!("Updated project {}", row.id);
    }
    Ok(row)
}

/// Idempotent: deleting an absent project is not an error. File rows cascade.
pub async fn delete_project(pool: &PgPool, id: i32) -> Result<(), sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() > 0 {
        info!("Deleted project {id}");
    }
    Ok(())
}

pub async fn list_project_files(
    pool: &PgPool,
    project_id: i32,
) -> Result<Vec<ProjectFileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProjectFileRow>(
        "SELECT * FROM project_files WHERE project_id = $1 ORDER BY id ASC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_project_file(
    pool: &PgPool,
    file: &NewProjectFile,
) -> Result<ProjectFileRow, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectFileRow>(
        r#"
        INSERT INTO project_files (project_id, file_name, file_url, file_type)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(file.project_id)
    .bind(&file.file_name)
    .bind(&file.file_url)
    .bind(&file.file_type)
    .fetch_one(pool)
    .await?;

    info!(
        "Recorded file '{}' ({}) for project {}",
        row.file_name, row.file_url, row.project_id
    );
    Ok(row)
}

pub async fn delete_project_file(pool: &PgPool, id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM project_files WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_site_settings(pool: &PgPool) -> Result<Option<SiteSettingsRow>, sqlx::Error> {
    sqlx::query_as::<_, SiteSettingsRow>("SELECT * FROM site_settings WHERE id = 1")
        .fetch_optional(pool)
        .await
}

/// Atomic upsert on the fixed singleton id — a concurrent first write cannot
/// produce a second row.
pub async fn upsert_site_settings(
    pool: &PgPool,
    input: &SiteSettingsInput,
) -> Result<SiteSettingsRow, sqlx::Error> {
    sqlx::query_as::<_, SiteSettingsRow>(
        r#"
        INSERT INTO site_settings (id, contact_email, contact_phone, linkedin_url, bio, updated_at)
        VALUES (1, $1, $2, $3, $4, now())
        ON CONFLICT (id) DO UPDATE SET
            contact_email = EXCLUDED.contact_email,
            contact_phone = EXCLUDED.contact_phone,
            linkedin_url = EXCLUDED.linkedin_url,
            bio = EXCLUDED.bio,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(&input.contact_email)
    .bind(&input.contact_phone)
    .bind(&input.linkedin_url)
    .bind(&input.bio)
    .fetch_one(pool)
    .await
}
