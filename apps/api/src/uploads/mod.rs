//! Local-disk upload storage.
//!
//! Layout mirrors the public site: project images under
//! `<PUBLIC_DIR>/projects/`, report documents (PDF/HTML) under
//! `<PUBLIC_DIR>/reports/`, everything else under `<UPLOAD_DIR>/`. The
//! returned URLs are site-relative (`/projects/…`, `/reports/…`,
//! `/uploads/…`); serving the files is the reverse proxy's job.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

/// Per-file size ceiling for every upload, in bytes.
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Where an uploaded file lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Project cover image → `<PUBLIC_DIR>/projects/`.
    ProjectImage,
    /// Report document → `<PUBLIC_DIR>/reports/`.
    Report,
    /// Anything else → `<UPLOAD_DIR>/`.
    Other,
}

/// A file part drained from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: bytes::Bytes,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    public_dir: PathBuf,
    upload_dir: PathBuf,
}

impl UploadStore {
    pub fn new(public_dir: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        UploadStore {
            public_dir: public_dir.into(),
            upload_dir: upload_dir.into(),
        }
    }

    /// Creates all storage directories. Safe to call repeatedly.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(self.public_dir.join("projects")).await?;
        tokio::fs::create_dir_all(self.public_dir.join("reports")).await?;
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }

    /// Writes `data` under a generated name and returns the site-relative URL.
    pub async fn save(
        &self,
        kind: UploadKind,
        original_name: &str,
        data: &[u8],
    ) -> std::io::Result<String> {
        let stored = storage_name(original_name);
        let (dir, url) = match kind {
            UploadKind::ProjectImage => {
                (self.public_dir.join("projects"), format!("/projects/{stored}"))
            }
            UploadKind::Report => (self.public_dir.join("reports"), format!("/reports/{stored}")),
            UploadKind::Other => (self.upload_dir.clone(), format!("/uploads/{stored}")),
        };
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&stored), data).await?;
        info!("Stored upload '{original_name}' as {url}");
        Ok(url)
    }
}

/// Routes a stand-alone project file by extension: report documents go to the
/// public reports area, everything else to the transient upload area.
pub fn classify(file_name: &str) -> UploadKind {
    match extension(file_name).as_deref() {
        Some("pdf") | Some("html") => UploadKind::Report,
        _ => UploadKind::Other,
    }
}

/// Generated on-disk name: a fresh UUID keeping the original extension.
pub fn storage_name(original_name: &str) -> String {
    match extension(original_name) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_pdf_as_report() {
        assert_eq!(classify("thesis.pdf"), UploadKind::Report);
        assert_eq!(classify("REPORT.PDF"), UploadKind::Report);
    }

    #[test]
    fn test_classify_html_as_report() {
        assert_eq!(classify("startup-prediction.html"), UploadKind::Report);
    }

    #[test]
    fn test_classify_other_extensions() {
        assert_eq!(classify("notebook.ipynb"), UploadKind::Other);
        assert_eq!(classify("archive.tar.gz"), UploadKind::Other);
        assert_eq!(classify("no_extension"), UploadKind::Other);
    }

    #[test]
    fn test_storage_name_keeps_extension() {
        let name = storage_name("Cover Photo.PNG");
        assert!(name.ends_with(".png"), "got {name}");
        assert_eq!(name.len(), 36 + 4); // uuid + ".png"
    }

    #[test]
    fn test_storage_name_without_extension() {
        let name = storage_name("README");
        assert_eq!(name.len(), 36);
    }

    #[test]
    fn test_storage_names_are_unique() {
        assert_ne!(storage_name("a.pdf"), storage_name("a.pdf"));
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_url() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("public"), tmp.path().join("uploads"));
        store.ensure_dirs().await.unwrap();

        let url = store
            .save(UploadKind::ProjectImage, "cover.png", b"fake image bytes")
            .await
            .unwrap();
        assert!(url.starts_with("/projects/"), "got {url}");

        let stored = url.strip_prefix("/projects/").unwrap();
        let on_disk = tmp.path().join("public").join("projects").join(stored);
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), b"fake image bytes");
    }

    #[tokio::test]
    async fn test_save_report_and_other_areas() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("public"), tmp.path().join("uploads"));

        let report = store
            .save(UploadKind::Report, "analysis.pdf", b"%PDF-")
            .await
            .unwrap();
        assert!(report.starts_with("/reports/"));

        let other = store
            .save(UploadKind::Other, "data.csv", b"a,b\n1,2\n")
            .await
            .unwrap();
        assert!(other.starts_with("/uploads/"));
    }

    #[tokio::test]
    async fn test_ensure_dirs_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("public"), tmp.path().join("uploads"));
        store.ensure_dirs().await.unwrap();
        store.ensure_dirs().await.unwrap();
        assert!(tmp.path().join("public").join("reports").is_dir());
    }
}
