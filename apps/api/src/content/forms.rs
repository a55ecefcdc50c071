//! The raw shape of a project-write multipart request, before validation.
//! Field names are the frontend's camelCase wire names.

use crate::uploads::UploadedFile;

#[derive(Debug, Default)]
pub struct ProjectForm {
    pub title: Option<String>,
    pub simplified_description: Option<String>,
    pub full_description: Option<String>,
    /// Raw text value; parsed into a list during validation.
    pub technologies: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    /// Raw text value; parsed into an integer during validation.
    pub sort_order: Option<String>,
    pub image: Option<UploadedFile>,
    pub report: Option<UploadedFile>,
}

impl ProjectForm {
    /// Stores a text field by wire name. Unknown fields are ignored, matching
    /// the tolerant behavior of the original form handling.
    pub fn set_text(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = Some(value),
            "simplifiedDescription" => self.simplified_description = Some(value),
            "fullDescription" => self.full_description = Some(value),
            "technologies" => self.technologies = Some(value),
            "category" => self.category = Some(value),
            "imageUrl" => self.image_url = Some(value),
            "projectUrl" => self.project_url = Some(value),
            "githubUrl" => self.github_url = Some(value),
            "sortOrder" => self.sort_order = Some(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_maps_wire_names() {
        let mut form = ProjectForm::default();
        form.set_text("title", "Music Detection".to_string());
        form.set_text("simplifiedDescription", "short".to_string());
        form.set_text("sortOrder", "3".to_string());
        assert_eq!(form.title.as_deref(), Some("Music Detection"));
        assert_eq!(form.simplified_description.as_deref(), Some("short"));
        assert_eq!(form.sort_order.as_deref(), Some("3"));
    }

    #[test]
    fn test_set_text_ignores_unknown_fields() {
        let mut form = ProjectForm::default();
        form.set_text("csrfToken", "whatever".to_string());
        assert!(form.title.is_none());
        assert!(form.technologies.is_none());
    }
}
