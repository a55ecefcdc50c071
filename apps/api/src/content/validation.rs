//! Field validation for project writes. Every offending field is collected
//! (wire name, camelCase) so the client gets the complete list in one
//! VALIDATION_ERROR response instead of fixing fields one at a time.

use crate::content::forms::ProjectForm;
use crate::models::project::{NewProject, ProjectPatch};

/// Parses the `technologies` text field: a JSON string array
/// (`["Python","PyTorch"]`), or a comma-separated fallback. `None` means
/// malformed.
pub fn parse_technologies(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(trimmed).ok();
    }
    Some(
        trimmed
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Validates a create request. Required: title, both descriptions, and a
/// parseable technologies list (an empty list is allowed).
pub fn validate_create(form: &ProjectForm) -> Result<NewProject, Vec<&'static str>> {
    let mut invalid = Vec::new();

    let title = required_text(form.title.as_deref(), "title", &mut invalid);
    let simplified = required_text(
        form.simplified_description.as_deref(),
        "simplifiedDescription",
        &mut invalid,
    );
    let full = required_text(
        form.full_description.as_deref(),
        "fullDescription",
        &mut invalid,
    );

    let technologies = match form.technologies.as_deref() {
        Some(raw) => match parse_technologies(raw) {
            Some(t) => Some(t),
            None => {
                invalid.push("technologies");
                None
            }
        },
        None => {
            invalid.push("technologies");
            None
        }
    };

    let sort_order = parse_sort_order(form.sort_order.as_deref(), &mut invalid);

    match (title, simplified, full, technologies) {
        (Some(title), Some(simplified), Some(full), Some(technologies)) if invalid.is_empty() => {
            Ok(NewProject {
                title,
                simplified_description: simplified,
                full_description: full,
                technologies,
                category: form.category.clone(),
                image_url: form.image_url.clone(),
                project_url: form.project_url.clone(),
                github_url: form.github_url.clone(),
                sort_order: sort_order.unwrap_or(0),
            })
        }
        _ => Err(invalid),
    }
}

/// Validates a partial update: absent fields pass through as `None`, provided
/// fields obey the same rules as on create.
pub fn validate_patch(form: &ProjectForm) -> Result<ProjectPatch, Vec<&'static str>> {
    let mut invalid = Vec::new();

    let title = optional_text(form.title.as_deref(), "title", &mut invalid);
    let simplified = optional_text(
        form.simplified_description.as_deref(),
        "simplifiedDescription",
        &mut invalid,
    );
    let full = optional_text(
        form.full_description.as_deref(),
        "fullDescription",
        &mut invalid,
    );

    let technologies = match form.technologies.as_deref() {
        Some(raw) => match parse_technologies(raw) {
            Some(t) => Some(t),
            None => {
                invalid.push("technologies");
                None
            }
        },
        None => None,
    };

    let sort_order = parse_sort_order(form.sort_order.as_deref(), &mut invalid);

    if !invalid.is_empty() {
        return Err(invalid);
    }

    Ok(ProjectPatch {
        title,
        simplified_description: simplified,
        full_description: full,
        technologies,
        category: form.category.clone(),
        image_url: form.image_url.clone(),
        project_url: form.project_url.clone(),
        github_url: form.github_url.clone(),
        sort_order,
    })
}

/// Formats the collected wire names into one user-facing message.
pub fn describe_invalid(fields: &[&str]) -> String {
    format!("Invalid or missing fields: {}", fields.join(", "))
}

fn required_text(
    value: Option<&str>,
    field: &'static str,
    invalid: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => {
            invalid.push(field);
            None
        }
    }
}

fn optional_text(
    value: Option<&str>,
    field: &'static str,
    invalid: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        None => None,
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        Some(_) => {
            invalid.push(field);
            None
        }
    }
}

fn parse_sort_order(
    value: Option<&str>,
    invalid: &mut Vec<&'static str>,
) -> Option<i32> {
    match value {
        None => None,
        Some(raw) => match raw.trim().parse::<i32>() {
            Ok(v) => Some(v),
            Err(_) => {
                invalid.push("sortOrder");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ProjectForm {
        let mut form = ProjectForm::default();
        form.set_text("title", "AI Music Detection".to_string());
        form.set_text("simplifiedDescription", "Detects AI-generated music".to_string());
        form.set_text("fullDescription", "A CNN/Transformer ensemble...".to_string());
        form.set_text("technologies", r#"["Python", "PyTorch"]"#.to_string());
        form
    }

    #[test]
    fn test_create_with_all_required_fields() {
        let project = validate_create(&complete_form()).unwrap();
        assert_eq!(project.title, "AI Music Detection");
        assert_eq!(project.technologies, vec!["Python", "PyTorch"]);
        assert_eq!(project.sort_order, 0);
    }

    #[test]
    fn test_create_collects_every_missing_field() {
        let err = validate_create(&ProjectForm::default()).unwrap_err();
        assert_eq!(
            err,
            vec![
                "title",
                "simplifiedDescription",
                "fullDescription",
                "technologies"
            ]
        );
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut form = complete_form();
        form.title = Some("   ".to_string());
        assert_eq!(validate_create(&form).unwrap_err(), vec!["title"]);
    }

    #[test]
    fn test_create_rejects_malformed_technologies_json() {
        let mut form = complete_form();
        form.technologies = Some(r#"["Python", 42]"#.to_string());
        assert_eq!(validate_create(&form).unwrap_err(), vec!["technologies"]);
    }

    #[test]
    fn test_create_accepts_comma_separated_technologies() {
        let mut form = complete_form();
        form.technologies = Some("Python, Scikit-learn , Pandas".to_string());
        let project = validate_create(&form).unwrap();
        assert_eq!(
            project.technologies,
            vec!["Python", "Scikit-learn", "Pandas"]
        );
    }

    #[test]
    fn test_create_accepts_empty_technologies_list() {
        let mut form = complete_form();
        form.technologies = Some("[]".to_string());
        assert!(validate_create(&form).unwrap().technologies.is_empty());
    }

    #[test]
    fn test_create_rejects_bad_sort_order() {
        let mut form = complete_form();
        form.sort_order = Some("first".to_string());
        assert_eq!(validate_create(&form).unwrap_err(), vec!["sortOrder"]);
    }

    #[test]
    fn test_create_parses_sort_order() {
        let mut form = complete_form();
        form.sort_order = Some("12".to_string());
        assert_eq!(validate_create(&form).unwrap().sort_order, 12);
    }

    #[test]
    fn test_patch_allows_fully_empty_form() {
        let patch = validate_patch(&ProjectForm::default()).unwrap();
        assert_eq!(patch, ProjectPatch::default());
    }

    #[test]
    fn test_patch_rejects_blank_provided_field() {
        let mut form = ProjectForm::default();
        form.full_description = Some("".to_string());
        assert_eq!(
            validate_patch(&form).unwrap_err(),
            vec!["fullDescription"]
        );
    }

    #[test]
    fn test_patch_keeps_provided_fields() {
        let mut form = ProjectForm::default();
        form.set_text("title", "Renamed".to_string());
        form.set_text("technologies", "BERT,NLTK".to_string());
        let patch = validate_patch(&form).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert_eq!(patch.technologies, Some(vec!["BERT".to_string(), "NLTK".to_string()]));
        assert!(patch.simplified_description.is_none());
    }

    #[test]
    fn test_describe_invalid_lists_fields() {
        assert_eq!(
            describe_invalid(&["title", "sortOrder"]),
            "Invalid or missing fields: title, sortOrder"
        );
    }
}
