use serde::{Deserialize, Serialize};

/// The kind of project interaction a visitor triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickType {
    View,
    Report,
    Github,
}

impl ClickType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickType::View => "view",
            ClickType::Report => "report",
            ClickType::Github => "github",
        }
    }
}

/// A page-view event ready for insertion. The timestamp is assigned by the
/// store at insert time.
#[derive(Debug, Clone)]
pub struct NewPageView {
    pub page: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// A project-click event ready for insertion. The project id is not checked
/// against the projects table; orphan clicks are accepted.
#[derive(Debug, Clone)]
pub struct NewProjectClick {
    pub project_id: i32,
    pub click_type: ClickType,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_type_deserializes_lowercase() {
        let ct: ClickType = serde_json::from_str("\"github\"").unwrap();
        assert_eq!(ct, ClickType::Github);
    }

    #[test]
    fn test_click_type_rejects_unknown() {
        assert!(serde_json::from_str::<ClickType>("\"download\"").is_err());
    }

    #[test]
    fn test_click_type_as_str_round_trip() {
        for ct in [ClickType::View, ClickType::Report, ClickType::Github] {
            let json = serde_json::to_string(&ct).unwrap();
            assert_eq!(json, format!("\"{}\"", ct.as_str()));
        }
    }
}
