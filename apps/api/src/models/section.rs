use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Kind of content block a CV template section renders.
///
/// Unrecognised wire values deserialize to `Unknown` so one bad section never
/// rejects the whole template; the distributor skips it with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    General,
    Experience,
    Education,
    Projects,
    TechnicalSkills,
    SpecializedSkills,
    Training,
    Achievements,
    PageBreak,
    #[serde(other)]
    Unknown,
}

impl SectionType {
    /// Sections whose items may be spread across several pages.
    pub fn is_splittable(&self) -> bool {
        matches!(
            self,
            SectionType::Experience
                | SectionType::Projects
                | SectionType::Education
                | SectionType::Achievements
        )
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            SectionType::General => "Profile",
            SectionType::Experience => "Experience",
            SectionType::Education => "Education",
            SectionType::Projects => "Projects",
            SectionType::TechnicalSkills => "Technical Skills",
            SectionType::SpecializedSkills => "Specialized Skills",
            SectionType::Training => "Training",
            SectionType::Achievements => "Achievements",
            SectionType::PageBreak => "",
            SectionType::Unknown => "",
        }
    }
}

/// Column a section is placed in for multi-column layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Main,
    Sidebar,
}

/// Template styling options, forwarded to the renderer untouched.
///
/// Only `layoutPlacement` and `projectsToView` are read by the layout core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StylingConfig(pub Map<String, Value>);

impl StylingConfig {
    /// Column placement; anything other than `sidebar`/`secondary` means main.
    pub fn layout_placement(&self) -> Zone {
        match self.0.get("layoutPlacement").and_then(Value::as_str) {
            Some("sidebar") | Some("secondary") => Zone::Sidebar,
            _ => Zone::Main,
        }
    }

    /// Maximum number of projects to show. Accepts a number or a numeric string.
    pub fn projects_to_view(&self) -> Option<usize> {
        match self.0.get("projectsToView")? {
            Value::Number(n) => n.as_u64().map(|n| n as usize),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A configured content block of a CV template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub section_type: SectionType,
    #[serde(default)]
    pub title: Option<String>,
    pub display_order: i32,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub field_mapping: Value,
    #[serde(default)]
    pub styling_config: StylingConfig,
}

impl Section {
    /// Display title, falling back to the section type's default.
    pub fn title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => self.section_type.default_title(),
        }
    }

    pub fn zone(&self) -> Zone {
        self.styling_config.layout_placement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styling(value: Value) -> StylingConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unknown_section_type_deserializes() {
        let t: SectionType = serde_json::from_value(json!("hobbies")).unwrap();
        assert_eq!(t, SectionType::Unknown);
        let t: SectionType = serde_json::from_value(json!("technical_skills")).unwrap();
        assert_eq!(t, SectionType::TechnicalSkills);
    }

    #[test]
    fn test_splittable_types() {
        assert!(SectionType::Experience.is_splittable());
        assert!(SectionType::Achievements.is_splittable());
        assert!(!SectionType::General.is_splittable());
        assert!(!SectionType::Training.is_splittable());
        assert!(!SectionType::TechnicalSkills.is_splittable());
    }

    #[test]
    fn test_layout_placement_defaults_to_main() {
        assert_eq!(StylingConfig::default().layout_placement(), Zone::Main);
        assert_eq!(
            styling(json!({"layoutPlacement": "sidebar"})).layout_placement(),
            Zone::Sidebar
        );
        assert_eq!(
            styling(json!({"layoutPlacement": "secondary"})).layout_placement(),
            Zone::Sidebar
        );
        assert_eq!(
            styling(json!({"layoutPlacement": "footer"})).layout_placement(),
            Zone::Main
        );
    }

    #[test]
    fn test_projects_to_view_accepts_number_or_string() {
        assert_eq!(styling(json!({"projectsToView": 3})).projects_to_view(), Some(3));
        assert_eq!(styling(json!({"projectsToView": "2"})).projects_to_view(), Some(2));
        assert_eq!(styling(json!({"projectsToView": "all"})).projects_to_view(), None);
        assert_eq!(StylingConfig::default().projects_to_view(), None);
    }

    #[test]
    fn test_section_title_falls_back_to_type() {
        let section: Section = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "section_type": "experience",
            "title": "  ",
            "display_order": 1
        }))
        .unwrap();
        assert_eq!(section.title(), "Experience");
        assert!(!section.is_required);
        assert_eq!(section.zone(), Zone::Main);
    }

    #[test]
    fn test_styling_config_round_trips_unread_keys() {
        let cfg = styling(json!({"accentColor": "#123456", "layoutPlacement": "main"}));
        let back = serde_json::to_value(&cfg).unwrap();
        assert_eq!(back["accentColor"], "#123456");
    }
}
