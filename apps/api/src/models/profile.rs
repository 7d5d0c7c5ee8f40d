use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::section::{Section, SectionType};

// ────────────────────────────────────────────────────────────────────────────
// Profile items
// ────────────────────────────────────────────────────────────────────────────

/// Scalar personal fields rendered by the `general` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub current_designation: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub biography: Option<String>,
    pub profile_image: Option<String>,
}

impl PersonalInfo {
    /// True when no personal field carries visible text.
    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.current_designation,
            &self.email,
            &self.phone,
            &self.location,
            &self.biography,
            &self.profile_image,
        ]
        .iter()
        .all(|f| is_blank(f))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub designation: Option<String>,
    pub company_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub name: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub responsibility: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillItem {
    pub name: String,
    pub category: Option<String>,
    pub proficiency: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingItem {
    pub title: Option<String>,
    pub provider: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub certificate_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementItem {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// One renderable item of a section, serialized as the item's own JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionItem {
    General(PersonalInfo),
    Experience(ExperienceItem),
    Education(EducationItem),
    Project(ProjectItem),
    Skill(SkillItem),
    Training(TrainingItem),
    Achievement(AchievementItem),
}

impl SectionItem {
    /// Parses a raw JSON item for the given section type.
    ///
    /// Null and malformed items yield `None`, as do section types without items.
    pub fn from_value(section_type: SectionType, value: Value) -> Option<SectionItem> {
        let item = match section_type {
            SectionType::General => SectionItem::General(parse_item(value).ok()??),
            SectionType::Experience => SectionItem::Experience(parse_item(value).ok()??),
            SectionType::Education => SectionItem::Education(parse_item(value).ok()??),
            SectionType::Projects => SectionItem::Project(parse_item(value).ok()??),
            SectionType::TechnicalSkills | SectionType::SpecializedSkills => {
                SectionItem::Skill(parse_item(value).ok()??)
            }
            SectionType::Training => SectionItem::Training(parse_item(value).ok()??),
            SectionType::Achievements => SectionItem::Achievement(parse_item(value).ok()??),
            SectionType::PageBreak | SectionType::Unknown => return None,
        };
        Some(item)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile aggregate
// ────────────────────────────────────────────────────────────────────────────

/// Read-only profile aggregate feeding one distribution run.
///
/// Collections are deserialized leniently: null or malformed entries are
/// dropped, so the layout core only ever sees well-formed items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(flatten)]
    pub personal: PersonalInfo,
    #[serde(default, deserialize_with = "lenient_items")]
    pub experiences: Vec<ExperienceItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub education: Vec<EducationItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub projects: Vec<ProjectItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub technical_skills: Vec<SkillItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub specialized_skills: Vec<SkillItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub trainings: Vec<TrainingItem>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub achievements: Vec<AchievementItem>,
}

impl ProfileData {
    /// Resolves the items a section renders. Empty means the section is skipped.
    pub fn items_for(&self, section: &Section) -> Vec<SectionItem> {
        match section.section_type {
            SectionType::General => {
                if self.personal.is_empty() {
                    vec![]
                } else {
                    vec![SectionItem::General(self.personal.clone())]
                }
            }
            SectionType::Experience => wrap(&self.experiences, SectionItem::Experience),
            SectionType::Education => wrap(&self.education, SectionItem::Education),
            SectionType::Projects => {
                let limit = section
                    .styling_config
                    .projects_to_view()
                    .unwrap_or(usize::MAX);
                self.projects
                    .iter()
                    .take(limit)
                    .cloned()
                    .map(SectionItem::Project)
                    .collect()
            }
            SectionType::TechnicalSkills => wrap(&self.technical_skills, SectionItem::Skill),
            SectionType::SpecializedSkills => wrap(&self.specialized_skills, SectionItem::Skill),
            SectionType::Training => wrap(&self.trainings, SectionItem::Training),
            SectionType::Achievements => wrap(&self.achievements, SectionItem::Achievement),
            SectionType::PageBreak | SectionType::Unknown => vec![],
        }
    }

    /// Total number of collection items (the general block is not counted).
    pub fn item_count(&self) -> usize {
        self.experiences.len()
            + self.education.len()
            + self.projects.len()
            + self.technical_skills.len()
            + self.specialized_skills.len()
            + self.trainings.len()
            + self.achievements.len()
    }
}

fn wrap<T: Clone>(items: &[T], f: fn(T) -> SectionItem) -> Vec<SectionItem> {
    items.iter().cloned().map(f).collect()
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Parses one collection entry. `Ok(None)` for JSON null.
pub(crate) fn parse_item<T: DeserializeOwned>(value: Value) -> Result<Option<T>, serde_json::Error> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}

fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(vec![]),
        other => {
            debug!(found = %json_kind(&other), "Profile collection is not an array; treating as empty");
            return Ok(vec![]);
        }
    };
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match parse_item(value) {
            Ok(item) => item,
            Err(e) => {
                debug!(index = i, error = %e, "Dropping malformed profile item");
                None
            }
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
