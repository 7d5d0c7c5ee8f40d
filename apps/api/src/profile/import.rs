//! Profile JSON import/export.
//!
//! Exports wrap the profile in a versioned envelope. Imports validate that
//! envelope, then parse every collection entry on its own: entries that are
//! null or malformed are dropped and reported instead of failing the import.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::profile::{
    parse_item, AchievementItem, EducationItem, ExperienceItem, PersonalInfo, ProfileData,
    ProjectItem, SkillItem, TrainingItem,
};

pub const SCHEMA_VERSION: &str = "1.0";
const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import document must be a JSON object")]
    NotAnObject,

    #[error("Import document has no schema_version")]
    MissingVersion,

    #[error("Unsupported schema version '{0}'")]
    UnsupportedVersion(String),

    #[error("Import document has no profile object")]
    MissingProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub profile: ProfileData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Data was kept but looks wrong.
    Warning,
    /// Data was dropped.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportIssue {
    /// Location in the profile, e.g. `experiences[2]`.
    pub path: String,
    pub reason: String,
    pub severity: IssueSeverity,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub profile: ProfileData,
    pub exported_at: Option<DateTime<Utc>>,
    pub issues: Vec<ImportIssue>,
    pub accepted_items: usize,
    pub dropped_items: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

pub fn export_profile(profile: ProfileData) -> ProfileExport {
    ProfileExport {
        schema_version: SCHEMA_VERSION.to_string(),
        exported_at: Utc::now(),
        profile,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Import
// ────────────────────────────────────────────────────────────────────────────

/// Validates an export envelope and rebuilds the profile it carries.
pub fn import_profile(raw: &Value) -> Result<ImportReport, ImportError> {
    let envelope = raw.as_object().ok_or(ImportError::NotAnObject)?;

    let version = envelope
        .get("schema_version")
        .and_then(Value::as_str)
        .ok_or(ImportError::MissingVersion)?;
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ImportError::UnsupportedVersion(version.to_string()));
    }

    let source = envelope
        .get("profile")
        .and_then(Value::as_object)
        .ok_or(ImportError::MissingProfile)?;

    let exported_at = envelope
        .get("exported_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    let mut importer = Importer::default();

    let personal = match serde_json::from_value::<PersonalInfo>(Value::Object(source.clone())) {
        Ok(p) => p,
        Err(e) => {
            importer.issue("profile", format!("Personal fields ignored: {e}"), IssueSeverity::Error);
            PersonalInfo::default()
        }
    };

    let profile = ProfileData {
        personal,
        experiences: importer.collection::<ExperienceItem>(source, "experiences"),
        education: importer.collection::<EducationItem>(source, "education"),
        projects: importer.collection::<ProjectItem>(source, "projects"),
        technical_skills: importer.collection::<SkillItem>(source, "technical_skills"),
        specialized_skills: importer.collection::<SkillItem>(source, "specialized_skills"),
        trainings: importer.collection::<TrainingItem>(source, "trainings"),
        achievements: importer.collection::<AchievementItem>(source, "achievements"),
    };

    for (i, e) in profile.experiences.iter().enumerate() {
        importer.check_range(&format!("experiences[{i}]"), e.start_date, e.end_date);
    }
    for (i, e) in profile.education.iter().enumerate() {
        importer.check_range(&format!("education[{i}]"), e.start_date, e.end_date);
    }
    for (i, p) in profile.projects.iter().enumerate() {
        importer.check_range(&format!("projects[{i}]"), p.start_date, p.end_date);
    }

    Ok(ImportReport {
        accepted_items: profile.item_count(),
        dropped_items: importer.dropped,
        issues: importer.issues,
        exported_at,
        profile,
    })
}

#[derive(Default)]
struct Importer {
    issues: Vec<ImportIssue>,
    dropped: usize,
}

impl Importer {
    fn issue(&mut self, path: &str, reason: String, severity: IssueSeverity) {
        self.issues.push(ImportIssue {
            path: path.to_string(),
            reason,
            severity,
        });
    }

    fn collection<T: DeserializeOwned>(&mut self, source: &Map<String, Value>, key: &str) -> Vec<T> {
        let entries = match source.get(key) {
            None | Some(Value::Null) => return vec![],
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                self.issue(key, "Expected an array".to_string(), IssueSeverity::Error);
                return vec![];
            }
        };

        let mut items = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let path = format!("{key}[{i}]");
            match parse_item::<T>(entry.clone()) {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {
                    self.dropped += 1;
                    self.issue(&path, "Null entry dropped".to_string(), IssueSeverity::Error);
                }
                Err(e) => {
                    self.dropped += 1;
                    self.issue(&path, format!("Malformed entry dropped: {e}"), IssueSeverity::Error);
                }
            }
        }
        items
    }

    fn check_range(&mut self, path: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.issue(
                    path,
                    format!("end_date {end} is before start_date {start}"),
                    IssueSeverity::Warning,
                );
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
