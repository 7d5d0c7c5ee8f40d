//! Axum route handlers for the Profile API.

use axum::Json;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::ProfileData;
use crate::profile::import::{export_profile, import_profile, ImportReport, ProfileExport};

/// POST /api/v1/profile/import
pub async fn handle_import(Json(raw): Json<Value>) -> Result<Json<ImportReport>, AppError> {
    let report = import_profile(&raw)?;
    info!(
        accepted = report.accepted_items,
        dropped = report.dropped_items,
        issues = report.issues.len(),
        "Profile import validated"
    );
    Ok(Json(report))
}

/// POST /api/v1/profile/export
pub async fn handle_export(Json(profile): Json<ProfileData>) -> Json<ProfileExport> {
    Json(export_profile(profile))
}
