//! Axum route handlers for the Layout API.

use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::layout::distributor::{PageDescriptor, Paginator};
use crate::layout::estimator::Estimator;
use crate::layout::metrics::{LayoutConfig, LayoutMetrics, Orientation};
use crate::layout::page_fill::{analyze_distribution, overflowing_pages, PageFillAnalysis};
use crate::layout::trace::TracingTrace;
use crate::models::profile::{ProfileData, SectionItem};
use crate::models::section::{Section, SectionType};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PaginateRequest {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub profile: ProfileData,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub layout_config: LayoutConfig,
}

#[derive(Debug, Serialize)]
pub struct PaginateResponse {
    pub pages: Vec<PageDescriptor>,
    pub page_count: usize,
    pub truncated: bool,
    pub fill: Vec<PageFillAnalysis>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub section_type: SectionType,
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub orientation: Orientation,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub section_type: SectionType,
    /// Items that parsed; null and malformed entries are not counted.
    pub item_count: usize,
    /// Per-item heights, excluding the section title bar. For every type except
    /// skills these sum to `height` minus the title bar. A skill reports its
    /// share of one chip row, while `height` rounds skills up to whole rows, so
    /// a partly filled last row makes the sum fall short of `height`.
    pub item_heights: Vec<f32>,
    pub height: f32,
    pub content_height: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout/paginate
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(req): Json<PaginateRequest>,
) -> Result<Json<PaginateResponse>, AppError> {
    validate_section_ids(&req.sections)?;

    let metrics = state.config.metrics.clone();
    let max_pages = state.config.max_pages;
    let trace = state.config.trace_distribution;

    // Pure CPU work, keep it off the async executor.
    let response = tokio::task::spawn_blocking(move || paginate(&req, &metrics, max_pages, trace))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pagination: {e}")))?;

    Ok(Json(response))
}

/// POST /api/v1/layout/estimate
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(req): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    if req.section_type == SectionType::Unknown {
        return Err(AppError::Validation(
            "Unrecognized section type cannot be estimated".to_string(),
        ));
    }
    Ok(Json(estimate(req, &state.config.metrics)))
}

// ────────────────────────────────────────────────────────────────────────────
// Synchronous bodies
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn paginate(
    req: &PaginateRequest,
    metrics: &LayoutMetrics,
    max_pages: usize,
    trace: bool,
) -> PaginateResponse {
    let tracer = TracingTrace;
    let mut paginator = Paginator::new(metrics, req.orientation).max_pages(max_pages);
    if trace {
        paginator = paginator.with_trace(&tracer);
    }

    let distribution = paginator.distribute(&req.sections, &req.profile, &req.layout_config);
    let fill = analyze_distribution(&distribution, paginator.capacity());

    let overflowing = overflowing_pages(&fill);
    if !overflowing.is_empty() {
        info!(pages = ?overflowing, "Oversized content overflows its page");
    }
    info!(
        sections = req.sections.len(),
        page_count = distribution.page_count(),
        truncated = distribution.truncated,
        layout = ?req.layout_config.layout_type,
        "CV pages distributed"
    );

    PaginateResponse {
        page_count: distribution.page_count(),
        truncated: distribution.truncated,
        pages: distribution.pages,
        fill,
    }
}

pub(crate) fn estimate(req: EstimateRequest, metrics: &LayoutMetrics) -> EstimateResponse {
    let estimator = Estimator::new(metrics, req.orientation);
    let items: Vec<SectionItem> = req
        .items
        .into_iter()
        .filter_map(|v| SectionItem::from_value(req.section_type, v))
        .collect();

    EstimateResponse {
        section_type: req.section_type,
        item_count: items.len(),
        item_heights: items.iter().map(|i| estimator.item_height(i)).collect(),
        height: estimator.estimate_height(req.section_type, &items),
        content_height: estimator.content_height(),
    }
}

fn validate_section_ids(sections: &[Section]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(section.id) {
            return Err(AppError::Validation(format!(
                "Duplicate section id {}",
                section.id
            )));
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
