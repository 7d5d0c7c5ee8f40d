//! Section Splitter: cuts a splittable section's items at a height budget.
//!
//! Items are measured one by one and taken in order while the running total
//! stays within the budget. The first item is always taken, even when it alone
//! exceeds the budget, so an oversized item can never stall pagination.

use serde::Serialize;

use crate::layout::estimator::Estimator;
use crate::models::profile::SectionItem;
use crate::models::section::SectionType;

/// An item paired with its own height estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasuredItem {
    pub item: SectionItem,
    pub estimated_height: f32,
}

/// Outcome of one split step.
///
/// `page_items ++ remaining_items` is always the input list, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    pub page_items: Vec<MeasuredItem>,
    pub remaining_items: Vec<MeasuredItem>,
    pub section_title: String,
}

impl SplitResult {
    pub fn page_height(&self) -> f32 {
        self.page_items.iter().map(|i| i.estimated_height).sum()
    }
}

/// Wraps each item with its estimated height.
pub fn measure_items(estimator: &Estimator<'_>, items: Vec<SectionItem>) -> Vec<MeasuredItem> {
    items
        .into_iter()
        .map(|item| MeasuredItem {
            estimated_height: estimator.item_height(&item),
            item,
        })
        .collect()
}

/// Takes the longest prefix of `items` that fits `available_height` (at least one item).
pub fn split_items(
    mut items: Vec<MeasuredItem>,
    available_height: f32,
    section_title: &str,
) -> SplitResult {
    let mut running = 0.0_f32;
    let mut fit_count = 0usize;

    for item in &items {
        if fit_count > 0 && running + item.estimated_height > available_height {
            break;
        }
        running += item.estimated_height;
        fit_count += 1;
    }

    let remaining_items = items.split_off(fit_count);
    SplitResult {
        page_items: items,
        remaining_items,
        section_title: section_title.to_string(),
    }
}

/// Measures and splits the items of any splittable section type.
pub fn split_section(
    estimator: &Estimator<'_>,
    section_type: SectionType,
    items: Vec<SectionItem>,
    available_height: f32,
    section_title: &str,
) -> SplitResult {
    debug_assert!(section_type.is_splittable() || items.is_empty());
    split_items(measure_items(estimator, items), available_height, section_title)
}

pub fn split_experience(
    estimator: &Estimator<'_>,
    items: Vec<SectionItem>,
    available_height: f32,
    section_title: &str,
) -> SplitResult {
    split_section(estimator, SectionType::Experience, items, available_height, section_title)
}

pub fn split_projects(
    estimator: &Estimator<'_>,
    items: Vec<SectionItem>,
    available_height: f32,
    section_title: &str,
) -> SplitResult {
    split_section(estimator, SectionType::Projects, items, available_height, section_title)
}

pub fn split_education(
    estimator: &Estimator<'_>,
    items: Vec<SectionItem>,
    available_height: f32,
    section_title: &str,
) -> SplitResult {
    split_section(estimator, SectionType::Education, items, available_height, section_title)
}

pub fn split_achievements(
    estimator: &Estimator<'_>,
    items: Vec<SectionItem>,
    available_height: f32,
    section_title: &str,
) -> SplitResult {
    split_section(estimator, SectionType::Achievements, items, available_height, section_title)
}

/// Title shown on every fragment after the first.
pub fn continued_title(title: &str) -> String {
    format!("{title} (continued)")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
