//! Page Fill Analysis: reports how well each distributed page is used.
//!
//! The distributor accepts visual overflow rather than dropping content: an
//! item taller than a page is placed alone on its page. This module makes such
//! pages visible to the preview so it can flag them, and also reports pages
//! that were closed early with a lot of unused space.
//!
//! # Fill rules
//! - used > capacity                          → Overflow
//! - whitespace > 40% on a page that is not last → TooMuchWhitespace
//! - otherwise                                → Acceptable

use serde::{Deserialize, Serialize};

use crate::layout::distributor::{Distribution, PageDescriptor};

const MAX_WHITESPACE_FRACTION: f32 = 0.40;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    Acceptable,
    /// Page closed early (page break or an item moved on) with > 40% empty.
    TooMuchWhitespace,
    /// An oversized item runs past the bottom edge.
    Overflow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFillAnalysis {
    pub page_number: usize,
    /// Height of the fuller column.
    pub used_height: f32,
    pub capacity: f32,
    pub whitespace_fraction: f32,
    pub overflow_fraction: f32,
    pub verdict: PageFillVerdict,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Analyzes one page. `is_last` pages are never reported for whitespace.
pub fn analyze_page_fill(page: &PageDescriptor, capacity: f32, is_last: bool) -> PageFillAnalysis {
    let used_height = page.used_height.tallest();
    let fill_ratio = if capacity > 0.0 {
        used_height / capacity
    } else {
        0.0
    };

    let whitespace_fraction = (1.0_f32 - fill_ratio).max(0.0);
    let overflow_fraction = (fill_ratio - 1.0_f32).max(0.0);

    let verdict = if overflow_fraction > 0.0 {
        PageFillVerdict::Overflow
    } else if !is_last && !page.is_empty() && whitespace_fraction > MAX_WHITESPACE_FRACTION {
        PageFillVerdict::TooMuchWhitespace
    } else {
        PageFillVerdict::Acceptable
    };

    PageFillAnalysis {
        page_number: page.page_number,
        used_height,
        capacity,
        whitespace_fraction,
        overflow_fraction,
        verdict,
    }
}

/// Analyzes every page of a distribution, in page order.
pub fn analyze_distribution(distribution: &Distribution, capacity: f32) -> Vec<PageFillAnalysis> {
    let last = distribution.pages.len().saturating_sub(1);
    distribution
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| analyze_page_fill(page, capacity, i == last))
        .collect()
}

/// Page numbers whose content overflows the page.
pub fn overflowing_pages(analyses: &[PageFillAnalysis]) -> Vec<usize> {
    analyses
        .iter()
        .filter(|a| a.verdict == PageFillVerdict::Overflow)
        .map(|a| a.page_number)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
