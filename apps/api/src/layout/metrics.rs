//! Page geometry and the heuristic constants behind height estimation.
//!
//! All heights are in CSS pixels at 96 dpi. The defaults are calibrated for an
//! A4 page with 12mm margins and an 11px body font; every value can be
//! overridden through `LAYOUT_*` environment variables (see `config.rs`).
//! Estimates are deliberately approximate: the renderer wraps text with real
//! glyph metrics, the estimator only needs to agree with it to within a line
//! or two per section.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Page orientation / layout type
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    #[default]
    SingleColumn,
    TwoColumn,
    Sidebar,
}

impl LayoutType {
    pub fn is_multi_column(&self) -> bool {
        !matches!(self, LayoutType::SingleColumn)
    }
}

/// Template layout configuration. Keys other than `layout_type` are kept for the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default, alias = "layoutType")]
    pub layout_type: LayoutType,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic constants
// ────────────────────────────────────────────────────────────────────────────

/// Tuning constants for page capacity and per-item height estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Usable content height of a portrait page.
    pub portrait_content_height: f32,
    /// Usable content height of a landscape page (axes swapped, so shorter).
    pub landscape_content_height: f32,
    /// Section title bar, including its bottom rule.
    pub section_header_height: f32,
    /// Average characters that fit one line of body text.
    pub chars_per_line: usize,
    /// Height of one wrapped line of body text.
    pub line_height: f32,
    /// Fixed increment for a title, subtitle, or date line.
    pub fixed_line_height: f32,
    /// Vertical gap between consecutive items.
    pub item_spacing: f32,
    /// Skill or technology chips per row.
    pub items_per_row: usize,
    /// Height of one row of chips.
    pub chip_row_height: f32,
    /// Name banner and contact block of the general section.
    pub general_base_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        LayoutMetrics {
            portrait_content_height: 1000.0,
            landscape_content_height: 700.0,
            section_header_height: 40.0,
            chars_per_line: 95,
            line_height: 18.0,
            fixed_line_height: 22.0,
            item_spacing: 12.0,
            items_per_row: 4,
            chip_row_height: 26.0,
            general_base_height: 110.0,
        }
    }
}

impl LayoutMetrics {
    pub fn content_height(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Portrait => self.portrait_content_height,
            Orientation::Landscape => self.landscape_content_height,
        }
    }

    /// Estimated wrapped line count: ceil(chars / chars_per_line), 0 for blank text.
    pub fn text_lines(&self, text: &str) -> usize {
        let chars = text.trim().chars().count();
        if chars == 0 {
            return 0;
        }
        chars.div_ceil(self.chars_per_line.max(1))
    }

    /// Rows needed to lay out `count` chips.
    pub fn rows(&self, count: usize) -> usize {
        count.div_ceil(self.items_per_row.max(1))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
