//! Section Height Estimator: predicts rendered section heights from profile data.
//!
//! Section height = title bar + Σ item heights. Item heights are built from
//! fixed increments (title, subtitle, date lines), wrapped text lines for free
//! text, and chip rows for enumerations (skills, technologies). Pure: the same
//! inputs always produce the same estimate.

use crate::layout::metrics::{LayoutMetrics, Orientation};
use crate::models::profile::SectionItem;
use crate::models::section::SectionType;

/// Height estimator bound to one set of metrics and one page orientation.
///
/// Orientation only selects the page capacity; per-item estimates are the same
/// for both orientations.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    metrics: &'a LayoutMetrics,
    orientation: Orientation,
}

impl<'a> Estimator<'a> {
    pub fn new(metrics: &'a LayoutMetrics, orientation: Orientation) -> Self {
        Estimator {
            metrics,
            orientation,
        }
    }

    /// Usable height of one page at this orientation.
    pub fn content_height(&self) -> f32 {
        self.metrics.content_height(self.orientation)
    }

    pub fn header_height(&self) -> f32 {
        self.metrics.section_header_height
    }

    /// Estimated height of a whole section. Returns 0.0 for an empty item list.
    pub fn estimate_height(&self, section_type: SectionType, items: &[SectionItem]) -> f32 {
        if items.is_empty() {
            return 0.0;
        }
        match section_type {
            SectionType::PageBreak | SectionType::Unknown => 0.0,
            SectionType::TechnicalSkills | SectionType::SpecializedSkills => {
                self.header_height() + self.chips(items.len())
            }
            _ => self.header_height() + items.iter().map(|i| self.item_height(i)).sum::<f32>(),
        }
    }

    /// Estimated height of a single item, excluding the section title bar.
    pub fn item_height(&self, item: &SectionItem) -> f32 {
        let m = self.metrics;
        match item {
            SectionItem::General(p) => {
                m.general_base_height
                    + self.fixed(present(&p.current_designation))
                    + self.text(p.biography.as_deref())
            }
            SectionItem::Experience(e) => {
                m.item_spacing
                    + self.fixed(present(&e.designation))
                    + self.fixed(present(&e.company_name))
                    + self.fixed(e.start_date.is_some() || e.end_date.is_some() || e.is_current)
                    + self.text(e.description.as_deref())
                    + self.chips(e.technologies.len())
            }
            SectionItem::Education(e) => {
                m.item_spacing
                    + self.fixed(present(&e.degree))
                    + self.fixed(present(&e.institution) || present(&e.field_of_study))
                    + self.fixed(e.start_date.is_some() || e.end_date.is_some())
                    + self.fixed(present(&e.grade))
                    + self.text(e.description.as_deref())
            }
            SectionItem::Project(p) => {
                m.item_spacing
                    + self.fixed(present(&p.name))
                    + self.fixed(present(&p.role))
                    + self.fixed(p.start_date.is_some() || p.end_date.is_some())
                    + self.text(p.description.as_deref())
                    + self.text(p.responsibility.as_deref())
                    + self.chips(p.technologies.len())
            }
            // A single chip: its share of one row. Section totals round up to
            // whole rows, so these do not sum to `estimate_height` for skills.
            SectionItem::Skill(_) => m.chip_row_height / m.items_per_row.max(1) as f32,
            SectionItem::Training(t) => {
                m.item_spacing
                    + self.fixed(present(&t.title))
                    + self.fixed(present(&t.provider) || t.completion_date.is_some())
                    + self.text(t.description.as_deref())
            }
            SectionItem::Achievement(a) => {
                m.item_spacing
                    + self.fixed(present(&a.title))
                    + self.fixed(a.date.is_some())
                    + self.text(a.description.as_deref())
            }
        }
    }

    fn fixed(&self, is_present: bool) -> f32 {
        if is_present {
            self.metrics.fixed_line_height
        } else {
            0.0
        }
    }

    fn text(&self, text: Option<&str>) -> f32 {
        let lines = text.map_or(0, |t| self.metrics.text_lines(t));
        lines as f32 * self.metrics.line_height
    }

    fn chips(&self, count: usize) -> f32 {
        self.metrics.rows(count) as f32 * self.metrics.chip_row_height
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
