//! Page Distributor: assembles CV sections into fixed-height pages.
//!
//! # Single column
//! Sections are walked in `display_order`. Atomic sections move whole to the
//! next page when they do not fit; splittable sections are cut item by item
//! and continue on following pages under a "(continued)" title. A `page_break`
//! section closes the current page unless it is still empty.
//!
//! # Sidebar / two-column
//! Sections are partitioned by `layoutPlacement` and each column is paginated
//! with the same accumulation. The run emits `max(main, sidebar)` pages and
//! page N merges page N of both columns, so the columns stay aligned.
//!
//! # Limits
//! Never fails. Unknown section types are skipped with a warning, oversized
//! items are placed alone and allowed to overflow, and output stops at
//! `max_pages` (default 20) with `Distribution::truncated` set.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::layout::estimator::Estimator;
use crate::layout::metrics::{LayoutConfig, LayoutMetrics, Orientation};
use crate::layout::splitter::{
    continued_title, split_achievements, split_education, split_experience, split_items,
    split_projects, split_section, SplitResult,
};
use crate::layout::trace::{DistributionTrace, TraceEvent, TraceStage, ZoneCounts};
use crate::models::profile::{ProfileData, SectionItem};
use crate::models::section::{Section, SectionType, Zone};

pub const DEFAULT_MAX_PAGES: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// The slice of a splittable section that lands on one page.
///
/// `is_partial` is true while more items of the section follow on later pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialSection {
    pub section_id: Uuid,
    pub section_type: SectionType,
    pub zone: Zone,
    pub items: Vec<SectionItem>,
    pub start_index: usize,
    pub total_items: usize,
    pub is_partial: bool,
    pub title: String,
}

/// Estimated height consumed in each column of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ZoneHeights {
    pub main: f32,
    pub sidebar: f32,
}

impl ZoneHeights {
    pub fn tallest(&self) -> f32 {
        self.main.max(self.sidebar)
    }

    fn set(&mut self, zone: Zone, height: f32) {
        match zone {
            Zone::Main => self.main = height,
            Zone::Sidebar => self.sidebar = height,
        }
    }
}

/// One output page.
///
/// Atomic sections are listed whole in `sections`; splittable sections appear
/// only in `partial_sections`. A section id is in at most one of the two, and
/// `order` gives the render order of every id on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDescriptor {
    pub page_number: usize,
    pub sections: Vec<Section>,
    pub partial_sections: BTreeMap<Uuid, PartialSection>,
    pub order: Vec<Uuid>,
    pub used_height: ZoneHeights,
}

impl PageDescriptor {
    pub fn empty(page_number: usize) -> Self {
        PageDescriptor {
            page_number,
            sections: vec![],
            partial_sections: BTreeMap::new(),
            order: vec![],
            used_height: ZoneHeights::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Result of a distribution run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub pages: Vec<PageDescriptor>,
    /// True when the page limit cut off content.
    pub truncated: bool,
}

impl Distribution {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Distributes sections over pages for one orientation and metric set.
pub struct Paginator<'a> {
    estimator: Estimator<'a>,
    max_pages: usize,
    trace: Option<&'a dyn DistributionTrace>,
}

impl<'a> Paginator<'a> {
    pub fn new(metrics: &'a LayoutMetrics, orientation: Orientation) -> Self {
        Paginator {
            estimator: Estimator::new(metrics, orientation),
            max_pages: DEFAULT_MAX_PAGES,
            trace: None,
        }
    }

    /// Page limit; values below 1 are treated as 1.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn with_trace(mut self, trace: &'a dyn DistributionTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn capacity(&self) -> f32 {
        self.estimator.content_height()
    }

    /// Runs the distribution. Always returns at least one page.
    pub fn distribute(
        &self,
        sections: &[Section],
        profile: &ProfileData,
        layout: &LayoutConfig,
    ) -> Distribution {
        let all_ids: Vec<Uuid> = sections.iter().map(|s| s.id).collect();
        self.emit(TraceStage::Start, &all_ids, None);

        let mut ordered: Vec<&Section> = sections.iter().collect();
        ordered.sort_by_key(|s| s.display_order);

        let (mut pages, truncated) = if layout.layout_type.is_multi_column() {
            let (main, sidebar): (Vec<&Section>, Vec<&Section>) =
                ordered.into_iter().partition(|s| s.zone() == Zone::Main);
            self.emit(
                TraceStage::ZonesPartitioned,
                &all_ids,
                Some(ZoneCounts {
                    main: main.len(),
                    sidebar: sidebar.len(),
                }),
            );

            let main_run = self.run_zone(Zone::Main, &main, profile);
            let sidebar_run = self.run_zone(Zone::Sidebar, &sidebar, profile);
            let truncated = main_run.truncated || sidebar_run.truncated;
            (merge_columns(main_run.pages, sidebar_run.pages), truncated)
        } else {
            let run = self.run_zone(Zone::Main, &ordered, profile);
            let pages = run
                .pages
                .into_iter()
                .enumerate()
                .map(|(i, draft)| {
                    let mut page = PageDescriptor::empty(i + 1);
                    draft.merge_into(&mut page);
                    page
                })
                .collect();
            (pages, run.truncated)
        };

        if pages.is_empty() {
            pages.push(PageDescriptor::empty(1));
        }

        self.emit(TraceStage::Complete, &all_ids, None);
        Distribution { pages, truncated }
    }

    fn run_zone(&self, zone: Zone, sections: &[&Section], profile: &ProfileData) -> ZoneRun<'_> {
        let mut run = ZoneRun {
            zone,
            estimator: &self.estimator,
            capacity: self.estimator.content_height(),
            max_pages: self.max_pages,
            trace: self.trace,
            pages: vec![],
            current: PageDraft::new(zone),
            truncated: false,
        };
        run.run(sections, profile);
        run
    }

    fn emit(&self, stage: TraceStage, sections: &[Uuid], zones: Option<ZoneCounts>) {
        if let Some(trace) = self.trace {
            trace.record(&TraceEvent {
                stage,
                sections,
                zones,
            });
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-column accumulation
// ────────────────────────────────────────────────────────────────────────────

/// Content of one page of one column while it is being filled.
struct PageDraft {
    zone: Zone,
    sections: Vec<Section>,
    partials: BTreeMap<Uuid, PartialSection>,
    order: Vec<Uuid>,
    height: f32,
}

impl PageDraft {
    fn new(zone: Zone) -> Self {
        PageDraft {
            zone,
            sections: vec![],
            partials: BTreeMap::new(),
            order: vec![],
            height: 0.0,
        }
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn merge_into(self, page: &mut PageDescriptor) {
        page.sections.extend(self.sections);
        page.partial_sections.extend(self.partials);
        page.order.extend(self.order);
        page.used_height.set(self.zone, self.height);
    }
}

struct ZoneRun<'e> {
    zone: Zone,
    estimator: &'e Estimator<'e>,
    capacity: f32,
    max_pages: usize,
    trace: Option<&'e dyn DistributionTrace>,
    pages: Vec<PageDraft>,
    current: PageDraft,
    truncated: bool,
}

impl<'e> ZoneRun<'e> {
    fn run(&mut self, sections: &[&Section], profile: &ProfileData) {
        for section in sections {
            if self.truncated {
                break;
            }
            match section.section_type {
                SectionType::PageBreak => {
                    self.flush();
                    continue;
                }
                SectionType::Unknown => {
                    warn!(section_id = %section.id, "Skipping section with unrecognized type");
                    self.emit(TraceStage::SectionSkipped, &section.id);
                    continue;
                }
                _ => {}
            }

            let items = profile.items_for(section);
            if items.is_empty() {
                self.emit(TraceStage::SectionSkipped, &section.id);
                continue;
            }

            if section.section_type.is_splittable() {
                self.place_split(section, items);
            } else {
                self.place_atomic(section, items);
            }
        }
        self.flush();
    }

    fn place_atomic(&mut self, section: &Section, items: Vec<SectionItem>) {
        let height = self
            .estimator
            .estimate_height(section.section_type, &items);
        if !self.current.is_empty() && self.current.height + height > self.capacity {
            self.flush();
        }
        if !self.open_page() {
            return;
        }

        self.current.sections.push(section.clone());
        self.current.order.push(section.id);
        self.current.height += height;
        self.emit(TraceStage::SectionPlaced, &section.id);
    }

    fn place_split(&mut self, section: &Section, items: Vec<SectionItem>) {
        let header = self.estimator.header_height();
        let total_items = items.len();

        // Start a fresh page rather than strand a title with no room for its first item.
        let first_height = self.estimator.item_height(&items[0]);
        if !self.current.is_empty() && self.current.height + header + first_height > self.capacity
        {
            self.flush();
        }
        if !self.open_page() {
            return;
        }

        let available = self.capacity - self.current.height - header;
        let mut result = self.first_split(section, items, available);
        let mut start_index = 0;
        let mut fragment = 0;

        loop {
            let height = header + result.page_height();
            let count = result.page_items.len();
            let is_partial = !result.remaining_items.is_empty();
            let title = if fragment == 0 {
                result.section_title.clone()
            } else {
                continued_title(&result.section_title)
            };

            self.current.partials.insert(
                section.id,
                PartialSection {
                    section_id: section.id,
                    section_type: section.section_type,
                    zone: self.zone,
                    items: result.page_items.into_iter().map(|m| m.item).collect(),
                    start_index,
                    total_items,
                    is_partial,
                    title,
                },
            );
            self.current.order.push(section.id);
            self.current.height += height;
            self.emit(TraceStage::SectionPlaced, &section.id);

            if !is_partial {
                break;
            }

            start_index += count;
            fragment += 1;
            self.flush();
            if !self.open_page() {
                return;
            }
            result = split_items(result.remaining_items, self.capacity - header, section.title());
        }
    }

    fn first_split(&self, section: &Section, items: Vec<SectionItem>, available: f32) -> SplitResult {
        let title = section.title();
        match section.section_type {
            SectionType::Experience => split_experience(self.estimator, items, available, title),
            SectionType::Projects => split_projects(self.estimator, items, available, title),
            SectionType::Education => split_education(self.estimator, items, available, title),
            SectionType::Achievements => split_achievements(self.estimator, items, available, title),
            other => split_section(self.estimator, other, items, available, title),
        }
    }

    /// Closes the current page if it holds anything.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let page = std::mem::replace(&mut self.current, PageDraft::new(self.zone));
        if let Some(trace) = self.trace {
            trace.record(&TraceEvent {
                stage: TraceStage::PageFlushed,
                sections: &page.order,
                zones: None,
            });
        }
        self.pages.push(page);
    }

    /// Checks that content may go onto the current page. Returns false once the
    /// page limit is reached; further content is dropped.
    fn open_page(&mut self) -> bool {
        if !self.current.is_empty() || self.pages.len() < self.max_pages {
            return true;
        }
        if !self.truncated {
            warn!(
                max_pages = self.max_pages,
                zone = ?self.zone,
                "Page limit reached; remaining CV content not placed"
            );
            if let Some(trace) = self.trace {
                trace.record(&TraceEvent {
                    stage: TraceStage::Truncated,
                    sections: &[],
                    zones: None,
                });
            }
        }
        self.truncated = true;
        false
    }

    fn emit(&self, stage: TraceStage, section_id: &Uuid) {
        if let Some(trace) = self.trace {
            trace.record(&TraceEvent {
                stage,
                sections: std::slice::from_ref(section_id),
                zones: None,
            });
        }
    }
}

/// Zips the two columns page by page; the longer column sets the page count.
fn merge_columns(main: Vec<PageDraft>, sidebar: Vec<PageDraft>) -> Vec<PageDescriptor> {
    let count = main.len().max(sidebar.len());
    let mut main = main.into_iter();
    let mut sidebar = sidebar.into_iter();

    (1..=count)
        .map(|page_number| {
            let mut page = PageDescriptor::empty(page_number);
            if let Some(draft) = main.next() {
                draft.merge_into(&mut page);
            }
            if let Some(draft) = sidebar.next() {
                draft.merge_into(&mut page);
            }
            page
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
