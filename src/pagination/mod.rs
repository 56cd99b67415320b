//! # Pagination Engine
//!
//! Cuts a measured block sequence into pages in a single forward pass.
//!
//! Blocks are never split, reordered, duplicated or dropped; the engine only
//! chooses where pages end. Two rules close a page before a block:
//!
//! - **Overflow**: the block would push the page past `max_content_height`.
//! - **Header lookahead**: a section header (with its bound spacers) would
//!   fit, but not with `header_lookahead` pixels of room left below it.
//!
//! The first block on a page is always placed, so a block taller than a
//! whole page gets a page of its own instead of stalling the pass.
//!
//! With `carry_orphaned_headers` on, a page about to close on a header run
//! (headers plus their spacers) that follows other content hands that run
//! to the next page, as long as the run and the incoming block fit there
//! together or the incoming block would overflow any page anyway. The
//! carry happens before the page is committed; nothing already emitted is
//! ever revised.
//!
//! The engine is total: every input, including an empty one, produces a
//! partition.

pub mod break_decision;

use std::ops::Range;

use serde::Serialize;

use crate::block::{BlockKind, MeasuredBlock};
use crate::model::PageGeometry;
use break_decision::{decide_break, BreakDecision, BreakReason, Candidate};

/// The numeric knobs the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationLimits {
    /// Usable content height per page, in pixels.
    pub max_content_height: f64,
    /// Room a section header needs below it to start on a page.
    pub header_lookahead: f64,
    pub carry_orphaned_headers: bool,
}

impl From<&PageGeometry> for PaginationLimits {
    fn from(geometry: &PageGeometry) -> Self {
        Self {
            max_content_height: geometry.max_content_height(),
            header_lookahead: geometry.header_lookahead,
            carry_orphaned_headers: geometry.carry_orphaned_headers,
        }
    }
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self::from(&PageGeometry::default())
    }
}

/// What the engine needs to know about a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub kind: BlockKind,
    pub height: f64,
}

impl From<&MeasuredBlock> for Slot {
    fn from(block: &MeasuredBlock) -> Self {
        Self {
            kind: block.block.kind,
            height: block.height,
        }
    }
}

/// Where the current page's trailing header run starts, if it has one.
///
/// A run is one or more headers, each optionally followed by spacers,
/// sitting at the very end of the page.
fn trailing_header_run(slots: &[Slot], page: &Range<usize>) -> Option<usize> {
    let mut start = None;
    let mut i = page.end;
    while i > page.start {
        match slots[i - 1].kind {
            BlockKind::Spacer => i -= 1,
            BlockKind::SectionHeader => {
                i -= 1;
                start = Some(i);
            }
            _ => break,
        }
    }
    start
}

/// Height of the header at `i` plus the spacers directly after it.
fn header_run_height(slots: &[Slot], i: usize) -> f64 {
    slots[i].height
        + slots[i + 1..]
            .iter()
            .take_while(|s| s.kind == BlockKind::Spacer)
            .map(|s| s.height)
            .sum::<f64>()
}

fn page_height(slots: &[Slot], page: &Range<usize>) -> f64 {
    slots[page.clone()].iter().map(|s| s.height).sum()
}

/// Plan page boundaries over `slots`, returning one index range per page.
///
/// The ranges are contiguous, in order and cover every slot exactly once.
pub fn plan_pages(slots: &[Slot], limits: &PaginationLimits) -> Vec<Range<usize>> {
    let max = limits.max_content_height;
    let mut pages = Vec::new();
    let mut page = 0..0;
    let mut current_height = 0.0;

    for (i, slot) in slots.iter().enumerate() {
        let candidate = Candidate {
            height: slot.height,
            header_run: (slot.kind == BlockKind::SectionHeader).then(|| header_run_height(slots, i)),
        };
        let run_start = trailing_header_run(slots, &page);
        let page_is_header_run = run_start == Some(page.start) && !page.is_empty();

        match decide_break(current_height, candidate, page_is_header_run, limits) {
            BreakDecision::Place => {}
            BreakDecision::BreakBefore(reason) => {
                let carry = match run_start {
                    Some(start) if limits.carry_orphaned_headers && start > page.start => {
                        let run = page_height(slots, &(start..page.end));
                        (run + slot.height <= max || slot.height > max).then_some(start)
                    }
                    _ => None,
                };
                log::debug!(
                    "page {} closes before block {i} ({}){}",
                    pages.len() + 1,
                    match reason {
                        BreakReason::HeaderLookahead => "header lookahead",
                        BreakReason::Overflow => "overflow",
                    },
                    if carry.is_some() { ", carrying its trailing header" } else { "" }
                );
                let next_start = carry.unwrap_or(page.end);
                pages.push(page.start..next_start);
                page = next_start..i;
                current_height = page_height(slots, &page);
            }
        }

        page.end = i + 1;
        current_height += slot.height;
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

/// One output page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Zero-based position in the document.
    pub index: usize,
    pub total: usize,
    pub blocks: Vec<MeasuredBlock>,
}

impl Page {
    /// One-based page number, as printed in the footer.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn height(&self) -> f64 {
        self.blocks.iter().map(|b| b.height).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.key())
    }

    pub fn is_last(&self) -> bool {
        self.number() == self.total
    }
}

/// The result of one pagination pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pages: Vec<Page>,
    max_content_height: f64,
}

impl Pagination {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn max_content_height(&self) -> f64 {
        self.max_content_height
    }

    /// All blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &MeasuredBlock> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// A serializable view: pages with their block keys and heights.
    pub fn summary(&self) -> PaginationSummary {
        PaginationSummary {
            total_pages: self.total_pages(),
            max_content_height: self.max_content_height,
            pages: self
                .pages
                .iter()
                .map(|page| PageSummary {
                    index: page.index,
                    total: page.total,
                    height: page.height(),
                    blocks: page
                        .blocks
                        .iter()
                        .map(|b| BlockSummary {
                            key: b.key().to_string(),
                            kind: b.block.kind,
                            height: b.height,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub total_pages: usize,
    pub max_content_height: f64,
    pub pages: Vec<PageSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub index: usize,
    pub total: usize,
    pub height: f64,
    pub blocks: Vec<BlockSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub key: String,
    pub kind: BlockKind,
    pub height: f64,
}

/// Cut `blocks` into pages.
pub fn paginate(blocks: Vec<MeasuredBlock>, limits: &PaginationLimits) -> Pagination {
    let slots: Vec<Slot> = blocks.iter().map(Slot::from).collect();
    let ranges = plan_pages(&slots, limits);
    let total = ranges.len();

    let mut remaining = blocks.into_iter();
    let pages: Vec<Page> = ranges
        .into_iter()
        .enumerate()
        .map(|(index, range)| Page {
            index,
            total,
            blocks: remaining.by_ref().take(range.len()).collect(),
        })
        .collect();

    for page in &pages {
        log::debug!(
            "page {}/{}: {} blocks, {:.1}px",
            page.number(),
            total,
            page.blocks.len(),
            page.height()
        );
    }
    log::info!("Paginated into {total} page(s)");

    Pagination {
        pages,
        max_content_height: limits.max_content_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ContentBlock;
    use crate::markup::Node;

    fn limits() -> PaginationLimits {
        PaginationLimits {
            max_content_height: 900.0,
            header_lookahead: 80.0,
            carry_orphaned_headers: true,
        }
    }

    fn plain() -> PaginationLimits {
        PaginationLimits {
            carry_orphaned_headers: false,
            ..limits()
        }
    }

    fn blocks(seq: &[(&str, BlockKind, f64)]) -> Vec<MeasuredBlock> {
        seq.iter()
            .map(|&(key, kind, h)| MeasuredBlock::new(ContentBlock::new(key, kind, Node::spacer(h)), h))
            .collect()
    }

    fn keys(p: &Pagination) -> Vec<Vec<&str>> {
        p.pages().iter().map(|page| page.keys().collect()).collect()
    }

    use BlockKind::{Item, Masthead, SectionHeader as Header, Spacer};

    #[test]
    fn scenario_a_header_lookahead_breaks_early() {
        let input = blocks(&[
            ("main-header", Masthead, 200.0),
            ("exp-header", Header, 40.0),
            ("exp-1", Item, 300.0),
            ("exp-2", Item, 300.0),
            ("edu-header", Header, 40.0),
            ("edu-1", Item, 100.0),
        ]);
        for l in [limits(), plain()] {
            let p = paginate(input.clone(), &l);
            assert_eq!(
                keys(&p),
                vec![
                    vec!["main-header", "exp-header", "exp-1", "exp-2"],
                    vec!["edu-header", "edu-1"],
                ]
            );
            assert_eq!(p.pages()[0].height(), 840.0);
            assert_eq!(p.pages()[1].height(), 140.0);
        }
    }

    #[test]
    fn scenario_b_oversized_block_gets_its_own_page() {
        let p = paginate(blocks(&[("summary-body", Item, 1200.0)]), &limits());
        assert_eq!(keys(&p), vec![vec!["summary-body"]]);
    }

    #[test]
    fn scenario_c_trailing_header_may_end_the_document() {
        let p = paginate(blocks(&[("a", Item, 100.0), ("b", Header, 50.0)]), &limits());
        assert_eq!(keys(&p), vec![vec!["a", "b"]]);
    }

    #[test]
    fn scenario_d_masthead_alone_is_one_page() {
        for h in [0.0, 300.0, 5000.0] {
            let p = paginate(blocks(&[("main-header", Masthead, h)]), &limits());
            assert_eq!(p.total_pages(), 1);
            assert_eq!(p.pages()[0].total, 1);
        }
    }

    #[test]
    fn empty_input_yields_no_pages() {
        assert_eq!(paginate(vec![], &limits()).total_pages(), 0);
    }

    #[test]
    fn exact_fit_stays_on_the_page() {
        let p = paginate(blocks(&[("a", Item, 500.0), ("b", Item, 400.0), ("c", Item, 1.0)]), &limits());
        assert_eq!(keys(&p), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn spacer_travels_with_its_header() {
        // 780 + 40 + 12 + 80 > 900 only because the spacer counts.
        let input = blocks(&[
            ("a", Item, 780.0),
            ("exp-header", Header, 40.0),
            ("exp-spacer", Spacer, 12.0),
            ("exp-1", Item, 60.0),
        ]);
        let p = paginate(input, &plain());
        assert_eq!(keys(&p), vec![vec!["a"], vec!["exp-header", "exp-spacer", "exp-1"]]);
    }

    #[test]
    fn orphaned_header_run_is_carried() {
        // Lookahead passes (100 + 52 + 80 <= 900), then the item overflows.
        let input = blocks(&[
            ("a", Item, 700.0),
            ("exp-header", Header, 40.0),
            ("exp-spacer", Spacer, 12.0),
            ("exp-1", Item, 200.0),
        ]);
        let l = PaginationLimits {
            header_lookahead: 20.0,
            ..limits()
        };
        let p = paginate(input.clone(), &l);
        assert_eq!(keys(&p), vec![vec!["a"], vec!["exp-header", "exp-spacer", "exp-1"]]);

        let bare = PaginationLimits {
            carry_orphaned_headers: false,
            ..l
        };
        let p = paginate(input, &bare);
        assert_eq!(keys(&p), vec![vec!["a", "exp-header", "exp-spacer"], vec!["exp-1"]]);
    }

    #[test]
    fn consecutive_headers_are_carried_together() {
        let input = blocks(&[
            ("a", Item, 700.0),
            ("custom-x-header", Header, 40.0),
            ("custom-x-spacer", Spacer, 12.0),
            ("edu-header", Header, 40.0),
            ("edu-spacer", Spacer, 12.0),
            ("edu-1", Item, 200.0),
        ]);
        let l = PaginationLimits {
            header_lookahead: 0.0,
            ..limits()
        };
        let p = paginate(input, &l);
        assert_eq!(
            keys(&p),
            vec![
                vec!["a"],
                vec!["custom-x-header", "custom-x-spacer", "edu-header", "edu-spacer", "edu-1"],
            ]
        );
    }

    #[test]
    fn carry_is_skipped_when_it_would_overflow_the_next_page() {
        let input = blocks(&[
            ("a", Item, 700.0),
            ("h", Header, 40.0),
            ("h-spacer", Spacer, 12.0),
            ("big", Item, 860.0),
        ]);
        let l = PaginationLimits {
            header_lookahead: 0.0,
            ..limits()
        };
        let p = paginate(input, &l);
        assert_eq!(keys(&p), vec![vec!["a", "h", "h-spacer"], vec!["big"]]);
    }

    #[test]
    fn header_rides_along_with_an_oversized_block() {
        let input = blocks(&[
            ("a", Item, 700.0),
            ("h", Header, 40.0),
            ("big", Item, 1500.0),
        ]);
        let l = PaginationLimits {
            header_lookahead: 0.0,
            ..limits()
        };
        let p = paginate(input, &l);
        assert_eq!(keys(&p), vec![vec!["a"], vec!["h", "big"]]);
    }

    #[test]
    fn header_run_filling_a_page_keeps_following_headers() {
        let input = blocks(&[
            ("h1", Header, 800.0),
            ("h2", Header, 40.0),
            ("item", Item, 100.0),
        ]);
        let p = paginate(input.clone(), &limits());
        assert_eq!(keys(&p), vec![vec!["h1", "h2"], vec!["item"]]);

        let p = paginate(input, &plain());
        assert_eq!(keys(&p), vec![vec!["h1"], vec!["h2", "item"]]);
    }

    #[test]
    fn pages_know_their_position() {
        let p = paginate(blocks(&[("a", Item, 600.0), ("b", Item, 600.0), ("c", Item, 600.0)]), &limits());
        let numbers: Vec<(usize, usize, bool)> =
            p.pages().iter().map(|pg| (pg.number(), pg.total, pg.is_last())).collect();
        assert_eq!(numbers, vec![(1, 3, false), (2, 3, false), (3, 3, true)]);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let p = paginate(blocks(&[("main-header", Masthead, 120.0)]), &limits());
        let json = serde_json::to_value(p.summary()).unwrap();
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["maxContentHeight"], 900.0);
        assert_eq!(json["pages"][0]["blocks"][0]["key"], "main-header");
        assert_eq!(json["pages"][0]["blocks"][0]["kind"], "masthead");
    }

    #[test]
    fn limits_follow_geometry() {
        let l = PaginationLimits::default();
        assert!((l.max_content_height - 850.0).abs() < 1.0);
        assert_eq!(l.header_lookahead, 80.0);
        assert!(l.carry_orphaned_headers);
    }
}
