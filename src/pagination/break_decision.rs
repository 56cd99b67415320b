//! # Page Break Decisions
//!
//! The two rules that decide whether a block starts a new page. Kept apart
//! from the pass that applies them so each rule can be tested on its own.

use super::PaginationLimits;

/// Why a page was closed before a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// A section header without room for its lookahead buffer below it.
    HeaderLookahead,
    /// The block would push the page past its usable height.
    Overflow,
}

/// What to do with the next block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Put it on the current page.
    Place,
    /// Close the current page and start a new one with this block.
    BreakBefore(BreakReason),
}

/// The block being decided on.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub height: f64,
    /// For a section header: its height plus the spacers bound to it.
    pub header_run: Option<f64>,
}

/// Decide whether `candidate` starts a new page.
///
/// The first block on a page is always placed, whatever its height, so
/// every pass makes progress and an oversized block gets a page of its
/// own. A block that fills the page exactly still fits.
///
/// `page_is_header_run` marks a page holding nothing but headers and their
/// spacers; with carrying enabled, leaving such a page for the next header
/// would only strand the run it already holds.
pub fn decide_break(
    current_height: f64,
    candidate: Candidate,
    page_is_header_run: bool,
    limits: &PaginationLimits,
) -> BreakDecision {
    if current_height <= 0.0 {
        return BreakDecision::Place;
    }
    let max = limits.max_content_height;

    if let Some(run) = candidate.header_run {
        let stranded = limits.carry_orphaned_headers && page_is_header_run;
        if !stranded && current_height + run + limits.header_lookahead > max {
            return BreakDecision::BreakBefore(BreakReason::HeaderLookahead);
        }
    }
    if current_height + candidate.height > max {
        return BreakDecision::BreakBefore(BreakReason::Overflow);
    }
    BreakDecision::Place
}
