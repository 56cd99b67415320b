//! Property tests for the pagination engine.
//!
//! Block sequences are generated the way the theme renderer shapes them: a
//! masthead, then sections of header, bound spacer and zero or more items.
//! Item heights occasionally exceed a whole page.

use proptest::prelude::*;

use vitae::block::{BlockKind, ContentBlock, MeasuredBlock};
use vitae::markup::Node;
use vitae::pagination::{paginate, Pagination, PaginationLimits};

const MAX: f64 = 850.0;

#[derive(Debug, Clone)]
struct Section {
    header: f64,
    spacer: f64,
    items: Vec<f64>,
}

fn block(key: String, kind: BlockKind, height: f64) -> MeasuredBlock {
    MeasuredBlock::new(ContentBlock::new(key, kind, Node::spacer(0.0)), height)
}

fn push_section(out: &mut Vec<MeasuredBlock>, n: usize, section: &Section) {
    out.push(block(format!("s{n}-header"), BlockKind::SectionHeader, section.header));
    out.push(block(format!("s{n}-spacer"), BlockKind::Spacer, section.spacer));
    for (j, &h) in section.items.iter().enumerate() {
        out.push(block(format!("s{n}-{j}"), BlockKind::Item, h));
    }
}

fn build(masthead: f64, sections: &[Section]) -> Vec<MeasuredBlock> {
    let mut out = vec![block("main-header".into(), BlockKind::Masthead, masthead)];
    for (n, s) in sections.iter().enumerate() {
        push_section(&mut out, n, s);
    }
    out
}

fn limits(carry: bool) -> PaginationLimits {
    PaginationLimits {
        max_content_height: MAX,
        header_lookahead: 80.0,
        carry_orphaned_headers: carry,
    }
}

fn keys(p: &Pagination) -> Vec<Vec<String>> {
    p.pages()
        .iter()
        .map(|page| page.keys().map(String::from).collect())
        .collect()
}

fn item_height() -> impl Strategy<Value = f64> {
    prop_oneof![
        9 => 10.0..400.0f64,
        1 => 860.0..1500.0f64,
    ]
}

fn section() -> impl Strategy<Value = Section> {
    (10.0..60.0f64, 0.0..30.0f64, prop::collection::vec(item_height(), 0..6))
        .prop_map(|(header, spacer, items)| Section { header, spacer, items })
}

fn document() -> impl Strategy<Value = (f64, Vec<Section>)> {
    (50.0..300.0f64, prop::collection::vec(section(), 0..10))
}

proptest! {
    #[test]
    fn every_block_is_placed_once_in_order(
        (masthead, sections) in document(),
        carry in any::<bool>(),
    ) {
        let blocks = build(masthead, &sections);
        let expected: Vec<String> = blocks.iter().map(|b| b.key().to_string()).collect();
        let pagination = paginate(blocks, &limits(carry));
        let placed: Vec<String> = keys(&pagination).into_iter().flatten().collect();
        prop_assert_eq!(placed, expected);
        for page in pagination.pages() {
            prop_assert!(!page.blocks.is_empty());
        }
    }

    #[test]
    fn pages_stay_within_the_height_budget(
        (masthead, sections) in document(),
        carry in any::<bool>(),
    ) {
        let pagination = paginate(build(masthead, &sections), &limits(carry));
        for page in pagination.pages() {
            if page.blocks.iter().any(|b| b.height > MAX) {
                continue;
            }
            prop_assert!(page.height() <= MAX, "page {} is {}", page.number(), page.height());
        }
    }

    #[test]
    fn headers_never_end_a_page(
        (masthead, sections) in document(),
    ) {
        let pagination = paginate(build(masthead, &sections), &limits(true));
        let pages = pagination.pages();
        for (page, next) in pages.iter().zip(pages.iter().skip(1)) {
            let run_start = page
                .blocks
                .iter()
                .rposition(|b| !b.is_spacer() && !b.is_header())
                .map_or(0, |i| i + 1);
            let run = &page.blocks[run_start..];
            if !run.iter().any(MeasuredBlock::is_header) {
                continue;
            }
            // The page holds nothing but the run: there was nothing to leave behind.
            if run_start == 0 {
                continue;
            }
            let run_height: f64 = run.iter().map(|b| b.height).sum();
            let incoming = next.blocks[0].height;
            prop_assert!(
                run_height + incoming > MAX && incoming <= MAX,
                "page {} ends on a header run of {} before a {} block",
                page.number(),
                run_height,
                incoming
            );
        }
    }

    #[test]
    fn pagination_is_deterministic(
        (masthead, sections) in document(),
        carry in any::<bool>(),
    ) {
        let a = paginate(build(masthead, &sections), &limits(carry));
        let b = paginate(build(masthead, &sections), &limits(carry));
        prop_assert_eq!(keys(&a), keys(&b));
    }

    #[test]
    fn appending_a_section_never_removes_pages(
        (masthead, sections) in document(),
        extra in section(),
        carry in any::<bool>(),
    ) {
        let before = paginate(build(masthead, &sections), &limits(carry));
        let mut blocks = build(masthead, &sections);
        push_section(&mut blocks, sections.len(), &extra);
        let after = paginate(blocks, &limits(carry));
        prop_assert!(after.total_pages() >= before.total_pages());
    }
}
