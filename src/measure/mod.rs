//! # Block Measurement Surface
//!
//! Heights come from laying blocks out, never from estimates. A surface
//! hosts the whole block sequence at the page's content width, settles its
//! layout, then reports one height per block in order.
//!
//! Reading a surface is a two-step protocol: [`MeasurementSurface::mount`]
//! the blocks, then [`MeasurementSurface::flush_layout`] before asking for
//! [`MeasurementSurface::heights`]. A surface read before it settled
//! reports [`VitaeError::MeasurementNotReady`] instead of stale numbers.
//!
//! Two surfaces ship with the crate:
//!
//! - [`LayoutSurface`] lays markup out with real font metrics and the same
//!   box model the page renderer emits.
//! - [`PresetSurface`] replays heights measured elsewhere, e.g. by a
//!   browser host running the hidden HTML mirror from
//!   [`crate::render::HtmlRenderer::render_measurement_surface`].

pub mod flex;

use std::collections::BTreeMap;

use crate::block::{ContentBlock, MeasuredBlock};
use crate::error::{Result, VitaeError};
use crate::font::FontContext;
use crate::markup::{Node, NodeKind};
use crate::model::PageGeometry;
use crate::style::{FlexDirection, FlexWrap, ResolvedStyle};
use crate::text::{apply_transform, FontSpec, TextLayout};

/// An off-screen rendering context sized like the page content area.
pub trait MeasurementSurface {
    /// Replace whatever the surface hosts with `blocks`.
    fn mount(&mut self, blocks: &[ContentBlock]);

    /// Settle layout so heights reflect the mounted blocks.
    fn flush_layout(&mut self);

    /// Margin-inclusive height of every mounted block, in mount order.
    fn heights(&self) -> Result<Vec<f64>>;
}

/// Mount, settle and read `blocks`, pairing each with its height.
///
/// Fails when the surface reports a different number of heights than
/// blocks, a negative or non-finite height, or all-zero heights for a
/// non-empty sequence (the signature of a surface that never laid out).
pub fn measure<S: MeasurementSurface + ?Sized>(
    surface: &mut S,
    blocks: Vec<ContentBlock>,
) -> Result<Vec<MeasuredBlock>> {
    surface.mount(&blocks);
    surface.flush_layout();
    let heights = surface.heights()?;

    if heights.len() != blocks.len() {
        return Err(VitaeError::MeasurementNotReady {
            mounted: blocks.len(),
            read: heights.len(),
        });
    }
    if !blocks.is_empty() && heights.iter().all(|&h| h == 0.0) {
        return Err(VitaeError::MeasurementNotReady {
            mounted: blocks.len(),
            read: 0,
        });
    }

    blocks
        .into_iter()
        .zip(heights)
        .map(|(block, height)| {
            if !height.is_finite() || height < 0.0 {
                return Err(VitaeError::InvalidHeight {
                    key: block.key,
                    height,
                });
            }
            if height == 0.0 {
                log::warn!("Block '{}' measured zero height", block.key);
            }
            log::trace!("measured {} = {height:.2}px", block.key);
            Ok(MeasuredBlock::new(block, height))
        })
        .collect()
}

// ── Layout surface ─────────────────────────────────────────────────

/// Measures blocks by laying their markup out at the content width.
///
/// Every view is a flex container (column unless it asks for a row), as in
/// the rendered page. Flex margins never collapse, so a block's height is
/// its border box plus both vertical margins.
pub struct LayoutSurface {
    font_context: FontContext,
    text_layout: TextLayout,
    content_width: f64,
    mounted: Vec<Node>,
    settled: Option<Vec<f64>>,
}

impl LayoutSurface {
    pub fn new(content_width: f64) -> Self {
        Self::with_fonts(content_width, FontContext::new())
    }

    pub fn for_geometry(geometry: &PageGeometry) -> Self {
        Self::new(geometry.content_width())
    }

    /// Use a font context with custom fonts registered.
    pub fn with_fonts(content_width: f64, font_context: FontContext) -> Self {
        Self {
            font_context,
            text_layout: TextLayout::new(),
            content_width,
            mounted: Vec::new(),
            settled: None,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn font_context_mut(&mut self) -> &mut FontContext {
        self.settled = None;
        &mut self.font_context
    }

    /// Height a single root node occupies when stacked in the content column.
    pub fn block_height(&self, root: &Node) -> f64 {
        let style = root.style.resolve(None, self.content_width);
        self.measure_node_height(root, self.content_width, &style) + style.margin.vertical()
    }

    /// Border-box height of `node` placed in a slot `available_width` wide
    /// (the slot includes the node's horizontal margins).
    fn measure_node_height(&self, node: &Node, available_width: f64, style: &ResolvedStyle) -> f64 {
        if let Some(h) = style.height {
            return h;
        }
        let outer_width = match style.width {
            Some(w) => w,
            None => available_width - style.margin.horizontal(),
        };
        let inner_width =
            (outer_width - style.padding.horizontal() - style.border_width.horizontal()).max(0.0);
        let chrome = style.padding.vertical() + style.border_width.vertical();

        match &node.kind {
            NodeKind::Text { content } if content.is_empty() => chrome,
            NodeKind::Text { content } => {
                let content = apply_transform(content, style.text_transform);
                let lines = self.text_layout.break_into_lines(
                    &self.font_context,
                    &content,
                    inner_width,
                    FontSpec::from_style(style),
                );
                let line_height = style.font_size * style.line_height;
                lines.len() as f64 * line_height + chrome
            }
            NodeKind::Image { .. } | NodeKind::Rule => chrome,
            NodeKind::View => self.measure_children_height(&node.children, inner_width, style) + chrome,
        }
    }

    fn measure_children_height(
        &self,
        children: &[Node],
        available_width: f64,
        parent_style: &ResolvedStyle,
    ) -> f64 {
        if children.is_empty() {
            return 0.0;
        }
        let row_gap = parent_style.row_gap;
        let column_gap = parent_style.column_gap;

        match parent_style.flex_direction {
            FlexDirection::Row => {
                let styles: Vec<ResolvedStyle> = children
                    .iter()
                    .map(|child| child.style.resolve(Some(parent_style), available_width))
                    .collect();

                // Explicit widths are fixed; auto widths start at max-content.
                let base_widths: Vec<f64> = children
                    .iter()
                    .zip(&styles)
                    .map(|(child, style)| match style.width {
                        Some(w) => w + style.margin.horizontal(),
                        None => self
                            .measure_intrinsic_width(child, style)
                            .min(available_width),
                    })
                    .collect();

                let lines = match parent_style.flex_wrap {
                    FlexWrap::NoWrap => vec![flex::WrapLine {
                        start: 0,
                        end: children.len(),
                    }],
                    FlexWrap::Wrap => {
                        flex::partition_into_lines(&base_widths, column_gap, available_width)
                    }
                };

                let mut final_widths = base_widths.clone();
                for line in &lines {
                    let range = line.start..line.end;
                    let line_gap = column_gap * (line.len() as f64 - 1.0).max(0.0);
                    let total_base: f64 = base_widths[range.clone()].iter().sum();
                    let remaining = available_width - line_gap - total_base;

                    if remaining > 0.0 {
                        let mut items: Vec<(f64, f64)> = range
                            .clone()
                            .map(|i| (base_widths[i], styles[i].flex_grow))
                            .collect();
                        flex::distribute_grow(&mut items, remaining);
                        for (j, (w, _)) in items.into_iter().enumerate() {
                            final_widths[line.start + j] = w;
                        }
                    } else if remaining < 0.0 {
                        let auto: Vec<usize> =
                            range.clone().filter(|&i| styles[i].width.is_none()).collect();
                        let mut items: Vec<(f64, f64)> = auto
                            .iter()
                            .map(|&i| {
                                let floor = self.measure_min_content_width(&children[i], &styles[i]);
                                (base_widths[i], floor.min(base_widths[i]))
                            })
                            .collect();
                        flex::distribute_shrink(&mut items, -remaining);
                        for (&i, (w, _)) in auto.iter().zip(items) {
                            final_widths[i] = w;
                        }
                    }
                }

                let mut total = 0.0;
                for (i, line) in lines.iter().enumerate() {
                    let line_height = (line.start..line.end)
                        .map(|j| {
                            // The flexed width replaces any declared width.
                            let fw = final_widths[j];
                            let mut child_style = styles[j].clone();
                            child_style.width = Some((fw - child_style.margin.horizontal()).max(0.0));
                            self.measure_node_height(&children[j], fw, &child_style)
                                + child_style.margin.vertical()
                        })
                        .fold(0.0f64, f64::max);
                    total += line_height;
                    if i > 0 {
                        total += row_gap;
                    }
                }
                total
            }
            FlexDirection::Column => {
                let mut total = 0.0;
                for (i, child) in children.iter().enumerate() {
                    let child_style = child.style.resolve(Some(parent_style), available_width);
                    total += self.measure_node_height(child, available_width, &child_style)
                        + child_style.margin.vertical();
                    if i > 0 {
                        total += row_gap;
                    }
                }
                total
            }
        }
    }

    /// Max-content width of a node, margins included.
    fn measure_intrinsic_width(&self, node: &Node, style: &ResolvedStyle) -> f64 {
        if let Some(w) = style.width {
            return w + style.margin.horizontal();
        }
        let chrome = style.padding.horizontal() + style.border_width.horizontal() + style.margin.horizontal();
        match &node.kind {
            NodeKind::Text { content } => {
                let content = apply_transform(content, style.text_transform);
                let text_width = content
                    .lines()
                    .map(|line| {
                        self.text_layout
                            .measure_width(&self.font_context, line, FontSpec::from_style(style))
                    })
                    .fold(0.0f64, f64::max);
                // Epsilon keeps a text sized to its own width from wrapping.
                text_width + 0.01 + chrome
            }
            NodeKind::Image { .. } | NodeKind::Rule => chrome,
            NodeKind::View => {
                let mut total = 0.0f64;
                for (i, child) in node.children.iter().enumerate() {
                    let child_style = child.style.resolve(Some(style), 0.0);
                    let child_width = self.measure_intrinsic_width(child, &child_style);
                    match style.flex_direction {
                        FlexDirection::Row => {
                            total += child_width;
                            if i > 0 {
                                total += style.column_gap;
                            }
                        }
                        FlexDirection::Column => total = total.max(child_width),
                    }
                }
                total + chrome
            }
        }
    }

    /// Min-content width: the narrowest a node can get without breaking a word.
    fn measure_min_content_width(&self, node: &Node, style: &ResolvedStyle) -> f64 {
        if let Some(w) = style.width {
            return w + style.margin.horizontal();
        }
        let chrome = style.padding.horizontal() + style.border_width.horizontal() + style.margin.horizontal();
        match &node.kind {
            NodeKind::Text { content } => {
                let content = apply_transform(content, style.text_transform);
                self.text_layout.measure_widest_word(
                    &self.font_context,
                    &content,
                    FontSpec::from_style(style),
                ) + chrome
            }
            NodeKind::Image { .. } | NodeKind::Rule => chrome,
            NodeKind::View => {
                let widths = node.children.iter().map(|child| {
                    let child_style = child.style.resolve(Some(style), 0.0);
                    self.measure_min_content_width(child, &child_style)
                });
                let inner = match (style.flex_direction, style.flex_wrap) {
                    (FlexDirection::Row, FlexWrap::NoWrap) => {
                        let gaps = style.column_gap * node.children.len().saturating_sub(1) as f64;
                        widths.sum::<f64>() + gaps
                    }
                    _ => widths.fold(0.0f64, f64::max),
                };
                inner + chrome
            }
        }
    }
}

impl MeasurementSurface for LayoutSurface {
    fn mount(&mut self, blocks: &[ContentBlock]) {
        self.mounted = blocks.iter().map(|b| b.content.clone()).collect();
        self.settled = None;
    }

    fn flush_layout(&mut self) {
        let heights = self.mounted.iter().map(|root| self.block_height(root)).collect();
        self.settled = Some(heights);
    }

    fn heights(&self) -> Result<Vec<f64>> {
        self.settled
            .clone()
            .ok_or(VitaeError::MeasurementNotReady {
                mounted: self.mounted.len(),
                read: 0,
            })
    }
}

// ── Preset surface ─────────────────────────────────────────────────

/// Replays heights measured by someone else.
///
/// Heights are either given in block order or keyed by block key. A keyed
/// surface reports only the heights it has keys for, so a missing key
/// surfaces as a count mismatch in [`measure`].
#[derive(Debug, Clone)]
pub struct PresetSurface {
    source: PresetHeights,
    mounted: Vec<String>,
    settled: bool,
}

#[derive(Debug, Clone)]
enum PresetHeights {
    Ordered(Vec<f64>),
    Keyed(BTreeMap<String, f64>),
}

impl PresetSurface {
    pub fn ordered(heights: Vec<f64>) -> Self {
        Self {
            source: PresetHeights::Ordered(heights),
            mounted: Vec::new(),
            settled: false,
        }
    }

    pub fn keyed(heights: BTreeMap<String, f64>) -> Self {
        Self {
            source: PresetHeights::Keyed(heights),
            mounted: Vec::new(),
            settled: false,
        }
    }
}

impl MeasurementSurface for PresetSurface {
    fn mount(&mut self, blocks: &[ContentBlock]) {
        self.mounted = blocks.iter().map(|b| b.key.clone()).collect();
        self.settled = false;
    }

    fn flush_layout(&mut self) {
        self.settled = true;
    }

    fn heights(&self) -> Result<Vec<f64>> {
        if !self.settled {
            return Err(VitaeError::MeasurementNotReady {
                mounted: self.mounted.len(),
                read: 0,
            });
        }
        Ok(match &self.source {
            PresetHeights::Ordered(heights) => heights.clone(),
            PresetHeights::Keyed(map) => self
                .mounted
                .iter()
                .filter_map(|key| {
                    let h = map.get(key).copied();
                    if h.is_none() {
                        log::warn!("No preset height for block '{key}'");
                    }
                    h
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::style::{Edges, Style, TextTransform};

    impl LayoutSurface {
        fn height_of(&self, node: Node) -> f64 {
            self.block_height(&node)
        }
    }

    fn text(s: &str) -> Node {
        Node::text(s, Style::default().text(10.0, 12.0))
    }

    fn block(key: &str, content: Node) -> ContentBlock {
        ContentBlock::new(key, BlockKind::Item, content)
    }

    #[test]
    fn single_line_text_is_one_line_height() {
        let surface = LayoutSurface::new(500.0);
        assert!((surface.height_of(text("Hello")) - 12.0).abs() < 0.001);
    }

    #[test]
    fn long_text_wraps_into_more_lines() {
        let surface = LayoutSurface::new(100.0);
        let long = "word ".repeat(60);
        let h = surface.height_of(text(&long));
        assert!(h > 24.0, "expected several lines, got {h}");
        assert!((h / 12.0).fract().abs() < 0.001);
    }

    #[test]
    fn margins_are_included_and_do_not_collapse() {
        let surface = LayoutSurface::new(500.0);
        let child = |mb| Node::text("x", Style::default().text(10.0, 12.0).margin(Edges::symmetric(mb, 0.0)));
        let col = Node::view(Style::default().mb(8.0), vec![child(4.0), child(4.0)]);
        // 2 × (12 + 8) + 8 outer bottom margin.
        assert!((surface.height_of(col) - 48.0).abs() < 0.001);
    }

    #[test]
    fn column_gap_is_added_between_children() {
        let surface = LayoutSurface::new(500.0);
        let col = Node::view(Style::default().gap(6.0), vec![text("a"), text("b"), text("c")]);
        assert!((surface.height_of(col) - 48.0).abs() < 0.001);
    }

    #[test]
    fn explicit_height_is_the_border_box() {
        let surface = LayoutSurface::new(500.0);
        let node = Node::view(
            Style::default().height(30.0).padding(Edges::uniform(10.0)),
            vec![text("ignored")],
        );
        assert_eq!(surface.height_of(node), 30.0);
        assert_eq!(surface.height_of(Node::rule(2.0, Style::default())), 2.0);
    }

    #[test]
    fn padding_and_border_add_to_text() {
        let surface = LayoutSurface::new(500.0);
        let node = Node::text(
            "x",
            Style::default()
                .text(10.0, 12.0)
                .padding(Edges::symmetric(4.0, 0.0))
                .border(Edges::bottom(1.0), crate::style::Color::BLACK),
        );
        assert!((surface.height_of(node) - 21.0).abs() < 0.001);
    }

    #[test]
    fn row_height_is_the_tallest_child() {
        let surface = LayoutSurface::new(500.0);
        let row = Node::view(
            Style::default().row(),
            vec![text("short"), Node::view(Style::default().height(40.0), vec![])],
        );
        assert_eq!(surface.height_of(row), 40.0);
    }

    #[test]
    fn wrapping_row_stacks_lines_with_row_gap() {
        let surface = LayoutSurface::new(100.0);
        let chip = || Node::view(Style::default().width(crate::style::Dimension::Px(60.0)).height(10.0), vec![]);
        let row = Node::view(Style::default().row().wrap().gaps(5.0, 8.0), vec![chip(), chip(), chip()]);
        // Each chip takes its own line: 3 × 10 + 2 × 5.
        assert_eq!(surface.height_of(row), 40.0);
    }

    #[test]
    fn squeezed_row_child_wraps_its_text() {
        let surface = LayoutSurface::new(200.0);
        let fixed = Node::view(Style::default().width(crate::style::Dimension::Px(150.0)), vec![]);
        let row = Node::view(Style::default().row(), vec![fixed, text("several words that need wrapping")]);
        assert!(surface.height_of(row) > 12.0);
    }

    #[test]
    fn uppercase_is_measured_transformed() {
        let surface = LayoutSurface::new(1000.0);
        let lower = Node::text("abc", Style::default().text(10.0, 12.0));
        let mut upper_style = Style::default().text(10.0, 12.0);
        upper_style.text_transform = Some(TextTransform::Uppercase);
        let upper = Node::text("abc", upper_style.clone());
        let root = |n: Node| Node::view(Style::default().row(), vec![n]);
        let lw = surface.measure_intrinsic_width(&lower, &lower.style.resolve(None, 0.0));
        let uw = surface.measure_intrinsic_width(&upper, &upper_style.resolve(None, 0.0));
        assert!(uw > lw);
        assert_eq!(surface.height_of(root(upper)), 12.0);
    }

    #[test]
    fn reading_before_flush_is_not_ready() {
        let mut surface = LayoutSurface::new(500.0);
        surface.mount(&[block("a", text("a"))]);
        assert!(matches!(
            surface.heights(),
            Err(VitaeError::MeasurementNotReady { mounted: 1, read: 0 })
        ));
        surface.flush_layout();
        assert_eq!(surface.heights().unwrap().len(), 1);
    }

    #[test]
    fn remount_invalidates_settled_heights() {
        let mut surface = LayoutSurface::new(500.0);
        surface.mount(&[block("a", text("a"))]);
        surface.flush_layout();
        surface.mount(&[block("a", text("a")), block("b", text("b"))]);
        assert!(surface.heights().is_err());
    }

    #[test]
    fn measure_pairs_blocks_with_heights() {
        let mut surface = LayoutSurface::new(500.0);
        let measured = measure(&mut surface, vec![block("a", text("a")), block("b", Node::spacer(30.0))]).unwrap();
        assert_eq!(measured[0].key(), "a");
        assert!((measured[0].height - 12.0).abs() < 0.001);
        assert_eq!(measured[1].height, 30.0);
    }

    #[test]
    fn measure_rejects_count_mismatch() {
        let mut surface = PresetSurface::ordered(vec![10.0]);
        let err = measure(&mut surface, vec![block("a", text("a")), block("b", text("b"))]).unwrap_err();
        assert!(matches!(err, VitaeError::MeasurementNotReady { mounted: 2, read: 1 }));
    }

    #[test]
    fn measure_rejects_all_zero_heights() {
        let mut surface = PresetSurface::ordered(vec![0.0, 0.0]);
        let err = measure(&mut surface, vec![block("a", text("a")), block("b", text("b"))]).unwrap_err();
        assert!(matches!(err, VitaeError::MeasurementNotReady { mounted: 2, read: 0 }));
    }

    #[test]
    fn measure_allows_a_single_zero_height() {
        let mut surface = PresetSurface::ordered(vec![0.0, 10.0]);
        let measured = measure(&mut surface, vec![block("a", text("a")), block("b", text("b"))]).unwrap();
        assert_eq!(measured[0].height, 0.0);
    }

    #[test]
    fn measure_rejects_invalid_heights() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let mut surface = PresetSurface::ordered(vec![10.0, bad]);
            let err = measure(&mut surface, vec![block("a", text("a")), block("b", text("b"))]).unwrap_err();
            assert!(matches!(err, VitaeError::InvalidHeight { ref key, .. } if key == "b"));
        }
    }

    #[test]
    fn keyed_preset_reports_missing_keys_as_mismatch() {
        let heights = BTreeMap::from([("a".to_string(), 10.0)]);
        let mut surface = PresetSurface::keyed(heights);
        let err = measure(&mut surface, vec![block("a", text("a")), block("b", text("b"))]).unwrap_err();
        assert!(matches!(err, VitaeError::MeasurementNotReady { mounted: 2, read: 1 }));
    }

    #[test]
    fn empty_sequence_measures_to_nothing() {
        let mut surface = LayoutSurface::new(500.0);
        assert!(measure(&mut surface, vec![]).unwrap().is_empty());
    }
}
