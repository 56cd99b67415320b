//! # Page Renderer
//!
//! Turns a [`Pagination`] into print-ready HTML: one fixed-size container
//! per page with a clipped content area and a reserved footer for the
//! `n/total` counter.
//!
//! The renderer never measures and never moves a block. Its box model
//! mirrors [`crate::measure::LayoutSurface`] exactly: every view is a
//! border-box flex container, blocks stack in a flex column so margins
//! never collapse, and declared widths do not shrink. The same CSS drives
//! the hidden measurement mirror, so a browser host can measure blocks
//! under the very rules the pages are painted with.

use quick_xml::escape::escape;

use crate::block::ContentBlock;
use crate::font::StandardFont;
use crate::markup::{Node, NodeKind};
use crate::model::PageGeometry;
use crate::pagination::{Page, Pagination};
use crate::style::{
    AlignItems, Dimension, Edges, FlexDirection, FlexWrap, FontStyle, JustifyContent, Style,
    TextAlign, TextTransform,
};
use crate::theme::ThemeId;

/// Id of the hidden measurement container.
pub const MEASURE_SURFACE_ID: &str = "vitae-measure";

const BASE_CSS: &str = "\
*{margin:0;padding:0}
.v-node{box-sizing:border-box;display:flex;flex-direction:column}
.v-text{box-sizing:border-box;display:block;white-space:pre-line;overflow-wrap:anywhere}
.v-block{display:flex;flex-direction:column;flex-shrink:0}
.v-content{display:flex;flex-direction:column;overflow:hidden}
";

pub struct HtmlRenderer {
    geometry: PageGeometry,
}

impl HtmlRenderer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// A standalone HTML document holding every page.
    pub fn render_document(&self, pagination: &Pagination, theme: ThemeId) -> String {
        let mut out = String::new();
        self.open_document(&mut out, theme);
        for page in pagination.pages() {
            self.render_page(page, &mut out);
        }
        out.push_str("</body>\n</html>\n");
        out
    }

    /// One page container. Appends to `out`.
    pub fn render_page(&self, page: &Page, out: &mut String) {
        let g = &self.geometry;
        let break_after = if page.is_last() { "auto" } else { "always" };
        out.push_str(&format!(
            "<section class=\"v-page\" data-page=\"{}\" style=\"width:{}px;height:{}px;padding:{}px;page-break-after:{break_after}\">\n",
            page.number(),
            px(g.width),
            px(g.height),
            px(g.padding),
        ));
        out.push_str(&format!(
            "<div class=\"v-content\" style=\"height:{}px\">\n",
            px(g.content_area_height())
        ));
        for block in &page.blocks {
            render_block(&block.block, out);
        }
        out.push_str("</div>\n");
        out.push_str(&format!(
            "<footer class=\"v-footer\" style=\"height:{}px\">",
            px(g.footer_height)
        ));
        if page.total > 1 {
            out.push_str(&format!("{}/{}", page.number(), page.total));
        }
        out.push_str("</footer>\n</section>\n");
    }

    /// The hidden mirror a browser host mounts to measure `blocks`.
    ///
    /// Each block sits in a `.v-block` wrapper tagged with `data-block-key`;
    /// the wrapper's `offsetHeight` is the block's margin-inclusive height.
    /// The mirror is invisible, off-screen and excluded from print.
    pub fn render_measurement_surface(&self, blocks: &[ContentBlock]) -> String {
        let g = &self.geometry;
        let mut out = format!(
            "<div id=\"{MEASURE_SURFACE_ID}\" aria-hidden=\"true\" style=\"position:fixed;left:-99999px;top:0;visibility:hidden;pointer-events:none;box-sizing:border-box;width:{}px;padding:0 {}px\">\n",
            px(g.width),
            px(g.padding),
        );
        out.push_str("<div class=\"v-content\">\n");
        for block in blocks {
            render_block(block, &mut out);
        }
        out.push_str("</div>\n</div>\n");
        out
    }

    /// A blank page skeleton shown until the first pass completes.
    pub fn render_placeholder(&self) -> String {
        let g = &self.geometry;
        let mut out = String::new();
        self.open_document(&mut out, ThemeId::default());
        out.push_str(&format!(
            "<section class=\"v-page v-placeholder\" style=\"width:{}px;height:{}px;padding:{}px\">\n",
            px(g.width),
            px(g.height),
            px(g.padding),
        ));
        for width in [60, 100, 90, 95, 70] {
            out.push_str(&format!(
                "<div class=\"v-skeleton\" style=\"width:{width}%;height:12px;margin-bottom:16px;background:#f1f5f9;border-radius:4px\"></div>\n"
            ));
        }
        out.push_str("</section>\n</body>\n</html>\n");
        out
    }

    fn open_document(&self, out: &mut String, theme: ThemeId) {
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Resume</title>\n<style>\n");
        out.push_str("@page{size:A4;margin:0}\n");
        out.push_str(BASE_CSS);
        out.push_str(&format!(
            ".v-page{{box-sizing:border-box;display:flex;flex-direction:column;overflow:hidden;background:#fff;margin:0 auto 24px;font-family:{}}}\n",
            font_stack("Helvetica")
        ));
        out.push_str(".v-footer{display:flex;align-items:center;justify-content:center;font-size:10px;color:#94a3b8}\n");
        out.push_str(&format!(
            "@media print{{.v-page{{margin:0}}#{MEASURE_SURFACE_ID}{{display:none}}}}\n"
        ));
        out.push_str("</style>\n</head>\n");
        out.push_str(&format!("<body class=\"v-theme-{theme}\">\n"));
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(PageGeometry::default())
    }
}

fn render_block(block: &ContentBlock, out: &mut String) {
    out.push_str(&format!(
        "<div class=\"v-block\" data-block-key=\"{}\">",
        escape(block.key.as_str())
    ));
    render_node(&block.content, out);
    out.push_str("</div>\n");
}

/// Serialize one markup node and its subtree.
pub fn render_node(node: &Node, out: &mut String) {
    let css = style_css(&node.style);
    match &node.kind {
        NodeKind::View => {
            out.push_str(&format!("<div class=\"v-node\" style=\"{css}\">"));
            for child in &node.children {
                render_node(child, out);
            }
            out.push_str("</div>");
        }
        NodeKind::Text { content } => {
            let text = escape(content.as_str());
            match &node.href {
                Some(href) => out.push_str(&format!(
                    "<a class=\"v-text\" href=\"{}\" style=\"text-decoration:none;{css}\">{text}</a>",
                    escape(href.as_str())
                )),
                None => out.push_str(&format!("<div class=\"v-text\" style=\"{css}\">{text}</div>")),
            }
        }
        NodeKind::Image { src, alt } => out.push_str(&format!(
            "<img class=\"v-node\" src=\"{}\" alt=\"{}\" style=\"object-fit:cover;{css}\">",
            escape(src.as_str()),
            escape(alt.as_str())
        )),
        NodeKind::Rule => {
            let fill = if node.style.background_color.is_some() {
                ""
            } else {
                "background-color:currentColor;"
            };
            out.push_str(&format!("<div class=\"v-node\" style=\"{fill}{css}\"></div>"));
        }
    }
}

/// Inline CSS for the properties a style actually sets.
pub fn style_css(style: &Style) -> String {
    let mut decls: Vec<String> = Vec::new();
    let mut push = |name: &str, value: String| decls.push(format!("{name}:{value}"));

    if let Some(width) = style.width {
        push(
            "width",
            match width {
                Dimension::Px(v) => format!("{}px", px(v)),
                Dimension::Percent(p) => format!("{}%", px(p)),
            },
        );
        push("flex-shrink", "0".into());
    }
    if let Some(h) = style.height {
        push("height", format!("{}px", px(h)));
        push("flex-shrink", "0".into());
    }
    if let Some(p) = style.padding {
        push("padding", edges(&p));
    }
    if let Some(m) = style.margin {
        push("margin", edges(&m));
    }

    if style.flex_direction == Some(FlexDirection::Row) {
        push("flex-direction", "row".into());
    }
    if let Some(j) = style.justify_content {
        push(
            "justify-content",
            match j {
                JustifyContent::FlexStart => "flex-start",
                JustifyContent::FlexEnd => "flex-end",
                JustifyContent::Center => "center",
                JustifyContent::SpaceBetween => "space-between",
            }
            .into(),
        );
    }
    if let Some(a) = style.align_items {
        push(
            "align-items",
            match a {
                AlignItems::FlexStart => "flex-start",
                AlignItems::FlexEnd => "flex-end",
                AlignItems::Center => "center",
                AlignItems::Stretch => "stretch",
                AlignItems::Baseline => "baseline",
            }
            .into(),
        );
    }
    if style.flex_wrap == Some(FlexWrap::Wrap) {
        push("flex-wrap", "wrap".into());
    }
    if let Some(g) = style.flex_grow {
        push("flex-grow", px(g));
    }
    if let Some(g) = style.row_gap.or(style.gap) {
        push("row-gap", format!("{}px", px(g)));
    }
    if let Some(g) = style.column_gap.or(style.gap) {
        push("column-gap", format!("{}px", px(g)));
    }

    if let Some(family) = &style.font_family {
        push("font-family", font_stack(family));
    }
    if let Some(size) = style.font_size {
        push("font-size", format!("{}px", px(size)));
    }
    if let Some(w) = style.font_weight {
        push("font-weight", w.to_string());
    }
    if style.font_style == Some(FontStyle::Italic) {
        push("font-style", "italic".into());
    }
    if let Some(lh) = style.line_height {
        push("line-height", px(lh));
    }
    if let Some(align) = style.text_align {
        push(
            "text-align",
            match align {
                TextAlign::Left => "left",
                TextAlign::Right => "right",
                TextAlign::Center => "center",
                TextAlign::Justify => "justify",
            }
            .into(),
        );
    }
    if let Some(ls) = style.letter_spacing {
        push("letter-spacing", format!("{}px", px(ls)));
    }
    if let Some(t) = style.text_transform {
        push(
            "text-transform",
            match t {
                TextTransform::None => "none",
                TextTransform::Uppercase => "uppercase",
            }
            .into(),
        );
    }

    if let Some(c) = style.color {
        push("color", c.to_css());
    }
    if let Some(c) = style.background_color {
        push("background-color", c.to_css());
    }
    if let Some(b) = style.border_width {
        push("border-style", "solid".into());
        push("border-width", edges(&b));
        if let Some(c) = style.border_color {
            push("border-color", c.to_css());
        }
    }
    if let Some(r) = style.border_radius {
        push("border-radius", format!("{}px", px(r)));
    }

    escape(decls.join(";").as_str()).into_owned()
}

fn edges(e: &Edges) -> String {
    format!(
        "{}px {}px {}px {}px",
        px(e.top),
        px(e.right),
        px(e.bottom),
        px(e.left)
    )
}

/// Format a length without trailing zeros.
fn px(v: f64) -> String {
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn font_stack(family: &str) -> String {
    match family {
        "Helvetica" => StandardFont::Helvetica.css_stack().to_string(),
        "Times" => StandardFont::TimesRoman.css_stack().to_string(),
        "Courier" => StandardFont::Courier.css_stack().to_string(),
        other => format!("'{other}', {}", StandardFont::Helvetica.css_stack()),
    }
}
