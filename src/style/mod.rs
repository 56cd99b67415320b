//! # Style System
//!
//! A CSS-like style model for block markup. This is intentionally a small
//! subset of CSS: the box model, flex rows and columns, typography, color
//! and borders. Every value is in CSS pixels.
//!
//! The same resolved style feeds both the measurement surface and the HTML
//! page renderer, which is what keeps measured heights honest.

use serde::{Deserialize, Serialize};

/// The complete set of style properties for a markup node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    // ── Box Model ──────────────────────────────────────────────
    /// Explicit width.
    pub width: Option<Dimension>,
    /// Explicit height (used by rules, spacers and portraits).
    pub height: Option<f64>,
    pub padding: Option<Edges>,
    pub margin: Option<Edges>,

    // ── Flex Layout ────────────────────────────────────────────
    pub flex_direction: Option<FlexDirection>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<AlignItems>,
    pub flex_wrap: Option<FlexWrap>,
    pub flex_grow: Option<f64>,
    /// Gap between children on both axes.
    pub gap: Option<f64>,
    pub row_gap: Option<f64>,
    pub column_gap: Option<f64>,

    // ── Typography ─────────────────────────────────────────────
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<u32>,
    pub font_style: Option<FontStyle>,
    /// Line height as a multiplier of font size.
    pub line_height: Option<f64>,
    pub text_align: Option<TextAlign>,
    pub letter_spacing: Option<f64>,
    pub text_transform: Option<TextTransform>,

    // ── Color & Border ─────────────────────────────────────────
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub border_width: Option<Edges>,
    pub border_color: Option<Color>,
    pub border_radius: Option<f64>,
}

/// A horizontal size: fixed pixels or a percentage of the parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Dimension {
    Px(f64),
    Percent(f64),
}

impl Dimension {
    pub fn resolve(&self, parent_size: f64) -> f64 {
        match self {
            Dimension::Px(v) => *v,
            Dimension::Percent(p) => parent_size * p / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    #[default]
    Stretch,
    Baseline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
}

/// Edge values (top, right, bottom, left) used for margin, padding and borders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn top(v: f64) -> Self {
        Self {
            top: v,
            ..Self::default()
        }
    }

    pub fn bottom(v: f64) -> Self {
        Self {
            bottom: v,
            ..Self::default()
        }
    }

    pub fn left(v: f64) -> Self {
        Self {
            left: v,
            ..Self::default()
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        let (r, g, b) = match hex.len() {
            3 => (
                channel(&hex[0..1].repeat(2)),
                channel(&hex[1..2].repeat(2)),
                channel(&hex[2..3].repeat(2)),
            ),
            6 => (channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// CSS representation: `#rrggbb`, or `rgba(...)` when translucent.
    pub fn to_css(&self) -> String {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                to_u8(self.r),
                to_u8(self.g),
                to_u8(self.b),
                self.a
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Resolved style: all values are concrete. This is what the measurement
/// surface and the renderer work with after inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: Edges,
    pub margin: Edges,

    pub flex_direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f64,
    pub row_gap: f64,
    pub column_gap: f64,

    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u32,
    pub font_style: FontStyle,
    pub line_height: f64,
    pub text_align: TextAlign,
    pub letter_spacing: f64,
    pub text_transform: TextTransform,

    pub color: Color,
    pub background_color: Option<Color>,
    pub border_width: Edges,
    pub border_color: Color,
    pub border_radius: f64,
}

/// Root defaults: 16px Helvetica at a 1.5 line height, like a browser body.
pub const ROOT_FONT_SIZE: f64 = 16.0;
pub const ROOT_LINE_HEIGHT: f64 = 1.5;
pub const ROOT_FONT_FAMILY: &str = "Helvetica";

impl Style {
    /// Resolve this style against a parent's resolved style.
    ///
    /// Typography and color inherit; the box model, flex and border
    /// properties do not.
    pub fn resolve(&self, parent: Option<&ResolvedStyle>, available_width: f64) -> ResolvedStyle {
        let inherited_family = parent
            .map(|p| p.font_family.clone())
            .unwrap_or_else(|| ROOT_FONT_FAMILY.to_string());

        ResolvedStyle {
            width: self.width.map(|d| d.resolve(available_width)),
            height: self.height,
            padding: self.padding.unwrap_or_default(),
            margin: self.margin.unwrap_or_default(),

            flex_direction: self.flex_direction.unwrap_or_default(),
            justify_content: self.justify_content.unwrap_or_default(),
            align_items: self.align_items.unwrap_or_default(),
            flex_wrap: self.flex_wrap.unwrap_or_default(),
            flex_grow: self.flex_grow.unwrap_or(0.0),
            row_gap: self.row_gap.or(self.gap).unwrap_or(0.0),
            column_gap: self.column_gap.or(self.gap).unwrap_or(0.0),

            font_family: self.font_family.clone().unwrap_or(inherited_family),
            font_size: self
                .font_size
                .unwrap_or(parent.map(|p| p.font_size).unwrap_or(ROOT_FONT_SIZE)),
            font_weight: self
                .font_weight
                .unwrap_or(parent.map(|p| p.font_weight).unwrap_or(400)),
            font_style: self
                .font_style
                .unwrap_or(parent.map(|p| p.font_style).unwrap_or_default()),
            line_height: self
                .line_height
                .unwrap_or(parent.map(|p| p.line_height).unwrap_or(ROOT_LINE_HEIGHT)),
            text_align: self
                .text_align
                .unwrap_or(parent.map(|p| p.text_align).unwrap_or_default()),
            letter_spacing: self
                .letter_spacing
                .unwrap_or(parent.map(|p| p.letter_spacing).unwrap_or(0.0)),
            text_transform: self
                .text_transform
                .unwrap_or(parent.map(|p| p.text_transform).unwrap_or_default()),

            color: self
                .color
                .unwrap_or(parent.map(|p| p.color).unwrap_or(Color::BLACK)),
            background_color: self.background_color,
            border_width: self.border_width.unwrap_or_default(),
            border_color: self.border_color.unwrap_or(Color::BLACK),
            border_radius: self.border_radius.unwrap_or(0.0),
        }
    }
}

/// Chainable setters, used by the theme renderers to keep markup terse.
impl Style {
    pub fn font_size(mut self, px: f64) -> Self {
        self.font_size = Some(px);
        self
    }

    /// Set font size together with an absolute line height in pixels.
    pub fn text(mut self, px: f64, line_px: f64) -> Self {
        self.font_size = Some(px);
        self.line_height = Some(line_px / px);
        self
    }

    pub fn leading(mut self, multiplier: f64) -> Self {
        self.line_height = Some(multiplier);
        self
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn bold(self) -> Self {
        self.weight(700)
    }

    pub fn italic(mut self) -> Self {
        self.font_style = Some(FontStyle::Italic);
        self
    }

    pub fn family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.text_transform = Some(TextTransform::Uppercase);
        self
    }

    pub fn tracking(mut self, px: f64) -> Self {
        self.letter_spacing = Some(px);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn margin(mut self, edges: Edges) -> Self {
        self.margin = Some(edges);
        self
    }

    pub fn mb(self, px: f64) -> Self {
        let mut edges = self.margin.unwrap_or_default();
        edges.bottom = px;
        self.margin(edges)
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = Some(edges);
        self
    }

    pub fn row(mut self) -> Self {
        self.flex_direction = Some(FlexDirection::Row);
        self
    }

    pub fn justify(mut self, justify: JustifyContent) -> Self {
        self.justify_content = Some(justify);
        self
    }

    pub fn items(mut self, align: AlignItems) -> Self {
        self.align_items = Some(align);
        self
    }

    pub fn wrap(mut self) -> Self {
        self.flex_wrap = Some(FlexWrap::Wrap);
        self
    }

    pub fn grow(mut self, factor: f64) -> Self {
        self.flex_grow = Some(factor);
        self
    }

    pub fn gap(mut self, px: f64) -> Self {
        self.gap = Some(px);
        self
    }

    pub fn gaps(mut self, row: f64, column: f64) -> Self {
        self.row_gap = Some(row);
        self.column_gap = Some(column);
        self
    }

    pub fn width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, px: f64) -> Self {
        self.height = Some(px);
        self
    }

    pub fn border(mut self, edges: Edges, color: Color) -> Self {
        self.border_width = Some(edges);
        self.border_color = Some(color);
        self
    }

    pub fn rounded(mut self, px: f64) -> Self {
        self.border_radius = Some(px);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typography_inherits_box_model_does_not() {
        let parent = Style {
            font_size: Some(12.0),
            margin: Some(Edges::uniform(8.0)),
            color: Some(Color::hex("#334155")),
            ..Default::default()
        }
        .resolve(None, 600.0);

        let child = Style::default().resolve(Some(&parent), 600.0);
        assert_eq!(child.font_size, 12.0);
        assert_eq!(child.color, Color::hex("#334155"));
        assert_eq!(child.margin, Edges::default());
    }

    #[test]
    fn gap_fills_both_axes_unless_overridden() {
        let s = Style {
            gap: Some(4.0),
            column_gap: Some(16.0),
            ..Default::default()
        }
        .resolve(None, 100.0);
        assert_eq!(s.row_gap, 4.0);
        assert_eq!(s.column_gap, 16.0);
    }

    #[test]
    fn percent_width_resolves_against_parent() {
        let s = Style {
            width: Some(Dimension::Percent(25.0)),
            ..Default::default()
        }
        .resolve(None, 400.0);
        assert_eq!(s.width, Some(100.0));
    }

    #[test]
    fn text_sets_line_height_as_multiplier() {
        let s = Style::default().text(12.0, 16.0).resolve(None, 100.0);
        assert_eq!(s.font_size, 12.0);
        assert!((s.font_size * s.line_height - 16.0).abs() < 1e-9);
    }

    #[test]
    fn hex_round_trips_to_css() {
        assert_eq!(Color::hex("#1d4ed8").to_css(), "#1d4ed8");
        assert_eq!(Color::hex("fff").to_css(), "#ffffff");
        assert_eq!(Color::hex("nonsense").to_css(), "#000000");
    }
}
