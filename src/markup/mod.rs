//! # Block Markup
//!
//! The renderable payload carried by every content block. Themes build a
//! small tree of containers (View), text (Text), portraits (Image) and
//! horizontal rules (Rule). The pagination engine never looks inside it;
//! only the measurement surface and the page renderer do.

use crate::style::Style;
use serde::{Deserialize, Serialize};

/// A node in the block markup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub kind: NodeKind,

    #[serde(default)]
    pub style: Style,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Optional hyperlink target. Only text nodes render it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    /// A generic container, analogous to a `<div>`.
    View,
    /// A run of text that wraps at the available width.
    Text { content: String },
    /// A fixed-size image. Height comes from the style.
    Image { src: String, alt: String },
    /// A filled horizontal bar spanning the available width.
    Rule,
}

impl Node {
    /// Create a View node with children.
    pub fn view(style: Style, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::View,
            style,
            children,
            href: None,
        }
    }

    /// Create a Text node.
    pub fn text(content: impl Into<String>, style: Style) -> Self {
        Self {
            kind: NodeKind::Text {
                content: content.into(),
            },
            style,
            children: vec![],
            href: None,
        }
    }

    /// Create a Text node that links to `href`.
    pub fn link(content: impl Into<String>, href: impl Into<String>, style: Style) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::text(content, style)
        }
    }

    /// Create a square image of `size` pixels.
    pub fn image(src: &str, alt: &str, size: f64, style: Style) -> Self {
        Self {
            kind: NodeKind::Image {
                src: src.to_string(),
                alt: alt.to_string(),
            },
            style: style
                .width(crate::style::Dimension::Px(size))
                .height(size),
            children: vec![],
            href: None,
        }
    }

    /// Create a horizontal rule of the given thickness.
    pub fn rule(thickness: f64, style: Style) -> Self {
        Self {
            kind: NodeKind::Rule,
            style: style.height(thickness),
            children: vec![],
            href: None,
        }
    }

    /// Create an empty vertical spacer.
    pub fn spacer(height: f64) -> Self {
        Self::view(Style::default().height(height), vec![])
    }

    /// Concatenated text content of this subtree, for debugging and tests.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text { content } = &self.kind {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(content);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_walks_the_tree_in_order() {
        let node = Node::view(
            Style::default(),
            vec![
                Node::text("Senior Developer", Style::default()),
                Node::view(
                    Style::default().row(),
                    vec![Node::link("example.com", "https://example.com", Style::default())],
                ),
            ],
        );
        assert_eq!(node.plain_text(), "Senior Developer example.com");
    }

    #[test]
    fn rule_and_image_carry_fixed_heights() {
        assert_eq!(Node::rule(2.0, Style::default()).style.height, Some(2.0));
        let img = Node::image("data:,", "Ada", 96.0, Style::default());
        assert_eq!(img.style.height, Some(96.0));
    }
}
