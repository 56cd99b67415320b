//! Markup fragments shared by every theme.

use super::tw;
use crate::labels::Labels;
use crate::markup::Node;
use crate::model::{display_url, href_for, ResumeDocument};
use crate::style::{AlignItems, Color, Dimension, Edges, JustifyContent, Style};

/// `start — end`, with the localized "Present" for ongoing entries.
/// Empty when neither end of the range is known.
pub fn date_range(start: &str, end: &str, current: bool, labels: &dyn Labels, sep: &str) -> String {
    let end = if current {
        labels.label("cv.present")
    } else {
        end.to_string()
    };
    match (start.trim().is_empty(), end.trim().is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end,
        (false, false) => format!("{start} {sep} {end}"),
    }
}

/// `a, b` skipping blank parts.
pub fn joined<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// A row with content pushed to both ends, baseline-aligned.
pub fn between(left: Node, right: Node, style: Style) -> Node {
    Node::view(
        style
            .row()
            .justify(JustifyContent::SpaceBetween)
            .items(AlignItems::Baseline)
            .gap(8.0),
        vec![left, right],
    )
}

/// How list entries are marked.
#[derive(Debug, Clone, Copy)]
pub enum Marker {
    /// A hanging disc in the left indent.
    Disc,
    /// An inline `• ` prefix.
    Inline,
    /// A small filled dot of the given color.
    Dot(Color),
}

/// A bulleted list. `indent` is the left offset, `gap` the space between entries.
pub fn bullets(items: &[String], text: Style, marker: Marker, indent: f64, gap: f64) -> Node {
    let rows = items
        .iter()
        .filter(|d| !d.trim().is_empty())
        .map(|desc| match marker {
            Marker::Disc => Node::view(
                Style::default().row(),
                vec![
                    Node::text("•", text.clone().width(Dimension::Px(indent))),
                    Node::text(desc.as_str(), text.clone().grow(1.0)),
                ],
            ),
            Marker::Inline => Node::text(format!("• {desc}"), text.clone().margin(Edges::left(indent))),
            Marker::Dot(color) => Node::view(
                Style::default()
                    .row()
                    .items(AlignItems::FlexStart)
                    .gap(8.0)
                    .margin(Edges::left(indent)),
                vec![
                    Node::view(tw::dot(4.0, color).margin(Edges::top(6.0)), vec![]),
                    Node::text(desc.as_str(), text.clone().grow(1.0)),
                ],
            ),
        })
        .collect();
    Node::view(Style::default().gap(gap), rows)
}

/// Lay `cells` out in `columns` equal columns.
pub fn grid(cells: Vec<Node>, columns: usize, column_gap: f64, row_gap: f64, style: Style) -> Node {
    let columns = columns.max(1);
    let mut rows = Vec::new();
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        let mut row: Vec<Node> = cells
            .by_ref()
            .take(columns)
            .map(|cell| Node::view(equal_column(), vec![cell]))
            .collect();
        while row.len() < columns {
            row.push(Node::view(equal_column(), vec![]));
        }
        rows.push(Node::view(Style::default().row().gap(column_gap), row));
    }
    Node::view(style.gap(row_gap), rows)
}

fn equal_column() -> Style {
    Style::default().width(Dimension::Px(0.0)).grow(1.0)
}

/// A dotted leader filling the space between two row items.
pub fn leader(color: Color) -> Node {
    Node::view(
        Style::default()
            .grow(1.0)
            .margin(Edges::symmetric(0.0, 8.0))
            .border(Edges::bottom(1.0), color),
        vec![],
    )
}

/// A contact entry: display text plus an optional href.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub text: String,
    pub href: Option<String>,
}

impl Contact {
    pub fn node(&self, style: Style) -> Node {
        match &self.href {
            Some(href) => Node::link(self.text.as_str(), href.as_str(), style),
            None => Node::text(self.text.as_str(), style),
        }
    }
}

/// Contact entries in display order. `with_github` adds the GitHub link,
/// which only the showcase themes print.
pub fn contacts(doc: &ResumeDocument, with_github: bool, email_link: bool) -> Vec<Contact> {
    let plain = |s: &str| Contact {
        text: s.to_string(),
        href: None,
    };
    let linked = |s: &str| Contact {
        text: display_url(s).to_string(),
        href: Some(href_for(s)),
    };

    let mut out = Vec::new();
    if !doc.location.trim().is_empty() {
        out.push(plain(&doc.location));
    }
    if !doc.phone.trim().is_empty() {
        out.push(plain(&doc.phone));
    }
    if !doc.email.trim().is_empty() {
        out.push(Contact {
            text: doc.email.clone(),
            href: email_link.then(|| format!("mailto:{}", doc.email)),
        });
    }
    if !doc.linkedin.trim().is_empty() {
        out.push(linked(&doc.linkedin));
    }
    if with_github && !doc.github.trim().is_empty() {
        out.push(linked(&doc.github));
    }
    if !doc.website.trim().is_empty() {
        out.push(linked(&doc.website));
    }
    out
}

/// A square portrait, optionally rounded to a circle.
pub fn portrait(doc: &ResumeDocument, size: f64, circle: bool, border: Option<(f64, Color)>) -> Option<Node> {
    let src = doc.profile_image.as_deref().filter(|s| !s.trim().is_empty())?;
    let mut style = Style::default();
    if circle {
        style = style.rounded(size / 2.0);
    }
    if let Some((width, color)) = border {
        style = style.border(Edges::uniform(width), color);
    }
    Some(Node::image(src, &doc.full_name, size, style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelMap;

    #[test]
    fn date_range_variants() {
        let labels = LabelMap::english();
        assert_eq!(date_range("2020", "2022", false, &labels, "—"), "2020 — 2022");
        assert_eq!(date_range("2020", "", true, &labels, "–"), "2020 – Present");
        assert_eq!(date_range("", "", false, &labels, "—"), "");
        assert_eq!(date_range("2019", "", false, &labels, "—"), "2019");
    }

    #[test]
    fn contacts_normalise_links() {
        let doc = ResumeDocument {
            email: "ada@example.com".into(),
            linkedin: "https://linkedin.com/in/ada".into(),
            github: "github.com/ada".into(),
            ..Default::default()
        };
        let c = contacts(&doc, true, true);
        assert_eq!(c[0].href.as_deref(), Some("mailto:ada@example.com"));
        assert_eq!(c[1].text, "linkedin.com/in/ada");
        assert_eq!(c[2].href.as_deref(), Some("https://github.com/ada"));
        assert_eq!(contacts(&doc, false, false).len(), 2);
    }

    #[test]
    fn grid_pads_the_last_row() {
        let cells = (0..3).map(|i| Node::text(i.to_string(), Style::default())).collect();
        let g = grid(cells, 2, 24.0, 4.0, Style::default());
        assert_eq!(g.children.len(), 2);
        assert_eq!(g.children[1].children.len(), 2);
    }

    #[test]
    fn blank_bullets_are_dropped() {
        let items = vec!["Shipped".to_string(), "  ".to_string()];
        let list = bullets(&items, tw::xs(), Marker::Inline, 16.0, 2.0);
        assert_eq!(list.children.len(), 1);
    }
}
