//! The name/contact header at the top of the first page, per theme.

use super::parts::{contacts, portrait, Contact};
use super::tw::{self, amber, blue, indigo, slate};
use super::ThemeId;
use crate::markup::Node;
use crate::model::ResumeDocument;
use crate::style::{AlignItems, Edges, JustifyContent, Style, TextAlign};

pub fn render(doc: &ResumeDocument, theme: ThemeId) -> Node {
    match theme {
        ThemeId::Classic => classic(doc),
        ThemeId::Executive => executive(doc),
        ThemeId::Modern => modern(doc),
        ThemeId::Sidebar => sidebar(doc),
        ThemeId::Professional => professional(doc),
        ThemeId::Elegant => elegant(doc),
        ThemeId::Creative => creative(doc),
    }
}

fn has(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Put the portrait (if any) beside `body`, or center `body` when there is none.
fn with_portrait(portrait: Option<Node>, body: Vec<Node>, gap: f64) -> Node {
    match portrait {
        Some(img) => Node::view(
            Style::default().row().items(AlignItems::FlexStart).gap(gap),
            vec![img, Node::view(Style::default().grow(1.0), body)],
        ),
        None => Node::view(
            Style::default()
                .items(AlignItems::Center)
                .align(TextAlign::Center),
            body,
        ),
    }
}

fn contact_nodes(items: &[Contact], style: Style) -> Vec<Node> {
    items.iter().map(|c| c.node(style.clone())).collect()
}

fn classic(doc: &ResumeDocument) -> Node {
    let img = portrait(doc, 96.0, true, Some((2.0, slate(300))));
    let centered = img.is_none();
    let mut body = vec![Node::text(
        doc.full_name.as_str(),
        tw::xl3()
            .family(tw::SERIF)
            .bold()
            .uppercase()
            .tracking(tw::wide(30.0))
            .color(slate(900))
            .mb(8.0),
    )];
    if has(&doc.title) {
        body.push(Node::text(
            doc.title.as_str(),
            tw::lg().weight(500).color(slate(700)).mb(8.0),
        ));
    }
    let line = Style::default().weight(500);
    let items: Vec<Node> = contacts(doc, false, false)
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 {
                c.node(line.clone())
            } else {
                Node::view(
                    Style::default().row().gap(4.0),
                    vec![Node::text("•", line.clone()), c.node(line.clone())],
                )
            }
        })
        .collect();
    let justify = if centered {
        JustifyContent::Center
    } else {
        JustifyContent::FlexStart
    };
    body.push(Node::view(
        tw::sm().color(slate(700)).row().wrap().justify(justify).gaps(4.0, 12.0),
        items,
    ));
    Node::view(
        Style::default()
            .padding(Edges::bottom(16.0))
            .border(Edges::bottom(2.0), slate(800))
            .mb(24.0),
        vec![with_portrait(img, body, 20.0)],
    )
}

fn executive(doc: &ResumeDocument) -> Node {
    let mut children = Vec::new();
    if let Some(img) = portrait(doc, 96.0, true, Some((2.0, slate(300)))) {
        children.push(Node::view(
            Style::default().row().justify(JustifyContent::Center).mb(12.0),
            vec![img],
        ));
    }
    children.push(Node::text(
        doc.full_name.as_str(),
        tw::xl2()
            .bold()
            .uppercase()
            .tracking(tw::widest(24.0))
            .color(slate(900))
            .mb(4.0),
    ));
    if has(&doc.title) {
        children.push(Node::text(doc.title.as_str(), tw::sm().color(slate(600)).mb(8.0)));
    }
    children.push(Node::text(doc.location.as_str(), tw::xs().color(slate(500)).mb(4.0)));
    let mut items = contacts(doc, false, false);
    items.retain(|c| c.text != doc.location);
    children.push(Node::view(
        tw::xs()
            .color(slate(600))
            .row()
            .wrap()
            .justify(JustifyContent::Center)
            .gap(24.0),
        contact_nodes(&items, Style::default()),
    ));
    Node::view(
        Style::default()
            .items(AlignItems::Center)
            .align(TextAlign::Center)
            .mb(24.0),
        children,
    )
}

fn modern(doc: &ResumeDocument) -> Node {
    let img = portrait(doc, 80.0, false, Some((1.0, slate(200))));
    let mut title_row = vec![Node::text(doc.full_name.as_str(), Style::default())];
    if has(&doc.title) {
        title_row.push(Node::text(
            format!(", {}", doc.title),
            Style::default().weight(400).color(slate(600)),
        ));
    }
    let items = contacts(doc, false, true);
    let last = items.len().saturating_sub(1);
    let contact_line: Vec<Node> = items
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let text = if i < last {
                format!("{},", c.text)
            } else {
                c.text.clone()
            };
            Contact {
                text,
                href: c.href.clone(),
            }
            .node(Style::default())
        })
        .collect();
    let body = vec![
        Node::view(
            tw::xl2().bold().color(slate(900)).row().wrap().mb(4.0),
            title_row,
        ),
        Node::view(
            tw::sm().color(slate(600)).row().wrap().gaps(0.0, 4.0),
            contact_line,
        ),
    ];
    Node::view(
        Style::default()
            .padding(Edges::bottom(16.0))
            .border(Edges::bottom(1.0), slate(300))
            .mb(24.0),
        vec![with_portrait(img, body, 16.0)],
    )
}

fn sidebar(doc: &ResumeDocument) -> Node {
    let mut children = Vec::new();
    if let Some(img) = portrait(doc, 112.0, true, Some((4.0, amber(100)))) {
        children.push(img);
    }
    let mut body = vec![Node::text(
        doc.full_name.as_str(),
        tw::xl3().bold().color(slate(900)).mb(4.0),
    )];
    if has(&doc.title) {
        body.push(Node::text(
            doc.title.as_str(),
            tw::lg().weight(500).color(amber(600)).mb(12.0),
        ));
    }
    body.push(Node::view(
        tw::sm().color(slate(600)).gap(4.0),
        contact_nodes(&contacts(doc, false, false), Style::default()),
    ));
    children.push(Node::view(Style::default().grow(1.0), body));
    Node::view(
        Style::default()
            .row()
            .items(AlignItems::FlexStart)
            .gap(24.0)
            .padding(Edges::bottom(16.0))
            .border(Edges::bottom(1.0), amber(200))
            .mb(24.0),
        children,
    )
}

fn professional(doc: &ResumeDocument) -> Node {
    let items = contacts(doc, true, true);
    let last = items.len().saturating_sub(1);
    let contact_line: Vec<Node> = items
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mut parts = vec![c.node(Style::default())];
            if i < last {
                parts.push(Node::text("|", Style::default().color(slate(300))));
            }
            Node::view(Style::default().row().items(AlignItems::Center).gap(4.0), parts)
        })
        .collect();
    let mut children = vec![Node::view(
        Style::default().grow(1.0),
        vec![
            Node::text(
                doc.full_name.as_str(),
                tw::xl4()
                    .bold()
                    .uppercase()
                    .tracking(tw::tight(36.0))
                    .color(blue(700))
                    .mb(8.0),
            ),
            Node::text(
                doc.title.as_str(),
                tw::xl()
                    .bold()
                    .uppercase()
                    .tracking(tw::wide(20.0))
                    .color(slate(800))
                    .mb(12.0),
            ),
            Node::view(
                tw::xs().weight(500).color(slate(600)).row().wrap().gaps(4.0, 16.0),
                contact_line,
            ),
        ],
    )];
    if let Some(img) = portrait(doc, 112.0, false, None) {
        children.push(Node::view(Style::default().margin(Edges::left(24.0)), vec![img]));
    }
    Node::view(
        Style::default()
            .row()
            .justify(JustifyContent::SpaceBetween)
            .items(AlignItems::FlexStart)
            .padding(Edges::bottom(24.0))
            .border(Edges::bottom(2.0), blue(700))
            .mb(24.0),
        children,
    )
}

fn elegant(doc: &ResumeDocument) -> Node {
    let mut children = Vec::new();
    if let Some(img) = portrait(doc, 96.0, false, Some((2.0, slate(200)))) {
        children.push(Node::view(
            Style::default().row().justify(JustifyContent::Center).mb(16.0),
            vec![img],
        ));
    }
    let mut heading = vec![Node::text(
        doc.full_name.as_str(),
        tw::xl3()
            .bold()
            .uppercase()
            .tracking(tw::widest(30.0))
            .color(slate(900))
            .mb(8.0),
    )];
    if has(&doc.title) {
        heading.push(Node::text(
            doc.title.as_str(),
            tw::sm().bold().color(slate(800)).mb(4.0),
        ));
    }
    if has(&doc.location) {
        heading.push(Node::text(
            doc.location.as_str(),
            tw::sm().color(slate(600)).mb(16.0),
        ));
    }
    children.push(Node::view(
        Style::default().align(TextAlign::Center).items(AlignItems::Center),
        heading,
    ));
    let mut items = contacts(doc, true, false);
    items.retain(|c| c.text != doc.location);
    children.push(Node::view(
        tw::sm()
            .bold()
            .color(slate(900))
            .row()
            .wrap()
            .justify(JustifyContent::Center)
            .gaps(8.0, 24.0)
            .padding(Edges {
                top: 8.0,
                bottom: 4.0,
                ..Edges::default()
            })
            .border(Edges::bottom(3.0), slate(400)),
        contact_nodes(&items, Style::default()),
    ));
    Node::view(Style::default().family(tw::SERIF).mb(32.0), children)
}

fn creative(doc: &ResumeDocument) -> Node {
    let mut children = Vec::new();
    if let Some(img) = portrait(doc, 128.0, true, Some((6.0, indigo(50)))) {
        children.push(img);
    }
    let icon = |glyph: &str, c: &Contact| {
        Node::view(
            Style::default().row().items(AlignItems::Center).gap(8.0),
            vec![Node::text(glyph, Style::default()), c.node(Style::default())],
        )
    };
    let lines: Vec<Node> = contacts(doc, true, true)
        .iter()
        .map(|c| {
            let glyph = match c.href.as_deref() {
                Some(h) if h.starts_with("mailto:") => "@",
                Some(h) if h.contains("linkedin") => "in",
                Some(h) if h.contains("github") => "gh",
                Some(_) => "www",
                None if c.text == doc.phone => "tel",
                None => "loc",
            };
            icon(glyph, c)
        })
        .collect();
    children.push(Node::view(
        Style::default(),
        vec![
            Node::text(
                doc.full_name.as_str(),
                tw::xl3()
                    .bold()
                    .tracking(tw::tight(30.0))
                    .color(slate(900))
                    .mb(4.0),
            ),
            Node::text(
                doc.title.as_str(),
                tw::xl().weight(500).color(indigo(600)).mb(16.0),
            ),
            Node::view(tw::sm().color(slate(500)).gap(4.0), lines),
        ],
    ));
    Node::view(
        Style::default()
            .row()
            .items(AlignItems::Center)
            .gap(32.0)
            .mb(40.0),
        children,
    )
}
