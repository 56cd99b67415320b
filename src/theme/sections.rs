//! The section walker: turns `sectionOrder` into header, spacer and item
//! blocks. Every theme produces the same key sequence; only the markup
//! inside each block differs.

use super::parts::{between, bullets, date_range, grid, joined, leader, Marker};
use super::tw::{self, amber, blue, indigo, orange, slate};
use super::{ThemeFamily, ThemeId};
use std::collections::HashSet;

use crate::block::{BlockKind, ContentBlock};
use crate::labels::{skill_level_label, Labels};
use crate::markup::Node;
use crate::model::{
    href_for, CertificationItem, CustomSection, ResumeDocument, SectionKey, SkillCategory,
};
use crate::style::{AlignItems, Color, Dimension, Edges, JustifyContent, Style, TextAlign};

pub(super) fn render(
    doc: &ResumeDocument,
    theme: ThemeId,
    labels: &dyn Labels,
    out: &mut Vec<ContentBlock>,
) {
    let used = out.iter().map(|b| b.key.clone()).collect();
    let mut walker = Sections {
        doc,
        theme,
        labels,
        out,
        used,
    };
    for key in &doc.section_order {
        walker.section(key);
    }
}

struct Sections<'a> {
    doc: &'a ResumeDocument,
    theme: ThemeId,
    labels: &'a dyn Labels,
    out: &'a mut Vec<ContentBlock>,
    /// Keys handed out so far. Item ids are free text and may be blank or
    /// repeated; block keys may not.
    used: HashSet<String>,
}

/// A titled entry shared by certifications and awards.
struct Credential<'a> {
    name: &'a str,
    issuer: &'a str,
    date: &'a str,
}

impl<'a> From<&'a CertificationItem> for Credential<'a> {
    fn from(c: &'a CertificationItem) -> Self {
        Credential {
            name: &c.name,
            issuer: &c.issuer,
            date: &c.date,
        }
    }
}

fn h3(text: impl Into<String>) -> Node {
    Node::text(text, tw::sm().bold().color(slate(900)))
}

fn xs(text: impl Into<String>, color: Color) -> Node {
    Node::text(text, tw::xs().color(color))
}

fn diamond() -> Node {
    Node::text("◆", tw::xs().color(amber(600)))
}

fn ornament() -> Node {
    Node::text("❖", tw::px(10.0).color(slate(900)))
}

fn url_link(url: &str, color: Color, style: Style) -> Node {
    Node::link(url, href_for(url), style.color(color))
}

impl Sections<'_> {
    fn push(&mut self, key: String, kind: BlockKind, content: Node) {
        let key = self.unique_key(key);
        log::trace!("block {key} ({kind:?})");
        self.used.insert(key.clone());
        self.out.push(ContentBlock::new(key, kind, content));
    }

    /// `key`, or `key` suffixed with the block's position when the item id
    /// behind it was blank or the key is taken.
    fn unique_key(&self, key: String) -> String {
        let blank = key.trim_end().ends_with('-');
        if !blank && !self.used.contains(&key) {
            return key;
        }
        let stem = key.trim_end().trim_end_matches('-');
        let mut n = self.out.len();
        loop {
            let candidate = format!("{stem}-{n}");
            if !self.used.contains(&candidate) {
                log::debug!("Block key '{key}' is blank or taken; using '{candidate}'");
                return candidate;
            }
            n += 1;
        }
    }

    fn section(&mut self, key: &str) {
        let parsed = SectionKey::parse(key);
        match parsed {
            SectionKey::Unknown(k) => {
                log::warn!("Ignoring unknown section key '{k}'");
                return;
            }
            SectionKey::Custom(id) if self.doc.custom_section(id).is_none() => {
                log::warn!("Section order references '{id}' but no custom section has that id");
                return;
            }
            _ => {}
        }
        if !self.doc.has_content(parsed) {
            log::debug!("Skipping empty section '{key}'");
            return;
        }

        let doc = self.doc;
        match parsed {
            SectionKey::Summary => self.summary(),
            SectionKey::Experience => self.experience(),
            SectionKey::Education => self.education(),
            SectionKey::Skills => self.skills(),
            SectionKey::Projects => self.projects(),
            SectionKey::Certifications => {
                self.header("cert", self.labels.label("cv.certifications"));
                for (i, cert) in doc.certifications.iter().enumerate() {
                    let last = i + 1 == doc.certifications.len();
                    let node = self.credential(cert.into(), last, indigo(100));
                    self.push(format!("cert-{}", cert.id), BlockKind::Item, node);
                }
            }
            SectionKey::Awards => {
                self.header("awards", self.labels.label("cv.awards"));
                for (i, award) in doc.awards.iter().enumerate() {
                    let last = i + 1 == doc.awards.len();
                    let credential = Credential {
                        name: &award.title,
                        issuer: &award.issuer,
                        date: &award.date,
                    };
                    let node = self.credential(credential, last, orange(100));
                    self.push(format!("award-{}", award.id), BlockKind::Item, node);
                }
            }
            SectionKey::Languages => self.languages(),
            SectionKey::Volunteering => self.volunteering(),
            SectionKey::Interests => self.interests(),
            SectionKey::References => self.references(),
            SectionKey::Custom(id) => {
                if let Some(section) = doc.custom_section(id) {
                    self.custom(section);
                }
            }
            SectionKey::Unknown(_) => {}
        }
    }

    // ── Section headers ────────────────────────────────────────────

    /// Push `<prefix>-header` and its bound `<prefix>-spacer`.
    fn header(&mut self, prefix: &str, title: String) {
        let title = if self.theme == ThemeId::Elegant {
            title.to_uppercase()
        } else {
            title
        };
        let (node, gap) = self.header_markup(title);
        self.push(format!("{prefix}-header"), BlockKind::SectionHeader, node);
        self.push(format!("{prefix}-spacer"), BlockKind::Spacer, Node::spacer(gap));
    }

    /// Title markup and the gap that separates it from the section content.
    fn header_markup(&self, title: String) -> (Node, f64) {
        match self.theme {
            ThemeId::Executive => {
                let line = || {
                    Node::view(
                        Style::default()
                            .grow(1.0)
                            .border(Edges::top(1.0), slate(300)),
                        vec![],
                    )
                };
                let label = Node::text(
                    title,
                    tw::sm()
                        .bold()
                        .uppercase()
                        .tracking(tw::widest(14.0))
                        .color(slate(700))
                        .padding(Edges::symmetric(0.0, 16.0)),
                );
                let node = Node::view(
                    Style::default().row().items(AlignItems::Center),
                    vec![line(), label, line()],
                );
                (node, 12.0)
            }
            ThemeId::Modern => (
                Node::text(
                    title,
                    tw::px(11.0)
                        .bold()
                        .uppercase()
                        .tracking(tw::widest(11.0))
                        .color(slate(500))
                        .padding(Edges::bottom(4.0))
                        .border(Edges::bottom(1.0), slate(200)),
                ),
                12.0,
            ),
            ThemeId::Sidebar => (
                Node::text(
                    title,
                    tw::base()
                        .bold()
                        .color(amber(600))
                        .padding(Edges::bottom(4.0))
                        .border(Edges::bottom(1.0), amber(100)),
                ),
                12.0,
            ),
            ThemeId::Professional => (
                Node::view(
                    Style::default(),
                    vec![
                        Node::text(
                            title,
                            tw::sm()
                                .bold()
                                .uppercase()
                                .tracking(tw::widest(14.0))
                                .color(blue(700))
                                .mb(4.0),
                        ),
                        Node::rule(2.0, Style::default().background(blue(700))),
                    ],
                ),
                16.0,
            ),
            ThemeId::Elegant => (
                Node::text(
                    title,
                    tw::sm()
                        .family(tw::SERIF)
                        .bold()
                        .uppercase()
                        .tracking(1.4)
                        .align(TextAlign::Center)
                        .color(slate(900))
                        .background(slate(100))
                        .padding(Edges::symmetric(6.0, 0.0))
                        .border(Edges::symmetric(1.0, 0.0), slate(200))
                        .margin(Edges::top(24.0)),
                ),
                24.0,
            ),
            ThemeId::Creative => (
                Node::view(
                    Style::default().row().items(AlignItems::Center).gap(16.0),
                    vec![
                        Node::view(tw::dot(8.0, indigo(500)), vec![]),
                        Node::text(title, tw::lg().bold().color(slate(900))),
                    ],
                ),
                24.0,
            ),
            ThemeId::Classic => (
                Node::text(
                    title,
                    tw::sm()
                        .bold()
                        .uppercase()
                        .tracking(tw::widest(14.0))
                        .color(slate(800))
                        .padding(Edges::bottom(4.0))
                        .border(Edges::bottom(1.0), slate(300)),
                ),
                12.0,
            ),
        }
    }

    /// Item root style; elegant sets everything in the serif face.
    fn item(&self, mb: f64) -> Style {
        let style = Style::default().mb(mb);
        if self.theme == ThemeId::Elegant {
            style.family(tw::SERIF)
        } else {
            style
        }
    }

    fn timeline(&self, mb: f64, color: Color) -> Style {
        self.item(mb)
            .padding(Edges::left(24.0))
            .border(Edges::left(2.0), color)
    }

    fn present(&self, start: &str, end: &str, current: bool) -> String {
        let sep = if self.theme == ThemeId::Classic {
            "–"
        } else {
            "—"
        };
        date_range(start, end, current, self.labels, sep)
    }

    // ── Sections ───────────────────────────────────────────────────

    fn summary(&mut self) {
        let title = match self.theme {
            ThemeId::Executive | ThemeId::Elegant => "cv.profile",
            _ => "cv.summary",
        };
        self.header("summary", self.labels.label(title));
        let relaxed = tw::sm().leading(tw::LEADING_RELAXED);
        let style = match self.theme {
            ThemeId::Executive => relaxed
                .color(slate(700))
                .align(TextAlign::Center)
                .italic()
                .mb(16.0),
            ThemeId::Sidebar => relaxed.color(slate(700)).mb(16.0),
            ThemeId::Elegant => relaxed
                .family(tw::SERIF)
                .color(slate(800))
                .align(TextAlign::Center)
                .padding(Edges::symmetric(0.0, 24.0))
                .mb(24.0),
            ThemeId::Professional => relaxed
                .weight(500)
                .color(slate(700))
                .align(TextAlign::Justify)
                .mb(24.0),
            ThemeId::Creative => relaxed.color(slate(700)).mb(24.0),
            ThemeId::Classic | ThemeId::Modern => relaxed
                .color(slate(800))
                .align(TextAlign::Justify)
                .mb(16.0),
        };
        let node = Node::text(self.doc.summary.as_str(), style);
        self.push("summary-body".into(), BlockKind::Item, node);
    }

    fn experience(&mut self) {
        let title = match self.theme {
            ThemeId::Executive | ThemeId::Elegant => "cv.employmentHistory",
            _ => "cv.experience",
        };
        self.header("exp", self.labels.label(title));

        let doc = self.doc;
        for exp in &doc.experience {
            let dates = self.present(&exp.start_date, &exp.end_date, exp.current);
            let role = joined(&[&exp.title, &exp.company], ", ");
            let snug = |color| tw::xs().color(color).leading(tw::LEADING_SNUG);
            let node = match self.theme {
                ThemeId::Modern => Node::view(
                    self.item(16.0).row().gap(12.0),
                    vec![
                        Node::text(
                            dates,
                            tw::xs()
                                .color(slate(500))
                                .width(Dimension::Px(100.0))
                                .padding(Edges::top(2.0)),
                        ),
                        Node::view(
                            Style::default().grow(1.0),
                            vec![
                                between(h3(role), xs(exp.location.as_str(), slate(500)), Style::default().mb(4.0)),
                                bullets(&exp.description, snug(slate(700)), Marker::Disc, 16.0, 2.0),
                            ],
                        ),
                    ],
                ),
                ThemeId::Executive => Node::view(
                    self.item(16.0),
                    vec![
                        between(
                            Node::view(
                                Style::default().row().items(AlignItems::Center).gap(8.0),
                                vec![diamond(), h3(role)],
                            ),
                            xs(dates, slate(600)),
                            Style::default().mb(4.0),
                        ),
                        Node::text(
                            exp.location.as_str(),
                            tw::xs().color(slate(500)).margin(Edges::left(16.0)).mb(4.0),
                        ),
                        bullets(&exp.description, snug(slate(700)), Marker::Inline, 16.0, 2.0),
                    ],
                ),
                ThemeId::Sidebar => Node::view(
                    self.item(16.0),
                    vec![
                        h3(role),
                        Node::view(
                            tw::xs().color(slate(500)).row().wrap().items(AlignItems::Center).gap(8.0).mb(4.0),
                            vec![
                                Node::text(dates, Style::default()),
                                Node::text("•", Style::default()),
                                Node::text(exp.location.as_str(), Style::default()),
                            ],
                        ),
                        bullets(&exp.description, snug(slate(700)), Marker::Disc, 16.0, 2.0),
                    ],
                ),
                ThemeId::Professional => {
                    let mut right = vec![Node::text(dates, tw::xs().bold().color(slate(900)))];
                    if !exp.location.trim().is_empty() {
                        right.push(xs(exp.location.as_str(), slate(500)));
                    }
                    Node::view(
                        self.item(16.0),
                        vec![
                            between(
                                h3(role),
                                Node::view(Style::default().align(TextAlign::Right), right),
                                Style::default().mb(4.0),
                            ),
                            bullets(&exp.description, snug(slate(600)), Marker::Disc, 20.0, 4.0),
                        ],
                    )
                }
                ThemeId::Elegant => Node::view(
                    self.item(24.0),
                    vec![
                        Node::view(
                            Style::default().row().items(AlignItems::FlexEnd).mb(2.0),
                            vec![
                                ornament(),
                                Node::text(role, tw::sm().bold().color(slate(900)).margin(Edges::left(8.0))),
                                leader(slate(400)),
                                xs(dates, slate(900)),
                            ],
                        ),
                        Node::view(
                            Style::default().row().justify(JustifyContent::FlexEnd).mb(8.0),
                            vec![Node::text(exp.location.as_str(), tw::px(10.0).color(slate(600)))],
                        ),
                        bullets(
                            &exp.description,
                            tw::xs().color(slate(700)).leading(tw::LEADING_RELAXED),
                            Marker::Dot(slate(800)),
                            16.0,
                            4.0,
                        ),
                    ],
                ),
                ThemeId::Creative => Node::view(
                    self.timeline(24.0, indigo(100)),
                    vec![
                        Node::text(
                            dates,
                            tw::xs()
                                .bold()
                                .uppercase()
                                .tracking(tw::wide(12.0))
                                .color(indigo(500))
                                .mb(4.0),
                        ),
                        Node::text(exp.title.as_str(), tw::sm().bold().color(slate(900)).mb(2.0)),
                        Node::text(
                            joined(&[&exp.company, &exp.location], " • "),
                            tw::xs().weight(500).color(slate(500)).mb(8.0),
                        ),
                        bullets(
                            &exp.description,
                            tw::xs().color(slate(600)).leading(tw::LEADING_RELAXED),
                            Marker::Dot(indigo(400)),
                            0.0,
                            6.0,
                        ),
                    ],
                ),
                ThemeId::Classic => Node::view(
                    self.item(16.0),
                    vec![
                        between(
                            h3(exp.title.as_str()),
                            Node::text(dates, tw::xs().weight(500).color(slate(700))),
                            Style::default().mb(2.0),
                        ),
                        between(
                            Node::text(exp.company.as_str(), tw::sm().color(slate(800))),
                            xs(exp.location.as_str(), slate(600)),
                            Style::default().mb(4.0),
                        ),
                        bullets(&exp.description, snug(slate(800)), Marker::Disc, 16.0, 2.0),
                    ],
                ),
            };
            self.push(format!("exp-{}", exp.id), BlockKind::Item, node);
        }
    }

    fn education(&mut self) {
        self.header("edu", self.labels.label("cv.education"));

        let doc = self.doc;
        for edu in &doc.education {
            let dates = self.present(&edu.start_date, &edu.end_date, edu.current);
            let node = match self.theme {
                ThemeId::Modern => Node::view(
                    self.item(12.0).row().gap(12.0),
                    vec![
                        Node::text(
                            dates,
                            tw::xs()
                                .color(slate(500))
                                .width(Dimension::Px(100.0))
                                .padding(Edges::top(2.0)),
                        ),
                        Node::view(
                            Style::default().grow(1.0),
                            vec![
                                h3(joined(&[&edu.degree, &edu.institution], ", ")),
                                xs(edu.location.as_str(), slate(500)),
                            ],
                        ),
                    ],
                ),
                ThemeId::Executive => between(
                    Node::view(
                        Style::default().row().items(AlignItems::FlexStart).gap(8.0),
                        vec![
                            diamond(),
                            Node::view(
                                Style::default(),
                                vec![
                                    h3(edu.institution.as_str()),
                                    Node::text(edu.degree.as_str(), tw::xs().italic().color(slate(600))),
                                ],
                            ),
                        ],
                    ),
                    Node::view(
                        tw::xs().align(TextAlign::Right),
                        vec![xs(dates, slate(600)), xs(edu.location.as_str(), slate(500))],
                    ),
                    self.item(12.0).items(AlignItems::FlexStart),
                ),
                ThemeId::Sidebar => Node::view(
                    self.item(12.0),
                    vec![
                        h3(joined(&[&edu.degree, &edu.institution], ", ")),
                        xs(joined(&[&dates, &edu.location], " • "), slate(500)),
                    ],
                ),
                ThemeId::Professional => {
                    let mut right = vec![Node::text(dates, tw::xs().bold().color(slate(900)))];
                    if !edu.location.trim().is_empty() {
                        right.push(xs(edu.location.as_str(), slate(500)));
                    }
                    between(
                        Node::view(
                            Style::default(),
                            vec![
                                h3(edu.degree.as_str()),
                                Node::text(edu.institution.as_str(), tw::xs().weight(500).color(slate(600))),
                            ],
                        ),
                        Node::view(Style::default().align(TextAlign::Right), right),
                        self.item(12.0).items(AlignItems::FlexStart),
                    )
                }
                ThemeId::Elegant => Node::view(
                    self.item(16.0),
                    vec![
                        Node::view(
                            Style::default().row().items(AlignItems::FlexEnd).mb(4.0),
                            vec![
                                ornament(),
                                Node::text(
                                    edu.institution.as_str(),
                                    tw::sm().bold().color(slate(900)).margin(Edges::left(8.0)),
                                ),
                                leader(slate(400)),
                                xs(dates, slate(900)),
                            ],
                        ),
                        between(
                            Node::text(edu.degree.as_str(), tw::xs().italic().color(slate(700))),
                            Node::text(edu.location.as_str(), tw::px(10.0).color(slate(600))),
                            Style::default().margin(Edges::left(20.0)),
                        ),
                    ],
                ),
                ThemeId::Creative => {
                    let mut children = vec![
                        h3(edu.degree.as_str()),
                        xs(edu.institution.as_str(), slate(500)),
                    ];
                    if !edu.location.trim().is_empty() {
                        children.push(xs(edu.location.as_str(), slate(400)));
                    }
                    children.push(Node::text(
                        dates,
                        tw::px(10.0)
                            .weight(500)
                            .uppercase()
                            .color(indigo(500))
                            .margin(Edges::top(4.0)),
                    ));
                    Node::view(self.timeline(16.0, indigo(100)), children)
                }
                ThemeId::Classic => Node::view(
                    self.item(12.0),
                    vec![
                        between(h3(edu.institution.as_str()), xs(dates, slate(700)), Style::default()),
                        between(
                            xs(edu.degree.as_str(), slate(800)),
                            xs(edu.location.as_str(), slate(600)),
                            Style::default(),
                        ),
                    ],
                ),
            };
            self.push(format!("edu-{}", edu.id), BlockKind::Item, node);
        }
    }

    fn skills(&mut self) {
        let title = match self.theme.family() {
            ThemeFamily::Classic if self.theme != ThemeId::Executive => "cv.technicalProficiencies",
            _ => "cv.skills",
        };
        self.header("skills", self.labels.label(title));

        let groups = &self.doc.skills;
        let node = match self.theme {
            ThemeId::Modern | ThemeId::Executive => {
                let cells = flat_skills(groups)
                    .map(|(name, level, show)| {
                        let mut row = vec![xs(name, slate(800))];
                        if show {
                            row.push(Node::text(
                                skill_level_label(self.labels, level),
                                tw::px(10.0).color(slate(500)),
                            ));
                        }
                        Node::view(
                            tw::xs()
                                .row()
                                .justify(JustifyContent::SpaceBetween)
                                .padding(Edges::bottom(2.0))
                                .border(Edges::bottom(1.0), slate(200)),
                            row,
                        )
                    })
                    .collect();
                grid(cells, 2, 24.0, 4.0, Style::default().mb(16.0))
            }
            ThemeId::Sidebar => Node::view(
                Style::default().gap(16.0).mb(16.0),
                groups
                    .iter()
                    .map(|group| {
                        let items = group
                            .items
                            .iter()
                            .map(|skill| {
                                let mut parts = vec![Node::text(
                                    skill.name.as_str(),
                                    tw::xs().weight(500).color(slate(700)),
                                )];
                                if group.show_level {
                                    parts.push(level_bar(skill.level, 16.0, 2.0, amber(400)));
                                }
                                Node::view(Style::default(), parts)
                            })
                            .collect();
                        Node::view(
                            Style::default(),
                            vec![
                                Node::text(
                                    group.name.as_str(),
                                    tw::xs()
                                        .bold()
                                        .uppercase()
                                        .tracking(tw::wide(12.0))
                                        .color(amber(600))
                                        .mb(6.0),
                                ),
                                Node::view(
                                    Style::default()
                                        .gap(6.0)
                                        .padding(Edges::left(12.0))
                                        .border(Edges::left(2.0), amber(100)),
                                    items,
                                ),
                            ],
                        )
                    })
                    .collect(),
            ),
            ThemeId::Professional => {
                let cells = flat_skills(groups)
                    .map(|(name, level, show)| {
                        let mut head = vec![Node::text(name, Style::default().bold().color(slate(900)))];
                        if show {
                            head.push(Node::text(
                                format!("{level}/5"),
                                tw::px(10.0).color(slate(500)),
                            ));
                        }
                        let meter = if show {
                            Node::view(
                                Style::default().height(6.0).background(slate(100)).rounded(3.0),
                                vec![Node::view(
                                    Style::default()
                                        .width(Dimension::Percent(f64::from(level) * 20.0))
                                        .height(6.0)
                                        .background(blue(700))
                                        .rounded(3.0),
                                    vec![],
                                )],
                            )
                        } else {
                            Node::view(
                                Style::default()
                                    .margin(Edges::top(4.0))
                                    .border(Edges::bottom(1.0), slate(200)),
                                vec![],
                            )
                        };
                        Node::view(
                            tw::xs(),
                            vec![
                                Node::view(
                                    Style::default().row().justify(JustifyContent::SpaceBetween).mb(4.0),
                                    head,
                                ),
                                meter,
                            ],
                        )
                    })
                    .collect();
                grid(cells, 2, 32.0, 16.0, Style::default().mb(24.0))
            }
            ThemeId::Elegant => {
                let cells = flat_skills(groups)
                    .map(|(name, level, show)| {
                        let mut row = vec![xs(name, slate(800))];
                        if show {
                            row.push(leader(slate(400)));
                            row.push(Node::text(
                                skill_level_label(self.labels, level),
                                tw::xs().italic().bold().color(slate(900)),
                            ));
                        }
                        Node::view(Style::default().row().items(AlignItems::FlexEnd), row)
                    })
                    .collect();
                grid(
                    cells,
                    2,
                    48.0,
                    8.0,
                    Style::default()
                        .family(tw::SERIF)
                        .padding(Edges::symmetric(0.0, 16.0))
                        .mb(24.0),
                )
            }
            ThemeId::Creative => {
                let cards = groups
                    .iter()
                    .map(|group| {
                        let chips = group
                            .items
                            .iter()
                            .map(|skill| {
                                let mut parts = vec![Node::text(skill.name.as_str(), Style::default())];
                                if group.show_level {
                                    parts.push(Node::text(
                                        "★".repeat(usize::from(skill.level)),
                                        tw::px(8.0).color(indigo(400)),
                                    ));
                                }
                                Node::view(
                                    tw::px(10.0)
                                        .weight(500)
                                        .color(slate(600))
                                        .background(Color::WHITE)
                                        .padding(Edges::symmetric(4.0, 8.0))
                                        .border(Edges::uniform(1.0), slate(100))
                                        .rounded(4.0)
                                        .row()
                                        .items(AlignItems::Center)
                                        .gap(4.0),
                                    parts,
                                )
                            })
                            .collect();
                        Node::view(
                            Style::default()
                                .background(slate(50))
                                .padding(Edges::uniform(12.0))
                                .border(Edges::uniform(1.0), slate(100))
                                .rounded(8.0),
                            vec![
                                Node::text(
                                    group.name.as_str(),
                                    tw::xs()
                                        .bold()
                                        .uppercase()
                                        .tracking(0.05 * 12.0)
                                        .color(indigo(600))
                                        .mb(8.0),
                                ),
                                Node::view(Style::default().row().wrap().gap(8.0), chips),
                            ],
                        )
                    })
                    .collect();
                grid(cards, 2, 16.0, 16.0, Style::default().mb(24.0))
            }
            ThemeId::Classic => Node::view(
                tw::xs().gap(8.0).mb(16.0),
                groups
                    .iter()
                    .map(|group| {
                        let items = group
                            .items
                            .iter()
                            .map(|skill| {
                                let mut parts = vec![Node::text(skill.name.as_str(), Style::default())];
                                if group.show_level {
                                    parts.push(stars(skill.level));
                                }
                                Node::view(
                                    Style::default()
                                        .color(slate(800))
                                        .row()
                                        .items(AlignItems::Center)
                                        .gap(6.0),
                                    parts,
                                )
                            })
                            .collect();
                        Node::view(
                            Style::default(),
                            vec![
                                Node::text(
                                    format!("{}:", group.name),
                                    Style::default().bold().color(slate(900)).mb(4.0),
                                ),
                                Node::view(Style::default().row().wrap().gaps(4.0, 16.0), items),
                            ],
                        )
                    })
                    .collect(),
            ),
        };
        self.push("skills-body".into(), BlockKind::Item, node);
    }

    fn projects(&mut self) {
        self.header("proj", self.labels.label("cv.projects"));

        let doc = self.doc;
        for proj in &doc.projects {
            let url = proj.url.as_deref().filter(|u| !u.trim().is_empty());
            let disc = |color| {
                bullets(
                    &proj.description,
                    tw::xs().color(color).leading(tw::LEADING_SNUG),
                    Marker::Disc,
                    16.0,
                    2.0,
                )
            };
            let node = match self.theme {
                ThemeId::Modern => {
                    let mut body = vec![h3(proj.name.as_str())];
                    if let Some(u) = url {
                        body.push(url_link(u, blue(600), tw::px(10.0).margin(Edges::top(2.0))));
                    }
                    body.push(Node::view(Style::default().margin(Edges::top(4.0)), vec![disc(slate(700))]));
                    Node::view(
                        self.item(12.0).row().gap(12.0),
                        vec![
                            Node::text(
                                proj.start_date.clone().unwrap_or_default(),
                                tw::xs()
                                    .color(slate(500))
                                    .width(Dimension::Px(100.0))
                                    .padding(Edges::top(2.0)),
                            ),
                            Node::view(Style::default().grow(1.0), body),
                        ],
                    )
                }
                ThemeId::Executive => {
                    let mut children = vec![Node::view(
                        Style::default().row().items(AlignItems::Center).gap(8.0).mb(4.0),
                        vec![diamond(), h3(proj.name.as_str())],
                    )];
                    if let Some(u) = url {
                        children.push(url_link(
                            u,
                            amber(600),
                            tw::px(10.0).margin(Edges::left(16.0)).mb(4.0),
                        ));
                    }
                    children.push(bullets(
                        &proj.description,
                        tw::xs().color(slate(700)),
                        Marker::Inline,
                        16.0,
                        2.0,
                    ));
                    Node::view(self.item(12.0), children)
                }
                ThemeId::Classic | ThemeId::Sidebar => {
                    let title = match url {
                        Some(u) => between(
                            h3(proj.name.as_str()),
                            url_link(u, blue(600), tw::px(10.0)),
                            Style::default().mb(4.0),
                        ),
                        None => Node::view(Style::default().mb(4.0), vec![h3(proj.name.as_str())]),
                    };
                    Node::view(self.item(12.0), vec![title, disc(slate(800))])
                }
                ThemeId::Professional | ThemeId::Elegant | ThemeId::Creative => {
                    let mut children = vec![Node::text(proj.name.as_str(), tw::sm().bold())];
                    if let Some(u) = url {
                        children.push(url_link(u, blue(600), tw::xs().mb(4.0)));
                    }
                    children.push(Node::text(proj.description.join(". "), tw::xs()));
                    let style = if self.theme == ThemeId::Creative {
                        self.timeline(12.0, slate(100))
                    } else {
                        self.item(12.0)
                    };
                    Node::view(style, children)
                }
            };
            self.push(format!("proj-{}", proj.id), BlockKind::Item, node);
        }
    }

    /// A one-line certification or award.
    fn credential(&self, c: Credential<'_>, last: bool, timeline: Color) -> Node {
        let issuer = !c.issuer.trim().is_empty();
        match self.theme {
            ThemeId::Executive => Node::view(
                self.item(if last { 16.0 } else { 8.0 })
                    .row()
                    .items(AlignItems::FlexStart)
                    .gap(8.0),
                vec![
                    diamond(),
                    between(
                        Node::view(
                            Style::default().row().wrap(),
                            vec![
                                Node::text(c.name, Style::default().bold().color(slate(900))),
                                Node::text(format!(" - {}", c.issuer), Style::default()),
                            ],
                        ),
                        Node::text(c.date, Style::default().color(slate(600))),
                        tw::xs().grow(1.0),
                    ),
                ],
            ),
            ThemeId::Classic | ThemeId::Modern | ThemeId::Sidebar => between(
                Node::view(
                    Style::default().row().wrap(),
                    vec![
                        Node::text(c.name, Style::default().bold().color(slate(900))),
                        Node::text(format!(" - {}", c.issuer), Style::default().color(slate(600))),
                    ],
                ),
                Node::text(c.date, Style::default().color(slate(700))),
                self.item(if last { 16.0 } else { 4.0 }).text(12.0, 16.0),
            ),
            ThemeId::Elegant => {
                let mut row = vec![Node::text(c.name, Style::default().bold().color(slate(900)))];
                if issuer {
                    row.push(Node::text(
                        format!("- {}", c.issuer),
                        Style::default()
                            .color(slate(600))
                            .margin(Edges::symmetric(0.0, 4.0)),
                    ));
                }
                row.push(leader(slate(400)));
                row.push(Node::text(c.date, Style::default().color(slate(700))));
                Node::view(
                    self.item(8.0).text(12.0, 16.0).row().items(AlignItems::FlexEnd),
                    row,
                )
            }
            ThemeId::Professional | ThemeId::Creative => {
                let mut name = vec![Node::text(c.name, Style::default().bold().color(slate(900)))];
                if issuer {
                    name.push(Node::text(
                        format!(" - {}", c.issuer),
                        Style::default().color(slate(600)),
                    ));
                }
                let style = if self.theme == ThemeId::Creative {
                    self.timeline(8.0, timeline)
                } else {
                    self.item(8.0)
                };
                Node::view(
                    style.text(12.0, 16.0),
                    vec![between(
                        Node::view(Style::default().row().wrap(), name),
                        Node::text(c.date, Style::default().color(slate(500))),
                        Style::default(),
                    )],
                )
            }
        }
    }

    fn languages(&mut self) {
        self.header("lang", self.labels.label("cv.languages"));

        let langs = &self.doc.languages;
        let pair = |language: &str, proficiency: &str| {
            Node::view(
                Style::default().row().wrap(),
                vec![
                    Node::text(language, Style::default().bold().color(slate(900))),
                    Node::text(format!(": {proficiency}"), Style::default().color(slate(700))),
                ],
            )
        };
        let node = match self.theme {
            ThemeId::Sidebar => Node::view(
                tw::xs().gap(4.0).mb(16.0),
                langs
                    .iter()
                    .map(|l| {
                        between(
                            Node::text(l.language.as_str(), Style::default().bold().color(slate(900))),
                            Node::text(l.proficiency.as_str(), Style::default().color(amber(600))),
                            Style::default(),
                        )
                    })
                    .collect(),
            ),
            ThemeId::Elegant => grid(
                langs
                    .iter()
                    .map(|l| {
                        Node::view(
                            tw::xs().row().items(AlignItems::FlexEnd),
                            vec![
                                Node::text(l.language.as_str(), Style::default().color(slate(800))),
                                leader(slate(400)),
                                Node::text(
                                    l.proficiency.as_str(),
                                    Style::default().italic().bold().color(slate(900)),
                                ),
                            ],
                        )
                    })
                    .collect(),
                2,
                48.0,
                8.0,
                Style::default()
                    .family(tw::SERIF)
                    .padding(Edges::symmetric(0.0, 16.0))
                    .mb(24.0),
            ),
            ThemeId::Professional => Node::view(
                tw::xs().gap(4.0),
                langs.iter().map(|l| pair(&l.language, &l.proficiency)).collect(),
            ),
            ThemeId::Creative => Node::view(
                tw::xs().row().wrap().gap(8.0),
                langs
                    .iter()
                    .map(|l| {
                        Node::view(
                            Style::default()
                                .color(indigo(700))
                                .background(indigo(50))
                                .padding(Edges::symmetric(4.0, 8.0))
                                .rounded(4.0)
                                .row(),
                            vec![
                                Node::text(l.language.as_str(), Style::default().bold()),
                                Node::text(format!(": {}", l.proficiency), Style::default()),
                            ],
                        )
                    })
                    .collect(),
            ),
            ThemeId::Classic | ThemeId::Modern | ThemeId::Executive => Node::view(
                tw::xs().row().wrap().gaps(4.0, 16.0).mb(16.0),
                langs.iter().map(|l| pair(&l.language, &l.proficiency)).collect(),
            ),
        };
        self.push("lang-body".into(), BlockKind::Item, node);
    }

    fn volunteering(&mut self) {
        self.header("vol", self.labels.label("cv.volunteering"));

        let doc = self.doc;
        for vol in &doc.volunteering {
            let dates = self.present(&vol.start_date, &vol.end_date, vol.current);
            let role = joined(&[&vol.role, &vol.organization], ", ");
            let node = match self.theme {
                ThemeId::Executive => Node::view(
                    self.item(12.0),
                    vec![
                        between(
                            Node::view(
                                Style::default().row().items(AlignItems::Center).gap(8.0),
                                vec![diamond(), h3(role)],
                            ),
                            xs(dates, slate(600)),
                            Style::default().mb(4.0),
                        ),
                        bullets(&vol.description, tw::xs().color(slate(700)), Marker::Inline, 16.0, 2.0),
                    ],
                ),
                ThemeId::Elegant => Node::view(
                    self.item(16.0),
                    vec![
                        Node::view(
                            Style::default().row().items(AlignItems::FlexEnd).mb(4.0),
                            vec![
                                ornament(),
                                Node::text(role, tw::sm().bold().color(slate(900)).margin(Edges::left(8.0))),
                                leader(slate(400)),
                                xs(dates, slate(900)),
                            ],
                        ),
                        Node::text(
                            vol.description.join(". "),
                            tw::xs().color(slate(700)).margin(Edges::left(20.0)),
                        ),
                    ],
                ),
                _ => {
                    let color = match self.theme.family() {
                        ThemeFamily::Classic => slate(800),
                        ThemeFamily::Showcase => slate(600),
                    };
                    let style = if self.theme == ThemeId::Creative {
                        self.timeline(12.0, indigo(100))
                    } else {
                        self.item(12.0)
                    };
                    Node::view(
                        style,
                        vec![
                            between(
                                h3(vol.organization.as_str()),
                                xs(dates, slate(700)),
                                Style::default().mb(2.0),
                            ),
                            Node::text(vol.role.as_str(), tw::xs().color(slate(800)).mb(4.0)),
                            bullets(
                                &vol.description,
                                tw::xs().color(color).leading(tw::LEADING_SNUG),
                                Marker::Disc,
                                16.0,
                                2.0,
                            ),
                        ],
                    )
                }
            };
            self.push(format!("vol-{}", vol.id), BlockKind::Item, node);
        }
    }

    fn interests(&mut self) {
        self.header("int", self.labels.label("cv.interests"));

        let interests = &self.doc.interests;
        let node = match self.theme {
            ThemeId::Elegant => {
                let last = interests.len().saturating_sub(1);
                Node::view(
                    Style::default()
                        .row()
                        .wrap()
                        .justify(JustifyContent::Center)
                        .gaps(4.0, 8.0)
                        .mb(16.0),
                    interests
                        .iter()
                        .enumerate()
                        .map(|(i, interest)| {
                            let text = if i < last {
                                format!("{interest} •")
                            } else {
                                interest.clone()
                            };
                            Node::text(text, tw::xs().family(tw::SERIF).color(slate(700)))
                        })
                        .collect(),
                )
            }
            ThemeId::Creative => Node::view(
                Style::default().row().wrap().gap(8.0).mb(16.0),
                interests
                    .iter()
                    .map(|interest| {
                        Node::text(
                            interest.as_str(),
                            tw::xs()
                                .color(indigo(700))
                                .background(indigo(50))
                                .padding(Edges::symmetric(4.0, 12.0))
                                .rounded(9999.0),
                        )
                    })
                    .collect(),
            ),
            _ => {
                let color = match self.theme.family() {
                    ThemeFamily::Classic => slate(800),
                    ThemeFamily::Showcase => slate(700),
                };
                Node::view(
                    Style::default().mb(16.0),
                    vec![bullets(
                        interests,
                        tw::xs().color(color).leading(tw::LEADING_SNUG),
                        Marker::Disc,
                        16.0,
                        2.0,
                    )],
                )
            }
        };
        self.push("int-body".into(), BlockKind::Item, node);
    }

    fn references(&mut self) {
        self.header("ref", self.labels.label("cv.references"));

        let text = self.doc.references.as_str();
        let style = match self.theme {
            ThemeId::Elegant => tw::xs().family(tw::SERIF).italic().align(TextAlign::Center),
            _ if self.theme.family() == ThemeFamily::Showcase => tw::xs(),
            _ => tw::xs().color(slate(800)).mb(16.0),
        };
        self.push("ref-body".into(), BlockKind::Item, Node::text(text, style));
    }

    fn custom(&mut self, section: &CustomSection) {
        self.header(&section.id, section.title.clone());

        for item in &section.items {
            let date = item.date.as_deref().filter(|d| !d.trim().is_empty());
            let subtitle = item.subtitle.as_deref().filter(|s| !s.trim().is_empty());
            let node = if self.theme == ThemeId::Executive {
                let title_row = match date {
                    Some(d) => between(h3(item.title.as_str()), xs(d, slate(600)), Style::default().grow(1.0)),
                    None => h3(item.title.as_str()),
                };
                let mut children = vec![Node::view(
                    Style::default().row().items(AlignItems::FlexStart).gap(8.0).mb(4.0),
                    vec![diamond(), title_row],
                )];
                if let Some(s) = subtitle {
                    children.push(Node::text(
                        s,
                        tw::xs().italic().color(slate(600)).margin(Edges::left(16.0)).mb(4.0),
                    ));
                }
                children.push(bullets(
                    &item.description,
                    tw::xs().color(slate(700)),
                    Marker::Inline,
                    16.0,
                    2.0,
                ));
                Node::view(self.item(12.0), children)
            } else {
                let title_row = match date {
                    Some(d) => between(h3(item.title.as_str()), xs(d, slate(700)), Style::default().mb(4.0)),
                    None => Node::view(Style::default().mb(4.0), vec![h3(item.title.as_str())]),
                };
                let mut children = vec![title_row];
                if let Some(s) = subtitle {
                    children.push(Node::text(s, tw::xs().color(slate(800)).mb(4.0)));
                }
                children.push(bullets(
                    &item.description,
                    tw::xs().color(slate(800)).leading(tw::LEADING_SNUG),
                    Marker::Disc,
                    16.0,
                    2.0,
                ));
                Node::view(self.item(12.0), children)
            };
            self.push(format!("{}-item-{}", section.id, item.id), BlockKind::Item, node);
        }
    }
}

/// Every skill across groups as `(name, level, show_level)`.
fn flat_skills(groups: &[SkillCategory]) -> impl Iterator<Item = (&str, u8, bool)> {
    groups.iter().flat_map(|g| {
        g.items
            .iter()
            .map(move |s| (s.name.as_str(), s.level, g.show_level))
    })
}

/// Five 10px stars, filled up to `level`.
fn stars(level: u8) -> Node {
    Node::view(
        Style::default().row().items(AlignItems::Center).gap(2.0),
        (1..=5)
            .map(|l| {
                let color = if l <= level { slate(400) } else { slate(200) };
                Node::text("★", tw::px(10.0).leading(tw::LEADING_NONE).color(color))
            })
            .collect(),
    )
}

/// Five rounded segments, filled up to `level`.
fn level_bar(level: u8, segment: f64, gap: f64, fill: Color) -> Node {
    Node::view(
        Style::default().row().gap(gap).margin(Edges::top(2.0)),
        (1..=5)
            .map(|l| {
                let color = if l <= level { fill } else { slate(200) };
                Node::view(
                    Style::default()
                        .width(Dimension::Px(segment))
                        .height(4.0)
                        .background(color)
                        .rounded(2.0),
                    vec![],
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelMap;
    use crate::model::{CustomSectionItem, ExperienceItem, SkillItem};

    fn keys(doc: &ResumeDocument, theme: ThemeId) -> Vec<String> {
        let mut out = Vec::new();
        render(doc, theme, &LabelMap::english(), &mut out);
        out.into_iter().map(|b| b.key).collect()
    }

    fn sample() -> ResumeDocument {
        ResumeDocument {
            summary: "Builds things.".into(),
            experience: vec![ExperienceItem {
                id: "1".into(),
                title: "Engineer".into(),
                company: "Acme".into(),
                description: vec!["Did work".into()],
                ..Default::default()
            }],
            skills: vec![SkillCategory {
                name: "Core".into(),
                items: vec![SkillItem {
                    name: "Rust".into(),
                    level: 5,
                }],
                show_level: true,
            }],
            custom_sections: vec![CustomSection {
                id: "custom-pubs".into(),
                title: "Publications".into(),
                items: vec![CustomSectionItem {
                    id: "p1".into(),
                    title: "On Paging".into(),
                    ..Default::default()
                }],
            }],
            section_order: vec![
                "summary".into(),
                "experience".into(),
                "education".into(),
                "skills".into(),
                "custom-pubs".into(),
                "custom-missing".into(),
                "hobbies".into(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn key_sequence_is_theme_independent() {
        let expected = vec![
            "summary-header",
            "summary-spacer",
            "summary-body",
            "exp-header",
            "exp-spacer",
            "exp-1",
            "skills-header",
            "skills-spacer",
            "skills-body",
            "custom-pubs-header",
            "custom-pubs-spacer",
            "custom-pubs-item-p1",
        ];
        for theme in ThemeId::ALL {
            assert_eq!(keys(&sample(), theme), expected, "{theme}");
        }
    }

    #[test]
    fn blank_and_repeated_ids_get_distinct_keys() {
        let unnamed = |title: &str| ExperienceItem {
            title: title.into(),
            ..Default::default()
        };
        let custom = |id: &str| CustomSection {
            id: id.into(),
            title: "Notes".into(),
            items: vec![CustomSectionItem {
                id: "1".into(),
                title: "Entry".into(),
                ..Default::default()
            }],
        };
        let doc = ResumeDocument {
            experience: vec![unnamed("Engineer"), unnamed("Intern")],
            custom_sections: vec![custom("custom-a"), custom("custom-b")],
            section_order: ["experience", "custom-a", "custom-b"].map(String::from).to_vec(),
            ..Default::default()
        };
        assert_eq!(
            keys(&doc, ThemeId::Classic),
            [
                "exp-header",
                "exp-spacer",
                "exp-2",
                "exp-3",
                "custom-a-header",
                "custom-a-spacer",
                "custom-a-item-1",
                "custom-b-header",
                "custom-b-spacer",
                "custom-b-item-1",
            ]
        );
    }

    #[test]
    fn keys_stay_unique_when_a_section_repeats() {
        let mut doc = sample();
        doc.section_order = ["experience", "experience", "summary"].map(String::from).to_vec();
        doc.experience.push(ExperienceItem {
            id: "1".into(),
            title: "Duplicate id".into(),
            ..Default::default()
        });
        for theme in ThemeId::ALL {
            let keys = keys(&doc, theme);
            let distinct: HashSet<&String> = keys.iter().collect();
            assert_eq!(distinct.len(), keys.len(), "{theme}: {keys:?}");
        }
    }

    #[test]
    fn header_and_spacer_kinds() {
        let mut out = Vec::new();
        render(&sample(), ThemeId::Classic, &LabelMap::english(), &mut out);
        assert!(out[0].is_header());
        assert!(out[1].is_spacer());
        assert_eq!(out[2].kind, BlockKind::Item);
    }

    #[test]
    fn titles_follow_theme_and_labels() {
        let mut out = Vec::new();
        let labels = LabelMap::english().with("cv.employmentHistory", "Career");
        render(&sample(), ThemeId::Executive, &labels, &mut out);
        assert_eq!(out[3].content.plain_text(), "Career");

        out.clear();
        render(&sample(), ThemeId::Elegant, &labels, &mut out);
        assert_eq!(out[3].content.plain_text(), "CAREER");

        out.clear();
        render(&sample(), ThemeId::Modern, &labels, &mut out);
        assert_eq!(out[6].content.plain_text(), "Technical Proficiencies");
    }

    #[test]
    fn current_role_uses_present_label() {
        let mut doc = sample();
        doc.experience[0].start_date = "2021".into();
        doc.experience[0].current = true;
        let mut out = Vec::new();
        let labels = LabelMap::english().with("cv.present", "Günümüz");
        render(&doc, ThemeId::Classic, &labels, &mut out);
        assert!(out[5].content.plain_text().contains("2021 – Günümüz"));
    }

    #[test]
    fn skill_levels_render_as_text_where_themes_show_them() {
        let mut out = Vec::new();
        render(&sample(), ThemeId::Modern, &LabelMap::english(), &mut out);
        assert!(out[8].content.plain_text().contains("Expert"));
    }
}
