//! # Theme Block Renderer
//!
//! Turns a [`ResumeDocument`] into the ordered sequence of content blocks
//! the pagination engine places on pages. Seven themes share one block
//! structure: the same document yields the same keys, kinds and order under
//! every theme, and only the markup inside each block differs.
//!
//! The sequence is always:
//!
//! ```text
//! main-header                          (masthead)
//! <prefix>-header, <prefix>-spacer     (per non-empty section, in sectionOrder)
//! <item or body blocks>                (the section's content)
//! ```

pub mod masthead;
mod parts;
mod sections;
pub mod tw;

use crate::block::{BlockKind, ContentBlock};
use crate::error::VitaeError;
use crate::labels::Labels;
use crate::model::ResumeDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key of the masthead block.
pub const MASTHEAD_KEY: &str = "main-header";

/// The supported visual themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Classic,
    Executive,
    Modern,
    Sidebar,
    Professional,
    Elegant,
    Creative,
}

/// Themes fall into two families that share title wording and palette
/// conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFamily {
    /// Classic, executive, modern and sidebar.
    Classic,
    /// Professional, elegant and creative.
    Showcase,
}

impl ThemeId {
    pub const ALL: [ThemeId; 7] = [
        ThemeId::Classic,
        ThemeId::Executive,
        ThemeId::Modern,
        ThemeId::Sidebar,
        ThemeId::Professional,
        ThemeId::Elegant,
        ThemeId::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Classic => "classic",
            ThemeId::Executive => "executive",
            ThemeId::Modern => "modern",
            ThemeId::Sidebar => "sidebar",
            ThemeId::Professional => "professional",
            ThemeId::Elegant => "elegant",
            ThemeId::Creative => "creative",
        }
    }

    pub fn family(&self) -> ThemeFamily {
        match self {
            ThemeId::Classic | ThemeId::Executive | ThemeId::Modern | ThemeId::Sidebar => {
                ThemeFamily::Classic
            }
            ThemeId::Professional | ThemeId::Elegant | ThemeId::Creative => ThemeFamily::Showcase,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = VitaeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ThemeId::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| VitaeError::UnknownTheme(s.to_string()))
    }
}

/// Render `doc` under `theme` into content blocks.
///
/// The masthead always comes first, followed by every section in
/// `sectionOrder` that has content. Unknown keys and custom keys without a
/// matching section are skipped with a warning.
pub fn render_blocks(doc: &ResumeDocument, theme: ThemeId, labels: &dyn Labels) -> Vec<ContentBlock> {
    let mut blocks = vec![ContentBlock::new(
        MASTHEAD_KEY,
        BlockKind::Masthead,
        masthead::render(doc, theme),
    )];
    sections::render(doc, theme, labels, &mut blocks);
    log::debug!("Rendered {} blocks with the {theme} theme", blocks.len());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelMap;

    #[test]
    fn theme_names_round_trip() {
        for theme in ThemeId::ALL {
            assert_eq!(theme.as_str().parse::<ThemeId>().unwrap(), theme);
        }
        assert_eq!(" Elegant ".parse::<ThemeId>().unwrap(), ThemeId::Elegant);
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let err = "neon".parse::<ThemeId>().unwrap_err();
        assert!(matches!(err, VitaeError::UnknownTheme(ref t) if t == "neon"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let t: ThemeId = serde_json::from_str("\"sidebar\"").unwrap();
        assert_eq!(t, ThemeId::Sidebar);
        assert_eq!(serde_json::to_string(&ThemeId::Creative).unwrap(), "\"creative\"");
    }

    #[test]
    fn empty_document_is_just_the_masthead() {
        let doc = ResumeDocument {
            full_name: "Ada".into(),
            section_order: vec!["experience".into(), "skills".into()],
            ..Default::default()
        };
        let blocks = render_blocks(&doc, ThemeId::Classic, &LabelMap::english());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].key, MASTHEAD_KEY);
        assert_eq!(blocks[0].kind, BlockKind::Masthead);
        assert!(!blocks[0].is_header());
    }

    #[test]
    fn families() {
        assert_eq!(ThemeId::Sidebar.family(), ThemeFamily::Classic);
        assert_eq!(ThemeId::Elegant.family(), ThemeFamily::Showcase);
    }
}
