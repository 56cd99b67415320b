//! Content blocks: the unit the pagination engine places on pages.

use crate::markup::Node;
use serde::Serialize;

/// The semantic role of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    /// The name/contact header at the top of the document.
    Masthead,
    /// A section title. Must not end a page unless it ends the document.
    SectionHeader,
    /// One entry, or the whole body of a single-body section.
    Item,
    /// Vertical space bound to the block before it.
    Spacer,
}

/// One renderable unit of resume content.
///
/// `key` identifies the block for debugging and rendering only. Layout
/// decisions look at `kind` and the measured height, never at the key.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub key: String,
    pub kind: BlockKind,
    pub content: Node,
}

impl ContentBlock {
    pub fn new(key: impl Into<String>, kind: BlockKind, content: Node) -> Self {
        Self {
            key: key.into(),
            kind,
            content,
        }
    }

    pub fn is_header(&self) -> bool {
        self.kind == BlockKind::SectionHeader
    }

    pub fn is_spacer(&self) -> bool {
        self.kind == BlockKind::Spacer
    }
}

/// A block paired with its height as rendered at full content width,
/// vertical margins included.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredBlock {
    pub block: ContentBlock,
    pub height: f64,
}

impl MeasuredBlock {
    pub fn new(block: ContentBlock, height: f64) -> Self {
        Self { block, height }
    }

    pub fn key(&self) -> &str {
        &self.block.key
    }

    pub fn is_header(&self) -> bool {
        self.block.is_header()
    }

    pub fn is_spacer(&self) -> bool {
        self.block.is_spacer()
    }
}
