//! # Vitae
//!
//! A measurement-driven pagination engine for resumes.
//!
//! Resume themes differ widely in density, typefaces and markup, so no
//! line-count heuristic can say where a page ends. Vitae renders every
//! section of a resume into self-contained blocks, measures each block at
//! the exact width of a real page, and then cuts the block sequence into
//! pages from those measured heights. A block is never split, and a section
//! header is never left alone at the bottom of a page.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [theme]       — Resume document → ordered content blocks
//!       ↓
//!   [measure]     — Off-screen surface at page width → per-block heights
//!       ↓
//!   [pagination]  — Greedy packing with header lookahead → page partitions
//!       ↓
//!   [render]      — Fixed A4 pages as HTML, with "n/total" counters
//! ```
//!
//! [`recompute`] runs the whole pipeline once. [`session::PreviewSession`]
//! drives it for a live preview that re-runs on every edit.

pub mod block;
pub mod error;
pub mod font;
pub mod labels;
pub mod markup;
pub mod measure;
pub mod model;
pub mod pagination;
pub mod render;
pub mod session;
pub mod style;
pub mod text;
pub mod theme;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::collections::BTreeMap;

use serde::Deserialize;

pub use error::{Result, VitaeError};
use labels::{LabelMap, Labels};
use measure::{LayoutSurface, MeasurementSurface, PresetSurface};
use model::{PageGeometry, ResumeDocument};
use pagination::{Pagination, PaginationLimits, PaginationSummary};
use render::HtmlRenderer;
use theme::ThemeId;

/// Paginate a document under a theme with English labels, A4 geometry and
/// the built-in layout surface.
///
/// Pure: the same document and theme always give the same pages.
pub fn recompute(document: &ResumeDocument, theme: ThemeId) -> Result<Pagination> {
    let geometry = PageGeometry::default();
    let mut surface = LayoutSurface::for_geometry(&geometry);
    recompute_with(document, theme, &LabelMap::english(), &geometry, &mut surface)
}

/// Run one full pass: render blocks, measure them on `surface`, paginate.
pub fn recompute_with<S: MeasurementSurface + ?Sized>(
    document: &ResumeDocument,
    theme: ThemeId,
    labels: &dyn Labels,
    geometry: &PageGeometry,
    surface: &mut S,
) -> Result<Pagination> {
    validate_geometry(geometry)?;
    let blocks = theme::render_blocks(document, theme, labels);
    let measured = measure::measure(surface, blocks)?;
    Ok(pagination::paginate(measured, &PaginationLimits::from(geometry)))
}

/// Reject geometry that leaves no room for content.
pub fn validate_geometry(geometry: &PageGeometry) -> Result<()> {
    let width = geometry.content_width();
    if !width.is_finite() || width <= 0.0 {
        return Err(VitaeError::InvalidGeometry(format!(
            "content width is {width:.1}px; padding leaves no room on a {:.1}px page",
            geometry.width
        )));
    }
    let height = geometry.max_content_height();
    if !height.is_finite() || height <= 0.0 {
        return Err(VitaeError::InvalidGeometry(format!(
            "usable content height is {height:.1}px after padding, footer and safety margin"
        )));
    }
    Ok(())
}

/// One pagination job as submitted over JSON.
///
/// Everything but `document` is optional. With `heights` present, block
/// heights come from that map (keyed by block key) instead of the built-in
/// layout, which lets a browser host measure and Vitae decide the breaks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationRequest {
    pub document: ResumeDocument,
    pub theme: Option<String>,
    pub geometry: PageGeometry,
    pub labels: LabelMap,
    pub heights: Option<BTreeMap<String, f64>>,
}

impl PaginationRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn theme(&self) -> Result<ThemeId> {
        match &self.theme {
            Some(name) => name.parse(),
            None => Ok(ThemeId::default()),
        }
    }

    pub fn run(&self) -> Result<Pagination> {
        let theme = self.theme()?;
        match &self.heights {
            Some(heights) => {
                let mut surface = PresetSurface::keyed(heights.clone());
                recompute_with(&self.document, theme, &self.labels, &self.geometry, &mut surface)
            }
            None => {
                let mut surface = LayoutSurface::for_geometry(&self.geometry);
                recompute_with(&self.document, theme, &self.labels, &self.geometry, &mut surface)
            }
        }
    }

    /// Run the job and render the pages as a standalone HTML document.
    pub fn render_html(&self) -> Result<String> {
        let pagination = self.run()?;
        Ok(HtmlRenderer::new(self.geometry).render_document(&pagination, self.theme()?))
    }
}

/// Paginate a request described as JSON, returning the page partition.
pub fn paginate_json(json: &str) -> Result<PaginationSummary> {
    Ok(PaginationRequest::from_json(json)?.run()?.summary())
}

/// Paginate a request described as JSON and render it to HTML.
pub fn render_html_json(json: &str) -> Result<String> {
    PaginationRequest::from_json(json)?.render_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_padding_wider_than_the_page() {
        let geometry = PageGeometry {
            padding: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            validate_geometry(&geometry),
            Err(VitaeError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn rejects_safety_margin_eating_the_page() {
        let geometry = PageGeometry {
            safety_margin: 2000.0,
            ..Default::default()
        };
        let doc = ResumeDocument::default();
        let mut surface = LayoutSurface::for_geometry(&geometry);
        let err = recompute_with(&doc, ThemeId::Classic, &LabelMap::english(), &geometry, &mut surface)
            .unwrap_err();
        assert!(err.to_string().contains("usable content height"));
    }

    #[test]
    fn request_defaults_to_classic() {
        let req = PaginationRequest::from_json(r#"{"document": {"fullName": "Ada"}}"#).unwrap();
        assert_eq!(req.theme().unwrap(), ThemeId::Classic);
        assert!(req.heights.is_none());
    }

    #[test]
    fn unknown_theme_in_request() {
        let req = PaginationRequest::from_json(r#"{"theme": "brutalist"}"#).unwrap();
        assert!(matches!(req.run(), Err(VitaeError::UnknownTheme(name)) if name == "brutalist"));
    }

    #[test]
    fn preset_heights_drive_the_breaks() {
        let json = r#"{
            "document": {
                "fullName": "Ada",
                "summary": "Hello",
                "sectionOrder": ["summary"]
            },
            "heights": {
                "main-header": 800,
                "summary-header": 30,
                "summary-spacer": 12,
                "summary-body": 40
            }
        }"#;
        let summary = paginate_json(json).unwrap();
        assert_eq!(summary.total_pages, 2);
        assert_eq!(summary.pages[0].blocks.len(), 1);
        assert_eq!(summary.pages[1].blocks[0].key, "summary-header");
    }

    #[test]
    fn missing_preset_height_is_not_ready() {
        let json = r#"{
            "document": {"summary": "Hello", "sectionOrder": ["summary"]},
            "heights": {"main-header": 100}
        }"#;
        assert!(matches!(
            paginate_json(json),
            Err(VitaeError::MeasurementNotReady { mounted: 4, read: 1 })
        ));
    }

    #[test]
    fn parse_errors_surface_with_hint() {
        let err = paginate_json("{\"document\": ").unwrap_err();
        assert!(matches!(err, VitaeError::Parse { .. }));
    }
}
