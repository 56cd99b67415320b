//! # Font Management
//!
//! Font lookup and text measurement for the measurement surface.
//!
//! Three built-in families cover the themes: Helvetica (sans), Times
//! (serif) and Courier (mono). Hosts that render with a specific web font
//! can register its TrueType data so measured widths match what the
//! browser will paint.

pub mod metrics;

pub use metrics::StandardFontMetrics;
use std::collections::HashMap;

/// A font registry that maps family + weight + style to font data.
pub struct FontRegistry {
    fonts: HashMap<FontKey, FontData>,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    pub family: String,
    pub weight: u32,
    pub italic: bool,
}

#[derive(Debug, Clone)]
pub enum FontData {
    /// One of the built-in faces.
    Standard(StandardFont),
    /// A TrueType/OpenType font registered by the host.
    Custom {
        /// Parsed metrics from ttf-parser, if the data was a valid font.
        metrics: Option<CustomFontMetrics>,
    },
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
}

impl CustomFontMetrics {
    /// Get the advance width of a character in pixels.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Latin, Latin-1 and Latin Extended-A/B cover the resume languages.
        for code in 32u32..=0x024F {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Some(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }
}

/// The built-in faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
}

impl StandardFont {
    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica => &metrics::HELVETICA,
            Self::HelveticaBold => &metrics::HELVETICA_BOLD,
            Self::TimesRoman => &metrics::TIMES_ROMAN,
            Self::TimesBold => &metrics::TIMES_BOLD,
            Self::Courier => &metrics::COURIER,
        }
    }

    /// The CSS font stack this face stands in for.
    pub fn css_stack(&self) -> &'static str {
        match self {
            Self::Helvetica | Self::HelveticaBold => "Helvetica, Arial, sans-serif",
            Self::TimesRoman | Self::TimesBold => "'Times New Roman', Times, serif",
            Self::Courier => "'Courier New', Courier, monospace",
        }
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();

        // Italic faces share upright advances; the difference is below
        // what moves a line break.
        let standard_mappings = [
            ("Helvetica", 400, StandardFont::Helvetica),
            ("Helvetica", 700, StandardFont::HelveticaBold),
            ("Times", 400, StandardFont::TimesRoman),
            ("Times", 700, StandardFont::TimesBold),
            ("Courier", 400, StandardFont::Courier),
            ("Courier", 700, StandardFont::Courier),
        ];

        for (family, weight, font) in standard_mappings {
            for italic in [false, true] {
                fonts.insert(
                    FontKey {
                        family: family.to_string(),
                        weight,
                        italic,
                    },
                    FontData::Standard(font),
                );
            }
        }

        Self { fonts }
    }

    /// Look up a face. Weights snap to regular (below 600) or bold when
    /// the exact weight is missing; unknown families measure as Helvetica.
    pub fn resolve(&self, family: &str, weight: u32, italic: bool) -> &FontData {
        let snapped = if weight >= 600 { 700 } else { 400 };
        [weight, snapped]
            .into_iter()
            .find_map(|weight| {
                self.fonts.get(&FontKey {
                    family: family.to_string(),
                    weight,
                    italic,
                })
            })
            .unwrap_or(if snapped == 700 { &SANS_BOLD } else { &SANS })
    }

    /// Register a custom font.
    pub fn register(&mut self, family: &str, weight: u32, italic: bool, data: &[u8]) {
        let metrics = CustomFontMetrics::from_font_data(data);
        if metrics.is_none() {
            log::warn!("Font data for {family} ({weight}) could not be parsed; using Helvetica metrics");
        }
        self.fonts.insert(
            FontKey {
                family: family.to_string(),
                weight,
                italic,
            },
            FontData::Custom { metrics },
        );
    }
}

static SANS: FontData = FontData::Standard(StandardFont::Helvetica);
static SANS_BOLD: FontData = FontData::Standard(StandardFont::HelveticaBold);

/// Shared font context used by the measurement surface.
pub struct FontContext {
    registry: FontRegistry,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
        }
    }

    /// Get the advance width of a single character in pixels.
    pub fn char_width(
        &self,
        ch: char,
        family: &str,
        weight: u32,
        italic: bool,
        font_size: f64,
    ) -> f64 {
        match self.registry.resolve(family, weight, italic) {
            FontData::Standard(std_font) => std_font.metrics().char_width(ch, font_size),
            FontData::Custom { metrics: Some(m) } => m.char_width(ch, font_size),
            FontData::Custom { metrics: None } => {
                StandardFont::Helvetica.metrics().char_width(ch, font_size)
            }
        }
    }

    /// Measure the width of a string in pixels.
    pub fn measure_string(
        &self,
        text: &str,
        family: &str,
        weight: u32,
        italic: bool,
        font_size: f64,
        letter_spacing: f64,
    ) -> f64 {
        text.chars()
            .map(|ch| self.char_width(ch, family, weight, italic, font_size) + letter_spacing)
            .sum()
    }

    /// Access the underlying font registry mutably.
    pub fn registry_mut(&mut self) -> &mut FontRegistry {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(ctx: &FontContext, text: &str, family: &str, weight: u32) -> f64 {
        ctx.measure_string(text, family, weight, false, 12.0, 0.0)
    }

    #[test]
    fn space_advance_matches_helvetica_afm() {
        let ctx = FontContext::new();
        assert!((ctx.char_width(' ', "Helvetica", 400, false, 12.0) - 3.336).abs() < 0.001);
    }

    #[test]
    fn bold_titles_measure_wider() {
        let ctx = FontContext::new();
        let title = "Senior Engineer";
        assert!(width(&ctx, title, "Helvetica", 700) > width(&ctx, title, "Helvetica", 400));
    }

    #[test]
    fn serif_body_is_narrower_than_sans() {
        let ctx = FontContext::new();
        let line = "Led the migration of billing services";
        assert!(width(&ctx, line, "Times", 400) < width(&ctx, line, "Helvetica", 400));
    }

    #[test]
    fn unknown_family_and_odd_weights_resolve() {
        let ctx = FontContext::new();
        let name = "Ada Lovelace";
        assert_eq!(width(&ctx, name, "Inter", 400), width(&ctx, name, "Helvetica", 400));
        assert_eq!(width(&ctx, name, "Helvetica", 800), width(&ctx, name, "Helvetica", 700));
        assert_eq!(width(&ctx, name, "Times", 500), width(&ctx, name, "Times", 400));
    }

    #[test]
    fn tracking_is_added_per_character() {
        let ctx = FontContext::new();
        let plain = ctx.measure_string("CV", "Helvetica", 700, false, 10.0, 0.0);
        let tracked = ctx.measure_string("CV", "Helvetica", 700, false, 10.0, 2.0);
        assert!((tracked - plain - 4.0).abs() < 1e-9);
    }

    #[test]
    fn unparseable_custom_font_measures_as_helvetica() {
        let mut ctx = FontContext::new();
        ctx.registry_mut().register("Inter", 400, false, b"not a font");
        assert!(matches!(
            ctx.registry_mut().resolve("Inter", 400, false),
            FontData::Custom { metrics: None }
        ));
        assert_eq!(width(&ctx, "Résumé", "Inter", 400), width(&ctx, "Résumé", "Helvetica", 400));
    }
}
