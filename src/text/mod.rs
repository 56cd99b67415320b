//! # Text Layout
//!
//! Greedy line breaking and text measurement for the measurement surface.
//!
//! Break opportunities come from UAX#14 (`unicode-linebreak`), so URLs,
//! hyphenated compounds and CJK text wrap where a browser would wrap them.
//! Trailing spaces hang past the right edge and never force a break.

use crate::font::FontContext;
use crate::style::{FontStyle, ResolvedStyle, TextTransform};
use std::borrow::Cow;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Width of the line excluding trailing spaces.
    pub width: f64,
}

/// The font parameters text is measured with.
#[derive(Debug, Clone, Copy)]
pub struct FontSpec<'a> {
    pub family: &'a str,
    pub weight: u32,
    pub italic: bool,
    pub size: f64,
    pub letter_spacing: f64,
}

impl<'a> FontSpec<'a> {
    pub fn from_style(style: &'a ResolvedStyle) -> Self {
        Self {
            family: &style.font_family,
            weight: style.font_weight,
            italic: style.font_style == FontStyle::Italic,
            size: style.font_size,
            letter_spacing: style.letter_spacing,
        }
    }
}

/// Apply a CSS `text-transform` before measuring.
pub fn apply_transform(text: &str, transform: TextTransform) -> Cow<'_, str> {
    match transform {
        TextTransform::None => Cow::Borrowed(text),
        TextTransform::Uppercase => Cow::Owned(text.to_uppercase()),
    }
}

fn is_line_separator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Returns a vec of length `text.chars().count()`. Each entry is the break
/// opportunity *before* that character position. Index 0 is always `None`.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields the byte offset of the start of the next segment.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
            map[byte_idx] = char_idx;
        }
        map[text.len()] = char_count;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx > 0 && char_idx < char_count {
            result[char_idx] = Some(opp);
        }
    }

    result
}

pub struct TextLayout;

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break a string into lines that fit within `max_width`.
    ///
    /// An empty string still occupies one (empty) line, like an empty
    /// paragraph in a browser. Words wider than `max_width` are split at the
    /// character that overflows.
    pub fn break_into_lines(
        &self,
        font_context: &FontContext,
        text: &str,
        max_width: f64,
        font: FontSpec<'_>,
    ) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![BrokenLine {
                text: String::new(),
                width: 0.0,
            }];
        }

        let chars: Vec<char> = text.chars().collect();
        let char_widths = self.measure_chars(font_context, text, font);
        let break_opps = compute_break_opportunities(text);

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        let mut last_break_point: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            if let Some(opp) = break_opps[i] {
                match opp {
                    BreakOpportunity::Mandatory => {
                        lines.push(self.make_line(&chars[line_start..i], &char_widths[line_start..i]));
                        line_start = i;
                        line_width = 0.0;
                        last_break_point = None;
                    }
                    BreakOpportunity::Allowed => {
                        last_break_point = Some(i);
                    }
                }
            }

            if is_line_separator(ch) {
                continue;
            }

            let char_width = char_widths[i];

            // Whitespace hangs; only visible glyphs can overflow a line.
            if !ch.is_whitespace() && line_width + char_width > max_width && line_start < i {
                let break_at = match last_break_point {
                    Some(bp) if bp > line_start => bp,
                    _ => i,
                };
                lines.push(self.make_line(
                    &chars[line_start..break_at],
                    &char_widths[line_start..break_at],
                ));
                line_start = break_at;
                line_width = char_widths[line_start..=i].iter().sum();
                last_break_point = None;
                continue;
            }

            line_width += char_width;
        }

        lines.push(self.make_line(&chars[line_start..], &char_widths[line_start..]));
        lines
    }

    /// Create a BrokenLine from characters and their widths, dropping
    /// line separators and trailing spaces from the measured width.
    fn make_line(&self, chars: &[char], widths: &[f64]) -> BrokenLine {
        let mut text = String::with_capacity(chars.len());
        let mut width = 0.0;
        let mut trailing = 0.0;
        for (&ch, &w) in chars.iter().zip(widths) {
            if is_line_separator(ch) {
                continue;
            }
            text.push(ch);
            if ch.is_whitespace() {
                trailing += w;
            } else {
                width += trailing + w;
                trailing = 0.0;
            }
        }
        BrokenLine { text, width }
    }

    /// Measure the widest unbreakable word: the min-content width of `text`.
    pub fn measure_widest_word(
        &self,
        font_context: &FontContext,
        text: &str,
        font: FontSpec<'_>,
    ) -> f64 {
        text.split_whitespace()
            .map(|word| self.measure_width(font_context, word, font))
            .fold(0.0f64, f64::max)
    }

    /// Measure the width of a string on a single line.
    pub fn measure_width(&self, font_context: &FontContext, text: &str, font: FontSpec<'_>) -> f64 {
        font_context.measure_string(
            text,
            font.family,
            font.weight,
            font.italic,
            font.size,
            font.letter_spacing,
        )
    }

    /// Measure individual character widths using real font metrics.
    fn measure_chars(&self, font_context: &FontContext, text: &str, font: FontSpec<'_>) -> Vec<f64> {
        text.chars()
            .map(|ch| {
                font_context.char_width(ch, font.family, font.weight, font.italic, font.size)
                    + font.letter_spacing
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helvetica(size: f64) -> FontSpec<'static> {
        FontSpec {
            family: "Helvetica",
            weight: 400,
            italic: false,
            size,
            letter_spacing: 0.0,
        }
    }

    #[test]
    fn test_empty_text_is_one_line() {
        let lines = TextLayout::new().break_into_lines(&FontContext::new(), "", 100.0, helvetica(12.0));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 0.0);
    }

    #[test]
    fn test_short_text_single_line() {
        let ctx = FontContext::new();
        let lines = TextLayout::new().break_into_lines(&ctx, "Senior Engineer", 500.0, helvetica(12.0));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Senior Engineer");
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let ctx = FontContext::new();
        let layout = TextLayout::new();
        let text = "Led a team of five engineers building a distributed cache";
        let lines = layout.break_into_lines(&ctx, text, 120.0, helvetica(12.0));
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 120.0 + 1e-9, "line too wide: {line:?}");
            assert!(!line.text.starts_with(' '));
        }
        let rejoined: String = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_trailing_space_does_not_count() {
        let ctx = FontContext::new();
        let layout = TextLayout::new();
        let with = layout.break_into_lines(&ctx, "abc   ", 500.0, helvetica(12.0));
        let without = layout.break_into_lines(&ctx, "abc", 500.0, helvetica(12.0));
        assert!((with[0].width - without[0].width).abs() < 1e-9);
    }

    #[test]
    fn test_newline_forces_break() {
        let ctx = FontContext::new();
        let lines = TextLayout::new().break_into_lines(&ctx, "one\ntwo", 500.0, helvetica(12.0));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "one");
        assert_eq!(lines[1].text, "two");
    }

    #[test]
    fn test_long_word_is_split() {
        let ctx = FontContext::new();
        let lines = TextLayout::new().break_into_lines(
            &ctx,
            "supercalifragilisticexpialidocious",
            50.0,
            helvetica(12.0),
        );
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width <= 50.0 + 1e-9));
    }

    #[test]
    fn test_widest_word() {
        let ctx = FontContext::new();
        let layout = TextLayout::new();
        let widest = layout.measure_widest_word(&ctx, "a bb cccc", helvetica(10.0));
        let cccc = layout.measure_width(&ctx, "cccc", helvetica(10.0));
        assert!((widest - cccc).abs() < 1e-9);
    }

    #[test]
    fn test_uppercase_transform_is_wider() {
        let ctx = FontContext::new();
        let layout = TextLayout::new();
        let lower = layout.measure_width(&ctx, "experience", helvetica(12.0));
        let upper = layout.measure_width(
            &ctx,
            &apply_transform("experience", TextTransform::Uppercase),
            helvetica(12.0),
        );
        assert!(upper > lower);
    }
}
