//! Advance widths for the built-in font families, in 1/1000 em.
//!
//! Tables cover printable ASCII (U+0020..=U+007E). Characters outside that
//! range fall back to the family's average advance, which is close enough
//! for Latin-extended text such as Turkish or German resumes.

/// Width table for one built-in face.
#[derive(Debug)]
pub struct StandardFontMetrics {
    widths: &'static [u16; 95],
    fallback: u16,
}

impl StandardFontMetrics {
    /// Advance width of one character in pixels at `font_size`.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let code = ch as u32;
        let units = if (0x20..=0x7E).contains(&code) {
            self.widths[(code - 0x20) as usize]
        } else if ch.is_whitespace() {
            self.widths[0]
        } else {
            self.fallback
        };
        units as f64 / 1000.0 * font_size
    }

    /// Width of a string in pixels, including per-character letter spacing.
    pub fn measure_string(&self, text: &str, font_size: f64, letter_spacing: f64) -> f64 {
        text.chars()
            .map(|ch| self.char_width(ch, font_size) + letter_spacing)
            .sum()
    }
}

pub static HELVETICA: StandardFontMetrics = StandardFontMetrics {
    widths: &[
        278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
        222, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
    ],
    fallback: 556,
};

pub static HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    widths: &[
        278, 333, 474, 556, 556, 889, 722, 278, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        278, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ],
    fallback: 611,
};

pub static TIMES_ROMAN: StandardFontMetrics = StandardFontMetrics {
    widths: &[
        250, 333, 408, 500, 500, 833, 778, 333, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
        921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
        556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
        333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
        500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
    ],
    fallback: 500,
};

pub static TIMES_BOLD: StandardFontMetrics = StandardFontMetrics {
    widths: &[
        250, 333, 555, 500, 500, 1000, 833, 333, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
        930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
        611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
        333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
        556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
    ],
    fallback: 540,
};

/// Courier is monospaced: every glyph is 600 units.
pub static COURIER: StandardFontMetrics = StandardFontMetrics {
    widths: &[600; 95],
    fallback: 600,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_space_is_278() {
        assert!((HELVETICA.char_width(' ', 12.0) - 3.336).abs() < 0.001);
    }

    #[test]
    fn non_ascii_uses_fallback() {
        assert!((HELVETICA.char_width('ş', 10.0) - 5.56).abs() < 1e-9);
        assert!((HELVETICA.char_width('\u{00A0}', 10.0) - 2.78).abs() < 1e-9);
    }

    #[test]
    fn courier_is_monospaced() {
        assert_eq!(
            COURIER.measure_string("iii", 10.0, 0.0),
            COURIER.measure_string("WWW", 10.0, 0.0)
        );
    }
}
