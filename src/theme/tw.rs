//! Utility-scale helpers: the type ramp, spacing steps and color shades the
//! themes are written against. Sizes follow the usual 16px-root scale.

use crate::style::{Color, Dimension, Edges, Style};

pub const SANS: &str = "Helvetica";
pub const SERIF: &str = "Times";

pub const LEADING_NONE: f64 = 1.0;
pub const LEADING_SNUG: f64 = 1.375;
pub const LEADING_RELAXED: f64 = 1.625;

// Type ramp: font size with its paired line height.

pub fn xs() -> Style {
    Style::default().text(12.0, 16.0)
}

pub fn sm() -> Style {
    Style::default().text(14.0, 20.0)
}

pub fn base() -> Style {
    Style::default().text(16.0, 24.0)
}

pub fn lg() -> Style {
    Style::default().text(18.0, 28.0)
}

pub fn xl() -> Style {
    Style::default().text(20.0, 28.0)
}

pub fn xl2() -> Style {
    Style::default().text(24.0, 32.0)
}

pub fn xl3() -> Style {
    Style::default().text(30.0, 36.0)
}

pub fn xl4() -> Style {
    Style::default().text(36.0, 40.0)
}

/// An arbitrary pixel size. Line height stays inherited.
pub fn px(size: f64) -> Style {
    Style::default().font_size(size)
}

// Letter spacing is expressed in em and needs the font size it applies to.

pub fn tight(size: f64) -> f64 {
    -0.025 * size
}

pub fn wide(size: f64) -> f64 {
    0.025 * size
}

pub fn widest(size: f64) -> f64 {
    0.1 * size
}

/// A square of `size` pixels, used for bullet dots and timeline markers.
pub fn dot(size: f64, color: Color) -> Style {
    Style::default()
        .width(Dimension::Px(size))
        .height(size)
        .background(color)
        .rounded(size / 2.0)
}

pub fn pl(px: f64) -> Edges {
    Edges::left(px)
}

pub fn slate(shade: u16) -> Color {
    Color::hex(match shade {
        50 => "#f8fafc",
        100 => "#f1f5f9",
        200 => "#e2e8f0",
        300 => "#cbd5e1",
        400 => "#94a3b8",
        500 => "#64748b",
        600 => "#475569",
        700 => "#334155",
        800 => "#1e293b",
        _ => "#0f172a",
    })
}

pub fn amber(shade: u16) -> Color {
    Color::hex(match shade {
        100 => "#fef3c7",
        200 => "#fde68a",
        400 => "#fbbf24",
        _ => "#d97706",
    })
}

pub fn blue(shade: u16) -> Color {
    Color::hex(match shade {
        600 => "#2563eb",
        _ => "#1d4ed8",
    })
}

pub fn indigo(shade: u16) -> Color {
    Color::hex(match shade {
        50 => "#eef2ff",
        100 => "#e0e7ff",
        200 => "#c7d2fe",
        400 => "#818cf8",
        500 => "#6366f1",
        700 => "#4338ca",
        _ => "#4f46e5",
    })
}

pub fn orange(shade: u16) -> Color {
    Color::hex(match shade {
        100 => "#ffedd5",
        _ => "#fed7aa",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_line_heights() {
        let s = xs().resolve(None, 100.0);
        assert!((s.font_size * s.line_height - 16.0).abs() < 1e-9);
        let s = xl4().resolve(None, 100.0);
        assert!((s.font_size * s.line_height - 40.0).abs() < 1e-9);
    }

    #[test]
    fn arbitrary_size_inherits_line_height() {
        let s = px(10.0).resolve(None, 100.0);
        assert_eq!(s.line_height, crate::style::ROOT_LINE_HEIGHT);
    }
}
