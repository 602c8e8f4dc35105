// src/font_config.rs

// Font families and sizes used by the themes.
// Sizes are in points; the renderer converts them to pixels for the target resolution.

/// Font family for the plain theme
pub const FONT_FAMILY_PLAIN: &str = "sans-serif";

/// Font family for the paper theme and TeX output
pub const FONT_FAMILY_PAPER: &str = "serif";

/// Font family for the hand-drawn theme.
/// Humor Sans is rarely installed, so the generic family is requested and the system picks.
pub const FONT_FAMILY_SKETCH: &str = "sans-serif";

/// Represents a font style (family + size in points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStyle {
    pub family: &'static str,
    pub size_pt: f64,
}

impl FontStyle {
    /// Font size in pixels at the given resolution.
    pub fn size_px(&self, dpi: f64) -> f64 {
        self.size_pt * dpi / crate::constants::POINTS_PER_INCH
    }

    /// Tuple form accepted by plotters' `IntoFont`.
    pub fn tuple(&self, dpi: f64) -> (&'static str, f64) {
        (self.family, self.size_px(dpi))
    }
}

pub const FONT_PLAIN: FontStyle = FontStyle {
    family: FONT_FAMILY_PLAIN,
    size_pt: 10.0,
};

pub const FONT_PAPER: FontStyle = FontStyle {
    family: FONT_FAMILY_PAPER,
    size_pt: 8.0,
};

pub const FONT_SKETCH: FontStyle = FontStyle {
    family: FONT_FAMILY_SKETCH,
    size_pt: 14.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_px_scales_with_dpi() {
        assert!((FONT_PLAIN.size_px(72.0) - 10.0).abs() < 1e-12);
        assert!((FONT_PLAIN.size_px(240.0) - 10.0 * 240.0 / 72.0).abs() < 1e-9);
        assert_eq!(FONT_PAPER.tuple(72.0), ("serif", 8.0));
    }
}
