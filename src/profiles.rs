// src/profiles.rs

// Presentation profiles: fixed bundles of cosmetic options, one per output file.

use plotters::style::RGBColor;

use crate::constants::{
    FIGSIZE_PAPER_IN, FIGSIZE_PLAIN_IN, FIGSIZE_SKETCH_IN, FINAL_ASPECT_RATIO, FINAL_SCALE,
    LINE_WIDTH_PAPER_PT, LINE_WIDTH_PLAIN_PT, LINE_WIDTH_SKETCH_PT, OUTPUT_BASE, OUTPUT_FEATURED_PNG,
    OUTPUT_FEATURED_SVG, OUTPUT_FINAL, OUTPUT_LEGEND, OUTPUT_LINEWIDTHS, OUTPUT_PGF, OUTPUT_SCIPLOTS,
    PAPER_COLOR_CYCLE, PAPER_TEXTWIDTH_IN, SKETCH_AXES_RECT, SPINE_WIDTH_PAPER_PT,
    SPINE_WIDTH_PLAIN_PT, SPINE_WIDTH_SKETCH_PT, THIN_LINE_WIDTH_PT, TICK_LENGTH_PAPER_PT,
    TICK_LENGTH_PLAIN_PT,
};
use crate::font_config::{FontStyle, FONT_PAPER, FONT_PLAIN, FONT_SKETCH};

/// How labels are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Unicode text rendered by the backend's fonts.
    Plain,
    /// TeX source, typeset later by the document that includes the figure.
    Tex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Plain,
    Paper,
    Sketch,
}

impl Theme {
    /// Color of the `index`-th series in this theme's cycle.
    pub fn cycle_color(&self, index: usize) -> RGBColor {
        match self {
            Theme::Paper => PAPER_COLOR_CYCLE[index % PAPER_COLOR_CYCLE.len()],
            Theme::Plain | Theme::Sketch => {
                let c = colorous::CATEGORY10[index % colorous::CATEGORY10.len()];
                RGBColor(c.r, c.g, c.b)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendFrame {
    /// Light gray edge over a translucent white background.
    Soft,
    /// No frame and no background.
    Hidden,
    /// Square black edge of the given width in points.
    Square { width_pt: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub theme: Theme,
    pub font: FontStyle,
    pub size_in: (f64, f64),
    pub line_width_pt: f64,
    pub spine_width_pt: f64,
    pub tick_width_pt: f64,
    pub tick_length_pt: f64,
    pub show_ticks: bool,
    pub grid: bool,
    pub legend: LegendFrame,
    pub text: TextMode,
    pub sketch: bool,
    /// Axes rectangle in figure fractions (left, bottom, width, height).
    /// `None` lets the chart builder reserve room for tick labels.
    pub axes_rect: Option<(f64, f64, f64, f64)>,
}

impl FigureStyle {
    /// Library defaults: sans-serif text, category-10 colors, soft legend frame.
    pub fn plain() -> Self {
        Self {
            theme: Theme::Plain,
            font: FONT_PLAIN,
            size_in: FIGSIZE_PLAIN_IN,
            line_width_pt: LINE_WIDTH_PLAIN_PT,
            spine_width_pt: SPINE_WIDTH_PLAIN_PT,
            tick_width_pt: SPINE_WIDTH_PLAIN_PT,
            tick_length_pt: TICK_LENGTH_PLAIN_PT,
            show_ticks: true,
            grid: false,
            legend: LegendFrame::Soft,
            text: TextMode::Plain,
            sketch: false,
            axes_rect: None,
        }
    }

    /// Journal look: serif text, thin spines, grid, frameless legend, single-column size.
    pub fn paper() -> Self {
        Self {
            theme: Theme::Paper,
            font: FONT_PAPER,
            size_in: FIGSIZE_PAPER_IN,
            line_width_pt: LINE_WIDTH_PAPER_PT,
            spine_width_pt: SPINE_WIDTH_PAPER_PT,
            tick_width_pt: SPINE_WIDTH_PAPER_PT,
            tick_length_pt: TICK_LENGTH_PAPER_PT,
            show_ticks: true,
            grid: true,
            legend: LegendFrame::Hidden,
            text: TextMode::Plain,
            sketch: false,
            axes_rect: None,
        }
    }

    /// Hand-drawn look without ticks.
    pub fn sketch() -> Self {
        Self {
            theme: Theme::Sketch,
            font: FONT_SKETCH,
            size_in: FIGSIZE_SKETCH_IN,
            line_width_pt: LINE_WIDTH_SKETCH_PT,
            spine_width_pt: SPINE_WIDTH_SKETCH_PT,
            tick_width_pt: SPINE_WIDTH_SKETCH_PT,
            tick_length_pt: 0.0,
            show_ticks: false,
            grid: false,
            legend: LegendFrame::Hidden,
            text: TextMode::Plain,
            sketch: true,
            axes_rect: Some(SKETCH_AXES_RECT),
        }
    }

    pub fn with_square_legend(mut self) -> Self {
        self.legend = LegendFrame::Square {
            width_pt: THIN_LINE_WIDTH_PT,
        };
        self
    }

    pub fn with_thin_spines(mut self) -> Self {
        self.spine_width_pt = THIN_LINE_WIDTH_PT;
        self.tick_width_pt = THIN_LINE_WIDTH_PT;
        self
    }

    pub fn with_tex_text(mut self) -> Self {
        self.text = TextMode::Tex;
        self
    }

    pub fn with_size(mut self, size_in: (f64, f64)) -> Self {
        self.size_in = size_in;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Base,
    SciencePlots,
    Legend,
    Linewidths,
    Pgf,
    Final,
    Xkcd,
}

impl Profile {
    /// Profiles applied to the focal-loss figure, in generation order.
    pub const FOCAL: [Profile; 6] = [
        Profile::Base,
        Profile::SciencePlots,
        Profile::Legend,
        Profile::Linewidths,
        Profile::Pgf,
        Profile::Final,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Profile::Base => "base",
            Profile::SciencePlots => "sciplots",
            Profile::Legend => "legend",
            Profile::Linewidths => "linewidths",
            Profile::Pgf => "pgf",
            Profile::Final => "final",
            Profile::Xkcd => "xkcd",
        }
    }

    /// Files written for this profile; each extension selects its backend.
    pub fn output_files(&self) -> &'static [&'static str] {
        match self {
            Profile::Base => &[OUTPUT_BASE],
            Profile::SciencePlots => &[OUTPUT_SCIPLOTS],
            Profile::Legend => &[OUTPUT_LEGEND],
            Profile::Linewidths => &[OUTPUT_LINEWIDTHS],
            Profile::Pgf => &[OUTPUT_PGF],
            Profile::Final => &[OUTPUT_FINAL],
            Profile::Xkcd => &[OUTPUT_FEATURED_PNG, OUTPUT_FEATURED_SVG],
        }
    }

    pub fn style(&self) -> FigureStyle {
        match self {
            Profile::Base => FigureStyle::plain(),
            Profile::SciencePlots => FigureStyle::paper(),
            Profile::Legend => FigureStyle::paper().with_square_legend(),
            Profile::Linewidths => FigureStyle::paper().with_square_legend().with_thin_spines(),
            Profile::Pgf => FigureStyle::paper()
                .with_square_legend()
                .with_thin_spines()
                .with_tex_text(),
            Profile::Final => FigureStyle::paper()
                .with_square_legend()
                .with_thin_spines()
                .with_tex_text()
                .with_size(final_figure_size()),
            Profile::Xkcd => FigureStyle::sketch(),
        }
    }
}

/// Publication size: the paper's column width at the fixed aspect ratio.
pub fn final_figure_size() -> (f64, f64) {
    let width = PAPER_TEXTWIDTH_IN * FINAL_SCALE;
    (width, width * FINAL_ASPECT_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_size_follows_column_width() {
        let (w, h) = final_figure_size();
        assert!((w - 3.31314).abs() < 1e-12);
        assert!((h - 3.31314 * 0.75).abs() < 1e-12);
        assert_eq!(Profile::Final.style().size_in, (w, h));
    }

    #[test]
    fn profiles_layer_options() {
        assert_eq!(Profile::SciencePlots.style().legend, LegendFrame::Hidden);
        assert_eq!(
            Profile::Legend.style().legend,
            LegendFrame::Square { width_pt: 0.5 }
        );
        assert_eq!(Profile::Linewidths.style().spine_width_pt, 0.5);
        assert_eq!(Profile::Pgf.style().text, TextMode::Tex);
        assert_eq!(Profile::Base.style().text, TextMode::Plain);
        assert!(Profile::Xkcd.style().sketch);
        assert!(!Profile::Xkcd.style().show_ticks);
    }

    #[test]
    fn output_extensions_match_profiles() {
        for profile in Profile::FOCAL {
            let files = profile.output_files();
            assert_eq!(files.len(), 1);
            let expected = if profile.style().text == TextMode::Tex {
                ".pgf"
            } else {
                ".png"
            };
            assert!(files[0].ends_with(expected), "{}", files[0]);
            assert!(files[0].starts_with(profile.name()));
        }
        assert_eq!(
            Profile::Xkcd.output_files(),
            &["featured.png", "featured.svg"][..]
        );
    }

    #[test]
    fn theme_colors_cycle() {
        assert_eq!(Theme::Paper.cycle_color(0), Theme::Paper.cycle_color(7));
        assert_eq!(Theme::Plain.cycle_color(0), RGBColor(0x1f, 0x77, 0xb4));
    }
}
