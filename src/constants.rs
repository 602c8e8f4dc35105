// src/constants.rs

use plotters::style::colors::{BLACK, WHITE};
use plotters::style::RGBColor;

// Resolution used to lay out raster and SVG output.
pub const RASTER_DPI: f64 = 240.0;
// Virtual resolution for the TeX backend; pixel geometry is converted back to points on write.
pub const PGF_DPI: f64 = 720.0;
pub const POINTS_PER_INCH: f64 = 72.0;

// Figure sizes in inches (width, height).
pub const FIGSIZE_PLAIN_IN: (f64, f64) = (6.4, 4.8);
pub const FIGSIZE_PAPER_IN: (f64, f64) = (3.5, 2.625);
pub const FIGSIZE_SKETCH_IN: (f64, f64) = (6.0, 4.0);

// Column width of the target paper and the aspect ratio used for the final figure.
pub const PAPER_TEXTWIDTH_IN: f64 = 3.31314;
pub const FINAL_ASPECT_RATIO: f64 = 6.0 / 8.0;
pub const FINAL_SCALE: f64 = 1.0;

// Line widths in points.
pub const LINE_WIDTH_PLAIN_PT: f64 = 1.5;
pub const LINE_WIDTH_PAPER_PT: f64 = 1.0;
pub const LINE_WIDTH_SKETCH_PT: f64 = 2.0;
pub const SPINE_WIDTH_PLAIN_PT: f64 = 0.8;
pub const SPINE_WIDTH_PAPER_PT: f64 = 0.5;
pub const SPINE_WIDTH_SKETCH_PT: f64 = 1.5;
pub const THIN_LINE_WIDTH_PT: f64 = 0.5;
pub const GRID_WIDTH_PT: f64 = 0.5;
pub const SKETCH_UNDERSTROKE_WIDTH_PT: f64 = 4.0;

// Tick mark lengths in points.
pub const TICK_LENGTH_PLAIN_PT: f64 = 3.5;
pub const TICK_LENGTH_PAPER_PT: f64 = 3.0;

// Markers on the focal-loss curves.
pub const MARKER_SIZE_PT: f64 = 4.0;
pub const MARKER_EVERY: usize = 10;

// Arrow head of annotation callouts.
pub const ARROW_HEAD_LENGTH_PT: f64 = 8.0;
pub const ARROW_HEAD_ANGLE_DEG: f64 = 25.0;
pub const ARROW_TEXT_GAP_PT: f64 = 2.0;

// Legend swatch length in points.
pub const LEGEND_SWATCH_LENGTH_PT: f64 = 20.0;
pub const LEGEND_BACKGROUND_ALPHA: f64 = 0.8;

// Relative axis margin used when limits are derived from the data.
pub const AUTO_LIMIT_MARGIN: f64 = 0.05;

// Axes rectangle of the sketch figure in figure fractions (left, bottom, width, height).
pub const SKETCH_AXES_RECT: (f64, f64, f64, f64) = (0.1, 0.2, 0.8, 0.7);

// Hand-drawn path parameters (scale, length, randomness), in points.
pub const SKETCH_SCALE_PT: f64 = 1.0;
pub const SKETCH_LENGTH_PT: f64 = 100.0;
pub const SKETCH_RANDOMNESS: f64 = 2.0;
pub const SKETCH_STEP_PT: f64 = 1.0;
pub const SKETCH_SEED: u64 = 0x5EED_0418;

// --- Focal-loss figure ---
pub const FOCAL_GAMMAS: [f64; 5] = [0.0, 0.5, 1.0, 2.0, 5.0];
pub const FOCAL_SAMPLES: usize = 250;
pub const FOCAL_X_LIMITS: (f64, f64) = (0.0, 1.0);
pub const FOCAL_Y_LIMITS: (f64, f64) = (0.0, 5.5);
pub const EASY_BRACKET_START: (f64, f64) = (0.6, 1.0);
pub const EASY_BRACKET_END: (f64, f64) = (1.0, 1.0);
pub const EASY_BRACKET_TICK: f64 = 0.1;
pub const EASY_LABEL_POS: (f64, f64) = (0.8, 1.15);

// --- Sketch figure ---
pub const SKETCH_DOMAIN: (f64, f64, f64) = (-10.0, 10.0, 0.1);

// --- Noise band figure ---
pub const BAND_SAMPLES: usize = 200;
pub const BAND_NOISE_SCALE: f64 = 0.2;
pub const BAND_OFFSET: f64 = 10.0;
pub const BAND_STD_BASE: f64 = 0.4;
pub const BAND_STD_SPREAD: f64 = 0.2;
pub const BAND_ALPHA: f64 = 0.3;
pub const NOISE_SEED: u64 = 0xC0FFEE;

// --- Colors ---
pub const COLOR_ANNOTATION: RGBColor = BLACK;
pub const COLOR_BACKGROUND: RGBColor = WHITE;
pub const COLOR_LEGEND_EDGE_PLAIN: RGBColor = RGBColor(204, 204, 204);
pub const COLOR_GRID: RGBColor = RGBColor(176, 176, 176);

// Color cycle of the paper theme.
pub const PAPER_COLOR_CYCLE: [RGBColor; 7] = [
    RGBColor(0x0C, 0x5D, 0xA5),
    RGBColor(0x00, 0xB9, 0x45),
    RGBColor(0xFF, 0x95, 0x00),
    RGBColor(0xFF, 0x2C, 0x00),
    RGBColor(0x84, 0x5B, 0x97),
    RGBColor(0x47, 0x47, 0x47),
    RGBColor(0x9E, 0x9E, 0x9E),
];

// --- Output filenames ---
pub const OUTPUT_BASE: &str = "base.png";
pub const OUTPUT_SCIPLOTS: &str = "sciplots.png";
pub const OUTPUT_LEGEND: &str = "legend.png";
pub const OUTPUT_LINEWIDTHS: &str = "linewidths.png";
pub const OUTPUT_PGF: &str = "pgf.pgf";
pub const OUTPUT_FINAL: &str = "final.pgf";
pub const OUTPUT_BANDS: &str = "bands.png";
pub const OUTPUT_FEATURED_PNG: &str = "featured.png";
pub const OUTPUT_FEATURED_SVG: &str = "featured.svg";

// src/constants.rs
