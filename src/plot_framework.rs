// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::{ChartBuilder, ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Polygon, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, TRANSPARENT, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontTransform, IntoFont, RGBColor, ShapeStyle, TextStyle};

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::constants::{
    ARROW_HEAD_ANGLE_DEG, ARROW_HEAD_LENGTH_PT, ARROW_TEXT_GAP_PT, AUTO_LIMIT_MARGIN, BAND_ALPHA,
    COLOR_ANNOTATION, COLOR_BACKGROUND, COLOR_GRID, COLOR_LEGEND_EDGE_PLAIN, GRID_WIDTH_PT,
    LEGEND_BACKGROUND_ALPHA, LEGEND_SWATCH_LENGTH_PT, MARKER_SIZE_PT, PGF_DPI, POINTS_PER_INCH,
    RASTER_DPI, SKETCH_UNDERSTROKE_WIDTH_PT, SPINE_WIDTH_PLAIN_PT,
};
use crate::markers::{marker_indices, LegendSwatch, Marker, MarkerElement};
use crate::pgf_backend::PgfBackend;
use crate::profiles::{FigureStyle, LegendFrame};
use crate::sketch::{to_pixels, SketchParams, Sketcher};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// One plotted sequence and the styling attached to it.
#[derive(Clone, Debug)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    /// `None` takes the theme's cycle color for the series position.
    pub color: Option<RGBColor>,
    /// Line width in points; `None` takes the theme's width.
    pub line_width_pt: Option<f64>,
    pub marker: Option<Marker>,
    pub marker_every: usize,
    /// Shaded band as (x, lower, upper).
    pub band: Option<Vec<(f64, f64, f64)>>,
}

impl PlotSeries {
    pub fn line(data: Vec<(f64, f64)>, label: impl Into<String>) -> Self {
        Self {
            data,
            label: label.into(),
            color: None,
            line_width_pt: None,
            marker: None,
            marker_every: 1,
            band: None,
        }
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_marker(mut self, marker: Marker, every: usize) -> Self {
        self.marker = Some(marker);
        self.marker_every = every;
        self
    }

    pub fn with_band(mut self, band: Vec<(f64, f64, f64)>) -> Self {
        self.band = Some(band);
        self
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

pub fn text_pos(h: HAlign, v: VAlign) -> Pos {
    let h_pos = match h {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v_pos = match v {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    Pos::new(h_pos, v_pos)
}

/// Decorations drawn on top of the series, in data coordinates.
#[derive(Clone, Debug)]
pub enum Annotation {
    /// Black polyline of the given width in points.
    Line {
        points: Vec<(f64, f64)>,
        width_pt: f64,
    },
    /// Free text anchored at a point.
    Label {
        text: String,
        at: (f64, f64),
        h_align: HAlign,
        v_align: VAlign,
    },
    /// Text at `text_at` with an open arrow pointing at `target`.
    Arrow {
        text: String,
        target: (f64, f64),
        text_at: (f64, f64),
    },
}

/// Everything needed to draw one figure, independent of the presentation profile.
#[derive(Clone, Debug)]
pub struct FigureSpec {
    pub series: Vec<PlotSeries>,
    pub annotations: Vec<Annotation>,
    pub x_label: String,
    /// May span several lines separated by `\n`.
    pub y_label: String,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    pub legend: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Pgf,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("svg") => Ok(OutputFormat::Svg),
            Some("pgf") => Ok(OutputFormat::Pgf),
            _ => Err(format!(
                "Unsupported output format for '{}': expected .png, .svg or .pgf",
                path.display()
            )
            .into()),
        }
    }

    /// Resolution used to lay the figure out in pixels.
    pub fn dpi(&self) -> f64 {
        match self {
            OutputFormat::Png | OutputFormat::Svg => RASTER_DPI,
            OutputFormat::Pgf => PGF_DPI,
        }
    }
}

/// Pixel geometry of a figure at a given resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub dpi: f64,
    pub size_px: (u32, u32),
}

impl Canvas {
    pub fn new(size_in: (f64, f64), dpi: f64) -> Self {
        Self {
            dpi,
            size_px: (
                (size_in.0 * dpi).round() as u32,
                (size_in.1 * dpi).round() as u32,
            ),
        }
    }

    pub fn px(&self, pt: f64) -> f64 {
        pt * self.dpi / POINTS_PER_INCH
    }

    /// Stroke width in whole pixels, never thinner than one pixel.
    pub fn stroke(&self, pt: f64) -> u32 {
        self.px(pt).round().max(1.0) as u32
    }
}

/// Pads a range by `fraction` of its span on both sides, or by 0.5 for degenerate ranges.
pub fn padded_range(min_val: f64, max_val: f64, fraction: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * fraction };
    (min - padding, max + padding)
}

/// Minimum and maximum of the finite values, or `None` if there are none.
pub fn finite_extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let finite: Array1<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    let min = *finite.min().ok()?;
    let max = *finite.max().ok()?;
    Some((min, max))
}

/// Axis ranges: explicit limits when given, otherwise the padded extent of every series.
pub fn axis_ranges(figure: &FigureSpec) -> (Range<f64>, Range<f64>) {
    let xs = figure
        .series
        .iter()
        .flat_map(|s| s.data.iter().map(|p| p.0));
    let ys = figure.series.iter().flat_map(|s| {
        let band = s
            .band
            .iter()
            .flat_map(|b| b.iter().flat_map(|&(_, lo, hi)| [lo, hi]));
        s.data.iter().map(|p| p.1).chain(band)
    });

    let resolve = |limits: Option<(f64, f64)>, extent: Option<(f64, f64)>| -> Range<f64> {
        match (limits, extent) {
            (Some((lo, hi)), _) => lo..hi,
            (None, Some((lo, hi))) => {
                let (lo, hi) = padded_range(lo, hi, AUTO_LIMIT_MARGIN);
                lo..hi
            }
            (None, None) => 0.0..1.0,
        }
    };

    (
        resolve(figure.x_limits, finite_extent(xs)),
        resolve(figure.y_limits, finite_extent(ys)),
    )
}

/// Clips the segment `p0 -> p1` to the axis box (Liang-Barsky).
/// Unclipped end points are returned unchanged.
pub fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    x: &Range<f64>,
    y: &Range<f64>,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-dx, p0.0 - x.start),
        (dx, x.end - p0.0),
        (-dy, p0.1 - y.start),
        (dy, y.end - p0.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let start = if t0 > 0.0 {
        (p0.0 + t0 * dx, p0.1 + t0 * dy)
    } else {
        p0
    };
    let end = if t1 < 1.0 {
        (p0.0 + t1 * dx, p0.1 + t1 * dy)
    } else {
        p1
    };
    Some((start, end))
}

/// Splits a polyline into the runs visible inside the axis box.
/// Non-finite samples break the line.
pub fn clip_polyline(
    points: &[(f64, f64)],
    x: &Range<f64>,
    y: &Range<f64>,
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let finite = |p: &(f64, f64)| p.0.is_finite() && p.1.is_finite();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let clipped = if finite(&a) && finite(&b) {
            clip_segment(a, b, x, y)
        } else {
            None
        };
        match clipped {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.push(start);
                }
                current.push(end);
                if end != b {
                    runs.push(std::mem::take(&mut current));
                }
            }
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn contains(x: &Range<f64>, y: &Range<f64>, p: &(f64, f64)) -> bool {
    p.0 >= x.start && p.0 <= x.end && p.1 >= y.start && p.1 <= y.end
}

/// Tick label text: integers without decimals, everything else with one decimal.
pub fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

fn text_style<'a>(style: &'a FigureStyle, canvas: &Canvas) -> TextStyle<'a> {
    style.font.tuple(canvas.dpi).into_font().color(&BLACK)
}

/// Draws the figure onto `root` using an explicit chart handle; nothing is kept between calls.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &FigureSpec,
    style: &FigureStyle,
    canvas: &Canvas,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&COLOR_BACKGROUND)?;
    let (x_range, y_range) = axis_ranges(figure);
    let font_px = style.font.size_px(canvas.dpi);
    let mut sketcher = if style.sketch {
        Some(Sketcher::new(SketchParams::at_dpi(canvas.dpi)))
    } else {
        None
    };

    let plot_area = match style.axes_rect {
        Some((left, bottom, width, height)) => {
            let (w, h) = (canvas.size_px.0 as f64, canvas.size_px.1 as f64);
            root.margin(
                (h * (1.0 - bottom - height)).round() as i32,
                (h * bottom).round() as i32,
                (w * left).round() as i32,
                (w * (1.0 - left - width)).round() as i32,
            )
        }
        None => root.clone(),
    };

    let mut builder = ChartBuilder::on(&plot_area);
    if style.axes_rect.is_none() {
        builder
            .margin((font_px * 0.8).round() as i32)
            .x_label_area_size((font_px * 3.0).round() as i32)
            .y_label_area_size((font_px * 3.5).round() as i32);
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

    if style.show_ticks {
        draw_axes(&mut chart, figure, style, canvas, &x_range, &y_range)?;
    }

    for (index, series) in figure.series.iter().enumerate() {
        draw_series(
            &mut chart,
            root,
            series,
            index,
            style,
            canvas,
            sketcher.as_mut(),
            &x_range,
            &y_range,
        )?;
    }

    if !style.show_ticks {
        draw_bare_frame(&chart, root, figure, style, canvas, sketcher.as_mut())?;
    }

    for annotation in &figure.annotations {
        draw_annotation(&mut chart, root, annotation, style, canvas, sketcher.as_mut())?;
    }

    if figure.legend && figure.series.iter().any(|s| !s.label.is_empty()) {
        let (background, border): (ShapeStyle, ShapeStyle) = match style.legend {
            LegendFrame::Soft => (
                WHITE.mix(LEGEND_BACKGROUND_ALPHA).filled(),
                COLOR_LEGEND_EDGE_PLAIN.stroke_width(canvas.stroke(SPINE_WIDTH_PLAIN_PT)),
            ),
            LegendFrame::Hidden => (TRANSPARENT.filled(), TRANSPARENT.stroke_width(0)),
            LegendFrame::Square { width_pt } => (
                WHITE.mix(LEGEND_BACKGROUND_ALPHA).filled(),
                BLACK.stroke_width(canvas.stroke(width_pt)),
            ),
        };
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .legend_area_size(canvas.px(LEGEND_SWATCH_LENGTH_PT).round() as i32)
            .margin((font_px * 0.5).round() as i32)
            .background_style(background)
            .border_style(border)
            .label_font(style.font.tuple(canvas.dpi))
            .draw()?;
    }

    Ok(())
}

fn draw_axes<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    figure: &FigureSpec,
    style: &FigureStyle,
    canvas: &Canvas,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let spine = BLACK.stroke_width(canvas.stroke(style.spine_width_pt));
    let tick_formatter = |v: &f64| format_tick(*v);
    let y_desc = figure.y_label.replace('\n', " ");

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(y_desc.as_str())
            .x_labels(6)
            .y_labels(7)
            .x_label_formatter(&tick_formatter)
            .y_label_formatter(&tick_formatter)
            .label_style(style.font.tuple(canvas.dpi))
            .axis_desc_style(style.font.tuple(canvas.dpi))
            .axis_style(BLACK.stroke_width(canvas.stroke(style.tick_width_pt)))
            .set_all_tick_mark_size(canvas.px(style.tick_length_pt).round() as i32);
        if style.grid {
            mesh.bold_line_style(COLOR_GRID.stroke_width(canvas.stroke(GRID_WIDTH_PT)))
                .light_line_style(TRANSPARENT);
        } else {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    // The mesh only draws the left and bottom axes.
    let (x0, x1, y0, y1) = (x_range.start, x_range.end, y_range.start, y_range.end);
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x0, y0), (x0, y1), (x1, y1), (x1, y0), (x0, y0)],
        spine,
    )))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_series<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    root: &DrawingArea<DB, Shift>,
    series: &PlotSeries,
    index: usize,
    style: &FigureStyle,
    canvas: &Canvas,
    sketcher: Option<&mut Sketcher>,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let color = series
        .color
        .unwrap_or_else(|| style.theme.cycle_color(index));
    let width = canvas.stroke(series.line_width_pt.unwrap_or(style.line_width_pt));
    let line_style = color.stroke_width(width);

    // Bands go first so the line stays on top.
    if let Some(band) = &series.band {
        let outline: Vec<(f64, f64)> = band
            .iter()
            .map(|&(x, _, hi)| (x, hi))
            .chain(band.iter().rev().map(|&(x, lo, _)| (x, lo)))
            .filter(|p| p.0.is_finite() && p.1.is_finite())
            .collect();
        if outline.len() >= 3 {
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                color.mix(BAND_ALPHA).filled(),
            )))?;
        }
    }

    let runs = clip_polyline(&series.data, x_range, y_range);
    match sketcher {
        Some(sketcher) => {
            let under = WHITE.stroke_width(canvas.stroke(SKETCH_UNDERSTROKE_WIDTH_PT));
            for run in &runs {
                let pixels: Vec<(f64, f64)> = run
                    .iter()
                    .map(|p| {
                        let (px, py) = chart.backend_coord(p);
                        (px as f64, py as f64)
                    })
                    .collect();
                let path = to_pixels(&sketcher.sketch(&pixels));
                root.draw(&PathElement::new(path.clone(), under))?;
                root.draw(&PathElement::new(path, line_style))?;
            }
        }
        None => {
            for run in runs {
                chart.draw_series(LineSeries::new(run, line_style))?;
            }
        }
    }

    let half_px = canvas.px(MARKER_SIZE_PT) / 2.0;
    if let Some(marker) = series.marker {
        let marked: Vec<(f64, f64)> = marker_indices(series.data.len(), series.marker_every)
            .map(|i| series.data[i])
            .filter(|p| p.0.is_finite() && p.1.is_finite() && contains(x_range, y_range, p))
            .collect();
        chart.draw_series(
            marked
                .into_iter()
                .map(|p| MarkerElement::new(p, marker, half_px, line_style)),
        )?;
    }

    if !series.label.is_empty() {
        let swatch = canvas.px(LEGEND_SWATCH_LENGTH_PT).round() as i32;
        let marker = series.marker;
        chart
            .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
            .label(series.label.as_str())
            .legend(move |(x, y)| LegendSwatch::new((x, y), swatch, marker, half_px, line_style));
    }
    Ok(())
}

/// Spines and axis labels for styles without ticks. Spines follow the sketch when one is active.
fn draw_bare_frame<DB: DrawingBackend>(
    chart: &Chart<'_, DB>,
    root: &DrawingArea<DB, Shift>,
    figure: &FigureSpec,
    style: &FigureStyle,
    canvas: &Canvas,
    mut sketcher: Option<&mut Sketcher>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (x_range, y_range) = (chart.x_range(), chart.y_range());
    let corner = |x: f64, y: f64| {
        let (px, py) = chart.backend_coord(&(x, y));
        (px as f64, py as f64)
    };
    let bottom_left = corner(x_range.start, y_range.start);
    let top_left = corner(x_range.start, y_range.end);
    let top_right = corner(x_range.end, y_range.end);
    let bottom_right = corner(x_range.end, y_range.start);

    let spine = BLACK.stroke_width(canvas.stroke(style.spine_width_pt));
    let sides = [
        [bottom_left, top_left],
        [top_left, top_right],
        [top_right, bottom_right],
        [bottom_right, bottom_left],
    ];
    for side in sides {
        let path = match sketcher.as_deref_mut() {
            Some(s) => s.sketch(&side),
            None => side.to_vec(),
        };
        root.draw(&PathElement::new(to_pixels(&path), spine))?;
    }

    let font = text_style(style, canvas);
    let font_px = style.font.size_px(canvas.dpi);
    let gap = font_px * 0.6;

    let x_center = ((bottom_left.0 + bottom_right.0) / 2.0).round() as i32;
    root.draw(&Text::new(
        figure.x_label.clone(),
        (x_center, (bottom_left.1 + gap).round() as i32),
        font.pos(Pos::new(HPos::Center, VPos::Top)),
    ))?;

    let lines: Vec<&str> = figure.y_label.lines().collect();
    let y_center = ((bottom_left.1 + top_left.1) / 2.0).round() as i32;
    let line_height = font_px * 1.2;
    let rotated = font
        .transform(FontTransform::Rotate270)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for (i, line) in lines.iter().enumerate() {
        let offset = (lines.len() - 1 - i) as f64 * line_height;
        let x = (bottom_left.0 - gap - offset).round() as i32;
        root.draw(&Text::new(line.to_string(), (x, y_center), rotated.clone()))?;
    }
    Ok(())
}

fn draw_annotation<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    root: &DrawingArea<DB, Shift>,
    annotation: &Annotation,
    style: &FigureStyle,
    canvas: &Canvas,
    sketcher: Option<&mut Sketcher>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let font = text_style(style, canvas);
    match annotation {
        Annotation::Line { points, width_pt } => {
            chart.draw_series(std::iter::once(PathElement::new(
                points.clone(),
                COLOR_ANNOTATION.stroke_width(canvas.stroke(*width_pt)),
            )))?;
        }
        Annotation::Label {
            text,
            at,
            h_align,
            v_align,
        } => {
            chart.draw_series(std::iter::once(Text::new(
                text.clone(),
                *at,
                font.pos(text_pos(*h_align, *v_align)),
            )))?;
        }
        Annotation::Arrow {
            text,
            target,
            text_at,
        } => {
            let anchor = chart.backend_coord(text_at);
            let tip = chart.backend_coord(target);
            let text_font = font.pos(Pos::new(HPos::Left, VPos::Bottom));
            let (w, h) = root.estimate_text_size(text, &text_font)?;
            root.draw(&Text::new(text.clone(), anchor, text_font))?;

            let shaft = arrow_shaft(
                anchor,
                (w as f64, h as f64),
                tip,
                canvas.px(ARROW_TEXT_GAP_PT),
            );
            let line_style = COLOR_ANNOTATION.stroke_width(canvas.stroke(style.spine_width_pt));
            let head = arrow_head(shaft[0], shaft[1], canvas.px(ARROW_HEAD_LENGTH_PT));
            let (shaft, head) = match sketcher {
                Some(s) => (s.sketch(&shaft), head.map(|h| s.sketch(&h))),
                None => (shaft.to_vec(), head.map(|h| h.to_vec())),
            };
            root.draw(&PathElement::new(to_pixels(&shaft), line_style))?;
            for barb in head {
                root.draw(&PathElement::new(to_pixels(&barb), line_style))?;
            }
        }
    }
    Ok(())
}

/// Arrow shaft from the edge of the text box (left/baseline anchored at `anchor`) to `tip`.
pub fn arrow_shaft(
    anchor: (i32, i32),
    text_size: (f64, f64),
    tip: (i32, i32),
    gap: f64,
) -> [(f64, f64); 2] {
    let (w, h) = text_size;
    let center = (anchor.0 as f64 + w / 2.0, anchor.1 as f64 - h / 2.0);
    let tip = (tip.0 as f64, tip.1 as f64);
    let (dx, dy) = (tip.0 - center.0, tip.1 - center.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-9 {
        return [center, tip];
    }
    let tx = if dx.abs() > 1e-9 { (w / 2.0) / dx.abs() } else { f64::INFINITY };
    let ty = if dy.abs() > 1e-9 { (h / 2.0) / dy.abs() } else { f64::INFINITY };
    let t = (tx.min(ty) + gap / len).min(1.0);
    [(center.0 + dx * t, center.1 + dy * t), tip]
}

/// Two barbs of an open arrow head at `tip`, pointing away from `from`.
pub fn arrow_head(from: (f64, f64), tip: (f64, f64), length: f64) -> [[(f64, f64); 2]; 2] {
    let angle = (from.1 - tip.1).atan2(from.0 - tip.0);
    let spread = ARROW_HEAD_ANGLE_DEG.to_radians();
    let barb = |a: f64| [(tip.0 + length * a.cos(), tip.1 + length * a.sin()), tip];
    [barb(angle + spread), barb(angle - spread)]
}

/// Renders `figure` with `style` into `path`. The extension picks the backend.
pub fn render_figure(
    figure: &FigureSpec,
    style: &FigureStyle,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let format = OutputFormat::from_path(path)?;
    let canvas = Canvas::new(style.size_in, format.dpi());

    match format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, canvas.size_px).into_drawing_area();
            draw_figure(&root, figure, style, &canvas)?;
            root.present()?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, canvas.size_px).into_drawing_area();
            draw_figure(&root, figure, style, &canvas)?;
            root.present()?;
        }
        OutputFormat::Pgf => {
            let root = PgfBackend::new(path, canvas.size_px, canvas.dpi)
                .with_size_in(style.size_in)
                .into_drawing_area();
            draw_figure(&root, figure, style, &canvas)?;
            root.present()?;
        }
    }

    println!("  Figure saved as '{}'.", path.display());
    Ok(())
}

/// Renders the same figure into each named file under `out_dir`.
pub fn render_to_files(
    figure: &FigureSpec,
    style: &FigureStyle,
    out_dir: &Path,
    files: &[&str],
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(file);
        render_figure(figure, style, &path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_handles_order_and_degenerate_spans() {
        assert_eq!(padded_range(0.0, 10.0, 0.05), (-0.5, 10.5));
        assert_eq!(padded_range(10.0, 0.0, 0.05), (-0.5, 10.5));
        assert_eq!(padded_range(2.0, 2.0, 0.05), (1.5, 2.5));
    }

    #[test]
    fn finite_extent_ignores_infinities() {
        let extent = finite_extent(vec![f64::INFINITY, 1.0, -2.0, f64::NAN, 3.0]);
        assert_eq!(extent, Some((-2.0, 3.0)));
        assert_eq!(finite_extent(vec![f64::INFINITY]), None);
    }

    #[test]
    fn clip_keeps_inside_segments_exactly() {
        let x = 0.0..1.0;
        let y = 0.0..1.0;
        let pts = vec![(0.1, 0.1), (0.5, 0.7), (0.9, 0.2)];
        let runs = clip_polyline(&pts, &x, &y);
        assert_eq!(runs, vec![pts]);
    }

    #[test]
    fn clip_trims_segments_leaving_the_box() {
        let x = 0.0..1.0;
        let y = 0.0..1.0;
        let runs = clip_polyline(&[(0.0, 2.0), (0.5, 0.5), (1.0, 0.5)], &x, &y);
        assert_eq!(runs.len(), 1);
        let first = runs[0][0];
        assert!((first.1 - 1.0).abs() < 1e-12);
        assert!((first.0 - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(*runs[0].last().unwrap(), (1.0, 0.5));
    }

    #[test]
    fn clip_breaks_on_non_finite_and_outside_runs() {
        let x = 0.0..1.0;
        let y = 0.0..1.0;
        let pts = [
            (0.0, f64::INFINITY),
            (0.1, 0.5),
            (0.2, 0.5),
            (0.3, 5.0),
            (0.4, 5.0),
            (0.5, 0.5),
            (0.6, 0.5),
        ];
        let runs = clip_polyline(&pts, &x, &y);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0][0], (0.1, 0.5));
        assert_eq!(*runs[1].last().unwrap(), (0.6, 0.5));
        assert!(clip_segment((2.0, 2.0), (3.0, 3.0), &x, &y).is_none());
    }

    #[test]
    fn format_tick_drops_decimals_for_integers() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(5.0), "5");
        assert_eq!(format_tick(0.2), "0.2");
        assert_eq!(format_tick(-1.5), "-1.5");
    }

    #[test]
    fn output_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.SVG")).unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("x/final.pgf")).unwrap(), OutputFormat::Pgf);
        assert!(OutputFormat::from_path(Path::new("a.pdf")).is_err());
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn canvas_converts_points_to_pixels() {
        let canvas = Canvas::new((6.4, 4.8), 240.0);
        assert_eq!(canvas.size_px, (1536, 1152));
        assert!((canvas.px(72.0) - 240.0).abs() < 1e-9);
        assert_eq!(canvas.stroke(0.1), 1);
        assert_eq!(canvas.stroke(1.5), 5);
    }

    #[test]
    fn arrow_starts_outside_the_text_box() {
        let [start, tip] = arrow_shaft((0, 100), (200.0, 20.0), (400, 90), 0.0);
        assert_eq!(tip, (400.0, 90.0));
        // Box spans x in [0, 200]; the shaft leaves through its right edge.
        assert!((start.0 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn arrow_head_barbs_have_requested_length() {
        let head = arrow_head((0.0, 0.0), (100.0, 0.0), 10.0);
        for barb in head {
            let (dx, dy) = (barb[0].0 - barb[1].0, barb[0].1 - barb[1].1);
            assert!(((dx * dx + dy * dy).sqrt() - 10.0).abs() < 1e-9);
            assert!(barb[0].0 < 100.0);
        }
    }

    #[test]
    fn annotations_are_debuggable_and_aligned() {
        let label = Annotation::Label {
            text: "easy objects".to_string(),
            at: (0.8, 1.15),
            h_align: HAlign::Center,
            v_align: VAlign::Bottom,
        };
        let shown = format!("{label:?}");
        assert!(shown.contains("Center") && shown.contains("Bottom"), "{shown}");

        let pos = text_pos(HAlign::Right, VAlign::Top);
        assert!(matches!(pos.h_pos, HPos::Right));
        assert!(matches!(pos.v_pos, VPos::Top));
    }

    #[test]
    fn axis_ranges_prefer_explicit_limits() {
        let figure = FigureSpec {
            series: vec![PlotSeries::line(vec![(0.0, 0.0), (10.0, 2.0)], "")],
            annotations: vec![],
            x_label: String::new(),
            y_label: String::new(),
            x_limits: Some((0.0, 1.0)),
            y_limits: None,
            legend: false,
        };
        let (x, y) = axis_ranges(&figure);
        assert_eq!(x, 0.0..1.0);
        assert!((y.start + 0.1).abs() < 1e-12);
        assert!((y.end - 2.1).abs() < 1e-12);
    }
}
