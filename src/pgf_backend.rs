// src/pgf_backend.rs

//! A plotters backend that writes a TeX `pgfpicture`.
//!
//! Pixel coordinates are converted to inches with the backend's resolution, with the y axis
//! flipped so the origin sits at the bottom left as PGF expects. Text is written verbatim
//! inside `\pgftext`, so labels are TeX source and are typeset by the including document.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};

use crate::constants::POINTS_PER_INCH;

// Width of a character relative to the font size, used to estimate text extents.
const CHAR_WIDTH_RATIO: f64 = 0.5;
// Baseline-to-baseline distance relative to the font size.
const LINE_SPACING_RATIO: f64 = 1.2;

pub struct PgfBackend {
    path: PathBuf,
    size: (u32, u32),
    /// Exact picture size; the pixel size is this rounded at `dpi`.
    size_in: (f64, f64),
    dpi: f64,
    body: String,
    saved: bool,
}

impl PgfBackend {
    pub fn new<P: AsRef<Path>>(path: P, size: (u32, u32), dpi: f64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            size,
            size_in: (size.0 as f64 / dpi, size.1 as f64 / dpi),
            dpi,
            body: String::new(),
            saved: false,
        }
    }

    /// Writes the bounding box with the exact size instead of the rounded pixel size.
    pub fn with_size_in(mut self, size_in: (f64, f64)) -> Self {
        self.size_in = size_in;
        self
    }

    // Distance from the bottom edge, in inches.
    fn flip(&self, y: i32) -> f64 {
        self.size_in.1 - self.inches(y as f64)
    }

    fn inches(&self, px: f64) -> f64 {
        px / self.dpi
    }

    fn point(&self, (x, y): BackendCoord) -> String {
        format!(
            "\\pgfqpoint{{{:.6}in}}{{{:.6}in}}",
            self.inches(x as f64),
            self.flip(y)
        )
    }

    fn set_color(&mut self, name: &str, color: &BackendColor) {
        let (r, g, b) = color.rgb;
        let _ = writeln!(
            self.body,
            "\\definecolor{{{name}}}{{rgb}}{{{:.6},{:.6},{:.6}}}%",
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0
        );
    }

    fn begin_stroke<S: BackendStyle>(&mut self, style: &S) {
        let color = style.color();
        self.body.push_str("\\begin{pgfscope}%\n");
        self.set_color("currentstroke", &color);
        self.body.push_str("\\pgfsetstrokecolor{currentstroke}%\n");
        if color.alpha < 1.0 {
            let _ = writeln!(self.body, "\\pgfsetstrokeopacity{{{:.6}}}%", color.alpha);
        }
        let width_pt = style.stroke_width() as f64 * POINTS_PER_INCH / self.dpi;
        let _ = writeln!(self.body, "\\pgfsetlinewidth{{{width_pt:.6}pt}}%");
        self.body.push_str("\\pgfsetroundjoin%\n\\pgfsetroundcap%\n");
    }

    fn begin_fill<S: BackendStyle>(&mut self, style: &S) {
        let color = style.color();
        self.body.push_str("\\begin{pgfscope}%\n");
        self.set_color("currentfill", &color);
        self.body.push_str("\\pgfsetfillcolor{currentfill}%\n");
        if color.alpha < 1.0 {
            let _ = writeln!(self.body, "\\pgfsetfillopacity{{{:.6}}}%", color.alpha);
        }
    }

    fn end_scope(&mut self, action: &str) {
        let _ = writeln!(self.body, "\\pgfusepath{{{action}}}%");
        self.body.push_str("\\end{pgfscope}%\n");
    }

    fn path_commands<I: IntoIterator<Item = BackendCoord>>(&mut self, points: I) -> usize {
        let mut count = 0;
        for p in points {
            let cmd = if count == 0 { "moveto" } else { "lineto" };
            let point = self.point(p);
            let _ = writeln!(self.body, "\\pgfpath{cmd}{{{point}}}%");
            count += 1;
        }
        count
    }

    /// Full document fragment written on `present`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let (w, h) = self.size_in;
        out.push_str("%% Creator: post_figures\n");
        out.push_str("%% Include with \\input{} inside a figure environment.\n");
        out.push_str("\\begingroup%\n\\makeatletter%\n\\begin{pgfpicture}%\n");
        let _ = writeln!(
            out,
            "\\pgfpathrectangle{{\\pgfpointorigin}}{{\\pgfqpoint{{{w:.6}in}}{{{h:.6}in}}}}%"
        );
        out.push_str("\\pgfusepath{use as bounding box, clip}%\n");
        out.push_str(&self.body);
        out.push_str("\\end{pgfpicture}%\n\\makeatother%\n\\endgroup%\n");
        out
    }
}

fn anchor_options(h: HPos, v: VPos) -> &'static str {
    match (h, v) {
        (HPos::Left, VPos::Top) => "left,top",
        (HPos::Left, VPos::Center) => "left",
        (HPos::Left, VPos::Bottom) => "left,base",
        (HPos::Center, VPos::Top) => "top",
        (HPos::Center, VPos::Center) => "",
        (HPos::Center, VPos::Bottom) => "base",
        (HPos::Right, VPos::Top) => "right,top",
        (HPos::Right, VPos::Center) => "right",
        (HPos::Right, VPos::Bottom) => "right,base",
    }
}

fn rotation_deg(transform: &FontTransform) -> i32 {
    match transform {
        FontTransform::None => 0,
        FontTransform::Rotate90 => -90,
        FontTransform::Rotate180 => 180,
        FontTransform::Rotate270 => 90,
    }
}

impl DrawingBackend for PgfBackend {
    type ErrorType = io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        fs::write(&self.path, self.render()).map_err(DrawingErrorKind::DrawingError)?;
        self.saved = true;
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.draw_rect(point, (point.0 + 1, point.1 + 1), &color, true)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        self.draw_path([from, to], style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if style.color().alpha <= 0.0 {
            return Ok(());
        }
        if fill {
            self.begin_fill(style);
        } else {
            self.begin_stroke(style);
        }
        let corner = self.point((upper_left.0, bottom_right.1));
        let w = self.inches((bottom_right.0 - upper_left.0) as f64);
        let h = self.inches((bottom_right.1 - upper_left.1) as f64);
        let _ = writeln!(
            self.body,
            "\\pgfpathrectangle{{{corner}}}{{\\pgfqpoint{{{w:.6}in}}{{{h:.6}in}}}}%"
        );
        self.end_scope(if fill { "fill" } else { "stroke" });
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if style.color().alpha <= 0.0 || style.stroke_width() == 0 {
            return Ok(());
        }
        let points: Vec<BackendCoord> = path.into_iter().collect();
        if points.len() < 2 {
            return Ok(());
        }
        self.begin_stroke(style);
        self.path_commands(points);
        self.end_scope("stroke");
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if style.color().alpha <= 0.0 || radius == 0 {
            return Ok(());
        }
        if fill {
            self.begin_fill(style);
        } else {
            self.begin_stroke(style);
        }
        let point = self.point(center);
        let r = self.inches(radius as f64);
        let _ = writeln!(self.body, "\\pgfpathcircle{{{point}}}{{{r:.6}in}}%");
        self.end_scope(if fill { "fill" } else { "stroke" });
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if style.color().alpha <= 0.0 {
            return Ok(());
        }
        let points: Vec<BackendCoord> = vert.into_iter().collect();
        if points.len() < 3 {
            return Ok(());
        }
        self.begin_fill(style);
        self.path_commands(points);
        self.body.push_str("\\pgfpathclose%\n");
        self.end_scope("fill");
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 || text.is_empty() {
            return Ok(());
        }
        let size_pt = style.size() * POINTS_PER_INCH / self.dpi;
        let anchor = style.anchor();
        let mut options = vec![
            format!("x={:.6}in", self.inches(pos.0 as f64)),
            format!("y={:.6}in", self.flip(pos.1)),
        ];
        let placement = anchor_options(anchor.h_pos, anchor.v_pos);
        if !placement.is_empty() {
            options.push(placement.to_string());
        }
        let rotate = rotation_deg(&style.transform());
        if rotate != 0 {
            options.push(format!("rotate={rotate}"));
        }

        self.set_color("textcolor", &color);
        let _ = writeln!(
            self.body,
            "\\pgftext[{}]{{\\color{{textcolor}}\\rmfamily\\fontsize{{{:.2}}}{{{:.2}}}\\selectfont {}}}%",
            options.join(","),
            size_pt,
            size_pt * LINE_SPACING_RATIO,
            text
        );
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<io::Error>> {
        let visible = tex_visible_len(text);
        let w = (visible as f64 * style.size() * CHAR_WIDTH_RATIO).ceil() as u32;
        let h = style.size().ceil() as u32;
        match style.transform() {
            FontTransform::Rotate90 | FontTransform::Rotate270 => Ok((h, w)),
            _ => Ok((w, h)),
        }
    }
}

impl Drop for PgfBackend {
    fn drop(&mut self) {
        if !self.saved {
            // Drop cannot report errors; call `present` to observe them.
            let _ = self.present();
        }
    }
}

/// Approximate number of typeset glyphs in TeX source: math shifts, braces and control
/// words are not counted, a control word counts as one glyph.
fn tex_visible_len(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' | '{' | '}' | '^' | '_' => {}
            '\\' => {
                while chars.peek().map_or(false, |n| n.is_ascii_alphabetic()) {
                    chars.next();
                }
                count += 1;
            }
            _ => count += 1,
        }
    }
    count
}
