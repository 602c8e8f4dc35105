// src/markers.rs

use plotters::element::{Drawable, PointCollection};
use plotters::style::ShapeStyle;
use plotters_backend::{BackendCoord, DrawingBackend, DrawingErrorKind};

/// Marker glyphs used on the focal-loss curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Plus,
    Cross,
    ThinDiamond,
    Point,
    Star,
}

impl Marker {
    /// Glyphs in the order they are assigned to the decay exponents.
    pub const CYCLE: [Marker; 5] = [
        Marker::Plus,
        Marker::Cross,
        Marker::ThinDiamond,
        Marker::Point,
        Marker::Star,
    ];

    pub fn symbol(&self) -> char {
        match self {
            Marker::Plus => '+',
            Marker::Cross => 'x',
            Marker::ThinDiamond => 'd',
            Marker::Point => '.',
            Marker::Star => '*',
        }
    }

    /// Stroked glyphs are drawn as line segments, the others as filled shapes.
    pub fn is_stroked(&self) -> bool {
        matches!(self, Marker::Plus | Marker::Cross)
    }

    /// Outline offsets for a glyph of the given half size in pixels.
    /// Stroked markers return one segment per stroke; filled markers return a single polygon.
    pub fn outline(&self, half: f64) -> Vec<Vec<(f64, f64)>> {
        match self {
            Marker::Plus => vec![
                vec![(-half, 0.0), (half, 0.0)],
                vec![(0.0, -half), (0.0, half)],
            ],
            Marker::Cross => {
                let d = half * std::f64::consts::FRAC_1_SQRT_2;
                vec![vec![(-d, -d), (d, d)], vec![(-d, d), (d, -d)]]
            }
            Marker::ThinDiamond => vec![vec![
                (0.0, -half),
                (0.6 * half, 0.0),
                (0.0, half),
                (-0.6 * half, 0.0),
            ]],
            // Drawn as a circle; the outline only describes its extent.
            Marker::Point => vec![vec![(-half / 2.0, 0.0), (half / 2.0, 0.0)]],
            Marker::Star => {
                let inner = half * 0.381_966;
                let outline = (0..10)
                    .map(|i| {
                        let r = if i % 2 == 0 { half } else { inner };
                        let angle = std::f64::consts::FRAC_PI_2
                            + i as f64 * std::f64::consts::PI / 5.0;
                        (r * angle.cos(), -r * angle.sin())
                    })
                    .collect();
                vec![outline]
            }
        }
    }
}

/// A marker glyph anchored at one coordinate, usable with `chart.draw_series`.
pub struct MarkerElement<Coord> {
    center: Coord,
    marker: Marker,
    half_px: f64,
    style: ShapeStyle,
}

impl<Coord> MarkerElement<Coord> {
    pub fn new(center: Coord, marker: Marker, half_px: f64, style: ShapeStyle) -> Self {
        Self {
            center,
            marker,
            half_px,
            style,
        }
    }
}

impl<'a, Coord: 'a> PointCollection<'a, Coord> for &'a MarkerElement<Coord> {
    type Point = &'a Coord;
    type IntoIter = std::iter::Once<&'a Coord>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.center)
    }
}

impl<Coord, DB: DrawingBackend> Drawable<DB> for MarkerElement<Coord> {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        mut points: I,
        backend: &mut DB,
        _parent_dim: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let (cx, cy) = match points.next() {
            Some(p) => p,
            None => return Ok(()),
        };
        let shift = |&(dx, dy): &(f64, f64)| (cx + dx.round() as i32, cy + dy.round() as i32);

        match self.marker {
            Marker::Point => {
                let radius = (self.half_px / 2.0).round().max(1.0) as u32;
                backend.draw_circle((cx, cy), radius, &self.style.filled(), true)?;
            }
            marker if marker.is_stroked() => {
                for stroke in marker.outline(self.half_px) {
                    backend.draw_path(stroke.iter().map(shift), &self.style)?;
                }
            }
            marker => {
                for polygon in marker.outline(self.half_px) {
                    backend.fill_polygon(polygon.iter().map(shift), &self.style.filled())?;
                }
            }
        }
        Ok(())
    }
}

/// Legend entry: a short line with the series marker at its middle.
pub struct LegendSwatch {
    origin: BackendCoord,
    length: i32,
    marker: Option<Marker>,
    half_px: f64,
    style: ShapeStyle,
}

impl LegendSwatch {
    pub fn new(
        origin: BackendCoord,
        length: i32,
        marker: Option<Marker>,
        half_px: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            origin,
            length,
            marker,
            half_px,
            style,
        }
    }
}

impl<'a> PointCollection<'a, BackendCoord> for &'a LegendSwatch {
    type Point = &'a BackendCoord;
    type IntoIter = std::iter::Once<&'a BackendCoord>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.origin)
    }
}

impl<DB: DrawingBackend> Drawable<DB> for LegendSwatch {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        mut points: I,
        backend: &mut DB,
        parent_dim: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let (x, y) = match points.next() {
            Some(p) => p,
            None => return Ok(()),
        };
        backend.draw_line((x, y), (x + self.length, y), &self.style)?;
        if let Some(marker) = self.marker {
            let glyph = MarkerElement::new((), marker, self.half_px, self.style);
            glyph.draw(std::iter::once((x + self.length / 2, y)), backend, parent_dim)?;
        }
        Ok(())
    }
}

/// Indices of the samples that carry a marker: every `every`-th sample, starting at the first.
pub fn marker_indices(len: usize, every: usize) -> impl Iterator<Item = usize> {
    (0..len).step_by(every.max(1))
}
