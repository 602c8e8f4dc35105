// src/sketch.rs

// Hand-drawn path jitter in pixel space.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    POINTS_PER_INCH, SKETCH_LENGTH_PT, SKETCH_RANDOMNESS, SKETCH_SCALE_PT, SKETCH_SEED,
    SKETCH_STEP_PT,
};

/// Jitter parameters in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchParams {
    /// Amplitude of the wiggle perpendicular to the path.
    pub scale: f64,
    /// Length of one wiggle along the path.
    pub length: f64,
    /// Factor by which the wiggle length may shrink or grow.
    pub randomness: f64,
    /// Resampling step along the path.
    pub step: f64,
}

impl SketchParams {
    /// Default hand-drawn look at the given resolution.
    pub fn at_dpi(dpi: f64) -> Self {
        let px = dpi / POINTS_PER_INCH;
        Self {
            scale: SKETCH_SCALE_PT * px,
            length: SKETCH_LENGTH_PT * px,
            randomness: SKETCH_RANDOMNESS,
            step: SKETCH_STEP_PT * px,
        }
    }
}

/// Stateful jitter source. One sketcher is shared by every path of a figure so the
/// wiggles do not repeat from path to path, while the whole figure stays reproducible.
pub struct Sketcher {
    params: SketchParams,
    rng: StdRng,
    phase: f64,
}

impl Sketcher {
    pub fn new(params: SketchParams) -> Self {
        Self::with_seed(params, SKETCH_SEED)
    }

    pub fn with_seed(params: SketchParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            phase: 0.0,
        }
    }

    /// Resamples the polyline every `step` pixels and displaces each sample along the
    /// local normal. End points are displaced too, like any other sample.
    pub fn sketch(&mut self, path: &[(f64, f64)]) -> Vec<(f64, f64)> {
        if path.len() < 2 || self.params.step <= 0.0 || self.params.length <= 0.0 {
            return path.to_vec();
        }

        let wave = 2.0 * std::f64::consts::PI / self.params.length;
        let mut out = Vec::with_capacity(path.len() * 4);

        for segment in path.windows(2) {
            let (x0, y0) = segment[0];
            let (x1, y1) = segment[1];
            let (dx, dy) = (x1 - x0, y1 - y0);
            let len = (dx * dx + dy * dy).sqrt();
            if len < 1e-9 {
                continue;
            }
            let (nx, ny) = (-dy / len, dx / len);
            let pieces = (len / self.params.step).ceil().max(1.0) as usize;
            let first = if out.is_empty() { 0 } else { 1 };

            for i in first..=pieces {
                let t = i as f64 / pieces as f64;
                let u: f64 = self.rng.gen();
                self.phase += self.params.randomness.powf(2.0 * u - 1.0) * self.params.step;
                let r = (self.phase * wave).sin() * self.params.scale;
                out.push((x0 + dx * t + nx * r, y0 + dy * t + ny * r));
            }
        }

        if out.is_empty() {
            return path.to_vec();
        }
        out
    }
}

/// Rounds a float path to backend pixel coordinates.
pub fn to_pixels(path: &[(f64, f64)]) -> Vec<(i32, i32)> {
    path.iter()
        .map(|&(x, y)| (x.round() as i32, y.round() as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SketchParams {
        SketchParams {
            scale: 2.0,
            length: 50.0,
            randomness: 2.0,
            step: 1.0,
        }
    }

    #[test]
    fn jitter_stays_within_scale() {
        let mut sketcher = Sketcher::with_seed(params(), 1);
        let out = sketcher.sketch(&[(0.0, 10.0), (100.0, 10.0)]);
        assert!(out.len() >= 100);
        for &(_, y) in &out {
            assert!((y - 10.0).abs() <= 2.0 + 1e-9);
        }
        assert!(out.iter().any(|&(_, y)| (y - 10.0).abs() > 1e-6));
    }

    #[test]
    fn same_seed_same_path() {
        let path = [(0.0, 0.0), (30.0, 40.0), (80.0, 40.0)];
        let a = Sketcher::with_seed(params(), 42).sketch(&path);
        let b = Sketcher::with_seed(params(), 42).sketch(&path);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_paths_pass_through() {
        let mut sketcher = Sketcher::with_seed(params(), 3);
        assert_eq!(sketcher.sketch(&[(1.0, 1.0)]), vec![(1.0, 1.0)]);
        assert_eq!(
            sketcher.sketch(&[(1.0, 1.0), (1.0, 1.0)]),
            vec![(1.0, 1.0), (1.0, 1.0)]
        );
    }

    #[test]
    fn params_scale_with_dpi() {
        let p = SketchParams::at_dpi(144.0);
        assert!((p.scale - 2.0 * SKETCH_SCALE_PT).abs() < 1e-12);
        assert!((p.length - 2.0 * SKETCH_LENGTH_PT).abs() < 1e-12);
    }
}
