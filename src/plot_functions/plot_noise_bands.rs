// src/plot_functions/plot_noise_bands.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::constants::{NOISE_SEED, OUTPUT_BANDS};
use crate::curves::{noise_bands, to_points, NoisyBand};
use crate::plot_framework::{render_figure, FigureSpec, PlotSeries};
use crate::profiles::{FigureStyle, Theme};

fn band_series(x: &ndarray::Array1<f64>, band: &NoisyBand, label: &str, index: usize) -> PlotSeries {
    let (lower, upper) = (band.lower(), band.upper());
    let shaded = x
        .iter()
        .zip(lower.iter().zip(upper.iter()))
        .map(|(&x, (&lo, &hi))| (x, lo, hi))
        .collect();
    PlotSeries::line(to_points(x, &band.mean), label)
        .with_color(Theme::Plain.cycle_color(index))
        .with_band(shaded)
}

/// Mean +/- std bands for the seeded noisy sine and cosine.
pub fn noise_bands_figure(seed: u64) -> FigureSpec {
    let data = noise_bands(seed);
    FigureSpec {
        series: vec![
            band_series(&data.x, &data.sin, "sin", 0),
            band_series(&data.x, &data.cos, "cos", 1),
        ],
        annotations: Vec::new(),
        x_label: "Some interesting X label".to_string(),
        y_label: "Some interesting Y label".to_string(),
        x_limits: None,
        y_limits: None,
        legend: true,
    }
}

pub fn make_bands(out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    println!("--- Generating noise bands ---");
    let path = out_dir.join(OUTPUT_BANDS);
    render_figure(&noise_bands_figure(NOISE_SEED), &FigureStyle::plain(), &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_enclose_the_mean() {
        let figure = noise_bands_figure(7);
        assert_eq!(figure.series.len(), 2);
        for series in &figure.series {
            let band = series.band.as_ref().unwrap();
            assert_eq!(band.len(), series.data.len());
            for (&(x, lo, hi), &(px, y)) in band.iter().zip(&series.data) {
                assert_eq!(x, px);
                assert!(lo < y && y < hi);
            }
        }
    }
}
