// src/plot_functions/plot_header.rs

// Hand-drawn "worth it" header figure.

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::constants::SKETCH_DOMAIN;
use crate::curves::{arange, clamp_unit, clamp_unit_curve, sigmoid, sigmoid_curve, to_points};
use crate::plot_framework::{render_to_files, Annotation, FigureSpec, PlotSeries};
use crate::profiles::Profile;

/// Curve shown in the header figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCurve {
    #[default]
    Sigmoid,
    /// Identity clamped to [-1, 1].
    Clamped,
}

impl HeaderCurve {
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            HeaderCurve::Sigmoid => sigmoid(x),
            HeaderCurve::Clamped => clamp_unit(x),
        }
    }
}

pub fn header_figure(curve: HeaderCurve) -> FigureSpec {
    let (start, end, step) = SKETCH_DOMAIN;
    let x = arange(start, end, step);
    let y = match curve {
        HeaderCurve::Sigmoid => sigmoid_curve(&x),
        HeaderCurve::Clamped => clamp_unit_curve(&x),
    };
    let f = |v: f64| curve.eval(v);

    FigureSpec {
        series: vec![PlotSeries::line(to_points(&x, &y), "")],
        annotations: vec![
            Annotation::Arrow {
                text: "absolutely worth it".to_string(),
                target: (-1.0, f(-1.0)),
                text_at: (-10.0, f(3.0) - 0.5),
            },
            Annotation::Arrow {
                text: "absolutely not worth it".to_string(),
                target: (5.0, f(5.0)),
                text_at: (1.0, f(5.0) - 0.5),
            },
        ],
        x_label: "effort put into visualizations".to_string(),
        y_label: "number of people\nunderstanding my visualizations".to_string(),
        x_limits: None,
        y_limits: None,
        legend: false,
    }
}

/// Writes every output of the xkcd profile (`featured.png`, `featured.svg`) into `out_dir`.
pub fn make_featured(out_dir: &Path, curve: HeaderCurve) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    println!("--- Generating {} header ({:?}) ---", Profile::Xkcd.name(), curve);
    let style = Profile::Xkcd.style();
    render_to_files(&header_figure(curve), &style, out_dir, Profile::Xkcd.output_files())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callouts_point_at_the_curve() {
        let figure = header_figure(HeaderCurve::Sigmoid);
        match &figure.annotations[0] {
            Annotation::Arrow { target, text_at, text } => {
                assert_eq!(text, "absolutely worth it");
                assert_eq!(target.0, -1.0);
                assert!((target.1 - sigmoid(-1.0)).abs() < 1e-12);
                assert!((text_at.1 - (sigmoid(3.0) - 0.5)).abs() < 1e-12);
            }
            other => panic!("unexpected annotation {other:?}"),
        }
        assert_eq!(figure.y_label.lines().count(), 2);
        assert!(!figure.legend);
    }

    #[test]
    fn clamped_curve_uses_same_layout() {
        let figure = header_figure(HeaderCurve::Clamped);
        assert_eq!(figure.series[0].data.len(), 200);
        match &figure.annotations[1] {
            Annotation::Arrow { target, .. } => assert_eq!(*target, (5.0, 1.0)),
            other => panic!("unexpected annotation {other:?}"),
        }
    }
}
