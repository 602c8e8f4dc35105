// src/plot_functions/plot_focal_loss.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::constants::{
    EASY_BRACKET_END, EASY_BRACKET_START, EASY_BRACKET_TICK, EASY_LABEL_POS, FOCAL_GAMMAS,
    FOCAL_SAMPLES, FOCAL_X_LIMITS, FOCAL_Y_LIMITS, MARKER_EVERY, THIN_LINE_WIDTH_PT,
};
use crate::curves::{focal_loss_family, linspace, to_points};
use crate::markers::Marker;
use crate::plot_framework::{render_to_files, Annotation, FigureSpec, HAlign, PlotSeries, VAlign};
use crate::profiles::{Profile, TextMode};

/// Formats a decay exponent the way it appears in legend labels: `0`, `0.5`, `2`.
pub fn format_gamma(gamma: f64) -> String {
    if gamma.fract() == 0.0 {
        format!("{:.0}", gamma)
    } else {
        format!("{}", gamma)
    }
}

fn gamma_label(gamma: f64, text: TextMode) -> String {
    match text {
        TextMode::Plain => format!("γ = {}", format_gamma(gamma)),
        TextMode::Tex => format!("$\\gamma = {}$", format_gamma(gamma)),
    }
}

fn x_label(text: TextMode) -> String {
    match text {
        TextMode::Plain => "Probability of ground-truth class (p_c^t)".to_string(),
        TextMode::Tex => "Probability of ground-truth class ($p_c^t$)".to_string(),
    }
}

/// The "easy objects" bracket: a horizontal bar with a short vertical tick at each end.
fn easy_objects_bracket() -> Vec<Annotation> {
    let (start, end) = (EASY_BRACKET_START, EASY_BRACKET_END);
    let tick = |(x, y): (f64, f64)| Annotation::Line {
        points: vec![(x, y - EASY_BRACKET_TICK), (x, y + EASY_BRACKET_TICK)],
        width_pt: THIN_LINE_WIDTH_PT,
    };
    vec![
        Annotation::Line {
            points: vec![start, end],
            width_pt: THIN_LINE_WIDTH_PT,
        },
        tick(start),
        tick(end),
        Annotation::Label {
            text: "easy objects".to_string(),
            at: EASY_LABEL_POS,
            h_align: HAlign::Center,
            v_align: VAlign::Bottom,
        },
    ]
}

/// Builds the focal-loss curve family shared by every presentation profile.
///
/// At `p = 0` the loss is infinite; the renderer drops that sample.
pub fn focal_loss_figure(text: TextMode) -> FigureSpec {
    let p = linspace(0.0, 1.0, FOCAL_SAMPLES);
    let series = focal_loss_family(&p, &FOCAL_GAMMAS)
        .into_iter()
        .zip(Marker::CYCLE)
        .map(|((gamma, loss), marker)| {
            PlotSeries::line(to_points(&p, &loss), gamma_label(gamma, text))
                .with_marker(marker, MARKER_EVERY)
        })
        .collect();

    FigureSpec {
        series,
        annotations: easy_objects_bracket(),
        x_label: x_label(text),
        y_label: "Focal Loss (FL)".to_string(),
        x_limits: Some(FOCAL_X_LIMITS),
        y_limits: Some(FOCAL_Y_LIMITS),
        legend: true,
    }
}

/// Renders the focal-loss figure with one profile into `out_dir`, returning the written path.
pub fn make_profile(out_dir: &Path, profile: Profile) -> Result<PathBuf, Box<dyn Error>> {
    println!("--- Generating {} profile ---", profile.name());
    let style = profile.style();
    let figure = focal_loss_figure(style.text);
    let mut written = render_to_files(&figure, &style, out_dir, profile.output_files())?;
    written
        .pop()
        .ok_or_else(|| format!("Profile '{}' has no output file", profile.name()).into())
}

pub fn make_base(out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    make_profile(out_dir, Profile::Base)
}

pub fn make_sciplots(out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    make_profile(out_dir, Profile::SciencePlots)
}

pub fn make_legend(out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    make_profile(out_dir, Profile::Legend)
}

pub fn make_linewidths(out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    make_profile(out_dir, Profile::Linewidths)
}

pub fn make_pgf(out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    make_profile(out_dir, Profile::Pgf)
}

pub fn make_final(out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    make_profile(out_dir, Profile::Final)
}

/// Every focal-loss profile, in order.
pub fn make_all(out_dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    Profile::FOCAL
        .iter()
        .map(|&profile| make_profile(out_dir, profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_labels() {
        assert_eq!(format_gamma(0.0), "0");
        assert_eq!(format_gamma(0.5), "0.5");
        assert_eq!(format_gamma(5.0), "5");
        assert_eq!(gamma_label(2.0, TextMode::Plain), "γ = 2");
        assert_eq!(gamma_label(0.5, TextMode::Tex), "$\\gamma = 0.5$");
    }

    #[test]
    fn figure_has_one_marked_series_per_gamma() {
        let figure = focal_loss_figure(TextMode::Plain);
        assert_eq!(figure.series.len(), FOCAL_GAMMAS.len());
        for (series, marker) in figure.series.iter().zip(Marker::CYCLE) {
            assert_eq!(series.marker, Some(marker));
            assert_eq!(series.marker_every, MARKER_EVERY);
            assert_eq!(series.data.len(), FOCAL_SAMPLES);
        }
        assert_eq!(figure.x_limits, Some((0.0, 1.0)));
        assert_eq!(figure.y_limits, Some((0.0, 5.5)));
        assert!(figure.legend);
    }

    #[test]
    fn bracket_spans_the_easy_region() {
        let figure = focal_loss_figure(TextMode::Tex);
        let lines: Vec<&Vec<(f64, f64)>> = figure
            .annotations
            .iter()
            .filter_map(|a| match a {
                Annotation::Line { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], &vec![(0.6, 1.0), (1.0, 1.0)]);
        assert_eq!(lines[1], &vec![(0.6, 0.9), (0.6, 1.1)]);
        assert!(figure.x_label.contains("$p_c^t$"));
    }
}
