// tests/curve_properties.rs

use post_figures::constants::FOCAL_GAMMAS;
use post_figures::curves::{clamp_unit, focal_loss, linspace, noise_bands, sigmoid};
use post_figures::sketch::{SketchParams, Sketcher};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focal_loss_is_finite_non_negative_and_non_increasing() {
        let p = linspace(0.0, 1.0, 250);
        for &gamma in &FOCAL_GAMMAS {
            let values: Vec<f64> = p.iter().skip(1).map(|&p| focal_loss(p, gamma)).collect();
            for pair in values.windows(2) {
                assert!(pair[0].is_finite() && pair[0] >= 0.0, "gamma {gamma}: {pair:?}");
                assert!(pair[1] <= pair[0] + 1e-12, "gamma {gamma} increases: {pair:?}");
            }
        }
    }

    #[test]
    fn focal_loss_vanishes_at_certainty() {
        for &gamma in &FOCAL_GAMMAS {
            assert_eq!(focal_loss(1.0, gamma), 0.0, "gamma {gamma}");
        }
    }

    #[test]
    fn sigmoid_stays_in_open_unit_interval() {
        for x in [-700.0, -30.0, -10.0, -1.0, 0.0, 1.0, 10.0, 30.0, 36.0] {
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
        }
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_saturates_in_f64() {
        assert_eq!(sigmoid(40.0), 1.0);
        assert_eq!(sigmoid(-800.0), 0.0);
        assert!(sigmoid(-40.0) > 0.0 && sigmoid(-40.0) < 1e-15);
    }

    #[test]
    fn clamp_saturates_outside_unit_range() {
        assert_eq!(clamp_unit(-10.0), -1.0);
        assert_eq!(clamp_unit(-1.0001), -1.0);
        assert_eq!(clamp_unit(-1.0), -1.0);
        assert_eq!(clamp_unit(0.3), 0.3);
        assert_eq!(clamp_unit(1.0), 1.0);
        assert_eq!(clamp_unit(7.5), 1.0);
    }

    #[test]
    fn seeded_noise_and_sketch_repeat() {
        assert_eq!(noise_bands(11), noise_bands(11));

        let path = [(0.0, 0.0), (120.0, 80.0), (240.0, 10.0)];
        let params = SketchParams::at_dpi(240.0);
        let a = Sketcher::new(params).sketch(&path);
        let b = Sketcher::new(params).sketch(&path);
        assert_eq!(a, b);
    }
}
