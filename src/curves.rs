// src/curves.rs

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    BAND_NOISE_SCALE, BAND_OFFSET, BAND_SAMPLES, BAND_STD_BASE, BAND_STD_SPREAD,
};

/// Focal loss for the probability `p` of the ground-truth class: `-(1 - p)^gamma * ln(p)`.
///
/// `p = 0` yields `+inf`; `p = 1` yields zero for every `gamma`.
pub fn focal_loss(p: f64, gamma: f64) -> f64 {
    -(1.0 - p).powf(gamma) * p.ln()
}

/// Logistic sigmoid.
///
/// Strictly inside `(0, 1)` only for moderate inputs: in `f64` it rounds to exactly `1.0`
/// from about `x = 37` and to exactly `0.0` below about `x = -710`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Identity on `[-1, 1]`, saturated at the bounds outside of it.
pub fn clamp_unit(x: f64) -> f64 {
    if x < -1.0 {
        return -1.0;
    }
    if x > 1.0 {
        return 1.0;
    }
    x
}

/// `n` evenly spaced samples over `[start, end]`, both endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    Array1::linspace(start, end, n)
}

/// Samples over the half-open interval `[start, end)` with a fixed step.
pub fn arange(start: f64, end: f64, step: f64) -> Array1<f64> {
    Array1::range(start, end, step)
}

pub fn focal_loss_curve(p: &Array1<f64>, gamma: f64) -> Array1<f64> {
    p.mapv(|v| focal_loss(v, gamma))
}

pub fn sigmoid_curve(x: &Array1<f64>) -> Array1<f64> {
    x.mapv(sigmoid)
}

pub fn clamp_unit_curve(x: &Array1<f64>) -> Array1<f64> {
    x.mapv(clamp_unit)
}

/// One focal-loss curve per decay exponent, in the order given.
pub fn focal_loss_family(p: &Array1<f64>, gammas: &[f64]) -> Vec<(f64, Array1<f64>)> {
    gammas
        .iter()
        .map(|&gamma| (gamma, focal_loss_curve(p, gamma)))
        .collect()
}

/// Zips a domain and a derived sequence into plot points.
pub fn to_points(x: &Array1<f64>, y: &Array1<f64>) -> Vec<(f64, f64)> {
    x.iter().zip(y.iter()).map(|(&a, &b)| (a, b)).collect()
}

/// A noisy signal with a per-sample standard deviation, used for the band figure.
#[derive(Debug, Clone, PartialEq)]
pub struct NoisyBand {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl NoisyBand {
    pub fn lower(&self) -> Array1<f64> {
        &self.mean - &self.std
    }

    pub fn upper(&self) -> Array1<f64> {
        &self.mean + &self.std
    }
}

/// Sine and cosine perturbed by multiplicative uniform noise and lifted by a constant offset.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBands {
    pub x: Array1<f64>,
    pub sin: NoisyBand,
    pub cos: NoisyBand,
}

fn uniform(rng: &mut StdRng, n: usize) -> Array1<f64> {
    Array1::from_iter((0..n).map(|_| rng.gen::<f64>()))
}

fn perturb(clean: &Array1<f64>, noise: &Array1<f64>) -> Array1<f64> {
    clean + &(noise * clean * BAND_NOISE_SCALE) + BAND_OFFSET
}

/// Builds the band data over `[0, 4pi]`. The same seed always yields the same sequences.
pub fn noise_bands(seed: u64) -> NoiseBands {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = linspace(0.0, 4.0 * std::f64::consts::PI, BAND_SAMPLES);
    let n = x.len();

    let clean_sin = x.mapv(f64::sin);
    let clean_cos = x.mapv(f64::cos);

    let sin_noise = uniform(&mut rng, n);
    let cos_noise = uniform(&mut rng, n);
    let sin_mean = perturb(&clean_sin, &sin_noise);
    let cos_mean = perturb(&clean_cos, &cos_noise);

    let sin_std = uniform(&mut rng, n) * BAND_STD_SPREAD + BAND_STD_BASE;
    let cos_std = uniform(&mut rng, n) * BAND_STD_SPREAD + BAND_STD_BASE;

    NoiseBands {
        x,
        sin: NoisyBand {
            mean: sin_mean,
            std: sin_std,
        },
        cos: NoisyBand {
            mean: cos_mean,
            std: cos_std,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FOCAL_GAMMAS;

    #[test]
    fn focal_loss_zero_gamma_is_cross_entropy() {
        for &p in &[0.1, 0.3, 0.5, 0.9] {
            assert!((focal_loss(p, 0.0) + p.ln()).abs() < 1e-12);
        }
    }

    #[test]
    fn focal_loss_at_zero_is_infinite() {
        for &gamma in &FOCAL_GAMMAS {
            assert_eq!(focal_loss(0.0, gamma), f64::INFINITY);
        }
    }

    #[test]
    fn focal_loss_family_keeps_gamma_order() {
        let p = linspace(0.0, 1.0, 11);
        let family = focal_loss_family(&p, &FOCAL_GAMMAS);
        let gammas: Vec<f64> = family.iter().map(|(g, _)| *g).collect();
        assert_eq!(gammas, FOCAL_GAMMAS.to_vec());
        assert!(family.iter().all(|(_, y)| y.len() == p.len()));
    }

    #[test]
    fn arange_excludes_end() {
        let x = arange(-10.0, 10.0, 0.1);
        assert_eq!(x.len(), 200);
        assert_eq!(x[0], -10.0);
        assert!(*x.last().unwrap() < 10.0);
    }

    #[test]
    fn noise_band_bounds_bracket_the_mean() {
        let bands = noise_bands(7);
        assert_eq!(bands.sin.mean.len(), BAND_SAMPLES);
        let lower = bands.sin.lower();
        let upper = bands.sin.upper();
        for i in 0..BAND_SAMPLES {
            assert!(lower[i] < bands.sin.mean[i]);
            assert!(upper[i] > bands.sin.mean[i]);
            assert!(bands.cos.std[i] >= BAND_STD_BASE);
            assert!(bands.cos.std[i] < BAND_STD_BASE + BAND_STD_SPREAD);
        }
    }

    #[test]
    fn different_seeds_give_different_noise() {
        assert_ne!(noise_bands(1).sin.mean, noise_bands(2).sin.mean);
    }
}
