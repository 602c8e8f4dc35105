// src/plot_functions/mod.rs

pub mod plot_focal_loss;
pub mod plot_header;
pub mod plot_noise_bands;

// src/plot_functions/mod.rs
