// src/lib.rs - Library interface for the figure generators

pub mod constants;
pub mod curves;
pub mod font_config;
pub mod markers;
pub mod pgf_backend;
pub mod plot_framework;
pub mod plot_functions;
pub mod profiles;
pub mod sketch;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
