// src/bin/figures.rs

use std::env;
use std::error::Error;
use std::path::Path;

use post_figures::crate_version;
use post_figures::plot_functions::plot_focal_loss::make_all;
use post_figures::plot_functions::plot_noise_bands::make_bands;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        eprintln!("Usage: {} (takes no arguments, writes into the working directory)", args[0]);
        std::process::exit(1);
    }

    println!("post_figures {} - focal loss figures", crate_version());
    let out_dir = Path::new(".");

    let written = make_all(out_dir)?;
    make_bands(out_dir)?;

    println!("\nDone: {} focal loss figures written.", written.len());
    Ok(())
}
