// src/bin/header_plot.rs

use std::env;
use std::error::Error;
use std::path::Path;

use post_figures::crate_version;
use post_figures::plot_functions::plot_header::{make_featured, HeaderCurve};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        eprintln!("Usage: {} (takes no arguments, writes into the working directory)", args[0]);
        std::process::exit(1);
    }

    println!("post_figures {} - header figure", crate_version());
    make_featured(Path::new("."), HeaderCurve::default())?;
    Ok(())
}
