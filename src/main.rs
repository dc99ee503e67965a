//! Panel Layout CLI - Optimize a ceiling layout from a JSON request.

use std::path::PathBuf;
use std::time::Instant;

use panel_layout::{
    compute::Optimizer,
    schema::{
        Dimensions, LayoutError, LayoutRequest, Material, SearchMethod, Spacing, Strategy,
    },
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <request.json>", args[0]);
        eprintln!();
        eprintln!("Optimize a panel layout from a JSON request and print the report.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  request.json  Path to layout request file");
        eprintln!();
        eprintln!("An example request is printed with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_request();
        return;
    }

    let request_path = PathBuf::from(&args[1]);
    let request = LayoutRequest::load(&request_path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", request_path.display(), e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let report = Optimizer.optimize(&request).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    log::info!("Optimized in {:.3}s", start.elapsed().as_secs_f64());

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing report: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_example_request() {
    match example_request().map(|request| serde_json::to_string_pretty(&request)) {
        Ok(Ok(json)) => println!("{}", json),
        Ok(Err(e)) => eprintln!("Error serializing example: {}", e),
        Err(e) => eprintln!("Error building example: {}", e),
    }
}

fn example_request() -> Result<LayoutRequest, LayoutError> {
    Ok(LayoutRequest::new(
        Dimensions::new(4800.0, 3600.0)?,
        Spacing::new(200.0, 200.0)?,
    )
    .with_strategy(Strategy::Balanced)
    .with_method(SearchMethod::default())
    .with_material(Material::new(225.0, 0.15, Some(0.35))?))
}
