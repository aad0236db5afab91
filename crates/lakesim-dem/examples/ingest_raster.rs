//! Example: Ingest a GeoTIFF (or synthesize terrain) and print grid statistics.
//!
//! Usage: cargo run --example ingest_raster -- [dem.tif] [max_size]

use lakesim_dem::{colorize, synthesize, RasterSource, TerrainConfig};
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();
    let max_size: usize = args
        .get(2)
        .map(|s| s.parse().expect("Invalid max size"))
        .unwrap_or(256);

    let start = Instant::now();
    let grid = match args.get(1) {
        Some(path) => {
            println!("Loading {}...", path);
            let raster = RasterSource::from_file(path).expect("Failed to load raster");
            let (w, h) = raster.dimensions();
            println!("Source: {}x{} pixels, {:.2} m/pixel", w, h, raster.pixel_size_meters());
            raster.ingest(max_size).expect("Failed to ingest raster").grid
        }
        None => {
            println!("No raster given, synthesizing terrain");
            synthesize(&TerrainConfig::default()).expect("Failed to synthesize terrain")
        }
    };

    println!(
        "Grid: {}x{} cells of {:.2} m (in {:.3}s)",
        grid.width(),
        grid.height(),
        grid.cell_size(),
        start.elapsed().as_secs_f64()
    );
    println!(
        "Elevation: {:.2} m to {:.2} m",
        grid.min_elevation(),
        grid.min_elevation() + grid.max_height()
    );

    let colors = colorize(&grid);
    if !colors.is_empty() {
        let n = colors.len() as f32;
        let mean = colors.iter().fold([0.0f32; 3], |acc, c| {
            [acc[0] + c[0] / n, acc[1] + c[1] / n, acc[2] + c[2] / n]
        });
        println!("Mean color: ({:.3}, {:.3}, {:.3})", mean[0], mean[1], mean[2]);
    }
}
