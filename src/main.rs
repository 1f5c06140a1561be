use std::path::PathBuf;

use heightgen::config::Params;
use heightgen::error::Error;
use heightgen::render;
use tracing::info;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::fmt().init();

    let args: Vec<String> = std::env::args().collect();

    // An optional params file provides the base; positional args override it.
    let mut params = match args.get(5) {
        Some(path) => Params::from_json_file(path)?,
        None => Params::default(),
    };
    if let Some(seed) = args.get(1).and_then(|s| s.parse().ok()) {
        params.seed = seed;
    }
    if let Some(width) = args.get(2).and_then(|s| s.parse().ok()) {
        params.width = width;
    }
    if let Some(height) = args.get(3).and_then(|s| s.parse().ok()) {
        params.height = height;
    }
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir)?;

    info!(
        "Generating {}x{} heightmap with seed={}, large hills={}",
        params.width, params.height, params.seed, params.num_large_hills
    );

    let (terrain, timings) = heightgen::generate_timed(&params)?;

    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    for (i, f) in terrain.layout.features.iter().enumerate() {
        info!(
            "  large hill {i}: center=({:.3}, {:.3}) radius={:.3}",
            f.x, f.y, f.radius
        );
    }

    let path = out_dir.join("heightmap.png");
    render::save_heightmap_png(&path, &terrain.height)?;
    info!("Saved {}", path.display());

    let path = out_dir.join("heightmap16.png");
    render::save_heightmap_png16(&path, &terrain.height)?;
    info!("Saved {}", path.display());

    info!("Done.");
    Ok(())
}
