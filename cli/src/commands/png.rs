use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use ptrmap_common::config::Config;
use ptrmap_core::render::{self, PngSettings};

use crate::commands::{self, PngArgs};
use crate::terminal::print;

pub fn png(args: &PngArgs, cfg: &Config) -> anyhow::Result<()> {
    print::header("mapping range", cfg.quiet);

    let start_time = Instant::now();
    let mut rng = commands::rng_for(cfg);
    let graph = commands::map_range(cfg, &mut rng)?;

    let settings = PngSettings {
        width: args.width,
        height: args.height,
        ..PngSettings::default()
    };
    let written = render::render_subnets(&graph, &args.dir, &settings, &mut rng)
        .with_context(|| format!("Could not save images to {}", args.dir.display()))?;

    print::mapping_summary(&graph, start_time.elapsed(), cfg);
    let paths: Vec<&Path> = written.iter().map(|path| path.as_path()).collect();
    print::saved(&paths, cfg.quiet);
    Ok(())
}
