use std::time::Instant;

use anyhow::Context;
use ptrmap_common::config::Config;
use ptrmap_core::render::{self, HtmlSettings};

use crate::commands::{self, HtmlArgs};
use crate::terminal::print;

pub fn html(args: &HtmlArgs, cfg: &Config) -> anyhow::Result<()> {
    print::header("mapping range", cfg.quiet);

    let start_time = Instant::now();
    let mut rng = commands::rng_for(cfg);
    let graph = commands::map_range(cfg, &mut rng)?;

    let settings = HtmlSettings {
        title: format!("Subnets of {} - {}", cfg.start_cidr, cfg.end_cidr),
        ..HtmlSettings::default()
    };
    render::write_html(&graph, &args.output, &settings)
        .with_context(|| format!("Could not save the graph to {}", args.output.display()))?;

    print::mapping_summary(&graph, start_time.elapsed(), cfg);
    print::saved(&[args.output.as_path()], cfg.quiet);
    Ok(())
}
