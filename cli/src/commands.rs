pub mod html;
pub mod png;

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use ptrmap_common::config::{Config, DEFAULT_DNS_PORT};
use ptrmap_common::network::range::EndBound;
use ptrmap_common::network::target::ResolutionTarget;
use ptrmap_core::render::html::DEFAULT_OUTPUT;
use ptrmap_core::render::png::PngSettings;
use ptrmap_core::{MapError, SubnetGraph, pipeline, resolver};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::terminal::progress::LookupProgress;

#[derive(Parser)]
#[command(name = "ptrmap")]
#[command(version)]
#[command(about = "Maps an IPv4 range by reverse DNS and draws the subnets that answer.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Show more log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print less (-q hides progress and headers, -qq hides the host list)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Skip the start-up banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the whole range as one interactive HTML graph
    #[command(alias = "h")]
    Html(HtmlArgs),
    /// Render one PNG per subnet that has resolved hosts
    #[command(alias = "p")]
    Png(PngArgs),
}

#[derive(Args)]
pub struct RangeArgs {
    /// First CIDR of the range, e.g. 192.168.0.0/24
    pub start_cidr: String,

    /// Last CIDR of the range, e.g. 192.168.3.0/24
    pub end_cidr: String,

    /// Stop at the network address of the last CIDR instead of its last address
    #[arg(long)]
    pub end_at_network: bool,
}

impl RangeArgs {
    pub fn end_bound(&self) -> EndBound {
        if self.end_at_network {
            EndBound::NetworkAddress
        } else {
            EndBound::LastAddress
        }
    }
}

#[derive(Args)]
pub struct LookupArgs {
    /// DNS server port
    #[arg(long, default_value_t = DEFAULT_DNS_PORT)]
    pub port: u16,

    /// Seconds to wait for each reverse lookup
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Seed for subnet colors and image layout
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct HtmlArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// DNS server that answers the PTR queries
    pub dns_server: Ipv4Addr,

    /// Where to write the page
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

#[derive(Args)]
pub struct PngArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Query this DNS server instead of the system resolver
    #[arg(long)]
    pub dns_server: Option<Ipv4Addr>,

    /// Directory the images are written to
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = PngSettings::default().width, value_parser = pixel_size())]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = PngSettings::default().height, value_parser = pixel_size())]
    pub height: u32,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

/// Largest image side accepted on the command line.
pub const MAX_PIXELS: i64 = 16384;

fn pixel_size() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=MAX_PIXELS)
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let (range, target, lookup) = match &self.command {
            Commands::Html(args) => (&args.range, ResolutionTarget::Server(args.dns_server), &args.lookup),
            Commands::Png(args) => (&args.range, ResolutionTarget::from(args.dns_server), &args.lookup),
        };

        let mut cfg = Config::new(&range.start_cidr, &range.end_cidr, target);
        cfg.end_bound = range.end_bound();
        cfg.dns_port = lookup.port;
        cfg.timeout = Duration::from_secs(lookup.timeout);
        cfg.seed = lookup.seed;
        cfg.no_banner = self.no_banner;
        cfg.quiet = self.quiet;
        cfg
    }
}

/// Random source for colors and layout; seeded runs are reproducible.
pub fn rng_for(cfg: &Config) -> StdRng {
    cfg.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Resolves the configured range and builds its graph, with a progress bar.
pub fn map_range(cfg: &Config, rng: &mut StdRng) -> Result<SubnetGraph, MapError> {
    let lookup = resolver::from_config(cfg).map_err(MapError::Resolver)?;
    let mut progress = LookupProgress::new(cfg.quiet);
    let graph = pipeline::run(cfg, lookup.as_ref(), &mut progress, rng)?;
    progress.finish();
    Ok(graph)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
