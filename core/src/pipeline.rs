//! The single linear pass: expand the range, look up every address block by
//! block, and keep the blocks that answered.

use ptrmap_common::config::Config;
use ptrmap_common::network::range::{self, SubnetBlock};
use ptrmap_common::network::target::ResolutionTarget;
use rand::Rng;
use tracing::info;

use crate::error::MapError;
use crate::graph::{GraphBuilder, SubnetGraph};
use crate::resolver::{LookupObserver, ResolvedHost, ReverseLookup};

/// Expands the configured range and maps it.
///
/// Fails only when the CIDR bounds are unusable; that happens before any
/// lookup is sent.
pub fn run<R: Rng>(
    config: &Config,
    resolver: &dyn ReverseLookup,
    observer: &mut dyn LookupObserver,
    rng: &mut R,
) -> Result<SubnetGraph, MapError> {
    let blocks: Vec<SubnetBlock> = range::expand(&config.start_cidr, &config.end_cidr, config.end_bound)?;
    info!(
        "Mapping {} address(es) in {} block(s) through the {}",
        range::address_count(&blocks),
        blocks.len(),
        resolver.describe()
    );

    Ok(build_graph(&blocks, &config.target, resolver, observer, rng))
}

/// Resolves every address of `blocks` and builds the graph from the results.
pub fn build_graph<R: Rng>(
    blocks: &[SubnetBlock],
    target: &ResolutionTarget,
    resolver: &dyn ReverseLookup,
    observer: &mut dyn LookupObserver,
    rng: &mut R,
) -> SubnetGraph {
    observer.on_start(blocks);

    let mut builder = GraphBuilder::new(target.root_label(), rng);
    for block in blocks {
        let resolved: Vec<ResolvedHost> = lookup_block(block, resolver, observer);
        observer.on_block(block, resolved.len());
        builder.add_subnet(block, &resolved);
    }

    builder.finish()
}

/// Looks up every address of `block` in order and keeps the ones that resolved.
pub fn lookup_block(
    block: &SubnetBlock,
    resolver: &dyn ReverseLookup,
    observer: &mut dyn LookupObserver,
) -> Vec<ResolvedHost> {
    let mut resolved: Vec<ResolvedHost> = Vec::new();

    for ip in block.iter() {
        let host = ResolvedHost::new(ip, resolver.lookup(ip));
        observer.on_lookup(&host);
        if host.is_resolved() {
            resolved.push(host);
        }
    }

    resolved
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
