#![cfg(test)]
use std::collections::HashMap;
use std::net::Ipv4Addr;

use ptrmap_common::error::RangeError;
use ptrmap_common::network::target::ResolutionTarget;
use ptrmap_common::config::Config;
use ptrmap_core::graph::{NodeId, NodeKind};
use ptrmap_core::render::{self, HtmlSettings, PngSettings};
use ptrmap_core::resolver::{self, ReverseLookup, Silent};
use ptrmap_core::{MapError, SubnetGraph, pipeline};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::util::FakeDns;

struct TableLookup(HashMap<Ipv4Addr, &'static str>);

impl ReverseLookup for TableLookup {
    fn lookup(&self, ip: Ipv4Addr) -> Option<String> {
        self.0.get(&ip).map(|name| name.to_string())
    }

    fn describe(&self) -> String {
        String::from("table")
    }
}

fn map_with_server(cfg: &Config) -> Result<SubnetGraph, MapError> {
    let lookup = resolver::from_config(cfg).map_err(MapError::Resolver)?;
    let mut rng = StdRng::seed_from_u64(cfg.seed.unwrap_or_default());
    pipeline::run(cfg, lookup.as_ref(), &mut Silent, &mut rng)
}

/// A single /30 with one answering address, written out as HTML.
#[test]
fn single_subnet_through_dns_server() -> anyhow::Result<()> {
    let dns = FakeDns::start(&[([10, 0, 0, 1], "host1.example.com.")], 4);
    let cfg = dns.config("10.0.0.0/30", "10.0.0.0/30");

    let graph = map_with_server(&cfg)?;
    assert_eq!(dns.served(), 4);

    assert_eq!(graph.root().label, "DNS Server (127.0.0.1)");
    assert_eq!(graph.subnet_nodes().count(), 1);
    let hosts: Vec<&str> = graph.host_nodes().map(|node| node.label.as_str()).collect();
    assert_eq!(hosts, vec!["host1.example.com\n10.0.0.1"]);
    assert_eq!(graph.edges().len(), 2);

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("subnet_network.html");
    render::write_html(&graph, &out, &HtmlSettings::default())?;

    let html = std::fs::read_to_string(&out)?;
    assert!(html.contains("Subnet_10_0_0_0"));
    assert!(html.contains("host1.example.com\\n10.0.0.1"));
    Ok(())
}

#[test]
fn silent_range_yields_root_only_page() -> anyhow::Result<()> {
    let dns = FakeDns::start(&[], 4);
    let cfg = dns.config("10.0.0.0/30", "10.0.0.0/30");

    let graph = map_with_server(&cfg)?;
    assert_eq!(dns.served(), 4);
    assert!(graph.is_empty());
    assert_eq!(graph.nodes().len(), 1);
    assert!(graph.edges().is_empty());

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("empty.html");
    render::write_html(&graph, &out, &HtmlSettings::default())?;
    assert!(std::fs::read_to_string(&out)?.contains("DNS Server (127.0.0.1)"));

    let images = render::render_subnets(&graph, dir.path(), &PngSettings::default(), &mut StdRng::seed_from_u64(0))?;
    assert!(images.is_empty());
    Ok(())
}

/// Two /30 blocks sharing a hostname keep two separate host nodes and get one
/// image each.
#[test]
fn shared_hostname_across_subnets() -> anyhow::Result<()> {
    let dns = FakeDns::start(&[([10, 0, 0, 5], "printer"), ([10, 0, 0, 9], "printer")], 8);
    let cfg = dns.config("10.0.0.4/30", "10.0.0.8/30");

    let graph = map_with_server(&cfg)?;
    assert_eq!(dns.served(), 8);

    let subnets: Vec<&str> = graph.subnet_nodes().map(|node| node.label.as_str()).collect();
    assert_eq!(subnets, vec!["Subnet_10_0_0_4", "Subnet_10_0_0_8"]);

    let host_ids: Vec<&NodeId> = graph.host_nodes().map(|node| &node.id).collect();
    assert_eq!(
        host_ids,
        vec![&NodeId::Host(Ipv4Addr::new(10, 0, 0, 5)), &NodeId::Host(Ipv4Addr::new(10, 0, 0, 9))]
    );
    for host in graph.host_nodes() {
        let NodeKind::Host { subnet } = &host.kind else {
            panic!("host node without a subnet");
        };
        assert_eq!(host.color, graph.node(subnet).map(|s| s.color).unwrap());
    }

    let dir = tempfile::tempdir()?;
    let settings = PngSettings {
        width: 400,
        height: 300,
        ..PngSettings::default()
    };
    let images = render::render_subnets(&graph, dir.path(), &settings, &mut StdRng::seed_from_u64(1))?;
    assert_eq!(
        images,
        vec![dir.path().join("Subnet_10_0_0_4.png"), dir.path().join("Subnet_10_0_0_8.png")]
    );
    assert!(images.iter().all(|path| path.is_file()));
    Ok(())
}

#[test]
fn invalid_cidr_stops_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("subnet_network.html");
    let cfg = Config::new("999.999.999.999/24", "10.0.0.0/24", ResolutionTarget::System);
    let lookup = TableLookup(HashMap::new());

    let result = pipeline::run(&cfg, &lookup, &mut Silent, &mut StdRng::seed_from_u64(0))
        .and_then(|graph| Ok(render::write_html(&graph, &out, &HtmlSettings::default())?));

    assert!(matches!(result, Err(MapError::Range(RangeError::InvalidCidr { .. }))));
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn same_seed_same_colors() {
    let lookup = TableLookup(HashMap::from([
        (Ipv4Addr::new(192, 168, 0, 1), "a"),
        (Ipv4Addr::new(192, 168, 1, 1), "b"),
        (Ipv4Addr::new(192, 168, 2, 1), "c"),
    ]));
    let cfg = Config::new("192.168.0.0/24", "192.168.2.0/24", ResolutionTarget::System);

    let colors = |seed: u64| -> Vec<String> {
        let graph = pipeline::run(&cfg, &lookup, &mut Silent, &mut StdRng::seed_from_u64(seed)).unwrap();
        graph.subnet_nodes().map(|node| node.color.to_hex()).collect()
    };

    let first = colors(42);
    assert_eq!(first.len(), 2);
    assert_eq!(first, colors(42));
}
