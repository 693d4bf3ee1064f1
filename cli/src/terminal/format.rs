use std::time::Duration;

use colored::*;
use ptrmap_common::network::range::SubnetBlock;
use ptrmap_core::SubnetGraph;
use ptrmap_core::graph::{Node, NodeId};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// `10.0.0.0/30 (Subnet_10_0_0_0)`
pub fn subnet_title(subnet: &Node) -> String {
    match &subnet.id {
        NodeId::Subnet(block) => format!("{block} ({})", subnet.label),
        _ => subnet.label.clone(),
    }
}

/// One `(ip, hostname)` pair per host of `subnet`, in resolution order.
pub fn host_details(graph: &SubnetGraph, subnet: &Node) -> Vec<Detail> {
    graph
        .hosts_of(&subnet.id)
        .filter_map(|host| match host.id {
            NodeId::Host(ip) => {
                let hostname = host.label.lines().next().unwrap_or_default();
                Some((ip.to_string(), hostname.color(colors::HOSTNAME)))
            }
            _ => None,
        })
        .collect()
}

pub fn block_count(blocks: &[SubnetBlock]) -> String {
    match blocks.len() {
        1 => String::from("1 block"),
        n => format!("{n} blocks"),
    }
}

pub fn elapsed(total_time: Duration) -> String {
    format!("{:.2}s", total_time.as_secs_f64())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
