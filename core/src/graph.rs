//! # Subnet Graph
//!
//! A root node (the resolver), one node per subnet that had at least one
//! resolved address, and one node per resolved host underneath it.
//!
//! Nodes are keyed by [`NodeId`], which is derived from the subnet or address
//! the node stands for. Labels are for display only, so two hosts sharing a
//! hostname in different subnets stay two nodes.

use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use ptrmap_common::color::Color;
use ptrmap_common::network::range::SubnetBlock;
use rand::Rng;

use crate::resolver::ResolvedHost;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Root,
    Subnet(SubnetBlock),
    Host(Ipv4Addr),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Root => write!(f, "root"),
            NodeId::Subnet(block) => write!(f, "subnet:{block}"),
            NodeId::Host(ip) => write!(f, "host:{ip}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Subnet,
    Host { subnet: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    /// Subnets get a random color; hosts inherit their subnet's.
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// `Subnet_10_0_0_0` for `10.0.0.0/24`.
pub fn subnet_label(block: &SubnetBlock) -> String {
    format!("Subnet_{}", block.network().to_string().replace('.', "_"))
}

/// Hostname over address, separated by a newline.
pub fn host_label(hostname: &str, ip: Ipv4Addr) -> String {
    format!("{hostname}\n{ip}")
}

#[derive(Debug, Clone)]
pub struct SubnetGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
}

impl SubnetGraph {
    /// Creates a graph holding only the root node.
    pub fn new(root_label: impl Into<String>) -> Self {
        let root = Node {
            id: NodeId::Root,
            label: root_label.into(),
            kind: NodeKind::Root,
            color: Color::GREEN,
        };
        Self {
            index: HashMap::from([(NodeId::Root, 0)]),
            nodes: vec![root],
            edges: Vec::new(),
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn subnet_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Subnet)
    }

    pub fn host_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::Host { .. }))
    }

    /// Hosts hanging off `subnet`, in insertion order.
    pub fn hosts_of<'a>(&'a self, subnet: &'a NodeId) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |node| match &node.kind {
            NodeKind::Host { subnet: parent } => parent == subnet,
            _ => false,
        })
    }

    /// True when no subnet made it into the graph.
    pub fn is_empty(&self) -> bool {
        self.subnet_nodes().next().is_none()
    }

    /// Returns false, and changes nothing, if the id is already taken.
    fn add_node(&mut self, node: Node) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.edges.push(Edge { from, to });
    }
}

/// Grows a [`SubnetGraph`] one summarized block at a time.
pub struct GraphBuilder<'r, R: Rng> {
    graph: SubnetGraph,
    rng: &'r mut R,
}

impl<'r, R: Rng> GraphBuilder<'r, R> {
    pub fn new(root_label: impl Into<String>, rng: &'r mut R) -> Self {
        Self {
            graph: SubnetGraph::new(root_label),
            rng,
        }
    }

    /// Adds `block` and its resolved hosts.
    ///
    /// A block without a single resolved host leaves no trace in the graph and
    /// `None` is returned. Hosts outside the block are ignored.
    pub fn add_subnet(&mut self, block: &SubnetBlock, hosts: &[ResolvedHost]) -> Option<NodeId> {
        let resolved: Vec<(&ResolvedHost, &str)> = hosts
            .iter()
            .filter(|host| block.contains(host.ip))
            .filter_map(|host| host.name().map(|name| (host, name)))
            .collect();

        if resolved.is_empty() {
            return None;
        }

        let subnet_id = NodeId::Subnet(*block);
        let color = Color::random(&mut *self.rng);
        let subnet = Node {
            id: subnet_id.clone(),
            label: subnet_label(block),
            kind: NodeKind::Subnet,
            color,
        };
        if !self.graph.add_node(subnet) {
            return None;
        }
        self.graph.add_edge(NodeId::Root, subnet_id.clone());

        for (host, name) in resolved {
            let host_node = Node {
                id: NodeId::Host(host.ip),
                label: host_label(name, host.ip),
                kind: NodeKind::Host {
                    subnet: subnet_id.clone(),
                },
                color,
            };
            let host_id = host_node.id.clone();
            if self.graph.add_node(host_node) {
                self.graph.add_edge(subnet_id.clone(), host_id);
            }
        }

        Some(subnet_id)
    }

    pub fn finish(self) -> SubnetGraph {
        self.graph
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
