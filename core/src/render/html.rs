// Interactive HTML graph

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use ptrmap_common::color::Color;
use serde::Serialize;
use serde_json::json;

use crate::error::RenderError;
use crate::graph::{NodeKind, SubnetGraph};

pub const DEFAULT_OUTPUT: &str = "subnet_network.html";

const VIS_NETWORK_URL: &str = "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <script src="{{vis_url}}"></script>
    <style>
        body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }
        #network { width: 100%; height: {{height}}; border: 1px solid lightgray; }
        .summary { padding: 8px 12px; color: #34495e; }
        .menu { display: flex; gap: 8px; padding: 0 12px 8px; }
    </style>
</head>
<body>
    <div class="summary">{{title}}: {{subnet_count}} subnet(s), {{host_count}} host(s)</div>
    <div class="menu">
        <select id="select-node">
            <option value="">Select a node</option>
        </select>
        <input id="filter-text" type="text" placeholder="Filter by label">
        <select id="filter-kind">
            <option value="">All nodes</option>
            <option value="root">Resolver</option>
            <option value="subnet">Subnets</option>
            <option value="host">Hosts</option>
        </select>
        <button id="filter-reset" type="button">Reset</button>
    </div>
    <div id="network"></div>
    <script type="text/javascript">
        var nodes = new vis.DataSet({{{nodes}}});
        var edges = new vis.DataSet({{{edges}}});
        var options = {{{options}}};
        var container = document.getElementById("network");
        var network = new vis.Network(container, { nodes: nodes, edges: edges }, options);

        var selectNode = document.getElementById("select-node");
        var filterText = document.getElementById("filter-text");
        var filterKind = document.getElementById("filter-kind");

        nodes.forEach(function (node) {
            var option = document.createElement("option");
            option.value = node.id;
            option.textContent = node.label.replace("\n", " ");
            selectNode.appendChild(option);
        });

        selectNode.addEventListener("change", function () {
            if (!selectNode.value) {
                network.unselectAll();
                return;
            }
            network.selectNodes([selectNode.value]);
            network.focus(selectNode.value, { scale: 1.2, animation: true });
        });

        function applyFilter() {
            var text = filterText.value.toLowerCase();
            var kind = filterKind.value;
            nodes.update(nodes.get().map(function (node) {
                var shown = (!kind || node.kind === kind) && node.label.toLowerCase().indexOf(text) !== -1;
                return { id: node.id, hidden: !shown };
            }));
        }

        filterText.addEventListener("input", applyFilter);
        filterKind.addEventListener("change", applyFilter);
        document.getElementById("filter-reset").addEventListener("click", function () {
            filterText.value = "";
            filterKind.value = "";
            applyFilter();
        });
    </script>
</body>
</html>"#;

#[derive(Debug, Clone)]
pub struct HtmlSettings {
    pub title: String,
    /// CSS height of the canvas.
    pub height: String,
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            title: String::from("Subnet network"),
            height: String::from("750px"),
        }
    }
}

#[derive(Debug, Serialize)]
struct VisNode {
    id: String,
    label: String,
    shape: &'static str,
    color: String,
    /// Read by the page's filter menu.
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct VisEdge {
    from: String,
    to: String,
    color: String,
}

fn vis_nodes(graph: &SubnetGraph) -> Vec<VisNode> {
    graph
        .nodes()
        .iter()
        .map(|node| {
            let (shape, color, kind) = match node.kind {
                NodeKind::Root => ("ellipse", node.color, "root"),
                NodeKind::Subnet => ("square", node.color, "subnet"),
                NodeKind::Host { .. } => ("box", Color::LIGHT_BLUE, "host"),
            };
            VisNode {
                id: node.id.to_string(),
                label: node.label.clone(),
                shape,
                color: color.to_hex(),
                kind,
            }
        })
        .collect()
}

fn vis_edges(graph: &SubnetGraph) -> Vec<VisEdge> {
    graph
        .edges()
        .iter()
        .map(|edge| {
            let color = match graph.node(&edge.to).map(|node| &node.kind) {
                Some(NodeKind::Subnet) => Color::BLUE,
                _ => Color::GRAY,
            };
            VisEdge {
                from: edge.from.to_string(),
                to: edge.to.to_string(),
                color: color.to_hex(),
            }
        })
        .collect()
}

/// Serializes `value` for inlining inside a `<script>` block.
///
/// `<`, `>` and `&` only ever occur inside JSON strings, where their `\u`
/// escapes decode to the same text but cannot open a tag or comment.
fn script_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn physics_options() -> serde_json::Value {
    json!({
        "physics": {
            "forceAtlas2Based": {
                "springLength": 100,
                "damping": 0.09
            },
            "minVelocity": 0.75,
            "solver": "forceAtlas2Based"
        }
    })
}

/// Renders the whole graph into one self-contained page.
pub fn generate_html(graph: &SubnetGraph, settings: &HtmlSettings) -> Result<String, RenderError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);

    let data = json!({
        "title": settings.title,
        "height": settings.height,
        "vis_url": VIS_NETWORK_URL,
        "subnet_count": graph.subnet_nodes().count(),
        "host_count": graph.host_nodes().count(),
        "nodes": script_json(&vis_nodes(graph))?,
        "edges": script_json(&vis_edges(graph))?,
        "options": script_json(&physics_options())?,
    });

    let html = handlebars.render_template(HTML_TEMPLATE, &data)?;
    Ok(html)
}

/// Writes the page to `path`.
pub fn write_html(graph: &SubnetGraph, path: &Path, settings: &HtmlSettings) -> Result<(), RenderError> {
    let html = generate_html(graph, settings)?;
    fs::write(path, html).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
