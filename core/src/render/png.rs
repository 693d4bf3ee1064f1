// Static per-subnet images

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, Circle, DrawingArea, IntoDrawingArea, IntoFont, PathElement, RGBColor, Rectangle, Text,
};
use plotters::style::Color as _;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use ptrmap_common::color::Color;
use rand::Rng;
use tracing::{info, warn};

use crate::error::RenderError;
use crate::graph::{Node, SubnetGraph};
use crate::render::layout::{self, Point};

const MARGIN: i32 = 80;
const HOST_RADIUS: i32 = 12;
const SUBNET_HALF: i32 = 22;
const LABEL_SIZE: i32 = 14;

#[derive(Debug, Clone, Copy)]
pub struct PngSettings {
    pub width: u32,
    pub height: u32,
    pub iterations: usize,
}

impl Default for PngSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            iterations: layout::DEFAULT_ITERATIONS,
        }
    }
}

/// `Subnet_10_0_0_0` -> `Subnet_10_0_0_0.png`
pub fn subnet_file_name(subnet: &Node) -> String {
    format!("{}.png", subnet.label)
}

/// Writes one image per subnet of `graph` into `dir`, creating it if needed.
///
/// Returns the written paths in subnet order. A graph without subnets writes
/// nothing.
pub fn render_subnets<R: Rng>(
    graph: &SubnetGraph,
    dir: &Path,
    settings: &PngSettings,
    rng: &mut R,
) -> Result<Vec<PathBuf>, RenderError> {
    let mut written: Vec<PathBuf> = Vec::new();
    if graph.subnet_nodes().next().is_none() {
        return Ok(written);
    }

    fs::create_dir_all(dir).map_err(|source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for subnet in graph.subnet_nodes() {
        let path = dir.join(subnet_file_name(subnet));
        render_subnet(graph, subnet, &path, settings, rng)?;
        info!("Saved {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn render_subnet<R: Rng>(
    graph: &SubnetGraph,
    subnet: &Node,
    path: &Path,
    settings: &PngSettings,
    rng: &mut R,
) -> Result<(), RenderError> {
    let hosts: Vec<&Node> = graph.hosts_of(&subnet.id).collect();
    // index 0 is the subnet, hosts follow
    let edges: Vec<(usize, usize)> = (1..=hosts.len()).map(|host| (0, host)).collect();
    let positions = layout::spring_layout(hosts.len() + 1, &edges, Some(0), settings.iterations, rng);

    let area = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    area.fill(&to_rgb(Color::WHITE)).map_err(image_error)?;

    let pixel = |point: Point| to_pixel(point, settings);
    let center = pixel(positions[0]);

    for &position in &positions[1..] {
        let line = PathElement::new(vec![center, pixel(position)], to_rgb(Color::GRAY).stroke_width(1));
        area.draw(&line).map_err(image_error)?;
    }

    let fill = to_rgb(subnet.color);
    for &position in &positions[1..] {
        area.draw(&Circle::new(pixel(position), HOST_RADIUS, fill.filled()))
            .map_err(image_error)?;
    }

    let (cx, cy) = center;
    let corners = [(cx - SUBNET_HALF, cy - SUBNET_HALF), (cx + SUBNET_HALF, cy + SUBNET_HALF)];
    area.draw(&Rectangle::new(corners, fill.filled())).map_err(image_error)?;
    area.draw(&Rectangle::new(corners, to_rgb(Color::BLACK).stroke_width(3)))
        .map_err(image_error)?;

    let mut labels = LabelPainter::new(&area);
    labels.draw(&subnet.label, (cx + SUBNET_HALF + 6, cy));
    for (host, &position) in hosts.iter().zip(&positions[1..]) {
        let (x, y) = pixel(position);
        labels.draw(&host.label, (x + HOST_RADIUS + 6, y));
    }

    area.present().map_err(image_error)
}

/// Draws node labels, giving up on text after the first font failure so a
/// host without usable fonts still gets its images.
struct LabelPainter<'a, 'b> {
    area: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    enabled: bool,
}

impl<'a, 'b> LabelPainter<'a, 'b> {
    fn new(area: &'a DrawingArea<BitMapBackend<'b>, Shift>) -> Self {
        Self { area, enabled: true }
    }

    fn draw(&mut self, label: &str, (x, y): (i32, i32)) {
        if !self.enabled {
            return;
        }

        let lines: Vec<&str> = label.lines().collect();
        let top = y - (lines.len() as i32 - 1) * LABEL_SIZE / 2;
        for (i, line) in lines.iter().enumerate() {
            let style = ("sans-serif", f64::from(LABEL_SIZE))
                .into_font()
                .color(&to_rgb(Color::BLACK))
                .pos(Pos::new(HPos::Left, VPos::Center));
            let text = Text::new(line.to_string(), (x, top + i as i32 * LABEL_SIZE), style);
            if let Err(e) = self.area.draw(&text) {
                warn!("Could not draw node labels: {e}");
                self.enabled = false;
                return;
            }
        }
    }
}

fn to_rgb(color: Color) -> RGBColor {
    RGBColor(color.red(), color.green(), color.blue())
}

fn to_pixel((x, y): Point, settings: &PngSettings) -> (i32, i32) {
    let usable_w = (settings.width as i32 - 2 * MARGIN).max(1);
    let usable_h = (settings.height as i32 - 2 * MARGIN).max(1);
    (
        MARGIN + (x * usable_w as f64).round() as i32,
        MARGIN + (y * usable_h as f64).round() as i32,
    )
}

fn image_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Image(e.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    use ptrmap_common::network::range::parse_block;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::graph::GraphBuilder;
    use crate::resolver::ResolvedHost;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn small() -> PngSettings {
        PngSettings {
            width: 320,
            height: 240,
            iterations: 10,
        }
    }

    fn two_subnet_graph() -> SubnetGraph {
        let mut rng = StdRng::seed_from_u64(5);
        let mut builder = GraphBuilder::new("System Resolver", &mut rng);
        builder.add_subnet(
            &parse_block("10.0.0.0/30").unwrap(),
            &[
                ResolvedHost::new(Ipv4Addr::new(10, 0, 0, 1), Some("a".into())),
                ResolvedHost::new(Ipv4Addr::new(10, 0, 0, 2), Some("b".into())),
            ],
        );
        builder.add_subnet(
            &parse_block("10.0.1.0/24").unwrap(),
            &[ResolvedHost::new(Ipv4Addr::new(10, 0, 1, 9), Some("c".into()))],
        );
        builder.finish()
    }

    #[test]
    fn file_name_follows_label() {
        let graph = two_subnet_graph();
        let names: Vec<String> = graph.subnet_nodes().map(subnet_file_name).collect();
        assert_eq!(names, vec!["Subnet_10_0_0_0.png", "Subnet_10_0_1_0.png"]);
    }

    #[test]
    fn one_png_per_subnet() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("images");
        let graph = two_subnet_graph();

        let written = render_subnets(&graph, &out, &small(), &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(written, vec![out.join("Subnet_10_0_0_0.png"), out.join("Subnet_10_0_1_0.png")]);
        for path in &written {
            let bytes = std::fs::read(path).unwrap();
            assert_eq!(bytes[..8], PNG_SIGNATURE);
        }
    }

    #[test]
    fn empty_graph_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never-created");
        let graph = SubnetGraph::new("System Resolver");

        let written = render_subnets(&graph, &out, &small(), &mut StdRng::seed_from_u64(1)).unwrap();

        assert!(written.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn pixels_stay_inside_margins() {
        let settings = small();
        assert_eq!(to_pixel((0.0, 0.0), &settings), (MARGIN, MARGIN));
        assert_eq!(
            to_pixel((1.0, 1.0), &settings),
            (settings.width as i32 - MARGIN, settings.height as i32 - MARGIN)
        );
    }

    #[test]
    fn color_conversion() {
        assert_eq!(to_rgb(Color::from_u32(0x12AB34)), RGBColor(0x12, 0xAB, 0x34));
    }
}
