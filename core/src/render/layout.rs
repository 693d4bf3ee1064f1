//! Force-directed placement for the per-subnet images.
//!
//! A plain Fruchterman-Reingold spring embedder: every pair of nodes repels,
//! every edge attracts, and a cooling temperature caps how far a node may
//! move per iteration. Positions come back normalized to the unit square.

use rand::Rng;

pub const DEFAULT_ITERATIONS: usize = 50;

pub type Point = (f64, f64);

const MIN_DISTANCE: f64 = 0.01;

/// Lays out `count` nodes connected by `edges` (pairs of node indices).
///
/// The `pinned` node stays at the center. Starting positions are drawn from
/// `rng`, so a seeded generator gives a reproducible picture.
pub fn spring_layout<R: Rng>(
    count: usize,
    edges: &[(usize, usize)],
    pinned: Option<usize>,
    iterations: usize,
    rng: &mut R,
) -> Vec<Point> {
    match count {
        0 => return Vec::new(),
        1 => return vec![(0.5, 0.5)],
        _ => {}
    }

    let mut positions: Vec<Point> = (0..count)
        .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect();
    if let Some(center) = pinned.filter(|&i| i < count) {
        positions[center] = (0.5, 0.5);
    }

    // optimal distance between nodes in a unit area
    let k = (1.0 / count as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (iterations.max(1) as f64 + 1.0);

    for _ in 0..iterations {
        let mut displacement: Vec<Point> = vec![(0.0, 0.0); count];

        for i in 0..count {
            for j in (i + 1)..count {
                let (dx, dy) = delta(positions[i], positions[j]);
                let distance = dx.hypot(dy).max(MIN_DISTANCE);
                let force = k * k / distance;
                let (fx, fy) = (dx / distance * force, dy / distance * force);
                displacement[i].0 += fx;
                displacement[i].1 += fy;
                displacement[j].0 -= fx;
                displacement[j].1 -= fy;
            }
        }

        for &(a, b) in edges {
            if a >= count || b >= count || a == b {
                continue;
            }
            let (dx, dy) = delta(positions[a], positions[b]);
            let distance = dx.hypot(dy).max(MIN_DISTANCE);
            let force = distance * distance / k;
            let (fx, fy) = (dx / distance * force, dy / distance * force);
            displacement[a].0 -= fx;
            displacement[a].1 -= fy;
            displacement[b].0 += fx;
            displacement[b].1 += fy;
        }

        for (i, (dx, dy)) in displacement.into_iter().enumerate() {
            if Some(i) == pinned {
                continue;
            }
            let length = dx.hypot(dy).max(MIN_DISTANCE);
            let step = length.min(temperature);
            positions[i].0 += dx / length * step;
            positions[i].1 += dy / length * step;
        }

        temperature -= cooling;
    }

    normalize(&mut positions, pinned);
    positions
}

fn delta(a: Point, b: Point) -> Point {
    (a.0 - b.0, a.1 - b.1)
}

/// Scales into `[0, 1]` on both axes while keeping the pinned node at the
/// center.
fn normalize(positions: &mut [Point], pinned: Option<usize>) {
    let center = pinned
        .and_then(|i| positions.get(i).copied())
        .unwrap_or_else(|| {
            let n = positions.len() as f64;
            let (sx, sy) = positions.iter().fold((0.0, 0.0), |acc, p| (acc.0 + p.0, acc.1 + p.1));
            (sx / n, sy / n)
        });

    let radius = positions
        .iter()
        .map(|p| (p.0 - center.0).abs().max((p.1 - center.1).abs()))
        .fold(0.0_f64, f64::max);
    let scale = if radius > f64::EPSILON { 0.5 / radius } else { 0.0 };

    for p in positions.iter_mut() {
        *p = (
            (0.5 + (p.0 - center.0) * scale).clamp(0.0, 1.0),
            (0.5 + (p.1 - center.1) * scale).clamp(0.0, 1.0),
        );
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
