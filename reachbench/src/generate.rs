//! Random undirected graphs with an exact edge count.
//!
//! `target_edges(n, d) = floor(n(n-1)/2 * d / 100)` distinct edges are drawn
//! uniformly without replacement. Sparse targets use rejection sampling over
//! random vertex pairs; once the target covers more than half of the pair
//! pool the generator samples pool indices directly, which keeps the work
//! bounded near density 100 while drawing from the same uniform distribution.
use std::collections::HashSet;

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use crate::error::{ReachError, Result};
use crate::graph::{Graph, Node};

const EDGE_COUNT_OVERFLOW: &str = "edge count overflows u64";

/// Number of unordered vertex pairs, `n(n-1)/2`.
pub fn max_edges(n: usize) -> Result<u64> {
    let vertices = n as u64;
    vertices
        .checked_mul(vertices.saturating_sub(1))
        .map(|pairs| pairs / 2)
        .ok_or(ReachError::InvalidSize { n, reason: EDGE_COUNT_OVERFLOW })
}

/// Edge count a graph of `n` vertices at `density` percent must have.
pub fn target_edges(n: usize, density: u32) -> Result<u64> {
    if density > 100 {
        return Err(ReachError::InvalidDensity { density });
    }
    max_edges(n)?
        .checked_mul(u64::from(density))
        .map(|scaled| scaled / 100)
        .ok_or(ReachError::InvalidSize { n, reason: EDGE_COUNT_OVERFLOW })
}

/// Generates a graph with exactly [`target_edges`] edges using `rng`.
pub fn generate<R: Rng + ?Sized>(n: usize, density: u32, rng: &mut R) -> Result<Graph> {
    let target = target_edges(n, density)?;
    if n < 2 && target > 0 {
        return Err(ReachError::InvalidSize { n, reason: "an edge needs two distinct vertices" });
    }
    let mut g = Graph::new(n)?;
    let pool = max_edges(n)?;
    if target.saturating_mul(2) > pool {
        sample_from_pool(&mut g, target, rng)?;
    } else {
        rejection_sample(&mut g, target, rng)?;
    }
    tracing::trace!(n, density, edges = target, "generated random graph");
    Ok(g)
}

/// Seeded convenience wrapper around [`generate`].
pub fn generate_seeded(n: usize, density: u32, seed: u64) -> Result<Graph> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(n, density, &mut rng)
}

fn rejection_sample<R: Rng + ?Sized>(g: &mut Graph, target: u64, rng: &mut R) -> Result<()> {
    let n = g.len();
    let mut edges: HashSet<(Node, Node)> = HashSet::with_capacity(target as usize);
    while (edges.len() as u64) < target {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v { continue; }
        let edge = (u.min(v), u.max(v));
        if edges.insert(edge) {
            g.add_edge(edge.0, edge.1)?;
        }
    }
    Ok(())
}

fn sample_from_pool<R: Rng + ?Sized>(g: &mut Graph, target: u64, rng: &mut R) -> Result<()> {
    let n = g.len();
    let pairs: Vec<(Node, Node)> = (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))).collect();
    for i in index::sample(rng, pairs.len(), target as usize) {
        let (u, v) = pairs[i];
        g.add_edge(u, v)?;
    }
    Ok(())
}
