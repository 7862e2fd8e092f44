//! All-vertices reachability: one traversal per start vertex, fanned out
//! over a worker pool and collected in start-vertex order.
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ReachError, Result};
use crate::graph::Graph;
use crate::traversal::{Method, MatrixView, NeighborView, Reachability};

/// In-memory encoding the traversals read neighbours from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    Matrix,
    List,
}

impl Representation {
    pub const ALL: [Representation; 2] = [Representation::Matrix, Representation::List];

    /// Estimated heap footprint of `graph` in this representation.
    pub fn memory_estimate_bytes(self, graph: &Graph) -> usize {
        match self {
            Representation::Matrix => graph.memory_estimate_bytes(),
            Representation::List => graph.to_adjacency_list().memory_estimate_bytes(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Matrix => "matrix",
            Representation::List => "list",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Representation {
    type Err = ReachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "matrix" => Ok(Representation::Matrix),
            "list" => Ok(Representation::List),
            other => Err(ReachError::InvalidConfig(format!(
                "unknown representation `{other}`; expected matrix or list"
            ))),
        }
    }
}

/// Computes the reachability vector of every vertex of a graph.
///
/// Each [`ReachabilityComputer::compute_all`] call builds its own pool of
/// `threads` workers and drops it before returning, so no worker state is
/// shared between experiment configurations.
#[derive(Clone, Copy, Debug)]
pub struct ReachabilityComputer {
    threads: NonZeroUsize,
}

impl Default for ReachabilityComputer {
    fn default() -> Self {
        let threads = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self { threads }
    }
}

impl ReachabilityComputer {
    /// Pool sized to the host's available parallelism.
    pub fn new() -> Self { Self::default() }

    pub fn with_threads(threads: NonZeroUsize) -> Self { Self { threads } }

    pub fn threads(&self) -> usize { self.threads.get() }

    /// Returns `n` vectors; entry `s` is the reachability vector of start
    /// vertex `s`, whatever order the workers finished in. Fails as a whole
    /// if any traversal fails.
    pub fn compute_all(
        &self,
        graph: &Graph,
        method: Method,
        representation: Representation,
    ) -> Result<Vec<Reachability>> {
        let pool = self.build_pool()?;
        tracing::debug!(
            n = graph.len(),
            %method,
            %representation,
            threads = self.threads(),
            "computing reachability"
        );
        match representation {
            Representation::Matrix => fan_out(&pool, &MatrixView::new(graph), method),
            Representation::List => fan_out(&pool, &graph.to_adjacency_list(), method),
        }
    }

    fn build_pool(&self) -> Result<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(self.threads.get())
            .thread_name(|i| format!("reach-worker-{i}"))
            .build()
            .map_err(|source| ReachError::WorkerPool { source })
    }
}

fn fan_out<V: NeighborView>(pool: &ThreadPool, view: &V, method: Method) -> Result<Vec<Reachability>> {
    let n = view.vertex_count();
    pool.install(|| {
        (0..n)
            .into_par_iter()
            .map(|start| method.traverse(view, start))
            .collect()
    })
}

/// Single-threaded reference; output is identical to
/// [`ReachabilityComputer::compute_all`] for any pool size.
pub fn compute_all_sequential(
    graph: &Graph,
    method: Method,
    representation: Representation,
) -> Result<Vec<Reachability>> {
    match representation {
        Representation::Matrix => {
            let view = MatrixView::new(graph);
            (0..graph.len()).map(|s| method.traverse(&view, s)).collect()
        }
        Representation::List => {
            let view = graph.to_adjacency_list();
            (0..graph.len()).map(|s| method.traverse(&view, s)).collect()
        }
    }
}

/// [`ReachabilityComputer::compute_all`] with a pool sized to the host.
pub fn compute_all(graph: &Graph, method: Method, representation: Representation) -> Result<Vec<Reachability>> {
    ReachabilityComputer::new().compute_all(graph, method, representation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_seeded;
    use rstest::rstest;

    fn threads(n: usize) -> ReachabilityComputer {
        ReachabilityComputer::with_threads(NonZeroUsize::new(n).unwrap())
    }

    #[rstest]
    #[case(Method::Bfs, Representation::Matrix)]
    #[case(Method::Bfs, Representation::List)]
    #[case(Method::Dfs, Representation::Matrix)]
    #[case(Method::Dfs, Representation::List)]
    fn two_edge_path_scenario(#[case] method: Method, #[case] repr: Representation) {
        let mut g = Graph::new(4).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let all = threads(3).compute_all(&g, method, repr).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], vec![true, true, true, false]);
        assert_eq!(all[1], vec![true, true, true, false]);
        assert_eq!(all[3], vec![false, false, false, true]);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    fn parallel_matches_sequential(#[case] workers: usize) {
        let g = generate_seeded(60, 3, 2024).unwrap();
        for method in Method::ALL {
            for repr in Representation::ALL {
                let par = threads(workers).compute_all(&g, method, repr).unwrap();
                let seq = compute_all_sequential(&g, method, repr).unwrap();
                assert_eq!(par, seq, "{method} {repr} with {workers} workers");
            }
        }
    }

    #[test]
    fn complete_graph_is_all_true() {
        let g = generate_seeded(5, 100, 3).unwrap();
        for method in Method::ALL {
            for repr in Representation::ALL {
                let all = compute_all(&g, method, repr).unwrap();
                assert!(all.iter().all(|row| row.iter().all(|&r| r)));
            }
        }
    }

    #[test]
    fn zero_density_only_reaches_self() {
        let g = generate_seeded(12, 0, 3).unwrap();
        let all = compute_all(&g, Method::Dfs, Representation::List).unwrap();
        for (s, row) in all.iter().enumerate() {
            assert_eq!(row.iter().filter(|&&r| r).count(), 1);
            assert!(row[s]);
        }
    }

    #[test]
    fn empty_graph_yields_no_vectors() {
        let g = Graph::new(0).unwrap();
        assert!(compute_all(&g, Method::Bfs, Representation::Matrix).unwrap().is_empty());
    }

    #[rstest]
    #[case("MATRIX", Representation::Matrix)]
    #[case("list", Representation::List)]
    #[case(" List", Representation::List)]
    fn representation_parses_case_insensitively(#[case] raw: &str, #[case] expected: Representation) {
        assert_eq!(raw.parse::<Representation>().unwrap(), expected);
        assert!("csr".parse::<Representation>().is_err());
    }

    #[test]
    fn memory_estimate_follows_representation() {
        let sparse = generate_seeded(100, 5, 1).unwrap();
        let dense = generate_seeded(100, 95, 1).unwrap();
        let matrix = Representation::Matrix.memory_estimate_bytes(&sparse);
        assert_eq!(matrix, sparse.memory_estimate_bytes());
        assert_eq!(matrix, Representation::Matrix.memory_estimate_bytes(&dense));
        assert!(Representation::List.memory_estimate_bytes(&sparse) < Representation::List.memory_estimate_bytes(&dense));
        assert_eq!(
            Representation::List.memory_estimate_bytes(&dense),
            dense.to_adjacency_list().memory_estimate_bytes()
        );
    }

    #[test]
    fn default_uses_host_parallelism() {
        assert!(ReachabilityComputer::new().threads() >= 1);
    }
}
