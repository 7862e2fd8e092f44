//! reachbench: all-vertices reachability on random undirected graphs.
//!
//! Graphs with an exact edge count are generated at a given density, every
//! vertex's reachable set is computed with BFS or DFS over a dense adjacency
//! matrix or an adjacency list, and the per-graph batch is fanned out over a
//! scoped worker pool. The experiment runner sweeps a grid of sizes and
//! densities and reports mean wall-clock times.
pub mod error;
pub mod experiment;
pub mod generate;
pub mod graph;
pub mod logging;
pub mod reachability;
pub mod sink;
pub mod traversal;

pub use error::{ErrorCode, ReachError, Result};
pub use experiment::{ExperimentConfig, ExperimentRecord, ExperimentRunner, Progress};
pub use generate::{generate, generate_seeded, max_edges, target_edges};
pub use graph::{AdjacencyList, Graph, Node};
pub use reachability::{compute_all, compute_all_sequential, ReachabilityComputer, Representation};
pub use sink::{write_records, OutputFormat};
pub use traversal::{bfs, dfs, MatrixView, Method, NeighborView, Reachability};
