//! Breadth-first and depth-first reachability over any neighbour view.
//!
//! Both algorithms only see a graph through [`NeighborView`], so the dense
//! matrix and the adjacency list share one implementation. The result is a
//! set indicator, which makes it independent of visitation order.
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReachError, Result};
use crate::graph::{AdjacencyList, Graph, Node};

/// `reachable[i]` is true iff vertex `i` is reachable from the start vertex.
pub type Reachability = Vec<bool>;

/// Read-only access to the neighbours of each vertex.
pub trait NeighborView: Sync {
    fn vertex_count(&self) -> usize;

    /// Neighbours of `v` in ascending index order. `v` must be in range.
    fn neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_;
}

/// Matrix representation: neighbours come from a row scan.
#[derive(Clone, Copy, Debug)]
pub struct MatrixView<'g> {
    graph: &'g Graph,
}

impl<'g> MatrixView<'g> {
    pub fn new(graph: &'g Graph) -> Self { Self { graph } }
}

impl NeighborView for MatrixView<'_> {
    fn vertex_count(&self) -> usize { self.graph.len() }

    fn neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_ {
        self.graph
            .row(v)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .filter_map(|(j, &e)| e.then_some(j))
    }
}

impl NeighborView for AdjacencyList {
    fn vertex_count(&self) -> usize { self.len() }

    fn neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_ {
        self.neighbors(v).unwrap_or(&[]).iter().copied()
    }
}

fn start_visited<V: NeighborView>(view: &V, start: Node) -> Result<Reachability> {
    let n = view.vertex_count();
    if start >= n {
        return Err(ReachError::IndexOutOfRange { index: start, n });
    }
    let mut visited = vec![false; n];
    visited[start] = true;
    Ok(visited)
}

/// Breadth-first reachability from `start`.
pub fn bfs<V: NeighborView>(view: &V, start: Node) -> Result<Reachability> {
    let mut visited = start_visited(view, start)?;
    let mut queue = VecDeque::from([start]);
    while let Some(v) = queue.pop_front() {
        for next in view.neighbors_of(v) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    Ok(visited)
}

/// Depth-first reachability from `start`.
///
/// Iterative: the stack holds one partially consumed neighbour iterator per
/// open vertex, so vertices are entered in the same order a recursive walk
/// over ascending neighbours would enter them, without recursion depth
/// growing with `n`.
pub fn dfs<V: NeighborView>(view: &V, start: Node) -> Result<Reachability> {
    let mut visited = start_visited(view, start)?;
    let mut stack = vec![view.neighbors_of(start)];
    while let Some(frontier) = stack.last_mut() {
        match frontier.next() {
            Some(next) => {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(view.neighbors_of(next));
                }
            }
            None => { stack.pop(); }
        }
    }
    Ok(visited)
}

/// Traversal strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "BFS")]
    Bfs,
    #[serde(rename = "DFS")]
    Dfs,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Bfs, Method::Dfs];

    pub fn traverse<V: NeighborView>(self, view: &V, start: Node) -> Result<Reachability> {
        match self {
            Method::Bfs => bfs(view, start),
            Method::Dfs => dfs(view, start),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Bfs => "BFS",
            Method::Dfs => "DFS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Method {
    type Err = ReachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Method::Bfs),
            "dfs" => Ok(Method::Dfs),
            other => Err(ReachError::InvalidConfig(format!("unknown method `{other}`; expected BFS or DFS"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(n).unwrap();
        for &(u, v) in edges { g.add_edge(u, v).unwrap(); }
        g
    }

    fn all_four(g: &Graph, start: Node) -> [Reachability; 4] {
        let m = MatrixView::new(g);
        let l = g.to_adjacency_list();
        [bfs(&m, start).unwrap(), bfs(&l, start).unwrap(), dfs(&m, start).unwrap(), dfs(&l, start).unwrap()]
    }

    #[test]
    fn two_edge_path_scenario() {
        let g = graph(4, &[(0, 1), (1, 2)]);
        for r in all_four(&g, 0) { assert_eq!(r, vec![true, true, true, false]); }
        for r in all_four(&g, 3) { assert_eq!(r, vec![false, false, false, true]); }
    }

    #[test]
    fn single_vertex() {
        let g = graph(1, &[]);
        for r in all_four(&g, 0) { assert_eq!(r, vec![true]); }
    }

    #[test]
    fn neighbor_views_agree() {
        let g = graph(6, &[(5, 0), (0, 3), (3, 5), (1, 4)]);
        let m = MatrixView::new(&g);
        let l = g.to_adjacency_list();
        for v in 0..6 {
            let a: Vec<_> = m.neighbors_of(v).collect();
            let b: Vec<_> = l.neighbors_of(v).collect();
            assert_eq!(a, b);
            assert!(a.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn long_path_does_not_overflow_stack() {
        let n = 5_000;
        let mut g = Graph::new(n).unwrap();
        for i in 0..n - 1 { g.add_edge(i, i + 1).unwrap(); }
        assert!(dfs(&MatrixView::new(&g), 0).unwrap().iter().all(|&r| r));
        assert!(dfs(&g.to_adjacency_list(), n - 1).unwrap().iter().all(|&r| r));
    }

    #[test]
    fn components_are_separated() {
        let g = graph(7, &[(0, 4), (4, 6), (1, 2), (2, 5), (5, 1)]);
        let expected_a = vec![true, false, false, false, true, false, true];
        let expected_b = vec![false, true, true, false, false, true, false];
        for r in all_four(&g, 6) { assert_eq!(r, expected_a); }
        for r in all_four(&g, 2) { assert_eq!(r, expected_b); }
        for r in all_four(&g, 3) { assert_eq!(r.iter().filter(|&&x| x).count(), 1); }
    }

    #[test]
    fn start_out_of_range_is_rejected() {
        let g = graph(3, &[(0, 1)]);
        let m = MatrixView::new(&g);
        assert!(matches!(bfs(&m, 3), Err(ReachError::IndexOutOfRange { index: 3, n: 3 })));
        assert!(matches!(dfs(&g.to_adjacency_list(), 7), Err(ReachError::IndexOutOfRange { .. })));
        let empty = graph(0, &[]);
        assert!(bfs(&MatrixView::new(&empty), 0).is_err());
        assert!(dfs(&empty.to_adjacency_list(), 0).is_err());
    }

    #[rstest]
    #[case("BFS", Method::Bfs)]
    #[case("bfs", Method::Bfs)]
    #[case(" Dfs ", Method::Dfs)]
    fn method_parses_case_insensitively(#[case] raw: &str, #[case] expected: Method) {
        assert_eq!(raw.parse::<Method>().unwrap(), expected);
    }

    #[test]
    fn unknown_method_is_rejected() {
        assert!(matches!("dijkstra".parse::<Method>(), Err(ReachError::InvalidConfig(_))));
        assert_eq!(Method::Dfs.to_string(), "DFS");
    }
}
