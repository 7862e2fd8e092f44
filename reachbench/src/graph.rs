//! Undirected graph stored as a dense symmetric adjacency matrix, with an
//! adjacency-list view derived on demand.
use crate::error::{ReachError, Result};

pub type Node = usize;

/// Undirected, unweighted graph backed by an `n x n` boolean matrix.
///
/// The matrix is symmetric with an all-`false` diagonal; [`Graph::add_edge`]
/// is the only mutator and preserves both properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    adjacency: Vec<bool>,
}

impl Graph {
    /// Allocates an edgeless graph with `n` vertices.
    ///
    /// Fails with [`ReachError::InvalidSize`] when the `n x n` matrix cannot
    /// be addressed.
    pub fn new(n: usize) -> Result<Self> {
        let cells = n.checked_mul(n).ok_or(ReachError::InvalidSize {
            n,
            reason: "adjacency matrix size overflows usize",
        })?;
        Ok(Self { n, adjacency: vec![false; cells] })
    }

    pub fn len(&self) -> usize { self.n }
    pub fn is_empty(&self) -> bool { self.n == 0 }

    fn check(&self, v: Node) -> Result<()> {
        if v < self.n { Ok(()) } else { Err(ReachError::IndexOutOfRange { index: v, n: self.n }) }
    }

    /// Adds the undirected edge `{u, v}`. Self-loops are ignored.
    pub fn add_edge(&mut self, u: Node, v: Node) -> Result<()> {
        self.check(u)?;
        self.check(v)?;
        if u != v {
            self.adjacency[u * self.n + v] = true;
            self.adjacency[v * self.n + u] = true;
        }
        Ok(())
    }

    pub fn has_edge(&self, u: Node, v: Node) -> Result<bool> {
        self.check(u)?;
        self.check(v)?;
        Ok(self.adjacency[u * self.n + v])
    }

    /// Matrix row of `v`: `row(v)[j]` is true iff `{v, j}` is an edge.
    pub fn row(&self, v: Node) -> Result<&[bool]> {
        self.check(v)?;
        Ok(&self.adjacency[v * self.n..(v + 1) * self.n])
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        (0..self.n)
            .map(|u| self.adjacency[u * self.n + u + 1..(u + 1) * self.n].iter().filter(|&&e| e).count())
            .sum()
    }

    /// Derives the adjacency-list view by scanning each row, so neighbours
    /// come out in ascending index order.
    pub fn to_adjacency_list(&self) -> AdjacencyList {
        let lists = self
            .adjacency
            .chunks(self.n.max(1))
            .take(self.n)
            .map(|row| row.iter().enumerate().filter(|(_, &e)| e).map(|(j, _)| j).collect())
            .collect();
        AdjacencyList { lists }
    }

    pub fn memory_estimate_bytes(&self) -> usize {
        self.adjacency.len() * std::mem::size_of::<bool>() + 3 * std::mem::size_of::<usize>()
    }
}

/// Adjacency-list view of a [`Graph`]; each list is sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyList {
    lists: Vec<Vec<Node>>,
}

impl AdjacencyList {
    pub fn len(&self) -> usize { self.lists.len() }
    pub fn is_empty(&self) -> bool { self.lists.is_empty() }

    pub fn neighbors(&self, v: Node) -> Result<&[Node]> {
        self.lists
            .get(v)
            .map(Vec::as_slice)
            .ok_or(ReachError::IndexOutOfRange { index: v, n: self.lists.len() })
    }

    pub fn memory_estimate_bytes(&self) -> usize {
        let n = self.lists.len();
        let m = self.lists.iter().map(Vec::len).sum::<usize>();
        let entry_bytes = m * std::mem::size_of::<Node>();
        let vec_headers = n * 3 * std::mem::size_of::<usize>();
        let outer_vec_header = 3 * std::mem::size_of::<usize>();
        entry_bytes + vec_headers + outer_vec_header
    }
}
