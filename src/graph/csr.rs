use super::*;
use itertools::Itertools;
use log::info;

/// Immutable graph store: CSR neighbour lists plus the mapping back to the
/// external vertex names of the input file.
///
/// All neighbour lists are sorted ascending; the graph is simple (no loops,
/// no duplicate edges). Both properties are established by the constructors
/// and relied upon by everything downstream.
#[derive(Clone, Debug)]
pub struct CsrGraph {
    name: String,
    edge_begin: Vec<NumEdges>,
    edge_to: Vec<Node>,
    alias: Vec<i64>,
    min_degree: NumNodes,
    max_degree: NumNodes,
}

impl CsrGraph {
    /// Builds the CSR arrays from per-vertex neighbour lists that are already
    /// sorted, deduplicated, loop-free and symmetric.
    pub fn from_sorted_adjacency(name: &str, alias: Vec<i64>, adj: Vec<Vec<Node>>) -> Self {
        let n = adj.len();
        assert!(n > 0);
        assert_eq!(alias.len(), n);

        let mut edge_begin = Vec::with_capacity(n + 1);
        let mut edge_to = Vec::with_capacity(adj.iter().map(|l| l.len()).sum());
        let mut min_degree = NumNodes::MAX;
        let mut max_degree = 0;

        edge_begin.push(0);
        for list in &adj {
            debug_assert!(list.windows(2).all(|w| w[0] < w[1]));

            let degree = list.len() as NumNodes;
            min_degree = min_degree.min(degree);
            max_degree = max_degree.max(degree);

            edge_to.extend_from_slice(list);
            edge_begin.push(edge_to.len() as NumEdges);
        }

        Self {
            name: name.to_owned(),
            edge_begin,
            edge_to,
            alias,
            min_degree,
            max_degree,
        }
    }

    /// Builds a graph from an edge iterator; loops and duplicates are dropped.
    /// External names default to the internal indices.
    pub fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        let mut adj = vec![Vec::new(); n as usize];

        for edge in edges {
            let Edge(u, v) = edge.into();
            if u == v {
                continue;
            }
            adj[u as usize].push(v);
            adj[v as usize].push(u);
        }

        for list in &mut adj {
            list.sort_unstable();
            list.dedup();
        }

        let alias = (0..n as i64).collect_vec();
        Self::from_sorted_adjacency("", alias, adj)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias_of(&self, u: Node) -> i64 {
        self.alias[u as usize]
    }

    #[inline(always)]
    fn offset_range(&self, u: Node) -> std::ops::Range<usize> {
        (self.edge_begin[u as usize] as usize)..(self.edge_begin[(u + 1) as usize] as usize)
    }

    /// Logs the `<name n m delta Delta>` summary line.
    pub fn log_summary(&self) {
        info!(
            "{} n={} m={} delta={} Delta={}",
            self.name,
            self.number_of_nodes(),
            self.number_of_edges(),
            self.min_degree(),
            self.max_degree()
        );
    }

    /// Logs the full adjacency structure using the external vertex names.
    pub fn log_adjacency(&self) {
        self.log_summary();
        for u in self.vertices_range() {
            info!(
                "{}({}): {}",
                self.alias_of(u),
                self.degree_of(u),
                self.neighbors_of(u)
                    .iter()
                    .map(|&v| self.alias_of(v))
                    .join(" ")
            );
        }
    }
}

impl GraphNodeOrder for CsrGraph {
    fn number_of_nodes(&self) -> NumNodes {
        (self.edge_begin.len() - 1) as NumNodes
    }
}

impl GraphEdgeOrder for CsrGraph {
    fn number_of_edges(&self) -> NumEdges {
        self.edge_to.len() as NumEdges / 2
    }
}

impl AdjacencyList for CsrGraph {
    fn neighbors_of(&self, u: Node) -> &[Node] {
        &self.edge_to[self.offset_range(u)]
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        (self.edge_begin[(u + 1) as usize] - self.edge_begin[u as usize]) as NumNodes
    }

    fn max_degree(&self) -> NumNodes {
        self.max_degree
    }

    fn min_degree(&self) -> NumNodes {
        self.min_degree
    }
}

impl AdjacencyTest for CsrGraph {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.neighbors_of(u).binary_search(&v).is_ok()
    }
}
