pub mod bitset;
pub mod csr;
pub mod degeneracy;
pub mod gnp;
pub mod subgraph;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;

use std::ops::Range;

pub use bitset::BitSet;
pub use csr::CsrGraph;
pub use degeneracy::{DegeneracyOrder, DegeneracyOrdering};
pub use gnp::GnpGenerator;
pub use subgraph::{complement_of_right_neighborhood, AdjRow, SubVertex, Subgraph, SubgraphSlot};

/// An undirected edge; the orientation of the tuple carries no meaning.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Edge(pub Node, pub Node);

impl Edge {
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl From<(Node, Node)> for Edge {
    fn from((u, v): (Node, Node)) -> Self {
        Edge(u, v)
    }
}

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns a range over V.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

pub trait AdjacencyList: GraphNodeOrder {
    /// Returns the neighbors of a given vertex, sorted ascending.
    /// ** Panics if u >= n **
    fn neighbors_of(&self, u: Node) -> &[Node];

    /// Returns the number of neighbors of `u`
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).len() as NumNodes
    }

    fn max_degree(&self) -> NumNodes {
        self.vertices_range()
            .map(|u| self.degree_of(u))
            .max()
            .unwrap_or(0)
    }

    fn min_degree(&self) -> NumNodes {
        self.vertices_range()
            .map(|u| self.degree_of(u))
            .min()
            .unwrap_or(0)
    }
}

/// Provides efficient tests whether an edge exists
pub trait AdjacencyTest {
    /// Returns *true* exactly if the graph contains the edge (u, v)
    fn has_edge(&self, u: Node, v: Node) -> bool;
}
