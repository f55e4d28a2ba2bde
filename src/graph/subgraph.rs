use super::*;
use crate::errors::InvariantCheck;
use smallvec::SmallVec;
use std::sync::OnceLock;
use thiserror::Error;

/// Adjacency row of a subgraph; right-neighbourhoods have at most d+1
/// vertices, so rows are usually tiny.
pub type AdjRow = SmallVec<[Node; 8]>;

/// A vertex of a subgraph. Its local index in the vertex vector is the
/// identity used by the adjacency rows; `vertex` points back to the graph it
/// was taken from, `degree` is local to the subgraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubVertex {
    pub vertex: Node,
    pub degree: NumNodes,
}

/// Self-contained subgraph consumed by the kernels and the cover solver.
///
/// Adjacency rows are sorted ascending and symmetric; `m` counts undirected
/// edges.
#[derive(Clone, Debug, Default)]
pub struct Subgraph {
    pub m: usize,
    pub vertices: Vec<SubVertex>,
    pub adj: Vec<AdjRow>,
    pub largest_degree_vertex: Node,
}

impl Subgraph {
    pub fn n(&self) -> usize {
        self.vertices.len()
    }

    /// Builds a subgraph over local vertices 0..n from an edge list; loops
    /// and duplicates are dropped. Mostly useful in tests.
    pub fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        let mut adj = vec![AdjRow::new(); n as usize];

        for edge in edges {
            let Edge(u, v) = edge.into();
            if u == v {
                continue;
            }
            adj[u as usize].push(v);
            adj[v as usize].push(u);
        }

        for row in &mut adj {
            row.sort_unstable();
            row.dedup();
        }

        Self::from_rows((0..n).collect(), adj)
    }

    /// Finalises a subgraph from sorted symmetric rows, computing degrees,
    /// the edge count and the largest-degree vertex.
    pub fn from_rows(names: Vec<Node>, adj: Vec<AdjRow>) -> Self {
        let mut largest_degree = 0;
        let mut largest_degree_vertex = 0;
        let mut total = 0usize;

        let vertices = names
            .into_iter()
            .zip(&adj)
            .enumerate()
            .map(|(pos, (vertex, row))| {
                let degree = row.len() as NumNodes;
                total += row.len();
                if degree > largest_degree {
                    largest_degree = degree;
                    largest_degree_vertex = pos as Node;
                }
                SubVertex { vertex, degree }
            })
            .collect();

        Self {
            m: total / 2,
            vertices,
            adj,
            largest_degree_vertex,
        }
    }

    /// Builds the subgraph that survives after masking out `removed`
    /// vertices: survivors are renumbered densely, rows are filtered and
    /// degrees recomputed. Renumbering is monotone, so sorted rows stay
    /// sorted.
    pub fn compact(&self, removed: &BitSet) -> Subgraph {
        let n = self.n();
        const NOT_SET: Node = Node::MAX;
        let mut mask = vec![NOT_SET; n];

        let mut names = Vec::with_capacity(n - removed.cardinality() as usize);
        for pos in 0..n {
            if !removed.get_bit(pos as Node) {
                mask[pos] = names.len() as Node;
                names.push(self.vertices[pos].vertex);
            }
        }

        let mut adj = Vec::with_capacity(names.len());
        for pos in 0..n {
            if removed.get_bit(pos as Node) {
                continue;
            }
            adj.push(
                self.adj[pos]
                    .iter()
                    .filter(|&&w| !removed.get_bit(w))
                    .map(|&w| mask[w as usize])
                    .collect::<AdjRow>(),
            );
        }

        Self::from_rows(names, adj)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubgraphError {
    #[error("adjacency row of local vertex {0} is not sorted strictly ascending")]
    UnsortedRow(Node),
    #[error("local vertex {0} has a self loop")]
    SelfLoop(Node),
    #[error("edge ({0}, {1}) has no reverse entry")]
    Asymmetric(Node, Node),
    #[error("degree of local vertex {0} does not match its adjacency row")]
    DegreeMismatch(Node),
    #[error("edge count does not match the adjacency rows")]
    EdgeCountMismatch,
}

impl InvariantCheck<SubgraphError> for Subgraph {
    fn is_correct(&self) -> Result<(), SubgraphError> {
        let mut total = 0usize;

        for (pos, (v, row)) in self.vertices.iter().zip(&self.adj).enumerate() {
            let pos = pos as Node;

            if !row.windows(2).all(|w| w[0] < w[1]) {
                return Err(SubgraphError::UnsortedRow(pos));
            }

            if row.binary_search(&pos).is_ok() {
                return Err(SubgraphError::SelfLoop(pos));
            }

            if v.degree as usize != row.len() {
                return Err(SubgraphError::DegreeMismatch(pos));
            }

            for &w in row {
                if self.adj[w as usize].binary_search(&pos).is_err() {
                    return Err(SubgraphError::Asymmetric(pos, w));
                }
            }

            total += row.len();
        }

        if total != 2 * self.m {
            return Err(SubgraphError::EdgeCountMismatch);
        }

        Ok(())
    }
}

/// One lazily materialised right-neighbourhood per vertex.
///
/// `members` is written once by the degeneracy engine before any worker
/// starts; the complement subgraph is built at most once by the first worker
/// that needs it. [`OnceLock`] elects a single builder and publishes the
/// result with release/acquire semantics, so readers either observe a fully
/// built subgraph or build it themselves.
#[derive(Debug, Default)]
pub struct SubgraphSlot {
    /// The pivot itself followed by its right neighbours in ascending
    /// internal-index order.
    pub members: Vec<Node>,
    complement: OnceLock<Subgraph>,
}

impl SubgraphSlot {
    pub fn created(&self) -> bool {
        self.complement.get().is_some()
    }
}

/// Returns the complement of the subgraph induced by pivot `v` and its right
/// neighbours, materialising it on first use.
///
/// Two members are connected here exactly if they are NOT adjacent in the
/// underlying graph; the pivot sits at local position 0 and is isolated in
/// the complement, so the cover computations effectively run on positions
/// 1..n.
pub fn complement_of_right_neighborhood<'a>(
    v: Node,
    slots: &'a [SubgraphSlot],
    position: &[NumNodes],
) -> &'a Subgraph {
    slots[v as usize]
        .complement
        .get_or_init(|| build_complement(v, slots, position))
}

/// Non-adjacency of two right neighbours u, w of the pivot is decided by a
/// merge walk: w is adjacent to u in the graph exactly if w shows up in u's
/// own member list (both lists are ascending). The `position` guard handles
/// each unordered pair exactly once, from the endpoint placed earlier in the
/// degeneracy ordering.
///
/// See G. Manoussakis. New algorithms for cliques and related structures in
/// k-degenerate graphs. arXiv:1501.01819v4, 2016.
fn build_complement(v: Node, slots: &[SubgraphSlot], position: &[NumNodes]) -> Subgraph {
    let members = &slots[v as usize].members;
    let n = members.len();

    let mut adj = vec![AdjRow::new(); n];

    for i_pos in 1..n {
        let i = members[i_pos];
        let i_members = &slots[i as usize].members;

        let push_pair = |adj: &mut Vec<AdjRow>, w_pos: usize| {
            adj[i_pos].push(w_pos as Node);
            adj[w_pos].push(i_pos as Node);
        };

        let mut c1 = 1;
        let mut c2 = 1;
        while c1 < n && c2 < i_members.len() {
            let w = members[c1];
            let x = i_members[c2];

            if x < w {
                c2 += 1;
            } else if w == x {
                c1 += 1;
                c2 += 1;
            } else if w == i {
                c1 += 1;
            } else {
                // w < x: not adjacent in the graph
                if position[i as usize] < position[w as usize] {
                    push_pair(&mut adj, c1);
                }
                c1 += 1;
            }
        }
        while c1 < n {
            let w = members[c1];
            if w != i && position[i as usize] < position[w as usize] {
                push_pair(&mut adj, c1);
            }
            c1 += 1;
        }
    }

    // rows collect entries out of order across outer iterations
    for row in &mut adj {
        row.sort_unstable();
    }

    Subgraph::from_rows(members.clone(), adj)
}
