//! Small reference implementations and fixture graphs shared by tests.

use crate::graph::*;

/// Clique number by exhaustive branch extension. Only for tiny graphs.
pub fn naive_clique_number<G: AdjacencyTest + GraphNodeOrder>(graph: &G) -> NumNodes {
    fn extend<G: AdjacencyTest>(
        graph: &G,
        candidates: &[Node],
        size: NumNodes,
        best: &mut NumNodes,
    ) {
        *best = (*best).max(size);
        if size + candidates.len() as NumNodes <= *best {
            return;
        }

        for (i, &v) in candidates.iter().enumerate() {
            let rest: Vec<Node> = candidates[i + 1..]
                .iter()
                .copied()
                .filter(|&w| graph.has_edge(v, w))
                .collect();
            extend(graph, &rest, size + 1, best);
        }
    }

    let candidates: Vec<Node> = graph.vertices_range().collect();
    let mut best = graph.number_of_nodes().min(1);
    extend(graph, &candidates, 0, &mut best);
    best
}

/// Smallest vertex cover size by subset enumeration. Only for n <= 20 or so.
pub fn naive_vertex_cover_number(sg: &Subgraph) -> usize {
    let n = sg.n();
    assert!(n < usize::BITS as usize);

    (0u64..(1 << n))
        .filter(|mask| {
            sg.adj.iter().enumerate().all(|(u, row)| {
                mask & (1 << u) != 0 || row.iter().all(|&w| mask & (1 << w) != 0)
            })
        })
        .map(|mask| mask.count_ones() as usize)
        .min()
        .unwrap()
}

/// Decision variant of [`naive_vertex_cover_number`].
pub fn naive_has_vertex_cover(sg: &Subgraph, k: i64) -> bool {
    k >= 0 && naive_vertex_cover_number(sg) as i64 <= k
}

/// The Petersen graph: 3-regular, girth 5, clique number 2.
pub fn petersen_graph() -> CsrGraph {
    let outer = (0..5).map(|i| (i, (i + 1) % 5));
    let spokes = (0..5).map(|i| (i, i + 5));
    let inner = (0..5).map(|i| (5 + i, 5 + (i + 2) % 5));

    CsrGraph::from_edges(10, outer.chain(spokes).chain(inner))
}
