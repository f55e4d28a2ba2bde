use super::*;
use std::collections::VecDeque;

/// Output of the degeneracy-ordering engine.
///
/// `ordering[i]` is the vertex placed at position i, `position` its inverse,
/// and `right_degree[v]` the number of neighbours of v placed after it. The
/// clique bounds satisfy `clique_lb <= omega <= clique_ub`.
#[derive(Clone, Debug)]
pub struct DegeneracyOrdering {
    pub ordering: Vec<Node>,
    pub position: Vec<NumNodes>,
    pub right_degree: Vec<NumNodes>,
    pub degeneracy: NumNodes,
    pub clique_lb: NumNodes,
    pub clique_ub: NumNodes,
}

pub trait DegeneracyOrder: AdjacencyList + Sized {
    /// Computes the degeneracy ordering and the clique bounds.
    fn degeneracy_ordering(&self) -> DegeneracyOrdering {
        matula_beck(self, false).0
    }

    /// As [`DegeneracyOrder::degeneracy_ordering`], but additionally
    /// populates the member list of every right-neighbourhood subgraph for
    /// the clique search.
    fn degeneracy_ordering_with_subgraphs(&self) -> (DegeneracyOrdering, Vec<SubgraphSlot>) {
        let (ordering, slots) = matula_beck(self, true);
        (ordering, slots.unwrap())
    }
}

impl<G: AdjacencyList> DegeneracyOrder for G {}

/// Bucket variant of the Matula-Beck smallest-last ordering in O(n + m).
///
/// Buckets are stored implicitly: `ordering` is partitioned into maximal runs
/// of equal residual degree and `bucket_start[k]` points at the first vertex
/// of run k. Moving a vertex one bucket down swaps it with the head of its
/// run and advances the run boundary.
fn matula_beck<G: AdjacencyList>(
    graph: &G,
    populate: bool,
) -> (DegeneracyOrdering, Option<Vec<SubgraphSlot>>) {
    let n = graph.len();
    let max_degree = graph.max_degree() as usize;

    let mut right_degree: Vec<NumNodes> =
        graph.vertices_range().map(|u| graph.degree_of(u)).collect();

    // counting sort of the vertices by degree
    let mut bucket_start = vec![0usize; max_degree + 1];
    for &rd in &right_degree {
        bucket_start[rd as usize] += 1;
    }
    let mut count = 0;
    for entry in bucket_start.iter_mut() {
        let size = *entry;
        *entry = count;
        count += size;
    }

    let mut ordering = vec![0 as Node; n];
    let mut position = vec![0 as NumNodes; n];
    for u in 0..n {
        position[u] = bucket_start[right_degree[u] as usize] as NumNodes;
        ordering[position[u] as usize] = u as Node;
        bucket_start[right_degree[u] as usize] += 1;
    }
    for k in (1..=max_degree).rev() {
        bucket_start[k] = bucket_start[k - 1];
    }
    bucket_start[0] = 0;

    let mut slots =
        populate.then(|| (0..n).map(|_| SubgraphSlot::default()).collect::<Vec<_>>());

    let mut degeneracy: NumNodes = 0;
    let mut clique_lb: NumNodes = 0;
    // position of the first vertex of the d-core, provided the residual graph
    // is d-regular from there on
    let mut d_core_start = None;

    for i in 0..n {
        let min_v = ordering[i] as usize;
        let rd_min = right_degree[min_v];

        if let Some(slots) = slots.as_mut() {
            let members = &mut slots[min_v].members;
            members.reserve_exact(rd_min as usize + 1);
            members.push(min_v as Node);
        }

        bucket_start[rd_min as usize] += 1;

        if rd_min > degeneracy {
            degeneracy = rd_min;
            if right_degree[ordering[n - 1] as usize] == degeneracy {
                d_core_start = Some(i);
            }
        }

        // the remaining vertices induce a clique
        if clique_lb == 0 && rd_min as usize == n - i - 1 {
            clique_lb = rd_min + 1;
        }

        for &w in graph.neighbors_of(min_v as Node) {
            let w = w as usize;
            if position[w] <= position[min_v] {
                continue;
            }

            if let Some(slots) = slots.as_mut() {
                slots[min_v].members.push(w as Node);
            }

            let rd_w = right_degree[w] as usize;

            // swap w with the head of its bucket, then shrink the bucket
            let pu = bucket_start[rd_w];
            let u = ordering[pu] as usize;
            if w != u {
                ordering[pu] = w as Node;
                ordering[position[w] as usize] = u as Node;
                position[u] = position[w];
                position[w] = pu as NumNodes;
            }
            if rd_w == rd_min as usize {
                // w drops into a bucket that opens right behind min_v
                bucket_start[rd_w - 1] = i + 1;
            }
            bucket_start[rd_w] += 1;
            right_degree[w] -= 1;
        }
    }

    let mut clique_ub = degeneracy + 1;

    // No K_{d+1} fits if the d-core is d-regular and none of its components
    // has exactly d+1 vertices. A d-core starting at position 0 is left
    // alone, matching the bound reported for regular graphs.
    if let Some(start) = d_core_start {
        if start > 0 && clique_lb < clique_ub {
            let target = degeneracy as usize + 1;
            let mut discovered = BitSet::new(n as NumNodes);
            let mut queue = VecDeque::new();
            let mut has_tight_component = false;

            'bfs: for &root in &ordering[start..] {
                if discovered.get_bit(root) {
                    continue;
                }
                discovered.set_bit(root);
                queue.push_back(root);
                let mut size = 0usize;

                while let Some(v) = queue.pop_front() {
                    size += 1;
                    for &w in graph.neighbors_of(v) {
                        if position[w as usize] as usize >= start && !discovered.get_bit(w) {
                            discovered.set_bit(w);
                            queue.push_back(w);
                        }
                    }
                }

                if size == target {
                    has_tight_component = true;
                    break 'bfs;
                }
            }

            if !has_tight_component {
                clique_ub = degeneracy;
            }
        }
    }

    (
        DegeneracyOrdering {
            ordering,
            position,
            right_degree,
            degeneracy,
            clique_lb,
            clique_ub,
        },
        slots,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::petersen_graph;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn assert_is_degeneracy_ordering(graph: &CsrGraph, ord: &DegeneracyOrdering) {
        let n = graph.len();

        // position is the inverse of ordering
        for i in 0..n {
            assert_eq!(ord.position[ord.ordering[i] as usize] as usize, i);
        }

        // right_degree counts the neighbours placed later
        for v in graph.vertices_range() {
            let expected = graph
                .neighbors_of(v)
                .iter()
                .filter(|&&w| ord.position[w as usize] > ord.position[v as usize])
                .count();
            assert_eq!(ord.right_degree[v as usize] as usize, expected);
        }

        assert_eq!(
            ord.degeneracy,
            ord.right_degree.iter().copied().max().unwrap()
        );
        assert!(ord.clique_lb <= ord.clique_ub);
    }

    #[test]
    fn triangle() {
        let graph = CsrGraph::from_edges(3, [(0, 1), (1, 2), (0, 2)]);
        let ord = graph.degeneracy_ordering();

        assert_is_degeneracy_ordering(&graph, &ord);
        assert_eq!(ord.degeneracy, 2);
        assert_eq!(ord.clique_lb, 3);
        assert_eq!(ord.clique_ub, 3);
    }

    #[test]
    fn path() {
        let graph = CsrGraph::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        let ord = graph.degeneracy_ordering();

        assert_is_degeneracy_ordering(&graph, &ord);
        assert_eq!(ord.degeneracy, 1);
        assert_eq!(ord.clique_lb, 2);
        assert_eq!(ord.clique_ub, 2);
    }

    #[test]
    fn five_cycle() {
        let graph = CsrGraph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let ord = graph.degeneracy_ordering();

        assert_is_degeneracy_ordering(&graph, &ord);
        assert_eq!(ord.degeneracy, 2);
        assert_eq!(ord.clique_lb, 2);
        assert_eq!(ord.clique_ub, 3);
    }

    #[test]
    fn complete_graph() {
        for n in 2..8 {
            let edges = (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v)));
            let graph = CsrGraph::from_edges(n, edges);
            let ord = graph.degeneracy_ordering();

            assert_is_degeneracy_ordering(&graph, &ord);
            assert_eq!(ord.degeneracy, n - 1);
            assert_eq!(ord.clique_lb, n);
            assert_eq!(ord.clique_ub, n);
        }
    }

    #[test]
    fn star() {
        let graph = CsrGraph::from_edges(6, (1..6).map(|v| (0, v)));
        let ord = graph.degeneracy_ordering();

        assert_is_degeneracy_ordering(&graph, &ord);
        assert_eq!(ord.degeneracy, 1);
        assert_eq!(ord.clique_lb, 2);
        assert_eq!(ord.clique_ub, 2);
    }

    #[test]
    fn petersen() {
        let graph = petersen_graph();
        let ord = graph.degeneracy_ordering();

        assert_is_degeneracy_ordering(&graph, &ord);
        assert_eq!(ord.degeneracy, 3);
        assert_eq!(ord.clique_lb, 2);
        assert_eq!(ord.clique_ub, 4);
    }

    #[test]
    fn pendant_on_cycle_tightens_upper_bound() {
        // 5-cycle plus a pendant vertex: the 2-core is 2-regular with five
        // vertices, so no triangle fits and the bound drops to d
        let graph = CsrGraph::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 5)]);
        let ord = graph.degeneracy_ordering();

        assert_is_degeneracy_ordering(&graph, &ord);
        assert_eq!(ord.degeneracy, 2);
        assert_eq!(ord.clique_lb, 2);
        assert_eq!(ord.clique_ub, 2);
    }

    #[test]
    fn triangle_with_pendant_keeps_upper_bound() {
        // the 2-core is a triangle: one component with exactly d+1 vertices
        let graph = CsrGraph::from_edges(4, [(0, 1), (1, 2), (0, 2), (2, 3)]);
        let ord = graph.degeneracy_ordering();

        assert_is_degeneracy_ordering(&graph, &ord);
        assert_eq!(ord.degeneracy, 2);
        assert_eq!(ord.clique_lb, 3);
        assert_eq!(ord.clique_ub, 3);
    }

    #[test]
    fn subgraph_members_are_the_right_neighborhoods() {
        let mut rng = Pcg64::seed_from_u64(777);

        for _ in 0..30 {
            let n = rng.gen_range(2..40);
            let graph = CsrGraph::random_gnp(&mut rng, n, 0.2);
            let (ord, slots) = graph.degeneracy_ordering_with_subgraphs();

            assert_is_degeneracy_ordering(&graph, &ord);

            for v in graph.vertices_range() {
                let members = &slots[v as usize].members;
                assert_eq!(members[0], v);
                assert_eq!(members.len(), ord.right_degree[v as usize] as usize + 1);
                assert!(members[1..].windows(2).all(|w| w[0] < w[1]));
                for &w in &members[1..] {
                    assert!(graph.has_edge(v, w));
                    assert!(ord.position[w as usize] > ord.position[v as usize]);
                }
            }
        }
    }

    #[test]
    fn empty_graph() {
        let graph = CsrGraph::from_edges(4, std::iter::empty::<Edge>());
        let ord = graph.degeneracy_ordering();

        assert_eq!(ord.degeneracy, 0);
        assert_eq!(ord.clique_lb, 1);
        assert_eq!(ord.clique_ub, 1);
    }
}
