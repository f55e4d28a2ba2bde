use crate::graph::*;

/// Outcome of the Buss kernelization for a cover budget of k.
#[derive(Clone, Debug)]
pub enum BussResult {
    /// More than k vertices are forced into any cover.
    Infeasible,
    /// The surviving vertices alone are a small enough cover.
    Feasible,
    /// Undecided; `high_degree_vertices` many cover vertices were committed
    /// and must be subtracted from the budget before continuing on `kernel`.
    Undecided {
        kernel: Subgraph,
        high_degree_vertices: i64,
    },
}

/// Buss kernel: a vertex whose residual degree exceeds the remaining budget
/// k - h must be in any k-cover; committing it shrinks the budget, which can
/// force further vertices. Survivors whose neighbours were all committed
/// become isolated and are dropped.
pub fn buss_kernel(sg: &Subgraph, k: i64) -> BussResult {
    let n = sg.n();
    let mut removed = BitSet::new(n as NumNodes);
    let mut deg_decrease = vec![0i64; n];
    let mut high_degree = 0i64;

    let mut change = true;
    while change && high_degree <= k {
        change = false;

        for (pos, v) in sg.vertices.iter().enumerate() {
            if high_degree > k {
                break;
            }
            if removed.get_bit(pos as Node) {
                continue;
            }
            if v.degree as i64 - deg_decrease[pos] > k - high_degree {
                removed.set_bit(pos as Node);
                high_degree += 1;
                change = true;

                for &w in &sg.adj[pos] {
                    if !removed.get_bit(w) {
                        deg_decrease[w as usize] += 1;
                    }
                }
            }
        }
    }

    if high_degree > k {
        return BussResult::Infeasible;
    }

    if high_degree == 0 {
        return BussResult::Undecided {
            kernel: sg.clone(),
            high_degree_vertices: 0,
        };
    }

    for pos in 0..n {
        let pos = pos as Node;
        if removed.get_bit(pos) {
            continue;
        }
        if sg.adj[pos as usize].iter().all(|&w| removed.get_bit(w)) {
            removed.set_bit(pos);
        }
    }

    let kernel = sg.compact(&removed);

    if kernel.n() as i64 <= k - high_degree {
        return BussResult::Feasible;
    }

    if kernel.m as i64 > k * (k - high_degree) {
        return BussResult::Infeasible;
    }

    BussResult::Undecided {
        kernel,
        high_degree_vertices: high_degree,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvariantCheck;
    use crate::testing::naive_has_vertex_cover;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn star_center_is_forced() {
        // star with 4 leaves: k=1 forces the center, leaves become isolated
        let sg = Subgraph::from_edges(5, (1..5).map(|v| (0, v)));

        match buss_kernel(&sg, 1) {
            BussResult::Feasible => {}
            other => panic!("expected Feasible, got {other:?}"),
        }
    }

    #[test]
    fn infeasible_when_too_many_forced() {
        // two stars with 3 leaves each, but budget 1
        let sg = Subgraph::from_edges(8, [(0, 1), (0, 2), (0, 3), (4, 5), (4, 6), (4, 7)]);

        assert!(matches!(buss_kernel(&sg, 1), BussResult::Infeasible));
    }

    #[test]
    fn untouched_graph_is_returned_as_kernel() {
        let sg = Subgraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);

        match buss_kernel(&sg, 2) {
            BussResult::Undecided {
                kernel,
                high_degree_vertices,
            } => {
                assert_eq!(high_degree_vertices, 0);
                assert_eq!(kernel.n(), 4);
                assert_eq!(kernel.m, 4);
                assert!(kernel.is_correct().is_ok());
            }
            other => panic!("expected Undecided, got {other:?}"),
        }
    }

    #[test]
    fn committing_respects_residual_degrees() {
        // u dominates a,b,c and a has a private neighbor x: with k=2 only u
        // is forced; {u,x} remains a valid cover
        let sg = Subgraph::from_edges(5, [(0, 1), (0, 2), (0, 3), (1, 4)]);

        match buss_kernel(&sg, 2) {
            BussResult::Undecided {
                kernel,
                high_degree_vertices,
            } => {
                assert_eq!(high_degree_vertices, 1);
                assert_eq!(kernel.n(), 2);
                assert_eq!(kernel.m, 1);
            }
            other => panic!("expected Undecided, got {other:?}"),
        }
    }

    #[test]
    fn preserves_the_cover_answer() {
        let mut rng = Pcg64::seed_from_u64(0xb055);

        for _ in 0..300 {
            let n = rng.gen_range(2..12);
            let edges: Vec<(Node, Node)> = (0..2 * n)
                .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
                .collect();
            let sg = Subgraph::from_edges(n, edges);
            let k = rng.gen_range(0..n as i64);

            let expected = naive_has_vertex_cover(&sg, k);

            match buss_kernel(&sg, k) {
                BussResult::Infeasible => assert!(!expected),
                BussResult::Feasible => assert!(expected),
                BussResult::Undecided {
                    kernel,
                    high_degree_vertices,
                } => {
                    assert!(kernel.is_correct().is_ok());
                    assert_eq!(
                        naive_has_vertex_cover(&kernel, k - high_degree_vertices),
                        expected
                    );
                }
            }
        }
    }
}
