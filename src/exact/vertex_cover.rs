use crate::graph::*;

enum Preprocessed {
    Feasible,
    Infeasible,
    Undecided { kernel: Subgraph, new_k: i64 },
}

/// Decides whether `sg` admits a vertex cover of size at most `k` by
/// exhaustive reductions followed by two-way branching on the vertex of
/// maximum degree. Recursion depth is bounded by k.
pub fn has_vertex_cover(mut sg: Subgraph, k: i64) -> bool {
    match reduce(&mut sg, k) {
        Preprocessed::Feasible => true,
        Preprocessed::Infeasible => false,
        Preprocessed::Undecided { kernel, new_k } => {
            let a = kernel.largest_degree_vertex;

            // branch 1: a joins the cover
            let mut removed = BitSet::new(kernel.n() as NumNodes);
            removed.set_bit(a);
            if has_vertex_cover(kernel.compact(&removed), new_k - 1) {
                return true;
            }

            // branch 2: a stays out, so all of N(a) joins the cover
            let degree_a = kernel.adj[a as usize].len() as i64;
            let mut removed = BitSet::new(kernel.n() as NumNodes);
            removed.set_bit(a);
            for &w in &kernel.adj[a as usize] {
                removed.set_bit(w);
            }
            has_vertex_cover(kernel.compact(&removed), new_k - degree_a)
        }
    }
}

/// Reduction loop: vertices of degree above the budget join the cover,
/// vertices of degree at most 1 are resolved directly, and degree-2 vertices
/// either collapse a triangle or get folded into a single vertex whose
/// neighbourhood is the union of its two neighbours'.
///
/// Degrees are tracked lazily against the immutable degree fields via
/// `deg_decrease`; the entry of a folded vertex can go negative. Removed
/// vertices linger inside adjacency rows and are skipped on traversal,
/// except for the row of a folded vertex which is rebuilt outright.
fn reduce(sg: &mut Subgraph, k: i64) -> Preprocessed {
    let n = sg.n();
    let mut new_k = k;
    let mut removed = BitSet::new(n as NumNodes);
    let mut deg_decrease = vec![0i64; n];
    let mut num_removed = 0usize;

    let mut change = true;
    while change && (n - num_removed) as i64 > new_k && new_k >= 0 {
        change = false;

        for pos in 0..n {
            if new_k < 0 {
                break;
            }
            if removed.get_bit(pos as Node) {
                continue;
            }
            let degree = sg.vertices[pos].degree as i64 - deg_decrease[pos];

            if degree > new_k {
                removed.set_bit(pos as Node);
                num_removed += 1;
                new_k -= 1;
                change = true;

                for &w in &sg.adj[pos] {
                    if !removed.get_bit(w) {
                        deg_decrease[w as usize] += 1;
                    }
                }
                continue;
            }

            if degree <= 1 {
                removed.set_bit(pos as Node);
                num_removed += 1;

                if degree == 1 {
                    new_k -= 1;
                    change = true;

                    let nb = *sg.adj[pos].iter().find(|&&w| !removed.get_bit(w)).unwrap();
                    removed.set_bit(nb);
                    num_removed += 1;

                    for &w in &sg.adj[nb as usize] {
                        if !removed.get_bit(w) {
                            deg_decrease[w as usize] += 1;
                        }
                    }
                }
                continue;
            }

            if degree == 2 {
                let mut live = sg.adj[pos].iter().filter(|&&w| !removed.get_bit(w));
                let a = *live.next().unwrap() as usize;
                let b = *live.next().unwrap() as usize;

                // test adjacency of the two neighbours on the shorter row
                let (x, y) = if sg.vertices[a].degree as i64 - deg_decrease[a]
                    <= sg.vertices[b].degree as i64 - deg_decrease[b]
                {
                    (a, b)
                } else {
                    (b, a)
                };
                let adjacent = sg.adj[x].binary_search(&(y as Node)).is_ok();

                removed.set_bit(a as Node);
                removed.set_bit(b as Node);
                change = true;

                if adjacent {
                    // triangle: two of its vertices cover all three
                    removed.set_bit(pos as Node);
                    new_k -= 2;
                    num_removed += 3;

                    for x in [a, b] {
                        for &w in &sg.adj[x] {
                            if !removed.get_bit(w) {
                                deg_decrease[w as usize] += 1;
                            }
                        }
                    }
                } else {
                    fold(sg, pos, a, b, &removed, &mut deg_decrease);
                    new_k -= 1;
                    num_removed += 2;
                }
            }
        }
    }

    if (n - num_removed) as i64 <= new_k {
        return Preprocessed::Feasible;
    }
    if new_k <= 0 {
        return Preprocessed::Infeasible;
    }

    let kernel = sg.compact(&removed);

    if kernel.m as i64 > k * new_k {
        return Preprocessed::Infeasible;
    }

    Preprocessed::Undecided { kernel, new_k }
}

/// Degree-2 fold: `v`'s two non-adjacent neighbours a and b are removed and
/// v inherits their joint neighbourhood. A cover of size k in the folded
/// graph lifts to one of size k+1 here: v in the cover stands for {a, b},
/// v outside for itself.
fn fold(
    sg: &mut Subgraph,
    v: usize,
    a: usize,
    b: usize,
    removed: &BitSet,
    deg_decrease: &mut [i64],
) {
    deg_decrease[v] += 2;

    let mut row_a = std::mem::take(&mut sg.adj[a]);
    let mut row_b = std::mem::take(&mut sg.adj[b]);
    let mut union = AdjRow::new();

    {
        let mut attach = |sg: &mut Subgraph, w: Node, shared: bool| {
            let row = &mut sg.adj[w as usize];
            let slot = row.binary_search(&(v as Node)).unwrap_err();
            row.insert(slot, v as Node);
            union.push(w);
            deg_decrease[v] -= 1;
            if shared {
                deg_decrease[w as usize] += 1;
            }
        };

        let mut c1 = row_a.iter().copied().peekable();
        let mut c2 = row_b.iter().copied().peekable();

        loop {
            match (c1.peek().copied(), c2.peek().copied()) {
                (Some(w1), _) if removed.get_bit(w1) || w1 as usize == v => {
                    c1.next();
                }
                (_, Some(w2)) if removed.get_bit(w2) || w2 as usize == v => {
                    c2.next();
                }
                (Some(w1), Some(w2)) if w1 == w2 => {
                    attach(sg, w1, true);
                    c1.next();
                    c2.next();
                }
                (Some(w1), Some(w2)) if w1 < w2 => {
                    attach(sg, w1, false);
                    c1.next();
                }
                (Some(_), Some(_)) => {
                    let w2 = c2.next().unwrap();
                    attach(sg, w2, false);
                }
                (Some(w1), None) => {
                    attach(sg, w1, false);
                    c1.next();
                }
                (None, Some(w2)) => {
                    attach(sg, w2, false);
                    c2.next();
                }
                (None, None) => break,
            }
        }
    }

    row_a.clear();
    row_b.clear();
    sg.adj[a] = row_a;
    sg.adj[b] = row_b;
    sg.adj[v] = union;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::naive_has_vertex_cover;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn trivial_instances() {
        let empty = Subgraph::from_edges(3, std::iter::empty::<Edge>());
        assert!(has_vertex_cover(empty, 0));

        let edge = Subgraph::from_edges(2, [(0, 1)]);
        assert!(has_vertex_cover(edge.clone(), 1));
        assert!(!has_vertex_cover(edge, 0));

        let triangle = Subgraph::from_edges(3, [(0, 1), (1, 2), (0, 2)]);
        assert!(has_vertex_cover(triangle.clone(), 2));
        assert!(!has_vertex_cover(triangle, 1));
    }

    #[test]
    fn folding_path() {
        // P5 has a minimum cover of size 2 and exercises the degree-2 fold
        let path = Subgraph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert!(has_vertex_cover(path.clone(), 2));
        assert!(!has_vertex_cover(path, 1));
    }

    #[test]
    fn cycles() {
        for n in 3..10 {
            let cycle = Subgraph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n)));
            let cover = (n as i64 + 1) / 2;
            assert!(has_vertex_cover(cycle.clone(), cover), "C{n}");
            assert!(!has_vertex_cover(cycle, cover - 1), "C{n}");
        }
    }

    #[test]
    fn complete_graphs() {
        for n in 2..8 {
            let edges = (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v)));
            let sg = Subgraph::from_edges(n, edges);
            assert!(has_vertex_cover(sg.clone(), n as i64 - 1));
            assert!(!has_vertex_cover(sg, n as i64 - 2));
        }
    }

    #[test]
    fn agrees_with_subset_enumeration() {
        let mut rng = Pcg64::seed_from_u64(0xc0fe);

        for _ in 0..500 {
            let n = rng.gen_range(2..13);
            let edges: Vec<(Node, Node)> = (0..rng.gen_range(0..3 * n as usize))
                .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
                .collect();
            let sg = Subgraph::from_edges(n, edges);
            let k = rng.gen_range(0..=n as i64);

            assert_eq!(
                has_vertex_cover(sg.clone(), k),
                naive_has_vertex_cover(&sg, k),
                "n={n} k={k} {sg:?}"
            );
        }
    }
}
