use crate::graph::*;
use std::collections::VecDeque;

/// Outcome of the Nemhauser-Trotter kernelization for a cover budget of k.
#[derive(Clone, Debug)]
pub enum NtResult {
    Infeasible,
    Feasible,
    /// Undecided; `num_in_cover` many vertices were committed to the cover
    /// and must be subtracted from the budget before continuing on `kernel`.
    Undecided { kernel: Subgraph, num_in_cover: i64 },
}

const NOT_MATCHED: Node = Node::MAX;
const UNVISITED: u32 = u32::MAX;

/// Nemhauser-Trotter kernel via the LP relaxation of vertex cover.
///
/// The LP optimum is half-integral and can be read off a minimum vertex
/// cover of the bipartite double cover: vertices whose variable is 0 leave
/// the graph, vertices at 1 go into the cover, the half-valued rest is the
/// kernel. The double cover is never materialised; a maximum matching on it
/// is computed by Hopcroft-Karp, and the integral variables are identified
/// through the strongly connected components of the matching residual.
pub fn nemhauser_trotter_kernel(sg: &Subgraph, k: i64) -> NtResult {
    let n = sg.n();

    let (_, match_r) = hopcroft_karp(sg);
    let scc = tarjan_residual(sg, &match_r);

    // Condensation bookkeeping: `pred_lists[p]` holds the components with an
    // arc into p, `out_degree[p]` the number of arcs leaving p. `connected`
    // deduplicates parallel arcs while one source component is processed.
    let num_components = scc.components.len();
    let mut pred_lists: Vec<Vec<u32>> = vec![Vec::new(); num_components];
    let mut out_degree = vec![0u32; num_components];
    let mut connected = vec![UNVISITED; num_components];

    for (t, comp) in scc.components.iter().enumerate() {
        let t = t as u32;
        for &x in comp {
            if (x as usize) < n {
                for &u in &sg.adj[x as usize] {
                    let target = scc.component_map[u as usize + n];
                    if target != t && connected[target as usize] != t {
                        pred_lists[target as usize].push(t);
                        out_degree[t as usize] += 1;
                        connected[target as usize] = t;
                    }
                }
            } else if match_r[x as usize - n] != NOT_MATCHED {
                let target = scc.component_map[match_r[x as usize - n] as usize];
                if target != t && connected[target as usize] != t {
                    pred_lists[target as usize].push(t);
                    out_degree[t as usize] += 1;
                    connected[target as usize] = t;
                }
            }
        }
    }

    // Iteratively peel pure sink components; peeling one may turn its
    // predecessors into sinks.
    let mut removed = BitSet::new(n as NumNodes);
    let mut comp_removed = vec![false; num_components];
    let mut num_removed = 0usize;
    let mut num_in_cover = 0i64;

    let mut update = true;
    while update {
        update = false;

        for p in 0..num_components {
            if comp_removed[p] || out_degree[p] != 0 || !scc.pure[p] {
                continue;
            }
            comp_removed[p] = true;

            if scc.components[p].len() == 1 {
                let orig = (scc.components[p][0] as usize % n) as Node;
                if !removed.get_bit(orig) {
                    removed.set_bit(orig);
                    num_removed += 1;
                    continue;
                }
            }

            for &x in &scc.components[p] {
                let orig = (x as usize % n) as Node;
                if !removed.get_bit(orig) {
                    removed.set_bit(orig);
                    num_removed += 1;
                    if x as usize >= n {
                        num_in_cover += 1;
                    }
                }
            }

            for &pred in &pred_lists[p] {
                out_degree[pred as usize] -= 1;
            }
            update = true;
        }
    }

    if num_in_cover > k {
        return NtResult::Infeasible;
    }

    if num_removed == 0 {
        return NtResult::Undecided {
            kernel: sg.clone(),
            num_in_cover: 0,
        };
    }

    if (n - num_removed) as i64 <= k - num_in_cover {
        return NtResult::Feasible;
    }

    let kernel = sg.compact(&removed);

    if kernel.m as i64 > k * (k - num_in_cover) {
        return NtResult::Infeasible;
    }

    NtResult::Undecided {
        kernel,
        num_in_cover,
    }
}

/// Maximum matching on the implicit bipartite double cover: the left side
/// indexes the subgraph's vertices, the right side their copies, and u_L is
/// adjacent to w_R exactly if (u, w) is an edge of the subgraph.
///
/// Returns the matching as (match_l, match_r).
fn hopcroft_karp(sg: &Subgraph) -> (Vec<Node>, Vec<Node>) {
    let n = sg.n();
    let mut match_l = vec![NOT_MATCHED; n];
    let mut match_r = vec![NOT_MATCHED; n];
    let mut dist = vec![0u32; n];

    loop {
        let d_max = hk_bfs(sg, &match_l, &match_r, &mut dist);
        if d_max == UNVISITED {
            break;
        }

        for u in 0..n {
            if match_l[u] == NOT_MATCHED {
                hk_dfs(sg, u, &mut dist, &mut match_l, &mut match_r, d_max);
            }
        }
    }

    (match_l, match_r)
}

/// Layered BFS phase: stratifies the left side by alternating-path distance
/// and returns the distance of the closest unmatched right vertex, or
/// `UNVISITED` if no augmenting path remains.
fn hk_bfs(sg: &Subgraph, match_l: &[Node], match_r: &[Node], dist: &mut [u32]) -> u32 {
    let mut queue = VecDeque::new();

    for (u, &m) in match_l.iter().enumerate() {
        if m == NOT_MATCHED {
            dist[u] = 0;
            queue.push_back(u);
        } else {
            dist[u] = UNVISITED;
        }
    }

    let mut d_max = UNVISITED;

    while let Some(u) = queue.pop_front() {
        if dist[u] >= d_max {
            continue;
        }
        for &v in &sg.adj[u] {
            let w = match_r[v as usize];
            if w == NOT_MATCHED {
                if d_max == UNVISITED {
                    d_max = dist[u] + 1;
                }
            } else if dist[w as usize] == UNVISITED {
                dist[w as usize] = dist[u] + 1;
                queue.push_back(w as usize);
            }
        }
    }

    d_max
}

/// DFS phase: augments along a shortest path; a left vertex that fails is
/// pruned from the current phase by resetting its distance.
fn hk_dfs(
    sg: &Subgraph,
    u: usize,
    dist: &mut [u32],
    match_l: &mut [Node],
    match_r: &mut [Node],
    d_max: u32,
) -> bool {
    for idx in 0..sg.adj[u].len() {
        let v = sg.adj[u][idx] as usize;
        let w = match_r[v];

        let dist_w = if w == NOT_MATCHED {
            d_max
        } else {
            dist[w as usize]
        };

        if dist_w == dist[u] + 1
            && (w == NOT_MATCHED || hk_dfs(sg, w as usize, dist, match_l, match_r, d_max))
        {
            match_r[v] = u as Node;
            match_l[u] = v as Node;
            return true;
        }
    }

    dist[u] = UNVISITED;
    false
}

struct SccDecomposition {
    /// Members of each component, in Tarjan emission order (reverse
    /// topological order of the condensation).
    components: Vec<Vec<u32>>,
    /// Component id per residual vertex.
    component_map: Vec<u32>,
    /// A component is pure if it contains at most one copy of every vertex.
    pure: Vec<bool>,
}

/// Tarjan's SCC on the matching residual over the 2n virtual vertices
/// 0..n (left copies) and n..2n (right copies): u_L -> w_R for every
/// subgraph edge (u, w), plus w_R -> u_L for every matched pair.
///
/// The recursion is converted to an explicit stack; on bipartite residuals
/// with millions of vertices the native stack would overflow.
fn tarjan_residual(sg: &Subgraph, match_r: &[Node]) -> SccDecomposition {
    let n = sg.n();
    let two_n = 2 * n;

    let successor = |x: usize, i: usize| -> Option<u32> {
        if x < n {
            sg.adj[x].get(i).map(|&w| w + n as u32)
        } else if i == 0 && match_r[x - n] != NOT_MATCHED {
            Some(match_r[x - n])
        } else {
            None
        }
    };

    let mut indices = vec![UNVISITED; two_n];
    let mut low_link = vec![0u32; two_n];
    let mut on_stack = BitSet::new(two_n as NumNodes);
    let mut component_map = vec![0u32; two_n];
    let mut vertex_map = vec![UNVISITED; n];

    let mut components: Vec<Vec<u32>> = Vec::new();
    let mut pure: Vec<bool> = Vec::new();

    let mut stack: Vec<u32> = Vec::new();
    let mut call: Vec<(u32, u32)> = Vec::new();
    let mut index = 0u32;

    for root in 0..n as u32 {
        if indices[root as usize] != UNVISITED {
            continue;
        }

        indices[root as usize] = index;
        low_link[root as usize] = index;
        index += 1;
        stack.push(root);
        on_stack.set_bit(root);
        call.push((root, 0));

        while let Some(frame) = call.last_mut() {
            let v = frame.0 as usize;

            if let Some(w) = successor(v, frame.1 as usize) {
                frame.1 += 1;
                let w = w as usize;

                if indices[w] == UNVISITED {
                    indices[w] = index;
                    low_link[w] = index;
                    index += 1;
                    stack.push(w as u32);
                    on_stack.set_bit(w as Node);
                    call.push((w as u32, 0));
                } else if on_stack.get_bit(w as Node) {
                    low_link[v] = low_link[v].min(indices[w]);
                }
                continue;
            }

            call.pop();
            if let Some(parent) = call.last() {
                let p = parent.0 as usize;
                low_link[p] = low_link[p].min(low_link[v]);
            }

            if low_link[v] == indices[v] {
                let comp_id = components.len() as u32;
                let mut members = Vec::new();
                let mut is_pure = true;

                loop {
                    let x = stack.pop().unwrap();
                    on_stack.clear_bit(x);
                    component_map[x as usize] = comp_id;

                    let orig = x as usize % n;
                    if vertex_map[orig] == comp_id {
                        is_pure = false;
                    }
                    vertex_map[orig] = comp_id;

                    members.push(x);
                    if x as usize == v {
                        break;
                    }
                }

                components.push(members);
                pure.push(is_pure);
            }
        }
    }

    SccDecomposition {
        components,
        component_map,
        pure,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvariantCheck;
    use crate::testing::{naive_has_vertex_cover, naive_vertex_cover_number};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn random_subgraph(rng: &mut impl Rng, n: Node, num_edges: usize) -> Subgraph {
        let edges: Vec<(Node, Node)> = (0..num_edges)
            .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
            .collect();
        Subgraph::from_edges(n, edges)
    }

    /// Undirected rendition of the bipartite double cover.
    fn double_cover(sg: &Subgraph) -> Subgraph {
        let n = sg.n() as Node;
        let edges = sg
            .adj
            .iter()
            .enumerate()
            .flat_map(|(u, row)| row.iter().map(move |&w| (u as Node, n + w)))
            .collect_vec();
        Subgraph::from_edges(2 * n, edges)
    }

    #[test]
    fn matching_is_consistent() {
        let mut rng = Pcg64::seed_from_u64(0x60b1);

        for _ in 0..100 {
            let n = rng.gen_range(2..14);
            let m = rng.gen_range(0..3 * n as usize);
            let sg = random_subgraph(&mut rng, n, m);

            let (match_l, match_r) = hopcroft_karp(&sg);

            for (u, &v) in match_l.iter().enumerate() {
                if v != NOT_MATCHED {
                    assert!(sg.adj[u].binary_search(&v).is_ok());
                    assert_eq!(match_r[v as usize] as usize, u);
                }
            }
            for (v, &u) in match_r.iter().enumerate() {
                if u != NOT_MATCHED {
                    assert_eq!(match_l[u as usize] as usize, v);
                }
            }
        }
    }

    #[test]
    fn matching_is_maximum_by_koenig() {
        let mut rng = Pcg64::seed_from_u64(0x6013);

        for _ in 0..100 {
            let n = rng.gen_range(2..8);
            let m = rng.gen_range(0..2 * n as usize);
            let sg = random_subgraph(&mut rng, n, m);

            let (match_l, _) = hopcroft_karp(&sg);
            let matching_size = match_l.iter().filter(|&&v| v != NOT_MATCHED).count();

            assert_eq!(matching_size, naive_vertex_cover_number(&double_cover(&sg)));
        }
    }

    #[test]
    fn single_edge_is_fully_decided() {
        let sg = Subgraph::from_edges(2, [(0, 1)]);

        assert!(matches!(nemhauser_trotter_kernel(&sg, 1), NtResult::Feasible));
        assert!(matches!(
            nemhauser_trotter_kernel(&sg, 0),
            NtResult::Infeasible
        ));
    }

    #[test]
    fn star_commits_the_center() {
        let sg = Subgraph::from_edges(4, [(0, 1), (0, 2), (0, 3)]);

        // LP puts the center at 1 and the leaves at 0
        assert!(matches!(nemhauser_trotter_kernel(&sg, 1), NtResult::Feasible));
    }

    #[test]
    fn odd_cycle_is_fully_fractional() {
        // on C5 every LP variable is 1/2, so nothing can be decided
        let sg = Subgraph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);

        match nemhauser_trotter_kernel(&sg, 3) {
            NtResult::Undecided {
                kernel,
                num_in_cover,
            } => {
                assert_eq!(num_in_cover, 0);
                assert_eq!(kernel.n(), 5);
                assert_eq!(kernel.m, 5);
            }
            other => panic!("expected Undecided, got {other:?}"),
        }
    }

    #[test]
    fn preserves_the_cover_answer() {
        let mut rng = Pcg64::seed_from_u64(0x4217);

        for _ in 0..300 {
            let n = rng.gen_range(2..11);
            let m = rng.gen_range(0..3 * n as usize);
            let sg = random_subgraph(&mut rng, n, m);
            let k = rng.gen_range(0..n as i64);

            let expected = naive_has_vertex_cover(&sg, k);

            match nemhauser_trotter_kernel(&sg, k) {
                NtResult::Infeasible => assert!(!expected, "n={n} k={k} {sg:?}"),
                NtResult::Feasible => assert!(expected, "n={n} k={k} {sg:?}"),
                NtResult::Undecided {
                    kernel,
                    num_in_cover,
                } => {
                    assert!(kernel.is_correct().is_ok());
                    assert_eq!(
                        naive_has_vertex_cover(&kernel, k - num_in_cover),
                        expected,
                        "n={n} k={k} {sg:?}"
                    );
                }
            }
        }
    }
}
