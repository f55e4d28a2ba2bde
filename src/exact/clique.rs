use super::vertex_cover::has_vertex_cover;
use crate::graph::*;
use crate::kernelization::*;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};

/// Computes the clique number with `num_threads` worker threads.
pub fn max_clique_size(graph: &CsrGraph, num_threads: usize) -> NumNodes {
    let (ord, slots) = graph.degeneracy_ordering_with_subgraphs();
    parametric_search(&ord, &slots, num_threads)
}

/// Binary search over candidate clique sizes c with `clique_lb <= omega <=
/// clique_ub` as the loop invariant.
///
/// "omega >= c" holds exactly if some pivot v with right_degree(v)+1 >= c
/// has a vertex cover of size right_degree(v)+1-c in the complement of its
/// right neighbourhood: such a cover leaves an independent set of size c in
/// the complement, which is a clique of size c through v in the graph.
pub fn parametric_search(
    ord: &DegeneracyOrdering,
    slots: &[SubgraphSlot],
    num_threads: usize,
) -> NumNodes {
    let mut lb = ord.clique_lb;
    let mut ub = ord.clique_ub;

    info!(
        "degeneracy={} clique bounds: {} <= omega <= {}",
        ord.degeneracy, lb, ub
    );

    if lb >= ub {
        return lb;
    }

    let sorted_pivots = pivots_by_right_degree_desc(ord);
    let num_threads = num_threads.max(1);

    while lb < ub {
        let c = (lb + ub).div_ceil(2);
        let found = AtomicBool::new(false);

        std::thread::scope(|scope| {
            for thread_idx in 0..num_threads {
                let found = &found;
                let sorted_pivots = &sorted_pivots;
                scope.spawn(move || {
                    process_pivots(ord, slots, sorted_pivots, found, thread_idx, num_threads, c)
                });
            }
        });

        if found.load(Ordering::Acquire) {
            lb = c;
        } else {
            ub = c - 1;
        }
        debug!("candidate c={c}: {} <= omega <= {}", lb, ub);
    }

    lb
}

/// Counting sort of all vertices by right-degree, descending. Workers scan
/// this order so that they can stop at the first pivot whose right
/// neighbourhood is already too small.
fn pivots_by_right_degree_desc(ord: &DegeneracyOrdering) -> Vec<Node> {
    let n = ord.ordering.len();
    let mut bucket_start = vec![0usize; ord.degeneracy as usize + 1];

    for &rd in &ord.right_degree {
        bucket_start[rd as usize] += 1;
    }

    let mut count = 0;
    for entry in bucket_start.iter_mut().rev() {
        let size = *entry;
        *entry = count;
        count += size;
    }

    let mut sorted = vec![0 as Node; n];
    for v in 0..n {
        let rd = ord.right_degree[v] as usize;
        sorted[bucket_start[rd]] = v as Node;
        bucket_start[rd] += 1;
    }

    sorted
}

/// Worker loop: thread t handles the pivots at sorted indices t, t+W,
/// t+2W, ... and polls the shared flag before every pivot. Each pivot runs
/// through the kernel cascade; +1 outcomes publish success, -1 outcomes move
/// on to the next pivot.
fn process_pivots(
    ord: &DegeneracyOrdering,
    slots: &[SubgraphSlot],
    sorted_pivots: &[Node],
    found: &AtomicBool,
    thread_idx: usize,
    num_threads: usize,
    c: NumNodes,
) {
    let mut i = thread_idx;

    while i < sorted_pivots.len() && !found.load(Ordering::Acquire) {
        let v = sorted_pivots[i];
        let k = ord.right_degree[v as usize] as i64 + 1 - c as i64;

        // pivots are sorted by right-degree, nothing below can contribute
        if k < 0 {
            return;
        }

        let sg = complement_of_right_neighborhood(v, slots, &ord.position);

        if pivot_has_clique(sg, k) {
            found.store(true, Ordering::Release);
            return;
        }

        i += num_threads;
    }
}

/// Runs the Buss kernel, the Nemhauser-Trotter kernel and finally the
/// branch-and-reduce solver on one complement subgraph, shrinking the budget
/// as the kernels commit cover vertices.
fn pivot_has_clique(sg: &Subgraph, k: i64) -> bool {
    let (kernel, k) = match buss_kernel(sg, k) {
        BussResult::Infeasible => return false,
        BussResult::Feasible => return true,
        BussResult::Undecided {
            kernel,
            high_degree_vertices,
        } => (kernel, k - high_degree_vertices),
    };

    let (kernel, k) = match nemhauser_trotter_kernel(&kernel, k) {
        NtResult::Infeasible => return false,
        NtResult::Feasible => return true,
        NtResult::Undecided {
            kernel,
            num_in_cover,
        } => (kernel, k - num_in_cover),
    };

    has_vertex_cover(kernel, k)
}
