//! Exact maximum clique size for sparse graphs.
//!
//! The solver runs in time polynomial in the graph size but exponential only
//! in the gap between the degeneracy `d` and the clique number; on most real
//! inputs this gap is tiny. It follows the approach of Walteros and Buchanan,
//! "Why is maximum clique often easy in practice?": a degeneracy-ordered scan
//! reduces the clique question to small vertex-cover instances on complement
//! subgraphs, which are shrunk by Buss and Nemhauser-Trotter kernelization
//! and finished off by a branch-and-reduce cover solver.

pub mod errors;
pub mod exact;
pub mod graph;
pub mod io;
pub mod kernelization;
pub mod log;
pub mod testing;

pub mod prelude {
    pub use crate::exact::*;
    pub use crate::graph::*;
    pub use crate::io::*;
    pub use crate::kernelization::*;
}
