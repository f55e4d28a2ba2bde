pub mod clique;
pub mod vertex_cover;

pub use clique::{max_clique_size, parametric_search};
pub use vertex_cover::has_vertex_cover;
