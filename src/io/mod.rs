pub mod graph_reader;
pub use graph_reader::{
    read_adjacency_list, read_edge_list, read_graph_file, GraphReadError, InputFormat,
};
