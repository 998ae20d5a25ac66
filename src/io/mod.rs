pub mod fasta;
pub mod fastq;
pub mod graph;

pub use graph::{load_graph, save_graph};
