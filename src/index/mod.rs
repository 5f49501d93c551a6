pub mod kmer;

pub use kmer::{build_index, IndexMeta, KmerIndex};
