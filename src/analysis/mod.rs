mod frequency;
mod tree;

pub use frequency::{WordCount, count_frequencies};
pub use tree::{TreeStats, count_leaves, count_total, max_depth};
