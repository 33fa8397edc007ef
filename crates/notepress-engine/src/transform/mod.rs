//! Block-level rewrites applied between assembly and validation:
//! heading flattening, then length-constrained splitting.

pub mod flatten;
pub mod split;

pub use flatten::flatten_headings;
pub use split::{SplitMode, split_block, split_blocks};
