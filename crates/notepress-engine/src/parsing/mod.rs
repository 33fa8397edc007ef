//! The conservative parsing strategy: line classification, line-by-line
//! block assembly, inline span extraction, and link hygiene.
//!
//! This path never fails on malformed input. Every line classifies as
//! something (worst case: plain text), unbalanced markers degrade to
//! literal characters, and bad link targets become unlinked labels.

pub mod assembler;
pub mod inline;
pub mod lines;
pub mod links;

pub use assembler::{LineAssembler, assemble};
pub use lines::LineClass;
pub use links::clean_url;
