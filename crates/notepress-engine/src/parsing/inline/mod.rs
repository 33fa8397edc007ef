//! Inline formatting for single lines: tokenize markers, then replay
//! them through an annotation stack to produce formatted spans.
//!
//! Used by the conservative line strategy only; the full strategy gets
//! its inline runs from the markdown event stream instead.

mod annotate;
mod cursor;
mod tokenizer;

pub use annotate::spans_for_line;
pub use tokenizer::{MarkKind, Token, tokenize};
