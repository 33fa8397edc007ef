//! Conversion engine: markdown or structured rich-text in, a validated
//! sequence of destination blocks out.
//!
//! The pipeline is two strategies behind one door. The full strategy
//! parses markdown into a rich-text tree and lowers it; the
//! conservative strategy classifies lines one at a time and cannot
//! lose content. [`convert_markdown`] runs the full strategy and falls
//! back to the conservative one when validation shows content was
//! dropped. Both feed the same flatten → split → validate tail.
//!
//! This crate knows nothing about HTTP, credentials, or batching;
//! delivery is a separate crate consuming [`Document`].

pub mod convert;
pub mod error;
pub mod limits;
pub mod model;
pub mod parsing;
pub mod richtext;
pub mod transform;
pub mod validate;

pub use convert::{convert_markdown, convert_markdown_conservative, convert_rich_text};
pub use error::ConvertError;
pub use model::{Annotations, Block, BlockKind, Document, Span};
pub use richtext::{InlineRun, RichNode, RichTextDocument};
