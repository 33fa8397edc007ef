//! Platform limits and tunables that drive the whole pipeline.
//!
//! These are Notion's hard API limits plus the buffers this crate keeps
//! below them. Every stage downstream of the assembler is shaped by
//! [`MAX_SPAN_CHARS`]; treat changes here as behavioral changes.

/// Hard ceiling on a single rich-text run, in Unicode scalar values.
/// The service rejects any `text.content` longer than this.
pub const MAX_SPAN_CHARS: usize = 2000;

/// Threshold at which the splitter starts a new block. Kept below
/// [`MAX_SPAN_CHARS`] so merged spans and trailing punctuation never
/// tip a flushed block over the hard ceiling.
pub const SAFE_SPAN_CHARS: usize = 1900;

/// Maximum number of blocks accepted by one create-page or
/// append-children call.
pub const MAX_BLOCKS_PER_BATCH: usize = 100;

/// Deepest heading level the destination renders natively. Levels
/// beyond this are flattened into bold bullet items.
pub const MAX_NATIVE_HEADING_LEVEL: u8 = 3;

/// Fraction of [`MAX_SPAN_CHARS`] after which the splitter looks for a
/// sentence or word boundary. Empirically chosen in the original
/// implementation; tunable, no stricter rationale exists.
pub const BOUNDARY_SEARCH_FRACTION: f64 = 0.7;

/// Leading whitespace unit used to fake indentation for flattened
/// headings and nested list items.
pub const INDENT_UNIT: &str = "  ";

/// Language tag applied to fenced code blocks that declare none.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// Minimum length for a link target to be worth keeping. Anything
/// shorter cannot be a usable URL once sanitized.
pub const MIN_URL_LEN: usize = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_threshold_stays_below_hard_ceiling() {
        assert!(SAFE_SPAN_CHARS < MAX_SPAN_CHARS);
    }

    #[test]
    fn boundary_fraction_is_a_proper_fraction() {
        assert!(BOUNDARY_SEARCH_FRACTION > 0.0 && BOUNDARY_SEARCH_FRACTION < 1.0);
    }
}
