use crate::limits::{BOUNDARY_SEARCH_FRACTION, MAX_SPAN_CHARS, SAFE_SPAN_CHARS};
use crate::model::{Block, BlockKind, Span};

/// How aggressively oversized spans may be sliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Sentence boundary, else word boundary, else a hard cut at the
    /// limit. Guarantees every emitted span fits.
    Strict,
    /// Sentence or word boundaries only. Boundary-free text is left
    /// oversized for the validator to reject; the fallback strategy
    /// exists precisely because this mode can fail.
    BoundaryOnly,
}

/// Splits every block that exceeds the safe threshold into several
/// same-kind blocks. Order is preserved; kinds never change.
pub fn split_blocks(blocks: Vec<Block>, mode: SplitMode) -> Vec<Block> {
    blocks
        .into_iter()
        .flat_map(|b| split_block(b, mode))
        .collect()
}

/// Greedy re-chunk of one block.
///
/// Spans accumulate into an output block until adding the next would
/// cross [`SAFE_SPAN_CHARS`]; then the block flushes and a new one of
/// the same kind starts. A single span over [`MAX_SPAN_CHARS`] is first
/// sliced into fitting pieces, each keeping the source annotations and
/// link — a link's target is duplicated onto every slice of its own
/// text, never attached to neighbors.
pub fn split_block(block: Block, mode: SplitMode) -> Vec<Block> {
    if block.kind == BlockKind::Divider || block.char_len() <= SAFE_SPAN_CHARS {
        return vec![block];
    }

    let Block {
        kind,
        spans,
        language,
    } = block;
    let mut out = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_len = 0usize;

    for span in spans {
        for piece in slice_span(span, mode) {
            let len = piece.char_len();
            if current_len + len > SAFE_SPAN_CHARS && !current.is_empty() {
                out.push(Block {
                    kind: kind.clone(),
                    spans: std::mem::take(&mut current),
                    language: language.clone(),
                });
                current_len = 0;
            }
            current_len += len;
            current.push(piece);
        }
    }
    if !current.is_empty() {
        out.push(Block {
            kind,
            spans: current,
            language,
        });
    }
    out
}

/// Slices one span into pieces of at most [`MAX_SPAN_CHARS`] chars.
///
/// Cut priority inside each window: last sentence boundary (`.`) past
/// [`BOUNDARY_SEARCH_FRACTION`] of the limit, else last whitespace past
/// it, else (`Strict` only) a hard cut at the limit.
fn slice_span(span: Span, mode: SplitMode) -> Vec<Span> {
    if span.char_len() <= MAX_SPAN_CHARS {
        return vec![span];
    }

    let chars: Vec<char> = span.text.chars().collect();
    let min_break = (MAX_SPAN_CHARS as f64 * BOUNDARY_SEARCH_FRACTION) as usize;
    let mut pieces = Vec::new();
    let mut start = 0usize;

    while chars.len() - start > MAX_SPAN_CHARS {
        let window = &chars[start..start + MAX_SPAN_CHARS];
        let cut = find_boundary(window, min_break);
        match (cut, mode) {
            (Some(cut), _) => {
                pieces.push(rebuild(&span, &chars[start..start + cut]));
                start += cut;
            }
            (None, SplitMode::Strict) => {
                pieces.push(rebuild(&span, window));
                start += MAX_SPAN_CHARS;
            }
            // No boundary and no permission to hard-cut: hand the
            // oversized remainder to the validator as-is.
            (None, SplitMode::BoundaryOnly) => break,
        }
    }
    if start < chars.len() {
        pieces.push(rebuild(&span, &chars[start..]));
    }
    pieces
}

/// Index just past the best cut point in `window`, if any lies past
/// `min_break`.
fn find_boundary(window: &[char], min_break: usize) -> Option<usize> {
    let sentence = window.iter().rposition(|&c| c == '.');
    if let Some(i) = sentence
        && i >= min_break
    {
        return Some(i + 1);
    }
    let word = window.iter().rposition(|c| c.is_whitespace());
    if let Some(i) = word
        && i >= min_break
    {
        return Some(i + 1);
    }
    None
}

fn rebuild(source: &Span, chars: &[char]) -> Span {
    Span {
        text: chars.iter().collect(),
        annotations: source.annotations,
        link: source.link.clone(),
    }
}
