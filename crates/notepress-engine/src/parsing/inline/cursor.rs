/// A cursor for byte-by-byte inline scanning of a single line.
///
/// Marker syntax is pure ASCII, so scanning advances bytewise; literal
/// text between markers is copied out with [`Cursor::take_until`] which
/// keeps multi-byte characters intact.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being scanned.
    s: &'a str,
    /// Current byte index into `s`.
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of line.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given pattern.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat.as_bytes())
    }

    /// Advances past one full character (not one byte), returning it.
    pub fn bump_char(&mut self) -> Option<char> {
        let c = self.s[self.i..].chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes. Caller guarantees `n` lands on a char
    /// boundary (always true when skipping ASCII marker syntax).
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Byte offset of the next occurrence of `pat` at or after the
    /// current position, relative to the current position.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.s[self.i..].find(pat)
    }

    /// The remaining unscanned input.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }
}
