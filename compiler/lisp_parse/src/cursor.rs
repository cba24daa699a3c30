//! Byte cursor over source text.
//!
//! Structural tokens (`(`, `)`, `"`, `;`, whitespace) are all single ASCII
//! bytes, so the cursor walks bytes and only slices the source at those
//! delimiters, which are always `char` boundaries. Multi-byte UTF-8 inside
//! symbols and strings passes through untouched.
//!
//! At EOF [`Cursor::current`] returns `0x00`; use [`Cursor::is_eof`] to tell
//! it apart from an interior null byte.

/// Whether `b` separates atoms.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0B
}

/// Whether `b` ends a symbol or number.
#[inline]
pub(crate) fn is_delimiter(b: u8) -> bool {
    is_whitespace(b) || b == b'(' || b == b')'
}

/// Cursor over a source string.
///
/// The cursor is [`Copy`], so a snapshot is just a copy.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    /// Current byte offset from the start of the source.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.source.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// Advance one byte. No-op at EOF.
    #[inline]
    pub(crate) fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Advance `n` bytes, stopping at EOF.
    #[inline]
    pub(crate) fn advance_by(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.source.len());
    }

    /// Unconsumed source text.
    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    /// Consume bytes while `pred` holds, returning the consumed text.
    ///
    /// Callers must only stop on ASCII bytes so the slice stays on a `char`
    /// boundary.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let len = self.rest().bytes().take_while(|&b| pred(b)).count();
        self.pos += len;
        self.source.get(start..self.pos).unwrap_or_default()
    }

    /// Skip whitespace and `;` line comments.
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            let b = self.current();
            if self.is_eof() {
                return;
            }
            if is_whitespace(b) {
                self.eat_while(is_whitespace);
            } else if b == b';' {
                self.eat_while(|b| b != b'\n');
                self.advance();
            } else {
                return;
            }
        }
    }
}
