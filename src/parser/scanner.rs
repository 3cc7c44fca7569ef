//! Byte-offset cursor over the source text and position diagnostics.

use std::borrow::Cow;

/// Why a production stopped.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Halt {
    /// Soft mismatch. The caller rewinds and tries its next alternative.
    Backtrack,
    /// Unrecoverable syntax or conversion error. Never rewound.
    Fatal {
        offset: usize,
        message: Cow<'static, str>,
    },
}

pub(crate) type Parsed<T> = std::result::Result<T, Halt>;

pub(crate) struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Scanner { source, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Rewinds (or fast-forwards) to a position previously returned by [`Scanner::pos`].
    #[inline]
    pub(crate) fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub(crate) fn slice(&self, start: usize) -> &'a str {
        &self.source[start..self.pos]
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes one character.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Advances by `n` bytes.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    #[inline]
    pub(crate) fn starts_with(&self, tag: &str) -> bool {
        self.rest().starts_with(tag)
    }

    pub(crate) fn eat(&mut self, tag: &str) -> bool {
        if self.starts_with(tag) {
            self.advance(tag.len());
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_char(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance(ch.len_utf8());
            true
        } else {
            false
        }
    }

    /// Consumes an ASCII tag, ignoring case.
    pub(crate) fn eat_caseless(&mut self, tag: &str) -> bool {
        match self.rest().get(..tag.len()) {
            Some(head) if head.eq_ignore_ascii_case(tag) => {
                self.advance(tag.len());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn eat_while<F>(&mut self, mut pred: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.source[start..self.pos]
    }

    /// Consumes `\r\n`, `\r` or `\n`.
    pub(crate) fn eat_line_break(&mut self) -> bool {
        self.eat("\r\n") || self.eat_char('\r') || self.eat_char('\n')
    }

    /// Soft failure at the current position.
    #[inline]
    pub(crate) fn backtrack<T>(&self) -> Parsed<T> {
        Err(Halt::Backtrack)
    }

    /// Hard failure at the current position.
    pub(crate) fn fatal<T>(&self, message: impl Into<Cow<'static, str>>) -> Parsed<T> {
        self.fatal_at(self.pos, message)
    }

    pub(crate) fn fatal_at<T>(&self, offset: usize, message: impl Into<Cow<'static, str>>) -> Parsed<T> {
        Err(Halt::Fatal {
            offset,
            message: message.into(),
        })
    }
}

/// Where an offset lands in the source, for display.
#[derive(Debug, PartialEq)]
pub(crate) struct Location<'a> {
    pub line: usize,
    pub col: usize,
    pub source_line: &'a str,
}

const TAB_WIDTH: usize = 4;

/// Resolves a byte offset into a 1-based line and column.
///
/// `\r\n` and a lone `\r` each count as one line break; a tab advances the
/// column by four.
pub(crate) fn locate(source: &str, offset: usize) -> Location<'_> {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }

    let mut line = 1;
    let mut col = 1;
    let mut line_start = 0;
    let mut chars = source[..offset].char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\r' => {
                line += 1;
                col = 1;
                line_start = i + 1;
                if let Some((j, '\n')) = chars.peek().copied() {
                    chars.next();
                    line_start = j + 1;
                }
            }
            '\n' => {
                line += 1;
                col = 1;
                line_start = i + 1;
            }
            '\t' => col += TAB_WIDTH,
            _ => col += 1,
        }
    }

    let line_end = source[line_start..]
        .find(|c| c == '\r' || c == '\n')
        .map_or(source.len(), |n| line_start + n);

    Location {
        line,
        col,
        source_line: &source[line_start..line_end],
    }
}
