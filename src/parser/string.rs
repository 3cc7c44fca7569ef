//! String literals.
//!
//! Quote forms, in the order they are tried:
//!
//! - JSON: `"""..."""`, `'''...'''`, `"..."`, `'...'`, `` `...` ``
//! - TOML: `"""..."""`, `"..."`, `'''...'''`, `'...'` (raw), `` `...` ``
//!
//! Triple-quoted and backtick forms may span lines; their raw line breaks are
//! rewritten to the configured [`LineBreak`](crate::LineBreak). Adjacent
//! literals on one line concatenate: `"foo" 'bar'` is `"foobar"`.

use super::scanner::Parsed;
use super::{Dialect, Parser};

const UNTERMINATED: &str = "An unexpected termination has appeared in the string literal.";
const NEWLINE: &str = "An unexpected newline has appeared in the string literal.";

impl Parser<'_> {
    /// One or more literals separated only by same-line trivia.
    pub(crate) fn string_value(&mut self) -> Parsed<String> {
        let mut text = self.string_literal()?;
        while let Some(next) = self.opt(|p| {
            p.sp1_no_lb()?;
            p.string_literal()
        })? {
            text.push_str(&next);
        }
        Ok(text)
    }

    fn string_literal(&mut self) -> Parsed<String> {
        match self.dialect {
            Dialect::Json => {
                if let Some(text) = self.opt(Self::multiline_basic)? {
                    return Ok(text);
                }
                if let Some(text) = self.opt(Self::multiline_literal)? {
                    return Ok(text);
                }
                if let Some(text) = self.opt(|p| p.quoted('"', false))? {
                    return Ok(text);
                }
                if let Some(text) = self.opt(|p| p.quoted('\'', false))? {
                    return Ok(text);
                }
            }
            Dialect::Toml => {
                if let Some(text) = self.opt(Self::multiline_basic)? {
                    return Ok(text);
                }
                if let Some(text) = self.opt(|p| p.quoted('"', false))? {
                    return Ok(text);
                }
                if let Some(text) = self.opt(Self::multiline_literal)? {
                    return Ok(text);
                }
                if let Some(text) = self.opt(Self::literal)? {
                    return Ok(text);
                }
            }
        }
        self.quoted('`', true)
    }

    /// Escape-processing literal closed by `quote`.
    fn quoted(&mut self, quote: char, multiline: bool) -> Parsed<String> {
        if !self.scan.eat_char(quote) {
            return self.scan.backtrack();
        }
        let mut text = String::new();
        loop {
            match self.scan.peek() {
                None => return self.scan.fatal(UNTERMINATED),
                Some(c) if c == quote => {
                    self.scan.bump();
                    return Ok(text);
                }
                Some('\\') => {
                    self.scan.bump();
                    self.escape(&mut text)?;
                }
                Some('\r' | '\n') if multiline => {
                    self.scan.eat_line_break();
                    text.push_str(self.options.line_break.as_str());
                }
                Some('\r' | '\n') => return self.scan.fatal(NEWLINE),
                Some(c) => {
                    self.scan.bump();
                    text.push(c);
                }
            }
        }
    }

    /// TOML `'...'`: no escapes.
    fn literal(&mut self) -> Parsed<String> {
        if !self.scan.eat_char('\'') {
            return self.scan.backtrack();
        }
        let text = self.scan.eat_while(|c| c != '\'' && c != '\r' && c != '\n');
        match self.scan.peek() {
            Some('\'') => {
                self.scan.bump();
                Ok(text.to_string())
            }
            Some(_) => self.scan.fatal(NEWLINE),
            None => self.scan.fatal(UNTERMINATED),
        }
    }

    /// `"""..."""` with escapes and line continuation.
    fn multiline_basic(&mut self) -> Parsed<String> {
        if !self.scan.eat("\"\"\"") {
            return self.scan.backtrack();
        }
        self.scan.eat_line_break();
        let mut text = String::new();
        loop {
            if self.scan.starts_with("\"\"\"") {
                if self.scan.starts_with("\"\"\"\"") {
                    self.scan.bump();
                    text.push('"');
                    continue;
                }
                self.scan.advance(3);
                return Ok(text);
            }
            match self.scan.peek() {
                None => return self.scan.fatal(UNTERMINATED),
                Some('\\') => {
                    self.scan.bump();
                    if !self.line_continuation() {
                        self.escape(&mut text)?;
                    }
                }
                Some('\r' | '\n') => {
                    self.scan.eat_line_break();
                    text.push_str(self.options.line_break.as_str());
                }
                Some(c) => {
                    self.scan.bump();
                    text.push(c);
                }
            }
        }
    }

    /// `'''...'''`: raw, may span lines.
    fn multiline_literal(&mut self) -> Parsed<String> {
        if !self.scan.eat("'''") {
            return self.scan.backtrack();
        }
        self.scan.eat_line_break();
        let mut text = String::new();
        loop {
            if self.scan.starts_with("'''") {
                if self.scan.starts_with("''''") {
                    self.scan.bump();
                    text.push('\'');
                    continue;
                }
                self.scan.advance(3);
                return Ok(text);
            }
            match self.scan.peek() {
                None => return self.scan.fatal(UNTERMINATED),
                Some('\r' | '\n') => {
                    self.scan.eat_line_break();
                    text.push_str(self.options.line_break.as_str());
                }
                Some(c) => {
                    self.scan.bump();
                    text.push(c);
                }
            }
        }
    }

    /// After a `\`: optional blanks, a line break, then any whitespace, all dropped.
    fn line_continuation(&mut self) -> bool {
        let start = self.scan.pos();
        self.scan.eat_while(|c| c == ' ' || c == '\t');
        if self.scan.eat_line_break() {
            self.scan.eat_while(char::is_whitespace);
            true
        } else {
            self.scan.reset(start);
            false
        }
    }

    /// Decodes the sequence following a `\` into `text`.
    ///
    /// An unrecognized sequence yields the escaped character itself.
    fn escape(&mut self, text: &mut String) -> Parsed<()> {
        let Some(c) = self.scan.bump() else {
            return self.scan.fatal(UNTERMINATED);
        };
        let decoded = match c {
            'n' | 'N' => '\n',
            'r' | 'R' => '\r',
            't' | 'T' => '\t',
            'v' | 'V' => '\u{000B}',
            'b' | 'B' => '\u{0008}',
            'f' | 'F' => '\u{000C}',
            'u' => self
                .hex_escape(4, 4)
                .or_else(|| self.braced_hex_escape())
                .unwrap_or('u'),
            'U' => self.hex_escape(8, 8).unwrap_or('U'),
            'x' => self.hex_escape(2, 2).unwrap_or('x'),
            '0'..='7' => self.octal_escape(c).unwrap_or(c),
            '\r' | '\n' => {
                if c == '\r' {
                    self.scan.eat_char('\n');
                }
                return Ok(());
            }
            other => other,
        };
        text.push(decoded);
        Ok(())
    }

    /// Exactly `min..=max` hex digits; consumes nothing on a shorter run.
    fn hex_escape(&mut self, min: usize, max: usize) -> Option<char> {
        let digits: String = self
            .scan
            .rest()
            .chars()
            .take(max)
            .take_while(char::is_ascii_hexdigit)
            .collect();
        if digits.len() < min {
            return None;
        }
        self.scan.advance(digits.len());
        code_point(u32::from_str_radix(&digits, 16).ok())
    }

    /// `{X}` .. `{XXXXXX}`.
    fn braced_hex_escape(&mut self) -> Option<char> {
        let start = self.scan.pos();
        if self.scan.eat_char('{') {
            if let Some(decoded) = self.hex_escape(1, 6) {
                if self.scan.eat_char('}') {
                    return Some(decoded);
                }
            }
        }
        self.scan.reset(start);
        None
    }

    /// Three octal digits, the first already consumed.
    fn octal_escape(&mut self, first: char) -> Option<char> {
        let rest: String = self.scan.rest().chars().take(2).collect();
        if rest.len() != 2 || !rest.chars().all(|c| c.is_digit(8)) {
            return None;
        }
        self.scan.advance(2);
        let digits = format!("{}{}", first, rest);
        code_point(u32::from_str_radix(&digits, 8).ok())
    }
}

/// Escaped code points that are not Unicode scalar values decode to U+FFFD.
fn code_point(value: Option<u32>) -> Option<char> {
    value.map(|v| char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER))
}
