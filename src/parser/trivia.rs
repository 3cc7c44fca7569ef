//! Whitespace and the three comment forms: `// line`, `# line` and `/* block */`.

use super::scanner::Parsed;
use super::Parser;

/// Identifier characters: Unicode `XID_Continue`, `$`, `-` and the zero-width joiners.
pub(crate) fn is_ident_char(ch: char) -> bool {
    unicode_ident::is_xid_continue(ch) || matches!(ch, '$' | '-' | '\u{200C}' | '\u{200D}')
}

/// Characters that must not directly follow a keyword or number.
///
/// Same as [`is_ident_char`] minus `-`, which separates the parts of `1-2i`.
pub(crate) fn is_word_char(ch: char) -> bool {
    unicode_ident::is_xid_continue(ch) || matches!(ch, '$' | '\u{200C}' | '\u{200D}')
}

impl Parser<'_> {
    /// Skips whitespace and comments, line breaks included.
    pub(crate) fn sp0(&mut self) -> Parsed<()> {
        self.skip_trivia(true)
    }

    /// Skips whitespace and comments on the current line.
    ///
    /// A line comment stops in front of its line break. Block comments may
    /// still span lines.
    pub(crate) fn sp0_no_lb(&mut self) -> Parsed<()> {
        self.skip_trivia(false)
    }

    /// Like [`Parser::sp0_no_lb`] but requires at least one character.
    pub(crate) fn sp1_no_lb(&mut self) -> Parsed<()> {
        let start = self.scan.pos();
        self.sp0_no_lb()?;
        if self.scan.pos() == start {
            return self.scan.backtrack();
        }
        Ok(())
    }

    pub(crate) fn trivia(&mut self, line_breaks: bool) -> Parsed<()> {
        self.skip_trivia(line_breaks)
    }

    fn skip_trivia(&mut self, line_breaks: bool) -> Parsed<()> {
        loop {
            self.scan
                .eat_while(|c| c.is_whitespace() && (line_breaks || (c != '\n' && c != '\r')));

            if self.scan.starts_with("//") || self.scan.starts_with("#") {
                self.scan.eat_while(|c| c != '\n' && c != '\r');
            } else if self.scan.starts_with("/*") {
                self.block_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn block_comment(&mut self) -> Parsed<()> {
        self.scan.advance(2);
        match self.scan.rest().find("*/") {
            Some(end) => {
                self.scan.advance(end + 2);
                Ok(())
            }
            None => {
                self.scan.advance(self.scan.rest().len());
                self.scan
                    .fatal("An unexpected termination has appeared in the block comment.")
            }
        }
    }

    /// Zero-width check that no identifier character follows.
    pub(crate) fn word_boundary(&self) -> Parsed<()> {
        match self.scan.peek() {
            Some(ch) if is_word_char(ch) => self.scan.backtrack(),
            _ => Ok(()),
        }
    }

    /// A line break, or the end of input without consuming anything.
    pub(crate) fn end_of_line(&mut self) -> Parsed<()> {
        if self.scan.eat_line_break() || self.scan.is_eof() {
            Ok(())
        } else {
            self.scan.backtrack()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::scanner::Halt;
    use super::super::Dialect;
    use super::*;
    use crate::ParseOptions;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, ParseOptions::new(), Dialect::Json)
    }

    #[test]
    fn test_sp0_skips_all_comment_forms() {
        let mut p = parser(" // a\n# b\r\n/* c\n d */\t x");
        p.sp0().unwrap();
        assert_eq!(p.scan.rest(), "x");
    }

    #[test]
    fn test_sp0_no_lb_stops_before_line_break() {
        let mut p = parser("  # comment\nnext");
        p.sp0_no_lb().unwrap();
        assert_eq!(p.scan.rest(), "\nnext");
    }

    #[test]
    fn test_sp0_no_lb_crosses_block_comment() {
        let mut p = parser(" /* one\ntwo */ x");
        p.sp0_no_lb().unwrap();
        assert_eq!(p.scan.rest(), "x");
    }

    #[test]
    fn test_sp1_no_lb_requires_progress() {
        let mut p = parser("x");
        assert_eq!(p.sp1_no_lb(), Err(Halt::Backtrack));
    }

    #[test]
    fn test_unterminated_block_comment_is_fatal() {
        let mut p = parser("/* never closed");
        match p.sp0() {
            Err(Halt::Fatal { message, .. }) => {
                assert!(message.contains("block comment"));
            }
            other => panic!("expected fatal error, got {:?}", other),
        }
    }

    #[test]
    fn test_word_chars() {
        assert!(is_ident_char('-'));
        assert!(!is_word_char('-'));
        assert!(is_word_char('_'));
        assert!(is_word_char('é'));
        assert!(is_word_char('\u{200D}'));
        assert!(!is_word_char(','));
        assert!(!is_word_char('.'));
    }
}
