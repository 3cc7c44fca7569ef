//! Object keys: quoted strings or bare identifiers, optionally dotted.

use super::scanner::Parsed;
use super::trivia::is_ident_char;
use super::Parser;

impl Parser<'_> {
    /// A run of identifier characters.
    ///
    /// Bare keys may start with a digit or `-`, so `1234`, `-x` and `a-b` are
    /// all single keys.
    pub(crate) fn identifier(&mut self) -> Parsed<String> {
        let name = self.scan.eat_while(is_ident_char);
        if name.is_empty() {
            return self.scan.backtrack();
        }
        Ok(name.to_string())
    }

    pub(crate) fn key(&mut self) -> Parsed<String> {
        if let Some(name) = self.opt(Self::string_value)? {
            return Ok(name);
        }
        self.identifier()
    }

    /// `key ( . key )*` with trivia allowed around each dot.
    ///
    /// Without `allow_line_breaks` the trivia around each dot must stay on
    /// one line, as on a TOML `key = value` line.
    pub(crate) fn key_path(&mut self, allow_line_breaks: bool) -> Parsed<Vec<String>> {
        let mut path = vec![self.key()?];
        while let Some(segment) = self.opt(|p| {
            p.trivia(allow_line_breaks)?;
            if !p.scan.eat_char('.') {
                return p.scan.backtrack();
            }
            p.trivia(allow_line_breaks)?;
            p.key()
        })? {
            path.push(segment);
        }
        Ok(path)
    }
}
