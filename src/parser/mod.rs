//! Grammar engine shared by the JSON and TOML dialects.
//!
//! Productions are methods on [`Parser`] returning [`Parsed`]. A production
//! that does not match returns [`Halt::Backtrack`]; [`Parser::attempt`] then
//! rewinds the cursor to where the production started so the caller can try
//! its next alternative. [`Halt::Fatal`] is never rewound and aborts the whole
//! document. Values are returned by the productions themselves, so an
//! abandoned alternative leaves nothing behind.

mod assemble;
mod container;
mod datetime;
mod key;
mod number;
pub(crate) mod scanner;
mod string;
mod toml;
mod trivia;

use crate::{Error, ParseOptions, Result, Value};
use scanner::{locate, Halt, Parsed, Scanner};
use tracing::debug;

/// Containers nested deeper than this are rejected instead of exhausting the stack.
pub(crate) const MAX_RECURSION_DEPTH: usize = 128;

/// Which top-level grammar and string rules are in effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dialect {
    Json,
    Toml,
}

pub(crate) struct Parser<'a> {
    scan: Scanner<'a>,
    options: ParseOptions,
    dialect: Dialect,
    depth: usize,
}

/// Parses a whole document.
pub(crate) fn parse(source: &str, options: &ParseOptions, dialect: Dialect) -> Result<Value> {
    debug!(?dialect, len = source.len(), "parsing document");

    let mut parser = Parser::new(source, *options, dialect);
    let outcome = match dialect {
        Dialect::Json => parser.json_document(),
        Dialect::Toml => parser.toml_document(),
    };

    outcome.map_err(|halt| {
        let (offset, message) = match halt {
            Halt::Fatal { offset, message } => (offset, message),
            Halt::Backtrack => (parser.scan.pos(), "Parse failed".into()),
        };
        debug!(?dialect, offset, %message, "document rejected");
        let loc = locate(source, offset);
        Error::syntax(loc.line, loc.col, &message, loc.source_line)
    })
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, options: ParseOptions, dialect: Dialect) -> Self {
        Parser {
            scan: Scanner::new(source),
            options,
            dialect,
            depth: 0,
        }
    }

    /// Runs a production, rewinding the cursor if it backtracks.
    pub(crate) fn attempt<T, F>(&mut self, production: F) -> Parsed<T>
    where
        F: FnOnce(&mut Self) -> Parsed<T>,
    {
        let start = self.scan.pos();
        let result = production(self);
        if let Err(Halt::Backtrack) = result {
            self.scan.reset(start);
        }
        result
    }

    /// Runs a production, turning a soft mismatch into `None`.
    pub(crate) fn opt<T, F>(&mut self, production: F) -> Parsed<Option<T>>
    where
        F: FnOnce(&mut Self) -> Parsed<T>,
    {
        match self.attempt(production) {
            Ok(value) => Ok(Some(value)),
            Err(Halt::Backtrack) => Ok(None),
            Err(fatal) => Err(fatal),
        }
    }

    /// Runs a container body one nesting level deeper.
    pub(crate) fn nested<T, F>(&mut self, production: F) -> Parsed<T>
    where
        F: FnOnce(&mut Self) -> Parsed<T>,
    {
        if self.depth >= MAX_RECURSION_DEPTH {
            return self.scan.fatal("Max recursion depth exceeded");
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Any value: primitive, array or brace object, in that order.
    pub(crate) fn value(&mut self) -> Parsed<Value> {
        if let Some(value) = self.opt(Self::primitive)? {
            return Ok(value);
        }
        if let Some(value) = self.opt(Self::array)? {
            return Ok(value);
        }
        self.attempt(Self::object)
    }

    /// String, boolean, null, time, date-time, date or number.
    pub(crate) fn primitive(&mut self) -> Parsed<Value> {
        if let Some(text) = self.opt(Self::string_value)? {
            return Ok(Value::String(text));
        }
        if let Some(value) = self.opt(Self::keyword)? {
            return Ok(value);
        }
        if let Some(value) = self.opt(Self::datetime_value)? {
            return Ok(value);
        }
        self.attempt(Self::number_value)
    }

    fn keyword(&mut self) -> Parsed<Value> {
        let value = if self.scan.eat_caseless("true") {
            Value::Bool(true)
        } else if self.scan.eat_caseless("false") {
            Value::Bool(false)
        } else if self.scan.eat_caseless("null")
            || self.scan.eat("undefined")
            || self.scan.eat("None")
        {
            Value::Null
        } else {
            return self.scan.backtrack();
        };
        self.word_boundary()?;
        Ok(value)
    }

    fn json_document(&mut self) -> Parsed<Value> {
        self.sp0()?;
        let value = self.opt(Self::value)?.unwrap_or(Value::Null);
        self.sp0()?;
        if !self.scan.is_eof() {
            return self.scan.fatal("Expect termination");
        }
        Ok(value)
    }
}
