//! TOML documents: top-level `key = value` lines, `[table]` and
//! `[[table array]]` sections.

use super::assemble::Assembler;
use super::scanner::Parsed;
use super::Parser;
use crate::{Map, Value};

enum Section {
    Pair(Vec<String>, Value),
    Table(Vec<String>, Map),
    TableArray(Vec<String>, Map),
}

impl Parser<'_> {
    pub(crate) fn toml_document(&mut self) -> Parsed<Value> {
        self.sp0()?;
        let mut assembler = Assembler::new();
        while let Some(section) = self.opt(Self::section)? {
            match section {
                Section::Pair(path, value) => assembler.insert(path, value),
                Section::Table(path, body) => assembler.insert(path, Value::Object(body)),
                Section::TableArray(path, body) => assembler.push_table_array(path, body),
            }
            self.sp0()?;
        }
        if !self.scan.is_eof() {
            return self.scan.fatal("Expect termination");
        }
        Ok(Value::Object(assembler.finish()))
    }

    fn section(&mut self) -> Parsed<Section> {
        if let Some((path, value)) = self.opt(Self::toml_pair)? {
            return Ok(Section::Pair(path, value));
        }
        if let Some((path, body)) = self.opt(|p| p.header("[[", "]]"))? {
            return Ok(Section::TableArray(path, body));
        }
        let (path, body) = self.attempt(|p| p.header("[", "]"))?;
        Ok(Section::Table(path, body))
    }

    /// `key = value` on one line. Arrays and brace objects may span lines.
    fn toml_pair(&mut self) -> Parsed<(Vec<String>, Value)> {
        let path = self.key_path(false)?;
        self.sp0_no_lb()?;
        if !self.scan.eat_char('=') {
            return self.scan.backtrack();
        }
        self.sp0_no_lb()?;

        let line_value = self.opt(|p| {
            let value = p.primitive()?;
            p.sp0_no_lb()?;
            p.end_of_line()?;
            Ok(value)
        })?;
        if let Some(value) = line_value {
            return Ok((path, value));
        }
        if let Some(value) = self.opt(Self::array)? {
            return Ok((path, value));
        }
        if let Some(value) = self.opt(Self::object)? {
            return Ok((path, value));
        }
        self.scan.fatal("Expect object property value")
    }

    /// A `[path]` or `[[path]]` header line followed by its `key = value`
    /// lines, assembled into one table.
    fn header(&mut self, open: &str, close: &'static str) -> Parsed<(Vec<String>, Map)> {
        if !self.scan.eat(open) {
            return self.scan.backtrack();
        }
        let closed = self.opt(|p| {
            p.sp0_no_lb()?;
            let path = p.key_path(true)?;
            p.sp0_no_lb()?;
            if !p.scan.eat(close) {
                return p.scan.backtrack();
            }
            p.sp0_no_lb()?;
            Ok(path)
        })?;
        let Some(path) = closed else {
            return self.scan.fatal(if close == "]]" {
                "Expect array of table closing bracket ']]'"
            } else {
                "Expect table closing bracket ']'"
            });
        };
        if !(self.scan.eat_line_break() || self.scan.is_eof()) {
            return self.scan.fatal("Expect line break or EOF");
        }
        self.sp0()?;

        let mut body = Assembler::new();
        while let Some((path, value)) = self.opt(Self::toml_pair)? {
            body.insert(path, value);
            self.sp0()?;
        }
        Ok((path, body.finish()))
    }
}
