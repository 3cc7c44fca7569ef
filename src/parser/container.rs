//! Arrays and brace objects. Both accept trailing commas, and objects accept
//! dotted keys, which are merged the same way TOML tables are.

use super::assemble::Assembler;
use super::scanner::Parsed;
use super::Parser;
use crate::Value;

impl Parser<'_> {
    /// `[ value, ... ]`, including any trivia after the closing bracket.
    pub(crate) fn array(&mut self) -> Parsed<Value> {
        if !self.scan.eat_char('[') {
            return self.scan.backtrack();
        }
        self.nested(Self::array_items)
    }

    fn array_items(&mut self) -> Parsed<Value> {
        self.sp0()?;

        let mut items = Vec::new();
        if let Some(first) = self.opt(Self::value)? {
            items.push(first);
            self.sp0()?;
            while self.scan.eat_char(',') {
                self.sp0()?;
                match self.opt(Self::value)? {
                    Some(item) => items.push(item),
                    None if self.scan.starts_with("]") => break,
                    None => return self.scan.fatal("Expect array closing bracket ']' or value"),
                }
                self.sp0()?;
            }
        }
        if self.scan.eat_char(',') {
            self.sp0()?;
        }
        if !self.scan.eat_char(']') {
            return self.scan.fatal("Expect array closing bracket ']'");
        }
        self.sp0()?;
        Ok(Value::Array(items))
    }

    /// `{ key: value, ... }` with `:`, `=>` or `=` between key and value.
    pub(crate) fn object(&mut self) -> Parsed<Value> {
        if !self.scan.eat_char('{') {
            return self.scan.backtrack();
        }
        self.nested(Self::object_entries)
    }

    fn object_entries(&mut self) -> Parsed<Value> {
        self.sp0()?;

        let mut assembler = Assembler::new();
        if let Some((path, value)) = self.opt(Self::object_pair)? {
            assembler.insert(path, value);
            while self.scan.eat_char(',') {
                self.sp0()?;
                match self.opt(Self::object_pair)? {
                    Some((path, value)) => assembler.insert(path, value),
                    None if self.scan.starts_with("}") => break,
                    None => {
                        return self
                            .scan
                            .fatal("Expect object closing bracket '}' or key-value pair")
                    }
                }
            }
        }
        if self.scan.eat_char(',') {
            self.sp0()?;
        }
        if !self.scan.eat_char('}') {
            return self.scan.fatal("Expect object closing bracket '}'");
        }
        self.sp0()?;
        Ok(Value::Object(assembler.finish()))
    }

    fn object_pair(&mut self) -> Parsed<(Vec<String>, Value)> {
        let path = self.key_path(true)?;
        self.sp0()?;
        if !(self.scan.eat_char(':') || self.scan.eat("=>") || self.scan.eat_char('=')) {
            return self.scan.backtrack();
        }
        self.sp0()?;
        let Some(value) = self.opt(Self::value)? else {
            return self.scan.fatal("Expect object property value");
        };
        self.sp0()?;
        Ok((path, value))
    }
}
