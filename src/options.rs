//! Configuration options for loose JSON and TOML parsing.
//!
//! This module provides types to customize how a document is turned into a
//! [`Value`](crate::Value):
//!
//! - [`ParseOptions`]: Main configuration struct
//! - [`LineBreak`]: Line break written for raw newlines inside multi-line strings
//! - [`Interop`]: How NaN, Infinity and complex numbers are materialized
//!
//! ## Examples
//!
//! ```rust
//! use serde_loose::{parse_json_with_options, Interop, LineBreak, ParseOptions, Value};
//!
//! // Collapse irregular floats to null
//! let options = ParseOptions::new().with_interop(Interop::JsonAsNull);
//! let value = parse_json_with_options("[NaN, 1.5]", &options).unwrap();
//! assert_eq!(value, Value::Array(vec![Value::Null, Value::Float64(1.5)]));
//!
//! // Windows line breaks inside backtick strings
//! let options = ParseOptions::new().with_line_break(LineBreak::CrLf);
//! let value = parse_json_with_options("`a\nb`", &options).unwrap();
//! assert_eq!(value.as_str(), Some("a\r\nb"));
//! ```

/// Line break sequence written for raw newlines in multi-line string literals.
///
/// Newlines produced by escape sequences (`\n`, `\r`) are never rewritten.
///
/// # Examples
///
/// ```rust
/// use serde_loose::LineBreak;
///
/// assert_eq!(LineBreak::Lf.as_str(), "\n");
/// assert_eq!(LineBreak::CrLf.as_str(), "\r\n");
/// assert_eq!(LineBreak::Cr.as_str(), "\r");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineBreak {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineBreak {
    /// Returns the string representation of this line break.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::CrLf => "\r\n",
            LineBreak::Cr => "\r",
        }
    }
}

/// Representation of values that plain JSON cannot carry.
///
/// | mode         | NaN / ±Infinity            | complex            |
/// |--------------|----------------------------|--------------------|
/// | `None`       | native `Float64`           | native `Complex`   |
/// | `Json`       | `{"nan":true}` / `{"inf":±1}` | `{"re":..,"im":..}` |
/// | `Toml`       | native `Float64`           | `{"re":..,"im":..}` |
/// | `JsonAsNull` | `Null`                     | `Null`             |
/// | `TomlAsNull` | native `Float64`           | `Null`             |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Interop {
    #[default]
    None,
    Json,
    Toml,
    JsonAsNull,
    TomlAsNull,
}

impl Interop {
    /// Returns `true` if NaN and Infinity are encoded as one-key objects.
    #[inline]
    #[must_use]
    pub const fn tags_special_floats(&self) -> bool {
        matches!(self, Interop::Json)
    }

    /// Returns `true` if NaN and Infinity collapse to null.
    #[inline]
    #[must_use]
    pub const fn nulls_special_floats(&self) -> bool {
        matches!(self, Interop::JsonAsNull)
    }

    /// Returns `true` if complex numbers become `{"re", "im"}` objects.
    #[inline]
    #[must_use]
    pub const fn tags_complex(&self) -> bool {
        matches!(self, Interop::Json | Interop::Toml)
    }

    /// Returns `true` if complex numbers collapse to null.
    #[inline]
    #[must_use]
    pub const fn nulls_complex(&self) -> bool {
        matches!(self, Interop::JsonAsNull | Interop::TomlAsNull)
    }
}

/// Configuration options for parsing.
///
/// # Examples
///
/// ```rust
/// use serde_loose::{Interop, LineBreak, ParseOptions};
///
/// // Defaults: LF line breaks, native irregular values
/// let options = ParseOptions::new();
/// assert_eq!(options.interop, Interop::None);
///
/// // Presets used by the typed entry points
/// assert_eq!(ParseOptions::json().interop, Interop::Json);
/// assert_eq!(ParseOptions::toml().interop, Interop::Toml);
///
/// let options = ParseOptions::new()
///     .with_line_break(LineBreak::Cr)
///     .with_interop(Interop::TomlAsNull);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub line_break: LineBreak,
    pub interop: Interop,
}

impl ParseOptions {
    /// Creates default options (LF line breaks, no interop encoding).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options producing JSON-encodable trees: irregular floats and complex
    /// numbers become tagged objects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_loose::{Interop, ParseOptions};
    ///
    /// assert!(ParseOptions::json().interop.tags_special_floats());
    /// ```
    #[must_use]
    pub fn json() -> Self {
        ParseOptions {
            interop: Interop::Json,
            ..Default::default()
        }
    }

    /// Options matching TOML's own value space: native NaN and Infinity,
    /// complex numbers as `{re, im}` objects.
    #[must_use]
    pub fn toml() -> Self {
        ParseOptions {
            interop: Interop::Toml,
            ..Default::default()
        }
    }

    /// Sets the line break written for raw newlines in multi-line strings.
    #[must_use]
    pub fn with_line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }

    /// Sets the interop mode.
    #[must_use]
    pub fn with_interop(mut self, interop: Interop) -> Self {
        self.interop = interop;
        self
    }
}
