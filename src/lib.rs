//! # serde_loose
//!
//! A loose JSON and extended TOML parser producing a dynamic [`Value`] tree,
//! with Serde conversion into typed Rust values.
//!
//! ## What is loose?
//!
//! Both dialects accept far more than their formal grammars:
//!
//! - **Comments**: `// line`, `# line` and `/* block */` wherever whitespace is allowed
//! - **Keys**: unquoted, dotted (`a.b.c: 1` builds nested objects), separated by `:`, `=>` or `=`
//! - **Strings**: `"..."`, `'...'`, backtick and triple-quoted forms; adjacent literals concatenate
//! - **Numbers**: hex/octal/binary, hex floats, `_` separators, `Infinity`/`NaN`,
//!   `s64`/`u64` suffixes and complex literals like `1.5-2i`
//! - **Dates**: bare ISO 8601 dates, times and date-times
//! - **Trailing commas** in arrays and objects
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_loose::{parse_json, Interop, LineBreak, Value};
//!
//! let value = parse_json(
//!     "{ name: 'serde_loose', /* inline */ tags: ['json', 'toml',], answer: 42s64 }",
//!     LineBreak::Lf,
//!     Interop::None,
//! )
//! .unwrap();
//!
//! assert_eq!(value.get("name").and_then(Value::as_str), Some("serde_loose"));
//! assert_eq!(value.get("answer"), Some(&Value::Int64(42)));
//! ```
//!
//! ### TOML
//!
//! ```rust
//! use serde_loose::{parse_toml, Interop, LineBreak, Value};
//!
//! let doc = r#"
//! [server]
//! host = "localhost"
//! ports = [8000, 8001]
//!
//! [[user]]
//! name = "alice"
//! [[user]]
//! name = "bob"
//! "#;
//!
//! let value = parse_toml(doc, LineBreak::Lf, Interop::None).unwrap();
//! assert_eq!(
//!     value.pointer(&["server", "host"]).and_then(Value::as_str),
//!     Some("localhost")
//! );
//! assert_eq!(value.get("user").and_then(Value::as_array).map(Vec::len), Some(2));
//! ```
//!
//! ### Typed Deserialization
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_loose::from_toml_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let server: Server = from_toml_str("host = 'example.org'\nport = 8080").unwrap();
//! assert_eq!(server, Server { host: "example.org".into(), port: 8080 });
//! ```
//!
//! ## Interop
//!
//! JSON has no NaN, infinity or complex numbers. [`Interop`] chooses how they
//! materialize: as native [`Value`] variants, as tagged objects
//! (`{"nan": true}`, `{"inf": -1}`, `{"re": 1, "im": 2}`) or as `null`.
//!
//! ## Errors
//!
//! A document either parses completely or fails with an [`Error::Syntax`]
//! carrying the 1-based line and column and the offending source line.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
mod parser;
pub mod ser;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::Map;
pub use options::{Interop, LineBreak, ParseOptions};
pub use ser::ValueSerializer;
pub use value::Value;

use parser::Dialect;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parses a loose JSON document.
///
/// An empty document (or one holding only comments) yields [`Value::Null`].
///
/// # Examples
///
/// ```rust
/// use serde_loose::{parse_json, Interop, LineBreak, Value};
///
/// let value = parse_json("[1, 'two', null,]", LineBreak::Lf, Interop::None).unwrap();
/// assert_eq!(
///     value,
///     Value::Array(vec![Value::Float64(1.0), Value::from("two"), Value::Null])
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is not a single well-formed value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_json(source: &str, line_break: LineBreak, interop: Interop) -> Result<Value> {
    let options = ParseOptions::new()
        .with_line_break(line_break)
        .with_interop(interop);
    parse_json_with_options(source, &options)
}

/// Parses a loose JSON document with explicit options.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is not a single well-formed value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_json_with_options(source: &str, options: &ParseOptions) -> Result<Value> {
    parser::parse(source, options, Dialect::Json)
}

/// Parses an extended TOML document. The result is always an object.
///
/// # Examples
///
/// ```rust
/// use serde_loose::{parse_toml, Interop, LineBreak, Value};
///
/// let value = parse_toml("str1 = \"foo\" \"bar\"", LineBreak::Lf, Interop::None).unwrap();
/// assert_eq!(value.get("str1"), Some(&Value::from("foobar")));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] on malformed input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_toml(source: &str, line_break: LineBreak, interop: Interop) -> Result<Value> {
    let options = ParseOptions::new()
        .with_line_break(line_break)
        .with_interop(interop);
    parse_toml_with_options(source, &options)
}

/// Parses an extended TOML document with explicit options.
///
/// # Errors
///
/// Returns [`Error::Syntax`] on malformed input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_toml_with_options(source: &str, options: &ParseOptions) -> Result<Value> {
    parser::parse(source, options, Dialect::Toml)
}

/// Deserializes `T` from loose JSON text.
///
/// Parses with [`ParseOptions::json`], so `NaN` and `Infinity` reach float
/// fields through their tagged objects.
///
/// # Examples
///
/// ```rust
/// use serde_loose::from_json_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: f64 }
///
/// let point: Point = from_json_str("{x: 1, y: Infinity}").unwrap();
/// assert_eq!(point, Point { x: 1, y: f64::INFINITY });
/// ```
///
/// # Errors
///
/// Returns an error if the text does not parse or does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json_str<T>(source: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_json_str_with_options(source, &ParseOptions::json())
}

/// Deserializes `T` from loose JSON text with explicit options.
///
/// # Errors
///
/// Returns an error if the text does not parse or does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json_str_with_options<T>(source: &str, options: &ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse_json_with_options(source, options)?)
}

/// Deserializes `T` from extended TOML text, parsed with [`ParseOptions::toml`].
///
/// # Errors
///
/// Returns an error if the text does not parse or does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_toml_str<T>(source: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_toml_str_with_options(source, &ParseOptions::toml())
}

/// Deserializes `T` from extended TOML text with explicit options.
///
/// # Errors
///
/// Returns an error if the text does not parse or does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_toml_str_with_options<T>(source: &str, options: &ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse_toml_with_options(source, options)?)
}

/// Converts a [`Value`] into any `T: Deserialize`.
///
/// Numbers widen and narrow between integer and float targets with range
/// checks, numeric strings parse into number targets, and date-times read as
/// RFC 3339 strings.
///
/// # Examples
///
/// ```rust
/// use serde_loose::{from_value, value};
///
/// let pair: (u8, String) = from_value(value!([7, "seven"])).unwrap();
/// assert_eq!(pair, (7, "seven".to_string()));
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] when the value cannot represent `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_loose::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.get("x"), Some(&Value::Int64(1)));
/// ```
///
/// # Errors
///
/// Returns an error if `T` contains a map with non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Rewrites loose JSON as strict JSON text.
///
/// Irregular floats and complex numbers become their tagged objects and
/// date-times become RFC 3339 strings.
///
/// # Examples
///
/// ```rust
/// use serde_loose::normalize_json;
///
/// let json = normalize_json("{a: [1, NaN,], /* note */ b: 'x'}", false).unwrap();
/// assert_eq!(json, r#"{"a":[1.0,{"nan":true}],"b":"x"}"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the source does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn normalize_json(source: &str, pretty: bool) -> Result<String> {
    let value = parse_json_with_options(source, &ParseOptions::json())?;
    encode_json(&value, pretty)
}

/// Rewrites extended TOML as strict JSON text.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the source does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn normalize_toml(source: &str, pretty: bool) -> Result<String> {
    let value = parse_toml_with_options(source, &ParseOptions::json())?;
    encode_json(&value, pretty)
}

fn encode_json(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
