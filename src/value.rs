//! Dynamic value representation for parsed documents.
//!
//! Every document, JSON or TOML, parses into one [`Value`] tree. The tree is
//! built bottom-up in a single pass and never contains cycles.
//!
//! ## Numeric Variants
//!
//! Loose JSON has a single numeric type by default: a bare literal such as
//! `42` becomes [`Value::Float64`]. Fixed-width integers are opt-in through a
//! suffix:
//!
//! ```rust
//! use serde_loose::{parse_json, Interop, LineBreak, Value};
//!
//! let parse = |s| parse_json(s, LineBreak::Lf, Interop::None).unwrap();
//!
//! assert_eq!(parse("42"), Value::Float64(42.0));
//! assert_eq!(parse("42s64"), Value::Int64(42));
//! assert_eq!(parse("0xffffffffffffffffu64"), Value::Uint64(u64::MAX));
//! assert_eq!(parse("1+2i"), Value::Complex(1.0, 2.0));
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_loose::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::Float64(42.0);
//! assert!(value.is_number());
//! assert_eq!(value.as_i64(), Some(42));
//!
//! let num: f64 = f64::try_from(value).unwrap();
//! assert_eq!(num, 42.0);
//! ```

use crate::Map;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed parsed value.
///
/// `Float64` keeps the sign of zero: `-0.0` and `0.0` compare equal with `==`
/// but differ in [`f64::to_bits`].
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    /// Real and imaginary parts.
    Complex(f64, f64),
    String(String),
    /// Always normalized to UTC.
    DateTime(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` for `Int64`, `Uint64` and `Float64`.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Int64(_) | Value::Uint64(_) | Value::Float64(_))
    }

    /// Returns `true` if the value is a complex number.
    #[inline]
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Value::Complex(..))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a date-time.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::DateTime(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Short name of the variant, used in conversion errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int64",
            Value::Uint64(_) => "uint64",
            Value::Float64(_) => "float64",
            Value::Complex(..) => "complex",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer in range or a whole-number float.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_loose::Value;
    ///
    /// assert_eq!(Value::Int64(-7).as_i64(), Some(-7));
    /// assert_eq!(Value::Float64(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::Float64(42.5).as_i64(), None);
    /// assert_eq!(Value::Uint64(u64::MAX).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            Value::Uint64(u) => i64::try_from(*u).ok(),
            Value::Float64(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer in range or a
    /// whole-number float.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int64(i) => u64::try_from(*i).ok(),
            Value::Uint64(u) => Some(*u),
            Value::Float64(f) => {
                if f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64 {
                    Some(*f as u64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns any numeric variant as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(i) => Some(*i as f64),
            Value::Uint64(u) => Some(*u as f64),
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a complex number, returns `(re, im)`.
    #[inline]
    #[must_use]
    pub fn as_complex(&self) -> Option<(f64, f64)> {
        match self {
            Value::Complex(re, im) => Some((*re, *im)),
            _ => None,
        }
    }

    /// If the value is a date-time, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up a key when the value is an object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_loose::{parse_toml, Interop, LineBreak};
    ///
    /// let doc = parse_toml("[server]\nport = 8080", LineBreak::Lf, Interop::None).unwrap();
    /// let port = doc.get("server").and_then(|s| s.get("port"));
    /// assert_eq!(port.and_then(|p| p.as_f64()), Some(8080.0));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Follows a sequence of object keys.
    #[must_use]
    pub fn pointer(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }
}

/// Formats a date-time the way it is serialized: RFC 3339 with a `Z` suffix.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int64(i) => write!(f, "{}", i),
            Value::Uint64(u) => write!(f, "{}", u),
            Value::Float64(x) => write!(f, "{}", x),
            Value::Complex(re, im) => {
                if im.is_sign_negative() {
                    write!(f, "{}-{}i", re, -im)
                } else {
                    write!(f, "{}+{}i", re, im)
                }
            }
            Value::String(s) => write!(f, "{:?}", s),
            Value::DateTime(dt) => write!(f, "{}", format_datetime(dt)),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Object(obj) => {
                write!(
                    f,
                    "{{{}}}",
                    obj.iter()
                        .map(|(k, v)| format!("{:?}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int64(i) => serializer.serialize_i64(*i),
            Value::Uint64(u) => serializer.serialize_u64(*u),
            Value::Float64(f) => serializer.serialize_f64(*f),
            Value::Complex(re, im) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("re", re)?;
                map.serialize_entry("im", im)?;
                map.end()
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Int64(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Value::Int64(i)),
                    Err(_) => Ok(Value::Uint64(value)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float64(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::type_mismatch("i64", value.type_name()))
    }
}

impl TryFrom<Value> for u64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_u64()
            .ok_or_else(|| crate::Error::type_mismatch("u64", value.type_name()))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::type_mismatch("f64", value.type_name()))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(crate::Error::type_mismatch("bool", other.type_name())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int64(value as i64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Uint64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float64(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Value::Int64(42)).unwrap(), 42);
        assert_eq!(i64::try_from(Value::Float64(42.0)).unwrap(), 42);
        assert_eq!(i64::try_from(Value::Uint64(7)).unwrap(), 7);
        assert!(i64::try_from(Value::Uint64(u64::MAX)).is_err());
        assert!(i64::try_from(Value::String("test".to_string())).is_err());
    }

    #[test]
    fn test_tryfrom_u64() {
        assert_eq!(u64::try_from(Value::Uint64(u64::MAX)).unwrap(), u64::MAX);
        assert!(u64::try_from(Value::Int64(-1)).is_err());
        assert!(u64::try_from(Value::Float64(-1.0)).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        assert_eq!(f64::try_from(Value::Float64(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Value::Int64(42)).unwrap(), 42.0);
        assert!(f64::try_from(Value::Complex(1.0, 2.0)).is_err());
    }

    #[test]
    fn test_tryfrom_bool_and_string() {
        assert!(bool::try_from(Value::Bool(true)).unwrap());
        assert!(bool::try_from(Value::Int64(1)).is_err());
        assert_eq!(String::try_from(Value::from("hello")).unwrap(), "hello");
        assert!(String::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int64(42));
        assert_eq!(Value::from(42u64), Value::Uint64(42));
        assert_eq!(Value::from(3.5f64), Value::Float64(3.5));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
    }

    #[test]
    fn test_signed_zero_is_preserved() {
        let value = Value::Float64(-0.0);
        assert_eq!(value, Value::Float64(0.0));
        assert!(value.as_f64().unwrap().is_sign_negative());
    }

    #[test]
    fn test_pointer() {
        let mut inner = Map::new();
        inner.insert("b".to_string(), Value::Bool(true));
        let mut outer = Map::new();
        outer.insert("a".to_string(), Value::Object(inner));
        let value = Value::Object(outer);

        assert_eq!(value.pointer(&["a", "b"]), Some(&Value::Bool(true)));
        assert_eq!(value.pointer(&["a", "c"]), None);
        assert_eq!(value.pointer(&[]), Some(&value));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Complex(1.5, -2.0).to_string(), "1.5-2i");
        assert_eq!(
            Value::Array(vec![Value::Null, Value::from("x")]).to_string(),
            "[null, \"x\"]"
        );
        let dt = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2020-01-02T03:04:05Z");
    }

    #[test]
    fn test_serialize_complex_as_map() {
        let json = serde_json::to_string(&Value::Complex(1.0, -2.5)).unwrap();
        assert_eq!(json, r#"{"re":1.0,"im":-2.5}"#);
    }

    #[test]
    fn test_deserialize_from_json() {
        let value: Value = serde_json::from_str(r#"{"a":[1,2.5,null],"b":18446744073709551615}"#)
            .unwrap();
        assert_eq!(
            value.get("a"),
            Some(&Value::Array(vec![
                Value::Int64(1),
                Value::Float64(2.5),
                Value::Null
            ]))
        );
        assert_eq!(value.get("b"), Some(&Value::Uint64(u64::MAX)));
    }
}
