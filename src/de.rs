//! Conversion from [`Value`] into Rust data structures.
//!
//! [`ValueDeserializer`] drives any `T: Deserialize` from a parsed value tree.
//! It is lenient in the same spirit as the parser:
//!
//! - **Numbers** convert between integer and float targets when the value
//!   fits; whole floats such as `42.0` fill integer fields
//! - **Strings** holding numbers fill numeric fields, and numbers fill string fields
//! - **Date-times** read as RFC 3339 strings, so `chrono::DateTime<Utc>` fields work
//! - **Irregular floats**: the one-key objects `{"nan": true}` and `{"inf": ±1}`
//!   fill `f32`/`f64` fields
//! - **Bytes** decode from standard base64 strings, or from arrays of numbers
//! - **Complex numbers** read as a `{re, im}` map or a `(re, im)` tuple
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_loose::{from_value, parse_json, Interop, LineBreak};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, label: String }
//!
//! let value = parse_json("{x: '12', label: 3.5}", LineBreak::Lf, Interop::None).unwrap();
//! let data: Data = from_value(value).unwrap();
//! assert_eq!(data, Data { x: 12, label: "3.5".to_string() });
//! ```

use crate::error::{Error, Result};
use crate::value::format_datetime;
use crate::{Map, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::{self, Visitor};

/// Deserializes Rust values out of an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    /// Wraps a value for deserialization.
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, self.value.type_name())
    }

    /// Widest integer view of the value, for range-checked narrowing.
    fn integer(&self, expected: &str) -> Result<i128> {
        match &self.value {
            Value::Int64(i) => Ok(i128::from(*i)),
            Value::Uint64(u) => Ok(i128::from(*u)),
            Value::Float64(f) => whole_float(*f).ok_or_else(|| self.mismatch(expected)),
            Value::String(s) => {
                let text = s.trim();
                text.parse::<i128>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(whole_float))
                    .ok_or_else(|| self.mismatch(expected))
            }
            _ => Err(self.mismatch(expected)),
        }
    }

    fn float(&self, expected: &str) -> Result<f64> {
        match &self.value {
            Value::Int64(i) => Ok(*i as f64),
            Value::Uint64(u) => Ok(*u as f64),
            Value::Float64(f) => Ok(*f),
            Value::String(s) => s.trim().parse().map_err(|_| self.mismatch(expected)),
            Value::Object(map) => special_float(map).ok_or_else(|| self.mismatch(expected)),
            _ => Err(self.mismatch(expected)),
        }
    }
}

/// `f` as an integer, if it has no fractional part and fits `i128`.
fn whole_float(f: f64) -> Option<i128> {
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i128)
    } else {
        None
    }
}

/// Recognizes `{"nan": true}` and `{"inf": ±n}`.
fn special_float(map: &Map) -> Option<f64> {
    if map.len() != 1 {
        return None;
    }
    if let Some(flag) = map.get("nan") {
        return (flag.as_bool() == Some(true)).then_some(f64::NAN);
    }
    let sign = map.get("inf")?.as_f64()?;
    Some(if sign < 0.0 {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}

fn complex_map(re: f64, im: f64) -> Map {
    let mut map = Map::with_capacity(2);
    map.insert("re".to_string(), Value::Float64(re));
    map.insert("im".to_string(), Value::Float64(im));
    map
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident($ty:ty),)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                let n = self.integer(stringify!($ty))?;
                let narrowed = <$ty>::try_from(n).map_err(|_| {
                    Error::custom(format!("{} is out of range for {}", n, stringify!($ty)))
                })?;
                visitor.$visit(narrowed)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int64(i) => visitor.visit_i64(i),
            Value::Uint64(u) => visitor.visit_u64(u),
            Value::Float64(f) => visitor.visit_f64(f),
            Value::Complex(re, im) => visitor.visit_map(MapDeserializer::new(complex_map(re, im))),
            Value::String(s) => visitor.visit_string(s),
            Value::DateTime(dt) => visitor.visit_string(format_datetime(&dt)),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Bool(b) => visitor.visit_bool(b),
            _ => Err(self.mismatch("bool")),
        }
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f32(self.float("f32")? as f32)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.float("f64")?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if let Value::String(s) = &self.value {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return visitor.visit_char(c);
            }
        }
        Err(self.mismatch("char"))
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_string(s),
            Value::DateTime(dt) => visitor.visit_string(format_datetime(&dt)),
            Value::Int64(_) | Value::Uint64(_) | Value::Float64(_) | Value::Bool(_) => {
                visitor.visit_string(self.value.to_string())
            }
            _ => Err(self.mismatch("string")),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(s) => {
                let bytes = STANDARD
                    .decode(s.as_bytes())
                    .map_err(|err| Error::custom(format!("invalid base64 in {:?}: {}", s, err)))?;
                visitor.visit_byte_buf(bytes)
            }
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(self.mismatch("bytes")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            _ => Err(self.mismatch("null")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Complex(re, im) => visitor.visit_seq(SeqDeserializer::new(vec![
                Value::Float64(re),
                Value::Float64(im),
            ])),
            _ => Err(self.mismatch("array")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            Value::Complex(re, im) => visitor.visit_map(MapDeserializer::new(complex_map(re, im))),
            _ => Err(self.mismatch("object")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => self.deserialize_map(visitor),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            Value::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
                    }
                    None => Err(Error::type_mismatch("enum", "object")),
                }
            }
            _ => Err(self.mismatch("enum")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<Value>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Some(other) => Err(Error::type_mismatch("tuple variant", other.type_name())),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            Some(other) => Err(Error::type_mismatch("struct variant", other.type_name())),
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}

impl<'de> de::IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> Self::Deserializer {
        ValueDeserializer::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_value;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Reading {
        sensor: String,
        value: f64,
        count: u32,
        at: DateTime<Utc>,
        note: Option<String>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect { w: u8, h: u8 },
        Pair(i32, i32),
    }

    fn object(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn test_struct_with_datetime() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let value = object(vec![
            ("sensor", Value::from("t1")),
            ("value", Value::Float64(21.5)),
            ("count", Value::Float64(3.0)),
            ("at", Value::DateTime(at)),
            ("note", Value::Null),
        ]);
        let reading: Reading = from_value(value).unwrap();
        assert_eq!(
            reading,
            Reading {
                sensor: "t1".to_string(),
                value: 21.5,
                count: 3,
                at,
                note: None,
            }
        );
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(from_value::<u8>(Value::Float64(255.0)).unwrap(), 255);
        assert!(from_value::<u8>(Value::Float64(256.0)).is_err());
        assert!(from_value::<u32>(Value::Int64(-1)).is_err());
        assert!(from_value::<i32>(Value::Float64(1.5)).is_err());
        assert_eq!(from_value::<u64>(Value::Uint64(u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(from_value::<i64>(Value::from("-12")).unwrap(), -12);
        assert_eq!(from_value::<i64>(Value::from("1e3")).unwrap(), 1000);
    }

    #[test]
    fn test_numbers_to_strings() {
        assert_eq!(from_value::<String>(Value::Float64(3.5)).unwrap(), "3.5");
        assert_eq!(from_value::<String>(Value::Int64(-4)).unwrap(), "-4");
        assert!(from_value::<String>(Value::Null).is_err());
    }

    #[test]
    fn test_special_float_objects() {
        let nan = object(vec![("nan", Value::Bool(true))]);
        assert!(from_value::<f64>(nan).unwrap().is_nan());
        let neg = object(vec![("inf", Value::Float64(-1.0))]);
        assert_eq!(from_value::<f64>(neg).unwrap(), f64::NEG_INFINITY);
        let pos = object(vec![("inf", Value::Float64(1.0))]);
        assert_eq!(from_value::<f32>(pos).unwrap(), f32::INFINITY);
    }

    #[test]
    fn test_special_float_hook_only_for_floats() {
        let neg = object(vec![("inf", Value::Float64(-1.0))]);
        let map: HashMap<String, f64> = from_value(neg).unwrap();
        assert_eq!(map.get("inf"), Some(&-1.0));

        let two_keys = object(vec![("nan", Value::Bool(true)), ("x", Value::Null)]);
        assert!(from_value::<f64>(two_keys).is_err());
    }

    #[test]
    fn test_complex_targets() {
        assert_eq!(
            from_value::<(f64, f64)>(Value::Complex(1.0, -2.0)).unwrap(),
            (1.0, -2.0)
        );
        let map: HashMap<String, f64> = from_value(Value::Complex(0.5, 4.0)).unwrap();
        assert_eq!(map.get("re"), Some(&0.5));
        assert_eq!(map.get("im"), Some(&4.0));
    }

    #[test]
    fn test_enums() {
        assert_eq!(from_value::<Shape>(Value::from("Empty")).unwrap(), Shape::Empty);
        assert_eq!(
            from_value::<Shape>(object(vec![("Circle", Value::Float64(2.0))])).unwrap(),
            Shape::Circle(2.0)
        );
        let rect = object(vec![(
            "Rect",
            object(vec![("w", Value::Float64(3.0)), ("h", Value::Float64(4.0))]),
        )]);
        assert_eq!(from_value::<Shape>(rect).unwrap(), Shape::Rect { w: 3, h: 4 });
        let pair = object(vec![(
            "Pair",
            Value::Array(vec![Value::Int64(1), Value::Int64(-1)]),
        )]);
        assert_eq!(from_value::<Shape>(pair).unwrap(), Shape::Pair(1, -1));
        assert!(from_value::<Shape>(Value::Float64(1.0)).is_err());
    }

    #[test]
    fn test_numeric_map_keys() {
        let value = object(vec![("1", Value::from("a")), ("20", Value::from("b"))]);
        let map: HashMap<u32, String> = from_value(value).unwrap();
        assert_eq!(map.get(&20).map(String::as_str), Some("b"));
    }

    #[test]
    fn test_bytes_from_base64_string() {
        let bytes: serde_bytes_like::Bytes = from_value(Value::from("aGk=")).unwrap();
        assert_eq!(bytes.0, b"hi".to_vec());

        let err = from_value::<serde_bytes_like::Bytes>(Value::from("not base64!")).unwrap_err();
        assert!(err.to_string().contains("invalid base64"), "{}", err);
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = from_value::<bool>(Value::from("yes")).unwrap_err();
        assert_eq!(err, Error::type_mismatch("bool", "string"));
    }

    #[test]
    fn test_value_into_deserializer() {
        use serde::de::IntoDeserializer;

        let value = Value::Array(vec![Value::Float64(7.0)]);
        let v: Vec<i16> = Vec::deserialize(value.into_deserializer()).unwrap();
        assert_eq!(v, vec![7]);
    }

    mod serde_bytes_like {
        use serde::de::{Deserializer, Visitor};
        use std::fmt;

        #[derive(Debug)]
        pub struct Bytes(pub Vec<u8>);

        impl<'de> serde::Deserialize<'de> for Bytes {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct BytesVisitor;

                impl<'de> Visitor<'de> for BytesVisitor {
                    type Value = Bytes;

                    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                        f.write_str("bytes")
                    }

                    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Bytes, E> {
                        Ok(Bytes(v))
                    }
                }

                deserializer.deserialize_byte_buf(BytesVisitor)
            }
        }
    }
}
