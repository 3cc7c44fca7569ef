//! Numeric literals: radix integers, hex floats, decimals, `inf`/`nan` and
//! complex numbers.
//!
//! | literal                 | result                         |
//! |-------------------------|--------------------------------|
//! | `42`, `-1_000`          | `Float64`                      |
//! | `42s64`, `-42S64`       | `Int64`                        |
//! | `42u64`                 | `Uint64`                       |
//! | `0x1F`, `0o17`, `0b101` | `Float64` (signed 64-bit parse)|
//! | `0xffffffffffffffffs64` | `Int64(-1)` (bit reinterpret)  |
//! | `-0x1.8p3`              | `Float64(-12.0)`               |
//! | `1.5-2i`                | complex, shaped by the interop mode |

use super::scanner::Parsed;
use super::Parser;
use crate::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Suffix {
    S64,
    U64,
}

/// Hex-float exponents are clamped to this magnitude; anything beyond already
/// overflows to infinity or underflows to zero.
const MAX_BINARY_EXPONENT: i64 = 100_000;

type Production<'a> = fn(&mut Parser<'a>) -> Parsed<Value>;

impl<'a> Parser<'a> {
    /// A number, optionally followed by `±imaginary i`.
    pub(crate) fn number_value(&mut self) -> Parsed<Value> {
        let real = self.number_literal(true)?;
        match self.opt(Self::imaginary_tail)? {
            Some((negative, imaginary)) => Ok(self.compose_complex(real, imaginary, negative)),
            None => Ok(real),
        }
    }

    fn imaginary_tail(&mut self) -> Parsed<(bool, Value)> {
        self.sp0_no_lb()?;
        let negative = match self.scan.peek() {
            Some('+') => false,
            Some('-') => true,
            _ => return self.scan.backtrack(),
        };
        self.scan.bump();
        self.sp0_no_lb()?;
        let imaginary = self.number_literal(false)?;
        self.scan.eat_while(|c| c == '_');
        if !self.scan.eat_char('i') {
            return self.scan.backtrack();
        }
        self.word_boundary()?;
        Ok((negative, imaginary))
    }

    /// One literal, trying radix, decimal float, decimal integer and then the
    /// special values.
    fn number_literal(&mut self, boundary: bool) -> Parsed<Value> {
        let alternatives: [Production<'a>; 4] = [
            Self::radix_number,
            Self::decimal_float,
            Self::decimal_integer,
            Self::special_float,
        ];
        for production in alternatives {
            let matched = self.opt(|p| {
                let value = production(p)?;
                if boundary {
                    p.word_boundary()?;
                }
                Ok(value)
            })?;
            if let Some(value) = matched {
                return Ok(value);
            }
        }
        self.scan.backtrack()
    }

    fn sign(&mut self) -> Option<bool> {
        if self.scan.eat_char('+') {
            Some(false)
        } else if self.scan.eat_char('-') {
            Some(true)
        } else {
            None
        }
    }

    fn suffix(&mut self) -> Option<Suffix> {
        if self.scan.eat_caseless("s64") {
            Some(Suffix::S64)
        } else if self.scan.eat_caseless("u64") {
            Some(Suffix::U64)
        } else {
            None
        }
    }

    /// A digit of `radix` followed by digits and `_`.
    fn digits(&mut self, radix: u32) -> Parsed<&'a str> {
        match self.scan.peek() {
            Some(c) if c.is_digit(radix) => {
                Ok(self.scan.eat_while(|c| c == '_' || c.is_digit(radix)))
            }
            _ => self.scan.backtrack(),
        }
    }

    fn radix_number(&mut self) -> Parsed<Value> {
        let start = self.scan.pos();
        let sign = self.sign();
        let radix = if self.scan.eat_caseless("0x") {
            16
        } else if self.scan.eat_caseless("0o") {
            8
        } else if self.scan.eat_caseless("0b") {
            2
        } else {
            return self.scan.backtrack();
        };
        self.scan.eat_while(|c| c == '_');

        if radix == 16 {
            if let Some(magnitude) = self.opt(Self::hex_float_body)? {
                let value = if sign == Some(true) {
                    -magnitude
                } else {
                    magnitude
                };
                return Ok(Value::Float64(value));
            }
        }

        let digits = strip_underscores(self.digits(radix)?);
        let suffix = self.suffix();
        let text = self.scan.slice(start);
        if sign.is_some() {
            return self
                .scan
                .fatal_at(start, format!("Invalid number format: {}", text));
        }

        let converted = match suffix {
            Some(Suffix::S64) => u64::from_str_radix(&digits, radix).map(|u| Value::Int64(u as i64)),
            Some(Suffix::U64) => u64::from_str_radix(&digits, radix).map(Value::Uint64),
            None => i64::from_str_radix(&digits, radix).map(|i| Value::Float64(i as f64)),
        };
        converted.or_else(|err| {
            self.scan
                .fatal_at(start, format!("Invalid number {}: {}", text, err))
        })
    }

    /// `digits.digits`, `.digits` or `digits`, then `p` and a decimal exponent.
    fn hex_float_body(&mut self) -> Parsed<f64> {
        let whole = self.opt(|p| p.digits(16))?;
        let mut fraction = None;
        if self.scan.eat_char('.') {
            self.scan.eat_while(|c| c == '_');
            fraction = self.opt(|p| p.digits(16))?;
            if whole.is_none() && fraction.is_none() {
                return self.scan.backtrack();
            }
        } else if whole.is_none() {
            return self.scan.backtrack();
        }

        if !(self.scan.eat_char('p') || self.scan.eat_char('P')) {
            return self.scan.backtrack();
        }
        let negative = self.sign() == Some(true);
        let exponent = strip_underscores(self.digits(10)?);
        let exponent = exponent
            .parse::<i64>()
            .unwrap_or(MAX_BINARY_EXPONENT)
            .min(MAX_BINARY_EXPONENT);
        let exponent = if negative { -exponent } else { exponent };

        Ok(hex_float(whole.unwrap_or(""), fraction.unwrap_or(""), exponent))
    }

    /// `1.5`, `.5`, `1.`, `1e5`, with optional sign and `_` in digit runs.
    fn decimal_float(&mut self) -> Parsed<Value> {
        let start = self.scan.pos();
        self.sign();
        let whole = self.opt(|p| p.digits(10))?;
        let fractional = if self.scan.eat_char('.') {
            let fraction = self.opt(|p| p.digits(10))?;
            if whole.is_none() && fraction.is_none() {
                return self.scan.backtrack();
            }
            true
        } else if whole.is_none() {
            return self.scan.backtrack();
        } else {
            false
        };
        let exponent = self.opt(Self::decimal_exponent)?.is_some();
        if !fractional && !exponent {
            return self.scan.backtrack();
        }

        let text = strip_underscores(self.scan.slice(start));
        match text.parse::<f64>() {
            Ok(value) => Ok(Value::Float64(value)),
            Err(err) => self
                .scan
                .fatal_at(start, format!("Invalid number {}: {}", text, err)),
        }
    }

    fn decimal_exponent(&mut self) -> Parsed<()> {
        if !(self.scan.eat_char('e') || self.scan.eat_char('E')) {
            return self.scan.backtrack();
        }
        self.sign();
        self.digits(10).map(|_| ())
    }

    fn decimal_integer(&mut self) -> Parsed<Value> {
        let start = self.scan.pos();
        let negative = self.sign() == Some(true);
        let digits = strip_underscores(self.digits(10)?);
        let suffix = self.suffix();
        let text = if negative {
            format!("-{}", digits)
        } else {
            digits
        };

        let converted = match suffix {
            Some(Suffix::S64) => text.parse::<i64>().map(Value::Int64).map_err(|e| e.to_string()),
            Some(Suffix::U64) => text.parse::<u64>().map(Value::Uint64).map_err(|e| e.to_string()),
            None => text.parse::<f64>().map(Value::Float64).map_err(|e| e.to_string()),
        };
        converted.or_else(|err| {
            let literal = self.scan.slice(start);
            self.scan
                .fatal_at(start, format!("Invalid number {}: {}", literal, err))
        })
    }

    /// `Infinity`, `inf` and `nan` in any case, with an optional sign.
    fn special_float(&mut self) -> Parsed<Value> {
        let negative = self.sign() == Some(true);
        let value = if self.scan.eat_caseless("infinity") || self.scan.eat_caseless("inf") {
            if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        } else if self.scan.eat_caseless("nan") {
            f64::NAN
        } else {
            return self.scan.backtrack();
        };
        Ok(self.irregular_float(value))
    }

    /// Materializes NaN or an infinity according to the interop mode.
    fn irregular_float(&self, value: f64) -> Value {
        let interop = self.options.interop;
        if interop.tags_special_floats() {
            let mut tag = Map::new();
            if value.is_nan() {
                tag.insert("nan".to_string(), Value::Bool(true));
            } else {
                tag.insert("inf".to_string(), Value::Float64(value.signum()));
            }
            Value::Object(tag)
        } else if interop.nulls_special_floats() {
            Value::Null
        } else {
            Value::Float64(value)
        }
    }

    fn compose_complex(&self, real: Value, imaginary: Value, negative: bool) -> Value {
        let interop = self.options.interop;
        if interop.nulls_complex() {
            return Value::Null;
        }

        let real = complex_part(real, 1.0);
        let imaginary = complex_part(imaginary, if negative { -1.0 } else { 1.0 });
        if interop.tags_complex() {
            let mut parts = Map::with_capacity(2);
            parts.insert("re".to_string(), real);
            parts.insert("im".to_string(), imaginary);
            Value::Object(parts)
        } else {
            Value::Complex(
                real.as_f64().unwrap_or(f64::NAN),
                imaginary.as_f64().unwrap_or(f64::NAN),
            )
        }
    }
}

/// Coerces one part of a complex literal to `Float64`, scaled by `sign`.
///
/// A tagged `{"inf": ±1}` keeps its shape with the sign folded in; `{"nan": true}`
/// passes through.
fn complex_part(value: Value, sign: f64) -> Value {
    match value {
        Value::Int64(i) => Value::Float64(sign * i as f64),
        Value::Uint64(u) => Value::Float64(sign * u as f64),
        Value::Float64(x) => Value::Float64(sign * x),
        Value::Object(mut tag) => {
            if let Some(Value::Float64(direction)) = tag.get_mut("inf") {
                *direction *= sign;
            }
            Value::Object(tag)
        }
        other => other,
    }
}

fn strip_underscores(digits: &str) -> String {
    digits.chars().filter(|&c| c != '_').collect()
}

/// Converts hexadecimal mantissa digits and a binary exponent to the nearest
/// `f64`, ties to even, subnormals included.
pub(crate) fn hex_float(whole: &str, fraction: &str, exponent: i64) -> f64 {
    let mut mantissa: u64 = 0;
    let mut exponent = exponent;
    let mut sticky = false;

    let digits = whole
        .chars()
        .map(|c| (c, false))
        .chain(fraction.chars().map(|c| (c, true)));
    for (c, is_fraction) in digits {
        let Some(digit) = c.to_digit(16) else {
            continue;
        };
        if mantissa >> 60 == 0 {
            mantissa = (mantissa << 4) | u64::from(digit);
            if is_fraction {
                exponent -= 4;
            }
        } else {
            sticky |= digit != 0;
            if !is_fraction {
                exponent += 4;
            }
        }
    }

    if mantissa == 0 {
        return 0.0;
    }
    if sticky {
        // at least 61 significant bits here, so bit 0 sits well below the rounding point
        mantissa |= 1;
    }

    let bits = i64::from(64 - mantissa.leading_zeros());
    let top = exponent + bits - 1;
    let precision = if top >= -1022 { 53 } else { top + 1075 };
    if precision < 0 {
        return 0.0;
    }
    if bits > precision {
        let drop = (bits - precision) as u32;
        let (mut kept, rest, half) = if drop >= 64 {
            (0, mantissa, 1u64 << 63)
        } else {
            (mantissa >> drop, mantissa & ((1u64 << drop) - 1), 1u64 << (drop - 1))
        };
        if rest > half || (rest == half && kept & 1 == 1) {
            kept += 1;
        }
        mantissa = kept;
        exponent += i64::from(drop);
    }

    ldexp(mantissa as f64, exponent)
}

/// `x * 2^exp` in exact power-of-two steps.
fn ldexp(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP && x.is_finite() {
        x *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP && x != 0.0 {
        x *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    x * 2f64.powi(exp as i32)
}
