//! Runtime values
//!
//! Coercions follow the loose rules of a browser console: `+` concatenates
//! when either side is text, other arithmetic coerces to numbers, and bitwise
//! operators work on 32-bit integers.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Array(Vec<Value>),
}

impl Value {
    /// The empty string, which is also what an unset variable reads as
    #[must_use]
    pub const fn empty() -> Self {
        Self::Str(String::new())
    }

    /// Whether storing this value should remove the variable instead
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Str(text) if text.is_empty())
    }

    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Str(_) | Self::Array(_))
    }

    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(number) => *number,
            Self::Bool(flag) => f64::from(u8::from(*flag)),
            Self::Str(text) => parse_number(text),
            Self::Array(_) => parse_number(&self.to_string()),
        }
    }

    /// Number truncated and wrapped to a signed 32-bit integer
    #[must_use]
    pub fn to_int32(&self) -> i32 {
        to_int32(self.to_number())
    }

    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Str(text) => !text.is_empty(),
            Self::Bool(flag) => *flag,
            Self::Array(_) => true,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => f.write_str(&format_number(*number)),
            Self::Str(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Format a number the way a browser console does: shortest round-trip
/// digits, no trailing `.0`, and exponent form outside `[1e-6, 1e21)`
#[must_use]
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_string();
    }
    if number.is_infinite() {
        return if number > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if number == 0.0 {
        // also covers -0
        return "0".to_string();
    }
    let magnitude = number.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{number}");
    }
    let scientific = format!("{number:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => scientific,
    }
}

/// Parse text as a number; blank text is 0, anything unparsable is NaN
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            trimmed.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

#[must_use]
pub fn to_int32(number: f64) -> i32 {
    if !number.is_finite() {
        return 0;
    }
    let wrapped = number.trunc().rem_euclid(4_294_967_296.0);
    let bits = wrapped as u32;
    bits as i32
}
