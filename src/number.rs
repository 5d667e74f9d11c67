use serde::{Serialize, Serializer};
use std::fmt;

/// A JSON number that remembers whether its literal was integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// No fraction, no exponent, and within `i64` range. `-0` lands here as
    /// plain `0`, so its sign does not survive re-serialization.
    Integer(i64),
    /// Everything else.
    Float(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{x:.1}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(i) => serializer.serialize_i64(*i),
            Number::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

/// Why a number literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberIssue {
    LeadingZero,
    Invalid,
    OutOfRange,
}

/// Validates `literal` against the JSON number grammar and converts it.
///
/// ```text
/// number   = [ "-" ] int [ frac ] [ exp ]
/// int      = "0" | digit1-9 *digit
/// frac     = "." 1*digit
/// exp      = ( "e" | "E" ) [ "+" | "-" ] 1*digit
/// ```
///
/// Leading zeros are reported before any other shape problem, so `01.x`
/// is a leading-zero error rather than an invalid literal.
pub fn parse_number_literal(literal: &str) -> Result<Number, NumberIssue> {
    let bytes = literal.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;
    if int_digits > 1 && bytes[int_start] == b'0' {
        return Err(NumberIssue::LeadingZero);
    }
    if int_digits == 0 {
        return Err(NumberIssue::Invalid);
    }

    let mut integral = true;

    if i < bytes.len() && bytes[i] == b'.' {
        integral = false;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return Err(NumberIssue::Invalid);
        }
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        integral = false;
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return Err(NumberIssue::Invalid);
        }
    }

    if i != bytes.len() {
        return Err(NumberIssue::Invalid);
    }

    if integral {
        if let Ok(int) = literal.parse::<i64>() {
            return Ok(Number::Integer(int));
        }
    }

    // The literal is grammatical here, so only range can fail.
    match literal.parse::<f64>() {
        Ok(float) if float.is_finite() => Ok(Number::Float(float)),
        _ => Err(NumberIssue::OutOfRange),
    }
}
