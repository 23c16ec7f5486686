//! Numeric literal validation.
//!
//! Accepted spellings:
//! - decimal integers `42`, `1_000`
//! - hexadecimal `0xFF` and binary `0b1010` (bit patterns, so
//!   `0xFFFF_FFFF_FFFF_FFFF` is `-1`)
//! - floats `1.`, `1.5`, `1e3`, `2.5e-3`, stored as `f32`

use std::borrow::Cow;

use crate::raw_token::RawError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f32),
}

pub(crate) fn scan_number(text: &str) -> Result<Number, RawError> {
    parse_number(text).ok_or(RawError::MalformedNumber)
}

fn parse_number(text: &str) -> Option<Number> {
    if let Some(digits) = strip_radix_prefix(text, 'x') {
        return parse_digits(digits, 16).map(bits_to_int);
    }
    if let Some(digits) = strip_radix_prefix(text, 'b') {
        return parse_digits(digits, 2).map(bits_to_int);
    }
    if text.contains(['.', 'e', 'E']) {
        let cleaned: Cow<'_, str> = if text.contains('_') {
            Cow::Owned(text.replace('_', ""))
        } else {
            Cow::Borrowed(text)
        };
        // `str::parse` also takes words like `inf`; only allow plain notation.
        if !cleaned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        {
            return None;
        }
        return cleaned.parse::<f32>().ok().map(Number::Float);
    }
    parse_digits(text, 10)
        .and_then(|n| i64::try_from(n).ok())
        .map(Number::Int)
}

fn strip_radix_prefix(text: &str, marker: char) -> Option<&str> {
    let rest = text.strip_prefix('0')?;
    rest.strip_prefix(marker)
        .or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

/// Digits with `_` separators; at least one digit required.
fn parse_digits(text: &str, radix: u32) -> Option<u64> {
    let mut value: u64 = 0;
    let mut seen_digit = false;
    for c in text.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix)?;
        value = value.checked_mul(u64::from(radix))?;
        value = value.checked_add(u64::from(digit))?;
        seen_digit = true;
    }
    seen_digit.then_some(value)
}

#[allow(clippy::cast_possible_wrap)]
fn bits_to_int(bits: u64) -> Number {
    Number::Int(bits as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(parse_number("0"), Some(Number::Int(0)));
        assert_eq!(parse_number("1_000"), Some(Number::Int(1000)));
        assert_eq!(parse_number("0x1F"), Some(Number::Int(31)));
        assert_eq!(parse_number("0B1010"), Some(Number::Int(10)));
        assert_eq!(
            parse_number("0xFFFF_FFFF_FFFF_FFFF"),
            Some(Number::Int(-1))
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(parse_number("1."), Some(Number::Float(1.0)));
        assert_eq!(parse_number("1.5"), Some(Number::Float(1.5)));
        assert_eq!(parse_number("1e3"), Some(Number::Float(1000.0)));
        assert_eq!(parse_number("2.5e-3"), Some(Number::Float(0.0025)));
    }

    #[test]
    fn test_malformed() {
        for text in ["0x", "0b", "0b102", "12ab", "1.2.3", "1e", "9223372036854775808"] {
            assert_eq!(parse_number(text), None, "{text} should be rejected");
        }
    }
}
