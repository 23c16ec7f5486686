//! Escape Sequence Processing
//!
//! Recognized escapes: `\n`, `\t`, `\r`, `\0`, `\\`, `\'`, `\"`,
//! `\xHH` (exactly two hex digits), and `\u{H..}` (one to six hex digits
//! naming a Unicode scalar value).

#[inline]
fn resolve_simple(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        _ => None,
    }
}

/// Unescape a string literal body (quotes already stripped).
///
/// On failure returns the offending escape as written.
pub(crate) fn unescape(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let escape = &rest[idx..];
        let (ch, len) = decode_escape(escape).ok_or_else(|| invalid_text(escape))?;
        out.push(ch);
        rest = &escape[len..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Decode one escape at the start of `text` (which begins with `\`),
/// returning the character and the number of bytes consumed.
fn decode_escape(text: &str) -> Option<(char, usize)> {
    let mut chars = text.chars();
    chars.next()?;
    let marker = chars.next()?;
    if let Some(c) = resolve_simple(marker) {
        return Some((c, 1 + marker.len_utf8()));
    }
    match marker {
        'x' => {
            let digits = text.get(2..4)?;
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let code = u32::from_str_radix(digits, 16).ok()?;
            Some((char::from_u32(code)?, 4))
        }
        'u' => {
            let body = text.get(2..)?.strip_prefix('{')?;
            let close = body.find('}')?;
            let digits = &body[..close];
            if digits.is_empty()
                || digits.len() > 6
                || !digits.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return None;
            }
            let code = u32::from_str_radix(digits, 16).ok()?;
            // `\u{` + digits + `}`
            Some((char::from_u32(code)?, 3 + close + 1))
        }
        _ => None,
    }
}

/// The escape as written, for error messages: `\` plus the next char, or
/// the whole `\x../\u{..}` attempt.
fn invalid_text(escape: &str) -> String {
    let mut chars = escape.char_indices().skip(1);
    match chars.next() {
        Some((_, 'u')) => {
            let end = escape.find('}').map_or(escape.len(), |i| i + 1);
            escape[..end].to_string()
        }
        Some((_, 'x')) => escape.chars().take(4).collect(),
        Some((i, c)) => escape[..i + c.len_utf8()].to_string(),
        None => escape.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_escapes() {
        assert_eq!(
            unescape(r#"a\nb\tc\\d\"e\'f\0"#),
            Ok("a\nb\tc\\d\"e'f\0".to_string())
        );
    }

    #[test]
    fn test_hex_and_unicode() {
        assert_eq!(unescape(r"\x41\u{1F600}!"), Ok("A\u{1F600}!".to_string()));
        assert_eq!(unescape(r"\u{e9}"), Ok("é".to_string()));
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(unescape("héllo wörld"), Ok("héllo wörld".to_string()));
    }

    #[test]
    fn test_invalid_escapes() {
        assert_eq!(unescape(r"bad \q here"), Err(r"\q".to_string()));
        assert_eq!(unescape(r"\x4"), Err(r"\x4".to_string()));
        assert_eq!(unescape(r"\xZZ"), Err(r"\xZZ".to_string()));
        assert_eq!(unescape(r"\u{110000}"), Err(r"\u{110000}".to_string()));
        assert_eq!(unescape(r"\u{}"), Err(r"\u{}".to_string()));
        assert_eq!(unescape(r"\u41"), Err(r"\u41".to_string()));
    }
}
