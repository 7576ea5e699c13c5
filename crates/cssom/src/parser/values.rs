//! Lexical helpers shared by the style sheet and selector grammars.
//!
//! - Identifiers: letters, digits, `-`, `_`, non-ASCII, and `\` escapes
//! - Balanced scanning: find a delimiter while skipping quoted strings,
//!   comments and nested `()` / `[]` groups

use nom::{
    IResult,
    error::{Error, ErrorKind},
};

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Parses a CSS identifier.
///
/// Identifiers are used for property names, type selectors, class names, etc.
/// A backslash escapes the following character, so `sm\:flex` is one
/// identifier. A hex escape takes up to six hex digits and one whitespace
/// terminator, so `\31 0` is one identifier too.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    let mut end = 0;
    while let Some(c) = input[end..].chars().next() {
        if c == '\\' {
            match escape_len(&input[end + 1..]) {
                Some(len) => end += 1 + len,
                None => break,
            }
        } else if is_ident_char(c) {
            end += c.len_utf8();
        } else {
            break;
        }
    }

    if end == 0 {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::AlphaNumeric)));
    }
    Ok((&input[end..], &input[..end]))
}

/// Length of an escape body following `\`, or `None` at end of input.
fn escape_len(input: &str) -> Option<usize> {
    let hex = input.bytes().take(6).take_while(u8::is_ascii_hexdigit).count();
    if hex == 0 {
        return input.chars().next().map(char::len_utf8);
    }

    let after = &input[hex..];
    let terminator = if after.starts_with("\r\n") {
        2
    } else {
        match after.chars().next() {
            Some(' ' | '\t' | '\n' | '\r' | '\x0c') => 1,
            _ => 0,
        }
    };
    Some(hex + terminator)
}

/// Returns the byte index of the first character in `stops` that is not
/// inside a string, a comment, or a nested `()`/`[]` group.
///
/// Returns `Err(index)` with the offending position when a string, comment
/// or group is left open, and `Ok(None)` when no stop character is found.
pub fn find_unnested(input: &str, stops: &[char]) -> Result<Option<usize>, usize> {
    let bytes = input.as_bytes();
    let mut groups: Vec<(char, usize)> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = input[i..].chars().next().unwrap_or_default();
        match c {
            '\\' => {
                i += 1;
                if let Some(next) = input[i..].chars().next() {
                    i += next.len_utf8();
                }
                continue;
            }
            '"' | '\'' => {
                i = skip_string(input, i).ok_or(i)?;
                continue;
            }
            '/' if bytes.get(i + 1) == Some(&b'*') => {
                let close = input[i + 2..].find("*/").ok_or(i)?;
                i += 2 + close + 2;
                continue;
            }
            _ => {}
        }

        if groups.is_empty() && stops.contains(&c) {
            return Ok(Some(i));
        }

        match c {
            '(' => groups.push((')', i)),
            '[' => groups.push((']', i)),
            ')' | ']' => match groups.last() {
                Some((expected, _)) if *expected == c => {
                    groups.pop();
                }
                _ => return Err(i),
            },
            _ => {}
        }
        i += c.len_utf8();
    }

    match groups.last() {
        Some((_, open)) => Err(*open),
        None => Ok(None),
    }
}

/// Given `input[start]` is a quote, returns the index just past the closing
/// quote, or `None` if the string is unterminated.
fn skip_string(input: &str, start: usize) -> Option<usize> {
    let quote = input[start..].chars().next()?;
    let mut chars = input[start + 1..].char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return Some(start + 1 + i + 1);
        } else if c == '\n' {
            return None;
        }
    }
    None
}

/// Parses the content of a parenthesized group whose `(` was already
/// consumed, leaving the input after the matching `)`.
pub fn parse_parenthesized(input: &str) -> IResult<&str, &str> {
    match find_unnested(input, &[')']) {
        Ok(Some(close)) => Ok((&input[close + 1..], &input[..close])),
        _ => Err(nom::Err::Failure(Error::new(input, ErrorKind::Char))),
    }
}
