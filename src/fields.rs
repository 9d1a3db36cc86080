//! Parsing of the hexadecimal code point fields shared by every UCD table.
//!
//! `line` arguments are 1-based line numbers, carried only for error
//! reporting.

use crate::constants::MAX_CODE_POINT;
use crate::error::{Error, Result};

/// Parse a single hexadecimal code point such as `00C0`.
pub fn parse_code_point(field: &str, line: usize) -> Result<u32> {
    let field = field.trim();
    match u32::from_str_radix(field, 16) {
        Ok(code) if !field.is_empty() && code <= MAX_CODE_POINT => Ok(code),
        _ => Err(Error::InvalidCodePoint {
            line,
            value: field.to_string(),
        }),
    }
}

/// Parse either a single code point or a `lo..hi` range into an inclusive
/// pair.
pub fn parse_code_point_range(field: &str, line: usize) -> Result<(u32, u32)> {
    let field = field.trim();
    let (lo, hi) = match field.find("..") {
        Some(at) => (
            parse_code_point(&field[..at], line)?,
            parse_code_point(&field[at + 2..], line)?,
        ),
        None => {
            let code = parse_code_point(field, line)?;
            (code, code)
        }
    };

    if lo > hi {
        return Err(Error::InvalidCodePoint {
            line,
            value: field.to_string(),
        });
    }
    Ok((lo, hi))
}

/// Parse a space-separated code point sequence such as `0041 0300`.  An empty
/// field is the empty sequence.
pub fn parse_code_points(field: &str, line: usize) -> Result<Vec<u32>> {
    field
        .split_whitespace()
        .map(|code| parse_code_point(code, line))
        .collect()
}

/// Strip a trailing `# comment` from a line of an auxiliary table.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(at) => &line[..at],
        None => line,
    }
}

#[test]
fn test_parse_code_point() {
    assert_eq!(parse_code_point("0041", 1).unwrap(), 0x41);
    assert_eq!(parse_code_point(" 1F600 ", 1).unwrap(), 0x1F600);
    assert_eq!(parse_code_point("10FFFF", 1).unwrap(), MAX_CODE_POINT);
    assert!(parse_code_point("110000", 1).is_err());
    assert!(parse_code_point("", 1).is_err());
    assert!(parse_code_point("ZZZZ", 7).is_err());
}

#[test]
fn test_parse_code_point_range() {
    assert_eq!(parse_code_point_range("0041..005A", 1).unwrap(), (0x41, 0x5A));
    assert_eq!(parse_code_point_range("00AD ", 1).unwrap(), (0xAD, 0xAD));
    assert!(parse_code_point_range("005A..0041", 1).is_err());
    assert!(parse_code_point_range("0041..", 1).is_err());
}

#[test]
fn test_parse_code_points() {
    assert_eq!(
        parse_code_points(" 0069 0307", 1).unwrap(),
        vec![0x69, 0x307]
    );
    assert!(parse_code_points("", 1).unwrap().is_empty());
    match parse_code_points("0041 XYZ", 3) {
        Err(Error::InvalidCodePoint { line: 3, value }) => assert_eq!(value, "XYZ"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_strip_comment() {
    assert_eq!(strip_comment("0020 ; White_Space # Zs SPACE"), "0020 ; White_Space ");
    assert_eq!(strip_comment("# only a comment"), "");
    assert_eq!(strip_comment("0041;A"), "0041;A");
}
