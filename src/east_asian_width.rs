//! Parse `EastAsianWidth.txt` into `(range, width class, general category)`
//! triples.  The general category is read from the comment following each
//! data line, which the file lists once per line since every line covers
//! code points of a single category.

use crate::error::{Error, Result};
use crate::fields::parse_code_point_range;
use tracing::warn;

/// One data line of `EastAsianWidth.txt`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EastAsianWidthRange<'a> {
    pub lo: u32,
    pub hi: u32,
    /// `W`, `F`, `A`, `H`, `Na` or `N`.
    pub width: &'a str,
    /// The two-letter general category, or `L&` for mixed-case letters.
    pub category: &'a str,
}

fn parse_line(line: &str, number: usize) -> Result<EastAsianWidthRange<'_>> {
    let (data, comment) = match line.find('#') {
        Some(at) => (&line[..at], &line[at + 1..]),
        None => (line, ""),
    };

    let mut fields = data.split(';');
    let range = fields.next().unwrap_or("");
    let width = fields.next().map(str::trim).unwrap_or("");
    let category = comment.split_whitespace().next().unwrap_or("");
    if width.is_empty() || category.is_empty() {
        return Err(Error::FieldCount {
            line: number,
            expected: 3,
            found: [range, width, category]
                .iter()
                .filter(|field| !field.trim().is_empty())
                .count(),
        });
    }

    let (lo, hi) = parse_code_point_range(range, number)?;
    Ok(EastAsianWidthRange {
        lo,
        hi,
        width,
        category,
    })
}

/// Iterator over the data lines of `EastAsianWidth.txt`.  Comment lines are
/// dropped; malformed lines are logged and skipped.
pub struct EastAsianWidth<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> EastAsianWidth<'a> {
    pub fn parse(text: &'a str) -> EastAsianWidth<'a> {
        EastAsianWidth {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for EastAsianWidth<'a> {
    type Item = EastAsianWidthRange<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line) = self.lines.next()?;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match parse_line(line, index + 1) {
                Ok(range) => return Some(range),
                Err(error) => warn!(%error, "skipping malformed EastAsianWidth.txt line"),
            }
        }
    }
}

#[cfg(test)]
use crate::test_data::EAST_ASIAN_WIDTH_TXT;

#[test]
fn check_east_asian_width_lines() {
    let lines = EastAsianWidth::parse(EAST_ASIAN_WIDTH_TXT).collect::<Vec<_>>();
    assert_eq!(lines.len(), 17);
    assert_eq!(
        lines[0],
        EastAsianWidthRange {
            lo: 0x00,
            hi: 0x1F,
            width: "N",
            category: "Cc",
        }
    );
    let soft_hyphen = lines.iter().find(|line| line.lo == 0xAD).unwrap();
    assert_eq!((soft_hyphen.width, soft_hyphen.category), ("A", "Cf"));
}

#[test]
fn check_compact_format() {
    // Older releases wrote `lo..hi;W # Lo` without padding.
    let lines = EastAsianWidth::parse("3000;F # Zs IDEOGRAPHIC SPACE\n3001..3003;W # Po [3] IDEOGRAPHIC COMMA..DITTO MARK\n")
        .collect::<Vec<_>>();
    assert_eq!(lines[0].width, "F");
    assert_eq!((lines[1].lo, lines[1].hi, lines[1].category), (0x3001, 0x3003, "Po"));
}

#[test]
fn check_malformed_lines_skipped() {
    let lines = EastAsianWidth::parse(
        "00A1 ; A\n\
         00C6 ; A  # Lu         LATIN CAPITAL LETTER AE\n\
         00XX ; A  # Lu         BROKEN\n",
    )
    .collect::<Vec<_>>();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].lo, 0xC6);
}
