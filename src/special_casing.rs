//! Processes `SpecialCasing.txt`, overlaying its unconditional multi-code
//! point mappings on the simple case mappings.

use crate::case_mapping::CaseMappings;
use crate::constants::NULL_PADDING;
use crate::error::{Error, Result};
use crate::fields::{parse_code_point, parse_code_points, strip_comment};
use crate::types::CaseTarget;
use tracing::warn;

/// One row of `SpecialCasing.txt`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecialCase<'a> {
    /// 1-based line number in the source table.
    pub line: usize,
    pub code: u32,
    pub lower: Vec<u32>,
    pub title: Vec<u32>,
    pub upper: Vec<u32>,
    /// Language and context conditions, empty for an unconditional mapping.
    pub conditions: Vec<&'a str>,
}

impl<'a> SpecialCase<'a> {
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }
}

fn parse_line(line: &str, number: usize) -> Result<SpecialCase<'_>> {
    // Format:
    // <code>; <lower>; <title>; <upper>; (<condition_list>;)? # <comment>
    let fields = line.split(';').collect::<Vec<&str>>();
    let conditions = match fields.len() {
        5 => vec![],
        6 => fields[4].split_whitespace().collect(),
        found => {
            return Err(Error::FieldCount {
                line: number,
                expected: 5,
                found,
            })
        }
    };

    Ok(SpecialCase {
        line: number,
        code: parse_code_point(fields[0], number)?,
        lower: parse_code_points(fields[1], number)?,
        title: parse_code_points(fields[2], number)?,
        upper: parse_code_points(fields[3], number)?,
        conditions,
    })
}

/// Iterator over the rows of `SpecialCasing.txt`, conditional rows included.
/// Malformed rows are logged and skipped.
pub struct SpecialCasing<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> SpecialCasing<'a> {
    pub fn parse(text: &'a str) -> SpecialCasing<'a> {
        SpecialCasing {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for SpecialCasing<'a> {
    type Item = SpecialCase<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line_with_comment) = self.lines.next()?;
            let line = strip_comment(line_with_comment);
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line, index + 1) {
                Ok(special_case) => return Some(special_case),
                Err(error) => warn!(%error, "skipping malformed SpecialCasing.txt row"),
            }
        }
    }
}

fn to_target(codes: &[u32], line: usize) -> Result<CaseTarget> {
    if codes.len() > 3 {
        return Err(Error::MappingTooLong {
            line,
            len: codes.len(),
        });
    }
    let mut target = [NULL_PADDING; 3];
    target[..codes.len()].copy_from_slice(codes);
    Ok(target)
}

/// Overwrite `mappings` with every unconditional special casing in `text`.
///
/// Conditional rows (language- or context-dependent) are dropped entirely.
/// For the rest, each direction whose target is anything other than the
/// source code point itself replaces that direction's simple mapping with the
/// full sequence, null-padded to three code points.
pub fn apply_special_casing(text: &str, mappings: &mut CaseMappings) {
    for special_case in SpecialCasing::parse(text).filter(SpecialCase::is_unconditional) {
        let SpecialCase {
            line,
            code,
            lower,
            title,
            upper,
            ..
        } = special_case;

        for (map, values) in [
            (&mut mappings.to_lower, lower),
            (&mut mappings.to_title, title),
            (&mut mappings.to_upper, upper),
        ]
        .iter_mut()
        {
            if values[..] == [code] {
                continue;
            }
            match to_target(values, line) {
                Ok(target) => {
                    map.insert(code, target);
                }
                Err(error) => warn!(%error, code, "skipping special casing"),
            }
        }
    }
}

#[cfg(test)]
use crate::case_mapping::simple_case_mappings;
#[cfg(test)]
use crate::code_point_table::CodePointTable;
#[cfg(test)]
use crate::constants::{
    COMBINING_DOT_ABOVE, LATIN_CAPITAL_LETTER_I_WITH_DOT_ABOVE, LATIN_CAPITAL_LETTER_S,
    LATIN_SMALL_LETTER_I, LATIN_SMALL_LETTER_SHARP_S,
};
#[cfg(test)]
use crate::test_data::{SPECIAL_CASING_TXT, UNICODE_DATA_TXT};

#[test]
fn check_special_casing_rows() {
    let rows = SpecialCasing::parse(SPECIAL_CASING_TXT).collect::<Vec<_>>();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows.iter().filter(|row| row.is_unconditional()).count(), 3);

    let sigma = rows.iter().find(|row| row.code == 0x3A3).unwrap();
    assert_eq!(sigma.conditions, ["Final_Sigma"]);
    assert_eq!(sigma.lower, [0x3C2]);

    let dotless = rows.iter().find(|row| row.code == 0x49).unwrap();
    assert_eq!(dotless.conditions, ["tr", "Not_Before_Dot"]);
}

#[test]
fn check_special_casing_overlay() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let mut mappings = simple_case_mappings(&table);
    apply_special_casing(SPECIAL_CASING_TXT, &mut mappings);

    // Special casing for U+00DF LATIN SMALL LETTER SHARP S.
    assert_eq!(
        mappings.to_upper[&LATIN_SMALL_LETTER_SHARP_S],
        [LATIN_CAPITAL_LETTER_S, LATIN_CAPITAL_LETTER_S, 0]
    );
    assert_eq!(mappings.to_title[&LATIN_SMALL_LETTER_SHARP_S], [0x53, 0x73, 0]);
    assert!(!mappings.to_lower.contains_key(&LATIN_SMALL_LETTER_SHARP_S));

    // Special casing for U+0130 LATIN CAPITAL LETTER I WITH DOT ABOVE
    // overrides its simple lowercase mapping; the Turkish row is dropped.
    assert_eq!(
        mappings.to_lower[&LATIN_CAPITAL_LETTER_I_WITH_DOT_ABOVE],
        [LATIN_SMALL_LETTER_I, COMBINING_DOT_ABOVE, 0]
    );
    assert!(!mappings.to_upper.contains_key(&LATIN_CAPITAL_LETTER_I_WITH_DOT_ABOVE));
    assert!(!mappings.to_title.contains_key(&LATIN_CAPITAL_LETTER_I_WITH_DOT_ABOVE));

    assert_eq!(mappings.to_upper[&0xFB00], [0x46, 0x46, 0]);

    // Conditional mappings never appear.
    assert!(!mappings.to_lower.contains_key(&0x3A3));
    assert!(!mappings.to_lower.contains_key(&0x49));
    assert!(!mappings.to_upper.contains_key(&0x69));

    // Simple mappings untouched by special casing survive.
    assert_eq!(mappings.to_lower[&0x41], [0x61, 0, 0]);
}

#[test]
fn check_overlong_mapping_skipped() {
    let mut mappings = CaseMappings::default();
    apply_special_casing(
        "1F80; 1F80; 1F88; 1F08 0399 0399 0399; # too long\n\
         1E96; 1E96; 0048 0331; 0048 0331; # LATIN SMALL LETTER H WITH LINE BELOW\n",
        &mut mappings,
    );
    assert!(!mappings.to_upper.contains_key(&0x1F80));
    assert_eq!(mappings.to_title[&0x1F80], [0x1F88, 0, 0]);
    assert_eq!(mappings.to_upper[&0x1E96], [0x48, 0x331, 0]);
}
