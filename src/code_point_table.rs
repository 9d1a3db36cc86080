//! Parse the contents of `UnicodeData.txt`, the central code point registry
//! file, into one [`CodePointRecord`] per assigned, non-surrogate code
//! point.

use crate::constants::is_surrogate;
use crate::error::{Error, Result};
use crate::fields::{parse_code_point, parse_code_points};
use std::collections::BTreeMap;
use tracing::warn;

/// 1 hexadecimal code field, 14 fields listed in
/// <http://www.unicode.org/reports/tr44/#UnicodeData.txt>.
const FIELD_COUNT: usize = 15;

/// The decomposition field of a record: `<tag> code code...` for a
/// compatibility decomposition, or untagged for a canonical one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition<'a> {
    /// The formatting tag without its angle brackets (`compat`, `wide`, ...),
    /// or `None` for a canonical decomposition.
    pub tag: Option<&'a str>,
    pub codes: Vec<u32>,
}

/// One row of `UnicodeData.txt`, or one code point of an expanded
/// `First`/`Last` range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodePointRecord<'a> {
    pub code: u32,
    pub name: &'a str,
    /// The Unicode 1.0 name, if any.
    pub alias: &'a str,
    pub category: &'a str,
    pub combining_class: u8,
    pub decomposition: Option<Decomposition<'a>>,
    pub uppercase: Option<u32>,
    pub lowercase: Option<u32>,
    pub titlecase: Option<u32>,
}

fn to_case(field: &str, line: usize) -> Result<Option<u32>> {
    let field = field.trim();
    if field.is_empty() {
        Ok(None)
    } else {
        parse_code_point(field, line).map(Some)
    }
}

fn to_decomposition(field: &str, line: usize) -> Result<Option<Decomposition<'_>>> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(None);
    }

    let (tag, codes) = match field.strip_prefix('<') {
        Some(rest) => match rest.find('>') {
            Some(end) => (Some(&rest[..end]), &rest[end + 1..]),
            None => {
                return Err(Error::InvalidCodePoint {
                    line,
                    value: field.to_string(),
                })
            }
        },
        None => (None, field),
    };

    Ok(Some(Decomposition {
        tag,
        codes: parse_code_points(codes, line)?,
    }))
}

fn parse_record<'a>(fields: &[&'a str], line: usize) -> Result<CodePointRecord<'a>> {
    if fields.len() != FIELD_COUNT {
        return Err(Error::FieldCount {
            line,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let combining_class = fields[3].trim();
    let combining_class = combining_class
        .parse::<u8>()
        .map_err(|_| Error::InvalidNumber {
            line,
            value: combining_class.to_string(),
        })?;

    Ok(CodePointRecord {
        code: parse_code_point(fields[0], line)?,
        name: fields[1],
        alias: fields[10],
        category: fields[2].trim(),
        combining_class,
        decomposition: to_decomposition(fields[5], line)?,
        uppercase: to_case(fields[12], line)?,
        lowercase: to_case(fields[13], line)?,
        titlecase: to_case(fields[14], line)?,
    })
}

fn range_name<'a>(name: &'a str, marker: &str) -> Option<&'a str> {
    name.strip_prefix('<')?.strip_suffix(marker)
}

struct CodePointRange<'a> {
    range: std::ops::RangeInclusive<u32>,
    details: CodePointRecord<'a>,
}

/// Iterator over the records of `UnicodeData.txt`, in file order.
///
/// Rows with the wrong field count or unparseable fields are logged and
/// skipped.  A `<..., First>` row is buffered until its `<..., Last>` row
/// arrives, then one record per code point of the range is produced, all
/// sharing the `First` row's fields.  Surrogates are never produced.
pub struct UnicodeData<'a> {
    within_range: Option<CodePointRange<'a>>,
    range_start: Option<CodePointRecord<'a>>,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> UnicodeData<'a> {
    pub fn parse(text: &'a str) -> UnicodeData<'a> {
        UnicodeData {
            within_range: None,
            range_start: None,
            lines: text.lines().enumerate(),
        }
    }

    fn next_record(&mut self) -> Option<CodePointRecord<'a>> {
        loop {
            let (index, line) = self.lines.next()?;
            if line.trim().is_empty() {
                continue;
            }

            let fields = line.split(';').collect::<Vec<&'a str>>();
            match parse_record(&fields, index + 1) {
                Ok(record) => return Some(record),
                Err(error) => warn!(%error, "skipping malformed UnicodeData.txt row"),
            }
        }
    }
}

impl<'a> Iterator for UnicodeData<'a> {
    type Item = CodePointRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(ref mut within_range) = self.within_range {
                if let Some(code) = within_range.range.find(|code| !is_surrogate(*code)) {
                    let mut record = within_range.details.clone();
                    record.code = code;
                    return Some(record);
                }

                self.within_range = None;
            }

            let record = self.next_record()?;

            if let Some(mut start) = self.range_start.take() {
                if range_name(record.name, ", Last>").is_some() && record.code >= start.code {
                    if let Some(name) = range_name(start.name, ", First>") {
                        start.name = name;
                    }
                    self.within_range = Some(CodePointRange {
                        range: start.code..=record.code,
                        details: start,
                    });
                    continue;
                }

                warn!(
                    first = start.code,
                    next = record.code,
                    "range start not followed by its last code point"
                );
            }

            if range_name(record.name, ", First>").is_some() {
                self.range_start = Some(record);
                continue;
            }

            if is_surrogate(record.code) {
                continue;
            }

            return Some(record);
        }
    }
}

/// All records of `UnicodeData.txt`, keyed and iterated by code point.
pub struct CodePointTable<'a> {
    map: BTreeMap<u32, CodePointRecord<'a>>,
}

impl<'a> CodePointTable<'a> {
    pub fn parse(text: &'a str) -> CodePointTable<'a> {
        let map = UnicodeData::parse(text)
            .map(|record| (record.code, record))
            .collect();
        CodePointTable { map }
    }

    pub fn get(&self, code: u32) -> Option<&CodePointRecord<'a>> {
        self.map.get(&code)
    }

    /// Records in ascending code point order.
    pub fn iter(&self) -> impl Iterator<Item = &CodePointRecord<'a>> + '_ {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The name of `code`, followed by its Unicode 1.0 name in parentheses
    /// when it has one.
    pub fn name(&self, code: u32) -> Option<String> {
        let CodePointRecord { name, alias, .. } = self.map.get(&code)?;
        Some(if alias.is_empty() {
            name.to_string()
        } else {
            format!("{name} ({alias})", name = name, alias = alias)
        })
    }

    pub fn full_name(&self, code: u32) -> Option<String> {
        self.name(code)
            .map(|name| format!("U+{code:04X} {name}", code = code, name = name))
    }
}

#[cfg(test)]
use crate::test_data::UNICODE_DATA_TXT;

#[test]
fn check_unicode_data() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    assert_eq!(
        table.name('A' as u32).unwrap(),
        "LATIN CAPITAL LETTER A",
        "sanity check on ASCII capital A"
    );
    assert_eq!(
        table.full_name(0x0000).unwrap(),
        "U+0000 <control> (NULL)"
    );

    let a = table.get(0x61).unwrap();
    assert_eq!(a.category, "Ll");
    assert_eq!(a.uppercase, Some(0x41));
    assert_eq!(a.lowercase, None);
    assert_eq!(a.titlecase, Some(0x41));

    let grave = table.get(0x300).unwrap();
    assert_eq!(grave.combining_class, 230);
}

#[test]
fn check_decompositions_parsed() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    assert_eq!(
        table.get(0xC0).unwrap().decomposition,
        Some(Decomposition {
            tag: None,
            codes: vec![0x41, 0x300],
        })
    );
    assert_eq!(
        table.get(0x3000).unwrap().decomposition,
        Some(Decomposition {
            tag: Some("wide"),
            codes: vec![0x20],
        })
    );
    assert_eq!(table.get(0x41).unwrap().decomposition, None);
}

#[test]
fn check_ranges_expanded() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    for code in [0x3400, 0x3401, 0x4000, 0x4DBF].iter() {
        let record = table.get(*code).expect("code point in CJK range");
        assert_eq!(record.name, "CJK Ideograph Extension A");
        assert_eq!(record.category, "Lo");
        assert_eq!(record.code, *code);
    }
    assert!(table.get(0x4DC0).is_none());
    assert!(table.get(0xF8FF).is_some());
}

#[test]
fn check_surrogates_skipped() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    assert!(table.iter().all(|record| !is_surrogate(record.code)));
    assert!(table.get(0xD800).is_none());
    assert!(table.get(0xDB7F).is_none());
}

#[test]
fn check_records_ascending() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let codes = table.iter().map(|record| record.code).collect::<Vec<u32>>();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);
}

#[test]
fn check_malformed_rows_skipped() {
    let text = "0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;\n\
                0042;LATIN CAPITAL LETTER B;Lu\n\
                \n\
                XYZ;BROKEN;Lu;0;L;;;;;N;;;;;\n\
                0043;LATIN CAPITAL LETTER C;Lu;zero;L;;;;;N;;;;0063;\n\
                0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041\n";
    let codes = UnicodeData::parse(text)
        .map(|record| record.code)
        .collect::<Vec<u32>>();
    assert_eq!(codes, vec![0x41, 0x61]);
}

#[test]
fn check_unterminated_range() {
    let text = "3400;<CJK Ideograph Extension A, First>;Lo;0;L;;;;;N;;;;;\n\
                4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;\n\
                4E02;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;\n\
                A000;YI SYLLABLE IT;Lo;0;L;;;;;N;;;;;\n";
    let records = UnicodeData::parse(text).collect::<Vec<CodePointRecord<'_>>>();
    let codes = records.iter().map(|record| record.code).collect::<Vec<u32>>();
    assert_eq!(codes, vec![0x4E00, 0x4E01, 0x4E02, 0xA000]);
    assert_eq!(records[1].name, "CJK Ideograph");
}
