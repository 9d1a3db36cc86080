//! Processes the comment-stripped `range ; Property` tables
//! (`DerivedCoreProperties.txt`, `PropList.txt`, `Scripts.txt`,
//! `DerivedNormalizationProps.txt`, `auxiliary/GraphemeBreakProperty.txt`)
//! into one coalesced interval table per property.

use crate::error::{Error, Result};
use crate::fields::{parse_code_point_range, strip_comment};
use crate::interval::{group_cat, without_surrogates, Interval, IntervalTable};
use std::collections::BTreeMap;
use tracing::warn;

/// One data line: the code points `lo..=hi` have `property`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertyRange<'a> {
    pub lo: u32,
    pub hi: u32,
    pub property: &'a str,
}

fn parse_line(line: &str, number: usize) -> Result<PropertyRange<'_>> {
    let mut fields = line.split(';');

    let range = fields.next().unwrap_or("");
    let property = match fields.next() {
        Some(property) if !property.trim().is_empty() => property.trim(),
        _ => {
            return Err(Error::FieldCount {
                line: number,
                expected: 2,
                found: 1,
            })
        }
    };

    let (lo, hi) = parse_code_point_range(range, number)?;
    Ok(PropertyRange { lo, hi, property })
}

/// Iterator over the data lines of a property table.  Comments and blank
/// lines are dropped; malformed lines are logged and skipped.
pub struct PropertyLines<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> PropertyLines<'a> {
    pub fn parse(text: &'a str) -> PropertyLines<'a> {
        PropertyLines {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for PropertyLines<'a> {
    type Item = PropertyRange<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line_with_comment) = self.lines.next()?;
            let line = strip_comment(line_with_comment);
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line, index + 1) {
                Ok(range) => return Some(range),
                Err(error) => warn!(%error, "skipping malformed property line"),
            }
        }
    }
}

/// A coalesced interval table per property name.
pub type PropertyTables = BTreeMap<String, IntervalTable>;

/// Compute the interval table of every property listed in `text` whose name
/// is in `interesting`; an empty `interesting` keeps every property.  Names
/// outside `interesting` are ignored.  Surrogates are dropped.
pub fn load_properties(text: &str, interesting: &[String]) -> PropertyTables {
    let mut props = BTreeMap::<&str, Vec<Interval>>::new();
    for PropertyRange { lo, hi, property } in PropertyLines::parse(text) {
        if !interesting.is_empty() && !interesting.iter().any(|name| name == property) {
            continue;
        }
        props
            .entry(property)
            .or_insert_with(Vec::new)
            .push(Interval::new(lo, hi, ()));
    }

    props
        .into_iter()
        .map(|(property, intervals)| {
            let points = intervals
                .iter()
                .flat_map(|interval| interval.lo..=interval.hi)
                .collect::<Vec<u32>>();
            (property.to_string(), group_cat(without_surrogates(points)))
        })
        .collect()
}

#[cfg(test)]
use crate::test_data::{
    DERIVED_CORE_TXT, DERIVED_NORMALIZATION_TXT, GRAPHEME_BREAK_TXT, PROP_LIST_TXT, SCRIPTS_TXT,
};

#[cfg(test)]
fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[cfg(test)]
fn ranges(table: &IntervalTable) -> Vec<(u32, u32)> {
    table.iter().map(|interval| (interval.lo, interval.hi)).collect()
}

#[test]
fn check_property_lines() {
    let lines = PropertyLines::parse(DERIVED_NORMALIZATION_TXT).collect::<Vec<_>>();
    assert_eq!(
        lines[0],
        PropertyRange {
            lo: 0x340,
            hi: 0x341,
            property: "Full_Composition_Exclusion",
        }
    );
    // `NFD_QC; N` keeps only the property name.
    assert_eq!(lines[3].property, "NFD_QC");
    assert_eq!(lines.len(), 5);
}

#[test]
fn check_malformed_lines_skipped() {
    let text = "0041..005A ; Alphabetic\n\
                0061..ZZZZ ; Alphabetic\n\
                00AA\n\
                00BA ;   \n\
                00C0 ; Alphabetic # Lu\n";
    let lines = PropertyLines::parse(text).collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[1].lo, lines[1].hi), (0xC0, 0xC0));
}

#[test]
fn check_derived_core_properties() {
    let derived = load_properties(
        DERIVED_CORE_TXT,
        &names(&["Alphabetic", "Lowercase", "Uppercase", "XID_Start"]),
    );
    assert_eq!(
        derived.keys().collect::<Vec<_>>(),
        ["Alphabetic", "Lowercase", "Uppercase", "XID_Start"]
    );
    assert!(!derived.contains_key("Math"));
    assert!(!derived.contains_key("XID_Continue"));

    assert_eq!(
        ranges(&derived["Alphabetic"]),
        [(0x41, 0x5A), (0x61, 0x7A), (0xAA, 0xAA), (0xC0, 0xD6), (0xD8, 0xF6)]
    );
}

#[test]
fn check_unknown_interesting_names_ignored() {
    let props = load_properties(PROP_LIST_TXT, &names(&["White_Space", "No_Such_Property"]));
    assert_eq!(props.len(), 1);
    assert_eq!(
        ranges(&props["White_Space"]),
        [(0x09, 0x0D), (0x20, 0x20), (0x85, 0x85), (0xA0, 0xA0), (0x3000, 0x3000)]
    );
}

#[test]
fn check_scripts_coalesced_across_lines() {
    let scripts = load_properties(SCRIPTS_TXT, &[]);
    assert_eq!(
        scripts.keys().collect::<Vec<_>>(),
        ["Common", "Greek", "Inherited", "Latin"]
    );
    assert_eq!(ranges(&scripts["Common"]), [(0x00, 0x23)]);
    assert_eq!(
        ranges(&scripts["Latin"]),
        [(0x41, 0x5A), (0x61, 0x7A), (0xAA, 0xAA), (0xF8, 0x293)]
    );
    for table in scripts.values() {
        table.check_invariants();
    }
}

#[test]
fn check_surrogates_dropped() {
    let grapheme = load_properties(GRAPHEME_BREAK_TXT, &[]);
    assert_eq!(
        ranges(&grapheme["Control"]),
        [(0x00, 0x09), (0x0B, 0x0C), (0x0E, 0x1F)]
    );
    grapheme["Control"].check_invariants();
}
