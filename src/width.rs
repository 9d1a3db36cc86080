//! Compute the monospace display width table, following the rules of
//! `wcwidth()` as in <http://www.cl.cam.ac.uk/~mgk25/ucs/wcwidth.c>.
//!
//! Marks and format characters are zero width.  East Asian wide and
//! fullwidth characters take two columns; ambiguous-width ones take two only
//! in a CJK context.  Code points absent from the table take one column.

use crate::config::WidthOptions;
pub use crate::config::CharWidth;
use crate::east_asian_width::{EastAsianWidth, EastAsianWidthRange};
use crate::general_category::CategoryTables;
use crate::interval::{Interval, IntervalTable};

/// Width pairs for every code point not of the default width.
pub type WidthTable = IntervalTable<CharWidth>;

/// Load every range of `EastAsianWidth.txt` whose width class is wanted by
/// `options` and whose general category is not excluded, annotated with the
/// wanted class's width pair.
pub fn load_east_asian_width(text: &str, options: &WidthOptions) -> Vec<Interval<CharWidth>> {
    EastAsianWidth::parse(text)
        .filter(|EastAsianWidthRange { category, .. }| {
            !options.excluded_categories.iter().any(|cat| cat == category)
        })
        .filter_map(|EastAsianWidthRange { lo, hi, width, .. }| {
            options
                .east_asian_widths
                .iter()
                .find(|(class, _)| class == width)
                .map(|(_, char_width)| Interval::new(lo, hi, *char_width))
        })
        .collect()
}

/// Generate the width table: zero-width categories and ranges, then the
/// wanted East Asian widths, with `options.removed_points` punched out and
/// contiguous equal-width intervals merged.
pub fn compile_width_table(
    east_asian_width: &str,
    general_categories: &CategoryTables,
    options: &WidthOptions,
) -> WidthTable {
    let mut width_table = vec![];

    for zwcat in &options.zero_width_categories {
        if let Some(table) = general_categories.get(zwcat) {
            width_table.extend(
                table
                    .iter()
                    .map(|interval| Interval::new(interval.lo, interval.hi, CharWidth::ZERO)),
            );
        }
    }
    width_table.extend(
        options
            .zero_width_ranges
            .iter()
            .map(|&(lo, hi)| Interval::new(lo, hi, CharWidth::ZERO)),
    );
    width_table.extend(load_east_asian_width(east_asian_width, options));

    let mut width_table = IntervalTable::from_intervals(width_table);

    for &code in &options.removed_points {
        width_table.remove_point(code);
    }

    width_table.coalesce_adjacent();
    width_table
}

#[cfg(test)]
use crate::code_point_table::CodePointTable;
#[cfg(test)]
use crate::general_category::compile_general_categories;
#[cfg(test)]
use crate::test_data::{EAST_ASIAN_WIDTH_TXT, UNICODE_DATA_TXT};

#[cfg(test)]
fn ranges(table: &WidthTable) -> Vec<(u32, u32, u8, u8)> {
    table
        .iter()
        .map(|interval| {
            (
                interval.lo,
                interval.hi,
                interval.payload.non_cjk,
                interval.payload.cjk,
            )
        })
        .collect()
}

#[test]
fn check_load_east_asian_width() {
    let loaded = load_east_asian_width(EAST_ASIAN_WIDTH_TXT, &WidthOptions::default());
    let loaded = loaded
        .iter()
        .map(|interval| (interval.lo, interval.hi, interval.payload))
        .collect::<Vec<_>>();
    assert_eq!(
        loaded,
        [
            (0xA1, 0xA1, CharWidth::new(1, 2)),
            (0xC6, 0xC6, CharWidth::new(1, 2)),
            (0xDF, 0xE1, CharWidth::new(1, 2)),
            (0x1100, 0x115F, CharWidth::new(2, 2)),
            (0x3000, 0x3000, CharWidth::new(2, 2)),
            (0x3001, 0x3003, CharWidth::new(2, 2)),
            (0x3400, 0x4DBF, CharWidth::new(2, 2)),
            (0xE000, 0xF8FF, CharWidth::new(1, 2)),
            (0xFF01, 0xFF03, CharWidth::new(2, 2)),
            (0x1F600, 0x1F64F, CharWidth::new(2, 2)),
        ]
    );
}

#[test]
fn check_width_table() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let cats = compile_general_categories(&table);
    let widths = compile_width_table(EAST_ASIAN_WIDTH_TXT, &cats, &WidthOptions::default());

    assert_eq!(
        ranges(&widths),
        [
            (0xA1, 0xA1, 1, 2),
            (0xC6, 0xC6, 1, 2),
            (0xDF, 0xE1, 1, 2),
            (0x300, 0x301, 0, 0),
            (0x307, 0x308, 0, 0),
            (0x340, 0x340, 0, 0),
            (0x344, 0x344, 0, 0),
            (0x488, 0x488, 0, 0),
            (0x1100, 0x115F, 2, 2),
            (0x1160, 0x11FF, 0, 0),
            (0x3000, 0x3003, 2, 2),
            (0x3400, 0x4DBF, 2, 2),
            (0xE000, 0xF8FF, 1, 2),
            (0xFF01, 0xFF03, 2, 2),
            (0x1F600, 0x1F64F, 2, 2),
        ]
    );
    widths.check_invariants();
}

#[test]
fn check_removed_point_splits_range() {
    let cats = CategoryTables::new();
    let options = WidthOptions {
        removed_points: vec![0x3002],
        ..WidthOptions::default()
    };
    let widths = compile_width_table(EAST_ASIAN_WIDTH_TXT, &cats, &options);
    let around = ranges(&widths)
        .into_iter()
        .filter(|&(lo, _, _, _)| (0x3000..=0x3003).contains(&lo))
        .collect::<Vec<_>>();
    assert_eq!(around, [(0x3000, 0x3001, 2, 2), (0x3003, 0x3003, 2, 2)]);
}
