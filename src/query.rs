//! Runtime lookups against compiled tables.  Every lookup is a binary search
//! over a table sorted by code point.

use crate::case_mapping::CaseTable;
use crate::constants::NULL_PADDING;
use crate::interval::IntervalTable;
use crate::types::{CompositionTable, DecompositionMap};
use crate::width::WidthTable;

/// Whether `c` lies within some interval of `table`.
pub fn in_category<P>(c: u32, table: &IntervalTable<P>) -> bool {
    table.position(c).is_some()
}

/// The payload of the interval of `table` containing `c`.
pub fn lookup<P>(c: u32, table: &IntervalTable<P>) -> Option<&P> {
    table.position(c).map(|index| &table.as_slice()[index].payload)
}

/// The case mapping of `c`: its entry in `table` with trailing padding
/// stripped, or `c` itself when it has none.
pub fn case_map(c: u32, table: &CaseTable) -> Vec<u32> {
    match table.binary_search_by_key(&c, |&(key, _)| key) {
        Err(_) => vec![c],
        Ok(index) => {
            let target = &table[index].1;
            let len = target
                .iter()
                .rposition(|&code| code != NULL_PADDING)
                .map_or(0, |last| last + 1);
            target[..len].to_vec()
        }
    }
}

/// The display width of `c` in columns, or `None` for control characters.
///
/// NUL is zero width and printable ASCII is one column; everything from
/// U+00A0 up is looked up in `table`, defaulting to one column.
pub fn width(c: u32, is_cjk: bool, table: &WidthTable) -> Option<u8> {
    match c {
        0 => Some(0),
        cu if cu < 0x20 => None, // C0 controls
        cu if cu < 0x7F => Some(1),
        cu if cu < 0xA0 => None, // DEL and C1 controls
        _ => Some(match lookup(c, table) {
            Some(char_width) if is_cjk => char_width.cjk,
            Some(char_width) => char_width.non_cjk,
            None => 1,
        }),
    }
}

/// The canonical combining class of `c`; `0` when it has none.
pub fn combining_class(c: u32, table: &IntervalTable<u8>) -> u8 {
    lookup(c, table).copied().unwrap_or(0)
}

/// The code point canonically composed from `a` followed by `b`, if any.
pub fn compose(a: u32, b: u32, table: &CompositionTable) -> Option<u32> {
    table
        .get(&a)?
        .iter()
        .find(|&&(second, _)| second == b)
        .map(|&(_, composite)| composite)
}

/// The single-level decomposition of `c` in `map`, if any.
pub fn decompose(c: u32, map: &DecompositionMap) -> Option<&[u32]> {
    map.get(&c).map(Vec::as_slice)
}

#[cfg(test)]
use crate::config::CharWidth;
#[cfg(test)]
use crate::interval::{group_cat, Interval};

#[cfg(test)]
fn width_table() -> WidthTable {
    IntervalTable::from_intervals(vec![
        Interval::new(0x00A1, 0x00A1, CharWidth::new(1, 2)),
        Interval::new(0x0300, 0x036F, CharWidth::ZERO),
        Interval::new(0x1100, 0x115F, CharWidth::new(2, 2)),
        Interval::new(0x3000, 0x3003, CharWidth::new(2, 2)),
    ])
}

#[test]
fn check_in_category() {
    let table = group_cat(vec![0x41, 0x42, 0x43, 0x61, 0x1F600]);
    assert!(in_category(0x41, &table));
    assert!(in_category(0x43, &table));
    assert!(!in_category(0x44, &table));
    assert!(!in_category(0x40, &table));
    assert!(in_category(0x1F600, &table));
    assert!(!in_category(0x10FFFF, &table));
    assert!(!in_category(0x41, &IntervalTable::<()>::new()));
}

#[test]
fn check_width_edge_cases() {
    let table = width_table();
    assert_eq!(width(0x00, false, &table), Some(0));
    assert_eq!(width(0x07, false, &table), None);
    assert_eq!(width(0x1F, true, &table), None);
    assert_eq!(width(0x20, false, &table), Some(1));
    assert_eq!(width(0x41, false, &table), Some(1));
    assert_eq!(width(0x7E, true, &table), Some(1));
    assert_eq!(width(0x7F, false, &table), None);
    assert_eq!(width(0x9F, false, &table), None);
    assert_eq!(width(0xA0, false, &table), Some(1));
}

#[test]
fn check_width_lookup() {
    let table = width_table();
    assert_eq!(width(0xA1, false, &table), Some(1));
    assert_eq!(width(0xA1, true, &table), Some(2));
    assert_eq!(width(0x301, false, &table), Some(0));
    assert_eq!(width(0x1100, true, &table), Some(2));
    assert_eq!(width(0x3002, false, &table), Some(2));
    assert_eq!(width(0x3004, false, &table), Some(1));
    assert_eq!(width(0x10FFFF, true, &table), Some(1));
}

#[test]
fn check_case_map() {
    let table: CaseTable = vec![
        (0x41, [0x61, 0, 0]),
        (0xDF, [0x53, 0x53, 0]),
        (0x390, [0x3B9, 0x308, 0x301]),
    ];
    assert_eq!(case_map(0x41, &table), [0x61]);
    assert_eq!(case_map(0xDF, &table), [0x53, 0x53]);
    assert_eq!(case_map(0x390, &table), [0x3B9, 0x308, 0x301]);
    assert_eq!(case_map(0x30, &table), [0x30]);
    assert_eq!(case_map(0x10FFFF, &table), [0x10FFFF]);
}

#[test]
fn check_combining_class_and_compose() {
    let classes = IntervalTable::from_intervals(vec![Interval::new(0x300, 0x314, 230u8)]);
    assert_eq!(combining_class(0x301, &classes), 230);
    assert_eq!(combining_class(0x41, &classes), 0);

    let mut compositions = CompositionTable::new();
    compositions.insert(0x41, vec![(0x300, 0xC0), (0x301, 0xC1)]);
    assert_eq!(compose(0x41, 0x301, &compositions), Some(0xC1));
    assert_eq!(compose(0x41, 0x302, &compositions), None);
    assert_eq!(compose(0x42, 0x300, &compositions), None);

    let mut decompositions = DecompositionMap::new();
    decompositions.insert(0xC0, vec![0x41, 0x300]);
    assert_eq!(decompose(0xC0, &decompositions), Some(&[0x41, 0x300][..]));
    assert_eq!(decompose(0x41, &decompositions), None);
}
