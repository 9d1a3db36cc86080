//! Compute the general category tables, including the category groups
//! (`L`, `LC`, `C`, ...) and the derived `Cn` (unassigned) category, and the
//! canonical combining class table.

use crate::code_point_table::CodePointTable;
use crate::interval::{group_cat, to_value_table, IntervalTable};
use std::collections::BTreeMap;

/// Pseudo-category holding every code point listed in `UnicodeData.txt`.
/// Used to derive `Cn`; never emitted.
const ASSIGNED: &str = "Assigned";

/// The category for code points absent from `UnicodeData.txt`.
pub const NOT_ASSIGNED: &str = "Cn";

/// The category group `Cn` belongs to.
pub const OTHER: &str = "C";

/// The category groups containing each two-letter general category.
///
/// See Table 12 of <http://www.unicode.org/reports/tr44/#General_Category_Values>.
pub fn super_categories(category: &str) -> &'static [&'static str] {
    match category {
        "Lu" | "Ll" | "Lt" => &["LC", "L"],
        "Lm" | "Lo" => &["L"],
        "Mn" | "Mc" | "Me" => &["M"],
        "Nd" | "Nl" | "No" => &["N"],
        "Pc" | "Pd" | "Ps" | "Pe" | "Pi" | "Pf" | "Po" => &["P"],
        "Sm" | "Sc" | "Sk" | "So" => &["S"],
        "Zs" | "Zl" | "Zp" => &["Z"],
        "Cc" | "Cf" | "Cs" | "Co" | "Cn" => &["C"],
        _ => &[],
    }
}

/// A coalesced interval table per general category or category group.
pub type CategoryTables = BTreeMap<String, IntervalTable>;

/// Generate one interval table per general category and category group.
///
/// Every assigned code point lands in its own category and each group
/// containing it.  `Cn` is the complement of all assigned code points within
/// the code point space (surrogates excluded) and is folded into `C`.
pub fn compile_general_categories(table: &CodePointTable<'_>) -> CategoryTables {
    let mut gencats = BTreeMap::<&str, Vec<u32>>::new();

    for record in table.iter() {
        let category = record.category;
        for cat in std::iter::once(category)
            .chain(std::iter::once(ASSIGNED))
            .chain(super_categories(category).iter().copied())
        {
            gencats.entry(cat).or_insert_with(Vec::new).push(record.code);
        }
    }

    let assigned = group_cat(gencats.remove(ASSIGNED).unwrap_or_default());
    let unassigned = assigned.complement();

    let mut cats = gencats
        .into_iter()
        .map(|(cat, codes)| (cat.to_string(), group_cat(codes)))
        .collect::<CategoryTables>();

    let other = match cats.remove(OTHER) {
        Some(other) => group_cat(other.ungroup_cat().chain(unassigned.ungroup_cat())),
        None => unassigned.clone(),
    };
    cats.insert(OTHER.to_string(), other);
    cats.insert(NOT_ASSIGNED.to_string(), unassigned);

    cats
}

/// Generate the canonical combining class table: one interval per run of
/// code points sharing a non-zero class, sorted by `lo`.
pub fn compile_combining_classes(table: &CodePointTable<'_>) -> IntervalTable<u8> {
    let mut combines = BTreeMap::<u8, Vec<u32>>::new();
    for record in table.iter().filter(|record| record.combining_class != 0) {
        combines
            .entry(record.combining_class)
            .or_insert_with(Vec::new)
            .push(record.code);
    }

    let grouped = combines
        .into_iter()
        .map(|(class, codes)| (class, group_cat(codes)))
        .collect::<BTreeMap<u8, IntervalTable>>();
    to_value_table(grouped.iter())
}

#[cfg(test)]
use crate::constants::MAX_CODE_POINT;
#[cfg(test)]
use crate::test_data::UNICODE_DATA_TXT;

#[cfg(test)]
fn ranges<P>(table: &IntervalTable<P>) -> Vec<(u32, u32)> {
    table.iter().map(|interval| (interval.lo, interval.hi)).collect()
}

#[test]
fn check_general_categories() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let cats = compile_general_categories(&table);

    assert!(!cats.contains_key(ASSIGNED));
    assert_eq!(
        ranges(&cats["Lu"]),
        [(0x41, 0x42), (0xC0, 0xC0), (0x130, 0x130), (0x1C4, 0x1C4)]
    );
    assert_eq!(ranges(&cats["Lt"]), [(0x1C5, 0x1C5)]);
    assert_eq!(
        ranges(&cats["LC"]),
        [
            (0x41, 0x42),
            (0x61, 0x62),
            (0xC0, 0xC0),
            (0xDF, 0xE0),
            (0x130, 0x130),
            (0x1C4, 0x1C6),
            (0xFB00, 0xFB00),
        ]
    );
    assert_eq!(
        ranges(&cats["Mn"]),
        [(0x300, 0x301), (0x307, 0x308), (0x340, 0x340), (0x344, 0x344)]
    );
    assert_eq!(ranges(&cats["Nd"]), [(0x30, 0x30)]);
    assert_eq!(ranges(&cats["N"]), [(0x30, 0x30)]);
    assert_eq!(ranges(&cats["Co"]), [(0xE000, 0xF8FF)]);
    assert!(!cats.contains_key("Cs"));

    for table in cats.values() {
        table.check_invariants();
    }
}

#[test]
fn check_unassigned() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let cats = compile_general_categories(&table);
    let cn = &cats[NOT_ASSIGNED];

    assert_eq!(ranges(cn)[..2], [(0x01, 0x06), (0x08, 0x1F)]);
    assert!(cn.position(0xD800).is_none());
    assert!(cn.position(0xDFFF).is_none());
    assert!(cn.position(0xD7FF).is_some());
    assert!(cn.position(0xE000).is_none());
    assert!(cn.position(MAX_CODE_POINT).is_some());

    // Other includes Cc and Cn, so U+0000..U+001F is one run.
    assert_eq!(ranges(&cats[OTHER])[0], (0x00, 0x1F));
    assert!(cats[OTHER].position(0x10FFFF).is_some());
    assert!(cats[OTHER].position(0xAD).is_some());
}

#[test]
fn check_unassigned_is_complement_of_categories() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let cats = compile_general_categories(&table);

    let assigned_cats = ["Cc", "Cf", "Co", "Ll", "Lo", "Lt", "Lu", "Me", "Mn", "Nd", "So", "Zs"];
    for code in (0..0x20000).filter(|code| !crate::constants::is_surrogate(*code)) {
        let assigned = assigned_cats
            .iter()
            .any(|cat| cats[*cat].position(code).is_some());
        assert_eq!(
            cats[NOT_ASSIGNED].position(code).is_some(),
            !assigned,
            "U+{:04X}",
            code
        );
    }
}

#[test]
fn check_super_categories() {
    assert_eq!(super_categories("Lt"), ["LC", "L"]);
    assert_eq!(super_categories("No"), ["N"]);
    assert_eq!(super_categories("Cn"), ["C"]);
    assert!(super_categories("Xx").is_empty());
}

#[test]
fn check_combining_classes() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let classes = compile_combining_classes(&table);
    assert_eq!(
        classes
            .iter()
            .map(|interval| (interval.lo, interval.hi, interval.payload))
            .collect::<Vec<_>>(),
        [
            (0x300, 0x301, 230),
            (0x307, 0x308, 230),
            (0x340, 0x340, 230),
            (0x344, 0x344, 230)
        ]
    );
}
