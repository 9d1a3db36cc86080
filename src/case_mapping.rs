//! Compute the simple case mappings recorded inline in `UnicodeData.txt`, and
//! the sorted case tables queried at runtime.

use crate::code_point_table::{CodePointRecord, CodePointTable};
use crate::constants::NULL_PADDING;
use crate::types::{CaseMap, CaseTarget};

/// A case table sorted by source code point, searched by exact match.
pub type CaseTable = Vec<(u32, CaseTarget)>;

/// Case mappings in every direction, as compiled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseMappings {
    pub to_lower: CaseMap,
    pub to_upper: CaseMap,
    pub to_title: CaseMap,
}

/// Sorted case tables ready for binary search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseTables {
    pub to_lower: CaseTable,
    pub to_upper: CaseTable,
    pub to_title: CaseTable,
}

/// A single code point padded to a full [`CaseTarget`].
pub fn simple_target(code: u32) -> CaseTarget {
    [code, NULL_PADDING, NULL_PADDING]
}

/// Generate the simple 1:1 mappings.  A mapping is recorded only when its
/// target differs from the source code point.
pub fn simple_case_mappings(table: &CodePointTable<'_>) -> CaseMappings {
    let mut mappings = CaseMappings::default();

    for record in table.iter() {
        let CodePointRecord {
            code,
            lowercase,
            uppercase,
            titlecase,
            ..
        } = *record;

        for (map, target) in [
            (&mut mappings.to_lower, lowercase),
            (&mut mappings.to_upper, uppercase),
            (&mut mappings.to_title, titlecase),
        ]
        .iter_mut()
        {
            if let Some(target) = *target {
                if target != code {
                    map.insert(code, simple_target(target));
                }
            }
        }
    }

    mappings
}

/// Flatten a case map into a table sorted by source code point.
pub fn to_case_table(map: &CaseMap) -> CaseTable {
    map.iter().map(|(code, target)| (*code, *target)).collect()
}

impl CaseMappings {
    pub fn to_tables(&self) -> CaseTables {
        CaseTables {
            to_lower: to_case_table(&self.to_lower),
            to_upper: to_case_table(&self.to_upper),
            to_title: to_case_table(&self.to_title),
        }
    }
}

#[cfg(test)]
use crate::test_data::UNICODE_DATA_TXT;

#[test]
fn check_simple_case_mappings() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let mappings = simple_case_mappings(&table);

    assert_eq!(mappings.to_lower[&0x41], [0x61, 0, 0]);
    assert_eq!(mappings.to_upper[&0x61], [0x41, 0, 0]);
    assert_eq!(mappings.to_title[&0x61], [0x41, 0, 0]);
    assert_eq!(mappings.to_lower[&0x130], [0x69, 0, 0]);
    assert_eq!(mappings.to_title[&0x1C4], [0x1C5, 0, 0]);

    // U+01C5 titlecases to itself, which is not recorded.
    assert!(!mappings.to_title.contains_key(&0x1C5));
    assert!(!mappings.to_upper.contains_key(&0xDF));
    assert!(!mappings.to_lower.contains_key(&0x30));

    assert_eq!(
        mappings.to_lower.keys().copied().collect::<Vec<u32>>(),
        [0x41, 0x42, 0xC0, 0x130, 0x1C4, 0x1C5]
    );
}

#[test]
fn check_case_tables_sorted() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let tables = simple_case_mappings(&table).to_tables();
    for case_table in [&tables.to_lower, &tables.to_upper, &tables.to_title].iter() {
        assert!(case_table.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }
    assert_eq!(tables.to_upper[0], (0x61, [0x41, 0, 0]));
}
