//! Compute the canonical and compatibility decomposition maps, and the
//! canonical composition table derived from them.

use crate::code_point_table::{CodePointTable, Decomposition};
use crate::interval::IntervalTable;
use crate::types::{CompositionTable, DecompositionMap};

/// Single-level decompositions, partitioned by the presence of a formatting
/// tag.  A code point appears in at most one of the two maps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decompositions {
    /// Untagged decompositions.
    pub canonical: DecompositionMap,
    /// Tagged (`<compat>`, `<wide>`, ...) decompositions, tag dropped.
    pub compatibility: DecompositionMap,
}

/// Generate the decomposition maps.  Decompositions are stored exactly as
/// listed, not recursively expanded.
pub fn compile_decompositions(table: &CodePointTable<'_>) -> Decompositions {
    let mut decompositions = Decompositions::default();

    for record in table.iter() {
        let Decomposition { tag, codes } = match record.decomposition {
            Some(ref decomposition) => decomposition,
            None => continue,
        };

        let map = match tag {
            Some(_) => &mut decompositions.compatibility,
            None => &mut decompositions.canonical,
        };
        map.insert(record.code, codes.clone());
    }

    decompositions
}

/// Generate the composition table: every canonical decomposition of exactly
/// two code points `(a, b)` into `c`, keyed by `a`, unless `c` is in
/// `exclusions`.  Code points are visited in ascending order, so the pairs
/// under each key are listed by ascending composite.
pub fn compile_compositions(
    canonical: &DecompositionMap,
    exclusions: &IntervalTable,
) -> CompositionTable {
    let mut canon_comp = CompositionTable::new();

    for (&code, decomp) in canonical {
        if exclusions.position(code).is_some() {
            continue;
        }
        if let [first, second] = decomp[..] {
            canon_comp
                .entry(first)
                .or_insert_with(Vec::new)
                .push((second, code));
        }
    }

    canon_comp
}

#[cfg(test)]
use crate::constants::{
    COMBINING_GRAVE_ACCENT, FULL_COMPOSITION_EXCLUSION, IDEOGRAPHIC_SPACE, LATIN_CAPITAL_LETTER_A,
    LATIN_CAPITAL_LETTER_A_WITH_GRAVE,
};
#[cfg(test)]
use crate::properties::load_properties;
#[cfg(test)]
use crate::test_data::{DERIVED_NORMALIZATION_TXT, UNICODE_DATA_TXT};

#[cfg(test)]
fn exclusions() -> IntervalTable {
    load_properties(
        DERIVED_NORMALIZATION_TXT,
        &[FULL_COMPOSITION_EXCLUSION.to_string()],
    )
    .remove(FULL_COMPOSITION_EXCLUSION)
    .unwrap()
}

#[test]
fn check_decompositions_partitioned() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let Decompositions {
        canonical,
        compatibility,
    } = compile_decompositions(&table);

    assert_eq!(
        canonical.keys().copied().collect::<Vec<u32>>(),
        [0xC0, 0xE0, 0x130, 0x340, 0x344]
    );
    assert_eq!(
        compatibility.keys().copied().collect::<Vec<u32>>(),
        [0x1C4, 0x1C5, 0x1C6, 0x3000, 0xFB00]
    );
    assert!(canonical.keys().all(|code| !compatibility.contains_key(code)));

    assert_eq!(canonical[&0x340], [0x300]);
    assert_eq!(canonical[&0x344], [0x308, 0x301]);
    assert_eq!(compatibility[&IDEOGRAPHIC_SPACE], [0x20]);
    assert_eq!(compatibility[&0x1C4], [0x44, 0x17D]);
}

#[test]
fn check_compositions() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let decompositions = compile_decompositions(&table);
    let compositions = compile_compositions(&decompositions.canonical, &exclusions());

    assert_eq!(compositions.keys().copied().collect::<Vec<u32>>(), [0x41, 0x49, 0x61]);
    assert_eq!(
        compositions[&LATIN_CAPITAL_LETTER_A],
        [(COMBINING_GRAVE_ACCENT, LATIN_CAPITAL_LETTER_A_WITH_GRAVE)]
    );
    assert_eq!(compositions[&0x49], [(0x307, 0x130)]);

    // U+0344 decomposes to a pair but is excluded from composition.
    assert!(!compositions.contains_key(&0x308));
}

#[test]
fn check_compositions_round_trip() {
    let table = CodePointTable::parse(UNICODE_DATA_TXT);
    let decompositions = compile_decompositions(&table);
    let exclusions = exclusions();
    let compositions = compile_compositions(&decompositions.canonical, &exclusions);

    for (&code, decomp) in &decompositions.canonical {
        if decomp.len() != 2 || exclusions.position(code).is_some() {
            continue;
        }
        let composed = compositions[&decomp[0]]
            .iter()
            .find(|(second, _)| *second == decomp[1])
            .map(|(_, composite)| *composite);
        assert_eq!(composed, Some(code), "U+{:04X}", code);
    }
}

#[test]
fn check_several_pairs_per_starter() {
    let mut canonical = DecompositionMap::new();
    canonical.insert(0xE1, vec![0x61, 0x301]);
    canonical.insert(0xE0, vec![0x61, 0x300]);
    canonical.insert(0x1EA1, vec![0x61, 0x323]);
    let compositions = compile_compositions(&canonical, &IntervalTable::new());
    assert_eq!(
        compositions[&0x61],
        [(0x300, 0xE0), (0x301, 0xE1), (0x323, 0x1EA1)]
    );
}
