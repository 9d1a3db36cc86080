//! The compilation pipeline: every source table in, every compiled table
//! out, stages run in dependency order.

use crate::case_mapping::{simple_case_mappings, CaseTables};
use crate::code_point_table::CodePointTable;
use crate::config::CompileOptions;
use crate::constants::FULL_COMPOSITION_EXCLUSION;
use crate::decomposition::{compile_compositions, compile_decompositions, Decompositions};
use crate::error::Result;
use crate::general_category::{compile_combining_classes, compile_general_categories, CategoryTables};
use crate::interval::{to_value_table, IntervalTable};
use crate::properties::{load_properties, PropertyTables};
use crate::query;
use crate::source::{UcdFile, UcdSources};
use crate::special_casing::apply_special_casing;
use crate::types::CompositionTable;
use crate::width::{compile_width_table, WidthTable};
use tracing::debug;

/// Every compiled table.  Built once by [`compile`] and only read afterward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledUcd {
    /// Per general category and category group, `Cn` included.
    pub general_categories: CategoryTables,
    pub combining_classes: IntervalTable<u8>,
    pub derived_properties: PropertyTables,
    pub properties: PropertyTables,
    pub scripts: PropertyTables,
    pub grapheme_categories: IntervalTable<String>,
    pub composition_exclusions: IntervalTable,
    pub case_tables: CaseTables,
    pub decompositions: Decompositions,
    pub compositions: CompositionTable,
    pub widths: WidthTable,
}

/// Compile `sources` as directed by `options`.
///
/// Fails before any stage runs if a source table is missing.  Malformed lines
/// within a table are logged and skipped.
pub fn compile(sources: &UcdSources, options: &CompileOptions) -> Result<CompiledUcd> {
    sources.check_complete()?;

    let table = CodePointTable::parse(sources.text(UcdFile::UnicodeData)?);
    debug!(records = table.len(), "parsed UnicodeData.txt");

    let general_categories = compile_general_categories(&table);
    let combining_classes = compile_combining_classes(&table);
    debug!(
        categories = general_categories.len(),
        combining_class_intervals = combining_classes.len(),
        "compiled general categories"
    );

    let derived_properties = load_properties(
        sources.text(UcdFile::DerivedCoreProperties)?,
        &options.derived_properties,
    );
    let properties = load_properties(sources.text(UcdFile::PropList)?, &options.properties);
    let scripts = load_properties(sources.text(UcdFile::Scripts)?, &options.scripts);
    let grapheme = load_properties(
        sources.text(UcdFile::GraphemeBreakProperty)?,
        &options.grapheme_categories,
    );
    let grapheme_categories = to_value_table(grapheme.iter());
    debug!(
        derived_properties = derived_properties.len(),
        properties = properties.len(),
        scripts = scripts.len(),
        grapheme_intervals = grapheme_categories.len(),
        "compiled properties"
    );

    let mut case_mappings = simple_case_mappings(&table);
    apply_special_casing(sources.text(UcdFile::SpecialCasing)?, &mut case_mappings);
    let case_tables = case_mappings.to_tables();
    debug!(
        to_lower = case_tables.to_lower.len(),
        to_upper = case_tables.to_upper.len(),
        to_title = case_tables.to_title.len(),
        "compiled case mappings"
    );

    let composition_exclusions = load_properties(
        sources.text(UcdFile::DerivedNormalizationProps)?,
        &[FULL_COMPOSITION_EXCLUSION.to_string()],
    )
    .remove(FULL_COMPOSITION_EXCLUSION)
    .unwrap_or_default();
    let decompositions = compile_decompositions(&table);
    let compositions = compile_compositions(&decompositions.canonical, &composition_exclusions);
    debug!(
        canonical = decompositions.canonical.len(),
        compatibility = decompositions.compatibility.len(),
        compositions = compositions.len(),
        "compiled decompositions"
    );

    let widths = compile_width_table(
        sources.text(UcdFile::EastAsianWidth)?,
        &general_categories,
        &options.width,
    );
    debug!(intervals = widths.len(), "compiled width table");

    let compiled = CompiledUcd {
        general_categories,
        combining_classes,
        derived_properties,
        properties,
        scripts,
        grapheme_categories,
        composition_exclusions,
        case_tables,
        decompositions,
        compositions,
        widths,
    };
    compiled.check_invariants();
    Ok(compiled)
}

impl CompiledUcd {
    /// Panic unless every interval table is sorted, disjoint and maximally
    /// coalesced, and every case table is sorted by source code point.
    pub fn check_invariants(&self) {
        for tables in [
            &self.general_categories,
            &self.derived_properties,
            &self.properties,
            &self.scripts,
        ]
        .iter()
        {
            for table in tables.values() {
                table.check_invariants();
            }
        }
        self.combining_classes.check_invariants();
        self.grapheme_categories.check_invariants();
        self.composition_exclusions.check_invariants();
        self.widths.check_invariants();

        for case_table in [
            &self.case_tables.to_lower,
            &self.case_tables.to_upper,
            &self.case_tables.to_title,
        ]
        .iter()
        {
            assert!(
                case_table.windows(2).all(|pair| pair[0].0 < pair[1].0),
                "unsorted case table"
            );
        }
    }

    /// Whether `c` has general category (or is in category group) `category`.
    /// An unknown category contains nothing.
    pub fn in_general_category(&self, c: u32, category: &str) -> bool {
        self.general_categories
            .get(category)
            .map_or(false, |table| query::in_category(c, table))
    }

    /// Whether `c` has the derived core property `property`.
    pub fn has_derived_property(&self, c: u32, property: &str) -> bool {
        self.derived_properties
            .get(property)
            .map_or(false, |table| query::in_category(c, table))
    }

    pub fn has_property(&self, c: u32, property: &str) -> bool {
        self.properties
            .get(property)
            .map_or(false, |table| query::in_category(c, table))
    }

    pub fn in_script(&self, c: u32, script: &str) -> bool {
        self.scripts
            .get(script)
            .map_or(false, |table| query::in_category(c, table))
    }

    pub fn width(&self, c: u32, is_cjk: bool) -> Option<u8> {
        query::width(c, is_cjk, &self.widths)
    }

    pub fn to_lower(&self, c: u32) -> Vec<u32> {
        query::case_map(c, &self.case_tables.to_lower)
    }

    pub fn to_upper(&self, c: u32) -> Vec<u32> {
        query::case_map(c, &self.case_tables.to_upper)
    }

    pub fn to_title(&self, c: u32) -> Vec<u32> {
        query::case_map(c, &self.case_tables.to_title)
    }

    pub fn combining_class(&self, c: u32) -> u8 {
        query::combining_class(c, &self.combining_classes)
    }

    pub fn grapheme_category(&self, c: u32) -> Option<&str> {
        query::lookup(c, &self.grapheme_categories).map(String::as_str)
    }

    pub fn compose(&self, a: u32, b: u32) -> Option<u32> {
        query::compose(a, b, &self.compositions)
    }

    pub fn canonical_decomposition(&self, c: u32) -> Option<&[u32]> {
        query::decompose(c, &self.decompositions.canonical)
    }

    pub fn compatibility_decomposition(&self, c: u32) -> Option<&[u32]> {
        query::decompose(c, &self.decompositions.compatibility)
    }
}

#[cfg(test)]
use crate::constants::{is_surrogate, COMBINING_GRAVE_ACCENT, LATIN_SMALL_LETTER_A};
#[cfg(test)]
use crate::error::Error;
#[cfg(test)]
use crate::general_category::NOT_ASSIGNED;
#[cfg(test)]
use crate::test_data::sources;

#[cfg(test)]
fn compiled() -> CompiledUcd {
    compile(&sources(), &CompileOptions::default()).unwrap()
}

#[test]
fn fails_only_on_missing_table() {
    let sources = sources().with(UcdFile::UnicodeData, "");
    assert!(compile(&sources, &CompileOptions::default()).is_ok());

    match compile(&UcdSources::new(), &CompileOptions::default()) {
        Err(Error::MissingSource(file)) => assert_eq!(file, UcdFile::UnicodeData),
        other => panic!("expected a missing table, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn check_general_category_queries() {
    let ucd = compiled();
    assert!(ucd.in_general_category(0x41, "Lu"));
    assert!(ucd.in_general_category(0x41, "LC"));
    assert!(ucd.in_general_category(0x41, "L"));
    assert!(!ucd.in_general_category(0x41, "Ll"));
    assert!(ucd.in_general_category(0x3400, "Lo"));
    assert!(ucd.in_general_category(0x4DBF, "Lo"));
    assert!(!ucd.in_general_category(0x41, "No_Such_Category"));
    assert!(ucd.in_general_category(0x10FFFF, NOT_ASSIGNED));
    assert!(!ucd.in_general_category(0xD800, NOT_ASSIGNED));
    assert!(!ucd.in_general_category(0xD800, "C"));
}

#[test]
fn check_unassigned_iff_in_no_category() {
    let ucd = compiled();
    let assigned = ucd
        .general_categories
        .iter()
        .filter(|(name, _)| name.len() == 2 && *name != NOT_ASSIGNED && *name != "LC")
        .map(|(_, table)| table)
        .collect::<Vec<_>>();

    for c in (0..0x20000).filter(|c| !is_surrogate(*c)) {
        let in_any = assigned.iter().any(|table| query::in_category(c, *table));
        assert_eq!(ucd.in_general_category(c, NOT_ASSIGNED), !in_any, "U+{:04X}", c);
    }
}

#[test]
fn check_property_queries() {
    let ucd = compiled();
    assert!(ucd.has_derived_property(0x41, "XID_Start"));
    assert!(!ucd.has_derived_property(0x30, "XID_Start"));
    assert!(ucd.has_derived_property(0x30, "XID_Continue"));
    // Not among the wanted derived properties.
    assert!(!ucd.has_derived_property(0x2B, "Math"));

    assert!(ucd.has_property(0x3000, "White_Space"));
    assert!(ucd.has_property(0x200D, "Join_Control"));
    assert!(!ucd.has_property(0x21, "Terminal_Punctuation"));

    assert!(ucd.in_script(0x100, "Latin"));
    assert!(ucd.in_script(0x301, "Inherited"));
    assert!(!ucd.in_script(0x301, "Latin"));
}

#[test]
fn check_case_queries() {
    let ucd = compiled();
    assert_eq!(ucd.to_lower(0x41), [0x61]);
    assert_eq!(ucd.to_upper(0x61), [0x41]);
    assert_eq!(ucd.to_upper(0xDF), [0x53, 0x53]);
    assert_eq!(ucd.to_title(0xDF), [0x53, 0x73]);
    assert_eq!(ucd.to_lower(0xDF), [0xDF]);
    assert_eq!(ucd.to_lower(0x130), [0x69, 0x307]);
    assert_eq!(ucd.to_upper(0xFB00), [0x46, 0x46]);
    assert_eq!(ucd.to_title(0x1C4), [0x1C5]);
    assert_eq!(ucd.to_lower(0x30), [0x30]);
    assert_eq!(ucd.to_upper(0x1F600), [0x1F600]);
}

#[test]
fn check_width_queries() {
    let ucd = compiled();
    assert_eq!(ucd.width(0x00, false), Some(0));
    assert_eq!(ucd.width(0x07, false), None);
    assert_eq!(ucd.width(0x41, false), Some(1));
    assert_eq!(ucd.width(0x80, true), None);
    assert_eq!(ucd.width(0xA1, false), Some(1));
    assert_eq!(ucd.width(0xA1, true), Some(2));
    assert_eq!(ucd.width(0xAD, false), Some(1));
    assert_eq!(ucd.width(0xAD, true), Some(1));
    assert_eq!(ucd.width(0x300, true), Some(0));
    assert_eq!(ucd.width(0x1100, false), Some(2));
    assert_eq!(ucd.width(0x1160, true), Some(0));
    assert_eq!(ucd.width(0x3400, true), Some(2));
    assert_eq!(ucd.width(0x1F600, false), Some(2));
    assert_eq!(ucd.width(0x2000, true), Some(1));
}

#[test]
fn check_normalization_queries() {
    let ucd = compiled();
    assert_eq!(ucd.canonical_decomposition(0xC0), Some(&[0x41, 0x300][..]));
    assert_eq!(ucd.compatibility_decomposition(0xC0), None);
    assert_eq!(ucd.compatibility_decomposition(0x3000), Some(&[0x20][..]));
    assert_eq!(ucd.canonical_decomposition(0x41), None);

    assert_eq!(ucd.compose(0x41, 0x300), Some(0xC0));
    assert_eq!(ucd.compose(LATIN_SMALL_LETTER_A, COMBINING_GRAVE_ACCENT), Some(0xE0));
    assert_eq!(ucd.compose(0x49, 0x307), Some(0x130));
    assert_eq!(ucd.compose(0x308, 0x301), None);
    assert_eq!(ucd.compose(0x41, 0x301), None);

    assert_eq!(ucd.combining_class(0x300), 230);
    assert_eq!(ucd.combining_class(0x41), 0);
}

#[test]
fn check_grapheme_queries() {
    let ucd = compiled();
    assert_eq!(ucd.grapheme_category(0x0D), Some("CR"));
    assert_eq!(ucd.grapheme_category(0x0A), Some("LF"));
    assert_eq!(ucd.grapheme_category(0x05), Some("Control"));
    assert_eq!(ucd.grapheme_category(0x301), Some("Extend"));
    assert_eq!(ucd.grapheme_category(0x1100), Some("L"));
    assert_eq!(ucd.grapheme_category(0x41), None);
    assert_eq!(ucd.grapheme_category(0xD800), None);
}

#[test]
fn check_filtered_options() {
    let options = CompileOptions {
        scripts: vec!["Greek".to_string()],
        grapheme_categories: vec!["Extend".to_string()],
        ..CompileOptions::default()
    };
    let ucd = compile(&sources(), &options).unwrap();
    assert_eq!(ucd.scripts.keys().collect::<Vec<_>>(), ["Greek"]);
    assert_eq!(ucd.grapheme_category(0x301), Some("Extend"));
    assert_eq!(ucd.grapheme_category(0x0D), None);
}
