//! Excerpts of the UCD tables, in their published formats, used by tests.

use crate::source::{UcdFile, UcdSources};

pub static UNICODE_DATA_TXT: &str = include_str!("data/UnicodeData.txt");
pub static SPECIAL_CASING_TXT: &str = include_str!("data/SpecialCasing.txt");
pub static DERIVED_CORE_TXT: &str = include_str!("data/DerivedCoreProperties.txt");
pub static PROP_LIST_TXT: &str = include_str!("data/PropList.txt");
pub static SCRIPTS_TXT: &str = include_str!("data/Scripts.txt");
pub static DERIVED_NORMALIZATION_TXT: &str = include_str!("data/DerivedNormalizationProps.txt");
pub static EAST_ASIAN_WIDTH_TXT: &str = include_str!("data/EastAsianWidth.txt");
pub static GRAPHEME_BREAK_TXT: &str = include_str!("data/auxiliary/GraphemeBreakProperty.txt");

pub fn sources() -> UcdSources {
    UcdSources::new()
        .with(UcdFile::UnicodeData, UNICODE_DATA_TXT)
        .with(UcdFile::SpecialCasing, SPECIAL_CASING_TXT)
        .with(UcdFile::DerivedCoreProperties, DERIVED_CORE_TXT)
        .with(UcdFile::PropList, PROP_LIST_TXT)
        .with(UcdFile::Scripts, SCRIPTS_TXT)
        .with(UcdFile::DerivedNormalizationProps, DERIVED_NORMALIZATION_TXT)
        .with(UcdFile::EastAsianWidth, EAST_ASIAN_WIDTH_TXT)
        .with(UcdFile::GraphemeBreakProperty, GRAPHEME_BREAK_TXT)
}
