//! Options controlling which properties are compiled and how display width
//! is assigned.

/// A display width pair: columns outside and inside a CJK context.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CharWidth {
    pub non_cjk: u8,
    pub cjk: u8,
}

impl CharWidth {
    pub const ZERO: CharWidth = CharWidth { non_cjk: 0, cjk: 0 };

    pub fn new(non_cjk: u8, cjk: u8) -> CharWidth {
        CharWidth { non_cjk, cjk }
    }
}

/// How the width table is derived from `EastAsianWidth.txt` and the general
/// categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidthOptions {
    /// East-Asian-width classes that get a table entry, and their widths.
    pub east_asian_widths: Vec<(String, CharWidth)>,
    /// General categories whose East-Asian-width lines are ignored.
    pub excluded_categories: Vec<String>,
    /// General categories rendered with zero width.
    pub zero_width_categories: Vec<String>,
    /// Further ranges rendered with zero width.
    pub zero_width_ranges: Vec<(u32, u32)>,
    /// Code points punched out of the finished table so that they get the
    /// default width.
    pub removed_points: Vec<u32>,
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for WidthOptions {
    fn default() -> WidthOptions {
        use crate::constants::{HANGUL_JONGSEONG_SSANGNIEUN, HANGUL_JUNGSEONG_FILLER, SOFT_HYPHEN};

        // Marks and format characters render zero width regardless of their
        // nominal East Asian width.
        let zero_width = strings(&["Me", "Mn", "Cf"]);
        WidthOptions {
            east_asian_widths: vec![
                ("W".to_string(), CharWidth::new(2, 2)),
                ("F".to_string(), CharWidth::new(2, 2)),
                ("A".to_string(), CharWidth::new(1, 2)),
            ],
            excluded_categories: zero_width.clone(),
            zero_width_categories: zero_width,
            zero_width_ranges: vec![(HANGUL_JUNGSEONG_FILLER, HANGUL_JONGSEONG_SSANGNIEUN)],
            removed_points: vec![SOFT_HYPHEN],
        }
    }
}

/// What to compile.  For every property filter, an empty list keeps every
/// property the table lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Properties kept from `DerivedCoreProperties.txt`.
    pub derived_properties: Vec<String>,
    /// Properties kept from `PropList.txt`.
    pub properties: Vec<String>,
    /// Scripts kept from `Scripts.txt`.
    pub scripts: Vec<String>,
    /// Values kept from `GraphemeBreakProperty.txt`.
    pub grapheme_categories: Vec<String>,
    pub width: WidthOptions,
}

impl Default for CompileOptions {
    fn default() -> CompileOptions {
        CompileOptions {
            derived_properties: strings(&[
                "XID_Start",
                "XID_Continue",
                "Alphabetic",
                "Lowercase",
                "Uppercase",
                "Cased",
                "Case_Ignorable",
            ]),
            properties: strings(&["White_Space", "Join_Control", "Noncharacter_Code_Point"]),
            scripts: vec![],
            grapheme_categories: vec![],
            width: WidthOptions::default(),
        }
    }
}
