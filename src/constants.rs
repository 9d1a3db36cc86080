/// The largest valid code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// The first code point of the surrogate block.
pub const SURROGATE_START: u32 = 0xD800;

/// The last code point of the surrogate block.
pub const SURROGATE_END: u32 = 0xDFFF;

/// Sentinel right-padding case mapping targets to three code points.
pub const NULL_PADDING: u32 = 0;

/// Whether `code` lies in the surrogate block, which no compiled table ever
/// stores.
pub fn is_surrogate(code: u32) -> bool {
    (SURROGATE_START..=SURROGATE_END).contains(&code)
}

/// Property name in `DerivedNormalizationProps.txt` listing code points never
/// produced by canonical composition.
pub const FULL_COMPOSITION_EXCLUSION: &str = "Full_Composition_Exclusion";

/// U+00AD SOFT HYPHEN. A format character, but not zero width in
/// preformatted text: it marks a hyphen inserted to allow a line break.
pub const SOFT_HYPHEN: u32 = 0x00AD;

/// U+1160 HANGUL JUNGSEONG FILLER, first of the conjoining medial vowels and
/// final consonants that render as part of the preceding syllable.
pub const HANGUL_JUNGSEONG_FILLER: u32 = 0x1160;

/// U+11FF HANGUL JONGSEONG SSANGNIEUN, last of the conjoining jamo after
/// [`HANGUL_JUNGSEONG_FILLER`].
pub const HANGUL_JONGSEONG_SSANGNIEUN: u32 = 0x11FF;

pub const LATIN_CAPITAL_LETTER_A: u32 = 0x0041;
pub const LATIN_SMALL_LETTER_A: u32 = 0x0061;
pub const LATIN_CAPITAL_LETTER_S: u32 = 0x0053;
pub const LATIN_SMALL_LETTER_SHARP_S: u32 = 0x00DF;
pub const LATIN_CAPITAL_LETTER_A_WITH_GRAVE: u32 = 0x00C0;
pub const LATIN_SMALL_LETTER_I: u32 = 0x0069;
pub const LATIN_CAPITAL_LETTER_I_WITH_DOT_ABOVE: u32 = 0x0130;
pub const COMBINING_GRAVE_ACCENT: u32 = 0x0300;
pub const COMBINING_DOT_ABOVE: u32 = 0x0307;
pub const IDEOGRAPHIC_SPACE: u32 = 0x3000;
