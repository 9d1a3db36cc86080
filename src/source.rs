//! The named UCD tables consumed by the compiler, and reading them from a
//! local copy of the UCD directory.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A UCD source table, identified by its path relative to the UCD root.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum UcdFile {
    UnicodeData,
    SpecialCasing,
    DerivedCoreProperties,
    PropList,
    Scripts,
    DerivedNormalizationProps,
    EastAsianWidth,
    GraphemeBreakProperty,
}

impl UcdFile {
    /// Every table the compiler reads.
    pub const ALL: [UcdFile; 8] = [
        UcdFile::UnicodeData,
        UcdFile::SpecialCasing,
        UcdFile::DerivedCoreProperties,
        UcdFile::PropList,
        UcdFile::Scripts,
        UcdFile::DerivedNormalizationProps,
        UcdFile::EastAsianWidth,
        UcdFile::GraphemeBreakProperty,
    ];

    pub fn path(self) -> &'static str {
        match self {
            UcdFile::UnicodeData => "UnicodeData.txt",
            UcdFile::SpecialCasing => "SpecialCasing.txt",
            UcdFile::DerivedCoreProperties => "DerivedCoreProperties.txt",
            UcdFile::PropList => "PropList.txt",
            UcdFile::Scripts => "Scripts.txt",
            UcdFile::DerivedNormalizationProps => "DerivedNormalizationProps.txt",
            UcdFile::EastAsianWidth => "EastAsianWidth.txt",
            UcdFile::GraphemeBreakProperty => "auxiliary/GraphemeBreakProperty.txt",
        }
    }
}

impl fmt::Display for UcdFile {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.path())
    }
}

/// The text of each source table, already available locally.
#[derive(Clone, Debug, Default)]
pub struct UcdSources {
    texts: BTreeMap<UcdFile, String>,
}

impl UcdSources {
    pub fn new() -> UcdSources {
        UcdSources::default()
    }

    /// Read every table in [`UcdFile::ALL`] from the UCD directory `dir`.
    /// Any unreadable table fails the whole read.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<UcdSources> {
        let dir = dir.as_ref();
        let mut sources = UcdSources::new();
        for file in UcdFile::ALL.iter() {
            let path = dir.join(file.path());
            let text = std::fs::read_to_string(&path).map_err(|source| Error::Io { path, source })?;
            sources.texts.insert(*file, text);
        }
        Ok(sources)
    }

    pub fn with<S: Into<String>>(mut self, file: UcdFile, text: S) -> UcdSources {
        self.texts.insert(file, text.into());
        self
    }

    pub fn text(&self, file: UcdFile) -> Result<&str> {
        self.texts
            .get(&file)
            .map(String::as_str)
            .ok_or(Error::MissingSource(file))
    }

    /// Fail with the first table in [`UcdFile::ALL`] that was never supplied.
    pub fn check_complete(&self) -> Result<()> {
        for file in UcdFile::ALL.iter() {
            self.text(*file)?;
        }
        Ok(())
    }
}

#[test]
fn from_dir_reports_unreadable_table() {
    let dir = std::env::temp_dir().join("ucd_tables-no-such-ucd-directory");
    match UcdSources::from_dir(&dir) {
        Err(Error::Io { path, .. }) => assert_eq!(path, dir.join("UnicodeData.txt")),
        other => panic!("expected an I/O error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn from_dir_reads_every_table() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/data");
    let sources = UcdSources::from_dir(&dir).unwrap();
    sources.check_complete().unwrap();
    assert!(sources
        .text(UcdFile::GraphemeBreakProperty)
        .unwrap()
        .contains("Extend"));
}

#[test]
fn check_complete_names_missing_table() {
    let sources = UcdSources::new()
        .with(UcdFile::UnicodeData, "")
        .with(UcdFile::SpecialCasing, "");
    match sources.check_complete() {
        Err(Error::MissingSource(file)) => assert_eq!(file, UcdFile::DerivedCoreProperties),
        other => panic!("expected a missing table, got {:?}", other),
    }
}
