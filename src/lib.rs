//! A crate that compiles Unicode Character Database tables into sorted,
//! coalesced interval tables, and answers classification questions against
//! them.

pub mod case_mapping;
pub mod code_point_table;
pub mod compile;
pub mod config;
pub mod constants;
pub mod decomposition;
pub mod east_asian_width;
pub mod error;
pub mod fields;
pub mod general_category;
pub mod interval;
pub mod properties;
pub mod query;
pub mod serialize;
pub mod source;
pub mod special_casing;
pub mod types;
pub mod width;

#[cfg(test)]
mod test_data;

pub use compile::{compile, CompiledUcd};
pub use config::CompileOptions;
pub use error::{Error, Result};
pub use source::{UcdFile, UcdSources};
