//! Common types used across this crate, with meaning not defined within a
//! specific module.

use std::collections::BTreeMap;

/// A Unicode code point value in `0..=0x10FFFF`, never a surrogate once it
/// reaches a compiled table.
pub type CodePoint = u32;

/// The target of a case mapping: up to three code points, right-padded with
/// [`NULL_PADDING`](crate::constants::NULL_PADDING).
pub type CaseTarget = [CodePoint; 3];

/// A mapping from code points to their case-mapped form (lowercase,
/// uppercase or titlecase as stated in context).
pub type CaseMap = BTreeMap<CodePoint, CaseTarget>;

/// A mapping from code points to a single level of decomposition.
pub type DecompositionMap = BTreeMap<CodePoint, Vec<CodePoint>>;

/// A mapping from the first code point of a canonical pair to every
/// `(second, composite)` it combines into.
pub type CompositionTable = BTreeMap<CodePoint, Vec<(CodePoint, CodePoint)>>;
