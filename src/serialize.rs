//! The abstract serialized form of compiled tables: for each named table, an
//! ordered list of `(lo, hi[, payload])` rows.
//!
//! Rows are plain data and derive `serde` traits when the `serde` feature is
//! enabled.  A table can also be rendered as a token stream, a slice
//! expression of `char`-literal tuples, by way of [`quote::ToTokens`].

use crate::compile::CompiledUcd;
use crate::config::CharWidth;
use crate::interval::IntervalTable;
use crate::types::{CaseTarget, CompositionTable, DecompositionMap};
use proc_macro2::{Literal, TokenStream};
use quote::quote;

/// The data carried by one row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// A row of a plain membership table.
    None,
    Width { non_cjk: u8, cjk: u8 },
    CombiningClass(u8),
    /// A named property value, e.g. a grapheme cluster break category.
    Value(String),
    /// A case mapping, null-padded.
    Mapping(CaseTarget),
    /// A decomposition.
    Sequence(Vec<u32>),
    /// Every `(second, composite)` pair composing with the row's code point.
    Composition(Vec<(u32, u32)>),
}

/// The closed interval `lo..=hi` and its payload.  Keyed tables (case
/// mappings, decompositions, compositions) have `lo == hi` in every row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRow {
    pub lo: u32,
    pub hi: u32,
    pub payload: Payload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerializedTable {
    pub name: String,
    pub rows: Vec<TableRow>,
}

fn interval_rows<P, F>(table: &IntervalTable<P>, mut payload: F) -> Vec<TableRow>
where
    F: FnMut(&P) -> Payload,
{
    table
        .iter()
        .map(|interval| TableRow {
            lo: interval.lo,
            hi: interval.hi,
            payload: payload(&interval.payload),
        })
        .collect()
}

fn keyed_rows<'a, P, I, F>(entries: I, mut payload: F) -> Vec<TableRow>
where
    P: 'a,
    I: IntoIterator<Item = (&'a u32, &'a P)>,
    F: FnMut(&P) -> Payload,
{
    entries
        .into_iter()
        .map(|(&code, value)| TableRow {
            lo: code,
            hi: code,
            payload: payload(value),
        })
        .collect()
}

fn table(name: String, rows: Vec<TableRow>) -> SerializedTable {
    SerializedTable { name, rows }
}

fn membership_tables<'a, I>(prefix: &str, tables: I) -> impl Iterator<Item = SerializedTable> + 'a
where
    I: IntoIterator<Item = (&'a String, &'a IntervalTable)>,
    I::IntoIter: 'a,
{
    let prefix = prefix.to_string();
    tables.into_iter().map(move |(name, intervals)| {
        table(
            format!("{}::{}", prefix, name),
            interval_rows(intervals, |_| Payload::None),
        )
    })
}

fn decomposition_table(name: &str, map: &DecompositionMap) -> SerializedTable {
    table(
        name.to_string(),
        keyed_rows(map, |codes: &Vec<u32>| Payload::Sequence(codes.clone())),
    )
}

fn composition_table(name: &str, compositions: &CompositionTable) -> SerializedTable {
    table(
        name.to_string(),
        keyed_rows(compositions, |pairs: &Vec<(u32, u32)>| {
            Payload::Composition(pairs.clone())
        }),
    )
}

/// Serialize every compiled table.  The output depends only on `ucd`: tables
/// come in a fixed order, named tables sorted by name within each family.
pub fn serialize(ucd: &CompiledUcd) -> Vec<SerializedTable> {
    let mut tables = vec![];

    tables.extend(membership_tables("general_category", &ucd.general_categories));
    tables.push(table(
        "combining_class".to_string(),
        interval_rows(&ucd.combining_classes, |class| Payload::CombiningClass(*class)),
    ));
    tables.extend(membership_tables("derived_property", &ucd.derived_properties));
    tables.extend(membership_tables("property", &ucd.properties));
    tables.extend(membership_tables("script", &ucd.scripts));
    tables.push(table(
        "grapheme".to_string(),
        interval_rows(&ucd.grapheme_categories, |value| Payload::Value(value.clone())),
    ));

    for (name, case_table) in [
        ("conversions::to_lower", &ucd.case_tables.to_lower),
        ("conversions::to_upper", &ucd.case_tables.to_upper),
        ("conversions::to_title", &ucd.case_tables.to_title),
    ]
    .iter()
    {
        let rows = case_table
            .iter()
            .map(|&(code, target)| TableRow {
                lo: code,
                hi: code,
                payload: Payload::Mapping(target),
            })
            .collect();
        tables.push(table(name.to_string(), rows));
    }

    tables.push(table(
        "normalization::composition_exclusions".to_string(),
        interval_rows(&ucd.composition_exclusions, |_| Payload::None),
    ));
    tables.push(decomposition_table(
        "normalization::canonical",
        &ucd.decompositions.canonical,
    ));
    tables.push(decomposition_table(
        "normalization::compatibility",
        &ucd.decompositions.compatibility,
    ));
    tables.push(composition_table(
        "normalization::composition",
        &ucd.compositions,
    ));

    tables.push(table(
        "charwidth".to_string(),
        interval_rows(&ucd.widths, |&CharWidth { non_cjk, cjk }| Payload::Width {
            non_cjk,
            cjk,
        }),
    ));

    tables
}

/// A code point as a `char` literal.  Surrogates are never stored, so the
/// integer fallback only guards against corrupt input.
fn code_literal(code: u32) -> Literal {
    match std::char::from_u32(code) {
        Some(c) => Literal::character(c),
        None => Literal::u32_unsuffixed(code),
    }
}

fn code_list(codes: &[u32]) -> TokenStream {
    let codes = codes.iter().map(|&code| code_literal(code));
    quote! { &[#(#codes),*] }
}

impl quote::ToTokens for TableRow {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let lo = code_literal(self.lo);
        let hi = code_literal(self.hi);

        let code = match &self.payload {
            Payload::None => quote! { (#lo, #hi) },
            Payload::Width { non_cjk, cjk } => {
                let non_cjk = Literal::u8_unsuffixed(*non_cjk);
                let cjk = Literal::u8_unsuffixed(*cjk);
                quote! { (#lo, #hi, #non_cjk, #cjk) }
            }
            Payload::CombiningClass(class) => {
                let class = Literal::u8_unsuffixed(*class);
                quote! { (#lo, #hi, #class) }
            }
            Payload::Value(value) => quote! { (#lo, #hi, #value) },
            Payload::Mapping(target) => {
                let target = target.iter().map(|&code| code_literal(code));
                quote! { (#lo, [#(#target),*]) }
            }
            Payload::Sequence(codes) => {
                let codes = code_list(codes);
                quote! { (#lo, #codes) }
            }
            Payload::Composition(pairs) => {
                let pairs = pairs.iter().map(|&(second, composite)| {
                    let second = code_literal(second);
                    let composite = code_literal(composite);
                    quote! { (#second, #composite) }
                });
                quote! { (#lo, &[#(#pairs),*]) }
            }
        };
        tokens.extend(code);
    }
}

impl quote::ToTokens for SerializedTable {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let rows = &self.rows;
        tokens.extend(quote! { &[#(#rows),*] });
    }
}

#[cfg(test)]
use crate::compile::compile;
#[cfg(test)]
use crate::config::CompileOptions;
#[cfg(test)]
use crate::test_data::sources;
#[cfg(test)]
use quote::ToTokens;

#[cfg(test)]
fn compiled_tables() -> Vec<SerializedTable> {
    serialize(&compile(&sources(), &CompileOptions::default()).unwrap())
}

#[cfg(test)]
fn find<'a>(tables: &'a [SerializedTable], name: &str) -> &'a SerializedTable {
    tables
        .iter()
        .find(|table| table.name == name)
        .unwrap_or_else(|| panic!("no table named {}", name))
}

#[cfg(test)]
fn expr_elements(expr: syn::Expr) -> Vec<syn::Expr> {
    match expr {
        syn::Expr::Reference(reference) => match *reference.expr {
            syn::Expr::Array(array) => array.elems.into_iter().collect(),
            other => panic!("expected an array, got {:?}", other.to_token_stream().to_string()),
        },
        other => panic!("expected a reference, got {:?}", other.to_token_stream().to_string()),
    }
}

#[cfg(test)]
fn char_value(expr: &syn::Expr) -> char {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Char(c),
            ..
        }) => c.value(),
        other => panic!("expected a char, got {:?}", other.to_token_stream().to_string()),
    }
}

#[test]
fn check_table_names() {
    let tables = compiled_tables();
    let names = tables.iter().map(|table| table.name.as_str()).collect::<Vec<_>>();

    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), names.len());

    assert_eq!(names[0], "general_category::C");
    assert!(names.contains(&"general_category::Cn"));
    assert!(!names.contains(&"general_category::Assigned"));
    assert!(names.contains(&"derived_property::XID_Start"));
    assert!(names.contains(&"property::White_Space"));
    assert!(names.contains(&"script::Latin"));
    assert!(names.contains(&"conversions::to_title"));
    assert_eq!(names.last(), Some(&"charwidth"));
}

#[test]
fn check_serialization_deterministic() {
    assert_eq!(compiled_tables(), compiled_tables());
}

#[test]
fn check_rows() {
    let tables = compiled_tables();

    let lu = find(&tables, "general_category::Lu");
    assert_eq!(
        lu.rows[0],
        TableRow {
            lo: 0x41,
            hi: 0x42,
            payload: Payload::None
        }
    );

    let widths = find(&tables, "charwidth");
    assert_eq!(widths.rows.len(), 15);
    assert_eq!(
        widths.rows[0].payload,
        Payload::Width { non_cjk: 1, cjk: 2 }
    );

    let upper = find(&tables, "conversions::to_upper");
    let sharp_s = upper.rows.iter().find(|row| row.lo == 0xDF).unwrap();
    assert_eq!(sharp_s.payload, Payload::Mapping([0x53, 0x53, 0]));
    assert!(upper.rows.iter().all(|row| row.lo == row.hi));

    let grapheme = find(&tables, "grapheme");
    assert!(grapheme
        .rows
        .iter()
        .any(|row| row.payload == Payload::Value("Extend".to_string())));
}

#[test]
fn check_interval_tokens() {
    let tables = compiled_tables();
    let widths = find(&tables, "charwidth");

    let expr = syn::parse2::<syn::Expr>(widths.to_token_stream()).unwrap();
    let rows = expr_elements(expr);
    assert_eq!(rows.len(), widths.rows.len());

    match &rows[0] {
        syn::Expr::Tuple(tuple) => {
            assert_eq!(tuple.elems.len(), 4);
            assert_eq!(char_value(&tuple.elems[0]), '\u{A1}');
            assert_eq!(char_value(&tuple.elems[1]), '\u{A1}');
        }
        other => panic!("expected a tuple, got {:?}", other.to_token_stream().to_string()),
    }
}

#[test]
fn check_keyed_tokens() {
    let tables = compiled_tables();

    for name in &[
        "conversions::to_lower",
        "normalization::canonical",
        "normalization::composition",
        "grapheme",
        "combining_class",
    ] {
        let table = find(&tables, name);
        let expr = syn::parse2::<syn::Expr>(table.to_token_stream()).unwrap();
        assert_eq!(expr_elements(expr).len(), table.rows.len(), "{}", name);
    }

    let composition = find(&tables, "normalization::composition");
    let rows = expr_elements(syn::parse2::<syn::Expr>(composition.to_token_stream()).unwrap());
    match &rows[0] {
        syn::Expr::Tuple(tuple) => {
            assert_eq!(char_value(&tuple.elems[0]), 'A');
            let pairs = expr_elements(tuple.elems[1].clone());
            assert_eq!(pairs.len(), 1);
        }
        other => panic!("expected a tuple, got {:?}", other.to_token_stream().to_string()),
    }
}

#[test]
fn check_empty_table_tokens() {
    let empty = SerializedTable {
        name: "empty".to_string(),
        rows: vec![],
    };
    let expr = syn::parse2::<syn::Expr>(empty.to_token_stream()).unwrap();
    assert!(expr_elements(expr).is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn check_serde_format() {
    let table = SerializedTable {
        name: "charwidth".to_string(),
        rows: vec![
            TableRow {
                lo: 0x1100,
                hi: 0x115F,
                payload: Payload::Width { non_cjk: 2, cjk: 2 },
            },
            TableRow {
                lo: 0xDF,
                hi: 0xDF,
                payload: Payload::Mapping([0x53, 0x53, 0]),
            },
            TableRow {
                lo: 0x41,
                hi: 0x5A,
                payload: Payload::None,
            },
        ],
    };

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "charwidth",
            "rows": [
                { "lo": 0x1100, "hi": 0x115F, "payload": { "Width": { "non_cjk": 2, "cjk": 2 } } },
                { "lo": 0xDF, "hi": 0xDF, "payload": { "Mapping": [0x53, 0x53, 0] } },
                { "lo": 0x41, "hi": 0x5A, "payload": "None" },
            ]
        })
    );

    let back = serde_json::from_value::<SerializedTable>(json).unwrap();
    assert_eq!(back, table);
}
