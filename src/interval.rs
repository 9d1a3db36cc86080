//! Ordered tables of closed code point intervals.
//!
//! Every compiled table is an [`IntervalTable`]: intervals sorted ascending by
//! `lo`, pairwise disjoint, and maximally coalesced, so that no two
//! contiguous intervals carry an equal payload.  Binary search in
//! [`crate::query`] relies on all three properties.

use crate::constants::{is_surrogate, MAX_CODE_POINT, SURROGATE_END, SURROGATE_START};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt::Debug;

/// The closed interval `lo..=hi`, carrying a payload shared by every code
/// point within it.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct Interval<P = ()> {
    pub lo: u32,
    pub hi: u32,
    pub payload: P,
}

impl<P> Interval<P> {
    pub fn new(lo: u32, hi: u32, payload: P) -> Interval<P> {
        assert!(lo <= hi, "empty interval U+{:04X}..U+{:04X}", lo, hi);
        Interval { lo, hi, payload }
    }

    pub fn contains(&self, code: u32) -> bool {
        self.lo <= code && code <= self.hi
    }

    /// Order this interval against `code` for binary search: `Equal` when
    /// `code` falls inside it, `Less` when it lies wholly below `code`, and
    /// `Greater` when it lies wholly above.
    pub fn cmp_code_point(&self, code: u32) -> Ordering {
        if self.contains(code) {
            Ordering::Equal
        } else if self.hi < code {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// A sorted, disjoint, maximally coalesced sequence of intervals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalTable<P = ()> {
    intervals: Vec<Interval<P>>,
}

impl<P> IntervalTable<P> {
    pub fn new() -> IntervalTable<P> {
        IntervalTable { intervals: vec![] }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval<P>> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval<P>] {
        &self.intervals
    }

    /// Index of the interval containing `code`, if any.
    pub fn position(&self, code: u32) -> Option<usize> {
        self.intervals
            .binary_search_by(|interval| interval.cmp_code_point(code))
            .ok()
    }

    /// Expand the table back into its discrete code points, ascending.
    pub fn ungroup_cat(&self) -> impl Iterator<Item = u32> + '_ {
        self.intervals.iter().flat_map(|interval| interval.lo..=interval.hi)
    }

    /// The number of code points covered by the table.
    pub fn code_point_count(&self) -> usize {
        self.intervals
            .iter()
            .map(|interval| (interval.hi - interval.lo) as usize + 1)
            .sum()
    }

    /// Every code point not covered by this table, excluding surrogates.
    pub fn complement(&self) -> IntervalTable {
        let mut gaps = vec![];
        let mut next = 0u32;
        for interval in &self.intervals {
            if interval.lo > next {
                push_excluding_surrogates(&mut gaps, next, interval.lo - 1);
            }
            next = interval.hi + 1;
        }
        if next <= MAX_CODE_POINT {
            push_excluding_surrogates(&mut gaps, next, MAX_CODE_POINT);
        }
        IntervalTable { intervals: gaps }
    }

    /// Remove the single code point `code`, splitting its containing interval
    /// into the zero, one, or two pieces left over.  Neighboring intervals
    /// are untouched; a code point outside the table is a no-op.
    pub fn remove_point(&mut self, code: u32)
    where
        P: Clone,
    {
        let index = match self.position(code) {
            Some(index) => index,
            None => return,
        };

        let Interval { lo, hi, payload } = self.intervals.remove(index);
        let mut pieces = Vec::with_capacity(2);
        if lo < code {
            pieces.push(Interval::new(lo, code - 1, payload.clone()));
        }
        if code < hi {
            pieces.push(Interval::new(code + 1, hi, payload));
        }
        self.intervals.splice(index..index, pieces);
    }
}

impl<P: PartialEq + Debug> IntervalTable<P> {
    /// Build a table from intervals in any order.  The intervals must not
    /// overlap; contiguous intervals with equal payload are merged.
    pub fn from_intervals(mut intervals: Vec<Interval<P>>) -> IntervalTable<P> {
        intervals.sort_by_key(|interval| interval.lo);
        for (a, b) in intervals.iter().tuple_windows() {
            assert!(
                a.hi < b.lo,
                "overlapping intervals U+{:04X}..U+{:04X} and U+{:04X}..U+{:04X}",
                a.lo,
                a.hi,
                b.lo,
                b.hi
            );
        }

        let mut table = IntervalTable { intervals };
        table.coalesce_adjacent();
        table
    }

    /// Merge, in a single left-to-right pass, consecutive intervals that are
    /// contiguous and carry an equal payload.
    pub fn coalesce_adjacent(&mut self) {
        let intervals = std::mem::take(&mut self.intervals);
        self.intervals = intervals
            .into_iter()
            .coalesce(|a, b| {
                if a.hi + 1 == b.lo && a.payload == b.payload {
                    Ok(Interval {
                        lo: a.lo,
                        hi: b.hi,
                        payload: a.payload,
                    })
                } else {
                    Err((a, b))
                }
            })
            .collect();
    }

    /// Panic unless the table is sorted, disjoint and maximally coalesced,
    /// and stores no surrogate.
    pub fn check_invariants(&self) {
        for interval in &self.intervals {
            assert!(interval.lo <= interval.hi, "empty interval {:?}", interval);
            assert!(interval.hi <= MAX_CODE_POINT, "out of range {:?}", interval);
            assert!(
                interval.hi < SURROGATE_START || interval.lo > SURROGATE_END,
                "surrogates stored in {:?}",
                interval
            );
        }
        for (a, b) in self.intervals.iter().tuple_windows() {
            assert!(a.hi < b.lo, "unsorted or overlapping {:?} and {:?}", a, b);
            assert!(
                a.hi + 1 != b.lo || a.payload != b.payload,
                "uncoalesced {:?} and {:?}",
                a,
                b
            );
        }
    }
}

impl<P> Default for IntervalTable<P> {
    fn default() -> IntervalTable<P> {
        IntervalTable::new()
    }
}

impl<'a, P> IntoIterator for &'a IntervalTable<P> {
    type Item = &'a Interval<P>;
    type IntoIter = std::slice::Iter<'a, Interval<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

fn push_excluding_surrogates(out: &mut Vec<Interval>, lo: u32, hi: u32) {
    if hi < SURROGATE_START || lo > SURROGATE_END {
        out.push(Interval::new(lo, hi, ()));
        return;
    }
    if lo < SURROGATE_START {
        out.push(Interval::new(lo, SURROGATE_START - 1, ()));
    }
    if hi > SURROGATE_END {
        out.push(Interval::new(SURROGATE_END + 1, hi, ()));
    }
}

/// Coalesce a set of discrete code points into an interval table.
///
/// Points are sorted first; afterward each must be strictly greater than the
/// end of the interval being built, so a code point listed twice is a bug in
/// upstream data assumptions and panics.
pub fn group_cat<I>(points: I) -> IntervalTable
where
    I: IntoIterator<Item = u32>,
{
    let mut intervals: Vec<Interval> = vec![];
    for code in points.into_iter().sorted_unstable() {
        match intervals.last_mut() {
            Some(last) => {
                assert!(
                    code > last.hi,
                    "duplicate code point U+{:04X} in category",
                    code
                );
                if code == last.hi + 1 {
                    last.hi = code;
                } else {
                    intervals.push(Interval::new(code, code, ()));
                }
            }
            None => intervals.push(Interval::new(code, code, ())),
        }
    }
    IntervalTable { intervals }
}

/// Merge per-value tables into a single value table sorted by `lo`, each
/// interval carrying the key of the table it came from.
pub fn to_value_table<'a, K, I>(tables: I) -> IntervalTable<K>
where
    K: Clone + PartialEq + Debug + 'a,
    I: IntoIterator<Item = (&'a K, &'a IntervalTable)>,
{
    let intervals = tables
        .into_iter()
        .flat_map(|(value, table)| {
            table
                .iter()
                .map(move |interval| Interval::new(interval.lo, interval.hi, value.clone()))
        })
        .collect();
    IntervalTable::from_intervals(intervals)
}

/// Drop surrogates from a stream of code points.
pub fn without_surrogates<I>(points: I) -> impl Iterator<Item = u32>
where
    I: IntoIterator<Item = u32>,
{
    points.into_iter().filter(|code| !is_surrogate(*code))
}

#[cfg(test)]
fn ranges<P: Clone>(table: &IntervalTable<P>) -> Vec<(u32, u32, P)> {
    table
        .iter()
        .map(|interval| (interval.lo, interval.hi, interval.payload.clone()))
        .collect()
}

#[cfg(test)]
fn width_table(ranges: &[(u32, u32, (u8, u8))]) -> IntervalTable<(u8, u8)> {
    IntervalTable::from_intervals(
        ranges
            .iter()
            .map(|&(lo, hi, payload)| Interval::new(lo, hi, payload))
            .collect(),
    )
}

#[test]
fn test_group_cat() {
    let table = group_cat(vec![5, 1, 2, 3, 9, 10, 0x10FFFF]);
    assert_eq!(
        ranges(&table),
        [(1, 3, ()), (5, 5, ()), (9, 10, ()), (0x10FFFF, 0x10FFFF, ())]
    );
    table.check_invariants();

    assert!(group_cat(vec![]).is_empty());
}

#[test]
#[should_panic(expected = "duplicate code point U+0041")]
fn test_group_cat_rejects_duplicates() {
    group_cat(vec![0x41, 0x42, 0x41]);
}

#[test]
fn test_group_ungroup_idempotent() {
    let table = group_cat(vec![0x30, 0x31, 0x32, 0x41, 0x5A, 0x5B, 0x1F600]);
    let again = group_cat(table.ungroup_cat().collect::<Vec<u32>>());
    assert_eq!(table, again);
    assert_eq!(table.code_point_count(), 7);
}

#[test]
fn test_position() {
    let table = group_cat(vec![1, 2, 3, 10, 20, 21]);
    assert_eq!(table.position(0), None);
    assert_eq!(table.position(2), Some(0));
    assert_eq!(table.position(10), Some(1));
    assert_eq!(table.position(15), None);
    assert_eq!(table.position(21), Some(2));
    assert_eq!(table.position(22), None);
}

#[test]
fn test_complement_skips_surrogates() {
    let assigned = group_cat(vec![0, 0x41, 0xD7FF, 0xE000]);
    let complement = assigned.complement();
    assert_eq!(
        ranges(&complement),
        [
            (1, 0x40, ()),
            (0x42, 0xD7FE, ()),
            (0xE001, MAX_CODE_POINT, ()),
        ]
    );
    complement.check_invariants();

    let everything = IntervalTable::<()>::new().complement();
    assert_eq!(
        ranges(&everything),
        [(0, 0xD7FF, ()), (0xE000, MAX_CODE_POINT, ())]
    );
}

#[test]
fn test_remove_point_inside() {
    let mut table = width_table(&[(0x10, 0x20, (2, 2)), (0x30, 0x30, (1, 2))]);
    table.remove_point(0x15);
    assert_eq!(
        ranges(&table),
        [
            (0x10, 0x14, (2, 2)),
            (0x16, 0x20, (2, 2)),
            (0x30, 0x30, (1, 2))
        ]
    );
}

#[test]
fn test_remove_point_endpoints() {
    let mut table = width_table(&[(0x10, 0x20, (2, 2))]);
    table.remove_point(0x10);
    assert_eq!(ranges(&table), [(0x11, 0x20, (2, 2))]);
    table.remove_point(0x20);
    assert_eq!(ranges(&table), [(0x11, 0x1F, (2, 2))]);
}

#[test]
fn test_remove_point_singleton_and_absent() {
    let mut table = width_table(&[(0x05, 0x06, (1, 2)), (0xAD, 0xAD, (0, 0)), (0xB0, 0xB1, (1, 2))]);
    table.remove_point(0xAD);
    assert_eq!(ranges(&table), [(0x05, 0x06, (1, 2)), (0xB0, 0xB1, (1, 2))]);

    table.remove_point(0x99);
    assert_eq!(ranges(&table), [(0x05, 0x06, (1, 2)), (0xB0, 0xB1, (1, 2))]);
}

#[test]
fn test_coalesce_adjacent_compares_whole_payload() {
    let table = width_table(&[
        (0x3000, 0x3000, (2, 2)),
        (0x3001, 0x3003, (2, 2)),
        (0x3004, 0x3004, (1, 2)),
        (0x3005, 0x3005, (2, 2)),
        (0x3007, 0x3007, (2, 2)),
    ]);
    assert_eq!(
        ranges(&table),
        [
            (0x3000, 0x3003, (2, 2)),
            (0x3004, 0x3004, (1, 2)),
            (0x3005, 0x3005, (2, 2)),
            (0x3007, 0x3007, (2, 2)),
        ]
    );
    table.check_invariants();
}

#[test]
#[should_panic(expected = "overlapping")]
fn test_from_intervals_rejects_overlap() {
    width_table(&[(0x10, 0x20, (2, 2)), (0x20, 0x30, (1, 2))]);
}

#[test]
#[should_panic(expected = "surrogates")]
fn test_check_invariants_rejects_surrogates() {
    group_cat(vec![0xD800]).check_invariants();
}

#[test]
fn test_to_value_table() {
    let a = group_cat(vec![1, 2, 10]);
    let b = group_cat(vec![3, 4]);
    let keys = ["a".to_string(), "b".to_string()];
    let table = to_value_table(vec![(&keys[0], &a), (&keys[1], &b)]);
    assert_eq!(
        ranges(&table),
        [
            (1, 2, "a".to_string()),
            (3, 4, "b".to_string()),
            (10, 10, "a".to_string())
        ]
    );
}
