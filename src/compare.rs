//! The ordering and matching contract shared by the tree and the catalogue.
//!
//! Two separate capabilities rather than one overridable class: a
//! [`Comparator`] fixes how a
//! tree orders resident records (chosen once, at construction), while a
//! [`Criterion`] is a per-search object that drives descent and decides what
//! counts as "found". The two predicates are deliberately independent — a
//! specialized criterion may match at a position its ordering would not call
//! equal.

use core::cmp::Ordering;

/// The ordinal key: unique, auto-assigned, strictly increasing with each
/// insertion, never reused.
pub type Key = i64;

/// A borrowed view of one record, as handed to comparators and criteria.
#[derive(Clone, Copy)]
pub struct Entry<'a, T> {
    pub key: Key,
    pub value: &'a T,
}

/// Ordering between resident records; fixes a tree's structure.
///
/// `compare` must be a strict total preorder that stays consistent for the
/// tree's lifetime — changing the effective ordering mid-lifetime breaks the
/// search invariant.
pub trait Comparator<T> {
    /// Three-way ordering between two records.
    fn compare(&self, a: Entry<'_, T>, b: Entry<'_, T>) -> Ordering;

    /// Whether `probe` counts as a duplicate of resident `node` during
    /// insertion. Defaults to ordering equality.
    fn matches(&self, probe: Entry<'_, T>, node: Entry<'_, T>) -> bool {
        self.compare(probe, node) == Ordering::Equal
    }
}

/// The default ordering: by ordinal key.
///
/// Keys are assigned monotonically, so under this ordering every insertion
/// lands at the far right and duplicates never arise.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyOrder;

impl<T> Comparator<T> for KeyOrder {
    fn compare(&self, a: Entry<'_, T>, b: Entry<'_, T>) -> Ordering {
        a.key.cmp(&b.key)
    }
}

/// The found-decision for a search: does this record satisfy the criterion?
pub trait Matcher<T> {
    fn matches(&self, entry: Entry<'_, T>) -> bool;
}

/// A matcher that can also steer ordered descent through a tree.
pub trait Criterion<T>: Matcher<T> {
    /// How the search target orders against `entry`: `Less` descends left,
    /// `Greater` descends right.
    fn compare(&self, entry: Entry<'_, T>) -> Ordering;
}

/// Criterion matching a record's ordinal key, with key-ordered descent.
#[derive(Clone, Copy, Debug)]
pub struct KeyCriterion(pub Key);

impl<T> Matcher<T> for KeyCriterion {
    fn matches(&self, entry: Entry<'_, T>) -> bool {
        entry.key == self.0
    }
}

impl<T> Criterion<T> for KeyCriterion {
    fn compare(&self, entry: Entry<'_, T>) -> Ordering {
        self.0.cmp(&entry.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_order_compares_by_key() {
        let a = Entry { key: 1, value: &"b" };
        let b = Entry { key: 2, value: &"a" };
        assert_eq!(Comparator::<&str>::compare(&KeyOrder, a, b), Ordering::Less);
        assert_eq!(Comparator::<&str>::compare(&KeyOrder, b, a), Ordering::Greater);
        assert!(Comparator::<&str>::matches(&KeyOrder, a, a));
        assert!(!Comparator::<&str>::matches(&KeyOrder, a, b));
    }

    #[test]
    fn key_criterion_is_independent_of_payload() {
        let criterion = KeyCriterion(7);
        let hit = Entry { key: 7, value: &() };
        let miss = Entry { key: 8, value: &() };
        assert!(criterion.matches(hit));
        assert!(!criterion.matches(miss));
        assert_eq!(Criterion::<()>::compare(&criterion, miss), Ordering::Less);
    }
}
