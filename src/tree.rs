//! The self-balancing ordinal-keyed search tree.
//!
//! Records are stored under an auto-assigned, strictly increasing ordinal
//! [`Key`]. The tree keeps itself height-balanced after every insertion via
//! single and double rotations that propagate from the mutated node up to the
//! root, and exposes a single mutable cursor for ordered traversal and search.
//!
//! The structure is add-only: there is no delete operation, and a node, once
//! attached, lives for the tree's lifetime. Ordering is pluggable through a
//! [`Comparator`] fixed at construction; searches are driven by per-call
//! [`Criterion`] objects, whose match predicate is independent of their
//! ordering (a specialized criterion may match at a position its ordering
//! would not call equal).
//!
//! # Example
//!
//! ```
//! use lexitree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//! let first = tree.insert("alpha");
//! let second = tree.insert("beta");
//!
//! assert!(tree.find_by_key(first));
//! assert_eq!(tree.current_value(), Some(&"alpha"));
//!
//! assert!(tree.move_last());
//! assert_eq!(tree.current_key(), Some(second));
//! assert!(tree.eol());
//! ```

use core::cmp::Ordering;

use log::{debug, trace};

use crate::compare::{Comparator, Criterion, Entry, Key, KeyCriterion, KeyOrder};
use crate::raw::{Arena, NodeId, TreeNode};
use crate::stats::{Stats, TraceOptions};

/// Where an insertion descent came to rest.
enum Landing {
    /// An existing record the comparator's match predicate claimed as a
    /// duplicate; the new node splices in above it.
    Duplicate(NodeId),
    /// A dead end; the new node attaches as a child of this node, on the side
    /// given by the final comparison (`Equal` resolves to the right).
    DeadEnd(NodeId, Ordering),
}

/// A self-balancing ordered binary search tree with a single mutable cursor.
///
/// Single-writer: all mutation and cursor movement is synchronous and
/// unsynchronized; concurrent callers must serialize access themselves.
pub struct BalancedTree<T, C = KeyOrder> {
    nodes: Arena<TreeNode<T>>,
    root: Option<NodeId>,
    /// Minimum-key node, tracked incrementally so `move_first` is O(1).
    leftmost: Option<NodeId>,
    /// Maximum-key node, tracked incrementally so `move_last` and `eol` are O(1).
    rightmost: Option<NodeId>,
    cursor: Option<NodeId>,
    comparator: C,
    last_key: Key,
    stats: Stats,
    trace: TraceOptions,
}

impl<T> BalancedTree<T> {
    /// Creates an empty tree ordered by ordinal key.
    pub fn new() -> Self {
        Self::with_comparator(KeyOrder)
    }
}

impl<T> Default for BalancedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> BalancedTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// The comparator cannot be replaced once the tree holds records; its
    /// effective ordering must stay consistent for the tree's lifetime.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            leftmost: None,
            rightmost: None,
            cursor: None,
            comparator,
            last_key: 0,
            stats: Stats::default(),
            trace: TraceOptions::default(),
        }
    }

    /// The number of records in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Operation counters.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Sets the diagnostic trace gates.
    pub fn set_trace(&mut self, trace: TraceOptions) {
        self.trace = trace;
    }

    /// The ordinal key of the record under the cursor.
    pub fn current_key(&self) -> Option<Key> {
        self.cursor.map(|id| self.nodes.get(id).key)
    }

    /// The payload of the record under the cursor.
    pub fn current_value(&self) -> Option<&T> {
        self.cursor.map(|id| &self.nodes.get(id).value)
    }

    /// True iff the cursor sits on the maximum-key record.
    pub fn eol(&self) -> bool {
        self.cursor.is_some() && self.cursor == self.rightmost
    }

    // ─── Insertion ───────────────────────────────────────────────────────────

    /// Inserts a payload under the next ordinal key and returns that key.
    ///
    /// Never fails for a valid payload; arena exhaustion panics. After the
    /// insert the cursor sits on the new record and the tree is rebalanced.
    pub fn insert(&mut self, value: T) -> Key {
        self.last_key += 1;
        let key = self.last_key;
        let id = self.nodes.alloc(TreeNode::new(key, value));

        match self.root {
            None => {
                self.root = Some(id);
                self.leftmost = Some(id);
                self.rightmost = Some(id);
            }
            Some(_) => match self.locate(id) {
                Landing::Duplicate(matched) => self.splice_above(id, matched),
                Landing::DeadEnd(parent, order) => self.attach(id, parent, order),
            },
        }

        self.cursor = Some(id);
        self.stats.adds += 1;
        if self.trace.adds {
            debug!("inserted key {key}, tree now holds {} items", self.len());
        }
        key
    }

    /// Descends from the root comparing the probe node against residents,
    /// stopping at a match-predicate hit or a dead end.
    fn locate(&self, probe: NodeId) -> Landing {
        let mut current = self.root.expect("`BalancedTree::locate()` - called on an empty tree!");
        loop {
            if self.comparator.matches(self.entry(probe), self.entry(current)) {
                return Landing::Duplicate(current);
            }
            let order = self.comparator.compare(self.entry(probe), self.entry(current));
            // Equal with no match-predicate hit resolves to the right.
            let next = match order {
                Ordering::Less => self.nodes.get(current).left(),
                Ordering::Greater | Ordering::Equal => self.nodes.get(current).right(),
            };
            match next {
                Some(child) => current = child,
                None => return Landing::DeadEnd(current, order),
            }
        }
    }

    /// Attaches a fresh leaf under `parent` and rebalances up to the root.
    fn attach(&mut self, id: NodeId, parent: NodeId, order: Ordering) {
        self.nodes.get_mut(id).parent = Some(parent);
        if order == Ordering::Less {
            self.nodes.get_mut(parent).set_left(Some(id));
            if self.leftmost == Some(parent) {
                self.leftmost = Some(id);
            }
        } else {
            self.nodes.get_mut(parent).set_right(Some(id));
            if self.rightmost == Some(parent) {
                self.rightmost = Some(id);
            }
        }
        self.refigure_height(id);
        self.balance_to_root(id);
    }

    /// The duplicate-insertion shift: the new node takes the matched node's
    /// place in the tree and the matched node becomes its left child,
    /// unconditionally — the direction is fixed policy, not comparator-driven.
    /// The matched node keeps its own subtrees.
    fn splice_above(&mut self, id: NodeId, matched: NodeId) {
        let parent = self.nodes.get(matched).parent;

        self.nodes.get_mut(id).set_left(Some(matched));
        self.nodes.get_mut(id).parent = parent;
        self.nodes.get_mut(matched).parent = Some(id);
        self.replace_child(parent, matched, id);

        // The new node follows the entire matched subtree in order, so it
        // becomes the maximum whenever that subtree held it. The minimum
        // cannot change here.
        let mut subtree_max = matched;
        while let Some(right) = self.nodes.get(subtree_max).right() {
            subtree_max = right;
        }
        if self.rightmost == Some(subtree_max) {
            self.rightmost = Some(id);
        }

        if self.trace.adds {
            debug!(
                "inserted key {} above matched key {}",
                self.nodes.get(id).key,
                self.nodes.get(matched).key
            );
        }

        self.refigure_height(id);
        self.balance_to_root(id);
    }

    // ─── Rotation and rebalance engine ───────────────────────────────────────

    /// Rotates until this node's balance is back inside `[-1, 1]`.
    fn rebalance(&mut self, id: NodeId) {
        loop {
            let balance = self.balance_of(id);
            if (-1..=1).contains(&balance) {
                return;
            }
            if balance < -1 {
                // Right heavy.
                self.rotate_left(id);
            } else {
                // Left heavy.
                self.rotate_right(id);
            }
        }
    }

    /// Rebalances every node from `id` up to the root. Rotations reparent the
    /// starting node, so each step re-reads the parent link after rebalancing.
    fn balance_to_root(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            self.rebalance(id);
            current = self.nodes.get(id).parent;
        }
    }

    /// Rotates left at `id`, which must have a right child. A right child
    /// leaning back toward `id` is straightened first (the double rotation).
    fn rotate_left(&mut self, id: NodeId) {
        let right = self
            .nodes
            .get(id)
            .right()
            .expect("`BalancedTree::rotate_left()` - rotation point has no right child!");
        if self.balance_of(right) > 0 {
            self.rotate_right(right);
        }

        let pivot = self
            .nodes
            .get(id)
            .right()
            .expect("`BalancedTree::rotate_left()` - rotation point lost its right child!");
        let inner = self.nodes.get(pivot).left();
        let parent = self.nodes.get(id).parent;

        // The pivot takes the rotation point's slot; the rotation point drops
        // to the pivot's left, adopting the pivot's former inner subtree.
        self.nodes.get_mut(id).set_right(inner);
        if let Some(child) = inner {
            self.nodes.get_mut(child).parent = Some(id);
        }
        self.nodes.get_mut(pivot).set_left(Some(id));
        self.nodes.get_mut(pivot).parent = parent;
        self.nodes.get_mut(id).parent = Some(pivot);
        self.replace_child(parent, id, pivot);

        self.refigure_height(id);
        trace!("rotated left at key {}", self.nodes.get(id).key);
    }

    /// Mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, id: NodeId) {
        let left = self
            .nodes
            .get(id)
            .left()
            .expect("`BalancedTree::rotate_right()` - rotation point has no left child!");
        if self.balance_of(left) < 0 {
            self.rotate_left(left);
        }

        let pivot = self
            .nodes
            .get(id)
            .left()
            .expect("`BalancedTree::rotate_right()` - rotation point lost its left child!");
        let inner = self.nodes.get(pivot).right();
        let parent = self.nodes.get(id).parent;

        self.nodes.get_mut(id).set_left(inner);
        if let Some(child) = inner {
            self.nodes.get_mut(child).parent = Some(id);
        }
        self.nodes.get_mut(pivot).set_right(Some(id));
        self.nodes.get_mut(pivot).parent = parent;
        self.nodes.get_mut(id).parent = Some(pivot);
        self.replace_child(parent, id, pivot);

        self.refigure_height(id);
        trace!("rotated right at key {}", self.nodes.get(id).key);
    }

    /// Redirects the child slot of `parent` that held `from` to `to`, or
    /// installs `to` as root when there is no parent.
    fn replace_child(&mut self, parent: Option<NodeId>, from: NodeId, to: NodeId) {
        match parent {
            None => self.root = Some(to),
            Some(p) => {
                let node = self.nodes.get(p);
                if node.left() == Some(from) {
                    self.nodes.get_mut(p).set_left(Some(to));
                } else if node.right() == Some(from) {
                    self.nodes.get_mut(p).set_right(Some(to));
                } else {
                    panic!("`BalancedTree::replace_child()` - parent set with no matching child to reassign!");
                }
            }
        }
    }

    // ─── Cached statistic maintenance ────────────────────────────────────────

    /// Height of an optional subtree, recomputing first if its root is dirty.
    fn height_of(&mut self, id: Option<NodeId>) -> i32 {
        match id {
            None => 0,
            Some(id) => {
                if self.nodes.get(id).dirty {
                    self.refigure_height(id);
                }
                self.nodes.get(id).height
            }
        }
    }

    /// Recomputes a node's cached height; a changed value cascades the
    /// recomputation up the parent chain.
    fn refigure_height(&mut self, id: NodeId) {
        let (left, right, old, parent) = {
            let node = self.nodes.get(id);
            (node.left(), node.right(), node.height, node.parent)
        };
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let node = self.nodes.get_mut(id);
        node.height = height;
        node.dirty = false;
        if height != old
            && let Some(parent) = parent
        {
            self.refigure_height(parent);
        }
    }

    /// Left height minus right height. Positive is left heavy.
    fn balance_of(&mut self, id: NodeId) -> i32 {
        let (left, right) = {
            let node = self.nodes.get(id);
            (node.left(), node.right())
        };
        self.height_of(left) - self.height_of(right)
    }

    // ─── Search ──────────────────────────────────────────────────────────────

    /// Repositions the cursor on the record with ordinal key `key`.
    ///
    /// On failure the cursor is unchanged. Meaningful for trees whose
    /// comparator is consistent with key order (the default).
    pub fn find_by_key(&mut self, key: Key) -> bool {
        self.find(&KeyCriterion(key))
    }

    /// Descends from the root under `criterion` and repositions the cursor on
    /// the first record its match predicate accepts. On failure the cursor is
    /// unchanged.
    pub fn find(&mut self, criterion: &impl Criterion<T>) -> bool {
        self.stats.searches += 1;
        let found = self.descend(criterion, false);
        if found {
            self.stats.matches += 1;
        }
        if self.trace.searches {
            match self.current_key() {
                Some(key) if found => debug!("search hit at key {key}"),
                _ => debug!("search missed in {} items", self.len()),
            }
        }
        found
    }

    /// Walks the cursor forward in order until the next record `criterion`
    /// accepts. Returns false once the cursor reaches the maximum without a
    /// hit, leaving it there.
    pub fn find_next(&mut self, criterion: &impl Criterion<T>) -> bool {
        self.stats.searches += 1;
        let Some(mut current) = self.cursor else {
            return false;
        };
        while let Some(next) = self.successor(current) {
            current = next;
            self.cursor = Some(current);
            self.stats.navigations += 1;
            if criterion.matches(self.entry(current)) {
                self.stats.matches += 1;
                if self.trace.searches {
                    debug!("search hit at key {}", self.nodes.get(current).key);
                }
                return true;
            }
        }
        false
    }

    /// The descent search core. `Less` goes left and `Greater` right;
    /// `Equal` without a match-predicate hit goes left, where the
    /// duplicate-insertion shift parks equal records. At a dead end the
    /// cursor is assigned only when `assign_failed_position` is set, so a
    /// caller can park the cursor where the probe would attach.
    fn descend(&mut self, criterion: &impl Criterion<T>, assign_failed_position: bool) -> bool {
        let Some(mut current) = self.root else {
            return false;
        };
        loop {
            if criterion.matches(self.entry(current)) {
                self.cursor = Some(current);
                return true;
            }
            let next = match criterion.compare(self.entry(current)) {
                Ordering::Less | Ordering::Equal => self.nodes.get(current).left(),
                Ordering::Greater => self.nodes.get(current).right(),
            };
            match next {
                Some(child) => current = child,
                None => {
                    if assign_failed_position {
                        self.cursor = Some(current);
                    }
                    return false;
                }
            }
        }
    }

    // ─── Cursor navigation ───────────────────────────────────────────────────

    /// Moves the cursor to the minimum-key record.
    pub fn move_first(&mut self) -> bool {
        match self.leftmost {
            Some(id) => {
                self.cursor = Some(id);
                self.stats.navigations += 1;
                if self.trace.navigation {
                    debug!("nav: move first in {} items", self.len());
                }
                true
            }
            None => false,
        }
    }

    /// Moves the cursor to the maximum-key record.
    pub fn move_last(&mut self) -> bool {
        match self.rightmost {
            Some(id) => {
                self.cursor = Some(id);
                self.stats.navigations += 1;
                if self.trace.navigation {
                    debug!("nav: move last in {} items", self.len());
                }
                true
            }
            None => false,
        }
    }

    /// Moves the cursor to the in-order successor. Returns false, without
    /// moving, when the cursor already sits on the maximum.
    pub fn move_next(&mut self) -> bool {
        let Some(current) = self.cursor else {
            return false;
        };
        if Some(current) == self.rightmost {
            return false;
        }
        let next = self
            .successor(current)
            .expect("`BalancedTree::move_next()` - cursor below the maximum has no successor!");
        self.cursor = Some(next);
        self.stats.navigations += 1;
        if self.trace.navigation {
            debug!("nav: move next in {} items", self.len());
        }
        true
    }

    /// Moves the cursor to the in-order predecessor. Returns false, without
    /// moving, when the cursor already sits on the minimum.
    pub fn move_previous(&mut self) -> bool {
        let Some(current) = self.cursor else {
            return false;
        };
        if Some(current) == self.leftmost {
            return false;
        }
        let previous = self
            .predecessor(current)
            .expect("`BalancedTree::move_previous()` - cursor above the minimum has no predecessor!");
        self.cursor = Some(previous);
        self.stats.navigations += 1;
        if self.trace.navigation {
            debug!("nav: move previous in {} items", self.len());
        }
        true
    }

    /// In-order successor: leftmost descendant of the right child, or the
    /// first ancestor reached by ascending out of a left child.
    fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut current) = self.nodes.get(id).right() {
            while let Some(left) = self.nodes.get(current).left() {
                current = left;
            }
            return Some(current);
        }
        let mut current = id;
        while let Some(parent) = self.nodes.get(current).parent {
            if self.nodes.get(parent).left() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Mirror of [`Self::successor`].
    fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut current) = self.nodes.get(id).left() {
            while let Some(right) = self.nodes.get(current).right() {
                current = right;
            }
            return Some(current);
        }
        let mut current = id;
        while let Some(parent) = self.nodes.get(current).parent {
            if self.nodes.get(parent).right() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    #[inline]
    fn entry(&self, id: NodeId) -> Entry<'_, T> {
        let node = self.nodes.get(id);
        Entry {
            key: node.key,
            value: &node.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Orders records by their `i64` payload; duplicates by payload equality.
    struct PayloadOrder;

    impl Comparator<i64> for PayloadOrder {
        fn compare(&self, a: Entry<'_, i64>, b: Entry<'_, i64>) -> Ordering {
            a.value.cmp(b.value)
        }

        fn matches(&self, _probe: Entry<'_, i64>, _node: Entry<'_, i64>) -> bool {
            // Payload ordering alone never claims duplicates; collisions
            // attach to the right per the dead-end policy.
            false
        }
    }

    /// Like `PayloadOrder` but claims equal payloads as duplicates, which
    /// exercises the duplicate-insertion shift.
    struct PayloadMultiset;

    impl Comparator<i64> for PayloadMultiset {
        fn compare(&self, a: Entry<'_, i64>, b: Entry<'_, i64>) -> Ordering {
            a.value.cmp(b.value)
        }
    }

    impl<T, C: Comparator<T>> BalancedTree<T, C> {
        /// Walks the whole tree checking the structural invariants: parent
        /// back-references, cached heights, the balance bound, the extremum
        /// caches, and agreement between recursive in-order and the cursor
        /// walk. Panics on any violation.
        fn validate_invariants(&mut self) {
            let Some(root) = self.root else {
                assert!(self.leftmost.is_none());
                assert!(self.rightmost.is_none());
                assert!(self.cursor.is_none());
                return;
            };
            assert_eq!(self.nodes.get(root).parent, None, "root has a parent");
            self.validate_node(root);

            let mut current = root;
            while let Some(left) = self.nodes.get(current).left() {
                current = left;
            }
            assert_eq!(self.leftmost, Some(current), "stale leftmost cache");
            let mut current = root;
            while let Some(right) = self.nodes.get(current).right() {
                current = right;
            }
            assert_eq!(self.rightmost, Some(current), "stale rightmost cache");

            let mut recursive = Vec::new();
            self.in_order(root, &mut recursive);
            let mut walked = Vec::new();
            let mut current = self.leftmost;
            while let Some(id) = current {
                walked.push(self.nodes.get(id).key);
                current = self.successor(id);
            }
            assert_eq!(recursive, walked, "successor walk disagrees with recursion");
            assert_eq!(recursive.len(), self.len());
        }

        fn validate_node(&mut self, id: NodeId) -> i32 {
            let (left, right) = {
                let node = self.nodes.get(id);
                (node.left(), node.right())
            };
            let mut height_left = 0;
            let mut height_right = 0;
            if let Some(child) = left {
                assert_eq!(self.nodes.get(child).parent, Some(id), "left child parent desync");
                height_left = self.validate_node(child);
            }
            if let Some(child) = right {
                assert_eq!(self.nodes.get(child).parent, Some(id), "right child parent desync");
                height_right = self.validate_node(child);
            }
            let height = 1 + height_left.max(height_right);
            assert_eq!(self.height_of(Some(id)), height, "cached height is wrong");
            let balance = height_left - height_right;
            assert!(
                (-1..=1).contains(&balance),
                "balance {balance} out of range at key {}",
                self.nodes.get(id).key
            );
            height
        }

        fn in_order(&self, id: NodeId, out: &mut Vec<Key>) {
            if let Some(left) = self.nodes.get(id).left() {
                self.in_order(left, out);
            }
            out.push(self.nodes.get(id).key);
            if let Some(right) = self.nodes.get(id).right() {
                self.in_order(right, out);
            }
        }

        fn in_order_values(&self) -> Vec<T>
        where
            T: Clone,
        {
            let mut out = Vec::with_capacity(self.len());
            let mut current = self.leftmost;
            while let Some(id) = current {
                out.push(self.nodes.get(id).value.clone());
                current = self.successor(id);
            }
            out
        }
    }

    #[test]
    fn ordinal_inserts_stay_balanced() {
        let mut tree = BalancedTree::new();
        for value in 0..512 {
            tree.insert(value);
            tree.validate_invariants();
        }
        assert_eq!(tree.len(), 512);

        // Keys were assigned ascending, so the in-order walk is 1..=512.
        assert!(tree.move_first());
        let mut keys = vec![tree.current_key().unwrap()];
        while tree.move_next() {
            keys.push(tree.current_key().unwrap());
        }
        assert_eq!(keys, (1..=512).collect::<Vec<_>>());
    }

    #[test]
    fn payload_scenario_traversal_and_balance() {
        let mut tree = BalancedTree::with_comparator(PayloadOrder);
        for value in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(value);
            tree.validate_invariants();
        }
        assert_eq!(tree.in_order_values(), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn duplicate_shift_places_new_node_above() {
        let mut tree = BalancedTree::with_comparator(PayloadMultiset);
        let first = tree.insert(42);
        let second = tree.insert(42);
        tree.validate_invariants();

        // The second node took the first's place; the first is its left child.
        let root = tree.root.unwrap();
        assert_eq!(tree.nodes.get(root).key, second);
        let left = tree.nodes.get(root).left().unwrap();
        assert_eq!(tree.nodes.get(left).key, first);

        // Both stay reachable by ordinal key: descent meets the ancestor
        // first, and the displaced original sits below it on the left.
        assert!(tree.find_by_key(second));
        assert_eq!(tree.current_key(), Some(second));
        assert!(tree.find_by_key(first));
        assert_eq!(tree.current_key(), Some(first));
    }

    #[test]
    fn duplicate_shift_keeps_matched_subtree() {
        let mut tree = BalancedTree::with_comparator(PayloadMultiset);
        for value in [10, 5, 15] {
            tree.insert(value);
        }
        // Duplicate of the root: splices in above it, root keeps its children.
        let duplicate = tree.insert(10);
        tree.validate_invariants();

        assert!(tree.find_by_key(duplicate));
        // The shift parks the duplicate after the matched node's entire
        // subtree in order — the documented exception to strict ordering.
        assert_eq!(tree.in_order_values(), vec![5, 10, 15, 10]);
    }

    #[test]
    fn duplicate_of_rightmost_takes_over_eol() {
        let mut tree = BalancedTree::with_comparator(PayloadMultiset);
        tree.insert(1);
        let last = tree.insert(2);
        let shifted = tree.insert(2);
        tree.validate_invariants();

        assert!(tree.move_last());
        assert_eq!(tree.current_key(), Some(shifted));
        assert!(tree.eol());
        assert!(tree.move_previous());
        assert_eq!(tree.current_key(), Some(last));
    }

    #[test]
    fn empty_tree_reports_no_position() {
        let mut tree: BalancedTree<i64> = BalancedTree::new();
        assert!(!tree.move_first());
        assert!(!tree.move_next());
        assert!(!tree.move_previous());
        assert!(!tree.move_last());
        assert!(!tree.eol());
        assert_eq!(tree.current_key(), None);
        assert!(!tree.find_by_key(1));
    }

    #[test]
    fn single_record_is_both_extremes() {
        let mut tree = BalancedTree::new();
        let key = tree.insert("only");
        assert!(tree.move_first());
        assert_eq!(tree.current_key(), Some(key));
        assert!(tree.move_last());
        assert_eq!(tree.current_key(), Some(key));
        assert!(tree.eol());
        assert!(!tree.move_next());
        assert!(!tree.move_previous());
    }

    #[test]
    fn failed_search_can_assign_endpoint() {
        let mut tree = BalancedTree::new();
        tree.insert("a");
        let second = tree.insert("b");
        assert!(tree.move_first());

        // Unassigned failure leaves the cursor alone.
        assert!(!tree.find_by_key(99));
        assert_eq!(tree.current_key(), Some(1));

        // Assigned failure parks the cursor on the dead end.
        assert!(!tree.descend(&KeyCriterion(99), true));
        assert_eq!(tree.current_key(), Some(second));
    }

    #[test]
    fn counters_account_for_operations() {
        let mut tree = BalancedTree::new();
        tree.insert(10);
        tree.insert(20);
        tree.find_by_key(1);
        tree.find_by_key(7);
        tree.move_first();
        tree.move_next();

        let stats = *tree.stats();
        assert_eq!(stats.adds, 2);
        assert_eq!(stats.searches, 2);
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.navigations, 2);
        assert_eq!(stats.deletes, 0);
    }

    proptest! {
        /// Random payload orders: every insert preserves the balance bound,
        /// the cached statistics, and the sorted in-order sequence.
        #[test]
        fn random_payloads_keep_invariants(values in prop::collection::vec(-1000i64..1000, 1..200)) {
            let mut tree = BalancedTree::with_comparator(PayloadOrder);
            let mut model = Vec::new();
            for value in values {
                tree.insert(value);
                model.push(value);
                tree.validate_invariants();
            }
            let mut sorted = model.clone();
            sorted.sort();
            prop_assert_eq!(tree.in_order_values(), sorted);
        }

        /// Round-trip: every key handed out by insert is findable again and
        /// positions the cursor on its record.
        #[test]
        fn every_inserted_key_is_findable(count in 1usize..200) {
            let mut tree = BalancedTree::new();
            let keys: Vec<Key> = (0..count).map(|value| tree.insert(value)).collect();
            for key in keys {
                prop_assert!(tree.find_by_key(key));
                prop_assert_eq!(tree.current_key(), Some(key));
            }
        }

        /// Forward and backward cursor walks visit the same keys.
        #[test]
        fn cursor_walks_are_symmetric(count in 1usize..100) {
            let mut tree = BalancedTree::new();
            for value in 0..count {
                tree.insert(value);
            }

            let mut forward = Vec::new();
            prop_assert!(tree.move_first());
            forward.push(tree.current_key().unwrap());
            while tree.move_next() {
                forward.push(tree.current_key().unwrap());
            }
            prop_assert!(tree.eol());

            let mut backward = Vec::new();
            prop_assert!(tree.move_last());
            backward.push(tree.current_key().unwrap());
            while tree.move_previous() {
                backward.push(tree.current_key().unwrap());
            }
            backward.reverse();
            prop_assert_eq!(forward, backward);
        }
    }
}
