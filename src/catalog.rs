//! The unordered doubly linked record sequence.
//!
//! The simpler sibling of [`BalancedTree`](crate::BalancedTree): records get
//! the same auto-assigned ordinal keys and the same single-cursor contract,
//! but live in insertion order on a doubly linked chain, and searches are
//! linear scans driven by a [`Matcher`] alone — no ordering is required of a
//! criterion here.

use log::debug;

use crate::compare::{Entry, Key, KeyCriterion, Matcher};
use crate::raw::{Arena, NodeId};
use crate::stats::{Stats, TraceOptions};

struct SeqNode<T> {
    key: Key,
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// An append-only doubly linked sequence with a single mutable cursor.
pub struct Catalog<T> {
    nodes: Arena<SeqNode<T>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    cursor: Option<NodeId>,
    last_key: Key,
    stats: Stats,
    trace: TraceOptions,
}

impl<T> Catalog<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
            cursor: None,
            last_key: 0,
            stats: Stats::default(),
            trace: TraceOptions::default(),
        }
    }

    /// The number of records in the sequence.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the sequence holds no records.
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

    /// True iff the cursor sits on the last record.
    pub fn eol(&self) -> bool {
        self.cursor.is_some() && self.cursor == self.tail
    }

    /// Appends a payload at the tail under the next ordinal key.
    pub fn push(&mut self, value: T) -> Key {
        self.last_key += 1;
        let key = self.last_key;
        let id = self.nodes.alloc(SeqNode {
            key,
            value,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes.get_mut(tail).next = Some(id),
            None => {
                self.head = Some(id);
                self.cursor = Some(id);
            }
        }
        self.tail = Some(id);

        self.stats.adds += 1;
        if self.trace.adds {
            debug!("appended key {key}, sequence now holds {} items", self.len());
        }
        key
    }

    // ─── Search ──────────────────────────────────────────────────────────────

    /// Repositions the cursor on the record with ordinal key `key`.
    pub fn find_first_by_key(&mut self, key: Key) -> bool {
        self.find_first(&KeyCriterion(key))
    }

    /// Linear search from the beginning — except that a cursor already
    /// sitting on a matching record wins without moving.
    pub fn find_first(&mut self, matcher: &impl Matcher<T>) -> bool {
        if self.is_empty() {
            return false;
        }
        self.stats.searches += 1;

        let current = self.cursor.expect("`Catalog::find_first()` - non-empty sequence without a cursor!");
        if matcher.matches(self.entry(current)) {
            self.stats.matches += 1;
            return true;
        }

        self.move_first();
        self.scan_forward(matcher)
    }

    /// Advances once, then scans forward. Returns false when the cursor is
    /// already at the tail; a failed scan leaves the cursor parked there.
    pub fn find_next(&mut self, matcher: &impl Matcher<T>) -> bool {
        self.stats.searches += 1;
        if self.len() < 2 || self.eol() {
            return false;
        }
        self.move_next();
        self.scan_forward(matcher)
    }

    /// Walks the cursor toward the tail until the matcher accepts a record.
    fn scan_forward(&mut self, matcher: &impl Matcher<T>) -> bool {
        let mut current = self.cursor.expect("`Catalog::scan_forward()` - non-empty sequence without a cursor!");
        loop {
            if matcher.matches(self.entry(current)) {
                self.stats.matches += 1;
                if self.trace.searches {
                    debug!("scan hit at key {} in {} items", self.nodes.get(current).key, self.len());
                }
                return true;
            }
            match self.nodes.get(current).next {
                Some(next) => {
                    current = next;
                    self.cursor = Some(current);
                    self.stats.navigations += 1;
                }
                None => {
                    if self.trace.searches {
                        debug!("scan missed in {} items", self.len());
                    }
                    return false;
                }
            }
        }
    }

    // ─── Cursor navigation ───────────────────────────────────────────────────

    /// Moves the cursor to the first record.
    pub fn move_first(&mut self) -> bool {
        match self.head {
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

    /// Moves the cursor to the last record.
    pub fn move_last(&mut self) -> bool {
        match self.tail {
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

    /// Moves the cursor one record toward the tail. Returns false, without
    /// moving, when already there.
    pub fn move_next(&mut self) -> bool {
        let Some(current) = self.cursor else {
            return false;
        };
        match self.nodes.get(current).next {
            Some(next) => {
                self.cursor = Some(next);
                self.stats.navigations += 1;
                if self.trace.navigation {
                    debug!("nav: move next in {} items", self.len());
                }
                true
            }
            None => false,
        }
    }

    /// Moves the cursor one record toward the head. Returns false, without
    /// moving, when already there.
    pub fn move_previous(&mut self) -> bool {
        let Some(current) = self.cursor else {
            return false;
        };
        match self.nodes.get(current).prev {
            Some(prev) => {
                self.cursor = Some(prev);
                self.stats.navigations += 1;
                if self.trace.navigation {
                    debug!("nav: move previous in {} items", self.len());
                }
                true
            }
            None => false,
        }
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

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}
