//! An anagram dictionary built on an ordinal-keyed self-balancing tree.
//!
//! The centerpiece is [`BalancedTree`]: an in-memory index that stores
//! records under auto-assigned, strictly increasing ordinal keys, keeps
//! itself height-balanced after every insertion via rotations propagated up
//! to the root, and exposes a single mutable cursor for ordered traversal
//! and search. Ordering is pluggable through a [`Comparator`] fixed at
//! construction; searches are driven by [`Criterion`] objects whose match
//! predicate is independent of their ordering.
//!
//! Around it sit its collaborators: a simpler
//! unordered [`Catalog`] sequence sharing the same key, cursor and criterion
//! contract; the [`WordList`](words::WordList) word catalogue with wildcard
//! and anagram search built on it; a line-oriented TCP service exposing the
//! catalogue ([`server`]); and a leveled text log sink ([`logging`]) behind
//! the `log` facade — diagnostics are observation-only and never affect
//! structure behavior.
//!
//! # Example
//!
//! ```
//! use lexitree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//! for payload in ["first", "second", "third"] {
//!     tree.insert(payload);
//! }
//!
//! assert!(tree.move_first());
//! assert_eq!(tree.current_value(), Some(&"first"));
//! assert!(tree.move_next());
//! assert!(tree.find_by_key(3));
//! assert_eq!(tree.current_value(), Some(&"third"));
//! ```

#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]

mod raw;

pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod stats;
pub mod tree;
pub mod words;

pub use catalog::Catalog;
pub use compare::{Comparator, Criterion, Entry, Key, KeyCriterion, KeyOrder, Matcher};
pub use error::{Error, Result};
pub use stats::{Stats, TraceOptions};
pub use tree::BalancedTree;
pub use words::WordList;
