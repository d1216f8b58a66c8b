//! Implementation of a static centered interval tree ([`interval_tree::IntervalTree`]) over
//! half-open integer intervals `[start, end)`, each carrying an arbitrary value. It is based
//! on the centered interval tree described in
//! [Wikipedia](https://en.wikipedia.org/wiki/Interval_tree#Centered_interval_tree).
//!
//! The tree is built once and queried many times:
//!
//! 1. create it over a fixed range with [`IntervalTree::new`];
//! 2. [`insert`](IntervalTree::insert) every interval;
//! 3. [`finalize`](IntervalTree::finalize) it into a [`SortedIntervalTree`];
//! 4. answer "stabbing queries" (which intervals contain point `x`?) in
//!    `O(log n + k)` with [`SortedIntervalTree::query`].
//!
//! Only the finalized tree can be queried, so a query can never see unsorted
//! nodes.
//!
//! ```
//! use centered_interval_tree::IntervalTree;
//!
//! let mut tree = IntervalTree::new(0, 100);
//! tree.insert(10, 20, "A");
//! tree.insert(15, 25, "B");
//! tree.insert(50, 60, "C");
//! let tree = tree.finalize();
//!
//! assert_eq!(tree.query(55)[0].value, "C");
//! assert!(tree.query(99).is_empty());
//! assert_eq!(tree.len(), 3);
//! ```

/// The build and query phases of the tree.
pub mod interval_tree;
mod error;
mod interval;
mod iter;
mod node;

pub use error::{Error, Result};
pub use interval::Interval;
pub use interval_tree::{IntervalTree, SortedIntervalTree};
pub use iter::Iter;
