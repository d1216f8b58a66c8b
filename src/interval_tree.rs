use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::iter::Iter;
use crate::node::Node;
use log::{debug, trace};
use std::fmt;
#[cfg(feature="serde")]
use serde::{de::Error as _, Serialize, Serializer, Deserialize, Deserializer};

/// The build phase of a centered interval tree over `[min, max)`.
///
/// Intervals are inserted unsorted. Once every interval is in, call
/// [`IntervalTree::finalize`] to get a [`SortedIntervalTree`], which is the
/// only type able to answer queries.
///
/// Intervals lying partly or entirely outside of `[min, max)` are accepted and
/// reported correctly; they just end up in the outermost nodes of the tree.
///
/// With the `serde` feature, a tree is stored as its bounds plus a flat list
/// of intervals, and rebuilt through [`IntervalTree::try_new`] and
/// [`IntervalTree::insert`] when read back.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTree<T> {
    root: Node<T>,
}

#[cfg(feature="serde")]
#[derive(Serialize)]
struct SerializedTreeRef<'a, T> {
    min: i64,
    max: i64,
    intervals: Vec<&'a Interval<T>>,
}

#[cfg(feature="serde")]
#[derive(Deserialize)]
struct SerializedTree<T> {
    min: i64,
    max: i64,
    intervals: Vec<Interval<T>>,
}

#[cfg(feature="serde")]
impl<T> Serialize for IntervalTree<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (min, max) = self.bounds();
        SerializedTreeRef {
            min,
            max,
            intervals: self.iter().collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature="serde")]
impl<T> SerializedTree<T> {
    fn rebuild(self) -> Result<IntervalTree<T>> {
        let mut tree = IntervalTree::try_new(self.min, self.max)?;
        tree.extend(
            self.intervals
                .into_iter()
                .map(|interval| (interval.start, interval.end, interval.value)),
        );
        Ok(tree)
    }
}

/// Placement is redone from scratch, so only the bounds need checking.
#[cfg(feature="serde")]
impl<'de, T> Deserialize<'de> for IntervalTree<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        SerializedTree::deserialize(deserializer)?
            .rebuild()
            .map_err(D::Error::custom)
    }
}

impl<T> fmt::Display for IntervalTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl<T> Extend<(i64, i64, T)> for IntervalTree<T> {
    fn extend<I: IntoIterator<Item = (i64, i64, T)>>(&mut self, iter: I) {
        for (start, end, value) in iter {
            self.insert(start, end, value);
        }
    }
}

impl<'a, T> IntoIterator for &'a IntervalTree<T> {
    type Item = &'a Interval<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntervalTree<T> {
    /// Creates an empty tree covering `[min, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `min >= max`. See [`IntervalTree::try_new`] for a fallible
    /// version.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::IntervalTree;
    ///
    /// let tree = IntervalTree::<&str>::new(0, 100);
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.bounds(), (0, 100));
    /// ```
    pub fn new(min: i64, max: i64) -> IntervalTree<T> {
        IntervalTree {
            root: Node::new(min, max),
        }
    }

    /// Creates an empty tree covering `[min, max)`, or fails if `min >= max`.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::{Error, IntervalTree};
    ///
    /// assert!(IntervalTree::<()>::try_new(0, 1).is_ok());
    /// assert_eq!(
    ///     IntervalTree::<()>::try_new(1, 1).unwrap_err(),
    ///     Error::InvalidBounds { min: 1, max: 1 }
    /// );
    /// ```
    pub fn try_new(min: i64, max: i64) -> Result<IntervalTree<T>> {
        if min >= max {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(IntervalTree::new(min, max))
    }

    /// The `[min, max)` range the tree was created with.
    pub fn bounds(&self) -> (i64, i64) {
        (self.root.min, self.root.max)
    }

    /// Adds `[start, end)` with its `value` to the tree.
    ///
    /// Empty or inverted intervals (`end <= start`) are silently dropped.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new(0, 100);
    /// tree.insert(10, 20, "A");
    /// tree.insert(20, 20, "dropped");
    /// tree.insert(30, 25, "dropped too");
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, start: i64, end: i64, value: T) {
        if end <= start {
            trace!("dropping empty interval [{}, {})", start, end);
            return;
        }
        self.root.insert(Interval::new(start, end, value));
    }

    /// Orders the intervals of every node in place. Idempotent.
    ///
    /// This does not make the tree queryable by itself; use
    /// [`IntervalTree::finalize`] for that.
    pub fn sort(&mut self) {
        self.root.sort();
    }

    /// Sorts the whole tree and switches it to its query phase.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new(0, 100);
    /// tree.insert(10, 20, "A");
    /// tree.insert(15, 25, "B");
    /// tree.insert(50, 60, "C");
    ///
    /// let tree = tree.finalize();
    /// let mut found: Vec<_> = tree.query(17).into_iter().map(|i| i.value).collect();
    /// found.sort();
    /// assert_eq!(found, ["A", "B"]);
    /// ```
    pub fn finalize(mut self) -> SortedIntervalTree<T> {
        self.sort();
        debug!(
            "finalized interval tree over [{}, {}): {} intervals, {} nodes, height {}",
            self.root.min,
            self.root.max,
            self.root.len(),
            self.root.node_count(),
            self.root.height()
        );
        SortedIntervalTree { tree: self }
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every stored interval, in no particular order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }
}

/// The query phase of an [`IntervalTree`]: every node is sorted, and no
/// intervals can be added anymore.
#[cfg_attr(feature="serde", derive(Serialize), serde(transparent))]
#[derive(Clone, Debug, PartialEq)]
pub struct SortedIntervalTree<T> {
    tree: IntervalTree<T>,
}

impl<T> From<IntervalTree<T>> for SortedIntervalTree<T> {
    fn from(tree: IntervalTree<T>) -> SortedIntervalTree<T> {
        tree.finalize()
    }
}

/// Re-sorts on the way in, so the ordering holds whatever the input.
#[cfg(feature="serde")]
impl<'de, T> Deserialize<'de> for SortedIntervalTree<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IntervalTree::deserialize(deserializer).map(IntervalTree::finalize)
    }
}

impl<T> fmt::Display for SortedIntervalTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

impl<'a, T> IntoIterator for &'a SortedIntervalTree<T> {
    type Item = &'a Interval<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> SortedIntervalTree<T> {
    /// Returns every interval containing `x`, i.e. `start <= x < end`.
    ///
    /// Each stored interval is reported at most once. Intervals from the left
    /// of a node come before that node's own, which come before those from
    /// its right.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new(0, 100);
    /// tree.insert(5, 10, ());
    /// let tree = tree.finalize();
    ///
    /// assert!(tree.query(4).is_empty());
    /// assert_eq!(tree.query(5).len(), 1);
    /// assert_eq!(tree.query(9).len(), 1);
    /// assert!(tree.query(10).is_empty());
    /// ```
    pub fn query(&self, x: i64) -> Vec<&Interval<T>> {
        let mut result = Vec::new();
        self.tree.root.query(x, &mut result);
        result
    }

    /// Same as [`SortedIntervalTree::query`], appending to `result` instead
    /// of allocating a new vector.
    pub fn query_into<'a>(&'a self, x: i64, result: &mut Vec<&'a Interval<T>>) {
        self.tree.root.query(x, result);
    }

    /// Returns `true` if any stored interval contains `x`.
    pub fn contains_point(&self, x: i64) -> bool {
        self.tree.root.contains_point(x)
    }

    /// Sorts again. Harmless, as the tree is already sorted.
    pub fn sort(&mut self) {
        self.tree.sort();
    }

    /// Goes back to the build phase, e.g. to insert more intervals.
    ///
    /// # Examples
    /// ```
    /// use centered_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new(0, 10);
    /// tree.insert(1, 3, 'a');
    /// let mut tree = tree.finalize().into_unsorted();
    /// tree.insert(2, 4, 'b');
    /// let tree = tree.finalize();
    /// assert_eq!(tree.query(2).len(), 2);
    /// ```
    pub fn into_unsorted(self) -> IntervalTree<T> {
        self.tree
    }

    pub fn bounds(&self) -> (i64, i64) {
        self.tree.bounds()
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Iterates over every stored interval, in no particular order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }
}
