use std::fmt;
#[cfg(feature="serde")]
use serde::{Serialize, Deserialize};

/// A half-open interval `[start, end)` carrying a `value`.
///
/// The tree only ever stores intervals where `end > start`.
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    pub start: i64,
    pub end: i64,
    pub value: T,
}

impl<T> Interval<T> {
    pub fn new(start: i64, end: i64, value: T) -> Interval<T> {
        Interval { start, end, value }
    }

    /// Returns `true` if `start <= x < end`.
    ///
    /// ```
    /// use centered_interval_tree::Interval;
    ///
    /// let interval = Interval::new(5, 10, ());
    /// assert!(!interval.contains(4));
    /// assert!(interval.contains(5));
    /// assert!(interval.contains(9));
    /// assert!(!interval.contains(10));
    /// ```
    pub fn contains(&self, x: i64) -> bool {
        self.start <= x && x < self.end
    }

    /// Empty (or inverted) intervals are never stored in a tree.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl<T> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{},{}[", self.start, self.end)
    }
}
