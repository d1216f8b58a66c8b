use crate::interval::Interval;
use crate::node::{Node, NodeState};
use std::iter::FusedIterator;
use std::slice;

/// Iterator over every interval stored in a tree, in no particular order.
///
/// Created by [`IntervalTree::iter`](crate::IntervalTree::iter) and
/// [`SortedIntervalTree::iter`](crate::SortedIntervalTree::iter).
#[derive(Debug)]
pub struct Iter<'a, T> {
    pending: Vec<&'a Node<T>>,
    current: slice::Iter<'a, Interval<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Node<T>) -> Iter<'a, T> {
        Iter {
            pending: vec![root],
            current: Default::default(),
            remaining: root.len(),
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            pending: self.pending.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(interval) = self.current.next() {
                self.remaining -= 1;
                return Some(interval);
            }

            let node = self.pending.pop()?;
            match &node.state {
                NodeState::Empty => {}
                NodeState::Singleton(interval) => {
                    self.current = slice::from_ref(interval).iter();
                }
                NodeState::Branching(branch) => {
                    self.pending.extend(branch.right.as_deref());
                    self.pending.extend(branch.left.as_deref());
                    self.current = branch.by_start.iter();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
