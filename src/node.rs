use crate::interval::Interval;
use std::fmt;

/// A node spanning `[min, max)`, split at `center`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Node<T> {
    pub min: i64,
    pub max: i64,
    pub center: i64,
    pub state: NodeState<T>,
}

/// Occupancy of a node. Transitions only go `Empty -> Singleton -> Branching`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum NodeState<T> {
    Empty,
    Singleton(Interval<T>),
    Branching(Branch<T>),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Branch<T> {
    /// Mid intervals, ascending by start once sorted.
    pub by_start: Vec<Interval<T>>,
    /// Indices into `by_start`, descending by end once sorted.
    pub by_end: Vec<usize>,
    pub left: Option<Box<Node<T>>>,
    pub right: Option<Box<Node<T>>>,
}

impl<T> Branch<T> {
    fn new() -> Branch<T> {
        Branch {
            by_start: Vec::new(),
            by_end: Vec::new(),
            left: None,
            right: None,
        }
    }
}

impl<T> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " {{ [{},{}[ @{}", self.min, self.max, self.center)?;
        match &self.state {
            NodeState::Empty => {}
            NodeState::Singleton(interval) => write!(f, " single:{}", interval)?,
            NodeState::Branching(branch) => {
                if !branch.by_start.is_empty() {
                    write!(f, " mid:")?;
                    for interval in &branch.by_start {
                        write!(f, "{}", interval)?;
                    }
                }
                if let Some(left) = &branch.left {
                    write!(f, " left:{}", left)?;
                }
                if let Some(right) = &branch.right {
                    write!(f, " right:{}", right)?;
                }
            }
        }
        write!(f, " }} ")
    }
}

impl<T> Node<T> {
    /// Creates an empty node over `[min, max)`.
    ///
    /// Panics if `min >= max`.
    pub fn new(min: i64, max: i64) -> Node<T> {
        assert!(
            min < max,
            "interval tree range [{}, {}) must have min < max",
            min,
            max
        );

        Node {
            min,
            max,
            center: center(min, max),
            state: NodeState::Empty,
        }
    }

    /// A node of width one has `center == min`: its children would either be
    /// empty (left) or as wide as itself (right), so everything stays mid.
    fn is_splittable(&self) -> bool {
        self.center > self.min
    }

    pub fn insert(&mut self, interval: Interval<T>) {
        debug_assert!(!interval.is_empty());

        match self.state {
            NodeState::Empty => self.state = NodeState::Singleton(interval),
            NodeState::Singleton(_) => {
                let previous =
                    match std::mem::replace(&mut self.state, NodeState::Branching(Branch::new())) {
                        NodeState::Singleton(previous) => previous,
                        _ => unreachable!(),
                    };
                self.place(previous);
                self.place(interval);
            }
            NodeState::Branching(_) => self.place(interval),
        }
    }

    /// Routes an interval into a branching node.
    fn place(&mut self, interval: Interval<T>) {
        let (min, max, center) = (self.min, self.max, self.center);
        let splittable = self.is_splittable();
        let branch = match &mut self.state {
            NodeState::Branching(branch) => branch,
            _ => unreachable!("placement into a non-branching node"),
        };

        if splittable && interval.end <= center {
            branch
                .left
                .get_or_insert_with(|| Box::new(Node::new(min, center)))
                .insert(interval);
        } else if splittable && interval.start > center {
            branch
                .right
                .get_or_insert_with(|| Box::new(Node::new(center, max)))
                .insert(interval);
        } else {
            branch.by_end.push(branch.by_start.len());
            branch.by_start.push(interval);
        }
    }

    /// Orders the mid intervals of this node and all of its descendants.
    pub fn sort(&mut self) {
        if let NodeState::Branching(branch) = &mut self.state {
            branch.by_start.sort_by_key(|interval| interval.start);

            let by_start = &branch.by_start;
            branch.by_end.clear();
            branch.by_end.extend(0..by_start.len());
            branch
                .by_end
                .sort_by(|&a, &b| by_start[b].end.cmp(&by_start[a].end));

            if let Some(left) = &mut branch.left {
                left.sort();
            }
            if let Some(right) = &mut branch.right {
                right.sort();
            }
        }
    }

    /// Appends every interval containing `x` to `result`. Mid intervals must
    /// have been sorted.
    pub fn query<'a>(&'a self, x: i64, result: &mut Vec<&'a Interval<T>>) {
        match &self.state {
            NodeState::Empty => {}
            NodeState::Singleton(interval) => {
                if interval.contains(x) {
                    result.push(interval);
                }
            }
            NodeState::Branching(branch) if x < self.center => {
                if let Some(left) = &branch.left {
                    left.query(x, result);
                }
                // Straddling intervals all end past `center > x`; the end check
                // only matters for intervals parked in an unsplittable node.
                for interval in &branch.by_start {
                    if interval.start > x {
                        break;
                    }
                    if interval.end > x {
                        result.push(interval);
                    }
                }
            }
            NodeState::Branching(branch) => {
                for &i in &branch.by_end {
                    let interval = &branch.by_start[i];
                    if interval.end <= x {
                        break;
                    }
                    if interval.start <= x {
                        result.push(interval);
                    }
                }
                if let Some(right) = &branch.right {
                    right.query(x, result);
                }
            }
        }
    }

    /// Same walk as `query`, stopping at the first interval containing `x`.
    pub fn contains_point(&self, x: i64) -> bool {
        match &self.state {
            NodeState::Empty => false,
            NodeState::Singleton(interval) => interval.contains(x),
            NodeState::Branching(branch) if x < self.center => {
                branch.left.as_ref().map_or(false, |left| left.contains_point(x))
                    || branch
                        .by_start
                        .iter()
                        .take_while(|interval| interval.start <= x)
                        .any(|interval| interval.end > x)
            }
            NodeState::Branching(branch) => {
                branch
                    .by_end
                    .iter()
                    .map(|&i| &branch.by_start[i])
                    .take_while(|interval| interval.end > x)
                    .any(|interval| interval.start <= x)
                    || branch.right.as_ref().map_or(false, |right| right.contains_point(x))
            }
        }
    }

    pub fn len(&self) -> usize {
        match &self.state {
            NodeState::Empty => 0,
            NodeState::Singleton(_) => 1,
            NodeState::Branching(branch) => {
                branch.by_start.len()
                    + branch.left.as_ref().map_or(0, |left| left.len())
                    + branch.right.as_ref().map_or(0, |right| right.len())
            }
        }
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        match &self.state {
            NodeState::Branching(branch) => {
                1 + branch.left.as_ref().map_or(0, |left| left.node_count())
                    + branch.right.as_ref().map_or(0, |right| right.node_count())
            }
            _ => 1,
        }
    }

    pub fn height(&self) -> usize {
        match &self.state {
            NodeState::Branching(branch) => {
                let left = branch.left.as_ref().map_or(0, |left| left.height());
                let right = branch.right.as_ref().map_or(0, |right| right.height());
                1 + left.max(right)
            }
            _ => 1,
        }
    }
}

/// `floor((min + max) / 2)` without overflowing `i64`.
fn center(min: i64, max: i64) -> i64 {
    ((min as i128 + max as i128).div_euclid(2)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with(min: i64, max: i64, intervals: &[(i64, i64, u32)]) -> Node<u32> {
        let mut node = Node::new(min, max);
        for &(start, end, value) in intervals {
            node.insert(Interval::new(start, end, value));
        }
        node.sort();
        node
    }

    fn values(node: &Node<u32>, x: i64) -> Vec<u32> {
        let mut result = Vec::new();
        node.query(x, &mut result);
        let mut values: Vec<u32> = result.into_iter().map(|interval| interval.value).collect();
        values.sort();
        values
    }

    #[test]
    fn center_is_floored() {
        assert_eq!(center(0, 100), 50);
        assert_eq!(center(0, 1), 0);
        assert_eq!(center(3, 6), 4);
        assert_eq!(center(-3, 0), -2);
        assert_eq!(center(-1, 0), -1);
        assert_eq!(center(i64::MIN, i64::MAX), -1);
        assert_eq!(center(i64::MAX - 1, i64::MAX), i64::MAX - 1);
    }

    #[test]
    #[should_panic(expected = "must have min < max")]
    fn new_rejects_empty_range() {
        Node::<()>::new(5, 5);
    }

    #[test]
    #[should_panic(expected = "must have min < max")]
    fn new_rejects_inverted_range() {
        Node::<()>::new(6, 5);
    }

    #[test]
    fn singleton_allocates_nothing() {
        let node = node_with(0, 100, &[(10, 20, 1)]);

        assert_eq!(node.state, NodeState::Singleton(Interval::new(10, 20, 1)));
        assert_eq!(node.len(), 1);
        assert_eq!(node.node_count(), 1);
        assert_eq!(values(&node, 9), Vec::<u32>::new());
        assert_eq!(values(&node, 10), vec![1]);
        assert_eq!(values(&node, 19), vec![1]);
        assert_eq!(values(&node, 20), Vec::<u32>::new());
    }

    #[test]
    fn second_insert_promotes_and_routes_both() {
        let node = node_with(0, 100, &[(10, 20, 1), (60, 70, 2)]);

        let branch = match &node.state {
            NodeState::Branching(branch) => branch,
            state => panic!("expected a branching node, got {:?}", state),
        };
        assert!(branch.by_start.is_empty());
        assert!(branch.by_end.is_empty());

        let left = branch.left.as_ref().unwrap();
        assert_eq!((left.min, left.max, left.center), (0, 50, 25));
        assert_eq!(left.state, NodeState::Singleton(Interval::new(10, 20, 1)));

        let right = branch.right.as_ref().unwrap();
        assert_eq!((right.min, right.max, right.center), (50, 100, 75));
        assert_eq!(right.state, NodeState::Singleton(Interval::new(60, 70, 2)));
    }

    #[test]
    fn straddling_intervals_stay_mid() {
        // `end == center` goes left, `start == center` stays mid.
        let node = node_with(0, 100, &[(40, 50, 1), (50, 60, 2), (45, 55, 3)]);

        let branch = match &node.state {
            NodeState::Branching(branch) => branch,
            state => panic!("expected a branching node, got {:?}", state),
        };
        let mids: Vec<u32> = branch.by_start.iter().map(|interval| interval.value).collect();
        assert_eq!(mids, vec![3, 2]);
        assert!(branch.left.is_some());
        assert!(branch.right.is_none());
    }

    #[test]
    fn sort_orders_both_views() {
        let node = node_with(
            0,
            100,
            &[(30, 60, 1), (10, 90, 2), (50, 51, 3), (20, 70, 4)],
        );

        let branch = match &node.state {
            NodeState::Branching(branch) => branch,
            state => panic!("expected a branching node, got {:?}", state),
        };
        let starts: Vec<i64> = branch.by_start.iter().map(|interval| interval.start).collect();
        assert_eq!(starts, vec![10, 20, 30, 50]);
        let ends: Vec<i64> = branch
            .by_end
            .iter()
            .map(|&i| branch.by_start[i].end)
            .collect();
        assert_eq!(ends, vec![90, 70, 60, 51]);
    }

    #[test]
    fn sort_is_idempotent() {
        let intervals = [(30, 60, 1), (10, 90, 2), (30, 60, 3), (20, 70, 4), (1, 2, 5)];
        let once = node_with(0, 100, &intervals);
        let mut twice = once.clone();
        twice.sort();

        assert_eq!(once, twice);
    }

    #[test]
    fn sort_reaches_children() {
        let mut node = Node::new(0, 100);
        node.insert(Interval::new(1, 2, 0));
        node.insert(Interval::new(20, 40, 1));
        node.insert(Interval::new(10, 30, 2));
        node.insert(Interval::new(5, 45, 3));
        node.sort();

        // All three straddle the left child's center (25).
        for x in 5..45 {
            let mut expected: Vec<u32> = [(20, 40, 1), (10, 30, 2), (5, 45, 3)]
                .iter()
                .filter(|(start, end, _)| *start <= x && x < *end)
                .map(|(_, _, value)| *value)
                .collect();
            expected.sort();
            assert_eq!(values(&node, x), expected, "x = {}", x);
        }
    }

    #[test]
    fn width_one_node_keeps_everything_mid() {
        let node = node_with(0, 1, &[(-5, -1, 1), (3, 8, 2), (0, 1, 3), (-2, 4, 4)]);

        let branch = match &node.state {
            NodeState::Branching(branch) => branch,
            state => panic!("expected a branching node, got {:?}", state),
        };
        assert_eq!(branch.by_start.len(), 4);
        assert!(branch.left.is_none());
        assert!(branch.right.is_none());

        assert_eq!(values(&node, -3), vec![1]);
        assert_eq!(values(&node, -2), vec![1, 4]);
        assert_eq!(values(&node, -1), vec![4]);
        assert_eq!(values(&node, 0), vec![3, 4]);
        assert_eq!(values(&node, 3), vec![2, 4]);
        assert_eq!(values(&node, 4), vec![2]);
        assert_eq!(values(&node, 8), Vec::<u32>::new());
    }

    #[test]
    fn contains_point_agrees_with_query() {
        let empty = Node::<u32>::new(0, 10);
        assert!(!empty.contains_point(5));

        let single = node_with(0, 10, &[(2, 4, 1)]);
        assert!(!single.contains_point(1));
        assert!(single.contains_point(2));
        assert!(!single.contains_point(4));

        let node = node_with(
            0,
            100,
            &[(10, 20, 1), (40, 60, 2), (70, 90, 3), (-20, -5, 4), (120, 130, 5)],
        );
        for x in -30..140 {
            assert_eq!(node.contains_point(x), !values(&node, x).is_empty(), "x = {}", x);
        }
    }

    #[test]
    fn len_node_count_and_height() {
        let empty = Node::<u32>::new(0, 100);
        assert_eq!((empty.len(), empty.node_count(), empty.height()), (0, 1, 1));

        let node = node_with(0, 100, &[(10, 20, 1), (15, 25, 2), (50, 60, 3)]);
        assert_eq!(node.len(), 3);
        // [0,100) -> [0,50) -> [0,25) -> [12,25)
        assert_eq!(node.node_count(), 4);
        assert_eq!(node.height(), 4);
    }

    #[test]
    fn display() {
        let node = node_with(0, 100, &[(10, 20, 1), (45, 55, 2)]);
        assert_eq!(
            format!("{}", node),
            " { [0,100[ @50 mid:[45,55[ left: { [0,50[ @25 single:[10,20[ }  } "
        );
    }
}
