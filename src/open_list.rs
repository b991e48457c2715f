use crate::{Distance, NodeId};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A discovered node waiting to be expanded.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub node: NodeId,
    /// Cost from the start when this entry was pushed.
    pub g: Distance,
    /// `g` plus the heuristic estimate to the goal.
    pub f: Distance,
}

// Max-heap ordering, so the "greatest" candidate is the one to expand next:
// lowest f, then highest g (deeper towards the goal), then lowest node id.
impl Ord for Candidate {
    fn cmp(&self, o: &Self) -> Ordering {
        o.f.total_cmp(&self.f)
            .then_with(|| self.g.total_cmp(&o.g))
            .then_with(|| o.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// The open set of a search: always yields the candidate with the lowest f.
#[derive(Debug, Default)]
pub struct OpenList {
    queue: BinaryHeap<Candidate>,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            queue: BinaryHeap::with_capacity(cap),
        }
    }

    pub fn push(&mut self, node: NodeId, g: Distance, h: Distance) {
        self.queue.push(Candidate { node, g, f: g + h });
    }

    pub fn pop(&mut self) -> Option<Candidate> {
        self.queue.pop()
    }

    pub fn peek(&self) -> Option<&Candidate> {
        self.queue.peek()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn c(node: usize, g: Distance, f: Distance) -> Candidate {
        Candidate {
            node: NodeId(node),
            g,
            f,
        }
    }

    #[test]
    fn lowest_f_first() {
        let mut open = OpenList::new();
        open.push(NodeId(0), 1.0, 4.0);
        open.push(NodeId(1), 2.0, 0.5);
        open.push(NodeId(2), 0.0, 3.0);
        let order: Vec<NodeId> = std::iter::from_fn(|| open.pop()).map(|c| c.node).collect();
        assert_eq!(order, vec![NodeId(1), NodeId(2), NodeId(0)]);
        assert!(open.is_empty());
        assert!(open.pop().is_none());
    }

    #[test]
    fn ties_prefer_deeper_then_lower_id() {
        assert!(c(0, 2.0, 5.0) > c(1, 1.0, 5.0));
        assert!(c(3, 2.0, 5.0) < c(1, 2.0, 5.0));
        assert_eq!(c(1, 2.0, 5.0), c(1, 2.0, 5.0));
    }

    #[test]
    fn matches_sort_then_pop_back() {
        let entries = [
            c(0, 0.3, 1.7),
            c(1, 0.1, 0.9),
            c(2, 0.8, 2.2),
            c(3, 0.5, 1.1),
            c(4, 0.2, 0.4),
        ];

        let mut sorted = entries.to_vec();
        let mut open = OpenList::with_capacity(entries.len());
        for e in &entries {
            open.push(e.node, e.g, e.f - e.g);
        }

        while !sorted.is_empty() {
            sorted.sort_by(|a, b| b.f.total_cmp(&a.f));
            let expected = sorted.pop().map(|c| c.node);
            assert_eq!(open.peek().map(|c| c.node), expected);
            assert_eq!(open.pop().map(|c| c.node), expected);
        }
        assert_eq!(open.len(), 0);
    }

    #[test]
    fn nan_does_not_panic() {
        let mut open = OpenList::new();
        open.push(NodeId(0), f32::NAN, 0.0);
        open.push(NodeId(1), 1.0, 0.0);
        assert_eq!(open.len(), 2);
        assert!(open.pop().is_some());
        assert!(open.pop().is_some());
    }
}
