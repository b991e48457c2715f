//! Failures of a single route search.
//!
//! A start and end resolving to the same node is not an error; it yields a
//! single-node route of length zero.

use crate::NodeId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The graph has no node that lies on a road, so no query can be anchored.
    #[error("graph has no routable nodes")]
    EmptyGraph,

    /// The open set ran dry before the goal was popped.
    #[error("no route from {start} to {end} (expanded {expanded} nodes)")]
    SearchExhausted {
        start: NodeId,
        end: NodeId,
        expanded: usize,
    },

    /// Walking parents from the goal hit a node that was never discovered.
    #[error("parent chain broken at {0}")]
    BrokenParentChain(NodeId),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            RouteError::EmptyGraph.to_string(),
            "graph has no routable nodes"
        );

        let err = RouteError::SearchExhausted {
            start: NodeId(1),
            end: NodeId(4),
            expanded: 3,
        };
        assert_eq!(err.to_string(), "no route from N1 to N4 (expanded 3 nodes)");

        assert_eq!(
            RouteError::BrokenParentChain(NodeId(9)).to_string(),
            "parent chain broken at N9"
        );
    }
}
