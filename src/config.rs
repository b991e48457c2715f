//! Search configuration.

use serde::{Deserialize, Serialize};

/// How a neighbor that has already been discovered is treated when it is
/// reached again through another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborPolicy {
    /// The first discovery fixes a node's parent and cost. Every node enters
    /// the open set at most once. Routes can be longer than the shortest one
    /// when a node is first reached over a costlier edge sequence.
    #[default]
    FirstDiscovery,
    /// Standard A* relaxation: a node that has not been expanded yet is
    /// re-parented whenever a strictly cheaper path to it is found.
    Relax,
}

/// Parameters for a single [`RoutePlanner`](crate::RoutePlanner) search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub neighbor_policy: NeighborPolicy,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the neighbor policy.
    pub fn with_neighbor_policy(mut self, policy: NeighborPolicy) -> Self {
        self.neighbor_policy = policy;
        self
    }

    /// Shorthand for a config using [`NeighborPolicy::Relax`].
    pub fn relaxing() -> Self {
        Self::new().with_neighbor_policy(NeighborPolicy::Relax)
    }
}
