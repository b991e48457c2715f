use crate::heuristic::{edge_cost, Heuristic, StraightLine};
use crate::{
    Distance, NeighborPolicy, NodeId, NodeMap, OpenList, Point, RouteError, RouteGraph,
    SearchConfig,
};

use tracing::{debug, trace, warn};

/// Per-search bookkeeping for a discovered node. A node is visited iff it
/// has an entry in the state table.
#[derive(Debug, Clone, Copy)]
struct NodeState {
    g: Distance,
    h: Distance,
    parent: Option<NodeId>,
    expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    GoalReached,
    Exhausted,
}

/// A node on a finished route, copied out of the graph.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RouteNode {
    pub id: NodeId,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Route {
    /// Start first, goal last.
    pub nodes: Vec<RouteNode>,
    /// Length of the route in real-world units.
    pub distance: Distance,
    /// Number of nodes expanded to find the route.
    pub expanded: usize,
}

/// A* search between two points of a [`RouteGraph`].
///
/// One planner answers one query. All search state lives in the planner, so
/// any number of planners can share the same graph.
pub struct RoutePlanner<'g, G: RouteGraph + ?Sized> {
    graph: &'g G,
    config: SearchConfig,
    start_node: NodeId,
    end_node: NodeId,
    states: NodeMap<NodeState>,
    open_list: OpenList,
    status: SearchStatus,
    distance: Distance,
    expanded: usize,
}

impl<'g, G: RouteGraph + ?Sized> RoutePlanner<'g, G> {
    /// Create a planner for a query given in percent of the map (0-100) on
    /// both axes. Each point is anchored to its closest routable node.
    pub fn new(
        graph: &'g G,
        start: (f32, f32),
        end: (f32, f32),
        config: SearchConfig,
    ) -> Result<Self, RouteError> {
        let start_node = graph
            .find_closest_node(Point::from_percent(start.0, start.1))
            .ok_or(RouteError::EmptyGraph)?;
        let end_node = graph
            .find_closest_node(Point::from_percent(end.0, end.1))
            .ok_or(RouteError::EmptyGraph)?;
        Ok(Self::between(graph, start_node, end_node, config))
    }

    /// Create a planner between two known nodes.
    pub fn between(graph: &'g G, start_node: NodeId, end_node: NodeId, config: SearchConfig) -> Self {
        let len = graph.node_count();
        Self {
            graph,
            config,
            start_node,
            end_node,
            states: NodeMap::with_capacity(len),
            open_list: OpenList::with_capacity(len),
            status: SearchStatus::Running,
            distance: 0.0,
            expanded: 0,
        }
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Scaled length of the last route found. Zero until a search succeeds.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn calculate_h_value(&self, node: NodeId) -> Distance {
        StraightLine::new(self.graph, self.end_node).cost(node)
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.graph.position(node) == self.graph.position(self.end_node)
    }

    fn discover(&mut self, node: NodeId, parent: Option<NodeId>, g: Distance) {
        let h = self.calculate_h_value(node);
        self.states.insert(
            node,
            NodeState {
                g,
                h,
                parent,
                expanded: false,
            },
        );
        self.open_list.push(node, g, h);
    }

    /// Expand `current`, discovering its neighbors.
    pub fn add_neighbors(&mut self, current: NodeId) {
        let Some(state) = self.states.get_mut(current) else {
            return;
        };
        state.expanded = true;
        let current_g = state.g;
        self.expanded += 1;

        for neighbor in self.graph.neighbors(current) {
            let g = current_g + edge_cost(self.graph, current, neighbor);
            match self.states.get_mut(neighbor) {
                None => self.discover(neighbor, Some(current), g),
                Some(state)
                    if self.config.neighbor_policy == NeighborPolicy::Relax
                        && !state.expanded
                        && g < state.g =>
                {
                    state.g = g;
                    state.parent = Some(current);
                    let h = state.h;
                    self.open_list.push(neighbor, g, h);
                }
                Some(_) => {}
            }
        }
        trace!(node = %current, g = current_g, open = self.open_list.len(), "expanded");
    }

    /// Pop the open candidate with the lowest f, or `None` when the open set
    /// is exhausted. Entries superseded by a cheaper discovery are skipped.
    pub fn next_node(&mut self) -> Option<NodeId> {
        while let Some(candidate) = self.open_list.pop() {
            let Some(state) = self.states.get(candidate.node) else {
                continue;
            };
            if state.expanded || candidate.g > state.g {
                continue;
            }
            return Some(candidate.node);
        }
        None
    }

    fn reset(&mut self) {
        self.states.clear();
        self.open_list.clear();
        self.status = SearchStatus::Running;
        self.distance = 0.0;
        self.expanded = 0;
    }

    /// Run the search. Calling it again repeats the same search from scratch.
    pub fn a_star_search(&mut self) -> Result<Route, RouteError> {
        self.reset();
        debug!(start = %self.start_node, end = %self.end_node, policy = ?self.config.neighbor_policy, "route search");

        self.discover(self.start_node, None, 0.0);
        let goal = loop {
            match self.next_node() {
                Some(current) if self.is_goal(current) => break current,
                Some(current) => self.add_neighbors(current),
                None => {
                    self.status = SearchStatus::Exhausted;
                    warn!(start = %self.start_node, end = %self.end_node, expanded = self.expanded, "open list exhausted before reaching goal");
                    return Err(RouteError::SearchExhausted {
                        start: self.start_node,
                        end: self.end_node,
                        expanded: self.expanded,
                    });
                }
            }
        };
        self.status = SearchStatus::GoalReached;

        let nodes = self.construct_final_path(goal)?;
        debug!(hops = nodes.len(), distance = self.distance, expanded = self.expanded, "route found");
        Ok(Route {
            nodes,
            distance: self.distance,
            expanded: self.expanded,
        })
    }

    /// Walk parents from `goal` back to the start node. The start is recognized
    /// by its position. Sets the planner distance to the scaled route length.
    pub fn construct_final_path(&mut self, goal: NodeId) -> Result<Vec<RouteNode>, RouteError> {
        let g = self.graph;
        let start_position = g.position(self.start_node);
        let mut distance = 0.0;
        let mut path = Vec::new();

        let mut current = goal;
        while g.position(current) != start_position {
            let parent = self
                .states
                .get(current)
                .and_then(|s| s.parent)
                .ok_or(RouteError::BrokenParentChain(current))?;
            if path.len() > g.node_count() {
                return Err(RouteError::BrokenParentChain(current));
            }
            path.push(RouteNode {
                id: current,
                position: g.position(current),
            });
            distance += g.distance(current, parent);
            current = parent;
        }
        path.push(RouteNode {
            id: self.start_node,
            position: start_position,
        });
        path.reverse();

        self.distance = distance * g.metric_scale();
        Ok(path)
    }
}
