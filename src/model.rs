use crate::{Distance, NodeId, Point, Route, RouteError, RoutePlanner, SearchConfig};

/// What the planner needs from a road graph.
///
/// Implementations are only borrowed during a search and are never mutated by
/// it, so one graph can serve any number of planners.
pub trait RouteGraph {
    /// The routable node nearest to `p`, or `None` if there is none.
    fn find_closest_node(&self, p: Point) -> Option<NodeId>;

    fn position(&self, n: NodeId) -> Point;

    /// Symmetric distance between two nodes in normalized map units.
    fn distance(&self, a: NodeId, b: NodeId) -> Distance {
        self.position(a).distance(&self.position(b))
    }

    /// Nodes adjacent to `n`. Calling this repeatedly yields the same set.
    fn neighbors(&self, n: NodeId) -> Vec<NodeId>;

    /// Factor converting normalized map distance to real-world units.
    fn metric_scale(&self) -> Distance;

    fn node_count(&self) -> usize;
}

/// In-memory road graph: a node arena plus undirected adjacency.
#[derive(Debug, Clone)]
pub struct RouteModel {
    positions: Vec<Point>,
    adjacency: Vec<Vec<NodeId>>,
    metric_scale: Distance,
    path: Vec<Point>,
}

impl RouteModel {
    pub fn new(metric_scale: Distance) -> Self {
        Self::with_capacity(0, metric_scale)
    }

    pub fn with_capacity(cap: usize, metric_scale: Distance) -> Self {
        Self {
            positions: Vec::with_capacity(cap),
            adjacency: Vec::with_capacity(cap),
            metric_scale,
            path: Vec::new(),
        }
    }

    pub fn add_node(&mut self, p: Point) -> NodeId {
        let n = NodeId(self.positions.len());
        self.positions.push(p);
        self.adjacency.push(Vec::new());
        n
    }

    fn is_valid(&self, n: NodeId) -> bool {
        n.0 < self.positions.len()
    }

    /// Connect `a` and `b` in both directions. Existing edges are kept as is.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        assert!(self.is_valid(a) && self.is_valid(b));
        if a == b || self.has_edge(a, b) {
            return;
        }
        self.adjacency[a.0].push(b);
        self.adjacency[b.0].push(a);
    }

    /// Add a road running through `nodes` in order.
    pub fn add_road(&mut self, nodes: &[NodeId]) {
        for pair in nodes.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        if !self.is_valid(a) || !self.is_valid(b) {
            return false;
        }
        self.adjacency[a.0].contains(&b)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.positions.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The last route published by [`RouteModel::plan`].
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Plan a route between two points given in percent of the map and
    /// publish it to [`RouteModel::path`].
    ///
    /// On failure the previously published path is cleared, so a stale route
    /// is never mistaken for the answer to this query.
    pub fn plan(
        &mut self,
        start: (f32, f32),
        end: (f32, f32),
        config: &SearchConfig,
    ) -> Result<Route, RouteError> {
        let result = RoutePlanner::new(&*self, start, end, config.clone())
            .and_then(|mut planner| planner.a_star_search());
        match &result {
            Ok(route) => self.path = route.nodes.iter().map(|n| n.position).collect(),
            Err(_) => self.path.clear(),
        }
        result
    }
}

impl RouteGraph for RouteModel {
    fn find_closest_node(&self, p: Point) -> Option<NodeId> {
        self.nodes()
            .filter(|n| !self.adjacency[n.0].is_empty())
            .map(|n| (n, self.positions[n.0].distance(&p)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(n, _)| n)
    }

    fn position(&self, n: NodeId) -> Point {
        self.positions[n.0]
    }

    fn neighbors(&self, n: NodeId) -> Vec<NodeId> {
        self.adjacency[n.0].clone()
    }

    fn metric_scale(&self) -> Distance {
        self.metric_scale
    }

    fn node_count(&self) -> usize {
        self.len()
    }
}
