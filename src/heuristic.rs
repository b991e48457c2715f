use crate::{Distance, NodeId, RouteGraph};

/// Estimate of the remaining cost from a node to the goal.
///
/// For the planner to find shortest routes the estimate must never exceed the
/// true remaining cost.
pub trait Heuristic {
    fn cost(&self, node: NodeId) -> Distance;
}

/// Straight-line distance to a fixed goal node.
pub struct StraightLine<'g, G: ?Sized> {
    graph: &'g G,
    goal: NodeId,
}

impl<'g, G: RouteGraph + ?Sized> StraightLine<'g, G> {
    pub fn new(graph: &'g G, goal: NodeId) -> Self {
        Self { graph, goal }
    }
}

impl<G: RouteGraph + ?Sized> Heuristic for StraightLine<'_, G> {
    fn cost(&self, node: NodeId) -> Distance {
        self.graph.distance(node, self.goal)
    }
}

/// Cost of travelling the edge between two adjacent nodes.
pub fn edge_cost<G: RouteGraph + ?Sized>(graph: &G, from: NodeId, to: NodeId) -> Distance {
    graph.distance(from, to)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Point, RouteModel};

    #[test]
    fn straight_line_to_goal() {
        let mut g = RouteModel::new(1.0);
        let a = g.add_node(Point::new(0.0, 0.0));
        let b = g.add_node(Point::new(0.3, 0.0));
        let goal = g.add_node(Point::new(0.3, 0.4));
        g.add_road(&[a, b, goal]);

        let h = StraightLine::new(&g, goal);
        assert!((h.cost(a) - 0.5).abs() < 1e-6);
        assert!((h.cost(b) - 0.4).abs() < 1e-6);
        assert_eq!(h.cost(goal), 0.0);
    }

    #[test]
    fn never_exceeds_edge_sum() {
        let mut g = RouteModel::new(1.0);
        let a = g.add_node(Point::new(0.0, 0.0));
        let b = g.add_node(Point::new(0.2, 0.7));
        let goal = g.add_node(Point::new(0.9, 0.1));
        g.add_road(&[a, b, goal]);

        let h = StraightLine::new(&g, goal);
        let travelled = edge_cost(&g, a, b) + edge_cost(&g, b, goal);
        assert!(h.cost(a) <= travelled);
    }
}
