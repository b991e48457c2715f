//! A* route planning over undirected road graphs.
//!
//! The graph itself is supplied through [`RouteGraph`]; [`RouteModel`] is an
//! in-memory implementation. A [`RoutePlanner`] resolves two query points to
//! graph nodes and searches between them, keeping all search scratch state in
//! its own table so the graph is only ever borrowed.

mod config;
mod error;
mod heuristic;
mod map;
mod model;
mod open_list;
mod planner;

pub use config::{NeighborPolicy, SearchConfig};
pub use error::RouteError;
pub use heuristic::{edge_cost, Heuristic, StraightLine};
pub use map::NodeMap;
pub use model::{RouteGraph, RouteModel};
pub use open_list::{Candidate, OpenList};
pub use planner::{Route, RouteNode, RoutePlanner, SearchStatus};

pub type Distance = f32;

// TODO: u32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("N{}", self.0))
    }
}

/// A coordinate in normalized map space, both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a point given in percent of the map (0-100) to normalized space.
    pub fn from_percent(x: f32, y: f32) -> Self {
        Self {
            x: x * 0.01,
            y: y * 0.01,
        }
    }

    pub fn distance(&self, o: &Point) -> Distance {
        let dx = self.x - o.x;
        let dy = self.y - o.y;
        (dx.powi(2) + dy.powi(2)).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

#[cfg(test)]
mod test {
    use crate::{NodeId, Point};

    #[test]
    fn node_display() {
        assert_eq!(NodeId(7).to_string(), "N7");
        assert_eq!(NodeId(7).index(), 7);
    }

    #[test]
    fn percent_is_normalized() {
        let p = Point::from_percent(50.0, 25.0);
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&a), 0.0);
    }
}
