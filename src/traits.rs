//! Core traits for the evacuation result pipeline.
//!
//! The external pathfinding executable and the routing-geometry service sit
//! behind these, injected at construction so tests can substitute doubles.

use crate::geometry::{GeometryError, RouteGeometry};

/// One request to the pathfinding backend.
///
/// Mode 1 routes start to an explicit end; mode 2 routes start to the
/// nearest hospital and takes no end node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteQuery {
    Direct { start: String, end: String },
    NearestHospital { start: String },
}

impl RouteQuery {
    /// Positional arguments for the executable: `<mode> <start> [end]`.
    pub fn to_args(&self) -> Vec<String> {
        match self {
            RouteQuery::Direct { start, end } => {
                vec!["1".to_string(), start.clone(), end.clone()]
            }
            RouteQuery::NearestHospital { start } => {
                vec!["2".to_string(), start.clone()]
            }
        }
    }

    pub fn start(&self) -> &str {
        match self {
            RouteQuery::Direct { start, .. } => start,
            RouteQuery::NearestHospital { start } => start,
        }
    }
}

/// Invokes the external pathfinding executable.
///
/// Always yields text: invocation failures are embedded in the returned
/// string, because the display layer shows raw output regardless of outcome.
pub trait PathfindingBackend {
    fn query(&self, query: &RouteQuery) -> String;
}

/// Fetches detailed drivable-road geometry for an ordered waypoint list.
///
/// Waypoints and returned points are (latitude, longitude); any wire-format
/// ordering is the implementation's concern.
pub trait RouteGeometryProvider {
    fn geometry_for(&self, waypoints: &[(f64, f64)]) -> Result<RouteGeometry, GeometryError>;
}
