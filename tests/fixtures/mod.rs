//! Shared test fixtures: an in-memory registry plus trait doubles for the
//! pathfinding backend and the routing-geometry provider.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use evac_routes::geometry::{GeometryError, RouteGeometry};
use evac_routes::registry::CoordinateRegistry;
use evac_routes::traits::{PathfindingBackend, RouteGeometryProvider, RouteQuery};

pub const COORDS_CSV: &str = "\
id,latitude,longitude
CityHall,36.1147,-115.1728
Stadium,36.1727,-115.1580
Depot,36.1215,-115.1739
Clinic,36.1300,-115.1500
";

pub const HOSPITALS_CSV: &str = "\
Location,Phone,Capacity,Specialization,Emergency,Type
Clinic,555-0101,120,Trauma,Yes,General
";

pub fn registry() -> CoordinateRegistry {
    CoordinateRegistry::from_readers(Cursor::new(COORDS_CSV), Cursor::new(HOSPITALS_CSV))
        .expect("fixture registry loads")
}

/// Backend double that replays a canned stdout blob.
pub struct ScriptedBackend {
    pub output: String,
}

impl ScriptedBackend {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
        }
    }
}

impl PathfindingBackend for ScriptedBackend {
    fn query(&self, _query: &RouteQuery) -> String {
        self.output.clone()
    }
}

/// Geometry double that inserts a midpoint into every segment, so the
/// result is strictly denser than the input, and counts invocations.
#[derive(Default)]
pub struct DenseGeometry {
    pub calls: AtomicUsize,
}

impl DenseGeometry {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteGeometryProvider for DenseGeometry {
    fn geometry_for(&self, waypoints: &[(f64, f64)]) -> Result<RouteGeometry, GeometryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if waypoints.len() < 2 {
            return Err(GeometryError::TooFewWaypoints(waypoints.len()));
        }
        let mut points = Vec::new();
        for pair in waypoints.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            points.push(a);
            points.push(((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0));
        }
        points.push(waypoints[waypoints.len() - 1]);
        Ok(RouteGeometry::new(points))
    }
}

/// Geometry double simulating a service outage.
#[derive(Default)]
pub struct FailingGeometry;

impl RouteGeometryProvider for FailingGeometry {
    fn geometry_for(&self, _waypoints: &[(f64, f64)]) -> Result<RouteGeometry, GeometryError> {
        Err(GeometryError::Malformed("scripted outage".to_string()))
    }
}

/// Geometry double returning a well-formed but empty geometry.
#[derive(Default)]
pub struct EmptyGeometry;

impl RouteGeometryProvider for EmptyGeometry {
    fn geometry_for(&self, _waypoints: &[(f64, f64)]) -> Result<RouteGeometry, GeometryError> {
        Ok(RouteGeometry::new(Vec::new()))
    }
}
