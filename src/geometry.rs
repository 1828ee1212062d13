//! Route geometry as decoded coordinate sequences.
//!
//! Points are stored latitude-first for internal processing and map
//! rendering. The routing service's longitude-first wire order is converted
//! at the request/response boundary, not here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A detailed route geometry as (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    points: Vec<(f64, f64)>,
}

impl RouteGeometry {
    /// Creates a geometry from latitude-first points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Creates a geometry from the service's longitude-first pairs.
    pub fn from_lon_lat(pairs: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self {
            points: pairs.into_iter().map(|[lon, lat]| (lat, lon)).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Routing-geometry service failure.
///
/// Non-fatal to the pipeline: the enricher falls back to straight-line
/// geometry and records a warning.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed geometry response: {0}")]
    Malformed(String),

    #[error("need at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
}
