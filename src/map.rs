//! Map artifact composition.
//!
//! Produces a serializable document for the dashboard to render: a view
//! center, one colored polyline per path, and typed markers. Colors cycle
//! a fixed palette by path index, so the same input always renders the
//! same way.

use serde::Serialize;
use tracing::warn;

use crate::enrich::EnrichedPath;
use crate::registry::CoordinateRegistry;

/// Path colors, cycled by path index: path `i` gets
/// `PATH_PALETTE[i % PATH_PALETTE.len()]`.
pub const PATH_PALETTE: [&str; 8] = [
    "blue",
    "red",
    "green",
    "purple",
    "orange",
    "darkred",
    "cadetblue",
    "darkgreen",
];

/// View center when neither a hospital nor any path coordinate resolves.
pub const DEFAULT_CENTER: (f64, f64) = (0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    End,
    Intermediate,
    Hospital,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// (latitude, longitude)
    pub location: (f64, f64),
    pub label: String,
    pub kind: MarkerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPath {
    pub color: &'static str,
    /// Node sequence, shown on hover.
    pub tooltip: String,
    /// Detailed geometry, (latitude, longitude) per point.
    pub points: Vec<(f64, f64)>,
}

/// The composed artifact: everything the dashboard needs to draw the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMap {
    pub center: (f64, f64),
    pub paths: Vec<MapPath>,
    pub markers: Vec<MapMarker>,
}

/// Assembles all enriched paths and the optional hospital into one map.
///
/// Centering prefers the hospital's coordinate, then the first point of the
/// first path, then [`DEFAULT_CENTER`]. A path without points is skipped
/// entirely; other paths still compose.
pub fn compose(
    enriched: &[EnrichedPath],
    registry: &CoordinateRegistry,
    hospital: Option<&str>,
) -> RouteMap {
    let hospital_location = hospital.and_then(|id| registry.coordinate(id));

    let center = hospital_location
        .or_else(|| {
            enriched
                .iter()
                .find_map(|path| path.geometry.points().first().copied())
        })
        .unwrap_or(DEFAULT_CENTER);

    let mut paths = Vec::new();
    let mut markers = Vec::new();

    for (index, path) in enriched.iter().enumerate() {
        if path.geometry.is_empty() || path.waypoints.is_empty() {
            warn!(path = %path.nodes.join(" -> "), "path has no drawable coordinates, skipping");
            continue;
        }

        paths.push(MapPath {
            color: PATH_PALETTE[index % PATH_PALETTE.len()],
            tooltip: path.nodes.join(" -> "),
            points: path.geometry.points().to_vec(),
        });

        let last = path.waypoints.len() - 1;
        for (position, waypoint) in path.waypoints.iter().enumerate() {
            let (kind, label) = if position == 0 {
                (MarkerKind::Start, format!("Start: {}", waypoint.node))
            } else if position == last {
                (MarkerKind::End, format!("End: {}", waypoint.node))
            } else {
                (MarkerKind::Intermediate, waypoint.node.clone())
            };
            markers.push(MapMarker {
                location: waypoint.location,
                label,
                kind,
            });
        }
    }

    if let (Some(id), Some(location)) = (hospital, hospital_location) {
        markers.push(MapMarker {
            location,
            label: format!("Hospital: {id}"),
            kind: MarkerKind::Hospital,
        });
    }

    RouteMap {
        center,
        paths,
        markers,
    }
}
