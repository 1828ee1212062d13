//! Path enrichment: raw node sequences to drivable road geometry.
//!
//! Each backend path is resolved against the registry and sent to the
//! routing-geometry provider. Every failure here degrades instead of
//! aborting: unknown nodes are skipped and reported, a provider outage
//! falls back to the straight-line waypoints. Paths are independent, so
//! the per-path network calls run in parallel.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::geometry::RouteGeometry;
use crate::registry::CoordinateRegistry;
use crate::traits::RouteGeometryProvider;

/// Minimum resolved coordinates for a path to be routable.
const MIN_ROUTE_POINTS: usize = 2;

/// A node that resolved to a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub node: String,
    /// (latitude, longitude)
    pub location: (f64, f64),
}

/// One backend path with resolved waypoints and detailed geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPath {
    /// Node ids in traversal order, exactly as the backend reported them.
    pub nodes: Vec<String>,
    /// Resolved nodes in original order; unresolvable nodes are omitted.
    pub waypoints: Vec<Waypoint>,
    /// Detailed route geometry. Equals the waypoint coordinates when the
    /// provider failed and the straight-line fallback was used.
    pub geometry: RouteGeometry,
}

impl EnrichedPath {
    /// Waypoint coordinates in order, the straight-line approximation.
    pub fn waypoint_coordinates(&self) -> Vec<(f64, f64)> {
        self.waypoints.iter().map(|w| w.location).collect()
    }
}

/// Outcome of enriching a batch of paths.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentReport {
    pub paths: Vec<EnrichedPath>,
    /// Node ids that failed coordinate resolution, deduplicated, for
    /// user-facing warnings.
    pub missing_nodes: Vec<String>,
    /// Non-fatal degradations: provider fallbacks, dropped paths.
    pub warnings: Vec<String>,
}

/// Enriches every path. Paths that keep fewer than [`MIN_ROUTE_POINTS`]
/// resolvable coordinates are dropped from the output with a warning;
/// nothing in here aborts the pipeline.
pub fn enrich_paths<P>(
    paths: &[Vec<String>],
    registry: &CoordinateRegistry,
    provider: &P,
) -> EnrichmentReport
where
    P: RouteGeometryProvider + Sync,
{
    let per_path: Vec<PathOutcome> = paths
        .par_iter()
        .map(|nodes| enrich_one(nodes, registry, provider))
        .collect();

    let mut report = EnrichmentReport::default();
    let mut missing = BTreeSet::new();
    for outcome in per_path {
        if let Some(path) = outcome.path {
            report.paths.push(path);
        }
        missing.extend(outcome.missing);
        report.warnings.extend(outcome.warnings);
    }
    report.missing_nodes = missing.into_iter().collect();
    report
}

struct PathOutcome {
    path: Option<EnrichedPath>,
    missing: Vec<String>,
    warnings: Vec<String>,
}

fn enrich_one<P>(nodes: &[String], registry: &CoordinateRegistry, provider: &P) -> PathOutcome
where
    P: RouteGeometryProvider,
{
    let mut waypoints = Vec::with_capacity(nodes.len());
    let mut missing = Vec::new();
    for node in nodes {
        match registry.coordinate(node) {
            Some(location) => waypoints.push(Waypoint {
                node: node.clone(),
                location,
            }),
            None => {
                warn!(node = %node, "no coordinate for node");
                missing.push(node.clone());
            }
        }
    }

    let mut warnings = Vec::new();
    if waypoints.len() < MIN_ROUTE_POINTS {
        warnings.push(format!(
            "path '{}' skipped: only {} of {} nodes have coordinates",
            nodes.join(" -> "),
            waypoints.len(),
            nodes.len()
        ));
        return PathOutcome {
            path: None,
            missing,
            warnings,
        };
    }

    let coordinates: Vec<(f64, f64)> = waypoints.iter().map(|w| w.location).collect();
    let geometry = match provider.geometry_for(&coordinates) {
        Ok(geometry) if !geometry.is_empty() => geometry,
        Ok(_) => {
            warn!(path = %nodes.join(" -> "), "provider returned empty geometry, using straight lines");
            warnings.push(format!(
                "routing service returned no geometry for '{}', drawing straight lines",
                nodes.join(" -> ")
            ));
            RouteGeometry::new(coordinates)
        }
        Err(err) => {
            warn!(path = %nodes.join(" -> "), error = %err, "routing service failed, using straight lines");
            warnings.push(format!(
                "routing service unavailable for '{}' ({err}), drawing straight lines",
                nodes.join(" -> ")
            ));
            RouteGeometry::new(coordinates)
        }
    };

    PathOutcome {
        path: Some(EnrichedPath {
            nodes: nodes.to_vec(),
            waypoints,
            geometry,
        }),
        missing,
        warnings,
    }
}
