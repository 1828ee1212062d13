//! End-to-end result pipeline: invoke, parse, enrich, compose.
//!
//! One synchronous pass per request, strictly ordered, nothing cached
//! between invocations. The registry is borrowed read-only; backend and
//! geometry provider are injected so tests can run without a subprocess or
//! network.

use crate::enrich::{enrich_paths, EnrichedPath};
use crate::map::{compose, RouteMap};
use crate::parser::{parse_output, EvacuationResult};
use crate::registry::CoordinateRegistry;
use crate::traits::{PathfindingBackend, RouteGeometryProvider, RouteQuery};

/// Everything one find-path request produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Backend stdout verbatim; always shown, even on failure.
    pub raw_output: String,
    pub result: EvacuationResult,
    pub enriched: Vec<EnrichedPath>,
    /// Node ids with no coordinate, deduplicated.
    pub missing_nodes: Vec<String>,
    /// Non-fatal degradations accumulated along the way.
    pub warnings: Vec<String>,
    /// `None` when the backend reported no path.
    pub map: Option<RouteMap>,
}

pub struct EvacuationPipeline<'a, B, G> {
    registry: &'a CoordinateRegistry,
    backend: &'a B,
    geometry: &'a G,
}

impl<'a, B, G> EvacuationPipeline<'a, B, G>
where
    B: PathfindingBackend,
    G: RouteGeometryProvider + Sync,
{
    pub fn new(registry: &'a CoordinateRegistry, backend: &'a B, geometry: &'a G) -> Self {
        Self {
            registry,
            backend,
            geometry,
        }
    }

    /// Runs one request start to finish. Never panics and never retries;
    /// degraded steps surface through `warnings` and `missing_nodes`.
    pub fn run(&self, query: &RouteQuery) -> PipelineOutcome {
        let raw_output = self.backend.query(query);
        let result = parse_output(&raw_output);

        if result.is_error() {
            return PipelineOutcome {
                raw_output,
                result,
                enriched: Vec::new(),
                missing_nodes: Vec::new(),
                warnings: Vec::new(),
                map: None,
            };
        }

        let report = enrich_paths(&result.paths, self.registry, self.geometry);
        let map = compose(&report.paths, self.registry, result.hospital.as_deref());

        PipelineOutcome {
            raw_output,
            result,
            enriched: report.paths,
            missing_nodes: report.missing_nodes,
            warnings: report.warnings,
            map: Some(map),
        }
    }
}
