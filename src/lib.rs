//! evac-routes result pipeline
//!
//! Turns the evacuation pathfinding executable's textual output into
//! map-ready routes: parse, resolve coordinates, fetch road geometry,
//! compose a map artifact.

pub mod traits;
pub mod geometry;
pub mod registry;
pub mod backend;
pub mod parser;
pub mod ors;
pub mod enrich;
pub mod map;
pub mod pipeline;
