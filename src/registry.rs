//! Reference-table registry: node coordinates and hospital metadata.
//!
//! Both tables load once per session from header-having CSV files and are
//! immutable afterwards, so the registry can be shared freely across
//! requests without locking.
//!
//! # Coordinate table
//!
//! Column 1 is the node id, columns 2-3 are latitude/longitude. Extra
//! columns are ignored.
//!
//! ```csv
//! id,latitude,longitude
//! CityHall,36.1147,-115.1728
//! Stadium,36.1727,-115.1580
//! ```
//!
//! # Hospital table
//!
//! Header names are the record keys. The `Location` column is required and
//! must match node ids; every other column passes through untouched, so new
//! columns (phone, capacity, ...) need no code change.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Hospital table column that keys records to node ids.
const LOCATION_COLUMN: &str = "Location";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("reference table parse error: {0}")]
    Parse(String),

    #[error("hospital table is missing the required \"Location\" column")]
    MissingLocationColumn,
}

/// Hospital metadata keyed by the hospital table's header names.
///
/// No fixed schema beyond `Location`: whatever columns the table carries
/// are exposed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HospitalRecord {
    fields: BTreeMap<String, String>,
}

impl HospitalRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Read-only lookup of node coordinates and hospital records.
#[derive(Debug, Clone, Default)]
pub struct CoordinateRegistry {
    coordinates: HashMap<String, (f64, f64)>,
    node_order: Vec<String>,
    hospitals: HashMap<String, HospitalRecord>,
}

impl CoordinateRegistry {
    /// Loads both reference tables. All-or-nothing per file: a missing file
    /// or malformed row fails the whole load, never a partial registry.
    pub fn from_paths(coordinate_file: &Path, hospital_file: &Path) -> Result<Self, RegistryError> {
        let coords = std::fs::File::open(coordinate_file)?;
        let hospitals = std::fs::File::open(hospital_file)?;
        Self::from_readers(coords, hospitals)
    }

    /// Like [`CoordinateRegistry::from_paths`] but accepts any `Read`
    /// sources. Useful for testing (pass a `std::io::Cursor`).
    pub fn from_readers<C: Read, H: Read>(
        coordinates: C,
        hospitals: H,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        registry.load_coordinates(coordinates)?;
        registry.load_hospitals(hospitals)?;
        info!(
            nodes = registry.coordinates.len(),
            hospitals = registry.hospitals.len(),
            "reference tables loaded"
        );
        Ok(registry)
    }

    fn load_coordinates<R: Read>(&mut self, reader: R) -> Result<(), RegistryError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        for result in csv_reader.records() {
            let record = result?;
            if record.len() < 3 {
                return Err(RegistryError::Parse(format!(
                    "coordinate row {:?} has fewer than 3 columns",
                    record.position().map(|p| p.line()).unwrap_or(0)
                )));
            }
            let id = record[0].trim().to_string();
            let lat = parse_coordinate(&record[1], &id, "latitude")?;
            let lon = parse_coordinate(&record[2], &id, "longitude")?;
            if self.coordinates.insert(id.clone(), (lat, lon)).is_none() {
                self.node_order.push(id);
            }
        }
        Ok(())
    }

    fn load_hospitals<R: Read>(&mut self, reader: R) -> Result<(), RegistryError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let location_index = headers
            .iter()
            .position(|h| h.trim() == LOCATION_COLUMN)
            .ok_or(RegistryError::MissingLocationColumn)?;

        for result in csv_reader.records() {
            let record = result?;
            let location = record
                .get(location_index)
                .unwrap_or_default()
                .trim()
                .to_string();
            if location.is_empty() {
                continue;
            }
            let mut fields = BTreeMap::new();
            for (index, header) in headers.iter().enumerate() {
                if index == location_index {
                    continue;
                }
                let value = record.get(index).unwrap_or_default().trim();
                fields.insert(header.trim().to_string(), value.to_string());
            }
            self.hospitals.insert(location, HospitalRecord { fields });
        }
        Ok(())
    }

    /// (latitude, longitude) for a node, or `None` when the id is unknown.
    pub fn coordinate(&self, node_id: &str) -> Option<(f64, f64)> {
        self.coordinates.get(node_id).copied()
    }

    pub fn hospital(&self, hospital_id: &str) -> Option<&HospitalRecord> {
        self.hospitals.get(hospital_id)
    }

    /// Node ids in file order, for populating location selectors.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }
}

fn parse_coordinate(raw: &str, node_id: &str, axis: &str) -> Result<f64, RegistryError> {
    raw.trim().parse::<f64>().map_err(|_| {
        RegistryError::Parse(format!("node {node_id:?}: invalid {axis} {raw:?}"))
    })
}
