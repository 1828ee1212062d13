//! OpenRouteService HTTP adapter for route geometry.
//!
//! POSTs the waypoint list to the directions endpoint in GeoJSON format and
//! decodes the first feature's geometry. This is the only place the
//! longitude-first wire order exists; everything else in the crate is
//! latitude-first.

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryError, RouteGeometry};
use crate::traits::RouteGeometryProvider;

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub api_key: String,
    /// Road profile, e.g. "driving-car".
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            api_key: String::new(),
            profile: "driving-car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

#[derive(Serialize)]
struct DirectionsRequest {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: FeatureGeometry,
}

#[derive(Deserialize)]
struct FeatureGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl RouteGeometryProvider for OrsClient {
    fn geometry_for(&self, waypoints: &[(f64, f64)]) -> Result<RouteGeometry, GeometryError> {
        if waypoints.len() < 2 {
            return Err(GeometryError::TooFewWaypoints(waypoints.len()));
        }

        // Wire order is (lon, lat).
        let body = DirectionsRequest {
            coordinates: waypoints.iter().map(|&(lat, lon)| [lon, lat]).collect(),
        };

        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url, self.config.profile
        );

        let response = self
            .client
            .post(url)
            .header("Authorization", self.config.api_key.as_str())
            .json(&body)
            .send()?
            .error_for_status()?
            .json::<DirectionsResponse>()?;

        let feature = response
            .features
            .into_iter()
            .next()
            .ok_or_else(|| GeometryError::Malformed("no route features in response".to_string()))?;

        if feature.geometry.coordinates.is_empty() {
            return Err(GeometryError::Malformed("empty route geometry".to_string()));
        }

        Ok(RouteGeometry::from_lon_lat(feature.geometry.coordinates))
    }
}
