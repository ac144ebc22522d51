use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::CatalogSettings;
use crate::core::distance::calculate_bounding_box;
use crate::models::Package;

/// Errors that can occur when reading the package record store
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only client for the package/vendor record store
///
/// The matching endpoint pulls candidate packages from here before the
/// pure matcher runs; writes belong to other services.
pub struct CatalogClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl CatalogClient {
    pub fn new(settings: &CatalogSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            client,
        }
    }

    /// Fetch published packages whose vendor sits inside the bounding box
    /// around a point. The record store filters coarsely; exact distance
    /// and eligibility checks happen in the matcher.
    pub async fn packages_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    ) -> Result<Vec<Package>, CatalogError> {
        let bbox = calculate_bounding_box(latitude, longitude, radius_miles);

        let query = format!(
            "status=published&minLat={}&maxLat={}&minLon={}&maxLon={}",
            bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
        );
        let url = format!("{}/packages?{}", self.endpoint, query);

        tracing::debug!("Fetching packages from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "failed to fetch packages: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        parse_packages(json)
    }

    /// Fetch a single package by id
    pub async fn get_package(&self, package_id: &str) -> Result<Package, CatalogError> {
        let url = format!(
            "{}/packages/{}",
            self.endpoint,
            urlencoding::encode(package_id)
        );

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(format!(
                "package {} not found",
                package_id
            )));
        }
        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "failed to fetch package: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        serde_json::from_value(json)
            .map_err(|e| CatalogError::InvalidResponse(format!("failed to parse package: {}", e)))
    }
}

fn parse_packages(json: Value) -> Result<Vec<Package>, CatalogError> {
    let documents = json
        .get("packages")
        .and_then(|d| d.as_array())
        .ok_or_else(|| CatalogError::InvalidResponse("missing packages array".into()))?;

    documents
        .iter()
        .map(|doc| {
            serde_json::from_value(doc.clone()).map_err(|e| {
                CatalogError::InvalidResponse(format!("failed to parse package: {}", e))
            })
        })
        .collect()
}
