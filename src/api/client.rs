//! HTTP API Client
//!
//! Functions for communicating with the fleet REST API. Each endpoint
//! gets its own typed response schema, decoded at the fetch boundary.

use gloo_net::http::Request;
use thiserror::Error;

use crate::state::filters::FilterSelection;

/// Port the API listens on, shared with the page's own host.
pub const API_PORT: u16 = 5001;

/// Transport-level failure reported by every fetch function.
///
/// Callers log the error and keep whatever data they already hold;
/// nothing here is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Decode(String),
}

/// Where the API lives. Built once at the root and passed down via
/// context instead of a module-global host binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base: String,
}

impl ApiConfig {
    /// Create a config for an explicit base URL (used by tests and
    /// anything that shouldn't depend on `window`).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Derive the API base from the page's own hostname, fixed port.
    pub fn from_window() -> Self {
        let hostname = web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_else(|| "localhost".to_string());
        Self::new(format!("http://{}:{}", hostname, API_PORT))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

// ============ Response Types ============

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Robot {
    pub id: String,
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
struct RobotsResponse {
    robots: Vec<Robot>,
}

#[derive(Debug, serde::Deserialize)]
struct SitesResponse {
    sites: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ObjectsResponse {
    objects: Vec<String>,
}

/// A sync target paired with one robot. `last_sync` is an opaque
/// display string; `None` means the robot has never synced.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Destination {
    pub robot_id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub last_sync: Option<String>,
}

/// `/picks` payload: one aggregated point per interval bucket plus the
/// server-computed axis bounds. Fields the backend omits default to
/// zero rather than failing the decode.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct PicksResponse {
    pub series: Vec<PickPoint>,
    #[serde(default)]
    pub min_mpph: f64,
    #[serde(default)]
    pub max_mpph: f64,
    #[serde(default)]
    pub min_accumulated_picks: i64,
    #[serde(default)]
    pub max_accumulated_picks: i64,
    #[serde(default)]
    pub min_accumulated_tonnes: f64,
    #[serde(default)]
    pub max_accumulated_tonnes: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct PickPoint {
    pub date: String,
    #[serde(default)]
    pub mpph: f64,
    #[serde(default)]
    pub total_duration: i64,
    #[serde(default)]
    pub total_picks: i64,
    #[serde(default)]
    pub tonnes: f64,
    #[serde(default)]
    pub accumulated_picks: i64,
    #[serde(default)]
    pub accumulated_tonnes: f64,
}

/// `/tasks` payload.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct TasksResponse {
    pub series: Vec<TaskPoint>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct TaskPoint {
    pub date: String,
    #[serde(default)]
    pub total_tasks: i64,
    #[serde(default)]
    pub total_duration: i64,
    #[serde(default)]
    pub total_successful_picks_duration: i64,
    #[serde(default)]
    pub accumulating_total_duration: i64,
}

// ============ API Functions ============

async fn get_json<T>(url: &str, query: &[(&'static str, String)]) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    let response = Request::get(url)
        .query(query.iter().map(|(k, v)| (*k, v.as_str())))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch the robot list (reference data, once per session).
pub async fn fetch_robots(config: &ApiConfig) -> Result<Vec<Robot>, ApiError> {
    let result: RobotsResponse = get_json(&config.url("/robots"), &[]).await?;
    Ok(result.robots)
}

/// Fetch the site list (reference data, once per session).
pub async fn fetch_sites(config: &ApiConfig) -> Result<Vec<String>, ApiError> {
    let result: SitesResponse = get_json(&config.url("/sites"), &[]).await?;
    Ok(result.sites)
}

/// Fetch the pick-object list (reference data, once per session).
pub async fn fetch_objects(config: &ApiConfig) -> Result<Vec<String>, ApiError> {
    let result: ObjectsResponse = get_json(&config.url("/objects"), &[]).await?;
    Ok(result.objects)
}

/// Fetch the sync destination list. The endpoint returns a bare array.
pub async fn fetch_destinations(config: &ApiConfig) -> Result<Vec<Destination>, ApiError> {
    get_json(&config.url("/destinations"), &[]).await
}

/// Fetch the aggregated picks series for the complete current selection.
pub async fn fetch_picks(
    config: &ApiConfig,
    selection: &FilterSelection,
) -> Result<PicksResponse, ApiError> {
    get_json(&config.url("/picks"), &selection.query()).await
}

/// Fetch the aggregated tasks series for the complete current selection.
pub async fn fetch_tasks(
    config: &ApiConfig,
    selection: &FilterSelection,
) -> Result<TasksResponse, ApiError> {
    get_json(&config.url("/tasks"), &selection.query()).await
}

/// Trigger a sync for one destination. HTTP 200 means success; any
/// other status or a network failure means the destination is offline.
pub async fn trigger_sync(
    config: &ApiConfig,
    robot_id: &str,
    address: &str,
) -> Result<(), ApiError> {
    let query = [
        ("robot_id", robot_id.to_string()),
        ("address", address.to_string()),
    ];
    let response = Request::get(&config.url("/sync"))
        .query(query.iter().map(|(k, v)| (*k, v.as_str())))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = ApiConfig::new("http://10.0.0.2:5001/");
        assert_eq!(config.url("/picks"), "http://10.0.0.2:5001/picks");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiError::Status(500).to_string(),
            "server responded with status 500"
        );
        assert_eq!(
            ApiError::Network("timed out".into()).to_string(),
            "network error: timed out"
        );
    }

    #[test]
    fn test_decode_robots_response() {
        let json = r#"{"robots":[{"id":"r1","name":"Bot1"},{"id":"r2","name":"Bot2"}]}"#;
        let decoded: RobotsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.robots.len(), 2);
        assert_eq!(decoded.robots[0].id, "r1");
        assert_eq!(decoded.robots[1].name, "Bot2");
    }

    #[test]
    fn test_decode_destination_without_last_sync() {
        let json = r#"[{"robot_id":"r1","name":"P-KUKA-000001","address":"192.168.195.250","last_sync":null}]"#;
        let decoded: Vec<Destination> = serde_json::from_str(json).unwrap();
        assert_eq!(decoded[0].last_sync, None);

        let json = r#"[{"robot_id":"r1","name":"P-KUKA-000001","address":"192.168.195.250","last_sync":"2024-01-05 10:00:00"}]"#;
        let decoded: Vec<Destination> = serde_json::from_str(json).unwrap();
        assert_eq!(decoded[0].last_sync.as_deref(), Some("2024-01-05 10:00:00"));
    }

    #[test]
    fn test_decode_picks_response() {
        let json = r#"{
            "series": [
                {"date": "2024-01-01", "mpph": 312.0, "total_duration": 7200,
                 "total_picks": 640, "tonnes": 0.096, "accumulated_picks": 640,
                 "accumulated_tonnes": 0.096}
            ],
            "min_mpph": 312.0, "max_mpph": 312.0,
            "min_accumulated_picks": 640, "max_accumulated_picks": 640,
            "min_accumulated_tonnes": 0.096, "max_accumulated_tonnes": 0.096,
            "min_total_duration": 7200, "max_total_duration": 7200
        }"#;
        let decoded: PicksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.series.len(), 1);
        assert_eq!(decoded.series[0].date, "2024-01-01");
        assert_eq!(decoded.series[0].total_picks, 640);
        assert_eq!(decoded.max_mpph, 312.0);
    }

    #[test]
    fn test_decode_picks_response_defaults_missing_bounds() {
        let json = r#"{"series": []}"#;
        let decoded: PicksResponse = serde_json::from_str(json).unwrap();
        assert!(decoded.series.is_empty());
        assert_eq!(decoded.min_mpph, 0.0);
        assert_eq!(decoded.max_accumulated_tonnes, 0.0);
    }

    #[test]
    fn test_decode_tasks_response() {
        let json = r#"{
            "series": [
                {"date": "2024-01-01", "total_tasks": 4, "total_duration": 3600,
                 "total_successful_picks_duration": 1800,
                 "accumulating_total_duration": 3600,
                 "accumulating_total_tasks": 4}
            ],
            "min_total_duration": 3600, "max_total_duration": 3600
        }"#;
        let decoded: TasksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.series[0].total_duration, 3600);
        assert_eq!(decoded.series[0].total_successful_picks_duration, 1800);
        assert_eq!(decoded.series[0].accumulating_total_duration, 3600);
    }
}
