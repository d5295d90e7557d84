//! Client for the shortest-path service and the payloads it returns.
//!
//! Only the HTTP contract lives here; the service itself (graph storage and
//! the search algorithms) is external.

use gloo_net::http::Request;
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::visualize::VisualizationRequest;

/// A coordinate as sent on the wire: `[lon, lat]`, optionally followed by
/// more components which are ignored.
pub type Position = Vec<f64>;

/// GeoJSON-style feature collection returned by `GET /api/graph/{id}`.
///
/// Every level is optional so that shape problems surface as typed errors
/// from the overlay builder rather than as opaque decode failures.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeatureCollection {
	/// Road segments; `None` when the payload has no `features` member.
	#[serde(default)]
	pub features: Option<Vec<Feature>>,
}

/// One road segment.
#[derive(Clone, Debug, Deserialize)]
pub struct Feature {
	/// Line geometry of the segment.
	#[serde(default)]
	pub geometry: Option<Geometry>,
}

/// GeoJSON geometry; only line coordinates are read.
#[derive(Clone, Debug, Deserialize)]
pub struct Geometry {
	/// GeoJSON geometry type, e.g. `"LineString"`.
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	/// Vertices in drawing order.
	#[serde(default)]
	pub coordinates: Option<Vec<Position>>,
}

/// Result of one shortest-path search.
#[derive(Clone, Debug, Deserialize)]
pub struct ShortestPathResult {
	/// Coordinates visited by each search iteration.
	pub steps: Vec<Vec<Position>>,
	/// Coordinates of the shortest path, start to end.
	pub path: Vec<Position>,
	/// Search time in milliseconds.
	pub time_taken: f64,
	/// Sum of the edge weights along `path`.
	pub total_weight: f64,
}

/// Aggregated history for one algorithm, from `GET /api/statistics`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AlgorithmStatistics {
	/// Algorithm name as listed by `GET /api/algorithms`.
	pub algorithm: String,
	/// Number of recorded searches.
	pub total_records: u64,
	/// Mean number of search iterations.
	pub average_steps: f64,
	/// Mean number of coordinates on the path.
	pub average_path_length: f64,
	/// Mean search time in milliseconds.
	pub average_time: f64,
	/// Mean total path weight.
	pub average_weight: f64,
}

/// Thin HTTP client over the service endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	/// Client rooted at `config.api_base`.
	pub fn new(config: &ClientConfig) -> Self {
		Self {
			base_url: config.api_base.trim_end_matches('/').to_string(),
		}
	}

	/// URL listing the available graph ids.
	pub fn graph_ids_url(&self) -> String {
		format!("{}/api/graph", self.base_url)
	}

	/// URL of one graph's feature collection.
	pub fn graph_url(&self, graph_id: &str) -> String {
		format!("{}/api/graph/{}", self.base_url, graph_id)
	}

	/// URL of a search run; keys go into the path unencoded.
	pub fn shortest_path_url(&self, request: &VisualizationRequest) -> String {
		format!(
			"{}/api/shortest-path/{}/{}/{}/{}",
			self.base_url, request.graph_id, request.algorithm, request.start, request.end
		)
	}

	/// URL listing the algorithm names.
	pub fn algorithms_url(&self) -> String {
		format!("{}/api/algorithms", self.base_url)
	}

	/// URL of the per-algorithm statistics.
	pub fn statistics_url(&self) -> String {
		format!("{}/api/statistics", self.base_url)
	}

	/// Ids of the graphs the service holds.
	pub async fn graph_ids(&self) -> Result<Vec<String>> {
		get_json(&self.graph_ids_url()).await
	}

	/// Fetch one graph.
	pub async fn graph(&self, graph_id: &str) -> Result<FeatureCollection> {
		get_json(&self.graph_url(graph_id)).await
	}

	/// Run a search on the service and fetch its result.
	pub async fn shortest_path(&self, request: &VisualizationRequest) -> Result<ShortestPathResult> {
		get_json(&self.shortest_path_url(request)).await
	}

	/// Names of the available algorithms.
	pub async fn algorithms(&self) -> Result<Vec<String>> {
		get_json(&self.algorithms_url()).await
	}

	/// Aggregated history of every algorithm.
	pub async fn statistics(&self) -> Result<Vec<AlgorithmStatistics>> {
		get_json(&self.statistics_url()).await
	}
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
	debug!("api: GET {url}");
	let response = Request::get(url)
		.send()
		.await
		.map_err(|source| Error::Request {
			url: url.to_string(),
			source,
		})?;

	if !response.ok() {
		return Err(Error::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}

	response.json::<T>().await.map_err(|source| Error::Decode {
		url: url.to_string(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn client(base: &str) -> ApiClient {
		ApiClient::new(&ClientConfig {
			api_base: base.to_string(),
			..ClientConfig::default()
		})
	}

	#[test]
	fn same_origin_urls() {
		let api = client("");
		assert_eq!(api.graph_ids_url(), "/api/graph");
		assert_eq!(api.graph_url("line5"), "/api/graph/line5");
		assert_eq!(api.algorithms_url(), "/api/algorithms");
		assert_eq!(api.statistics_url(), "/api/statistics");
	}

	#[test]
	fn shortest_path_url_carries_every_segment() {
		let api = client("https://example.test/");
		let request = VisualizationRequest {
			graph_id: "complete_graph".into(),
			algorithm: "Dijkstra".into(),
			start: "462555.702,89140.515".into(),
			end: "463122.297,88799.614".into(),
		};
		assert_eq!(
			api.shortest_path_url(&request),
			"https://example.test/api/shortest-path/complete_graph/Dijkstra/462555.702,89140.515/463122.297,88799.614"
		);
	}

	#[test]
	fn decodes_shortest_path_payload() {
		let json = r#"{
			"steps": [[[0, 0]], [[0, 0], [1, 1]]],
			"path": [[0, 0], [1, 1]],
			"time_taken": 0.42,
			"total_weight": 12.5
		}"#;
		let result: ShortestPathResult = serde_json::from_str(json).unwrap();
		assert_eq!(result.steps.len(), 2);
		assert_eq!(result.path, vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
		assert_eq!(result.time_taken, 0.42);
	}

	#[test]
	fn decodes_statistics_rows() {
		let json = r#"[{
			"algorithm": "A* (Euclidean)",
			"total_records": 1000,
			"average_steps": 312.4,
			"average_path_length": 18.2,
			"average_time": 0.0123,
			"average_weight": 1540.512
		}]"#;
		let rows: Vec<AlgorithmStatistics> = serde_json::from_str(json).unwrap();
		assert_eq!(rows[0].algorithm, "A* (Euclidean)");
		assert_eq!(rows[0].total_records, 1000);
	}

	#[test]
	fn decodes_geojson_with_extra_members() {
		let json = r#"{
			"type": "FeatureCollection",
			"features": [{
				"type": "Feature",
				"properties": {"length": 3.2},
				"geometry": {"type": "LineString", "coordinates": [[0.5, 1.5], [2, 3]]}
			}]
		}"#;
		let graph: FeatureCollection = serde_json::from_str(json).unwrap();
		let features = graph.features.unwrap();
		let geometry = features[0].geometry.as_ref().unwrap();
		assert_eq!(geometry.kind.as_deref(), Some("LineString"));
		assert_eq!(geometry.coordinates.as_ref().unwrap().len(), 2);
	}
}
