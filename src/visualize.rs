//! One visualization request: fetch, join, reconstruct, measure.

use futures::future::join;
use log::{error, info, warn};

use crate::api::{ApiClient, FeatureCollection, ShortestPathResult};
use crate::error::{Error, Result};
use crate::overlay::{Overlay, OverlayGraph};

/// Everything needed to run and draw one search. Built from the page query
/// and passed down explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualizationRequest {
	/// Graph to search on.
	pub graph_id: String,
	/// Algorithm name as listed by the service.
	pub algorithm: String,
	/// Start node key, e.g. `"462555.702,89140.515"`.
	pub start: String,
	/// End node key.
	pub end: String,
}

/// Headline numbers of a search run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunMetrics {
	/// Milliseconds.
	pub time_taken: f64,
	/// Number of search iterations.
	pub steps: usize,
	/// Number of coordinates on the path.
	pub path_length: usize,
	/// Total path weight.
	pub total_weight: f64,
}

/// One horizontal bar of the results panel.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricBar {
	/// CSS modifier class (`time`, `steps`, `path`, `weight`).
	pub class: &'static str,
	/// Text shown next to the bar.
	pub label: String,
	/// Target width in pixels.
	pub width: f64,
}

impl RunMetrics {
	/// Measure a search result.
	pub fn from_result(result: &ShortestPathResult) -> Self {
		Self {
			time_taken: result.time_taken,
			steps: result.steps.len(),
			path_length: result.path.len(),
			total_weight: result.total_weight,
		}
	}

	/// Time, steps, path and weight bars, in that order.
	pub fn bars(&self) -> [MetricBar; 4] {
		[
			MetricBar {
				class: "time",
				label: format!("Time(ms): {}", self.time_taken),
				width: self.time_taken * 100.0,
			},
			MetricBar {
				class: "steps",
				label: format!("Steps: {}", self.steps),
				width: self.steps as f64 * 10.0,
			},
			MetricBar {
				class: "path",
				label: format!("Path: {}", self.path_length),
				width: self.path_length as f64 * 10.0,
			},
			MetricBar {
				class: "weight",
				label: format!("Weight: {}", self.total_weight),
				width: self.total_weight,
			},
		]
	}
}

/// View model for one results panel.
#[derive(Clone, Debug)]
pub struct Visualization {
	/// Classified graph for the canvas.
	pub graph: OverlayGraph,
	/// Numbers for the metric bars.
	pub metrics: RunMetrics,
}

impl Visualization {
	/// Pure half of [`visualize`]: reconstruct and measure already fetched data.
	///
	/// A graph without features is logged and drawn empty.
	pub fn assemble(
		graph: &FeatureCollection,
		result: &ShortestPathResult,
	) -> Result<Self> {
		let overlay = Overlay::new(&result.steps, &result.path)?;
		let graph = match OverlayGraph::build(graph, overlay) {
			Ok(graph) => graph,
			Err(e) if e.is_empty_graph() => {
				error!("{e}");
				OverlayGraph::default()
			}
			Err(e) => return Err(e),
		};
		Ok(Self {
			graph,
			metrics: RunMetrics::from_result(result),
		})
	}
}

/// Join the two fetch outcomes. Both failures are logged; if either fetch
/// failed nothing is assembled and the first error is returned.
pub fn joined(
	graph: Result<FeatureCollection>,
	result: Result<ShortestPathResult>,
) -> Result<Visualization> {
	if let Err(e) = &graph {
		error!("Error fetching graph: {e}");
	}
	if let Err(e) = &result {
		error!("Error fetching shortest path: {e}");
	}
	match (graph, result) {
		(Ok(graph), Ok(result)) => Visualization::assemble(&graph, &result),
		(Err(e), _) | (_, Err(e)) => {
			warn!("Failed to fetch graph or shortest path data.");
			Err(e)
		}
	}
}

/// Fetch the graph and the search result concurrently and build the view
/// model once both have arrived. Any failure is logged and returned; nothing
/// is rendered for a failed request.
pub async fn visualize(api: &ApiClient, request: &VisualizationRequest) -> Result<Visualization> {
	let (graph, result) = join(api.graph(&request.graph_id), api.shortest_path(request)).await;
	let visualization = joined(graph, result)?;
	info!(
		"visualize: {} on {}: {} nodes, {} steps, path of {}",
		request.algorithm,
		request.graph_id,
		visualization.graph.nodes.len(),
		visualization.metrics.steps,
		visualization.metrics.path_length
	);
	Ok(visualization)
}

/// Read a required query value.
pub fn required(value: Option<String>, name: &'static str) -> Result<String> {
	value
		.filter(|v| !v.is_empty())
		.ok_or(Error::MissingParam(name))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::overlay::{NodeClass, NodeKey};

	fn result() -> ShortestPathResult {
		serde_json::from_str(
			r#"{
				"steps": [[[2, 2]], [[1, 1], [2, 2]], [[0, 0]]],
				"path": [[0, 0], [1, 1]],
				"time_taken": 1.5,
				"total_weight": 141.42
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn bars_follow_result_sizes() {
		let metrics = RunMetrics::from_result(&result());
		let bars = metrics.bars();
		assert_eq!(bars[0].width, 150.0);
		assert_eq!(bars[0].label, "Time(ms): 1.5");
		assert_eq!(bars[1].width, 30.0);
		assert_eq!(bars[1].label, "Steps: 3");
		assert_eq!(bars[2].width, 20.0);
		assert_eq!(bars[3].width, 141.42);
		assert_eq!(bars[3].class, "weight");
	}

	#[test]
	fn assemble_classifies_nodes() {
		let graph: FeatureCollection = serde_json::from_str(
			r#"{"features": [{"geometry": {"coordinates": [[0, 0], [1, 1], [2, 2]]}}]}"#,
		)
		.unwrap();
		let vis = Visualization::assemble(&graph, &result()).unwrap();
		assert_eq!(vis.graph.nodes.len(), 3);
		assert_eq!(
			vis.graph.classify(&NodeKey::from_xy(0.0, 0.0)),
			NodeClass::OnPath
		);
		assert_eq!(
			vis.graph.classify(&NodeKey::from_xy(2.0, 2.0)),
			NodeClass::OnStep
		);
	}

	#[test]
	fn assemble_draws_missing_features_as_empty() {
		let graph = FeatureCollection::default();
		let vis = Visualization::assemble(&graph, &result()).unwrap();
		assert!(vis.graph.is_empty());
		assert_eq!(vis.metrics.path_length, 2);
	}

	#[test]
	fn assemble_rejects_malformed_geometry() {
		let graph: FeatureCollection =
			serde_json::from_str(r#"{"features": [{"properties": {}}]}"#).unwrap();
		assert!(matches!(
			Visualization::assemble(&graph, &result()),
			Err(Error::MissingGeometry { feature: 0 })
		));
	}

	#[test]
	fn required_params() {
		assert_eq!(required(Some("g".into()), "graph").unwrap(), "g");
		assert!(matches!(required(None, "graph"), Err(Error::MissingParam("graph"))));
		assert!(matches!(required(Some(String::new()), "start"), Err(Error::MissingParam("start"))));
	}

	fn status(url: &str) -> Error {
		Error::Status {
			url: url.to_string(),
			status: 404,
		}
	}

	fn line_graph() -> FeatureCollection {
		serde_json::from_str(r#"{"features": [{"geometry": {"coordinates": [[0, 0], [1, 1]]}}]}"#)
			.unwrap()
	}

	#[test]
	fn joined_needs_both_fetches() {
		let vis = joined(Ok(line_graph()), Ok(result())).unwrap();
		assert_eq!(vis.graph.nodes.len(), 2);

		let graph_failed = joined(Err(status("/api/graph/g")), Ok(result()));
		assert!(matches!(graph_failed, Err(Error::Status { ref url, .. }) if url == "/api/graph/g"));

		let path_failed = joined(Ok(line_graph()), Err(status("/api/shortest-path")));
		assert!(matches!(path_failed, Err(Error::Status { ref url, .. }) if url == "/api/shortest-path"));
	}

	#[test]
	fn joined_reports_graph_error_first() {
		let both = joined(Err(status("/api/graph/g")), Err(status("/api/shortest-path")));
		match both {
			Err(Error::Status { url, .. }) => assert_eq!(url, "/api/graph/g"),
			Err(e) => panic!("unexpected error {e}"),
			Ok(_) => panic!("nothing should be assembled"),
		}
	}
}
