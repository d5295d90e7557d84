//! Graph reconstruction and shortest-path overlay.
//!
//! Turns a GeoJSON-style feature collection (each feature a polyline of
//! `[lon, lat]` pairs) into a deduplicated node/edge graph, and classifies
//! each node against the search result returned by the backend:
//!
//! - nodes whose key appears on the final path are [`NodeClass::OnPath`],
//! - otherwise nodes visited by any search step are [`NodeClass::OnStep`],
//! - everything else is [`NodeClass::Unvisited`].
//!
//! Node identity is the [`NodeKey`]: both components rounded to three
//! decimals and joined with a comma. Rounding is the only deduplication
//! mechanism; coordinates that differ after rounding stay distinct nodes.
//!
//! Everything here is pure so it can be tested without a canvas.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;

use crate::api::{FeatureCollection, Position};
use crate::error::{Error, Result};

/// Number of decimals kept when normalizing a coordinate.
const KEY_SCALE: f64 = 1000.0;

/// Rounds half up, like the browser's `Math.round`, and folds `-0` into `0`.
fn round_component(c: f64) -> f64 {
	(c * KEY_SCALE + 0.5).floor() / KEY_SCALE + 0.0
}

/// Normalized coordinate key identifying a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(String);

impl NodeKey {
	/// Key for an already validated `(x, y)` pair.
	pub fn from_xy(x: f64, y: f64) -> Self {
		let (x, y) = (round_component(x), round_component(y));
		Self(format!("{x},{y}"))
	}

	/// Normalize a wire position. `feature` is only used for error reporting.
	pub fn from_position(
		position: &Position,
		feature: Option<usize>,
		index: usize,
	) -> Result<Self> {
		let (x, y) = validate(position, feature, index)?;
		Ok(Self::from_xy(x, y))
	}

	/// The key text, e.g. `"462555.702,89140.515"`.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

fn validate(position: &Position, feature: Option<usize>, index: usize) -> Result<(f64, f64)> {
	match position.as_slice() {
		[x, y, ..] if x.is_finite() && y.is_finite() => Ok((*x, *y)),
		_ => Err(Error::InvalidCoordinate { feature, index }),
	}
}

/// How a node relates to the search result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeClass {
	/// On the final shortest path.
	OnPath,
	/// Visited by a search step but not on the path.
	OnStep,
	/// Never touched by the search.
	Unvisited,
}

/// A graph node, created once per distinct key.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayNode {
	/// Identity of the node.
	pub key: NodeKey,
	/// Rounded longitude.
	pub x: f64,
	/// Rounded latitude.
	pub y: f64,
}

/// Connection between two consecutive coordinates of one feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayEdge {
	/// Key of the earlier coordinate.
	pub source: NodeKey,
	/// Key of the later coordinate.
	pub target: NodeKey,
}

/// Lookup sets built from a shortest-path result.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
	path: Vec<NodeKey>,
	path_set: HashSet<NodeKey>,
	step_set: HashSet<NodeKey>,
	/// Undirected consecutive path pairs, mapped to their position on the path.
	path_edges: HashMap<(NodeKey, NodeKey), usize>,
}

impl Overlay {
	/// Build the path and step sets. Steps are flattened; their order only
	/// matters to the backend.
	pub fn new(steps: &[Vec<Position>], path: &[Position]) -> Result<Self> {
		let path = path
			.iter()
			.enumerate()
			.map(|(i, p)| NodeKey::from_position(p, None, i))
			.collect::<Result<Vec<_>>>()?;

		let mut step_set = HashSet::new();
		let mut index = 0;
		for step in steps {
			for position in step {
				step_set.insert(NodeKey::from_position(position, None, index)?);
				index += 1;
			}
		}

		let mut path_edges = HashMap::new();
		for (order, pair) in path.windows(2).enumerate() {
			path_edges
				.entry(undirected(&pair[0], &pair[1]))
				.or_insert(order);
		}

		Ok(Self {
			path_set: path.iter().cloned().collect(),
			path,
			step_set,
			path_edges,
		})
	}

	/// Path membership wins over step membership.
	pub fn classify(&self, key: &NodeKey) -> NodeClass {
		if self.path_set.contains(key) {
			NodeClass::OnPath
		} else if self.step_set.contains(key) {
			NodeClass::OnStep
		} else {
			NodeClass::Unvisited
		}
	}

	/// Keys of the final path, in order.
	pub fn path(&self) -> &[NodeKey] {
		&self.path
	}

	/// Position of the first path step joining the two keys, either way round.
	pub fn path_edge_order(&self, source: &NodeKey, target: &NodeKey) -> Option<usize> {
		self.path_edges.get(&undirected(source, target)).copied()
	}
}

fn undirected(a: &NodeKey, b: &NodeKey) -> (NodeKey, NodeKey) {
	if a <= b {
		(a.clone(), b.clone())
	} else {
		(b.clone(), a.clone())
	}
}

/// Reconstructed graph plus its overlay: the immutable view model the
/// renderer draws from.
#[derive(Clone, Debug, Default)]
pub struct OverlayGraph {
	/// Distinct nodes in first-seen order.
	pub nodes: Vec<OverlayNode>,
	/// One edge per consecutive coordinate pair, duplicates kept.
	pub edges: Vec<OverlayEdge>,
	/// Search result the nodes are classified against.
	pub overlay: Overlay,
}

impl OverlayGraph {
	/// Reconstruct the graph from a feature collection.
	///
	/// The whole collection is validated before anything is returned, so a
	/// malformed feature never yields a partially built graph. A missing or
	/// empty `features` list is reported as [`Error::NoFeatures`].
	pub fn build(collection: &FeatureCollection, overlay: Overlay) -> Result<Self> {
		let features = match collection.features.as_deref() {
			Some(features) if !features.is_empty() => features,
			_ => return Err(Error::NoFeatures),
		};

		let mut nodes: Vec<OverlayNode> = Vec::new();
		let mut edges = Vec::new();
		let mut seen: HashSet<NodeKey> = HashSet::new();

		for (f, feature) in features.iter().enumerate() {
			let geometry = feature
				.geometry
				.as_ref()
				.ok_or(Error::MissingGeometry { feature: f })?;
			let coordinates = geometry
				.coordinates
				.as_ref()
				.ok_or(Error::MissingCoordinates { feature: f })?;

			let mut previous: Option<NodeKey> = None;
			for (i, position) in coordinates.iter().enumerate() {
				let (x, y) = validate(position, Some(f), i)?;
				let key = NodeKey::from_xy(x, y);
				if seen.insert(key.clone()) {
					nodes.push(OverlayNode {
						key: key.clone(),
						x: round_component(x),
						y: round_component(y),
					});
				}
				if let Some(source) = previous.take() {
					edges.push(OverlayEdge {
						source,
						target: key.clone(),
					});
				}
				previous = Some(key);
			}
		}

		debug!(
			"overlay: rebuilt {} nodes, {} edges from {} features",
			nodes.len(),
			edges.len(),
			features.len()
		);

		Ok(Self {
			nodes,
			edges,
			overlay,
		})
	}

	/// Class of the node with `key`.
	pub fn classify(&self, key: &NodeKey) -> NodeClass {
		self.overlay.classify(key)
	}

	/// Position of the edge on the shortest path, if it is a path edge.
	pub fn path_edge_order(&self, source: &NodeKey, target: &NodeKey) -> Option<usize> {
		self.overlay.path_edge_order(source, target)
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{Feature, Geometry};

	fn line(coords: &[[f64; 2]]) -> Feature {
		Feature {
			geometry: Some(Geometry {
				kind: Some("LineString".into()),
				coordinates: Some(coords.iter().map(|c| c.to_vec()).collect()),
			}),
		}
	}

	fn collection(features: Vec<Feature>) -> FeatureCollection {
		FeatureCollection {
			features: Some(features),
		}
	}

	fn key(s: &str) -> NodeKey {
		NodeKey(s.to_string())
	}

	#[test]
	fn key_matches_browser_number_formatting() {
		assert_eq!(NodeKey::from_xy(0.0, 0.0).as_str(), "0,0");
		assert_eq!(NodeKey::from_xy(1.0, 1.0).as_str(), "1,1");
		assert_eq!(NodeKey::from_xy(1.2341, 7.89012).as_str(), "1.234,7.89");
		assert_eq!(
			NodeKey::from_xy(462555.7024, 89140.5149).as_str(),
			"462555.702,89140.515"
		);
	}

	#[test]
	fn key_rounds_half_up_and_drops_negative_zero() {
		assert_eq!(NodeKey::from_xy(0.0005, -0.0005).as_str(), "0.001,0");
		assert_eq!(NodeKey::from_xy(-0.0004, -1.25).as_str(), "0,-1.25");
	}

	#[test]
	fn worked_example() {
		let graph = collection(vec![line(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]])]);
		let overlay = Overlay::new(
			&[vec![vec![2.0, 2.0]]],
			&[vec![0.0, 0.0], vec![1.0, 1.0]],
		)
		.unwrap();
		let built = OverlayGraph::build(&graph, overlay).unwrap();

		let keys: Vec<&str> = built.nodes.iter().map(|n| n.key.as_str()).collect();
		assert_eq!(keys, ["0,0", "1,1", "2,2"]);
		assert_eq!(
			built.edges,
			vec![
				OverlayEdge {
					source: key("0,0"),
					target: key("1,1")
				},
				OverlayEdge {
					source: key("1,1"),
					target: key("2,2")
				},
			]
		);
		assert_eq!(built.classify(&key("0,0")), NodeClass::OnPath);
		assert_eq!(built.classify(&key("1,1")), NodeClass::OnPath);
		assert_eq!(built.classify(&key("2,2")), NodeClass::OnStep);
	}

	#[test]
	fn near_identical_coordinates_collapse_to_one_node() {
		let graph = collection(vec![
			line(&[[1.2341, 7.8901], [5.0, 5.0]]),
			line(&[[1.2344, 7.89012], [1.2341, 7.8901]]),
		]);
		let built = OverlayGraph::build(&graph, Overlay::default()).unwrap();
		assert_eq!(built.nodes.len(), 2);
		assert_eq!(built.nodes[0].key.as_str(), "1.234,7.89");
		assert_eq!(built.nodes[0].x, 1.234);
		assert_eq!(built.nodes[0].y, 7.89);
	}

	#[test]
	fn coordinates_beyond_precision_stay_distinct() {
		let graph = collection(vec![line(&[[1.2344, 0.0], [1.2346, 0.0]])]);
		let built = OverlayGraph::build(&graph, Overlay::default()).unwrap();
		assert_eq!(built.nodes.len(), 2);
	}

	#[test]
	fn node_count_matches_distinct_keys_and_edges_per_feature() {
		let features = vec![
			line(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]),
			line(&[[1.0, 1.0]]),
			line(&[]),
			line(&[[1.0, 0.0], [2.0, 0.0]]),
		];
		let expected_edges: usize = features
			.iter()
			.map(|f| {
				let n = f.geometry.as_ref().unwrap().coordinates.as_ref().unwrap().len();
				n.saturating_sub(1)
			})
			.sum();
		let distinct: HashSet<NodeKey> = features
			.iter()
			.flat_map(|f| f.geometry.as_ref().unwrap().coordinates.clone().unwrap())
			.map(|c| NodeKey::from_xy(c[0], c[1]))
			.collect();

		let built = OverlayGraph::build(&collection(features), Overlay::default()).unwrap();
		assert_eq!(built.edges.len(), expected_edges);
		assert_eq!(built.nodes.len(), distinct.len());
	}

	#[test]
	fn duplicate_edges_and_self_loops_are_kept() {
		let graph = collection(vec![
			line(&[[0.0, 0.0], [1.0, 1.0]]),
			line(&[[0.0, 0.0], [1.0, 1.0]]),
			line(&[[3.0, 3.0], [3.0001, 3.0001]]),
		]);
		let built = OverlayGraph::build(&graph, Overlay::default()).unwrap();
		assert_eq!(built.edges.len(), 3);
		assert_eq!(built.edges[0], built.edges[1]);
		assert_eq!(built.edges[2].source, built.edges[2].target);
	}

	#[test]
	fn path_membership_beats_step_membership() {
		let overlay = Overlay::new(
			&[vec![vec![0.0, 0.0], vec![4.0, 4.0]]],
			&[vec![0.0, 0.0]],
		)
		.unwrap();
		assert_eq!(overlay.classify(&key("0,0")), NodeClass::OnPath);
		assert_eq!(overlay.classify(&key("4,4")), NodeClass::OnStep);
		assert_eq!(overlay.classify(&key("9,9")), NodeClass::Unvisited);
	}

	#[test]
	fn overlay_keys_are_normalized_too() {
		let overlay = Overlay::new(&[], &[vec![0.00049, 1.0001]]).unwrap();
		assert_eq!(overlay.classify(&key("0,1")), NodeClass::OnPath);
	}

	#[test]
	fn path_edges_are_ordered_and_undirected() {
		let overlay = Overlay::new(
			&[],
			&[vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]],
		)
		.unwrap();
		assert_eq!(overlay.path_edge_order(&key("0,0"), &key("1,0")), Some(0));
		assert_eq!(overlay.path_edge_order(&key("2,0"), &key("1,0")), Some(1));
		assert_eq!(overlay.path_edge_order(&key("0,0"), &key("2,0")), None);
		assert_eq!(overlay.path().len(), 3);
	}

	#[test]
	fn empty_collections_are_reported_not_thrown() {
		let missing = FeatureCollection { features: None };
		let err = OverlayGraph::build(&missing, Overlay::default()).unwrap_err();
		assert!(err.is_empty_graph());

		let empty = collection(vec![]);
		let err = OverlayGraph::build(&empty, Overlay::default()).unwrap_err();
		assert!(err.is_empty_graph());

		let fallback = OverlayGraph::default();
		assert!(fallback.is_empty());
		assert!(fallback.edges.is_empty());
	}

	#[test]
	fn decodes_empty_object_as_missing_features() {
		let parsed: FeatureCollection = serde_json::from_str("{}").unwrap();
		assert!(matches!(
			OverlayGraph::build(&parsed, Overlay::default()),
			Err(Error::NoFeatures)
		));
	}

	#[test]
	fn malformed_geometry_is_an_error() {
		let graph = collection(vec![
			line(&[[0.0, 0.0], [1.0, 1.0]]),
			Feature { geometry: None },
		]);
		assert!(matches!(
			OverlayGraph::build(&graph, Overlay::default()),
			Err(Error::MissingGeometry { feature: 1 })
		));

		let graph = collection(vec![Feature {
			geometry: Some(Geometry {
				kind: None,
				coordinates: None,
			}),
		}]);
		assert!(matches!(
			OverlayGraph::build(&graph, Overlay::default()),
			Err(Error::MissingCoordinates { feature: 0 })
		));
	}

	#[test]
	fn short_or_non_finite_coordinates_are_rejected() {
		let graph = collection(vec![Feature {
			geometry: Some(Geometry {
				kind: None,
				coordinates: Some(vec![vec![0.0, 0.0], vec![1.0]]),
			}),
		}]);
		assert!(matches!(
			OverlayGraph::build(&graph, Overlay::default()),
			Err(Error::InvalidCoordinate {
				feature: Some(0),
				index: 1
			})
		));

		assert!(matches!(
			Overlay::new(&[vec![vec![f64::NAN, 0.0]]], &[]),
			Err(Error::InvalidCoordinate {
				feature: None,
				index: 0
			})
		));
	}

	#[test]
	fn altitude_component_is_ignored() {
		let graph = collection(vec![Feature {
			geometry: Some(Geometry {
				kind: None,
				coordinates: Some(vec![vec![1.0, 2.0, 30.0]]),
			}),
		}]);
		let built = OverlayGraph::build(&graph, Overlay::default()).unwrap();
		assert_eq!(built.nodes[0].key.as_str(), "1,2");
	}
}
