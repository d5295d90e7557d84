//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node overlay metadata,
//! view transforms for pan/zoom, hover highlighting and the timed reveal of
//! the shortest path.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{ClassPalette, Color, Theme};
use crate::overlay::{NodeClass, NodeKey, OverlayGraph, OverlayNode};

/// Share of the viewport the projected geometry initially occupies.
const FIT_RATIO: f64 = 0.8;

/// Seconds between two consecutive path edges starting to light up.
pub const REVEAL_INTERVAL: f64 = 1.5;
/// Seconds a path edge takes to reach the path color.
pub const REVEAL_FADE: f64 = 1.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Coordinate key, shown as the hover label.
	pub key: NodeKey,
	/// Overlay class the node was drawn with.
	pub class: NodeClass,
	/// Fill color from the theme palette.
	pub color: Color,
	/// Size multiplier (1.0 = normal)
	pub size: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal offset in screen pixels.
	pub x: f64,
	/// Vertical offset in screen pixels.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is held.
	pub active: bool,
	/// The held node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer position at press, screen pixels.
	pub start_x: f64,
	/// Pointer position at press, screen pixels.
	pub start_y: f64,
	/// Node position at press, world units.
	pub node_start_x: f32,
	/// Node position at press, world units.
	pub node_start_y: f32,
	/// Set once the pointer moved past the click tolerance.
	pub moved: bool,
}

/// Pointer travel (screen pixels) below which a press counts as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// The background is held.
	pub active: bool,
	/// Pointer position at press.
	pub start_x: f64,
	/// Pointer position at press.
	pub start_y: f64,
	/// View offset at press.
	pub transform_start_x: f64,
	/// View offset at press.
	pub transform_start_y: f64,
}

/// Hover highlight with per-node intensities that ease in and out.
///
/// The hovered node and its neighbours form the target set; every tick each
/// node's intensity moves towards 1.0 (in the set) or decays towards 0.0.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	/// Node under the pointer.
	pub hovered_node: Option<DefaultNodeIdx>,
	target_set: HashSet<DefaultNodeIdx>,
	intensity: HashMap<DefaultNodeIdx, f64>,
	max: f64,
}

impl HighlightState {
	const FADE_IN_SPEED: f64 = 6.0;
	const FADE_OUT_SPEED: f64 = 4.0;

	/// Make `node` and its neighbours the highlight target.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
	) {
		if self.hovered_node == node {
			return;
		}
		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			for &(src, tgt) in edges {
				if src == idx {
					self.target_set.insert(tgt);
				} else if tgt == idx {
					self.target_set.insert(src);
				}
			}
		}
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt)).
	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-Self::FADE_IN_SPEED * dt).exp();
		let fade_out = (-Self::FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let value = self.intensity.entry(idx).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}

		let mut max: f64 = 0.0;
		let targets = &self.target_set;
		self.intensity.retain(|idx, value| {
			if !targets.contains(idx) {
				*value *= fade_out;
			}
			max = max.max(*value);
			*value > 0.005
		});
		self.max = max;
	}

	/// Current highlight of one node, 0.0 to 1.0.
	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean keeps edges in step with both endpoints.
	pub fn edge_intensity(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Highest intensity of any node, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.max
	}

	/// Whether `idx` is the node under the pointer.
	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hovered_node == Some(idx)
	}
}

/// Progress (0..=1) of the reveal of the path edge at `order`, `time`
/// seconds after the graph was drawn.
pub fn reveal_progress(order: usize, time: f64) -> f64 {
	((time - order as f64 * REVEAL_INTERVAL) / REVEAL_FADE).clamp(0.0, 1.0)
}

/// Map rounded coordinates into world space: the bounding box is centered on
/// the origin, scaled to fit the viewport and flipped so north points up.
pub fn project(nodes: &[OverlayNode], width: f64, height: f64) -> Vec<(f32, f32)> {
	let Some(first) = nodes.first() else {
		return Vec::new();
	};
	let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
	for n in nodes {
		min_x = min_x.min(n.x);
		max_x = max_x.max(n.x);
		min_y = min_y.min(n.y);
		max_y = max_y.max(n.y);
	}

	let (span_x, span_y) = (max_x - min_x, max_y - min_y);
	let fit = |span: f64, size: f64| (span > 0.0).then(|| size * FIT_RATIO / span);
	let scale = match (fit(span_x, width), fit(span_y, height)) {
		(Some(sx), Some(sy)) => sx.min(sy),
		(Some(s), None) | (None, Some(s)) => s,
		(None, None) => 1.0,
	};
	let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

	nodes
		.iter()
		.map(|n| (((n.x - cx) * scale) as f32, (-(n.y - cy) * scale) as f32))
		.collect()
}

/// Core graph state combining physics simulation with interaction, highlight
/// and reveal tracking.
///
/// Rebuilt from scratch for every new [`OverlayGraph`], then mutated each
/// frame by the animation loop.
pub struct ForceGraphState {
	/// Physics simulation.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress.
	pub drag: DragState,
	/// Background pan in progress.
	pub pan: PanState,
	/// Hover highlight.
	pub highlight: HighlightState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Physics advances each frame while set.
	pub animation_running: bool,
	/// Seconds since the graph was drawn; drives the path reveal.
	pub elapsed: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	path_order: HashMap<(DefaultNodeIdx, DefaultNodeIdx), usize>,
}

impl ForceGraphState {
	/// Seed the simulation from `data`, projected into a `width` by `height`
	/// canvas.
	pub fn new(data: &OverlayGraph, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut key_to_idx = HashMap::new();

		for (node, (x, y)) in data.nodes.iter().zip(project(&data.nodes, width, height)) {
			let class = data.classify(&node.key);
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					key: node.key.clone(),
					class,
					color: theme.palette.color(class),
					size: ClassPalette::size(class),
				},
			});
			key_to_idx.insert(node.key.clone(), idx);
		}

		let mut edges = Vec::new();
		let mut path_order = HashMap::new();
		for edge in &data.edges {
			let (Some(&src), Some(&tgt)) = (key_to_idx.get(&edge.source), key_to_idx.get(&edge.target))
			else {
				continue;
			};
			// Zero-length springs have no direction.
			if src == tgt {
				continue;
			}
			graph.add_edge(src, tgt, EdgeData::default());
			edges.push((src, tgt));
			if let Some(order) = data.path_edge_order(&edge.source, &edge.target) {
				path_order.insert((src, tgt), order);
				path_order.insert((tgt, src), order);
			}
		}

		Self {
			graph,
			edges,
			path_order,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			animation_running: true,
			elapsed: 0.0,
		}
	}

	/// Convert canvas pixels to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the canvas point, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Key of the node at `idx`.
	pub fn key_of(&self, idx: DefaultNodeIdx) -> Option<NodeKey> {
		let mut key = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				key = Some(node.data.user_data.key.clone());
			}
		});
		key
	}

	/// Reveal progress of the edge between two nodes, `None` off the path.
	pub fn path_reveal(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> Option<f64> {
		self.path_order
			.get(&(a, b))
			.map(|&order| reveal_progress(order, self.elapsed))
	}

	/// Number of drawable (non-loop) edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Highlight `node` and its neighbours, or nothing.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	/// Advance physics, reveal clock and highlight by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.elapsed += dt as f64;
		self.highlight.tick(dt as f64);
	}

	/// Record a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::FeatureCollection;
	use crate::overlay::Overlay;

	fn node(x: f64, y: f64) -> OverlayNode {
		OverlayNode {
			key: NodeKey::from_xy(x, y),
			x,
			y,
		}
	}

	fn overlay_graph() -> OverlayGraph {
		let graph: FeatureCollection = serde_json::from_str(
			r#"{"features": [
				{"geometry": {"coordinates": [[0, 0], [1, 0], [2, 0]]}},
				{"geometry": {"coordinates": [[2, 0], [2, 0.0001], [2, 1]]}}
			]}"#,
		)
		.unwrap();
		let overlay = Overlay::new(&[], &[vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]]).unwrap();
		OverlayGraph::build(&graph, overlay).unwrap()
	}

	#[test]
	fn projection_fits_the_viewport_north_up() {
		let nodes = [node(10.0, 50.0), node(20.0, 55.0)];
		let projected = project(&nodes, 800.0, 600.0);
		// Width-bound: 640px for 10 units of longitude.
		assert_eq!(projected[0], (-320.0, 160.0));
		assert_eq!(projected[1], (320.0, -160.0));
	}

	#[test]
	fn projection_of_degenerate_boxes() {
		assert!(project(&[], 800.0, 600.0).is_empty());
		assert_eq!(project(&[node(3.0, 4.0)], 800.0, 600.0), vec![(0.0, 0.0)]);
		let vertical = project(&[node(0.0, 0.0), node(0.0, 10.0)], 800.0, 600.0);
		assert_eq!(vertical, vec![(0.0, 240.0), (0.0, -240.0)]);
	}

	#[test]
	fn reveal_is_staggered_along_the_path() {
		assert_eq!(reveal_progress(0, 0.0), 0.0);
		assert_eq!(reveal_progress(0, 0.5), 0.5);
		assert_eq!(reveal_progress(0, 2.0), 1.0);
		assert_eq!(reveal_progress(2, 2.9), 0.0);
		assert_eq!(reveal_progress(2, 3.5), 0.5);
	}

	#[test]
	fn state_skips_loops_and_tracks_path_edges() {
		let data = overlay_graph();
		let state = ForceGraphState::new(&data, 800.0, 600.0, &Theme::default());
		assert_eq!(data.edges.len(), 4);
		assert_eq!(state.edge_count(), 3);

		let mut idx = HashMap::new();
		state.graph.visit_nodes(|n| {
			idx.insert(n.data.user_data.key.as_str().to_string(), n.index());
		});
		assert_eq!(state.path_reveal(idx["0,0"], idx["1,0"]), Some(0.0));
		assert_eq!(state.path_reveal(idx["2,0"], idx["1,0"]), Some(0.0));
		assert_eq!(state.path_reveal(idx["2,0"], idx["2,1"]), None);
		assert_eq!(state.key_of(idx["2,1"]).unwrap().as_str(), "2,1");
	}

	#[test]
	fn node_colors_follow_classification() {
		let state = ForceGraphState::new(&overlay_graph(), 800.0, 600.0, &Theme::default());
		let palette = Theme::default().palette;
		state.graph.visit_nodes(|n| {
			let info = &n.data.user_data;
			assert_eq!(info.color, palette.color(info.class));
			let expected = if info.key.as_str() == "2,1" {
				NodeClass::Unvisited
			} else {
				NodeClass::OnPath
			};
			assert_eq!(info.class, expected);
		});
	}

	#[test]
	fn hover_highlights_neighbours_and_fades() {
		let mut state = ForceGraphState::new(&overlay_graph(), 800.0, 600.0, &Theme::default());
		let mut idx = HashMap::new();
		state.graph.visit_nodes(|n| {
			idx.insert(n.data.user_data.key.as_str().to_string(), n.index());
		});

		state.set_hover(Some(idx["1,0"]));
		state.highlight.tick(0.1);
		assert!(state.highlight.node_intensity(idx["0,0"]) > 0.0);
		assert!(state.highlight.node_intensity(idx["2,0"]) > 0.0);
		assert_eq!(state.highlight.node_intensity(idx["2,1"]), 0.0);
		assert!(state.highlight.is_hovered(idx["1,0"]));

		state.set_hover(None);
		for _ in 0..200 {
			state.highlight.tick(0.016);
		}
		assert_eq!(state.highlight.max_intensity(), 0.0);
	}
}
