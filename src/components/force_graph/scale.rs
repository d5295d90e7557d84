//! Zoom-dependent scaling configuration for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system of the simulation. Values in
//!   world-space scale with zoom.
//! - **Screen-space**: canvas pixels. Values in screen-space stay constant
//!   regardless of zoom level.
//!
//! Elements pick a [`ScaleBehavior`] describing how they react to the zoom
//! factor `k`, and [`ScaledValues`] resolves all of them once per frame.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World variant completes the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for a base value at zoom level `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
#[allow(dead_code, reason = "Constant variant available for custom label behavior")]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, fades to zero at `zero_alpha_k`.
	Fade {
		/// Zoom level at which the alpha reaches zero.
		zero_alpha_k: f64,
		/// Zoom level from which the alpha is one.
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units.
	pub radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How the hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Coordinate label font size in screen pixels.
	pub label_size: f64,
	/// Hover labels fade out when zoomed far out.
	pub label_alpha_behavior: AlphaBehavior,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
}

/// Configuration for the hover ring.
#[derive(Clone, Debug)]
pub struct GlowScaleConfig {
	/// Stroke width for hover ring in screen pixels.
	pub ring_width: f64,
	/// Ring offset from node edge in screen pixels.
	pub ring_offset: f64,
}

/// Allowed zoom range.
#[derive(Clone, Debug)]
pub struct ZoomConfig {
	/// Furthest zoom out.
	pub min_k: f64,
	/// Furthest zoom in.
	pub max_k: f64,
	/// Zoom factor per wheel notch.
	pub step: f64,
}

impl ZoomConfig {
	/// Zoom level after one wheel notch in the direction of `delta_y`.
	pub fn next(&self, k: f64, delta_y: f64) -> f64 {
		let factor = if delta_y > 0.0 {
			1.0 / self.step
		} else {
			self.step
		};
		(k * factor).clamp(self.min_k, self.max_k)
	}
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node radii and labels.
	pub node: NodeScaleConfig,
	/// Edge strokes.
	pub edge: EdgeScaleConfig,
	/// Hover ring.
	pub glow: GlowScaleConfig,
	/// Wheel zoom range and step.
	pub zoom: ZoomConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 6.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 12.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				label_size: 11.0,
				label_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.2,
					full_alpha_k: 0.5,
				},
			},
			edge: EdgeScaleConfig { line_width: 1.5 },
			glow: GlowScaleConfig {
				ring_width: 1.5,
				ring_offset: 2.0,
			},
			zoom: ZoomConfig {
				min_k: 0.1,
				max_k: 5.0,
				step: 1.1,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Label font string (e.g., "11px sans-serif"), sized to stay constant on screen.
	pub label_font: String,
	/// Label opacity multiplier.
	pub label_alpha: f64,
	/// Edge line width in world-space.
	pub edge_line_width: f64,
	/// Hover ring width in world-space.
	pub ring_width: f64,
	/// Hover ring offset in world-space.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Resolve every configured size at zoom level `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{}px sans-serif", config.node.label_size / k),
			label_alpha: config.node.label_alpha_behavior.apply(k),
			edge_line_width: config.edge.line_width / k,
			ring_width: config.glow.ring_width / k,
			ring_offset: config.glow.ring_offset / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_nodes_never_shrink_below_min_screen_size() {
		let config = ScaleConfig::default();
		let near = ScaledValues::new(&config, 2.0);
		let far = ScaledValues::new(&config, 0.1);
		assert_eq!(near.node_radius, 6.0);
		assert_eq!(far.node_radius, 3.0 / 0.1);
	}

	#[test]
	fn screen_values_counteract_zoom() {
		let config = ScaleConfig::default();
		let scaled = ScaledValues::new(&config, 2.0);
		assert_eq!(scaled.edge_line_width, 0.75);
		assert_eq!(scaled.label_font, "5.5px sans-serif");
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 4.0), 2.5);
		assert_eq!(ScaleBehavior::World.apply(10.0, 4.0), 10.0);
	}

	#[test]
	fn labels_fade_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 1.0).label_alpha, 1.0);
		assert_eq!(ScaledValues::new(&config, 0.1).label_alpha, 0.0);
		assert_eq!(AlphaBehavior::Constant.apply(0.01), 1.0);
	}

	#[test]
	fn wheel_zoom_is_clamped() {
		let zoom = ScaleConfig::default().zoom;
		assert!(zoom.next(1.0, -1.0) > 1.0);
		assert!(zoom.next(1.0, 1.0) < 1.0);
		assert_eq!(zoom.next(5.0, -1.0), 5.0);
		assert_eq!(zoom.next(0.1, 1.0), 0.1);
	}
}
