//! Visual theming for the force graph.
//!
//! Node colors come from the search overlay rather than from clusters: each
//! [`NodeClass`] maps to one palette entry.

use crate::overlay::NodeClass;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t).round() as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t).round() as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t).round() as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors for the three node classes.
#[derive(Clone, Debug)]
pub struct ClassPalette {
	/// Nodes on the shortest path.
	pub on_path: Color,
	/// Nodes visited by a search step.
	pub on_step: Color,
	/// Every other node.
	pub unvisited: Color,
}

impl ClassPalette {
	/// Fill color of a node of `class`.
	pub fn color(&self, class: NodeClass) -> Color {
		match class {
			NodeClass::OnPath => self.on_path,
			NodeClass::OnStep => self.on_step,
			NodeClass::Unvisited => self.unvisited,
		}
	}

	/// Relative node size per class; the path stands out.
	pub fn size(class: NodeClass) -> f64 {
		match class {
			NodeClass::OnPath => 1.4,
			NodeClass::OnStep => 1.1,
			NodeClass::Unvisited => 0.9,
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Base edge color
	pub color: Color,
	/// Color a path edge fades to once revealed.
	pub path_color: Color,
	/// Width multiplier for fully revealed path edges.
	pub path_width: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
	/// Hover label color
	pub label_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name used by the `theme` config field.
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Edge strokes.
	pub edge: EdgeStyle,
	/// Node fill, border and label.
	pub node: NodeStyle,
	/// Node colors per overlay class.
	pub palette: ClassPalette,
}

impl Theme {
	/// Dark canvas with the overlay palette (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(170, 170, 170, 0.6),
				path_color: Color::rgb(230, 57, 70),
				path_width: 2.2,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				label_color: Color::rgb(255, 255, 255),
			},
			palette: ClassPalette {
				on_path: Color::rgb(0xFF, 0xA5, 0x00),
				on_step: Color::rgb(0x6F, 0xCF, 0x97),
				unvisited: Color::rgb(0xCC, 0xCC, 0xCC),
			},
		}
	}

	/// Flat light theme, close to a plain SVG chart
	pub fn minimal() -> Self {
		Self {
			name: "minimal",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
			},
			edge: EdgeStyle {
				color: Color::rgba(153, 153, 153, 0.6),
				path_color: Color::rgb(255, 0, 0),
				path_width: 2.0,
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.5,
				border_color: Color::rgb(255, 255, 255),
				label_color: Color::rgb(20, 20, 20),
			},
			palette: ClassPalette {
				on_path: Color::rgb(0xFF, 0xA5, 0x00),
				on_step: Color::rgb(0x6F, 0xCF, 0x97),
				unvisited: Color::rgb(0x33, 0x33, 0x33),
			},
		}
	}

	/// Look up a theme by its config name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"minimal" => Some(Self::minimal()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
