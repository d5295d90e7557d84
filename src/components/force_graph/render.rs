//! Canvas rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Plain edges, then path edges on top (world space)
//! 3. Non-highlighted nodes, then hovered nodes with ring and coordinate label

use std::f64::consts::PI;

use force_graph::Node;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};
use crate::overlay::NodeClass;

/// Ease-in-out curve for intensities in 0..=1.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());

	// Path edges are drawn in a second pass so they sit on top.
	for path_pass in [false, true] {
		state.graph.visit_edges(|n1, n2, _| {
			let reveal = state.path_reveal(n1.index(), n2.index());
			if reveal.is_some() != path_pass {
				return;
			}
			let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
			let reveal_t = reveal.map(smooth_step).unwrap_or(0.0);

			let color = theme.edge.color.lerp(theme.edge.path_color, reveal_t);
			let alpha = if edge_t > 0.01 {
				0.7 + 0.3 * edge_t
			} else {
				// Revealed path edges keep full strength while other things dim.
				0.7 - 0.5 * max_t * (1.0 - reveal_t)
			};
			let width = scale.edge_line_width
				* (1.0 + (theme.edge.path_width - 1.0) * reveal_t)
				* (1.0 + 0.4 * edge_t);

			draw_edge(ctx, n1, n2, color.with_alpha(alpha * color.a), width);
		});
	}
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	n1: &Node<NodeInfo>,
	n2: &Node<NodeInfo>,
	color: Color,
	width: f64,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	if (x2 - x1).hypot(y2 - y1) < 0.001 {
		return;
	}
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let has_highlight = max_t > 0.01;

	// Pass 1: nodes outside the hover set, path nodes last so they stay visible.
	for class in [NodeClass::Unvisited, NodeClass::OnStep, NodeClass::OnPath] {
		state.graph.visit_nodes(|node| {
			if node.data.user_data.class != class
				|| state.highlight.node_intensity(node.index()) > 0.001
			{
				return;
			}
			let (alpha, radius_mult) = if has_highlight {
				(1.0 - 0.7 * max_t, 1.0 - 0.15 * max_t)
			} else {
				(1.0, 1.0)
			};
			draw_node(ctx, node, scale, theme, alpha, radius_mult);
		});
	}

	// Pass 2: highlighted/transitioning nodes on top
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let node_t = state.highlight.node_intensity(idx);
		if node_t <= 0.001 {
			return;
		}
		let eased_t = smooth_step(node_t);
		let dim = if has_highlight { 1.0 - 0.7 * max_t } else { 1.0 };
		let alpha = dim + (1.0 - dim) * eased_t;
		let radius_mult = 1.0 + 0.25 * eased_t;

		draw_node(ctx, node, scale, theme, alpha, radius_mult);

		if !state.highlight.is_hovered(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let radius = scale.node_radius * radius_mult * node.data.user_data.size;

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&Color::rgb(255, 255, 255).with_alpha(0.8 * eased_t).to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();

		let label_alpha = 0.95 * eased_t * scale.label_alpha;
		if label_alpha > 0.01 {
			ctx.set_fill_style_str(&theme.node.label_color.with_alpha(label_alpha).to_css());
			ctx.set_font(&scale.label_font);
			let _ = ctx.fill_text(
				node.data.user_data.key.as_str(),
				x + radius + 4.0 / scale.k,
				y + 3.0 / scale.k,
			);
		}
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let info = &node.data.user_data;
	let radius = scale.node_radius * radius_mult * info.size;

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &info.color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &info.color.to_css());
			let _ = gradient.add_color_stop(1.0, &info.color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&info.color.to_css()),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}
