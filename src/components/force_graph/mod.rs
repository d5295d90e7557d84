//! Force-directed graph visualization component.
//!
//! Renders an [`OverlayGraph`](crate::overlay::OverlayGraph) on an HTML
//! canvas with:
//! - Physics-based node positioning, seeded from the projected coordinates
//! - Node colors by overlay class (path, search step, unvisited)
//! - Shortest-path edges lighting up one after another
//! - Pan, zoom, node dragging and node clicking
//! - Hover highlight with the node's coordinate key as label
//!
//! # Example
//!
//! ```ignore
//! use path_overlay::components::force_graph::ForceGraphCanvas;
//!
//! let graph = Signal::derive(move || visualization.graph.clone());
//! view! { <ForceGraphCanvas data=graph on_node_click=move |key| log::info!("{key}") /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
