//! path-overlay: interactive shortest-path overlay client.
//!
//! Fetches road graphs and shortest-path search results from an external
//! service, rebuilds a node/edge graph from the GeoJSON line geometry,
//! classifies every node against the search (final path, visited by a search
//! step, untouched) and renders the result as a force-directed canvas.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod overlay;
mod pages;
pub mod visualize;

pub use api::ApiClient;
pub use components::force_graph::ForceGraphCanvas;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use overlay::{NodeClass, NodeKey, Overlay, OverlayGraph};

use crate::pages::not_found::NotFound;
use crate::pages::results::Results;
use crate::pages::select_algorithm::SelectAlgorithm;
use crate::pages::select_points::SelectPoints;
use crate::pages::statistics::Statistics;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("path-overlay: logging initialized at {level}");
}

/// Main application component: shared context plus the routed views.
#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
	provide_meta_context();
	provide_context(ApiClient::new(&config));
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Shortest Path Visualization" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="top-nav">
				<A href="/">"Choose points"</A>
				<A href="/statistics">"Statistics"</A>
			</nav>
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=SelectPoints />
					<Route path=path!("/algorithms") view=SelectAlgorithm />
					<Route path=path!("/results") view=Results />
					<Route path=path!("/statistics") view=Statistics />
				</Routes>
			</main>
		</Router>
	}
}
