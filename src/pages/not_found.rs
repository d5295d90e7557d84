//! Fallback view for unknown routes.

use leptos::prelude::*;

/// 404 view.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page not found"</h1>
		<p><a href="/">"Back to the graph"</a></p>
	}
}
