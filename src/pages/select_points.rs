//! Graph and start/end point picker.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use log::{error, info};
use web_sys::{Event, MouseEvent};

use super::{query_string, use_api};
use crate::components::force_graph::ForceGraphCanvas;
use crate::overlay::{NodeKey, Overlay, OverlayGraph};

/// First missing input, in the order the user is asked for them.
fn missing_input(graph: &str, start: &str, end: &str) -> Option<&'static str> {
	if graph.is_empty() {
		Some("Please select a graph.")
	} else if start.is_empty() {
		Some("Please select a start point.")
	} else if end.is_empty() {
		Some("Please select an end point.")
	} else {
		None
	}
}

/// Pick a graph, then click nodes to use them as start and end.
#[component]
pub fn SelectPoints() -> impl IntoView {
	let api = use_api();
	let (graph_ids, set_graph_ids) = signal(Vec::<String>::new());
	let (graph_id, set_graph_id) = signal(String::new());
	let (graph, set_graph) = signal(OverlayGraph::default());
	let (start, set_start) = signal(String::new());
	let (end, set_end) = signal(String::new());
	let (popup, set_popup) = signal(None::<NodeKey>);
	let (notice, set_notice) = signal(None::<&'static str>);

	{
		let api = api.clone();
		spawn_local(async move {
			match api.graph_ids().await {
				Ok(ids) => set_graph_ids.set(ids),
				Err(e) => error!("Error fetching graph list: {e}"),
			}
		});
	}

	let load_graph = move |id: String| {
		let api = api.clone();
		spawn_local(async move {
			let collection = match api.graph(&id).await {
				Ok(collection) => collection,
				Err(e) => {
					error!("Error fetching graph {id}: {e}");
					return;
				}
			};
			// No search has run yet: every node is unvisited.
			match OverlayGraph::build(&collection, Overlay::default()) {
				Ok(built) => {
					info!("select points: graph {id} has {} nodes", built.nodes.len());
					set_graph.set(built);
				}
				Err(e) => {
					error!("{e}");
					set_graph.set(OverlayGraph::default());
				}
			}
		});
	};

	let on_graph_change = move |ev: Event| {
		let id = event_target_value(&ev);
		set_graph_id.set(id.clone());
		set_start.set(String::new());
		set_end.set(String::new());
		if !id.is_empty() {
			load_graph(id);
		}
	};

	let navigate = use_navigate();
	let on_choose = move |_: MouseEvent| {
		let (g, s, e) = (graph_id.get(), start.get(), end.get());
		let (s, e) = (s.trim(), e.trim());
		if let Some(message) = missing_input(&g, s, e) {
			set_notice.set(Some(message));
			return;
		}
		set_notice.set(None);
		let query = query_string(&[("graph", &g), ("start", s), ("end", e)]);
		navigate(&format!("/algorithms?{query}"), Default::default());
	};

	let node_popup = move || {
		popup.get().map(|key| {
			let (start_key, end_key) = (key.to_string(), key.to_string());
			view! {
				<div class="popup-overlay" on:click=move |_| set_popup.set(None)></div>
				<div class="popup">
					<div class="popup-content">
						<p>{format!("Node Info: {key}")}</p>
						<p>"Set this point as:"</p>
						<button on:click=move |_| {
							set_start.set(start_key.clone());
							set_popup.set(None);
						}>"Start"</button>
						<button on:click=move |_| {
							set_end.set(end_key.clone());
							set_popup.set(None);
						}>"End"</button>
					</div>
				</div>
			}
		})
	};

	view! {
		<section class="select-points">
			<select id="graphSelect" on:change=on_graph_change>
				<option value="">"Select a graph"</option>
				<For each=move || graph_ids.get() key=|id| id.clone() let:id>
					<option value=id.clone()>{id.clone()}</option>
				</For>
			</select>

			<div id="networkGraph" class="graph">
				<ForceGraphCanvas
					data=graph
					on_node_click=move |key: NodeKey| set_popup.set(Some(key))
				/>
			</div>

			<label>"Start" <input id="startCoord" prop:value=start on:input=move |ev| set_start.set(event_target_value(&ev)) /></label>
			<label>"End" <input id="endCoord" prop:value=end on:input=move |ev| set_end.set(event_target_value(&ev)) /></label>
			<button id="chooseAlgorithmButton" on:click=on_choose>"Choose algorithm"</button>
			{move || notice.get().map(|message| view! { <p class="notice">{message}</p> })}

			{node_popup}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn inputs_are_checked_in_order() {
		assert_eq!(missing_input("", "", ""), Some("Please select a graph."));
		assert_eq!(missing_input("g", "", "1,2"), Some("Please select a start point."));
		assert_eq!(missing_input("g", "1,2", ""), Some("Please select an end point."));
		assert_eq!(missing_input("g", "1,2", "3,4"), None);
	}
}
