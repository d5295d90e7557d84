//! Side-by-side results of two algorithms on the same graph and points.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use log::error;

use super::use_api;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::metric_bars::MetricBars;
use crate::visualize::{Visualization, VisualizationRequest, required, visualize};

/// Panel heading for algorithm slot `n` (1-based).
fn algorithm_title(n: usize, algorithm: Option<&str>) -> String {
	match algorithm.filter(|a| !a.is_empty()) {
		Some(name) => format!("Algorithm {n}: {name}"),
		None => format!("Algorithm {n}: Not specified"),
	}
}

/// Both comparison panels, driven by the page query.
#[component]
pub fn Results() -> impl IntoView {
	let query = use_query_map().get_untracked();
	let graph = query.get("graph");
	let start = query.get("start");
	let end = query.get("end");

	let panels = ["algorithm1", "algorithm2"]
		.into_iter()
		.enumerate()
		.map(|(i, param)| {
			let algorithm = query.get(param).filter(|a| !a.is_empty());
			let title = algorithm_title(i + 1, algorithm.as_deref());
			let request = algorithm.map(|algorithm| -> crate::Result<VisualizationRequest> {
				Ok(VisualizationRequest {
					graph_id: required(graph.clone(), "graph")?,
					algorithm,
					start: required(start.clone(), "start")?,
					end: required(end.clone(), "end")?,
				})
			});
			view! {
				<div class="result-panel" id=format!("networkGraph{}", i + 1)>
					<h2>{title}</h2>
					{request.map(|request| view! { <ResultPanel request=request /> })}
				</div>
			}
		})
		.collect_view();

	view! { <section class="results">{panels}</section> }
}

/// Runs one visualization and shows its canvas and metric bars.
#[component]
fn ResultPanel(request: crate::Result<VisualizationRequest>) -> impl IntoView {
	let (outcome, set_outcome) = signal(None::<Result<Visualization, String>>);

	match request {
		Ok(request) => {
			let api = use_api();
			spawn_local(async move {
				let outcome = visualize(&api, &request).await.map_err(|e| e.to_string());
				set_outcome.set(Some(outcome));
			});
		}
		Err(e) => {
			error!("{e}");
			set_outcome.set(Some(Err(e.to_string())));
		}
	}

	move || match outcome.get() {
		None => view! { <p class="loading">"Loading…"</p> }.into_any(),
		Some(Err(message)) => view! { <p class="error">{message}</p> }.into_any(),
		Some(Ok(Visualization { graph, metrics })) => view! {
			<div class="graph">
				<ForceGraphCanvas data=Signal::derive(move || graph.clone()) />
			</div>
			<MetricBars metrics=metrics />
		}
		.into_any(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn titles_name_the_algorithm_or_say_missing() {
		assert_eq!(algorithm_title(1, Some("dijkstra")), "Algorithm 1: dijkstra");
		assert_eq!(algorithm_title(2, None), "Algorithm 2: Not specified");
		assert_eq!(algorithm_title(2, Some("")), "Algorithm 2: Not specified");
	}
}
