//! Per-algorithm history table, refreshed on a timer.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, warn};

use super::use_api;
use crate::api::AlgorithmStatistics;
use crate::config::ClientConfig;

/// Statistics of every algorithm the service has run.
#[component]
pub fn Statistics() -> impl IntoView {
	let api = use_api();
	let period = use_context::<ClientConfig>()
		.unwrap_or_default()
		.poll_interval();
	let (rows, set_rows) = signal(Vec::<AlgorithmStatistics>::new());

	// Failed refreshes keep the last table.
	let refresh = move || {
		let api = api.clone();
		spawn_local(async move {
			match api.statistics().await {
				Ok(stats) => {
					debug!("statistics: {} algorithms", stats.len());
					set_rows.set(stats);
				}
				Err(e) => error!("Error fetching statistics: {e}"),
			}
		});
	};

	refresh();
	match set_interval_with_handle(refresh, period) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(e) => warn!("statistics: polling disabled: {e:?}"),
	}

	view! {
		<section class="statistics">
			<table id="statisticsTable">
				<thead>
					<tr>
						<th>"Algorithm"</th>
						<th>"Total records"</th>
						<th>"Average steps"</th>
						<th>"Average path length"</th>
						<th>"Average time"</th>
						<th>"Average weight"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						rows.get()
							.into_iter()
							.map(|row| {
								view! {
									<tr>
										<td>{row.algorithm}</td>
										<td>{row.total_records}</td>
										<td>{row.average_steps}</td>
										<td>{row.average_path_length}</td>
										<td>{row.average_time}</td>
										<td>{row.average_weight}</td>
									</tr>
								}
							})
							.collect_view()
					}}
				</tbody>
			</table>
		</section>
	}
}
