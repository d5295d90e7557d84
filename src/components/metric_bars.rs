//! Animated horizontal bars for the numbers of one search run.

use std::time::Duration;

use leptos::prelude::*;

use crate::visualize::RunMetrics;

/// Delay before the bars grow, so the CSS width transition is visible.
const GROW_DELAY: Duration = Duration::from_millis(100);

/// Time, steps, path length and weight as bars that grow from zero.
#[component]
pub fn MetricBars(metrics: RunMetrics) -> impl IntoView {
	let (grown, set_grown) = signal(false);
	set_timeout(move || set_grown.set(true), GROW_DELAY);

	let bars = metrics
		.bars()
		.into_iter()
		.map(|bar| {
			let target = bar.width;
			view! {
				<div class="bar">
					<div
						class=format!("bar-inner {}", bar.class)
						style:width=move || if grown.get() { format!("{target}px") } else { "0".to_string() }
					></div>
					<span class="bar-label">{bar.label}</span>
				</div>
			}
		})
		.collect_view();

	view! { <div class="info">{bars}</div> }
}
