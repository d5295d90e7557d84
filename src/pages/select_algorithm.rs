//! Algorithm picker: two slots to compare on the chosen graph and points.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use log::error;
use web_sys::{Event, MouseEvent};

use super::{query_string, use_api};

/// The two algorithms being compared. Picks fill the first empty slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Slots([Option<String>; 2]);

impl Slots {
	/// Put `name` into the first free slot; ignored when both are taken.
	fn pick(&mut self, name: &str) {
		let name = name.trim();
		if name.is_empty() {
			return;
		}
		if let Some(slot) = self.0.iter_mut().find(|slot| slot.is_none()) {
			*slot = Some(name.to_string());
		}
	}

	fn remove(&mut self, index: usize) {
		if let Some(slot) = self.0.get_mut(index) {
			*slot = None;
		}
	}

	fn get(&self, index: usize) -> Option<&str> {
		self.0.get(index)?.as_deref()
	}

	/// Both names, if both slots are filled.
	fn pair(&self) -> Option<(&str, &str)> {
		Some((self.get(0)?, self.get(1)?))
	}
}

/// Choose two algorithms, then open the side-by-side results.
#[component]
pub fn SelectAlgorithm() -> impl IntoView {
	let api = use_api();
	let query = use_query_map();
	let (algorithms, set_algorithms) = signal(Vec::<String>::new());
	let (slots, set_slots) = signal(Slots::default());
	let (pending, set_pending) = signal(String::new());
	let (notice, set_notice) = signal(None::<&'static str>);

	spawn_local(async move {
		match api.algorithms().await {
			Ok(names) => set_algorithms.set(names),
			Err(e) => error!("Error fetching algorithms: {e}"),
		}
	});

	let on_pick = move |ev: Event| {
		let name = event_target_value(&ev);
		set_slots.update(|slots| slots.pick(&name));
		set_pending.set(String::new());
	};

	let navigate = use_navigate();
	let on_compare = move |_: MouseEvent| {
		let slots = slots.get();
		let Some((first, second)) = slots.pair() else {
			set_notice.set(Some("Please select two algorithms."));
			return;
		};
		set_notice.set(None);
		let (graph, start, end) = query.with_untracked(|q| {
			(
				q.get("graph").unwrap_or_default(),
				q.get("start").unwrap_or_default(),
				q.get("end").unwrap_or_default(),
			)
		});
		let query = query_string(&[
			("graph", &graph),
			("start", &start),
			("end", &end),
			("algorithm1", first),
			("algorithm2", second),
		]);
		navigate(&format!("/results?{query}"), Default::default());
	};

	let slot_view = move |index: usize| {
		view! {
			<div class="selected-algorithm" id=format!("algorithm{}", index + 1)>
				<span>
					{move || {
						slots
							.with(|s| s.get(index).map(str::to_string))
							.unwrap_or_else(|| format!("Algorithm {}", index + 1))
					}}
				</span>
				<button on:click=move |_| set_slots.update(|s| s.remove(index))>"×"</button>
			</div>
		}
	};

	view! {
		<section class="select-algorithm">
			<input
				id="algorithmInput"
				list="algorithmList"
				placeholder="Type or pick an algorithm"
				prop:value=pending
				on:input=move |ev| set_pending.set(event_target_value(&ev))
				on:change=on_pick
			/>
			<datalist id="algorithmList">
				<For each=move || algorithms.get() key=|name| name.clone() let:name>
					<option value=name />
				</For>
			</datalist>

			<div id="selectedAlgorithms">{slot_view(0)} {slot_view(1)}</div>

			<button id="comparisonButton" on:click=on_compare>"Compare"</button>
			{move || notice.get().map(|message| view! { <p class="notice">{message}</p> })}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn picks_fill_slots_in_order() {
		let mut slots = Slots::default();
		slots.pick("dijkstra");
		assert_eq!(slots.pair(), None);
		slots.pick("astar");
		slots.pick("bfs");
		assert_eq!(slots.pair(), Some(("dijkstra", "astar")));
	}

	#[test]
	fn removed_slot_is_refilled_first() {
		let mut slots = Slots::default();
		slots.pick("dijkstra");
		slots.pick("astar");
		slots.remove(0);
		assert_eq!(slots.get(0), None);
		slots.pick("bfs");
		assert_eq!(slots.pair(), Some(("bfs", "astar")));
	}

	#[test]
	fn blank_picks_are_ignored() {
		let mut slots = Slots::default();
		slots.pick("  ");
		slots.remove(5);
		assert_eq!(slots, Slots::default());
	}
}
