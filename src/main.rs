//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use log::{Level, warn};
use path_overlay::{App, ClientConfig, init_logging};

fn main() {
	let loaded = ClientConfig::load();
	init_logging(loaded.as_ref().map(ClientConfig::level).unwrap_or(Level::Debug));
	let config = loaded.unwrap_or_else(|e| {
		warn!("path-overlay: ignoring invalid app-config: {e}");
		ClientConfig::default()
	});

	mount_to_body(move || {
		view! { <App config=config.clone() /> }
	})
}
