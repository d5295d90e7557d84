//! Routed views. Each page owns its state in local signals and receives the
//! shared [`ApiClient`] through context.

use leptos::prelude::*;
use log::warn;
use web_sys::UrlSearchParams;

use crate::api::ApiClient;
use crate::config::ClientConfig;

pub mod not_found;
pub mod results;
pub mod select_algorithm;
pub mod select_points;
pub mod statistics;

/// API client provided by [`App`](crate::App); same-origin defaults otherwise.
pub(crate) fn use_api() -> ApiClient {
	use_context::<ApiClient>().unwrap_or_else(|| ApiClient::new(&ClientConfig::default()))
}

/// Encode `pairs` as a URL query string (without the leading `?`).
pub(crate) fn query_string(pairs: &[(&str, &str)]) -> String {
	let Ok(params) = UrlSearchParams::new() else {
		warn!("pages: URLSearchParams unavailable");
		return String::new();
	};
	for (key, value) in pairs {
		params.append(key, value);
	}
	params.to_string().into()
}
