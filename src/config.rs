//! Client configuration.
//!
//! The host page may embed a JSON object in a script element:
//!
//! ```html
//! <script id="app-config" type="application/json">
//!   { "api_base": "https://travelassistant.uk", "log_level": "info" }
//! </script>
//! ```
//!
//! Missing fields fall back to [`ClientConfig::default`].

use std::str::FromStr;
use std::time::Duration;

use log::Level;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::components::force_graph::Theme;

/// Id of the script element carrying the configuration.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Shortest statistics refresh period honoured.
pub const MIN_POLL_MS: u32 = 500;

/// Settings supplied by the host page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Prefix for every API request. Empty means same origin.
	pub api_base: String,
	/// Console log level (`error`, `warn`, `info`, `debug`, `trace`).
	pub log_level: String,
	/// Refresh period of the statistics table, in milliseconds. Values below
	/// [`MIN_POLL_MS`] are raised to it.
	pub statistics_poll_ms: u32,
	/// Name of the canvas theme.
	pub theme: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base: String::new(),
			log_level: "debug".into(),
			statistics_poll_ms: 5000,
			theme: "default".into(),
		}
	}
}

impl ClientConfig {
	/// Parse a configuration object.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Read the configuration from the DOM. A page without the element gets
	/// the defaults; invalid JSON is returned as an error so it can be logged
	/// once logging is up.
	pub fn load() -> Result<Self, serde_json::Error> {
		match config_text() {
			Some(text) => Self::from_json(&text),
			None => Ok(Self::default()),
		}
	}

	/// Parsed log level; unknown names mean `Debug`.
	pub fn level(&self) -> Level {
		Level::from_str(&self.log_level).unwrap_or(Level::Debug)
	}

	/// Statistics refresh period, never shorter than [`MIN_POLL_MS`].
	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.statistics_poll_ms.max(MIN_POLL_MS).into())
	}

	/// Canvas theme; unknown names mean the default theme.
	pub fn theme(&self) -> Theme {
		Theme::by_name(&self.theme).unwrap_or_default()
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_gives_defaults() {
		assert_eq!(ClientConfig::from_json("{}").unwrap(), ClientConfig::default());
	}

	#[test]
	fn partial_config_keeps_other_defaults() {
		let config =
			ClientConfig::from_json(r#"{"api_base": "https://travelassistant.uk", "log_level": "warn"}"#)
				.unwrap();
		assert_eq!(config.api_base, "https://travelassistant.uk");
		assert_eq!(config.level(), Level::Warn);
		assert_eq!(config.statistics_poll_ms, 5000);
		assert_eq!(config.theme().name, "default");
	}

	#[test]
	fn unknown_names_fall_back() {
		let config = ClientConfig::from_json(r#"{"log_level": "loud", "theme": "neon"}"#).unwrap();
		assert_eq!(config.level(), Level::Debug);
		assert_eq!(config.theme().name, "default");
	}

	#[test]
	fn poll_interval_has_a_floor() {
		let config = ClientConfig::from_json(r#"{"statistics_poll_ms": 0}"#).unwrap();
		assert_eq!(config.poll_interval(), Duration::from_millis(500));
		assert_eq!(ClientConfig::default().poll_interval(), Duration::from_secs(5));
	}

	#[test]
	fn rejects_wrong_types() {
		assert!(ClientConfig::from_json(r#"{"statistics_poll_ms": "soon"}"#).is_err());
	}
}
