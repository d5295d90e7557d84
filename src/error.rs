//! Error type shared by the overlay builder, the API client and the views.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between fetching a graph and drawing it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The graph payload has no `features`, or an empty list of them.
	#[error("No features found in the graph data")]
	NoFeatures,

	/// A feature without a `geometry` member.
	#[error("feature {feature} has no geometry")]
	MissingGeometry {
		/// Index of the feature in the collection.
		feature: usize,
	},

	/// A geometry without `coordinates`.
	#[error("feature {feature} has no coordinates")]
	MissingCoordinates {
		/// Index of the feature in the collection.
		feature: usize,
	},

	/// A coordinate with fewer than two components or a non-finite component.
	/// `feature` is `None` for path and step coordinates.
	#[error("invalid coordinate at index {index} (feature {feature:?})")]
	InvalidCoordinate {
		/// Feature holding the coordinate.
		feature: Option<usize>,
		/// Position of the coordinate in its list.
		index: usize,
	},

	/// The browser could not complete the request.
	#[error("request to {url} failed: {source}")]
	Request {
		/// Requested URL.
		url: String,
		/// Transport error.
		#[source]
		source: gloo_net::Error,
	},

	/// The service answered with a non-2xx status.
	#[error("request to {url} returned HTTP {status}")]
	Status {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// The response body was not the expected JSON.
	#[error("could not decode response from {url}: {source}")]
	Decode {
		/// Requested URL.
		url: String,
		/// Decode error.
		#[source]
		source: gloo_net::Error,
	},

	/// A required query parameter is missing from the page URL.
	#[error("missing query parameter `{0}`")]
	MissingParam(&'static str),
}

impl Error {
	/// True for the reported "empty graph" condition, which callers render as
	/// an empty canvas instead of failing.
	pub fn is_empty_graph(&self) -> bool {
		matches!(self, Error::NoFeatures)
	}
}
