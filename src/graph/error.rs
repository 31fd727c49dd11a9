//! Error types for the graph layer.

use thiserror::Error;

/// Failures surfaced by graph lookups, traversals and action dispatch.
#[derive(Debug, Error)]
pub enum GraphError {
	/// An edge points at a node id that is not in the snapshot.
	#[error("edge from `{source_id}` references missing node `{missing_id}`")]
	LookupFailure {
		/// Node the edge leaves.
		source_id: String,
		/// Id that did not resolve.
		missing_id: String,
	},

	/// The node an operation starts from does not exist.
	#[error("node `{0}` is not in the graph")]
	UnknownRoot(String),

	/// A menu entry id that maps to no action.
	#[error("unrecognized menu action `{0}`")]
	InvalidAction(String),

	/// An action arrived before any node was right-clicked.
	#[error("no node was selected when the menu action arrived")]
	NoSelection,

	/// The page payload is not a valid graph.
	#[error("malformed graph payload: {0}")]
	Parse(#[from] serde_json::Error),
}

impl GraphError {
	pub(crate) fn lookup(source_id: &str, missing_id: &str) -> Self {
		GraphError::LookupFailure {
			source_id: source_id.to_owned(),
			missing_id: missing_id.to_owned(),
		}
	}
}
