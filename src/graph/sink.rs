//! Boundaries between the engine and the chart surface.

use super::model::GraphSnapshot;

/// Owner of the authoritative snapshot the chart renders from.
///
/// Every action reads the whole snapshot, mutates a working copy and
/// commits it back in one call.
pub trait RenderSink {
	/// A copy of the snapshot on screen.
	fn current(&self) -> GraphSnapshot;
	/// Replaces the snapshot on screen.
	fn commit(&mut self, snapshot: GraphSnapshot);
}

/// Something that can put the context menu away.
pub trait MenuDismiss {
	/// Idempotent.
	fn dismiss(&mut self);
}

/// A bare snapshot is its own sink.
impl RenderSink for GraphSnapshot {
	fn current(&self) -> GraphSnapshot {
		self.clone()
	}

	fn commit(&mut self, snapshot: GraphSnapshot) {
		*self = snapshot;
	}
}
