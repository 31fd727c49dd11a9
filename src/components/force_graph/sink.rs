//! [`RenderSink`] over a Leptos signal.

use leptos::prelude::*;

use crate::graph::{GraphSnapshot, RenderSink};

/// Signal-backed sink; the canvas re-projects whenever it is committed.
#[derive(Clone, Copy)]
pub struct SnapshotSink(pub RwSignal<GraphSnapshot>);

impl RenderSink for SnapshotSink {
	fn current(&self) -> GraphSnapshot {
		self.0.get_untracked()
	}

	fn commit(&mut self, snapshot: GraphSnapshot) {
		self.0.set(snapshot);
	}
}
