//! Id and adjacency lookups over a [`GraphSnapshot`].

use std::collections::HashMap;

use log::warn;

use super::error::GraphError;
use super::model::{Edge, GraphSnapshot, Node};

/// Positions into the snapshot's node and edge vectors, keyed by node id.
///
/// The index stores positions rather than references so the snapshot can
/// be mutated in place while the index is held. It stays valid as long as
/// no node or edge is added, removed or reordered.
#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
	positions: HashMap<String, usize>,
	outgoing: HashMap<String, Vec<usize>>,
}

impl GraphIndex {
	/// Indexes every node and edge of `snapshot`.
	pub fn build(snapshot: &GraphSnapshot) -> Self {
		let mut positions = HashMap::with_capacity(snapshot.nodes.len());
		for (pos, node) in snapshot.nodes.iter().enumerate() {
			if positions.contains_key(&node.id) {
				warn!("duplicate node id `{}` at position {pos}, keeping the first", node.id);
				continue;
			}
			positions.insert(node.id.clone(), pos);
		}

		// Edge positions are pushed in snapshot order, so adjacency is
		// deterministic for a given payload.
		let mut outgoing: HashMap<String, Vec<usize>> = HashMap::new();
		for (pos, edge) in snapshot.edges.iter().enumerate() {
			outgoing.entry(edge.source.clone()).or_default().push(pos);
		}

		Self {
			positions,
			outgoing,
		}
	}

	/// Number of distinct node ids.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// True for an empty snapshot.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Position of the first node with this id.
	pub fn find(&self, id: &str) -> Option<usize> {
		self.positions.get(id).copied()
	}

	/// Resolves the endpoint of an edge leaving `source_id`.
	pub fn resolve(&self, source_id: &str, id: &str) -> Result<usize, GraphError> {
		self.find(id)
			.ok_or_else(|| GraphError::lookup(source_id, id))
	}

	/// Looks up a node an operation starts from.
	pub fn node<'s>(&self, snapshot: &'s GraphSnapshot, id: &str) -> Result<&'s Node, GraphError> {
		let pos = self
			.find(id)
			.ok_or_else(|| GraphError::UnknownRoot(id.to_owned()))?;
		Ok(&snapshot.nodes[pos])
	}

	/// Positions of the edges whose source is `id`.
	pub fn outgoing(&self, id: &str) -> &[usize] {
		self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The edges whose source is `id`, in snapshot order.
	pub fn outgoing_edges<'s>(
		&'s self,
		snapshot: &'s GraphSnapshot,
		id: &str,
	) -> impl Iterator<Item = &'s Edge> + 's {
		self.outgoing(id).iter().map(|&pos| &snapshot.edges[pos])
	}
}
