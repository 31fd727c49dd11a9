//! Standalone views of a single subtree.

use super::error::GraphError;
use super::index::GraphIndex;
use super::model::{Edge, GraphSnapshot, LineStyle, NodeKind};
use super::traversal::subtree_positions;

/// Copies `root`'s subtree into a new snapshot.
///
/// Every extracted node is made visible in its natural group, so attributes
/// hidden in the overview show up here. Edges survive when both ends were
/// extracted and the target is not a context: links between contexts only
/// make sense in the overview.
///
/// A concept root also brings along the context that owns it, joined to the
/// root by a single solid link.
pub fn focus_subgraph(snapshot: &GraphSnapshot, root: &str) -> Result<GraphSnapshot, GraphError> {
	let index = GraphIndex::build(snapshot);
	let root_id = root;
	let root = index
		.find(root_id)
		.ok_or_else(|| GraphError::UnknownRoot(root_id.to_owned()))?;

	let mut keep = vec![false; snapshot.nodes.len()];
	for pos in subtree_positions(snapshot, &index, root) {
		keep[pos] = true;
	}

	let owner = match snapshot.nodes[root].kind() {
		NodeKind::Concept => owning_context(snapshot, &index, root_id),
		_ => None,
	};

	let nodes = snapshot
		.nodes
		.iter()
		.enumerate()
		.filter(|&(pos, _)| keep[pos] || owner == Some(pos))
		.map(|(_, node)| {
			let mut node = node.clone();
			node.reveal();
			node
		})
		.collect();

	let kept = |id: &str| index.find(id).is_some_and(|pos| keep[pos]);
	let mut edges: Vec<Edge> = owner
		.map(|pos| Edge::new(&snapshot.nodes[pos].id, root_id).styled(LineStyle::Solid))
		.into_iter()
		.collect();
	edges.extend(
		snapshot
			.edges
			.iter()
			.filter(|e| kept(&e.source) && kept(&e.target))
			.filter(|e| index.node(snapshot, &e.target).is_ok_and(|t| t.store != 0))
			.cloned(),
	);

	Ok(GraphSnapshot::new(nodes, edges))
}

/// First context with a link into `concept`, by edge order.
fn owning_context(snapshot: &GraphSnapshot, index: &GraphIndex, concept: &str) -> Option<usize> {
	snapshot
		.edges
		.iter()
		.filter(|e| e.target == concept)
		.filter_map(|e| index.find(&e.source))
		.find(|&pos| snapshot.nodes[pos].kind() == NodeKind::Context)
}
