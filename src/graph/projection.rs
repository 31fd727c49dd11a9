//! Snapshot to chart options.

use std::collections::HashSet;

use super::chart::{ChartLink, ChartNode, ChartOptions};
use super::model::GraphSnapshot;

/// Projects the snapshot into the options the canvas renders.
///
/// A link is drawn only while both of its ends are.
pub fn render_projection(snapshot: &GraphSnapshot) -> ChartOptions {
	let visible: HashSet<&str> = snapshot
		.nodes
		.iter()
		.filter(|n| !n.is_hidden())
		.map(|n| n.id.as_str())
		.collect();

	let nodes = snapshot
		.nodes
		.iter()
		.map(|node| ChartNode {
			id: node.id.clone(),
			label: (!node.name.is_empty()).then(|| node.name.clone()),
			color: node.color().to_owned(),
			size: node.size(),
			visible: visible.contains(node.id.as_str()),
		})
		.collect();

	let links = snapshot
		.edges
		.iter()
		.map(|edge| ChartLink {
			source: edge.source.clone(),
			target: edge.target.clone(),
			style: edge.style(),
			visible: visible.contains(edge.source.as_str()) && visible.contains(edge.target.as_str()),
		})
		.collect();

	ChartOptions { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::{Edge, LineStyle, Node, NodeKind};
	use crate::graph::palette::MarkColor;
	use crate::graph::traversal::SubtreeEngine;

	#[test]
	fn hidden_nodes_take_their_links_with_them() {
		let mut graph = GraphSnapshot::new(
			vec![Node::new("a", 0), Node::new("b", 1), Node::new("c", 2)],
			vec![
				Edge::new("a", "b").styled(LineStyle::Dashed),
				Edge::new("b", "c"),
				Edge::new("a", "ghost"),
			],
		);
		let mut engine = SubtreeEngine::new(&mut graph);
		engine.collapse("b").unwrap();
		engine.mark("a", MarkColor::Red).unwrap();

		let options = render_projection(&graph);

		let visible: Vec<_> = options.nodes.iter().map(|n| n.visible).collect();
		assert_eq!(visible, vec![true, true, false]);
		assert_eq!(options.nodes[1].color, MarkColor::Red.hex());
		assert_eq!(options.links[0].style, LineStyle::Dashed);
		assert!(options.links[0].visible);
		assert!(!options.links[1].visible);
		assert!(!options.links[2].visible);
	}

	#[test]
	fn sizes_follow_node_kind() {
		let graph = GraphSnapshot::new(
			vec![
				Node::of_kind("c", "Person", NodeKind::Concept),
				Node::new("x", 2),
			],
			vec![],
		);
		let options = render_projection(&graph);
		assert_eq!(options.nodes[0].size, 60.0);
		assert_eq!(options.nodes[0].label.as_deref(), Some("Person"));
		assert_eq!(options.nodes[1].size, 45.0);
	}
}
