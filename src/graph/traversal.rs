//! Subtree walks that hide, reveal and mark nodes.
//!
//! A node `n` reached over an edge `cur -> n` joins the subtree only when
//! `n.store > cur.store`. The comparison is against the node the edge
//! leaves, not against the root, so each hop only has to step downstream
//! of its predecessor. This is also what keeps cycles from looping.

use std::collections::HashSet;

use log::{debug, warn};

use super::error::GraphError;
use super::index::GraphIndex;
use super::model::{GraphSnapshot, Node};
use super::palette::MarkColor;

/// Whether a walk remembers the nodes it has already visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraversalMode {
	/// Each node is visited once, however many paths lead to it.
	#[default]
	Deduplicated,
	/// Every path is followed, so diamonds visit their tail repeatedly.
	/// Final state is identical since every mutation is idempotent.
	Worklist,
}

/// The per-node mutation applied by a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
	/// See [`SubtreeEngine::hide`].
	Hide,
	/// See [`SubtreeEngine::collapse`].
	Collapse,
	/// See [`SubtreeEngine::expand`].
	Expand,
	/// See [`SubtreeEngine::mark`].
	Mark(MarkColor),
}

/// What a single operation did.
#[derive(Debug, Default)]
pub struct TraversalReport {
	/// Nodes popped from the worklist, counting repeats.
	pub visited: usize,
	/// Nodes whose category or color actually changed.
	pub changed: usize,
	/// Edges that were skipped because an endpoint did not resolve.
	pub lookup_failures: Vec<GraphError>,
}

/// Runs subtree operations against a snapshot, mutating it in place.
pub struct SubtreeEngine<'g> {
	snapshot: &'g mut GraphSnapshot,
	index: GraphIndex,
	mode: TraversalMode,
}

impl<'g> SubtreeEngine<'g> {
	/// Indexes `snapshot` once for the engine's lifetime.
	pub fn new(snapshot: &'g mut GraphSnapshot) -> Self {
		let index = GraphIndex::build(snapshot);
		Self {
			snapshot,
			index,
			mode: TraversalMode::default(),
		}
	}

	/// Switches between deduplicated and worklist walks.
	pub fn with_mode(mut self, mode: TraversalMode) -> Self {
		self.mode = mode;
		self
	}

	/// Runs `op` from `root`. Fails only when `root` is unknown.
	pub fn apply(&mut self, op: Operation, root: &str) -> Result<TraversalReport, GraphError> {
		let report = match op {
			Operation::Hide => self.hide(root),
			Operation::Collapse => self.collapse(root),
			Operation::Expand => self.expand(root),
			Operation::Mark(color) => self.mark(root, color),
		}?;
		debug!(
			"{op:?} from `{root}`: visited {}, changed {}, skipped {}",
			report.visited,
			report.changed,
			report.lookup_failures.len()
		);
		Ok(report)
	}

	/// Hides `root` and everything downstream of it.
	pub fn hide(&mut self, root: &str) -> Result<TraversalReport, GraphError> {
		let root = self.root(root)?;
		Ok(self.walk(root, true, Node::hide))
	}

	/// Hides everything downstream of `root`, leaving `root` itself alone.
	pub fn collapse(&mut self, root: &str) -> Result<TraversalReport, GraphError> {
		let root = self.root(root)?;
		Ok(self.walk(root, false, Node::hide))
	}

	/// Reveals the direct downstream children of `root`. Grandchildren keep
	/// their state until their own parent is expanded.
	pub fn expand(&mut self, root: &str) -> Result<TraversalReport, GraphError> {
		let root = self.root(root)?;
		let mut report = TraversalReport {
			visited: 1,
			..Default::default()
		};
		for child in self.downstream(root, &mut report) {
			report.visited += 1;
			if self.snapshot.nodes[child].reveal() {
				report.changed += 1;
			}
		}
		Ok(report)
	}

	/// Paints `root` and everything downstream of it.
	pub fn mark(&mut self, root: &str, color: MarkColor) -> Result<TraversalReport, GraphError> {
		let root = self.root(root)?;
		Ok(self.walk(root, true, |node| node.paint(color)))
	}

	fn root(&self, id: &str) -> Result<usize, GraphError> {
		self.index
			.find(id)
			.ok_or_else(|| GraphError::UnknownRoot(id.to_owned()))
	}

	fn walk(
		&mut self,
		root: usize,
		include_root: bool,
		mut mutate: impl FnMut(&mut Node) -> bool,
	) -> TraversalReport {
		let mut report = TraversalReport::default();
		let mut seen = HashSet::new();
		let mut stack = vec![root];

		while let Some(current) = stack.pop() {
			if self.mode == TraversalMode::Deduplicated && !seen.insert(current) {
				continue;
			}
			report.visited += 1;

			if (include_root || current != root) && mutate(&mut self.snapshot.nodes[current]) {
				report.changed += 1;
			}
			stack.extend(self.downstream(current, &mut report));
		}

		report
	}

	/// Targets of `from`'s outgoing edges that sit strictly downstream of it.
	fn downstream(&self, from: usize, report: &mut TraversalReport) -> Vec<usize> {
		let current = &self.snapshot.nodes[from];
		let mut next = Vec::new();
		for &edge in self.index.outgoing(&current.id) {
			let edge = &self.snapshot.edges[edge];
			match self.index.resolve(&edge.source, &edge.target) {
				Ok(target) if self.snapshot.nodes[target].store > current.store => next.push(target),
				Ok(_) => {}
				Err(err) => {
					warn!("skipping edge: {err}");
					report.lookup_failures.push(err);
				}
			}
		}
		next
	}
}

/// Positions of the nodes in `root`'s subtree, `root` first, each once.
pub(crate) fn subtree_positions(
	snapshot: &GraphSnapshot,
	index: &GraphIndex,
	root: usize,
) -> Vec<usize> {
	let mut seen = HashSet::new();
	let mut order = Vec::new();
	let mut stack = vec![root];

	while let Some(current) = stack.pop() {
		if !seen.insert(current) {
			continue;
		}
		order.push(current);
		let store = snapshot.nodes[current].store;
		for edge in index.outgoing_edges(snapshot, &snapshot.nodes[current].id) {
			match index.resolve(&edge.source, &edge.target) {
				Ok(target) if snapshot.nodes[target].store > store => stack.push(target),
				Ok(_) => {}
				Err(err) => warn!("skipping edge: {err}"),
			}
		}
	}

	order
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use rstest::{fixture, rstest};

	use super::*;
	use crate::graph::model::{Category, DEFAULT_NODE_COLOR, Edge, Node};

	/// A(0) -> B(1) -> C(2), plus A -> D(0) which is not downstream.
	#[fixture]
	fn chain() -> GraphSnapshot {
		GraphSnapshot::new(
			vec![
				Node::new("A", 0),
				Node::new("B", 1),
				Node::new("C", 2),
				Node::new("D", 0),
			],
			vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("A", "D")],
		)
	}

	/// Two-level diamond: every node reachable over several paths.
	#[fixture]
	fn diamonds() -> GraphSnapshot {
		GraphSnapshot::new(
			vec![
				Node::new("r", 0),
				Node::new("l1", 1),
				Node::new("r1", 1),
				Node::new("m", 2),
				Node::new("l2", 3),
				Node::new("r2", 3),
				Node::new("tail", 4),
			],
			vec![
				Edge::new("r", "l1"),
				Edge::new("r", "r1"),
				Edge::new("l1", "m"),
				Edge::new("r1", "m"),
				Edge::new("m", "l2"),
				Edge::new("m", "r2"),
				Edge::new("l2", "tail"),
				Edge::new("r2", "tail"),
			],
		)
	}

	fn hidden(graph: &GraphSnapshot) -> BTreeSet<&str> {
		graph.hidden_ids().collect()
	}

	fn colored<'g>(graph: &'g GraphSnapshot, color: MarkColor) -> BTreeSet<&'g str> {
		graph
			.nodes
			.iter()
			.filter(|n| n.color() == color.hex())
			.map(|n| n.id.as_str())
			.collect()
	}

	#[rstest]
	fn hide_takes_root_and_downstream(mut chain: GraphSnapshot) {
		SubtreeEngine::new(&mut chain).hide("A").unwrap();
		assert_eq!(hidden(&chain), BTreeSet::from(["A", "B", "C"]));
	}

	#[rstest]
	fn hide_is_idempotent(mut chain: GraphSnapshot) {
		SubtreeEngine::new(&mut chain).hide("A").unwrap();
		let once = chain.clone();

		let report = SubtreeEngine::new(&mut chain).hide("A").unwrap();
		assert_eq!(chain, once);
		assert_eq!(report.changed, 0);
	}

	#[rstest]
	fn collapse_leaves_root_visible(mut chain: GraphSnapshot) {
		let report = SubtreeEngine::new(&mut chain).collapse("A").unwrap();
		assert_eq!(hidden(&chain), BTreeSet::from(["B", "C"]));
		assert_eq!(chain.node("A").unwrap().category, Category::Visible(0));
		assert_eq!(report.changed, 2);
	}

	#[rstest]
	fn expand_reveals_one_level(mut chain: GraphSnapshot) {
		let mut engine = SubtreeEngine::new(&mut chain);
		engine.hide("A").unwrap();
		let report = engine.expand("A").unwrap();

		assert_eq!(report.changed, 1);
		assert_eq!(hidden(&chain), BTreeSet::from(["A", "C"]));
		assert_eq!(chain.node("B").unwrap().category, Category::Visible(1));
	}

	#[rstest]
	fn expand_restores_natural_group_even_when_visible(mut chain: GraphSnapshot) {
		chain.node_mut("B").unwrap().category = Category::Visible(7);
		SubtreeEngine::new(&mut chain).expand("A").unwrap();
		assert_eq!(chain.node("B").unwrap().category, Category::Visible(1));
		assert_eq!(chain.node("D").unwrap().category, Category::Visible(0));
	}

	#[rstest]
	fn mark_colors_subtree_only(mut chain: GraphSnapshot) {
		SubtreeEngine::new(&mut chain)
			.mark("A", MarkColor::Green)
			.unwrap();
		assert_eq!(colored(&chain, MarkColor::Green), BTreeSet::from(["A", "B", "C"]));
		assert_eq!(chain.node("D").unwrap().color(), DEFAULT_NODE_COLOR);
		assert!(hidden(&chain).is_empty());
	}

	#[rstest]
	fn mark_none_clears_previous_mark(mut chain: GraphSnapshot) {
		let mut engine = SubtreeEngine::new(&mut chain);
		engine.mark("A", MarkColor::Red).unwrap();
		engine.mark("B", MarkColor::None).unwrap();
		assert_eq!(colored(&chain, MarkColor::Red), BTreeSet::from(["A"]));
	}

	#[test]
	fn store_compared_against_predecessor_not_root() {
		// r(5) -> x(9) -> y(6): y is below x's store but above r's; it is
		// still not reachable because the hop x -> y goes upstream.
		// r(5) -> p(6) -> q(7) is reachable hop by hop.
		let mut graph = GraphSnapshot::new(
			vec![
				Node::new("r", 5),
				Node::new("x", 9),
				Node::new("y", 6),
				Node::new("p", 6),
				Node::new("q", 7),
			],
			vec![
				Edge::new("r", "x"),
				Edge::new("x", "y"),
				Edge::new("r", "p"),
				Edge::new("p", "q"),
			],
		);
		SubtreeEngine::new(&mut graph).hide("r").unwrap();
		assert_eq!(hidden(&graph), BTreeSet::from(["p", "q", "r", "x"]));
	}

	#[test]
	fn cycles_terminate() {
		let mut graph = GraphSnapshot::new(
			vec![Node::new("a", 0), Node::new("b", 1)],
			vec![Edge::new("a", "b"), Edge::new("b", "a")],
		);
		let report = SubtreeEngine::new(&mut graph)
			.with_mode(TraversalMode::Worklist)
			.hide("b")
			.unwrap();
		assert_eq!(report.visited, 1);
		assert_eq!(hidden(&graph), BTreeSet::from(["b"]));
	}

	#[rstest]
	#[case(Operation::Hide)]
	#[case(Operation::Collapse)]
	#[case(Operation::Mark(MarkColor::Yellow))]
	fn modes_agree_on_final_state(diamonds: GraphSnapshot, #[case] op: Operation) {
		let mut dedup = diamonds.clone();
		let mut worklist = diamonds;

		let fast = SubtreeEngine::new(&mut dedup).apply(op, "r").unwrap();
		let slow = SubtreeEngine::new(&mut worklist)
			.with_mode(TraversalMode::Worklist)
			.apply(op, "r")
			.unwrap();

		assert_eq!(dedup, worklist);
		assert_eq!(fast.visited, 7);
		// r, l1, r1, m twice, l2 twice, r2 twice, tail four times
		assert_eq!(slow.visited, 13);
		assert_eq!(fast.changed, slow.changed);
	}

	#[test]
	fn dangling_edge_does_not_stop_walk() {
		let mut graph = GraphSnapshot::new(
			vec![Node::new("a", 0), Node::new("b", 1), Node::new("c", 2)],
			vec![
				Edge::new("a", "ghost"),
				Edge::new("a", "b"),
				Edge::new("b", "c"),
			],
		);
		let report = SubtreeEngine::new(&mut graph).hide("a").unwrap();

		assert_eq!(hidden(&graph), BTreeSet::from(["a", "b", "c"]));
		assert_eq!(report.lookup_failures.len(), 1);
		assert!(matches!(
			&report.lookup_failures[0],
			GraphError::LookupFailure { missing_id, .. } if missing_id == "ghost"
		));
	}

	#[rstest]
	fn unknown_root_leaves_graph_untouched(mut chain: GraphSnapshot) {
		let before = chain.clone();
		let err = SubtreeEngine::new(&mut chain).hide("nope").unwrap_err();
		assert!(matches!(err, GraphError::UnknownRoot(_)));
		assert_eq!(chain, before);
	}

	#[rstest]
	fn subtree_positions_lists_each_node_once(diamonds: GraphSnapshot) {
		let index = GraphIndex::build(&diamonds);
		let order = subtree_positions(&diamonds, &index, 0);
		assert_eq!(order[0], 0);
		assert_eq!(order.len(), 7);
		assert_eq!(order.iter().collect::<HashSet<_>>().len(), 7);
	}
}
