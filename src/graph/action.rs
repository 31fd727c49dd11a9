//! Context-menu actions and their dispatch onto the subtree engine.

use std::fmt;
use std::str::FromStr;

use log::{info, warn};

use super::error::GraphError;
use super::palette::MarkColor;
use super::sink::{MenuDismiss, RenderSink};
use super::traversal::{Operation, SubtreeEngine, TraversalReport};

/// An entry in the node context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
	/// Hide the node and everything downstream.
	Hide,
	/// Show the node's direct successors.
	Expand,
	/// Hide everything downstream, keeping the node.
	Collapse,
	/// Paint the subtree, or clear it with [`MarkColor::None`].
	Mark(MarkColor),
}

impl MenuAction {
	/// Menu entries in display order.
	pub const ALL: [MenuAction; 7] = [
		MenuAction::Hide,
		MenuAction::Expand,
		MenuAction::Collapse,
		MenuAction::Mark(MarkColor::None),
		MenuAction::Mark(MarkColor::Red),
		MenuAction::Mark(MarkColor::Yellow),
		MenuAction::Mark(MarkColor::Green),
	];

	/// Element id of the menu entry; parses back through [`FromStr`].
	pub fn id(self) -> &'static str {
		match self {
			MenuAction::Hide => "hide",
			MenuAction::Expand => "expand",
			MenuAction::Collapse => "collapse",
			MenuAction::Mark(MarkColor::None) => "mark_none",
			MenuAction::Mark(MarkColor::Red) => "mark_red",
			MenuAction::Mark(MarkColor::Yellow) => "mark_yellow",
			MenuAction::Mark(MarkColor::Green) => "mark_green",
		}
	}

	/// Button text.
	pub fn label(self) -> &'static str {
		match self {
			MenuAction::Hide => "Hide",
			MenuAction::Expand => "Expand",
			MenuAction::Collapse => "Collapse",
			MenuAction::Mark(MarkColor::None) => "Clear mark",
			MenuAction::Mark(MarkColor::Red) => "Mark red",
			MenuAction::Mark(MarkColor::Yellow) => "Mark yellow",
			MenuAction::Mark(MarkColor::Green) => "Mark green",
		}
	}

	/// The engine operation this entry runs.
	pub fn operation(self) -> Operation {
		match self {
			MenuAction::Hide => Operation::Hide,
			MenuAction::Expand => Operation::Expand,
			MenuAction::Collapse => Operation::Collapse,
			MenuAction::Mark(color) => Operation::Mark(color),
		}
	}
}

impl FromStr for MenuAction {
	type Err = GraphError;

	/// Accepts both `mark_red` and `mark:red`.
	fn from_str(id: &str) -> Result<Self, Self::Err> {
		match id {
			"hide" => Ok(MenuAction::Hide),
			"expand" => Ok(MenuAction::Expand),
			"collapse" => Ok(MenuAction::Collapse),
			_ => id
				.strip_prefix("mark_")
				.or_else(|| id.strip_prefix("mark:"))
				.and_then(MarkColor::from_name)
				.map(MenuAction::Mark)
				.ok_or_else(|| GraphError::InvalidAction(id.to_owned())),
		}
	}
}

impl fmt::Display for MenuAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}

/// The node the menu was opened on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedNode {
	/// Snapshot id of the node.
	pub id: String,
}

impl SelectedNode {
	/// Selects the node with this id.
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into() }
	}
}

/// UI state shared by the menu handlers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionContext {
	selected: Option<SelectedNode>,
}

impl InteractionContext {
	/// Records the node a menu was just opened on.
	pub fn remember(&mut self, node: SelectedNode) {
		self.selected = Some(node);
	}

	/// Drops the remembered node.
	pub fn forget(&mut self) {
		self.selected = None;
	}

	/// The node the menu is open on, if any.
	pub fn selected(&self) -> Option<&SelectedNode> {
		self.selected.as_ref()
	}

	/// Pairs the remembered node with a clicked entry.
	pub fn selection<'a>(&'a self, action_id: &'a str) -> MenuSelection<'a> {
		MenuSelection {
			selected: self.selected(),
			action_id,
		}
	}
}

/// One click on a menu entry.
#[derive(Clone, Copy, Debug)]
pub struct MenuSelection<'a> {
	/// `None` when the menu was never opened on a node.
	pub selected: Option<&'a SelectedNode>,
	/// Raw entry id, validated by [`dispatch`].
	pub action_id: &'a str,
}

/// Runs one menu action end to end.
///
/// The sink is committed once when the action applies. The menu is
/// dismissed whatever the outcome, and errors leave the sink untouched.
pub fn dispatch<S, M>(
	selection: MenuSelection<'_>,
	sink: &mut S,
	menu: &mut M,
) -> Result<TraversalReport, GraphError>
where
	S: RenderSink + ?Sized,
	M: MenuDismiss + ?Sized,
{
	let result = run(selection, sink);
	if let Err(err) = &result {
		warn!("menu action `{}` dropped: {err}", selection.action_id);
	}
	menu.dismiss();
	result
}

fn run<S>(selection: MenuSelection<'_>, sink: &mut S) -> Result<TraversalReport, GraphError>
where
	S: RenderSink + ?Sized,
{
	let action: MenuAction = selection.action_id.parse()?;
	let root = selection.selected.ok_or(GraphError::NoSelection)?;
	info!("{action} on `{}`", root.id);

	let mut snapshot = sink.current();
	let report = SubtreeEngine::new(&mut snapshot).apply(action.operation(), &root.id)?;
	sink.commit(snapshot);
	Ok(report)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::graph::model::{Category, Edge, GraphSnapshot, Node};

	#[derive(Default)]
	struct Recorder {
		snapshot: GraphSnapshot,
		commits: usize,
	}

	impl RenderSink for Recorder {
		fn current(&self) -> GraphSnapshot {
			self.snapshot.clone()
		}

		fn commit(&mut self, snapshot: GraphSnapshot) {
			self.snapshot = snapshot;
			self.commits += 1;
		}
	}

	#[derive(Default)]
	struct Menu {
		dismissed: usize,
	}

	impl MenuDismiss for Menu {
		fn dismiss(&mut self) {
			self.dismissed += 1;
		}
	}

	fn recorder() -> Recorder {
		Recorder {
			snapshot: GraphSnapshot::new(
				vec![Node::new("A", 0), Node::new("B", 1), Node::new("C", 2)],
				vec![Edge::new("A", "B"), Edge::new("B", "C")],
			),
			commits: 0,
		}
	}

	#[rstest]
	#[case("hide", MenuAction::Hide)]
	#[case("expand", MenuAction::Expand)]
	#[case("collapse", MenuAction::Collapse)]
	#[case("mark_none", MenuAction::Mark(MarkColor::None))]
	#[case("mark:red", MenuAction::Mark(MarkColor::Red))]
	#[case("mark_yellow", MenuAction::Mark(MarkColor::Yellow))]
	#[case("mark:green", MenuAction::Mark(MarkColor::Green))]
	fn parses_action_ids(#[case] id: &str, #[case] expected: MenuAction) {
		assert_eq!(id.parse::<MenuAction>().unwrap(), expected);
	}

	#[test]
	fn ids_round_trip_through_parse() {
		for action in MenuAction::ALL {
			assert_eq!(action.id().parse::<MenuAction>().unwrap(), action);
		}
	}

	#[rstest]
	#[case("")]
	#[case("mark_purple")]
	#[case("HIDE")]
	fn rejects_unknown_ids(#[case] id: &str) {
		assert!(matches!(id.parse::<MenuAction>(), Err(GraphError::InvalidAction(_))));
	}

	#[test]
	fn dispatch_commits_once_and_dismisses() {
		let mut sink = recorder();
		let mut menu = Menu::default();
		let mut ctx = InteractionContext::default();
		ctx.remember(SelectedNode::new("A"));

		let report = dispatch(ctx.selection("collapse"), &mut sink, &mut menu).unwrap();

		assert_eq!(report.changed, 2);
		assert_eq!(sink.commits, 1);
		assert_eq!(menu.dismissed, 1);
		assert_eq!(sink.snapshot.node("A").unwrap().category, Category::Visible(0));
		assert!(sink.snapshot.node("C").unwrap().is_hidden());
	}

	#[test]
	fn invalid_action_fails_closed() {
		let mut sink = recorder();
		let mut menu = Menu::default();
		let mut ctx = InteractionContext::default();
		ctx.remember(SelectedNode::new("A"));

		let err = dispatch(ctx.selection("explode"), &mut sink, &mut menu).unwrap_err();

		assert!(matches!(err, GraphError::InvalidAction(id) if id == "explode"));
		assert_eq!(sink.commits, 0);
		assert_eq!(menu.dismissed, 1);
	}

	#[test]
	fn missing_selection_still_dismisses() {
		let mut sink = recorder();
		let mut menu = Menu::default();
		let ctx = InteractionContext::default();

		let err = dispatch(ctx.selection("hide"), &mut sink, &mut menu).unwrap_err();

		assert!(matches!(err, GraphError::NoSelection));
		assert_eq!(sink.commits, 0);
		assert_eq!(menu.dismissed, 1);
	}

	#[test]
	fn stale_selection_is_unknown_root() {
		let mut sink = recorder();
		let mut menu = Menu::default();
		let mut ctx = InteractionContext::default();
		ctx.remember(SelectedNode::new("gone"));

		let err = dispatch(ctx.selection("mark_red"), &mut sink, &mut menu).unwrap_err();

		assert!(matches!(err, GraphError::UnknownRoot(_)));
		assert_eq!(sink.commits, 0);
		assert_eq!(menu.dismissed, 1);
	}

	#[test]
	fn snapshot_is_its_own_sink() {
		let mut sink = recorder().snapshot;
		let mut menu = Menu::default();
		let mut ctx = InteractionContext::default();
		ctx.remember(SelectedNode::new("A"));

		dispatch(ctx.selection("hide"), &mut sink, &mut menu).unwrap();
		ctx.forget();
		ctx.remember(SelectedNode::new("A"));
		dispatch(ctx.selection("expand"), &mut sink, &mut menu).unwrap();

		let hidden: Vec<_> = sink.hidden_ids().collect();
		assert_eq!(hidden, vec!["A", "C"]);
		assert_eq!(menu.dismissed, 2);
	}
}
