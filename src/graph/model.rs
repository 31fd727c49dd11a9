//! Snapshot of the graph as loaded from the page payload.

use serde::{Deserialize, Serialize};

use super::error::GraphError;
use super::palette::MarkColor;

/// Fill used for nodes that carry no mark.
pub const DEFAULT_NODE_COLOR: &str = "#D2E9FF";

/// Raw category value the payload uses for hidden nodes.
pub const HIDDEN_CATEGORY: i32 = -1;

/// Visibility of a node in the chart.
///
/// Serialized as the raw integer the chart expects: the group number when
/// visible, [`HIDDEN_CATEGORY`] when hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Category {
	/// Drawn in this legend group.
	Visible(i32),
	/// Not drawn; serialized as [`HIDDEN_CATEGORY`].
	Hidden,
}

impl Category {
	/// True for [`Category::Hidden`].
	pub fn is_hidden(self) -> bool {
		matches!(self, Category::Hidden)
	}

	/// The integer written to the payload.
	pub fn raw(self) -> i32 {
		match self {
			Category::Visible(group) => group,
			Category::Hidden => HIDDEN_CATEGORY,
		}
	}
}

impl From<i32> for Category {
	fn from(raw: i32) -> Self {
		if raw < 0 {
			Category::Hidden
		} else {
			Category::Visible(raw)
		}
	}
}

impl From<Category> for i32 {
	fn from(category: Category) -> Self {
		category.raw()
	}
}

/// Layer a node belongs to in the knowledge graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// Store 0: a namespace grouping concepts.
	Context,
	/// Store 1: a class of things.
	Concept,
	/// Store 2: one member of a concept.
	Instance,
	/// Store 3: a property of an instance.
	Attribute,
}

impl NodeKind {
	/// Kinds are laid out by their store value; anything deeper than an
	/// instance is treated as an attribute.
	pub fn from_store(store: i32) -> Self {
		match store {
			i32::MIN..=0 => NodeKind::Context,
			1 => NodeKind::Concept,
			2 => NodeKind::Instance,
			_ => NodeKind::Attribute,
		}
	}

	/// Canonical store value for this kind.
	pub fn store(self) -> i32 {
		match self {
			NodeKind::Context => 0,
			NodeKind::Concept => 1,
			NodeKind::Instance => 2,
			NodeKind::Attribute => 3,
		}
	}

	/// Default diameter when the payload gives none.
	pub fn symbol_size(self) -> f64 {
		match self {
			NodeKind::Context => 30.0,
			NodeKind::Concept => 60.0,
			NodeKind::Instance => 45.0,
			NodeKind::Attribute => 30.0,
		}
	}

	/// Attributes start out hidden until their owner is expanded.
	pub fn initial_category(self) -> Category {
		match self {
			NodeKind::Attribute => Category::Hidden,
			kind => Category::Visible(kind.store()),
		}
	}
}

/// Per-node chart styling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStyle {
	/// CSS fill color.
	pub color: String,
}

impl Default for ItemStyle {
	fn default() -> Self {
		Self {
			color: DEFAULT_NODE_COLOR.into(),
		}
	}
}

/// One node of the knowledge graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique id; colon-separated paths in the bundled payload.
	pub id: String,
	/// Display label.
	#[serde(default)]
	pub name: String,
	/// Depth in the context → concept → instance → attribute layering.
	///
	/// Walks only follow edges toward a larger store.
	pub store: i32,
	/// Current visibility.
	pub category: Category,
	/// Fill, painted by mark actions.
	#[serde(default)]
	pub item_style: ItemStyle,
	/// Diameter override; see [`Node::size`].
	#[serde(default)]
	pub symbol_size: Option<f64>,
}

impl Node {
	/// A visible node in its natural group.
	pub fn new(id: impl Into<String>, store: i32) -> Self {
		let id = id.into();
		let mut node = Self {
			name: id.clone(),
			id,
			store,
			category: Category::Hidden,
			item_style: ItemStyle::default(),
			symbol_size: None,
		};
		node.reveal();
		node
	}

	/// A node styled the way the payload styles `kind`.
	pub fn of_kind(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			store: kind.store(),
			category: kind.initial_category(),
			item_style: ItemStyle::default(),
			symbol_size: Some(kind.symbol_size()),
		}
	}

	/// Kind implied by the store value.
	pub fn kind(&self) -> NodeKind {
		NodeKind::from_store(self.store)
	}

	/// The group a node returns to when revealed: its own store value.
	pub fn natural_category(&self) -> Category {
		Category::Visible(self.store.max(0))
	}

	/// True while the node is not drawn.
	pub fn is_hidden(&self) -> bool {
		self.category.is_hidden()
	}

	/// Current fill.
	pub fn color(&self) -> &str {
		&self.item_style.color
	}

	/// The payload's diameter, or the default for the node's kind.
	pub fn size(&self) -> f64 {
		self.symbol_size.unwrap_or_else(|| self.kind().symbol_size())
	}

	/// Returns whether the node changed.
	pub fn hide(&mut self) -> bool {
		let changed = !self.is_hidden();
		self.category = Category::Hidden;
		changed
	}

	/// Restores the natural group. Returns whether the node changed.
	pub fn reveal(&mut self) -> bool {
		let natural = self.natural_category();
		let changed = self.category != natural;
		self.category = natural;
		changed
	}

	/// Returns whether the node changed.
	pub fn paint(&mut self, color: MarkColor) -> bool {
		let hex = color.hex();
		let changed = self.item_style.color != hex;
		if changed {
			self.item_style.color = hex.into();
		}
		changed
	}
}

/// Stroke pattern of a link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
	/// Context to concept, concept to instance.
	#[default]
	Solid,
	/// Between contexts.
	Dashed,
	/// Specialisations and references.
	Dotted,
}

/// The payload's `lineStyle` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyleSpec {
	/// Serialized as `type`.
	#[serde(rename = "type", default)]
	pub kind: LineStyle,
}

/// Directed link; flows downstream from `source` to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Upstream node id.
	pub source: String,
	/// Downstream node id; may name a node that does not exist.
	pub target: String,
	/// Solid unless the payload says otherwise.
	#[serde(default)]
	pub line_style: LineStyleSpec,
}

impl Edge {
	/// A solid link.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			line_style: LineStyleSpec::default(),
		}
	}

	/// Same link with another stroke.
	pub fn styled(mut self, style: LineStyle) -> Self {
		self.line_style.kind = style;
		self
	}

	/// Stroke pattern.
	pub fn style(&self) -> LineStyle {
		self.line_style.kind
	}
}

/// The graph currently on screen.
///
/// Node order is preserved from the payload; the chart projection is
/// derived from it and never edited directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
	/// In payload order.
	#[serde(rename = "data", alias = "nodes")]
	pub nodes: Vec<Node>,
	/// In payload order.
	#[serde(rename = "link", alias = "links", default)]
	pub edges: Vec<Edge>,
}

impl GraphSnapshot {
	/// Wraps nodes and edges without validating them.
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self { nodes, edges }
	}

	/// Parses a `{ "data": [...], "link": [...] }` payload.
	pub fn from_json(payload: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(payload)?)
	}

	/// Linear lookup by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Linear mutable lookup by id.
	pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// Ids of hidden nodes, in snapshot order.
	pub fn hidden_ids(&self) -> impl Iterator<Item = &str> {
		self.nodes
			.iter()
			.filter(|n| n.is_hidden())
			.map(|n| n.id.as_str())
	}
}
